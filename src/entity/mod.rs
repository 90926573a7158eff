pub mod categories;
pub mod customers;
pub mod products;
pub mod sellers;
pub mod users;

pub use categories::Entity as Categories;
pub use customers::Entity as Customers;
pub use products::Entity as Products;
pub use sellers::Entity as Sellers;
pub use users::Entity as Users;
