pub mod auth;
pub mod categories;
pub mod customers;
pub mod products;
pub mod sellers;
pub mod upload;
