pub mod auth_service;
pub mod category_service;
pub mod customer_service;
pub mod product_service;
pub mod seller_service;
pub mod upload_service;
