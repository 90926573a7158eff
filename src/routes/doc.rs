use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        auth::{LoginRequest, LoginResponse, RefreshRequest, RegisterRequest},
        categories::{CategoryList, CategoryRequest},
        customers::{CustomerList, UpdateCustomerRequest},
        products::{ProductList, ProductRequest},
        sellers::{SellerList, UpdateSellerRequest},
        upload::{UploadForm, UploadedFile},
    },
    models::{Account, Category, Customer, Product, ProductSummary, Role, Seller},
    response::{ApiResponse, Meta},
    routes::{auth, categories, customers, health, params, products, sellers, upload},
    token::TokenPair,
    validation::FieldError,
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        auth::register,
        auth::login,
        auth::refresh_token,
        sellers::list_sellers,
        sellers::get_seller,
        sellers::get_profile,
        sellers::update_profile,
        sellers::delete_profile,
        customers::list_customers,
        customers::get_customer,
        customers::get_profile,
        customers::update_profile,
        customers::delete_profile,
        categories::list_categories,
        categories::get_category,
        categories::create_category,
        categories::update_category,
        categories::delete_category,
        products::list_products,
        products::get_product,
        products::create_product,
        products::update_product,
        products::delete_product,
        upload::upload_file
    ),
    components(
        schemas(
            Role,
            Account,
            Seller,
            Customer,
            Category,
            Product,
            ProductSummary,
            TokenPair,
            FieldError,
            Meta,
            RegisterRequest,
            LoginRequest,
            LoginResponse,
            RefreshRequest,
            UpdateSellerRequest,
            UpdateCustomerRequest,
            CategoryRequest,
            ProductRequest,
            UploadForm,
            UploadedFile,
            SellerList,
            CustomerList,
            CategoryList,
            ProductList,
            params::SortOrder,
            params::ProductSortBy,
            params::CategorySortBy,
            ApiResponse<Account>,
            ApiResponse<LoginResponse>,
            ApiResponse<TokenPair>,
            ApiResponse<Product>,
            ApiResponse<ProductList>,
            ApiResponse<Category>,
            ApiResponse<CategoryList>
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Auth", description = "Registration, login and token refresh"),
        (name = "Sellers", description = "Seller accounts and profiles"),
        (name = "Customers", description = "Customer accounts and profiles"),
        (name = "Categories", description = "Category endpoints"),
        (name = "Products", description = "Product endpoints"),
        (name = "Upload", description = "File upload"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
