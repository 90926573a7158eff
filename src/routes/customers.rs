use axum::{
    Router,
    extract::{Path, State},
    routing::get,
};

use crate::{
    dto::customers::{CustomerList, UpdateCustomerRequest},
    error::AppResult,
    middleware::auth::AuthUser,
    models::Customer,
    response::ApiResponse,
    routes::extract::{AppJson, parse_id},
    services::customer_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/customers", get(list_customers))
        .route("/customers/{id}", get(get_customer))
        .route(
            "/customer/profile",
            get(get_profile).put(update_profile).delete(delete_profile),
        )
}

#[utoipa::path(
    get,
    path = "/api/customers",
    responses(
        (status = 200, description = "Customers with their accounts", body = ApiResponse<CustomerList>)
    ),
    security(("bearer_auth" = [])),
    tag = "Customers"
)]
pub async fn list_customers(
    State(state): State<AppState>,
    _user: AuthUser,
) -> AppResult<ApiResponse<CustomerList>> {
    customer_service::list_customers(&state).await
}

#[utoipa::path(
    get,
    path = "/api/customers/{id}",
    params(("id" = i32, Path, description = "Customer ID")),
    responses(
        (status = 200, description = "Customer", body = ApiResponse<Customer>),
        (status = 400, description = "Invalid ID format"),
        (status = 404, description = "Customer not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Customers"
)]
pub async fn get_customer(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<Customer>> {
    customer_service::get_customer(&state, parse_id(&id)?).await
}

#[utoipa::path(
    get,
    path = "/api/customer/profile",
    responses(
        (status = 200, description = "Caller's customer profile", body = ApiResponse<Customer>),
        (status = 403, description = "Incorrect role")
    ),
    security(("bearer_auth" = [])),
    tag = "Customers"
)]
pub async fn get_profile(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<ApiResponse<Customer>> {
    customer_service::get_profile(&state, &user).await
}

#[utoipa::path(
    put,
    path = "/api/customer/profile",
    request_body = UpdateCustomerRequest,
    responses(
        (status = 200, description = "Profile updated", body = ApiResponse<Customer>),
        (status = 409, description = "Email already exists"),
        (status = 422, description = "Validation failed")
    ),
    security(("bearer_auth" = [])),
    tag = "Customers"
)]
pub async fn update_profile(
    State(state): State<AppState>,
    user: AuthUser,
    AppJson(payload): AppJson<UpdateCustomerRequest>,
) -> AppResult<ApiResponse<Customer>> {
    customer_service::update_profile(&state, &user, payload).await
}

#[utoipa::path(
    delete,
    path = "/api/customer/profile",
    responses(
        (status = 200, description = "Profile and account deleted"),
        (status = 403, description = "Incorrect role")
    ),
    security(("bearer_auth" = [])),
    tag = "Customers"
)]
pub async fn delete_profile(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<ApiResponse<()>> {
    customer_service::delete_profile(&state, &user).await
}
