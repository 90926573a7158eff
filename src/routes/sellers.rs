use axum::{
    Router,
    extract::{Path, State},
    routing::get,
};

use crate::{
    dto::sellers::{SellerList, UpdateSellerRequest},
    error::AppResult,
    middleware::auth::AuthUser,
    models::Seller,
    response::ApiResponse,
    routes::extract::{AppJson, parse_id},
    services::seller_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/sellers", get(list_sellers))
        .route("/sellers/{id}", get(get_seller))
        .route(
            "/seller/profile",
            get(get_profile).put(update_profile).delete(delete_profile),
        )
}

#[utoipa::path(
    get,
    path = "/api/sellers",
    responses(
        (status = 200, description = "Sellers with their products", body = ApiResponse<SellerList>)
    ),
    security(("bearer_auth" = [])),
    tag = "Sellers"
)]
pub async fn list_sellers(
    State(state): State<AppState>,
    _user: AuthUser,
) -> AppResult<ApiResponse<SellerList>> {
    seller_service::list_sellers(&state).await
}

#[utoipa::path(
    get,
    path = "/api/sellers/{id}",
    params(("id" = i32, Path, description = "Seller ID")),
    responses(
        (status = 200, description = "Seller", body = ApiResponse<Seller>),
        (status = 400, description = "Invalid ID format"),
        (status = 404, description = "Seller not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Sellers"
)]
pub async fn get_seller(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<Seller>> {
    seller_service::get_seller(&state, parse_id(&id)?).await
}

#[utoipa::path(
    get,
    path = "/api/seller/profile",
    responses(
        (status = 200, description = "Caller's seller profile", body = ApiResponse<Seller>),
        (status = 403, description = "Incorrect role")
    ),
    security(("bearer_auth" = [])),
    tag = "Sellers"
)]
pub async fn get_profile(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<ApiResponse<Seller>> {
    seller_service::get_profile(&state, &user).await
}

#[utoipa::path(
    put,
    path = "/api/seller/profile",
    request_body = UpdateSellerRequest,
    responses(
        (status = 200, description = "Profile updated", body = ApiResponse<Seller>),
        (status = 409, description = "Email already exists"),
        (status = 422, description = "Validation failed")
    ),
    security(("bearer_auth" = [])),
    tag = "Sellers"
)]
pub async fn update_profile(
    State(state): State<AppState>,
    user: AuthUser,
    AppJson(payload): AppJson<UpdateSellerRequest>,
) -> AppResult<ApiResponse<Seller>> {
    seller_service::update_profile(&state, &user, payload).await
}

#[utoipa::path(
    delete,
    path = "/api/seller/profile",
    responses(
        (status = 200, description = "Profile and account deleted"),
        (status = 403, description = "Incorrect role")
    ),
    security(("bearer_auth" = [])),
    tag = "Sellers"
)]
pub async fn delete_profile(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<ApiResponse<()>> {
    seller_service::delete_profile(&state, &user).await
}
