use axum::{Router, extract::State, routing::post};

use crate::{
    dto::auth::{LoginRequest, LoginResponse, RefreshRequest, RegisterRequest},
    error::AppResult,
    models::Account,
    response::ApiResponse,
    routes::extract::AppJson,
    services::auth_service,
    state::AppState,
    token::TokenPair,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/refreshToken", post(refresh_token))
}

#[utoipa::path(
    post,
    path = "/api/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account and profile created", body = ApiResponse<Account>),
        (status = 409, description = "Email already exists"),
        (status = 422, description = "Validation failed")
    ),
    tag = "Auth"
)]
pub async fn register(
    State(state): State<AppState>,
    AppJson(payload): AppJson<RegisterRequest>,
) -> AppResult<ApiResponse<Account>> {
    auth_service::register_user(&state, payload).await
}

#[utoipa::path(
    post,
    path = "/api/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Token pair issued", body = ApiResponse<LoginResponse>),
        (status = 401, description = "Invalid password"),
        (status = 403, description = "Role does not match the account"),
        (status = 404, description = "Email not found")
    ),
    tag = "Auth"
)]
pub async fn login(
    State(state): State<AppState>,
    AppJson(payload): AppJson<LoginRequest>,
) -> AppResult<ApiResponse<LoginResponse>> {
    auth_service::login_user(&state, payload).await
}

#[utoipa::path(
    post,
    path = "/api/refreshToken",
    request_body = RefreshRequest,
    responses(
        (status = 201, description = "New token pair", body = ApiResponse<TokenPair>),
        (status = 401, description = "Invalid or expired token")
    ),
    tag = "Auth"
)]
pub async fn refresh_token(
    State(state): State<AppState>,
    AppJson(payload): AppJson<RefreshRequest>,
) -> AppResult<ApiResponse<TokenPair>> {
    auth_service::refresh_token(&state, payload).await
}
