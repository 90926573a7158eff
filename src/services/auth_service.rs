use sea_orm::TransactionTrait;

use crate::{
    dto::auth::{LoginRequest, LoginResponse, RefreshRequest, RegisterRequest},
    error::{AppError, AppResult},
    models::{Account, Role},
    password::{hash_password_blocking, verify_password_blocking},
    response::ApiResponse,
    state::AppState,
    store::{
        customers::{self, NewCustomer},
        sellers::{self, NewSeller},
        users::{self, NewUser},
    },
    token::{Identity, TokenPair},
    validation::{Validate, check_password, ensure_valid},
};

const EMAIL_TAKEN: &str = "Email already exists";

/// Create an account and the one profile its role calls for.
///
/// Both rows are written in a single transaction, so a failed profile insert
/// leaves no orphaned account behind.
pub async fn register_user(
    state: &AppState,
    payload: RegisterRequest,
) -> AppResult<ApiResponse<Account>> {
    ensure_valid(check_password(&payload.password, payload.validate()))?;
    let role = parse_role(&payload.role)?;

    if users::find_by_email(&state.orm, &payload.email).await?.is_some() {
        return Err(AppError::Conflict(EMAIL_TAKEN.into()));
    }

    let RegisterRequest {
        name,
        email,
        phone,
        password,
        ..
    } = payload;
    let password_hash = hash_password_blocking(password).await?;

    let txn = state.orm.begin().await?;
    let user = users::create(
        &txn,
        NewUser {
            email,
            password_hash,
            role,
        },
    )
    .await
    .map_err(|e| AppError::unique_violation(e, EMAIL_TAKEN))?;

    match role {
        Role::Seller => {
            sellers::create(
                &txn,
                NewSeller {
                    user_id: user.id,
                    name,
                    phone,
                },
            )
            .await?;
        }
        Role::Customer => {
            customers::create(
                &txn,
                NewCustomer {
                    user_id: user.id,
                    name,
                    phone,
                },
            )
            .await?;
        }
    }
    txn.commit().await?;

    tracing::info!(user_id = user.id, role = %role, "account registered");
    Ok(ApiResponse::created("User created successfully", Account::from(user)))
}

pub async fn login_user(
    state: &AppState,
    payload: LoginRequest,
) -> AppResult<ApiResponse<LoginResponse>> {
    ensure_valid(check_password(&payload.password, payload.validate()))?;
    let claimed_role = parse_role(&payload.role)?;

    let user = users::find_by_email(&state.orm, &payload.email)
        .await?
        .ok_or_else(|| AppError::NotFound("Email not found".into()))?;

    let role = Role::parse(&user.role).ok_or_else(|| {
        AppError::Internal(anyhow::anyhow!("account {} has unknown role {}", user.id, user.role))
    })?;
    if role != claimed_role {
        return Err(AppError::Forbidden("Role not same".into()));
    }

    if !verify_password_blocking(payload.password, user.password_hash.clone()).await? {
        tracing::debug!(user_id = user.id, "password mismatch");
        return Err(AppError::Unauthorized("Invalid password".into()));
    }

    let identity = Identity {
        id: user.id,
        email: user.email,
        role,
    };
    let TokenPair {
        token,
        refresh_token,
    } = state.tokens.issue_pair(&identity)?;

    tracing::info!(user_id = identity.id, "logged in");
    Ok(ApiResponse::success(
        "Login successfully",
        LoginResponse {
            email: identity.email,
            role,
            token,
            refresh_token,
        },
        None,
    ))
}

/// Exchange a refresh token for a new pair. Only the token's signature,
/// expiry and kind are checked; the store is not consulted.
pub async fn refresh_token(
    state: &AppState,
    payload: RefreshRequest,
) -> AppResult<ApiResponse<TokenPair>> {
    if payload.refresh_token.is_empty() {
        return Err(AppError::BadRequest("refresh_token is required".into()));
    }
    let pair = state.tokens.refresh(&payload.refresh_token)?;
    Ok(ApiResponse::created("Refresh successfully", pair))
}

fn parse_role(raw: &str) -> AppResult<Role> {
    Role::parse(raw).ok_or_else(|| AppError::BadRequest(format!("Unknown role {raw}")))
}
