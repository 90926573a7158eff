use axum::http::StatusCode;
use sea_orm::TransactionTrait;

use crate::{
    dto::sellers::{SellerList, UpdateSellerRequest},
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_role},
    models::{Role, Seller},
    response::{ApiResponse, Meta},
    state::AppState,
    store::{
        sellers::{self, SellerDetails, SellerFields},
        users,
    },
    validation::{Validate, ensure_valid},
};

pub async fn list_sellers(state: &AppState) -> AppResult<ApiResponse<SellerList>> {
    let details = sellers::find_all(&state.orm).await?;
    let items = sellers_from_details(details);
    let total = items.len() as i64;
    Ok(ApiResponse::success(
        "Sellers",
        SellerList { items },
        Some(Meta::new(1, total, total)),
    ))
}

pub async fn get_seller(state: &AppState, id: i32) -> AppResult<ApiResponse<Seller>> {
    let details = sellers::find_by_id(&state.orm, id)
        .await?
        .ok_or_else(|| AppError::not_found("Seller"))?;
    let seller = single_seller(details)?;
    Ok(ApiResponse::success("Seller", seller, None))
}

pub async fn get_profile(state: &AppState, user: &AuthUser) -> AppResult<ApiResponse<Seller>> {
    ensure_role(user, Role::Seller)?;
    let details = sellers::find_by_user_id(&state.orm, user.user_id)
        .await?
        .ok_or_else(|| AppError::not_found("Seller"))?;
    let seller = single_seller(details)?;
    Ok(ApiResponse::success("Seller profile", seller, None))
}

/// Update the caller's account email and seller profile together.
pub async fn update_profile(
    state: &AppState,
    user: &AuthUser,
    payload: UpdateSellerRequest,
) -> AppResult<ApiResponse<Seller>> {
    ensure_role(user, Role::Seller)?;
    let mut details = sellers::find_by_user_id(&state.orm, user.user_id)
        .await?
        .ok_or_else(|| AppError::not_found("Seller"))?;
    let aggregate = details
        .aggregates
        .pop()
        .ok_or_else(|| AppError::not_found("Seller"))?;
    let account = aggregate
        .user
        .ok_or_else(|| AppError::NotFound("Seller not found the user".into()))?;

    ensure_valid(payload.validate())?;

    let owner = users::find_by_email(&state.orm, &payload.email).await?;
    if owner.is_some_and(|other| other.id != account.id) {
        return Err(AppError::Conflict("Email already exists".into()));
    }

    let UpdateSellerRequest {
        name,
        email,
        image,
        phone,
        description,
    } = payload;

    let txn = state.orm.begin().await?;
    if account.email != email {
        users::update_email(&txn, account, email)
            .await
            .map_err(|e| AppError::unique_violation(e, "Email already exists"))?;
    }
    sellers::update(
        &txn,
        aggregate.seller,
        SellerFields {
            name,
            phone,
            description,
            image,
        },
    )
    .await?;
    txn.commit().await?;

    tracing::info!(user_id = user.user_id, "seller profile updated");
    let details = sellers::find_by_user_id(&state.orm, user.user_id)
        .await?
        .ok_or_else(|| AppError::not_found("Seller"))?;
    Ok(ApiResponse::success(
        "Profile updated successfully",
        single_seller(details)?,
        None,
    ))
}

/// Remove the seller profile, then its account, atomically.
pub async fn delete_profile(
    state: &AppState,
    user: &AuthUser,
) -> AppResult<ApiResponse<()>> {
    ensure_role(user, Role::Seller)?;
    let mut details = sellers::find_by_user_id(&state.orm, user.user_id)
        .await?
        .ok_or_else(|| AppError::not_found("Seller"))?;
    let aggregate = details
        .aggregates
        .pop()
        .ok_or_else(|| AppError::not_found("Seller"))?;
    let account = aggregate
        .user
        .ok_or_else(|| AppError::NotFound("Seller not found the user".into()))?;

    let txn = state.orm.begin().await?;
    sellers::soft_delete(&txn, aggregate.seller.id).await?;
    users::soft_delete(&txn, account.id).await?;
    txn.commit().await?;

    tracing::info!(user_id = account.id, "seller account deleted");
    Ok(ApiResponse::message_only(StatusCode::OK, "User deleted successfully"))
}

fn sellers_from_details(details: SellerDetails) -> Vec<Seller> {
    let SellerDetails {
        aggregates,
        category_names,
    } = details;
    aggregates
        .into_iter()
        .map(|a| Seller::from_parts(a.seller, a.user, a.products, &category_names))
        .collect()
}

/// The one seller in `details`, rejecting profiles whose account is not a seller.
fn single_seller(details: SellerDetails) -> AppResult<Seller> {
    let seller = sellers_from_details(details)
        .pop()
        .ok_or_else(|| AppError::not_found("Seller"))?;
    if seller.role.as_deref() != Some(Role::Seller.as_str()) {
        return Err(AppError::BadRequest(
            "Role of this user is customer or not seller".into(),
        ));
    }
    Ok(seller)
}
