use axum::http::StatusCode;
use chrono::NaiveDate;
use sea_orm::TransactionTrait;

use crate::{
    dto::customers::{CustomerList, UpdateCustomerRequest},
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_role},
    models::{Customer, Role},
    response::{ApiResponse, Meta},
    state::AppState,
    store::{
        customers::{self, CustomerFields, CustomerWithUser},
        users,
    },
    validation::{Validate, ensure_valid},
};

pub async fn list_customers(state: &AppState) -> AppResult<ApiResponse<CustomerList>> {
    let items: Vec<Customer> = customers::find_all(&state.orm)
        .await?
        .into_iter()
        .map(|c| Customer::from_parts(c.customer, c.user))
        .collect();
    let total = items.len() as i64;
    Ok(ApiResponse::success(
        "Customers",
        CustomerList { items },
        Some(Meta::new(1, total, total)),
    ))
}

pub async fn get_customer(state: &AppState, id: i32) -> AppResult<ApiResponse<Customer>> {
    let found = customers::find_by_id(&state.orm, id)
        .await?
        .ok_or_else(|| AppError::not_found("Customer"))?;
    Ok(ApiResponse::success("Customer", single_customer(found)?, None))
}

pub async fn get_profile(state: &AppState, user: &AuthUser) -> AppResult<ApiResponse<Customer>> {
    ensure_role(user, Role::Customer)?;
    let found = customers::find_by_user_id(&state.orm, user.user_id)
        .await?
        .ok_or_else(|| AppError::not_found("Customer"))?;
    Ok(ApiResponse::success(
        "Customer profile",
        single_customer(found)?,
        None,
    ))
}

pub async fn update_profile(
    state: &AppState,
    user: &AuthUser,
    payload: UpdateCustomerRequest,
) -> AppResult<ApiResponse<Customer>> {
    ensure_role(user, Role::Customer)?;
    let found = customers::find_by_user_id(&state.orm, user.user_id)
        .await?
        .ok_or_else(|| AppError::not_found("Customer"))?;
    let account = found
        .user
        .ok_or_else(|| AppError::NotFound("Customer not found the user".into()))?;

    ensure_valid(payload.validate())?;

    let owner = users::find_by_email(&state.orm, &payload.email).await?;
    if owner.is_some_and(|other| other.id != account.id) {
        return Err(AppError::Conflict("Email already exists".into()));
    }

    let date_of_birth = NaiveDate::parse_from_str(&payload.date_of_birth, "%Y-%m-%d")
        .map_err(|_| AppError::BadRequest("Date format invalid".into()))?;

    let UpdateCustomerRequest {
        name,
        email,
        image,
        phone,
        gender,
        ..
    } = payload;

    let txn = state.orm.begin().await?;
    if account.email != email {
        users::update_email(&txn, account, email)
            .await
            .map_err(|e| AppError::unique_violation(e, "Email already exists"))?;
    }
    customers::update(
        &txn,
        found.customer,
        CustomerFields {
            name,
            phone,
            gender,
            date_of_birth,
            image,
        },
    )
    .await?;
    txn.commit().await?;

    tracing::info!(user_id = user.user_id, "customer profile updated");
    let refreshed = customers::find_by_user_id(&state.orm, user.user_id)
        .await?
        .ok_or_else(|| AppError::not_found("Customer"))?;
    Ok(ApiResponse::success(
        "Profile updated successfully",
        single_customer(refreshed)?,
        None,
    ))
}

/// Remove the customer profile, then its account, atomically.
pub async fn delete_profile(state: &AppState, user: &AuthUser) -> AppResult<ApiResponse<()>> {
    ensure_role(user, Role::Customer)?;
    let found = customers::find_by_user_id(&state.orm, user.user_id)
        .await?
        .ok_or_else(|| AppError::not_found("Customer"))?;
    let account = found
        .user
        .ok_or_else(|| AppError::NotFound("Customer not found the user".into()))?;

    let txn = state.orm.begin().await?;
    customers::soft_delete(&txn, found.customer.id).await?;
    users::soft_delete(&txn, account.id).await?;
    txn.commit().await?;

    tracing::info!(user_id = account.id, "customer account deleted");
    Ok(ApiResponse::message_only(StatusCode::OK, "User deleted successfully"))
}

fn single_customer(found: CustomerWithUser) -> AppResult<Customer> {
    let customer = Customer::from_parts(found.customer, found.user);
    if customer.role.as_deref() != Some(Role::Customer.as_str()) {
        return Err(AppError::BadRequest("Role of this user is not customer".into()));
    }
    Ok(customer)
}
