use axum::http::StatusCode;

use crate::{
    dto::products::{ProductList, ProductRequest},
    entity::{categories as category_entity, products::Column, sellers as seller_entity},
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_role},
    models::{Product, Role},
    response::{ApiResponse, Meta},
    routes::params::{ProductQuery, ProductSortBy, SortOrder},
    state::AppState,
    store::{
        categories,
        products::{self, ProductFields, ProductFilter, ProductWithRefs},
        sellers,
    },
    validation::{Validate, ensure_valid},
};

pub async fn list_products(
    state: &AppState,
    query: ProductQuery,
) -> AppResult<ApiResponse<ProductList>> {
    let (page, limit, offset) = query.pagination().normalize();
    let sort_by = match query.sort_by.unwrap_or(ProductSortBy::CreatedAt) {
        ProductSortBy::CreatedAt => Column::CreatedAt,
        ProductSortBy::Price => Column::Price,
        ProductSortBy::Name => Column::Name,
    };
    let order = query.sort_order.unwrap_or(SortOrder::Desc).as_order();

    let (rows, total) = products::find_page(
        &state.orm,
        ProductFilter {
            search: query.q.as_deref(),
            min_price: query.min_price,
            max_price: query.max_price,
            sort_by,
            order,
            limit: limit as u64,
            offset: offset as u64,
        },
    )
    .await?;

    let items = rows.into_iter().map(product_from_refs).collect();
    let meta = Meta::new(page, limit, total as i64);
    Ok(ApiResponse::success("Products", ProductList { items }, Some(meta)))
}

pub async fn get_product(state: &AppState, id: i32) -> AppResult<ApiResponse<Product>> {
    let found = products::find_by_id(&state.orm, id)
        .await?
        .ok_or_else(|| AppError::not_found("Product"))?;
    Ok(ApiResponse::success("Product", product_from_refs(found), None))
}

/// Create a product for one of the caller's seller profiles. The referenced
/// category and seller must exist before anything is written.
pub async fn create_product(
    state: &AppState,
    user: &AuthUser,
    payload: ProductRequest,
) -> AppResult<ApiResponse<Product>> {
    ensure_role(user, Role::Seller)?;
    ensure_valid(payload.validate())?;

    let (category, seller) = resolve_refs(state, user, &payload).await?;
    let product = products::create(&state.orm, fields_from(payload)).await?;

    tracing::info!(product_id = product.id, seller_id = seller.id, "product created");
    Ok(ApiResponse::created(
        "Product created successfully",
        Product::from_parts(product, Some(&category), Some(&seller)),
    ))
}

pub async fn update_product(
    state: &AppState,
    user: &AuthUser,
    id: i32,
    payload: ProductRequest,
) -> AppResult<ApiResponse<Product>> {
    ensure_role(user, Role::Seller)?;
    let existing = products::find_by_id(&state.orm, id)
        .await?
        .ok_or_else(|| AppError::not_found("Product"))?;
    ensure_owner(user, existing.seller.as_ref())?;

    ensure_valid(payload.validate())?;
    let (category, seller) = resolve_refs(state, user, &payload).await?;

    let product = products::update(&state.orm, existing.product, fields_from(payload)).await?;

    tracing::info!(product_id = product.id, "product updated");
    Ok(ApiResponse::success(
        format!("Product with ID {id} updated successfully"),
        Product::from_parts(product, Some(&category), Some(&seller)),
        None,
    ))
}

pub async fn delete_product(
    state: &AppState,
    user: &AuthUser,
    id: i32,
) -> AppResult<ApiResponse<()>> {
    ensure_role(user, Role::Seller)?;
    let existing = products::find_by_id(&state.orm, id)
        .await?
        .ok_or_else(|| AppError::not_found("Product"))?;
    ensure_owner(user, existing.seller.as_ref())?;

    if products::soft_delete(&state.orm, id).await? == 0 {
        return Err(AppError::not_found("Product"));
    }

    tracing::info!(product_id = id, "product deleted");
    Ok(ApiResponse::message_only(
        StatusCode::OK,
        format!("Product with ID {id} deleted successfully"),
    ))
}

async fn resolve_refs(
    state: &AppState,
    user: &AuthUser,
    payload: &ProductRequest,
) -> AppResult<(category_entity::Model, seller_entity::Model)> {
    let category = categories::find_model_by_id(&state.orm, payload.category_id)
        .await?
        .ok_or_else(|| AppError::not_found("Category"))?;
    let seller = sellers::find_model_by_id(&state.orm, payload.seller_id)
        .await?
        .ok_or_else(|| AppError::not_found("Seller"))?;
    ensure_owner(user, Some(&seller))?;
    Ok((category, seller))
}

fn ensure_owner(user: &AuthUser, seller: Option<&seller_entity::Model>) -> AppResult<()> {
    match seller {
        Some(seller) if seller.user_id == user.user_id => Ok(()),
        _ => Err(AppError::Forbidden(
            "Product does not belong to this seller".into(),
        )),
    }
}

fn fields_from(payload: ProductRequest) -> ProductFields {
    ProductFields {
        name: payload.name,
        price: payload.price,
        stock: payload.stock,
        image: payload.image,
        rating: payload.rating,
        description: payload.description,
        category_id: payload.category_id,
        seller_id: payload.seller_id,
    }
}

fn product_from_refs(found: ProductWithRefs) -> Product {
    Product::from_parts(found.product, found.category.as_ref(), found.seller.as_ref())
}
