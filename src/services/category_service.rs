use axum::http::StatusCode;

use crate::{
    dto::categories::{CategoryList, CategoryRequest},
    entity::categories::Column,
    error::{AppError, AppResult},
    models::Category,
    response::{ApiResponse, Meta},
    routes::params::{CategoryQuery, CategorySortBy, SortOrder},
    slug::resolve_slug,
    state::AppState,
    store::categories::{self, CategoryFields, CategoryFilter},
    validation::{Validate, ensure_valid},
};

const SLUG_TAKEN: &str = "Category with this name or slug already exists";

pub async fn list_categories(
    state: &AppState,
    query: CategoryQuery,
) -> AppResult<ApiResponse<CategoryList>> {
    let sort_by = match query.sort_by.unwrap_or(CategorySortBy::Name) {
        CategorySortBy::Name => Column::Name,
        CategorySortBy::CreatedAt => Column::CreatedAt,
    };
    let order = query.sort_order.unwrap_or(SortOrder::Asc).as_order();

    let items: Vec<Category> = categories::find_all(
        &state.orm,
        CategoryFilter {
            search: query.search.as_deref(),
            sort_by,
            order,
        },
    )
    .await?
    .into_iter()
    .map(|c| Category::from_parts(c.category, c.products))
    .collect();

    let total = items.len() as i64;
    Ok(ApiResponse::success(
        "Categories",
        CategoryList { items },
        Some(Meta::new(1, total, total)),
    ))
}

pub async fn get_category(state: &AppState, id: i32) -> AppResult<ApiResponse<Category>> {
    let found = categories::find_by_id(&state.orm, id)
        .await?
        .ok_or_else(|| AppError::not_found("Category"))?;
    Ok(ApiResponse::success(
        "Category",
        Category::from_parts(found.category, found.products),
        None,
    ))
}

pub async fn create_category(
    state: &AppState,
    payload: CategoryRequest,
) -> AppResult<ApiResponse<Category>> {
    let slug = resolve_slug(&payload.name, payload.slug.as_deref());
    ensure_valid(payload.validate())?;

    if categories::find_by_slug(&state.orm, &slug).await?.is_some() {
        return Err(AppError::Conflict(SLUG_TAKEN.into()));
    }

    let category = categories::create(
        &state.orm,
        CategoryFields {
            name: payload.name,
            slug,
            image: payload.image,
        },
    )
    .await
    .map_err(|e| AppError::unique_violation(e, SLUG_TAKEN))?;

    tracing::info!(category_id = category.id, slug = %category.slug, "category created");
    Ok(ApiResponse::created(
        "Category created successfully",
        Category::from_parts(category, Vec::new()),
    ))
}

pub async fn update_category(
    state: &AppState,
    id: i32,
    payload: CategoryRequest,
) -> AppResult<ApiResponse<Category>> {
    let existing = categories::find_model_by_id(&state.orm, id)
        .await?
        .ok_or_else(|| AppError::not_found("Category"))?;

    let slug = resolve_slug(&payload.name, payload.slug.as_deref());
    ensure_valid(payload.validate())?;

    let holder = categories::find_by_slug(&state.orm, &slug).await?;
    if holder.is_some_and(|other| other.id != existing.id) {
        return Err(AppError::Conflict(SLUG_TAKEN.into()));
    }

    categories::update(
        &state.orm,
        existing,
        CategoryFields {
            name: payload.name,
            slug,
            image: payload.image,
        },
    )
    .await
    .map_err(|e| AppError::unique_violation(e, SLUG_TAKEN))?;

    let found = categories::find_by_id(&state.orm, id)
        .await?
        .ok_or_else(|| AppError::not_found("Category"))?;
    Ok(ApiResponse::success(
        "Category updated successfully",
        Category::from_parts(found.category, found.products),
        None,
    ))
}

pub async fn delete_category(state: &AppState, id: i32) -> AppResult<ApiResponse<()>> {
    if categories::soft_delete(&state.orm, id).await? == 0 {
        return Err(AppError::not_found("Category"));
    }
    tracing::info!(category_id = id, "category deleted");
    Ok(ApiResponse::message_only(
        StatusCode::OK,
        "Category deleted successfully",
    ))
}
