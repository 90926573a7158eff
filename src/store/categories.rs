use std::collections::HashMap;

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, LoaderTrait, Order,
    QueryFilter, QueryOrder, Set, sea_query::Expr, sea_query::extension::postgres::PgExpr,
};
use sea_orm::ActiveValue::NotSet;

use crate::entity::{
    categories::{ActiveModel, Column, Entity as Categories, Model},
    products::{self, Entity as Products},
};

use super::{contains_pattern, now};

pub struct CategoryWithProducts {
    pub category: Model,
    pub products: Vec<products::Model>,
}

pub struct CategoryFields {
    pub name: String,
    pub slug: String,
    pub image: String,
}

pub struct CategoryFilter<'a> {
    pub search: Option<&'a str>,
    pub sort_by: Column,
    pub order: Order,
}

pub async fn find_all<C: ConnectionTrait>(
    db: &C,
    filter: CategoryFilter<'_>,
) -> Result<Vec<CategoryWithProducts>, DbErr> {
    let mut finder = Categories::find().filter(Column::DeletedAt.is_null());
    if let Some(search) = filter.search.filter(|s| !s.is_empty()) {
        finder = finder.filter(Expr::col(Column::Name).ilike(contains_pattern(search)));
    }
    let categories = finder.order_by(filter.sort_by, filter.order).all(db).await?;
    with_products(db, categories).await
}

pub async fn find_by_id<C: ConnectionTrait>(
    db: &C,
    id: i32,
) -> Result<Option<CategoryWithProducts>, DbErr> {
    let Some(category) = find_model_by_id(db, id).await? else {
        return Ok(None);
    };
    Ok(with_products(db, vec![category]).await?.pop())
}

pub async fn find_model_by_id<C: ConnectionTrait>(db: &C, id: i32) -> Result<Option<Model>, DbErr> {
    Categories::find_by_id(id)
        .filter(Column::DeletedAt.is_null())
        .one(db)
        .await
}

pub async fn find_by_slug<C: ConnectionTrait>(db: &C, slug: &str) -> Result<Option<Model>, DbErr> {
    Categories::find()
        .filter(Column::Slug.eq(slug))
        .filter(Column::DeletedAt.is_null())
        .one(db)
        .await
}

/// Names of the live categories among `ids`, keyed by id.
pub async fn names_by_ids<C: ConnectionTrait>(
    db: &C,
    ids: Vec<i32>,
) -> Result<HashMap<i32, String>, DbErr> {
    if ids.is_empty() {
        return Ok(HashMap::new());
    }
    let rows = Categories::find()
        .filter(Column::Id.is_in(ids))
        .filter(Column::DeletedAt.is_null())
        .all(db)
        .await?;
    Ok(rows.into_iter().map(|c| (c.id, c.name)).collect())
}

pub async fn create<C: ConnectionTrait>(db: &C, fields: CategoryFields) -> Result<Model, DbErr> {
    ActiveModel {
        id: NotSet,
        name: Set(fields.name),
        slug: Set(fields.slug),
        image: Set(fields.image),
        created_at: NotSet,
        updated_at: NotSet,
        deleted_at: NotSet,
    }
    .insert(db)
    .await
}

pub async fn update<C: ConnectionTrait>(
    db: &C,
    existing: Model,
    fields: CategoryFields,
) -> Result<Model, DbErr> {
    let mut active: ActiveModel = existing.into();
    active.name = Set(fields.name);
    active.slug = Set(fields.slug);
    active.image = Set(fields.image);
    active.updated_at = Set(now());
    active.update(db).await
}

pub async fn soft_delete<C: ConnectionTrait>(db: &C, id: i32) -> Result<u64, DbErr> {
    let result = Categories::update_many()
        .col_expr(Column::DeletedAt, Expr::value(now()))
        .filter(Column::Id.eq(id))
        .filter(Column::DeletedAt.is_null())
        .exec(db)
        .await?;
    Ok(result.rows_affected)
}

async fn with_products<C: ConnectionTrait>(
    db: &C,
    categories: Vec<Model>,
) -> Result<Vec<CategoryWithProducts>, DbErr> {
    let products = categories
        .load_many(
            Products::find()
                .filter(products::Column::DeletedAt.is_null())
                .order_by_asc(products::Column::Id),
            db,
        )
        .await?;
    Ok(categories
        .into_iter()
        .zip(products)
        .map(|(category, products)| CategoryWithProducts { category, products })
        .collect())
}
