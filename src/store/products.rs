use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DbErr, EntityTrait, LoaderTrait,
    Order, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, sea_query::Expr,
    sea_query::extension::postgres::PgExpr,
};
use sea_orm::ActiveValue::NotSet;

use crate::entity::{
    categories::{self, Entity as Categories},
    products::{ActiveModel, Column, Entity as Products, Model},
    sellers::{self, Entity as Sellers},
};

use super::{contains_pattern, now};

pub struct ProductWithRefs {
    pub product: Model,
    pub category: Option<categories::Model>,
    pub seller: Option<sellers::Model>,
}

pub struct ProductFields {
    pub name: String,
    pub price: f64,
    pub stock: i32,
    pub image: String,
    pub rating: i32,
    pub description: String,
    pub category_id: i32,
    pub seller_id: i32,
}

pub struct ProductFilter<'a> {
    pub search: Option<&'a str>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub sort_by: Column,
    pub order: Order,
    pub limit: u64,
    pub offset: u64,
}

/// One page of live products and the total matching the filter.
pub async fn find_page<C: ConnectionTrait>(
    db: &C,
    filter: ProductFilter<'_>,
) -> Result<(Vec<ProductWithRefs>, u64), DbErr> {
    let mut condition = Condition::all().add(Column::DeletedAt.is_null());
    if let Some(search) = filter.search.filter(|s| !s.is_empty()) {
        condition = condition.add(Expr::col(Column::Name).ilike(contains_pattern(search)));
    }
    if let Some(min_price) = filter.min_price {
        condition = condition.add(Column::Price.gte(min_price));
    }
    if let Some(max_price) = filter.max_price {
        condition = condition.add(Column::Price.lte(max_price));
    }

    let finder = Products::find()
        .filter(condition)
        .order_by(filter.sort_by, filter.order)
        .order_by_asc(Column::Id);
    let total = finder.clone().count(db).await?;
    let products = finder
        .limit(filter.limit)
        .offset(filter.offset)
        .all(db)
        .await?;

    Ok((with_refs(db, products).await?, total))
}

pub async fn find_by_id<C: ConnectionTrait>(
    db: &C,
    id: i32,
) -> Result<Option<ProductWithRefs>, DbErr> {
    let product = Products::find_by_id(id)
        .filter(Column::DeletedAt.is_null())
        .one(db)
        .await?;
    match product {
        Some(product) => Ok(with_refs(db, vec![product]).await?.pop()),
        None => Ok(None),
    }
}

pub async fn create<C: ConnectionTrait>(db: &C, fields: ProductFields) -> Result<Model, DbErr> {
    ActiveModel {
        id: NotSet,
        name: Set(fields.name),
        price: Set(fields.price),
        stock: Set(fields.stock),
        image: Set(fields.image),
        rating: Set(fields.rating),
        description: Set(fields.description),
        category_id: Set(fields.category_id),
        seller_id: Set(fields.seller_id),
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
    fields: ProductFields,
) -> Result<Model, DbErr> {
    let mut active: ActiveModel = existing.into();
    active.name = Set(fields.name);
    active.price = Set(fields.price);
    active.stock = Set(fields.stock);
    active.image = Set(fields.image);
    active.rating = Set(fields.rating);
    active.description = Set(fields.description);
    active.category_id = Set(fields.category_id);
    active.seller_id = Set(fields.seller_id);
    active.updated_at = Set(now());
    active.update(db).await
}

pub async fn soft_delete<C: ConnectionTrait>(db: &C, id: i32) -> Result<u64, DbErr> {
    let result = Products::update_many()
        .col_expr(Column::DeletedAt, Expr::value(now()))
        .filter(Column::Id.eq(id))
        .filter(Column::DeletedAt.is_null())
        .exec(db)
        .await?;
    Ok(result.rows_affected)
}

async fn with_refs<C: ConnectionTrait>(
    db: &C,
    products: Vec<Model>,
) -> Result<Vec<ProductWithRefs>, DbErr> {
    let categories = products
        .load_one(
            Categories::find().filter(categories::Column::DeletedAt.is_null()),
            db,
        )
        .await?;
    let sellers = products
        .load_one(Sellers::find().filter(sellers::Column::DeletedAt.is_null()), db)
        .await?;
    Ok(products
        .into_iter()
        .zip(categories)
        .zip(sellers)
        .map(|((product, category), seller)| ProductWithRefs {
            product,
            category,
            seller,
        })
        .collect())
}
