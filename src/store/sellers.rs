use std::collections::HashMap;

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, LoaderTrait, QueryFilter,
    QueryOrder, Set, sea_query::Expr,
};
use sea_orm::ActiveValue::NotSet;

use crate::entity::{
    products::{self, Entity as Products},
    sellers::{ActiveModel, Column, Entity as Sellers, Model},
    users::{self, Entity as Users},
};

use super::{categories, now};

pub struct SellerAggregate {
    pub seller: Model,
    pub user: Option<users::Model>,
    pub products: Vec<products::Model>,
}

/// Sellers with their accounts and live products, plus the names of every
/// category those products reference.
pub struct SellerDetails {
    pub aggregates: Vec<SellerAggregate>,
    pub category_names: HashMap<i32, String>,
}

pub struct NewSeller {
    pub user_id: i32,
    pub name: String,
    pub phone: String,
}

pub struct SellerFields {
    pub name: String,
    pub phone: String,
    pub description: String,
    pub image: String,
}

pub async fn find_all<C: ConnectionTrait>(db: &C) -> Result<SellerDetails, DbErr> {
    let sellers = Sellers::find()
        .filter(Column::DeletedAt.is_null())
        .order_by_asc(Column::Id)
        .all(db)
        .await?;
    load_details(db, sellers).await
}

pub async fn find_by_id<C: ConnectionTrait>(db: &C, id: i32) -> Result<Option<SellerDetails>, DbErr> {
    let Some(seller) = find_model_by_id(db, id).await? else {
        return Ok(None);
    };
    load_details(db, vec![seller]).await.map(Some)
}

pub async fn find_by_user_id<C: ConnectionTrait>(
    db: &C,
    user_id: i32,
) -> Result<Option<SellerDetails>, DbErr> {
    let seller = Sellers::find()
        .filter(Column::UserId.eq(user_id))
        .filter(Column::DeletedAt.is_null())
        .one(db)
        .await?;
    match seller {
        Some(seller) => load_details(db, vec![seller]).await.map(Some),
        None => Ok(None),
    }
}

pub async fn find_model_by_id<C: ConnectionTrait>(db: &C, id: i32) -> Result<Option<Model>, DbErr> {
    Sellers::find_by_id(id)
        .filter(Column::DeletedAt.is_null())
        .one(db)
        .await
}

pub async fn create<C: ConnectionTrait>(db: &C, seller: NewSeller) -> Result<Model, DbErr> {
    ActiveModel {
        id: NotSet,
        user_id: Set(seller.user_id),
        name: Set(seller.name),
        phone: Set(seller.phone),
        description: Set(String::new()),
        image: Set(String::new()),
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
    fields: SellerFields,
) -> Result<Model, DbErr> {
    let mut active: ActiveModel = existing.into();
    active.name = Set(fields.name);
    active.phone = Set(fields.phone);
    active.description = Set(fields.description);
    active.image = Set(fields.image);
    active.updated_at = Set(now());
    active.update(db).await
}

pub async fn soft_delete<C: ConnectionTrait>(db: &C, id: i32) -> Result<u64, DbErr> {
    let result = Sellers::update_many()
        .col_expr(Column::DeletedAt, Expr::value(now()))
        .filter(Column::Id.eq(id))
        .filter(Column::DeletedAt.is_null())
        .exec(db)
        .await?;
    Ok(result.rows_affected)
}

async fn load_details<C: ConnectionTrait>(db: &C, sellers: Vec<Model>) -> Result<SellerDetails, DbErr> {
    let users = sellers
        .load_one(Users::find().filter(users::Column::DeletedAt.is_null()), db)
        .await?;
    let products = sellers
        .load_many(
            Products::find()
                .filter(products::Column::DeletedAt.is_null())
                .order_by_asc(products::Column::Id),
            db,
        )
        .await?;

    let mut category_ids: Vec<i32> = products
        .iter()
        .flatten()
        .map(|p| p.category_id)
        .collect();
    category_ids.sort_unstable();
    category_ids.dedup();
    let category_names = categories::names_by_ids(db, category_ids).await?;

    let aggregates = sellers
        .into_iter()
        .zip(users)
        .zip(products)
        .map(|((seller, user), products)| SellerAggregate {
            seller,
            user,
            products,
        })
        .collect();

    Ok(SellerDetails {
        aggregates,
        category_names,
    })
}
