use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, LoaderTrait, QueryFilter,
    QueryOrder, Set, sea_query::Expr,
};
use sea_orm::ActiveValue::NotSet;

use crate::entity::{
    customers::{ActiveModel, Column, Entity as Customers, Model},
    users::{self, Entity as Users},
};

use super::now;

pub struct CustomerWithUser {
    pub customer: Model,
    pub user: Option<users::Model>,
}

pub struct NewCustomer {
    pub user_id: i32,
    pub name: String,
    pub phone: String,
}

pub struct CustomerFields {
    pub name: String,
    pub phone: String,
    pub gender: String,
    pub date_of_birth: NaiveDate,
    pub image: String,
}

pub async fn find_all<C: ConnectionTrait>(db: &C) -> Result<Vec<CustomerWithUser>, DbErr> {
    let customers = Customers::find()
        .filter(Column::DeletedAt.is_null())
        .order_by_asc(Column::Id)
        .all(db)
        .await?;
    with_users(db, customers).await
}

pub async fn find_by_id<C: ConnectionTrait>(
    db: &C,
    id: i32,
) -> Result<Option<CustomerWithUser>, DbErr> {
    let customer = Customers::find_by_id(id)
        .filter(Column::DeletedAt.is_null())
        .one(db)
        .await?;
    match customer {
        Some(customer) => Ok(with_users(db, vec![customer]).await?.pop()),
        None => Ok(None),
    }
}

pub async fn find_by_user_id<C: ConnectionTrait>(
    db: &C,
    user_id: i32,
) -> Result<Option<CustomerWithUser>, DbErr> {
    let customer = Customers::find()
        .filter(Column::UserId.eq(user_id))
        .filter(Column::DeletedAt.is_null())
        .one(db)
        .await?;
    match customer {
        Some(customer) => Ok(with_users(db, vec![customer]).await?.pop()),
        None => Ok(None),
    }
}

pub async fn create<C: ConnectionTrait>(db: &C, customer: NewCustomer) -> Result<Model, DbErr> {
    ActiveModel {
        id: NotSet,
        user_id: Set(customer.user_id),
        name: Set(customer.name),
        phone: Set(customer.phone),
        gender: Set(None),
        date_of_birth: Set(None),
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
    fields: CustomerFields,
) -> Result<Model, DbErr> {
    let mut active: ActiveModel = existing.into();
    active.name = Set(fields.name);
    active.phone = Set(fields.phone);
    active.gender = Set(Some(fields.gender));
    active.date_of_birth = Set(Some(fields.date_of_birth));
    active.image = Set(fields.image);
    active.updated_at = Set(now());
    active.update(db).await
}

pub async fn soft_delete<C: ConnectionTrait>(db: &C, id: i32) -> Result<u64, DbErr> {
    let result = Customers::update_many()
        .col_expr(Column::DeletedAt, Expr::value(now()))
        .filter(Column::Id.eq(id))
        .filter(Column::DeletedAt.is_null())
        .exec(db)
        .await?;
    Ok(result.rows_affected)
}

async fn with_users<C: ConnectionTrait>(
    db: &C,
    customers: Vec<Model>,
) -> Result<Vec<CustomerWithUser>, DbErr> {
    let users = customers
        .load_one(Users::find().filter(users::Column::DeletedAt.is_null()), db)
        .await?;
    Ok(customers
        .into_iter()
        .zip(users)
        .map(|(customer, user)| CustomerWithUser { customer, user })
        .collect())
}
