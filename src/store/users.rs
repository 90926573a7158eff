use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, Set,
    sea_query::Expr,
};
use sea_orm::ActiveValue::NotSet;

use crate::{
    entity::users::{ActiveModel, Column, Entity as Users, Model},
    models::Role,
};

use super::now;

pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub role: Role,
}

pub async fn find_by_email<C: ConnectionTrait>(
    db: &C,
    email: &str,
) -> Result<Option<Model>, DbErr> {
    Users::find()
        .filter(Column::Email.eq(email))
        .filter(Column::DeletedAt.is_null())
        .one(db)
        .await
}

pub async fn create<C: ConnectionTrait>(db: &C, user: NewUser) -> Result<Model, DbErr> {
    ActiveModel {
        id: NotSet,
        email: Set(user.email),
        password_hash: Set(user.password_hash),
        role: Set(user.role.as_str().to_string()),
        created_at: NotSet,
        updated_at: NotSet,
        deleted_at: NotSet,
    }
    .insert(db)
    .await
}

pub async fn update_email<C: ConnectionTrait>(
    db: &C,
    existing: Model,
    email: String,
) -> Result<Model, DbErr> {
    let mut active: ActiveModel = existing.into();
    active.email = Set(email);
    active.updated_at = Set(now());
    active.update(db).await
}

/// Marks the account deleted; returns the number of rows touched.
pub async fn soft_delete<C: ConnectionTrait>(db: &C, id: i32) -> Result<u64, DbErr> {
    let result = Users::update_many()
        .col_expr(Column::DeletedAt, Expr::value(now()))
        .filter(Column::Id.eq(id))
        .filter(Column::DeletedAt.is_null())
        .exec(db)
        .await?;
    Ok(result.rows_affected)
}
