use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    models::Role,
    validation::{Field, Rule, Validate},
};

pub(crate) const NAME_RULES: &[Rule] = &[Rule::Required, Rule::Max(50.0)];
pub(crate) const EMAIL_RULES: &[Rule] = &[Rule::Required, Rule::Email];
pub(crate) const PHONE_RULES: &[Rule] = &[Rule::Required, Rule::Numeric, Rule::Max(15.0)];
const PASSWORD_RULES: &[Rule] = &[Rule::Required, Rule::Min(8.0), Rule::Max(20.0)];
const ROLE_RULES: &[Rule] = &[Rule::OneOf(Role::NAMES)];

#[derive(Deserialize, Debug, Default, ToSchema)]
#[serde(default)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    pub role: String,
}

impl Validate for RegisterRequest {
    fn fields(&self) -> Vec<Field<'_>> {
        vec![
            Field::text("name", &self.name, NAME_RULES),
            Field::text("email", &self.email, EMAIL_RULES),
            Field::text("phone", &self.phone, PHONE_RULES),
            Field::text("password", &self.password, PASSWORD_RULES),
            Field::text("role", &self.role, ROLE_RULES),
        ]
    }
}

#[derive(Deserialize, Debug, Default, ToSchema)]
#[serde(default)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    pub role: String,
}

impl Validate for LoginRequest {
    fn fields(&self) -> Vec<Field<'_>> {
        vec![
            Field::text("email", &self.email, EMAIL_RULES),
            Field::text("password", &self.password, PASSWORD_RULES),
            Field::text("role", &self.role, ROLE_RULES),
        ]
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub email: String,
    pub role: Role,
    pub token: String,
    pub refresh_token: String,
}

#[derive(Deserialize, Debug, Default, ToSchema)]
#[serde(default)]
pub struct RefreshRequest {
    pub refresh_token: String,
}
