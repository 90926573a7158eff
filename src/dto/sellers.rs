use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    dto::auth::{EMAIL_RULES, NAME_RULES, PHONE_RULES},
    models::Seller,
    validation::{Field, Rule, Validate},
};

#[derive(Deserialize, Debug, Default, ToSchema)]
#[serde(default)]
pub struct UpdateSellerRequest {
    pub name: String,
    pub email: String,
    pub image: String,
    pub phone: String,
    pub description: String,
}

impl Validate for UpdateSellerRequest {
    fn fields(&self) -> Vec<Field<'_>> {
        vec![
            Field::text("name", &self.name, NAME_RULES),
            Field::text("email", &self.email, EMAIL_RULES),
            Field::text("image", &self.image, &[Rule::Required]),
            Field::text("phone", &self.phone, PHONE_RULES),
            Field::text("description", &self.description, &[Rule::Required]),
        ]
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct SellerList {
    #[schema(value_type = Vec<Seller>)]
    pub items: Vec<Seller>,
}
