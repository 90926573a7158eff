use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    dto::auth::{EMAIL_RULES, NAME_RULES, PHONE_RULES},
    models::{Customer, GENDERS},
    validation::{Field, Rule, Validate},
};

#[derive(Deserialize, Debug, Default, ToSchema)]
#[serde(default)]
pub struct UpdateCustomerRequest {
    pub name: String,
    pub email: String,
    pub image: String,
    pub phone: String,
    pub gender: String,
    /// `YYYY-MM-DD`
    pub date_of_birth: String,
}

impl Validate for UpdateCustomerRequest {
    fn fields(&self) -> Vec<Field<'_>> {
        vec![
            Field::text("name", &self.name, NAME_RULES),
            Field::text("email", &self.email, EMAIL_RULES),
            Field::text("image", &self.image, &[Rule::Required]),
            Field::text("phone", &self.phone, PHONE_RULES),
            Field::text("gender", &self.gender, &[Rule::Required, Rule::OneOf(GENDERS)]),
            Field::text("date_of_birth", &self.date_of_birth, &[Rule::Required]),
        ]
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct CustomerList {
    #[schema(value_type = Vec<Customer>)]
    pub items: Vec<Customer>,
}
