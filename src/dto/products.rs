use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    models::Product,
    validation::{Field, Rule, Validate},
};

/// Full product body, used for both create and update.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct ProductRequest {
    pub name: String,
    pub price: f64,
    pub stock: i32,
    pub image: String,
    pub rating: i32,
    pub description: String,
    pub category_id: i32,
    pub seller_id: i32,
}

impl Validate for ProductRequest {
    fn fields(&self) -> Vec<Field<'_>> {
        vec![
            Field::text("name", &self.name, &[Rule::Required, Rule::Max(100.0)]),
            Field::number("price", self.price, &[Rule::Gt(0.0)]),
            Field::number("stock", f64::from(self.stock), &[Rule::Min(0.0)]),
            Field::number("rating", f64::from(self.rating), &[Rule::Min(0.0), Rule::Max(5.0)]),
            Field::number("category_id", f64::from(self.category_id), &[Rule::Required]),
            Field::number("seller_id", f64::from(self.seller_id), &[Rule::Required]),
        ]
    }
}

#[derive(Serialize, ToSchema)]
#[serde(transparent)]
pub struct ProductList {
    #[schema(value_type = Vec<Product>)]
    pub items: Vec<Product>,
}
