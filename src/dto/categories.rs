use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    models::Category,
    validation::{Field, Rule, Validate},
};

#[derive(Deserialize, Debug, Default, ToSchema)]
#[serde(default)]
pub struct CategoryRequest {
    pub name: String,
    /// Ignored unless it already equals the slug derived from `name`.
    pub slug: Option<String>,
    pub image: String,
}

impl Validate for CategoryRequest {
    fn fields(&self) -> Vec<Field<'_>> {
        vec![Field::text("name", &self.name, &[Rule::Required, Rule::Max(50.0)])]
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct CategoryList {
    #[schema(value_type = Vec<Category>)]
    pub items: Vec<Category>,
}
