use std::{collections::HashMap, fmt};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entity::{categories, customers, products, sellers, users};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Seller,
    Customer,
}

impl Role {
    pub const NAMES: &'static [&'static str] = &["seller", "customer"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Seller => "seller",
            Role::Customer => "customer",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "seller" => Some(Role::Seller),
            "customer" => Some(Role::Customer),
            _ => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub const GENDERS: &[&str] = &["male", "female"];

#[derive(Debug, Serialize, ToSchema)]
pub struct Account {
    pub id: i32,
    pub email: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

impl From<users::Model> for Account {
    fn from(model: users::Model) -> Self {
        Self {
            id: model.id,
            email: model.email,
            role: model.role,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}

/// Product as nested under a category or a seller.
#[derive(Debug, Serialize, ToSchema)]
pub struct ProductSummary {
    pub id: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub name: String,
    pub price: f64,
    pub stock: i32,
    pub image: String,
    pub rating: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_name: Option<String>,
}

impl ProductSummary {
    pub fn from_entity(model: products::Model, category_name: Option<String>) -> Self {
        Self {
            id: model.id,
            created_at: model.created_at.with_timezone(&Utc),
            updated_at: model.updated_at.with_timezone(&Utc),
            name: model.name,
            price: model.price,
            stock: model.stock,
            image: model.image,
            rating: model.rating,
            category_name,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct Product {
    pub id: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub name: String,
    pub price: f64,
    pub stock: i32,
    pub image: String,
    pub rating: i32,
    pub description: String,
    pub category_id: i32,
    pub category_name: Option<String>,
    pub seller_id: i32,
    pub seller_name: Option<String>,
}

impl Product {
    pub fn from_parts(
        model: products::Model,
        category: Option<&categories::Model>,
        seller: Option<&sellers::Model>,
    ) -> Self {
        Self {
            id: model.id,
            created_at: model.created_at.with_timezone(&Utc),
            updated_at: model.updated_at.with_timezone(&Utc),
            name: model.name,
            price: model.price,
            stock: model.stock,
            image: model.image,
            rating: model.rating,
            description: model.description,
            category_id: model.category_id,
            category_name: category.map(|c| c.name.clone()),
            seller_id: model.seller_id,
            seller_name: seller.map(|s| s.name.clone()),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct Category {
    pub id: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub name: String,
    pub slug: String,
    pub image: String,
    pub products: Vec<ProductSummary>,
}

impl Category {
    pub fn from_parts(model: categories::Model, products: Vec<products::Model>) -> Self {
        Self {
            id: model.id,
            created_at: model.created_at.with_timezone(&Utc),
            updated_at: model.updated_at.with_timezone(&Utc),
            name: model.name,
            slug: model.slug,
            image: model.image,
            products: products
                .into_iter()
                .map(|p| ProductSummary::from_entity(p, None))
                .collect(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct Seller {
    pub id: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub user_id: i32,
    pub email: Option<String>,
    pub role: Option<String>,
    pub name: String,
    pub phone: String,
    pub description: String,
    pub image: String,
    pub products: Vec<ProductSummary>,
}

impl Seller {
    pub fn from_parts(
        model: sellers::Model,
        user: Option<users::Model>,
        products: Vec<products::Model>,
        category_names: &HashMap<i32, String>,
    ) -> Self {
        Self {
            id: model.id,
            created_at: model.created_at.with_timezone(&Utc),
            updated_at: model.updated_at.with_timezone(&Utc),
            user_id: model.user_id,
            email: user.as_ref().map(|u| u.email.clone()),
            role: user.map(|u| u.role),
            name: model.name,
            phone: model.phone,
            description: model.description,
            image: model.image,
            products: products
                .into_iter()
                .map(|p| {
                    let category_name = category_names.get(&p.category_id).cloned();
                    ProductSummary::from_entity(p, category_name)
                })
                .collect(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct Customer {
    pub id: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub user_id: i32,
    pub email: Option<String>,
    pub role: Option<String>,
    pub name: String,
    pub phone: String,
    pub gender: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub image: String,
}

impl Customer {
    pub fn from_parts(model: customers::Model, user: Option<users::Model>) -> Self {
        Self {
            id: model.id,
            created_at: model.created_at.with_timezone(&Utc),
            updated_at: model.updated_at.with_timezone(&Utc),
            user_id: model.user_id,
            email: user.as_ref().map(|u| u.email.clone()),
            role: user.map(|u| u.role),
            name: model.name,
            phone: model.phone,
            gender: model.gender,
            date_of_birth: model.date_of_birth,
            image: model.image,
        }
    }
}
