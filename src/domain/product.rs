use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::domain::types::{CategoryId, ProductId, ProductName};

/// A catalog product. The product owns its side of the many-to-many link to
/// categories; `categories` holds each linked category exactly once.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: ProductId,
    pub name: ProductName,
    pub price: Option<f64>,
    pub description: Option<String>,
    pub stock: Option<i32>,
    pub image_url: Option<String>,
    pub categories: BTreeSet<CategoryId>,
}

/// Information required to create a new [`Product`] or replace an existing one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewProduct {
    pub name: ProductName,
    pub price: Option<f64>,
    pub description: Option<String>,
    pub stock: Option<i32>,
    pub image_url: Option<String>,
    pub categories: BTreeSet<CategoryId>,
}
