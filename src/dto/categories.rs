use serde::Serialize;

use crate::domain::category::Category;
use crate::domain::product::Product;
use crate::dto::products::ProductDto;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryDto {
    pub id: i32,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "descripcion")]
    pub description: Option<String>,
    /// Only present when the caller loaded the linked products.
    #[serde(rename = "productos", skip_serializing_if = "Option::is_none")]
    pub products: Option<Vec<ProductDto>>,
}

impl CategoryDto {
    pub fn with_products(category: Category, products: Vec<Product>) -> Self {
        Self {
            products: Some(products.into_iter().map(ProductDto::from).collect()),
            ..Self::from(category)
        }
    }
}

impl From<Category> for CategoryDto {
    fn from(value: Category) -> Self {
        Self {
            id: value.id.get(),
            name: value.name.into_inner(),
            description: value.description,
            products: None,
        }
    }
}
