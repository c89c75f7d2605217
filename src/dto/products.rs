use serde::Serialize;

use crate::domain::product::Product;

/// Product as nested inside a category response. Its own `categorias` are
/// left out so the category/product graph serializes without cycles.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductDto {
    pub id: i32,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "precio")]
    pub price: Option<f64>,
    #[serde(rename = "descripcion")]
    pub description: Option<String>,
    pub stock: Option<i32>,
    #[serde(rename = "imagenUrl")]
    pub image_url: Option<String>,
}

impl From<Product> for ProductDto {
    fn from(value: Product) -> Self {
        Self {
            id: value.id.get(),
            name: value.name.into_inner(),
            price: value.price,
            description: value.description,
            stock: value.stock,
            image_url: value.image_url,
        }
    }
}
