use std::collections::BTreeSet;

use diesel::prelude::*;

use crate::domain::product::{NewProduct as DomainNewProduct, Product as DomainProduct};
use crate::domain::types::{CategoryId, ProductName, TypeConstraintError};

/// Diesel model representing the `productos` table.
#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::productos)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Product {
    pub id: i32,
    pub nombre: String,
    pub precio: Option<f64>,
    pub descripcion: Option<String>,
    pub stock: Option<i32>,
    pub imagen_url: Option<String>,
}

/// Insertable/patchable form of [`Product`].
#[derive(Debug, Insertable, AsChangeset)]
#[diesel(table_name = crate::schema::productos)]
#[diesel(treat_none_as_null = true)]
pub struct NewProduct {
    pub nombre: String,
    pub precio: Option<f64>,
    pub descripcion: Option<String>,
    pub stock: Option<i32>,
    pub imagen_url: Option<String>,
}

/// Row of the `producto_categoria` join table.
#[derive(Debug, Clone, Copy, Insertable, Queryable)]
#[diesel(table_name = crate::schema::producto_categoria)]
pub struct ProductCategory {
    pub producto_id: i32,
    pub categoria_id: i32,
}

impl Product {
    /// Combine the row with its category links into a domain product.
    pub fn into_domain(
        self,
        categories: BTreeSet<CategoryId>,
    ) -> Result<DomainProduct, TypeConstraintError> {
        Ok(DomainProduct {
            id: self.id.try_into()?,
            name: ProductName::new(self.nombre)?,
            price: self.precio,
            description: self.descripcion,
            stock: self.stock,
            image_url: self.imagen_url,
            categories,
        })
    }
}

impl From<&DomainNewProduct> for NewProduct {
    fn from(product: &DomainNewProduct) -> Self {
        Self {
            nombre: product.name.as_str().to_string(),
            precio: product.price,
            descripcion: product.description.clone(),
            stock: product.stock,
            imagen_url: product.image_url.clone(),
        }
    }
}
