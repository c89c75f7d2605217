use diesel::prelude::*;

use crate::domain::category::{Category as DomainCategory, NewCategory as DomainNewCategory};
use crate::domain::types::{CategoryName, TypeConstraintError};

/// Diesel model representing the `categorias` table.
#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::categorias)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Category {
    pub id: i32,
    pub nombre: String,
    pub descripcion: Option<String>,
}

/// Insertable/patchable form of [`Category`].
///
/// Updates replace every column, so a missing description is written as NULL.
#[derive(Debug, Insertable, AsChangeset)]
#[diesel(table_name = crate::schema::categorias)]
#[diesel(treat_none_as_null = true)]
pub struct NewCategory {
    pub nombre: String,
    pub descripcion: Option<String>,
}

impl TryFrom<Category> for DomainCategory {
    type Error = TypeConstraintError;

    fn try_from(category: Category) -> Result<Self, Self::Error> {
        Ok(Self {
            id: category.id.try_into()?,
            name: CategoryName::new(category.nombre)?,
            description: category.descripcion,
        })
    }
}

impl From<DomainNewCategory> for NewCategory {
    fn from(category: DomainNewCategory) -> Self {
        Self {
            nombre: category.name.into_inner(),
            descripcion: category.description,
        }
    }
}
