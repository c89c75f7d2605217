use serde::{Deserialize, Serialize};

use crate::domain::types::{CategoryId, CategoryName, TypeConstraintError};
use crate::pagination::{SortDirection, SortOrder};

/// A catalog category. Its products are a derived view of the join table and
/// are loaded separately through [`crate::repository::ProductReader`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Category {
    pub id: CategoryId,
    pub name: CategoryName,
    pub description: Option<String>,
}

/// Data required to insert a new [`Category`] or fully replace an existing one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewCategory {
    pub name: CategoryName,
    pub description: Option<String>,
}

/// Column a category listing can be ordered by.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CategorySortField {
    Id,
    Name,
    Description,
}

impl TryFrom<&str> for CategorySortField {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "id" => Ok(Self::Id),
            "nombre" => Ok(Self::Name),
            "descripcion" => Ok(Self::Description),
            other => Err(TypeConstraintError::InvalidValue(format!(
                "unknown sort property for categories: {other}"
            ))),
        }
    }
}

/// Ordering applied to a category listing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CategorySort {
    pub field: CategorySortField,
    pub direction: SortDirection,
}

impl Default for CategorySort {
    fn default() -> Self {
        Self {
            field: CategorySortField::Id,
            direction: SortDirection::Asc,
        }
    }
}

impl TryFrom<&SortOrder> for CategorySort {
    type Error = TypeConstraintError;

    fn try_from(order: &SortOrder) -> Result<Self, Self::Error> {
        Ok(Self {
            field: CategorySortField::try_from(order.property.as_str())?,
            direction: order.direction,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_wire_properties_to_fields() {
        let order = SortOrder::parse("nombre,desc").unwrap();
        let sort = CategorySort::try_from(&order).unwrap();
        assert_eq!(sort.field, CategorySortField::Name);
        assert_eq!(sort.direction, SortDirection::Desc);
    }

    #[test]
    fn rejects_unknown_sort_property() {
        let order = SortOrder::parse("precio").unwrap();
        assert!(CategorySort::try_from(&order).is_err());
    }
}
