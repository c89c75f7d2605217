use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::category::NewCategory;
use crate::domain::types::{CategoryName, TypeConstraintError};

/// JSON body accepted when creating or replacing a category.
///
/// A client supplied `id` or `productos` is ignored: new ids come from the
/// store, updates use the path id and the product side owns the relationship.
#[derive(Debug, Deserialize, Validate)]
pub struct CategoryForm {
    #[serde(rename = "nombre")]
    #[validate(length(min = 1))]
    pub name: String,
    #[serde(rename = "descripcion")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryFormPayload {
    pub name: CategoryName,
    pub description: Option<String>,
}

impl CategoryFormPayload {
    pub fn into_new_category(self) -> NewCategory {
        NewCategory {
            name: self.name,
            description: self.description,
        }
    }
}

#[derive(Debug, Error)]
pub enum CategoryFormError {
    #[error("Category validation failed: {0}")]
    Validation(String),
    #[error("Category contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for CategoryFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for CategoryFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<CategoryForm> for CategoryFormPayload {
    type Error = CategoryFormError;

    fn try_from(value: CategoryForm) -> Result<Self, Self::Error> {
        value.validate()?;

        Ok(Self {
            name: CategoryName::new(value.name)?,
            description: value.description,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(body: &str) -> CategoryForm {
        serde_json::from_str(body).unwrap()
    }

    #[test]
    fn accepts_body_without_description() {
        let payload: CategoryFormPayload = parse(r#"{"nombre":" Bebidas frías "}"#)
            .try_into()
            .unwrap();
        assert_eq!(payload.name.as_str(), "Bebidas frías");
        assert_eq!(payload.description, None);
    }

    #[test]
    fn ignores_client_id_and_products() {
        let form = parse(
            r#"{"id":99,"nombre":"Bebidas","descripcion":"Drinks","productos":[{"id":1}]}"#,
        );
        let category = CategoryFormPayload::try_from(form)
            .unwrap()
            .into_new_category();
        assert_eq!(category.name.as_str(), "Bebidas");
        assert_eq!(category.description.as_deref(), Some("Drinks"));

        let form = parse(r#"{"id":"not-a-number","nombre":"Bebidas"}"#);
        assert!(CategoryFormPayload::try_from(form).is_ok());
    }

    #[test]
    fn rejects_empty_and_blank_names() {
        let empty: Result<CategoryFormPayload, _> = parse(r#"{"nombre":""}"#).try_into();
        assert!(matches!(empty, Err(CategoryFormError::Validation(_))));

        let blank: Result<CategoryFormPayload, _> = parse(r#"{"nombre":"   "}"#).try_into();
        assert!(matches!(blank, Err(CategoryFormError::TypeConstraint(_))));
    }

    #[test]
    fn missing_name_is_a_parse_error() {
        assert!(serde_json::from_str::<CategoryForm>(r#"{"descripcion":"x"}"#).is_err());
    }
}
