//! Paging request parameters and the page envelope returned by list endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::types::TypeConstraintError;

/// Page size used when the client does not ask for one.
pub const DEFAULT_PAGE_SIZE: usize = 20;
/// Upper bound applied to client supplied page sizes.
pub const MAX_PAGE_SIZE: usize = 2000;

/// Resolved, zero-based page window applied to a repository query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: usize,
    pub per_page: usize,
}

impl Pagination {
    /// Number of rows to skip before the first item of this page.
    pub fn offset(&self) -> usize {
        self.page.saturating_mul(self.per_page)
    }

    /// [`Self::offset`] as a SQL `OFFSET`. Windows past `i64::MAX` stay past
    /// the end of any table instead of wrapping.
    pub fn sql_offset(&self) -> i64 {
        i64::try_from(self.offset()).unwrap_or(i64::MAX)
    }

    pub fn sql_limit(&self) -> i64 {
        i64::try_from(self.per_page).unwrap_or(i64::MAX)
    }
}

/// Paging defaults, configurable per deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PaginationConfig {
    pub default_size: usize,
    pub max_size: usize,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_size: DEFAULT_PAGE_SIZE,
            max_size: MAX_PAGE_SIZE,
        }
    }
}

impl PaginationConfig {
    /// Apply defaults and bounds to raw `page`/`size` query values.
    ///
    /// A missing or zero size falls back to `default_size`; anything above
    /// `max_size` is clamped.
    pub fn resolve(&self, page: Option<u32>, size: Option<usize>) -> Pagination {
        let per_page = match size {
            None | Some(0) => self.default_size,
            Some(size) => size,
        };
        Pagination {
            page: page.unwrap_or(0) as usize,
            per_page: per_page.clamp(1, self.max_size.max(1)),
        }
    }
}

/// Query string accepted by list endpoints: `?page=0&size=20&sort=nombre,desc`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageParams {
    /// Zero-based page number, bounded like a 32-bit page index.
    pub page: Option<u32>,
    pub size: Option<usize>,
    pub sort: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl TryFrom<&str> for SortDirection {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            other => Err(TypeConstraintError::InvalidValue(format!(
                "sort direction must be asc or desc, got: {other}"
            ))),
        }
    }
}

/// A parsed `property[,direction]` sort expression.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SortOrder {
    pub property: String,
    pub direction: SortDirection,
}

impl SortOrder {
    pub fn parse(value: &str) -> Result<Self, TypeConstraintError> {
        let mut parts = value.split(',');
        let property = parts.next().unwrap_or_default().trim();
        if property.is_empty() {
            return Err(TypeConstraintError::EmptyString("sort"));
        }
        let direction = match parts.next() {
            Some(direction) => SortDirection::try_from(direction)?,
            None => SortDirection::Asc,
        };
        if parts.next().is_some() {
            return Err(TypeConstraintError::InvalidValue(format!(
                "malformed sort expression: {value}"
            )));
        }
        Ok(Self {
            property: property.to_string(),
            direction,
        })
    }
}

/// A bounded slice of a larger result set plus its metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub number: usize,
    pub size: usize,
    pub total_elements: usize,
    pub total_pages: usize,
    pub number_of_elements: usize,
    pub first: bool,
    pub last: bool,
    pub empty: bool,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, pagination: Pagination, total_elements: usize) -> Self {
        let total_pages = total_elements.div_ceil(pagination.per_page.max(1));
        Self {
            number_of_elements: content.len(),
            empty: content.is_empty(),
            content,
            number: pagination.page,
            size: pagination.per_page,
            total_elements,
            total_pages,
            first: pagination.page == 0,
            last: pagination.page.saturating_add(1) >= total_pages,
        }
    }

    /// Convert every item while keeping the page metadata.
    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Page<U> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            number: self.number,
            size: self.size,
            total_elements: self.total_elements,
            total_pages: self.total_pages,
            number_of_elements: self.number_of_elements,
            first: self.first,
            last: self.last,
            empty: self.empty,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_applies_defaults_and_bounds() {
        let config = PaginationConfig::default();
        assert_eq!(
            config.resolve(None, None),
            Pagination {
                page: 0,
                per_page: DEFAULT_PAGE_SIZE
            }
        );
        assert_eq!(config.resolve(Some(3), Some(0)).per_page, DEFAULT_PAGE_SIZE);
        assert_eq!(config.resolve(None, Some(50_000)).per_page, MAX_PAGE_SIZE);
        assert_eq!(config.resolve(Some(2), Some(10)).offset(), 20);
    }

    #[test]
    fn far_pages_stay_past_the_end() {
        let config = PaginationConfig::default();
        let pagination = config.resolve(Some(u32::MAX), Some(MAX_PAGE_SIZE));
        assert_eq!(
            pagination.sql_offset(),
            i64::from(u32::MAX) * MAX_PAGE_SIZE as i64
        );

        let unbounded = Pagination {
            page: usize::MAX,
            per_page: 20,
        };
        assert_eq!(unbounded.sql_offset(), i64::MAX);
        assert_eq!(unbounded.sql_limit(), 20);

        let page: Page<i32> = Page::new(vec![], unbounded, 3);
        assert_eq!(page.number, usize::MAX);
        assert!(page.empty);
        assert!(page.last);
        assert!(!page.first);
    }

    #[test]
    fn parses_sort_expressions() {
        assert_eq!(
            SortOrder::parse("nombre").unwrap(),
            SortOrder {
                property: "nombre".into(),
                direction: SortDirection::Asc
            }
        );
        assert_eq!(
            SortOrder::parse("id,DESC").unwrap().direction,
            SortDirection::Desc
        );
        assert!(SortOrder::parse("").is_err());
        assert!(SortOrder::parse("id,sideways").is_err());
        assert!(SortOrder::parse("id,asc,extra").is_err());
    }

    #[test]
    fn page_metadata_tracks_position() {
        let pagination = Pagination {
            page: 1,
            per_page: 2,
        };
        let page = Page::new(vec![3, 4], pagination, 5);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.number_of_elements, 2);
        assert!(!page.first);
        assert!(!page.last);

        let last = Page::new(vec![5], Pagination { page: 2, ..pagination }, 5);
        assert!(last.last);

        let empty: Page<i32> = Page::new(vec![], Pagination { page: 0, per_page: 20 }, 0);
        assert!(empty.empty && empty.first && empty.last);
        assert_eq!(empty.total_pages, 0);
    }

    #[test]
    fn page_serializes_with_camel_case_envelope() {
        let page = Page::new(vec!["a"], Pagination { page: 0, per_page: 20 }, 1)
            .map(|s| s.to_uppercase());
        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["content"][0], "A");
        assert_eq!(json["totalElements"], 1);
        assert_eq!(json["numberOfElements"], 1);
        assert_eq!(json["totalPages"], 1);
    }
}
