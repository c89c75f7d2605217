use crate::db::{DbConnection, DbPool};
use crate::domain::category::{Category, CategorySort, NewCategory};
use crate::domain::product::{NewProduct, Product};
use crate::domain::types::{CategoryId, ProductId};
use crate::pagination::Pagination;

pub mod category;
pub mod errors;
pub mod product;

pub use errors::{RepositoryError, RepositoryResult};

/// Repository implementation backed by Diesel and SQLite.
///
/// The underlying `r2d2::Pool` is cheap to clone, allowing the repository to
/// be passed around freely between handlers.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool, // r2d2::Pool is cheap to clone
}

impl DieselRepository {
    /// Create a new repository from an established database pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Get a pooled database connection.
    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

/// Query parameters for listing categories.
#[derive(Debug, Clone, Default)]
pub struct CategoryListQuery {
    /// Ordering; ascending id when not set.
    pub sort: CategorySort,
    /// Pagination parameters.
    pub pagination: Option<Pagination>,
}

impl CategoryListQuery {
    pub fn sort(mut self, sort: CategorySort) -> Self {
        self.sort = sort;
        self
    }
    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

/// Query parameters used when listing products.
#[derive(Debug, Clone, Default)]
pub struct ProductListQuery {
    /// Restrict to products linked to this category.
    pub category_id: Option<CategoryId>,
    /// Pagination parameters.
    pub pagination: Option<Pagination>,
}

impl ProductListQuery {
    pub fn category(mut self, category_id: CategoryId) -> Self {
        self.category_id = Some(category_id);
        self
    }
    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

/// Read-only operations for category entities.
pub trait CategoryReader {
    /// List categories using the supplied query options, returning the total
    /// count alongside the requested window.
    fn list_categories(&self, query: CategoryListQuery)
    -> RepositoryResult<(usize, Vec<Category>)>;
    /// Retrieve a category by its identifier.
    fn get_category_by_id(&self, id: CategoryId) -> RepositoryResult<Option<Category>>;
    /// Check whether a category with this identifier is stored.
    fn category_exists(&self, id: CategoryId) -> RepositoryResult<bool>;
}

/// Write operations for category entities.
pub trait CategoryWriter {
    /// Persist a new category and return it with its assigned id.
    fn create_category(&self, category: &NewCategory) -> RepositoryResult<Category>;
    /// Replace every mutable field of an existing category.
    fn update_category(&self, id: CategoryId, category: &NewCategory)
    -> RepositoryResult<Category>;
    /// Delete a category and its product links.
    fn delete_category(&self, id: CategoryId) -> RepositoryResult<usize>;
}

/// Read-only operations for product entities.
pub trait ProductReader {
    /// List products matching the supplied query parameters.
    fn list_products(&self, query: ProductListQuery) -> RepositoryResult<(usize, Vec<Product>)>;
    /// Retrieve a product by its identifier.
    fn get_product_by_id(&self, id: ProductId) -> RepositoryResult<Option<Product>>;
    /// Check whether a product with this identifier is stored.
    fn product_exists(&self, id: ProductId) -> RepositoryResult<bool>;
}

/// Write operations for product entities and their category links.
pub trait ProductWriter {
    /// Persist a new product together with its category links.
    fn create_product(&self, product: &NewProduct) -> RepositoryResult<Product>;
    /// Replace a product's fields and its whole category set.
    fn update_product(&self, id: ProductId, product: &NewProduct) -> RepositoryResult<Product>;
    /// Delete a product and its category links.
    fn delete_product(&self, id: ProductId) -> RepositoryResult<usize>;
}
