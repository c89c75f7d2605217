use crate::domain::category::{Category, CategorySort};
use crate::domain::product::Product;
use crate::domain::types::CategoryId;
use crate::dto::categories::CategoryDto;
use crate::forms::categories::CategoryFormPayload;
use crate::pagination::{Page, PageParams, PaginationConfig, SortOrder};
use crate::repository::{
    CategoryListQuery, CategoryReader, CategoryWriter, ProductListQuery, ProductReader,
    RepositoryError,
};

use super::{ServiceError, ServiceResult};

/// Path ids that can never be stored (non-positive or wider than the id
/// column) are treated as absent.
fn parse_id(category_id: i64) -> ServiceResult<CategoryId> {
    i32::try_from(category_id)
        .ok()
        .and_then(|id| CategoryId::new(id).ok())
        .ok_or(ServiceError::NotFound)
}

fn find_category<R>(category_id: CategoryId, repo: &R) -> ServiceResult<Category>
where
    R: CategoryReader,
{
    match repo.get_category_by_id(category_id) {
        Ok(Some(category)) => Ok(category),
        Ok(None) => Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get category {category_id}: {e}");
            Err(ServiceError::Internal)
        }
    }
}

fn ensure_exists<R>(category_id: CategoryId, repo: &R) -> ServiceResult<()>
where
    R: CategoryReader,
{
    match repo.category_exists(category_id) {
        Ok(true) => Ok(()),
        Ok(false) => Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to check category {category_id}: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Products linked to the category through the join table.
fn linked_products<R>(category_id: CategoryId, repo: &R) -> ServiceResult<Vec<Product>>
where
    R: ProductReader,
{
    match repo.list_products(ProductListQuery::default().category(category_id)) {
        Ok((_total, products)) => Ok(products),
        Err(e) => {
            log::error!("Failed to list products of category {category_id}: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Return one page of categories.
///
/// Paging defaults and bounds come from `config`; an unparsable `sort`
/// expression or unknown sort property is reported as a form error.
pub fn list_categories<R>(
    params: PageParams,
    config: &PaginationConfig,
    repo: &R,
) -> ServiceResult<Page<CategoryDto>>
where
    R: CategoryReader,
{
    let sort = match params.sort.as_deref() {
        Some(sort) => CategorySort::try_from(&SortOrder::parse(sort)?)?,
        None => CategorySort::default(),
    };
    let pagination = config.resolve(params.page, params.size);

    match repo.list_categories(
        CategoryListQuery::default()
            .sort(sort)
            .paginate(pagination.page, pagination.per_page),
    ) {
        Ok((total, categories)) => {
            Ok(Page::new(categories, pagination, total).map(CategoryDto::from))
        }
        Err(e) => {
            log::error!("Failed to list categories: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Fetch a single category together with its linked products.
pub fn get_category<R>(category_id: i64, repo: &R) -> ServiceResult<CategoryDto>
where
    R: CategoryReader + ProductReader,
{
    let category_id = parse_id(category_id)?;
    let category = find_category(category_id, repo)?;
    let products = linked_products(category.id, repo)?;

    Ok(CategoryDto::with_products(category, products))
}

/// Persist a new category. The store assigns the id.
pub fn create_category<R>(payload: CategoryFormPayload, repo: &R) -> ServiceResult<CategoryDto>
where
    R: CategoryWriter,
{
    match repo.create_category(&payload.into_new_category()) {
        Ok(category) => Ok(CategoryDto::from(category)),
        Err(e) => {
            log::error!("Failed to create category: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Replace every mutable field of an existing category, keeping its id.
pub fn update_category<R>(
    category_id: i64,
    payload: CategoryFormPayload,
    repo: &R,
) -> ServiceResult<CategoryDto>
where
    R: CategoryReader + CategoryWriter + ProductReader,
{
    let category_id = parse_id(category_id)?;
    ensure_exists(category_id, repo)?;

    let category = match repo.update_category(category_id, &payload.into_new_category()) {
        Ok(category) => category,
        // Deleted between the existence check and the update.
        Err(RepositoryError::NotFound) => return Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to update category {category_id}: {e}");
            return Err(ServiceError::Internal);
        }
    };
    let products = linked_products(category.id, repo)?;

    Ok(CategoryDto::with_products(category, products))
}

/// Delete an existing category. Product links are removed, products are kept.
pub fn delete_category<R>(category_id: i64, repo: &R) -> ServiceResult<()>
where
    R: CategoryReader + CategoryWriter,
{
    let category_id = parse_id(category_id)?;
    ensure_exists(category_id, repo)?;

    match repo.delete_category(category_id) {
        Ok(0) => Err(ServiceError::NotFound),
        Ok(_) => Ok(()),
        Err(e) => {
            log::error!("Failed to delete category {category_id}: {e}");
            Err(ServiceError::Internal)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::domain::types::{CategoryName, ProductId, ProductName};
    use crate::repository::test::TestRepository;

    fn sample_category(id: i32, name: &str) -> Category {
        Category {
            id: CategoryId::new(id).unwrap(),
            name: CategoryName::new(name).unwrap(),
            description: Some(format!("{name} description")),
        }
    }

    fn sample_product(id: i32, categories: &[i32]) -> Product {
        Product {
            id: ProductId::new(id).unwrap(),
            name: ProductName::new(format!("Product {id}")).unwrap(),
            price: Some(1.5),
            description: None,
            stock: Some(10),
            image_url: None,
            categories: categories
                .iter()
                .map(|c| CategoryId::new(*c).unwrap())
                .collect::<BTreeSet<_>>(),
        }
    }

    fn payload(name: &str, description: Option<&str>) -> CategoryFormPayload {
        CategoryFormPayload {
            name: CategoryName::new(name).unwrap(),
            description: description.map(str::to_string),
        }
    }

    #[test]
    fn create_then_get_returns_same_fields() {
        let repo = TestRepository::default();

        let created = create_category(payload("Bebidas", Some("Drinks")), &repo).unwrap();
        assert_eq!(created.products, None);

        let fetched = get_category(i64::from(created.id), &repo).unwrap();
        assert_eq!(fetched.id, created.id);
        assert_eq!(fetched.name, "Bebidas");
        assert_eq!(fetched.description.as_deref(), Some("Drinks"));
        assert_eq!(fetched.products, Some(vec![]));
    }

    #[test]
    fn get_loads_linked_products_only() {
        let repo = TestRepository::new(vec![sample_category(1, "A"), sample_category(2, "B")])
            .with_products(vec![
                sample_product(1, &[1]),
                sample_product(2, &[2]),
                sample_product(3, &[1, 2]),
            ]);

        let category = get_category(1, &repo).unwrap();
        let ids: Vec<i32> = category
            .products
            .unwrap()
            .into_iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn missing_or_invalid_ids_are_not_found() {
        let repo = TestRepository::new(vec![sample_category(1, "A")]);

        assert_eq!(get_category(42, &repo).unwrap_err(), ServiceError::NotFound);
        assert_eq!(get_category(0, &repo).unwrap_err(), ServiceError::NotFound);
        assert_eq!(
            update_category(42, payload("X", None), &repo).unwrap_err(),
            ServiceError::NotFound
        );
        assert_eq!(delete_category(-1, &repo).unwrap_err(), ServiceError::NotFound);
        assert_eq!(delete_category(42, &repo).unwrap_err(), ServiceError::NotFound);
        assert_eq!(repo.category_count(), 1);
    }

    #[test]
    fn ids_wider_than_the_id_column_are_not_found() {
        let repo = TestRepository::new(vec![sample_category(1, "A")]);
        let too_wide = i64::from(i32::MAX) + 1;

        assert_eq!(get_category(too_wide, &repo).unwrap_err(), ServiceError::NotFound);
        assert_eq!(
            update_category(too_wide, payload("X", None), &repo).unwrap_err(),
            ServiceError::NotFound
        );
        assert_eq!(delete_category(i64::MIN, &repo).unwrap_err(), ServiceError::NotFound);
        assert_eq!(repo.category_count(), 1);
    }

    #[test]
    fn update_replaces_all_fields_and_keeps_id() {
        let repo = TestRepository::new(vec![sample_category(7, "Bebidas")]);

        let updated = update_category(7, payload("Bebidas frías", None), &repo).unwrap();
        assert_eq!(updated.id, 7);
        assert_eq!(updated.name, "Bebidas frías");
        assert_eq!(updated.description, None);

        let fetched = get_category(7, &repo).unwrap();
        assert_eq!(fetched.name, "Bebidas frías");
        assert_eq!(fetched.description, None);
    }

    #[test]
    fn delete_removes_category() {
        let repo = TestRepository::new(vec![sample_category(3, "A")]);

        delete_category(3, &repo).unwrap();
        assert_eq!(get_category(3, &repo).unwrap_err(), ServiceError::NotFound);
    }

    #[test]
    fn list_respects_page_size_and_sort() {
        let repo = TestRepository::new(vec![
            sample_category(1, "Carnes"),
            sample_category(2, "Arroces"),
            sample_category(3, "Bebidas"),
        ]);
        let config = PaginationConfig::default();

        let params = PageParams {
            page: Some(0),
            size: Some(2),
            sort: Some("nombre,asc".into()),
        };
        let page = list_categories(params, &config, &repo).unwrap();
        assert_eq!(page.total_elements, 3);
        assert_eq!(page.total_pages, 2);
        let names: Vec<&str> = page.content.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Arroces", "Bebidas"]);
        assert!(page.content.iter().all(|c| c.products.is_none()));

        let second = PageParams {
            page: Some(1),
            size: Some(2),
            sort: None,
        };
        let page = list_categories(second, &config, &repo).unwrap();
        assert_eq!(page.content.len(), 1);
        assert_eq!(page.content[0].id, 3);
        assert!(page.last);
    }

    #[test]
    fn list_rejects_unknown_sort_property() {
        let repo = TestRepository::default();
        let params = PageParams {
            sort: Some("precio,desc".into()),
            ..Default::default()
        };

        let err = list_categories(params, &PaginationConfig::default(), &repo).unwrap_err();
        assert!(matches!(err, ServiceError::Form(_)));
    }

    #[test]
    fn repository_failures_are_internal() {
        let repo = TestRepository::failing();

        assert_eq!(get_category(1, &repo).unwrap_err(), ServiceError::Internal);
        assert_eq!(
            create_category(payload("X", None), &repo).unwrap_err(),
            ServiceError::Internal
        );
        assert_eq!(
            list_categories(PageParams::default(), &PaginationConfig::default(), &repo)
                .unwrap_err(),
            ServiceError::Internal
        );
    }
}
