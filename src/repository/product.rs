use std::collections::{BTreeSet, HashMap};

use diesel::prelude::*;

use crate::db::DbConnection;
use crate::domain::product::{NewProduct, Product};
use crate::domain::types::{CategoryId, ProductId};
use crate::models::product::{
    NewProduct as DbNewProduct, Product as DbProduct, ProductCategory as DbProductCategory,
};
use crate::repository::{
    DieselRepository, ProductListQuery, ProductReader, ProductWriter, RepositoryError,
    RepositoryResult,
};

/// Load the category links for `rows` in one query and build domain products.
fn with_categories(
    conn: &mut DbConnection,
    rows: Vec<DbProduct>,
) -> RepositoryResult<Vec<Product>> {
    use crate::schema::producto_categoria;

    if rows.is_empty() {
        return Ok(vec![]);
    }

    let ids: Vec<i32> = rows.iter().map(|p| p.id).collect();
    let links = producto_categoria::table
        .filter(producto_categoria::producto_id.eq_any(ids))
        .load::<DbProductCategory>(conn)?;

    let mut by_product: HashMap<i32, BTreeSet<CategoryId>> = HashMap::new();
    for link in links {
        by_product
            .entry(link.producto_id)
            .or_default()
            .insert(CategoryId::new(link.categoria_id)?);
    }

    rows.into_iter()
        .map(|row| -> RepositoryResult<Product> {
            let categories = by_product.remove(&row.id).unwrap_or_default();
            Ok(row.into_domain(categories)?)
        })
        .collect()
}

/// Insert one join row per category for `product_id`.
fn link_categories(
    conn: &mut DbConnection,
    product_id: i32,
    categories: &BTreeSet<CategoryId>,
) -> RepositoryResult<usize> {
    use crate::schema::producto_categoria;

    if categories.is_empty() {
        return Ok(0);
    }

    let links: Vec<DbProductCategory> = categories
        .iter()
        .map(|category_id| DbProductCategory {
            producto_id: product_id,
            categoria_id: category_id.get(),
        })
        .collect();

    Ok(diesel::insert_into(producto_categoria::table)
        .values(&links)
        .execute(conn)?)
}

impl ProductReader for DieselRepository {
    fn list_products(&self, query: ProductListQuery) -> RepositoryResult<(usize, Vec<Product>)> {
        use crate::schema::{producto_categoria, productos};

        let mut conn = self.conn()?;

        let query_builder = || {
            let mut items = productos::table.into_boxed::<diesel::sqlite::Sqlite>();

            if let Some(category_id) = query.category_id {
                items = items.filter(
                    productos::id.eq_any(
                        producto_categoria::table
                            .filter(producto_categoria::categoria_id.eq(category_id.get()))
                            .select(producto_categoria::producto_id),
                    ),
                );
            }

            items
        };

        let total = query_builder().count().get_result::<i64>(&mut conn)? as usize;

        let mut items = query_builder();

        if let Some(pagination) = &query.pagination {
            items = items
                .offset(pagination.sql_offset())
                .limit(pagination.sql_limit());
        }

        let rows = items
            .order(productos::id.asc())
            .load::<DbProduct>(&mut conn)?;

        Ok((total, with_categories(&mut conn, rows)?))
    }

    fn get_product_by_id(&self, id: ProductId) -> RepositoryResult<Option<Product>> {
        use crate::schema::productos;

        let mut conn = self.conn()?;

        let row = productos::table
            .find(id.get())
            .first::<DbProduct>(&mut conn)
            .optional()?;

        match row {
            Some(row) => Ok(with_categories(&mut conn, vec![row])?.pop()),
            None => Ok(None),
        }
    }

    fn product_exists(&self, id: ProductId) -> RepositoryResult<bool> {
        use crate::schema::productos;

        let mut conn = self.conn()?;

        let exists = diesel::select(diesel::dsl::exists(productos::table.find(id.get())))
            .get_result::<bool>(&mut conn)?;

        Ok(exists)
    }
}

impl ProductWriter for DieselRepository {
    fn create_product(&self, product: &NewProduct) -> RepositoryResult<Product> {
        use crate::schema::productos;

        let mut conn = self.conn()?;
        let db_product = DbNewProduct::from(product);

        conn.transaction::<_, RepositoryError, _>(|conn| {
            let row = diesel::insert_into(productos::table)
                .values(&db_product)
                .returning(DbProduct::as_returning())
                .get_result::<DbProduct>(conn)?;

            link_categories(conn, row.id, &product.categories)?;

            Ok(row.into_domain(product.categories.clone())?)
        })
    }

    fn update_product(&self, id: ProductId, product: &NewProduct) -> RepositoryResult<Product> {
        use crate::schema::{producto_categoria, productos};

        let mut conn = self.conn()?;
        let db_product = DbNewProduct::from(product);

        conn.transaction::<_, RepositoryError, _>(|conn| {
            let row = diesel::update(productos::table.find(id.get()))
                .set(&db_product)
                .returning(DbProduct::as_returning())
                .get_result::<DbProduct>(conn)?;

            diesel::delete(
                producto_categoria::table.filter(producto_categoria::producto_id.eq(id.get())),
            )
            .execute(conn)?;
            link_categories(conn, row.id, &product.categories)?;

            Ok(row.into_domain(product.categories.clone())?)
        })
    }

    fn delete_product(&self, id: ProductId) -> RepositoryResult<usize> {
        use crate::schema::{producto_categoria, productos};

        let mut conn = self.conn()?;

        let affected = conn.transaction::<_, RepositoryError, _>(|conn| {
            diesel::delete(
                producto_categoria::table.filter(producto_categoria::producto_id.eq(id.get())),
            )
            .execute(conn)?;

            Ok(diesel::delete(productos::table.find(id.get())).execute(conn)?)
        })?;

        Ok(affected)
    }
}
