use diesel::prelude::*;

use crate::domain::category::{Category, CategorySortField, NewCategory};
use crate::domain::types::CategoryId;
use crate::models::category::{Category as DbCategory, NewCategory as DbNewCategory};
use crate::pagination::SortDirection;
use crate::repository::{
    CategoryListQuery, CategoryReader, CategoryWriter, DieselRepository, RepositoryError,
    RepositoryResult,
};

impl CategoryReader for DieselRepository {
    fn list_categories(
        &self,
        query: CategoryListQuery,
    ) -> RepositoryResult<(usize, Vec<Category>)> {
        use crate::schema::categorias;

        let mut conn = self.conn()?;

        let total = categorias::table.count().get_result::<i64>(&mut conn)? as usize;

        let mut items = categorias::table.into_boxed::<diesel::sqlite::Sqlite>();

        items = match (query.sort.field, query.sort.direction) {
            (CategorySortField::Id, SortDirection::Asc) => items.order(categorias::id.asc()),
            (CategorySortField::Id, SortDirection::Desc) => items.order(categorias::id.desc()),
            (CategorySortField::Name, SortDirection::Asc) => {
                items.order(categorias::nombre.asc())
            }
            (CategorySortField::Name, SortDirection::Desc) => {
                items.order(categorias::nombre.desc())
            }
            (CategorySortField::Description, SortDirection::Asc) => {
                items.order(categorias::descripcion.asc())
            }
            (CategorySortField::Description, SortDirection::Desc) => {
                items.order(categorias::descripcion.desc())
            }
        };
        // Stable paging when the sort column has duplicates.
        if query.sort.field != CategorySortField::Id {
            items = items.then_order_by(categorias::id.asc());
        }

        if let Some(pagination) = &query.pagination {
            items = items
                .offset(pagination.sql_offset())
                .limit(pagination.sql_limit());
        }

        let items = items
            .load::<DbCategory>(&mut conn)?
            .into_iter()
            .map(Category::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((total, items))
    }

    fn get_category_by_id(&self, id: CategoryId) -> RepositoryResult<Option<Category>> {
        use crate::schema::categorias;

        let mut conn = self.conn()?;

        let category = categorias::table
            .find(id.get())
            .first::<DbCategory>(&mut conn)
            .optional()?;

        let category = category.map(Category::try_from).transpose()?;
        Ok(category)
    }

    fn category_exists(&self, id: CategoryId) -> RepositoryResult<bool> {
        use crate::schema::categorias;

        let mut conn = self.conn()?;

        let exists = diesel::select(diesel::dsl::exists(categorias::table.find(id.get())))
            .get_result::<bool>(&mut conn)?;

        Ok(exists)
    }
}

impl CategoryWriter for DieselRepository {
    fn create_category(&self, category: &NewCategory) -> RepositoryResult<Category> {
        use crate::schema::categorias;

        let mut conn = self.conn()?;
        let db_category: DbNewCategory = category.clone().into();

        let created = diesel::insert_into(categorias::table)
            .values(&db_category)
            .returning(DbCategory::as_returning())
            .get_result::<DbCategory>(&mut conn)?;

        Ok(Category::try_from(created)?)
    }

    fn update_category(
        &self,
        id: CategoryId,
        category: &NewCategory,
    ) -> RepositoryResult<Category> {
        use crate::schema::categorias;

        let mut conn = self.conn()?;
        let db_category: DbNewCategory = category.clone().into();

        let updated = diesel::update(categorias::table.find(id.get()))
            .set(&db_category)
            .returning(DbCategory::as_returning())
            .get_result::<DbCategory>(&mut conn)?;

        Ok(Category::try_from(updated)?)
    }

    fn delete_category(&self, id: CategoryId) -> RepositoryResult<usize> {
        use crate::schema::{categorias, producto_categoria};

        let mut conn = self.conn()?;

        let affected = conn.transaction::<_, RepositoryError, _>(|conn| {
            diesel::delete(
                producto_categoria::table.filter(producto_categoria::categoria_id.eq(id.get())),
            )
            .execute(conn)?;

            Ok(diesel::delete(categorias::table.find(id.get())).execute(conn)?)
        })?;

        Ok(affected)
    }
}
