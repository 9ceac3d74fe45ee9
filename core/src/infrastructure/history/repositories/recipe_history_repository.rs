use std::sync::Arc;

use sea_orm::{
    ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect,
};
use tracing::error;

use crate::{
    domain::{
        common::{entities::app_errors::CoreError, generate_timestamp},
        history::{entities::RecipeHistoryEntry, ports::RecipeHistoryRepository},
    },
    entity::recipe_history::{ActiveModel, Column, Entity},
};

#[derive(Debug, Clone)]
pub struct PostgresRecipeHistoryRepository {
    pub db: Arc<DatabaseConnection>,
}

impl PostgresRecipeHistoryRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

impl RecipeHistoryRepository for PostgresRecipeHistoryRepository {
    async fn append(
        &self,
        user_id: i64,
        ingredients: String,
        recipe: String,
    ) -> Result<RecipeHistoryEntry, CoreError> {
        let active_model = ActiveModel {
            user_id: Set(user_id),
            ingredients: Set(ingredients),
            recipe: Set(recipe),
            created_at: Set(generate_timestamp().fixed_offset()),
            ..Default::default()
        };

        let created = Entity::insert(active_model)
            .exec_with_returning(self.db.as_ref())
            .await
            .map_err(|e| {
                error!("Failed to save recipe: {}", e);
                CoreError::InternalServerError
            })?;

        Ok(RecipeHistoryEntry::from(created))
    }

    async fn list_recent(
        &self,
        user_id: i64,
        limit: u64,
    ) -> Result<Vec<RecipeHistoryEntry>, CoreError> {
        let entries = Entity::find()
            .filter(Column::UserId.eq(user_id))
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .limit(limit)
            .all(self.db.as_ref())
            .await
            .map_err(|e| {
                error!("Failed to list saved recipes: {}", e);
                CoreError::InternalServerError
            })?;

        Ok(entries.into_iter().map(RecipeHistoryEntry::from).collect())
    }

    async fn get_by_id(
        &self,
        user_id: i64,
        entry_id: i64,
    ) -> Result<Option<RecipeHistoryEntry>, CoreError> {
        let entry = Entity::find_by_id(entry_id)
            .filter(Column::UserId.eq(user_id))
            .one(self.db.as_ref())
            .await
            .map_err(|e| {
                error!("Failed to get saved recipe: {}", e);
                CoreError::InternalServerError
            })?;

        Ok(entry.map(RecipeHistoryEntry::from))
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use sea_orm::{DatabaseBackend, MockDatabase};

    use super::*;
    use crate::entity::recipe_history::Model;

    fn model(id: i64, day: u32) -> Model {
        Model {
            id,
            user_id: 7,
            ingredients: "egg, milk".to_string(),
            recipe: format!("Omelette #{}", id),
            created_at: Utc
                .with_ymd_and_hms(2024, 5, day, 8, 0, 0)
                .unwrap()
                .fixed_offset(),
        }
    }

    #[tokio::test]
    async fn test_list_recent_is_newest_first_and_bounded() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![model(2, 2), model(1, 1)]])
            .into_connection();
        let repository = PostgresRecipeHistoryRepository::new(Arc::new(db));

        let entries = repository.list_recent(7, 10).await.unwrap();

        assert_eq!(
            entries.iter().map(|e| e.id).collect::<Vec<_>>(),
            vec![2, 1]
        );
        let log = Arc::into_inner(repository.db).unwrap().into_transaction_log();
        let statement = format!("{:?}", log[0]);
        assert!(statement.contains("ORDER BY"));
        assert!(statement.contains("DESC"));
        assert!(statement.contains("LIMIT"));
    }

    #[tokio::test]
    async fn test_get_by_id_is_scoped_to_the_owner() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<Model>::new()])
            .into_connection();
        let repository = PostgresRecipeHistoryRepository::new(Arc::new(db));

        let entry = repository.get_by_id(8, 1).await.unwrap();

        assert_eq!(entry, None);
        let log = Arc::into_inner(repository.db).unwrap().into_transaction_log();
        let statement = format!("{:?}", log[0]);
        assert!(statement.contains("WHERE"));
        assert!(statement.contains(" AND "));
    }

    #[tokio::test]
    async fn test_append_returns_the_stored_entry() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![model(4, 3)]])
            .into_connection();
        let repository = PostgresRecipeHistoryRepository::new(Arc::new(db));

        let entry = repository
            .append(7, "egg, milk".to_string(), "Omelette #4".to_string())
            .await
            .unwrap();

        assert_eq!(entry.id, 4);
        assert_eq!(entry.recipe, "Omelette #4");
        assert_eq!(entry.created_at, Utc.with_ymd_and_hms(2024, 5, 3, 8, 0, 0).unwrap());
    }
}
