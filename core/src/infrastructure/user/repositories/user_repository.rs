use std::sync::Arc;

use sea_orm::{ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use tracing::error;

use crate::{
    domain::{
        common::{entities::app_errors::CoreError, generate_timestamp},
        user::{entities::User, ports::UserRepository},
    },
    entity::users::{ActiveModel, Column, Entity},
};

#[derive(Debug, Clone)]
pub struct PostgresUserRepository {
    pub db: Arc<DatabaseConnection>,
}

impl PostgresUserRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

impl UserRepository for PostgresUserRepository {
    async fn get_by_external_id(&self, external_id: String) -> Result<Option<User>, CoreError> {
        let user = Entity::find()
            .filter(Column::ExternalId.eq(external_id))
            .one(self.db.as_ref())
            .await
            .map_err(|e| {
                error!("Failed to get user by external id: {}", e);
                CoreError::InternalServerError
            })?;

        Ok(user.map(User::from))
    }

    async fn create(&self, external_id: String, name: Option<String>) -> Result<User, CoreError> {
        let active_model = ActiveModel {
            external_id: Set(external_id),
            name: Set(name),
            created_at: Set(generate_timestamp().fixed_offset()),
            ..Default::default()
        };

        let created = Entity::insert(active_model)
            .exec_with_returning(self.db.as_ref())
            .await
            .map_err(|e| {
                error!("Failed to create user: {}", e);
                CoreError::InternalServerError
            })?;

        Ok(User::from(created))
    }
}
