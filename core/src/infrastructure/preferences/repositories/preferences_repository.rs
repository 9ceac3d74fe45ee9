use std::sync::Arc;

use sea_orm::{
    ActiveModelTrait,
    ActiveValue::{Set, Unchanged},
    ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    sea_query::OnConflict,
};
use tracing::{error, info};

use crate::{
    domain::{
        common::entities::app_errors::CoreError,
        preferences::{
            entities::UserPreferences, ports::PreferencesRepository,
            value_objects::PreferenceUpdate,
        },
    },
    entity::user_preferences::{ActiveModel, Column, Entity, Model},
};

#[derive(Debug, Clone)]
pub struct PostgresPreferencesRepository {
    pub db: Arc<DatabaseConnection>,
}

impl PostgresPreferencesRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    async fn find(&self, user_id: i64) -> Result<Option<Model>, CoreError> {
        Entity::find()
            .filter(Column::UserId.eq(user_id))
            .one(self.db.as_ref())
            .await
            .map_err(|e| {
                error!("Failed to get preferences: {}", e);
                CoreError::InternalServerError
            })
    }
}

impl PreferencesRepository for PostgresPreferencesRepository {
    async fn get_or_create(&self, user_id: i64) -> Result<UserPreferences, CoreError> {
        if let Some(model) = self.find(user_id).await? {
            return Ok(UserPreferences::from(model));
        }

        // A concurrent first access may insert the row between our read and write; the
        // unique user_id turns the losing insert into a no-op and both callers re-read.
        let defaults = UserPreferences::defaults_for(user_id);
        let active_model = ActiveModel {
            user_id: Set(user_id),
            healthy_profile: Set(defaults.healthy_profile),
            preferred_cuisine: Set(defaults.preferred_cuisine.label().to_string()),
            difficulty: Set(defaults.difficulty.label().to_string()),
            ..Default::default()
        };

        Entity::insert(active_model)
            .on_conflict(OnConflict::column(Column::UserId).do_nothing().to_owned())
            .exec_without_returning(self.db.as_ref())
            .await
            .map_err(|e| {
                error!("Failed to create preferences: {}", e);
                CoreError::InternalServerError
            })?;
        info!(user_id, "default preferences created");

        self.find(user_id)
            .await?
            .map(UserPreferences::from)
            .ok_or(CoreError::InternalServerError)
    }

    async fn update(
        &self,
        user_id: i64,
        update: PreferenceUpdate,
    ) -> Result<UserPreferences, CoreError> {
        let current = self.get_or_create(user_id).await?;

        let mut active_model = ActiveModel {
            id: Unchanged(current.id),
            ..Default::default()
        };
        match update {
            PreferenceUpdate::HealthyProfile(value) => active_model.healthy_profile = Set(value),
            PreferenceUpdate::PreferredCuisine(cuisine) => {
                active_model.preferred_cuisine = Set(cuisine.label().to_string())
            }
            PreferenceUpdate::Difficulty(difficulty) => {
                active_model.difficulty = Set(difficulty.label().to_string())
            }
        }

        let updated = active_model.update(self.db.as_ref()).await.map_err(|e| {
            error!("Failed to update preferences: {}", e);
            CoreError::InternalServerError
        })?;

        Ok(UserPreferences::from(updated))
    }
}
