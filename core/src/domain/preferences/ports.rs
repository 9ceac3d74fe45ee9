use std::future::Future;

use crate::domain::{
    common::entities::app_errors::CoreError,
    preferences::{entities::UserPreferences, value_objects::PreferenceUpdate},
};

#[cfg_attr(test, mockall::automock)]
pub trait PreferencesRepository: Send + Sync {
    /// Returns the single preference record of the user, creating it with defaults on a
    /// miss. Calling it twice never yields two records.
    fn get_or_create(
        &self,
        user_id: i64,
    ) -> impl Future<Output = Result<UserPreferences, CoreError>> + Send;

    fn update(
        &self,
        user_id: i64,
        update: PreferenceUpdate,
    ) -> impl Future<Output = Result<UserPreferences, CoreError>> + Send;
}
