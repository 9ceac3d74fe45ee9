use std::future::Future;

use crate::domain::{common::entities::app_errors::CoreError, user::entities::User};

#[cfg_attr(test, mockall::automock)]
pub trait UserRepository: Send + Sync {
    fn get_by_external_id(
        &self,
        external_id: String,
    ) -> impl Future<Output = Result<Option<User>, CoreError>> + Send;

    fn create(
        &self,
        external_id: String,
        name: Option<String>,
    ) -> impl Future<Output = Result<User, CoreError>> + Send;
}
