use crate::domain::{
    common::entities::app_errors::CoreError,
    user::{entities::User, ports::UserRepository},
};

/// Looks the user up by chat identity, registering them on a miss.
pub async fn get_or_create_user<U>(
    user_repository: &U,
    external_id: &str,
    name: Option<String>,
) -> Result<User, CoreError>
where
    U: UserRepository,
{
    if let Some(user) = user_repository
        .get_by_external_id(external_id.to_string())
        .await?
    {
        return Ok(user);
    }

    tracing::info!(external_id, "registering new user");
    user_repository.create(external_id.to_string(), name).await
}
