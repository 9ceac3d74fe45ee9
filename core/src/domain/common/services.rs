use std::time::Duration;

/// Number of saved recipes offered in the "saved recipes" list.
pub const HISTORY_PAGE_SIZE: u64 = 10;

/// Owns every collaborator of the conversation core. Each domain module adds its service
/// trait on top of this struct.
#[derive(Clone)]
pub struct Service<U, P, H, S, LLM, T> {
    pub user_repository: U,
    pub preferences_repository: P,
    pub history_repository: H,
    pub session_repository: S,
    pub llm_client: LLM,
    pub transport: T,
    pub llm_timeout: Duration,
}

impl<U, P, H, S, LLM, T> Service<U, P, H, S, LLM, T> {
    pub fn new(
        user_repository: U,
        preferences_repository: P,
        history_repository: H,
        session_repository: S,
        llm_client: LLM,
        transport: T,
        llm_timeout: Duration,
    ) -> Self {
        Self {
            user_repository,
            preferences_repository,
            history_repository,
            session_repository,
            llm_client,
            transport,
            llm_timeout,
        }
    }
}
