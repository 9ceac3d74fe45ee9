use std::time::Duration;

use snapchef_core::infrastructure::session::memory::InMemorySessionRepository;
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// Periodically drops sessions idle for longer than the store's TTL.
pub fn spawn_session_sweeper(
    sessions: InMemorySessionRepository,
    every: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        // the first tick completes immediately
        ticker.tick().await;

        loop {
            ticker.tick().await;
            let purged = sessions.purge_expired();
            if purged > 0 {
                info!(purged, remaining = sessions.len(), "expired sessions purged");
            } else {
                debug!(remaining = sessions.len(), "no expired sessions");
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use snapchef_core::domain::session::{entities::Session, ports::SessionRepository};

    use super::*;

    #[tokio::test]
    async fn test_sweeper_purges_expired_sessions() {
        let sessions = InMemorySessionRepository::new(Some(Duration::from_millis(10)));
        sessions.set(1, Session::default()).await.unwrap();
        sessions.set(2, Session::default()).await.unwrap();
        assert_eq!(sessions.len(), 2);

        let handle = spawn_session_sweeper(sessions.clone(), Duration::from_millis(5));
        tokio::time::sleep(Duration::from_millis(60)).await;
        handle.abort();

        assert!(sessions.is_empty());
    }
}
