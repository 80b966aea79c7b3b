//! In-memory session storage for development and tests.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use stagepass_core::auth::{AuthFlowState, Result, Session, SessionId, SessionRepository};

/// In-memory session store.
///
/// Stores sessions and auth flow state in HashMaps wrapped in `Arc<RwLock<_>>`.
/// Data is not persisted and will be lost when the store is dropped.
#[derive(Debug, Clone)]
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<HashMap<String, Session>>>,
    auth_flows: Arc<RwLock<HashMap<String, AuthFlowState>>>,
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemorySessionStore {
    /// Creates a new empty in-memory session store.
    pub fn new() -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            auth_flows: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionStore {
    async fn create_session(&self, session: &Session) -> Result<()> {
        let mut sessions = self.sessions.write().await;
        sessions.insert(session.id.as_str().to_string(), session.clone());
        Ok(())
    }

    async fn get_session(&self, id: &SessionId) -> Result<Option<Session>> {
        let sessions = self.sessions.read().await;
        Ok(sessions.get(id.as_str()).cloned())
    }

    async fn delete_session(&self, id: &SessionId) -> Result<()> {
        let mut sessions = self.sessions.write().await;
        sessions.remove(id.as_str());
        Ok(())
    }

    async fn store_auth_flow(&self, state: &str, flow: &AuthFlowState) -> Result<()> {
        let mut flows = self.auth_flows.write().await;
        flows.insert(state.to_string(), flow.clone());
        Ok(())
    }

    async fn take_auth_flow(&self, state: &str) -> Result<Option<AuthFlowState>> {
        let mut flows = self.auth_flows.write().await;
        Ok(flows.remove(state))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use stagepass_core::auth::OidcProvider;

    fn create_test_session(id: &str, user_id: &str) -> Session {
        Session {
            id: SessionId::new(id.to_string()),
            user_id: user_id.to_string(),
            provider: OidcProvider::Google,
            created_at: Utc::now(),
            expires_at: Utc::now() + chrono::Duration::hours(24),
        }
    }

    fn create_test_auth_flow() -> AuthFlowState {
        AuthFlowState {
            pkce_verifier: "test-verifier".to_string(),
            provider: OidcProvider::Google,
            created_at: Utc::now(),
            return_to: None,
        }
    }

    #[tokio::test]
    async fn test_session_create_and_get() {
        let store = InMemorySessionStore::new();
        let session = create_test_session("session-1", "user-123");

        store.create_session(&session).await.unwrap();

        let retrieved = store
            .get_session(&SessionId::new("session-1".to_string()))
            .await
            .unwrap();
        assert!(retrieved.is_some());
        let retrieved = retrieved.unwrap();
        assert_eq!(retrieved.id.as_str(), "session-1");
        assert_eq!(retrieved.user_id, "user-123");
    }

    #[tokio::test]
    async fn test_session_get_nonexistent() {
        let store = InMemorySessionStore::new();

        let result = store
            .get_session(&SessionId::new("nonexistent".to_string()))
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_session_delete() {
        let store = InMemorySessionStore::new();
        let session = create_test_session("session-1", "user-123");

        store.create_session(&session).await.unwrap();
        store
            .delete_session(&SessionId::new("session-1".to_string()))
            .await
            .unwrap();

        let retrieved = store
            .get_session(&SessionId::new("session-1".to_string()))
            .await
            .unwrap();
        assert!(retrieved.is_none());
    }

    #[tokio::test]
    async fn test_session_delete_nonexistent() {
        let store = InMemorySessionStore::new();

        // Should not error when deleting nonexistent session
        let result = store
            .delete_session(&SessionId::new("nonexistent".to_string()))
            .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_auth_flow_store_and_take() {
        let store = InMemorySessionStore::new();
        let flow = create_test_auth_flow();

        store.store_auth_flow("state-abc", &flow).await.unwrap();

        let retrieved = store.take_auth_flow("state-abc").await.unwrap();
        assert!(retrieved.is_some());
        let retrieved = retrieved.unwrap();
        assert_eq!(retrieved.pkce_verifier, "test-verifier");

        // Should be gone after taking
        let second_take = store.take_auth_flow("state-abc").await.unwrap();
        assert!(second_take.is_none());
    }

    #[tokio::test]
    async fn test_auth_flow_take_nonexistent() {
        let store = InMemorySessionStore::new();

        let result = store.take_auth_flow("nonexistent").await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_auth_flow_overwrite() {
        let store = InMemorySessionStore::new();

        let flow1 = AuthFlowState {
            pkce_verifier: "verifier-1".to_string(),
            provider: OidcProvider::Google,
            created_at: Utc::now(),
            return_to: None,
        };
        let flow2 = AuthFlowState {
            pkce_verifier: "verifier-2".to_string(),
            provider: OidcProvider::Google,
            created_at: Utc::now(),
            return_to: Some("/my/events".to_string()),
        };

        store.store_auth_flow("same-state", &flow1).await.unwrap();
        store.store_auth_flow("same-state", &flow2).await.unwrap();

        let retrieved = store.take_auth_flow("same-state").await.unwrap().unwrap();
        assert_eq!(retrieved.pkce_verifier, "verifier-2");
        assert_eq!(retrieved.return_to, Some("/my/events".to_string()));
    }

    #[tokio::test]
    async fn test_clone_shares_state() {
        let store = InMemorySessionStore::new();
        let clone = store.clone();

        let session = create_test_session("session-1", "user-123");
        store.create_session(&session).await.unwrap();

        // Clone should see the same session
        let retrieved = clone
            .get_session(&SessionId::new("session-1".to_string()))
            .await
            .unwrap();
        assert!(retrieved.is_some());
    }
}
