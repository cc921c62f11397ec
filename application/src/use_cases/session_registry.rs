//! In-memory session registry
//!
//! Owns every [`DiagnosticSession`] by identifier. Sessions are registered
//! exactly once, at creation, and never removed. Readers get snapshots;
//! writers must hold a [`SessionLease`], which marks the session busy so
//! two operations can never interleave on the same session.
//!
//! The map lock is only held for short synchronous sections, never across
//! an `.await`.

use council_domain::{DiagnosticSession, SessionId};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use thiserror::Error;
use tracing::debug;

/// Errors raised by [`SessionRegistry`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Session {0} is already registered")]
    Duplicate(SessionId),

    #[error("Session {0} not found")]
    NotFound(SessionId),

    #[error("Session {0} is busy")]
    Busy(SessionId),
}

struct Slot {
    session: DiagnosticSession,
    busy: bool,
}

/// Registry of all sessions known to an orchestrator.
#[derive(Default)]
pub struct SessionRegistry {
    slots: Mutex<HashMap<SessionId, Slot>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn slots(&self) -> MutexGuard<'_, HashMap<SessionId, Slot>> {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register a freshly created session.
    pub fn register(&self, session: DiagnosticSession) -> Result<SessionId, RegistryError> {
        let id = session.id();
        let mut slots = self.slots();
        if slots.contains_key(&id) {
            return Err(RegistryError::Duplicate(id));
        }
        slots.insert(
            id,
            Slot {
                session,
                busy: false,
            },
        );
        debug!(session_id = %id, "Registered session");
        Ok(id)
    }

    /// Snapshot of one session, or `None` if unknown.
    pub fn get(&self, id: SessionId) -> Option<DiagnosticSession> {
        self.slots().get(&id).map(|slot| slot.session.clone())
    }

    /// Snapshots of all sessions, oldest first.
    pub fn list(&self) -> Vec<DiagnosticSession> {
        let mut sessions: Vec<_> = self
            .slots()
            .values()
            .map(|slot| slot.session.clone())
            .collect();
        sessions.sort_by_key(|s| (s.created_at(), s.id()));
        sessions
    }

    pub fn contains(&self, id: SessionId) -> bool {
        self.slots().contains_key(&id)
    }

    pub fn is_busy(&self, id: SessionId) -> bool {
        self.slots().get(&id).is_some_and(|slot| slot.busy)
    }

    pub fn len(&self) -> usize {
        self.slots().len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots().is_empty()
    }

    /// Take exclusive write access to a session.
    ///
    /// Fails with [`RegistryError::Busy`] while another lease is alive.
    pub fn lease(self: &Arc<Self>, id: SessionId) -> Result<SessionLease, RegistryError> {
        let mut slots = self.slots();
        let slot = slots.get_mut(&id).ok_or(RegistryError::NotFound(id))?;
        if slot.busy {
            return Err(RegistryError::Busy(id));
        }
        slot.busy = true;
        Ok(SessionLease {
            registry: Arc::clone(self),
            id,
        })
    }
}

/// Exclusive write access to one session; released on drop.
pub struct SessionLease {
    registry: Arc<SessionRegistry>,
    id: SessionId,
}

impl SessionLease {
    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn read<R>(&self, f: impl FnOnce(&DiagnosticSession) -> R) -> Result<R, RegistryError> {
        let slots = self.registry.slots();
        let slot = slots.get(&self.id).ok_or(RegistryError::NotFound(self.id))?;
        Ok(f(&slot.session))
    }

    pub fn update<R>(
        &self,
        f: impl FnOnce(&mut DiagnosticSession) -> R,
    ) -> Result<R, RegistryError> {
        let mut slots = self.registry.slots();
        let slot = slots
            .get_mut(&self.id)
            .ok_or(RegistryError::NotFound(self.id))?;
        Ok(f(&mut slot.session))
    }

    pub fn snapshot(&self) -> Result<DiagnosticSession, RegistryError> {
        self.read(DiagnosticSession::clone)
    }
}

impl Drop for SessionLease {
    fn drop(&mut self) {
        if let Some(slot) = self.registry.slots().get_mut(&self.id) {
            slot.busy = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use council_domain::{ConversationEntry, PatientCase};

    fn session() -> DiagnosticSession {
        DiagnosticSession::new(SessionId::new(), PatientCase::new(), "Internal Medicine")
    }

    #[test]
    fn test_register_once() {
        let registry = SessionRegistry::new();
        let session = session();
        let id = registry.register(session.clone()).unwrap();

        assert_eq!(registry.register(session), Err(RegistryError::Duplicate(id)));
        assert_eq!(registry.len(), 1);
        assert!(registry.contains(id));
    }

    #[test]
    fn test_get_unknown_is_none() {
        let registry = SessionRegistry::new();
        assert!(registry.get(SessionId::new()).is_none());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_lease_is_exclusive() {
        let registry = Arc::new(SessionRegistry::new());
        let id = registry.register(session()).unwrap();

        let lease = registry.lease(id).unwrap();
        assert!(registry.is_busy(id));
        assert_eq!(registry.lease(id).err(), Some(RegistryError::Busy(id)));

        drop(lease);
        assert!(!registry.is_busy(id));
        assert!(registry.lease(id).is_ok());
    }

    #[test]
    fn test_lease_unknown_session() {
        let registry = Arc::new(SessionRegistry::new());
        let id = SessionId::new();
        assert_eq!(registry.lease(id).err(), Some(RegistryError::NotFound(id)));
    }

    #[test]
    fn test_update_is_visible_to_readers() {
        let registry = Arc::new(SessionRegistry::new());
        let id = registry.register(session()).unwrap();

        let lease = registry.lease(id).unwrap();
        lease
            .update(|s| {
                s.record(ConversationEntry::system("hello"));
            })
            .unwrap();

        assert_eq!(registry.get(id).unwrap().transcript().len(), 1);
        assert_eq!(lease.snapshot().unwrap().transcript().len(), 1);
    }

    #[test]
    fn test_list_is_oldest_first() {
        let registry = SessionRegistry::new();
        let first = registry.register(session()).unwrap();
        let second = registry.register(session()).unwrap();

        let ids: Vec<_> = registry.list().iter().map(|s| s.id()).collect();
        assert_eq!(ids.len(), 2);
        assert!(ids.contains(&first) && ids.contains(&second));
    }
}
