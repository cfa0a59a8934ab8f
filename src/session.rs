use crate::errors::TrackerError;
use crate::storage::{KeyValueStore, SESSION_KEY};

/// The active username for this profile, mirrored under [`SESSION_KEY`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    user: Option<String>,
}

impl Session {
    /// Restores a persisted session without re-checking credentials.
    pub fn restore<S: KeyValueStore + ?Sized>(store: &S) -> Self {
        Self {
            user: store.get(SESSION_KEY).filter(|user| !user.is_empty()),
        }
    }

    pub fn user(&self) -> Option<&str> {
        self.user.as_deref()
    }

    pub fn login<S: KeyValueStore + ?Sized>(
        &mut self,
        store: &mut S,
        username: &str,
    ) -> Result<(), TrackerError> {
        store.set(SESSION_KEY, username.to_string())?;
        self.user = Some(username.to_string());
        Ok(())
    }

    pub fn logout<S: KeyValueStore + ?Sized>(&mut self, store: &mut S) -> Result<(), TrackerError> {
        store.remove(SESSION_KEY)?;
        self.user = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn login_persists_and_restores() {
        let mut store = MemoryStore::new();
        let mut session = Session::restore(&store);
        assert_eq!(session.user(), None);

        session.login(&mut store, "alice").unwrap();
        assert_eq!(Session::restore(&store).user(), Some("alice"));

        session.logout(&mut store).unwrap();
        assert_eq!(session.user(), None);
        assert_eq!(store.get(SESSION_KEY), None);
    }
}
