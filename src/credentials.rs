use crate::errors::TrackerError;
use crate::storage::{KeyValueStore, USERS_KEY, load_record, save_record};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use tracing::info;

// Values without this prefix are legacy plaintext passwords.
const HASH_PREFIX: &str = "sha256:";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CredentialDirectory {
    users: BTreeMap<String, String>,
}

impl CredentialDirectory {
    pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> Self {
        Self {
            users: load_record(store, USERS_KEY),
        }
    }

    pub fn contains(&self, username: &str) -> bool {
        self.users.contains_key(username)
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    pub fn register<S: KeyValueStore + ?Sized>(
        &mut self,
        store: &mut S,
        username: &str,
        password: &str,
    ) -> Result<(), TrackerError> {
        if username.trim().is_empty() {
            return Err(TrackerError::EmptyUsername);
        }
        if username.chars().any(char::is_control) {
            return Err(TrackerError::InvalidUsername(username.to_string()));
        }
        if self.contains(username) {
            return Err(TrackerError::DuplicateUser);
        }

        let mut users = self.users.clone();
        users.insert(username.to_string(), hash_password(password));
        save_record(store, USERS_KEY, &users)?;
        self.users = users;

        info!(user = username, "registered user");
        Ok(())
    }

    pub fn authenticate(&self, username: &str, password: &str) -> Result<(), TrackerError> {
        match self.users.get(username) {
            Some(stored) if verify_password(password, stored) => Ok(()),
            _ => Err(TrackerError::InvalidCredentials),
        }
    }
}

pub fn hash_password(password: &str) -> String {
    let digest = Sha256::digest(password.as_bytes());
    format!("{HASH_PREFIX}{}", hex::encode(digest))
}

pub fn verify_password(password: &str, stored: &str) -> bool {
    match stored.strip_prefix(HASH_PREFIX) {
        Some(_) => hash_password(password) == stored,
        None => password == stored,
    }
}
