// src/core/key_rotation.rs

use crate::core::credentials::{preview_key, CredentialSet};
use rand::Rng;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::debug;

/// How the next API key is picked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RotationPolicy {
    /// Round-robin in the order the keys were supplied.
    #[default]
    Sequential,
    /// Uniform random pick on every request.
    Random,
}

impl RotationPolicy {
    pub fn from_random_flag(random_keys: bool) -> Self {
        if random_keys {
            Self::Random
        } else {
            Self::Sequential
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sequential => "round_robin",
            Self::Random => "random",
        }
    }
}

/// Owns the credential set and the rotation cursor.
///
/// The cursor is advanced with a single atomic read-modify-write, so
/// concurrent callers under [`RotationPolicy::Sequential`] each get their own
/// slot and no key is skipped or handed out twice within a cycle.
#[derive(Debug)]
pub struct KeySelector {
    credentials: CredentialSet,
    policy: RotationPolicy,
    cursor: AtomicUsize,
}

impl KeySelector {
    pub fn new(credentials: CredentialSet, policy: RotationPolicy) -> Self {
        Self {
            credentials,
            policy,
            cursor: AtomicUsize::new(0),
        }
    }

    /// Picks the key for one outgoing request. Call exactly once per request.
    pub fn select_credential(&self) -> &SecretString {
        let total = self.credentials.len();
        let index = match self.policy {
            RotationPolicy::Random => rand::thread_rng().gen_range(0..total),
            RotationPolicy::Sequential => self
                .cursor
                .fetch_update(Ordering::AcqRel, Ordering::Acquire, |i| Some((i + 1) % total))
                .unwrap_or_else(|current| current),
        };

        let key = self.credentials.nth_wrapping(index);
        self.log_key_selection(key.expose_secret(), index, total);
        key
    }

    /// Position the next sequential selection will use.
    pub fn cursor(&self) -> usize {
        self.cursor.load(Ordering::Acquire)
    }

    pub fn policy(&self) -> RotationPolicy {
        self.policy
    }

    pub fn credentials(&self) -> &CredentialSet {
        &self.credentials
    }

    fn log_key_selection(&self, key: &str, index: usize, total_candidates: usize) {
        debug!(
            event = "key_selected",
            api_key.preview = %preview_key(key),
            rotation_method = self.policy.as_str(),
            index,
            total_candidates,
            "API key selected for request"
        );
    }
}
