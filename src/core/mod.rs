// src/core/mod.rs

pub mod credentials;
pub mod key_rotation;

pub use credentials::{preview_key, ApiKeys, CredentialSet};
pub use key_rotation::{KeySelector, RotationPolicy};
