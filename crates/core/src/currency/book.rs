//! Live rate book fed by configuration push events.
//!
//! Each event produces a whole new `RateRegistry` that replaces the current
//! one under a single write lock. Readers hold an `Arc` to the snapshot they
//! started with, so a default swap is never observed half-done.

use std::sync::{Arc, PoisonError, RwLock};

use serde::{Deserialize, Serialize};
use tracing::debug;

use bodega_shared::types::RateProfileId;

use super::error::CurrencyError;
use super::registry::{RateProfile, RateRegistry};

/// Change pushed by the configuration service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum RateEvent {
    /// A profile was created or updated.
    Upserted(RateProfile),
    /// A profile was deleted.
    Deleted(RateProfileId),
    /// The whole profile list was reloaded.
    Replaced(Vec<RateProfile>),
}

impl RateEvent {
    /// Applies the event to `registry`, returning the next snapshot.
    pub fn apply_to(&self, registry: &RateRegistry) -> Result<RateRegistry, CurrencyError> {
        match self {
            Self::Upserted(profile) => Ok(registry.upsert(profile.clone())),
            Self::Deleted(id) => Ok(registry.remove(*id)),
            Self::Replaced(profiles) => {
                RateRegistry::from_profiles(registry.anchor().clone(), profiles.iter().cloned())
            }
        }
    }
}

/// Shared handle to the current rate snapshot.
#[derive(Debug, Clone)]
pub struct RateBook {
    current: Arc<RwLock<Arc<RateRegistry>>>,
}

impl RateBook {
    /// Creates a book holding `registry`.
    #[must_use]
    pub fn new(registry: RateRegistry) -> Self {
        Self {
            current: Arc::new(RwLock::new(Arc::new(registry))),
        }
    }

    /// Returns the current snapshot.
    #[must_use]
    pub fn snapshot(&self) -> Arc<RateRegistry> {
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    /// Applies a push event and publishes the resulting snapshot.
    ///
    /// On error the current snapshot is left in place.
    pub fn apply(&self, event: &RateEvent) -> Result<Arc<RateRegistry>, CurrencyError> {
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        let next = Arc::new(event.apply_to(&guard)?);
        *guard = Arc::clone(&next);
        debug!(profiles = next.len(), "rate snapshot replaced");
        Ok(next)
    }

    /// Replaces the snapshot wholesale.
    pub fn replace(&self, registry: RateRegistry) {
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        *guard = Arc::new(registry);
    }
}
