//! Session store — durable, session-keyed snapshots of wizard state.
//!
//! One pointer entry (`"onboarding"`) names the active session id; the
//! payload for a session lives under `"onboarding-<id>"`. The pointer is
//! created lazily on first access and removed together with its payload by
//! [`SessionStore::clear_session`], so the next access starts a brand-new
//! session.

use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::billing::CardDetails;
use crate::error::DatabaseError;
use crate::store::traits::Database;

/// Key of the pointer entry naming the active session.
pub const SESSION_KEY: &str = "onboarding";

/// The serialized subset of wizard state persisted per session.
///
/// `current_step` is deliberately not part of the payload — resumption
/// recomputes it from field presence (see `wizard::state`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionPayload {
    /// Selected plan id; empty string means "unselected".
    #[serde(default)]
    pub plan: String,
    /// Billing card details; absent until the billing step is submitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub billing: Option<CardDetails>,
    /// Invited teammate emails, insertion order preserved.
    #[serde(default)]
    pub invites: Vec<String>,
    /// True once the final step's action has been taken.
    #[serde(default)]
    pub completed: bool,
}

/// Session identifiers are millisecond clock readings, clamped to be
/// strictly increasing within the process so a clear-then-recreate inside
/// one millisecond still yields a fresh id.
fn next_session_id() -> String {
    static LAST: AtomicI64 = AtomicI64::new(0);

    let now = chrono::Utc::now().timestamp_millis();
    let mut prev = LAST.load(Ordering::Relaxed);
    loop {
        let candidate = now.max(prev + 1);
        match LAST.compare_exchange_weak(prev, candidate, Ordering::Relaxed, Ordering::Relaxed) {
            Ok(_) => return candidate.to_string(),
            Err(observed) => prev = observed,
        }
    }
}

/// Durable key-value mapping from session id to wizard-state payload,
/// plus the active-session pointer.
#[derive(Clone)]
pub struct SessionStore {
    db: Arc<dyn Database>,
}

impl SessionStore {
    pub fn new(db: Arc<dyn Database>) -> Self {
        Self { db }
    }

    fn payload_key(session_id: &str) -> String {
        format!("{SESSION_KEY}-{session_id}")
    }

    /// Return the active session id, creating and recording one if absent.
    ///
    /// Idempotent: repeated calls return the same id until the session is
    /// cleared.
    pub async fn get_or_create_session_id(&self) -> Result<String, DatabaseError> {
        if let Some(value) = self.db.get_entry(SESSION_KEY).await? {
            if let Some(id) = value.as_str() {
                return Ok(id.to_string());
            }
            warn!(?value, "Session pointer entry is not a string, regenerating");
        }

        let id = next_session_id();
        self.db
            .set_entry(SESSION_KEY, &serde_json::Value::String(id.clone()))
            .await?;
        debug!(session_id = %id, "Created new onboarding session");
        Ok(id)
    }

    /// Load the payload for a session, or `None` if no record exists.
    ///
    /// A malformed payload is treated as absent: the caller falls back to
    /// defaults instead of failing the whole wizard on a corrupt record.
    pub async fn load_payload(
        &self,
        session_id: &str,
    ) -> Result<Option<SessionPayload>, DatabaseError> {
        let key = Self::payload_key(session_id);
        let Some(value) = self.db.get_entry(&key).await? else {
            return Ok(None);
        };

        match serde_json::from_value(value) {
            Ok(payload) => Ok(Some(payload)),
            Err(e) => {
                warn!(session_id, error = %e, "Malformed session payload, treating as absent");
                Ok(None)
            }
        }
    }

    /// Serialize and overwrite the payload record for a session.
    pub async fn save_payload(
        &self,
        session_id: &str,
        payload: &SessionPayload,
    ) -> Result<(), DatabaseError> {
        let value =
            serde_json::to_value(payload).map_err(|e| DatabaseError::Serialization(e.to_string()))?;
        self.db
            .set_entry(&Self::payload_key(session_id), &value)
            .await
    }

    /// Remove the active session's payload record and the pointer itself.
    ///
    /// After this call the next `get_or_create_session_id` produces a new
    /// identifier.
    pub async fn clear_session(&self) -> Result<(), DatabaseError> {
        let pointer = self.db.get_entry(SESSION_KEY).await?;
        if let Some(id) = pointer.as_ref().and_then(|v| v.as_str()) {
            self.db.delete_entry(&Self::payload_key(id)).await?;
        }
        self.db.delete_entry(SESSION_KEY).await?;
        debug!("Cleared onboarding session");
        Ok(())
    }
}
