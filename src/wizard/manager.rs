//! OnboardingManager — owns the wizard state, wires every mutation to the
//! session store, and carries the advance/retreat progression surface.

use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::billing::CardDetails;
use crate::error::DatabaseError;
use crate::store::{SessionPayload, SessionStore};

use super::catalog::{STEPS, step_index};
use super::state::WizardState;
use super::steps::{StepView, derive_steps};

/// The active session: its durable id plus the in-memory wizard state.
struct ActiveSession {
    id: String,
    state: WizardState,
}

/// Wizard status for the REST surface.
#[derive(Debug, Clone, Serialize)]
pub struct OnboardingStatus {
    pub session_id: String,
    pub completed: bool,
    pub selected_plan: String,
    pub invites: Vec<String>,
    pub billing_complete: bool,
    pub steps: Vec<StepView>,
    /// Absent while uninitialized and once the wizard is completed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_step: Option<CurrentStep>,
}

/// The step the user is on, with its "step X of N" ticker.
#[derive(Debug, Clone, Serialize)]
pub struct CurrentStep {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub ticker: String,
}

/// Coordinates the onboarding flow.
///
/// The session attaches lazily on first access: the pointer entry is
/// created (or read), the payload loaded (or seeded with defaults), and
/// the initial step recomputed from field presence. After
/// [`clear_session`](Self::clear_session) the next access starts a
/// brand-new session.
///
/// Every mutation persists the payload before the call returns, so durable
/// state is correct up to the granularity of the last completed mutator.
pub struct OnboardingManager {
    sessions: SessionStore,
    session: RwLock<Option<ActiveSession>>,
}

impl OnboardingManager {
    pub fn new(sessions: SessionStore) -> Self {
        Self {
            sessions,
            session: RwLock::new(None),
        }
    }

    /// Open the active session: resume from its payload, or seed defaults.
    async fn open_session(&self) -> Result<ActiveSession, DatabaseError> {
        let id = self.sessions.get_or_create_session_id().await?;
        match self.sessions.load_payload(&id).await? {
            Some(payload) => {
                let state = WizardState::from_payload(&payload);
                debug!(session_id = %id, step = %state.current_step, "Resumed onboarding session");
                Ok(ActiveSession { id, state })
            }
            None => {
                let state = WizardState::from_payload(&SessionPayload::default());
                self.sessions.save_payload(&id, &state.to_payload()).await?;
                debug!(session_id = %id, "Seeded fresh onboarding session");
                Ok(ActiveSession { id, state })
            }
        }
    }

    /// Run one mutation against the attached session.
    ///
    /// The closure reports whether it changed anything; `true` triggers
    /// exactly one payload write, `false` (retreat at the first step)
    /// skips persistence entirely.
    async fn mutate(
        &self,
        f: impl FnOnce(&mut WizardState) -> bool,
    ) -> Result<(), DatabaseError> {
        let mut guard = self.session.write().await;
        if guard.is_none() {
            *guard = Some(self.open_session().await?);
        }
        if let Some(session) = guard.as_mut() {
            if f(&mut session.state) {
                self.sessions
                    .save_payload(&session.id, &session.state.to_payload())
                    .await?;
            }
        }
        Ok(())
    }

    // ── Wizard State mutators ───────────────────────────────────────

    pub async fn set_selected_plan(&self, plan: String) -> Result<(), DatabaseError> {
        self.mutate(|state| {
            state.set_selected_plan(plan);
            true
        })
        .await
    }

    pub async fn set_billing(&self, billing: Option<CardDetails>) -> Result<(), DatabaseError> {
        self.mutate(|state| {
            state.set_billing(billing);
            true
        })
        .await
    }

    pub async fn set_invites(&self, invites: Vec<String>) -> Result<(), DatabaseError> {
        self.mutate(|state| {
            state.set_invites(invites);
            true
        })
        .await
    }

    pub async fn set_completed(&self, completed: bool) -> Result<(), DatabaseError> {
        self.mutate(|state| {
            state.set_completed(completed);
            true
        })
        .await
    }

    // ── Progression controller ──────────────────────────────────────
    //
    // The only place the step pointer moves. An unknown or uninitialized
    // step id acts as index −1, so advancing from it lands on the first
    // step.

    /// Move forward one step, or complete the wizard from the last step.
    /// Exactly one mutator fires per call.
    pub async fn advance(&self) -> Result<(), DatabaseError> {
        self.mutate(|state| {
            let index = step_index(&state.current_step).map(|i| i as i64).unwrap_or(-1);
            let target = index + 1;
            if (target as usize) < STEPS.len() {
                state.set_current_step(STEPS[target as usize].id.to_string());
            } else {
                // Last step: complete, leave the step pointer where it is
                state.set_completed(true);
            }
            true
        })
        .await
    }

    /// Move back one step. At the first step this is a silent no-op: no
    /// mutator fires and nothing is persisted.
    pub async fn retreat(&self) -> Result<(), DatabaseError> {
        self.mutate(|state| {
            let index = step_index(&state.current_step).map(|i| i as i64).unwrap_or(-1);
            let target = index - 1;
            if target >= 0 {
                state.set_current_step(STEPS[target as usize].id.to_string());
                true
            } else {
                false
            }
        })
        .await
    }

    // ── Reads ───────────────────────────────────────────────────────

    /// Current wizard status, attaching the session if needed.
    pub async fn status(&self) -> Result<OnboardingStatus, DatabaseError> {
        let mut guard = self.session.write().await;
        if guard.is_none() {
            *guard = Some(self.open_session().await?);
        }
        let Some(session) = guard.as_ref() else {
            // open_session either filled the slot or returned an error
            return Err(DatabaseError::Query("session unavailable".to_string()));
        };

        let state = &session.state;
        let steps = derive_steps(STEPS, &state.current_step, state.completed);
        let current_step = steps.iter().position(|s| s.current).map(|index| {
            let step = &STEPS[index];
            CurrentStep {
                id: step.id,
                title: step.title,
                description: step.description,
                ticker: format!("step {} of {}", index + 1, STEPS.len()),
            }
        });

        Ok(OnboardingStatus {
            session_id: session.id.clone(),
            completed: state.completed,
            selected_plan: state.selected_plan.clone(),
            invites: state.invites.clone(),
            billing_complete: state.billing.is_some(),
            steps,
            current_step,
        })
    }

    /// Remove the durable session (payload and pointer) and detach.
    ///
    /// The completed view fires this once on mount; the next access then
    /// builds a brand-new session from scratch.
    pub async fn clear_session(&self) -> Result<(), DatabaseError> {
        let mut guard = self.session.write().await;
        self.sessions.clear_session().await?;
        *guard = None;
        info!("Onboarding session cleared");
        Ok(())
    }
}
