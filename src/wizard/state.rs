//! Wizard state container and the resumption reconciliation rule.

use crate::billing::CardDetails;
use crate::store::SessionPayload;

use super::catalog::STEPS;

/// The in-memory wizard state.
///
/// Field mutations happen through the setters so every change stays a total
/// replacement of one field; persistence is the manager's job, not this
/// struct's.
#[derive(Debug, Clone, Default)]
pub struct WizardState {
    /// Current step id; the empty string means "not yet initialized".
    pub current_step: String,
    pub completed: bool,
    /// Selected plan id; empty string means "unselected".
    pub selected_plan: String,
    pub billing: Option<CardDetails>,
    pub invites: Vec<String>,
}

impl WizardState {
    /// Rebuild state from a persisted payload, recomputing the step pointer
    /// from field presence via [`derive_initial_step`].
    pub fn from_payload(payload: &SessionPayload) -> Self {
        Self {
            current_step: derive_initial_step(payload).to_string(),
            completed: payload.completed,
            selected_plan: payload.plan.clone(),
            billing: payload.billing.clone(),
            invites: payload.invites.clone(),
        }
    }

    /// The persisted subset of this state. `current_step` is excluded.
    pub fn to_payload(&self) -> SessionPayload {
        SessionPayload {
            plan: self.selected_plan.clone(),
            billing: self.billing.clone(),
            invites: self.invites.clone(),
            completed: self.completed,
        }
    }

    pub fn set_selected_plan(&mut self, plan: String) {
        self.selected_plan = plan;
    }

    pub fn set_current_step(&mut self, step_id: String) {
        self.current_step = step_id;
    }

    pub fn set_billing(&mut self, billing: Option<CardDetails>) {
        self.billing = billing;
    }

    pub fn set_invites(&mut self, invites: Vec<String>) {
        self.invites = invites;
    }

    pub fn set_completed(&mut self, completed: bool) {
        self.completed = completed;
    }
}

/// Recompute the initial step from what data the payload holds.
///
/// The persisted payload carries no step pointer; resumption infers it:
/// no plan yet → plan selection, no billing yet → billing, otherwise
/// invites. A user who reached the invites step but entered nothing resumes
/// at invites only because billing exists — that imprecision is accepted
/// for robustness against partial payloads.
pub fn derive_initial_step(payload: &SessionPayload) -> &'static str {
    if payload.plan.is_empty() {
        STEPS[0].id
    } else if payload.billing.is_none() {
        STEPS[1].id
    } else {
        STEPS[2].id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card() -> CardDetails {
        CardDetails {
            card_holder_name: "Gaston Che".to_string(),
            card_number: "1234567890123456".to_string(),
            expiration_month: "12".to_string(),
            expiration_year: "25".to_string(),
            cvc: "123".to_string(),
        }
    }

    #[test]
    fn empty_payload_starts_at_pricing() {
        let payload = SessionPayload::default();
        assert_eq!(derive_initial_step(&payload), "pricing");
    }

    #[test]
    fn plan_without_billing_resumes_at_billing() {
        let payload = SessionPayload {
            plan: "gold".to_string(),
            ..Default::default()
        };
        assert_eq!(derive_initial_step(&payload), "billing");
    }

    #[test]
    fn plan_and_billing_resume_at_invites() {
        let payload = SessionPayload {
            plan: "gold".to_string(),
            billing: Some(card()),
            invites: vec!["a@example.com".to_string()],
            completed: false,
        };
        assert_eq!(derive_initial_step(&payload), "invites");
    }

    #[test]
    fn invites_alone_do_not_move_the_step() {
        // Invite data without a plan still resumes at the first step
        let payload = SessionPayload {
            invites: vec!["a@example.com".to_string()],
            ..Default::default()
        };
        assert_eq!(derive_initial_step(&payload), "pricing");
    }

    #[test]
    fn payload_round_trip_preserves_fields() {
        let payload = SessionPayload {
            plan: "business".to_string(),
            billing: Some(card()),
            invites: vec!["a@example.com".to_string(), "b@example.com".to_string()],
            completed: true,
        };

        let state = WizardState::from_payload(&payload);
        assert_eq!(state.selected_plan, "business");
        assert_eq!(state.invites.len(), 2);
        assert!(state.completed);
        assert_eq!(state.current_step, "invites");

        assert_eq!(state.to_payload(), payload);
    }

    #[test]
    fn setters_replace_whole_fields() {
        let mut state = WizardState::default();

        state.set_selected_plan("basic".to_string());
        assert_eq!(state.selected_plan, "basic");

        state.set_invites(vec!["x@y.co".to_string()]);
        state.set_invites(Vec::new());
        assert!(state.invites.is_empty());

        state.set_billing(Some(card()));
        assert!(state.billing.is_some());

        state.set_current_step("billing".to_string());
        assert_eq!(state.current_step, "billing");

        state.set_completed(true);
        assert!(state.completed);
    }
}
