//! Onboarding wizard — step catalog, derivation, progression, and routes.
//!
//! The wizard is a linear three-step flow (plan → billing → invites) whose
//! "where am I" question is answered from persisted data, not a stored
//! pointer: the step deriver computes current/done flags, and resumption
//! recomputes the initial step from which fields exist.

pub mod catalog;
pub mod manager;
pub mod routes;
pub mod state;
pub mod steps;

pub use catalog::{STEPS, StepDescriptor, step_index};
pub use manager::{CurrentStep, OnboardingManager, OnboardingStatus};
pub use routes::{RouteState, onboarding_routes};
pub use state::{WizardState, derive_initial_step};
pub use steps::{StepView, derive_steps};
