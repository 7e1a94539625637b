//! The step catalog — the fixed, ordered list of onboarding steps.

use serde::Serialize;

/// One onboarding step. Catalog order defines the order of progression and
/// is immutable at runtime.
#[derive(Debug, Clone, Serialize)]
pub struct StepDescriptor {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
}

/// The onboarding steps, in progression order. Ids are unique.
pub static STEPS: &[StepDescriptor] = &[
    StepDescriptor {
        id: "pricing",
        title: "Choose a Plan",
        description: "Select the SaaS plan that best matches your team's needs, \
                      including pricing, features, and usage limits for future growth.",
    },
    StepDescriptor {
        id: "billing",
        title: "Set Up Billing",
        description: "Enter your credit card details securely to enable billing, \
                      recurring payments, and proper invoicing through our trusted gateway.",
    },
    StepDescriptor {
        id: "invites",
        title: "Invite Teammates",
        description: "Add your team members by entering their email addresses so they \
                      can collaborate with you inside the platform right after onboarding.",
    },
];

/// Index of a step id in the catalog. A linear scan is fine at this size.
///
/// `None` covers both the uninitialized empty id and ids from stale
/// payloads — callers treat it as "index −1".
pub fn step_index(id: &str) -> Option<usize> {
    STEPS.iter().position(|step| step.id == id)
}
