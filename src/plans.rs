//! The purchasable plan catalog served to the plan-selection step.

use serde::Serialize;

/// Monthly dollar price, or a sales-contact marker for custom pricing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PlanPrice {
    Monthly(u32),
    Contact(&'static str),
}

/// One purchasable plan.
#[derive(Debug, Clone, Serialize)]
pub struct Plan {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub price: PlanPrice,
    pub features: &'static [&'static str],
    pub best_offer: bool,
}

/// The plan catalog, cheapest first.
pub static PLANS: &[Plan] = &[
    Plan {
        id: "basic",
        title: "Basic",
        description: "Ideal for small teams getting started with AI-moderated interviews.",
        price: PlanPrice::Monthly(49),
        features: &[
            "Up to 50 interviews per month",
            "AI-moderated voice interviews",
            "Real-time open-ended response coding",
            "Basic export to CSV",
            "Email support",
        ],
        best_offer: false,
    },
    Plan {
        id: "professional",
        title: "Professional",
        description: "For growing teams that need advanced insights and reporting.",
        price: PlanPrice::Monthly(199),
        features: &[
            "Up to 250 interviews per month",
            "All Basic features",
            "Advanced analytics dashboard",
            "Multilingual support (up to 10 languages)",
            "Priority email support",
        ],
        best_offer: false,
    },
    Plan {
        id: "business",
        title: "Business",
        description: "Best for mid-sized organizations requiring custom workflows.",
        price: PlanPrice::Monthly(499),
        features: &[
            "Unlimited interviews",
            "All Professional features",
            "Custom branding and white-label reports",
            "Multilingual support (up to 25 languages)",
            "Dedicated account manager",
        ],
        best_offer: true,
    },
    Plan {
        id: "enterprise",
        title: "Enterprise",
        description: "Tailored solutions with enterprise-grade security and support.",
        price: PlanPrice::Contact("Contact us"),
        features: &[
            "Unlimited interviews",
            "All Business features",
            "Custom integration and API access",
            "Multilingual support (50+ languages)",
            "24/7 phone & Slack support",
            "Dedicated solutions architect",
        ],
        best_offer: false,
    },
];

/// Look up a plan by id.
pub fn find_plan(id: &str) -> Option<&'static Plan> {
    PLANS.iter().find(|p| p.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plan_ids_are_unique() {
        for (i, plan) in PLANS.iter().enumerate() {
            for other in &PLANS[i + 1..] {
                assert_ne!(plan.id, other.id);
            }
        }
    }

    #[test]
    fn find_plan_hits_and_misses() {
        assert_eq!(find_plan("professional").unwrap().title, "Professional");
        assert!(find_plan("gold").is_none());
        assert!(find_plan("").is_none());
    }

    #[test]
    fn exactly_one_best_offer() {
        let count = PLANS.iter().filter(|p| p.best_offer).count();
        assert_eq!(count, 1);
    }

    #[test]
    fn price_serialization() {
        let monthly = serde_json::to_value(PlanPrice::Monthly(199)).unwrap();
        assert_eq!(monthly, serde_json::json!(199));

        let contact = serde_json::to_value(PlanPrice::Contact("Contact us")).unwrap();
        assert_eq!(contact, serde_json::json!("Contact us"));
    }
}
