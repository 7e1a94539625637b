//! Invite email validation.

use regex::Regex;

/// Compiled email-shape rule for teammate invites.
///
/// Deliberately loose: one `@`, no whitespace, a dot in the domain. Real
/// deliverability is the invitation email's problem, not the wizard's.
pub struct EmailRule {
    pattern: Regex,
}

impl Default for EmailRule {
    fn default() -> Self {
        Self {
            pattern: Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap(),
        }
    }
}

impl EmailRule {
    pub fn is_valid(&self, email: &str) -> bool {
        self.pattern.is_match(email)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_addresses() {
        let rule = EmailRule::default();
        for good in [
            "teammate@example.com",
            "a.b+tag@sub.domain.org",
            "x@y.co",
        ] {
            assert!(rule.is_valid(good), "{good} should be accepted");
        }
    }

    #[test]
    fn rejects_malformed_addresses() {
        let rule = EmailRule::default();
        for bad in [
            "",
            "plainaddress",
            "no at.example.com",
            "two@@example.com",
            "missing-domain@",
            "@missing-local.com",
            "nodot@example",
        ] {
            assert!(!rule.is_valid(bad), "{bad:?} should be rejected");
        }
    }
}
