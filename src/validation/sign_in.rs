use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::engine::{Form, Rule};
use super::types::{Field, Violation};

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("e-mail pattern is valid")
});

/// Credentials entered on the sign-in screen
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignInForm {
    pub email: String,
    pub password: String,
}

fn email_rule(form: &SignInForm) -> Option<Violation> {
    let email = form.email.trim();
    if email.is_empty() {
        Some(Violation::Required)
    } else if !EMAIL_PATTERN.is_match(email) {
        Some(Violation::InvalidFormat)
    } else {
        None
    }
}

fn password_rule(form: &SignInForm) -> Option<Violation> {
    form.password.is_empty().then_some(Violation::Required)
}

static SIGN_IN_RULES: &[Rule<SignInForm>] = &[
    Rule {
        field: Field::Email,
        check: email_rule,
    },
    Rule {
        field: Field::Password,
        check: password_rule,
    },
];

impl Form for SignInForm {
    fn rules() -> &'static [Rule<Self>] {
        SIGN_IN_RULES
    }
}
