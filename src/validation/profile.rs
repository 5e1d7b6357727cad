use serde::{Deserialize, Serialize};

use super::engine::{Form, Rule};
use super::types::{Field, Violation};
use crate::constants::MIN_PASSWORD_LEN;
use crate::models::{ProfileChanges, UserProfile};

/// Candidate values from the profile screen
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileUpdateForm {
    pub name: String,
    /// Display only, never submitted
    pub email: String,
    #[serde(default)]
    pub old_password: String,
    #[serde(default)]
    pub new_password: String,
    #[serde(default)]
    pub confirm_password: String,
}

impl ProfileUpdateForm {
    /// Pre-fill the form from the current session profile
    pub fn from_profile(profile: &UserProfile) -> Self {
        Self {
            name: profile.name().to_string(),
            email: profile.email().to_string(),
            ..Default::default()
        }
    }

    /// Whether the form asks for a password change
    pub fn changes_password(&self) -> bool {
        !self.new_password.is_empty()
    }

    /// Build the narrow request: the name only if it changed, password fields
    /// only when a new password was entered
    pub fn changes(&self, current: &UserProfile) -> ProfileChanges {
        let name = self.name.trim();
        let mut changes = ProfileChanges::default();

        if !name.is_empty() && name != current.name() {
            changes.name = Some(name.to_string());
        }

        if self.changes_password() {
            changes.new_password = Some(self.new_password.clone());
            if !self.old_password.is_empty() {
                changes.old_password = Some(self.old_password.clone());
            }
        }

        changes
    }
}

fn name_rule(form: &ProfileUpdateForm) -> Option<Violation> {
    form.name.trim().is_empty().then_some(Violation::Required)
}

fn new_password_rule(form: &ProfileUpdateForm) -> Option<Violation> {
    let len = form.new_password.chars().count();
    (len > 0 && len < MIN_PASSWORD_LEN).then_some(Violation::MinLength {
        min: MIN_PASSWORD_LEN,
    })
}

fn confirm_password_rule(form: &ProfileUpdateForm) -> Option<Violation> {
    // No password change requested: the confirmation is never inspected
    if form.new_password.is_empty() {
        return None;
    }
    if form.confirm_password.is_empty() {
        return Some(Violation::Required);
    }
    (form.confirm_password != form.new_password).then_some(Violation::Mismatch)
}

static PROFILE_RULES: &[Rule<ProfileUpdateForm>] = &[
    Rule {
        field: Field::Name,
        check: name_rule,
    },
    Rule {
        field: Field::NewPassword,
        check: new_password_rule,
    },
    Rule {
        field: Field::ConfirmPassword,
        check: confirm_password_rule,
    },
];

impl Form for ProfileUpdateForm {
    fn rules() -> &'static [Rule<Self>] {
        PROFILE_RULES
    }
}
