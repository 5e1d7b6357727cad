use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Form fields the validation rules can report on
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Name,
    Email,
    Password,
    OldPassword,
    NewPassword,
    ConfirmPassword,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Password => "password",
            Field::OldPassword => "old_password",
            Field::NewPassword => "new_password",
            Field::ConfirmPassword => "confirm_password",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single field-level failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Violation {
    Required,
    MinLength { min: usize },
    Mismatch,
    InvalidFormat,
}

impl Violation {
    /// Stable tag for the violation kind
    pub fn kind(&self) -> &'static str {
        match self {
            Violation::Required => "required",
            Violation::MinLength { .. } => "min_length",
            Violation::Mismatch => "mismatch",
            Violation::InvalidFormat => "invalid_format",
        }
    }

    /// Default human-readable message for a field
    pub fn message(&self, field: Field) -> String {
        match (self, field) {
            (Violation::Required, Field::Name) => "Enter your name".to_string(),
            (Violation::Required, Field::Email) => "Enter your e-mail".to_string(),
            (Violation::Required, Field::Password) => "Enter your password".to_string(),
            (Violation::Required, Field::ConfirmPassword) => {
                "Confirm the new password".to_string()
            }
            (Violation::Required, field) => format!("{} is required", field),
            (Violation::MinLength { min }, _) => {
                format!("Password must have at least {} characters", min)
            }
            (Violation::Mismatch, _) => "Password confirmation does not match".to_string(),
            (Violation::InvalidFormat, Field::Email) => "Enter a valid e-mail".to_string(),
            (Violation::InvalidFormat, field) => format!("{} is not valid", field),
        }
    }
}

/// Violations keyed by field. A missing entry means the field is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Violations(BTreeMap<Field, Violation>);

impl Violations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: Field, violation: Violation) {
        self.0.insert(field, violation);
    }

    pub fn get(&self, field: Field) -> Option<Violation> {
        self.0.get(&field).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, Violation)> + '_ {
        self.0.iter().map(|(field, violation)| (*field, *violation))
    }

    /// Turn a non-empty set into an error
    pub fn into_result(self) -> Result<(), crate::utils::ValidationFailed> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(crate::utils::ValidationFailed(self))
        }
    }
}

impl fmt::Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<String> = self
            .iter()
            .map(|(field, violation)| format!("{}: {}", field, violation.message(field)))
            .collect();
        write!(f, "{}", messages.join("; "))
    }
}
