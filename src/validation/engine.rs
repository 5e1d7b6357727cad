use super::types::{Field, Violation, Violations};

/// One rule: owns a single field and reports at most one violation for it.
///
/// The check receives the whole form so rules may depend on sibling fields.
pub struct Rule<F> {
    pub field: Field,
    pub check: fn(&F) -> Option<Violation>,
}

/// A form with an ordered rule set
pub trait Form: Sized + 'static {
    fn rules() -> &'static [Rule<Self>];
}

/// Stateless evaluator shared by every form
pub struct ValidationEngine;

impl ValidationEngine {
    /// Run every rule against the form
    pub fn evaluate<F: Form>(form: &F) -> Violations {
        let mut violations = Violations::new();
        for rule in F::rules() {
            if let Some(violation) = (rule.check)(form) {
                violations.insert(rule.field, violation);
            }
        }
        violations
    }

    /// Run only the rules for one field, using the other fields' current values
    pub fn evaluate_field<F: Form>(form: &F, field: Field) -> Option<Violation> {
        F::rules()
            .iter()
            .filter(|rule| rule.field == field)
            .find_map(|rule| (rule.check)(form))
    }
}
