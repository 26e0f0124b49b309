use spdx::Expression;

/// Capability the classifier depends on: decide whether a string
/// canonicalizes to a valid SPDX license expression.
///
/// Implementations must be stateless and safe for concurrent read-only use.
pub trait ExpressionValidator {
    fn validate(&self, expression: &str) -> bool;
}

/// Production validator backed by the SPDX expression parser.
///
/// Handles identifiers, the `AND`/`OR`/`WITH` operators, and parentheses.
/// Deprecated identifiers still parse; rejection is a verdict for the
/// classifier to fold into a finding state, never an error.
pub struct SpdxValidator;

impl ExpressionValidator for SpdxValidator {
    fn validate(&self, expression: &str) -> bool {
        Expression::parse(expression).is_ok()
    }
}
