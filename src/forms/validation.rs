//! Validation engine
//!
//! [`validate`] is pure: the same values and rules always produce the same
//! [`ErrorMap`]. It is re-run over the entire form on every change so that
//! cross-field rules stay current.

use super::rules::RuleSet;
use super::value::FormValues;
use serde::Serialize;
use std::collections::BTreeMap;

/// Field name to the message of its first failing check.
/// A field absent from the map is currently valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ErrorMap {
    errors: BTreeMap<String, String>,
}

impl ErrorMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.errors.contains_key(field)
    }

    pub fn insert(&mut self, field: &str, message: &str) {
        self.errors.insert(field.to_string(), message.to_string());
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }
}

impl<const N: usize> From<[(&str, &str); N]> for ErrorMap {
    fn from(entries: [(&str, &str); N]) -> Self {
        let mut map = ErrorMap::new();
        for (field, message) in entries {
            map.insert(field, message);
        }
        map
    }
}

/// Evaluate every field rule in order, keeping only each field's first failure
pub fn validate(values: &FormValues, rules: &RuleSet) -> ErrorMap {
    let mut errors = ErrorMap::new();
    for field in rules.fields() {
        if let Some(message) = field.first_failure(values) {
            errors.insert(&field.field, message);
        }
    }
    errors
}

/// True when the values satisfy every rule
pub fn is_valid(values: &FormValues, rules: &RuleSet) -> bool {
    validate(values, rules).is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::schemas::{
        fields, login_initial_values, login_rules, sign_up_initial_values, sign_up_rules,
    };
    use pretty_assertions::assert_eq;

    fn valid_sign_up() -> FormValues {
        sign_up_initial_values()
            .with(fields::FIRST_NAME, "Ada")
            .with(fields::LAST_NAME, "Lovelace")
            .with(fields::EMAIL, "ada@example.com")
            .with(fields::PASSWORD, "password123")
            .with(fields::CONFIRM_PASSWORD, "password123")
            .with(fields::AGREED, true)
    }

    mod login {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_valid_credentials_have_no_errors() {
            let values = FormValues::new()
                .with("email", "a@b.com")
                .with("password", "longenough1");
            assert_eq!(validate(&values, &login_rules()), ErrorMap::new());
        }

        #[test]
        fn test_malformed_credentials() {
            let values = FormValues::new()
                .with("email", "not-an-email")
                .with("password", "short");
            assert_eq!(
                validate(&values, &login_rules()),
                ErrorMap::from([
                    ("email", "Invalid email address"),
                    ("password", "Password must be at least 8 characters"),
                ])
            );
        }

        #[test]
        fn test_initial_values_report_first_declared_failure() {
            // Length is declared before presence, so an empty password reports the length
            assert_eq!(
                validate(&login_initial_values(), &login_rules()),
                ErrorMap::from([
                    ("email", "Email is required"),
                    ("password", "Password must be at least 8 characters"),
                ])
            );
        }

        #[test]
        fn test_remember_me_has_no_rules() {
            let values = FormValues::new()
                .with("email", "a@b.com")
                .with("password", "longenough1")
                .with("rememberMe", false);
            assert!(is_valid(&values, &login_rules()));
        }
    }

    mod sign_up {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_complete_form_is_valid() {
            assert_eq!(validate(&valid_sign_up(), &sign_up_rules()), ErrorMap::new());
        }

        #[test]
        fn test_mismatched_confirmation() {
            let values = valid_sign_up()
                .with(fields::PASSWORD, "password123")
                .with(fields::CONFIRM_PASSWORD, "password124");
            let errors = validate(&values, &sign_up_rules());
            assert_eq!(errors.get("confirmPassword"), Some("Passwords must match"));
            assert_eq!(errors.len(), 1);
        }

        #[test]
        fn test_terms_not_accepted() {
            let values = valid_sign_up().with(fields::AGREED, false);
            assert_eq!(
                validate(&values, &sign_up_rules()),
                ErrorMap::from([(
                    "agreed",
                    "You must accept the Terms of Service and Privacy Policy"
                )])
            );
        }

        #[test]
        fn test_empty_phone_is_allowed() {
            let values = valid_sign_up().with(fields::PHONE, "");
            assert!(is_valid(&values, &sign_up_rules()));
        }

        #[test]
        fn test_phone_must_be_ten_digits() {
            for phone in ["12345", "123456789a", "12345678901", "123-456-7890"] {
                let values = valid_sign_up().with(fields::PHONE, phone);
                assert_eq!(
                    validate(&values, &sign_up_rules()).get("phone"),
                    Some("Phone number must be exactly 10 digits"),
                    "phone {phone:?}"
                );
            }
            let values = valid_sign_up().with(fields::PHONE, "0123456789");
            assert!(is_valid(&values, &sign_up_rules()));
        }

        #[test]
        fn test_unknown_role_rejected() {
            let values = valid_sign_up().with(fields::ROLE, "admin");
            assert_eq!(
                validate(&values, &sign_up_rules()).get("role"),
                Some("Please select a role")
            );
        }

        #[test]
        fn test_employer_role_accepted() {
            let values = valid_sign_up().with(fields::ROLE, "employer");
            assert!(is_valid(&values, &sign_up_rules()));
        }

        #[test]
        fn test_every_missing_required_field_is_reported() {
            let required = [
                fields::FIRST_NAME,
                fields::LAST_NAME,
                fields::EMAIL,
                fields::PASSWORD,
                fields::CONFIRM_PASSWORD,
                fields::ROLE,
            ];
            for field in required {
                let values = valid_sign_up().with(field, "");
                let errors = validate(&values, &sign_up_rules());
                let message = errors.get(field);
                assert!(
                    message.is_some_and(|m| !m.is_empty()),
                    "{field} should be reported"
                );
            }
        }

        #[test]
        fn test_empty_confirmation_reports_mismatch() {
            let values = valid_sign_up().with(fields::CONFIRM_PASSWORD, "");
            assert_eq!(
                validate(&values, &sign_up_rules()).get("confirmPassword"),
                Some("Passwords must match")
            );
        }

        #[test]
        fn test_both_passwords_empty_reports_confirmation_required() {
            let errors = validate(&sign_up_initial_values(), &sign_up_rules());
            assert_eq!(
                errors.get("confirmPassword"),
                Some("Confirming your password is required")
            );
            assert_eq!(
                errors.get("password"),
                Some("Password must be at least 8 characters")
            );
        }

        #[test]
        fn test_password_change_invalidates_confirmation() {
            let rules = sign_up_rules();
            let values = valid_sign_up();
            assert!(!validate(&values, &rules).contains("confirmPassword"));

            let values = values.with(fields::PASSWORD, "different99");
            assert_eq!(
                validate(&values, &rules).get("confirmPassword"),
                Some("Passwords must match")
            );
        }
    }

    #[test]
    fn test_validate_is_deterministic() {
        let values = FormValues::new().with("email", "bad").with("password", "");
        let rules = login_rules();
        assert_eq!(validate(&values, &rules), validate(&values, &rules));
    }

    #[test]
    fn test_error_map_serializes_as_object() {
        let map = ErrorMap::from([("email", "Invalid email address")]);
        assert_eq!(
            serde_json::to_string(&map).unwrap(),
            r#"{"email":"Invalid email address"}"#
        );
    }
}
