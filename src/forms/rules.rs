//! Declarative per-field validation rules
//!
//! A [`RuleSet`] is an ordered list of [`FieldRule`]s. Each field rule holds
//! ordered [`Rule`]s (a [`Check`] plus the message reported when it fails).
//! Checks see the full [`FormValues`] so cross-field rules such as password
//! confirmation are plain data like any other rule.

use super::value::{FieldValue, FormValues};
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

/// Address pattern from the HTML living standard's `input type=email`
static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
    )
    .expect("email regex is valid")
});

/// A single pure predicate over the form values
#[derive(Clone)]
pub enum Check {
    /// Text must be non-empty
    Required,
    /// Text must look like an email address; empty text is left to `Required`
    Email,
    /// Text must match the pattern
    Pattern(Regex),
    /// Text must have at least this many characters
    MinLength(usize),
    /// Value must equal another field's value
    EqualsField(String),
    /// Flag must be set
    IsTrue,
    /// Text must be one of the listed options
    OneOf(Vec<String>),
}

impl fmt::Debug for Check {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Check::Required => write!(f, "Required"),
            Check::Email => write!(f, "Email"),
            Check::Pattern(re) => write!(f, "Pattern({})", re.as_str()),
            Check::MinLength(n) => write!(f, "MinLength({n})"),
            Check::EqualsField(other) => write!(f, "EqualsField({other})"),
            Check::IsTrue => write!(f, "IsTrue"),
            Check::OneOf(options) => write!(f, "OneOf({options:?})"),
        }
    }
}

impl Check {
    /// Evaluate against `value`, the current value of the field under test
    pub fn passes(&self, values: &FormValues, value: &FieldValue) -> bool {
        match self {
            Check::Required => !value.is_empty(),
            Check::Email => value.is_empty() || EMAIL_REGEX.is_match(value.as_text()),
            Check::Pattern(re) => re.is_match(value.as_text()),
            Check::MinLength(min) => value.as_text().chars().count() >= *min,
            Check::EqualsField(other) => values.get(other).is_some_and(|v| v == value),
            Check::IsTrue => value.as_flag(),
            Check::OneOf(options) => options.iter().any(|o| o == value.as_text()),
        }
    }
}

/// A check and the message reported when it fails
#[derive(Debug, Clone)]
pub struct Rule {
    pub check: Check,
    pub message: String,
}

/// Ordered checks for one field
#[derive(Debug, Clone)]
pub struct FieldRule {
    pub field: String,
    /// Optional fields are valid when empty; checks only run on non-empty input
    pub optional: bool,
    pub rules: Vec<Rule>,
}

impl FieldRule {
    pub fn new(field: &str) -> Self {
        Self {
            field: field.to_string(),
            optional: false,
            rules: Vec::new(),
        }
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub fn check(mut self, check: Check, message: &str) -> Self {
        self.rules.push(Rule {
            check,
            message: message.to_string(),
        });
        self
    }

    pub fn required(self, message: &str) -> Self {
        self.check(Check::Required, message)
    }

    pub fn email(self, message: &str) -> Self {
        self.check(Check::Email, message)
    }

    pub fn pattern(self, re: Regex, message: &str) -> Self {
        self.check(Check::Pattern(re), message)
    }

    pub fn min_length(self, min: usize, message: &str) -> Self {
        self.check(Check::MinLength(min), message)
    }

    pub fn equals_field(self, other: &str, message: &str) -> Self {
        self.check(Check::EqualsField(other.to_string()), message)
    }

    pub fn is_true(self, message: &str) -> Self {
        self.check(Check::IsTrue, message)
    }

    pub fn one_of(self, options: &[&str], message: &str) -> Self {
        let options = options.iter().map(|o| o.to_string()).collect();
        self.check(Check::OneOf(options), message)
    }

    /// Message of the first failing check, if any
    pub fn first_failure(&self, values: &FormValues) -> Option<&str> {
        let missing = FieldValue::default();
        let value = values.get(&self.field).unwrap_or(&missing);

        if self.optional && value.is_empty() {
            return None;
        }

        self.rules
            .iter()
            .find(|rule| !rule.check.passes(values, value))
            .map(|rule| rule.message.as_str())
    }
}

/// Named collection of field rules, evaluated in declaration order
#[derive(Debug, Clone)]
pub struct RuleSet {
    name: &'static str,
    fields: Vec<FieldRule>,
}

impl RuleSet {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            fields: Vec::new(),
        }
    }

    pub fn field(mut self, rule: FieldRule) -> Self {
        self.fields.push(rule);
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Ordered checks for a field
    pub fn rules_for(&self, field: &str) -> Option<&FieldRule> {
        self.fields.iter().find(|f| f.field == field)
    }

    pub fn fields(&self) -> impl Iterator<Item = &FieldRule> {
        self.fields.iter()
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.field.as_str())
    }
}
