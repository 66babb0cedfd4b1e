//! Form domain layer
//!
//! Declarative field rules, a pure validation engine, and the stateful
//! form session that coordinates edits, touch tracking and submission.

mod pipeline;
mod rules;
mod schemas;
mod session;
mod validation;
mod value;

pub use pipeline::{Identity, SubmissionPipeline, SubmitFailure, SubmitSuccess};
pub use rules::{Check, FieldRule, Rule, RuleSet};
pub use schemas::{
    fields, login_initial_values, login_rules, sign_up_initial_values, sign_up_rules, FormKind,
    Role, MIN_PASSWORD_LEN,
};
pub use session::{
    FormSession, Resolution, SessionError, SessionSnapshot, SubmissionState, SubmissionTask,
    SubmitOutcome,
};
pub use validation::{is_valid, validate, ErrorMap};
pub use value::{FieldValue, FormValues};

#[cfg(test)]
pub use pipeline::MockSubmissionPipeline;
