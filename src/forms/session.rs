//! Form session: values, touched fields, errors and the submission lifecycle
//!
//! The session owns all mutable form state. Renderers read it through
//! [`FormSession::snapshot`] and feed intents back via [`FormSession::set_field`],
//! [`FormSession::touch`], [`FormSession::submit`] and [`FormSession::reset`].
//!
//! A valid `submit()` moves the session to `Submitting` and hands back a
//! [`SubmissionTask`]. The task holds only a weak reference to the session
//! state, so dropping the session while a submission is outstanding is safe:
//! the eventual outcome is observed and discarded.

use super::pipeline::{SubmissionPipeline, SubmitFailure, SubmitSuccess};
use super::rules::RuleSet;
use super::schemas::FormKind;
use super::validation::{validate, ErrorMap};
use super::value::{FieldValue, FormValues};
use std::collections::BTreeSet;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use thiserror::Error;
use tracing::{debug, warn};

/// Where the session is in its submission lifecycle
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmissionState {
    #[default]
    Idle,
    Submitting,
    Succeeded(SubmitSuccess),
    Failed(SubmitFailure),
}

impl SubmissionState {
    pub fn is_submitting(&self) -> bool {
        matches!(self, Self::Submitting)
    }
}

/// Intent the session refused to apply. The session is left unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("edits are frozen while a submission is outstanding")]
    Submitting,
    #[error("unknown field: {0}")]
    UnknownField(String),
    #[error("field {field} expects a {expected} value")]
    WrongKind {
        field: String,
        expected: &'static str,
    },
}

/// Result of a submit intent
#[must_use = "a started submission must be run or the session returns to idle when it is dropped"]
pub enum SubmitOutcome {
    /// Validation failed; every field is now touched and the pipeline was not invoked
    Invalid(ErrorMap),
    /// A submission is already outstanding; nothing happened
    AlreadySubmitting,
    /// The session is submitting; drive the task to invoke the pipeline
    Started(SubmissionTask),
}

impl fmt::Debug for SubmitOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Invalid(errors) => f.debug_tuple("Invalid").field(errors).finish(),
            Self::AlreadySubmitting => write!(f, "AlreadySubmitting"),
            Self::Started(task) => f.debug_tuple("Started").field(task).finish(),
        }
    }
}

/// What happened to a pipeline outcome when it came back
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The outcome was applied; carries the new submission state
    Applied(SubmissionState),
    /// The session was dropped or reset meanwhile; the outcome was ignored
    Discarded,
}

#[derive(Debug, Default)]
struct SessionState {
    values: FormValues,
    errors: ErrorMap,
    touched: BTreeSet<String>,
    submission: SubmissionState,
    submit_attempted: bool,
    /// Bumped on every started submission and every reset
    generation: u64,
}

fn lock_state(state: &Mutex<SessionState>) -> MutexGuard<'_, SessionState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Consistent read-only copy of a session for rendering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub values: FormValues,
    pub errors: ErrorMap,
    pub touched: BTreeSet<String>,
    pub submission: SubmissionState,
    pub submit_attempted: bool,
}

impl SessionSnapshot {
    /// Error to show for a field: only once touched or after a submit attempt
    pub fn visible_error(&self, field: &str) -> Option<&str> {
        if self.submit_attempted || self.touched.contains(field) {
            self.errors.get(field)
        } else {
            None
        }
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Whether a submit button should be enabled
    pub fn can_submit(&self) -> bool {
        self.is_valid() && !self.submission.is_submitting()
    }
}

/// Stateful coordinator for one form on one screen
pub struct FormSession {
    rules: Arc<RuleSet>,
    initial: FormValues,
    pipeline: Arc<dyn SubmissionPipeline>,
    state: Arc<Mutex<SessionState>>,
}

impl fmt::Debug for FormSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormSession")
            .field("form", &self.rules.name())
            .field("state", &*lock_state(&self.state))
            .finish_non_exhaustive()
    }
}

impl FormSession {
    pub fn new(rules: RuleSet, initial: FormValues, pipeline: Arc<dyn SubmissionPipeline>) -> Self {
        debug!(form = rules.name(), "form session created");
        let state = SessionState {
            values: initial.clone(),
            ..Default::default()
        };
        Self {
            rules: Arc::new(rules),
            initial,
            pipeline,
            state: Arc::new(Mutex::new(state)),
        }
    }

    /// Session with the built-in rules and initial values for a form
    pub fn for_form(kind: FormKind, pipeline: Arc<dyn SubmissionPipeline>) -> Self {
        Self::new(kind.rules(), kind.initial_values(), pipeline)
    }

    pub fn name(&self) -> &'static str {
        self.rules.name()
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    fn lock(&self) -> MutexGuard<'_, SessionState> {
        lock_state(&self.state)
    }

    fn is_known_field(&self, name: &str) -> bool {
        self.initial.contains(name) || self.rules.rules_for(name).is_some()
    }

    /// Update a field and re-validate the whole form
    pub fn set_field(&self, name: &str, value: impl Into<FieldValue>) -> Result<(), SessionError> {
        let value = value.into();

        if !self.is_known_field(name) {
            warn!(form = self.name(), field = name, "set_field on unknown field");
            return Err(SessionError::UnknownField(name.to_string()));
        }
        if let Some(initial) = self.initial.get(name) {
            if !initial.same_kind(&value) {
                let expected = match initial {
                    FieldValue::Text(_) => "text",
                    FieldValue::Flag(_) => "flag",
                };
                return Err(SessionError::WrongKind {
                    field: name.to_string(),
                    expected,
                });
            }
        }

        let mut state = self.lock();
        if state.submission.is_submitting() {
            debug!(form = self.name(), field = name, "edit rejected while submitting");
            return Err(SessionError::Submitting);
        }

        state.values.set(name, value);
        state.errors = validate(&state.values, &self.rules);
        debug!(
            form = self.name(),
            field = name,
            errors = state.errors.len(),
            "field updated"
        );
        Ok(())
    }

    /// Mark a field as interacted with (blurred)
    pub fn touch(&self, name: &str) {
        if !self.is_known_field(name) {
            warn!(form = self.name(), field = name, "touch on unknown field");
            return;
        }
        let mut state = self.lock();
        if state.touched.insert(name.to_string()) {
            debug!(form = self.name(), field = name, "field touched");
        }
    }

    /// Validate and, when valid, start a submission
    pub fn submit(&self) -> SubmitOutcome {
        let mut state = self.lock();
        if state.submission.is_submitting() {
            debug!(form = self.name(), "submit ignored; already submitting");
            return SubmitOutcome::AlreadySubmitting;
        }

        state.submit_attempted = true;
        state.errors = validate(&state.values, &self.rules);

        if !state.errors.is_empty() {
            let names: Vec<String> = self
                .rules
                .field_names()
                .chain(state.values.names())
                .map(str::to_string)
                .collect();
            state.touched.extend(names);
            debug!(
                form = self.name(),
                errors = state.errors.len(),
                "submit blocked by validation"
            );
            return SubmitOutcome::Invalid(state.errors.clone());
        }

        state.generation += 1;
        state.submission = SubmissionState::Submitting;
        debug!(form = self.name(), attempt = state.generation, "submission started");

        SubmitOutcome::Started(SubmissionTask {
            form: self.name(),
            attempt: state.generation,
            values: state.values.clone(),
            pipeline: Arc::clone(&self.pipeline),
            state: Arc::downgrade(&self.state),
            settled: false,
        })
    }

    /// Return to the initial state. Any outstanding submission is orphaned.
    pub fn reset(&self) {
        let mut state = self.lock();
        let generation = state.generation + 1;
        *state = SessionState {
            values: self.initial.clone(),
            generation,
            ..Default::default()
        };
        debug!(form = self.name(), "form reset");
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let state = self.lock();
        SessionSnapshot {
            values: state.values.clone(),
            errors: state.errors.clone(),
            touched: state.touched.clone(),
            submission: state.submission.clone(),
            submit_attempted: state.submit_attempted,
        }
    }

    pub fn values(&self) -> FormValues {
        self.lock().values.clone()
    }

    pub fn errors(&self) -> ErrorMap {
        self.lock().errors.clone()
    }

    pub fn submission_state(&self) -> SubmissionState {
        self.lock().submission.clone()
    }

    pub fn is_touched(&self, name: &str) -> bool {
        self.lock().touched.contains(name)
    }

    pub fn is_submitting(&self) -> bool {
        self.lock().submission.is_submitting()
    }

    pub fn visible_error(&self, name: &str) -> Option<String> {
        self.snapshot().visible_error(name).map(str::to_string)
    }

    pub fn is_valid(&self) -> bool {
        self.lock().errors.is_empty()
    }

    pub fn can_submit(&self) -> bool {
        let state = self.lock();
        state.errors.is_empty() && !state.submission.is_submitting()
    }
}

/// One pipeline invocation for a started submission
///
/// Dropping the task, or the future returned by [`SubmissionTask::run`],
/// before the pipeline resolves returns the session to `Idle`.
#[must_use = "the pipeline is only invoked by `run`"]
pub struct SubmissionTask {
    form: &'static str,
    attempt: u64,
    values: FormValues,
    pipeline: Arc<dyn SubmissionPipeline>,
    state: Weak<Mutex<SessionState>>,
    /// Set once the pipeline has resolved
    settled: bool,
}

impl fmt::Debug for SubmissionTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubmissionTask")
            .field("form", &self.form)
            .field("attempt", &self.attempt)
            .field("values", &self.values)
            .finish_non_exhaustive()
    }
}

impl SubmissionTask {
    /// Snapshot of the values being submitted
    pub fn values(&self) -> &FormValues {
        &self.values
    }

    pub fn attempt(&self) -> u64 {
        self.attempt
    }

    /// Invoke the pipeline and apply its outcome to the session, if it still exists
    pub async fn run(mut self) -> Resolution {
        let values = std::mem::take(&mut self.values);
        let result = self.pipeline.submit(values).await;
        self.settled = true;

        let Some(shared) = self.state.upgrade() else {
            debug!(
                form = self.form,
                attempt = self.attempt,
                "session dropped before submission resolved; outcome discarded"
            );
            return Resolution::Discarded;
        };

        let mut state = lock_state(&shared);
        if state.generation != self.attempt || !state.submission.is_submitting() {
            debug!(
                form = self.form,
                attempt = self.attempt,
                "session reset before submission resolved; outcome discarded"
            );
            return Resolution::Discarded;
        }

        state.submission = match result {
            Ok(success) => {
                debug!(form = self.form, attempt = self.attempt, "submission succeeded");
                SubmissionState::Succeeded(success)
            }
            Err(failure) => {
                debug!(form = self.form, attempt = self.attempt, %failure, "submission failed");
                SubmissionState::Failed(failure)
            }
        };
        Resolution::Applied(state.submission.clone())
    }
}

impl Drop for SubmissionTask {
    fn drop(&mut self) {
        if self.settled {
            return;
        }
        let Some(shared) = self.state.upgrade() else {
            return;
        };
        let mut state = lock_state(&shared);
        if state.generation == self.attempt && state.submission.is_submitting() {
            state.submission = SubmissionState::Idle;
            debug!(
                form = self.form,
                attempt = self.attempt,
                "submission abandoned before resolving; session unfrozen"
            );
        }
    }
}
