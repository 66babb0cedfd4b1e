//! Submission pipelines that map form values onto the auth backend

use super::traits::{AuthService, Credentials, NewAccount};
use crate::forms::{fields, FormValues, Role, SubmissionPipeline, SubmitFailure, SubmitSuccess};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

/// Login form submission
pub struct LoginPipeline {
    auth: Arc<dyn AuthService>,
}

impl LoginPipeline {
    pub fn new(auth: Arc<dyn AuthService>) -> Self {
        Self { auth }
    }

    fn credentials(values: &FormValues) -> Credentials {
        Credentials {
            email: values.text(fields::EMAIL).trim().to_string(),
            password: values.text(fields::PASSWORD).to_string(),
            remember_me: values.flag(fields::REMEMBER_ME),
        }
    }
}

#[async_trait]
impl SubmissionPipeline for LoginPipeline {
    async fn submit(&self, values: FormValues) -> Result<SubmitSuccess, SubmitFailure> {
        let credentials = Self::credentials(&values);
        debug!(backend = self.auth.name(), email = %credentials.email, "logging in");

        let identity = self.auth.sign_in(credentials).await?;
        let message = format!("Welcome back, {}", identity.email);
        Ok(SubmitSuccess { identity, message })
    }
}

/// Sign-up form submission
pub struct SignUpPipeline {
    auth: Arc<dyn AuthService>,
}

impl SignUpPipeline {
    pub fn new(auth: Arc<dyn AuthService>) -> Self {
        Self { auth }
    }

    fn new_account(values: &FormValues) -> Result<NewAccount, SubmitFailure> {
        let role: Role = values
            .text(fields::ROLE)
            .parse()
            .map_err(SubmitFailure::MalformedPayload)?;
        let phone = values.text(fields::PHONE).trim();

        Ok(NewAccount {
            first_name: values.text(fields::FIRST_NAME).trim().to_string(),
            last_name: values.text(fields::LAST_NAME).trim().to_string(),
            email: values.text(fields::EMAIL).trim().to_string(),
            phone: (!phone.is_empty()).then(|| phone.to_string()),
            password: values.text(fields::PASSWORD).to_string(),
            role,
        })
    }
}

#[async_trait]
impl SubmissionPipeline for SignUpPipeline {
    async fn submit(&self, values: FormValues) -> Result<SubmitSuccess, SubmitFailure> {
        let account = Self::new_account(&values)?;
        let first_name = account.first_name.clone();
        let role = account.role;
        debug!(backend = self.auth.name(), email = %account.email, %role, "creating account");

        let identity = self.auth.create_account(account).await?;
        let message = format!("Account created for {first_name} as a {role}!");
        Ok(SubmitSuccess { identity, message })
    }
}
