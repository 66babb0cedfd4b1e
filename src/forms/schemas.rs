//! Login and sign-up form definitions

use super::rules::{FieldRule, RuleSet};
use super::value::FormValues;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

static PHONE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{10}$").expect("phone regex is valid"));

/// Minimum password length for both forms
pub const MIN_PASSWORD_LEN: usize = 8;

/// Field names shared by the forms and their front end
pub mod fields {
    pub const FIRST_NAME: &str = "firstName";
    pub const LAST_NAME: &str = "lastName";
    pub const EMAIL: &str = "email";
    pub const PHONE: &str = "phone";
    pub const PASSWORD: &str = "password";
    pub const CONFIRM_PASSWORD: &str = "confirmPassword";
    pub const ROLE: &str = "role";
    pub const AGREED: &str = "agreed";
    pub const REMEMBER_ME: &str = "rememberMe";
}

/// Account role chosen at sign-up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    #[default]
    JobSeeker,
    Employer,
}

impl Role {
    pub const ALL: [Role; 2] = [Role::JobSeeker, Role::Employer];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::JobSeeker => "job_seeker",
            Self::Employer => "employer",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::JobSeeker => "Job Seeker",
            Self::Employer => "Employer",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            Self::JobSeeker => Self::Employer,
            Self::Employer => Self::JobSeeker,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "job_seeker" => Ok(Self::JobSeeker),
            "employer" => Ok(Self::Employer),
            other => Err(format!("unknown role: {other}")),
        }
    }
}

/// Which form a session belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    Login,
    SignUp,
}

impl FormKind {
    pub fn rules(&self) -> RuleSet {
        match self {
            Self::Login => login_rules(),
            Self::SignUp => sign_up_rules(),
        }
    }

    pub fn initial_values(&self) -> FormValues {
        match self {
            Self::Login => login_initial_values(),
            Self::SignUp => sign_up_initial_values(),
        }
    }
}

fn email_rule() -> FieldRule {
    FieldRule::new(fields::EMAIL)
        .email("Invalid email address")
        .required("Email is required")
}

fn password_rule() -> FieldRule {
    FieldRule::new(fields::PASSWORD)
        .min_length(
            MIN_PASSWORD_LEN,
            "Password must be at least 8 characters",
        )
        .required("Password is required")
}

pub fn login_rules() -> RuleSet {
    RuleSet::new("login")
        .field(email_rule())
        .field(password_rule())
}

pub fn login_initial_values() -> FormValues {
    FormValues::new()
        .with(fields::EMAIL, "")
        .with(fields::PASSWORD, "")
        .with(fields::REMEMBER_ME, false)
}

pub fn sign_up_rules() -> RuleSet {
    let roles: Vec<&str> = Role::ALL.iter().map(Role::as_str).collect();

    RuleSet::new("sign_up")
        .field(FieldRule::new(fields::FIRST_NAME).required("First name is required"))
        .field(FieldRule::new(fields::LAST_NAME).required("Last name is required"))
        .field(email_rule())
        .field(
            FieldRule::new(fields::PHONE)
                .optional()
                .pattern(PHONE_REGEX.clone(), "Phone number must be exactly 10 digits"),
        )
        .field(password_rule())
        .field(
            FieldRule::new(fields::CONFIRM_PASSWORD)
                .equals_field(fields::PASSWORD, "Passwords must match")
                .required("Confirming your password is required"),
        )
        .field(
            FieldRule::new(fields::ROLE)
                .required("Please select a role")
                .one_of(&roles, "Please select a role"),
        )
        .field(
            FieldRule::new(fields::AGREED)
                .is_true("You must accept the Terms of Service and Privacy Policy"),
        )
}

pub fn sign_up_initial_values() -> FormValues {
    FormValues::new()
        .with(fields::FIRST_NAME, "")
        .with(fields::LAST_NAME, "")
        .with(fields::EMAIL, "")
        .with(fields::PHONE, "")
        .with(fields::PASSWORD, "")
        .with(fields::CONFIRM_PASSWORD, "")
        .with(fields::ROLE, Role::default().as_str())
        .with(fields::AGREED, false)
}
