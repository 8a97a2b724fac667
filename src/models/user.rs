use crate::errors::{AppError, AppResult};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub email_verified: Option<bool>,
    pub picture: Option<String>,
    pub disabled: bool,
    pub admin: bool,
    pub created_at: String,
}

/// Link between an identity-provider subject and a local user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: String,
    pub user_id: String,
    pub provider: String,
    pub provider_account_id: String,
}

/// What the identity provider hands us after a successful sign-in.
#[derive(Debug, Clone, Deserialize)]
pub struct Registration {
    pub provider: String,
    pub provider_account_id: String,
    pub name: String,
    pub email: String,
    pub email_verified: Option<bool>,
    pub picture: Option<String>,
}

const MAX_FIELD_LEN: usize = 255;

fn email_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("static email pattern compiles")
    })
}

pub fn validate_name(name: &str) -> AppResult<String> {
    let name = name.trim();
    if name.is_empty() || name.chars().count() > MAX_FIELD_LEN {
        return Err(AppError::InvalidUser(format!(
            "name must be 1 to {MAX_FIELD_LEN} characters"
        )));
    }
    Ok(name.to_string())
}

impl Registration {
    /// Shape-check the provider payload before it reaches the database.
    pub fn validated(self) -> AppResult<Self> {
        let provider = self.provider.trim().to_lowercase();
        let account = self.provider_account_id.trim().to_string();
        if provider.is_empty() || provider.len() > MAX_FIELD_LEN {
            return Err(AppError::InvalidUser("provider is required".into()));
        }
        if account.is_empty() || account.len() > MAX_FIELD_LEN {
            return Err(AppError::InvalidUser("provider account id is required".into()));
        }

        let email = self.email.trim().to_string();
        if email.len() > MAX_FIELD_LEN || !email_pattern().is_match(&email) {
            return Err(AppError::InvalidUser(format!("invalid email '{}'", email)));
        }

        Ok(Self {
            provider,
            provider_account_id: account,
            name: validate_name(&self.name)?,
            email,
            email_verified: self.email_verified,
            picture: self.picture.filter(|p| !p.trim().is_empty()),
        })
    }
}
