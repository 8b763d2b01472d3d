//! Local accounts and the signed-in user.
//!
//! Passwords are stored as entered. Accounts only partition data between
//! people sharing a machine; they are not a security boundary.

use std::sync::{Arc, OnceLock};

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::AuthError;
use crate::kv::{get_json, set_json, KeyValueStore};

const CURRENT_USER_KEY: &str = "current-user";
const MIN_PASSWORD_LEN: usize = 6;

/// A registered user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(rename = "createdAt", alias = "created_at")]
    pub created_at: DateTime<Utc>,
}

/// Signup form fields.
#[derive(Debug, Clone, Default)]
pub struct Signup<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password: &'a str,
    pub confirm_password: &'a str,
}

fn user_key(email: &str) -> String {
    format!("user-{email}")
}

fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("static regex"))
}

pub fn is_valid_email(email: &str) -> bool {
    email_regex().is_match(email)
}

/// Account operations over a key-value store.
#[derive(Clone)]
pub struct Accounts {
    store: Arc<dyn KeyValueStore>,
}

impl Accounts {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Register a user and sign them in.
    ///
    /// Checks run in a fixed order and the first failure wins: all fields
    /// present, passwords match, password length, email shape, email unused.
    pub fn signup(&self, form: &Signup<'_>) -> Result<User, AuthError> {
        if form.name.is_empty()
            || form.email.is_empty()
            || form.password.is_empty()
            || form.confirm_password.is_empty()
        {
            return Err(AuthError::MissingFields);
        }
        if form.password != form.confirm_password {
            return Err(AuthError::PasswordMismatch);
        }
        if form.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AuthError::PasswordTooShort);
        }
        if !is_valid_email(form.email) {
            return Err(AuthError::InvalidEmail);
        }
        let key = user_key(form.email);
        if self.store.get(&key)?.is_some() {
            return Err(AuthError::AccountExists);
        }

        let user = User {
            name: form.name.to_string(),
            email: form.email.to_string(),
            password: form.password.to_string(),
            created_at: Utc::now(),
        };
        set_json(self.store.as_ref(), &key, &user)?;
        set_json(self.store.as_ref(), CURRENT_USER_KEY, &user)?;
        tracing::info!(email = %user.email, "account created");
        Ok(user)
    }

    /// Check credentials and make the user current.
    pub fn login(&self, email: &str, password: &str) -> Result<User, AuthError> {
        if email.is_empty() || password.is_empty() {
            return Err(AuthError::MissingFields);
        }
        let user: User =
            get_json(self.store.as_ref(), &user_key(email))?.ok_or(AuthError::AccountNotFound)?;
        if user.password != password {
            return Err(AuthError::IncorrectPassword);
        }
        set_json(self.store.as_ref(), CURRENT_USER_KEY, &user)?;
        tracing::info!(email = %user.email, "signed in");
        Ok(user)
    }

    /// Forget the current user. Saved data is kept.
    pub fn logout(&self) -> Result<(), AuthError> {
        self.store.delete(CURRENT_USER_KEY)?;
        Ok(())
    }

    pub fn current_user(&self) -> Result<Option<User>, AuthError> {
        Ok(get_json(self.store.as_ref(), CURRENT_USER_KEY)?)
    }
}
