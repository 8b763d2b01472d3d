use thiserror::Error;

/// Errors from the key-value layer.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to access key '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("stored value for '{key}' is not valid JSON: {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize value for '{key}': {source}")]
    Serialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Account validation failures. The messages are shown to the user verbatim.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Please fill in all fields")]
    MissingFields,

    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("Password must be at least 6 characters")]
    PasswordTooShort,

    #[error("Please enter a valid email address")]
    InvalidEmail,

    #[error("An account with this email already exists")]
    AccountExists,

    #[error("Account not found. Please sign up first.")]
    AccountNotFound,

    #[error("Incorrect password")]
    IncorrectPassword,

    #[error(transparent)]
    Store(#[from] StoreError),
}
