//! mockview-store: key-value JSON persistence.
//!
//! Everything a user leaves behind between runs lives in a flat string
//! store: accounts under `user-{email}`, the signed-in user under
//! `current-user`, an unfinished interview under
//! `interview-progress-{email}`, and the last ten results under
//! `interview-history-{email}`.

pub mod accounts;
pub mod error;
pub mod history;
pub mod kv;
pub mod progress;

pub use accounts::{Accounts, Signup, User};
pub use error::{AuthError, StoreError};
pub use history::{HistoryStore, HISTORY_LIMIT};
pub use kv::{FileStore, KeyValueStore, MemoryStore};
pub use progress::ProgressStore;
