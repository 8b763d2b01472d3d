pub mod account;
pub mod history;
pub mod init;
pub mod interview;
pub mod list_models;
pub mod score;
