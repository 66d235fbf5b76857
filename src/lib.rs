pub mod config;
pub mod error;
pub mod i18n;
pub mod retry;
pub mod settings;
pub mod source;
