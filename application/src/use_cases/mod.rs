//! Application use cases

pub mod account_access;
pub mod generate_document;
pub mod history_service;
pub mod session_manager;
pub mod settings_service;
