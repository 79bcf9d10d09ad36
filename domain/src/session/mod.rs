//! Session module - identity, credit balance, and conversation transcript

pub mod entities;
pub mod identity;
pub mod transcript;
