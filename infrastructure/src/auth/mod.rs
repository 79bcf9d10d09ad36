//! Identity provider adapters

pub mod rest_identity;

pub use rest_identity::RestIdentityProvider;
