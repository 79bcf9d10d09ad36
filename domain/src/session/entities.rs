//! Session domain entities

use crate::session::identity::Identity;

/// Starting balance for a newly created account.
pub const NEW_ACCOUNT_CREDITS: u64 = 250_000;

/// Starting balance for a guest session.
pub const GUEST_CREDITS: u64 = 50_000;

/// Represents an active user session (Entity)
///
/// A session binds an identity to a credit balance. The balance is only
/// mutated through [`Session::debit`], which clamps at zero.
#[derive(Debug, Clone)]
pub struct Session {
    identity: Identity,
    credits: u64,
}

impl Session {
    pub fn new(identity: Identity, credits: u64) -> Self {
        Self { identity, credits }
    }

    /// Create a guest session with the fixed guest balance.
    pub fn guest(uid: impl Into<String>) -> Self {
        Self::new(Identity::guest(uid), GUEST_CREDITS)
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    pub fn uid(&self) -> &str {
        self.identity.uid()
    }

    pub fn credits(&self) -> u64 {
        self.credits
    }

    pub fn is_guest(&self) -> bool {
        self.identity.is_guest()
    }

    /// Subtract `units` from the balance, clamping at zero.
    ///
    /// Returns the new balance.
    pub fn debit(&mut self, units: u64) -> u64 {
        self.credits = self.credits.saturating_sub(units);
        self.credits
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debit_subtracts() {
        let mut session = Session::new(Identity::guest("g"), 1_000);
        assert_eq!(session.debit(400), 600);
        assert_eq!(session.credits(), 600);
    }

    #[test]
    fn test_debit_clamps_at_zero() {
        let mut session = Session::new(Identity::guest("g"), 50);
        assert_eq!(session.debit(100), 0);
        // A second over-debit stays at zero
        assert_eq!(session.debit(u64::MAX), 0);
    }

    #[test]
    fn test_guest_session_starting_balance() {
        let session = Session::guest("guest-1");
        assert!(session.is_guest());
        assert_eq!(session.credits(), GUEST_CREDITS);
    }
}
