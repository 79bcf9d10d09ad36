//! Display surface notification ports
//!
//! Session transitions and pipeline phases are reflected onto whatever
//! front end is driving the application. The use cases emit notifications
//! through these ports; no-op implementations exist for tests.

use pdraft_domain::GenerationPhase;

/// Notifications about session state changes (name, balance).
pub trait SessionNotifier: Send + Sync {
    fn on_signed_in(&self, display_name: &str, credits: u64);

    fn on_signed_out(&self);

    fn on_balance_changed(&self, credits: u64);
}

/// No-op implementation for tests.
pub struct NoSessionNotifier;

impl SessionNotifier for NoSessionNotifier {
    fn on_signed_in(&self, _display_name: &str, _credits: u64) {}
    fn on_signed_out(&self) {}
    fn on_balance_changed(&self, _credits: u64) {}
}

/// Notifications about pipeline phase transitions.
pub trait GenerationProgress: Send + Sync {
    /// Called on entry into each phase.
    fn on_phase(&self, phase: GenerationPhase);

    /// Called once when the run finishes, successfully or not.
    fn on_done(&self);
}

/// No-op implementation for tests.
pub struct NoGenerationProgress;

impl GenerationProgress for NoGenerationProgress {
    fn on_phase(&self, _phase: GenerationPhase) {}
    fn on_done(&self) {}
}
