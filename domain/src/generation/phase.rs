//! Pipeline phase model

use std::fmt;

/// Phases of a generation run.
///
/// The pipeline is linear with no retries:
/// `Validating -> Prompting -> Compiling -> Recording -> Debiting`,
/// with `Failed` reachable from any step. A run that reaches `Debiting`
/// returns to idle (no phase) on completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationPhase {
    Validating,
    Prompting,
    Compiling,
    Recording,
    Debiting,
    Failed,
}

impl GenerationPhase {
    /// Message shown on the display surface while the phase is active.
    pub fn status_message(&self) -> &'static str {
        match self {
            Self::Validating => "Checking request...",
            Self::Prompting => "Generating LaTeX code...",
            Self::Compiling => "Compiling PDF...",
            Self::Recording => "Saving to history...",
            Self::Debiting => "Updating balance...",
            Self::Failed => "Generation failed",
        }
    }
}

impl fmt::Display for GenerationPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Validating => "validating",
            Self::Prompting => "prompting",
            Self::Compiling => "compiling",
            Self::Recording => "recording",
            Self::Debiting => "debiting",
            Self::Failed => "failed",
        };
        write!(f, "{}", name)
    }
}
