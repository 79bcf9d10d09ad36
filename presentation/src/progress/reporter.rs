//! Progress reporting for generation runs

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use pdraft_application::GenerationProgress;
use pdraft_domain::GenerationPhase;
use std::sync::Mutex;
use std::time::Duration;

/// Reports pipeline phases with a spinner
pub struct ProgressReporter {
    bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            bar: Mutex::new(None),
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap()
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl GenerationProgress for ProgressReporter {
    fn on_phase(&self, phase: GenerationPhase) {
        let mut guard = self.bar.lock().unwrap();
        let bar = guard.get_or_insert_with(|| {
            let pb = ProgressBar::new_spinner();
            pb.set_style(Self::spinner_style());
            pb.enable_steady_tick(Duration::from_millis(100));
            pb
        });

        if phase == GenerationPhase::Failed {
            bar.set_message(phase.status_message().red().to_string());
        } else {
            bar.set_message(phase.status_message());
        }
    }

    fn on_done(&self) {
        if let Some(bar) = self.bar.lock().unwrap().take() {
            bar.finish_and_clear();
        }
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl GenerationProgress for SimpleProgress {
    fn on_phase(&self, phase: GenerationPhase) {
        println!("{} {}", "->".cyan(), phase.status_message());
    }

    fn on_done(&self) {}
}
