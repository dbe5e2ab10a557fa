use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

const PROBE_TEMPLATE: &str =
    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} targets probed ({eta})";

/// Progress bar for a probe batch, drawn on stderr.
///
/// All methods take `&self` so the dispatcher can report completions
/// without owning the reporter. A disabled reporter draws nothing.
pub struct ProgressReporter {
    bar: ProgressBar,
    enabled: bool,
}

impl ProgressReporter {
    pub fn new(enabled: bool) -> Self {
        let bar = if enabled {
            let bar = ProgressBar::new(0);
            let style = ProgressStyle::default_bar()
                .template(PROBE_TEMPLATE)
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-");
            bar.set_style(style);
            bar
        } else {
            ProgressBar::hidden()
        };

        Self { bar, enabled }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn start_probing(&self, total_targets: usize) {
        if !self.enabled {
            return;
        }

        self.bar.set_length(total_targets as u64);
        self.bar.set_position(0);
        self.bar.set_message("Probing targets");
        self.bar.enable_steady_tick(Duration::from_millis(120));
    }

    pub fn update_probe_progress(&self, completed: usize) {
        if self.enabled {
            self.bar.set_position(completed as u64);
        }
    }

    pub fn finish_probing(&self, valid_count: usize, total_count: usize) {
        if !self.enabled {
            return;
        }

        let message = if valid_count == total_count {
            "✓ All targets valid".to_string()
        } else {
            format!("✓ Probing complete ({valid_count}/{total_count} valid)")
        };
        self.bar.finish_with_message(message);
    }

    /// Remove the bar so the report starts on a clean line.
    pub fn clear(&self) {
        if self.enabled {
            self.bar.finish_and_clear();
        }
    }

    pub fn position(&self) -> u64 {
        self.bar.position()
    }
}
