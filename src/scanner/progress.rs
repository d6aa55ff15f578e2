//! Progress display driven by nmap's periodic status lines.
//!
//! With `--stats-every`, nmap prints lines such as
//! `SYN Stealth Scan Timing: About 45.20% done; ETC: 10:02 (0:00:12 remaining)`.
//! Each scan phase restarts at 0%, so the bar is reset when the phase changes.

use crate::types::CidrBlock;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Bar length; positions are tenths of a percent.
const BAR_LEN: u64 = 1000;

/// A phase name and its completion percentage.
#[derive(Debug, Clone, PartialEq)]
pub struct PhaseProgress {
    pub phase: String,
    pub percent: f64,
}

/// Extract progress from an engine status line.
pub fn parse_stats_line(line: &str) -> Option<PhaseProgress> {
    let (phase, rest) = line.split_once(" Timing: About ")?;
    let (percent, _) = rest.split_once('%')?;
    let percent: f64 = percent.trim().parse().ok()?;
    if !(0.0..=100.0).contains(&percent) {
        return None;
    }
    Some(PhaseProgress {
        phase: phase.trim().to_string(),
        percent,
    })
}

/// Terminal progress bar for a running scan.
pub struct ScanProgress {
    bar: ProgressBar,
    phase: Option<String>,
}

impl ScanProgress {
    /// Create a visible progress bar for scanning `target`.
    pub fn new(target: &CidrBlock) -> Self {
        let bar = ProgressBar::new(BAR_LEN);
        if let Ok(style) = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.green/white}] {percent:>3}% {prefix} {msg}")
        {
            bar.set_style(style.progress_chars("=>-"));
        }
        bar.set_prefix(target.to_string());
        bar.set_message("starting");
        bar.enable_steady_tick(Duration::from_millis(120));
        Self { bar, phase: None }
    }

    /// A progress tracker that draws nothing.
    pub fn hidden() -> Self {
        Self {
            bar: ProgressBar::hidden(),
            phase: None,
        }
    }

    /// Feed one line of engine output; non-status lines are ignored.
    pub fn observe(&mut self, line: &str) {
        let Some(progress) = parse_stats_line(line) else {
            return;
        };

        if self.phase.as_deref() != Some(progress.phase.as_str()) {
            self.bar.set_message(progress.phase.clone());
            self.bar.set_position(0);
            self.phase = Some(progress.phase);
        }
        self.bar.set_position((progress.percent * 10.0).round() as u64);
    }

    /// Name of the phase currently being reported, if any.
    pub fn phase(&self) -> Option<&str> {
        self.phase.as_deref()
    }

    /// Current bar position in tenths of a percent.
    pub fn position(&self) -> u64 {
        self.bar.position()
    }

    /// Complete the bar with a final message.
    pub fn finish(&self, message: &str) {
        self.bar.set_position(BAR_LEN);
        self.bar.finish_with_message(message.to_string());
    }
}

// Any exit before `finish` (a failed scan or an early `?`) leaves the bar
// abandoned instead of half drawn.
impl Drop for ScanProgress {
    fn drop(&mut self) {
        if !self.bar.is_finished() {
            self.bar.abandon();
        }
    }
}
