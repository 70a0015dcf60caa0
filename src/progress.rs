use crate::report::format_size;
use indicatif::{ProgressBar, ProgressStyle};

/// Receives cumulative progress while a target is cleaned.
pub trait Progress {
    /// `estimate` may be low; `advance` can report more than it.
    fn start(&mut self, label: &str, estimate: u64);
    fn advance(&mut self, processed: u64, bytes_freed: u64);
    fn finish(&mut self);
}

/// Discards all updates.
#[derive(Debug, Default)]
pub struct Silent;

impl Progress for Silent {
    fn start(&mut self, _label: &str, _estimate: u64) {}
    fn advance(&mut self, _processed: u64, _bytes_freed: u64) {}
    fn finish(&mut self) {}
}

/// An indicatif bar on stderr. indicatif hides it when stderr is not a terminal.
#[derive(Debug, Default)]
pub struct TerminalProgress {
    bar: Option<ProgressBar>,
}

impl TerminalProgress {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Progress for TerminalProgress {
    fn start(&mut self, label: &str, estimate: u64) {
        let bar = ProgressBar::new(estimate);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{prefix:.cyan.bold} [{bar:30.cyan/blue}] {pos}/{len} items  {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("=>-"),
        );
        bar.set_prefix(label.to_string());
        self.bar = Some(bar);
    }

    fn advance(&mut self, processed: u64, bytes_freed: u64) {
        let Some(bar) = &self.bar else {
            return;
        };
        if bar.length().is_some_and(|len| processed > len) {
            bar.set_length(processed);
        }
        bar.set_position(processed);
        bar.set_message(format!("{} freed", format_size(bytes_freed)));
    }

    fn finish(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
    }
}
