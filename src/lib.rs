//! Empties the Windows user and system temp folders, skipping anything that
//! is locked or protected, and reports how much space came back.

pub mod cleaner;
pub mod disk;
pub mod error;
pub mod fs;
pub mod progress;
pub mod report;
pub mod scanner;
pub mod targets;

pub use cleaner::{Cleaner, CleanupResult, SkipReason, Skipped};
pub use error::{Error, Result};
pub use progress::Progress;
pub use scanner::Survey;
pub use targets::CleanupTarget;

use fs::Filesystem;

/// One target after cleaning, with its size beforehand.
#[derive(Debug, Clone)]
pub struct TargetReport {
    pub target: CleanupTarget,
    /// The root did not exist when cleaning started.
    pub missing: bool,
    pub survey: Survey,
    pub result: CleanupResult,
}

/// Surveys and cleans a single target. The survey sizes the progress bar.
pub fn clean_target<F: Filesystem>(
    cleaner: &Cleaner<F>,
    target: &CleanupTarget,
    progress: &mut dyn Progress,
) -> TargetReport {
    let survey = scanner::survey(cleaner.fs(), target.root());
    tracing::info!(
        label = target.label,
        root = %target.root().display(),
        items = survey.items,
        bytes = survey.bytes,
        "cleaning"
    );

    progress.start(target.label, survey.items);
    let outcome = cleaner.try_clean(target.root(), progress);
    progress.finish();

    TargetReport {
        target: target.clone(),
        missing: outcome.is_none(),
        survey,
        result: outcome.unwrap_or_default(),
    }
}

/// Combined outcome over all targets.
pub fn combined(reports: &[TargetReport]) -> CleanupResult {
    reports.iter().map(|r| r.result.clone()).sum()
}
