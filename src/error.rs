/// Errors that stop a run before any cleanup can happen.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// A target root could not be derived from the environment.
    #[error("could not resolve the {label} folder: {hint}")]
    TargetUnresolved {
        /// Label of the target that failed to resolve.
        label: &'static str,
        /// What was missing.
        hint: String,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
