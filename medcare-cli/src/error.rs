use thiserror::Error;

/// Errors that can occur during CLI command execution.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// I/O error
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// Snapshot load or save failed
    #[error("{0}")]
    Snapshot(#[from] medcare_catalog::SnapshotError),

    /// Reconciliation failed
    #[error("{0}")]
    Reconcile(#[from] medcare_import::ReconcileError),

    /// Settings file error
    #[error("{0}")]
    Config(#[from] medcare_import::ConfigError),

    /// Settings could not be rendered back to TOML
    #[error("Failed to render settings: {0}")]
    Render(#[from] toml::ser::Error),

    /// A required path was neither given nor configured
    #[error("Missing path: {0}")]
    MissingPath(String),
}

impl CliError {
    pub(crate) fn missing_path(msg: impl Into<String>) -> Self {
        Self::MissingPath(msg.into())
    }
}
