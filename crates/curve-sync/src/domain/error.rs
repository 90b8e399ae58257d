/// Everything that can go wrong for a single curve. None of these stop the
/// batch; the curve is left out of the stage's manifest.
#[derive(Debug, thiserror::Error)]
pub enum CurveError {
    #[error("source lookup failed: {0:#}")]
    Lookup(anyhow::Error),
    #[error("source not verified (status {status}): {message}")]
    Unverified { status: String, message: String },
    #[error("constructor arguments could not be decoded")]
    UndecodableArguments,
    #[error("contract name {0} was already discovered for another curve")]
    DuplicateName(String),
    #[error("source path {0:?} is not a relative path inside the bundle")]
    InvalidSourcePath(String),
    #[error("no source file matches contract {0}")]
    MissingMainSource(String),
    #[error("flattening failed: {0:#}")]
    Flatten(anyhow::Error),
    #[error("failed to write source: {0:#}")]
    Write(anyhow::Error),
    #[error("compilation failed: {0:#}")]
    Compilation(anyhow::Error),
    #[error("constructor arguments do not match compiled ABI: {0:#}")]
    Arguments(anyhow::Error),
    #[error("deployment failed: {0:#}")]
    Deployment(anyhow::Error),
    #[error("deployment receipt has no contract address")]
    MissingContractAddress,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Severity {
    /// Expected during normal operation, e.g. an unverified contract.
    Recoverable,
    /// Indicates a broken source, toolchain or deployment for this curve.
    Fatal,
}

impl CurveError {
    pub fn severity(&self) -> Severity {
        match self {
            Self::Lookup(_) | Self::Unverified { .. } | Self::UndecodableArguments => {
                Severity::Recoverable
            }
            Self::DuplicateName(_)
            | Self::InvalidSourcePath(_)
            | Self::MissingMainSource(_)
            | Self::Flatten(_)
            | Self::Write(_)
            | Self::Compilation(_)
            | Self::Arguments(_)
            | Self::Deployment(_)
            | Self::MissingContractAddress => Severity::Fatal,
        }
    }

    /// Logs the error at a level matching its severity. Must be called inside
    /// the span of the curve it belongs to.
    pub fn log(&self) {
        match self.severity() {
            Severity::Recoverable => tracing::warn!(error = %self, "skipping curve"),
            Severity::Fatal => tracing::error!(error = %self, "skipping curve"),
        }
    }
}
