//! Errors surfaced to the host by the build layer.

use ecss_compiler::UtilityId;
use ecss_rewriter::RewriteError;
use rayon::ThreadPoolBuildError;
use std::error::Error;
use std::fmt;
use std::io;
use std::path::PathBuf;

#[derive(Debug)]
pub enum BuildError {
    /// The stylesheet name is already taken by an asset of this build.
    DuplicateAssetName(String),
    /// Two different declarations derived the same identifier.
    IdentifierCollision {
        id: UtilityId,
        first: String,
        second: String,
    },
    /// A module failed to transform.
    Rewrite { module: String, source: RewriteError },
    Io { path: PathBuf, source: io::Error },
    /// Configuration file or values rejected.
    Config(String),
    ThreadPool(ThreadPoolBuildError),
}

impl BuildError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

impl fmt::Display for BuildError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateAssetName(name) => {
                write!(formatter, "an asset named `{name}` was already emitted")
            }
            Self::IdentifierCollision { id, first, second } => write!(
                formatter,
                "identifier `{id}` derived from both `{first}` and `{second}`"
            ),
            Self::Rewrite { module, source } => write!(
                formatter,
                "{module}:{}: {source} (byte {})",
                source.location(),
                source.offset()
            ),
            Self::Io { path, source } => write!(formatter, "{}: {source}", path.display()),
            Self::Config(msg) => write!(formatter, "invalid configuration: {msg}"),
            Self::ThreadPool(err) => write!(formatter, "cannot start worker pool: {err}"),
        }
    }
}

impl Error for BuildError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Rewrite { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            Self::ThreadPool(err) => Some(err),
            Self::DuplicateAssetName(_) | Self::IdentifierCollision { .. } | Self::Config(_) => {
                None
            }
        }
    }
}

impl From<ThreadPoolBuildError> for BuildError {
    fn from(err: ThreadPoolBuildError) -> Self {
        Self::ThreadPool(err)
    }
}

pub type BuildResult<T> = Result<T, BuildError>;
