use thiserror::Error;

#[derive(Error, Debug)]
pub enum MockeryError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("failed to read service/ under [{path}]: {source}")]
    ServiceRootError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read service [{service}] interface file: {source}")]
    InterfaceReadError {
        service: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse service [{service}] interface file: {source}")]
    InterfaceParseError {
        service: String,
        #[source]
        source: syn::Error,
    },

    #[error("failed to find service [{service}] interface name: {source}")]
    InterfaceNameError {
        service: String,
        #[source]
        source: Box<MockeryError>,
    },

    #[error("no trait declaration found")]
    NoTraitError,

    #[error("--service selection [{service}] not found in SDK")]
    ServiceNotFoundError { service: String },

    #[error("unable to find {name} in any source files under [{dir}]")]
    TraitNotFoundError { name: String, dir: String },

    #[error("failed to parse [{path}]: {source}")]
    SourceParseError {
        path: String,
        #[source]
        source: syn::Error,
    },

    #[error("cannot mock trait [{name}]: {reason}")]
    UnsupportedTraitError { name: String, reason: String },

    #[error("invalid interface name filter: {0}")]
    FilterError(#[from] regex::Error),

    #[error("failed to generate mock client for [{service}]: {source}")]
    GenerationError {
        service: String,
        #[source]
        source: Box<MockeryError>,
    },

    #[error("failed to format mock client [{path}]: {source}")]
    FormatError {
        path: String,
        #[source]
        source: syn::Error,
    },

    #[error("environment error: {message}")]
    EnvironmentError { message: String },

    #[error("configuration error: {message}")]
    ConfigError { message: String },

    #[error("invalid value for {field}: [{value}] ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    NotFound,
    Malformed,
    Io,
    Environment,
    Config,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl MockeryError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            MockeryError::ServiceNotFoundError { .. }
            | MockeryError::TraitNotFoundError { .. }
            | MockeryError::NoTraitError => ErrorCategory::NotFound,

            MockeryError::InterfaceReadError { .. }
            | MockeryError::InterfaceParseError { .. }
            | MockeryError::SourceParseError { .. }
            | MockeryError::UnsupportedTraitError { .. }
            | MockeryError::FormatError { .. } => ErrorCategory::Malformed,

            MockeryError::IoError(_) | MockeryError::ServiceRootError { .. } => ErrorCategory::Io,

            MockeryError::EnvironmentError { .. } => ErrorCategory::Environment,

            MockeryError::ConfigError { .. }
            | MockeryError::InvalidConfigValueError { .. }
            | MockeryError::FilterError(_) => ErrorCategory::Config,

            // Wrappers report the category of the underlying cause.
            MockeryError::InterfaceNameError { source, .. }
            | MockeryError::GenerationError { source, .. } => source.category(),
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::NotFound | ErrorCategory::Malformed | ErrorCategory::Config => {
                ErrorSeverity::High
            }
            ErrorCategory::Io | ErrorCategory::Environment => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self.category() {
            ErrorCategory::NotFound => {
                "Check the --service ids against the directories under service/ in the SDK, \
                 and confirm the interface subpackage was vendored"
                    .to_string()
            }
            ErrorCategory::Malformed => {
                "Inspect the named interface file; it must be valid Rust declaring one trait"
                    .to_string()
            }
            ErrorCategory::Io => {
                "Check filesystem permissions and that --sdk-dir / --out-dir are reachable"
                    .to_string()
            }
            ErrorCategory::Environment => {
                "Check MOCKERY_MODULE_MODE / MOCKERY_FLAGS and the process working directory"
                    .to_string()
            }
            ErrorCategory::Config => "Run with --help and correct the flag values".to_string(),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::NotFound => format!("Not found: {}", self),
            ErrorCategory::Malformed => format!("Malformed source: {}", self),
            ErrorCategory::Io => format!("Filesystem problem: {}", self),
            ErrorCategory::Environment => format!("Environment problem: {}", self),
            ErrorCategory::Config => format!("Configuration problem: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, MockeryError>;
