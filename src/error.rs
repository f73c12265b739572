use thiserror::Error;

/// Which backing store an error originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    Postgres,
    Mongo,
    Neo4j,
}

impl std::fmt::Display for StoreKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            StoreKind::Postgres => "postgres",
            StoreKind::Mongo => "mongodb",
            StoreKind::Neo4j => "neo4j",
        };
        write!(f, "{name}")
    }
}

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required environment variable: {name}")]
    MissingEnv { name: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

type Cause = Box<dyn std::error::Error + Send + Sync>;

/// Errors raised by the store adapters.
///
/// `Unavailable` is a startup connectivity failure and is fatal; `Query` is
/// recovered at each report boundary so the menu loop keeps running. An
/// unresolved catalog reference is not an error at all — see
/// [`crate::domain::ValuatedLine`].
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("{store} unavailable: {source}")]
    Unavailable {
        store: StoreKind,
        #[source]
        source: Cause,
    },

    #[error("{store} query failed: {source}")]
    Query {
        store: StoreKind,
        #[source]
        source: Cause,
    },

    #[error("malformed {store} record: {reason}")]
    Malformed { store: StoreKind, reason: String },
}

impl StoreError {
    pub fn unavailable(store: StoreKind, source: impl Into<Cause>) -> Self {
        StoreError::Unavailable {
            store,
            source: source.into(),
        }
    }

    pub fn query(store: StoreKind, source: impl Into<Cause>) -> Self {
        StoreError::Query {
            store,
            source: source.into(),
        }
    }

    pub fn malformed(store: StoreKind, reason: impl Into<String>) -> Self {
        StoreError::Malformed {
            store,
            reason: reason.into(),
        }
    }
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("invalid {field}: {reason}")]
    MalformedInput { field: &'static str, reason: String },

    #[error("one or more stores unreachable")]
    CheckFailed,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<dialoguer::Error> for Error {
    fn from(err: dialoguer::Error) -> Self {
        // dialoguer::Error wraps an IO error
        Error::Io(std::io::Error::other(err.to_string()))
    }
}
