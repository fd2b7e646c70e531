#![forbid(unsafe_code)]

#[derive(Debug)]
pub enum StoreError {
    Io(std::io::Error),
    Sql(rusqlite::Error),
    InvalidInput(&'static str),
    DuplicateEntry { set: String, url: String },
    UnknownSet,
}

impl StoreError {
    /// Stable machine-readable code for callers that match on failures
    /// without parsing display text.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Io(_) => "IO",
            Self::Sql(_) => "SQL",
            Self::InvalidInput(message) => {
                if message.starts_with("RESET_REQUIRED") {
                    "RESET_REQUIRED"
                } else {
                    "INVALID_INPUT"
                }
            }
            Self::DuplicateEntry { .. } => "DUPLICATE_ENTRY",
            Self::UnknownSet => "UNKNOWN_SET",
        }
    }
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "io: {err}"),
            Self::Sql(err) => write!(f, "sqlite: {err}"),
            Self::InvalidInput(message) => write!(f, "invalid input: {message}"),
            Self::DuplicateEntry { set, url } => {
                write!(f, "duplicate entry ({url} is already in {set})")
            }
            Self::UnknownSet => write!(f, "unknown set"),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<std::io::Error> for StoreError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sql(value)
    }
}
