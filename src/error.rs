use thiserror::Error;

#[derive(Error, Debug)]
pub enum TruckCareError {
    #[error("Config error: {0}")]
    Config(String),
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Storage error: {0}")]
    Storage(String),
}

pub type Result<T> = std::result::Result<T, TruckCareError>;

// Helper conversions.
// Constraint violations (duplicate plate, CHECK failures) are input
// problems and must stay distinguishable from disk/file-level failures.
impl From<rusqlite::Error> for TruckCareError {
    fn from(e: rusqlite::Error) -> Self {
        match &e {
            rusqlite::Error::SqliteFailure(f, _)
                if f.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                Self::Validation(e.to_string())
            }
            _ => Self::Storage(e.to_string()),
        }
    }
}

impl From<config::ConfigError> for TruckCareError {
    fn from(e: config::ConfigError) -> Self {
        Self::Config(e.to_string())
    }
}

impl From<std::io::Error> for TruckCareError {
    fn from(e: std::io::Error) -> Self {
        Self::Storage(e.to_string())
    }
}
