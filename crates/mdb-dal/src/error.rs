pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrationError(#[from] sqlx::migrate::MigrateError),

    #[error("Record not found: {0}")]
    RecordNotFound(String),

    #[error("Invalid reference: {0}")]
    InvalidReference(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

impl From<garde::Report> for Error {
    fn from(report: garde::Report) -> Self {
        Error::InvalidData(report.to_string())
    }
}
