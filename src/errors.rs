use snafu::Snafu;

pub type CustomResult<T> = Result<T, Error>;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    #[snafu(display("{} does not exist", what))]
    NotFoundError { what: String },

    #[snafu(display("id generation failed: {}", reason))]
    IdGenerationError { reason: String },

    #[snafu(display("unauthorized: {}", reason))]
    UnauthorizedError { reason: String },

    #[snafu(display("password hashing failed: {}", reason))]
    PasswordHashError { reason: String },

    #[snafu(display("file does not exist: {}", path))]
    FileDoesNotExistError { path: String },

    #[snafu(display("permission denied: {}", path))]
    PermissionDeniedError { path: String },

    #[snafu(display("malformed results file: {}", reason))]
    MalformedResultsError { reason: String },

    #[snafu(display("database error: {}", source))]
    DatabaseError { source: diesel::result::Error },
}

impl From<diesel::result::Error> for Error {
    fn from(source: diesel::result::Error) -> Self {
        match source {
            diesel::result::Error::NotFound => Error::NotFoundError {
                what: "row".to_string(),
            },
            source => Error::DatabaseError { source },
        }
    }
}
