use entity::sea_orm::DbErr;

use crate::business::validation::ValidationErrors;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("validation failed: {0}")]
    Validation(ValidationErrors),

    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i32 },

    #[error("couldn't generate a unique analytics token after {attempts} attempts")]
    TokenExhausted { attempts: u32 },

    #[error("no officer is signed in")]
    Unauthenticated,

    #[error(transparent)]
    Database(#[from] DbErr),

    #[error("configuration error: {0}")]
    Config(String),
}

impl Error {
    pub fn not_found(entity: &'static str, id: i32) -> Self {
        Error::NotFound { entity, id }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }

    /// Field errors if this is a validation failure.
    pub fn validation_errors(&self) -> Option<&ValidationErrors> {
        match self {
            Error::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}

impl From<ValidationErrors> for Error {
    fn from(errors: ValidationErrors) -> Self {
        Error::Validation(errors)
    }
}
