use thiserror::Error;

use crate::models::VariantKind;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("Not Found")]
    NotFound,

    #[error("Bad Request {0}")]
    BadRequest(String),

    #[error("{0} configuration must be selected")]
    ConfigurationRequired(VariantKind),
}

pub type EngineResult<T> = Result<T, EngineError>;
