use crate::model::CardId;
use thiserror::Error;

/// Why a form submission was refused.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    #[error("title is required")]
    MissingTitle,

    #[error("category is required")]
    MissingCategory,

    #[error("unknown category '{0}' (expected Work, Personal, Shopping or Ideas)")]
    UnknownCategory(String),
}

#[derive(Error, Debug)]
pub enum CardboxError {
    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] FieldError),

    #[error("Card not found: {0}")]
    CardNotFound(CardId),

    #[error("Close the card dialog before deleting")]
    DialogOpen,

    #[error("No card dialog is open")]
    NoDialog,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Api Error: {0}")]
    Api(String),
}

pub type Result<T> = std::result::Result<T, CardboxError>;
