/// Domain-level failures.
///
/// The boundary layer dispatches on the variant to pick a status code; the
/// display string is what ends up in the response envelope.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CoreError {
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: String },

    #[error("{0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Shorthand for a [`CoreError::Validation`] with a static message.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// A missing gift.
    pub fn gift_not_found(id: impl ToString) -> Self {
        Self::NotFound {
            entity: "Gift",
            id: id.to_string(),
        }
    }
}
