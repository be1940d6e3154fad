use thiserror::Error;

/// Errors raised by the core while expanding trees or editing a form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The tree depth along `path` does not match the number of field names.
    #[error("shape mismatch at {path}: expected {expected}, found {found}")]
    ShapeMismatch {
        path: String,
        expected: String,
        found: String,
    },

    #[error("field name at position {index} is empty")]
    EmptyFieldName { index: usize },

    #[error("field name '{0}' is listed more than once")]
    DuplicateField(String),

    #[error("unknown field '{0}'")]
    UnknownField(String),

    /// Neither the data file nor the command line named the fields.
    #[error("no field names given (add \"fields\" to the data file or pass --fields)")]
    MissingFields,
}
