/// Upload metadata rejections. User-fixable, produced before any side effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    Empty,
    TooLarge,
    ExtensionNotAllowed,
    MimeNotAllowed,
}

impl ValidationError {
    pub fn message(&self) -> &'static str {
        match self {
            ValidationError::Empty => "No file content was provided",
            ValidationError::TooLarge => "File exceeds the maximum allowed size",
            ValidationError::ExtensionNotAllowed => "File extension is not allowed",
            ValidationError::MimeNotAllowed => "File content type is not allowed",
        }
    }
}

#[derive(Debug)]
pub enum ApplicationError {
    Validation(ValidationError),
    /// Scanner verdict was not clean; nothing was stored.
    Unsafe(String),
    /// Scanner could not produce a verdict and the policy is fail-closed.
    ScannerUnavailable(String),
    StorageFailure(String),
    NotFound,
    Unauthorized,
    RangeNotSatisfiable,
    BadRequest(String),
    DatabaseError(String),
    InternalError(String),
}

impl From<ValidationError> for ApplicationError {
    fn from(error: ValidationError) -> Self {
        ApplicationError::Validation(error)
    }
}
