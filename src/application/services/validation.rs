use crate::{
    application::error::ValidationError, domain::config::UploadPolicy,
    domain::models::upload::IncomingFile,
};

/// Stateless policy check on upload metadata. Checks run in a fixed order and
/// short-circuit on the first failure; no side effects.
pub struct UploadValidator {
    policy: UploadPolicy,
}

impl UploadValidator {
    pub fn new(policy: UploadPolicy) -> Self {
        Self { policy }
    }

    pub fn validate(&self, file: &IncomingFile) -> Result<(), ValidationError> {
        if file.size() == 0 {
            return Err(ValidationError::Empty);
        }

        if file.size() > self.policy.max_size_bytes {
            return Err(ValidationError::TooLarge);
        }

        // An empty allowlist means "no restriction" for that dimension.
        if !self.policy.allowed_extensions.is_empty()
            && !self
                .policy
                .allowed_extensions
                .contains(&file.normalized_extension())
        {
            return Err(ValidationError::ExtensionNotAllowed);
        }

        if !self.policy.allowed_mime_types.is_empty()
            && !self
                .policy
                .allowed_mime_types
                .contains(&file.normalized_content_type())
        {
            return Err(ValidationError::MimeNotAllowed);
        }

        Ok(())
    }
}
