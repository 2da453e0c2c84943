use thiserror::Error;

/// Onboarding error type
#[derive(Error, Debug)]
pub enum Error {
    /// HTTP transport error while talking to the provisioning endpoint
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Endpoint URL could not be built from configuration
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Configuration source could not be loaded
    #[error("Configuration error: {0}")]
    ConfigLoader(#[from] config::ConfigError),

    /// Serialization/Deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Other errors
    #[error("{0}")]
    Other(String),
}

/// Errors raised by repeatable field groups
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GroupError {
    #[error("You can add at most {max} {label}")]
    CapacityReached { label: &'static str, max: usize },

    #[error("Entry {index} cannot be removed")]
    NotRemovable { index: u32 },
}

/// Reasons an attachment is turned away at intake
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AttachmentError {
    #[error("File \"{name}\" is too large. Maximum size is 50MB.")]
    TooLarge { name: String, size: u64 },

    #[error("File \"{name}\" is not supported. Please upload DOC or DOCX files only.")]
    UnsupportedType { name: String },

    #[error("File \"{path}\" could not be read: {reason}")]
    Unreadable { path: String, reason: String },
}
