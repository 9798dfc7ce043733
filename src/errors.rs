use crate::config::ConfigLoadError;
use crate::resources::ResourceKind;

/// Failure talking to the inventory backend.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BackendError {
    #[error("Backend returned status {status} for {path}")]
    Status { path: String, status: u16 },

    #[error("Transport error for {path}: {message}")]
    Transport { path: String, message: String },

    #[error("Malformed response from {path}: {message}")]
    Decode { path: String, message: String },
}

impl BackendError {
    /// HTTP status code when the backend answered with a non-success status.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Mutations the viewer submits to the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum SubmitAction {
    #[strum(serialize = "add product")]
    AddProduct,
    #[strum(serialize = "remove duplicates")]
    RemoveDuplicates,
}

#[derive(Debug, thiserror::Error)]
pub enum ViewerError {
    #[error("Failed to load {resource}: {source}")]
    Fetch {
        resource: ResourceKind,
        #[source]
        source: BackendError,
    },

    #[error("Failed to {action}: {source}")]
    Submit {
        action: SubmitAction,
        #[source]
        source: BackendError,
    },

    /// The mutation went through but the follow-up table refresh did not.
    #[error("{action} succeeded but refreshing {resource} failed: {source}")]
    Refresh {
        action: SubmitAction,
        resource: ResourceKind,
        #[source]
        source: BackendError,
    },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Document has no element '{0}'")]
    MissingElement(String),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigLoadError),
}

impl ViewerError {
    /// Short message shown to the user. Transport details stay in the logs.
    pub fn alert_message(&self) -> String {
        match self {
            Self::Fetch { resource, .. } => format!("Failed to load {}", resource),
            Self::Submit {
                action: SubmitAction::AddProduct,
                ..
            } => "Failed to add product".to_string(),
            Self::Submit {
                action: SubmitAction::RemoveDuplicates,
                ..
            } => "Failed to remove duplicates.".to_string(),
            Self::Refresh {
                action: SubmitAction::RemoveDuplicates,
                ..
            } => "Duplicates removed, but the product list could not be refreshed.".to_string(),
            Self::Refresh { resource, .. } => format!("Failed to load {}", resource),
            Self::Validation(msg) => format!("Invalid product: {}", msg),
            Self::MissingElement(_) => "The page is missing a required element".to_string(),
            Self::Config(_) => "Configuration error".to_string(),
        }
    }

    /// Backend failure underneath this error, if any.
    pub fn backend_error(&self) -> Option<&BackendError> {
        match self {
            Self::Fetch { source, .. } | Self::Submit { source, .. } | Self::Refresh { source, .. } => {
                Some(source)
            }
            _ => None,
        }
    }
}

pub type ViewerResult<T> = Result<T, ViewerError>;
