use cfgsync_store::StoreError;
use std::borrow::Cow;

/// Failures of a sync verb.
///
/// `?` on an [`std::io::Error`] yields [`SyncError::LocalRead`]; writes are mapped explicitly.
#[cfgsync_derive::cfgsync_error]
pub enum SyncError {
    #[error("Store unavailable{}: {message}", format_context(.context))]
    StoreUnavailable { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Config not found{}: {message}", format_context(.context))]
    NotFound { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Invalid name{}: {message}", format_context(.context))]
    InvalidName { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Local read failed{}: {source}", format_context(.context))]
    LocalRead { source: std::io::Error, context: Option<Cow<'static, str>> },

    #[error("Local write failed{}: {source}", format_context(.context))]
    LocalWrite { source: std::io::Error, context: Option<Cow<'static, str>> },
}

impl SyncError {
    pub(crate) fn write(source: std::io::Error, context: impl Into<Cow<'static, str>>) -> Self {
        Self::LocalWrite { source, context: Some(context.into()) }
    }
}

impl From<StoreError> for SyncError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Unavailable { message, context }
            | StoreError::Configuration { message, context } => {
                Self::StoreUnavailable { message, context }
            },
            StoreError::NotFound { message, context } => Self::NotFound { message, context },
            StoreError::InvalidName { message, context } => Self::InvalidName { message, context },
        }
    }
}
