use std::borrow::Cow;

/// A specialized [`StoreError`] enum of this crate.
#[cfgsync_derive::cfgsync_error]
pub enum StoreError {
    /// Connection, RPC or consensus failure, including dial and request timeouts.
    #[error("Store unavailable{}: {message}", format_context(.context))]
    Unavailable { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Key not found{}: {message}", format_context(.context))]
    NotFound { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// An environment or config name that cannot be mapped onto a single key segment.
    #[error("Invalid name{}: {message}", format_context(.context))]
    InvalidName { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Invalid store configuration{}: {message}", format_context(.context))]
    Configuration { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl StoreError {
    pub(crate) fn unavailable(
        err: impl std::fmt::Display,
        context: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self::Unavailable { message: err.to_string().into(), context: Some(context.into()) }
    }

    /// Whether the failure came from the store transport rather than from the request itself.
    #[must_use]
    pub const fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable { .. })
    }
}
