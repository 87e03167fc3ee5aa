//! Application-level error plumbing.
//!
//! Library seams carry typed errors (`api::ApiError`, `router::RouteError`);
//! startup code and the binary box them into [`DynError`] and attach context
//! with [`Context::with_ctx`].

pub type DynError = Box<dyn std::error::Error + Send + Sync + 'static>;
pub type Result<T> = std::result::Result<T, DynError>;

/// Attach a lazily built context message to any error result.
pub trait Context<T> {
    fn with_ctx<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

/// An error wrapped with what was being attempted when it happened.
#[derive(Debug, thiserror::Error)]
#[error("{context}: {cause}")]
pub struct ContextError {
    pub context: String,
    #[source]
    pub cause: DynError,
}

impl<T, E> Context<T> for std::result::Result<T, E>
where
    E: Into<DynError>,
{
    fn with_ctx<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let cause = e.into();
            ContextError { context: f(), cause }.into()
        })
    }
}

/// Plain message error for conditions that have no underlying source.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct Message(pub String);

pub fn simple_error(msg: impl Into<String>) -> DynError {
    Message(msg.into()).into()
}
