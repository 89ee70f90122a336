use thiserror::Error;

/// Decoding error.
///
/// Failures are raised where they are detected and passed up unchanged, a
/// partially decoded geometry or feature collection is never returned.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// The text is not a valid JSON document, or its outer object cannot be
    /// dispatched on.
    #[error("{0}")]
    MalformedDocument(String),
    /// A geometry object has an unknown type, is missing a required member or
    /// carries a coordinate with too few ordinates.
    #[error("{0}")]
    MalformedGeometry(String),
}

impl Error {
    pub(crate) fn document(message: impl Into<String>) -> Self {
        Error::MalformedDocument(message.into())
    }

    pub(crate) fn geometry(message: impl Into<String>) -> Self {
        Error::MalformedGeometry(message.into())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
