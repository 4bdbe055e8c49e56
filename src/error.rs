#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("end of stream")]
    EndOfStream,

    #[error("short read: expected {expected} bytes, got {actual}")]
    ShortRead { expected: usize, actual: usize },

    #[error("invalid seek by {delta} bytes from offset {position}")]
    Seek { delta: i64, position: u64 },

    #[error("invalid file identifier: {identifier:02x?}")]
    InvalidFormat { identifier: [u8; 4] },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("while {during}: {source}")]
    Aborted {
        during: &'static str,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Innermost error, skipping `Aborted` context layers.
    pub fn root(&self) -> &Error {
        match self {
            Error::Aborted { source, .. } => source.root(),
            other => other,
        }
    }

    pub fn is_end_of_stream(&self) -> bool {
        matches!(self.root(), Error::EndOfStream)
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// Attach the name of the operation in progress to a failure.
pub trait Context<T> {
    fn during(self, operation: &'static str) -> Result<T>;
}

impl<T, E: Into<Error>> Context<T> for std::result::Result<T, E> {
    fn during(self, operation: &'static str) -> Result<T> {
        self.map_err(|e| Error::Aborted {
            during: operation,
            source: Box::new(e.into()),
        })
    }
}
