//! Error taxonomy reported by [`compress`](crate::compress) and
//! [`decompress`](crate::decompress).

/// Terminal conditions surfaced to the caller. None of them are retried.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The named input could not be opened or read.
    #[error("invalid input file: unable to open input file")]
    InvalidInputFile,

    /// Nothing to compress, or an archive whose header or bitstream is unusable.
    #[error("invalid data: unable to process data")]
    InvalidData,

    /// Any other I/O fault hit mid-operation (creating or writing the output).
    #[error("i/o failure: {0}")]
    Io(#[from] std::io::Error),

    /// Fault raised by the binary codec layer while writing.
    #[error("binary codec failure: {0}")]
    Binary(#[from] binary_rw::BinaryError),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Returns true for the two conditions callers are expected to report
    /// verbatim rather than treat as environment faults.
    pub fn is_user_facing(&self) -> bool {
        matches!(self, Error::InvalidInputFile | Error::InvalidData)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            Error::InvalidInputFile.to_string(),
            "invalid input file: unable to open input file"
        );
        assert_eq!(
            Error::InvalidData.to_string(),
            "invalid data: unable to process data"
        );
    }

    #[test]
    fn test_is_user_facing() {
        assert!(Error::InvalidInputFile.is_user_facing());
        assert!(Error::InvalidData.is_user_facing());

        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
        assert!(!Error::from(io).is_user_facing());
    }
}
