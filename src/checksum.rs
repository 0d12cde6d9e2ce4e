//! Checksums of generated files
//!
//! Used to show that two generation runs over the same schemas produce the
//! same bytes.

use sha2::{Digest, Sha256};
use std::fmt;

/// SHA256 checksum of file content
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Checksum(String);

impl Checksum {
    /// Compute checksum from raw bytes
    pub fn from_bytes(data: &[u8]) -> Self {
        let hash = Sha256::digest(data);
        Self(format!("{:x}", hash))
    }

    /// Compute checksum from a string
    pub fn from_content(content: &str) -> Self {
        Self::from_bytes(content.as_bytes())
    }
}

impl fmt::Display for Checksum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checksum_consistency() {
        let content = "from .person import Person\n";
        assert_eq!(Checksum::from_content(content), Checksum::from_content(content));
    }

    #[test]
    fn test_checksum_different_content() {
        assert_ne!(
            Checksum::from_content("from . import core\n"),
            Checksum::from_content("from . import sands\n")
        );
    }

    #[test]
    fn test_checksum_of_empty_content() {
        let checksum = Checksum::from_content("");
        assert_eq!(checksum, Checksum::from_bytes(b""));
        assert_eq!(
            checksum.to_string(),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }
}
