//! Tag value type.

use std::fmt;

use crate::hash::{TAG_BYTES, TAG_WORDS};

/// An authentication tag: one or two 64-bit words, high half first.
///
/// Displays as uppercase hexadecimal, high half first, the order the
/// published test vectors use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tag([u64; TAG_WORDS]);

impl Tag {
    /// Construct from tag words, high half first.
    #[must_use]
    pub const fn from_words(words: [u64; TAG_WORDS]) -> Self {
        Self(words)
    }

    /// Borrow the tag words, high half first.
    #[must_use]
    pub const fn words(&self) -> &[u64; TAG_WORDS] {
        &self.0
    }

    /// Serialize as big-endian bytes, high half first.
    #[must_use]
    pub fn to_be_bytes(self) -> [u8; TAG_BYTES] {
        let mut bytes = [0u8; TAG_BYTES];
        for (chunk, word) in bytes.chunks_exact_mut(8).zip(self.0) {
            chunk.copy_from_slice(&word.to_be_bytes());
        }
        bytes
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for word in self.0 {
            write!(f, "{word:016X}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(not(feature = "tag-128"))]
    #[test]
    fn displays_as_sixteen_hex_digits() {
        let tag = Tag::from_words([0x8124_D03C_89C8_B774]);
        assert_eq!(tag.to_string(), "8124D03C89C8B774");
        assert_eq!(tag.to_be_bytes(), [0x81, 0x24, 0xD0, 0x3C, 0x89, 0xC8, 0xB7, 0x74]);
    }

    #[cfg(feature = "tag-128")]
    #[test]
    fn displays_high_half_first() {
        let tag = Tag::from_words([0x0123_4567_89AB_CDEF, 0xFEDC_BA98_7654_3210]);
        assert_eq!(tag.to_string(), "0123456789ABCDEFFEDCBA9876543210");
        assert_eq!(tag.to_be_bytes()[0], 0x01);
        assert_eq!(tag.to_be_bytes()[15], 0x10);
    }

    #[test]
    fn zero_pads_short_words() {
        let tag = Tag::from_words([0x1u64; TAG_WORDS]);
        assert!(tag.to_string().starts_with("000000000000000"));
    }
}
