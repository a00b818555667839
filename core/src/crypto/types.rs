//! crypto/types.rs
//! Key material and crypto error types.

use std::fmt;

use thiserror::Error;
use zeroize::Zeroize;

/// AES-128 key length.
pub const KEY_LEN_16: usize = 16;

/// CFB initialization vector length (one AES block).
pub const IV_LEN_16: usize = 16;

/// SHA3-256 digest length; split into key ‖ iv.
pub const DIGEST_LEN_32: usize = KEY_LEN_16 + IV_LEN_16;

/// Per-unit cipher key and IV.
///
/// Zeroized on drop. Equality is not constant-time and exists for tests and
/// uniqueness checks only.
#[derive(Clone, PartialEq, Eq)]
pub struct KeyMaterial {
    key: [u8; KEY_LEN_16],
    iv: [u8; IV_LEN_16],
}

impl KeyMaterial {
    pub fn new(key: [u8; KEY_LEN_16], iv: [u8; IV_LEN_16]) -> Self {
        Self { key, iv }
    }

    /// Split a 32-byte digest: first half key, second half IV.
    pub fn from_digest(digest: &[u8; DIGEST_LEN_32]) -> Self {
        let mut key = [0u8; KEY_LEN_16];
        let mut iv = [0u8; IV_LEN_16];
        key.copy_from_slice(&digest[..KEY_LEN_16]);
        iv.copy_from_slice(&digest[KEY_LEN_16..]);
        Self { key, iv }
    }

    /// Build from caller-supplied slices, checking both lengths.
    pub fn from_slices(key: &[u8], iv: &[u8]) -> Result<Self, CryptoError> {
        let key: [u8; KEY_LEN_16] = key.try_into().map_err(|_| CryptoError::InvalidKeyLen {
            expected: KEY_LEN_16,
            actual: key.len(),
        })?;
        let iv: [u8; IV_LEN_16] = iv.try_into().map_err(|_| CryptoError::InvalidIvLen {
            expected: IV_LEN_16,
            actual: iv.len(),
        })?;
        Ok(Self { key, iv })
    }

    #[inline]
    pub fn key(&self) -> &[u8; KEY_LEN_16] {
        &self.key
    }

    #[inline]
    pub fn iv(&self) -> &[u8; IV_LEN_16] {
        &self.iv
    }
}

impl fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyMaterial")
            .field("key", &"<redacted>")
            .field("iv", &"<redacted>")
            .finish()
    }
}

impl Drop for KeyMaterial {
    fn drop(&mut self) {
        self.key.zeroize();
        self.iv.zeroize();
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum CryptoError {
    #[error("invalid key length: expected={expected}, actual={actual}")]
    InvalidKeyLen { expected: usize, actual: usize },

    #[error("invalid iv length: expected={expected}, actual={actual}")]
    InvalidIvLen { expected: usize, actual: usize },

    #[error("state tolerance must be finite and >= 0, got {0}")]
    InvalidTolerance(f64),
}
