//! crypto/cipher.rs
//! AES-128 in CFB mode with full-block (128-bit) feedback.
//!
//! Design notes:
//! - Self-synchronizing stream mode: ciphertext length equals plaintext length,
//!   no padding, no tag.
//! - One cipher instance per unit; key and IV come from the KDF and are
//!   never reused across units.
//! - Not authenticated. Integrity is checked one layer up.

use aes::Aes128;
use cfb_mode::cipher::generic_array::GenericArray;
use cfb_mode::cipher::{AsyncStreamCipher, KeyIvInit};

use crate::crypto::types::KeyMaterial;

type Aes128CfbEnc = cfb_mode::Encryptor<Aes128>;
type Aes128CfbDec = cfb_mode::Decryptor<Aes128>;

/// Borrowing wrapper around one unit's key material.
pub struct UnitCipher<'k> {
    keys: &'k KeyMaterial,
}

impl<'k> UnitCipher<'k> {
    pub fn new(keys: &'k KeyMaterial) -> Self {
        Self { keys }
    }

    /// Encrypt `buf` in place.
    #[inline]
    pub fn encrypt_in_place(&self, buf: &mut [u8]) {
        let key = GenericArray::from_slice(self.keys.key());
        let iv = GenericArray::from_slice(self.keys.iv());
        Aes128CfbEnc::new(key, iv).encrypt(buf);
    }

    /// Decrypt `buf` in place.
    #[inline]
    pub fn decrypt_in_place(&self, buf: &mut [u8]) {
        let key = GenericArray::from_slice(self.keys.key());
        let iv = GenericArray::from_slice(self.keys.iv());
        Aes128CfbDec::new(key, iv).decrypt(buf);
    }

    pub fn encrypt(&self, plaintext: &[u8]) -> Vec<u8> {
        let mut out = plaintext.to_vec();
        self.encrypt_in_place(&mut out);
        out
    }

    pub fn decrypt(&self, ciphertext: &[u8]) -> Vec<u8> {
        let mut out = ciphertext.to_vec();
        self.decrypt_in_place(&mut out);
        out
    }
}
