//! Protocol-dispatch encryption engine.
//!
//! An [`EncryptionEngine`] is configured once with key material and a
//! [`Protocol`], then encrypts or decrypts whole byte streams:
//!
//! - [`Protocol::Gcm`] — AES-256-GCM with a fresh random key and 24-byte
//!   nonce per call, returned hex-encoded as [`GcmParams`] for the caller to
//!   keep.
//! - [`Protocol::Cfb`] — AES-256-CFB with a key derived from a passphrase
//!   via PBKDF2-HMAC-SHA512; the envelope `[IV][ciphertext][salt]` is
//!   self-describing and needs no side channel.
//! - [`Protocol::Rsa`] — RSA PKCS#1 v1.5 with a base64 DER private key.
//!
//! Inputs are buffered whole; this crate does not stream unbounded data.

pub mod crypto;
pub mod engine;
pub mod error;

pub use crypto::aes_gcm::GcmParams;
pub use engine::{EncryptOutput, EncryptionEngine, Protocol, Secret};
pub use error::{Result, SealboxError};
