use aes::Aes256;
use aes_gcm::aead::consts::U24;
use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{AesGcm, Nonce};
use rand::rngs::OsRng;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use super::{GCM_NONCE_LEN, KEY_LEN};
use crate::error::{Result, SealboxError};

/// AES-256-GCM constructed with an explicit 24-byte nonce size.
type Aes256Gcm24 = AesGcm<Aes256, U24>;

/// Side-channel parameters produced by a GCM encrypt call.
///
/// The engine never persists these; the caller must store them alongside the
/// ciphertext and present them again to decrypt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GcmParams {
    /// Hex-encoded 32-byte key.
    pub cipher_key: String,
    /// Hex-encoded 24-byte nonce.
    pub nonce: String,
}

/// Encrypt `plaintext` under a fresh random key and nonce.
///
/// Both are generated from OS entropy on every call and returned hex-encoded
/// as [`GcmParams`]; neither is ever reused.
pub fn encrypt(plaintext: &[u8]) -> Result<(Vec<u8>, GcmParams)> {
    let mut key = Zeroizing::new([0u8; KEY_LEN]);
    OsRng.fill_bytes(key.as_mut());
    let mut nonce_bytes = [0u8; GCM_NONCE_LEN];
    OsRng.fill_bytes(&mut nonce_bytes);

    let cipher =
        Aes256Gcm24::new_from_slice(key.as_ref()).map_err(|_| SealboxError::CryptoFailure)?;
    let nonce = Nonce::<U24>::from_slice(&nonce_bytes);
    let ciphertext = cipher
        .encrypt(nonce, plaintext)
        .map_err(|_| SealboxError::CryptoFailure)?;

    let params = GcmParams {
        cipher_key: hex::encode(key.as_ref()),
        nonce: hex::encode(nonce_bytes),
    };
    Ok((ciphertext, params))
}

/// Decrypt data produced by [`encrypt`] with its matching parameters.
pub fn decrypt(data: &[u8], params: &GcmParams) -> Result<Vec<u8>> {
    let key = Zeroizing::new(
        hex::decode(&params.cipher_key)
            .map_err(|e| SealboxError::MalformedInput(format!("cipher key hex: {e}")))?,
    );
    let nonce_bytes = hex::decode(&params.nonce)
        .map_err(|e| SealboxError::MalformedInput(format!("nonce hex: {e}")))?;
    if key.len() != KEY_LEN || nonce_bytes.len() != GCM_NONCE_LEN {
        return Err(SealboxError::MalformedInput(format!(
            "expected {KEY_LEN}-byte key and {GCM_NONCE_LEN}-byte nonce, got {} and {}",
            key.len(),
            nonce_bytes.len()
        )));
    }

    let cipher =
        Aes256Gcm24::new_from_slice(key.as_slice()).map_err(|_| SealboxError::CryptoFailure)?;
    cipher
        .decrypt(Nonce::<U24>::from_slice(&nonce_bytes), data)
        .map_err(|_| SealboxError::CryptoFailure)
}
