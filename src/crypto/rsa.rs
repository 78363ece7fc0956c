use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use rand::rngs::OsRng;
use rsa::pkcs1::DecodeRsaPrivateKey;
use rsa::pkcs8::DecodePrivateKey;
use rsa::traits::PublicKeyParts;
use rsa::{Pkcs1v15Encrypt, RsaPrivateKey, RsaPublicKey};
use zeroize::Zeroizing;

use crate::error::{Result, SealboxError};

/// Decode a base64 DER-serialized RSA private key.
///
/// Decoded on every call and never cached; these operations are infrequent
/// and the key material should not linger. PKCS#1 is tried first, PKCS#8 as
/// a fallback for keys exported by other tooling.
fn decode_private_key(secret: &[u8]) -> Result<RsaPrivateKey> {
    let text = std::str::from_utf8(secret)
        .map_err(|_| SealboxError::MalformedInput("RSA key is not valid UTF-8".into()))?;
    let der = Zeroizing::new(
        BASE64
            .decode(text.trim())
            .map_err(|e| SealboxError::MalformedInput(format!("RSA key base64: {e}")))?,
    );
    RsaPrivateKey::from_pkcs1_der(&der)
        .or_else(|_| RsaPrivateKey::from_pkcs8_der(&der))
        .map_err(|_| SealboxError::CryptoFailure)
}

/// Encrypt `plaintext` with PKCS#1 v1.5 padding under the public half of the
/// serialized key.
///
/// PKCS#1 v1.5 has no block splitting, so a plaintext longer than the
/// modulus is a hard error before the primitive runs.
pub fn encrypt(secret: &[u8], plaintext: &[u8]) -> Result<Vec<u8>> {
    let private_key = decode_private_key(secret)?;
    let public_key = RsaPublicKey::from(&private_key);
    let max = public_key.size();
    if plaintext.len() > max {
        return Err(SealboxError::InputTooLarge {
            size: plaintext.len(),
            max,
        });
    }
    public_key
        .encrypt(&mut OsRng, Pkcs1v15Encrypt, plaintext)
        .map_err(|_| SealboxError::CryptoFailure)
}

/// Decrypt PKCS#1 v1.5 ciphertext with the private key.
pub fn decrypt(secret: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>> {
    let private_key = decode_private_key(secret)?;
    private_key
        .decrypt(Pkcs1v15Encrypt, ciphertext)
        .map_err(|_| SealboxError::CryptoFailure)
}
