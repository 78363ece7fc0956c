use std::io::Read;

use tracing::debug;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::crypto::aes_gcm::GcmParams;
use crate::crypto::{aes_cfb, aes_gcm, rsa};
use crate::error::{Result, SealboxError};

/// Which cipher suite an engine dispatches to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Protocol {
    /// AES-256-GCM with a fresh random key and 24-byte nonce per call.
    Gcm,
    /// AES-256-CFB with a PBKDF2-derived key and self-describing envelope.
    Cfb,
    /// RSA with PKCS#1 v1.5 padding.
    Rsa,
}

/// Key material, tagged by kind so a handler can never be handed the wrong
/// one. Zeroized on drop.
#[derive(Zeroize, ZeroizeOnDrop)]
pub enum Secret {
    /// Raw passphrase bytes; used for CFB key derivation and for wrapping
    /// GCM parameters.
    Passphrase(Vec<u8>),
    /// Base64 text of a DER-serialized RSA private key (PKCS#1 or PKCS#8).
    RsaPrivateKey(Vec<u8>),
}

/// Ciphertext plus any side-channel parameters needed to reverse it.
#[derive(Debug)]
pub struct EncryptOutput {
    pub ciphertext: Vec<u8>,
    /// `Some` only for GCM. The engine does not keep a copy; the caller must
    /// hold on to these to decrypt later.
    pub params: Option<GcmParams>,
}

/// Protocol-dispatch encryption engine.
///
/// Immutable once constructed: every call reads its input to completion,
/// does its work with call-scoped randomness and derived keys, and returns.
/// Calls on the same engine from multiple threads are safe; there is no
/// per-call state to race on.
pub struct EncryptionEngine {
    secret: Secret,
    protocol: Protocol,
}

impl EncryptionEngine {
    pub fn new(secret: Secret, protocol: Protocol) -> Self {
        Self { secret, protocol }
    }

    pub fn protocol(&self) -> Protocol {
        self.protocol
    }

    fn passphrase(&self) -> Result<&[u8]> {
        match &self.secret {
            Secret::Passphrase(p) => Ok(p),
            Secret::RsaPrivateKey(_) => Err(SealboxError::Config(format!(
                "{:?} needs a passphrase secret, got an RSA private key",
                self.protocol
            ))),
        }
    }

    fn rsa_secret(&self) -> Result<&[u8]> {
        match &self.secret {
            Secret::RsaPrivateKey(k) => Ok(k),
            Secret::Passphrase(_) => Err(SealboxError::Config(
                "RSA needs an RSA private key secret, got a passphrase".into(),
            )),
        }
    }

    /// Encrypt everything `reader` yields under the configured protocol.
    pub fn encrypt<R: Read>(&self, mut reader: R) -> Result<EncryptOutput> {
        let mut plaintext = Vec::new();
        reader.read_to_end(&mut plaintext)?;
        debug!(protocol = ?self.protocol, bytes = plaintext.len(), "encrypting");

        match self.protocol {
            Protocol::Gcm => {
                let (ciphertext, params) = aes_gcm::encrypt(&plaintext)?;
                Ok(EncryptOutput {
                    ciphertext,
                    params: Some(params),
                })
            }
            Protocol::Cfb => Ok(EncryptOutput {
                ciphertext: aes_cfb::encrypt(self.passphrase()?, &plaintext)?,
                params: None,
            }),
            Protocol::Rsa => Ok(EncryptOutput {
                ciphertext: rsa::encrypt(self.rsa_secret()?, &plaintext)?,
                params: None,
            }),
        }
    }

    /// Decrypt everything `reader` yields. GCM requires the parameters the
    /// matching encrypt call returned; the other protocols ignore `params`.
    pub fn decrypt<R: Read>(&self, mut reader: R, params: Option<&GcmParams>) -> Result<Vec<u8>> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        debug!(protocol = ?self.protocol, bytes = data.len(), "decrypting");

        match self.protocol {
            Protocol::Gcm => {
                let params = params.ok_or_else(|| {
                    SealboxError::Config("no GCM decryption parameters given".into())
                })?;
                aes_gcm::decrypt(&data, params)
            }
            Protocol::Cfb => aes_cfb::decrypt(self.passphrase()?, &data),
            Protocol::Rsa => rsa::decrypt(self.rsa_secret()?, &data),
        }
    }

    /// Protect GCM side-channel parameters for storage: format them as the
    /// legacy text form and seal that through the CFB envelope under the
    /// engine passphrase. Unwrapping is a CFB decrypt of the result.
    pub fn wrap_params(&self, params: &GcmParams) -> Result<Vec<u8>> {
        let text = format!(
            "Nonce:\t{}\nCipherKey:\t{}",
            params.nonce, params.cipher_key
        );
        aes_cfb::encrypt(self.passphrase()?, text.as_bytes())
    }
}
