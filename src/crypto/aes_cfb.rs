use aes::Aes256;
use cfb_mode::cipher::{AsyncStreamCipher, KeyIvInit};
use pbkdf2::pbkdf2_hmac;
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::Sha512;
use zeroize::Zeroizing;

use super::{CFB_IV_LEN, CFB_SALT_LEN, KEY_LEN, PBKDF2_ROUNDS};
use crate::error::{Result, SealboxError};

type Aes256CfbEnc = cfb_mode::Encryptor<Aes256>;
type Aes256CfbDec = cfb_mode::Decryptor<Aes256>;

/// Derive a 32-byte AES key from a passphrase with PBKDF2-HMAC-SHA512.
fn derive_key(passphrase: &[u8], salt: &[u8]) -> Zeroizing<[u8; KEY_LEN]> {
    let mut key = Zeroizing::new([0u8; KEY_LEN]);
    pbkdf2_hmac::<Sha512>(passphrase, salt, PBKDF2_ROUNDS, key.as_mut());
    key
}

/// Encrypt `plaintext` into the self-describing envelope
/// `[16-byte IV][ciphertext][32-byte salt]`.
///
/// The trailing salt lets decryption re-derive the key from the passphrase
/// alone, so this mode needs no side-channel parameters.
pub fn encrypt(passphrase: &[u8], plaintext: &[u8]) -> Result<Vec<u8>> {
    let mut salt = [0u8; CFB_SALT_LEN];
    OsRng.fill_bytes(&mut salt);
    let key = derive_key(passphrase, &salt);

    let mut iv = [0u8; CFB_IV_LEN];
    OsRng.fill_bytes(&mut iv);

    let mut out = Vec::with_capacity(CFB_IV_LEN + plaintext.len() + CFB_SALT_LEN);
    out.extend_from_slice(&iv);
    out.extend_from_slice(plaintext);
    Aes256CfbEnc::new_from_slices(key.as_ref(), &iv)
        .map_err(|_| SealboxError::CryptoFailure)?
        .encrypt(&mut out[CFB_IV_LEN..]);
    out.extend_from_slice(&salt);
    Ok(out)
}

/// Decrypt an envelope produced by [`encrypt`] with the same passphrase.
pub fn decrypt(passphrase: &[u8], data: &[u8]) -> Result<Vec<u8>> {
    if data.len() < CFB_IV_LEN + CFB_SALT_LEN {
        return Err(SealboxError::MalformedInput(format!(
            "envelope is {} bytes, need at least {}",
            data.len(),
            CFB_IV_LEN + CFB_SALT_LEN
        )));
    }
    let (rest, salt) = data.split_at(data.len() - CFB_SALT_LEN);
    let (iv, ciphertext) = rest.split_at(CFB_IV_LEN);
    let key = derive_key(passphrase, salt);

    let mut plaintext = ciphertext.to_vec();
    Aes256CfbDec::new_from_slices(key.as_ref(), iv)
        .map_err(|_| SealboxError::CryptoFailure)?
        .decrypt(&mut plaintext);
    Ok(plaintext)
}
