pub mod aes_cfb;
pub mod aes_gcm;
pub mod rsa;

/// AES-256 key length in bytes.
pub const KEY_LEN: usize = 32;

/// GCM nonce length. 24 bytes rather than the AEAD default of 12; the
/// reference deployment fixes `nonceSize = 24` and its ciphertexts only
/// decrypt when both sides use the same size.
pub const GCM_NONCE_LEN: usize = 24;

/// CFB initialization vectors are one AES block.
pub const CFB_IV_LEN: usize = 16;

/// Salt appended to CFB envelopes. Fixed at 32 bytes to match the reference
/// deployment (`keylen = 32, saltlen = 32`); a different constant makes
/// existing ciphertexts undecryptable.
pub const CFB_SALT_LEN: usize = 32;

/// PBKDF2-HMAC-SHA512 iteration count for CFB key derivation.
pub const PBKDF2_ROUNDS: u32 = 4096;
