use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use rand::rngs::OsRng;
use rsa::pkcs1::EncodeRsaPrivateKey;
use rsa::RsaPrivateKey;
use sealbox::crypto::{CFB_IV_LEN, CFB_SALT_LEN};
use sealbox::{EncryptionEngine, GcmParams, Protocol, SealboxError, Secret};
use std::sync::OnceLock;

fn passphrase_engine(protocol: Protocol) -> EncryptionEngine {
    EncryptionEngine::new(Secret::Passphrase(b"correct horse".to_vec()), protocol)
}

/// One shared 2048-bit RSA key; generation is too slow to repeat per test.
fn rsa_engine() -> EncryptionEngine {
    static SECRET: OnceLock<Vec<u8>> = OnceLock::new();
    let secret = SECRET.get_or_init(|| {
        let key = RsaPrivateKey::new(&mut OsRng, 2048).unwrap();
        BASE64
            .encode(key.to_pkcs1_der().unwrap().as_bytes())
            .into_bytes()
    });
    EncryptionEngine::new(Secret::RsaPrivateKey(secret.clone()), Protocol::Rsa)
}

#[test]
fn gcm_roundtrip_across_sizes() {
    let engine = passphrase_engine(Protocol::Gcm);
    for plaintext in [Vec::new(), b"hello".to_vec(), vec![0xA7u8; 64 * 1024]] {
        let out = engine.encrypt(plaintext.as_slice()).unwrap();
        let params = out.params.expect("GCM encrypt must return parameters");
        let decrypted = engine
            .decrypt(out.ciphertext.as_slice(), Some(&params))
            .unwrap();
        assert_eq!(decrypted, plaintext);
    }
}

#[test]
fn cfb_roundtrip_across_sizes() {
    let engine = passphrase_engine(Protocol::Cfb);
    for plaintext in [Vec::new(), b"hello".to_vec(), vec![0xA7u8; 64 * 1024]] {
        let out = engine.encrypt(plaintext.as_slice()).unwrap();
        assert!(out.params.is_none());
        let decrypted = engine.decrypt(out.ciphertext.as_slice(), None).unwrap();
        assert_eq!(decrypted, plaintext);
    }
}

#[test]
fn rsa_roundtrip() {
    let engine = rsa_engine();
    for plaintext in [Vec::new(), b"hello".to_vec(), vec![0xA7u8; 100]] {
        let out = engine.encrypt(plaintext.as_slice()).unwrap();
        let decrypted = engine.decrypt(out.ciphertext.as_slice(), None).unwrap();
        assert_eq!(decrypted, plaintext);
    }
}

#[test]
fn cfb_hello_world_scenario() {
    let engine = passphrase_engine(Protocol::Cfb);
    let out = engine.encrypt(&b"hello world"[..]).unwrap();
    let decrypted = engine.decrypt(out.ciphertext.as_slice(), None).unwrap();
    assert_eq!(decrypted, b"hello world");
}

#[test]
fn cfb_envelope_length_is_iv_plus_payload_plus_salt() {
    let engine = passphrase_engine(Protocol::Cfb);
    let plaintext = b"some payload bytes";
    let out = engine.encrypt(&plaintext[..]).unwrap();
    assert_eq!(
        out.ciphertext.len(),
        CFB_IV_LEN + plaintext.len() + CFB_SALT_LEN
    );
}

#[test]
fn cfb_truncated_below_envelope_is_malformed_input() {
    let engine = passphrase_engine(Protocol::Cfb);
    let out = engine.encrypt(&b"hello world"[..]).unwrap();
    let truncated = &out.ciphertext[..CFB_IV_LEN + CFB_SALT_LEN - 1];
    let result = engine.decrypt(truncated, None);
    assert!(matches!(
        result.unwrap_err(),
        SealboxError::MalformedInput(_)
    ));
}

#[test]
fn gcm_every_bit_flip_fails_decrypt() {
    let engine = passphrase_engine(Protocol::Gcm);
    let out = engine.encrypt(&b"tamper me"[..]).unwrap();
    let params = out.params.unwrap();
    for byte in 0..out.ciphertext.len() {
        for bit in 0..8 {
            let mut corrupted = out.ciphertext.clone();
            corrupted[byte] ^= 1 << bit;
            let result = engine.decrypt(corrupted.as_slice(), Some(&params));
            assert!(
                matches!(result, Err(SealboxError::CryptoFailure)),
                "flip of bit {bit} in byte {byte} was not detected"
            );
        }
    }
}

#[test]
fn gcm_consecutive_encrypts_share_nothing() {
    let engine = passphrase_engine(Protocol::Gcm);
    let out1 = engine.encrypt(&b"identical plaintext"[..]).unwrap();
    let out2 = engine.encrypt(&b"identical plaintext"[..]).unwrap();
    let (p1, p2) = (out1.params.unwrap(), out2.params.unwrap());
    assert_ne!(out1.ciphertext, out2.ciphertext);
    assert_ne!(p1.cipher_key, p2.cipher_key);
    assert_ne!(p1.nonce, p2.nonce);
}

#[test]
fn rsa_one_byte_over_modulus_is_input_too_large() {
    let engine = rsa_engine();
    let result = engine.encrypt(vec![0u8; 257].as_slice());
    match result.unwrap_err() {
        SealboxError::InputTooLarge { size, max } => {
            assert_eq!(size, 257);
            assert_eq!(max, 256);
        }
        other => panic!("expected InputTooLarge, got {other:?}"),
    }
}

#[test]
fn wrapped_params_unwrap_to_the_legacy_text_form() {
    let engine = passphrase_engine(Protocol::Gcm);
    let out = engine.encrypt(&b"payload"[..]).unwrap();
    let params = out.params.unwrap();

    let wrapped = engine.wrap_params(&params).unwrap();
    // The wrapper is a CFB envelope under the same passphrase.
    let cfb = passphrase_engine(Protocol::Cfb);
    let text = cfb.decrypt(wrapped.as_slice(), None).unwrap();
    assert_eq!(
        String::from_utf8(text).unwrap(),
        format!("Nonce:\t{}\nCipherKey:\t{}", params.nonce, params.cipher_key)
    );
}

#[test]
fn gcm_params_survive_serialization() {
    let engine = passphrase_engine(Protocol::Gcm);
    let out = engine.encrypt(&b"persist me"[..]).unwrap();
    let params = out.params.unwrap();

    let json = serde_json::to_string(&params).unwrap();
    let restored: GcmParams = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, params);

    let decrypted = engine
        .decrypt(out.ciphertext.as_slice(), Some(&restored))
        .unwrap();
    assert_eq!(decrypted, b"persist me");
}

#[test]
fn engines_are_independent() {
    // Parameters from one engine's encrypt decrypt fine on another engine
    // with the same configuration; there is no hidden per-engine state.
    let a = passphrase_engine(Protocol::Gcm);
    let b = passphrase_engine(Protocol::Gcm);
    let out = a.encrypt(&b"no hidden state"[..]).unwrap();
    let params = out.params.unwrap();
    let decrypted = b.decrypt(out.ciphertext.as_slice(), Some(&params)).unwrap();
    assert_eq!(decrypted, b"no hidden state");
}
