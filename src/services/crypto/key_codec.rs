/*
 * Responsibility
 * - RSA key pair generation
 * - base64 text <-> key object conversion
 *   - public key: X.509 SubjectPublicKeyInfo (DER)
 *   - private key: PKCS#8 (DER)
 * - key fingerprint for logging (key bytes themselves are never logged)
 */
use std::fmt;

use base64::{
    Engine as _,
    engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD},
};
use rsa::pkcs8::{DecodePrivateKey, DecodePublicKey, EncodePrivateKey, EncodePublicKey};
use rsa::{RsaPrivateKey, RsaPublicKey};
use serde::Serialize;
use sha2::{Digest, Sha256};

use super::error::{CryptoError, KeyKind};

pub const DEFAULT_KEY_BITS: usize = 1024;
pub const MIN_KEY_BITS: usize = 512;

/// Base64 text form of a generated key pair.
#[derive(Clone, Serialize)]
pub struct KeyPair {
    pub public_key: String,
    pub private_key: String,
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("public_key", &self.public_key)
            .field("private_key", &"[REDACTED]")
            .finish()
    }
}

/// Generate a fresh RSA key pair with a modulus of `bits` bits.
pub fn generate_key_pair(bits: usize) -> Result<KeyPair, CryptoError> {
    if bits < MIN_KEY_BITS {
        return Err(CryptoError::InvalidKeySize { bits });
    }

    let mut rng = rand::thread_rng();
    let private_key = RsaPrivateKey::new(&mut rng, bits)
        .map_err(|e| CryptoError::KeyGeneration(e.to_string()))?;
    let public_key = RsaPublicKey::from(&private_key);

    let public_der = public_key
        .to_public_key_der()
        .map_err(|e| CryptoError::KeyGeneration(e.to_string()))?;
    let private_der = private_key
        .to_pkcs8_der()
        .map_err(|e| CryptoError::KeyGeneration(e.to_string()))?;

    tracing::debug!(
        bits,
        key_fp = %fingerprint(public_der.as_bytes()),
        "generated rsa key pair"
    );

    Ok(KeyPair {
        public_key: STANDARD.encode(public_der.as_bytes()),
        private_key: STANDARD.encode(private_der.as_bytes()),
    })
}

pub fn decode_public_key(text: &str) -> Result<RsaPublicKey, CryptoError> {
    let der =
        decode_base64(text).map_err(|e| CryptoError::key_format(KeyKind::Public, text, e))?;
    RsaPublicKey::from_public_key_der(&der)
        .map_err(|e| CryptoError::key_format(KeyKind::Public, text, e))
}

pub fn decode_private_key(text: &str) -> Result<RsaPrivateKey, CryptoError> {
    let der =
        decode_base64(text).map_err(|e| CryptoError::key_format(KeyKind::Private, text, e))?;
    RsaPrivateKey::from_pkcs8_der(&der)
        .map_err(|e| CryptoError::key_format(KeyKind::Private, text, e))
}

/// SHA-256 fingerprint (base64url, no padding) of a public key given in text form.
pub fn key_fingerprint(public_key_text: &str) -> Result<String, CryptoError> {
    let der = decode_base64(public_key_text)
        .map_err(|e| CryptoError::key_format(KeyKind::Public, public_key_text, e))?;
    // Reject text that is base64 but not a key.
    RsaPublicKey::from_public_key_der(&der)
        .map_err(|e| CryptoError::key_format(KeyKind::Public, public_key_text, e))?;
    Ok(fingerprint(&der))
}

fn fingerprint(der: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(Sha256::digest(der))
}

/// Lenient base64: standard or url-safe alphabet, padding optional,
/// whitespace (e.g. line-wrapped keys) ignored.
pub(crate) fn decode_base64(text: &str) -> Result<Vec<u8>, base64::DecodeError> {
    let normalized: String = text
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .map(|c| match c {
            '+' => '-',
            '/' => '_',
            other => other,
        })
        .collect();

    URL_SAFE_NO_PAD.decode(normalized.trim_end_matches('='))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rsa::traits::PublicKeyParts;

    #[test]
    fn generated_pair_decodes_back() {
        let pair = generate_key_pair(MIN_KEY_BITS).unwrap();

        let public_key = decode_public_key(&pair.public_key).unwrap();
        let private_key = decode_private_key(&pair.private_key).unwrap();

        assert_eq!(public_key.size() * 8, MIN_KEY_BITS);
        assert_eq!(public_key.n(), private_key.n());
    }

    #[test]
    fn undersized_generation_is_rejected() {
        let err = generate_key_pair(256).unwrap_err();
        assert!(matches!(err, CryptoError::InvalidKeySize { bits: 256 }));
    }

    #[test]
    fn public_key_text_is_not_a_private_key() {
        let pair = generate_key_pair(MIN_KEY_BITS).unwrap();

        let err = decode_private_key(&pair.public_key).unwrap_err();
        assert!(matches!(
            err,
            CryptoError::KeyFormat {
                kind: KeyKind::Private,
                ..
            }
        ));
    }

    #[test]
    fn garbage_text_is_a_key_format_error() {
        let err = decode_public_key("not base64 at all!").unwrap_err();
        assert!(matches!(
            err,
            CryptoError::KeyFormat {
                kind: KeyKind::Public,
                ..
            }
        ));

        let err = decode_public_key("aGVsbG8gd29ybGQ=").unwrap_err();
        assert!(matches!(err, CryptoError::KeyFormat { .. }));
    }

    #[test]
    fn public_key_error_names_a_prefix_of_the_input() {
        let text = "MIIBIjANBgkqhkiG9w0BAQEFAAOCAQ8AMIIBCgKCAQEA-broken";
        let err = decode_public_key(text).unwrap_err();

        match &err {
            CryptoError::KeyFormat { input, .. } => {
                assert_eq!(input.as_deref(), Some("MIIBIjANBgkqhkiG9w0BAQEF..."));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(err.to_string().contains("MIIBIjANBgkqhkiG9w0BAQEF..."));

        let err = decode_public_key("short").unwrap_err();
        assert!(matches!(
            err,
            CryptoError::KeyFormat { input: Some(ref i), .. } if i == "short"
        ));
    }

    #[test]
    fn private_key_error_never_echoes_input() {
        let text = "c2VjcmV0LXByaXZhdGUta2V5LW1hdGVyaWFs";
        let err = decode_private_key(text).unwrap_err();

        assert!(matches!(
            err,
            CryptoError::KeyFormat {
                kind: KeyKind::Private,
                input: None,
                ..
            }
        ));
        assert!(!err.to_string().contains("c2VjcmV0"));
        assert!(err.to_string().contains("redacted"));
    }

    #[test]
    fn base64_accepts_both_alphabets_and_optional_padding() {
        let bytes = vec![0xfb, 0xff, 0xbf, 0x00, 0x10];
        let standard = STANDARD.encode(&bytes);
        let url_safe = URL_SAFE_NO_PAD.encode(&bytes);

        assert_eq!(decode_base64(&standard).unwrap(), bytes);
        assert_eq!(decode_base64(&url_safe).unwrap(), bytes);
        assert_eq!(decode_base64(&format!("{}\n", standard)).unwrap(), bytes);
    }

    #[test]
    fn debug_redacts_private_key() {
        let pair = KeyPair {
            public_key: "pub".into(),
            private_key: "very-secret".into(),
        };
        let printed = format!("{:?}", pair);
        assert!(!printed.contains("very-secret"));
        assert!(printed.contains("[REDACTED]"));
    }

    #[test]
    fn fingerprint_is_stable_for_same_key() {
        let pair = generate_key_pair(MIN_KEY_BITS).unwrap();
        let a = key_fingerprint(&pair.public_key).unwrap();
        let b = key_fingerprint(&pair.public_key).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 43);
    }
}
