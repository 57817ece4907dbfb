use std::fmt;

use thiserror::Error;

/// Which half of a key pair a key-format failure refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyKind {
    Public,
    Private,
}

impl fmt::Display for KeyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyKind::Public => write!(f, "public"),
            KeyKind::Private => write!(f, "private"),
        }
    }
}

/// Errors raised by the key codec, the block codec and the RSA operations
/// built on top of them.
///
/// Variants never carry key bytes. `Encrypt`/`Decrypt` carry the caller's
/// input (plaintext or ciphertext) so a failure can be diagnosed from logs.
#[derive(Debug, Error)]
pub enum CryptoError {
    /// `input` is a short prefix of the offending text for public keys.
    /// Private key text is never copied into the error.
    #[error("invalid {kind} key [{}]: {reason}", .input.as_deref().unwrap_or("redacted"))]
    KeyFormat {
        kind: KeyKind,
        input: Option<String>,
        reason: String,
    },

    #[error("unsupported key size: {bits} bits")]
    InvalidKeySize { bits: usize },

    #[error("key generation failed: {0}")]
    KeyGeneration(String),

    #[error("cipher failed for block at offset {offset} (threshold {max_block} bytes): {reason}")]
    Codec {
        offset: usize,
        max_block: usize,
        reason: String,
    },

    #[error("invalid encoding: {0}")]
    Encoding(String),

    #[error("failed to encrypt [{input}]")]
    Encrypt {
        input: String,
        #[source]
        source: Box<CryptoError>,
    },

    #[error("failed to decrypt [{input}]")]
    Decrypt {
        input: String,
        #[source]
        source: Box<CryptoError>,
    },
}

impl CryptoError {
    pub(crate) fn key_format(kind: KeyKind, text: &str, reason: impl fmt::Display) -> Self {
        let input = match kind {
            KeyKind::Public => Some(key_text_prefix(text)),
            KeyKind::Private => None,
        };
        Self::KeyFormat {
            kind,
            input,
            reason: reason.to_string(),
        }
    }

    pub(crate) fn encrypt(input: &str, source: CryptoError) -> Self {
        Self::Encrypt {
            input: input.to_string(),
            source: Box::new(source),
        }
    }

    pub(crate) fn decrypt(input: &str, source: CryptoError) -> Self {
        Self::Decrypt {
            input: input.to_string(),
            source: Box::new(source),
        }
    }
}

const KEY_PREFIX_CHARS: usize = 24;

fn key_text_prefix(text: &str) -> String {
    let trimmed = text.trim();
    let mut prefix: String = trimmed.chars().take(KEY_PREFIX_CHARS).collect();
    if trimmed.chars().count() > KEY_PREFIX_CHARS {
        prefix.push_str("...");
    }
    prefix
}
