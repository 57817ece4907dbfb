//! Asymmetric (RSA) encryption of arbitrary-length payloads.
//!
//! Not on the request path: callers use it to protect credentials or tokens
//! with a key pair held in configuration.
pub mod block_codec;
pub mod cipher;
pub mod error;
pub mod key_codec;

pub use cipher::{private_decrypt, private_encrypt, public_decrypt, public_encrypt};
pub use error::{CryptoError, KeyKind};
pub use key_codec::{
    DEFAULT_KEY_BITS, KeyPair, decode_private_key, decode_public_key, generate_key_pair,
    key_fingerprint,
};
