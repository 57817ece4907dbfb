//! Public-key / private-key encryption of UTF-8 text.
//!
//! - `public_encrypt` -> `private_decrypt`: confidentiality, only the private
//!   key holder can read the payload.
//! - `private_encrypt` -> `public_decrypt`: the payload can be read by anyone
//!   with the public key but only produced by the private key holder.
//!
//! Ciphertext is base64url without padding. Every failure is wrapped into
//! [`CryptoError::Encrypt`] / [`CryptoError::Decrypt`] carrying the input.

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use rsa::traits::PublicKeyParts;
use rsa::{BigUint, Pkcs1v15Encrypt, Pkcs1v15Sign, RsaPrivateKey, RsaPublicKey};

use super::block_codec::{CipherMode, split_codec};
use super::error::CryptoError;
use super::key_codec::{decode_base64, decode_private_key, decode_public_key};

pub fn public_encrypt(plaintext: &str, public_key_text: &str) -> Result<String, CryptoError> {
    decode_public_key(public_key_text)
        .and_then(|key| encrypt_with_public_key(plaintext.as_bytes(), &key))
        .map(|bytes| URL_SAFE_NO_PAD.encode(bytes))
        .map_err(|e| CryptoError::encrypt(plaintext, e))
}

pub fn public_decrypt(ciphertext: &str, public_key_text: &str) -> Result<String, CryptoError> {
    decode_public_key(public_key_text)
        .and_then(|key| {
            let data = decode_ciphertext(ciphertext)?;
            decrypt_with_public_key(&data, &key)
        })
        .and_then(into_utf8)
        .map_err(|e| CryptoError::decrypt(ciphertext, e))
}

pub fn private_encrypt(plaintext: &str, private_key_text: &str) -> Result<String, CryptoError> {
    decode_private_key(private_key_text)
        .and_then(|key| encrypt_with_private_key(plaintext.as_bytes(), &key))
        .map(|bytes| URL_SAFE_NO_PAD.encode(bytes))
        .map_err(|e| CryptoError::encrypt(plaintext, e))
}

pub fn private_decrypt(ciphertext: &str, private_key_text: &str) -> Result<String, CryptoError> {
    decode_private_key(private_key_text)
        .and_then(|key| {
            let data = decode_ciphertext(ciphertext)?;
            decrypt_with_private_key(&data, &key)
        })
        .and_then(into_utf8)
        .map_err(|e| CryptoError::decrypt(ciphertext, e))
}

/// PKCS#1 v1.5 type 2 (random padding) per chunk.
pub fn encrypt_with_public_key(data: &[u8], key: &RsaPublicKey) -> Result<Vec<u8>, CryptoError> {
    let mut rng = rand::thread_rng();
    split_codec(data, CipherMode::Encrypt, key_bits(key), |chunk| {
        key.encrypt(&mut rng, Pkcs1v15Encrypt, chunk)
    })
}

pub fn decrypt_with_private_key(data: &[u8], key: &RsaPrivateKey) -> Result<Vec<u8>, CryptoError> {
    split_codec(data, CipherMode::Decrypt, key_bits(key), |chunk| {
        key.decrypt(Pkcs1v15Encrypt, chunk)
    })
}

/// PKCS#1 v1.5 type 1 padding followed by the raw private-key operation.
pub fn encrypt_with_private_key(data: &[u8], key: &RsaPrivateKey) -> Result<Vec<u8>, CryptoError> {
    split_codec(data, CipherMode::Encrypt, key_bits(key), |chunk| {
        key.sign(Pkcs1v15Sign::new_unprefixed(), chunk)
    })
}

pub fn decrypt_with_public_key(data: &[u8], key: &RsaPublicKey) -> Result<Vec<u8>, CryptoError> {
    split_codec(data, CipherMode::Decrypt, key_bits(key), |chunk| {
        recover_type1_block(chunk, key)
    })
}

fn key_bits(key: &impl PublicKeyParts) -> usize {
    key.size() * 8
}

// m = c^e mod n, then strip `00 01 FF..FF 00` from the left-padded block.
fn recover_type1_block(block: &[u8], key: &RsaPublicKey) -> Result<Vec<u8>, rsa::Error> {
    let k = key.size();
    if block.len() != k {
        return Err(rsa::Error::Decryption);
    }

    let c = BigUint::from_bytes_be(block);
    if &c >= key.n() {
        return Err(rsa::Error::Decryption);
    }

    let m = c.modpow(key.e(), key.n()).to_bytes_be();
    if m.len() > k {
        return Err(rsa::Error::Decryption);
    }
    let mut em = vec![0u8; k - m.len()];
    em.extend_from_slice(&m);

    strip_type1_padding(&em).ok_or(rsa::Error::Decryption)
}

fn strip_type1_padding(em: &[u8]) -> Option<Vec<u8>> {
    let body = em.strip_prefix(&[0x00, 0x01])?;
    let separator = body.iter().position(|&b| b != 0xff)?;
    // At least 8 bytes of 0xFF, then a zero separator.
    if separator < 8 || body.get(separator) != Some(&0x00) {
        return None;
    }
    body.get(separator + 1..).map(<[u8]>::to_vec)
}

fn decode_ciphertext(ciphertext: &str) -> Result<Vec<u8>, CryptoError> {
    decode_base64(ciphertext).map_err(|e| CryptoError::Encoding(e.to_string()))
}

fn into_utf8(bytes: Vec<u8>) -> Result<String, CryptoError> {
    String::from_utf8(bytes).map_err(|e| CryptoError::Encoding(e.to_string()))
}
