//! Chunked encrypt/decrypt around a single-block RSA primitive.
//!
//! An RSA operation only accepts one modulus-sized block per call. Payloads
//! of arbitrary length are split into consecutive chunks, each chunk is run
//! through the primitive in order, and the outputs are concatenated.
//!
//! - Decrypt: chunks of `key_bits / 8` bytes (one ciphertext block each).
//! - Encrypt: chunks of `key_bits / 8 - 11` bytes; PKCS#1 v1.5 padding needs
//!   11 bytes of every block.

use super::error::CryptoError;

/// Bytes of every block consumed by PKCS#1 v1.5 padding.
pub const PKCS1_PADDING_OVERHEAD: usize = 11;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CipherMode {
    Encrypt,
    Decrypt,
}

impl CipherMode {
    /// Maximum input chunk size for this mode and key size.
    ///
    /// Returns `None` when the key is too small to carry any payload.
    pub fn max_block(self, key_bits: usize) -> Option<usize> {
        let block = key_bits / 8;
        let max = match self {
            CipherMode::Decrypt => block,
            CipherMode::Encrypt => block.checked_sub(PKCS1_PADDING_OVERHEAD)?,
        };
        (max > 0).then_some(max)
    }
}

/// Run `cipher` over `data` chunk by chunk.
///
/// Either every chunk succeeds and the concatenated output is returned, or
/// the first failing chunk aborts the whole operation. Empty input returns
/// empty output without calling `cipher`.
pub fn split_codec<F, E>(
    data: &[u8],
    mode: CipherMode,
    key_bits: usize,
    mut cipher: F,
) -> Result<Vec<u8>, CryptoError>
where
    F: FnMut(&[u8]) -> Result<Vec<u8>, E>,
    E: std::fmt::Display,
{
    let max_block = mode
        .max_block(key_bits)
        .ok_or(CryptoError::InvalidKeySize { bits: key_bits })?;

    let mut out = Vec::with_capacity(output_capacity(data.len(), mode, key_bits, max_block));

    for (index, chunk) in data.chunks(max_block).enumerate() {
        let block = cipher(chunk).map_err(|e| CryptoError::Codec {
            offset: index * max_block,
            max_block,
            reason: e.to_string(),
        })?;
        out.extend_from_slice(&block);
    }

    Ok(out)
}

fn output_capacity(len: usize, mode: CipherMode, key_bits: usize, max_block: usize) -> usize {
    match mode {
        CipherMode::Encrypt => len.div_ceil(max_block) * (key_bits / 8),
        CipherMode::Decrypt => len,
    }
}
