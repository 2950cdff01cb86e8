//! On-disk envelope layout
//!
//! An encrypted file is the 16-byte IV followed by the CBC ciphertext:
//!
//! ```text
//! +----------------+---------------------------------------+
//! | IV (16 bytes)  | ciphertext (n * 16 bytes, n >= 1)     |
//! +----------------+---------------------------------------+
//! ```
//!
//! This module only splits and joins bytes. It knows nothing about AES.

use std::io::{ErrorKind, Read, Write};

use crate::error::{CryptrError, CryptrResult};

/// Length of the CBC initialization vector in bytes
pub const IV_LEN: usize = 16;

/// AES block length in bytes
pub const BLOCK_LEN: usize = 16;

/// A CBC initialization vector
pub type Iv = [u8; IV_LEN];

/// An encrypted file held in memory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    /// Random IV, stored in the clear
    pub iv: Iv,
    /// Padded CBC ciphertext
    pub ciphertext: Vec<u8>,
}

impl Envelope {
    pub fn new(iv: Iv, ciphertext: Vec<u8>) -> Self {
        Self { iv, ciphertext }
    }

    /// Serialize as `IV ‖ ciphertext`
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.encoded_len());
        out.extend_from_slice(&self.iv);
        out.extend_from_slice(&self.ciphertext);
        out
    }

    /// Split raw bytes at the IV boundary
    pub fn decode(bytes: &[u8]) -> CryptrResult<Self> {
        if bytes.len() < IV_LEN {
            return Err(short_header(bytes.len()));
        }
        let (iv, ciphertext) = bytes.split_at(IV_LEN);
        let mut iv_bytes = [0u8; IV_LEN];
        iv_bytes.copy_from_slice(iv);
        Ok(Self {
            iv: iv_bytes,
            ciphertext: ciphertext.to_vec(),
        })
    }

    /// Total encoded length
    pub fn encoded_len(&self) -> usize {
        IV_LEN + self.ciphertext.len()
    }
}

/// Ciphertext length produced for a plaintext of `plaintext_len` bytes
///
/// PKCS#7 always adds between 1 and 16 bytes, so an empty plaintext still
/// yields one full block.
pub fn ciphertext_len(plaintext_len: usize) -> usize {
    (plaintext_len / BLOCK_LEN + 1) * BLOCK_LEN
}

/// Write the envelope header (the IV) to a stream
pub fn write_header<W: Write + ?Sized>(writer: &mut W, iv: &Iv) -> CryptrResult<()> {
    writer
        .write_all(iv)
        .map_err(|e| CryptrError::Io(format!("Failed to write IV: {}", e)))
}

/// Read the envelope header (the IV) from a stream
///
/// Short reads are retried until the IV is complete or the stream ends.
pub fn read_header<R: Read + ?Sized>(reader: &mut R) -> CryptrResult<Iv> {
    let mut iv = [0u8; IV_LEN];
    let mut filled = 0;
    while filled < IV_LEN {
        match reader.read(&mut iv[filled..]) {
            Ok(0) => return Err(short_header(filled)),
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(CryptrError::Io(format!("Failed to read IV: {}", e))),
        }
    }
    Ok(iv)
}

fn short_header(found: usize) -> CryptrError {
    CryptrError::MalformedEnvelope(format!(
        "expected at least {} bytes of IV, found {}",
        IV_LEN, found
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Reader that hands out one byte per call
    struct Trickle<'a>(&'a [u8]);

    impl Read for Trickle<'_> {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            if self.0.is_empty() || buf.is_empty() {
                return Ok(0);
            }
            buf[0] = self.0[0];
            self.0 = &self.0[1..];
            Ok(1)
        }
    }

    #[test]
    fn test_encode_concatenates() {
        let envelope = Envelope::new([1u8; IV_LEN], vec![2u8; 32]);
        let bytes = envelope.encode();
        assert_eq!(bytes.len(), 48);
        assert_eq!(&bytes[..16], &[1u8; 16]);
        assert_eq!(&bytes[16..], &[2u8; 32][..]);
        assert_eq!(envelope.encoded_len(), 48);
    }

    #[test]
    fn test_decode_splits_at_iv() {
        let mut bytes = vec![9u8; IV_LEN];
        bytes.extend_from_slice(b"ciphertext bytes");
        let envelope = Envelope::decode(&bytes).unwrap();
        assert_eq!(envelope.iv, [9u8; IV_LEN]);
        assert_eq!(envelope.ciphertext, b"ciphertext bytes");
        assert_eq!(envelope.encode(), bytes);
    }

    #[test]
    fn test_decode_header_only() {
        let envelope = Envelope::decode(&[3u8; IV_LEN]).unwrap();
        assert!(envelope.ciphertext.is_empty());
    }

    #[test]
    fn test_decode_too_short() {
        for len in 0..IV_LEN {
            let err = Envelope::decode(&vec![0u8; len]).unwrap_err();
            assert!(matches!(err, CryptrError::MalformedEnvelope(_)));
        }
    }

    #[test]
    fn test_ciphertext_len() {
        assert_eq!(ciphertext_len(0), 16);
        assert_eq!(ciphertext_len(5), 16);
        assert_eq!(ciphertext_len(15), 16);
        assert_eq!(ciphertext_len(16), 32);
        assert_eq!(ciphertext_len(1000), 1008);
    }

    #[test]
    fn test_header_stream_round_trip() {
        let iv = [0x5Au8; IV_LEN];
        let mut out = Vec::new();
        write_header(&mut out, &iv).unwrap();
        out.extend_from_slice(b"rest");

        let mut reader = out.as_slice();
        assert_eq!(read_header(&mut reader).unwrap(), iv);
        assert_eq!(reader, b"rest");
    }

    #[test]
    fn test_read_header_survives_short_reads() {
        let data: Vec<u8> = (0..20).collect();
        let mut reader = Trickle(&data);
        let iv = read_header(&mut reader).unwrap();
        assert_eq!(&iv[..], &data[..16]);
    }

    #[test]
    fn test_read_header_early_eof() {
        let mut reader = Trickle(&[1, 2, 3]);
        let err = read_header(&mut reader).unwrap_err();
        assert!(matches!(err, CryptrError::MalformedEnvelope(_)));
        assert!(err.to_string().contains("found 3"));
    }
}
