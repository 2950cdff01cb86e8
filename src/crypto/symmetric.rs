//! Streaming AES-128-CBC with PKCS#7 padding
//!
//! Input is consumed in fixed-size chunks so memory stays bounded by the
//! chunk size, not the file size. Whole blocks are chained through the cipher
//! as they arrive and only the trailing partial block is carried between
//! chunks, so the output does not depend on the chunk size.
//!
//! Decryption always holds back the last ciphertext block until end of
//! stream. The padding check runs on that block before its plaintext is
//! emitted.

use std::io::{ErrorKind, Read, Write};

use aes::Aes128;
use cbc::cipher::block_padding::Pkcs7;
use cbc::cipher::generic_array::GenericArray;
use cbc::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use rand::rngs::OsRng;
use zeroize::Zeroize;

use crate::error::{CryptrError, CryptrResult};

use super::envelope::{self, ciphertext_len, Envelope, Iv, BLOCK_LEN, IV_LEN};
use super::keygen::fill_random;
use super::keys::SymmetricKey;

type Aes128CbcEnc = cbc::Encryptor<Aes128>;
type Aes128CbcDec = cbc::Decryptor<Aes128>;

/// Default streaming buffer size in bytes
pub const DEFAULT_CHUNK_SIZE: usize = 1024;

/// Largest accepted streaming buffer size (16 MiB)
pub const MAX_CHUNK_SIZE: usize = 16 * 1024 * 1024;

/// Encrypt a plaintext stream into an `IV ‖ ciphertext` stream
///
/// A fresh random IV is drawn for every call. Returns the number of bytes
/// written, header included.
pub fn encrypt_stream<R: Read, W: Write>(
    reader: R,
    writer: W,
    key: &SymmetricKey,
    chunk_size: usize,
) -> CryptrResult<u64> {
    let iv = random_iv()?;
    encrypt_stream_with_iv(reader, writer, key, &iv, chunk_size)
}

/// Encrypt with a caller-chosen IV. Only fixed-vector tests should need this.
pub(crate) fn encrypt_stream_with_iv<R: Read, W: Write>(
    mut reader: R,
    mut writer: W,
    key: &SymmetricKey,
    iv: &Iv,
    chunk_size: usize,
) -> CryptrResult<u64> {
    check_chunk_size(chunk_size)?;
    let mut cipher = Aes128CbcEnc::new(key.as_bytes().into(), iv.into());

    envelope::write_header(&mut writer, iv)?;
    let mut written = IV_LEN as u64;

    // buf[..pending] holds plaintext not yet encrypted; pending < BLOCK_LEN
    // between iterations, so chunk_size + BLOCK_LEN always fits.
    let mut buf = vec![0u8; chunk_size + BLOCK_LEN];
    let mut pending = 0;

    let result = loop {
        let n = match read_chunk(&mut reader, &mut buf[pending..pending + chunk_size]) {
            Ok(0) => break Ok(()),
            Ok(n) => n,
            Err(e) => break Err(e),
        };
        pending += n;

        let full = pending - pending % BLOCK_LEN;
        for block in buf[..full].chunks_exact_mut(BLOCK_LEN) {
            cipher.encrypt_block_mut(GenericArray::from_mut_slice(block));
        }
        if let Err(e) = write_chunk(&mut writer, &buf[..full], "ciphertext") {
            break Err(e);
        }
        written += full as u64;

        buf.copy_within(full..pending, 0);
        pending -= full;
    };

    let tail = result.map(|()| cipher.encrypt_padded_vec_mut::<Pkcs7>(&buf[..pending]));
    buf.zeroize();
    let tail = tail?;

    write_chunk(&mut writer, &tail, "ciphertext")?;
    written += tail.len() as u64;
    flush(&mut writer)?;

    Ok(written)
}

/// Decrypt an `IV ‖ ciphertext` stream into plaintext
///
/// Returns the number of plaintext bytes written. On error the writer may
/// already hold some plaintext; callers must discard it.
pub fn decrypt_stream<R: Read, W: Write>(
    mut reader: R,
    mut writer: W,
    key: &SymmetricKey,
    chunk_size: usize,
) -> CryptrResult<u64> {
    check_chunk_size(chunk_size)?;
    let iv = envelope::read_header(&mut reader)?;
    let mut cipher = Aes128CbcDec::new(key.as_bytes().into(), (&iv).into());

    let mut buf = vec![0u8; chunk_size + BLOCK_LEN];
    let mut pending = 0;
    let mut ciphertext_total = 0u64;
    let mut written = 0u64;

    let result = loop {
        let n = match read_chunk(&mut reader, &mut buf[pending..pending + chunk_size]) {
            Ok(0) => break Ok(()),
            Ok(n) => n,
            Err(e) => break Err(e),
        };
        pending += n;
        ciphertext_total += n as u64;

        // Keep the trailing partial block, or the last whole block if aligned
        let keep = match pending % BLOCK_LEN {
            0 => BLOCK_LEN,
            partial => partial,
        };
        let release = pending - keep;
        for block in buf[..release].chunks_exact_mut(BLOCK_LEN) {
            cipher.decrypt_block_mut(GenericArray::from_mut_slice(block));
        }
        if let Err(e) = write_chunk(&mut writer, &buf[..release], "plaintext") {
            break Err(e);
        }
        written += release as u64;

        buf.copy_within(release..pending, 0);
        pending = keep;
    };

    let tail = result.and_then(|()| {
        if ciphertext_total == 0 {
            return Err(CryptrError::MalformedEnvelope(
                "no ciphertext after the IV".to_string(),
            ));
        }
        if pending != BLOCK_LEN {
            return Err(CryptrError::MalformedEnvelope(format!(
                "ciphertext length {} is not a multiple of {}",
                ciphertext_total, BLOCK_LEN
            )));
        }
        cipher
            .decrypt_padded_vec_mut::<Pkcs7>(&buf[..BLOCK_LEN])
            .map_err(|_| CryptrError::PaddingValidation)
    });
    buf.zeroize();
    let mut tail = tail?;

    let result = write_chunk(&mut writer, &tail, "plaintext").and_then(|()| flush(&mut writer));
    written += tail.len() as u64;
    tail.zeroize();
    result?;

    Ok(written)
}

/// Encrypt an in-memory plaintext
pub fn encrypt(plaintext: &[u8], key: &SymmetricKey) -> CryptrResult<Envelope> {
    let mut out = Vec::with_capacity(IV_LEN + ciphertext_len(plaintext.len()));
    encrypt_stream(plaintext, &mut out, key, DEFAULT_CHUNK_SIZE)?;
    Envelope::decode(&out)
}

/// Decrypt an in-memory envelope
pub fn decrypt(envelope: &Envelope, key: &SymmetricKey) -> CryptrResult<Vec<u8>> {
    let encoded = envelope.encode();
    let mut out = Vec::with_capacity(envelope.ciphertext.len());
    match decrypt_stream(encoded.as_slice(), &mut out, key, DEFAULT_CHUNK_SIZE) {
        Ok(_) => Ok(out),
        Err(e) => {
            out.zeroize();
            Err(e)
        }
    }
}

fn random_iv() -> CryptrResult<Iv> {
    let mut iv = [0u8; IV_LEN];
    fill_random(&mut OsRng, &mut iv)?;
    Ok(iv)
}

fn check_chunk_size(chunk_size: usize) -> CryptrResult<()> {
    if chunk_size == 0 {
        return Err(CryptrError::Config(
            "chunk size must be greater than zero".to_string(),
        ));
    }
    if chunk_size > MAX_CHUNK_SIZE {
        return Err(CryptrError::Config(format!(
            "chunk size {} exceeds the maximum of {} bytes",
            chunk_size, MAX_CHUNK_SIZE
        )));
    }
    Ok(())
}

fn read_chunk<R: Read + ?Sized>(reader: &mut R, buf: &mut [u8]) -> CryptrResult<usize> {
    loop {
        match reader.read(buf) {
            Ok(n) => return Ok(n),
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(CryptrError::Io(format!("Failed to read input: {}", e))),
        }
    }
}

fn write_chunk<W: Write + ?Sized>(writer: &mut W, data: &[u8], what: &str) -> CryptrResult<()> {
    writer
        .write_all(data)
        .map_err(|e| CryptrError::Io(format!("Failed to write {}: {}", what, e)))
}

fn flush<W: Write + ?Sized>(writer: &mut W) -> CryptrResult<()> {
    writer
        .flush()
        .map_err(|e| CryptrError::Io(format!("Failed to flush output: {}", e)))
}
