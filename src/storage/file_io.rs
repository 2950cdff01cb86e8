//! File I/O utilities with atomic writes
//!
//! Outputs are written to a uniquely named temporary file next to the
//! destination and renamed into place only once the whole operation has
//! succeeded, so a failed decrypt or unwrap never leaves a partial file there.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use tempfile::Builder;
use zeroize::Zeroize;

use crate::crypto::{PrivateKey, PublicKey, SymmetricKey, WrappedKey};
use crate::error::{CryptrError, CryptrResult};

/// Who may read a file written by this module
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    /// Default permissions
    Normal,
    /// Owner read/write only on Unix (secret key files)
    Secret,
}

/// Open a file for buffered streaming reads
pub fn open_input<P: AsRef<Path>>(path: P) -> CryptrResult<BufReader<File>> {
    let path = path.as_ref();
    let file = File::open(path)
        .map_err(|e| CryptrError::io("Failed to open input file", path.display(), e))?;
    Ok(BufReader::new(file))
}

/// Load a raw 16-byte symmetric key file
pub fn read_key_file<P: AsRef<Path>>(path: P) -> CryptrResult<SymmetricKey> {
    let path = path.as_ref();
    let mut bytes = fs::read(path)
        .map_err(|e| CryptrError::io("Failed to read key file", path.display(), e))?;
    let key = SymmetricKey::from_bytes(&bytes).map_err(|e| match e {
        CryptrError::InvalidKey(msg) => {
            CryptrError::InvalidKey(format!("{}: {}", path.display(), msg))
        }
        other => other,
    });
    bytes.zeroize();
    key
}

/// Load a DER-encoded RSA public key file
pub fn read_public_key<P: AsRef<Path>>(path: P) -> CryptrResult<PublicKey> {
    let path = path.as_ref();
    let der = fs::read(path)
        .map_err(|e| CryptrError::io("Failed to read public key file", path.display(), e))?;
    PublicKey::from_der(&der)
}

/// Load a DER-encoded RSA private key file
pub fn read_private_key<P: AsRef<Path>>(path: P) -> CryptrResult<PrivateKey> {
    let path = path.as_ref();
    let mut der = fs::read(path)
        .map_err(|e| CryptrError::io("Failed to read private key file", path.display(), e))?;
    let key = PrivateKey::from_der(&der);
    der.zeroize();
    key
}

/// Load a wrapped key file
pub fn read_wrapped_key<P: AsRef<Path>>(path: P) -> CryptrResult<WrappedKey> {
    let path = path.as_ref();
    let bytes = fs::read(path)
        .map_err(|e| CryptrError::io("Failed to read wrapped key file", path.display(), e))?;
    Ok(WrappedKey::from(bytes))
}

/// Run `write` against a fresh temporary file, then atomically move it to `path`
///
/// The temporary file gets a unique name in the destination directory and is
/// created exclusively, so no existing file is opened or truncated. It is
/// removed if `write` fails or the rename fails.
pub fn write_atomic<T, P, F>(path: P, visibility: Visibility, write: F) -> CryptrResult<T>
where
    P: AsRef<Path>,
    F: FnOnce(&mut BufWriter<&mut File>) -> CryptrResult<T>,
{
    let path = path.as_ref();
    let dir = output_dir(path)?;

    let mut temp = temp_builder(visibility)
        .tempfile_in(dir)
        .map_err(|e| CryptrError::io("Failed to create output file in", dir.display(), e))?;

    let value = {
        let mut writer = BufWriter::new(temp.as_file_mut());
        let value = write(&mut writer)?;
        writer
            .flush()
            .map_err(|e| CryptrError::io("Failed to flush output file", path.display(), e))?;
        value
    };
    temp.as_file()
        .sync_all()
        .map_err(|e| CryptrError::io("Failed to sync output file", path.display(), e))?;

    temp.persist(path).map_err(|e| {
        CryptrError::io("Failed to move output into place at", path.display(), e.error)
    })?;
    Ok(value)
}

/// Write a small byte buffer atomically
pub fn write_bytes_atomic<P: AsRef<Path>>(
    path: P,
    bytes: &[u8],
    visibility: Visibility,
) -> CryptrResult<()> {
    let path = path.as_ref();
    write_atomic(path, visibility, |writer| {
        writer
            .write_all(bytes)
            .map_err(|e| CryptrError::io("Failed to write", path.display(), e))
    })
}

/// Directory the temporary file for `path` is created in
fn output_dir(path: &Path) -> CryptrResult<&Path> {
    if path.file_name().is_none() {
        return Err(CryptrError::Io(format!(
            "Output path has no file name: {}",
            path.display()
        )));
    }
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => Ok(parent),
        _ => Ok(Path::new(".")),
    }
}

fn temp_builder(visibility: Visibility) -> Builder<'static, 'static> {
    let mut builder = Builder::new();
    builder.prefix(".cryptr-").suffix(".tmp");
    // tempfile creates 0600 files; normal outputs get the usual umask-filtered mode
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        if visibility == Visibility::Normal {
            builder.permissions(fs::Permissions::from_mode(0o666));
        }
    }
    #[cfg(not(unix))]
    let _ = visibility;
    builder
}
