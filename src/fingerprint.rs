use crate::error::PatchError;
use md5::{Digest, Md5};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Hash the designated installed file to identify the SEB build.
///
/// Returns the lowercase hex MD5 of the file content. The hash is computed
/// fresh on every run and never persisted. A missing or unreadable file is
/// an I/O error; callers treat that as an unknown installation.
pub fn fingerprint(path: impl AsRef<Path>) -> Result<String, PatchError> {
    let mut file = File::open(path.as_ref())?;
    let mut hasher = Md5::new();
    let mut buffer = [0u8; 8192];

    loop {
        let read = file.read(&mut buffer)?;
        if read == 0 {
            break;
        }
        hasher.update(&buffer[..read]);
    }

    Ok(hex::encode(hasher.finalize()))
}
