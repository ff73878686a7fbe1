//! Input handling: the extension guard, the byte-read, and the
//! [`FileSource`] abstraction the controller consumes.
//!
//! ## Why guard on the name before reading?
//!
//! The extension check is the one guard that must run synchronously, before
//! any asynchronous work starts: a refused submission never touches the
//! filesystem. The ZIP magic check runs after the read instead — it tells
//! apart "could not read the file" from "read it fine, but this is not a
//! DOCX container", which map to different user-facing messages.

use crate::error::ExtractError;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Suffix a submission's declared name must carry.
///
/// The check is a case-sensitive exact suffix match: `report.DOCX` is
/// refused. This mirrors how the containing format is declared everywhere
/// else in the pipeline and keeps the guard trivially predictable.
pub const DOCX_EXTENSION: &str = ".docx";

/// DOCX files are ZIP containers; every readable one starts with `PK\x03\x04`.
const ZIP_MAGIC: [u8; 4] = [0x50, 0x4B, 0x03, 0x04];

/// Case-sensitive `.docx` suffix check on a declared file name.
pub fn has_docx_extension(name: &str) -> bool {
    name.ends_with(DOCX_EXTENSION)
}

/// Whether the byte content looks like a DOCX (ZIP) container.
pub fn looks_like_docx(bytes: &[u8]) -> bool {
    bytes.len() >= 4 && bytes[..4] == ZIP_MAGIC
}

/// First four bytes of the content, zero-padded, for diagnostics.
pub fn magic_of(bytes: &[u8]) -> [u8; 4] {
    let mut magic = [0u8; 4];
    for (slot, b) in magic.iter_mut().zip(bytes.iter()) {
        *slot = *b;
    }
    magic
}

/// Validate that a local path exists and is readable.
pub fn resolve_local(path: &Path) -> Result<(), ExtractError> {
    if !path.exists() {
        return Err(ExtractError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    match std::fs::File::open(path) {
        Ok(_) => {
            debug!("resolved local file: {}", path.display());
            Ok(())
        }
        Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
            Err(ExtractError::PermissionDenied {
                path: path.to_path_buf(),
            })
        }
        Err(e) => Err(ExtractError::FileReadFailure {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

/// Read the full byte content of a file, mapping I/O failures to the
/// byte-read error family.
pub async fn read_file_bytes(path: &Path) -> Result<Vec<u8>, ExtractError> {
    tokio::fs::read(path).await.map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => ExtractError::FileNotFound {
            path: path.to_path_buf(),
        },
        std::io::ErrorKind::PermissionDenied => ExtractError::PermissionDenied {
            path: path.to_path_buf(),
        },
        _ => ExtractError::FileReadFailure {
            path: path.to_path_buf(),
            source: e,
        },
    })
}

// ── File source ──────────────────────────────────────────────────────────

/// A file handed to the controller: a declared name plus a one-shot
/// asynchronous byte-read that resolves or fails once.
///
/// This is the seam between the controller and whatever supplies files —
/// the filesystem here, a picker or a drop target in a GUI host. Tests
/// implement it directly to simulate unreadable files.
#[async_trait]
pub trait FileSource: Send + Sync {
    /// The declared file name, used for the extension guard and display.
    fn name(&self) -> &str;

    /// Read the full byte content of the file.
    async fn read(&self) -> Result<Vec<u8>, ExtractError>;
}

/// A [`FileSource`] backed by a filesystem path.
#[derive(Debug, Clone)]
pub struct PathFileSource {
    path: PathBuf,
    name: String,
}

impl PathFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self { path, name }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl FileSource for PathFileSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn read(&self) -> Result<Vec<u8>, ExtractError> {
        read_file_bytes(&self.path).await
    }
}
