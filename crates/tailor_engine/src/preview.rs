use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tailor_logging::{tailor_debug, tailor_warn};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PreviewError {
    #[error("spool directory unavailable: {0}")]
    Spool(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Ephemeral, revocable reference to a spooled preview document.
///
/// A handle lets a display surface open the document without owning its
/// bytes. It must be released back to its store; the store counts live
/// handles so a leak is directly observable.
#[derive(Debug, PartialEq, Eq)]
pub struct PreviewHandle {
    serial: u64,
    path: PathBuf,
}

impl PreviewHandle {
    pub fn serial(&self) -> u64 {
        self.serial
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Spool-file backed store of renderable preview handles.
pub struct PreviewStore {
    dir: PathBuf,
    next_serial: u64,
    live: usize,
}

impl PreviewStore {
    pub fn new(dir: PathBuf) -> Result<Self, PreviewError> {
        fs::create_dir_all(&dir).map_err(|err| PreviewError::Spool(err.to_string()))?;
        Ok(Self {
            dir,
            next_serial: 0,
            live: 0,
        })
    }

    /// Spools the document and issues a fresh handle for it.
    pub fn acquire(&mut self, bytes: &[u8]) -> Result<PreviewHandle, PreviewError> {
        self.next_serial += 1;
        let path = self.dir.join(format!("preview-{:06}.pdf", self.next_serial));
        fs::write(&path, bytes)?;
        self.live += 1;
        tailor_debug!("spooled preview {:?} ({} bytes)", path, bytes.len());
        Ok(PreviewHandle {
            serial: self.next_serial,
            path,
        })
    }

    /// Releases a handle, deleting its spool file. Consumes the handle so a
    /// released reference cannot be used as a display source afterwards.
    pub fn release(&mut self, handle: PreviewHandle) {
        if let Err(err) = fs::remove_file(&handle.path) {
            // The handle is spent either way.
            tailor_warn!("could not remove spooled preview {:?}: {}", handle.path, err);
        }
        self.live = self.live.saturating_sub(1);
    }

    /// Number of handles acquired and not yet released.
    pub fn live_handles(&self) -> usize {
        self.live
    }
}

/// Owns the single live preview handle and its replacement protocol:
/// release always happens before the next acquire, on every path.
pub struct PreviewManager {
    store: PreviewStore,
    current: Option<PreviewHandle>,
}

impl PreviewManager {
    pub fn new(store: PreviewStore) -> Self {
        Self {
            store,
            current: None,
        }
    }

    /// Makes `bytes` the displayed document, returning the spool path the
    /// display surface may open. Any prior handle is released first.
    pub fn present(&mut self, bytes: &[u8]) -> Result<PathBuf, PreviewError> {
        self.revoke();
        let handle = self.store.acquire(bytes)?;
        let path = handle.path().to_path_buf();
        self.current = Some(handle);
        Ok(path)
    }

    /// Releases the live handle, if any. Idempotent.
    pub fn revoke(&mut self) {
        if let Some(handle) = self.current.take() {
            self.store.release(handle);
        }
    }

    pub fn current_path(&self) -> Option<&Path> {
        self.current.as_ref().map(PreviewHandle::path)
    }

    pub fn live_handles(&self) -> usize {
        self.store.live_handles()
    }
}
