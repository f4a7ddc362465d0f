// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Stream sources: a path to open, or a handle the caller already holds.
//!
//! A path is opened by the serving iterator and owned by it. A handle is
//! only borrowed; the iterator never closes it.

use crate::Encoding;
use dollop_plan::ServeError;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Cursor, StdinLock};
use std::path::{Path, PathBuf};

/// The direction(s) a handle was opened for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Read,
    Write,
    ReadWrite,
}

impl Access {
    /// Returns `true` if the handle can be read from.
    pub fn is_readable(self) -> bool {
        matches!(self, Access::Read | Access::ReadWrite)
    }
}

/// A buffered reader that can report how it was opened.
pub trait SourceHandle: BufRead {
    /// Returns the handle's access mode.
    fn access(&self) -> io::Result<Access>;
}

impl SourceHandle for BufReader<File> {
    #[cfg(unix)]
    fn access(&self) -> io::Result<Access> {
        use std::os::unix::io::AsRawFd;

        let fd = self.get_ref().as_raw_fd();
        // SAFETY: F_GETFL only reads the status flags of a descriptor we
        // hold open through `self`.
        let flags = unsafe { libc::fcntl(fd, libc::F_GETFL) };
        if flags < 0 {
            return Err(io::Error::last_os_error());
        }
        Ok(match flags & libc::O_ACCMODE {
            libc::O_RDONLY => Access::Read,
            libc::O_WRONLY => Access::Write,
            _ => Access::ReadWrite,
        })
    }

    #[cfg(not(unix))]
    fn access(&self) -> io::Result<Access> {
        Ok(Access::ReadWrite)
    }
}

impl<T: AsRef<[u8]>> SourceHandle for Cursor<T> {
    fn access(&self) -> io::Result<Access> {
        Ok(Access::Read)
    }
}

impl SourceHandle for &[u8] {
    fn access(&self) -> io::Result<Access> {
        Ok(Access::Read)
    }
}

impl SourceHandle for StdinLock<'_> {
    fn access(&self) -> io::Result<Access> {
        Ok(Access::Read)
    }
}

pub(crate) enum Origin<'a> {
    Path(PathBuf),
    Handle(&'a mut dyn SourceHandle),
}

/// Where a stream's content comes from, and whether it is text or bytes.
///
/// # Examples
/// ```
/// use std::io::Cursor;
/// use dollop_stream::{Encoding, StreamSource};
///
/// let mut cursor = Cursor::new("a\nb\n");
/// let source = StreamSource::handle(&mut cursor).binary();
/// assert_eq!(source.encoding(), Encoding::Binary);
///
/// let source = StreamSource::path("notes.txt");
/// assert!(source.as_path().is_some());
/// ```
pub struct StreamSource<'a> {
    pub(crate) origin: Origin<'a>,
    encoding: Encoding,
}

impl<'a> StreamSource<'a> {
    /// A file to be opened for reading, as text.
    pub fn path(path: impl Into<PathBuf>) -> Self {
        Self {
            origin: Origin::Path(path.into()),
            encoding: Encoding::Text,
        }
    }

    /// A caller-owned handle, read as text.
    pub fn handle(handle: &'a mut dyn SourceHandle) -> Self {
        Self {
            origin: Origin::Handle(handle),
            encoding: Encoding::Text,
        }
    }

    /// Hands servings back as raw bytes.
    pub fn binary(mut self) -> Self {
        self.encoding = Encoding::Binary;
        self
    }

    /// Hands servings back as text.
    pub fn text(mut self) -> Self {
        self.encoding = Encoding::Text;
        self
    }

    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    /// Returns the path for a path source.
    pub fn as_path(&self) -> Option<&Path> {
        match &self.origin {
            Origin::Path(p) => Some(p),
            Origin::Handle(_) => None,
        }
    }
}

impl std::fmt::Debug for StreamSource<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let origin = match &self.origin {
            Origin::Path(p) => p.display().to_string(),
            Origin::Handle(_) => "<handle>".to_string(),
        };
        f.debug_struct("StreamSource")
            .field("origin", &origin)
            .field("encoding", &self.encoding)
            .finish()
    }
}

impl From<PathBuf> for StreamSource<'_> {
    fn from(path: PathBuf) -> Self {
        Self::path(path)
    }
}

impl From<&Path> for StreamSource<'_> {
    fn from(path: &Path) -> Self {
        Self::path(path)
    }
}

/// A file opened on behalf of the caller. Closed when dropped.
pub(crate) struct OpenedFile {
    path: PathBuf,
    pub(crate) reader: BufReader<File>,
}

impl OpenedFile {
    pub(crate) fn open(path: PathBuf) -> Result<Self, ServeError> {
        let file = File::open(&path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => ServeError::NotFound {
                path: path.clone(),
                source: e,
            },
            _ => ServeError::Io(e),
        })?;
        tracing::debug!("stream: opened {}", path.display());
        Ok(Self {
            path,
            reader: BufReader::new(file),
        })
    }
}

impl Drop for OpenedFile {
    fn drop(&mut self) {
        tracing::debug!("stream: closed {}", self.path.display());
    }
}

/// Fails unless `handle` can be read from.
pub(crate) fn check_readable(handle: &dyn SourceHandle) -> Result<(), ServeError> {
    let access = handle.access()?;
    if !access.is_readable() {
        return Err(ServeError::ReadAccessDenied(format!(
            "handle was opened as {access:?}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_memory_handles_are_readable() {
        assert_eq!(Cursor::new(b"x".to_vec()).access().unwrap(), Access::Read);
        assert_eq!((&b"x"[..]).access().unwrap(), Access::Read);
    }

    #[cfg(unix)]
    #[test]
    fn test_file_access_modes() {
        use std::fs::OpenOptions;

        let tmp = tempfile::NamedTempFile::new().unwrap();

        let read = BufReader::new(File::open(tmp.path()).unwrap());
        assert_eq!(read.access().unwrap(), Access::Read);

        let write = BufReader::new(OpenOptions::new().write(true).open(tmp.path()).unwrap());
        assert_eq!(write.access().unwrap(), Access::Write);
        assert!(matches!(check_readable(&write), Err(ServeError::ReadAccessDenied(_))));

        let both = BufReader::new(
            OpenOptions::new().read(true).write(true).open(tmp.path()).unwrap(),
        );
        assert_eq!(both.access().unwrap(), Access::ReadWrite);
        assert!(check_readable(&both).is_ok());
    }

    #[test]
    fn test_missing_path_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.txt");
        let err = OpenedFile::open(path.clone()).err().unwrap();
        match err {
            ServeError::NotFound { path: p, .. } => assert_eq!(p, path),
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_source_builders() {
        let source = StreamSource::path("a.txt").binary().text();
        assert_eq!(source.encoding(), Encoding::Text);
        assert_eq!(source.as_path(), Some(Path::new("a.txt")));
        assert!(format!("{source:?}").contains("a.txt"));
    }
}
