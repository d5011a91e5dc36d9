//! Validated block device handle
//!
//! `BlockDevice` is the only way the rest of the harness refers to the device
//! under test, and the only constructors run the guard: the path is resolved
//! to an absolute path, must be valid UTF-8 without whitespace (it is handed
//! to external tools verbatim), and must name a block-special file. Secure
//! erase is irreversible, so nothing downstream accepts a bare path.
//!
//! # Example
//!
//! ```no_run
//! use cleanbench::target::block::BlockDevice;
//!
//! // Note: the device contents will be destroyed by a full run
//! let device = BlockDevice::open("/dev/sdb")?;
//! println!("validated {}", device);
//! # Ok::<(), cleanbench::BenchError>(())
//! ```

use crate::error::BenchError;
use std::fmt;
use std::fs::File;
use std::io;
use std::os::unix::fs::FileTypeExt;
use std::os::unix::io::AsRawFd;
use std::path::{Path, PathBuf};

// ioctl request code for getting block device size
const BLKGETSIZE64: libc::c_ulong = 0x80081272;

/// Filesystem queries used by the guard
pub(crate) trait DeviceProbe {
    /// Whether `path` names a block-special file
    fn is_block_device(&self, path: &Path) -> io::Result<bool>;

    /// Device capacity in bytes
    fn capacity(&self, _path: &Path) -> io::Result<u64> {
        Err(io::Error::new(io::ErrorKind::Unsupported, "capacity not available"))
    }
}

/// Probe backed by the real filesystem
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct FsProbe;

impl DeviceProbe for FsProbe {
    fn is_block_device(&self, path: &Path) -> io::Result<bool> {
        Ok(std::fs::metadata(path)?.file_type().is_block_device())
    }

    fn capacity(&self, path: &Path) -> io::Result<u64> {
        let file = File::open(path)?;

        let mut size: u64 = 0;
        let result = unsafe { libc::ioctl(file.as_raw_fd(), BLKGETSIZE64, &mut size) };

        if result < 0 {
            return Err(io::Error::last_os_error());
        }
        Ok(size)
    }
}

/// Absolute path of a validated block device
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockDevice {
    path: String,
}

impl BlockDevice {
    /// Validate `path` against the real filesystem
    pub fn open(path: impl AsRef<Path>) -> Result<Self, BenchError> {
        Self::open_with(path, &FsProbe)
    }

    /// Validate `path` using the given probe
    ///
    /// # Errors
    ///
    /// `BenchError::InvalidDevice` if the path cannot be resolved, is not
    /// UTF-8, contains whitespace, does not exist, or is not a block device.
    pub(crate) fn open_with(path: impl AsRef<Path>, probe: &dyn DeviceProbe) -> Result<Self, BenchError> {
        let requested = path.as_ref();
        let invalid = |path: &Path, reason: String| BenchError::InvalidDevice {
            path: path.to_path_buf(),
            reason,
        };

        let resolved: PathBuf = std::path::absolute(requested)
            .map_err(|e| invalid(requested, format!("cannot resolve path: {}", e)))?;

        let text = resolved
            .to_str()
            .ok_or_else(|| invalid(&resolved, "path is not valid UTF-8".to_string()))?;

        if text.chars().any(char::is_whitespace) {
            return Err(invalid(&resolved, "path contains whitespace".to_string()));
        }

        match probe.is_block_device(&resolved) {
            Ok(true) => {}
            Ok(false) => return Err(invalid(&resolved, "not a block device".to_string())),
            Err(e) => return Err(invalid(&resolved, format!("cannot stat: {}", e))),
        }

        Ok(Self {
            path: text.to_string(),
        })
    }

    pub fn path(&self) -> &Path {
        Path::new(&self.path)
    }

    pub fn as_str(&self) -> &str {
        &self.path
    }
}

impl fmt::Display for BlockDevice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Probe that reports every path as a block device of fixed size
    pub(crate) struct FakeBlockProbe;

    impl DeviceProbe for FakeBlockProbe {
        fn is_block_device(&self, _path: &Path) -> io::Result<bool> {
            Ok(true)
        }

        fn capacity(&self, _path: &Path) -> io::Result<u64> {
            Ok(256 * 1024 * 1024 * 1024)
        }
    }

    #[test]
    fn test_accepts_mocked_block_device() {
        let device = BlockDevice::open_with("/dev/sdx", &FakeBlockProbe).unwrap();
        assert_eq!(device.as_str(), "/dev/sdx");
        assert_eq!(device.path(), Path::new("/dev/sdx"));
    }

    #[test]
    fn test_relative_path_is_resolved() {
        let expected = std::env::current_dir().unwrap().join("sdx");
        let result = BlockDevice::open_with("sdx", &FakeBlockProbe);

        let cwd_has_whitespace = expected
            .to_str()
            .map_or(true, |s| s.chars().any(char::is_whitespace));
        if cwd_has_whitespace {
            assert!(matches!(result, Err(BenchError::InvalidDevice { .. })));
        } else {
            let device = result.unwrap();
            assert!(device.path().is_absolute());
            assert_eq!(device.path(), expected.as_path());
        }
    }

    #[test]
    fn test_rejects_whitespace_even_for_block_device() {
        let err = BlockDevice::open_with("/dev/disk by-id/x", &FakeBlockProbe).unwrap_err();
        match err {
            BenchError::InvalidDevice { reason, .. } => assert!(reason.contains("whitespace")),
            other => panic!("unexpected error: {:?}", other),
        }

        assert!(BlockDevice::open_with("/dev/sd\tx", &FakeBlockProbe).is_err());
    }

    #[test]
    fn test_rejects_regular_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let err = BlockDevice::open(file.path()).unwrap_err();
        assert!(matches!(err, BenchError::InvalidDevice { .. }));
        assert!(err.to_string().contains("not a block device"));
    }

    #[test]
    fn test_rejects_directory() {
        let dir = tempfile::tempdir().unwrap();
        let err = BlockDevice::open(dir.path()).unwrap_err();
        assert!(matches!(err, BenchError::InvalidDevice { .. }));
    }

    #[test]
    fn test_rejects_character_device() {
        // /dev/null is a character device, not a block device
        let err = BlockDevice::open("/dev/null").unwrap_err();
        assert!(matches!(err, BenchError::InvalidDevice { .. }));
    }

    #[test]
    fn test_rejects_missing_path() {
        let dir = tempfile::tempdir().unwrap();
        let err = BlockDevice::open(dir.path().join("missing")).unwrap_err();
        assert!(err.to_string().contains("cannot stat"));
    }

    #[test]
    fn test_rejects_space_in_real_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("with space");
        std::fs::write(&path, b"").unwrap();
        let err = BlockDevice::open(&path).unwrap_err();
        assert!(err.to_string().contains("whitespace"));
    }
}
