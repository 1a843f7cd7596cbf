//! Platform-specific timestamp handling.
//!
//! "Creation time" is not defined the same way everywhere:
//!
//! - Windows and macOS report a true creation (birth) time.
//! - Linux reports a birth time through `statx` when the filesystem records one
//!   (ext4, btrfs, xfs, tmpfs on recent kernels). Older kernels and some network
//!   filesystems do not, in which case we fall back to the inode status-change
//!   time (`st_ctime`). That value moves on chmod, rename and hard-link changes.
//! - Other platforms without a birth time report an error for the file.
//!
//! Modification time is never substituted.

#[cfg(unix)]
mod unix;
#[cfg(windows)]
mod windows;

use std::fmt;
use std::fs::{FileTimes, Metadata};
use std::io;
use std::path::Path;
use std::time::SystemTime;

/// Which filesystem field produced a creation instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimestampSource {
    /// True creation time reported by the filesystem.
    Birth,
    /// Inode status-change time, used where no birth time exists.
    StatusChange,
}

impl fmt::Display for TimestampSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimestampSource::Birth => write!(f, "birth time"),
            TimestampSource::StatusChange => write!(f, "status-change time"),
        }
    }
}

/// Resolve the creation instant of a file from its metadata.
pub fn creation_time(metadata: &Metadata) -> io::Result<(SystemTime, TimestampSource)> {
    match metadata.created() {
        Ok(created) => Ok((created, TimestampSource::Birth)),
        Err(err) => match fallback_creation_time(metadata) {
            Some(changed) => Ok((changed, TimestampSource::StatusChange)),
            None => Err(err),
        },
    }
}

#[cfg(unix)]
fn fallback_creation_time(metadata: &Metadata) -> Option<SystemTime> {
    unix::status_change_time(metadata)
}

#[cfg(not(unix))]
fn fallback_creation_time(_metadata: &Metadata) -> Option<SystemTime> {
    None
}

/// Copy access and modification times from `source` metadata onto the file at `target`.
pub fn copy_file_times(source: &Metadata, target: &Path) -> io::Result<()> {
    let mut times = FileTimes::new();
    if let Ok(accessed) = source.accessed() {
        times = times.set_accessed(accessed);
    }
    if let Ok(modified) = source.modified() {
        times = times.set_modified(modified);
    }
    set_file_times(target, times)
}

#[cfg(unix)]
fn set_file_times(target: &Path, times: FileTimes) -> io::Result<()> {
    unix::set_file_times(target, times)
}

#[cfg(windows)]
fn set_file_times(target: &Path, times: FileTimes) -> io::Result<()> {
    windows::set_file_times(target, times)
}

#[cfg(not(any(unix, windows)))]
fn set_file_times(target: &Path, times: FileTimes) -> io::Result<()> {
    std::fs::OpenOptions::new()
        .write(true)
        .open(target)?
        .set_times(times)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::time::{Duration, UNIX_EPOCH};
    use tempfile::tempdir;

    #[test]
    fn test_creation_time_resolves_for_new_file() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("fresh.txt");
        fs::write(&path, "fresh").unwrap();

        let metadata = fs::metadata(&path).unwrap();
        let (instant, _source) = creation_time(&metadata).unwrap();
        assert!(instant > UNIX_EPOCH);
    }

    #[test]
    fn test_copy_file_times_preserves_modified() {
        let tmp = tempdir().unwrap();
        let source = tmp.path().join("source.txt");
        let target = tmp.path().join("target.txt");
        fs::write(&source, "a").unwrap();
        fs::write(&target, "a").unwrap();

        let old = UNIX_EPOCH + Duration::from_secs(1_686_830_400);
        fs::File::options()
            .write(true)
            .open(&source)
            .unwrap()
            .set_modified(old)
            .unwrap();

        copy_file_times(&fs::metadata(&source).unwrap(), &target).unwrap();
        assert_eq!(fs::metadata(&target).unwrap().modified().unwrap(), old);
    }
}
