use std::fs::{File, FileTimes, Metadata};
use std::io;
use std::os::unix::fs::MetadataExt;
use std::path::Path;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// `st_ctime` as a `SystemTime`. None if it does not fit.
pub fn status_change_time(metadata: &Metadata) -> Option<SystemTime> {
    let secs = metadata.ctime();
    let nanos = u32::try_from(metadata.ctime_nsec()).unwrap_or(0);
    if secs >= 0 {
        UNIX_EPOCH.checked_add(Duration::new(secs.unsigned_abs(), nanos))
    } else {
        UNIX_EPOCH
            .checked_sub(Duration::from_secs(secs.unsigned_abs()))?
            .checked_add(Duration::from_nanos(u64::from(nanos)))
    }
}

// Explicit timestamps only need ownership, so a read-only handle works even when
// the copied permission bits made the target read-only.
pub fn set_file_times(target: &Path, times: FileTimes) -> io::Result<()> {
    File::open(target)?.set_times(times)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_status_change_time_matches_ctime() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("file.txt");
        fs::write(&path, "x").unwrap();

        let metadata = fs::metadata(&path).unwrap();
        let changed = status_change_time(&metadata).unwrap();
        let secs = changed.duration_since(UNIX_EPOCH).unwrap().as_secs();
        assert_eq!(secs as i64, metadata.ctime());
    }
}
