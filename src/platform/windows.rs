use std::fs::{FileTimes, OpenOptions};
use std::io;
use std::os::windows::fs::OpenOptionsExt;
use std::path::Path;

const FILE_WRITE_ATTRIBUTES: u32 = 0x0100;

pub fn set_file_times(target: &Path, times: FileTimes) -> io::Result<()> {
    OpenOptions::new()
        .access_mode(FILE_WRITE_ATTRIBUTES)
        .open(target)?
        .set_times(times)
}
