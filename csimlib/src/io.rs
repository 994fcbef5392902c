use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use crate::error::SimError;

// 4096 is the standard block size (or a divisor of it) on most systems
const BUFFER_SIZE: usize = 16 * 4096;

/// Opens a trace file for sequential reading
///
/// On unix the file is memory mapped, with the OS advised that reads will be sequential. Empty
/// files, and other platforms, fall back to a buffered reader
///
/// # Arguments
///
/// * `path`: Path of the trace file
///
/// returns: Result<Box<dyn BufRead>, SimError>, failing with `SourceUnavailable` if the file can't
/// be opened or mapped
pub fn open_trace(path: impl AsRef<Path>) -> Result<Box<dyn BufRead>, SimError> {
    let path = path.as_ref();
    let unavailable = |source| SimError::SourceUnavailable {
        path: path.display().to_string(),
        source,
    };
    let file = File::open(path).map_err(unavailable)?;
    log::debug!("Opened trace {}", path.display());
    // Compatibility on other systems
    #[cfg(not(unix))]
    {
        Ok(Box::new(BufReader::with_capacity(BUFFER_SIZE, file)))
    }
    // Memory map the file for speed on unix systems
    #[cfg(unix)]
    {
        use std::io::Cursor;
        use memmap2::{Advice, Mmap};
        let length = file.metadata().map_err(unavailable)?.len();
        if length == 0 {
            return Ok(Box::new(BufReader::with_capacity(BUFFER_SIZE, file)));
        }
        // The mapping is only read, and trace files aren't expected to change under us
        let mmap = unsafe { Mmap::map(&file) }.map_err(unavailable)?;
        mmap.advise(Advice::Sequential).map_err(unavailable)?;
        Ok(Box::new(Cursor::new(mmap)))
    }
}
