//! Destination paths inside the downloads directory.

use crate::config::QdlConfig;
use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

/// Temporary file suffix used before the atomic rename.
pub const TEMP_SUFFIX: &str = ".part";

/// Downloads directory: config override, else the OS downloads dir, else the current dir.
pub fn resolve_downloads_dir(config: &QdlConfig) -> PathBuf {
    if let Some(dir) = &config.download_dir {
        return dir.clone();
    }
    dirs::download_dir()
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// A file name must stay inside the directory it is joined to.
pub fn is_safe_file_name(name: &str) -> bool {
    !name.is_empty() && name != "." && name != ".." && !name.contains(['/', '\0'])
}

/// Path for the temp file: `file.iso` -> `file.iso.part`.
pub fn temp_path(final_path: &Path) -> PathBuf {
    let mut o = final_path.as_os_str().to_owned();
    o.push(TEMP_SUFFIX);
    PathBuf::from(o)
}

/// A destination claimed by creating its temp file with `create_new`.
#[derive(Debug)]
pub struct Reservation {
    pub final_path: PathBuf,
    pub part: File,
}

/// Claim the first free name for `name` in `dir`: `a.png`, then `a-1.png`,
/// `a-2.png`, ... A name is free when neither it nor its temp file exists.
/// The temp file stays as the claim until it is renamed or removed.
pub fn reserve_destination(dir: &Path, name: &str) -> io::Result<Reservation> {
    let (stem, ext) = match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => (stem, Some(ext)),
        _ => (name, None),
    };
    let candidates = std::iter::once(dir.join(name)).chain((1u32..).map(|n| match ext {
        Some(ext) => dir.join(format!("{stem}-{n}.{ext}")),
        None => dir.join(format!("{stem}-{n}")),
    }));

    for final_path in candidates {
        if final_path.exists() {
            continue;
        }
        let part_path = temp_path(&final_path);
        let part = match OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&part_path)
        {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => continue,
            Err(e) => return Err(e),
        };
        // Lost a race with whoever wrote the final file after the check.
        if final_path.exists() {
            drop(part);
            let _ = fs::remove_file(&part_path);
            continue;
        }
        return Ok(Reservation { final_path, part });
    }
    Err(io::Error::new(
        io::ErrorKind::AlreadyExists,
        format!("no free name for {name} in {}", dir.display()),
    ))
}
