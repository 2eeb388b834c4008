//! Single-stream HTTP GET into a `.part` file, renamed on success.

use super::destination::temp_path;
use super::TransferOptions;
use anyhow::{Context, Result};
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use std::time::Duration;

/// Downloads `url` into `part_file`, the already created temp file of
/// `final_path`, and renames it into place. Returns the number of bytes
/// written. The temp file is removed on failure.
pub fn download_to(
    url: &str,
    part_file: File,
    final_path: &Path,
    options: &TransferOptions,
) -> Result<u64> {
    let part = temp_path(final_path);
    let result = fetch(url, part_file, options).and_then(|written| {
        fs::rename(&part, final_path).with_context(|| {
            format!("rename {} -> {}", part.display(), final_path.display())
        })?;
        Ok(written)
    });
    if result.is_err() {
        let _ = fs::remove_file(&part);
    }
    result
}

fn fetch(url: &str, mut file: File, options: &TransferOptions) -> Result<u64> {
    let mut written = 0u64;
    let mut write_err: Option<std::io::Error> = None;

    let mut easy = curl::easy::Easy::new();
    easy.url(url).context("invalid URL")?;
    easy.follow_location(true)?;
    easy.max_redirections(options.max_redirections)?;
    easy.connect_timeout(options.connect_timeout)?;
    easy.low_speed_limit(1024)?;
    easy.low_speed_time(Duration::from_secs(60))?;

    {
        let mut transfer = easy.transfer();
        transfer.write_function(|data| match file.write_all(data) {
            Ok(()) => {
                written += data.len() as u64;
                Ok(data.len())
            }
            Err(e) => {
                write_err = Some(e);
                Ok(0) // abort transfer
            }
        })?;
        let performed = transfer.perform();
        drop(transfer);
        if let Some(e) = write_err.take() {
            return Err(e).context("write to temp file failed");
        }
        performed.context("GET request failed")?;
    }

    let code = easy.response_code().context("no response code")?;
    if !(200..300).contains(&code) {
        anyhow::bail!("GET {} returned HTTP {}", url, code);
    }

    file.sync_all().context("sync temp file")?;
    Ok(written)
}
