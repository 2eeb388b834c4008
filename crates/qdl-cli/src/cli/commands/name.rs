//! `qdl name <url>` – print the file name derived from a URL.

use anyhow::Result;
use qdl_core::url_model::extract_filename;

pub fn run_name(url: &str) -> Result<()> {
    match extract_filename(url) {
        Some(name) if !name.is_empty() => {
            println!("{name}");
            Ok(())
        }
        Some(_) => anyhow::bail!("no file name after the last '/' in {url:?}"),
        None => anyhow::bail!("no '/' in {url:?}, cannot derive a file name"),
    }
}
