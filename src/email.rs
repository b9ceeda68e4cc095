//! Receipt discovery and MIME body extraction.

use anyhow::{Context, Result, ensure};
use mailparse::parse_mail;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// All `.eml` files directly inside `dir`, sorted for deterministic runs.
pub fn list_eml_files(dir: &Path) -> Result<Vec<PathBuf>> {
    ensure!(dir.is_dir(), "input directory not found: {}", dir.display());
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| {
            entry.file_type().is_file()
                && entry
                    .path()
                    .extension()
                    .is_some_and(|ext| ext.eq_ignore_ascii_case("eml"))
        })
        .map(|entry| entry.into_path())
        .collect();
    files.sort();
    Ok(files)
}

/// Decoded text body of a MIME message.
///
/// For multipart messages only the first top-level `text/plain` part is used;
/// a multipart message without one yields an empty body. Single-part messages
/// use the whole decoded body.
pub fn plain_text_body(raw: &[u8]) -> Result<String> {
    let mail = parse_mail(raw).context("parse MIME message")?;
    if mail.subparts.is_empty() {
        return mail.get_body().context("decode message body");
    }
    for part in &mail.subparts {
        if part.ctype.mimetype == "text/plain" {
            return part.get_body().context("decode text/plain part");
        }
    }
    Ok(String::new())
}
