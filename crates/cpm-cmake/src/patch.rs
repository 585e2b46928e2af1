//! Inserting package declarations into a list file.

use std::path::Path;

use crate::error::{CmakeError, Result};
use crate::scan;

/// Render the declaration line for a package source.
pub fn declaration_line(source: &str) -> String {
    format!("{}(\"{source}\")", scan::DECLARATION_COMMAND)
}

/// Return `content` with a declaration for `source` inserted at the
/// insertion point, on its own line. `None` when there is no anchor.
///
/// The new line uses the same terminator as the line it follows.
///
/// The source must already satisfy [`scan::is_valid_source`].
pub fn insert_declaration(content: &str, source: &str) -> Option<String> {
    let point = scan::insertion_point(content)?;
    let line = declaration_line(source);
    let newline = line_terminator(content, point);

    let mut patched = String::with_capacity(content.len() + line.len() + newline.len());
    patched.push_str(&content[..point]);
    patched.push_str(newline);
    patched.push_str(&line);
    patched.push_str(&content[point..]);
    Some(patched)
}

/// Terminator of the line containing `point`, falling back to the file's
/// first line when `point` is on the last line.
fn line_terminator(content: &str, point: usize) -> &'static str {
    let newline = content[point..]
        .find('\n')
        .map(|offset| point + offset)
        .or_else(|| content.find('\n'));
    match newline {
        Some(index) if content[..index].ends_with('\r') => "\r\n",
        _ => "\n",
    }
}

/// Insert a declaration for `source` into the list file at `path`.
///
/// The whole file is rewritten. Nothing is written when the source is
/// invalid or the file has no anchor. Sources that are already declared are
/// appended again.
pub fn add_package(path: &Path, source: &str) -> Result<()> {
    if !scan::is_valid_source(source) {
        return Err(CmakeError::InvalidSource {
            source_text: source.to_string(),
        });
    }

    let content = std::fs::read_to_string(path).map_err(|e| CmakeError::Read {
        path: path.to_path_buf(),
        source: e,
    })?;

    if scan::declarations(&content).iter().any(|d| d.source == source) {
        tracing::warn!("{source} is already declared in {}", path.display());
    }

    let patched = insert_declaration(&content, source).ok_or_else(|| CmakeError::AnchorNotFound {
        path: path.to_path_buf(),
    })?;

    std::fs::write(path, patched).map_err(|e| CmakeError::Write {
        path: path.to_path_buf(),
        source: e,
    })?;

    tracing::info!("added {} to {}", declaration_line(source), path.display());
    Ok(())
}
