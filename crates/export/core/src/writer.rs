//! Idempotent file writer.
//!
//! Generated files are written only when their content changes, through a
//! sibling temp file and a rename. Text a user adds between the generated
//! block and the trailing `return` survives re-export.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

pub const BEGIN_MARKER: &str = "-- <generated>";
pub const END_MARKER: &str = "-- </generated>";

/// Hand-written region of a freshly created file.
const DEFAULT_HAND_WRITTEN: &str = "\n";

#[derive(Debug, Error)]
pub enum WriteError {
    #[error("failed to read {path}: {source}")]
    Read { path: PathBuf, source: io::Error },

    #[error("failed to write {path}: {source}")]
    Write { path: PathBuf, source: io::Error },
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum WriteMode {
    #[default]
    Write,
    /// Compute the outcome without touching disk.
    Check,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WriteOutcome {
    Written,
    Unchanged,
    /// Check mode: the file is stale or missing.
    WouldWrite,
}

impl WriteOutcome {
    pub fn label(self) -> &'static str {
        match self {
            Self::Written => "written",
            Self::Unchanged => "unchanged",
            Self::WouldWrite => "would write",
        }
    }
}

/// Fixed layout of one generated Lua file.
#[derive(Clone, Debug)]
pub struct FileTemplate {
    /// Comment lines at the top of the file, without the `-- ` prefix.
    pub header: Vec<String>,
    /// `---@class` block, newline terminated.
    pub annotations: String,
    /// Record class the table values are annotated with.
    pub class_name: String,
    /// Local table name, also the file's return value.
    pub table_name: String,
}

impl FileTemplate {
    /// Assembles the full file text around a rendered table body.
    pub fn assemble(&self, body: &str, hand_written: &str) -> String {
        let mut out = String::new();
        for line in &self.header {
            if line.is_empty() {
                out.push_str("--\n");
            } else {
                out.push_str("-- ");
                out.push_str(line);
                out.push('\n');
            }
        }
        out.push('\n');
        out.push_str(&self.annotations);
        out.push('\n');
        out.push_str(&format!("---@type table<string, {}>\n", self.class_name));
        out.push_str(BEGIN_MARKER);
        out.push('\n');
        out.push_str(&format!("local {} = {body}\n", self.table_name));
        out.push_str(END_MARKER);
        out.push('\n');
        out.push_str(hand_written);
        out.push_str(&format!("return {}\n", self.table_name));
        out
    }
}

/// Extracts the text between the end marker line and the final `return`
/// line of a previously generated file.
pub fn hand_written_region(existing: &str) -> Option<&str> {
    let marker = existing.find(&format!("\n{END_MARKER}\n"))?;
    let after = &existing[marker + END_MARKER.len() + 2..];

    let ret = if after.starts_with("return ") {
        0
    } else {
        after.rfind("\nreturn ")? + 1
    };
    Some(&after[..ret])
}

/// Writes `template` around `body` to `path` unless the file already holds
/// exactly that content.
pub fn write_file(
    path: &Path,
    template: &FileTemplate,
    body: &str,
    mode: WriteMode,
) -> Result<WriteOutcome, WriteError> {
    let existing = match fs::read_to_string(path) {
        Ok(text) => Some(text),
        Err(err) if err.kind() == io::ErrorKind::NotFound => None,
        Err(source) => {
            return Err(WriteError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    // Files checked out with CRLF endings still carry their hand-written
    // region; it is written back with LF endings.
    let normalized = existing.as_deref().map(|text| text.replace("\r\n", "\n"));
    let hand_written = normalized
        .as_deref()
        .and_then(hand_written_region)
        .unwrap_or(DEFAULT_HAND_WRITTEN);
    let content = template.assemble(body, hand_written);

    if existing.as_deref() == Some(content.as_str()) {
        tracing::debug!(target: "export::writer", path = %path.display(), "unchanged");
        return Ok(WriteOutcome::Unchanged);
    }

    if mode == WriteMode::Check {
        return Ok(WriteOutcome::WouldWrite);
    }

    write_atomic(path, &content).map_err(|source| WriteError::Write {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::debug!(
        target: "export::writer",
        path = %path.display(),
        bytes = content.len(),
        "written"
    );
    Ok(WriteOutcome::Written)
}

fn write_atomic(path: &Path, content: &str) -> io::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }

    let mut temp_name = path.file_name().unwrap_or_default().to_os_string();
    temp_name.push(".tmp");
    let temp_path = path.with_file_name(temp_name);

    let result = fs::write(&temp_path, content).and_then(|()| fs::rename(&temp_path, path));
    if result.is_err() {
        let _ = fs::remove_file(&temp_path);
    }
    result
}
