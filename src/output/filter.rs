//! Keyword filtering of harvested URL files
//!
//! A line is kept when at least one keyword occurs in it as a plain,
//! case-sensitive substring.

use crate::config::OutputConfig;
use crate::output::file_sink::FileSink;
use crate::output::traits::{OutputError, OutputResult};
use std::path::Path;

/// Reads a newline-delimited keyword file
///
/// Surrounding whitespace is stripped from each line and blank lines are
/// dropped (an empty keyword would match every URL).
pub fn load_keywords(path: &Path) -> OutputResult<Vec<String>> {
    let content = std::fs::read_to_string(path).map_err(|source| OutputError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(content
        .lines()
        .map(str::trim)
        .filter(|keyword| !keyword.is_empty())
        .map(str::to_string)
        .collect())
}

/// Returns true if any keyword is a substring of `line`
pub fn matches_any(line: &str, keywords: &[String]) -> bool {
    keywords.iter().any(|keyword| line.contains(keyword.as_str()))
}

/// Returns the lines of `content` that contain at least one keyword, in order
pub fn filter_lines<'a>(content: &'a str, keywords: &[String]) -> Vec<&'a str> {
    content
        .lines()
        .filter(|line| matches_any(line, keywords))
        .collect()
}

/// Writes the matching lines of `input` to `output`, replacing any previous content
///
/// Returns the number of lines kept.
pub fn filter_file(input: &Path, keywords: &[String], output: &Path) -> OutputResult<usize> {
    let content = std::fs::read_to_string(input).map_err(|source| OutputError::Read {
        path: input.to_path_buf(),
        source,
    })?;

    let kept = filter_lines(&content, keywords);
    let mut filtered = String::with_capacity(content.len());
    for line in &kept {
        filtered.push_str(line);
        filtered.push('\n');
    }

    std::fs::write(output, filtered).map_err(|source| OutputError::Write {
        path: output.to_path_buf(),
        source,
    })?;

    Ok(kept.len())
}

/// Produces `<domain>_filtered.txt` if a keyword file is configured
///
/// When `delete_input` is also set, `<domain>.txt` is removed afterwards.
/// Returns the number of lines kept, or `None` if no keyword file was given.
pub fn apply_keyword_filter(
    sink: &FileSink,
    config: &OutputConfig,
) -> OutputResult<Option<usize>> {
    let Some(keywords_path) = &config.keywords else {
        if config.delete_input {
            tracing::warn!("--delete-input has no effect without --keywords");
        }
        return Ok(None);
    };

    let keywords = load_keywords(keywords_path)?;
    tracing::info!(
        "Filtering {} with {} keywords",
        sink.path().display(),
        keywords.len()
    );

    let filtered_path = sink.filtered_path();
    let kept = filter_file(sink.path(), &keywords, &filtered_path)?;
    tracing::info!("Wrote {} matching URLs to {}", kept, filtered_path.display());

    if config.delete_input && sink.path().exists() {
        std::fs::remove_file(sink.path())?;
        tracing::info!("Deleted {}", sink.path().display());
    }

    Ok(Some(kept))
}
