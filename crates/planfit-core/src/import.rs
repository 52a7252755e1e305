//! CSV backlog import.
//!
//! Accepts the loose CSV shapes Jira and Trello exports produce: the
//! header row locates the columns, values may be double-quoted with
//! embedded commas, and the size column tolerates both T-shirt labels and
//! raw story-point numbers (normalized via [`TShirtSize::normalize`]).

use crate::epic::{EpicDraft, EpicSource};
use crate::error::ValidationError;
use crate::sizing::TShirtSize;

/// Parse CSV content into epic drafts.
///
/// The header must contain a title-like column (`title`, `summary`, or
/// `name`); description and size columns are optional. Rows without a
/// title are skipped. Content with no data rows yields an empty list.
pub fn parse_csv(content: &str) -> Result<Vec<EpicDraft>, ValidationError> {
    let lines: Vec<&str> = content.trim().lines().collect();
    if lines.len() < 2 {
        return Ok(Vec::new());
    }

    let headers: Vec<String> = parse_line(lines[0])
        .into_iter()
        .map(|h| h.to_lowercase().replace('"', ""))
        .collect();

    let title_idx = headers
        .iter()
        .position(|h| h.contains("title") || h.contains("summary") || h.contains("name"))
        .ok_or(ValidationError::MissingColumn("title"))?;
    let desc_idx = headers
        .iter()
        .position(|h| h.contains("description") || h.contains("desc"));
    let size_idx = headers
        .iter()
        .position(|h| h.contains("size") || h.contains("estimate") || h.contains("points"));

    let mut drafts = Vec::new();
    for line in &lines[1..] {
        let values = parse_line(line);
        let Some(title) = values.get(title_idx).map(|v| v.trim()) else {
            continue;
        };
        if title.is_empty() {
            continue;
        }

        let description = desc_idx
            .and_then(|i| values.get(i))
            .map(|v| v.trim().to_string())
            .unwrap_or_default();
        let size = size_idx
            .and_then(|i| values.get(i))
            .map(|v| TShirtSize::normalize(v))
            .unwrap_or(TShirtSize::M);

        drafts.push(EpicDraft {
            title: title.to_string(),
            description,
            size,
            source: EpicSource::Template,
        });
    }

    Ok(drafts)
}

/// Split one CSV line on commas, honoring double quotes. Quotes toggle
/// quoting and are dropped from the value; fields are trimmed.
fn parse_line(line: &str) -> Vec<String> {
    let mut result = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for c in line.chars() {
        match c {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                result.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(c),
        }
    }
    result.push(current.trim().to_string());
    result
}
