//! Glyph metrics file loading
//!
//! Parses the line-oriented metrics description consumed by the
//! external-metrics atlas strategy. The format is a header of four lines
//! followed by one record per non-blank line; each record is a run of
//! whitespace-separated `key=value` tokens where positions 1..=7 carry the
//! character code, position, size, and offsets:
//!
//! ```text
//! char id=65 x=2 y=2 width=21 height=25 xoffset=-1 yoffset=7 ...
//! ```
//!
//! A record that cannot be parsed aborts loading with a descriptive error
//! instead of being dropped.

use std::fs;
use std::path::Path;
use thiserror::Error;

/// Number of leading header lines skipped before records start
const HEADER_LINES: usize = 4;

/// Errors that can occur while reading a glyph metrics file
#[derive(Debug, Error)]
pub enum MetricsError {
    /// Failed to read the metrics file from disk
    #[error("failed to read metrics file: {0}")]
    Io(#[from] std::io::Error),

    /// A record line could not be parsed
    #[error("malformed metrics record at line {line}: {reason}")]
    MalformedRecord {
        /// 1-based line number in the source text
        line: usize,
        /// What was wrong with the record
        reason: String,
    },
}

/// One glyph record from a metrics file
///
/// `x_offset`/`y_offset` are carried through from the file but are not
/// applied to glyph placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlyphMetric {
    /// Character this record describes
    pub ch: char,
    /// Left edge of the glyph in the source image, pixels
    pub x: i32,
    /// Top edge of the glyph in the source image, pixels
    pub y: i32,
    /// Glyph width in pixels
    pub width: i32,
    /// Glyph height in pixels
    pub height: i32,
    /// Horizontal placement offset, parsed but unused
    pub x_offset: i32,
    /// Vertical placement offset, parsed but unused
    pub y_offset: i32,
}

/// Load and parse a metrics file from disk
pub fn load_metrics<P: AsRef<Path>>(path: P) -> Result<Vec<GlyphMetric>, MetricsError> {
    let path_ref = path.as_ref();
    log::debug!("Loading glyph metrics from: {:?}", path_ref);
    let source = fs::read_to_string(path_ref)?;
    let records = parse_metrics(&source)?;
    log::info!("Loaded {} glyph metrics from {:?}", records.len(), path_ref);
    Ok(records)
}

/// Parse metrics records out of already-loaded text
pub fn parse_metrics(source: &str) -> Result<Vec<GlyphMetric>, MetricsError> {
    let mut records = Vec::new();

    for (index, raw_line) in source.lines().enumerate() {
        let line_number = index + 1;
        if line_number <= HEADER_LINES {
            continue;
        }
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }
        records.push(parse_record(line, line_number)?);
    }

    Ok(records)
}

fn parse_record(line: &str, line_number: usize) -> Result<GlyphMetric, MetricsError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() < 8 {
        return Err(MetricsError::MalformedRecord {
            line: line_number,
            reason: format!("expected at least 8 fields, found {}", tokens.len()),
        });
    }

    let code = parse_field(tokens[1], line_number)?;
    let ch = u32::try_from(code)
        .ok()
        .and_then(char::from_u32)
        .ok_or_else(|| MetricsError::MalformedRecord {
            line: line_number,
            reason: format!("{} is not a valid character code", code),
        })?;

    Ok(GlyphMetric {
        ch,
        x: parse_field(tokens[2], line_number)?,
        y: parse_field(tokens[3], line_number)?,
        width: parse_field(tokens[4], line_number)?,
        height: parse_field(tokens[5], line_number)?,
        x_offset: parse_field(tokens[6], line_number)?,
        y_offset: parse_field(tokens[7], line_number)?,
    })
}

fn parse_field(token: &str, line_number: usize) -> Result<i32, MetricsError> {
    let (_, value) = token
        .split_once('=')
        .ok_or_else(|| MetricsError::MalformedRecord {
            line: line_number,
            reason: format!("expected key=value token, found '{}'", token),
        })?;

    value
        .parse()
        .map_err(|_| MetricsError::MalformedRecord {
            line: line_number,
            reason: format!("'{}' is not an integer", value),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "info face=\"pixel\" size=16\n\
                          common lineHeight=18 base=14\n\
                          page id=0 file=\"pixel_0.png\"\n\
                          chars count=2\n\
                          char id=65 x=2 y=2 width=10 height=14 xoffset=0 yoffset=1 xadvance=11\n\
                          \n\
                          char id=66 x=14 y=2 width=9 height=14 xoffset=-1 yoffset=1 xadvance=10\n";

    #[test]
    fn test_parse_skips_header_and_blank_lines() {
        let records = parse_metrics(SAMPLE).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].ch, 'A');
        assert_eq!(records[0].x, 2);
        assert_eq!(records[0].width, 10);
        assert_eq!(records[1].ch, 'B');
        assert_eq!(records[1].x_offset, -1);
    }

    #[test]
    fn test_offsets_are_preserved() {
        let records = parse_metrics(SAMPLE).unwrap();
        assert_eq!(records[0].x_offset, 0);
        assert_eq!(records[0].y_offset, 1);
    }

    #[test]
    fn test_malformed_value_is_an_error() {
        let source = "a\nb\nc\nd\nchar id=65 x=oops y=2 width=10 height=14 xoffset=0 yoffset=1\n";
        let err = parse_metrics(source).unwrap_err();
        match err {
            MetricsError::MalformedRecord { line, reason } => {
                assert_eq!(line, 5);
                assert!(reason.contains("oops"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_short_record_is_an_error() {
        let source = "a\nb\nc\nd\nchar id=65 x=2\n";
        assert!(matches!(
            parse_metrics(source),
            Err(MetricsError::MalformedRecord { line: 5, .. })
        ));
    }

    #[test]
    fn test_token_without_equals_is_an_error() {
        let source = "a\nb\nc\nd\nchar 65 x=2 y=2 width=10 height=14 xoffset=0 yoffset=1\n";
        assert!(matches!(
            parse_metrics(source),
            Err(MetricsError::MalformedRecord { .. })
        ));
    }
}
