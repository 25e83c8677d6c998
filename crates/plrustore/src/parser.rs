//! Snapshot line parser using nom
//!
//! File format:
//! ```text
//! key value priority\n
//! key value priority\n
//! ...
//! ```
//!
//! Fields are signed decimal integers separated by spaces. Lines are written
//! most-recently-used first.

use std::fmt;

use nom::{
    character::complete::{i32 as decimal, space0, space1},
    combinator::{all_consuming, map},
    sequence::{delimited, tuple},
    IResult,
};

use crate::error::{Error, Result};

/// One resident cache entry as stored on disk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnapshotRecord {
    /// Cache key
    pub key: i32,
    /// Stored value
    pub value: i32,
    /// Eviction priority
    pub priority: i32,
}

impl fmt::Display for SnapshotRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.key, self.value, self.priority)
    }
}

/// Parse the three whitespace-separated fields of a record
pub fn parse_record(input: &[u8]) -> IResult<&[u8], SnapshotRecord> {
    map(
        tuple((decimal, space1, decimal, space1, decimal)),
        |(key, _, value, _, priority)| SnapshotRecord {
            key,
            value,
            priority,
        },
    )(input)
}

/// Parse a single line (without its newline)
///
/// Returns `Ok(None)` for blank lines. `line_no` is only used for error
/// reporting.
pub fn parse_line(line: &[u8], line_no: usize) -> Result<Option<SnapshotRecord>> {
    let line = line.strip_suffix(b"\r").unwrap_or(line);
    if line.iter().all(|b| b.is_ascii_whitespace()) {
        return Ok(None);
    }

    match all_consuming(delimited(space0, parse_record, space0))(line) {
        Ok((_, record)) => Ok(Some(record)),
        Err(e) => Err(Error::Parse {
            line: line_no,
            message: format!(
                "expected `key value priority`, got {:?} ({:?})",
                String::from_utf8_lossy(line),
                e.map(|inner| inner.code)
            ),
        }),
    }
}

/// Parse a whole snapshot buffer into records, in file order
pub fn parse_snapshot(input: &[u8]) -> Result<Vec<SnapshotRecord>> {
    match parse_snapshot_prefix(input) {
        (records, None) => Ok(records),
        (_, Some(err)) => Err(err),
    }
}

/// Parse records up to the first malformed line
///
/// Returns the records before that line together with the error it raised,
/// or `None` if the whole buffer parsed.
pub fn parse_snapshot_prefix(input: &[u8]) -> (Vec<SnapshotRecord>, Option<Error>) {
    let mut records = Vec::new();
    for (idx, line) in input.split(|&b| b == b'\n').enumerate() {
        match parse_line(line, idx + 1) {
            Ok(Some(record)) => records.push(record),
            Ok(None) => {}
            Err(err) => return (records, Some(err)),
        }
    }
    (records, None)
}

/// Format a record as a snapshot line, including the trailing newline
pub fn format_line(record: &SnapshotRecord) -> String {
    format!("{}\n", record)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(key: i32, value: i32, priority: i32) -> SnapshotRecord {
        SnapshotRecord {
            key,
            value,
            priority,
        }
    }

    #[test]
    fn test_parse_record() {
        let (rest, record) = parse_record(b"1 10 3\nnext").unwrap();
        assert_eq!(record, rec(1, 10, 3));
        assert_eq!(rest, b"\nnext");
    }

    #[test]
    fn test_parse_negative_values() {
        let record = parse_line(b"-4 -400 -1", 1).unwrap();
        assert_eq!(record, Some(rec(-4, -400, -1)));
    }

    #[test]
    fn test_parse_line_lenient_whitespace() {
        let record = parse_line(b"  7\t70   2 \r", 1).unwrap();
        assert_eq!(record, Some(rec(7, 70, 2)));
    }

    #[test]
    fn test_parse_blank_line() {
        assert_eq!(parse_line(b"", 1).unwrap(), None);
        assert_eq!(parse_line(b"   \r", 2).unwrap(), None);
    }

    #[test]
    fn test_parse_line_missing_field() {
        let err = parse_line(b"1 10", 4).unwrap_err();
        match err {
            Error::Parse { line, .. } => assert_eq!(line, 4),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_parse_line_trailing_garbage() {
        assert!(parse_line(b"1 10 3 extra", 1).is_err());
        assert!(parse_line(b"1 ten 3", 1).is_err());
    }

    #[test]
    fn test_parse_snapshot_keeps_file_order() {
        let records = parse_snapshot(b"3 30 1\n\n2 20 2\n1 10 3").unwrap();
        assert_eq!(records, vec![rec(3, 30, 1), rec(2, 20, 2), rec(1, 10, 3)]);
    }

    #[test]
    fn test_parse_snapshot_reports_line_number() {
        let err = parse_snapshot(b"1 10 1\n2 20 2\nbroken\n").unwrap_err();
        assert!(err.to_string().contains("line 3"));
    }

    #[test]
    fn test_parse_snapshot_prefix_stops_at_bad_line() {
        let (records, err) = parse_snapshot_prefix(b"1 10 1\n2 20 2\ngarbage\n3 30 3\n");
        assert_eq!(records, vec![rec(1, 10, 1), rec(2, 20, 2)]);
        match err {
            Some(Error::Parse { line, .. }) => assert_eq!(line, 3),
            other => panic!("unexpected result: {:?}", other),
        }

        let (records, err) = parse_snapshot_prefix(b"1 10 1\n");
        assert_eq!(records, vec![rec(1, 10, 1)]);
        assert!(err.is_none());
    }

    #[test]
    fn test_format_line() {
        assert_eq!(format_line(&rec(5, -50, 1)), "5 -50 1\n");
    }
}
