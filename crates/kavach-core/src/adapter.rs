//! Record adapter: embedded JSON text in, record out, and back again.

use crate::error::Result;
use crate::types::Record;
use serde::Serialize;
use serde_json::ser::{Formatter, Serializer};
use serde_json::Value;
use std::io;
use tracing::warn;

/// How a raw blob turned into a record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseOutcome {
    Parsed,
    /// Only parsed after swapping single quotes for double quotes
    QuotesRepaired,
    /// Unusable input; an empty record was substituted
    Empty,
}

fn as_record(value: Value) -> Option<Record> {
    match value {
        Value::Object(map) => Some(map),
        _ => None,
    }
}

/// Parse a raw blob, reporting whether a fallback was needed. Never fails.
pub fn parse_record_checked(raw: &str) -> (Record, ParseOutcome) {
    match serde_json::from_str::<Value>(raw) {
        Ok(value) => {
            return match as_record(value) {
                Some(record) => (record, ParseOutcome::Parsed),
                None => (Record::new(), ParseOutcome::Empty),
            };
        }
        Err(e) => warn!(error = %e, "record is not valid JSON, retrying with double quotes"),
    }

    match serde_json::from_str::<Value>(&raw.replace('\'', "\"")) {
        Ok(value) => match as_record(value) {
            Some(record) => (record, ParseOutcome::QuotesRepaired),
            None => (Record::new(), ParseOutcome::Empty),
        },
        Err(e) => {
            warn!(error = %e, "record could not be parsed, treating as empty");
            (Record::new(), ParseOutcome::Empty)
        }
    }
}

/// Parse a raw blob into a record, degrading to an empty record
pub fn parse_record(raw: &str) -> Record {
    parse_record_checked(raw).0
}

/// Writes `", "` between items and `": "` after keys, matching the input data's style.
struct SpacedFormatter;

impl Formatter for SpacedFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b": ")
    }
}

/// Serialize a record as one line of JSON. Key order is kept and non-ASCII text is
/// written as-is rather than escaped.
pub fn to_json(record: &Record) -> Result<String> {
    let mut buf = Vec::with_capacity(128);
    let mut ser = Serializer::with_formatter(&mut buf, SpacedFormatter);
    record.serialize(&mut ser)?;
    let text = String::from_utf8(buf).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_plain_json() {
        let (record, outcome) = parse_record_checked(r#"{"name": "Ravi Kumar", "age": 31}"#);
        assert_eq!(outcome, ParseOutcome::Parsed);
        assert_eq!(record["name"], "Ravi Kumar");
        assert_eq!(record["age"], 31);
    }

    #[test]
    fn test_repairs_single_quotes() {
        let (record, outcome) = parse_record_checked("{'phone': '9876543210'}");
        assert_eq!(outcome, ParseOutcome::QuotesRepaired);
        assert_eq!(record["phone"], "9876543210");
    }

    #[test]
    fn test_trailing_comma_falls_back_to_empty() {
        let (record, outcome) = parse_record_checked("{'a': 1,}");
        assert_eq!(outcome, ParseOutcome::Empty);
        assert!(record.is_empty());
    }

    #[test]
    fn test_non_object_is_empty() {
        assert!(parse_record("[1, 2, 3]").is_empty());
        assert!(parse_record("\"text\"").is_empty());
        assert!(parse_record("").is_empty());
    }

    #[test]
    fn test_to_json_preserves_order_and_unicode() {
        let record = parse_record(r#"{"z": "ज़ोया", "a": [1, 2], "m": {"k": null}}"#);
        assert_eq!(
            to_json(&record).unwrap(),
            r#"{"z": "ज़ोया", "a": [1, 2], "m": {"k": null}}"#
        );
    }

    #[test]
    fn test_untouched_big_integer_survives_round_trip() {
        let raw = r#"{"order_id": 98765432109876543210123, "city": "Pune"}"#;
        let result = crate::record::RecordClassifier::default().classify(&parse_record(raw));
        assert!(!result.is_pii);
        assert_eq!(to_json(&result.redacted).unwrap(), raw);
    }

    #[test]
    fn test_to_json_empty() {
        assert_eq!(to_json(&Record::new()).unwrap(), "{}");
    }
}
