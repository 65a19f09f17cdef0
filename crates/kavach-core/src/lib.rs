//! Rule-based PII detection and redaction for key/value records.
//!
//! Standalone identifiers (phone, Aadhaar, passport, UPI handle) are masked whenever
//! their field holds a value of the right shape. Weaker signals (full name, email,
//! address, device/IP) only count once enough of them appear in the same record.

pub mod adapter;
pub mod detector;
pub mod error;
pub mod pipeline;
pub mod policy;
pub mod record;
pub mod redactor;
pub mod types;

pub use adapter::{parse_record, parse_record_checked, to_json, ParseOutcome};
pub use error::{KavachError, Result};
pub use pipeline::{Pipeline, PipelineSummary, DEFAULT_OUTPUT_FILE};
pub use policy::{AddressHeuristic, DetectionPolicy, PolicyBuilder};
pub use record::{Classification, FieldHit, HitReason, RecordClassifier};
pub use types::{ComboSignal, FieldKind, Record, SENTINEL};
