//! Tabular driver: one CSV row in, one redacted CSV row out.

use crate::{
    adapter::{parse_record_checked, to_json, ParseOutcome},
    error::{KavachError, Result},
    record::RecordClassifier,
};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use tracing::{debug, info, warn};

pub const ID_COLUMN: &str = "record_id";
/// Data column names, in lookup order
pub const DATA_COLUMNS: [&str; 2] = ["Data_json", "data_json"];
pub const OUTPUT_HEADER: [&str; 3] = ["record_id", "redacted_data_json", "is_pii"];
pub const DEFAULT_OUTPUT_FILE: &str = "redacted_output.csv";

/// Counters for one run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipelineSummary {
    pub rows: usize,
    pub pii_rows: usize,
    /// Rows whose JSON needed the single-quote repair
    pub repaired_rows: usize,
    /// Rows whose JSON could not be parsed at all
    pub malformed_rows: usize,
    /// Rows with invalid UTF-8, decoded with replacement characters
    pub lossy_rows: usize,
}

pub struct Pipeline {
    classifier: RecordClassifier,
}

impl Pipeline {
    pub fn new(classifier: RecordClassifier) -> Self {
        Self { classifier }
    }

    /// Stream rows from `input` to `output`. Fails only on I/O or a missing data
    /// column; a row that is not valid UTF-8 is decoded lossily and still written.
    pub fn run<R: Read, W: Write>(&self, input: R, output: W) -> Result<PipelineSummary> {
        let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(input);
        let headers = reader.headers()?.clone();

        let id_idx = headers.iter().position(|h| h == ID_COLUMN);
        let data_idx: Vec<usize> = DATA_COLUMNS
            .iter()
            .filter_map(|name| headers.iter().position(|h| h == *name))
            .collect();
        if data_idx.is_empty() {
            return Err(KavachError::MissingColumn(DATA_COLUMNS.join(" or ")));
        }
        if id_idx.is_none() {
            warn!(column = ID_COLUMN, "input has no id column, output ids will be empty");
        }

        let mut writer = csv::Writer::from_writer(output);
        writer.write_record(OUTPUT_HEADER)?;

        let mut summary = PipelineSummary::default();
        for (line, row) in reader.byte_records().enumerate() {
            let row = row?;
            let cell = |i: usize| row.get(i).map(String::from_utf8_lossy);
            if std::str::from_utf8(row.as_slice()).is_err() {
                warn!(row = line + 1, "row is not valid UTF-8, decoding lossily");
                summary.lossy_rows += 1;
            }

            let record_id = id_idx.and_then(cell).unwrap_or_default();
            let raw = data_idx
                .iter()
                .filter_map(|i| cell(*i))
                .find(|v| !v.is_empty())
                .unwrap_or_default();

            let (record, outcome) = parse_record_checked(&raw);
            match outcome {
                ParseOutcome::Parsed => {}
                ParseOutcome::QuotesRepaired => summary.repaired_rows += 1,
                ParseOutcome::Empty => summary.malformed_rows += 1,
            }

            let result = self.classifier.classify(&record);
            let flag = if result.is_pii { "True" } else { "False" };
            let json = to_json(&result.redacted)?;
            writer.write_record([&*record_id, json.as_str(), flag])?;

            debug!(record_id = %record_id, is_pii = result.is_pii, "row written");
            summary.rows += 1;
            if result.is_pii {
                summary.pii_rows += 1;
            }
        }
        writer.flush()?;

        info!(
            rows = summary.rows,
            pii_rows = summary.pii_rows,
            repaired = summary.repaired_rows,
            malformed = summary.malformed_rows,
            lossy = summary.lossy_rows,
            "pipeline finished"
        );
        Ok(summary)
    }

    pub fn run_files(&self, input: &Path, output: &Path) -> Result<PipelineSummary> {
        let input = File::open(input)?;
        let output = File::create(output)?;
        self.run(input, output)
    }
}
