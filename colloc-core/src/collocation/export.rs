//! Tabular export of collocation results.
//!
//! Rows are written as CSV with the header
//! `bigram,word1,word2,frequency,pmi_score,chi_square_score`, in
//! PMI-descending order. Floats use the shortest representation that
//! parses back to the same value, so a write/read cycle is lossless.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use colloc_types::{AssociationMeasure, BigramKey, ExportRecord};
use rustc_hash::FxHashMap;
use tracing::debug;

use crate::collocation::table::FrequencyTable;
use crate::collocation::types::{BigramAnalyzer, EXPORT_LIMIT};
use crate::error::ExportError;

/// Column names of the exported table.
pub const HEADER: [&str; 6] = [
    "bigram",
    "word1",
    "word2",
    "frequency",
    "pmi_score",
    "chi_square_score",
];

impl BigramAnalyzer {
    /// Builds export rows for the top bigrams of `tokens` by PMI.
    ///
    /// Scores come from a table of `tokens`; `frequency` is the bigram's
    /// count in the cumulative table, 0 if it was never extracted.
    pub fn export_records<S: AsRef<str>>(&self, tokens: &[S]) -> Vec<ExportRecord> {
        self.export_records_with_limit(tokens, EXPORT_LIMIT)
    }

    /// Like [`BigramAnalyzer::export_records`] with a custom row limit.
    pub fn export_records_with_limit<S: AsRef<str>>(
        &self,
        tokens: &[S],
        limit: usize,
    ) -> Vec<ExportRecord> {
        let table = FrequencyTable::from_tokens(tokens);
        let chi: FxHashMap<BigramKey, f64> = table
            .ranked(AssociationMeasure::ChiSquare, 0)
            .into_iter()
            .collect();

        let records: Vec<ExportRecord> = table
            .ranked(AssociationMeasure::Pmi, 0)
            .into_iter()
            .take(limit)
            .filter_map(|(key, pmi_score)| {
                let bigram = table.bigram(key)?;
                Some(ExportRecord {
                    bigram: bigram.phrase(),
                    frequency: self.frequency(&bigram),
                    chi_square_score: chi.get(&key).copied().unwrap_or(0.0),
                    pmi_score,
                    word1: bigram.first,
                    word2: bigram.second,
                })
            })
            .collect();

        debug!(rows = records.len(), "built export records");
        records
    }

    /// Builds export rows for `tokens` and writes them to `path`.
    ///
    /// # Errors
    ///
    /// Returns `ExportError` if the file cannot be created or written.
    pub fn export_to_path<S: AsRef<str>>(
        &self,
        tokens: &[S],
        path: impl AsRef<Path>,
    ) -> Result<usize, ExportError> {
        let records = self.export_records(tokens);
        save_records(path, &records)?;
        Ok(records.len())
    }
}

/// Writes `records` as CSV, header first.
///
/// # Errors
///
/// Returns `ExportError` on serialization or IO failure.
pub fn write_records<W: Write>(writer: W, records: &[ExportRecord]) -> Result<(), ExportError> {
    let mut out = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    out.write_record(HEADER)?;
    for record in records {
        out.serialize(record)?;
    }
    out.flush()?;
    Ok(())
}

/// Reads CSV rows written by [`write_records`].
///
/// # Errors
///
/// Returns `ExportError::Csv` for malformed rows or missing columns.
pub fn read_records<R: Read>(reader: R) -> Result<Vec<ExportRecord>, ExportError> {
    let mut input = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(reader);
    let records = input
        .deserialize()
        .collect::<Result<Vec<ExportRecord>, csv::Error>>()?;
    Ok(records)
}

/// Writes `records` to a file at `path`.
///
/// # Errors
///
/// Returns `ExportError` if the file cannot be created or written.
pub fn save_records(path: impl AsRef<Path>, records: &[ExportRecord]) -> Result<(), ExportError> {
    let path = path.as_ref();
    let file = File::create(path)?;
    write_records(BufWriter::new(file), records)?;
    debug!(path = %path.display(), rows = records.len(), "saved export");
    Ok(())
}

/// Reads records from a file at `path`.
///
/// # Errors
///
/// Returns `ExportError` if the file cannot be opened or parsed.
pub fn load_records(path: impl AsRef<Path>) -> Result<Vec<ExportRecord>, ExportError> {
    let file = File::open(path)?;
    read_records(BufReader::new(file))
}
