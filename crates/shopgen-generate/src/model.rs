use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use shopgen_core::{DatasetCounts, TableName};

/// Options for the generation engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateOptions {
    /// Directory the CSV files and report are written to.
    pub out_dir: PathBuf,
    /// Fail when the generated dataset breaks an integrity invariant.
    pub strict: bool,
    /// Id recorded in the report; a fresh v4 uuid when unset.
    pub run_id: Option<String>,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from("out"),
            strict: false,
            run_id: None,
        }
    }
}

/// Summary of an exported table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableReport {
    pub table: TableName,
    pub file: String,
    pub rows: u64,
    pub bytes_written: u64,
}

/// Report for a generation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationReport {
    pub run_id: String,
    pub seed: u64,
    pub counts: DatasetCounts,
    pub reviews_requested: u64,
    pub tables: Vec<TableReport>,
    pub integrity_violations: u64,
    pub bytes_written: u64,
    pub duration_ms: u64,
}

impl GenerationReport {
    pub fn new(run_id: String, seed: u64) -> Self {
        Self {
            run_id,
            seed,
            counts: DatasetCounts::default(),
            reviews_requested: 0,
            tables: Vec::new(),
            integrity_violations: 0,
            bytes_written: 0,
            duration_ms: 0,
        }
    }

    pub fn record_table(&mut self, report: TableReport) {
        self.bytes_written += report.bytes_written;
        self.tables.push(report);
    }
}
