// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fmt;

use thiserror::Error;

/// Which logical column of the input table a header name stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnRole {
    Concept,
    Debit,
}

impl fmt::Display for ColumnRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Concept => "concept",
            Self::Debit => "debit",
        };
        f.write_str(s)
    }
}

#[derive(Error, Debug)]
pub enum ConceptError {
    #[error("Missing required {role} column '{name}'")]
    MissingColumn { role: ColumnRole, name: String },

    #[error("Row {row}: unparseable amount '{raw}'")]
    UnparseableAmount { row: usize, raw: String },

    #[error("Row {row}: amount overflows the total for '{bucket}'")]
    Overflow { row: usize, bucket: String },

    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error("Spreadsheet error: {0}")]
    Spreadsheet(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ConceptError>;
