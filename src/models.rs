// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::ConceptError;

/// One normalized input row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub row: usize,
    pub date: Option<String>,
    pub category_raw: String,
    pub category_key: String,
    pub amount: Option<Decimal>,
    pub amount_raw: String,
}

/// Output of the loader: records in input order plus per-row amount warnings.
#[derive(Debug, Default)]
pub struct LoadedTable {
    pub headers: Vec<String>,
    pub records: Vec<Record>,
    /// Always `ConceptError::UnparseableAmount`.
    pub warnings: Vec<ConceptError>,
}

impl LoadedTable {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailRow {
    pub row: usize,
    pub date: Option<String>,
    pub category_raw: String,
    pub amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConceptTotal {
    pub concept: String,
    pub total: Decimal,
    pub count: usize,
}

/// A record that matched a bucket but could not contribute to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExcludedRow {
    pub row: usize,
    pub category_raw: String,
    pub amount_raw: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregationResult {
    pub matched_total: Decimal,
    pub special_concept: String,
    pub special_total: Decimal,
    pub special_rows: Vec<DetailRow>,
    pub per_concept: Vec<ConceptTotal>,
    pub excluded: Vec<ExcludedRow>,
}
