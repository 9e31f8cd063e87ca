// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use crate::error::{ConceptError, Result};
use crate::models::{AggregationResult, ConceptTotal, DetailRow, ExcludedRow, Record};
use crate::normalize::category_key;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Pattern appears anywhere in the concept.
    #[default]
    Contains,
    /// Concept starts with the pattern.
    Prefix,
}

impl MatchMode {
    pub fn from_key(key: &str) -> Option<Self> {
        match key.trim().to_ascii_lowercase().as_str() {
            "contains" => Some(Self::Contains),
            "prefix" | "starts_with" => Some(Self::Prefix),
            _ => None,
        }
    }
}

impl fmt::Display for MatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Contains => f.write_str("contains"),
            Self::Prefix => f.write_str("prefix"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    pub label: String,
    key: String,
}

impl Pattern {
    pub fn new(label: &str) -> Self {
        Self {
            label: label.trim().to_string(),
            key: category_key(label),
        }
    }

    fn matches(&self, key: &str, mode: MatchMode) -> bool {
        match mode {
            MatchMode::Contains => key.contains(&self.key),
            MatchMode::Prefix => key.starts_with(&self.key),
        }
    }
}

/// The allow-list and the special concept for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryRules {
    allow: Vec<Pattern>,
    special: Pattern,
    mode: MatchMode,
}

impl CategoryRules {
    pub fn new<S: AsRef<str>>(allow: &[S], special: &str, mode: MatchMode) -> Result<Self> {
        let allow: Vec<Pattern> = allow.iter().map(|s| Pattern::new(s.as_ref())).collect();
        let special = Pattern::new(special);
        if special.key.is_empty() || allow.iter().any(|p| p.key.is_empty()) {
            return Err(ConceptError::Config("empty concept pattern".into()));
        }
        Ok(Self {
            allow,
            special,
            mode,
        })
    }

    pub fn allow_list(&self) -> &[Pattern] {
        &self.allow
    }

    pub fn special(&self) -> &Pattern {
        &self.special
    }

    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    pub fn is_special(&self, key: &str) -> bool {
        self.special.matches(key, self.mode)
    }

    /// Index of the first allow-list entry the key matches.
    pub fn allow_index(&self, key: &str) -> Option<usize> {
        self.allow.iter().position(|p| p.matches(key, self.mode))
    }
}

enum Bucket {
    Special,
    Concept(usize),
}

pub struct Aggregator {
    rules: CategoryRules,
}

impl Aggregator {
    pub fn new(rules: CategoryRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &CategoryRules {
        &self.rules
    }

    fn bucket(&self, record: &Record) -> Option<Bucket> {
        if self.rules.is_special(&record.category_key) {
            return Some(Bucket::Special);
        }
        self.rules
            .allow_index(&record.category_key)
            .map(Bucket::Concept)
    }

    /// Sums never wrap: a total that would leave the `Decimal` range is an error.
    pub fn aggregate(&self, records: &[Record]) -> Result<AggregationResult> {
        let mut per_concept: Vec<ConceptTotal> = self
            .rules
            .allow
            .iter()
            .map(|p| ConceptTotal {
                concept: p.label.clone(),
                total: Decimal::ZERO,
                count: 0,
            })
            .collect();
        let mut matched_total = Decimal::ZERO;
        let mut special_total = Decimal::ZERO;
        let mut special_rows = Vec::new();
        let mut excluded = Vec::new();

        for record in records {
            let Some(bucket) = self.bucket(record) else {
                continue;
            };
            let Some(amount) = record.amount else {
                if !record.amount_raw.trim().is_empty() {
                    excluded.push(ExcludedRow {
                        row: record.row,
                        category_raw: record.category_raw.clone(),
                        amount_raw: record.amount_raw.clone(),
                    });
                }
                continue;
            };
            match bucket {
                Bucket::Special => {
                    let label = &self.rules.special.label;
                    special_total = checked_add(special_total, amount, record, label)?;
                    special_rows.push(DetailRow {
                        row: record.row,
                        date: record.date.clone(),
                        category_raw: record.category_raw.clone(),
                        amount,
                    });
                }
                Bucket::Concept(i) => {
                    let line = &mut per_concept[i];
                    line.total = checked_add(line.total, amount, record, &line.concept)?;
                    line.count += 1;
                    matched_total =
                        checked_add(matched_total, amount, record, "all listed concepts")?;
                }
            }
        }

        debug!(
            records = records.len(),
            special = special_rows.len(),
            excluded = excluded.len(),
            "aggregated"
        );
        Ok(AggregationResult {
            matched_total,
            special_concept: self.rules.special.label.clone(),
            special_total,
            special_rows,
            per_concept,
            excluded,
        })
    }
}

fn checked_add(total: Decimal, amount: Decimal, record: &Record, bucket: &str) -> Result<Decimal> {
    total
        .checked_add(amount)
        .ok_or_else(|| ConceptError::Overflow {
            row: record.row,
            bucket: bucket.to_string(),
        })
}
