// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::io::{self, Write};

use crate::models::AggregationResult;
use crate::utils::{amount_table, fmt_amount, pretty_table};

pub const TOTAL_GENERAL: &str = "TOTAL GENERAL";

/// One line per concept, then the general total, then the special concept.
pub fn summary_rows(result: &AggregationResult) -> Vec<Vec<String>> {
    let mut rows: Vec<Vec<String>> = result
        .per_concept
        .iter()
        .map(|c| vec![c.concept.clone(), c.count.to_string(), fmt_amount(&c.total)])
        .collect();
    let matched_count: usize = result.per_concept.iter().map(|c| c.count).sum();
    rows.push(vec![
        TOTAL_GENERAL.to_string(),
        matched_count.to_string(),
        fmt_amount(&result.matched_total),
    ]);
    rows.push(vec![
        result.special_concept.clone(),
        result.special_rows.len().to_string(),
        fmt_amount(&result.special_total),
    ]);
    rows
}

pub fn detail_rows(result: &AggregationResult) -> Vec<Vec<String>> {
    result
        .special_rows
        .iter()
        .map(|r| {
            vec![
                r.date.clone().unwrap_or_default(),
                r.category_raw.clone(),
                fmt_amount(&r.amount),
            ]
        })
        .collect()
}

pub fn render<W: Write>(result: &AggregationResult, out: &mut W) -> io::Result<()> {
    writeln!(out, "General results")?;
    writeln!(
        out,
        "  Total of listed concepts: {}",
        fmt_amount(&result.matched_total)
    )?;
    writeln!(
        out,
        "  Total of special concept '{}': {}",
        result.special_concept,
        fmt_amount(&result.special_total)
    )?;
    writeln!(out)?;

    writeln!(out, "Summary by concept")?;
    writeln!(
        out,
        "{}",
        amount_table(&["Concept", "Rows", "Total Debit"], summary_rows(result))
    )?;
    writeln!(out)?;

    if result.special_rows.is_empty() {
        writeln!(
            out,
            "No records found for special concept '{}'.",
            result.special_concept
        )?;
    } else {
        writeln!(out, "Detail of special concept: {}", result.special_concept)?;
        writeln!(
            out,
            "{}",
            amount_table(&["Date", "Concept", "Debit"], detail_rows(result))
        )?;
    }

    if !result.excluded.is_empty() {
        writeln!(out)?;
        writeln!(
            out,
            "Excluded from totals (amount could not be read): {} row(s)",
            result.excluded.len()
        )?;
        let rows = result
            .excluded
            .iter()
            .map(|e| vec![e.row.to_string(), e.category_raw.clone(), e.amount_raw.clone()])
            .collect();
        writeln!(out, "{}", pretty_table(&["Row", "Concept", "Amount"], rows))?;
    }
    Ok(())
}

pub fn render_preview<W: Write>(
    headers: &[String],
    rows: Vec<Vec<String>>,
    out: &mut W,
) -> io::Result<()> {
    let hdr: Vec<&str> = headers.iter().map(String::as_str).collect();
    writeln!(out, "{}", pretty_table(&hdr, rows))
}
