// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use serde_json::json;

use super::resolve_config;
use crate::utils::{maybe_print_json, pretty_table};

pub fn handle(m: &clap::ArgMatches) -> Result<()> {
    let cfg = resolve_config(m)?;
    let rules = cfg.rules()?;

    let json_flag = m.get_flag("json");
    let jsonl_flag = m.get_flag("jsonl");
    let v = json!({
        "concepts": rules.allow_list().iter().map(|p| &p.label).collect::<Vec<_>>(),
        "special": &rules.special().label,
        "match_mode": rules.mode(),
        "columns": &cfg.columns,
    });
    if maybe_print_json(json_flag, jsonl_flag, &v)? {
        return Ok(());
    }

    let mut data: Vec<Vec<String>> = rules
        .allow_list()
        .iter()
        .map(|p| vec![p.label.clone(), "listed".to_string()])
        .collect();
    data.push(vec![rules.special().label.clone(), "special".to_string()]);
    println!("{}", pretty_table(&["Concept", "Bucket"], data));
    println!(
        "Matching: {} | columns: concept='{}' debit='{}' date={}",
        rules.mode(),
        cfg.columns.concept,
        cfg.columns.debit,
        cfg.columns.date.as_deref().unwrap_or("(auto)")
    );
    Ok(())
}
