// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, crate_version};

fn json_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print JSON Lines"),
    )
}

pub fn build_cli() -> Command {
    let analyze = Command::new("analyze")
        .about("Sum listed concepts and itemize the special concept of a statement file")
        .arg(
            Arg::new("path")
                .long("path")
                .short('p')
                .required(true)
                .help("Statement file (.csv, .xlsx, .xls, .ods)"),
        )
        .arg(
            Arg::new("bank")
                .long("bank")
                .value_parser(["credicoop", "galicia"])
                .help("Column layout preset"),
        )
        .arg(
            Arg::new("concept_col")
                .long("concept-col")
                .help("Header of the concept column"),
        )
        .arg(
            Arg::new("debit_col")
                .long("debit-col")
                .help("Header of the debit column"),
        )
        .arg(
            Arg::new("date_col")
                .long("date-col")
                .help("Header of the date column (default: auto-detect)"),
        )
        .arg(
            Arg::new("match")
                .long("match")
                .value_parser(["contains", "prefix"])
                .help("How concept patterns are matched"),
        )
        .arg(
            Arg::new("preview")
                .long("preview")
                .action(ArgAction::SetTrue)
                .help("Show the first rows of the file before the results"),
        );

    Command::new("conceptscan")
        .version(crate_version!())
        .about("Bank statement concept totals")
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .help("JSON config file (default: user config dir)"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .action(ArgAction::Count)
                .help("More log output (-v info, -vv debug)"),
        )
        .subcommand(json_args(analyze))
        .subcommand(json_args(
            Command::new("concepts").about("List the configured concepts and special concept"),
        ))
}
