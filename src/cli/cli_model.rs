use std::path::PathBuf;

use clap::{command, value_parser, Arg, ArgAction, Command};

use super::Assembly;
use crate::log_utils::LogLevel;

pub(super) fn cli_model() -> Command {
    command!()
    .about("Re-summarise ClinVar submissions into consensus classifications with gold star ratings")
    .next_help_heading("Arbitration")
    .arg(
        Arg::new("assembly")
            .short('a')
            .long("assembly")
            .value_parser(value_parser!(Assembly))
            .ignore_case(true)
            .default_value("GRCh38")
            .value_name("BUILD")
            .help("Genome build to use"),
    )
    .arg(
        Arg::new("blacklist")
            .short('b')
            .long("blacklist")
            .num_args(1..)
            .action(ArgAction::Append)
            .value_parser(value_parser!(String))
            .value_name("SUBMITTER")
            .help("Submitters whose evidence is not trusted (exact name, case insensitive)"),
    )
    .arg(
        Arg::new("blacklist_file")
            .long("blacklist-file")
            .value_parser(value_parser!(PathBuf))
            .value_name("FILE")
            .help("File with one blacklisted submitter per line"),
    )
    .arg(
        Arg::new("qualified_blacklist")
            .long("qualified-blacklist")
            .action(ArgAction::Append)
            .value_parser(value_parser!(String))
            .value_name("CLASS:SUBMITTER")
            .help("Ignore a submitter only for one classification (benign, pathogenic or uncertain)"),
    )
    .arg(
        Arg::new("enforce_qualified_blacklist")
            .long("enforce-qualified-blacklist")
            .action(ArgAction::SetTrue)
            .help("Drop submissions matching the qualified blacklist (by default they are only counted)"),
    )
    .arg(
        Arg::new("minimal")
            .long("minimal")
            .action(ArgAction::SetTrue)
            .help("Only keep pathogenic calls and benign calls with at least one star"),
    )
    .next_help_heading("Input/Output")
    .arg(
        Arg::new("submissions")
            .short('s')
            .long("submissions")
            .value_parser(value_parser!(PathBuf))
            .required(true)
            .value_name("FILE")
            .help("submission_summary.txt(.gz) from NCBI"),
    )
    .arg(
        Arg::new("variants")
            .short('v')
            .long("variants")
            .value_parser(value_parser!(PathBuf))
            .required(true)
            .value_name("FILE")
            .help("variant_summary.txt(.gz) from NCBI"),
    )
    .arg(
        Arg::new("output_prefix")
            .short('o')
            .long("output-prefix")
            .default_value("clinvarbitration")
            .value_parser(value_parser!(String))
            .value_name("PREFIX")
            .help("Output prefix"),
    )
    .arg(
        Arg::new("no_json")
            .long("no-json")
            .action(ArgAction::SetTrue)
            .help("Do not write JSON lines output"),
    )
    .arg(
        Arg::new("no_vcf")
            .long("no-vcf")
            .action(ArgAction::SetTrue)
            .help("Do not write pathogenic SNV VCF"),
    )
    .next_help_heading("Logging")
    .arg(
        Arg::new("loglevel")
            .short('l')
            .long("loglevel")
            .value_name("LOGLEVEL")
            .value_parser(value_parser!(LogLevel))
            .ignore_case(true)
            .default_value("info")
            .help("Set log level"),
    )
    .arg(
        Arg::new("timestamp")
            .long("timestamp")
            .action(ArgAction::SetTrue)
            .help("Prepend timestamps to log messages"),
    )
}
