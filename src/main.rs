#[macro_use]
extern crate log;
#[macro_use]
extern crate anyhow;

mod arbitrate;
mod cli;
mod decision;
mod locus;
mod log_utils;
mod output;
mod process;
mod submission;
mod tsv;

fn main() -> anyhow::Result<()> {
    let cfg = cli::handle_cli()?;
    process::process_data(&cfg)
}
