use std::path::PathBuf;

use crate::submission::Blacklist;
use super::Assembly;

mod getters;
mod mk_config;

pub struct Config {
    submissions: PathBuf,
    variants: PathBuf,
    output_prefix: Box<str>,
    assembly: Assembly,
    blacklist: Blacklist,
    minimal: bool,
    json: bool,
    vcf: bool,
}
