use std::{
    io::BufRead,
    path::{Path, PathBuf},
};

use anyhow::Context;
use clap::ArgMatches;
use compress_io::compress::CompressIo;

use crate::submission::{Blacklist, Classification};

use super::{super::Assembly, Config};

impl Config {
    pub fn from_matches(m: &ArgMatches) -> anyhow::Result<Self> {
        let submissions = m
            .get_one::<PathBuf>("submissions")
            .cloned()
            .expect("Missing submissions"); // Should be enforced by clap
        let variants = m
            .get_one::<PathBuf>("variants")
            .cloned()
            .expect("Missing variants"); // Should be enforced by clap

        let output_prefix = m
            .get_one::<String>("output_prefix")
            .map(|s| Box::from(s.as_str()))
            .unwrap();

        let assembly = m.get_one::<Assembly>("assembly").copied().unwrap_or_default();

        let minimal = m.get_flag("minimal");
        let json = !m.get_flag("no_json");
        let vcf = !m.get_flag("no_vcf");

        let mut blacklist = Blacklist::new();
        if let Some(v) = m.get_many::<String>("blacklist") {
            v.for_each(|s| blacklist.add_submitter(s))
        }
        if let Some(file) = m.get_one::<PathBuf>("blacklist_file") {
            read_blacklist(file, &mut blacklist)
                .with_context(|| format!("Could not read blacklist from {}", file.display()))?
        }
        if let Some(v) = m.get_many::<String>("qualified_blacklist") {
            for s in v {
                let (cls, name) = parse_qualified(s)?;
                blacklist.add_qualified(cls, name)
            }
        }
        blacklist.set_enforce_qualified(m.get_flag("enforce_qualified_blacklist"));
        if blacklist.n_submitters() > 0 {
            debug!("{} blacklisted submitters", blacklist.n_submitters());
        }

        Ok(Config {
            submissions,
            variants,
            output_prefix,
            assembly,
            blacklist,
            minimal,
            json,
            vcf,
        })
    }
}

/// Split a `CLASS:SUBMITTER` pair. Submitter names can contain ':'
fn parse_qualified(s: &str) -> anyhow::Result<(Classification, &str)> {
    let (cls, name) = s
        .split_once(':')
        .ok_or_else(|| anyhow!("Qualified blacklist entry '{}' is not CLASS:SUBMITTER", s))?;
    if name.trim().is_empty() {
        return Err(anyhow!("Empty submitter in qualified blacklist entry '{}'", s));
    }
    Ok((Classification::from_name(cls.trim())?, name))
}

/// One submitter per line. Blank lines and lines starting with '#' are ignored
fn read_blacklist<S: AsRef<Path>>(file: S, blacklist: &mut Blacklist) -> anyhow::Result<()> {
    let file = file.as_ref();
    let mut rdr = CompressIo::new().path(file).bufreader()?;
    let mut buf = String::new();
    debug!("Reading in blacklist from {}", file.display());
    let mut cts = (0, 0);
    loop {
        if rdr.read_line(&mut buf)? == 0 {
            break;
        }
        cts.0 += 1;
        let s = buf.trim();
        if !(s.is_empty() || s.starts_with('#')) {
            blacklist.add_submitter(s);
            cts.1 += 1;
        }
        buf.clear();
    }
    debug!("Lines read: {}, submitters: {}", cts.0, cts.1);
    Ok(())
}
