use std::path::Path;

use crate::submission::Blacklist;

use super::{super::Assembly, Config};

impl Config {
    pub fn submissions(&self) -> &Path {
        &self.submissions
    }

    pub fn variants(&self) -> &Path {
        &self.variants
    }

    pub fn output_prefix(&self) -> &str {
        &self.output_prefix
    }

    pub fn assembly(&self) -> Assembly {
        self.assembly
    }

    pub fn blacklist(&self) -> &Blacklist {
        &self.blacklist
    }

    pub fn minimal(&self) -> bool {
        self.minimal
    }

    pub fn json(&self) -> bool {
        self.json
    }

    pub fn vcf(&self) -> bool {
        self.vcf
    }
}
