use std::{fmt, str::FromStr};

use clap::{builder::PossibleValue, ValueEnum};

const GRCH37_CONTIGS: [&str; 25] = [
    "1", "2", "3", "4", "5", "6", "7", "8", "9", "10", "11", "12", "13", "14", "15", "16", "17",
    "18", "19", "20", "21", "22", "X", "Y", "MT",
];

const GRCH38_CONTIGS: [&str; 25] = [
    "chr1", "chr2", "chr3", "chr4", "chr5", "chr6", "chr7", "chr8", "chr9", "chr10", "chr11",
    "chr12", "chr13", "chr14", "chr15", "chr16", "chr17", "chr18", "chr19", "chr20", "chr21",
    "chr22", "chrX", "chrY", "chrM",
];

/// Genome build. Selects the rows of the variant summary to use and the
/// contig naming convention of the output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Assembly {
    GRCh37,
    #[default]
    GRCh38,
}

impl Assembly {
    /// Value of the `Assembly` column for this build
    pub fn tag(&self) -> &'static str {
        match self {
            Self::GRCh37 => "GRCh37",
            Self::GRCh38 => "GRCh38",
        }
    }

    /// Contigs in genome order
    pub fn contigs(&self) -> &'static [&'static str] {
        match self {
            Self::GRCh37 => &GRCH37_CONTIGS,
            Self::GRCh38 => &GRCH38_CONTIGS,
        }
    }

    /// Contig name used in output for the raw `Chromosome` column value
    ///
    /// ClinVar uses bare names ("1", "X", "MT") for both builds; GRCh38
    /// output is `chr` prefixed. Note that "MT" becomes "chrMT", which is
    /// not a GRCh38 contig, so mitochondrial GRCh38 rows are dropped
    pub fn contig_name(&self, chrom: &str) -> String {
        match self {
            Self::GRCh37 => chrom.to_owned(),
            Self::GRCh38 => format!("chr{}", chrom),
        }
    }

    /// Rank of a (converted) contig name in genome order
    pub fn contig_rank(&self, ctg: &str) -> Option<usize> {
        self.contigs().iter().position(|c| *c == ctg)
    }
}

impl fmt::Display for Assembly {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Assembly {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("grch37") {
            Ok(Self::GRCh37)
        } else if s.eq_ignore_ascii_case("grch38") {
            Ok(Self::GRCh38)
        } else {
            Err(anyhow!(
                "Unsupported genome build '{}' (expected GRCh37 or GRCh38)",
                s
            ))
        }
    }
}

impl ValueEnum for Assembly {
    fn value_variants<'a>() -> &'a [Self] {
        &[Self::GRCh37, Self::GRCh38]
    }

    fn to_possible_value(&self) -> Option<PossibleValue> {
        Some(PossibleValue::new(self.tag()))
    }
}
