use std::{
    collections::{HashMap, HashSet},
    fmt,
    io::BufRead,
};

use anyhow::Context;
use chrono::NaiveDate;
use serde::{Serialize, Serializer};

use crate::tsv::{Column, TsvReader};

const PATHOGENIC_SIGS: [&str; 5] = [
    "Pathogenic",
    "Likely pathogenic",
    "Pathogenic, low penetrance",
    "Likely pathogenic, low penetrance",
    "Pathogenic/Likely pathogenic",
];

const BENIGN_SIGS: [&str; 4] = ["Benign", "Likely benign", "Benign/Likely benign", "protective"];

const UNCERTAIN_SIGS: [&str; 2] = ["Uncertain significance", "Uncertain risk allele"];

/// Format of DateLastEvaluated, e.g. "Jun 29, 2015"
const DATE_FORMAT: &str = "%b %d, %Y";

/// DateLastEvaluated value for undated submissions
const NO_DATE: &str = "-";

/// Date given to undated submissions
pub fn very_old() -> NaiveDate {
    NaiveDate::from_ymd_opt(1970, 1, 1).unwrap_or(NaiveDate::MIN)
}

/// Clinical significance as used for arbitration
///
/// `Conflicting` is only ever produced by the consensus step, never read
/// from a submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Classification {
    Benign,
    Pathogenic,
    Uncertain,
    Conflicting,
    Unknown,
}

impl Classification {
    /// Map ClinVar's free text clinical significance
    pub fn from_significance(s: &str) -> Self {
        if PATHOGENIC_SIGS.contains(&s) {
            Self::Pathogenic
        } else if BENIGN_SIGS.contains(&s) {
            Self::Benign
        } else if UNCERTAIN_SIGS.contains(&s) {
            Self::Uncertain
        } else {
            Self::Unknown
        }
    }

    /// Output representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Benign => "Benign",
            Self::Pathogenic => "Pathogenic/Likely Pathogenic",
            Self::Uncertain => "VUS",
            Self::Conflicting => "Conflicting",
            Self::Unknown => "Unknown",
        }
    }

    /// Parse a short name as given on the command line
    pub fn from_name(s: &str) -> anyhow::Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "benign" => Ok(Self::Benign),
            "pathogenic" => Ok(Self::Pathogenic),
            "uncertain" | "vus" => Ok(Self::Uncertain),
            _ => Err(anyhow!(
                "Unknown classification '{}' (expected benign, pathogenic or uncertain)",
                s
            )),
        }
    }

    /// Does this carry an actionable call?
    pub fn is_informative(&self) -> bool {
        !matches!(self, Self::Uncertain | Self::Unknown)
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Classification {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// One laboratory's assertion about one variant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    date: NaiveDate,
    submitter: Box<str>,
    classification: Classification,
    review_status: Box<str>,
}

impl Submission {
    /// Submitter and review status are stored lower case
    #[cfg(test)]
    pub fn new(
        date: NaiveDate,
        submitter: &str,
        classification: Classification,
        review_status: &str,
    ) -> Self {
        Self {
            date,
            submitter: Box::from(submitter.to_lowercase()),
            classification,
            review_status: Box::from(review_status.to_lowercase()),
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn submitter(&self) -> &str {
        &self.submitter
    }

    pub fn classification(&self) -> Classification {
        self.classification
    }

    pub fn review_status(&self) -> &str {
        &self.review_status
    }
}

/// Parse DateLastEvaluated. "-" gives the 1970 placeholder date
pub fn parse_date(s: &str) -> anyhow::Result<NaiveDate> {
    if s == NO_DATE {
        Ok(very_old())
    } else {
        NaiveDate::parse_from_str(s, DATE_FORMAT)
            .with_context(|| format!("Could not parse date '{}'", s))
    }
}

/// Submitters whose evidence is not used
///
/// The global list removes every submission from a submitter. The
/// qualified list names submitters per classification. Qualified matches
/// are only removed when `enforce_qualified` is set; otherwise they are
/// counted and kept.
#[derive(Debug, Clone)]
pub struct Blacklist {
    submitters: HashSet<Box<str>>,
    qualified: Vec<(Classification, Vec<Box<str>>)>,
    enforce_qualified: bool,
}

impl Default for Blacklist {
    fn default() -> Self {
        Self {
            submitters: HashSet::new(),
            qualified: vec![(
                Classification::Benign,
                vec![Box::from("illumina laboratory services; illumina")],
            )],
            enforce_qualified: false,
        }
    }
}

impl Blacklist {
    pub fn new() -> Self {
        Self::default()
    }

    /// Names are matched exactly after lower casing
    pub fn add_submitter(&mut self, name: &str) {
        let name = name.trim();
        if !name.is_empty() {
            self.submitters.insert(Box::from(name.to_lowercase()));
        }
    }

    pub fn add_qualified(&mut self, cls: Classification, name: &str) {
        let name: Box<str> = Box::from(name.trim().to_lowercase());
        match self.qualified.iter_mut().find(|(c, _)| *c == cls) {
            Some((_, v)) => v.push(name),
            None => self.qualified.push((cls, vec![name])),
        }
    }

    pub fn set_enforce_qualified(&mut self, x: bool) {
        self.enforce_qualified = x
    }

    pub fn enforce_qualified(&self) -> bool {
        self.enforce_qualified
    }

    pub fn n_submitters(&self) -> usize {
        self.submitters.len()
    }

    pub fn contains(&self, submitter: &str) -> bool {
        self.submitters.contains(submitter)
    }

    pub fn qualified_match(&self, cls: Classification, submitter: &str) -> bool {
        self.qualified
            .iter()
            .any(|(c, v)| *c == cls && v.iter().any(|s| s.as_ref() == submitter))
    }
}

pub type SubmissionMap = HashMap<u64, Vec<Submission>>;

struct SubmissionColumns {
    variant_id: Column,
    significance: Column,
    date: Column,
    review_status: Column,
    submitter: Column,
}

impl SubmissionColumns {
    fn new<R: BufRead>(rdr: &TsvReader<R>) -> anyhow::Result<Self> {
        Ok(Self {
            variant_id: rdr.column("VariationID")?,
            significance: rdr.column("ClinicalSignificance")?,
            date: rdr.column("DateLastEvaluated")?,
            review_status: rdr.column("ReviewStatus")?,
            submitter: rdr.column("Submitter")?,
        })
    }
}

#[derive(Default, Debug)]
struct IngestCounts {
    read: usize,
    unknown_variant: usize,
    blacklisted: usize,
    unknown_class: usize,
    qualified: usize,
    kept: usize,
}

/// Collect submissions per VariationID
///
/// Only variants in `var_ids` are kept, which also drops haplotypes,
/// CNVs and SVs that have no positional record. Submissions from
/// blacklisted submitters and those with unrecognised significance are
/// dropped. A malformed date on a kept row is a fatal error
pub fn read_submissions<R: BufRead>(
    rdr: &mut TsvReader<R>,
    var_ids: &HashSet<u64>,
    blacklist: &Blacklist,
) -> anyhow::Result<SubmissionMap> {
    let cols = SubmissionColumns::new(rdr)?;
    let mut map = SubmissionMap::new();
    let mut cts = IngestCounts::default();

    while let Some(rec) = rdr.next_record()? {
        cts.read += 1;
        let var_id = match rec.get(cols.variant_id).parse::<u64>() {
            Ok(v) if var_ids.contains(&v) => v,
            _ => {
                cts.unknown_variant += 1;
                continue;
            }
        };
        let submitter = rec.get(cols.submitter).to_lowercase();
        if blacklist.contains(&submitter) {
            cts.blacklisted += 1;
            continue;
        }
        let classification = Classification::from_significance(rec.get(cols.significance));
        if classification == Classification::Unknown {
            cts.unknown_class += 1;
            continue;
        }
        if blacklist.qualified_match(classification, &submitter) {
            cts.qualified += 1;
            if blacklist.enforce_qualified() {
                continue;
            }
        }
        let date = parse_date(rec.get(cols.date))
            .with_context(|| format!("Bad DateLastEvaluated at line {}", rec.line()))?;
        let sub = Submission {
            date,
            submitter: Box::from(submitter),
            classification,
            review_status: Box::from(rec.get(cols.review_status).to_lowercase()),
        };
        trace!("Variant {}: {:?}", var_id, sub);
        map.entry(var_id).or_default().push(sub);
        cts.kept += 1;
    }

    debug!(
        "Submission summary: {} rows read, {} malformed lines",
        cts.read,
        rdr.skipped()
    );
    debug!(
        "  skipped: {} unmapped variant, {} blacklisted, {} unknown significance",
        cts.unknown_variant, cts.blacklisted, cts.unknown_class
    );
    if blacklist.enforce_qualified() {
        debug!("  skipped: {} qualified blacklist", cts.qualified);
    } else if cts.qualified > 0 {
        debug!(
            "  {} submissions match the qualified blacklist (kept, not enforced)",
            cts.qualified
        );
    }
    debug!("  kept {} submissions for {} variants", cts.kept, map.len());
    Ok(map)
}
