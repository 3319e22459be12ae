use std::{
    collections::{HashMap, HashSet},
    io::BufRead,
};

use regex::Regex;

use crate::{
    cli::Assembly,
    tsv::{Column, TsvReader, TsvRecord},
};

/// Upper limit on len(ref) + len(alt)
pub const LARGEST_COMPLEX_INDEL: usize = 40;

/// Placeholder used by ClinVar for alleles without a VCF representation
const NO_ALLELE: &str = "na";

/// Positional details for one ClinVar variant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocusRecord {
    variant_id: u64,
    allele_id: u64,
    contig: &'static str,
    rank: usize,
    position: u64,
    reference: Box<str>,
    alternate: Box<str>,
}

impl LocusRecord {
    pub fn variant_id(&self) -> u64 {
        self.variant_id
    }

    pub fn allele_id(&self) -> u64 {
        self.allele_id
    }

    pub fn contig(&self) -> &'static str {
        self.contig
    }

    /// Position of the contig in genome order
    pub fn rank(&self) -> usize {
        self.rank
    }

    pub fn position(&self) -> u64 {
        self.position
    }

    pub fn reference(&self) -> &str {
        &self.reference
    }

    pub fn alternate(&self) -> &str {
        &self.alternate
    }

    /// VariationIDs can be shared between the X and Y copies of a variant,
    /// so records are keyed on contig and variant
    pub fn key(&self) -> LocusKey {
        LocusKey {
            rank: self.rank,
            variant_id: self.variant_id,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LocusKey {
    rank: usize,
    variant_id: u64,
}

#[derive(Debug, Clone, Copy)]
enum Skip {
    Assembly,
    NoAllele,
    Contig,
    Length,
    Bases,
    Parse,
}

const N_SKIP: usize = 6;
const SKIP_DESC: [&str; N_SKIP] = [
    "other assembly",
    "missing or unchanged allele",
    "non-standard contig",
    "oversized allele",
    "non-ACGTN bases",
    "unparseable field",
];

struct LocusColumns {
    allele_id: Column,
    assembly: Column,
    chrom: Column,
    variant_id: Column,
    position: Column,
    reference: Column,
    alternate: Column,
}

impl LocusColumns {
    fn new<R: BufRead>(rdr: &TsvReader<R>) -> anyhow::Result<Self> {
        Ok(Self {
            allele_id: rdr.column("AlleleID")?,
            assembly: rdr.column("Assembly")?,
            chrom: rdr.column("Chromosome")?,
            variant_id: rdr.column("VariationID")?,
            position: rdr.column("PositionVCF")?,
            reference: rdr.column("ReferenceAlleleVCF")?,
            alternate: rdr.column("AlternateAlleleVCF")?,
        })
    }
}

struct LocusFilter<'a> {
    assembly: Assembly,
    cols: &'a LocusColumns,
    bases: Regex,
}

impl LocusFilter<'_> {
    fn check(&self, rec: &TsvRecord) -> Result<LocusRecord, Skip> {
        if rec.get(self.cols.assembly) != self.assembly.tag() {
            return Err(Skip::Assembly);
        }
        let reference = rec.get(self.cols.reference);
        let alternate = rec.get(self.cols.alternate);
        if reference == NO_ALLELE || alternate == NO_ALLELE || reference == alternate {
            return Err(Skip::NoAllele);
        }
        let chrom = self.assembly.contig_name(rec.get(self.cols.chrom));
        let rank = self.assembly.contig_rank(&chrom).ok_or(Skip::Contig)?;
        if reference.len() + alternate.len() > LARGEST_COMPLEX_INDEL {
            return Err(Skip::Length);
        }
        if !(self.bases.is_match(reference) && self.bases.is_match(alternate)) {
            return Err(Skip::Bases);
        }
        let parse = |c: Column| rec.get(c).parse::<u64>().map_err(|_| Skip::Parse);
        Ok(LocusRecord {
            variant_id: parse(self.cols.variant_id)?,
            allele_id: parse(self.cols.allele_id)?,
            contig: self.assembly.contigs()[rank],
            rank,
            position: parse(self.cols.position)?,
            reference: Box::from(reference),
            alternate: Box::from(alternate),
        })
    }
}

/// Insertion ordered map from [`LocusKey`] to [`LocusRecord`]
///
/// A repeated key replaces the stored record in place, so iteration order
/// is the order in which each key was first seen
#[derive(Default, Debug)]
pub struct LocusMap {
    records: Vec<LocusRecord>,
    index: HashMap<LocusKey, usize>,
    collisions: usize,
}

impl LocusMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a record, returning true if it replaced an earlier one
    pub fn insert(&mut self, rec: LocusRecord) -> bool {
        match self.index.get(&rec.key()) {
            Some(&ix) => {
                trace!(
                    "Replacing {}:{} for variant {}",
                    rec.contig,
                    rec.position,
                    rec.variant_id
                );
                self.records[ix] = rec;
                self.collisions += 1;
                true
            }
            None => {
                self.index.insert(rec.key(), self.records.len());
                self.records.push(rec);
                false
            }
        }
    }

    pub fn get(&self, key: &LocusKey) -> Option<&LocusRecord> {
        self.index.get(key).map(|&ix| &self.records[ix])
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn collisions(&self) -> usize {
        self.collisions
    }

    pub fn iter(&self) -> impl Iterator<Item = &LocusRecord> {
        self.records.iter()
    }

    /// The raw variant identifiers (without contig)
    pub fn variant_ids(&self) -> HashSet<u64> {
        self.records.iter().map(|r| r.variant_id).collect()
    }

    /// Build the map from the variant summary for one assembly
    ///
    /// Rows for other builds, cytogenetic locations, non-standard contigs,
    /// large indels and alleles with bases outside ACGTN are dropped
    pub fn from_reader<R: BufRead>(
        rdr: &mut TsvReader<R>,
        assembly: Assembly,
    ) -> anyhow::Result<Self> {
        let cols = LocusColumns::new(rdr)?;
        let filter = LocusFilter {
            assembly,
            cols: &cols,
            bases: Regex::new("^[ACGTN]+$")?,
        };
        let mut map = Self::new();
        let mut skipped = [0usize; N_SKIP];
        let mut n = 0;
        while let Some(rec) = rdr.next_record()? {
            n += 1;
            match filter.check(&rec) {
                Ok(l) => {
                    map.insert(l);
                }
                Err(s) => skipped[s as usize] += 1,
            }
        }
        debug!(
            "Variant summary: {} rows read, {} malformed lines",
            n,
            rdr.skipped()
        );
        for (desc, ct) in SKIP_DESC.iter().zip(skipped.iter()) {
            debug!("  skipped ({}): {}", desc, ct);
        }
        if map.collisions > 0 {
            debug!(
                "{} rows replaced an earlier row for the same contig and variant",
                map.collisions
            );
        }
        Ok(map)
    }
}
