use std::collections::HashMap;

use serde::Serialize;

use crate::{
    arbitrate::Arbitration,
    locus::{LocusMap, LocusRecord},
    submission::Classification,
};

/// Final call for one variant, placed on the genome
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Decision {
    contig: &'static str,
    #[serde(skip)]
    rank: usize,
    position: u64,
    alleles: [Box<str>; 2],
    clinical_significance: Classification,
    gold_stars: u8,
    allele_id: u64,
}

impl Decision {
    pub fn new(locus: &LocusRecord, arb: Arbitration) -> Self {
        Self {
            contig: locus.contig(),
            rank: locus.rank(),
            position: locus.position(),
            alleles: [Box::from(locus.reference()), Box::from(locus.alternate())],
            clinical_significance: arb.classification,
            gold_stars: arb.stars,
            allele_id: locus.allele_id(),
        }
    }

    pub fn contig(&self) -> &str {
        self.contig
    }

    pub fn position(&self) -> u64 {
        self.position
    }

    pub fn reference(&self) -> &str {
        &self.alleles[0]
    }

    pub fn alternate(&self) -> &str {
        &self.alleles[1]
    }

    pub fn classification(&self) -> Classification {
        self.clinical_significance
    }

    pub fn gold_stars(&self) -> u8 {
        self.gold_stars
    }

    pub fn allele_id(&self) -> u64 {
        self.allele_id
    }

    /// Single base change
    pub fn is_snv(&self) -> bool {
        self.reference().len() == 1 && self.alternate().len() == 1
    }

    /// Kept in minimal output: all pathogenic, and benign with at least one star
    pub fn is_minimal(&self) -> bool {
        match self.clinical_significance {
            Classification::Pathogenic => true,
            Classification::Benign => self.gold_stars > 0,
            _ => false,
        }
    }
}

/// Join arbitration results back to their loci
///
/// Loci are visited in locus map order. Every locus sharing a variant ID
/// (e.g. on X and Y) gets the same call. Variants without submissions and
/// those called Uncertain or Unknown are left out
pub fn assemble(loci: &LocusMap, arbs: &HashMap<u64, Arbitration>) -> Vec<Decision> {
    loci.iter()
        .filter_map(|l| {
            arbs.get(&l.variant_id())
                .filter(|a| a.classification.is_informative())
                .map(|a| Decision::new(l, *a))
        })
        .collect()
}

/// Restrict to pathogenic and starred benign calls
pub fn minimal(mut v: Vec<Decision>) -> Vec<Decision> {
    v.retain(|d| d.is_minimal());
    v
}

/// Sort into genome order, contig first, then position. The sort is
/// stable so decisions at the same position keep their relative order
pub fn sort_decisions(v: &mut [Decision]) {
    v.sort_by_key(|d| (d.rank, d.position))
}

/// Pathogenic single nucleotide substitutions
pub fn pathogenic_snvs(v: &[Decision]) -> impl Iterator<Item = &Decision> {
    v.iter()
        .filter(|d| d.is_snv() && d.clinical_significance == Classification::Pathogenic)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{cli::Assembly, tsv::TsvReader};

    const HEADER: &str = "#AlleleID\tAssembly\tChromosome\tVariationID\tPositionVCF\tReferenceAlleleVCF\tAlternateAlleleVCF\n";

    fn loci(rows: &[(&str, u64, u64, &str, &str)]) -> LocusMap {
        let mut s = String::from(HEADER);
        for (i, (chrom, var, pos, r, a)) in rows.iter().enumerate() {
            s.push_str(&format!("{}\tGRCh38\t{chrom}\t{var}\t{pos}\t{r}\t{a}\n", 100 + i));
        }
        let mut rdr = TsvReader::new(s.as_bytes()).unwrap();
        LocusMap::from_reader(&mut rdr, Assembly::GRCh38).unwrap()
    }

    fn arb(classification: Classification, stars: u8) -> Arbitration {
        Arbitration {
            classification,
            stars,
        }
    }

    #[test]
    fn assembles_informative_calls_only() {
        let map = loci(&[
            ("1", 1, 10, "A", "G"),
            ("1", 2, 20, "A", "G"),
            ("1", 3, 30, "A", "G"),
            ("1", 4, 40, "A", "G"),
            ("1", 5, 50, "A", "G"),
        ]);
        let arbs = HashMap::from([
            (1, arb(Classification::Pathogenic, 1)),
            (2, arb(Classification::Uncertain, 1)),
            (3, arb(Classification::Unknown, 0)),
            (4, arb(Classification::Conflicting, 1)),
        ]);
        let v = assemble(&map, &arbs);
        let pos: Vec<_> = v.iter().map(|d| d.position()).collect();
        assert_eq!(pos, vec![10, 40]);
        assert_eq!(v[0].allele_id(), 100);
        assert_eq!(v[0].contig(), "chr1");
        assert_eq!(v[1].classification(), Classification::Conflicting);
    }

    #[test]
    fn shared_variant_id_gives_two_decisions() {
        let map = loci(&[("X", 9, 100, "C", "T"), ("Y", 9, 50, "C", "T")]);
        let arbs = HashMap::from([(9, arb(Classification::Benign, 3))]);
        let v = assemble(&map, &arbs);
        assert_eq!(v.len(), 2);
        assert_eq!((v[0].contig(), v[1].contig()), ("chrX", "chrY"));
    }

    #[test]
    fn sorts_by_contig_rank_then_position() {
        let map = loci(&[
            ("X", 1, 5, "A", "G"),
            ("10", 2, 500, "A", "G"),
            ("2", 3, 900, "A", "G"),
            ("10", 4, 100, "A", "G"),
            ("2", 5, 900, "A", "T"),
            ("1", 6, 1_000_000, "A", "G"),
        ]);
        let arbs: HashMap<_, _> = (1..=6)
            .map(|i| (i, arb(Classification::Pathogenic, 1)))
            .collect();
        let mut v = assemble(&map, &arbs);
        sort_decisions(&mut v);
        let order: Vec<_> = v.iter().map(|d| (d.contig(), d.position(), d.alternate())).collect();
        assert_eq!(
            order,
            vec![
                ("chr1", 1_000_000, "G"),
                ("chr2", 900, "G"),
                ("chr2", 900, "T"),
                ("chr10", 100, "G"),
                ("chr10", 500, "G"),
                ("chrX", 5, "G"),
            ]
        );
    }

    #[test]
    fn minimal_mode() {
        let map = loci(&[
            ("1", 1, 10, "A", "G"),
            ("1", 2, 20, "A", "G"),
            ("1", 3, 30, "A", "G"),
            ("1", 4, 40, "A", "G"),
        ]);
        let arbs = HashMap::from([
            (1, arb(Classification::Pathogenic, 0)),
            (2, arb(Classification::Benign, 0)),
            (3, arb(Classification::Benign, 1)),
            (4, arb(Classification::Conflicting, 2)),
        ]);
        let v = minimal(assemble(&map, &arbs));
        let pos: Vec<_> = v.iter().map(|d| d.position()).collect();
        assert_eq!(pos, vec![10, 30]);
    }

    #[test]
    fn pathogenic_snv_subset() {
        let map = loci(&[
            ("1", 1, 10, "A", "G"),
            ("1", 2, 20, "AT", "A"),
            ("1", 3, 30, "C", "T"),
            ("1", 4, 40, "G", "A"),
        ]);
        let arbs = HashMap::from([
            (1, arb(Classification::Pathogenic, 1)),
            (2, arb(Classification::Pathogenic, 1)),
            (3, arb(Classification::Benign, 1)),
            (4, arb(Classification::Pathogenic, 0)),
        ]);
        let v = assemble(&map, &arbs);
        let pos: Vec<_> = pathogenic_snvs(&v).map(|d| d.position()).collect();
        assert_eq!(pos, vec![10, 40]);
    }

    #[test]
    fn serializes_display_strings() {
        let map = loci(&[("7", 1, 10, "A", "G")]);
        let arbs = HashMap::from([(1, arb(Classification::Pathogenic, 2))]);
        let v = assemble(&map, &arbs);
        assert_eq!(
            serde_json::to_string(&v[0]).unwrap(),
            r#"{"contig":"chr7","position":10,"alleles":["A","G"],"clinical_significance":"Pathogenic/Likely Pathogenic","gold_stars":2,"allele_id":100}"#
        );
    }
}
