use std::collections::HashMap;

use crate::{
    arbitrate::arbitrate_all,
    cli::Config,
    decision::{assemble, minimal, sort_decisions, Decision},
    locus::LocusMap,
    output::write_outputs,
    submission::{read_submissions, Classification},
    tsv,
};

/// Read both ClinVar extracts and produce the re-summarised decisions,
/// sorted into genome order
pub fn resummarise(cfg: &Config) -> anyhow::Result<Vec<Decision>> {
    let mut rdr = tsv::open(cfg.variants())?;
    let loci = LocusMap::from_reader(&mut rdr, cfg.assembly())?;
    info!(
        "{} {} loci read from {}",
        loci.len(),
        cfg.assembly(),
        cfg.variants().display()
    );

    let mut rdr = tsv::open(cfg.submissions())?;
    let subs = read_submissions(&mut rdr, &loci.variant_ids(), cfg.blacklist())?;
    info!(
        "Submissions for {} variants read from {}",
        subs.len(),
        cfg.submissions().display()
    );

    let arbs = arbitrate_all(&subs);
    let mut v = assemble(&loci, &arbs);
    if cfg.minimal() {
        let n = v.len();
        v = minimal(v);
        debug!("Minimal mode: {} of {} decisions kept", v.len(), n);
    }
    sort_decisions(&mut v);
    Ok(v)
}

pub fn process_data(cfg: &Config) -> anyhow::Result<()> {
    let v = resummarise(cfg)?;
    if v.is_empty() {
        return Err(anyhow!("No ClinVar decisions present"));
    }
    write_outputs(cfg, &v)?;

    let mut cts: HashMap<Classification, usize> = HashMap::new();
    for d in v.iter() {
        *cts.entry(d.classification()).or_default() += 1
    }
    for c in [
        Classification::Pathogenic,
        Classification::Benign,
        Classification::Conflicting,
    ] {
        info!("{}: {}", c, cts.get(&c).copied().unwrap_or(0));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::{fs, path::Path};

    use tempfile::TempDir;

    use super::*;
    use crate::cli::config_from_args;

    const VARIANTS: &str = "\
#AlleleID\tType\tName\tAssembly\tChromosome\tVariationID\tPositionVCF\tReferenceAlleleVCF\tAlternateAlleleVCF
11\tsingle nucleotide variant\tv1\tGRCh38\t1\t1\t100\tA\tG
12\tsingle nucleotide variant\tv2\tGRCh38\t2\t2\t50\tC\tT
13\tDeletion\tv3\tGRCh38\t1\t3\t20\tAT\tA
14\tsingle nucleotide variant\tv4\tGRCh38\t3\t4\t10\tG\tA
15\tsingle nucleotide variant\tv5\tGRCh37\tX\t5\t10\tG\tA
";

    const SUBMISSIONS: &str = "\
##Overview of interpretation
#VariationID\tClinicalSignificance\tDateLastEvaluated\tDescription\tReviewStatus\tSubmitter
1\tPathogenic\tJan 01, 2020\t-\tcriteria provided, single submitter\tLab A
1\tLikely benign\t-\t-\tcriteria provided, single submitter\tLab D
2\tBenign\tMar 03, 2018\t-\treviewed by expert panel\tLab B
2\tPathogenic\tMar 03, 2021\t-\tcriteria provided, single submitter\tLab A
3\tPathogenic\tFeb 02, 2019\t-\tno assertion criteria provided\tLab C
4\tUncertain significance\tFeb 02, 2019\t-\tcriteria provided, single submitter\tLab A
5\tPathogenic\tFeb 02, 2019\t-\tcriteria provided, single submitter\tLab A
";

    const EXPECTED_TSV: &str = "\
contig\tposition\treference\talternate\tclinical_significance\tgold_stars\tallele_id
chr1\t20\tAT\tA\tPathogenic/Likely Pathogenic\t0\t13
chr1\t100\tA\tG\tPathogenic/Likely Pathogenic\t1\t11
chr2\t50\tC\tT\tBenign\t3\t12
";

    fn setup() -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("variant_summary.txt"), VARIANTS).unwrap();
        fs::write(dir.path().join("submission_summary.txt"), SUBMISSIONS).unwrap();
        dir
    }

    fn config(dir: &Path, extra: &[&str]) -> Config {
        let p = |s: &str| dir.join(s).display().to_string();
        let mut args = vec![
            "clinvarbitration".to_owned(),
            "-s".to_owned(),
            p("submission_summary.txt"),
            "-v".to_owned(),
            p("variant_summary.txt"),
            "-o".to_owned(),
            p("out"),
        ];
        args.extend(extra.iter().map(|s| s.to_string()));
        config_from_args(args).unwrap()
    }

    #[test]
    fn end_to_end() {
        let dir = setup();
        // bgzip output needs an external binary; the VCF writer is tested separately
        let cfg = config(dir.path(), &["--no-vcf"]);
        process_data(&cfg).unwrap();

        let tsv = fs::read_to_string(dir.path().join("out.tsv")).unwrap();
        assert_eq!(tsv, EXPECTED_TSV);

        let json = fs::read_to_string(dir.path().join("out.json")).unwrap();
        let first: serde_json::Value = serde_json::from_str(json.lines().next().unwrap()).unwrap();
        assert_eq!(first["alleles"], serde_json::json!(["AT", "A"]));
        assert_eq!(json.lines().count(), 3);

        // A second run gives identical output
        process_data(&cfg).unwrap();
        let again = fs::read_to_string(dir.path().join("out.tsv")).unwrap();
        assert_eq!(tsv, again);
    }

    #[test]
    fn optional_outputs_can_be_skipped() {
        let dir = setup();
        let cfg = config(dir.path(), &["--no-json", "--no-vcf"]);
        process_data(&cfg).unwrap();
        assert!(dir.path().join("out.tsv").exists());
        assert!(!dir.path().join("out.json").exists());
        assert!(!dir.path().join("out.vcf.gz").exists());
    }

    #[test]
    fn blacklisted_expert_panel() {
        let dir = setup();
        let cfg = config(dir.path(), &["-b", "LAB B"]);
        let v = resummarise(&cfg).unwrap();
        let d = v.iter().find(|d| d.allele_id() == 12).unwrap();
        assert_eq!(d.classification(), Classification::Pathogenic);
        assert_eq!(d.gold_stars(), 1);
    }

    #[test]
    fn minimal_drops_unstarred_benign() {
        let dir = setup();
        let mut lines = SUBMISSIONS.lines().collect::<Vec<_>>();
        lines.push("4\tBenign\tFeb 02, 2019\t-\tno assertion criteria provided\tLab E");
        fs::write(dir.path().join("submission_summary.txt"), lines.join("\n")).unwrap();

        // Variant 4 is now an unstarred benign call
        let all = resummarise(&config(dir.path(), &[])).unwrap();
        assert_eq!(all.len(), 4);
        let d = all.iter().find(|d| d.allele_id() == 14).unwrap();
        assert_eq!((d.classification(), d.gold_stars()), (Classification::Benign, 0));

        let cfg = config(dir.path(), &["--minimal"]);
        let v = resummarise(&cfg).unwrap();
        assert_eq!(v.len(), 3);
        assert!(v.iter().all(|d| d.allele_id() != 14));
    }

    #[test]
    fn no_decisions_is_an_error() {
        let dir = setup();
        let cfg = config(dir.path(), &["-b", "Lab A", "Lab B", "Lab C", "Lab D", "--no-json", "--no-vcf"]);
        assert!(process_data(&cfg).is_err());
        assert!(!dir.path().join("out.tsv").exists());
    }

    #[test]
    fn grch37_build() {
        let dir = setup();
        let cfg = config(dir.path(), &["-a", "GRCh37", "--no-vcf"]);
        let v = resummarise(&cfg).unwrap();
        assert_eq!(v.len(), 1);
        assert_eq!((v[0].contig(), v[0].position()), ("X", 10));
    }
}
