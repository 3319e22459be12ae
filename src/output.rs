use std::{
    fs::File,
    io::{self, BufWriter, Write},
};

use anyhow::Context;
use compress_io::{compress::CompressIo, compress_type::CompressType};

use crate::{
    cli::{Assembly, Config},
    decision::{pathogenic_snvs, Decision},
};

pub const TSV_KEYS: [&str; 7] = [
    "contig",
    "position",
    "reference",
    "alternate",
    "clinical_significance",
    "gold_stars",
    "allele_id",
];

pub fn write_tsv<W: Write>(wrt: &mut W, v: &[Decision]) -> io::Result<()> {
    writeln!(wrt, "{}", TSV_KEYS.join("\t"))?;
    for d in v {
        writeln!(
            wrt,
            "{}\t{}\t{}\t{}\t{}\t{}\t{}",
            d.contig(),
            d.position(),
            d.reference(),
            d.alternate(),
            d.classification(),
            d.gold_stars(),
            d.allele_id()
        )?;
    }
    Ok(())
}

/// One JSON object per line
pub fn write_json<W: Write>(wrt: &mut W, v: &[Decision]) -> anyhow::Result<()> {
    for d in v {
        serde_json::to_writer(&mut *wrt, d)?;
        writeln!(wrt)?;
    }
    Ok(())
}

fn write_vcf_header<W: Write>(wrt: &mut W, assembly: Assembly) -> io::Result<()> {
    writeln!(wrt, "##fileformat=VCFv4.2")?;
    writeln!(
        wrt,
        "##source={} {}",
        clap::crate_name!(),
        clap::crate_version!()
    )?;
    writeln!(wrt, "##reference={}", assembly)?;
    for ctg in assembly.contigs() {
        writeln!(wrt, "##contig=<ID={}>", ctg)?;
    }
    writeln!(
        wrt,
        "##INFO=<ID=allele_id,Number=1,Type=Integer,Description=\"ClinVar AlleleID\">"
    )?;
    writeln!(
        wrt,
        "##INFO=<ID=gold_stars,Number=1,Type=Integer,Description=\"Confidence rating (0-4)\">"
    )?;
    writeln!(
        wrt,
        "##INFO=<ID=clinical_significance,Number=1,Type=String,Description=\"Re-summarised clinical significance\">"
    )?;
    writeln!(wrt, "#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO")
}

/// Sites only VCF of the pathogenic SNVs. Returns the number of records
///
/// INFO values may not contain whitespace, so spaces in the
/// classification are written as '_'
pub fn write_vcf<W: Write>(wrt: &mut W, assembly: Assembly, v: &[Decision]) -> io::Result<usize> {
    write_vcf_header(wrt, assembly)?;
    let mut n = 0;
    for d in pathogenic_snvs(v) {
        writeln!(
            wrt,
            "{}\t{}\t.\t{}\t{}\t.\t.\tallele_id={};gold_stars={};clinical_significance={}",
            d.contig(),
            d.position(),
            d.reference(),
            d.alternate(),
            d.allele_id(),
            d.gold_stars(),
            d.classification().as_str().replace(' ', "_")
        )?;
        n += 1;
    }
    Ok(n)
}

/// Write all requested output files for a run
pub fn write_outputs(cfg: &Config, v: &[Decision]) -> anyhow::Result<()> {
    let prefix = cfg.output_prefix();

    let tsv_output = format!("{}.tsv", prefix);
    info!("Writing {} decisions to {}", v.len(), tsv_output);
    let mut wrt = BufWriter::new(
        File::create(&tsv_output).with_context(|| format!("Could not create {}", tsv_output))?,
    );
    write_tsv(&mut wrt, v)?;
    wrt.flush()?;

    if cfg.json() {
        let json_output = format!("{}.json", prefix);
        info!("Writing JSON lines to {}", json_output);
        let mut wrt = BufWriter::new(
            File::create(&json_output)
                .with_context(|| format!("Could not create {}", json_output))?,
        );
        write_json(&mut wrt, v)?;
        wrt.flush()?;
    }

    if cfg.vcf() {
        let vcf_output = format!("{}.vcf.gz", prefix);
        let mut wrt = CompressIo::new()
            .path(&vcf_output)
            .ctype(CompressType::Bgzip)
            .bufwriter()
            .with_context(|| format!("Could not create {}", vcf_output))?;
        let n = write_vcf(&mut wrt, cfg.assembly(), v)?;
        wrt.flush()?;
        info!("Wrote {} pathogenic SNVs to {}", n, vcf_output);
    }
    Ok(())
}
