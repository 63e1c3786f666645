//! VCF to flat-table conversion
//!
//! Flattens a VCF file into a tab-separated table for spreadsheet
//! exploration: the seven static columns, one column per declared INFO field
//! (sorted lexicographically), then one genotype column per sample. The
//! transform is lossy: only GT is kept per sample, and list values collapse
//! to comma-joined text.

use crate::core::io::DEFAULT_BUFFER_SIZE;
use crate::core::reader::{VariantSource, VcfParseError, VcfReader};
use crate::core::value::{format_field, format_genotype, MISSING_FIELD};
use log::{error, info};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// The seven static VCF column names, in output order
pub const STATIC_COLUMNS: [&str; 7] = ["CHROM", "POS", "ID", "REF", "ALT", "QUAL", "FILTER"];

/// Suffix appended to each sample name in the header
const GENOTYPE_SUFFIX: &str = "_GT";

/// VCF to table conversion error
#[derive(Debug, thiserror::Error)]
pub enum TableConvertError {
    #[error("Could not open the file at {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("VCF parse error: {0}")]
    Vcf(#[from] VcfParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Conversion statistics
#[derive(Debug, Default, Clone)]
pub struct ConversionStats {
    /// Data rows written
    pub total: usize,
}

/// Flatten a VCF file into a tab-separated table
pub fn convert_vcf_to_table<P: AsRef<Path>>(
    input: P,
    output: P,
) -> Result<ConversionStats, TableConvertError> {
    let input_path = input.as_ref();
    let output_path = output.as_ref();

    let mut source = match VcfReader::from_path(input_path) {
        Ok(reader) => reader,
        Err(VcfParseError::Io(source)) => {
            error!("Could not open the vcf file at {}", input_path.display());
            return Err(TableConvertError::Open {
                path: input_path.to_path_buf(),
                source,
            });
        }
        Err(other) => return Err(TableConvertError::Vcf(other)),
    };
    let writer = match std::fs::File::create(output_path) {
        Ok(file) => BufWriter::with_capacity(DEFAULT_BUFFER_SIZE, file),
        Err(source) => {
            error!("Could not open the file at {}", output_path.display());
            return Err(TableConvertError::Open {
                path: output_path.to_path_buf(),
                source,
            });
        }
    };

    info!("Processing vcf file at {}", input_path.display());
    info!("Writing output to file {}", output_path.display());

    write_table(&mut source, writer)
}

/// Write the flat table for any variant source
///
/// The INFO column set is the source's declared catalog, sorted once up
/// front; a record lacking a field renders the missing placeholder rather
/// than shrinking the column set. An empty catalog still yields a single
/// placeholder column labeled `INFO`. Every row has the same column count as
/// the header.
pub fn write_table<S: VariantSource, W: Write>(
    source: &mut S,
    mut writer: W,
) -> Result<ConversionStats, TableConvertError> {
    let mut catalog: Vec<String> = source.info_ids().to_vec();
    catalog.sort();

    let mut header = STATIC_COLUMNS.join("\t");
    if catalog.is_empty() {
        header.push('\t');
        header.push_str("INFO");
    } else {
        for id in &catalog {
            header.push('\t');
            header.push_str(id);
        }
    }
    for sample in source.samples() {
        header.push('\t');
        header.push_str(sample);
        header.push_str(GENOTYPE_SUFFIX);
    }
    writeln!(writer, "{}", header)?;

    let sample_count = source.samples().len();
    let mut stats = ConversionStats::default();

    while let Some(record) = source.next_record() {
        let record = record?;
        let mut row = String::with_capacity(256);

        for field in record.static_fields() {
            if !row.is_empty() {
                row.push('\t');
            }
            row.push_str(&format_field(&field));
        }

        if catalog.is_empty() {
            row.push('\t');
            row.push_str(MISSING_FIELD);
        } else {
            for id in &catalog {
                row.push('\t');
                match record.info_value(id) {
                    Some(value) => row.push_str(&format_field(value)),
                    None => row.push_str(MISSING_FIELD),
                }
            }
        }

        for sample_index in 0..sample_count {
            row.push('\t');
            row.push_str(&format_genotype(record.genotype(sample_index)));
        }

        writeln!(writer, "{}", row)?;
        stats.total += 1;
    }

    writer.flush()?;
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::BufReader;

    fn convert_str(input: &str) -> Vec<String> {
        let mut source = VcfReader::new(BufReader::new(input.as_bytes())).unwrap();
        let mut out = Vec::new();
        write_table(&mut source, &mut out).unwrap();
        String::from_utf8(out)
            .unwrap()
            .lines()
            .map(|l| l.to_string())
            .collect()
    }

    #[test]
    fn test_header_and_row_shape() {
        let lines = convert_str(
            "\
##INFO=<ID=DP,Number=1,Type=Integer,Description=\"Depth\">
##INFO=<ID=AF,Number=A,Type=Float,Description=\"Frequency\">
#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\tFORMAT\tS1
chr1\t100\trs1\tA\tT\t50\tPASS\tDP=100;AF=0.5\tGT\t0/1
",
        );

        assert_eq!(
            lines[0],
            "CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tAF\tDP\tS1_GT"
        );
        assert_eq!(lines[1], "chr1\t100\trs1\tA\tT\t50\t---\t0.5\t100\t0/1");
    }

    #[test]
    fn test_catalog_sorted_lexicographically() {
        let lines = convert_str(
            "\
##INFO=<ID=MQ,Number=1,Type=Integer,Description=\"\">
##INFO=<ID=AF,Number=1,Type=Float,Description=\"\">
##INFO=<ID=DP,Number=1,Type=Integer,Description=\"\">
#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO
chr1\t100\t.\tA\tT\t.\t.\t.
",
        );
        assert_eq!(lines[0], "CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tAF\tDP\tMQ");
    }

    #[test]
    fn test_missing_info_field_renders_placeholder() {
        let lines = convert_str(
            "\
##INFO=<ID=AF,Number=1,Type=Float,Description=\"\">
##INFO=<ID=DP,Number=1,Type=Integer,Description=\"\">
#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\tFORMAT\tS1
chr1\t100\t.\tA\tT\t.\t.\tAF=0.25\tGT\t0/1
",
        );
        assert_eq!(lines[1], "chr1\t100\t---\tA\tT\t---\t---\t0.25\t---\t0/1");
    }

    #[test]
    fn test_empty_catalog_gets_placeholder_column() {
        let lines = convert_str(
            "\
#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\tFORMAT\tS1
chr1\t100\t.\tA\tT\t.\t.\t.\tGT\t1/1
",
        );
        assert_eq!(
            lines[0],
            "CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\tS1_GT"
        );
        assert_eq!(lines[1], "chr1\t100\t---\tA\tT\t---\t---\t---\t1/1");
    }

    #[test]
    fn test_flag_renders_yes() {
        let lines = convert_str(
            "\
##INFO=<ID=DB,Number=0,Type=Flag,Description=\"\">
#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO
chr1\t100\t.\tA\tT\t.\t.\tDB
",
        );
        assert!(lines[1].ends_with("\tYes"));
    }

    #[test]
    fn test_missing_genotype_renders_dot_slash_dot() {
        let lines = convert_str(
            "\
#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\tFORMAT\tS1\tS2
chr1\t100\t.\tA\tT\t.\t.\t.\tGT\t0/1
",
        );
        // S2 has no sample column at all
        assert!(lines[1].ends_with("\t0/1\t./."));
    }

    #[test]
    fn test_multi_allelic_alt_joined() {
        let lines = convert_str(
            "\
#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO
chr1\t100\t.\tA\tG,T\t.\t.\t.
",
        );
        assert_eq!(lines[1], "chr1\t100\t---\tA\tG,T\t---\t---\t---");
    }

    #[test]
    fn test_every_row_matches_header_width() {
        let lines = convert_str(
            "\
##INFO=<ID=DP,Number=1,Type=Integer,Description=\"\">
#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\tFORMAT\tS1\tS2
chr1\t100\t.\tA\tT\t.\t.\tDP=5\tGT\t0/1\t1/1
chr2\t200\t.\tG\tC\t.\t.\t.\tGT\t0/0
",
        );
        let header_width = lines[0].split('\t').count();
        assert_eq!(header_width, 7 + 1 + 2);
        for row in &lines[1..] {
            assert_eq!(row.split('\t').count(), header_width);
        }
    }
}
