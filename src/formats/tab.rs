//! Tab-separated variant list to VCF conversion
//!
//! The input is a header-bearing tab-separated file of
//! (chromosome, position, reference, alternate) tuples. Output is a minimal
//! VCF 4.1 file with one dummy sample genotyped `1/1` on every record.

use crate::core::io::{open_input, DEFAULT_BUFFER_SIZE};
use log::{error, info};
use memchr::memchr;
use std::io::{BufRead, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Expected number of fields per data line
pub const TAB_FIELD_COUNT: usize = 4;

/// Fixed VCF header emitted before the data lines
const VCF_HEADER: &str = "\
##fileformat=VCFv4.1
##FORMAT=<ID=GT,Number=1,Type=String,Description=\"Genotype\">
#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\tFORMAT\tDummy_Sample";

/// Zero-copy view over one 4-field tab line
///
/// Field content is not validated; only the field count is.
#[derive(Debug)]
pub struct TabRecordView<'a> {
    pub chrom: &'a str,
    pub pos: &'a str,
    pub ref_allele: &'a str,
    pub alt_allele: &'a str,
}

/// Tab line with the wrong field count
#[derive(Debug, thiserror::Error)]
#[error("expected exactly 4 tab-separated fields, found {found}")]
pub struct TabParseError {
    pub found: usize,
}

impl<'a> TabRecordView<'a> {
    /// Split a line on tabs into exactly 4 fields
    pub fn parse(line: &'a str) -> Result<Self, TabParseError> {
        let bytes = line.as_bytes();
        let mut bounds = [(0usize, 0usize); TAB_FIELD_COUNT];
        let mut count = 0;
        let mut start = 0;

        loop {
            match memchr(b'\t', &bytes[start..]) {
                Some(offset) => {
                    if count < TAB_FIELD_COUNT {
                        bounds[count] = (start, start + offset);
                    }
                    count += 1;
                    start += offset + 1;
                }
                None => {
                    if count < TAB_FIELD_COUNT {
                        bounds[count] = (start, bytes.len());
                    }
                    count += 1;
                    break;
                }
            }
        }

        if count != TAB_FIELD_COUNT {
            return Err(TabParseError { found: count });
        }

        Ok(Self {
            chrom: &line[bounds[0].0..bounds[0].1],
            pos: &line[bounds[1].0..bounds[1].1],
            ref_allele: &line[bounds[2].0..bounds[2].1],
            alt_allele: &line[bounds[3].0..bounds[3].1],
        })
    }
}

/// Tab to VCF conversion error
#[derive(Debug, thiserror::Error)]
pub enum TabConvertError {
    #[error("Could not open the file at {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Line {line}: expected exactly 4 tab-separated fields, found {found}")]
    FieldCount { line: usize, found: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Conversion statistics
#[derive(Debug, Default, Clone)]
pub struct ConversionStats {
    /// Data lines converted
    pub total: usize,
}

/// Convert a tab-separated variant list into a VCF 4.1 file
///
/// The first input line is discarded unconditionally as a header row, even
/// when blank. Every remaining line must split into exactly 4 tab-separated
/// fields; a line that does not aborts the conversion, leaving the output
/// written so far on disk.
pub fn convert_tab_to_vcf<P: AsRef<Path>>(
    input: P,
    output: P,
) -> Result<ConversionStats, TabConvertError> {
    let input_path = input.as_ref();
    let output_path = output.as_ref();

    let mut reader = match open_input(input_path) {
        Ok(reader) => reader,
        Err(source) => {
            error!("Could not open the file at {}", input_path.display());
            return Err(TabConvertError::Open {
                path: input_path.to_path_buf(),
                source,
            });
        }
    };
    let mut writer = match std::fs::File::create(output_path) {
        Ok(file) => BufWriter::with_capacity(DEFAULT_BUFFER_SIZE, file),
        Err(source) => {
            error!("Could not open the file at {}", output_path.display());
            return Err(TabConvertError::Open {
                path: output_path.to_path_buf(),
                source,
            });
        }
    };

    info!("Processing input file at {}", input_path.display());
    info!("Writing output to {}", output_path.display());

    let mut line_buf = String::with_capacity(4096);

    // Discard the first line unconditionally (header row, even if blank)
    reader.read_line(&mut line_buf)?;
    let mut line_number = 1;

    writeln!(writer, "{}", VCF_HEADER)?;

    let mut stats = ConversionStats::default();
    loop {
        line_buf.clear();
        let bytes_read = reader.read_line(&mut line_buf)?;
        if bytes_read == 0 {
            break;
        }
        line_number += 1;

        // Strip only the line terminator; trailing tabs are field content
        if line_buf.ends_with('\n') {
            line_buf.pop();
            if line_buf.ends_with('\r') {
                line_buf.pop();
            }
        }

        let view = TabRecordView::parse(&line_buf).map_err(|e| TabConvertError::FieldCount {
            line: line_number,
            found: e.found,
        })?;

        writeln!(
            writer,
            "{}\t{}\t.\t{}\t{}\t.\t.\t.\tGT\t1/1",
            view.chrom, view.pos, view.ref_allele, view.alt_allele
        )?;
        stats.total += 1;
    }

    writer.flush()?;
    Ok(stats)
}
