//! Line-oriented VCF reader
//!
//! Parses the metadata header into an INFO catalog, the `#CHROM` line into an
//! ordered sample list, and each data line into an owned [`VcfRecord`] with
//! typed INFO access. INFO values are decoded according to the declared
//! `Number` and `Type` of their `##INFO` entry; undeclared keys fall back to
//! text. Semantic validation of the file is out of scope: a value that does
//! not parse under its declared type degrades to text rather than erroring.
//!
//! The [`VariantSource`] trait is the seam consumers depend on, so a
//! different parsing backend can be swapped in without touching them.

use crate::core::io::open_input;
use crate::core::value::FieldValue;
use std::collections::HashMap;
use std::io::BufRead;
use std::path::Path;

/// VCF reading error
#[derive(Debug, thiserror::Error)]
pub enum VcfParseError {
    #[error("Invalid metadata at line {line}: {message}")]
    InvalidMetadata { line: usize, message: String },

    #[error("Missing #CHROM header line before data records")]
    MissingHeader,

    #[error("Too few fields at line {line}: expected at least {expected}, found {found}")]
    TooFewFields {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("Invalid number in field {field} at line {line}: {value}")]
    InvalidNumber {
        line: usize,
        field: &'static str,
        value: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Cardinality of a declared INFO field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfoNumber {
    /// Fixed number of values
    Count(u32),
    /// One value per alternate allele (`A`)
    PerAllele,
    /// One value per possible genotype (`G`)
    PerGenotype,
    /// Unknown or varying (`.`)
    Unknown,
}

/// Value type of a declared INFO field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfoType {
    Integer,
    Float,
    Flag,
    Character,
    String,
}

/// One `##INFO` metadata entry
#[derive(Debug, Clone)]
pub struct InfoDef {
    pub id: String,
    pub number: InfoNumber,
    pub ty: InfoType,
    pub description: String,
}

/// An owned VCF data record with typed field access
#[derive(Debug, Clone)]
pub struct VcfRecord {
    /// Chromosome name
    pub chrom: String,
    /// Position (1-based)
    pub pos: u64,
    /// Record identifier, `None` when `.`
    pub id: Option<String>,
    /// Reference allele
    pub ref_allele: String,
    /// Alternate alleles, empty when `.`
    pub alt_alleles: Vec<String>,
    /// Quality score, `None` when `.`
    pub qual: Option<f64>,
    /// Filter names; `None` when `.`, empty when `PASS`
    pub filter: Option<Vec<String>>,
    /// Typed INFO values keyed by field name
    pub info: HashMap<String, FieldValue>,
    /// Per-sample GT calls in declared sample order
    genotypes: Vec<FieldValue>,
}

impl VcfRecord {
    /// Typed value of an INFO field, if the record carries it
    pub fn info_value(&self, id: &str) -> Option<&FieldValue> {
        self.info.get(id)
    }

    /// GT call of the sample at `sample_index` (declared order)
    pub fn genotype(&self, sample_index: usize) -> Option<&FieldValue> {
        self.genotypes.get(sample_index)
    }

    /// The seven static columns as field values, in VCF column order
    pub fn static_fields(&self) -> [FieldValue; 7] {
        [
            FieldValue::Text(self.chrom.clone()),
            FieldValue::Integer(self.pos as i64),
            self.id
                .clone()
                .map(FieldValue::Text)
                .unwrap_or(FieldValue::Absent),
            FieldValue::Text(self.ref_allele.clone()),
            FieldValue::List(self.alt_alleles.clone()),
            self.qual
                .map(FieldValue::Float)
                .unwrap_or(FieldValue::Absent),
            self.filter
                .clone()
                .map(FieldValue::List)
                .unwrap_or(FieldValue::Absent),
        ]
    }
}

/// Contract any VCF-parsing backend must satisfy to drive the table converter
pub trait VariantSource {
    /// Declared INFO field names, in header order
    fn info_ids(&self) -> &[String];

    /// Declared sample names, in column order
    fn samples(&self) -> &[String];

    /// Next data record, `None` at end of input
    fn next_record(&mut self) -> Option<Result<VcfRecord, VcfParseError>>;
}

/// Line-oriented VCF reader over any buffered input
pub struct VcfReader<R: BufRead> {
    reader: R,
    infos: Vec<InfoDef>,
    info_ids: Vec<String>,
    info_index: HashMap<String, usize>,
    samples: Vec<String>,
    line_number: usize,
    line_buf: String,
}

impl VcfReader<Box<dyn BufRead>> {
    /// Open a VCF file, decompressing gzip/bzip2 inputs transparently
    pub fn from_path(path: &Path) -> Result<Self, VcfParseError> {
        let reader = open_input(path)?;
        Self::new(reader)
    }
}

impl<R: BufRead> VcfReader<R> {
    /// Consume the header (everything up to and including `#CHROM`)
    ///
    /// Fails with [`VcfParseError::MissingHeader`] when the input ends, or a
    /// data line appears, before the column header line.
    pub fn new(mut reader: R) -> Result<Self, VcfParseError> {
        let mut infos: Vec<InfoDef> = Vec::new();
        let mut samples: Vec<String> = Vec::new();
        let mut line_buf = String::with_capacity(4096);
        let mut line_number = 0;

        loop {
            line_buf.clear();
            let bytes_read = reader.read_line(&mut line_buf)?;
            if bytes_read == 0 {
                return Err(VcfParseError::MissingHeader);
            }
            line_number += 1;
            strip_newline(&mut line_buf);

            if line_buf.is_empty() {
                continue;
            }
            if let Some(rest) = line_buf.strip_prefix("##INFO=") {
                infos.push(parse_info_def(rest, line_number)?);
            } else if line_buf.starts_with("##") {
                // Other metadata lines carry nothing the converter needs
                continue;
            } else if let Some(rest) = line_buf.strip_prefix('#') {
                // Column header; samples are the columns past FORMAT
                let columns: Vec<&str> = rest.split('\t').collect();
                if columns.len() > 9 {
                    samples = columns[9..].iter().map(|s| s.to_string()).collect();
                }
                break;
            } else {
                return Err(VcfParseError::MissingHeader);
            }
        }

        let info_ids: Vec<String> = infos.iter().map(|def| def.id.clone()).collect();
        let info_index: HashMap<String, usize> = infos
            .iter()
            .enumerate()
            .map(|(index, def)| (def.id.clone(), index))
            .collect();

        Ok(Self {
            reader,
            infos,
            info_ids,
            info_index,
            samples,
            line_number,
            line_buf,
        })
    }

    /// Declared INFO metadata entries, in header order
    pub fn infos(&self) -> &[InfoDef] {
        &self.infos
    }

    fn parse_record(&self) -> Result<VcfRecord, VcfParseError> {
        let line_number = self.line_number;
        let fields: Vec<&str> = self.line_buf.split('\t').collect();
        if fields.len() < 8 {
            return Err(VcfParseError::TooFewFields {
                line: line_number,
                expected: 8,
                found: fields.len(),
            });
        }

        let pos: u64 = fields[1].parse().map_err(|_| VcfParseError::InvalidNumber {
            line: line_number,
            field: "POS",
            value: fields[1].to_string(),
        })?;

        let id = match fields[2] {
            "." => None,
            other => Some(other.to_string()),
        };

        let alt_alleles: Vec<String> = match fields[4] {
            "." => Vec::new(),
            other => other.split(',').map(|s| s.to_string()).collect(),
        };

        // No semantic validation: an unparseable QUAL degrades to missing
        let qual: Option<f64> = match fields[5] {
            "." => None,
            other => other.parse().ok(),
        };

        let filter: Option<Vec<String>> = match fields[6] {
            "." => None,
            "PASS" => Some(Vec::new()),
            other => Some(other.split(';').map(|s| s.to_string()).collect()),
        };

        Ok(VcfRecord {
            chrom: fields[0].to_string(),
            pos,
            id,
            ref_allele: fields[3].to_string(),
            alt_alleles,
            qual,
            filter,
            info: self.parse_info(fields[7]),
            genotypes: self.parse_genotypes(&fields),
        })
    }

    fn parse_info(&self, raw: &str) -> HashMap<String, FieldValue> {
        let mut info = HashMap::new();
        if raw == "." {
            return info;
        }
        for item in raw.split(';') {
            if item.is_empty() {
                continue;
            }
            match item.split_once('=') {
                Some((key, value)) => {
                    let def = self.info_index.get(key).map(|&index| &self.infos[index]);
                    info.insert(key.to_string(), decode_info_value(def, value));
                }
                None => {
                    // Bare key is a flag
                    info.insert(item.to_string(), FieldValue::Boolean(true));
                }
            }
        }
        info
    }

    fn parse_genotypes(&self, fields: &[&str]) -> Vec<FieldValue> {
        if self.samples.is_empty() {
            return Vec::new();
        }
        let gt_slot = fields
            .get(8)
            .and_then(|format| format.split(':').position(|key| key == "GT"));

        (0..self.samples.len())
            .map(|sample_index| {
                let call = gt_slot.and_then(|slot| {
                    fields
                        .get(9 + sample_index)
                        .and_then(|sample| sample.split(':').nth(slot))
                });
                match call {
                    Some(gt) if !gt.is_empty() => FieldValue::Text(gt.to_string()),
                    _ => FieldValue::Absent,
                }
            })
            .collect()
    }
}

impl<R: BufRead> VariantSource for VcfReader<R> {
    fn info_ids(&self) -> &[String] {
        &self.info_ids
    }

    fn samples(&self) -> &[String] {
        &self.samples
    }

    fn next_record(&mut self) -> Option<Result<VcfRecord, VcfParseError>> {
        loop {
            self.line_buf.clear();
            match self.reader.read_line(&mut self.line_buf) {
                Ok(0) => return None,
                Ok(_) => {}
                Err(e) => return Some(Err(e.into())),
            }
            self.line_number += 1;
            strip_newline(&mut self.line_buf);

            if self.line_buf.is_empty() || self.line_buf.starts_with('#') {
                continue;
            }
            return Some(self.parse_record());
        }
    }
}

/// Strip a trailing newline (and preceding carriage return) in place
fn strip_newline(line: &mut String) {
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
}

/// Decode a raw INFO value according to its declared metadata
fn decode_info_value(def: Option<&InfoDef>, raw: &str) -> FieldValue {
    if raw == "." {
        return FieldValue::Absent;
    }
    let Some(def) = def else {
        // Undeclared key: text, or a list when comma-separated
        return if raw.contains(',') {
            FieldValue::List(raw.split(',').map(|s| s.to_string()).collect())
        } else {
            FieldValue::Text(raw.to_string())
        };
    };

    match (def.ty, def.number) {
        (InfoType::Flag, _) => FieldValue::Boolean(true),
        (InfoType::Integer, InfoNumber::Count(1)) => raw
            .parse::<i64>()
            .map(FieldValue::Integer)
            .unwrap_or_else(|_| FieldValue::Text(raw.to_string())),
        (InfoType::Float, InfoNumber::Count(1)) => raw
            .parse::<f64>()
            .map(FieldValue::Float)
            .unwrap_or_else(|_| FieldValue::Text(raw.to_string())),
        (_, InfoNumber::Count(1)) => FieldValue::Text(raw.to_string()),
        _ => FieldValue::List(raw.split(',').map(|s| s.to_string()).collect()),
    }
}

/// Parse the `<ID=...,Number=...,Type=...,Description="...">` body of a
/// `##INFO` line
fn parse_info_def(raw: &str, line: usize) -> Result<InfoDef, VcfParseError> {
    let body = raw
        .strip_prefix('<')
        .and_then(|s| s.strip_suffix('>'))
        .ok_or_else(|| VcfParseError::InvalidMetadata {
            line,
            message: format!("expected angle-bracketed body, got '{}'", raw),
        })?;

    let mut id = None;
    let mut number = InfoNumber::Unknown;
    let mut ty = InfoType::String;
    let mut description = String::new();

    for part in split_meta_fields(body) {
        let Some((key, value)) = part.split_once('=') else {
            continue;
        };
        match key {
            "ID" => id = Some(value.to_string()),
            "Number" => {
                number = match value {
                    "A" => InfoNumber::PerAllele,
                    "G" => InfoNumber::PerGenotype,
                    "." => InfoNumber::Unknown,
                    count => count
                        .parse()
                        .map(InfoNumber::Count)
                        .unwrap_or(InfoNumber::Unknown),
                }
            }
            "Type" => {
                ty = match value {
                    "Integer" => InfoType::Integer,
                    "Float" => InfoType::Float,
                    "Flag" => InfoType::Flag,
                    "Character" => InfoType::Character,
                    _ => InfoType::String,
                }
            }
            "Description" => description = value.trim_matches('"').to_string(),
            _ => {}
        }
    }

    let id = id.ok_or_else(|| VcfParseError::InvalidMetadata {
        line,
        message: "missing ID".to_string(),
    })?;

    Ok(InfoDef {
        id,
        number,
        ty,
        description,
    })
}

/// Split a metadata body on commas, respecting double-quoted sections
fn split_meta_fields(body: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut in_quotes = false;
    let mut start = 0;
    for (index, c) in body.char_indices() {
        match c {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                parts.push(&body[start..index]);
                start = index + 1;
            }
            _ => {}
        }
    }
    parts.push(&body[start..]);
    parts
}
