//! vcfutils - variant file interconversion
//!
//! Converts between a simplified tab-separated list of variant coordinates
//! and VCF 4.1, and flattens VCF files into tab-separated tables for
//! spreadsheet exploration.
//!
//! # Example
//!
//! ```ignore
//! use vcfutils::formats;
//!
//! // Tab-separated (CHROM, POS, REF, ALT) list to VCF
//! let stats = formats::convert_tab_to_vcf("variants.tab", "variants.vcf")?;
//!
//! // VCF to flat table, one column per declared INFO field
//! let stats = formats::convert_vcf_to_table("variants.vcf", "variants.tsv")?;
//! ```

pub mod core;
pub mod formats;

// Re-export commonly used types
pub use core::{
    format_field, format_genotype, FieldValue, Result, VariantSource, VcfParseError, VcfReader,
    VcfRecord, VcfUtilsError,
};
pub use formats::{convert_tab_to_vcf, convert_vcf_to_table};
