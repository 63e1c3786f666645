//! Error types for vcfutils
//!
//! Each converter and the VCF reader define their own error enums; this
//! module provides the crate-level umbrella over them.

use crate::core::reader::VcfParseError;
use crate::formats::tab::TabConvertError;
use crate::formats::table::TableConvertError;
use thiserror::Error;

/// Main error type for vcfutils operations
#[derive(Debug, Error)]
pub enum VcfUtilsError {
    /// Tab to VCF conversion errors
    #[error("Tab conversion error: {0}")]
    TabConvert(#[from] TabConvertError),

    /// VCF to table conversion errors
    #[error("Table conversion error: {0}")]
    TableConvert(#[from] TableConvertError),

    /// VCF reading errors
    #[error("VCF parse error: {0}")]
    VcfParse(#[from] VcfParseError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for vcfutils operations
pub type Result<T> = std::result::Result<T, VcfUtilsError>;
