//! Core conversion machinery
//!
//! This module contains the field value model with its formatters, the VCF
//! reader, and the shared I/O and error plumbing.

mod error;
pub mod io;
pub mod reader;
pub mod value;

pub use error::{Result, VcfUtilsError};
pub use io::{detect_compression, open_input, CompressionFormat, DEFAULT_BUFFER_SIZE};
pub use reader::{
    InfoDef, InfoNumber, InfoType, VariantSource, VcfParseError, VcfReader, VcfRecord,
};
pub use value::{
    format_field, format_genotype, FieldValue, MISSING_FIELD, MISSING_GENOTYPE,
    UNKNOWN_FORMAT_SENTINEL,
};
