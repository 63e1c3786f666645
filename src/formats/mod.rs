//! File format adapters
//!
//! Adapters for the two supported transforms (tab-separated variant list to
//! VCF, VCF to flat table).

pub mod tab;
pub mod table;

pub use tab::{
    convert_tab_to_vcf, ConversionStats as TabConversionStats, TabConvertError, TabParseError,
    TabRecordView,
};
pub use table::{
    convert_vcf_to_table, write_table, ConversionStats as TableConversionStats, TableConvertError,
    STATIC_COLUMNS,
};
