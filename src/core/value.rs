//! Field value model and flat-table formatting
//!
//! A VCF field value can be absent, a scalar number, a string, a list of
//! scalars, or a flag. [`FieldValue`] closes that domain as a sum type so the
//! flat-table formatters are total over it.

/// Placeholder written for absent or empty field values.
pub const MISSING_FIELD: &str = "---";

/// Standard missing-genotype notation.
pub const MISSING_GENOTYPE: &str = "./.";

/// Emitted for a genotype value of a shape the formatter does not recognize.
///
/// The misspelling is part of the output contract and must not be fixed.
pub const UNKNOWN_FORMAT_SENTINEL: &str = "___UNKNOWNFEILDFORMATTING___";

/// A single value as it appears in a VCF static or INFO column.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Field declared but carrying no value (`.` in the source file)
    Absent,
    /// Scalar integer
    Integer(i64),
    /// Scalar float
    Float(f64),
    /// Free text
    Text(String),
    /// List of scalar values, already rendered as text
    List(Vec<String>),
    /// Flag presence
    Boolean(bool),
}

impl FieldValue {
    /// Whether the value renders as the missing-field placeholder.
    ///
    /// Numeric zero is NOT empty: it renders as the zero literal.
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Absent => true,
            FieldValue::Integer(_) | FieldValue::Float(_) => false,
            FieldValue::Text(s) => s.is_empty(),
            FieldValue::List(items) => match items.first() {
                Some(first) => first.is_empty(),
                None => true,
            },
            FieldValue::Boolean(flag) => !flag,
        }
    }
}

/// Render a static or INFO column value for the flat table.
///
/// Total over [`FieldValue`]: absent/empty values become [`MISSING_FIELD`],
/// numbers their decimal form (zero included), lists a comma-joined string,
/// set flags `Yes`. Leading and trailing single quotes are stripped from the
/// final result.
pub fn format_field(value: &FieldValue) -> String {
    let rendered = match value {
        FieldValue::Absent => MISSING_FIELD.to_string(),
        FieldValue::Integer(n) => n.to_string(),
        FieldValue::Float(x) => x.to_string(),
        FieldValue::Text(s) if s.is_empty() => MISSING_FIELD.to_string(),
        FieldValue::Text(s) => s.clone(),
        FieldValue::List(items) => match items.first() {
            Some(first) if !first.is_empty() => items.join(","),
            _ => MISSING_FIELD.to_string(),
        },
        FieldValue::Boolean(true) => "Yes".to_string(),
        FieldValue::Boolean(false) => MISSING_FIELD.to_string(),
    };
    rendered.trim_matches('\'').to_string()
}

/// Render a genotype call for the flat table.
///
/// A non-empty text call passes through (quote-stripped); a missing or empty
/// call becomes [`MISSING_GENOTYPE`]; any other non-empty shape is reported as
/// [`UNKNOWN_FORMAT_SENTINEL`].
pub fn format_genotype(value: Option<&FieldValue>) -> String {
    let rendered = match value {
        None => MISSING_GENOTYPE.to_string(),
        Some(v) if v.is_empty() => MISSING_GENOTYPE.to_string(),
        Some(FieldValue::Text(s)) => s.clone(),
        Some(_) => UNKNOWN_FORMAT_SENTINEL.to_string(),
    };
    rendered.trim_matches('\'').to_string()
}
