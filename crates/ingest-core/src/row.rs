//! Header parsing and row normalization.
//!
//! Source files are UTF-8 text where the first line is a tab-delimited
//! column header and every following line is a data row. Data rows are
//! frequently ragged: fields padded with runs of spaces, trailing columns
//! missing entirely. Normalization coerces every line to the header's
//! column count instead of rejecting it, so one bad record cannot abort a
//! whole file's ingestion.

use regex::Regex;

/// How data rows are split into fields.
///
/// The two policies are intentionally different and both preserved:
/// batch extracts may contain multi-space-padded fixed-width text, while
/// streamed extracts are assumed strictly tab-delimited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DelimiterPolicy {
    /// Split on single tabs only.
    TabOnly,
    /// Split on runs of two or more spaces, or one or more tabs.
    MultiSpaceOrTab,
}

impl DelimiterPolicy {
    fn pattern(self) -> &'static str {
        match self {
            DelimiterPolicy::TabOnly => r"\t",
            DelimiterPolicy::MultiSpaceOrTab => r"\s{2,}|\t+",
        }
    }
}

/// Column names parsed once from the first line of a source file.
///
/// The header is always tab-delimited regardless of the data-row
/// [`DelimiterPolicy`], and defines the canonical arity every row in the
/// file is normalized to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    columns: Vec<String>,
}

impl Header {
    /// Parse a header line. The line is trimmed, then split on tabs.
    pub fn parse(line: &str) -> Self {
        Self {
            columns: line.trim().split('\t').map(str::to_string).collect(),
        }
    }

    /// Ordered column names.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of columns; the canonical arity for every row in the file.
    pub fn arity(&self) -> usize {
        self.columns.len()
    }
}

/// Turns one raw text line into a sequence of fields matching the header
/// arity.
///
/// The transformation is:
///
/// 1. split the trimmed line per the [`DelimiterPolicy`]
/// 2. trim each field and collapse interior whitespace runs to one space
/// 3. right-pad with empty strings up to the header arity
///
/// There is no error path. An empty line splits into one empty field and
/// pads out to a row of empty strings. Rows with MORE fields than the
/// header are passed through uncapped and left for the store to reject at
/// submission time.
pub struct RowNormalizer {
    arity: usize,
    delimiter: Regex,
    whitespace: Regex,
}

impl RowNormalizer {
    /// Create a normalizer for a file whose header has `arity` columns.
    pub fn new(policy: DelimiterPolicy, arity: usize) -> Self {
        Self {
            arity,
            delimiter: Regex::new(policy.pattern()).unwrap(),
            whitespace: Regex::new(r"\s+").unwrap(),
        }
    }

    /// Normalize one raw line to at least `arity` fields.
    pub fn normalize(&self, line: &str) -> Vec<String> {
        let mut fields: Vec<String> = self
            .delimiter
            .split(line.trim())
            .map(|field| self.whitespace.replace_all(field.trim(), " ").into_owned())
            .collect();

        if fields.len() < self.arity {
            fields.resize(self.arity, String::new());
        }

        fields
    }
}
