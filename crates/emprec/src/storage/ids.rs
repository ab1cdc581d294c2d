//! Sequential employee id generation.

use crate::config::IdConfig;

/// How generated ids are shaped: a letter prefix followed by a zero-padded
/// sequence number, e.g. `EMP001`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdScheme {
    prefix: String,
    width: usize,
}

impl Default for IdScheme {
    fn default() -> Self {
        Self::new("EMP", 3)
    }
}

impl From<&IdConfig> for IdScheme {
    fn from(config: &IdConfig) -> Self {
        Self::new(config.prefix.clone(), config.width)
    }
}

impl IdScheme {
    /// Create a scheme with the given prefix and pad width.
    #[must_use]
    pub fn new(prefix: impl Into<String>, width: usize) -> Self {
        Self {
            prefix: prefix.into(),
            width,
        }
    }

    /// The id prefix.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Extract the sequence number from an id of the form `<prefix><digits>`.
    ///
    /// Returns `None` for ids with a different prefix, a non-numeric
    /// remainder, or a number too large to represent.
    #[must_use]
    pub fn sequence_of(&self, id: &str) -> Option<u64> {
        let digits = id.strip_prefix(self.prefix.as_str())?;
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        digits.parse().ok()
    }

    /// Format a sequence number as an id.
    #[must_use]
    pub fn format(&self, sequence: u64) -> String {
        format!("{}{:0width$}", self.prefix, sequence, width = self.width)
    }

    /// The id following the highest sequence number among `ids`.
    ///
    /// Ids that don't follow the scheme are ignored; with none left the
    /// sequence starts at 1.
    pub fn next<'a>(&self, ids: impl IntoIterator<Item = &'a str>) -> String {
        let max = ids
            .into_iter()
            .filter_map(|id| self.sequence_of(id))
            .max()
            .unwrap_or(0);
        self.format(max.saturating_add(1))
    }
}
