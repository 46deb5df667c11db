//! Identifier allow-list

use std::collections::HashSet;

/// Set of identifiers a run is restricted to
///
/// An empty filter accepts every identifier.
#[derive(Debug, Clone, Default)]
pub struct IdentifierFilter {
    allowed: HashSet<String>,
}

impl IdentifierFilter {
    /// Filter that accepts everything
    pub fn all() -> Self {
        IdentifierFilter::default()
    }

    pub fn from_identifiers<I, S>(identifiers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let allowed = identifiers.into_iter()
            .map(|s| s.as_ref().trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        IdentifierFilter { allowed }
    }

    /// Parses a comma-separated list such as `"IgA,IgG2b"`
    pub fn parse_list(list: &str) -> Self {
        Self::from_identifiers(list.split(','))
    }

    pub fn accepts(&self, identifier: &str) -> bool {
        self.allowed.is_empty() || self.allowed.contains(identifier)
    }

    pub fn is_empty(&self) -> bool {
        self.allowed.is_empty()
    }
}
