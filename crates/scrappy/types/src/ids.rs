use serde::{Deserialize, Serialize};

/// Identifier of an assumption within an idea (e.g. "A3").
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AssumptionId(pub String);

impl AssumptionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AssumptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of an experiment on an idea's menu (e.g. "landing-page").
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ExperimentId(pub String);

impl ExperimentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ExperimentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of an idea card in a catalog.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct IdeaId(pub String);

impl IdeaId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl std::fmt::Display for IdeaId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Session-unique portfolio entry identifier.
///
/// Allocated monotonically by the session; never reused, even after the
/// entry is unscheduled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntryId(pub u64);

impl std::fmt::Display for EntryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "e{}", self.0)
    }
}

/// One-based round index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RoundIndex(pub u32);

impl RoundIndex {
    pub const FIRST: RoundIndex = RoundIndex(1);

    /// Zero-based position, for indexing per-round tables.
    pub fn position(self) -> usize {
        (self.0 as usize).saturating_sub(1)
    }

    /// Build from a zero-based position.
    pub fn from_position(position: usize) -> Self {
        Self(position as u32 + 1)
    }

    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl std::fmt::Display for RoundIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "R{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_index_positions() {
        assert_eq!(RoundIndex::FIRST.position(), 0);
        assert_eq!(RoundIndex(3).position(), 2);
        assert_eq!(RoundIndex::from_position(1), RoundIndex(2));
        assert_eq!(RoundIndex(2).next(), RoundIndex(3));
        // Index zero is not a real round but must not underflow.
        assert_eq!(RoundIndex(0).position(), 0);
    }

    #[test]
    fn ids_display_and_serialize_as_plain_strings() {
        let a = AssumptionId::new("A1");
        assert_eq!(a.to_string(), "A1");
        assert_eq!(serde_json::to_string(&a).unwrap(), "\"A1\"");

        let e: ExperimentId = serde_json::from_str("\"landing-page\"").unwrap();
        assert_eq!(e.as_str(), "landing-page");

        assert_eq!(EntryId(7).to_string(), "e7");
        assert_eq!(RoundIndex(2).to_string(), "R2");
    }
}
