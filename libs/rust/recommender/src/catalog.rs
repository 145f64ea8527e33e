use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashSet;
use tracing::warn;

/// Ordered list of unique skill labels.
///
/// The position of a label is its catalog index: it addresses the similarity
/// matrix column and breaks ties between equally scored skills.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SkillCatalog {
    labels: Vec<String>,
}

impl SkillCatalog {
    /// Builds a catalog, trimming labels and dropping blank entries and
    /// repeated labels. The first occurrence of a label keeps its position.
    pub fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen = HashSet::new();
        let mut kept = Vec::new();

        for label in labels {
            let label: String = label.into();
            let trimmed = label.trim();
            if trimmed.is_empty() {
                warn!("Dropping blank skill label from catalog");
                continue;
            }
            if !seen.insert(trimmed.to_string()) {
                warn!(skill = %trimmed, "Dropping duplicate skill label from catalog");
                continue;
            }
            kept.push(trimmed.to_string());
        }

        Self { labels: kept }
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(String::as_str)
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(String::as_str)
    }
}

impl<'de> Deserialize<'de> for SkillCatalog {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let labels = Vec::<String>::deserialize(deserializer)?;
        Ok(Self::new(labels))
    }
}
