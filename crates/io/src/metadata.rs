//! Global attributes attached to a record set.

use std::collections::BTreeMap;

/// Placeholder used for DOI and citation until a dataset is published.
pub const PLACEHOLDER: &str = "#####";

const CREATOR_KEY: &str = "creator";
const DOI_KEY: &str = "doi";
const CITATION_KEY: &str = "citation";
const NOTES_KEY: &str = "notes";

/// Creator label, DOI, citation and a free-text note on how the data was made.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metadata {
    creator: String,
    doi: String,
    citation: String,
    notes: String,
}

impl Metadata {
    /// Creates metadata with the given notes and placeholder attribution.
    pub fn new(notes: impl Into<String>) -> Self {
        Self {
            creator: "ashfall".to_string(),
            doi: PLACEHOLDER.to_string(),
            citation: PLACEHOLDER.to_string(),
            notes: notes.into(),
        }
    }

    /// Sets the creator label.
    pub fn with_creator(mut self, creator: impl Into<String>) -> Self {
        self.creator = creator.into();
        self
    }

    /// Sets the DOI.
    pub fn with_doi(mut self, doi: impl Into<String>) -> Self {
        self.doi = doi.into();
        self
    }

    /// Sets the citation.
    pub fn with_citation(mut self, citation: impl Into<String>) -> Self {
        self.citation = citation.into();
        self
    }

    /// Creator label.
    pub fn creator(&self) -> &str {
        &self.creator
    }

    /// DOI.
    pub fn doi(&self) -> &str {
        &self.doi
    }

    /// Citation.
    pub fn citation(&self) -> &str {
        &self.citation
    }

    /// Generation notes.
    pub fn notes(&self) -> &str {
        &self.notes
    }

    pub(crate) fn to_pairs(&self) -> Vec<(String, String)> {
        vec![
            (CREATOR_KEY.to_string(), self.creator.clone()),
            (DOI_KEY.to_string(), self.doi.clone()),
            (CITATION_KEY.to_string(), self.citation.clone()),
            (NOTES_KEY.to_string(), self.notes.clone()),
        ]
    }

    /// Rebuilds metadata from stored key-value pairs; absent keys keep their defaults.
    pub(crate) fn from_pairs(pairs: &BTreeMap<String, String>) -> Self {
        let mut meta = Self::new(pairs.get(NOTES_KEY).cloned().unwrap_or_default());
        if let Some(v) = pairs.get(CREATOR_KEY) {
            meta.creator = v.clone();
        }
        if let Some(v) = pairs.get(DOI_KEY) {
            meta.doi = v.clone();
        }
        if let Some(v) = pairs.get(CITATION_KEY) {
            meta.citation = v.clone();
        }
        meta
    }
}

impl Default for Metadata {
    fn default() -> Self {
        Self::new("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_placeholders() {
        let m = Metadata::new("made by hand");
        assert_eq!(m.creator(), "ashfall");
        assert_eq!(m.doi(), "#####");
        assert_eq!(m.citation(), "#####");
        assert_eq!(m.notes(), "made by hand");
    }

    #[test]
    fn pairs_round_trip() {
        let m = Metadata::new("n").with_creator("lab").with_doi("10.1/x");
        let pairs: BTreeMap<_, _> = m.to_pairs().into_iter().collect();
        assert_eq!(Metadata::from_pairs(&pairs), m);
    }

    #[test]
    fn missing_pairs_fall_back() {
        let m = Metadata::from_pairs(&BTreeMap::new());
        assert_eq!(m, Metadata::default());
    }
}
