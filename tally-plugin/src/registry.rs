//! Converter Registry

use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;
use tally_core::TallyError;
use tracing::trace;

use crate::{ConvertContext, ConverterMeta, ConverterPlugin, Fields};

/// Central converter registry.
///
/// Keys are lowercase names; iteration order is alphabetical, which is the
/// order the converter grid shows its cards in.
pub struct ConverterRegistry {
    converters: BTreeMap<String, Arc<dyn ConverterPlugin>>,
}

impl ConverterRegistry {
    pub fn new() -> Self {
        Self { converters: BTreeMap::new() }
    }

    pub fn with_converter<C: ConverterPlugin + 'static>(mut self, c: C) -> Self {
        let name = c.meta().name.to_lowercase();
        self.converters.insert(name, Arc::new(c));
        self
    }

    pub fn get_converter(&self, name: &str) -> Option<&dyn ConverterPlugin> {
        self.converters.get(&name.to_lowercase()).map(|c| c.as_ref())
    }

    fn lookup(&self, name: &str) -> Result<&dyn ConverterPlugin, TallyError> {
        self.get_converter(name).ok_or_else(|| {
            let mut err = TallyError::invalid_input(format!("unknown converter '{}'", name));
            let similar = self.find_similar(name);
            if !similar.is_empty() {
                let suggestions: Vec<&str> = similar.iter().take(3).map(|s| s.as_str()).collect();
                err = err.with_suggestion(format!("Similar: {}", suggestions.join(", ")));
            }
            err
        })
    }

    /// Initial field values for a page
    pub fn populate(&self, name: &str) -> Result<Fields, TallyError> {
        Ok(self.lookup(name)?.populate())
    }

    /// Run a page's calculation and return its display text
    pub fn calculate(&self, name: &str, fields: &Fields, ctx: &ConvertContext) -> Result<String, TallyError> {
        let converter = self.lookup(name)?;
        trace!(converter = name, fields = fields.len(), "calculate");
        Ok(converter.calculate(fields, ctx))
    }

    /// Metadata for every page, in grid order
    pub fn list(&self) -> Vec<ConverterMeta> {
        self.converters.values().map(|c| c.meta()).collect()
    }

    pub fn names(&self) -> Vec<&str> {
        self.converters.keys().map(|k| k.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.converters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.converters.is_empty()
    }

    /// Converter names similar to the given one, best match first
    fn find_similar(&self, name: &str) -> Vec<String> {
        let name_lower = name.to_lowercase();
        let mut matches: Vec<(String, usize)> = self.converters.keys()
            .filter_map(|candidate| {
                let score = Self::similarity_score(&name_lower, candidate);
                if score > 0 {
                    Some((candidate.clone(), score))
                } else {
                    None
                }
            })
            .collect();

        matches.sort_by(|a, b| b.1.cmp(&a.1));
        matches.into_iter().map(|(name, _)| name).collect()
    }

    fn similarity_score(query: &str, candidate: &str) -> usize {
        let mut score = 0;

        if candidate.starts_with(query) {
            score += 100;
        } else if candidate.contains(query) {
            score += 50;
        } else if query.contains(candidate) {
            score += 30;
        }

        let query_chars: HashSet<char> = query.chars().collect();
        let candidate_chars: HashSet<char> = candidate.chars().collect();
        let common = query_chars.intersection(&candidate_chars).count();
        // Sharing a letter or two is noise
        if common >= query_chars.len().div_ceil(2) {
            score += common * 2;
        }

        score
    }
}

impl Default for ConverterRegistry {
    fn default() -> Self {
        Self::new()
    }
}
