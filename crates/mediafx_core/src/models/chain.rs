//! Filter chain representation.
//!
//! The web layer hands each pipeline an ordered list of
//! `{name, params}` objects decoded from the configure request. Order is
//! significant: it defines execution order. An empty chain is valid and means
//! "copy the source through unchanged".

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A single requested filter: operation name plus numeric parameters.
///
/// The chain is consumed read-only; unknown names are reported, not raised.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterSpec {
    /// Operation identifier, e.g. `"gain_compression"` or `"upscaling"`.
    pub name: String,

    /// Parameter name -> numeric value. Missing parameters take their
    /// documented defaults.
    #[serde(default)]
    pub params: HashMap<String, f64>,
}

impl FilterSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: HashMap::new(),
        }
    }

    pub fn with_param(mut self, name: impl Into<String>, value: f64) -> Self {
        self.params.insert(name.into(), value);
        self
    }

    /// Look up a parameter, falling back to the given default.
    pub fn param(&self, name: &str, default: f64) -> f64 {
        self.params.get(name).copied().unwrap_or(default)
    }

    /// Look up a parameter and clamp it to its documented range, logging the
    /// adjustment when a value is out of range.
    pub fn param_clamped(&self, name: &str, default: f64, lo: f64, hi: f64) -> f64 {
        let value = self.param(name, default);
        let adjusted = value.clamp(lo, hi);
        if adjusted != value {
            tracing::warn!(
                filter = %self.name,
                param = name,
                requested = value,
                used = adjusted,
                "parameter outside documented range, clamped"
            );
        }
        adjusted
    }
}

/// An ordered sequence of filter specs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterChain(pub Vec<FilterSpec>);

impl FilterChain {
    pub fn new(specs: Vec<FilterSpec>) -> Self {
        Self(specs)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FilterSpec> {
        self.0.iter()
    }
}

impl<'a> IntoIterator for &'a FilterChain {
    type Item = &'a FilterSpec;
    type IntoIter = std::slice::Iter<'a, FilterSpec>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_from_configure_request_json() {
        let json = r#"[
            {"name": "gain_compression", "params": {"threshold": 0.5, "ratio": 4.0}},
            {"name": "phone"}
        ]"#;
        let chain: FilterChain = serde_json::from_str(json).unwrap();
        assert_eq!(chain.len(), 2);
        assert_eq!(chain.0[0].param("ratio", 1.0), 4.0);
        // Missing params map decodes as empty.
        assert!(chain.0[1].params.is_empty());
    }

    #[test]
    fn param_falls_back_to_default() {
        let spec = FilterSpec::new("voice_enhancement");
        assert_eq!(spec.param("alpha", 0.95), 0.95);

        let spec = spec.with_param("alpha", 0.5);
        assert_eq!(spec.param("alpha", 0.95), 0.5);
    }

    #[test]
    fn empty_chain_is_valid() {
        let chain: FilterChain = serde_json::from_str("[]").unwrap();
        assert!(chain.is_empty());
    }
}
