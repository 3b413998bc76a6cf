//! Raw deserialization layer for JSON type-universe documents.
//!
//! 1:1 mapping to the document, no name resolution — resolving bases and
//! conversion spellings against a `TypeDb` is the analysis layer's job.
//!
//! ```json
//! [
//!   {"name": "Base"},
//!   {"name": "Derived", "bases": ["Base"], "converts_to": ["int"]}
//! ]
//! ```

/// Raw class definition from a universe document.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct RawClass {
    pub name: String,
    #[serde(default)]
    pub bases: Vec<String>,
    /// Conversion-operator targets, as type spellings.
    #[serde(default)]
    pub converts_to: Vec<String>,
    /// Converting-constructor parameter types, as type spellings.
    #[serde(default)]
    pub converts_from: Vec<String>,
}

/// Parse a universe document into raw classes.
pub fn parse_universe(json: &str) -> Result<Vec<RawClass>, serde_json::Error> {
    serde_json::from_str(json)
}
