use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A tenant-owned record keyed by `id`. Everything else is opaque JSON kept verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artifact {
    #[serde(default, alias = "artifactId")]
    pub id: String,
    #[serde(flatten)]
    pub payload: Map<String, Value>,
}

impl Artifact {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            payload: Map::new(),
        }
    }

    pub fn with_field(mut self, key: impl Into<String>, value: Value) -> Self {
        self.payload.insert(key.into(), value);
        self
    }
}
