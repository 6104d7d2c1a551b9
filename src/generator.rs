use crate::{models::Document, Result};
use std::fmt;

impl Document {
    /// Compact JSON encoding of the whole document.
    pub fn to_json(&self) -> Result<Vec<u8>> {
        let bytes = serde_json::to_vec(self)?;
        tracing::debug!(bytes = bytes.len(), paths = self.paths.len(), "encoded document");
        Ok(bytes)
    }

    /// Indented JSON, the form usually served as `openapi.json`.
    pub fn to_json_pretty(&self) -> Result<Vec<u8>> {
        let bytes = serde_json::to_vec_pretty(self)?;
        tracing::debug!(bytes = bytes.len(), paths = self.paths.len(), "encoded document");
        Ok(bytes)
    }

    /// The document as a JSON tree, handy for inspecting single keys.
    pub fn to_value(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}
