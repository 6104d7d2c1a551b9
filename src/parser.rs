use crate::{models::Document, strict::Strict, Error, Result};
use serde_json::de::{IoRead, Read, SliceRead};
use std::io;
use std::str::FromStr;

/// Decodes a document from JSON text. Either the whole document decodes or an
/// [`Error::Decode`] names the first field that did not fit. Every record must
/// be a JSON object; arrays are only accepted where the model has a list.
pub fn from_json(bytes: &[u8]) -> Result<Document> {
    decode(serde_json::Deserializer::new(SliceRead::new(bytes)))
}

pub fn from_reader<R: io::Read>(reader: R) -> Result<Document> {
    decode(serde_json::Deserializer::new(IoRead::new(reader)))
}

fn decode<'de, R: Read<'de>>(mut de: serde_json::Deserializer<R>) -> Result<Document> {
    let document: Document = serde_path_to_error::deserialize(Strict(&mut de)).map_err(|e| {
        let path = e.path().to_string();
        tracing::debug!(%path, "document rejected");
        Error::decode(path, e.into_inner().to_string())
    })?;
    de.end().map_err(|e| Error::decode(".", e.to_string()))?;

    tracing::debug!(
        openapi = %document.openapi,
        paths = document.paths.len(),
        "decoded document"
    );
    Ok(document)
}

impl Document {
    pub fn from_json(bytes: &[u8]) -> Result<Self> {
        from_json(bytes)
    }
}

impl FromStr for Document {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        from_json(s.as_bytes())
    }
}
