//! Lookup of `$ref` strings against `components.schemas`.
//!
//! Only local schema references are understood. References into other
//! component kinds or other files resolve to nothing.

use crate::models::{Components, Document, Schema};

/// The schema name of a `#/components/schemas/{name}` reference.
pub fn schema_name(reference: &str) -> Option<&str> {
    reference.strip_prefix(Components::SCHEMAS_PREFIX)
}

impl Document {
    /// Resolves one level of `reference`, returning the name and a copy of the
    /// registered schema. A `$ref` inside the returned schema is not followed.
    pub fn resolve_ref(&self, reference: &str) -> Option<(String, Schema)> {
        let name = schema_name(reference)?;
        let schema = self.components.as_ref()?.schemas.get(name)?;
        Some((name.to_string(), schema.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SchemaType;

    fn with_pet() -> Document {
        let mut doc = Document::new();
        doc.add_schema(
            "Pet",
            Schema::of_type(SchemaType::Object)
                .with_property("name", Schema::of_type(SchemaType::String)),
        );
        doc
    }

    #[test]
    fn test_schema_name() {
        assert_eq!(schema_name("#/components/schemas/Pet"), Some("Pet"));
        assert_eq!(schema_name("#/components/responses/Pet"), None);
        assert_eq!(schema_name("Pet.json"), None);
    }

    #[test]
    fn test_resolve_existing() {
        let doc = with_pet();
        let (name, schema) = doc.resolve_ref("#/components/schemas/Pet").unwrap();
        assert_eq!(name, "Pet");
        assert_eq!(&schema, &doc.components.as_ref().unwrap().schemas["Pet"]);
    }

    #[test]
    fn test_resolve_misses() {
        let doc = with_pet();
        assert!(doc.resolve_ref("#/components/schemas/Owner").is_none());
        assert!(doc.resolve_ref("#/components/parameters/Pet").is_none());
        assert!(doc.resolve_ref("other.json#/components/schemas/Pet").is_none());
        assert!(doc.resolve_ref("").is_none());
    }

    #[test]
    fn test_resolve_without_components() {
        let doc = Document::new();
        assert!(doc.resolve_ref("#/components/schemas/Pet").is_none());

        let doc = Document {
            components: Some(Components::default()),
            ..Document::new()
        };
        assert!(doc.resolve_ref("#/components/schemas/Pet").is_none());
    }

    #[test]
    fn test_resolved_schema_is_a_copy() {
        let mut doc = with_pet();
        let (_, mut schema) = doc.resolve_ref("#/components/schemas/Pet").unwrap();
        schema.description = "edited".to_string();
        assert!(doc.components.as_ref().unwrap().schemas["Pet"].description.is_empty());

        doc.add_schema("Pet", Schema::of_type(SchemaType::String));
        assert_eq!(schema.schema_type, Some(SchemaType::Object));
    }

    #[test]
    fn test_resolves_one_level() {
        let mut doc = with_pet();
        doc.add_schema("Alias", Schema::reference("Pet"));
        let (name, schema) = doc.resolve_ref("#/components/schemas/Alias").unwrap();
        assert_eq!(name, "Alias");
        assert_eq!(schema.reference.as_deref(), Some("#/components/schemas/Pet"));
    }
}
