//! The OpenAPI 3.0 entity graph.
//!
//! Every field that is optional in the document is skipped on output when it
//! holds its empty value (`""`, `[]`, `{}`, `false`, `0` or `None`). Required
//! fields are always written.

use crate::error::UnknownTag;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Deref, DerefMut};
use std::str::FromStr;
use url::Url;

pub const DEFAULT_OPENAPI_VERSION: &str = "3.0.1";

fn is_false(value: &bool) -> bool {
    !*value
}

fn is_zero<T: Default + PartialEq>(value: &T) -> bool {
    *value == T::default()
}

/// Root of an OpenAPI document, usually published as `openapi.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub openapi: String,
    #[serde(default)]
    pub info: Info,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub servers: Vec<Server>,
    #[serde(default)]
    pub paths: IndexMap<String, PathItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub components: Option<Components>,
}

impl Document {
    /// An empty 3.0.1 document with no paths.
    pub fn new() -> Self {
        Self {
            openapi: DEFAULT_OPENAPI_VERSION.to_string(),
            info: Info::default(),
            servers: Vec::new(),
            paths: IndexMap::new(),
            components: None,
        }
    }

    /// Sets the operation for `verb` at `path`, creating the path item on first use.
    pub fn add_operation(&mut self, path: impl Into<String>, verb: Verb, operation: Operation) {
        self.paths
            .entry(path.into())
            .or_default()
            .set_operation(verb, operation);
    }

    /// Registers a reusable schema under `components.schemas`.
    pub fn add_schema(&mut self, name: impl Into<String>, schema: Schema) {
        self.components
            .get_or_insert_with(Components::default)
            .schemas
            .insert(name.into(), schema);
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

/// Metadata about the API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Info {
    pub title: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(with = "url_text", skip_serializing_if = "Option::is_none")]
    pub terms_of_service: Option<Url>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<Contact>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license: Option<License>,
    pub version: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Contact {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(with = "url_text", skip_serializing_if = "Option::is_none")]
    pub url: Option<Url>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub email: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct License {
    pub name: String,
    #[serde(with = "url_text", skip_serializing_if = "Option::is_none")]
    pub url: Option<Url>,
}

/// A target host. `url` is kept as written since it may contain `{variable}` templates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Server {
    pub url: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub variables: IndexMap<String, ServerVariable>,
}

/// Substitution rule for a `{name}` placeholder in a server url.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerVariable {
    #[serde(rename = "enum", skip_serializing_if = "Vec::is_empty")]
    pub enumeration: Vec<String>,
    pub default: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
}

/// The operations available on a single path.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathItem {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub summary: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub get: Option<Operation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post: Option<Operation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub put: Option<Operation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patch: Option<Operation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delete: Option<Operation>,
}

impl PathItem {
    fn slot(&self, verb: Verb) -> &Option<Operation> {
        match verb {
            Verb::Get => &self.get,
            Verb::Post => &self.post,
            Verb::Put => &self.put,
            Verb::Patch => &self.patch,
            Verb::Delete => &self.delete,
        }
    }

    fn slot_mut(&mut self, verb: Verb) -> &mut Option<Operation> {
        match verb {
            Verb::Get => &mut self.get,
            Verb::Post => &mut self.post,
            Verb::Put => &mut self.put,
            Verb::Patch => &mut self.patch,
            Verb::Delete => &mut self.delete,
        }
    }

    pub fn operation(&self, verb: Verb) -> Option<&Operation> {
        self.slot(verb).as_ref()
    }

    /// Replaces the operation for `verb`, returning the previous one.
    pub fn set_operation(&mut self, verb: Verb, operation: Operation) -> Option<Operation> {
        self.slot_mut(verb).replace(operation)
    }

    /// The present operations keyed by verb, in `Verb::ALL` order.
    pub fn operations_by_verb(&self) -> IndexMap<Verb, &Operation> {
        Verb::ALL
            .iter()
            .filter_map(|verb| self.operation(*verb).map(|op| (*verb, op)))
            .collect()
    }
}

/// HTTP verbs a [`PathItem`] can describe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Verb {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Verb {
    pub const ALL: [Verb; 5] = [Verb::Get, Verb::Post, Verb::Put, Verb::Patch, Verb::Delete];

    pub fn as_str(&self) -> &'static str {
        match self {
            Verb::Get => "GET",
            Verb::Post => "POST",
            Verb::Put => "PUT",
            Verb::Patch => "PATCH",
            Verb::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Verb {
    type Err = UnknownTag;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Verb::ALL
            .into_iter()
            .find(|verb| verb.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownTag {
                kind: "verb",
                value: s.to_string(),
            })
    }
}

/// What a single verb does on a path.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Operation {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub summary: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<Parameter>,
    pub responses: IndexMap<String, Response>,
}

impl Operation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_response(mut self, key: impl Into<String>, response: Response) -> Self {
        self.responses.insert(key.into(), response);
        self
    }
}

/// Where a [`Parameter`] is carried in the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Location {
    Query,
    Header,
    Path,
    Cookie,
}

/// A path, query, header or cookie parameter. Unique per `name` and `location`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "in")]
    pub location: Location,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// Must be true for path parameters.
    #[serde(default, skip_serializing_if = "is_false")]
    pub required: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub deprecated: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<Schema>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub content: IndexMap<String, MediaType>,
}

impl Parameter {
    pub fn new(name: impl Into<String>, location: Location) -> Self {
        Self {
            name: name.into(),
            location,
            description: String::new(),
            required: false,
            deprecated: false,
            schema: None,
            content: IndexMap::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Response {
    pub description: String,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub headers: IndexMap<String, Header>,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub content: IndexMap<String, MediaType>,
}

impl Response {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            ..Default::default()
        }
    }

    pub fn with_content(mut self, media_type: impl Into<String>, schema: Schema) -> Self {
        self.content.insert(media_type.into(), MediaType::new(schema));
        self
    }
}

/// Like a [`Parameter`] without `name` and `in`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Header {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(skip_serializing_if = "is_false")]
    pub required: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub deprecated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<Schema>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MediaType {
    pub schema: Schema,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub encoding: IndexMap<String, Encoding>,
}

impl MediaType {
    pub fn new(schema: Schema) -> Self {
        Self {
            schema,
            encoding: IndexMap::new(),
        }
    }
}

/// Serialization rules for one property of a multipart or form body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Encoding {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub content_type: String,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub headers: IndexMap<String, Header>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub style: String,
    #[serde(skip_serializing_if = "is_false")]
    pub explode: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub allow_reserved: bool,
}

/// A data type, either inline or as a `$ref` to `components.schemas`.
///
/// Nothing stops a schema from carrying a `$ref` together with inline fields;
/// consumers are expected to honour the reference.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Schema {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<SchemaType>,
    /// Free-form hint, see [`Format`] for the common values.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub format: String,
    /// Inclusive.
    #[serde(skip_serializing_if = "is_zero")]
    pub minimum: i64,
    /// Inclusive.
    #[serde(skip_serializing_if = "is_zero")]
    pub maximum: i64,
    #[serde(skip_serializing_if = "is_zero")]
    pub max_length: u64,
    #[serde(skip_serializing_if = "is_zero")]
    pub min_length: u64,
    #[serde(skip_serializing_if = "is_zero")]
    pub max_items: u64,
    #[serde(skip_serializing_if = "is_zero")]
    pub min_items: u64,
    #[serde(skip_serializing_if = "is_false")]
    pub nullable: bool,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub pattern: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discriminator: Option<Discriminator>,
    #[serde(skip_serializing_if = "is_false")]
    pub read_only: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub write_only: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub deprecated: bool,
    /// Only meaningful for `object`.
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub properties: IndexMap<String, Schema>,
    /// e.g. `#/components/schemas/Pet`
    #[serde(rename = "$ref", skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<Items>>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(rename = "x-ee.type", skip_serializing_if = "Option::is_none")]
    pub extension_type: Option<String>,
}

impl Schema {
    pub fn of_type(schema_type: SchemaType) -> Self {
        Self {
            schema_type: Some(schema_type),
            ..Default::default()
        }
    }

    /// A bare `$ref` to `#/components/schemas/{name}`.
    pub fn reference(name: &str) -> Self {
        Self {
            reference: Some(Components::schema_ref(name)),
            ..Default::default()
        }
    }

    pub fn array_of(items: Schema) -> Self {
        Self {
            schema_type: Some(SchemaType::Array),
            items: Some(Box::new(Items::from(items))),
            ..Default::default()
        }
    }

    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = format.into();
        self
    }

    pub fn with_property(mut self, name: impl Into<String>, schema: Schema) -> Self {
        self.properties.insert(name.into(), schema);
        self
    }
}

/// The element schema of an array. Encodes as the inner schema itself.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Items {
    pub schema: Schema,
}

impl Deref for Items {
    type Target = Schema;

    fn deref(&self) -> &Schema {
        &self.schema
    }
}

impl DerefMut for Items {
    fn deref_mut(&mut self) -> &mut Schema {
        &mut self.schema
    }
}

impl From<Schema> for Items {
    fn from(schema: Schema) -> Self {
        Self { schema }
    }
}

/// Reusable definitions referenced from elsewhere in the document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Components {
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub schemas: IndexMap<String, Schema>,
}

impl Components {
    pub const SCHEMAS_PREFIX: &'static str = "#/components/schemas/";

    pub fn schema_ref(name: &str) -> String {
        format!("{}{name}", Self::SCHEMAS_PREFIX)
    }
}

/// Names the property whose value selects a variant of a polymorphic schema.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Discriminator {
    pub property_name: String,
    /// Property value to schema name or reference.
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub mapping: IndexMap<String, String>,
}

/// The data type of a [`Schema`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaType {
    String,
    Number,
    Integer,
    Boolean,
    Array,
    Object,
}

/// Common values for [`Schema::format`]. Not exhaustive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    Int32,
    Int64,
    Float,
    Double,
    /// Any sequence of octets.
    Binary,
    /// Base64 encoded characters.
    Byte,
    /// RFC 3339 full-date.
    Date,
    /// RFC 3339 date-time.
    DateTime,
    Password,
}

impl Format {
    const ALL: [Format; 9] = [
        Format::Int32,
        Format::Int64,
        Format::Float,
        Format::Double,
        Format::Binary,
        Format::Byte,
        Format::Date,
        Format::DateTime,
        Format::Password,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Format::Int32 => "int32",
            Format::Int64 => "int64",
            Format::Float => "float",
            Format::Double => "double",
            Format::Binary => "binary",
            Format::Byte => "byte",
            Format::Date => "date",
            Format::DateTime => "date-time",
            Format::Password => "password",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Format {
    type Err = UnknownTag;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Format::ALL
            .into_iter()
            .find(|format| format.as_str() == s)
            .ok_or_else(|| UnknownTag {
                kind: "format",
                value: s.to_string(),
            })
    }
}

impl From<Format> for String {
    fn from(format: Format) -> Self {
        format.as_str().to_string()
    }
}

/// Writes an optional [`Url`] as its canonical string and parses it back.
/// URL fields must hold absolute URLs; relative references such as `/terms` fail to decode.
mod url_text {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};
    use url::Url;

    pub fn serialize<S: Serializer>(url: &Option<Url>, serializer: S) -> Result<S::Ok, S::Error> {
        match url {
            Some(url) => serializer.serialize_str(url.as_str()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Url>, D::Error> {
        match Option::<String>::deserialize(deserializer)? {
            Some(text) => Url::parse(&text)
                .map(Some)
                .map_err(|e| D::Error::custom(format!("invalid url `{text}`: {e}"))),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn get() -> Operation {
        Operation::new().with_response("200", Response::new("ok"))
    }

    #[test]
    fn test_new_document_defaults() {
        let doc = Document::new();
        assert_eq!(doc.openapi, "3.0.1");
        assert!(doc.paths.is_empty());
        assert!(doc.servers.is_empty());
        assert!(doc.components.is_none());
    }

    #[test]
    fn test_operations_by_verb_empty() {
        assert!(PathItem::default().operations_by_verb().is_empty());
    }

    #[test]
    fn test_operations_by_verb_only_present() {
        let delete = Operation {
            summary: "remove".to_string(),
            ..get()
        };
        let item = PathItem {
            get: Some(get()),
            delete: Some(delete.clone()),
            ..Default::default()
        };

        let ops = item.operations_by_verb();
        assert_eq!(ops.len(), 2);
        assert_eq!(ops.keys().copied().collect::<Vec<_>>(), vec![Verb::Get, Verb::Delete]);
        assert_eq!(ops[&Verb::Get], &get());
        assert_eq!(ops[&Verb::Delete], &delete);
        assert!(!ops.contains_key(&Verb::Post));
    }

    #[test]
    fn test_set_operation_replaces() {
        let mut item = PathItem::default();
        assert!(item.set_operation(Verb::Put, get()).is_none());
        let previous = item.set_operation(Verb::Put, Operation::new());
        assert_eq!(previous, Some(get()));
        assert_eq!(item.operation(Verb::Put), Some(&Operation::new()));
    }

    #[test]
    fn test_add_operation_and_schema() {
        let mut doc = Document::new();
        doc.add_operation("/pets", Verb::Get, get());
        doc.add_operation("/pets", Verb::Post, get());
        doc.add_schema("Pet", Schema::of_type(SchemaType::Object));

        assert_eq!(doc.paths.len(), 1);
        assert_eq!(doc.paths["/pets"].operations_by_verb().len(), 2);
        let components = doc.components.as_ref().unwrap();
        assert_eq!(components.schemas["Pet"].schema_type, Some(SchemaType::Object));
    }

    #[test]
    fn test_verb_parse() {
        assert_eq!("patch".parse::<Verb>(), Ok(Verb::Patch));
        assert_eq!("DELETE".parse::<Verb>(), Ok(Verb::Delete));
        let err = "TRACE".parse::<Verb>().unwrap_err();
        assert_eq!(err.to_string(), "unknown verb `TRACE`");
    }

    #[test]
    fn test_format_tags() {
        assert_eq!(Format::DateTime.to_string(), "date-time");
        assert_eq!("int64".parse::<Format>(), Ok(Format::Int64));
        assert!("uuid".parse::<Format>().is_err());

        let schema = Schema::of_type(SchemaType::String).with_format(Format::Password);
        assert_eq!(schema.format, "password");
    }

    #[test]
    fn test_items_deref() {
        let schema = Schema::array_of(Schema::reference("Pet"));
        let items = schema.items.as_ref().unwrap();
        assert_eq!(items.reference.as_deref(), Some("#/components/schemas/Pet"));
    }
}
