pub mod cli;
pub mod error;
pub mod generator;
pub mod models;
pub mod parser;
pub mod resolver;
mod strict;

pub use error::Error;
pub use models::{
    Components, Contact, Discriminator, Document, Encoding, Format, Header, Info, Items, License,
    Location, MediaType, Operation, Parameter, PathItem, Response, Schema, SchemaType, Server,
    ServerVariable, Verb,
};
pub type Result<T> = std::result::Result<T, Error>;
