//! Marker schemas: which payload fields are shown, in which format, and where.

mod field_format;
mod label;
mod schema;
mod serialization;
mod types;

pub use field_format::*;
pub use label::LabelMaker;
pub use schema::*;
pub use types::*;
