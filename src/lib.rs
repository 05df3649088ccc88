//! Read, edit and save INI initialization files.
//!
//! ```ini
//! [General]
//! appName=MyApplication
//! version=1.0
//!
//! [Logging]
//! logLevel=DEBUG
//! ```
//!
//! Section and entry names match case-insensitively but are written back
//! with the casing they were first seen with, in their original order.

pub mod document;
pub mod error;
pub mod parser;
pub mod profile;
pub mod serializer;
pub mod store;
pub mod utils;

pub use document::{IniDocument, Section};
pub use error::{Error, Result};
pub use parser::{parse, parse_with, DuplicateSections};
pub use serializer::serialize;
pub use store::{IniStore, StoreOptions};
