mod error;
mod extract;
mod parser;
mod schema;

pub use error::{DerError, DerResult};
pub use extract::certificate_block_span;
pub use parser::{tag, Element, Parser};
pub use schema::walk_signed_data;
