mod adapter;
mod coercion;
mod driver;
mod error;
mod field;
mod options;
mod resolver;
mod schema;
mod trace;
mod transform;
mod util;
mod value;
mod where_clause;
mod writer;

pub use ::anyhow::Context;
pub use adapter::*;
pub use coercion::*;
pub use driver::*;
pub use error::*;
pub use field::*;
pub use options::*;
pub use resolver::*;
pub use schema::*;
pub use trace::*;
pub use transform::*;
pub use util::*;
pub use value::*;
pub use where_clause::*;
pub use writer::*;
pub use ::futures::future;

pub type Result<T> = anyhow::Result<T>;
pub type Error = anyhow::Error;
