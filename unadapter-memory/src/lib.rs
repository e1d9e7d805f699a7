mod driver;
mod filter;
mod store;

pub use driver::*;
pub use store::*;
