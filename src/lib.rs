//! One schema description, many storage back ends.
//!
//! [`create_adapter`] wraps a [`Driver`] and exposes a uniform CRUD contract over logical model
//! and field names: names are resolved to their physical form, values are converted to what the
//! storage can hold and back, filters are normalized before reaching the driver.
pub use unadapter_core::*;
