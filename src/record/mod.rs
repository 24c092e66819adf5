//! # Record Entity Model
//!
//! Audit records, their composite identity and the sparse template used to
//! filter them.

mod field;
mod key;
mod model;
mod template;

pub use field::RecordField;
pub use key::RecordKey;
pub use model::Record;
pub use template::RecordTemplate;
