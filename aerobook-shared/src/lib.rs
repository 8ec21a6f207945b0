pub mod pii;
pub mod validate;

pub use pii::Masked;
pub use validate::blank_fields;
