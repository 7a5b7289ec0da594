pub mod entity;
pub mod marker;
pub mod types;

pub use entity::{lower_first, EntityDescriptor, FieldDescriptor};
pub use marker::{EntityMarker, DEFAULT_HASH_KEY};
pub use types::TypeToken;
