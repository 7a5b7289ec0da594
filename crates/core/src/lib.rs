pub mod config;
pub mod errors;
pub mod model;
pub mod specs;

// Re-export key types for convenience
pub use config::GeneratorConfig;
pub use errors::{CoreError, Result};
pub use model::{MarkerNode, Member, ModelAccessor, ShapeKind, SmithyModel, StructuralDeclaration};
pub use specs::{EntityDescriptor, EntityMarker, FieldDescriptor, TypeToken};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get generator version
pub fn version() -> &'static str {
    VERSION
}
