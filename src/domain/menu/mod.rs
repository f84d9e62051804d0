// ============================================================================
// Menu Domain - Read-only catalog of orderable items
// ============================================================================
//
// - Value objects (MenuItem, MenuCategory)
// - Errors (MenuError enum)
// - Catalog (MenuCatalog trait, InMemoryMenuCatalog, default_menu)
//
// The order accumulator only ever reads from a catalog.
//
// ============================================================================

pub mod value_objects;
pub mod errors;
pub mod catalog;

// Re-export for convenience
pub use value_objects::*;
pub use errors::*;
pub use catalog::*;
