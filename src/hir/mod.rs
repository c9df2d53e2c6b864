//! Semantic layer: symbol tables, name resolution and import usage.
//!
//! Everything here is computed from one parsed buffer plus a reusable
//! library [`SymbolTable`]; nothing is cached across buffers.

mod resolve;
mod source;
mod symbols;
mod usage;

pub use resolve::{Binding, ImportScope, ResolutionOutcome, Resolver, namespace_chain};
pub use source::FileSet;
pub use symbols::{
    LINQ_NAMESPACE, NamespaceScope, OBJECT_MEMBERS, Symbols, SymbolTable, TypeInfo, array_type,
    predefined_type,
};
pub use usage::ImportUsage;
