//! Object identity types

mod group_kind;
mod metadata;

pub use group_kind::GroupKind;
pub use metadata::ObjMetadata;
