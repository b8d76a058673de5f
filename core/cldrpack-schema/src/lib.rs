//! Schema-driven extraction for CLDR JSON documents.
//!
//! Every raw document goes through the same steps before it may be merged:
//! - [`check_supported_shape`] — the tree holds only objects and strings
//! - [`CategorySchema`] — the identity block has the required properties
//! - [`Handler`] — per-category metadata extraction, identity removal and
//!   payload isolation, dispatched over the closed [`Category`] set
//!
//! [`RawDocument::extract`] runs all of them and yields an [`Extraction`].
//!
//! [`Category`]: cldrpack_types::Category

mod document;
mod handler;
mod validate;

pub use document::{Extraction, RawDocument};
pub use handler::{DocumentLayout, ExtractedMetadata, Handler, PayloadTree, detect_category};
pub use validate::{CategorySchema, NodeKind, ObjectChecks, Requirement, check_supported_shape};
