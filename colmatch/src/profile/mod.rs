//! Column profile data model.
//!
//! - [`DeclaredType`]: closed enumeration of canonical column types, with
//!   the numeric/text/temporal family tables
//! - [`ColumnProfile`]: per-column summary built through value-returning steps
//! - [`ColumnProfileId`] / [`ColumnProfilePair`]: content-addressed identity
//!   used by the matcher to deduplicate pairs

mod column;
mod id;
mod types;

pub use column::ColumnProfile;
pub use id::{ColumnProfileId, ColumnProfilePair};
pub use types::{DeclaredType, TypeFamily, UnknownTypeLabel};
