//! Column role resolution for datasets with unknown schemas.
//!
//! The resolver runs once per dataset (when its column set is known) and
//! produces a [`insight_model::ColumnBinding`] that every downstream stage
//! receives explicitly.

#![deny(unsafe_code)]

mod hints;
mod keywords;
mod resolver;

pub use hints::apply_column_hints;
pub use keywords::{RoleKeywords, default_keywords};
pub use resolver::{ColumnRoleResolver, ResolutionReport, RoleMatch};
