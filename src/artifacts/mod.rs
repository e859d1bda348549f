//! Data structures and algorithms
//!
//! - `diff`: line diffing and per-commit diff maps
//! - `ignore`: the `.jitignore` predicate
//! - `index`: staged-entry types shared by index and tree building
//! - `merge`: merge-base finding and three-way reconciliation
//! - `objects`: the content-addressed object kinds

pub mod diff;
pub mod ignore;
pub mod index;
pub mod merge;
pub mod objects;
