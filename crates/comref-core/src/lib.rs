#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Canonical type model for common-type deduction.
//!
//! Two layers:
//! - **Descriptor layer**: `Ty` values tagging a base type with reference
//!   category and cv-qualification, interned in a [`TypeDb`]
//! - **Raw layer**: 1:1 serde mapping of JSON type-universe documents
//!   (classes, bases, declared conversions), resolved by downstream crates
//!
//! Types are interned to enable cheap equality checks; interning also
//! canonicalizes descriptors (references never carry cv, nested references
//! collapse, array cv moves onto the element).

mod db;
mod display;
mod interner;
mod ty;
mod universe;

pub use db::{ClassId, ClassInfo, TypeDb};
pub use display::TyDisplay;
pub use interner::{Interner, Symbol};
pub use ty::{ArithTy, Cv, RefKind, TY_BOOL, TY_INT, TY_NULLPTR, TY_VOID, Ty, TyId, TyKind};
pub use universe::{RawClass, parse_universe};

#[cfg(test)]
mod db_tests;
