#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Common type and common reference deduction over C-family type descriptors.
//!
//! Answers, for arbitrary combinations of value types, lvalue references and
//! rvalue references with any const/volatile qualification, "what single type
//! can all of these convert to or bind to". Absence of an answer is a value
//! (`None`), never an error, so callers can branch on applicability.
//!
//! # Example
//!
//! ```
//! use comref_lib::Resolver;
//!
//! let mut resolver = Resolver::new();
//! let a = resolver.parse("int&").unwrap();
//! let b = resolver.parse("int const&").unwrap();
//!
//! let common = resolver.common_reference(&[a, b]).unwrap();
//! assert_eq!(resolver.display(common).to_string(), "int const&");
//!
//! let value = resolver.common_type(&[a, b]).unwrap();
//! assert_eq!(resolver.display(value).to_string(), "int");
//! ```

pub mod builtin;
pub mod cond;
pub mod convert;
pub mod parse;
pub mod qual;
pub mod resolver;
pub mod universe;

pub use comref_core::{
    ArithTy, ClassId, ClassInfo, Cv, RefKind, TY_BOOL, TY_INT, TY_NULLPTR, TY_VOID, Ty, TyDisplay,
    TyId, TyKind, TypeDb,
};

pub use builtin::builtin_common;
pub use cond::cond_res;
pub use convert::is_convertible;
pub use parse::{ParseError, parse_type};
pub use qual::{QualTransfer, as_cref, copy_cv, decay, remove_cvref};
pub use resolver::{CommonReferenceRule, Resolver};
pub use universe::{UniverseError, load_universe};

#[cfg(test)]
mod resolver_tests;
