//! Built-in common-type resolver.
//!
//! Case analysis over the reference categories of the two operands. Each
//! pairing has its own rule; the generic fallback (at least one operand is
//! not a reference) asks the conditional oracle about the const-reference
//! forms and decays the answer.

use comref_core::{Cv, RefKind, TyId, TypeDb};

use crate::cond::cond_res;
use crate::convert::is_convertible;
use crate::qual::{as_cref, copy_cv, decay};

/// The built-in common type of two operands, if one exists.
pub fn builtin_common(db: &mut TypeDb, t: TyId, u: TyId) -> Option<TyId> {
    match (db.as_ref_parts(t), db.as_ref_parts(u)) {
        (Some((RefKind::Lvalue, a)), Some((RefKind::Lvalue, b))) => lref_res(db, a, b),

        (Some((RefKind::Rvalue, a)), Some((RefKind::Rvalue, b))) => {
            if let Some(candidate) = rref_res(db, a, b) {
                if is_convertible(db, t, candidate) && is_convertible(db, u, candidate) {
                    return Some(candidate);
                }
            }
            generic_common(db, t, u)
        }

        (Some((RefKind::Lvalue, _)), Some((RefKind::Rvalue, b))) => {
            // treat the rvalue operand as merely const-qualified; the result
            // stands only if the rvalue actually converts to it
            let b_const = db.add_cv(b, Cv::CONST);
            let b_cref = db.lref(b_const);
            let candidate = builtin_common(db, t, b_cref)?;
            is_convertible(db, u, candidate).then_some(candidate)
        }

        (Some((RefKind::Rvalue, _)), Some((RefKind::Lvalue, _))) => builtin_common(db, u, t),

        _ => generic_common(db, t, u),
    }
}

/// Lvalue/lvalue rule: cross-apply each side's qualifiers onto the other's
/// base, forming the most qualified common reference, then ask the oracle.
fn lref_res(db: &mut TypeDb, a: TyId, b: TyId) -> Option<TyId> {
    let b_with_a = copy_cv(db, a, b);
    let a_with_b = copy_cv(db, b, a);
    let lhs = db.lref(b_with_a);
    let rhs = db.lref(a_with_b);
    cond_res(db, lhs, rhs)
}

/// Rvalue/rvalue candidate: the lvalue/lvalue result with its
/// reference-ness turned rvalue.
fn rref_res(db: &mut TypeDb, a: TyId, b: TyId) -> Option<TyId> {
    let r = lref_res(db, a, b)?;
    match db.as_ref_parts(r) {
        Some((_, referent)) => Some(db.rref(referent)),
        None => Some(r),
    }
}

/// Generic fallback: oracle over the const-reference forms, decayed.
fn generic_common(db: &mut TypeDb, t: TyId, u: TyId) -> Option<TyId> {
    let t_cref = as_cref(db, t);
    let u_cref = as_cref(db, u);
    let result = cond_res(db, t_cref, u_cref)?;
    Some(decay(db, result))
}
