//! Conditional-expression oracle.
//!
//! `cond_res(a, b)` computes the type a conditional expression with
//! `declval` operands of types `a` and `b` would yield. One canonical rule
//! set, ordered:
//!
//! 1. identical operand types (including category)
//! 2. `void` operands (both or neither)
//! 3. same-category glvalues merged by cv-union or derived-to-base binding
//! 4. prvalue fallback: decay, then identity / usual arithmetic /
//!    composite pointer / single-direction class conversion
//!
//! Absence at every step is `None`, never an error.

use comref_core::{ArithTy, Cv, TY_VOID, TyId, TyKind, TypeDb};

use crate::convert::{ValueCategory, categorize, value_convertible};
use crate::qual::decay;

/// The type of `cond ? declval<A>() : declval<B>()`, if one exists.
pub fn cond_res(db: &mut TypeDb, a: TyId, b: TyId) -> Option<TyId> {
    if a == b {
        return Some(a);
    }

    let (cat_a, ta) = categorize(db, a);
    let (cat_b, tb) = categorize(db, b);

    let a_void = db.is_void(ta);
    let b_void = db.is_void(tb);
    if a_void || b_void {
        return (a_void && b_void).then_some(TY_VOID);
    }

    if cat_a == cat_b && cat_a != ValueCategory::Prvalue {
        if let Some(merged) = glvalue_merge(db, cat_a, ta, tb) {
            return Some(merged);
        }
    }

    prvalue_result(db, a, b)
}

/// Merge two same-category glvalues into a single reference type: same base
/// modulo cv unions the qualification; otherwise one operand may bind to a
/// base class of the other.
fn glvalue_merge(db: &mut TypeDb, cat: ValueCategory, ta: TyId, tb: TyId) -> Option<TyId> {
    let ta0 = db.with_cv(ta, Cv::NONE);
    let tb0 = db.with_cv(tb, Cv::NONE);

    if ta0 == tb0 {
        let cv = db.cv(ta).union(db.cv(tb));
        let merged = db.with_cv(ta0, cv);
        return Some(make_ref(db, cat, merged));
    }

    let classes = match (db.kind(ta0), db.kind(tb0)) {
        (&TyKind::Class(ca), &TyKind::Class(cb)) => Some((ca, cb)),
        _ => None,
    };
    if let Some((ca, cb)) = classes {
        // derivation is antisymmetric, so at most one direction holds
        if db.derives_from(ca, cb) && db.cv(tb).contains(db.cv(ta)) {
            return Some(make_ref(db, cat, tb));
        }
        if db.derives_from(cb, ca) && db.cv(ta).contains(db.cv(tb)) {
            return Some(make_ref(db, cat, ta));
        }
    }

    None
}

fn make_ref(db: &mut TypeDb, cat: ValueCategory, referent: TyId) -> TyId {
    match cat {
        ValueCategory::Lvalue => db.lref(referent),
        _ => db.rref(referent),
    }
}

fn prvalue_result(db: &mut TypeDb, a: TyId, b: TyId) -> Option<TyId> {
    let va = decay(db, a);
    let vb = decay(db, b);
    if va == vb {
        return Some(va);
    }

    let ka = db.kind(va).clone();
    let kb = db.kind(vb).clone();
    match (&ka, &kb) {
        (&TyKind::Arith(x), &TyKind::Arith(y)) => {
            let common = ArithTy::usual_arithmetic(x, y);
            return Some(db.arith(common));
        }
        (TyKind::Nullptr, TyKind::Ptr(_)) => return Some(vb),
        (TyKind::Ptr(_), TyKind::Nullptr) => return Some(va),
        (&TyKind::Ptr(p), &TyKind::Ptr(q)) => return composite_ptr(db, p, q),
        _ => {}
    }

    // a single user-defined conversion may decide a winner when a class is
    // involved; both directions converting is ambiguous
    if ka.is_class() || kb.is_class() {
        let a_to_b = value_convertible(db, va, vb);
        let b_to_a = value_convertible(db, vb, va);
        return match (a_to_b, b_to_a) {
            (true, false) => Some(vb),
            (false, true) => Some(va),
            _ => None,
        };
    }

    None
}

/// Composite pointer type of two pointee types.
fn composite_ptr(db: &mut TypeDb, p: TyId, q: TyId) -> Option<TyId> {
    let cv = db.cv(p).union(db.cv(q));
    let p0 = db.with_cv(p, Cv::NONE);
    let q0 = db.with_cv(q, Cv::NONE);

    if p0 == q0 {
        let merged = db.with_cv(p0, cv);
        return Some(db.ptr(merged));
    }
    if matches!(db.kind(p0), TyKind::Func { .. }) || matches!(db.kind(q0), TyKind::Func { .. }) {
        return None;
    }
    if db.is_void(p0) || db.is_void(q0) {
        let merged = db.with_cv(TY_VOID, cv);
        return Some(db.ptr(merged));
    }
    let classes = match (db.kind(p0), db.kind(q0)) {
        (&TyKind::Class(cp), &TyKind::Class(cq)) => Some((cp, cq)),
        _ => None,
    };
    if let Some((cp, cq)) = classes {
        if db.derives_from(cp, cq) {
            let merged = db.with_cv(q0, cv);
            return Some(db.ptr(merged));
        }
        if db.derives_from(cq, cp) {
            let merged = db.with_cv(p0, cv);
            return Some(db.ptr(merged));
        }
    }
    None
}
