//! Implicit convertibility.
//!
//! `is_convertible(from, to)` treats `from` as the type of a `declval`
//! expression: an lvalue if it is an lvalue reference, an xvalue if an
//! rvalue reference, a prvalue otherwise. Reference destinations go through
//! the binding rules; value destinations through copy-initialization with
//! at most one user-defined conversion in the chain.

use comref_core::{ArithTy, Cv, RefKind, TyId, TyKind, TypeDb};

use crate::qual::decay;

/// Value category of a `declval` expression of a given type.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub(crate) enum ValueCategory {
    Lvalue,
    Xvalue,
    Prvalue,
}

/// Split an expression type into its value category and unreferenced type.
pub(crate) fn categorize(db: &TypeDb, t: TyId) -> (ValueCategory, TyId) {
    match db.as_ref_parts(t) {
        Some((RefKind::Lvalue, referent)) => (ValueCategory::Lvalue, referent),
        Some((RefKind::Rvalue, referent)) => (ValueCategory::Xvalue, referent),
        None => (ValueCategory::Prvalue, t),
    }
}

/// Whether an expression of type `from` implicitly converts to `to`.
pub fn is_convertible(db: &mut TypeDb, from: TyId, to: TyId) -> bool {
    if let Some((kind, target)) = db.as_ref_parts(to) {
        return ref_bindable(db, kind, target, from);
    }
    if matches!(db.kind(to), TyKind::Array { .. } | TyKind::Func { .. }) {
        return false;
    }
    if db.is_void(to) {
        let stripped = db.strip_ref(from);
        return db.is_void(stripped);
    }

    let src = decay(db, from);
    let dst = db.with_cv(to, Cv::NONE);
    value_convertible(db, src, dst)
}

/// Whether a reference `kind`/`target` binds to an expression of type `from`.
fn ref_bindable(db: &mut TypeDb, kind: RefKind, target: TyId, from: TyId) -> bool {
    let (cat, src) = categorize(db, from);
    let direct = ref_compatible(db, target, src);

    match kind {
        RefKind::Lvalue => {
            if cat == ValueCategory::Lvalue && direct {
                return true;
            }
            // only `T const&` binds rvalues and temporaries
            let target_cv = db.cv(target);
            if !target_cv.is_const || target_cv.is_volatile {
                return false;
            }
            if direct {
                return true;
            }
            // a reference-related but incompatible source never binds
            // through a temporary
            if ref_related(db, target, src) {
                return false;
            }
            let src_value = decay(db, from);
            let dst_value = db.with_cv(target, Cv::NONE);
            value_convertible(db, src_value, dst_value)
        }
        RefKind::Rvalue => {
            if cat != ValueCategory::Lvalue && direct {
                return true;
            }
            // reference-related sources must bind directly, and never from
            // an lvalue
            if ref_related(db, target, src) {
                return false;
            }
            let src_value = decay(db, from);
            let dst_value = db.with_cv(target, Cv::NONE);
            value_convertible(db, src_value, dst_value)
        }
    }
}

/// Reference relatedness: same type ignoring cv, or `target` is a base
/// class of `src`.
fn ref_related(db: &mut TypeDb, target: TyId, src: TyId) -> bool {
    let target0 = db.with_cv(target, Cv::NONE);
    let src0 = db.with_cv(src, Cv::NONE);
    if target0 == src0 {
        return true;
    }
    match (db.kind(target0), db.kind(src0)) {
        (&TyKind::Class(base), &TyKind::Class(derived)) => db.derives_from(derived, base),
        _ => false,
    }
}

/// Reference compatibility: reference-related with a cv superset on the
/// target side.
fn ref_compatible(db: &mut TypeDb, target: TyId, src: TyId) -> bool {
    db.cv(target).contains(db.cv(src)) && ref_related(db, target, src)
}

/// Copy-initialization of a value of `dst` from a value of `src`, allowing
/// one user-defined conversion.
pub(crate) fn value_convertible(db: &mut TypeDb, src: TyId, dst: TyId) -> bool {
    value_convertible_inner(db, src, dst, true)
}

fn value_convertible_inner(db: &mut TypeDb, src: TyId, dst: TyId, allow_user: bool) -> bool {
    let src = db.with_cv(src, Cv::NONE);
    let dst = db.with_cv(dst, Cv::NONE);
    if src == dst {
        return true;
    }

    let src_kind = db.kind(src).clone();
    let dst_kind = db.kind(dst).clone();
    match (&src_kind, &dst_kind) {
        (TyKind::Arith(_), TyKind::Arith(_)) => return true,
        (TyKind::Nullptr, TyKind::Ptr(_)) => return true,
        (TyKind::Nullptr, TyKind::Arith(ArithTy::Bool)) => return true,
        (TyKind::Ptr(_), TyKind::Arith(ArithTy::Bool)) => return true,
        (&TyKind::Ptr(p), &TyKind::Ptr(q)) => {
            if ptr_convertible(db, p, q) {
                return true;
            }
        }
        (&TyKind::Class(c), &TyKind::Class(d)) => {
            if db.derives_from(c, d) {
                return true;
            }
        }
        _ => {}
    }

    if !allow_user {
        return false;
    }

    // one user-defined conversion, followed by standard conversions only
    if let TyKind::Class(c) = src_kind {
        let targets = db.class(c).converts_to.clone();
        for target in targets {
            let mid = decay(db, target);
            if value_convertible_inner(db, mid, dst, false) {
                return true;
            }
        }
    }
    if let TyKind::Class(d) = dst_kind {
        let sources = db.class(d).converts_from.clone();
        for source in sources {
            let mid = decay(db, source);
            if value_convertible_inner(db, src, mid, false) {
                return true;
            }
        }
    }

    false
}

/// Pointer conversion: same pointee with a cv superset, to `void*`, or
/// derived-to-base. Function pointers only convert to themselves.
fn ptr_convertible(db: &mut TypeDb, p: TyId, q: TyId) -> bool {
    if !db.cv(q).contains(db.cv(p)) {
        return false;
    }
    let p0 = db.with_cv(p, Cv::NONE);
    let q0 = db.with_cv(q, Cv::NONE);
    if p0 == q0 {
        return true;
    }
    if matches!(db.kind(p0), TyKind::Func { .. }) || matches!(db.kind(q0), TyKind::Func { .. }) {
        return false;
    }
    if db.is_void(q0) {
        return true;
    }
    match (db.kind(p0), db.kind(q0)) {
        (&TyKind::Class(derived), &TyKind::Class(base)) => db.derives_from(derived, base),
        _ => false,
    }
}
