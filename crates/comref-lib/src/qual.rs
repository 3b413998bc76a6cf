//! Qualifier and reference transfer.
//!
//! The leaf utilities everything above builds on: copying cv-qualification
//! between types, forming const lvalue references, decaying to the by-value
//! form, and the reified transfer function ([`QualTransfer`]) that captures
//! an operand's exact reference category and qualification so a
//! customization rule can re-apply them to another type.

use comref_core::{Cv, RefKind, TyId, TyKind, TypeDb};

/// `to` carrying its own qualification plus exactly `from`'s cv bits.
///
/// Union semantics: destination bits are kept, re-application is idempotent.
pub fn copy_cv(db: &mut TypeDb, from: TyId, to: TyId) -> TyId {
    let cv = db.cv(from);
    db.add_cv(to, cv)
}

/// The const lvalue reference form of a type: strip any reference, add
/// const, wrap `&`. `void` (any cv) passes through unchanged.
pub fn as_cref(db: &mut TypeDb, t: TyId) -> TyId {
    let stripped = db.strip_ref(t);
    if db.is_void(stripped) {
        return stripped;
    }
    let qualified = db.add_cv(stripped, Cv::CONST);
    db.lref(qualified)
}

/// The by-value form: strip any reference, then array-to-pointer and
/// function-to-pointer, otherwise strip top-level cv.
pub fn decay(db: &mut TypeDb, t: TyId) -> TyId {
    let t = db.strip_ref(t);
    let kind = db.kind(t).clone();
    match kind {
        TyKind::Array { elem, .. } => db.ptr(elem),
        TyKind::Func { .. } => db.ptr(t),
        _ => db.with_cv(t, Cv::NONE),
    }
}

/// Strip any reference and top-level cv, keeping the base type intact
/// (arrays and functions are not converted to pointers).
pub fn remove_cvref(db: &mut TypeDb, t: TyId) -> TyId {
    let t = db.strip_ref(t);
    db.with_cv(t, Cv::NONE)
}

/// A captured qualifier/reference transfer function.
///
/// `QualTransfer::of(x)` records x's reference category and underlying cv;
/// `apply` re-qualifies another type the same way. Customization rules
/// receive one per operand so they can reconstruct "as if applied to the
/// original".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QualTransfer {
    pub cv: Cv,
    pub reference: Option<RefKind>,
}

impl QualTransfer {
    pub fn of(db: &TypeDb, t: TyId) -> Self {
        match db.as_ref_parts(t) {
            Some((kind, referent)) => Self {
                cv: db.cv(referent),
                reference: Some(kind),
            },
            None => Self {
                cv: db.cv(t),
                reference: None,
            },
        }
    }

    /// Re-qualify `target`: union the captured cv in (a no-op on
    /// references), then wrap in the captured reference kind, collapsing if
    /// `target` is itself a reference. `void` is never wrapped.
    pub fn apply(self, db: &mut TypeDb, target: TyId) -> TyId {
        let qualified = if db.is_reference(target) {
            target
        } else {
            db.add_cv(target, self.cv)
        };

        let Some(kind) = self.reference else {
            return qualified;
        };
        let stripped = db.strip_ref(qualified);
        if db.is_void(stripped) {
            return qualified;
        }
        match kind {
            RefKind::Lvalue => db.lref(qualified),
            RefKind::Rvalue => db.rref(qualified),
        }
    }
}
