use crate::ty::{ArithTy, Cv, RefKind, TY_BOOL, TY_INT, TY_NULLPTR, TY_VOID, Ty, TyKind};
use crate::TypeDb;

#[test]
fn builtin_types_have_expected_ids() {
    let db = TypeDb::new();

    assert_eq!(db.kind(TY_VOID), &TyKind::Void);
    assert_eq!(db.kind(TY_NULLPTR), &TyKind::Nullptr);
    assert_eq!(db.kind(TY_BOOL), &TyKind::Arith(ArithTy::Bool));
    assert_eq!(db.kind(TY_INT), &TyKind::Arith(ArithTy::Int));
}

#[test]
fn interning_deduplicates() {
    let mut db = TypeDb::new();

    let a = db.arith(ArithTy::Double);
    let b = db.arith(ArithTy::Double);
    assert_eq!(a, b);

    let p1 = db.ptr(a);
    let p2 = db.ptr(b);
    assert_eq!(p1, p2);
}

#[test]
fn cv_on_reference_is_dropped() {
    let mut db = TypeDb::new();

    let int_ref = db.lref(TY_INT);
    let requalified = db.intern(Ty::qualified(
        Cv::CONST,
        TyKind::Ref {
            kind: RefKind::Lvalue,
            referent: TY_INT,
        },
    ));

    assert_eq!(int_ref, requalified);
    assert_eq!(db.cv(int_ref), Cv::NONE);
}

#[test]
fn references_collapse() {
    let mut db = TypeDb::new();

    let lref = db.lref(TY_INT);
    let rref = db.rref(TY_INT);

    // & + & = &, & + && = &, && + & = &, && + && = &&
    assert_eq!(db.lref(lref), lref);
    assert_eq!(db.rref(lref), lref);
    assert_eq!(db.lref(rref), lref);
    assert_eq!(db.rref(rref), rref);
}

#[test]
fn array_cv_moves_to_element() {
    let mut db = TypeDb::new();

    let const_int = db.with_cv(TY_INT, Cv::CONST);
    let plain_array = db.array(TY_INT, Some(3));
    let qualified = db.add_cv(plain_array, Cv::CONST);

    let expected = db.array(const_int, Some(3));
    assert_eq!(qualified, expected);
    assert!(db.cv(qualified).is_none());
}

#[test]
fn with_cv_replaces_add_cv_unions() {
    let mut db = TypeDb::new();

    let cv_int = db.with_cv(TY_INT, Cv::CONST_VOLATILE);
    let stripped = db.with_cv(cv_int, Cv::NONE);
    assert_eq!(stripped, TY_INT);

    let const_int = db.with_cv(TY_INT, Cv::CONST);
    let both = db.add_cv(const_int, Cv::VOLATILE);
    assert_eq!(db.cv(both), Cv::CONST_VOLATILE);
}

#[test]
fn strip_ref_and_parts() {
    let mut db = TypeDb::new();

    let r = db.rref(TY_INT);
    assert_eq!(db.strip_ref(r), TY_INT);
    assert_eq!(db.strip_ref(TY_INT), TY_INT);
    assert_eq!(db.as_ref_parts(r), Some((RefKind::Rvalue, TY_INT)));
    assert_eq!(db.as_ref_parts(TY_INT), None);
}

#[test]
fn class_registration_is_idempotent() {
    let mut db = TypeDb::new();

    let a = db.register_class("Widget");
    let b = db.register_class("Gadget");
    let c = db.register_class("Widget");

    assert_eq!(a, c);
    assert_ne!(a, b);
    assert_eq!(db.class_name(a), "Widget");
    assert_eq!(db.class_by_name("Gadget"), Some(b));
    assert_eq!(db.class_by_name("Missing"), None);
    assert_eq!(db.class_count(), 2);
}

#[test]
fn derives_from_walks_transitively() {
    let mut db = TypeDb::new();

    let base = db.register_class("Base");
    let mid = db.register_class("Mid");
    let derived = db.register_class("Derived");
    let other = db.register_class("Other");

    db.add_base(mid, base);
    db.add_base(derived, mid);

    assert!(db.derives_from(derived, mid));
    assert!(db.derives_from(derived, base));
    assert!(db.derives_from(mid, base));
    assert!(!db.derives_from(base, derived));
    assert!(!db.derives_from(derived, other));
    // strict: no self-derivation
    assert!(!db.derives_from(base, base));
}
