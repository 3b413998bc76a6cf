use comref_core::{TyId, TypeDb};

use crate::qual::QualTransfer;
use crate::resolver::{CommonReferenceRule, Resolver};

fn display(r: &Resolver, id: TyId) -> String {
    r.display(id).to_string()
}

fn common_type_of(r: &mut Resolver, spellings: &[&str]) -> Option<String> {
    let types: Vec<TyId> = spellings.iter().map(|s| r.parse(s).unwrap()).collect();
    r.common_type(&types).map(|id| display(r, id))
}

fn common_reference_of(r: &mut Resolver, spellings: &[&str]) -> Option<String> {
    let types: Vec<TyId> = spellings.iter().map(|s| r.parse(s).unwrap()).collect();
    r.common_reference(&types).map(|id| display(r, id))
}

#[test]
fn zero_types_have_no_result() {
    let mut r = Resolver::new();

    assert_eq!(r.common_type(&[]), None);
    assert_eq!(r.common_reference(&[]), None);
}

#[test]
fn single_type_decays_for_common_type_only() {
    let mut r = Resolver::new();

    assert_eq!(
        common_type_of(&mut r, &["int const&"]).as_deref(),
        Some("int")
    );
    assert_eq!(common_type_of(&mut r, &["int[3]"]).as_deref(), Some("int*"));

    // common_reference leaves a single type untouched
    assert_eq!(
        common_reference_of(&mut r, &["int const&"]).as_deref(),
        Some("int const&")
    );
    assert_eq!(
        common_reference_of(&mut r, &["int&&"]).as_deref(),
        Some("int&&")
    );
}

#[test]
fn identical_pairs_reduce_to_decay() {
    let mut r = Resolver::new();

    assert_eq!(
        common_type_of(&mut r, &["int const&", "int const&"]).as_deref(),
        Some("int")
    );
    assert_eq!(
        common_reference_of(&mut r, &["int&", "int&"]).as_deref(),
        Some("int&")
    );
}

#[test]
fn classic_scenarios() {
    let mut r = Resolver::new();

    assert_eq!(
        common_type_of(&mut r, &["int", "double"]).as_deref(),
        Some("double")
    );
    assert_eq!(
        common_type_of(&mut r, &["int&", "int const&"]).as_deref(),
        Some("int")
    );
    assert_eq!(
        common_reference_of(&mut r, &["int&", "int const&"]).as_deref(),
        Some("int const&")
    );
    assert_eq!(
        common_reference_of(&mut r, &["int&&", "int&&"]).as_deref(),
        Some("int&&")
    );
    assert_eq!(
        common_reference_of(&mut r, &["int&", "int&&"]).as_deref(),
        Some("int const&")
    );
}

#[test]
fn both_relations_commute_where_defined() {
    let mut r = Resolver::new();
    r.db_mut().register_class("Widget");

    let samples = [
        "int",
        "double",
        "int&",
        "int const&",
        "int&&",
        "unsigned long",
        "int*",
        "int const*",
        "Widget",
    ];
    for a in samples {
        for b in samples {
            let ct_ab = common_type_of(&mut r, &[a, b]);
            let ct_ba = common_type_of(&mut r, &[b, a]);
            assert_eq!(ct_ab, ct_ba, "common_type({a}, {b})");

            let cr_ab = common_reference_of(&mut r, &[a, b]);
            let cr_ba = common_reference_of(&mut r, &[b, a]);
            assert_eq!(cr_ab, cr_ba, "common_reference({a}, {b})");
        }
    }
}

#[test]
fn common_type_is_idempotent() {
    let mut r = Resolver::new();

    let a = r.parse("int&").unwrap();
    let b = r.parse("double const&").unwrap();
    let once = r.common_type(&[a, b]).unwrap();

    assert_eq!(r.common_type(&[once]), Some(once));
    assert_eq!(r.common_type(&[once, once]), Some(once));
}

#[test]
fn folds_are_left_to_right_and_short_circuit() {
    let mut r = Resolver::new();
    r.db_mut().register_class("Widget");

    assert_eq!(
        common_type_of(&mut r, &["int", "double", "long"]).as_deref(),
        Some("double")
    );
    assert_eq!(
        common_reference_of(&mut r, &["int&", "int const&", "int&&"]).as_deref(),
        Some("int const&")
    );

    // (Widget, int) is undefined, so the whole fold is, even though
    // (int, double) is defined
    assert_eq!(common_type_of(&mut r, &["Widget", "int", "double"]), None);
    assert_eq!(
        common_reference_of(&mut r, &["Widget&", "int&", "double&"]),
        None
    );
}

#[test]
fn unrelated_pairs_are_detectably_absent() {
    let mut r = Resolver::new();
    r.db_mut().register_class("Widget");
    r.db_mut().register_class("Gadget");

    assert_eq!(common_type_of(&mut r, &["Widget", "Gadget"]), None);
    assert_eq!(common_reference_of(&mut r, &["Widget&", "Gadget&"]), None);
}

#[test]
fn common_type_override_beats_the_builtin() {
    let mut r = Resolver::new();

    let int_ty = r.parse("int").unwrap();
    let double_ty = r.parse("double").unwrap();
    let long_ty = r.parse("long").unwrap();
    r.set_common_type(int_ty, double_ty, Some(long_ty));

    assert_eq!(
        common_type_of(&mut r, &["int", "double"]).as_deref(),
        Some("long")
    );
    // keys are ordered pairs: the swapped query still uses the builtin
    assert_eq!(
        common_type_of(&mut r, &["double", "int"]).as_deref(),
        Some("double")
    );
    // operands decay onto the registered pair
    assert_eq!(
        common_type_of(&mut r, &["int const&", "double&&"]).as_deref(),
        Some("long")
    );
}

#[test]
fn common_type_override_can_force_absence() {
    let mut r = Resolver::new();

    let int_ty = r.parse("int").unwrap();
    r.set_common_type(int_ty, int_ty, None);

    assert_eq!(common_type_of(&mut r, &["int", "int"]), None);
    assert_eq!(common_type_of(&mut r, &["int", "int", "double"]), None);
    // other pairs are untouched
    assert_eq!(
        common_type_of(&mut r, &["int", "double"]).as_deref(),
        Some("double")
    );
}

struct LeftQualified {
    target: TyId,
}

impl CommonReferenceRule for LeftQualified {
    fn resolve(&self, db: &mut TypeDb, left: QualTransfer, _right: QualTransfer) -> Option<TyId> {
        Some(left.apply(db, self.target))
    }
}

#[test]
fn common_reference_rule_wins_over_the_builtin_chain() {
    let mut r = Resolver::new();

    let widget = r.db_mut().register_class("Widget");
    r.db_mut().register_class("Gadget");
    let widget_ty = r.db_mut().class_ty(widget);

    let w = r.parse("Widget").unwrap();
    let g = r.parse("Gadget").unwrap();
    r.add_common_reference_rule(w, g, Box::new(LeftQualified { target: widget_ty }));

    // without the rule this pair has no common reference at all
    assert_eq!(
        common_reference_of(&mut r, &["Widget const&", "Gadget&"]).as_deref(),
        Some("Widget const&")
    );
    assert_eq!(
        common_reference_of(&mut r, &["Widget&&", "Gadget&"]).as_deref(),
        Some("Widget&&")
    );
    // the registered pair is ordered
    assert_eq!(common_reference_of(&mut r, &["Gadget&", "Widget&"]), None);
}

#[test]
fn common_reference_rule_yielding_nothing_falls_through() {
    let mut r = Resolver::new();

    let int_ty = r.parse("int").unwrap();
    r.add_common_reference_rule(
        int_ty,
        int_ty,
        Box::new(
            |_db: &mut TypeDb, _left: QualTransfer, _right: QualTransfer| -> Option<TyId> { None },
        ),
    );

    assert_eq!(
        common_reference_of(&mut r, &["int&", "int&"]).as_deref(),
        Some("int&")
    );
}

#[test]
fn common_reference_rule_applies_before_reference_gate() {
    let mut r = Resolver::new();

    let int_ty = r.parse("int").unwrap();
    let double_ty = r.parse("double").unwrap();
    r.add_common_reference_rule(
        int_ty,
        int_ty,
        Box::new(
            move |_db: &mut TypeDb, _left: QualTransfer, _right: QualTransfer| -> Option<TyId> {
                Some(double_ty)
            },
        ),
    );

    // the builtin would answer `int&`; the rule pre-empts it
    assert_eq!(
        common_reference_of(&mut r, &["int&", "int&"]).as_deref(),
        Some("double")
    );
}

#[test]
fn deduction_summaries() {
    let mut r = Resolver::new();

    let describe = |r: &mut Resolver, a: &str, b: &str| {
        let ct = common_type_of(r, &[a, b]).unwrap_or_else(|| "<none>".to_string());
        let cr = common_reference_of(r, &[a, b]).unwrap_or_else(|| "<none>".to_string());
        format!("common_type={ct}, common_reference={cr}")
    };

    insta::assert_snapshot!(
        describe(&mut r, "int&", "int const&"),
        @"common_type=int, common_reference=int const&"
    );
    insta::assert_snapshot!(
        describe(&mut r, "short", "unsigned char"),
        @"common_type=int, common_reference=int"
    );
    insta::assert_snapshot!(
        describe(&mut r, "int*", "int const*"),
        @"common_type=int const*, common_reference=int const*"
    );
    insta::assert_snapshot!(
        describe(&mut r, "int*", "double"),
        @"common_type=<none>, common_reference=<none>"
    );
}
