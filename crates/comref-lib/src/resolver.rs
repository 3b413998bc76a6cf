//! Public deduction relations and their customization points.
//!
//! The [`Resolver`] owns the [`TypeDb`] plus two registries:
//!
//! - common-type overrides, keyed by the exact ordered pair of decayed
//!   types: a registered `Some(R)` wins over the built-in resolver, a
//!   registered `None` forces absence for that pair
//! - common-reference rules ([`CommonReferenceRule`] strategy objects),
//!   keyed by the exact ordered pair of cvref-stripped types and handed
//!   each operand's captured [`QualTransfer`]
//!
//! Variadic forms left-fold the binary relations and short-circuit to
//! `None` at the first undefined step.

use indexmap::IndexMap;

use comref_core::{TyDisplay, TyId, TypeDb};

use crate::builtin::builtin_common;
use crate::parse::{ParseError, parse_type};
use crate::qual::{QualTransfer, decay, remove_cvref};

/// A user-supplied common-reference rule for one pair of stripped types.
///
/// `left` and `right` capture the original operands' reference categories
/// and qualifications, so a rule can reconstruct "as if applied to the
/// original operand". Returning `None` falls through to the built-in
/// resolution chain.
pub trait CommonReferenceRule {
    fn resolve(&self, db: &mut TypeDb, left: QualTransfer, right: QualTransfer) -> Option<TyId>;
}

impl<F> CommonReferenceRule for F
where
    F: Fn(&mut TypeDb, QualTransfer, QualTransfer) -> Option<TyId>,
{
    fn resolve(&self, db: &mut TypeDb, left: QualTransfer, right: QualTransfer) -> Option<TyId> {
        self(db, left, right)
    }
}

/// Deduction engine: type database plus customization registries.
pub struct Resolver {
    db: TypeDb,
    common_type_rules: IndexMap<(TyId, TyId), Option<TyId>>,
    common_ref_rules: IndexMap<(TyId, TyId), Box<dyn CommonReferenceRule>>,
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new()
    }
}

impl Resolver {
    pub fn new() -> Self {
        Self::with_db(TypeDb::new())
    }

    /// Wrap an existing database (e.g. one populated from a universe
    /// document).
    pub fn with_db(db: TypeDb) -> Self {
        Self {
            db,
            common_type_rules: IndexMap::new(),
            common_ref_rules: IndexMap::new(),
        }
    }

    pub fn db(&self) -> &TypeDb {
        &self.db
    }

    pub fn db_mut(&mut self) -> &mut TypeDb {
        &mut self.db
    }

    /// Parse a type spelling into the owned database.
    pub fn parse(&mut self, source: &str) -> Result<TyId, ParseError> {
        parse_type(&mut self.db, source)
    }

    /// Displayable spelling of a type.
    pub fn display(&self, id: TyId) -> TyDisplay<'_> {
        self.db.display(id)
    }

    // ========== Customization ==========

    /// Override the common type of the ordered pair `(a, b)`. Both keys are
    /// decayed first. `Some(result)` takes precedence over the built-in
    /// resolver; `None` forces the pair to have no common type.
    pub fn set_common_type(&mut self, a: TyId, b: TyId, result: Option<TyId>) {
        let key = (decay(&mut self.db, a), decay(&mut self.db, b));
        self.common_type_rules.insert(key, result);
    }

    /// Register a common-reference rule for the ordered pair `(a, b)`.
    /// Both keys are stripped of references and cv first.
    pub fn add_common_reference_rule(
        &mut self,
        a: TyId,
        b: TyId,
        rule: Box<dyn CommonReferenceRule>,
    ) {
        let key = (remove_cvref(&mut self.db, a), remove_cvref(&mut self.db, b));
        self.common_ref_rules.insert(key, rule);
    }

    // ========== Relations ==========

    /// The common type of all the given types, if one exists.
    ///
    /// Zero types have none; a single type's common type is its decayed
    /// form; longer lists left-fold the binary relation.
    pub fn common_type(&mut self, types: &[TyId]) -> Option<TyId> {
        let (&first, rest) = types.split_first()?;
        if rest.is_empty() {
            return Some(decay(&mut self.db, first));
        }
        rest.iter()
            .try_fold(first, |acc, &next| self.common_type_pair(acc, next))
    }

    /// The binary common-type relation.
    pub fn common_type_pair(&mut self, t: TyId, u: TyId) -> Option<TyId> {
        let dt = decay(&mut self.db, t);
        let du = decay(&mut self.db, u);
        if dt == t && du == u {
            if let Some(&overridden) = self.common_type_rules.get(&(t, u)) {
                return overridden;
            }
            builtin_common(&mut self.db, t, u)
        } else {
            self.common_type_pair(dt, du)
        }
    }

    /// The common reference of all the given types, if one exists.
    ///
    /// Zero types have none; a single type is returned unchanged,
    /// references and qualifiers preserved; longer lists left-fold the
    /// binary relation.
    pub fn common_reference(&mut self, types: &[TyId]) -> Option<TyId> {
        let (&first, rest) = types.split_first()?;
        if rest.is_empty() {
            return Some(first);
        }
        rest.iter()
            .try_fold(first, |acc, &next| self.common_reference_pair(acc, next))
    }

    /// The binary common-reference relation: registered rule first, then
    /// the built-in resolver when its answer is a reference, then the
    /// common-type relation.
    pub fn common_reference_pair(&mut self, t: TyId, u: TyId) -> Option<TyId> {
        let key = (
            remove_cvref(&mut self.db, t),
            remove_cvref(&mut self.db, u),
        );
        if let Some(rule) = self.common_ref_rules.get(&key) {
            let left = QualTransfer::of(&self.db, t);
            let right = QualTransfer::of(&self.db, u);
            if let Some(result) = rule.resolve(&mut self.db, left, right) {
                return Some(result);
            }
        }

        if let Some(built) = builtin_common(&mut self.db, t, u) {
            if self.db.is_reference(built) {
                return Some(built);
            }
        }

        self.common_type_pair(t, u)
    }
}
