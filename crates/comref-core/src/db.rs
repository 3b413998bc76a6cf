//! TypeDb: interned types plus the class registry.
//!
//! Types are interned to enable cheap equality checks. Interning
//! canonicalizes descriptors so that equal-up-to-representation types share
//! an id:
//! - a reference never carries top-level cv (it is dropped)
//! - references to references collapse; lvalue wins
//! - cv on an array moves onto the element type
//! - cv on a function type is dropped
//!
//! Classes are registered by name; each carries its direct bases and the
//! implicit conversions it declares (conversion operators and converting
//! constructors).

use std::collections::HashMap;

use indexmap::IndexMap;

use crate::display::TyDisplay;
use crate::interner::{Interner, Symbol};
use crate::ty::{ArithTy, Cv, RefKind, TY_BOOL, TY_INT, TY_NULLPTR, TY_VOID, Ty, TyId, TyKind};

/// Identifier of a registered class type.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct ClassId(u32);

impl ClassId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A user-registered class: direct bases and declared implicit conversions.
#[derive(Clone, Debug)]
pub struct ClassInfo {
    pub name: Symbol,
    /// Direct public bases.
    pub bases: Vec<ClassId>,
    /// Targets of conversion operators declared on this class.
    pub converts_to: Vec<TyId>,
    /// Parameter types of converting constructors declared on this class.
    pub converts_from: Vec<TyId>,
}

/// Central registry for interned types and classes.
#[derive(Debug, Clone)]
pub struct TypeDb {
    interner: Interner,
    /// Interned types by ID.
    types: Vec<Ty>,
    /// Deduplication map for type interning.
    type_map: HashMap<Ty, TyId>,
    classes: Vec<ClassInfo>,
    /// Class name → id, in registration order.
    class_names: IndexMap<Symbol, ClassId>,
}

impl Default for TypeDb {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeDb {
    pub fn new() -> Self {
        let mut db = Self {
            interner: Interner::new(),
            types: Vec::new(),
            type_map: HashMap::new(),
            classes: Vec::new(),
            class_names: IndexMap::new(),
        };

        // Pre-register builtin types at their expected IDs
        let void_id = db.intern(Ty::new(TyKind::Void));
        debug_assert_eq!(void_id, TY_VOID);

        let nullptr_id = db.intern(Ty::new(TyKind::Nullptr));
        debug_assert_eq!(nullptr_id, TY_NULLPTR);

        let bool_id = db.intern(Ty::new(TyKind::Arith(ArithTy::Bool)));
        debug_assert_eq!(bool_id, TY_BOOL);

        let int_id = db.intern(Ty::new(TyKind::Arith(ArithTy::Int)));
        debug_assert_eq!(int_id, TY_INT);

        db
    }

    // ========== Type interning ==========

    /// Intern a type, returning its ID. Canonicalizes, then deduplicates.
    pub fn intern(&mut self, ty: Ty) -> TyId {
        let ty = self.canonicalize(ty);
        if let Some(&id) = self.type_map.get(&ty) {
            return id;
        }

        let id = TyId(self.types.len() as u32);
        self.types.push(ty.clone());
        self.type_map.insert(ty, id);
        id
    }

    fn canonicalize(&mut self, ty: Ty) -> Ty {
        match ty.kind {
            TyKind::Ref { kind, referent } => {
                // cv on a reference is meaningless and dropped; a reference
                // to a reference collapses, lvalue winning
                let (kind, referent) = match self.types[referent.0 as usize].kind {
                    TyKind::Ref {
                        kind: inner_kind,
                        referent: inner,
                    } => {
                        let collapsed = if kind == RefKind::Lvalue || inner_kind == RefKind::Lvalue
                        {
                            RefKind::Lvalue
                        } else {
                            RefKind::Rvalue
                        };
                        (collapsed, inner)
                    }
                    _ => (kind, referent),
                };
                Ty::new(TyKind::Ref { kind, referent })
            }
            TyKind::Array { elem, len } if !ty.cv.is_none() => {
                // cv on an array qualifies its elements
                let elem = self.add_cv(elem, ty.cv);
                Ty::new(TyKind::Array { elem, len })
            }
            TyKind::Func { .. } => Ty::new(ty.kind),
            _ => ty,
        }
    }

    /// Get the descriptor for an id.
    ///
    /// # Panics
    /// Panics if the id was not created by this db.
    #[inline]
    pub fn ty(&self, id: TyId) -> &Ty {
        &self.types[id.0 as usize]
    }

    #[inline]
    pub fn kind(&self, id: TyId) -> &TyKind {
        &self.ty(id).kind
    }

    /// Top-level cv. References report no qualification.
    #[inline]
    pub fn cv(&self, id: TyId) -> Cv {
        self.ty(id).cv
    }

    /// Number of interned types.
    pub fn type_count(&self) -> usize {
        self.types.len()
    }

    // ========== Constructors ==========

    pub fn arith(&mut self, a: ArithTy) -> TyId {
        self.intern(Ty::new(TyKind::Arith(a)))
    }

    pub fn ptr(&mut self, pointee: TyId) -> TyId {
        self.intern(Ty::new(TyKind::Ptr(pointee)))
    }

    pub fn array(&mut self, elem: TyId, len: Option<u64>) -> TyId {
        self.intern(Ty::new(TyKind::Array { elem, len }))
    }

    pub fn func(&mut self, ret: TyId, params: Vec<TyId>) -> TyId {
        self.intern(Ty::new(TyKind::Func { ret, params }))
    }

    pub fn class_ty(&mut self, class: ClassId) -> TyId {
        self.intern(Ty::new(TyKind::Class(class)))
    }

    /// Lvalue reference, collapsing if `referent` is itself a reference.
    pub fn lref(&mut self, referent: TyId) -> TyId {
        self.intern(Ty::new(TyKind::Ref {
            kind: RefKind::Lvalue,
            referent,
        }))
    }

    /// Rvalue reference, collapsing if `referent` is itself a reference.
    pub fn rref(&mut self, referent: TyId) -> TyId {
        self.intern(Ty::new(TyKind::Ref {
            kind: RefKind::Rvalue,
            referent,
        }))
    }

    // ========== Qualification and reference helpers ==========

    /// Replace the top-level cv. A no-op on references.
    pub fn with_cv(&mut self, id: TyId, cv: Cv) -> TyId {
        let kind = self.ty(id).kind.clone();
        self.intern(Ty::qualified(cv, kind))
    }

    /// Union the given cv into the top-level cv. A no-op on references.
    pub fn add_cv(&mut self, id: TyId, cv: Cv) -> TyId {
        let merged = self.cv(id).union(cv);
        self.with_cv(id, merged)
    }

    pub fn is_reference(&self, id: TyId) -> bool {
        self.kind(id).is_ref()
    }

    /// Reference category and referent, if `id` is a reference.
    pub fn as_ref_parts(&self, id: TyId) -> Option<(RefKind, TyId)> {
        match *self.kind(id) {
            TyKind::Ref { kind, referent } => Some((kind, referent)),
            _ => None,
        }
    }

    /// The referent of a reference, or the type itself.
    pub fn strip_ref(&self, id: TyId) -> TyId {
        match self.as_ref_parts(id) {
            Some((_, referent)) => referent,
            None => id,
        }
    }

    /// Whether the kind is `void`, regardless of qualification.
    pub fn is_void(&self, id: TyId) -> bool {
        matches!(self.kind(id), TyKind::Void)
    }

    // ========== Class registry ==========

    /// Register a class by name, returning its id.
    /// If already registered, returns the existing id.
    pub fn register_class(&mut self, name: &str) -> ClassId {
        let sym = self.interner.intern(name);
        if let Some(&id) = self.class_names.get(&sym) {
            return id;
        }
        let id = ClassId(self.classes.len() as u32);
        self.classes.push(ClassInfo {
            name: sym,
            bases: Vec::new(),
            converts_to: Vec::new(),
            converts_from: Vec::new(),
        });
        self.class_names.insert(sym, id);
        id
    }

    pub fn class(&self, id: ClassId) -> &ClassInfo {
        &self.classes[id.index()]
    }

    pub fn class_name(&self, id: ClassId) -> &str {
        self.interner.resolve(self.class(id).name)
    }

    pub fn class_by_name(&self, name: &str) -> Option<ClassId> {
        let sym = self.interner.lookup(name)?;
        self.class_names.get(&sym).copied()
    }

    /// Declare `base` as a direct base of `class`.
    pub fn add_base(&mut self, class: ClassId, base: ClassId) {
        self.classes[class.index()].bases.push(base);
    }

    /// Declare a conversion operator on `class` targeting `target`.
    pub fn add_conversion_to(&mut self, class: ClassId, target: TyId) {
        self.classes[class.index()].converts_to.push(target);
    }

    /// Declare a converting constructor on `class` accepting `source`.
    pub fn add_conversion_from(&mut self, class: ClassId, source: TyId) {
        self.classes[class.index()].converts_from.push(source);
    }

    /// Whether `derived` has `base` among its (transitive) bases.
    /// Strict: a class does not derive from itself.
    pub fn derives_from(&self, derived: ClassId, base: ClassId) -> bool {
        let mut stack = self.class(derived).bases.clone();
        let mut seen = vec![false; self.classes.len()];
        while let Some(c) = stack.pop() {
            if c == base {
                return true;
            }
            if seen[c.index()] {
                continue;
            }
            seen[c.index()] = true;
            stack.extend_from_slice(&self.class(c).bases);
        }
        false
    }

    /// Number of registered classes.
    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    /// Iterate over all classes in registration order.
    pub fn iter_classes(&self) -> impl Iterator<Item = (ClassId, &ClassInfo)> {
        self.classes
            .iter()
            .enumerate()
            .map(|(i, info)| (ClassId(i as u32), info))
    }

    // ========== Rendering ==========

    /// Displayable spelling of a type.
    pub fn display(&self, id: TyId) -> TyDisplay<'_> {
        TyDisplay::new(self, id)
    }
}
