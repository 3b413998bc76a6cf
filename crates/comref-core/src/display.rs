//! Type rendering.
//!
//! Postfix-cv spellings matching the parser: `int const`, `int const*`,
//! `int* const`, `Widget const&`, `int[3]`, `int(int, bool)`.

use std::fmt;

use crate::db::TypeDb;
use crate::ty::{RefKind, TyId, TyKind};

/// Displayable spelling of an interned type. Obtained via [`TypeDb::display`].
pub struct TyDisplay<'db> {
    db: &'db TypeDb,
    id: TyId,
}

impl<'db> TyDisplay<'db> {
    pub(crate) fn new(db: &'db TypeDb, id: TyId) -> Self {
        Self { db, id }
    }
}

impl fmt::Display for TyDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_ty(self.db, self.id, f)
    }
}

fn write_ty(db: &TypeDb, id: TyId, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let ty = db.ty(id);
    match &ty.kind {
        TyKind::Void => write!(f, "void")?,
        TyKind::Nullptr => write!(f, "nullptr_t")?,
        TyKind::Arith(a) => write!(f, "{}", a.name())?,
        TyKind::Class(c) => write!(f, "{}", db.class_name(*c))?,
        TyKind::Ptr(pointee) => {
            write_ty(db, *pointee, f)?;
            write!(f, "*")?;
        }
        TyKind::Array { elem, len } => {
            write_ty(db, *elem, f)?;
            match len {
                Some(n) => write!(f, "[{n}]")?,
                None => write!(f, "[]")?,
            }
        }
        TyKind::Func { ret, params } => {
            write_ty(db, *ret, f)?;
            write!(f, "(")?;
            for (i, param) in params.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write_ty(db, *param, f)?;
            }
            write!(f, ")")?;
        }
        TyKind::Ref { kind, referent } => {
            write_ty(db, *referent, f)?;
            match kind {
                RefKind::Lvalue => write!(f, "&")?,
                RefKind::Rvalue => write!(f, "&&")?,
            }
        }
    }
    write!(f, "{}", ty.cv.suffix())
}
