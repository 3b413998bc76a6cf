//! Type descriptors.
//!
//! Every operand of the deduction algebra is a `Ty`: a base kind tagged with
//! cv-qualification, references carrying their category explicitly. The
//! descriptor is the unit of interning; child types are referenced by
//! [`TyId`] into the owning [`TypeDb`](crate::TypeDb).

use crate::db::ClassId;

/// Interned type identifier. Types are stored in `TypeDb` and referenced by ID.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct TyId(pub u32);

/// `void`
pub const TY_VOID: TyId = TyId(0);
/// `nullptr_t`
pub const TY_NULLPTR: TyId = TyId(1);
/// `bool`
pub const TY_BOOL: TyId = TyId(2);
/// `int`
pub const TY_INT: TyId = TyId(3);

/// const/volatile qualification bits.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
pub struct Cv {
    pub is_const: bool,
    pub is_volatile: bool,
}

impl Cv {
    pub const NONE: Cv = Cv {
        is_const: false,
        is_volatile: false,
    };
    pub const CONST: Cv = Cv {
        is_const: true,
        is_volatile: false,
    };
    pub const VOLATILE: Cv = Cv {
        is_const: false,
        is_volatile: true,
    };
    pub const CONST_VOLATILE: Cv = Cv {
        is_const: true,
        is_volatile: true,
    };

    pub fn is_none(self) -> bool {
        !self.is_const && !self.is_volatile
    }

    /// Bitwise union of two qualification sets.
    pub fn union(self, other: Cv) -> Cv {
        Cv {
            is_const: self.is_const || other.is_const,
            is_volatile: self.is_volatile || other.is_volatile,
        }
    }

    /// Whether `self` is a superset of `other` (equal or more qualified).
    pub fn contains(self, other: Cv) -> bool {
        (self.is_const || !other.is_const) && (self.is_volatile || !other.is_volatile)
    }

    pub fn add_const(self) -> Cv {
        Cv {
            is_const: true,
            ..self
        }
    }

    /// Rendering suffix, e.g. `" const volatile"`. Empty for no qualification.
    pub fn suffix(self) -> &'static str {
        match (self.is_const, self.is_volatile) {
            (false, false) => "",
            (true, false) => " const",
            (false, true) => " volatile",
            (true, true) => " const volatile",
        }
    }
}

/// Reference category of a reference type.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum RefKind {
    Lvalue,
    Rvalue,
}

/// Arithmetic builtin types, carrying the usual-arithmetic-conversion algebra.
///
/// Widths follow the LP64 data model (`int` 4, `long` 8, `long long` 8).
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum ArithTy {
    Bool,
    Char,
    SChar,
    UChar,
    Short,
    UShort,
    Int,
    UInt,
    Long,
    ULong,
    LongLong,
    ULongLong,
    Float,
    Double,
    LongDouble,
}

impl ArithTy {
    /// Canonical spelling.
    pub fn name(self) -> &'static str {
        match self {
            ArithTy::Bool => "bool",
            ArithTy::Char => "char",
            ArithTy::SChar => "signed char",
            ArithTy::UChar => "unsigned char",
            ArithTy::Short => "short",
            ArithTy::UShort => "unsigned short",
            ArithTy::Int => "int",
            ArithTy::UInt => "unsigned int",
            ArithTy::Long => "long",
            ArithTy::ULong => "unsigned long",
            ArithTy::LongLong => "long long",
            ArithTy::ULongLong => "unsigned long long",
            ArithTy::Float => "float",
            ArithTy::Double => "double",
            ArithTy::LongDouble => "long double",
        }
    }

    pub fn is_floating(self) -> bool {
        matches!(self, ArithTy::Float | ArithTy::Double | ArithTy::LongDouble)
    }

    pub fn is_integral(self) -> bool {
        !self.is_floating()
    }

    pub fn is_signed(self) -> bool {
        matches!(
            self,
            ArithTy::Char
                | ArithTy::SChar
                | ArithTy::Short
                | ArithTy::Int
                | ArithTy::Long
                | ArithTy::LongLong
                | ArithTy::Float
                | ArithTy::Double
                | ArithTy::LongDouble
        )
    }

    /// Conversion rank. Orders the integral types for the signed/unsigned
    /// resolution step; floating types rank above all integrals.
    pub fn rank(self) -> u8 {
        match self {
            ArithTy::Bool => 0,
            ArithTy::Char | ArithTy::SChar | ArithTy::UChar => 1,
            ArithTy::Short | ArithTy::UShort => 2,
            ArithTy::Int | ArithTy::UInt => 3,
            ArithTy::Long | ArithTy::ULong => 4,
            ArithTy::LongLong | ArithTy::ULongLong => 5,
            ArithTy::Float => 6,
            ArithTy::Double => 7,
            ArithTy::LongDouble => 8,
        }
    }

    /// Object size in bytes (LP64).
    pub fn byte_size(self) -> u8 {
        match self {
            ArithTy::Bool | ArithTy::Char | ArithTy::SChar | ArithTy::UChar => 1,
            ArithTy::Short | ArithTy::UShort => 2,
            ArithTy::Int | ArithTy::UInt | ArithTy::Float => 4,
            ArithTy::Long | ArithTy::ULong | ArithTy::LongLong | ArithTy::ULongLong => 8,
            ArithTy::Double => 8,
            ArithTy::LongDouble => 16,
        }
    }

    /// Integral promotion: every type of rank below `int` promotes to `int`
    /// (all of them fit). Other types are unchanged.
    pub fn promoted(self) -> ArithTy {
        match self {
            ArithTy::Bool
            | ArithTy::Char
            | ArithTy::SChar
            | ArithTy::UChar
            | ArithTy::Short
            | ArithTy::UShort => ArithTy::Int,
            other => other,
        }
    }

    /// The unsigned counterpart of a signed integral type. Unsigned and
    /// floating types are returned unchanged.
    pub fn to_unsigned(self) -> ArithTy {
        match self {
            ArithTy::Char | ArithTy::SChar => ArithTy::UChar,
            ArithTy::Short => ArithTy::UShort,
            ArithTy::Int => ArithTy::UInt,
            ArithTy::Long => ArithTy::ULong,
            ArithTy::LongLong => ArithTy::ULongLong,
            other => other,
        }
    }

    /// Usual arithmetic conversions: the common type two arithmetic operands
    /// are brought to before a built-in binary operation.
    pub fn usual_arithmetic(a: ArithTy, b: ArithTy) -> ArithTy {
        if a == ArithTy::LongDouble || b == ArithTy::LongDouble {
            return ArithTy::LongDouble;
        }
        if a == ArithTy::Double || b == ArithTy::Double {
            return ArithTy::Double;
        }
        if a == ArithTy::Float || b == ArithTy::Float {
            return ArithTy::Float;
        }

        let a = a.promoted();
        let b = b.promoted();
        if a == b {
            return a;
        }
        if a.is_signed() == b.is_signed() {
            return if a.rank() >= b.rank() { a } else { b };
        }

        let (signed, unsigned) = if a.is_signed() { (a, b) } else { (b, a) };
        if unsigned.rank() >= signed.rank() {
            unsigned
        } else if signed.byte_size() > unsigned.byte_size() {
            // the signed type can represent every value of the unsigned one
            signed
        } else {
            signed.to_unsigned()
        }
    }
}

/// The kind of a type, determining its structure.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum TyKind {
    /// `void`
    Void,
    /// `nullptr_t`
    Nullptr,
    /// Arithmetic builtin
    Arith(ArithTy),
    /// Pointer; the pointee carries its own qualification
    Ptr(TyId),
    /// Array of `elem`; `len` is `None` for an unknown bound
    Array { elem: TyId, len: Option<u64> },
    /// Function type
    Func { ret: TyId, params: Vec<TyId> },
    /// User-registered class type
    Class(ClassId),
    /// Reference; the referent carries the qualification
    Ref { kind: RefKind, referent: TyId },
}

impl TyKind {
    pub fn is_arith(&self) -> bool {
        matches!(self, TyKind::Arith(_))
    }

    pub fn is_class(&self) -> bool {
        matches!(self, TyKind::Class(_))
    }

    pub fn is_ref(&self) -> bool {
        matches!(self, TyKind::Ref { .. })
    }
}

/// A cv-qualified type. The unit of interning.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Ty {
    pub cv: Cv,
    pub kind: TyKind,
}

impl Ty {
    /// An unqualified type of the given kind.
    pub fn new(kind: TyKind) -> Self {
        Self { cv: Cv::NONE, kind }
    }

    pub fn qualified(cv: Cv, kind: TyKind) -> Self {
        Self { cv, kind }
    }
}
