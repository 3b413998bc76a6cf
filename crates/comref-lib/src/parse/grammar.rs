//! Recursive-descent grammar over the token stream.
//!
//! ```text
//! type    := base suffix*
//! base    := (cv | spec-word)* | (cv* class-name cv*)
//! suffix  := '*' cv* | '[' number? ']' | '(' type (',' type)* ')'
//!          | '&' | '&&'            -- terminal: nothing may follow
//! ```

use comref_core::{ArithTy, Cv, RefKind, Ty, TyId, TyKind, TypeDb};

use super::ParseError;
use super::lexer::{Token, TokenKind};

pub(crate) struct Parser<'db, 'src> {
    db: &'db mut TypeDb,
    source: &'src str,
    tokens: Vec<Token>,
    pos: usize,
}

impl<'db, 'src> Parser<'db, 'src> {
    pub(crate) fn new(db: &'db mut TypeDb, source: &'src str, tokens: Vec<Token>) -> Self {
        Self {
            db,
            source,
            tokens,
            pos: 0,
        }
    }

    pub(crate) fn parse(mut self) -> Result<TyId, ParseError> {
        let ty = self.ty()?;
        match self.peek_kind() {
            Some(_) => Err(ParseError::TrailingInput {
                offset: self.current_offset(),
            }),
            None => Ok(ty),
        }
    }

    fn peek_kind(&self) -> Option<TokenKind> {
        self.tokens.get(self.pos).map(|t| t.kind)
    }

    fn current_text(&self) -> &'src str {
        let span = self.tokens[self.pos].span.clone();
        let source: &'src str = self.source;
        &source[span]
    }

    fn current_offset(&self) -> usize {
        self.tokens[self.pos].span.start
    }

    fn eat(&mut self, kind: TokenKind) -> bool {
        if self.peek_kind() == Some(kind) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: TokenKind) -> Result<(), ParseError> {
        match self.peek_kind() {
            Some(k) if k == kind => {
                self.pos += 1;
                Ok(())
            }
            Some(_) => Err(ParseError::UnexpectedToken {
                offset: self.current_offset(),
            }),
            None => Err(ParseError::UnexpectedEof),
        }
    }

    fn ty(&mut self) -> Result<TyId, ParseError> {
        let mut current = self.base()?;

        loop {
            let Some(kind) = self.peek_kind() else { break };
            match kind {
                TokenKind::Star => {
                    self.pos += 1;
                    current = self.db.ptr(current);
                    current = self.pointer_cv(current)?;
                }
                TokenKind::LBracket => {
                    self.pos += 1;
                    let len = if self.peek_kind() == Some(TokenKind::Number) {
                        let text = self.current_text();
                        let value =
                            text.parse::<u64>()
                                .map_err(|_| ParseError::ArrayLength {
                                    text: text.to_string(),
                                })?;
                        self.pos += 1;
                        Some(value)
                    } else {
                        None
                    };
                    self.expect(TokenKind::RBracket)?;
                    current = self.db.array(current, len);
                }
                TokenKind::LParen => {
                    self.pos += 1;
                    let mut params = Vec::new();
                    if self.peek_kind() != Some(TokenKind::RParen) {
                        loop {
                            params.push(self.ty()?);
                            if !self.eat(TokenKind::Comma) {
                                break;
                            }
                        }
                    }
                    self.expect(TokenKind::RParen)?;
                    current = self.db.func(current, params);
                }
                TokenKind::Amp => {
                    self.pos += 1;
                    current = self.reference(current, RefKind::Lvalue)?;
                    break;
                }
                TokenKind::AmpAmp => {
                    self.pos += 1;
                    current = self.reference(current, RefKind::Rvalue)?;
                    break;
                }
                _ => break,
            }
        }

        Ok(current)
    }

    fn reference(&mut self, base: TyId, kind: RefKind) -> Result<TyId, ParseError> {
        if self.db.is_void(self.db.strip_ref(base)) {
            return Err(ParseError::ReferenceToVoid);
        }
        Ok(match kind {
            RefKind::Lvalue => self.db.lref(base),
            RefKind::Rvalue => self.db.rref(base),
        })
    }

    /// cv words after `*` qualify the pointer itself.
    fn pointer_cv(&mut self, mut current: TyId) -> Result<TyId, ParseError> {
        while self.peek_kind() == Some(TokenKind::Ident) {
            match self.current_text() {
                "const" => {
                    if self.db.cv(current).is_const {
                        return Err(ParseError::DuplicateSpecifier {
                            spec: "const".to_string(),
                        });
                    }
                    current = self.db.add_cv(current, Cv::CONST);
                    self.pos += 1;
                }
                "volatile" => {
                    if self.db.cv(current).is_volatile {
                        return Err(ParseError::DuplicateSpecifier {
                            spec: "volatile".to_string(),
                        });
                    }
                    current = self.db.add_cv(current, Cv::VOLATILE);
                    self.pos += 1;
                }
                _ => break,
            }
        }
        Ok(current)
    }

    fn base(&mut self) -> Result<TyId, ParseError> {
        let mut cv = Cv::NONE;
        let mut specs = SpecSet::default();
        let mut class_name: Option<&'src str> = None;

        while self.peek_kind() == Some(TokenKind::Ident) {
            let word = self.current_text();
            match word {
                "const" => {
                    if cv.is_const {
                        return Err(ParseError::DuplicateSpecifier {
                            spec: "const".to_string(),
                        });
                    }
                    cv = cv.add_const();
                    self.pos += 1;
                }
                "volatile" => {
                    if cv.is_volatile {
                        return Err(ParseError::DuplicateSpecifier {
                            spec: "volatile".to_string(),
                        });
                    }
                    cv = cv.union(Cv::VOLATILE);
                    self.pos += 1;
                }
                _ => {
                    if specs.try_add(word)? {
                        self.pos += 1;
                    } else if class_name.is_some() || specs.any() {
                        break;
                    } else {
                        class_name = Some(word);
                        self.pos += 1;
                    }
                }
            }
        }

        if let Some(name) = class_name {
            let class =
                self.db
                    .class_by_name(name)
                    .ok_or_else(|| ParseError::UnknownType {
                        name: name.to_string(),
                    })?;
            let ty = self.db.class_ty(class);
            return Ok(self.db.add_cv(ty, cv));
        }

        if !specs.any() {
            return match self.peek_kind() {
                Some(_) => Err(ParseError::UnexpectedToken {
                    offset: self.current_offset(),
                }),
                None => Err(ParseError::UnexpectedEof),
            };
        }

        let kind = specs.resolve()?;
        let id = self.db.intern(Ty::new(kind));
        Ok(self.db.add_cv(id, cv))
    }
}

/// Accumulated arithmetic/builtin specifier words.
#[derive(Default)]
struct SpecSet<'src> {
    signed_: bool,
    unsigned_: bool,
    short_: bool,
    int_: bool,
    char_: bool,
    bool_: bool,
    float_: bool,
    double_: bool,
    void_: bool,
    nullptr_: bool,
    longs: u8,
    seen: Vec<&'src str>,
}

impl<'src> SpecSet<'src> {
    fn any(&self) -> bool {
        !self.seen.is_empty()
    }

    /// Consume a specifier word. `Ok(false)` means the word is not a
    /// specifier at all (a class-name candidate).
    fn try_add(&mut self, word: &'src str) -> Result<bool, ParseError> {
        if word == "long" {
            if self.longs == 2 {
                return Err(ParseError::DuplicateSpecifier {
                    spec: "long".to_string(),
                });
            }
            self.longs += 1;
            self.seen.push(word);
            return Ok(true);
        }

        let flag = match word {
            "signed" => &mut self.signed_,
            "unsigned" => &mut self.unsigned_,
            "short" => &mut self.short_,
            "int" => &mut self.int_,
            "char" => &mut self.char_,
            "bool" => &mut self.bool_,
            "float" => &mut self.float_,
            "double" => &mut self.double_,
            "void" => &mut self.void_,
            "nullptr_t" => &mut self.nullptr_,
            _ => return Ok(false),
        };
        if *flag {
            return Err(ParseError::DuplicateSpecifier {
                spec: word.to_string(),
            });
        }
        *flag = true;
        self.seen.push(word);
        Ok(true)
    }

    fn resolve(&self) -> Result<TyKind, ParseError> {
        use ArithTy::*;

        let err = || ParseError::BadSpecifiers {
            spelling: self.seen.join(" "),
        };

        if self.signed_ && self.unsigned_ {
            return Err(err());
        }
        if self.void_ {
            if self.seen.len() > 1 {
                return Err(err());
            }
            return Ok(TyKind::Void);
        }
        if self.nullptr_ {
            if self.seen.len() > 1 {
                return Err(err());
            }
            return Ok(TyKind::Nullptr);
        }
        if self.bool_ {
            if self.seen.len() > 1 {
                return Err(err());
            }
            return Ok(TyKind::Arith(Bool));
        }
        if self.float_ {
            if self.seen.len() > 1 {
                return Err(err());
            }
            return Ok(TyKind::Arith(Float));
        }
        if self.double_ {
            if self.signed_ || self.unsigned_ || self.short_ || self.int_ || self.char_
                || self.longs > 1
            {
                return Err(err());
            }
            let a = if self.longs == 1 { LongDouble } else { Double };
            return Ok(TyKind::Arith(a));
        }
        if self.char_ {
            if self.short_ || self.int_ || self.longs > 0 {
                return Err(err());
            }
            let a = if self.unsigned_ {
                UChar
            } else if self.signed_ {
                SChar
            } else {
                Char
            };
            return Ok(TyKind::Arith(a));
        }
        if self.short_ {
            if self.longs > 0 {
                return Err(err());
            }
            let a = if self.unsigned_ { UShort } else { Short };
            return Ok(TyKind::Arith(a));
        }
        match self.longs {
            2 => {
                let a = if self.unsigned_ { ULongLong } else { LongLong };
                return Ok(TyKind::Arith(a));
            }
            1 => {
                let a = if self.unsigned_ { ULong } else { Long };
                return Ok(TyKind::Arith(a));
            }
            _ => {}
        }
        if self.int_ || self.signed_ || self.unsigned_ {
            let a = if self.unsigned_ { UInt } else { Int };
            return Ok(TyKind::Arith(a));
        }
        Err(err())
    }
}
