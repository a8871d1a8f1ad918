use std::fmt::{self, Write};

use crate::store::{CatId, CategoryKind, CategoryStore};

impl CategoryStore {
    /// Plain notation: `(S\NP)/NP`, `NP[nb]`, `X_3`.
    pub fn render(&self, id: CatId) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail
        let _ = self.write_plain(&mut out, id);
        out
    }

    /// Notation with every cell's identity: `(S{101}\NP{102}){103}`.
    pub fn render_indexed(&self, id: CatId) -> String {
        let mut out = String::new();
        let _ = self.write_indexed(&mut out, id);
        out
    }

    /// `Display` adaptor over [`CategoryStore::render`].
    pub fn display(&self, id: CatId) -> Rendered<'_> {
        Rendered { store: self, id }
    }

    fn write_plain(&self, out: &mut impl Write, id: CatId) -> fmt::Result {
        match self.kind(id) {
            CategoryKind::Atom { base, feature } => match feature.as_str() {
                Some(value) if !value.is_empty() => write!(out, "{}[{}]", base, value),
                _ => out.write_str(base),
            },
            CategoryKind::Functor { left, slash, right } => {
                self.write_operand(out, *left)?;
                out.write_char(slash.as_char())?;
                self.write_operand(out, *right)
            }
            CategoryKind::Placeholder(variable) => write!(out, "X_{}", variable),
        }
    }

    fn write_operand(&self, out: &mut impl Write, id: CatId) -> fmt::Result {
        if self.is_functor(id) {
            out.write_char('(')?;
            self.write_plain(out, id)?;
            out.write_char(')')
        } else {
            self.write_plain(out, id)
        }
    }

    fn write_indexed(&self, out: &mut impl Write, id: CatId) -> fmt::Result {
        let identity = self.identity(id);
        match self.kind(id) {
            CategoryKind::Atom { base, feature } => match feature.as_str() {
                Some(value) if !value.is_empty() => {
                    write!(out, "{}[{}]{{{}}}", base, value, identity)
                }
                _ => write!(out, "{}{{{}}}", base, identity),
            },
            CategoryKind::Functor { left, slash, right } => {
                out.write_char('(')?;
                self.write_indexed(out, *left)?;
                out.write_char(slash.as_char())?;
                self.write_indexed(out, *right)?;
                write!(out, "){{{}}}", identity)
            }
            CategoryKind::Placeholder(variable) => write!(out, "X_{}{{{}}}", variable, identity),
        }
    }
}

pub struct Rendered<'a> {
    store: &'a CategoryStore,
    id: CatId,
}

impl fmt::Display for Rendered<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.store.write_plain(f, self.id)
    }
}
