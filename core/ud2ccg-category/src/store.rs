use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use ud2ccg_protocol::define_id;

use crate::identity::{Identity, IdentityAllocator, VariableId};

define_id!(
    /// Handle of a category cell inside a [`CategoryStore`].
    CatId,
    u32
);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slash {
    /// `/`: looks for its argument to the right.
    Forward,
    /// `\`: looks for its argument to the left.
    Backward,
    /// `|`: direction not decided yet; must be resolved before output.
    Either,
}

impl Slash {
    pub fn as_char(self) -> char {
        match self {
            Slash::Forward => '/',
            Slash::Backward => '\\',
            Slash::Either => '|',
        }
    }

    pub fn from_char(c: char) -> Option<Slash> {
        match c {
            '/' => Some(Slash::Forward),
            '\\' => Some(Slash::Backward),
            '|' => Some(Slash::Either),
            _ => None,
        }
    }
}

impl fmt::Display for Slash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Atom feature such as the `dcl` of `S[dcl]`.
///
/// `X` is a unification variable; a missing feature and `nb` are ignored
/// when matching.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Feature(Option<String>);

impl Feature {
    pub fn none() -> Self {
        Feature(None)
    }

    pub fn new(value: impl Into<String>) -> Self {
        Feature(Some(value.into()))
    }

    pub fn as_str(&self) -> Option<&str> {
        self.0.as_deref()
    }

    pub fn is_variable(&self) -> bool {
        self.as_str() == Some("X")
    }

    pub fn is_ignorable(&self) -> bool {
        matches!(self.as_str(), None | Some("nb"))
    }

    pub fn unifies(&self, other: &Feature) -> bool {
        self.is_variable() || self.is_ignorable() || self == other
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryKind {
    Atom { base: String, feature: Feature },
    Functor { left: CatId, slash: Slash, right: CatId },
    Placeholder(VariableId),
}

#[derive(Debug, Clone)]
struct Cell {
    kind: CategoryKind,
    identity: Identity,
}

/// Arena owning every category cell of one sentence.
///
/// Tree positions hold [`CatId`] handles, never cells. Assigning the same
/// handle to two positions makes them observe each other's resolution.
#[derive(Debug, Clone)]
pub struct CategoryStore {
    cells: Vec<Cell>,
    ids: Arc<IdentityAllocator>,
}

impl CategoryStore {
    pub fn new(ids: Arc<IdentityAllocator>) -> Self {
        Self { cells: Vec::new(), ids }
    }

    /// A store with its own private allocator.
    pub fn standalone() -> Self {
        Self::new(Arc::new(IdentityAllocator::new()))
    }

    pub fn allocator(&self) -> &Arc<IdentityAllocator> {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    fn push(&mut self, kind: CategoryKind) -> CatId {
        let id = CatId(self.cells.len() as u32);
        let identity = self.ids.fresh_identity();
        self.cells.push(Cell { kind, identity });
        id
    }

    fn cell(&self, id: CatId) -> &Cell {
        &self.cells[id.0 as usize]
    }

    fn cell_mut(&mut self, id: CatId) -> &mut Cell {
        &mut self.cells[id.0 as usize]
    }

    pub fn atom(&mut self, base: &str) -> CatId {
        self.atom_with_feature(base, Feature::none())
    }

    pub fn atom_with_feature(&mut self, base: &str, feature: Feature) -> CatId {
        self.push(CategoryKind::Atom {
            base: base.to_string(),
            feature,
        })
    }

    /// `left slash right`, sharing both operand handles.
    pub fn functor(&mut self, left: CatId, slash: Slash, right: CatId) -> CatId {
        self.push(CategoryKind::Functor { left, slash, right })
    }

    pub fn placeholder(&mut self) -> CatId {
        let variable = self.ids.fresh_variable();
        self.push(CategoryKind::Placeholder(variable))
    }

    pub fn kind(&self, id: CatId) -> &CategoryKind {
        &self.cell(id).kind
    }

    pub fn identity(&self, id: CatId) -> Identity {
        self.cell(id).identity
    }

    pub fn set_identity(&mut self, id: CatId, identity: Identity) {
        self.cell_mut(id).identity = identity;
    }

    /// Gives the cell an identity no other cell has.
    pub fn refresh_identity(&mut self, id: CatId) {
        let identity = self.ids.fresh_identity();
        self.cell_mut(id).identity = identity;
    }

    pub fn is_placeholder(&self, id: CatId) -> bool {
        matches!(self.kind(id), CategoryKind::Placeholder(_))
    }

    pub fn is_functor(&self, id: CatId) -> bool {
        matches!(self.kind(id), CategoryKind::Functor { .. })
    }

    /// Result side of a functor.
    pub fn left(&self, id: CatId) -> Option<CatId> {
        match self.kind(id) {
            CategoryKind::Functor { left, .. } => Some(*left),
            _ => None,
        }
    }

    /// Argument side of a functor.
    pub fn right(&self, id: CatId) -> Option<CatId> {
        match self.kind(id) {
            CategoryKind::Functor { right, .. } => Some(*right),
            _ => None,
        }
    }

    pub fn slash(&self, id: CatId) -> Option<Slash> {
        match self.kind(id) {
            CategoryKind::Functor { slash, .. } => Some(*slash),
            _ => None,
        }
    }

    pub(crate) fn set_slash(&mut self, id: CatId, new_slash: Slash) {
        if let CategoryKind::Functor { slash, .. } = &mut self.cell_mut(id).kind {
            *slash = new_slash;
        }
    }

    /// Overwrites a placeholder in place with the content of `source`.
    ///
    /// The copy is shallow: a functor source shares its operand handles.
    /// Every position holding `placeholder` sees the new content. With
    /// `keep_identity` the placeholder's own identity survives, otherwise it
    /// takes over the identity of `source`. Returns `false` (and changes
    /// nothing) when `placeholder` is already resolved.
    pub fn resolve(&mut self, placeholder: CatId, source: CatId, keep_identity: bool) -> bool {
        if !self.is_placeholder(placeholder) || placeholder == source {
            return false;
        }

        let Cell { kind, identity } = self.cell(source).clone();
        let cell = self.cell_mut(placeholder);
        cell.kind = kind;
        if !keep_identity {
            cell.identity = identity;
        }
        true
    }

    /// Every cell reachable from `root`, `root` first, each once.
    pub fn reachable(&self, root: CatId) -> Vec<CatId> {
        let mut seen = HashSet::new();
        let mut order = Vec::new();
        let mut stack = vec![root];

        while let Some(id) = stack.pop() {
            if !seen.insert(id) {
                continue;
            }
            order.push(id);
            if let CategoryKind::Functor { left, right, .. } = self.kind(id) {
                stack.push(*right);
                stack.push(*left);
            }
        }

        order
    }
}
