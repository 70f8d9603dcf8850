//! Node descriptors crossing the traversal boundary.
//!
//! The syntax tree itself is owned by the host traversal driver; checks only
//! ever see these lightweight descriptors plus a [`NodeId`] they can hand
//! back to the host when they need more context.

use crate::source::SourceLocation;

/// Non-owning handle to a node in the host-owned syntax tree. Only valid for
/// the lifetime of the traversal that produced it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeclKind {
    Function,
    Method,
    Constructor,
    Destructor,
    Record,
    Field,
    Variable,
    Other,
}

/// Declaration descriptor passed into the declaration visit callback.
#[derive(Clone, Debug)]
pub struct Decl {
    pub id: NodeId,
    pub loc: SourceLocation,
    pub kind: DeclKind,
    pub name: Option<String>,
}

impl Decl {
    pub fn new(id: NodeId, loc: SourceLocation, kind: DeclKind) -> Self {
        Self {
            id,
            loc,
            kind,
            name: None,
        }
    }

    pub fn named(id: NodeId, loc: SourceLocation, kind: DeclKind, name: impl Into<String>) -> Self {
        Self {
            id,
            loc,
            kind,
            name: Some(name.into()),
        }
    }

    /// Constructors and destructors count as methods for the purpose of the
    /// "last method declaration" cursor.
    pub fn is_method(&self) -> bool {
        matches!(
            self.kind,
            DeclKind::Method | DeclKind::Constructor | DeclKind::Destructor
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StmtKind {
    Expr,
    Call,
    Return,
    Compound,
    If,
    Loop,
    Other,
}

/// Statement descriptor passed into the statement visit callback.
#[derive(Clone, Debug)]
pub struct Stmt {
    pub id: NodeId,
    pub loc: SourceLocation,
    pub kind: StmtKind,
}

impl Stmt {
    pub fn new(id: NodeId, loc: SourceLocation, kind: StmtKind) -> Self {
        Self { id, loc, kind }
    }
}
