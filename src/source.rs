use std::fmt;

/// Opaque raw-encoded source position handed across the traversal boundary.
///
/// The raw encoding is only meaningful to the host compiler; everything this
/// crate needs to know about a position is answered by a [`SourceResolver`].
/// Raw value `0` is reserved for the invalid position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SourceLocation(u32);

impl SourceLocation {
    pub const INVALID: SourceLocation = SourceLocation(0);

    pub fn from_raw_encoding(raw: u32) -> Self {
        Self(raw)
    }

    pub fn raw_encoding(self) -> u32 {
        self.0
    }

    pub fn is_valid(self) -> bool {
        self.0 != 0
    }
}

/// Macro-expansion-resolved identity of a source position.
///
/// Two raw positions denote the same textual site iff their presumed
/// locations compare equal; `Eq`/`Hash` here *are* the deduplication
/// contract and must stay exact.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PresumedLoc {
    pub filename: String,
    pub line: u32,
    pub column: u32,
}

impl PresumedLoc {
    pub fn new(filename: impl Into<String>, line: u32, column: u32) -> Self {
        Self {
            filename: filename.into(),
            line,
            column,
        }
    }
}

impl fmt::Display for PresumedLoc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.filename, self.line, self.column)
    }
}

/// Source-position facility provided by the host compiler.
pub trait SourceResolver {
    /// Whether the position resolves inside a library/platform-provided
    /// header, which is exempt from analysis.
    fn is_in_system_header(&self, loc: SourceLocation) -> bool;

    /// Raw filename for the position, empty when unknown.
    fn filename(&self, loc: SourceLocation) -> String;

    /// Whether the position originates from a macro expansion.
    fn is_macro_expansion(&self, loc: SourceLocation) -> bool;

    /// Fully resolved (file, line, column) form, `None` for an invalid
    /// position.
    fn presumed_location(&self, loc: SourceLocation) -> Option<PresumedLoc>;
}
