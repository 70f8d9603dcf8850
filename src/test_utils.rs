//! Test utilities for colocated controller tests.
//!
//! `TestSourceMap` is a scriptable stand-in for the host compiler's
//! source-position facility: tests register files and positions up front,
//! then hand the map to a check behind `Rc<dyn SourceResolver>`. Two macro
//! positions registered at the same (file, line, column) get distinct raw
//! encodings but equal presumed locations, which is exactly the shape of
//! the duplicate-warning problem under macro expansion.

use std::cell::RefCell;
use std::rc::Rc;

use crate::diagnostics::{CollectingSink, DiagnosticSink};
use crate::source::{PresumedLoc, SourceLocation, SourceResolver};

struct TestFile {
    name: String,
    system: bool,
}

struct TestLocation {
    file: usize,
    line: u32,
    column: u32,
    macro_expansion: bool,
}

#[derive(Default)]
pub struct TestSourceMap {
    files: Vec<TestFile>,
    locations: Vec<TestLocation>,
}

impl TestSourceMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_file(&mut self, name: &str) -> usize {
        self.push_file(name, false)
    }

    pub fn add_system_file(&mut self, name: &str) -> usize {
        self.push_file(name, true)
    }

    /// Registers a spelled (non-macro) position.
    pub fn loc(&mut self, file: usize, line: u32, column: u32) -> SourceLocation {
        self.push_location(file, line, column, false)
    }

    /// Registers a position inside a macro expansion.
    pub fn macro_loc(&mut self, file: usize, line: u32, column: u32) -> SourceLocation {
        self.push_location(file, line, column, true)
    }

    fn push_file(&mut self, name: &str, system: bool) -> usize {
        self.files.push(TestFile {
            name: name.to_string(),
            system,
        });
        self.files.len() - 1
    }

    fn push_location(
        &mut self,
        file: usize,
        line: u32,
        column: u32,
        macro_expansion: bool,
    ) -> SourceLocation {
        self.locations.push(TestLocation {
            file,
            line,
            column,
            macro_expansion,
        });
        // Raw encoding 0 is the invalid location, so indices start at 1.
        SourceLocation::from_raw_encoding(self.locations.len() as u32)
    }

    fn entry(&self, loc: SourceLocation) -> Option<&TestLocation> {
        if !loc.is_valid() {
            return None;
        }
        self.locations.get(loc.raw_encoding() as usize - 1)
    }
}

impl SourceResolver for TestSourceMap {
    fn is_in_system_header(&self, loc: SourceLocation) -> bool {
        self.entry(loc)
            .is_some_and(|entry| self.files[entry.file].system)
    }

    fn filename(&self, loc: SourceLocation) -> String {
        self.entry(loc)
            .map(|entry| self.files[entry.file].name.clone())
            .unwrap_or_default()
    }

    fn is_macro_expansion(&self, loc: SourceLocation) -> bool {
        self.entry(loc).is_some_and(|entry| entry.macro_expansion)
    }

    fn presumed_location(&self, loc: SourceLocation) -> Option<PresumedLoc> {
        self.entry(loc).map(|entry| PresumedLoc {
            filename: self.files[entry.file].name.clone(),
            line: entry.line,
            column: entry.column,
        })
    }
}

/// Returns a collecting sink twice: once concretely for assertions, once
/// type-erased for handing to checks.
pub fn collecting_sink() -> (Rc<RefCell<CollectingSink>>, Rc<RefCell<dyn DiagnosticSink>>) {
    let sink = Rc::new(RefCell::new(CollectingSink::new()));
    let erased: Rc<RefCell<dyn DiagnosticSink>> = sink.clone();
    (sink, erased)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn macro_locations_share_presumed_identity_but_not_raw_encoding() {
        let mut map = TestSourceMap::new();
        let file = map.add_file("src/foo.cpp");
        let first = map.macro_loc(file, 10, 4);
        let second = map.macro_loc(file, 10, 4);

        assert_ne!(first, second);
        assert_eq!(
            map.presumed_location(first),
            map.presumed_location(second)
        );
        assert!(map.is_macro_expansion(first));
    }

    #[test]
    fn invalid_location_resolves_to_nothing() {
        let map = TestSourceMap::new();
        assert_eq!(map.presumed_location(SourceLocation::INVALID), None);
        assert_eq!(map.filename(SourceLocation::INVALID), "");
        assert!(!map.is_in_system_header(SourceLocation::INVALID));
    }
}
