mod errors;
mod names;
mod queries;
mod scan;

pub use errors::{IndexError, QueryError};
pub use names::NameSymbol;

use std::{collections::HashMap, fmt::Display};

use panoptes::{module::Module, value::IrValue};

use crate::source::SourceText;

use names::NameTable;
use scan::Scanner;

/// Where a value was introduced in the listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    line: usize,
    name: NameSymbol,
}

impl Location {
    #[must_use]
    pub const fn line(&self) -> usize {
        self.line
    }

    #[must_use]
    pub const fn name(&self) -> NameSymbol {
        self.name
    }
}

/// A [`Location`] with its name resolved, ready for printing as
/// `"<line>, <name>"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceSite<'index> {
    line: usize,
    name: &'index str,
}

impl SourceSite<'_> {
    #[must_use]
    pub const fn line(&self) -> usize {
        self.line
    }

    #[must_use]
    pub const fn name(&self) -> &str {
        self.name
    }
}

impl Display for SourceSite<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self.name.len() {
            0 => "<nameless instruction>",
            _ => self.name,
        };

        write!(f, "{}, {}", self.line, name)
    }
}

/// Maps every function, block and instruction of a module to the line of the
/// listing that introduces it.
#[derive(Debug)]
pub struct IrIndex<'module> {
    names: NameTable,
    entries: HashMap<IrValue<'module>, Location>,
}

impl<'module> IrIndex<'module> {
    /// Scans `source` against `module` and builds the map. The listing must
    /// be the one the module was parsed from (or its canonical printed form),
    /// otherwise the scan fails to line up.
    ///
    /// # Errors
    /// Returns an [`IndexError`] when a `define` or label line names
    /// something the module does not have.
    pub fn build(module: &'module Module, source: &SourceText) -> Result<Self, IndexError> {
        Scanner::new(module).scan(source)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn location(&self, value: IrValue<'module>) -> Option<Location> {
        self.entries.get(&value).copied()
    }

    /// Resolves a symbol handed out by this index.
    ///
    /// # Panics
    /// If the symbol came from a different index.
    #[must_use]
    pub fn resolve(&self, name: NameSymbol) -> &str {
        self.names.resolve(name)
    }

    #[must_use]
    pub fn site(&self, location: Location) -> SourceSite<'_> {
        SourceSite {
            line: location.line,
            name: self.names.resolve(location.name),
        }
    }

    #[must_use]
    pub fn describe(&self, value: IrValue<'module>) -> Option<SourceSite<'_>> {
        self.location(value).map(|location| self.site(location))
    }
}
