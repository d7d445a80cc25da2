use string_interner::{DefaultStringInterner, symbol::SymbolU32};

/// An interned value name. Resolve it through the index that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NameSymbol(SymbolU32);

/// The index's name table. Block labels repeat across functions and unnamed
/// values all share the empty name, so the entries intern their names instead
/// of owning copies.
#[derive(Debug)]
pub(super) struct NameTable {
    interner: DefaultStringInterner,
}

impl NameTable {
    pub(super) fn new() -> Self {
        Self {
            interner: DefaultStringInterner::new(),
        }
    }

    pub(super) fn intern(&mut self, name: &str) -> NameSymbol {
        NameSymbol(self.interner.get_or_intern(name))
    }

    pub(super) fn resolve(&self, name: NameSymbol) -> &str {
        self.interner
            .resolve(name.0)
            .expect("the symbol was interned by this table")
    }
}
