use std::collections::HashMap;

use log::debug;
use panoptes::{
    block::Block,
    function::Function,
    instruction::Instruction,
    module::Module,
    value::{IrValue, Value as _},
};

use super::{IndexError, IrIndex, Location};
use crate::{
    index::names::NameTable,
    source::{LineKind, SourceText},
};

/// Walks the listing line by line, keeping the module's traversal state in
/// lock-step: the current function, its blocks, and the next instruction the
/// current block expects.
pub(super) struct Scanner<'module> {
    module: &'module Module,
    names: NameTable,
    entries: HashMap<IrValue<'module>, Location>,
    function: Option<Function<'module>>,
    blocks: Vec<Block<'module>>,
    pending: Option<Instruction<'module>>,
}

impl<'module> Scanner<'module> {
    pub(super) fn new(module: &'module Module) -> Self {
        Self {
            module,
            names: NameTable::new(),
            entries: HashMap::new(),
            function: None,
            blocks: Vec::new(),
            pending: None,
        }
    }

    pub(super) fn scan(mut self, source: &SourceText) -> Result<IrIndex<'module>, IndexError> {
        for (line, text) in source.numbered_lines() {
            let kind = SourceText::classify(text);

            if kind == LineKind::Skip {
                continue;
            }

            // While a block still expects instructions, every remaining line
            // belongs to it; labels and defines only matter between blocks.
            if let Some(instruction) = self.pending {
                self.record_instruction(line, instruction);
                continue;
            }

            match kind {
                LineKind::Define { function } => self.enter_function(line, function)?,
                LineKind::Label { block } => self.enter_block(line, block)?,
                LineKind::Skip | LineKind::Other => {}
            }
        }

        debug!("indexed {} values", self.entries.len());

        Ok(IrIndex {
            names: self.names,
            entries: self.entries,
        })
    }

    fn record_instruction(&mut self, line: usize, instruction: Instruction<'module>) {
        let name = self.names.intern(&instruction.name());

        self.entries
            .insert(IrValue::Instruction(instruction), Location { line, name });
        self.pending = instruction.next();
    }

    fn enter_function(&mut self, line: usize, name: &str) -> Result<(), IndexError> {
        let function =
            self.module
                .get_function(name)
                .ok_or_else(|| IndexError::UnknownFunction {
                    name: name.to_string(),
                    line,
                })?;

        debug!("indexing function \"@{name}\" from line {line}");

        let symbol = self.names.intern(name);

        self.entries
            .insert(IrValue::Function(function), Location { line, name: symbol });
        self.blocks = function.blocks().collect();
        self.function = Some(function);
        self.pending = None;

        Ok(())
    }

    fn enter_block(&mut self, line: usize, name: &str) -> Result<(), IndexError> {
        let Some(function) = self.function else {
            return Err(IndexError::LabelOutsideFunction {
                name: name.to_string(),
                line,
            });
        };

        let block = self
            .blocks
            .iter()
            .copied()
            .find(|block| block.name() == name)
            .ok_or_else(|| IndexError::UnknownBlock {
                name: name.to_string(),
                function: function.name(),
                line,
            })?;

        let symbol = self.names.intern(name);

        self.entries
            .insert(IrValue::Block(block), Location { line, name: symbol });
        self.pending = block.first_instruction();

        Ok(())
    }
}
