use std::marker::PhantomData;

use llvm_sys::{
    core::{LLVMGetFirstBasicBlock, LLVMGetNextBasicBlock, LLVMIsAFunction},
    prelude::{LLVMBasicBlockRef, LLVMValueRef},
};

use crate::{
    block::Block,
    module::Module,
    value::{Uses, Value},
};

/// A handle to a function defined or declared in a module.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Function<'module> {
    reference: LLVMValueRef,
    _module: PhantomData<&'module Module>,
}

impl<'module> Function<'module> {
    pub(crate) unsafe fn new(reference: LLVMValueRef) -> Self {
        // SAFETY: The caller must have provided a valid value reference
        assert!(!unsafe { LLVMIsAFunction(reference) }.is_null());

        Self {
            reference,
            _module: PhantomData,
        }
    }

    #[must_use]
    pub fn first_block(&self) -> Option<Block<'module>> {
        // SAFETY: the handle is valid for the lifetime of its module
        let block = unsafe { LLVMGetFirstBasicBlock(self.reference) };

        if block.is_null() {
            return None;
        }

        // SAFETY: a non-null result of LLVMGetFirstBasicBlock is a block of this function
        Some(unsafe { Block::new(block) })
    }

    /// Iterates the function's basic blocks in layout order. A declaration
    /// without a body yields nothing.
    #[must_use]
    pub fn blocks(&self) -> Blocks<'module> {
        Blocks {
            // SAFETY: the handle is valid for the lifetime of its module
            next: unsafe { LLVMGetFirstBasicBlock(self.reference) },
            _module: PhantomData,
        }
    }

    #[must_use]
    pub fn uses(&self) -> Uses<'module> {
        Uses::of(self.reference)
    }
}

impl Value for Function<'_> {
    fn as_llvm_ref(&self) -> LLVMValueRef {
        self.reference
    }
}

pub struct Blocks<'module> {
    next: LLVMBasicBlockRef,
    _module: PhantomData<&'module Module>,
}

impl<'module> Iterator for Blocks<'module> {
    type Item = Block<'module>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next.is_null() {
            return None;
        }

        let current = self.next;
        // SAFETY: `current` is a live entry of the function's block list
        self.next = unsafe { LLVMGetNextBasicBlock(current) };

        // SAFETY: entries of the function's block list are valid blocks
        Some(unsafe { Block::new(current) })
    }
}
