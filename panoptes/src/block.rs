use std::marker::PhantomData;

use llvm_sys::{
    core::{LLVMBasicBlockAsValue, LLVMGetFirstInstruction, LLVMGetNextBasicBlock},
    prelude::{LLVMBasicBlockRef, LLVMValueRef},
};

use crate::{
    instruction::{Instruction, Instructions},
    module::Module,
    value::{Uses, Value},
};

/// A handle to a basic block. Blocks are values themselves, so they can be
/// named, used (by branches) and indexed like instructions.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Block<'module> {
    reference: LLVMBasicBlockRef,
    _module: PhantomData<&'module Module>,
}

impl<'module> Block<'module> {
    pub(crate) unsafe fn new(reference: LLVMBasicBlockRef) -> Self {
        // SAFETY: The caller must have provided a valid block reference
        assert!(!reference.is_null());

        Self {
            reference,
            _module: PhantomData,
        }
    }

    #[must_use]
    pub fn first_instruction(&self) -> Option<Instruction<'module>> {
        // SAFETY: the handle is valid for the lifetime of its module
        let instruction = unsafe { LLVMGetFirstInstruction(self.reference) };

        if instruction.is_null() {
            return None;
        }

        // SAFETY: a non-null result of LLVMGetFirstInstruction is an instruction of this block
        Some(unsafe { Instruction::new(instruction) })
    }

    /// Iterates the block's instructions in order, terminator included.
    #[must_use]
    pub fn instructions(&self) -> Instructions<'module> {
        Instructions::of(self.reference)
    }

    /// The next block of the surrounding function, in layout order.
    #[must_use]
    pub fn next(&self) -> Option<Self> {
        // SAFETY: the handle is valid for the lifetime of its module
        let block = unsafe { LLVMGetNextBasicBlock(self.reference) };

        if block.is_null() {
            return None;
        }

        // SAFETY: a non-null sibling is a valid block of the same function
        Some(unsafe { Self::new(block) })
    }

    #[must_use]
    pub fn uses(&self) -> Uses<'module> {
        Uses::of(self.as_llvm_ref())
    }
}

impl Value for Block<'_> {
    fn as_llvm_ref(&self) -> LLVMValueRef {
        // SAFETY: the handle is valid for the lifetime of its module, and every block is also a
        // value
        unsafe { LLVMBasicBlockAsValue(self.reference) }
    }
}
