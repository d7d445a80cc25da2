use std::marker::PhantomData;

use llvm_sys::{
    core::{
        LLVMCountIncoming, LLVMGetFirstInstruction, LLVMGetIncomingBlock, LLVMGetIncomingValue,
        LLVMGetNextInstruction, LLVMGetNumOperands, LLVMGetOperand, LLVMIsAInstruction,
        LLVMIsAPHINode,
    },
    prelude::{LLVMBasicBlockRef, LLVMValueRef},
};

use crate::{
    block::Block,
    module::Module,
    value::{AnyValue, Uses, Value},
};

/// A handle to a single instruction.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Instruction<'module> {
    reference: LLVMValueRef,
    _module: PhantomData<&'module Module>,
}

impl<'module> Instruction<'module> {
    pub(crate) unsafe fn new(reference: LLVMValueRef) -> Self {
        // SAFETY: The caller must have provided a valid value reference
        assert!(!unsafe { LLVMIsAInstruction(reference) }.is_null());

        Self {
            reference,
            _module: PhantomData,
        }
    }

    /// The next instruction of the surrounding block, `None` past the
    /// terminator.
    #[must_use]
    pub fn next(&self) -> Option<Self> {
        // SAFETY: the handle is valid for the lifetime of its module
        let instruction = unsafe { LLVMGetNextInstruction(self.reference) };

        if instruction.is_null() {
            return None;
        }

        // SAFETY: a non-null sibling is a valid instruction of the same block
        Some(unsafe { Self::new(instruction) })
    }

    /// Iterates the instruction's operands. For a phi this covers the
    /// incoming values only; the incoming blocks live in [`Phi::incoming`].
    #[must_use]
    pub fn operands(&self) -> Operands<'module> {
        // SAFETY: the handle is valid for the lifetime of its module
        let count = usize::try_from(unsafe { LLVMGetNumOperands(self.reference) })
            .unwrap_or_default();

        Operands {
            instruction: self.reference,
            index: 0,
            count,
            _module: PhantomData,
        }
    }

    /// Views the instruction as a phi node, if it is one.
    #[must_use]
    pub fn as_phi(&self) -> Option<Phi<'module>> {
        // SAFETY: the handle is valid for the lifetime of its module
        if unsafe { LLVMIsAPHINode(self.reference) }.is_null() {
            return None;
        }

        // SAFETY: the kind was just checked
        Some(unsafe { Phi::new(self.reference) })
    }

    #[must_use]
    pub fn uses(&self) -> Uses<'module> {
        Uses::of(self.reference)
    }
}

impl Value for Instruction<'_> {
    fn as_llvm_ref(&self) -> LLVMValueRef {
        self.reference
    }
}

/// A phi node, with access to its incoming `(value, block)` pairs.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Phi<'module> {
    reference: LLVMValueRef,
    _module: PhantomData<&'module Module>,
}

impl<'module> Phi<'module> {
    pub(crate) unsafe fn new(reference: LLVMValueRef) -> Self {
        // SAFETY: The caller must have provided a valid value reference
        assert!(!unsafe { LLVMIsAPHINode(reference) }.is_null());

        Self {
            reference,
            _module: PhantomData,
        }
    }

    /// Iterates the incoming `(value, block)` pairs in declaration order.
    #[must_use]
    pub fn incoming(&self) -> Incoming<'module> {
        // SAFETY: the handle is valid for the lifetime of its module
        let count = unsafe { LLVMCountIncoming(self.reference) };

        Incoming {
            phi: self.reference,
            index: 0,
            count,
            _module: PhantomData,
        }
    }
}

impl Value for Phi<'_> {
    fn as_llvm_ref(&self) -> LLVMValueRef {
        self.reference
    }
}

pub struct Operands<'module> {
    instruction: LLVMValueRef,
    index: usize,
    count: usize,
    _module: PhantomData<&'module Module>,
}

impl<'module> Iterator for Operands<'module> {
    type Item = AnyValue<'module>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.count {
            return None;
        }

        let index = u32::try_from(self.index).ok()?;
        self.index += 1;

        // SAFETY: `index` is below the operand count reported by LLVM
        let operand = unsafe { LLVMGetOperand(self.instruction, index) };

        // SAFETY: operands of a live instruction are valid values
        Some(unsafe { AnyValue::new(operand) })
    }
}

pub struct Incoming<'module> {
    phi: LLVMValueRef,
    index: u32,
    count: u32,
    _module: PhantomData<&'module Module>,
}

impl<'module> Iterator for Incoming<'module> {
    type Item = (AnyValue<'module>, Block<'module>);

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.count {
            return None;
        }

        let index = self.index;
        self.index += 1;

        // SAFETY: `index` is below the incoming count reported by LLVM
        let value = unsafe { LLVMGetIncomingValue(self.phi, index) };
        // SAFETY: `index` is below the incoming count reported by LLVM
        let block: LLVMBasicBlockRef = unsafe { LLVMGetIncomingBlock(self.phi, index) };

        // SAFETY: incoming entries of a live phi are valid values and blocks
        Some(unsafe { (AnyValue::new(value), Block::new(block)) })
    }
}

/// Iterator over a block's instructions.
pub struct Instructions<'module> {
    next: LLVMValueRef,
    _module: PhantomData<&'module Module>,
}

impl Instructions<'_> {
    pub(crate) fn of(block: LLVMBasicBlockRef) -> Self {
        Self {
            // SAFETY: callers pass block references owned by a live module
            next: unsafe { LLVMGetFirstInstruction(block) },
            _module: PhantomData,
        }
    }
}

impl<'module> Iterator for Instructions<'module> {
    type Item = Instruction<'module>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next.is_null() {
            return None;
        }

        let current = self.next;
        // SAFETY: `current` is a live entry of the block's instruction list
        self.next = unsafe { LLVMGetNextInstruction(current) };

        // SAFETY: entries of the block's instruction list are instructions
        Some(unsafe { Instruction::new(current) })
    }
}
