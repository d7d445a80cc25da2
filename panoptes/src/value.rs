use std::marker::PhantomData;

use llvm_sys::{
    core::{
        LLVMGetFirstUse, LLVMGetNextUse, LLVMGetUser, LLVMGetValueName2, LLVMIsAFunction,
        LLVMIsAInstruction, LLVMValueAsBasicBlock, LLVMValueIsBasicBlock,
    },
    prelude::{LLVMUseRef, LLVMValueRef},
};

use crate::{block::Block, function::Function, instruction::Instruction, module::Module};

pub trait Value: Copy {
    fn as_llvm_ref(&self) -> LLVMValueRef;

    /// The value's assigned IR name; empty for unnamed values. Repeated calls
    /// on an unchanged value return the same text.
    #[must_use]
    fn name(&self) -> String {
        value_name(self.as_llvm_ref())
    }
}

pub(crate) fn value_name(reference: LLVMValueRef) -> String {
    let mut length = 0usize;

    // SAFETY: wrappers only hold valid value references, and `length` is written before the data
    // pointer is read
    let data = unsafe { LLVMGetValueName2(reference, &raw mut length) };

    if data.is_null() || length == 0 {
        return String::new();
    }

    // SAFETY: LLVM reports `length` bytes of name data behind `data`
    let bytes = unsafe { std::slice::from_raw_parts(data.cast::<u8>(), length) };

    String::from_utf8_lossy(bytes).into_owned()
}

/// An untyped handle to an arbitrary value, as produced by operand and use
/// traversal.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AnyValue<'module> {
    reference: LLVMValueRef,
    _module: PhantomData<&'module Module>,
}

impl<'module> AnyValue<'module> {
    pub(crate) unsafe fn new(reference: LLVMValueRef) -> Self {
        // SAFETY: The caller must have provided a valid value reference
        assert!(!reference.is_null());

        Self {
            reference,
            _module: PhantomData,
        }
    }

    /// Views the value as a function, block or instruction, if it is one.
    #[must_use]
    pub fn classify(&self) -> Option<IrValue<'module>> {
        // SAFETY: the handle is valid for the lifetime of its module
        if !unsafe { LLVMIsAInstruction(self.reference) }.is_null() {
            // SAFETY: the kind was just checked
            return Some(IrValue::Instruction(unsafe {
                Instruction::new(self.reference)
            }));
        }

        // SAFETY: the handle is valid for the lifetime of its module
        if unsafe { LLVMValueIsBasicBlock(self.reference) } != 0 {
            // SAFETY: the kind was just checked, so the block conversion is allowed
            let block = unsafe { Block::new(LLVMValueAsBasicBlock(self.reference)) };

            return Some(IrValue::Block(block));
        }

        // SAFETY: the handle is valid for the lifetime of its module
        if !unsafe { LLVMIsAFunction(self.reference) }.is_null() {
            // SAFETY: the kind was just checked
            return Some(IrValue::Function(unsafe { Function::new(self.reference) }));
        }

        None
    }

    #[must_use]
    pub fn uses(&self) -> Uses<'module> {
        Uses::of(self.reference)
    }
}

impl Value for AnyValue<'_> {
    fn as_llvm_ref(&self) -> LLVMValueRef {
        self.reference
    }
}

/// A value the inspector indexes: a function, a basic block or an
/// instruction. Handles compare and hash by identity, which is stable because
/// LLVM uniques the underlying objects per module.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IrValue<'module> {
    Function(Function<'module>),
    Block(Block<'module>),
    Instruction(Instruction<'module>),
}

impl<'module> IrValue<'module> {
    #[must_use]
    pub fn uses(&self) -> Uses<'module> {
        Uses::of(self.as_llvm_ref())
    }
}

impl Value for IrValue<'_> {
    fn as_llvm_ref(&self) -> LLVMValueRef {
        match self {
            Self::Function(function) => function.as_llvm_ref(),
            Self::Block(block) => block.as_llvm_ref(),
            Self::Instruction(instruction) => instruction.as_llvm_ref(),
        }
    }
}

impl<'module> From<Function<'module>> for IrValue<'module> {
    fn from(value: Function<'module>) -> Self {
        Self::Function(value)
    }
}

impl<'module> From<Block<'module>> for IrValue<'module> {
    fn from(value: Block<'module>) -> Self {
        Self::Block(value)
    }
}

impl<'module> From<Instruction<'module>> for IrValue<'module> {
    fn from(value: Instruction<'module>) -> Self {
        Self::Instruction(value)
    }
}

/// Iterator over a value's users, in LLVM's use-list order.
pub struct Uses<'module> {
    next: LLVMUseRef,
    _module: PhantomData<&'module Module>,
}

impl Uses<'_> {
    pub(crate) fn of(value: LLVMValueRef) -> Self {
        Self {
            // SAFETY: callers pass references owned by a live module
            next: unsafe { LLVMGetFirstUse(value) },
            _module: PhantomData,
        }
    }
}

impl<'module> Iterator for Uses<'module> {
    type Item = AnyValue<'module>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next.is_null() {
            return None;
        }

        let current = self.next;
        // SAFETY: `current` is a live edge of the value's use list
        self.next = unsafe { LLVMGetNextUse(current) };

        // SAFETY: every use edge has a user value
        let user = unsafe { LLVMGetUser(current) };

        // SAFETY: the user is a valid value owned by the same module
        Some(unsafe { AnyValue::new(user) })
    }
}
