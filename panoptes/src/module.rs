use std::{
    error::Error,
    ffi::{CStr, CString},
    fmt::Display,
    marker::PhantomData,
    str::FromStr as _,
};

use llvm_sys::{
    bit_reader::LLVMParseBitcodeInContext2,
    core::{
        LLVMDisposeMessage, LLVMDisposeModule, LLVMGetFirstFunction, LLVMGetNamedFunction,
        LLVMGetNextFunction, LLVMPrintModuleToString,
    },
    ir_reader::LLVMParseIRInContext,
    prelude::{LLVMModuleRef, LLVMValueRef},
};

use crate::{
    buffer::MemoryBuffer,
    context::{Diagnostic, LLVM_CONTEXT, take_diagnostics},
    function::Function,
};

#[derive(Debug)]
pub struct ModuleLoadError {
    source_name: String,
    message: String,
    diagnostics: Vec<Diagnostic>,
}

impl ModuleLoadError {
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }
}

impl Display for ModuleLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "failed to load module \"{}\": {}",
            self.source_name, self.message
        )?;

        for diagnostic in &self.diagnostics {
            write!(f, "\n{diagnostic}")?;
        }

        Ok(())
    }
}

impl Error for ModuleLoadError {}

/// An owned LLVM module, read from textual IR or bitcode. All value handles
/// derived from it borrow it, so they cannot outlive the module.
#[derive(Debug)]
pub struct Module {
    reference: LLVMModuleRef,
}

impl Module {
    /// Parses textual IR. `name` identifies the source in error messages.
    ///
    /// # Errors
    /// Returns an error carrying LLVM's parse message, plus any diagnostics
    /// the context buffered while reading.
    ///
    /// # Panics
    /// If `name` contains an interior nul byte.
    pub fn parse_ir(name: &str, text: &str) -> Result<Self, ModuleLoadError> {
        let buffer = MemoryBuffer::copy_from_slice(name, text.as_bytes());

        let mut module = std::ptr::null_mut();
        let mut message = std::ptr::null_mut();

        let failed = LLVM_CONTEXT.with(|context| {
            // SAFETY: The context is valid for this thread, the reader consumes the buffer (hence
            // `into_llvm_ref`), and both out-params are written before use
            unsafe {
                LLVMParseIRInContext(
                    context.as_llvm_ref(),
                    buffer.into_llvm_ref(),
                    &raw mut module,
                    &raw mut message,
                )
            }
        }) != 0;

        if failed {
            // SAFETY: the reader reported failure, so it allocated a message for us
            let reason = unsafe { CStr::from_ptr(message) }.to_string_lossy().into_owned();
            // SAFETY: the message contents were copied above, we can release LLVM's allocation
            unsafe { LLVMDisposeMessage(message) };

            return Err(ModuleLoadError {
                source_name: name.to_string(),
                message: reason,
                diagnostics: take_diagnostics(),
            });
        }

        Ok(Self { reference: module })
    }

    /// Parses bitcode bytes. `name` identifies the source in error messages.
    ///
    /// # Errors
    /// Returns an error if the bytes are not well-formed bitcode; the details
    /// arrive through the context's diagnostic handler.
    ///
    /// # Panics
    /// If `name` contains an interior nul byte.
    pub fn parse_bitcode(name: &str, bytes: &[u8]) -> Result<Self, ModuleLoadError> {
        let buffer = MemoryBuffer::copy_from_slice(name, bytes);

        let mut module = std::ptr::null_mut();

        let failed = LLVM_CONTEXT.with(|context| {
            // SAFETY: The context is valid for this thread, the reader consumes the buffer, and
            // the out-param is written before use
            unsafe {
                LLVMParseBitcodeInContext2(
                    context.as_llvm_ref(),
                    buffer.into_llvm_ref(),
                    &raw mut module,
                )
            }
        }) != 0;

        if failed {
            return Err(ModuleLoadError {
                source_name: name.to_string(),
                message: "malformed bitcode".to_string(),
                diagnostics: take_diagnostics(),
            });
        }

        Ok(Self { reference: module })
    }

    /// Looks a function up by its IR name.
    ///
    /// # Panics
    /// If `name` contains an interior nul byte.
    #[must_use]
    pub fn get_function(&self, name: &str) -> Option<Function<'_>> {
        let name = CString::from_str(name).unwrap();

        // SAFETY: the module reference is valid while `self` exists, and the name is a valid
        // C-string
        let function = unsafe { LLVMGetNamedFunction(self.reference, name.as_ptr()) };

        if function.is_null() {
            return None;
        }

        // SAFETY: a non-null result of LLVMGetNamedFunction is a function in this module
        Some(unsafe { Function::new(function) })
    }

    /// Iterates the module's functions in module order.
    #[must_use]
    pub fn functions(&self) -> Functions<'_> {
        Functions {
            // SAFETY: the module reference is valid while `self` exists
            next: unsafe { LLVMGetFirstFunction(self.reference) },
            _module: PhantomData,
        }
    }

    /// Renders the module as its canonical textual IR.
    #[must_use]
    pub fn print_to_string(&self) -> String {
        // SAFETY: the module reference is valid while `self` exists
        let message = unsafe { LLVMPrintModuleToString(self.reference) };
        // SAFETY: LLVMPrintModuleToString returns a fresh nul-terminated allocation
        let text = unsafe { CStr::from_ptr(message) }.to_string_lossy().into_owned();
        // SAFETY: the text was copied above, we can release LLVM's allocation
        unsafe { LLVMDisposeMessage(message) };

        text
    }
}

impl Drop for Module {
    fn drop(&mut self) {
        // SAFETY: We own the module, and every handle into it borrows `self`, so nobody can use
        // those handles after the dispose
        unsafe { LLVMDisposeModule(self.reference) };
    }
}

pub struct Functions<'module> {
    next: LLVMValueRef,
    _module: PhantomData<&'module Module>,
}

impl<'module> Iterator for Functions<'module> {
    type Item = Function<'module>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next.is_null() {
            return None;
        }

        let current = self.next;
        // SAFETY: `current` is a live entry of the module's function list
        self.next = unsafe { LLVMGetNextFunction(current) };

        // SAFETY: entries of the module's function list are functions
        Some(unsafe { Function::new(current) })
    }
}
