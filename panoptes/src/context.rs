use std::{
    cell::RefCell,
    ffi::{CStr, c_void},
    fmt::Display,
};

use llvm_sys::{
    LLVMDiagnosticSeverity,
    core::{
        LLVMContextCreate, LLVMContextDispose, LLVMContextSetDiagnosticHandler,
        LLVMDisposeMessage, LLVMGetDiagInfoDescription, LLVMGetDiagInfoSeverity,
    },
    prelude::{LLVMContextRef, LLVMDiagnosticInfoRef},
};

thread_local! {
    pub(crate) static LLVM_CONTEXT: Context = Context::new();

    static DIAGNOSTICS: RefCell<Vec<Diagnostic>> = const { RefCell::new(Vec::new()) };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
    Remark,
    Note,
}

impl From<LLVMDiagnosticSeverity> for Severity {
    fn from(value: LLVMDiagnosticSeverity) -> Self {
        match value {
            LLVMDiagnosticSeverity::LLVMDSError => Self::Error,
            LLVMDiagnosticSeverity::LLVMDSWarning => Self::Warning,
            LLVMDiagnosticSeverity::LLVMDSRemark => Self::Remark,
            LLVMDiagnosticSeverity::LLVMDSNote => Self::Note,
        }
    }
}

impl Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::Error => "ERROR",
                Self::Warning => "WARNING",
                Self::Remark => "REMARK",
                Self::Note => "NOTE",
            }
        )
    }
}

/// A message LLVM reported through the context's diagnostic handler.
#[derive(Debug)]
pub struct Diagnostic {
    severity: Severity,
    message: String,
}

impl Diagnostic {
    #[must_use]
    pub const fn severity(&self) -> Severity {
        self.severity
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.severity, self.message)
    }
}

/// Drains the diagnostics LLVM buffered on the current thread since the last
/// call.
pub(crate) fn take_diagnostics() -> Vec<Diagnostic> {
    DIAGNOSTICS.with(|diagnostics| diagnostics.borrow_mut().drain(..).collect())
}

extern "C" fn handle_diagnostic(diagnostic_info: LLVMDiagnosticInfoRef, _context: *mut c_void) {
    // SAFETY: LLVM will always call this with a valid pointer
    let message = unsafe { LLVMGetDiagInfoDescription(diagnostic_info) };
    // SAFETY: LLVM will always call this with a valid pointer
    let severity = unsafe { LLVMGetDiagInfoSeverity(diagnostic_info) };

    let diagnostic = Diagnostic {
        severity: severity.into(),
        // SAFETY: We just received the pointer from a function that returns a C-string
        message: unsafe { CStr::from_ptr(message) }.to_string_lossy().into_owned(),
    };

    // SAFETY: We just received the message, copied the contents and keep no references
    unsafe { LLVMDisposeMessage(message) };

    DIAGNOSTICS.with(|diagnostics| diagnostics.borrow_mut().push(diagnostic));
}

pub(crate) struct Context(LLVMContextRef);

impl Context {
    fn new() -> Self {
        // SAFETY: There are no documented global state requirements for this function, nor ways to
        // fail
        let context = unsafe { LLVMContextCreate() };

        // SAFETY: The handler is a static function, and the DiagnosticContext is allowed to be
        // null
        unsafe {
            LLVMContextSetDiagnosticHandler(context, Some(handle_diagnostic), std::ptr::null_mut());
        };

        Self(context)
    }

    pub(crate) const fn as_llvm_ref(&self) -> LLVMContextRef {
        self.0
    }
}

impl Drop for Context {
    fn drop(&mut self) {
        // SAFETY: We own the context, and everyone using it should keep a reference to context,
        // therefore if we dispose, nobody is using it anymore
        unsafe {
            LLVMContextDispose(self.0);
        }
    }
}
