use std::{ffi::CString, str::FromStr as _};

use llvm_sys::{
    core::{LLVMCreateMemoryBufferWithMemoryRangeCopy, LLVMDisposeMemoryBuffer},
    prelude::LLVMMemoryBufferRef,
};

/// An owned LLVM memory buffer, used to feed bytes into the IR and bitcode
/// readers.
pub(crate) struct MemoryBuffer {
    reference: LLVMMemoryBufferRef,
}

impl MemoryBuffer {
    /// # Panics
    /// If `name` contains an interior nul byte.
    pub(crate) fn copy_from_slice(name: &str, contents: &[u8]) -> Self {
        let name = CString::from_str(name).unwrap();

        // SAFETY: `contents` is alive for the duration of the call, and the buffer copies the
        // bytes, so nothing stays borrowed afterwards
        let reference = unsafe {
            LLVMCreateMemoryBufferWithMemoryRangeCopy(
                contents.as_ptr().cast(),
                contents.len(),
                name.as_ptr(),
            )
        };

        Self { reference }
    }

    /// Hands the buffer over to an LLVM API that consumes it. The returned
    /// reference must be passed on, it is no longer disposed by this object.
    pub(crate) fn into_llvm_ref(mut self) -> LLVMMemoryBufferRef {
        let reference = self.reference;
        self.reference = std::ptr::null_mut();

        reference
    }
}

impl Drop for MemoryBuffer {
    fn drop(&mut self) {
        if self.reference.is_null() {
            return;
        }

        // SAFETY: if `reference` is not null, the buffer was never consumed and we still own it
        unsafe { LLVMDisposeMemoryBuffer(self.reference) };
    }
}
