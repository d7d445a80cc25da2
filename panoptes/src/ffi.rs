//! C-linkage exports, callable from any host with C foreign-function
//! support.

use std::os::raw::c_char;

use llvm_sys::{core::LLVMGetValueName2, prelude::LLVMValueRef};

/// Returns the nul-terminated name of `value` as a pointer into the value's
/// own name storage. An unnamed value yields an empty string. The text does
/// not outlive the value, and the caller must not free it.
///
/// # Safety
/// `value` must be a valid, non-null handle to a live LLVM value. Null or
/// dangling handles are out of contract.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn get_name(value: LLVMValueRef) -> *const c_char {
    let mut length = 0usize;

    // SAFETY: the caller guarantees `value` is live and non-null
    unsafe { LLVMGetValueName2(value, &raw mut length) }
}
