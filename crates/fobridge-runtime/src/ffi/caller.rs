//! Host function calls through fixed addresses
//!
//! Host functions are reached through a raw address and a calling-convention
//! tag from the layout table. Each convention has its own trampoline:
//!
//! - `Register`: the first four words go in `eax`, `edx`, `ebx`, `ecx`.
//!   Any further words are pushed right to left and the callee pops them.
//! - `Stack`: every word is pushed in C order and the caller pops them.
//!
//! On targets other than 32-bit x86 the register convention has no meaning,
//! so it lowers to the platform C ABI. That keeps the wrappers testable
//! against in-process stand-ins.

use crate::ffi::types::{HostArg, HostValue, HostWord};
use fobridge_config::{Convention, FunctionAddr};
use std::mem;
use thiserror::Error;

/// Number of arguments the register convention passes in registers
pub const REGISTER_SLOTS: usize = 4;

/// Largest register-convention call the trampolines dispatch
const MAX_REGISTER_ARGS: usize = REGISTER_SLOTS + 2;

/// Largest stack-convention call the trampolines dispatch
const MAX_STACK_ARGS: usize = 6;

/// Host call errors
///
/// These only describe the shape of a call. A call that reaches the host
/// either returns or has already corrupted the process.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CallError {
    #[error("Expected {expected} arguments, got {got}")]
    ArityMismatch { expected: usize, got: usize },

    #[error("Unsupported host signature: {0}")]
    UnsupportedSignature(String),

    #[error("Host function address is null")]
    NullTarget,
}

/// A callable host function
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostFunction {
    address: usize,
    convention: Convention,
    arity: usize,
}

impl HostFunction {
    /// Wrap a function from the layout table
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    /// - `spec.address` is the entry point of a host function in this process
    /// - the function really uses `spec.convention` and takes `spec.args` words
    pub unsafe fn new(spec: FunctionAddr) -> Self {
        Self {
            address: spec.address,
            convention: spec.convention,
            arity: spec.args,
        }
    }

    /// Wrap a function pointer read out of host memory
    ///
    /// # Safety
    ///
    /// Same requirements as [`HostFunction::new`].
    pub unsafe fn from_pointer(address: usize, convention: Convention, arity: usize) -> Self {
        Self {
            address,
            convention,
            arity,
        }
    }

    /// Check that this function can be dispatched by a trampoline
    pub fn check_shape(&self) -> Result<(), CallError> {
        if self.address == 0 {
            return Err(CallError::NullTarget);
        }
        let limit = match self.convention {
            Convention::Register => MAX_REGISTER_ARGS,
            Convention::Stack => MAX_STACK_ARGS,
        };
        if self.arity > limit {
            return Err(CallError::UnsupportedSignature(self.signature_key()));
        }
        Ok(())
    }

    /// Call the host function
    ///
    /// # Safety
    ///
    /// Pointer arguments must be valid for whatever the host function does
    /// with them, and the host must be in a state where the function may run.
    pub unsafe fn call(&self, args: &[HostArg]) -> Result<HostValue, CallError> {
        if args.len() != self.arity {
            return Err(CallError::ArityMismatch {
                expected: self.arity,
                got: args.len(),
            });
        }
        self.check_shape()?;

        let mut words = [0 as HostWord; MAX_STACK_ARGS];
        for (slot, arg) in words.iter_mut().zip(args) {
            *slot = arg.word();
        }
        let words = &words[..args.len()];

        log::trace!("host call {} {:x?}", self.signature_key(), words);

        let result = match self.convention {
            Convention::Register => call_register(self.address, words)?,
            Convention::Stack => call_stack(self.address, words)?,
        };
        Ok(HostValue::from_word(result))
    }

    pub fn address(&self) -> usize {
        self.address
    }

    pub fn convention(&self) -> Convention {
        self.convention
    }

    pub fn arity(&self) -> usize {
        self.arity
    }

    /// Human-readable signature, e.g. `register@0x4a2108/2`
    fn signature_key(&self) -> String {
        let convention = match self.convention {
            Convention::Register => "register",
            Convention::Stack => "stack",
        };
        format!("{}@{:#x}/{}", convention, self.address, self.arity)
    }
}

type Stack0 = unsafe extern "C" fn() -> HostWord;
type Stack1 = unsafe extern "C" fn(HostWord) -> HostWord;
type Stack2 = unsafe extern "C" fn(HostWord, HostWord) -> HostWord;
type Stack3 = unsafe extern "C" fn(HostWord, HostWord, HostWord) -> HostWord;
type Stack4 = unsafe extern "C" fn(HostWord, HostWord, HostWord, HostWord) -> HostWord;
type Stack5 = unsafe extern "C" fn(HostWord, HostWord, HostWord, HostWord, HostWord) -> HostWord;
type Stack6 =
    unsafe extern "C" fn(HostWord, HostWord, HostWord, HostWord, HostWord, HostWord) -> HostWord;

/// Stack convention: C argument order, caller cleanup
unsafe fn call_stack(address: usize, words: &[HostWord]) -> Result<HostWord, CallError> {
    let result = match *words {
        [] => mem::transmute::<usize, Stack0>(address)(),
        [a] => mem::transmute::<usize, Stack1>(address)(a),
        [a, b] => mem::transmute::<usize, Stack2>(address)(a, b),
        [a, b, c] => mem::transmute::<usize, Stack3>(address)(a, b, c),
        [a, b, c, d] => mem::transmute::<usize, Stack4>(address)(a, b, c, d),
        [a, b, c, d, e] => mem::transmute::<usize, Stack5>(address)(a, b, c, d, e),
        [a, b, c, d, e, f] => mem::transmute::<usize, Stack6>(address)(a, b, c, d, e, f),
        _ => {
            return Err(CallError::UnsupportedSignature(format!(
                "stack call with {} arguments",
                words.len()
            )))
        }
    };
    Ok(result)
}

fn register_shape(words: &[HostWord]) -> Result<(), CallError> {
    if words.len() > MAX_REGISTER_ARGS {
        return Err(CallError::UnsupportedSignature(format!(
            "register call with {} arguments",
            words.len()
        )));
    }
    Ok(())
}

/// Register convention: `eax`, `edx`, `ebx`, `ecx`, then the stack; result
/// in `eax`
#[cfg(target_arch = "x86")]
unsafe fn call_register(address: usize, words: &[HostWord]) -> Result<HostWord, CallError> {
    register_shape(words)?;
    let mut regs = [0 as HostWord; REGISTER_SLOTS];
    let in_regs = words.len().min(REGISTER_SLOTS);
    regs[..in_regs].copy_from_slice(&words[..in_regs]);
    let pushed = &words[in_regs..];

    let result: HostWord;
    match pushed.len() {
        0 => std::arch::asm!(
            "call {target}",
            target = in(reg) address,
            inlateout("eax") regs[0] => result,
            inlateout("edx") regs[1] => _,
            inlateout("ebx") regs[2] => _,
            inlateout("ecx") regs[3] => _,
            clobber_abi("C"),
        ),
        1 => std::arch::asm!(
            "push dword ptr [{extra}]",
            "call {target}",
            extra = in(reg) pushed.as_ptr(),
            target = in(reg) address,
            inlateout("eax") regs[0] => result,
            inlateout("edx") regs[1] => _,
            inlateout("ebx") regs[2] => _,
            inlateout("ecx") regs[3] => _,
            clobber_abi("C"),
        ),
        _ => std::arch::asm!(
            "push dword ptr [{extra} + 4]",
            "push dword ptr [{extra}]",
            "call {target}",
            extra = in(reg) pushed.as_ptr(),
            target = in(reg) address,
            inlateout("eax") regs[0] => result,
            inlateout("edx") regs[1] => _,
            inlateout("ebx") regs[2] => _,
            inlateout("ecx") regs[3] => _,
            clobber_abi("C"),
        ),
    }
    Ok(result)
}

/// Register convention outside 32-bit x86: the platform C ABI
#[cfg(not(target_arch = "x86"))]
unsafe fn call_register(address: usize, words: &[HostWord]) -> Result<HostWord, CallError> {
    register_shape(words)?;
    call_stack(address, words)
}
