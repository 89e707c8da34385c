//! Host call value types
//!
//! The host passes everything as machine words:
//! - `HostArg::Int(i32)` -> sign-extended word
//! - `HostArg::Ptr(usize)` -> address word
//! - return word -> `HostValue`, read back as `i32` or as an address

use std::num::NonZeroUsize;

/// One machine word as the host sees it
pub type HostWord = usize;

/// An argument to a host function
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostArg {
    /// C `long` on the host
    Int(i32),
    /// Any pointer
    Ptr(usize),
}

impl HostArg {
    /// Pointer argument from a Rust pointer
    pub fn ptr<T>(ptr: *const T) -> Self {
        HostArg::Ptr(ptr as usize)
    }

    /// Out-parameter the host writes through
    pub fn out<T>(ptr: *mut T) -> Self {
        HostArg::Ptr(ptr as usize)
    }

    /// The word pushed or loaded into a register
    pub fn word(self) -> HostWord {
        match self {
            HostArg::Int(value) => value as isize as usize,
            HostArg::Ptr(addr) => addr,
        }
    }
}

impl From<i32> for HostArg {
    fn from(value: i32) -> Self {
        HostArg::Int(value)
    }
}

/// The word a host function returned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HostValue(HostWord);

impl HostValue {
    pub fn from_word(word: HostWord) -> Self {
        HostValue(word)
    }

    pub fn word(self) -> HostWord {
        self.0
    }

    /// Low 32 bits as a C `long`
    pub fn as_i32(self) -> i32 {
        self.0 as i32
    }

    pub fn as_addr(self) -> usize {
        self.0
    }

    /// `None` for a null pointer
    pub fn as_non_null(self) -> Option<NonZeroUsize> {
        NonZeroUsize::new(self.0)
    }

    /// The host's usual failure return
    pub fn is_minus_one(self) -> bool {
        self.as_i32() == -1
    }
}
