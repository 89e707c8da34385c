//! Typed views over host memory
//!
//! A view is a base address plus the field offsets of one record type from
//! the active [`Layout`](fobridge_config::Layout). Views never allocate or
//! free host memory and never check bounds; they only interpret memory that
//! is already there.
//!
//! # Handles
//!
//! Handles ([`ObjectHandle`], [`ProtoRef`], ...) are non-owning addresses of
//! host records. The host decides how long a record lives: a handle is good
//! until the next host invalidation point (object destruction, map change,
//! message file reload). Using one after that is undefined behaviour, which
//! is why building a handle from a raw address is `unsafe`.

pub mod interface;
pub mod message;
pub mod object;
pub mod pool;
pub mod proto;
pub mod script;
pub mod tile;
pub mod window;

pub use interface::ItemButtonView;
pub use message::{MessageListView, MessageRecord};
pub use object::{ObjectType, ObjectView};
pub use pool::RectView;
pub use proto::ProtoView;
pub use script::ScriptView;
pub use tile::TileNodeView;
pub use window::WindowView;

use std::mem::size_of;
use std::num::NonZeroUsize;
use std::ptr;

/// Untyped window onto host memory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RawView {
    base: NonZeroUsize,
}

impl RawView {
    /// `None` for a null base
    pub fn new(addr: usize) -> Option<Self> {
        NonZeroUsize::new(addr).map(|base| Self { base })
    }

    pub fn addr(self) -> usize {
        self.base.get()
    }

    /// Address of the field at `offset`
    pub fn field_addr(self, offset: usize) -> usize {
        self.base.get().wrapping_add(offset)
    }

    /// Read a `T` at `offset`
    ///
    /// # Safety
    ///
    /// `base + offset` must be readable for `size_of::<T>()` bytes and hold a
    /// valid `T`.
    pub unsafe fn read<T: Copy>(self, offset: usize) -> T {
        ptr::read_unaligned(self.field_addr(offset) as *const T)
    }

    /// Write a `T` at `offset`
    ///
    /// # Safety
    ///
    /// `base + offset` must be writable for `size_of::<T>()` bytes and the
    /// host must tolerate the new value.
    pub unsafe fn write<T: Copy>(self, offset: usize, value: T) {
        ptr::write_unaligned(self.field_addr(offset) as *mut T, value)
    }

    /// Read a pointer-sized field
    ///
    /// # Safety
    ///
    /// See [`RawView::read`].
    pub unsafe fn read_word(self, offset: usize) -> usize {
        self.read::<usize>(offset)
    }

    /// Read the `index`-th `T` of an array starting at `offset`
    ///
    /// # Safety
    ///
    /// See [`RawView::read`].
    pub unsafe fn read_indexed<T: Copy>(self, offset: usize, index: usize) -> T {
        self.read::<T>(offset.wrapping_add(index.wrapping_mul(size_of::<T>())))
    }
}

/// Read a global variable of the host
///
/// # Safety
///
/// `addr` must be the address of a host variable of type `T`.
pub unsafe fn read_global<T: Copy>(addr: usize) -> T {
    ptr::read_unaligned(addr as *const T)
}

/// Write a global variable of the host
///
/// # Safety
///
/// `addr` must be the address of a host variable of type `T`.
pub unsafe fn write_global<T: Copy>(addr: usize, value: T) {
    ptr::write_unaligned(addr as *mut T, value)
}

macro_rules! host_handle {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(NonZeroUsize);

        impl $name {
            /// Wrap a raw host address; `None` for null
            ///
            /// # Safety
            ///
            /// A non-null `addr` must point to a live record of this kind and
            /// the handle must not be used past the host's next invalidation
            /// of that record.
            pub unsafe fn from_addr(addr: usize) -> Option<Self> {
                NonZeroUsize::new(addr).map(Self)
            }

            /// Wrap a raw host pointer; `None` for null
            ///
            /// # Safety
            ///
            /// See `from_addr`.
            pub unsafe fn from_ptr<T>(ptr: *const T) -> Option<Self> {
                Self::from_addr(ptr as usize)
            }

            pub fn addr(self) -> usize {
                self.0.get()
            }

            pub fn as_ptr<T>(self) -> *mut T {
                self.0.get() as *mut T
            }

            pub(crate) fn raw(self) -> RawView {
                RawView { base: self.0 }
            }
        }
    };
}

host_handle! {
    /// A live host object ("game object")
    ObjectHandle
}

host_handle! {
    /// A template record looked up by PID
    ProtoRef
}

host_handle! {
    /// A loaded message file
    MessageListRef
}

host_handle! {
    /// A dirty-rectangle node from the host pool
    RectNode
}

host_handle! {
    /// A script instance
    ScriptRef
}

host_handle! {
    /// An open interface window
    WindowRef
}
