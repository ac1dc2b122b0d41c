//! Byte views of keys and the contract items must satisfy to be stored in a
//! [`crate::Trie`].

use std::{
    borrow::Cow,
    ffi::{CStr, CString},
    num::{
        NonZeroI128, NonZeroI16, NonZeroI32, NonZeroI64, NonZeroI8, NonZeroU128, NonZeroU16,
        NonZeroU32, NonZeroU64, NonZeroU8,
    },
    rc::Rc,
    sync::Arc,
};

#[cfg(unix)]
use std::{
    ffi::{OsStr, OsString},
    path::{Path, PathBuf},
};

/// Any type implementing `AsBytes` can be decomposed into bytes.
///
/// The trie only ever compares keys byte-for-byte, so this is the single
/// requirement placed on a key type.
pub trait AsBytes {
    /// View the current value as a byte array.
    fn as_bytes(&self) -> &[u8];
}

/// The contract for values stored in a [`crate::Trie`].
///
/// Every item carries its own key. Two items occupy the same slot in the trie
/// iff the bytes of their keys are identical.
///
/// # Examples
///
/// ```rust
/// use sprig::{Keyed, Trie};
///
/// struct Route {
///     path: String,
///     handler: u32,
/// }
///
/// impl Keyed for Route {
///     type Key = str;
///
///     fn key(&self) -> &str {
///         &self.path
///     }
/// }
///
/// let mut routes = Trie::new();
/// routes.insert(Route { path: "/users".into(), handler: 1 });
/// assert_eq!(routes.get("/users").unwrap().handler, 1);
/// ```
pub trait Keyed {
    /// The type of the key, viewed as bytes when placing the item.
    type Key: AsBytes + ?Sized;

    /// Return the key of this item.
    fn key(&self) -> &Self::Key;
}

macro_rules! as_bytes_for_integer_like_types {
    ($($type:ty),*) => {
        $(
            impl AsBytes for $type {
                fn as_bytes(&self) -> &[u8] {
                    bytemuck::bytes_of(self)
                }
            }

            impl AsBytes for [$type] {
                fn as_bytes(&self) -> &[u8] {
                    bytemuck::cast_slice(self)
                }
            }

            impl AsBytes for Vec<$type> {
                fn as_bytes(&self) -> &[u8] {
                    bytemuck::cast_slice(self)
                }
            }

            impl<const N: usize> AsBytes for [$type; N] {
                fn as_bytes(&self) -> &[u8] {
                    bytemuck::cast_slice(self.as_slice())
                }
            }
        )*
    };
}

as_bytes_for_integer_like_types!(u8, i8, u16, i16, u32, i32, u64, i64, u128, i128);

macro_rules! as_bytes_for_non_zero_types {
    ($($type:ty),*) => {
        $(
            impl AsBytes for $type {
                fn as_bytes(&self) -> &[u8] {
                    bytemuck::bytes_of(self)
                }
            }
        )*
    };
}

as_bytes_for_non_zero_types!(
    NonZeroU8,
    NonZeroI8,
    NonZeroU16,
    NonZeroI16,
    NonZeroU32,
    NonZeroI32,
    NonZeroU64,
    NonZeroI64,
    NonZeroU128,
    NonZeroI128
);

impl AsBytes for str {
    fn as_bytes(&self) -> &[u8] {
        str::as_bytes(self)
    }
}

impl AsBytes for String {
    fn as_bytes(&self) -> &[u8] {
        str::as_bytes(self)
    }
}

impl AsBytes for CStr {
    fn as_bytes(&self) -> &[u8] {
        self.to_bytes()
    }
}

impl AsBytes for CString {
    fn as_bytes(&self) -> &[u8] {
        self.to_bytes()
    }
}

#[cfg(unix)]
impl AsBytes for OsStr {
    fn as_bytes(&self) -> &[u8] {
        use std::os::unix::prelude::OsStrExt;

        <OsStr as OsStrExt>::as_bytes(self)
    }
}

#[cfg(unix)]
impl AsBytes for OsString {
    fn as_bytes(&self) -> &[u8] {
        <OsStr as AsBytes>::as_bytes(self.as_os_str())
    }
}

#[cfg(unix)]
impl AsBytes for Path {
    fn as_bytes(&self) -> &[u8] {
        <OsStr as AsBytes>::as_bytes(self.as_os_str())
    }
}

#[cfg(unix)]
impl AsBytes for PathBuf {
    fn as_bytes(&self) -> &[u8] {
        <OsStr as AsBytes>::as_bytes(self.as_os_str())
    }
}

impl<'a, B> AsBytes for Cow<'a, B>
where
    B: ToOwned + AsBytes + ?Sized,
{
    fn as_bytes(&self) -> &[u8] {
        <B as AsBytes>::as_bytes(self.as_ref())
    }
}

impl<T> AsBytes for &T
where
    T: AsBytes + ?Sized,
{
    fn as_bytes(&self) -> &[u8] {
        <T as AsBytes>::as_bytes(self)
    }
}

impl<T> AsBytes for &mut T
where
    T: AsBytes + ?Sized,
{
    fn as_bytes(&self) -> &[u8] {
        <T as AsBytes>::as_bytes(self)
    }
}

impl<T> AsBytes for Rc<T>
where
    T: AsBytes + ?Sized,
{
    fn as_bytes(&self) -> &[u8] {
        <T as AsBytes>::as_bytes(self)
    }
}

impl<T> AsBytes for Arc<T>
where
    T: AsBytes + ?Sized,
{
    fn as_bytes(&self) -> &[u8] {
        <T as AsBytes>::as_bytes(self)
    }
}

impl<T> AsBytes for Box<T>
where
    T: AsBytes + ?Sized,
{
    fn as_bytes(&self) -> &[u8] {
        <T as AsBytes>::as_bytes(self)
    }
}

impl Keyed for String {
    type Key = str;

    fn key(&self) -> &str {
        self
    }
}

impl Keyed for Vec<u8> {
    type Key = [u8];

    fn key(&self) -> &[u8] {
        self
    }
}

impl Keyed for Box<[u8]> {
    type Key = [u8];

    fn key(&self) -> &[u8] {
        self
    }
}

impl Keyed for Box<str> {
    type Key = str;

    fn key(&self) -> &str {
        self
    }
}

/// Key/value pairs are keyed by their first element, which lets a trie be
/// used like a map.
impl<K: AsBytes, V> Keyed for (K, V) {
    type Key = K;

    fn key(&self) -> &K {
        &self.0
    }
}
