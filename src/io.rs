//! Bounds-checked little-endian access to raw value buffers.
//!
//! The debugging interface hands out value contents as plain byte buffers in the target's
//! native (little-endian) layout. Every decoder in this crate reads them through the helpers
//! here, so a short or truncated buffer surfaces as [`crate::Error::OutOfBounds`] instead of a
//! panic.
//!
//! # Examples
//!
//! ```rust,ignore
//! use dotvalue::io::read_le_at;
//!
//! let data = [0x01, 0x00, 0x02, 0x00, 0x00, 0x00];
//! let mut offset = 0;
//!
//! let first: u16 = read_le_at(&data, &mut offset)?;
//! let second: u32 = read_le_at(&data, &mut offset)?;
//! assert_eq!((first, second, offset), (1, 2, 6));
//! # Ok::<(), dotvalue::Error>(())
//! ```

use crate::{Error::OutOfBounds, Result};

/// Trait for type-specific conversion between primitive values and their little-endian bytes.
///
/// Each implementation names the fixed-size byte array backing the type (e.g. `[u8; 4]` for
/// `u32`), which the reading functions below fill from a slice.
pub trait CilIO: Sized {
    /// Associated type representing the byte array type for this numeric type.
    type Bytes: Sized + for<'a> TryFrom<&'a [u8]> + AsRef<[u8]>;

    /// Read T from a byte buffer in little-endian
    fn from_le_bytes(bytes: Self::Bytes) -> Self;

    /// Write T to a byte buffer in little-endian
    fn to_le_bytes(self) -> Self::Bytes;
}

macro_rules! impl_cil_io {
    ($($ty:ty => $len:expr),* $(,)?) => {
        $(
            impl CilIO for $ty {
                type Bytes = [u8; $len];

                fn from_le_bytes(bytes: Self::Bytes) -> Self {
                    <$ty>::from_le_bytes(bytes)
                }

                fn to_le_bytes(self) -> Self::Bytes {
                    <$ty>::to_le_bytes(self)
                }
            }
        )*
    };
}

impl_cil_io!(
    u8 => 1,
    i8 => 1,
    u16 => 2,
    i16 => 2,
    u32 => 4,
    i32 => 4,
    u64 => 8,
    i64 => 8,
    f32 => 4,
    f64 => 8,
);

/// Safely reads a value of type `T` in little-endian byte order from the start of a buffer.
///
/// # Errors
/// Returns [`crate::Error::OutOfBounds`] if the buffer holds fewer bytes than `T` needs.
pub fn read_le<T: CilIO>(data: &[u8]) -> Result<T> {
    let mut offset = 0_usize;
    read_le_at(data, &mut offset)
}

/// Safely reads a value of type `T` in little-endian byte order at `offset`, advancing it.
///
/// # Errors
/// Returns [`crate::Error::OutOfBounds`] if there are insufficient bytes left after `offset`.
pub fn read_le_at<T: CilIO>(data: &[u8], offset: &mut usize) -> Result<T> {
    let type_len = std::mem::size_of::<T>();
    let end = offset.checked_add(type_len).ok_or(OutOfBounds)?;
    if end > data.len() {
        return Err(OutOfBounds);
    }

    let Ok(read) = data[*offset..end].try_into() else {
        return Err(OutOfBounds);
    };

    *offset = end;

    Ok(T::from_le_bytes(read))
}

/// Safely writes `value` in little-endian byte order at `offset`, advancing it.
///
/// # Errors
/// Returns [`crate::Error::OutOfBounds`] if the buffer is too small to hold the value.
pub fn write_le_at<T: CilIO>(data: &mut [u8], offset: &mut usize, value: T) -> Result<()> {
    let bytes = value.to_le_bytes();
    let bytes = bytes.as_ref();
    let end = offset.checked_add(bytes.len()).ok_or(OutOfBounds)?;
    if end > data.len() {
        return Err(OutOfBounds);
    }

    data[*offset..end].copy_from_slice(bytes);
    *offset = end;

    Ok(())
}

/// Reads an unsigned machine-word value, using the width of the buffer itself.
///
/// Native-sized values (`IntPtr`, `UIntPtr`, pointers) are 4 bytes on 32-bit targets and 8 bytes
/// on 64-bit targets; the target's width wins over the host's.
///
/// # Errors
/// Returns [`crate::Error::OutOfBounds`] if the buffer holds fewer than 4 bytes.
pub fn read_native_le(data: &[u8]) -> Result<u64> {
    if data.len() >= 8 {
        read_le::<u64>(data)
    } else {
        read_le::<u32>(data).map(u64::from)
    }
}

/// Signed counterpart of [`read_native_le`], sign-extending 4-byte values.
///
/// # Errors
/// Returns [`crate::Error::OutOfBounds`] if the buffer holds fewer than 4 bytes.
pub fn read_native_signed_le(data: &[u8]) -> Result<i64> {
    if data.len() >= 8 {
        read_le::<i64>(data)
    } else {
        read_le::<i32>(data).map(i64::from)
    }
}
