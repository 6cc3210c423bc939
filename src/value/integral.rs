//! Typed extraction of integral values.

use crate::{
    io::{read_le, CilIO},
    metadata::element::{integral_width, mnemonic, ELEMENT_TYPE},
    value::{resolve, ValueRef},
    Error, Result,
};

/// Integral types that can be read straight out of a value's raw contents.
pub trait Integral: CilIO + Copy {
    /// Display name used in mismatch errors
    const NAME: &'static str;
}

macro_rules! impl_integral {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Integral for $ty {
                const NAME: &'static str = stringify!($ty);
            }
        )*
    };
}

impl_integral!(u8, i8, u16, i16, u32, i32, u64, i64);

/// Reads `value` as an integer of type `T`.
///
/// References and boxes are followed first. The value must be non-null, exactly
/// `size_of::<T>()` bytes wide and tagged with an integral element type of that width
/// (native-sized `I` / `U` qualify when their width matches). Signedness is not checked, the
/// bit pattern is reinterpreted.
///
/// # Errors
/// Returns [`Error::NullValue`] for null references, [`Error::TypeMismatch`] for values of
/// another size or kind, and [`Error::UnsupportedShape`] if the value has no raw contents.
pub fn integral_value<T: Integral>(value: &ValueRef, max_depth: usize) -> Result<T> {
    let resolved = resolve(value, max_depth)?;
    if resolved.is_null {
        return Err(Error::NullValue);
    }

    let value = resolved.value;
    let width = std::mem::size_of::<T>();
    let size = value.size()?;
    if usize::try_from(size).ok() != Some(width) {
        return Err(Error::TypeMismatch {
            expected: T::NAME,
            actual: format!("{size} byte value"),
        });
    }

    let element_type = value.element_type()?;
    let compatible = match element_type {
        ELEMENT_TYPE::CHAR => false,
        ELEMENT_TYPE::I | ELEMENT_TYPE::U => width == 4 || width == 8,
        other => integral_width(other) == Some(width),
    };
    if !compatible {
        return Err(Error::TypeMismatch {
            expected: T::NAME,
            actual: mnemonic(element_type).to_string(),
        });
    }

    let generic = value
        .as_generic()
        .ok_or_else(|| Error::UnsupportedShape("integral value without contents".to_string()))?;
    read_le::<T>(&generic.raw()?)
}
