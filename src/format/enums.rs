//! Enum value decoding.
//!
//! An enum instance only carries its raw storage. Its meaning comes from metadata:
//!
//! - the first per-instance field of the enum type (`value__`) names the underlying integral type
//! - the public static literal fields with a default value are the named constants
//! - a `System.FlagsAttribute` on the type switches from exact matching to bitmask decomposition
//!
//! Values and constants are widened to a common `u64` carrier before comparison, sign-extending
//! signed underlying types so that e.g. `-1` as `sbyte` and as `long` compare equal.

use std::collections::BTreeMap;

use tracing::debug;

use crate::{
    io::{read_le, read_native_signed_le},
    metadata::{
        attributes::has_flags_marker,
        element::{mnemonic, ELEMENT_TYPE},
        provider::{MetadataProvider, TypeDescriptor, TypeNamer, SYSTEM_ENUM},
    },
    value::ValueRef,
    Error, Result,
};

/// Returns `true` if the exact type of `value` derives directly from `System.Enum`.
///
/// Lookup failures are treated as "not an enum", so the caller falls back to the generic
/// value-type rendering.
pub fn is_enum(value: &ValueRef, metadata: &dyn MetadataProvider, namer: &dyn TypeNamer) -> bool {
    let Ok(ty) = value.exact_type() else {
        return false;
    };
    let Ok(Some(base)) = metadata.base_type(&ty) else {
        return false;
    };

    namer
        .type_name(&base)
        .is_ok_and(|name| name == SYSTEM_ENUM)
}

/// Returns the element type of the enum's storage field.
///
/// # Errors
/// Returns [`Error::MetadataUnavailable`] if the type declares no per-instance field.
pub fn underlying_type(metadata: &dyn MetadataProvider, ty: &TypeDescriptor) -> Result<u8> {
    metadata
        .fields(ty)?
        .into_iter()
        .find(|field| field.is_instance())
        .map(|field| field.element_type)
        .ok_or_else(|| Error::MetadataUnavailable(format!("enum {} has no storage field", ty.token)))
}

/// Reinterprets `data` as `underlying` and widens it to `u64`.
///
/// Signed types are sign-extended, unsigned types and `char` are zero-extended. Native-sized
/// `I` follows the width of `data`. Kinds that are not valid enum storage in C# (`U`, `R4`,
/// `R8`, ...) widen to `0`.
///
/// # Errors
/// Returns [`Error::OutOfBounds`] if `data` is too short for `underlying`.
pub fn widen(underlying: u8, data: &[u8]) -> Result<u64> {
    Ok(match underlying {
        ELEMENT_TYPE::I1 => read_le::<i8>(data)? as u64,
        ELEMENT_TYPE::U1 => u64::from(read_le::<u8>(data)?),
        ELEMENT_TYPE::I2 => read_le::<i16>(data)? as u64,
        ELEMENT_TYPE::U2 | ELEMENT_TYPE::CHAR => u64::from(read_le::<u16>(data)?),
        ELEMENT_TYPE::I4 => read_le::<i32>(data)? as u64,
        ELEMENT_TYPE::U4 => u64::from(read_le::<u32>(data)?),
        ELEMENT_TYPE::I8 => read_le::<i64>(data)? as u64,
        ELEMENT_TYPE::U8 => read_le::<u64>(data)?,
        ELEMENT_TYPE::I => read_native_signed_le(data)? as u64,
        _ => 0,
    })
}

/// Renders the raw storage `data` of an enum of type `ty`.
///
/// An exact match against a named constant always wins. Otherwise flags enums are decomposed
/// into the constants whose bits are all set, joined by `separator` in ascending value order.
/// If that does not explain every set bit, or the enum has no flags marker, the plain unsigned
/// number is rendered instead.
///
/// # Errors
/// Returns an error if the metadata of `ty` cannot be read or `data` is too short.
pub fn format_enum(
    metadata: &dyn MetadataProvider,
    ty: &TypeDescriptor,
    data: &[u8],
    separator: &str,
) -> Result<String> {
    let underlying = underlying_type(metadata, ty)?;
    let value = widen(underlying, data)?;
    let is_flags = has_flags_marker(&metadata.custom_attributes(ty)?);

    let mut constants = Vec::new();
    for field in metadata.fields(ty)? {
        if !field.flags.is_enum_constant() {
            continue;
        }

        let constant = widen(underlying, &field.constant)?;
        if constant == value {
            return Ok(field.name);
        }
        constants.push((constant, field.name));
    }

    if is_flags {
        let mut remaining = value;
        let mut matched = BTreeMap::new();
        for (constant, name) in constants {
            if constant == 0 {
                continue;
            }

            if constant == remaining || constant & remaining == constant {
                matched.entry(constant).or_insert(name);
                remaining &= !constant;
            }
        }

        if !matched.is_empty() && remaining == 0 {
            let names: Vec<String> = matched.into_values().collect();
            return Ok(names.join(separator));
        }

        debug!(
            value,
            remaining,
            "flags not fully explained by constants, rendering numeric value"
        );
    } else {
        debug!(
            value,
            underlying = mnemonic(underlying),
            "no enum constant matches, rendering numeric value"
        );
    }

    Ok(value.to_string())
}
