//! Rendering of scalar values from their raw little-endian contents.
//!
//! The same table serves both entry points: live values, keyed by element type, and
//! marshalled payloads, keyed by [`MarshalType`]. Neither path needs metadata for scalars.

use tracing::debug;

use crate::{
    config::PrintOptions,
    format::{decimal::DecimalParts, string},
    io::{read_le, read_native_le, read_native_signed_le},
    marshal::MarshalType,
    metadata::element::ELEMENT_TYPE,
    Result,
};

/// Renders a scalar element type from `data`, or returns `None` if `element_type` is not a
/// scalar.
///
/// With `escape` unset, `char` renders as the bare glyph; otherwise as the code point followed
/// by the escaped, single-quoted glyph (`97 'a'`). Native-sized integers render at the width of
/// `data`.
///
/// # Errors
/// Returns [`crate::Error::OutOfBounds`] if `data` is too short for the element type.
pub fn format_scalar(
    element_type: u8,
    data: &[u8],
    escape: bool,
    options: &PrintOptions,
) -> Result<Option<String>> {
    let text = match element_type {
        ELEMENT_TYPE::BOOLEAN => format_bool(read_le::<u8>(data)?),
        ELEMENT_TYPE::CHAR => format_char(read_le::<u16>(data)?, escape),
        ELEMENT_TYPE::I1 => read_le::<i8>(data)?.to_string(),
        ELEMENT_TYPE::U1 => read_le::<u8>(data)?.to_string(),
        ELEMENT_TYPE::I2 => read_le::<i16>(data)?.to_string(),
        ELEMENT_TYPE::U2 => read_le::<u16>(data)?.to_string(),
        ELEMENT_TYPE::I4 => read_le::<i32>(data)?.to_string(),
        ELEMENT_TYPE::U4 => read_le::<u32>(data)?.to_string(),
        ELEMENT_TYPE::I8 => read_le::<i64>(data)?.to_string(),
        ELEMENT_TYPE::U8 => read_le::<u64>(data)?.to_string(),
        ELEMENT_TYPE::I => read_native_signed_le(data)?.to_string(),
        ELEMENT_TYPE::U => read_native_le(data)?.to_string(),
        ELEMENT_TYPE::R4 => {
            format_general(f64::from(read_le::<f32>(data)?), options.float32_digits)
        }
        ELEMENT_TYPE::R8 => format_general(read_le::<f64>(data)?, options.float64_digits),
        _ => return Ok(None),
    };

    Ok(Some(text))
}

/// Renders a marshalled payload with default options.
///
/// Returns the declared type name together with the rendered text.
///
/// # Errors
/// Returns [`crate::Error::OutOfBounds`] if `data` is too short for `ty`.
///
/// # Examples
///
/// ```rust
/// use dotvalue::{format_marshalled, MarshalType};
///
/// let (name, text) = format_marshalled(MarshalType::Int32, &(-7i32).to_le_bytes())?;
/// assert_eq!((name.as_str(), text.as_str()), ("int", "-7"));
/// # Ok::<(), dotvalue::Error>(())
/// ```
pub fn format_marshalled(ty: MarshalType, data: &[u8]) -> Result<(String, String)> {
    format_marshalled_with(ty, data, &PrintOptions::default())
}

/// Renders a marshalled payload: the raw bytes a value was reduced to before crossing the
/// boundary.
///
/// - `CorValue` and `Object` payloads render as `null`; handles must be formatted live
/// - `IntPtr` / `UIntPtr` render as `0x`-prefixed hex at the width of `data`
/// - `Decimal` expects the 16-byte in-memory layout
/// - `String` expects UTF-8 and renders escaped and double-quoted
/// - `Char` always renders in its escaped form
///
/// # Errors
/// Returns [`crate::Error::OutOfBounds`] if `data` is too short for `ty`.
pub fn format_marshalled_with(
    ty: MarshalType,
    data: &[u8],
    options: &PrintOptions,
) -> Result<(String, String)> {
    let text = match ty {
        MarshalType::CorValue | MarshalType::Object => "null".to_string(),
        MarshalType::IntPtr | MarshalType::UIntPtr => format!("0x{:x}", read_native_le(data)?),
        MarshalType::Decimal => DecimalParts::from_raw(data)?.to_string(),
        MarshalType::String => string::quote(&String::from_utf8_lossy(data)),
        scalar => match scalar.element_type() {
            Some(element_type) => {
                format_scalar(element_type, data, true, options)?.unwrap_or_default()
            }
            None => {
                debug!(?scalar, "marshal type without scalar rendering");
                String::new()
            }
        },
    };

    Ok((ty.type_name().to_string(), text))
}

/// `false` for zero, `true` for anything else.
#[must_use]
pub fn format_bool(value: u8) -> String {
    let text = if value == 0 { "false" } else { "true" };
    text.to_string()
}

/// Renders a UTF-16 code unit.
///
/// Lone surrogates have no glyph of their own and render as U+FFFD.
#[must_use]
pub fn format_char(code: u16, escape: bool) -> String {
    let glyph = char::decode_utf16([code])
        .next()
        .and_then(std::result::Result::ok)
        .unwrap_or(char::REPLACEMENT_CHARACTER);

    if !escape {
        return glyph.to_string();
    }

    format!("{code} '{}'", string::escape(glyph.encode_utf8(&mut [0; 4]), '\''))
}

/// Renders `value` with `precision` significant digits in general notation.
///
/// Fixed notation is used when the decimal exponent lies in `-4..precision`, scientific
/// notation (`1.5e+20`) otherwise. Trailing zeros of the fraction are dropped in both forms.
#[must_use]
pub fn format_general(value: f64, precision: usize) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value.is_sign_negative() { "-inf" } else { "inf" }.to_string();
    }
    if value == 0.0 {
        return if value.is_sign_negative() { "-0" } else { "0" }.to_string();
    }

    let precision = precision.max(1);
    let scientific = format!("{:.*e}", precision - 1, value);
    let (mantissa, exponent) = match scientific.split_once('e') {
        Some((mantissa, exponent)) => (mantissa, exponent.parse::<i32>().unwrap_or(0)),
        None => (scientific.as_str(), 0),
    };

    let precision_exponent = i32::try_from(precision).unwrap_or(i32::MAX);
    if exponent < -4 || exponent >= precision_exponent {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!(
            "{}e{sign}{:02}",
            trim_fraction(mantissa),
            exponent.unsigned_abs()
        )
    } else {
        let decimals = usize::try_from(precision_exponent - 1 - exponent).unwrap_or(0);
        trim_fraction(&format!("{value:.decimals$}")).to_string()
    }
}

fn trim_fraction(text: &str) -> &str {
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.')
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    fn scalar(element_type: u8, data: &[u8]) -> String {
        format_scalar(element_type, data, true, &PrintOptions::default())
            .unwrap()
            .unwrap()
    }

    #[test]
    fn integers() {
        assert_eq!(scalar(ELEMENT_TYPE::I1, &[0xFF]), "-1");
        assert_eq!(scalar(ELEMENT_TYPE::U1, &[0xFF]), "255");
        assert_eq!(scalar(ELEMENT_TYPE::I2, &(-300i16).to_le_bytes()), "-300");
        assert_eq!(scalar(ELEMENT_TYPE::U2, &65535u16.to_le_bytes()), "65535");
        assert_eq!(scalar(ELEMENT_TYPE::I4, &i32::MIN.to_le_bytes()), "-2147483648");
        assert_eq!(scalar(ELEMENT_TYPE::U4, &u32::MAX.to_le_bytes()), "4294967295");
        assert_eq!(scalar(ELEMENT_TYPE::I8, &i64::MIN.to_le_bytes()), "-9223372036854775808");
        assert_eq!(scalar(ELEMENT_TYPE::U8, &u64::MAX.to_le_bytes()), "18446744073709551615");
    }

    #[test]
    fn native_integers() {
        assert_eq!(scalar(ELEMENT_TYPE::I, &(-5i64).to_le_bytes()), "-5");
        assert_eq!(scalar(ELEMENT_TYPE::I, &(-5i32).to_le_bytes()), "-5");
        assert_eq!(scalar(ELEMENT_TYPE::U, &u32::MAX.to_le_bytes()), "4294967295");
    }

    #[test]
    fn booleans_and_chars() {
        assert_eq!(scalar(ELEMENT_TYPE::BOOLEAN, &[0]), "false");
        assert_eq!(scalar(ELEMENT_TYPE::BOOLEAN, &[2]), "true");
        assert_eq!(scalar(ELEMENT_TYPE::CHAR, &97u16.to_le_bytes()), "97 'a'");
        assert_eq!(scalar(ELEMENT_TYPE::CHAR, &39u16.to_le_bytes()), "39 '\\''");
        assert_eq!(scalar(ELEMENT_TYPE::CHAR, &10u16.to_le_bytes()), "10 '\\n'");
        assert_eq!(format_char(0x20AC, false), "€");
        assert_eq!(format_char(0xD800, true), "55296 '\u{FFFD}'");
    }

    #[test]
    fn floats() {
        assert_eq!(scalar(ELEMENT_TYPE::R4, &1.5f32.to_le_bytes()), "1.5");
        assert_eq!(scalar(ELEMENT_TYPE::R4, &0.1f32.to_le_bytes()), "0.1");
        assert_eq!(scalar(ELEMENT_TYPE::R8, &0.1f64.to_le_bytes()), "0.1");
        assert_eq!(scalar(ELEMENT_TYPE::R8, &(1.0f64 / 3.0).to_le_bytes()), "0.3333333333333333");
        assert_eq!(scalar(ELEMENT_TYPE::R8, &100.0f64.to_le_bytes()), "100");
    }

    #[test]
    fn general_notation() {
        assert_eq!(format_general(1e20, 16), "1e+20");
        assert_eq!(format_general(1.5e-7, 8), "1.5e-07");
        assert_eq!(format_general(0.0001, 8), "0.0001");
        assert_eq!(format_general(123456789.0, 8), "1.2345679e+08");
        assert_eq!(format_general(-2.5, 8), "-2.5");
        assert_eq!(format_general(f64::NAN, 8), "nan");
        assert_eq!(format_general(f64::NEG_INFINITY, 8), "-inf");
        assert_eq!(format_general(-0.0, 8), "-0");
    }

    #[test]
    fn non_scalar_tags() {
        let options = PrintOptions::default();
        assert!(format_scalar(ELEMENT_TYPE::STRING, &[], true, &options)
            .unwrap()
            .is_none());
        assert!(format_scalar(ELEMENT_TYPE::CLASS, &[], true, &options)
            .unwrap()
            .is_none());
    }

    #[test]
    fn marshalled_names() {
        let cases: [(MarshalType, &[u8], &str, &str); 8] = [
            (MarshalType::Object, &[], "object", "null"),
            (MarshalType::CorValue, &[], "object", "null"),
            (MarshalType::Boolean, &[1], "bool", "true"),
            (MarshalType::SByte, &[0x80], "sbyte", "-128"),
            (MarshalType::Char, &[0x41, 0], "char", "65 'A'"),
            (MarshalType::UInt16, &[0x34, 0x12], "ushort", "4660"),
            (MarshalType::IntPtr, &[0xEF, 0xBE, 0xAD, 0xDE, 0, 0, 0, 0], "IntPtr", "0xdeadbeef"),
            (MarshalType::UIntPtr, &[0x10, 0, 0, 0], "UIntPtr", "0x10"),
        ];

        for (ty, data, name, text) in cases {
            let (actual_name, actual_text) = format_marshalled(ty, data).unwrap();
            assert_eq!(actual_name, name, "{ty:?}");
            assert_eq!(actual_text, text, "{ty:?}");
        }
    }

    #[test]
    fn marshalled_string_and_decimal() {
        let (name, text) = format_marshalled(MarshalType::String, b"a\"b\n").unwrap();
        assert_eq!(name, "string");
        assert_eq!(text, "\"a\\\"b\\n\"");

        let raw = DecimalParts::new(0, 0, 12345, 2 << 16).to_raw();
        let (name, text) = format_marshalled(MarshalType::Decimal, &raw).unwrap();
        assert_eq!(name, "decimal");
        assert_eq!(text, "123.45");
    }

    #[test]
    fn marshalled_floats() {
        let (name, text) = format_marshalled(MarshalType::Double, &2.75f64.to_le_bytes()).unwrap();
        assert_eq!((name.as_str(), text.as_str()), ("double", "2.75"));

        let (name, text) = format_marshalled(MarshalType::Single, &0.25f32.to_le_bytes()).unwrap();
        assert_eq!((name.as_str(), text.as_str()), ("float", "0.25"));
    }

    #[test]
    fn short_payload() {
        assert!(matches!(
            format_marshalled(MarshalType::Int64, &[0; 4]),
            Err(Error::OutOfBounds)
        ));
        assert!(matches!(
            format_marshalled(MarshalType::Decimal, &[0; 8]),
            Err(Error::OutOfBounds)
        ));
    }
}
