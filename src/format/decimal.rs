//! `System.Decimal` decoding.
//!
//! A decimal is a 96-bit unsigned magnitude plus a flags word carrying the sign (bit 31) and
//! a power-of-ten scale (bits 16-23). The magnitude does not fit a 64-bit accumulator, so the
//! digit string is produced by repeated long division of the three 32-bit words by ten.
//!
//! Two sources feed the codec:
//! - a live object, whose backing fields are read by name (`hi`, `mid`, `lo`, `flags` on older
//!   runtimes, `_hi32`, `_lo64`, `_flags` on current ones)
//! - a raw 16-byte buffer in the runtime's in-memory order `flags, hi, lo, mid`

use std::fmt;

use tracing::warn;

use crate::{
    io::{read_le_at, write_le_at},
    metadata::{field::FieldAttributes, provider::MetadataProvider},
    value::{integral_value, ValueRef},
    Error, Result,
};

const SCALE_MASK: u32 = 0x00FF_0000;
const SCALE_SHIFT: u32 = 16;
const SIGN_MASK: u32 = 1 << 31;

/// The four words of a decimal value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DecimalParts {
    /// Sign and scale
    pub flags: u32,
    /// Bits 64-95 of the magnitude
    pub hi: u32,
    /// Bits 32-63 of the magnitude
    pub mid: u32,
    /// Bits 0-31 of the magnitude
    pub lo: u32,
}

impl DecimalParts {
    /// Size of the raw in-memory representation.
    pub const SIZE: usize = 16;

    /// Create from the individual words
    #[must_use]
    pub fn new(hi: u32, mid: u32, lo: u32, flags: u32) -> Self {
        DecimalParts { flags, hi, mid, lo }
    }

    /// Number of digits right of the decimal point.
    #[must_use]
    pub fn scale(&self) -> u32 {
        (self.flags & SCALE_MASK) >> SCALE_SHIFT
    }

    /// Returns `true` if the sign bit is set.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.flags & SIGN_MASK != 0
    }

    /// Decodes the raw 16-byte layout `flags, hi, lo, mid`.
    ///
    /// # Errors
    /// Returns [`Error::OutOfBounds`] if `data` is shorter than [`DecimalParts::SIZE`].
    pub fn from_raw(data: &[u8]) -> Result<Self> {
        let mut offset = 0;
        let flags = read_le_at::<u32>(data, &mut offset)?;
        let hi = read_le_at::<u32>(data, &mut offset)?;
        let lo = read_le_at::<u32>(data, &mut offset)?;
        let mid = read_le_at::<u32>(data, &mut offset)?;

        Ok(DecimalParts { flags, hi, mid, lo })
    }

    /// Encodes into the raw 16-byte layout `flags, hi, lo, mid`.
    #[must_use]
    pub fn to_raw(&self) -> [u8; Self::SIZE] {
        let mut data = [0u8; Self::SIZE];
        let mut offset = 0;
        for word in [self.flags, self.hi, self.lo, self.mid] {
            // A 16 byte buffer always holds four words
            let _ = write_le_at(&mut data, &mut offset, word);
        }
        data
    }

    /// Reads the backing fields of a live decimal object.
    ///
    /// `value` must already be resolved to the decimal instance itself. Static and literal
    /// fields are skipped; `_lo64` supplies both `mid` (upper half) and `lo` (lower half).
    ///
    /// # Errors
    /// Returns [`Error::MalformedDecimal`] naming the words that could not be located, or any
    /// error raised while reading a field.
    pub fn from_object(
        value: &ValueRef,
        metadata: &dyn MetadataProvider,
        max_depth: usize,
    ) -> Result<Self> {
        let ty = value.exact_type()?;
        let object = value
            .as_object()
            .ok_or_else(|| Error::UnsupportedShape("decimal without fields".to_string()))?;

        let mut parts = DecimalParts::default();
        let (mut has_hi, mut has_mid, mut has_lo, mut has_flags) = (false, false, false, false);

        for field in metadata.fields(&ty)? {
            if !field.is_instance() || field.flags.contains(FieldAttributes::LITERAL) {
                continue;
            }

            let field_value = object.field_value(&ty, field.token)?;
            match field.name.as_str() {
                "hi" | "_hi32" => {
                    parts.hi = integral_value::<u32>(&field_value, max_depth)?;
                    has_hi = true;
                }
                "_lo64" => {
                    let lo64 = integral_value::<u64>(&field_value, max_depth)?;
                    parts.mid = (lo64 >> 32) as u32;
                    parts.lo = (lo64 & 0xFFFF_FFFF) as u32;
                    has_mid = true;
                    has_lo = true;
                }
                "mid" => {
                    parts.mid = integral_value::<u32>(&field_value, max_depth)?;
                    has_mid = true;
                }
                "lo" => {
                    parts.lo = integral_value::<u32>(&field_value, max_depth)?;
                    has_lo = true;
                }
                "flags" | "_flags" => {
                    parts.flags = integral_value::<u32>(&field_value, max_depth)?;
                    has_flags = true;
                }
                _ => {}
            }
        }

        let missing: Vec<&str> = [
            (has_hi, "hi"),
            (has_mid, "mid"),
            (has_lo, "lo"),
            (has_flags, "flags"),
        ]
        .into_iter()
        .filter_map(|(found, name)| (!found).then_some(name))
        .collect();

        if !missing.is_empty() {
            let missing = missing.join(", ");
            warn!(missing = %missing, "incomplete decimal fields");
            return Err(Error::MalformedDecimal(missing));
        }

        Ok(parts)
    }
}

impl fmt::Display for DecimalParts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_decimal(*self))
    }
}

/// Divides the 96-bit value `dividend` (`[lo, mid, hi]`) in place by `divisor` and returns the
/// remainder.
///
/// Works like manual long division: each word is divided from the most significant down,
/// carrying the remainder into the next.
pub(crate) fn udivrem96(dividend: &mut [u32; 3], divisor: u32) -> u32 {
    let divisor = u64::from(divisor);
    let mut remainder = 0u64;

    for word in dividend.iter_mut().rev() {
        let partial = (remainder << 32) | u64::from(*word);
        *word = (partial / divisor) as u32;
        remainder = partial % divisor;
    }

    remainder as u32
}

/// Renders the 96-bit magnitude `[lo, mid, hi]` as base-10 digits.
#[must_use]
pub fn uint96_to_string(mut value: [u32; 3]) -> String {
    let mut digits = Vec::new();
    loop {
        let digit = udivrem96(&mut value, 10);
        digits.push(b'0' + digit as u8);
        if value == [0, 0, 0] {
            break;
        }
    }

    digits.iter().rev().map(|&digit| char::from(digit)).collect()
}

/// Renders a decimal with its scale and sign applied.
///
/// Magnitudes with no more digits than the scale get a `0.` prefix and leading zeros, so the
/// fractional part always has exactly `scale` digits.
#[must_use]
pub fn format_decimal(parts: DecimalParts) -> String {
    let digits = uint96_to_string([parts.lo, parts.mid, parts.hi]);
    let scale = parts.scale() as usize;

    let mut output = String::with_capacity(digits.len() + scale + 3);
    if parts.is_negative() {
        output.push('-');
    }

    if digits.len() > scale {
        let split = digits.len() - scale;
        output.push_str(&digits[..split]);
        if scale != 0 {
            output.push('.');
            output.push_str(&digits[split..]);
        }
    } else {
        output.push_str("0.");
        output.extend(std::iter::repeat('0').take(scale - digits.len()));
        output.push_str(&digits);
    }

    output
}
