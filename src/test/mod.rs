//! Mock value handles and metadata for unit tests.
//!
//! The decoders only talk to the debuggee through the facet and provider traits, so these
//! in-memory implementations let every decoder run without a live process.


pub use metadata::*;
pub use values::*;

use crate::{
    format::ValuePrinter,
    metadata::{element::ELEMENT_TYPE, provider::TypeDescriptor, token::Token},
    value::ValueRef,
};

// Helper function to create a printer over mock metadata
pub fn printer(metadata: &MockMetadata) -> ValuePrinter<'_> {
    ValuePrinter::new(metadata, metadata)
}

// Helper function to create a live decimal in the current runtime layout (`_flags`, `_hi32`, `_lo64`)
pub fn create_decimal(metadata: &mut MockMetadata, flags: u32, hi: u32, lo: u32, mid: u32) -> ValueRef {
    let ty = metadata.descriptor(DECIMAL_TOKEN);
    if metadata.fields_of(DECIMAL_TOKEN).is_empty() {
        metadata.add_field(DECIMAL_TOKEN, "_flags", ELEMENT_TYPE::I4);
        metadata.add_field(DECIMAL_TOKEN, "_hi32", ELEMENT_TYPE::U4);
        metadata.add_field(DECIMAL_TOKEN, "_lo64", ELEMENT_TYPE::U8);
    }

    let tokens = metadata.field_tokens(DECIMAL_TOKEN);
    let lo64 = (u64::from(mid) << 32) | u64::from(lo);

    let mut raw = Vec::with_capacity(16);
    raw.extend_from_slice(&flags.to_le_bytes());
    raw.extend_from_slice(&hi.to_le_bytes());
    raw.extend_from_slice(&lo.to_le_bytes());
    raw.extend_from_slice(&mid.to_le_bytes());

    MockValue::object(ty, &raw)
        .with_field(tokens[0], MockValue::u4(flags).into_ref())
        .with_field(tokens[1], MockValue::u4(hi).into_ref())
        .with_field(tokens[2], MockValue::u8(lo64).into_ref())
        .into_ref()
}

// Helper function to create a boxed enum value holding `raw`
pub fn create_enum_value(ty: &TypeDescriptor, raw: &[u8]) -> ValueRef {
    let inner = MockValue::object(ty.clone(), raw).into_ref();
    MockValue::boxed(inner).into_ref()
}

// Helper function to create a user-defined class type deriving from `base`
pub fn create_class(metadata: &mut MockMetadata, row: u32, name: &str, base: Token) -> TypeDescriptor {
    metadata.add_type(
        Token::from_parts(Token::TABLE_TYPEDEF, row),
        name,
        Some(base),
        ELEMENT_TYPE::CLASS,
    )
}
