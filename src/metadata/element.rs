//! Element-type tags reported by the runtime for every value.
//!
//! The tag of a value decides which decoder runs. Tags are passed around as raw `u8` so that
//! values with tags this crate does not know about can still be reported (see the diagnostic
//! placeholder of the primitive dispatcher) instead of being rejected at the boundary.

#[allow(non_snake_case, dead_code, missing_docs)]
/// Possible bytes that represent the element type of a runtime value - from coreclr
pub mod ELEMENT_TYPE {
    //Marks end of a list
    pub const END: u8 = 0x00;
    pub const VOID: u8 = 0x01;
    pub const BOOLEAN: u8 = 0x02;
    pub const CHAR: u8 = 0x03;
    pub const I1: u8 = 0x04;
    pub const U1: u8 = 0x05;
    pub const I2: u8 = 0x06;
    pub const U2: u8 = 0x07;
    pub const I4: u8 = 0x08;
    pub const U4: u8 = 0x09;
    pub const I8: u8 = 0x0a;
    pub const U8: u8 = 0x0b;
    pub const R4: u8 = 0x0c;
    pub const R8: u8 = 0x0d;
    pub const STRING: u8 = 0x0e;
    // Unmanaged pointer
    pub const PTR: u8 = 0x0f;
    pub const BYREF: u8 = 0x10;
    // Instance of a value type (struct, enum, decimal)
    pub const VALUETYPE: u8 = 0x11;
    // Instance of a reference type
    pub const CLASS: u8 = 0x12;
    pub const VAR: u8 = 0x13;
    // Multi-dimensional array, or an array with non-zero lower bounds
    pub const ARRAY: u8 = 0x14;
    pub const GENERICINST: u8 = 0x15;
    pub const TYPEDBYREF: u8 = 0x16;
    // System.IntPtr
    pub const I: u8 = 0x18;
    // System.UIntPtr
    pub const U: u8 = 0x19;
    pub const FNPTR: u8 = 0x1b;
    // System.Object
    pub const OBJECT: u8 = 0x1c;
    // Single-dim array with 0 lower bound
    pub const SZARRAY: u8 = 0x1d;
    pub const MVAR: u8 = 0x1e;
}

/// Returns `true` for the two array element types.
#[must_use]
pub fn is_array(element_type: u8) -> bool {
    matches!(element_type, ELEMENT_TYPE::SZARRAY | ELEMENT_TYPE::ARRAY)
}

/// Returns `true` for value-type and class instances, the shapes that need metadata to render.
#[must_use]
pub fn is_composite(element_type: u8) -> bool {
    matches!(element_type, ELEMENT_TYPE::VALUETYPE | ELEMENT_TYPE::CLASS)
}

/// Returns the size in bytes of a fixed-width integral element type.
///
/// Native-sized types (`I`, `U`) return `None`, their width depends on the target.
#[must_use]
pub fn integral_width(element_type: u8) -> Option<usize> {
    match element_type {
        ELEMENT_TYPE::I1 | ELEMENT_TYPE::U1 => Some(1),
        ELEMENT_TYPE::I2 | ELEMENT_TYPE::U2 | ELEMENT_TYPE::CHAR => Some(2),
        ELEMENT_TYPE::I4 | ELEMENT_TYPE::U4 => Some(4),
        ELEMENT_TYPE::I8 | ELEMENT_TYPE::U8 => Some(8),
        _ => None,
    }
}

/// Short mnemonic of an element type, used in log events and diagnostics.
#[must_use]
pub fn mnemonic(element_type: u8) -> &'static str {
    match element_type {
        ELEMENT_TYPE::END => "END",
        ELEMENT_TYPE::VOID => "VOID",
        ELEMENT_TYPE::BOOLEAN => "BOOLEAN",
        ELEMENT_TYPE::CHAR => "CHAR",
        ELEMENT_TYPE::I1 => "I1",
        ELEMENT_TYPE::U1 => "U1",
        ELEMENT_TYPE::I2 => "I2",
        ELEMENT_TYPE::U2 => "U2",
        ELEMENT_TYPE::I4 => "I4",
        ELEMENT_TYPE::U4 => "U4",
        ELEMENT_TYPE::I8 => "I8",
        ELEMENT_TYPE::U8 => "U8",
        ELEMENT_TYPE::R4 => "R4",
        ELEMENT_TYPE::R8 => "R8",
        ELEMENT_TYPE::STRING => "STRING",
        ELEMENT_TYPE::PTR => "PTR",
        ELEMENT_TYPE::BYREF => "BYREF",
        ELEMENT_TYPE::VALUETYPE => "VALUETYPE",
        ELEMENT_TYPE::CLASS => "CLASS",
        ELEMENT_TYPE::VAR => "VAR",
        ELEMENT_TYPE::ARRAY => "ARRAY",
        ELEMENT_TYPE::GENERICINST => "GENERICINST",
        ELEMENT_TYPE::TYPEDBYREF => "TYPEDBYREF",
        ELEMENT_TYPE::I => "I",
        ELEMENT_TYPE::U => "U",
        ELEMENT_TYPE::FNPTR => "FNPTR",
        ELEMENT_TYPE::OBJECT => "OBJECT",
        ELEMENT_TYPE::SZARRAY => "SZARRAY",
        ELEMENT_TYPE::MVAR => "MVAR",
        _ => "UNKNOWN",
    }
}
