//! Declared fields as reported by the metadata provider.

use bitflags::bitflags;

use crate::metadata::token::Token;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    /// All possible flags for `FieldAttributes` (ECMA-335 §II.23.1.5)
    pub struct FieldAttributes: u32 {
        /// These 3 bits contain the accessibility of the field
        const FIELD_ACCESS_MASK = 0x0007;
        /// Accessible only by the parent type
        const PRIVATE = 0x0001;
        /// Accessible by sub-types only in this Assembly
        const FAM_AND_ASSEM = 0x0002;
        /// Accessibly by anyone in the Assembly
        const ASSEMBLY = 0x0003;
        /// Accessible only by type and sub-types
        const FAMILY = 0x0004;
        /// Accessibly by sub-types anywhere, plus anyone in assembly
        const FAM_OR_ASSEM = 0x0005;
        /// Accessibly by anyone who has visibility to this scope
        const PUBLIC = 0x0006;
        /// Defined on type, else per instance
        const STATIC = 0x0010;
        /// Field can only be initialized, not written to after init
        const INIT_ONLY = 0x0020;
        /// Value is compile time constant
        const LITERAL = 0x0040;
        /// Reserved (to indicate this field should not be serialized when type is remoted)
        const NOT_SERIALIZED = 0x0080;
        /// Field has RVA
        const HAS_FIELD_RVA = 0x0100;
        /// Field is special
        const SPECIAL_NAME = 0x0200;
        /// CLI provides 'special' behavior, depending upon the name of the field
        const RTSPECIAL_NAME = 0x0400;
        /// Field has marshalling information
        const HAS_FIELD_MARSHAL = 0x1000;
        /// Implementation is forwarded through `PInvoke`
        const PINVOKE_IMPL = 0x2000;
        /// Field has default
        const HAS_DEFAULT = 0x8000;
    }
}

impl FieldAttributes {
    /// The attribute set every named enum constant carries.
    pub const ENUM_CONSTANT: Self = Self::PUBLIC
        .union(Self::STATIC)
        .union(Self::LITERAL)
        .union(Self::HAS_DEFAULT);

    /// Returns `true` for per-instance fields.
    #[must_use]
    pub fn is_instance(self) -> bool {
        !self.contains(Self::STATIC)
    }

    /// Returns `true` for fields that carry a compile-time constant of an enum.
    #[must_use]
    pub fn is_enum_constant(self) -> bool {
        self.contains(Self::ENUM_CONSTANT)
    }
}

/// A declared field of a type, in metadata declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldInfo {
    /// `FieldDef` token of this field
    pub token: Token,
    /// Field name
    pub name: String,
    /// Raw field attributes
    pub flags: FieldAttributes,
    /// Element type of the field's declared type, taken from its signature
    pub element_type: u8,
    /// Raw little-endian constant value for literal fields, empty otherwise
    pub constant: Vec<u8>,
}

impl FieldInfo {
    /// Creates a per-instance field without a constant value.
    #[must_use]
    pub fn instance(token: Token, name: &str, element_type: u8) -> Self {
        FieldInfo {
            token,
            name: name.to_string(),
            flags: FieldAttributes::PRIVATE,
            element_type,
            constant: Vec::new(),
        }
    }

    /// Creates a public literal field holding `constant` (as an enum constant would).
    #[must_use]
    pub fn literal(token: Token, name: &str, element_type: u8, constant: &[u8]) -> Self {
        FieldInfo {
            token,
            name: name.to_string(),
            flags: FieldAttributes::ENUM_CONSTANT,
            element_type,
            constant: constant.to_vec(),
        }
    }

    /// Returns `true` if this is the storage field of an enum or any other instance field.
    #[must_use]
    pub fn is_instance(&self) -> bool {
        self.flags.is_instance()
    }
}
