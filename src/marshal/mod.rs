//! Reduction of live values to payloads that can cross the boundary to a presentation layer.
//!
//! A marshalled value is a [`MarshalType`] tag plus a [`Payload`]. Ownership differs per
//! payload kind:
//!
//! | Payload | Produced for | Owner after marshalling |
//! |---------|--------------|-------------------------|
//! | [`Payload::None`] | null, empty strings | - |
//! | [`Payload::Inline`] | scalars, pointers | copied into the payload |
//! | [`Payload::String`] | non-empty strings | receiver, via [`BoundaryAllocator`] |
//! | [`Payload::Bytes`] | decimals | receiver, via [`BoundaryAllocator`] |
//! | [`Payload::Handle`] | arrays, classes, value types | receiver holds one retain |
//!
//! Handles are passed opaquely; the receiver formats them later through
//! [`ValuePrinter::format_value`]. Enums and bare `object` values cannot be marshalled, they
//! must be formatted live before crossing.

pub mod allocator;

pub use allocator::{BoundaryAllocator, HeapAllocator};

use std::sync::Arc;

use strum::{EnumCount, EnumIter, FromRepr};
use tracing::debug;

use crate::{
    format::{
        decimal::DecimalParts, enums::is_enum, primitive::format_marshalled_with,
        string::read_string, ValuePrinter,
    },
    metadata::{
        element::{is_array, is_composite, mnemonic, ELEMENT_TYPE},
        provider::DECIMAL,
    },
    value::{resolve, ValueRef},
    Error, Result,
};

/// Type tags of marshalled values, with the identifiers the presentation layer expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumCount, FromRepr)]
#[repr(i32)]
pub enum MarshalType {
    /// An opaque, retained value handle
    CorValue = -1,
    /// `null`
    Object = 0,
    /// `bool`
    Boolean,
    /// `byte`
    Byte,
    /// `sbyte`
    SByte,
    /// `char`
    Char,
    /// `double`
    Double,
    /// `float`
    Single,
    /// `int`
    Int32,
    /// `uint`
    UInt32,
    /// `long`
    Int64,
    /// `ulong`
    UInt64,
    /// `short`
    Int16,
    /// `ushort`
    UInt16,
    /// Native int, unmanaged and function pointers
    IntPtr,
    /// Native uint
    UIntPtr,
    /// `decimal`
    Decimal,
    /// `string`
    String,
}

impl MarshalType {
    /// The numeric identifier of this tag.
    #[must_use]
    pub fn id(self) -> i32 {
        self as i32
    }

    /// Declared type name shown next to the rendered value.
    #[must_use]
    pub fn type_name(self) -> &'static str {
        match self {
            MarshalType::CorValue | MarshalType::Object => "object",
            MarshalType::Boolean => "bool",
            MarshalType::Byte => "byte",
            MarshalType::SByte => "sbyte",
            MarshalType::Char => "char",
            MarshalType::Double => "double",
            MarshalType::Single => "float",
            MarshalType::Int32 => "int",
            MarshalType::UInt32 => "uint",
            MarshalType::Int64 => "long",
            MarshalType::UInt64 => "ulong",
            MarshalType::Int16 => "short",
            MarshalType::UInt16 => "ushort",
            MarshalType::IntPtr => "IntPtr",
            MarshalType::UIntPtr => "UIntPtr",
            MarshalType::Decimal => "decimal",
            MarshalType::String => "string",
        }
    }

    /// Tag for a scalar element type, `None` for everything else.
    #[must_use]
    pub fn from_element_type(element_type: u8) -> Option<Self> {
        Some(match element_type {
            ELEMENT_TYPE::BOOLEAN => MarshalType::Boolean,
            ELEMENT_TYPE::CHAR => MarshalType::Char,
            ELEMENT_TYPE::I1 => MarshalType::SByte,
            ELEMENT_TYPE::U1 => MarshalType::Byte,
            ELEMENT_TYPE::I2 => MarshalType::Int16,
            ELEMENT_TYPE::U2 => MarshalType::UInt16,
            ELEMENT_TYPE::I4 => MarshalType::Int32,
            ELEMENT_TYPE::U4 => MarshalType::UInt32,
            ELEMENT_TYPE::I8 => MarshalType::Int64,
            ELEMENT_TYPE::U8 => MarshalType::UInt64,
            ELEMENT_TYPE::R4 => MarshalType::Single,
            ELEMENT_TYPE::R8 => MarshalType::Double,
            ELEMENT_TYPE::I | ELEMENT_TYPE::PTR | ELEMENT_TYPE::FNPTR => MarshalType::IntPtr,
            ELEMENT_TYPE::U => MarshalType::UIntPtr,
            _ => return None,
        })
    }

    /// Element type rendered for a scalar tag, `None` for the others.
    #[must_use]
    pub fn element_type(self) -> Option<u8> {
        Some(match self {
            MarshalType::Boolean => ELEMENT_TYPE::BOOLEAN,
            MarshalType::Byte => ELEMENT_TYPE::U1,
            MarshalType::SByte => ELEMENT_TYPE::I1,
            MarshalType::Char => ELEMENT_TYPE::CHAR,
            MarshalType::Double => ELEMENT_TYPE::R8,
            MarshalType::Single => ELEMENT_TYPE::R4,
            MarshalType::Int32 => ELEMENT_TYPE::I4,
            MarshalType::UInt32 => ELEMENT_TYPE::U4,
            MarshalType::Int64 => ELEMENT_TYPE::I8,
            MarshalType::UInt64 => ELEMENT_TYPE::U8,
            MarshalType::Int16 => ELEMENT_TYPE::I2,
            MarshalType::UInt16 => ELEMENT_TYPE::U2,
            MarshalType::IntPtr => ELEMENT_TYPE::I,
            MarshalType::UIntPtr => ELEMENT_TYPE::U,
            MarshalType::CorValue
            | MarshalType::Object
            | MarshalType::Decimal
            | MarshalType::String => return None,
        })
    }
}

impl TryFrom<i32> for MarshalType {
    type Error = Error;

    fn try_from(id: i32) -> Result<Self> {
        MarshalType::from_repr(id)
            .ok_or_else(|| Error::UnsupportedShape(format!("unknown marshal type {id}")))
    }
}

/// The data carried by a marshalled value.
#[derive(Debug)]
pub enum Payload {
    /// Nothing; null values and empty strings
    None,
    /// A copy of a scalar's raw contents
    Inline(Vec<u8>),
    /// A receiver-owned UTF-8 string
    String(String),
    /// A receiver-owned byte block
    Bytes(Box<[u8]>),
    /// A retained value handle; dropping it releases the retain
    Handle(ValueRef),
}

impl Payload {
    /// The raw bytes of this payload, empty for [`Payload::None`] and [`Payload::Handle`].
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        match self {
            Payload::None | Payload::Handle(_) => &[],
            Payload::Inline(data) => data,
            Payload::String(text) => text.as_bytes(),
            Payload::Bytes(data) => data,
        }
    }
}

/// A value reduced to a tag and payload.
#[derive(Debug)]
pub struct Marshalled {
    /// What the payload holds
    pub ty: MarshalType,
    /// The payload itself
    pub payload: Payload,
}

impl Marshalled {
    fn new(ty: MarshalType, payload: Payload) -> Self {
        debug!(?ty, "marshalled");
        Marshalled { ty, payload }
    }
}

impl ValuePrinter<'_> {
    /// Reduces `value` to a [`Marshalled`] tag and payload.
    ///
    /// Strings and decimals are copied through `allocator`. Arrays and non-decimal classes or
    /// value types retain `value` itself, not the resolved target. Function pointers carry their
    /// target address, `0` if it cannot be read.
    ///
    /// # Errors
    /// - [`Error::UnsupportedShape`] for enums, bare `object` values and unhandled element types
    /// - [`Error::AllocationFailure`] if `allocator` cannot provide the payload
    /// - [`Error::OutOfBounds`] if a decimal's contents are shorter than 16 bytes
    /// - any error raised while reading the value
    pub fn marshal(
        &self,
        value: &ValueRef,
        allocator: &dyn BoundaryAllocator,
    ) -> Result<Marshalled> {
        let resolved = resolve(value, self.options.max_indirection_depth)?;
        if resolved.is_null {
            return Ok(Marshalled::new(MarshalType::Object, Payload::None));
        }

        let terminal = resolved.value;
        let element_type = terminal.element_type()?;

        if element_type == ELEMENT_TYPE::STRING {
            let facet = terminal
                .as_string()
                .ok_or_else(|| Error::UnsupportedShape("string without contents".to_string()))?;
            let text = read_string(facet)?;
            let payload = if text.is_empty() {
                Payload::None
            } else {
                Payload::String(allocator.alloc_string(&text)?)
            };
            return Ok(Marshalled::new(MarshalType::String, payload));
        }

        if is_array(element_type) {
            return Ok(Marshalled::new(
                MarshalType::CorValue,
                Payload::Handle(Arc::clone(value)),
            ));
        }

        let raw = terminal
            .as_generic()
            .ok_or_else(|| {
                Error::UnsupportedShape(format!("{} without contents", mnemonic(element_type)))
            })?
            .raw()?;

        if is_composite(element_type) && is_enum(&terminal, self.metadata, self.namer) {
            return Err(Error::UnsupportedShape(
                "enums must be formatted before marshalling".to_string(),
            ));
        }

        match element_type {
            ELEMENT_TYPE::VALUETYPE | ELEMENT_TYPE::CLASS => {
                let name = terminal
                    .exact_type()
                    .and_then(|ty| self.namer.type_name(&ty))
                    .unwrap_or_default();
                if name != DECIMAL {
                    return Ok(Marshalled::new(
                        MarshalType::CorValue,
                        Payload::Handle(Arc::clone(value)),
                    ));
                }

                let raw = DecimalParts::from_raw(&raw)?.to_raw();
                let block = allocator.alloc_bytes(&raw)?;
                Ok(Marshalled::new(MarshalType::Decimal, Payload::Bytes(block)))
            }
            ELEMENT_TYPE::FNPTR => {
                let address = terminal
                    .as_reference()
                    .and_then(|reference| reference.address().ok())
                    .unwrap_or(0);
                Ok(Marshalled::new(
                    MarshalType::IntPtr,
                    Payload::Inline(address.to_le_bytes().to_vec()),
                ))
            }
            ELEMENT_TYPE::OBJECT => Err(Error::UnsupportedShape(
                "bare object values cannot be marshalled".to_string(),
            )),
            _ => match MarshalType::from_element_type(element_type) {
                Some(ty) => Ok(Marshalled::new(ty, Payload::Inline(raw))),
                None => Err(Error::UnsupportedShape(format!(
                    "cannot marshal {}",
                    mnemonic(element_type)
                ))),
            },
        }
    }

    /// Renders a marshalled value the way the presentation layer would.
    ///
    /// Handle payloads are rendered live; everything else through [`format_marshalled_with`].
    ///
    /// # Errors
    /// Returns an error if the payload is too short for its tag or a handle cannot be rendered.
    pub fn format_payload(&self, marshalled: &Marshalled) -> Result<(String, String)> {
        if let Payload::Handle(handle) = &marshalled.payload {
            let text = self.format_value(handle, true)?;
            let name = handle
                .exact_type()
                .and_then(|ty| self.namer.type_name(&ty))
                .unwrap_or_else(|_| marshalled.ty.type_name().to_string());
            return Ok((name, text));
        }

        format_marshalled_with(marshalled.ty, marshalled.payload.bytes(), &self.options)
    }
}
