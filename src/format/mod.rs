//! Text rendering of debuggee values.
//!
//! [`ValuePrinter`] is the entry point for live values. It collapses indirections, then
//! dispatches on the element type of the terminal value:
//!
//! - strings are read as UTF-16 and optionally escaped and quoted
//! - arrays render as a shape summary (`{int[3, 4]}`)
//! - enums decode against their named constants (see [`enums`])
//! - `decimal` decodes its backing fields (see [`decimal`])
//! - other value types and classes render as `{TypeName}`
//! - scalars render through the shared table in [`primitive`]
//!
//! Payloads that already crossed the boundary are rendered by [`format_marshalled`] without
//! any live handle or metadata.
//!
//! # Examples
//!
//! ```rust,ignore
//! use dotvalue::prelude::*;
//!
//! let printer = ValuePrinter::new(&metadata, &namer);
//! let text = printer.format_value(&value, true)?;
//! println!("{text}");
//! ```

pub mod array;
pub mod decimal;
pub mod enums;
pub mod field;
pub mod primitive;
pub mod string;

pub use primitive::{format_marshalled, format_marshalled_with};

use tracing::debug;

use crate::{
    config::PrintOptions,
    marshal::MarshalType,
    metadata::{
        element::{is_array, is_composite, mnemonic, ELEMENT_TYPE},
        provider::{MetadataProvider, TypeNamer, DECIMAL},
    },
    value::{resolve, ValueRef},
    Error, Result,
};

/// Renders live values using the metadata of the debuggee.
pub struct ValuePrinter<'a> {
    pub(crate) metadata: &'a dyn MetadataProvider,
    pub(crate) namer: &'a dyn TypeNamer,
    pub(crate) options: PrintOptions,
}

impl<'a> ValuePrinter<'a> {
    /// Create a printer with default [`PrintOptions`]
    #[must_use]
    pub fn new(metadata: &'a dyn MetadataProvider, namer: &'a dyn TypeNamer) -> Self {
        Self::with_options(metadata, namer, PrintOptions::default())
    }

    /// Create a printer with explicit options
    #[must_use]
    pub fn with_options(
        metadata: &'a dyn MetadataProvider,
        namer: &'a dyn TypeNamer,
        options: PrintOptions,
    ) -> Self {
        ValuePrinter {
            metadata,
            namer,
            options,
        }
    }

    /// The options this printer renders with
    #[must_use]
    pub fn options(&self) -> &PrintOptions {
        &self.options
    }

    /// Renders `value` as text.
    ///
    /// With `escape` set, strings render escaped and double-quoted and chars as code point
    /// plus quoted glyph; without it both render verbatim. Null references render as `null`.
    /// Element types without a rendering produce a diagnostic placeholder rather than an
    /// error.
    ///
    /// # Errors
    /// Returns an error if the value or its metadata cannot be read, e.g.
    /// [`Error::UnsupportedShape`] for values without raw contents or
    /// [`Error::MalformedDecimal`] for decimals with missing backing fields.
    pub fn format_value(&self, value: &ValueRef, escape: bool) -> Result<String> {
        let resolved = resolve(value, self.options.max_indirection_depth)?;
        if resolved.is_null {
            return Ok("null".to_string());
        }

        let value = resolved.value;
        let element_type = value.element_type()?;

        if element_type == ELEMENT_TYPE::STRING {
            let facet = value
                .as_string()
                .ok_or_else(|| Error::UnsupportedShape("string without contents".to_string()))?;
            let text = string::read_string(facet)?;
            return Ok(if escape { string::quote(&text) } else { text });
        }

        if is_array(element_type) {
            let facet = value
                .as_array()
                .ok_or_else(|| Error::UnsupportedShape("array without dimensions".to_string()))?;
            return array::format_array(facet, self.namer, &self.options.unknown_element_type);
        }

        let raw = value
            .as_generic()
            .ok_or_else(|| {
                Error::UnsupportedShape(format!("{} without contents", mnemonic(element_type)))
            })?
            .raw()?;

        if is_composite(element_type)
            && enums::is_enum(&value, self.metadata, self.namer)
        {
            let ty = value.exact_type()?;
            return enums::format_enum(self.metadata, &ty, &raw, &self.options.flags_separator);
        }

        match element_type {
            ELEMENT_TYPE::PTR => Ok("<pointer>".to_string()),
            ELEMENT_TYPE::FNPTR => {
                let address = value
                    .as_reference()
                    .and_then(|reference| reference.address().ok())
                    .unwrap_or(0);
                Ok(format!("<function pointer 0x{address:x}>"))
            }
            ELEMENT_TYPE::VALUETYPE | ELEMENT_TYPE::CLASS => {
                let name = value
                    .exact_type()
                    .and_then(|ty| self.namer.type_name(&ty))
                    .unwrap_or_default();
                if name == DECIMAL {
                    let parts = decimal::DecimalParts::from_object(
                        &value,
                        self.metadata,
                        self.options.max_indirection_depth,
                    )?;
                    Ok(decimal::format_decimal(parts))
                } else {
                    Ok(format!("{{{name}}}"))
                }
            }
            ELEMENT_TYPE::OBJECT => Ok("object".to_string()),
            _ => match primitive::format_scalar(element_type, &raw, escape, &self.options)? {
                Some(text) => Ok(text),
                None => {
                    debug!(element_type, "unhandled element type");
                    Ok(format!("(Unhandled CorElementType: 0x{element_type:x})"))
                }
            },
        }
    }

    /// Renders a marshalled payload using this printer's options.
    ///
    /// # Errors
    /// Returns [`Error::OutOfBounds`] if `data` is too short for `ty`.
    pub fn format_marshalled(&self, ty: MarshalType, data: &[u8]) -> Result<(String, String)> {
        format_marshalled_with(ty, data, &self.options)
    }
}
