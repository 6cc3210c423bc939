//! Metadata vocabulary shared by all value decoders.
//!
//! # Key Components
//!
//! - [`token::Token`] - Metadata tokens of types, fields and attributes
//! - [`element::ELEMENT_TYPE`] - Element-type tags the runtime reports for values
//! - [`field::FieldInfo`] / [`field::FieldAttributes`] - Declared fields and their flags
//! - [`attributes::CustomAttributeInfo`] - Custom attributes, including the flags marker
//! - [`provider::MetadataProvider`] / [`provider::TypeNamer`] - Capabilities supplied by the debugger

pub mod attributes;
pub mod element;
pub mod field;
pub mod provider;
pub mod token;
