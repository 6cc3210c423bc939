//! # dotvalue Prelude
//!
//! This module provides a convenient prelude for the most commonly used types and traits
//! from the dotvalue library. Import it to implement the provider seams and render values.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all dotvalue operations
pub use crate::Error;

/// The result type used throughout dotvalue
pub use crate::Result;

/// Rendering options
pub use crate::PrintOptions;

// ================================================================================================
// Main Entry Points
// ================================================================================================

/// Renders live values, marshals them and looks up named fields
pub use crate::format::ValuePrinter;

/// Renders payloads after they crossed the boundary
pub use crate::format::{format_marshalled, format_marshalled_with};

// ================================================================================================
// Value Handles
// ================================================================================================

/// A value handle, its facets, and the retained handle type
pub use crate::value::{
    ArrayValue, BoxValue, CorValue, GenericValue, ObjectValue, ReferenceValue, StringValue,
    ValueRef,
};

/// Indirection collapsing and typed integral reads
pub use crate::value::{integral_value, resolve, Resolved};

// ================================================================================================
// Metadata
// ================================================================================================

/// Element-type tags
pub use crate::metadata::element::ELEMENT_TYPE;

/// Declared fields and their attributes
pub use crate::metadata::field::{FieldAttributes, FieldInfo};

/// Custom attributes applied to a type
pub use crate::metadata::attributes::CustomAttributeInfo;

/// The metadata seams implemented by the debugger
pub use crate::metadata::provider::{MetadataProvider, TypeDescriptor, TypeNamer};

/// Metadata tokens
pub use crate::metadata::token::Token;

// ================================================================================================
// Marshalling
// ================================================================================================

/// Tagged payloads and their allocation
pub use crate::marshal::{BoundaryAllocator, HeapAllocator, MarshalType, Marshalled, Payload};

/// Decimal words, for callers building or inspecting decimal payloads
pub use crate::format::decimal::DecimalParts;
