//! Handles over values living inside the debuggee.
//!
//! A value handle is an opaque, reference-counted capability handed out by the debugging
//! interface. Depending on what the value is, the handle supports a subset of a fixed set of
//! facets:
//!
//! | Facet | Trait | Used for |
//! |-------|-------|----------|
//! | Referenceable | [`ReferenceValue`] | null checks, dereferencing, pointer addresses |
//! | Boxed | [`BoxValue`] | unwrapping boxed value types |
//! | Generic | [`GenericValue`] | raw fixed-size contents |
//! | String | [`StringValue`] | UTF-16 contents of `System.String` |
//! | Array | [`ArrayValue`] | rank, extents, lower bounds, element type |
//! | Object | [`ObjectValue`] | reading a field by its declaring type |
//!
//! The set is closed: [`CorValue`] exposes one query per facet, each defaulting to "not
//! supported", so implementations only override the facets their value actually has.
//!
//! Reference counting maps onto [`std::sync::Arc`]: cloning a [`ValueRef`] retains the
//! handle, dropping it releases it.

use std::{fmt, sync::Arc};

use crate::{
    metadata::{provider::TypeDescriptor, token::Token},
    Result,
};

mod integral;
mod resolve;

pub use integral::{integral_value, Integral};
pub use resolve::{resolve, Resolved};

/// A retained value handle. Cloning retains, dropping releases.
pub type ValueRef = Arc<dyn CorValue>;

/// A value inside the debuggee, queried through its facets.
pub trait CorValue: fmt::Debug {
    /// Returns the element-type tag of the value (see [`crate::metadata::element::ELEMENT_TYPE`]).
    ///
    /// # Errors
    /// Returns [`crate::Error::Target`] if the debuggee cannot be queried.
    fn element_type(&self) -> Result<u8>;

    /// Returns the size of the value's contents in bytes.
    ///
    /// # Errors
    /// Returns [`crate::Error::Target`] if the debuggee cannot be queried.
    fn size(&self) -> Result<u32>;

    /// Returns the exact runtime type of the value.
    ///
    /// # Errors
    /// Returns [`crate::Error::MetadataUnavailable`] if the type cannot be determined.
    fn exact_type(&self) -> Result<TypeDescriptor>;

    /// Referenceable facet
    fn as_reference(&self) -> Option<&dyn ReferenceValue> {
        None
    }

    /// Boxed facet
    fn as_boxed(&self) -> Option<&dyn BoxValue> {
        None
    }

    /// Generic (raw contents) facet
    fn as_generic(&self) -> Option<&dyn GenericValue> {
        None
    }

    /// String facet
    fn as_string(&self) -> Option<&dyn StringValue> {
        None
    }

    /// Array facet
    fn as_array(&self) -> Option<&dyn ArrayValue> {
        None
    }

    /// Object facet
    fn as_object(&self) -> Option<&dyn ObjectValue> {
        None
    }
}

/// A value that refers to another value (object references, by-refs, pointers).
pub trait ReferenceValue {
    /// Returns `true` for a null reference.
    ///
    /// # Errors
    /// Returns [`crate::Error::Target`] if the debuggee cannot be queried.
    fn is_null(&self) -> Result<bool>;

    /// Returns the referenced value.
    ///
    /// # Errors
    /// Returns [`crate::Error::Target`] if the reference cannot be followed.
    fn dereference(&self) -> Result<ValueRef>;

    /// Returns the target address of the reference.
    ///
    /// # Errors
    /// Returns [`crate::Error::Target`] if the debuggee cannot be queried.
    fn address(&self) -> Result<u64>;
}

/// A boxed value type.
pub trait BoxValue {
    /// Returns the value inside the box.
    ///
    /// # Errors
    /// Returns [`crate::Error::Target`] if the box cannot be opened.
    fn object(&self) -> Result<ValueRef>;
}

/// A value whose contents can be copied out as a fixed-size buffer.
pub trait GenericValue {
    /// Copies the raw contents of the value, in the target's little-endian layout.
    ///
    /// # Errors
    /// Returns [`crate::Error::Target`] if the contents cannot be read.
    fn raw(&self) -> Result<Vec<u8>>;
}

/// An instance of `System.String`.
pub trait StringValue {
    /// Returns the length in UTF-16 code units, without a terminator.
    ///
    /// # Errors
    /// Returns [`crate::Error::Target`] if the debuggee cannot be queried.
    fn length(&self) -> Result<u32>;

    /// Copies up to `buffer.len()` code units into `buffer` and returns how many were written.
    ///
    /// # Errors
    /// Returns [`crate::Error::Target`] if the contents cannot be read.
    fn read(&self, buffer: &mut [u16]) -> Result<u32>;
}

/// An array of any rank.
pub trait ArrayValue {
    /// Number of dimensions.
    ///
    /// # Errors
    /// Returns [`crate::Error::Target`] if the debuggee cannot be queried.
    fn rank(&self) -> Result<u32>;

    /// Total number of elements.
    ///
    /// # Errors
    /// Returns [`crate::Error::Target`] if the debuggee cannot be queried.
    fn count(&self) -> Result<u32>;

    /// Extent of each dimension.
    ///
    /// # Errors
    /// Returns [`crate::Error::Target`] if the debuggee cannot be queried.
    fn dimensions(&self) -> Result<Vec<u32>>;

    /// Returns `true` if any dimension has a lower bound other than zero.
    ///
    /// # Errors
    /// Returns [`crate::Error::Target`] if the debuggee cannot be queried.
    fn has_base_indices(&self) -> Result<bool>;

    /// Lower bound of each dimension.
    ///
    /// # Errors
    /// Returns [`crate::Error::Target`] if the debuggee cannot be queried.
    fn base_indices(&self) -> Result<Vec<u32>>;

    /// Type of the array elements.
    ///
    /// # Errors
    /// Returns [`crate::Error::MetadataUnavailable`] if the element type is unknown.
    fn element_type_descriptor(&self) -> Result<TypeDescriptor>;
}

/// An instance of a class or value type with readable fields.
pub trait ObjectValue {
    /// Reads the field `field` declared by `owner`.
    ///
    /// # Errors
    /// Returns [`crate::Error::Target`] if the field cannot be read.
    fn field_value(&self, owner: &TypeDescriptor, field: Token) -> Result<ValueRef>;
}
