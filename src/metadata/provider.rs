//! Metadata capabilities consumed by the value decoders.
//!
//! The debugger owns the actual metadata import (module metadata of the debuggee, loaded and
//! resolved elsewhere). This module only defines the narrow surface the decoders need:
//!
//! - [`MetadataProvider`] - base types, declared fields and custom attributes of a type
//! - [`TypeNamer`] - canonical display names of types
//!
//! Both are queried synchronously from the thread that controls the debuggee.

use crate::{
    metadata::{attributes::CustomAttributeInfo, field::FieldInfo, token::Token},
    Result,
};

/// Display name of the root of all enum types.
pub const SYSTEM_ENUM: &str = "System.Enum";
/// Display name of the root of all reference types.
pub const SYSTEM_OBJECT: &str = "System.Object";
/// Display name of the root of all value types.
pub const SYSTEM_VALUETYPE: &str = "System.ValueType";
/// Display name the type namer produces for `System.Decimal`.
pub const DECIMAL: &str = "decimal";

/// Identifies a declared type within a module of the debuggee.
///
/// Primitive types carry a nil token and are identified by their element type alone. Array
/// and pointer descriptors carry their element's descriptor, so jagged arrays nest.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeDescriptor {
    /// Debugger-assigned identity of the module declaring the type
    pub module: u64,
    /// `TypeDef` token inside that module (nil for primitives and constructed types)
    pub token: Token,
    /// Element type of instances of this type
    pub element_type: u8,
    /// Element type descriptor for arrays and pointers
    pub element: Option<Box<TypeDescriptor>>,
    /// Number of dimensions for arrays, 0 otherwise
    pub rank: u32,
}

impl TypeDescriptor {
    /// Create a descriptor for a type declared in `module`
    #[must_use]
    pub fn new(module: u64, token: Token, element_type: u8) -> Self {
        TypeDescriptor {
            module,
            token,
            element_type,
            element: None,
            rank: 0,
        }
    }

    /// Create a descriptor for a primitive (`int`, `bool`, `string`, ...)
    #[must_use]
    pub fn primitive(element_type: u8) -> Self {
        TypeDescriptor::new(0, Token::default(), element_type)
    }

    /// Create an array descriptor of `rank` dimensions over `element`
    #[must_use]
    pub fn array_of(element: TypeDescriptor, element_type: u8, rank: u32) -> Self {
        TypeDescriptor {
            module: element.module,
            token: Token::default(),
            element_type,
            element: Some(Box::new(element)),
            rank,
        }
    }
}

/// Metadata queries against the modules of the debuggee.
///
/// Field and attribute enumeration return finite sequences in metadata declaration order;
/// callers may enumerate the same type again and observe the same order.
pub trait MetadataProvider {
    /// Returns the base type of `ty`, or `None` for the root of the hierarchy.
    ///
    /// # Errors
    /// Returns [`crate::Error::MetadataUnavailable`] if the type cannot be resolved.
    fn base_type(&self, ty: &TypeDescriptor) -> Result<Option<TypeDescriptor>>;

    /// Returns all fields declared by `ty` (not inherited ones).
    ///
    /// # Errors
    /// Returns [`crate::Error::MetadataUnavailable`] if the fields cannot be enumerated.
    fn fields(&self, ty: &TypeDescriptor) -> Result<Vec<FieldInfo>>;

    /// Returns the fields declared by `ty` with exactly the given name.
    ///
    /// # Errors
    /// Returns [`crate::Error::MetadataUnavailable`] if the fields cannot be enumerated.
    fn fields_named(&self, ty: &TypeDescriptor, name: &str) -> Result<Vec<FieldInfo>> {
        Ok(self
            .fields(ty)?
            .into_iter()
            .filter(|field| field.name == name)
            .collect())
    }

    /// Returns the custom attributes applied to `ty`.
    ///
    /// # Errors
    /// Returns [`crate::Error::MetadataUnavailable`] if the attributes cannot be enumerated.
    fn custom_attributes(&self, ty: &TypeDescriptor) -> Result<Vec<CustomAttributeInfo>>;
}

/// Renders types to their canonical display names.
pub trait TypeNamer {
    /// Returns the display name of `ty` (`int`, `decimal`, `System.Enum`, `MyApp.Point`, ...).
    ///
    /// # Errors
    /// Returns [`crate::Error::MetadataUnavailable`] if the name cannot be produced.
    fn type_name(&self, ty: &TypeDescriptor) -> Result<String>;

    /// Splits the display name of an array element type into the innermost element name and
    /// the array suffix contributed by nested array types.
    ///
    /// For the element type of `int[][]` (which is `int[]`) this yields `("int", "[]")`, so the
    /// outer array can render as `int[5][]`.
    ///
    /// # Errors
    /// Returns [`crate::Error::MetadataUnavailable`] if the name cannot be produced.
    fn element_and_suffix(&self, element: &TypeDescriptor) -> Result<(String, String)> {
        let mut innermost = element;
        let mut suffix = String::new();
        while let (Some(inner), true) = (&innermost.element, innermost.rank > 0) {
            suffix.push('[');
            for _ in 1..innermost.rank {
                suffix.push(',');
            }
            suffix.push(']');
            innermost = &**inner;
        }

        Ok((self.type_name(innermost)?, suffix))
    }
}
