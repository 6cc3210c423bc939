//! Custom attributes applied to a type, as far as value decoding cares about them.

use crate::metadata::token::Token;

/// Fully qualified constructor of `System.FlagsAttribute`, the marker that switches enum
/// decoding from exact matching to bitmask decomposition.
pub const FLAGS_ATTRIBUTE_CTOR: &str = "System.FlagsAttribute..ctor";

/// A custom attribute attached to a type.
///
/// Only the attribute's constructor is resolved; the attribute blob is never needed to decide
/// how a value is rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomAttributeInfo {
    /// `CustomAttribute` token
    pub token: Token,
    /// Display name of the attribute's constructor, e.g. `System.FlagsAttribute..ctor`
    pub constructor: String,
}

impl CustomAttributeInfo {
    /// Create a new attribute description
    #[must_use]
    pub fn new(token: Token, constructor: &str) -> Self {
        CustomAttributeInfo {
            token,
            constructor: constructor.to_string(),
        }
    }

    /// Returns `true` if this attribute marks an enum as a set of bit flags
    #[must_use]
    pub fn is_flags_marker(&self) -> bool {
        self.constructor == FLAGS_ATTRIBUTE_CTOR
    }
}

/// Returns `true` if any attribute in `attributes` is the flags marker.
#[must_use]
pub fn has_flags_marker(attributes: &[CustomAttributeInfo]) -> bool {
    attributes.iter().any(CustomAttributeInfo::is_flags_marker)
}
