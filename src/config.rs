//! Rendering options shared by all formatting entry points.

/// Limits and presentation settings for value rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrintOptions {
    /// Maximum number of reference / box hops followed before giving up.
    pub max_indirection_depth: usize,
    /// Significant digits for `float` values.
    pub float32_digits: usize,
    /// Significant digits for `double` values.
    pub float64_digits: usize,
    /// Element type name used when an array's element type cannot be named.
    pub unknown_element_type: String,
    /// Separator between the names of a decomposed flags enum.
    pub flags_separator: String,
}

impl Default for PrintOptions {
    fn default() -> Self {
        Self {
            max_indirection_depth: 64,
            float32_digits: 8,
            float64_digits: 16,
            unknown_element_type: String::new(),
            flags_separator: " | ".to_string(),
        }
    }
}
