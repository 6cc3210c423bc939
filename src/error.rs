use thiserror::Error;

macro_rules! malformed_error {
    // Single string version
    ($msg:expr) => {
        crate::Error::Malformed {
            message: $msg.to_string(),
            file: file!(),
            line: line!(),
        }
    };

    // Format string with arguments version
    ($fmt:expr, $($arg:tt)*) => {
        crate::Error::Malformed {
            message: format!($fmt, $($arg)*),
            file: file!(),
            line: line!(),
        }
    };
}

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// Every component reports failure to its immediate caller instead of guessing a value. The
/// only places that degrade instead of failing are documented on the respective functions
/// (array element-type names, function pointer addresses, unrecognized element types).
///
/// # Error Categories
///
/// ## Shape errors
/// - [`Error::UnsupportedShape`] - The element type or metadata shape is not handled
/// - [`Error::InvalidRank`] - An array reported a rank below one
/// - [`Error::TypeMismatch`] - A typed read was attempted against a value of another kind
/// - [`Error::NullValue`] - A non-null value was required
/// - [`Error::IndirectionLimit`] - A reference / box chain did not terminate in time
///
/// ## Metadata errors
/// - [`Error::MetadataUnavailable`] - A type, field or attribute lookup failed
/// - [`Error::FieldNotFound`] - The named field does not exist along the base-type chain
/// - [`Error::MalformedDecimal`] - Not all decimal backing fields could be located
///
/// ## Buffer and boundary errors
/// - [`Error::Malformed`] - A raw buffer is inconsistent
/// - [`Error::OutOfBounds`] - A raw buffer is too short for the requested read
/// - [`Error::AllocationFailure`] - The boundary allocator is exhausted
/// - [`Error::Target`] - A call into the debuggee failed
///
/// # Examples
///
/// ```rust
/// use dotvalue::{format_marshalled, Error, MarshalType};
///
/// match format_marshalled(MarshalType::Int32, &[0x01]) {
///     Err(Error::OutOfBounds) => println!("payload too short"),
///     Err(e) => eprintln!("other error: {e}"),
///     Ok((type_name, text)) => println!("{type_name} = {text}"),
/// }
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// The element type or metadata shape of a value is not handled.
    ///
    /// Raised for generic instantiations, marshalling of enums or bare `object` values, and for
    /// handles that lack a capability the operation depends on.
    #[error("Unsupported value shape - {0}")]
    UnsupportedShape(String),

    /// A metadata lookup against the target failed.
    ///
    /// Covers the enum storage field, base types, custom attributes and type names.
    #[error("Metadata unavailable - {0}")]
    MetadataUnavailable(String),

    /// The requested field was not found on the type or any of its base types.
    #[error("Field '{0}' not found")]
    FieldNotFound(String),

    /// The boundary allocator could not satisfy a request of the given size in bytes.
    #[error("Boundary allocation of {0} bytes failed")]
    AllocationFailure(usize),

    /// Not all backing fields of a `System.Decimal` could be located.
    ///
    /// The payload lists the missing fields.
    #[error("Malformed decimal, missing fields: {0}")]
    MalformedDecimal(String),

    /// An array reported a rank of zero.
    #[error("Invalid array rank - {0}")]
    InvalidRank(u32),

    /// The value is a null reference, but a non-null value was required.
    #[error("Value is null")]
    NullValue,

    /// The reference / boxing chain exceeded the configured maximum depth.
    #[error("Indirection chain exceeded {0} levels")]
    IndirectionLimit(usize),

    /// A typed read was requested against a value of a different size or element type.
    #[error("Type mismatch - expected {expected}, found {actual}")]
    TypeMismatch {
        /// Description of the expected type
        expected: &'static str,
        /// Description of the actual value
        actual: String,
    },

    /// A call into the debugging interface of the target failed.
    #[error("Target error - {0}")]
    Target(String),

    /// The raw data is damaged and could not be decoded.
    ///
    /// The error includes the source location where the malformation was detected.
    #[error("Malformed - {file}:{line}: {message}")]
    Malformed {
        /// The message to be printed for the Malformed error
        message: String,
        /// The source file in which this error occured
        file: &'static str,
        /// The source line in which this error occured
        line: u32,
    },

    /// An out of bound access was attempted while reading a raw value buffer.
    #[error("Out of Bound read would have occurred!")]
    OutOfBounds,
}
