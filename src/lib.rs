// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]
#![deny(unsafe_code)]

//! # dotvalue
//!
//! Decoding and marshalling of runtime values for debuggers attached to a .NET process.
//!
//! A debugger sees the values of its debuggee only as opaque handles: a reference here, a box
//! there, a buffer of raw bytes at the end of the chain. `dotvalue` turns those handles back
//! into what a developer expects to read in a watch window, and reduces them to tagged
//! payloads that can be shipped to a separate presentation layer.
//!
//! ## Features
//!
//! - **Indirection collapsing** - references and boxes are followed with a bounded loop
//! - **Exact decimals** - 96-bit `System.Decimal` magnitudes rendered without precision loss
//! - **Enums and flags** - constants matched by value, `[Flags]` enums decomposed into names
//! - **Arrays** - rank, extents and non-zero lower bounds (`{int[1..3, 4]}`)
//! - **Strings** - UTF-16 contents converted to UTF-8, with C-style escaping
//! - **Marshalling** - tagged payloads with explicit ownership for the receiving side
//!
//! ## Architecture
//!
//! The crate never talks to a debugging interface directly. It consumes three seams the
//! surrounding debugger implements:
//!
//! - [`value::CorValue`] - a value handle with a fixed set of optional facets
//! - [`metadata::provider::MetadataProvider`] - base types, fields and custom attributes
//! - [`metadata::provider::TypeNamer`] - display names of types
//!
//! On top of these, [`ValuePrinter`] offers the four entry points:
//!
//! - [`ValuePrinter::format_value`] - text of a live value
//! - [`ValuePrinter::marshal`] - tag and payload for the boundary
//! - [`format_marshalled`] - text of a payload that already crossed the boundary
//! - [`ValuePrinter::format_named_field`] - text of one field, searched along the base types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use dotvalue::prelude::*;
//!
//! let printer = ValuePrinter::new(&metadata, &namer);
//!
//! // Watch window
//! println!("{}", printer.format_value(&value, true)?);
//!
//! // Hand the value to the UI process
//! let marshalled = printer.marshal(&value, &HeapAllocator)?;
//! let (type_name, text) = printer.format_payload(&marshalled)?;
//! ```
//!
//! ## Error Handling
//!
//! All operations return [`Result<T, Error>`](Result). Decoders report failures to the caller
//! instead of guessing; the few places that degrade (array element names, function pointer
//! addresses, unhandled element types) are documented where they happen.
//!
//! ```rust
//! use dotvalue::{format_marshalled, Error, MarshalType};
//!
//! match format_marshalled(MarshalType::Decimal, &[0u8; 4]) {
//!     Ok((name, text)) => println!("{name}: {text}"),
//!     Err(Error::OutOfBounds) => println!("payload too short"),
//!     Err(e) => println!("Other error: {e}"),
//! }
//! ```
//!
//! ## Logging
//!
//! Diagnostics are emitted through [`tracing`]; the library never installs a subscriber.
//!
//! ## Development and Testing
//!
//! ```bash
//! cargo test
//! cargo bench
//! cargo +nightly fuzz run marshalled --release
//! ```

#[macro_use]
pub(crate) mod error;

/// Shared functionality which is used in unit-tests
#[cfg(test)]
pub(crate) mod test;

/// Convenient re-exports of the most commonly used types and traits.
///
/// # Example
///
/// ```rust
/// use dotvalue::prelude::*;
///
/// let (name, text) = format_marshalled(MarshalType::Boolean, &[1])?;
/// assert_eq!((name.as_str(), text.as_str()), ("bool", "true"));
/// # Ok::<(), dotvalue::Error>(())
/// ```
pub mod prelude;

/// Rendering options.
pub mod config;

/// Text rendering of live values and marshalled payloads.
///
/// # Key Types
///
/// - [`format::ValuePrinter`] - entry point for live values
/// - [`format::decimal::DecimalParts`] - the four words of a `System.Decimal`
///
/// # Main Functions
///
/// - [`format::format_marshalled`] - render a payload without metadata
/// - [`format::string::escape`] - C-style escaping of display strings
pub mod format;

/// Bounds-checked little-endian reads over raw value buffers.
pub mod io;

/// Tagged payloads for crossing the boundary to a presentation layer.
pub mod marshal;

/// Metadata tokens, element types, field attributes and the provider seams.
///
/// # Key Components
///
/// - [`metadata::element::ELEMENT_TYPE`] - element-type tags of values and signatures
/// - [`metadata::field::FieldInfo`] - declared fields, including enum constants
/// - [`metadata::provider::MetadataProvider`] - metadata queries against the debuggee
/// - [`metadata::provider::TypeNamer`] - display names of types
pub mod metadata;

/// Value handles and indirection collapsing.
///
/// # Key Types
///
/// - [`value::CorValue`] - a value handle and its facets
/// - [`value::ValueRef`] - a retained handle
///
/// # Main Functions
///
/// - [`value::resolve`] - follow references and boxes to the terminal value
/// - [`value::integral_value`] - read a value as a fixed-width integer
pub mod value;

/// `dotvalue` Result type
///
/// A type alias for `std::result::Result<T, Error>` where the error type is always [`Error`].
///
/// # Examples
///
/// ```rust
/// use dotvalue::{format_marshalled, MarshalType, Result};
///
/// fn render_int(raw: &[u8]) -> Result<String> {
///     let (_, text) = format_marshalled(MarshalType::Int32, raw)?;
///     Ok(text)
/// }
///
/// assert_eq!(render_int(&42i32.to_le_bytes()).unwrap(), "42");
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// `dotvalue` Error type
///
/// The main error type for all operations in this crate. See [`Error`] for the individual
/// categories.
pub use error::Error;

/// Rendering options of a [`ValuePrinter`]
pub use config::PrintOptions;

/// Entry points for text rendering
pub use format::{format_marshalled, format_marshalled_with, ValuePrinter};

/// Boundary payloads and their allocation
pub use marshal::{BoundaryAllocator, HeapAllocator, MarshalType, Marshalled, Payload};

/// Value handles
pub use value::{CorValue, ValueRef};
