//! Collapsing of reference and boxing chains.

use std::sync::Arc;

use tracing::trace;

use crate::{
    metadata::element::{mnemonic, ELEMENT_TYPE},
    value::ValueRef,
    Error, Result,
};

/// The terminal value of an indirection chain.
#[derive(Debug, Clone)]
pub struct Resolved {
    /// The terminal value, or the null reference itself if the chain ended in null
    pub value: ValueRef,
    /// `true` if the chain ended in a null reference
    pub is_null: bool,
}

/// Follows references and boxes from `value` until a value that is neither.
///
/// - A null reference stops the walk; the reference itself is returned with `is_null` set.
/// - A non-null reference is replaced by its target.
/// - A box is replaced by the value inside it.
/// - Non-null unmanaged pointers and function pointers are terminal; their address is the
///   value.
///
/// The returned handle is retained independently of `value`.
///
/// # Errors
/// Returns [`Error::IndirectionLimit`] if more than `max_depth` hops are needed, or any error
/// the debuggee reports while following the chain.
pub fn resolve(value: &ValueRef, max_depth: usize) -> Result<Resolved> {
    let mut current = Arc::clone(value);

    for hop in 0..=max_depth {
        if let Some(reference) = current.as_reference() {
            let element_type = current.element_type()?;
            trace!(hop, element_type = mnemonic(element_type), "reference");

            if reference.is_null()? {
                return Ok(Resolved {
                    value: current,
                    is_null: true,
                });
            }

            if matches!(element_type, ELEMENT_TYPE::PTR | ELEMENT_TYPE::FNPTR) {
                return Ok(Resolved {
                    value: current,
                    is_null: false,
                });
            }

            let target = reference.dereference()?;
            current = target;
            continue;
        }

        if let Some(boxed) = current.as_boxed() {
            trace!(hop, "box");

            let inner = boxed.object()?;
            current = inner;
            continue;
        }

        return Ok(Resolved {
            value: current,
            is_null: false,
        });
    }

    Err(Error::IndirectionLimit(max_depth))
}
