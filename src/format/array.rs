//! Array summaries such as `{int[3, 4]}` or `{string[1..5][]}`.

use std::fmt::Write;

use tracing::{trace, warn};

use crate::{
    metadata::provider::TypeNamer,
    value::ArrayValue,
    Error, Result,
};

/// Renders the shape of an array: element type name, per-dimension extents, and the suffix of
/// nested (jagged) array element types.
///
/// Dimensions with a lower bound above zero render as `base..last`. If the element type cannot
/// be named, `unknown_element` is used in its place and no suffix is emitted.
///
/// # Errors
/// Returns [`Error::InvalidRank`] for arrays of rank zero, [`Error::Malformed`] if the
/// number of extents disagrees with the rank, or the error of a failed rank, dimension or
/// lower bound query.
pub fn format_array(
    array: &dyn ArrayValue,
    namer: &dyn TypeNamer,
    unknown_element: &str,
) -> Result<String> {
    let rank = array.rank()?;
    if rank < 1 {
        return Err(Error::InvalidRank(rank));
    }

    let count = array.count()?;
    let dimensions = array.dimensions()?;
    if dimensions.len() != rank as usize {
        return Err(malformed_error!(
            "array of rank {} reported {} dimensions",
            rank,
            dimensions.len()
        ));
    }

    let bases = if array.has_base_indices()? {
        array.base_indices()?
    } else {
        vec![0; dimensions.len()]
    };
    trace!(rank, count, "array");

    let (element, suffix) = match array
        .element_type_descriptor()
        .and_then(|element| namer.element_and_suffix(&element))
    {
        Ok(named) => named,
        Err(error) => {
            warn!(%error, "array element type has no name");
            (unknown_element.to_string(), String::new())
        }
    };

    let mut output = String::with_capacity(element.len() + suffix.len() + 8);
    output.push('{');
    output.push_str(&element);
    output.push('[');
    for (index, extent) in dimensions.iter().enumerate() {
        if index > 0 {
            output.push_str(", ");
        }

        let base = bases.get(index).copied().unwrap_or(0);
        // Writing into a String cannot fail
        let _ = if base > 0 {
            let last = i64::from(base) + i64::from(*extent) - 1;
            write!(output, "{base}..{last}")
        } else {
            write!(output, "{extent}")
        };
    }
    output.push(']');
    output.push_str(&suffix);
    output.push('}');

    Ok(output)
}
