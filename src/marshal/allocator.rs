//! Allocation of payloads handed across the boundary.
//!
//! Whatever an allocator returns is owned by the receiver of the marshalled value from then on;
//! the marshaller keeps no reference to it.

use crate::{Error, Result};

/// Allocates receiver-owned strings and byte blocks.
pub trait BoundaryAllocator {
    /// Copies `text` into a new receiver-owned string.
    ///
    /// # Errors
    /// Returns [`Error::AllocationFailure`] if the memory cannot be provided.
    fn alloc_string(&self, text: &str) -> Result<String>;

    /// Copies `data` into a new receiver-owned byte block.
    ///
    /// # Errors
    /// Returns [`Error::AllocationFailure`] if the memory cannot be provided.
    fn alloc_bytes(&self, data: &[u8]) -> Result<Box<[u8]>>;
}

/// Allocates from the global heap, reporting exhaustion instead of aborting.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeapAllocator;

impl BoundaryAllocator for HeapAllocator {
    fn alloc_string(&self, text: &str) -> Result<String> {
        let mut copy = String::new();
        copy.try_reserve_exact(text.len())
            .map_err(|_| Error::AllocationFailure(text.len()))?;
        copy.push_str(text);
        Ok(copy)
    }

    fn alloc_bytes(&self, data: &[u8]) -> Result<Box<[u8]>> {
        let mut copy = Vec::new();
        copy.try_reserve_exact(data.len())
            .map_err(|_| Error::AllocationFailure(data.len()))?;
        copy.extend_from_slice(data);
        Ok(copy.into_boxed_slice())
    }
}
