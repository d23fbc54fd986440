/// Hands out unique, strictly increasing node identifiers.
///
/// Identifiers are never reused. The allocator uses interior mutability so
/// several scenes can share one through `Rc` and still draw ids from a single
/// sequence.
///
/// # Example
///
/// ```ignore
/// let ids = IdAllocator::new();
/// let a = ids.next();  // NodeId(0)
/// let b = ids.next();  // NodeId(1)
/// ```

use std::cell::Cell;
use std::fmt;

/// Unique identifier of a scene node
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(u64);

impl NodeId {
    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

pub struct IdAllocator {
    next_id: Cell<u64>,
}

impl IdAllocator {
    /// Create an allocator starting at 0
    pub fn new() -> Self {
        Self { next_id: Cell::new(0) }
    }

    /// Allocate the next identifier
    pub fn next(&self) -> NodeId {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        NodeId(id)
    }

    /// Number of identifiers handed out so far
    pub fn allocated(&self) -> u64 {
        self.next_id.get()
    }
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "id_allocator_tests.rs"]
mod tests;
