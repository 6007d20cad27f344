//! Tab id namespace allocation.

/// Allocates a fresh id namespace per decorated tab list.
///
/// Each call to [`next_prefix`](Self::next_prefix) yields `{base}-1`,
/// `{base}-2`, ... so that tab and panel ids of several tab lists on one
/// page never collide. The allocator belongs to whoever decorates the page;
/// one allocator must be shared by every tab list of a document.
#[derive(Debug, Clone)]
pub struct TabsIdAllocator {
    base: String,
    allocated: usize,
}

impl TabsIdAllocator {
    /// Create an allocator for prefixes of the form `{base}-{n}`.
    #[must_use]
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            allocated: 0,
        }
    }

    /// Allocate the next prefix.
    pub fn next_prefix(&mut self) -> String {
        self.allocated += 1;
        format!("{}-{}", self.base, self.allocated)
    }

    /// Number of prefixes handed out so far.
    pub fn allocated(&self) -> usize {
        self.allocated
    }
}

impl Default for TabsIdAllocator {
    fn default() -> Self {
        Self::new("tabs")
    }
}
