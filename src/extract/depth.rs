//! Depth tracking via a stack of open groups.

/// A `(` that has not been closed yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenGroup {
    /// Offset of the `(` itself, i.e. where the clade's text starts
    pub start: usize,
    /// Number of children seen so far (separators + 1)
    pub children: usize,
}

/// Stack of open groups; its length is the current nesting depth.
///
/// Replaces the call stack of a recursive descent parser, so arbitrarily
/// deep trees cannot exhaust it.
#[derive(Debug, Default)]
pub struct DepthStack {
    groups: Vec<OpenGroup>,
    max_depth: usize,
}

impl DepthStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a group whose `(` is at offset `start`.
    pub fn push(&mut self, start: usize) {
        self.groups.push(OpenGroup { start, children: 1 });
        self.max_depth = self.max_depth.max(self.groups.len());
    }

    /// Closes the innermost group.
    ///
    /// # Returns
    /// `None` if no group is open, which the caller has to treat as malformed input.
    pub fn pop(&mut self) -> Option<OpenGroup> {
        self.groups.pop()
    }

    /// Registers a `,` in the innermost group. A separator outside of any group
    /// (a forest at top level) is not counted.
    pub fn count_sibling(&mut self) {
        if let Some(group) = self.groups.last_mut() {
            group.children += 1;
        }
    }

    /// Current nesting depth.
    pub fn depth(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Deepest nesting seen so far.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_pop() {
        let mut stack = DepthStack::new();
        assert_eq!(stack.depth(), 0);
        stack.push(0);
        stack.push(1);
        stack.count_sibling();
        stack.count_sibling();
        assert_eq!(stack.depth(), 2);

        let inner = stack.pop().unwrap();
        assert_eq!(inner, OpenGroup { start: 1, children: 3 });
        let outer = stack.pop().unwrap();
        assert_eq!(outer, OpenGroup { start: 0, children: 1 });

        assert!(stack.is_empty());
        assert_eq!(stack.pop(), None);
        assert_eq!(stack.max_depth(), 2);
    }

    #[test]
    fn test_sibling_outside_group() {
        let mut stack = DepthStack::new();
        stack.count_sibling();
        assert!(stack.is_empty());
    }
}
