//! Found spans and the merge engine fusing sibling spans into clades.
//!
//! Spans are stored arena-like in a [LiveSpans] collection and referred to
//! by index. Instead of parent/child pointers each span carries the depth
//! at which it currently sits; promoting spans one level whenever an
//! enclosing group closes keeps siblings detectable by depth equality.

use crate::newick::TokenSpan;
use crate::parser::byte_parser::ByteParser;
use crate::parser::byte_source::ByteSource;
use tracing::debug;

// =#========================================================================#=
// FOUND SPAN
// =#========================================================================$=
/// Where the text of a [FoundSpan] lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpanOrigin {
    /// Bytes `start..start + len` of the scanned buffer
    Slice { start: usize, len: usize },
    /// Text assembled by a fusion
    Synthesized(Vec<u8>),
}

/// A syntactically complete Newick subtree found during the scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoundSpan {
    pub origin: SpanOrigin,
    /// Number of groups still enclosing the span
    pub depth: usize,
}

impl FoundSpan {
    /// Span over the buffer bytes `start..end`.
    pub fn slice(start: usize, end: usize, depth: usize) -> Self {
        Self {
            origin: SpanOrigin::Slice {
                start,
                len: end - start,
            },
            depth,
        }
    }

    /// Span over a single token.
    pub fn token(token: TokenSpan, depth: usize) -> Self {
        Self::slice(token.start, token.end, depth)
    }

    /// The Newick text of the span (without `;`).
    pub fn text<'a, S: ByteSource>(&'a self, parser: &'a ByteParser<S>) -> &'a [u8] {
        match &self.origin {
            SpanOrigin::Slice { start, len } => parser.slice(*start, start + len),
            SpanOrigin::Synthesized(text) => text,
        }
    }

    fn text_len(&self) -> usize {
        match &self.origin {
            SpanOrigin::Slice { len, .. } => *len,
            SpanOrigin::Synthesized(text) => text.len(),
        }
    }
}

// =#========================================================================#=
// LIVE SPANS
// =#========================================================================$=
/// Collection of the spans not yet consumed by a fusion, in left-to-right
/// order of their text in the buffer.
#[derive(Debug, Default)]
pub struct LiveSpans {
    spans: Vec<FoundSpan>,
}

impl LiveSpans {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.spans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FoundSpan> {
        self.spans.iter()
    }

    pub fn get(&self, index: usize) -> Option<&FoundSpan> {
        self.spans.get(index)
    }

    /// Adds a span right of all live spans.
    pub fn push(&mut self, span: FoundSpan) {
        self.spans.push(span);
    }

    /// Moves every span at `parent_depth + 1` up to `parent_depth`; called
    /// after the group owning those spans closed.
    ///
    /// # Returns
    /// Indices of the promoted spans, ascending.
    pub fn promote(&mut self, parent_depth: usize) -> Vec<usize> {
        let mut promoted = Vec::new();
        for (index, span) in self.spans.iter_mut().enumerate() {
            if span.depth == parent_depth + 1 {
                span.depth = parent_depth;
                promoted.push(index);
            }
        }
        promoted
    }

    /// Replaces the spans at `indices` (ascending) by `span`, which takes
    /// the place of the leftmost one. With no indices, `span` is appended.
    pub fn replace(&mut self, indices: &[usize], span: FoundSpan) {
        let Some((&first, rest)) = indices.split_first() else {
            self.spans.push(span);
            return;
        };
        self.spans[first] = span;
        for &index in rest.iter().rev() {
            self.spans.remove(index);
        }
    }

    /// Fuses the spans at `children` (ascending) into
    /// `(child,child,...)label` at `depth`, replacing them.
    pub fn fuse<S: ByteSource>(
        &mut self,
        children: &[usize],
        label: TokenSpan,
        depth: usize,
        parser: &ByteParser<S>,
    ) {
        let capacity = children
            .iter()
            .map(|&i| self.spans[i].text_len() + 1)
            .sum::<usize>()
            + label.len()
            + 2;
        let mut text = Vec::with_capacity(capacity);

        text.push(b'(');
        for (n, &index) in children.iter().enumerate() {
            if n > 0 {
                text.push(b',');
            }
            text.extend_from_slice(self.spans[index].text(parser));
        }
        text.push(b')');
        text.extend_from_slice(label.text(parser));

        debug!(depth, children = children.len(), "fused sibling spans");
        self.replace(
            children,
            FoundSpan {
                origin: SpanOrigin::Synthesized(text),
                depth,
            },
        );
    }
}
