// SPDX-License-Identifier: (MIT OR Apache-2.0)

use zo_ast::Span;

/// A comment with its source position.
#[derive(Debug, Clone)]
pub struct Comment {
    pub span: Span,
    pub text: String,
}

/// Comments in source order, consumed front to back as the printer walks
/// the tree.
pub struct CommentList {
    comments: Vec<Comment>,
    cursor: usize,
}

impl CommentList {
    pub fn new(comments: Vec<Comment>) -> Self {
        Self { comments, cursor: 0 }
    }

    /// Build the list from the comment spans the scanner recorded.
    pub fn from_spans(source: &str, spans: &[Span]) -> Self {
        let comments = spans
            .iter()
            .filter_map(|span| {
                let text = span.slice(source)?.trim_end();
                Some(Comment { span: *span, text: text.to_string() })
            })
            .collect();
        Self::new(comments)
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Take all comments that start before `pos`.
    pub fn take_before(&mut self, pos: usize) -> Vec<Comment> {
        let mut result = Vec::new();
        while self.cursor < self.comments.len() && self.comments[self.cursor].span.start < pos {
            result.push(self.comments[self.cursor].clone());
            self.cursor += 1;
        }
        result
    }

    /// True if an unconsumed comment starts inside `span`.
    pub fn any_within(&self, span: Span) -> bool {
        self.comments[self.cursor..]
            .iter()
            .any(|c| c.span.start >= span.start && c.span.start < span.end)
    }

    /// Peek at the next comment without advancing.
    pub fn peek_next(&self) -> Option<&Comment> {
        self.comments.get(self.cursor)
    }

    /// Advance cursor by one (consume the peeked comment).
    pub fn advance(&mut self) -> Option<Comment> {
        let c = self.comments.get(self.cursor).cloned();
        if c.is_some() {
            self.cursor += 1;
        }
        c
    }

    /// Drain any remaining comments.
    pub fn take_rest(&mut self) -> Vec<Comment> {
        let rest = self.comments[self.cursor..].to_vec();
        self.cursor = self.comments.len();
        rest
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_walks_in_order() {
        let src = "-- a\nx -* b *- y\n-- c";
        let spans = [Span::new(0, 4), Span::new(7, 14), Span::new(17, 21)];
        let mut list = CommentList::from_spans(src, &spans);

        assert!(list.any_within(Span::new(5, 16)));
        let first = list.take_before(5);
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].text, "-- a");
        assert_eq!(list.peek_next().map(|c| c.text.as_str()), Some("-* b *-"));
        assert!(list.advance().is_some());
        assert!(!list.any_within(Span::new(5, 16)));
        let rest = list.take_rest();
        assert_eq!(rest.len(), 1);
        assert_eq!(rest[0].text, "-- c");
        assert!(list.advance().is_none());
    }
}
