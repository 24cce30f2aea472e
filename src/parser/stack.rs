use crate::types::{ChordedLyric, Comment, Row};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Marker {
    LineBegin,
    VerseBegin,
    ChorusBegin,
}

/// Work-in-progress content between the metadata and the finished body.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum StackItem {
    Marker(Marker),
    Cell(ChordedLyric),
    Comment(Comment),
    Row(Row),
}

impl StackItem {
    fn is_marker(&self, marker: Marker) -> bool {
        matches!(self, StackItem::Marker(m) if *m == marker)
    }
}

#[derive(Debug, Default)]
pub(crate) struct Stack {
    items: Vec<StackItem>,
}

impl Stack {
    pub fn push(&mut self, item: StackItem) {
        self.items.push(item);
    }

    pub fn push_marker(&mut self, marker: Marker) {
        self.items.push(StackItem::Marker(marker));
    }

    pub fn contains(&self, marker: Marker) -> bool {
        self.items.iter().any(|item| item.is_marker(marker))
    }

    /// Removes everything above the nearest `marker`, and the marker itself.
    ///
    /// Returns `None` and leaves the stack as it was when the marker is absent.
    pub fn pop_to(&mut self, marker: Marker) -> Option<Vec<StackItem>> {
        let pos = self.items.iter().rposition(|item| item.is_marker(marker))?;
        let above = self.items.split_off(pos + 1);
        self.items.pop();
        Some(above)
    }

    /// Removes the run of non-marker items at the top, in bottom-to-top order.
    pub fn drain_elements(&mut self) -> Vec<StackItem> {
        let start = self
            .items
            .iter()
            .rposition(|item| matches!(item, StackItem::Marker(_)))
            .map_or(0, |pos| pos + 1);
        self.items.split_off(start)
    }

    pub fn top_cell_mut(&mut self) -> Option<&mut ChordedLyric> {
        match self.items.last_mut() {
            Some(StackItem::Cell(cell)) => Some(cell),
            _ => None,
        }
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.items.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CommentStyle;

    fn cell(chord: &str) -> StackItem {
        StackItem::Cell(ChordedLyric::new(chord, ""))
    }

    #[test]
    fn test_pop_to_nearest_marker() {
        let mut stack = Stack::default();
        stack.push_marker(Marker::LineBegin);
        stack.push(cell("C"));
        stack.push_marker(Marker::LineBegin);
        stack.push(cell("D"));
        stack.push(cell("E"));

        assert_eq!(
            stack.pop_to(Marker::LineBegin),
            Some(vec![cell("D"), cell("E")])
        );
        assert_eq!(stack.len(), 2);
    }

    #[test]
    fn test_pop_to_missing_marker_keeps_stack() {
        let mut stack = Stack::default();
        stack.push(cell("C"));
        stack.push_marker(Marker::ChorusBegin);
        stack.push(cell("D"));

        assert_eq!(stack.pop_to(Marker::VerseBegin), None);
        assert_eq!(stack.len(), 3);
        assert!(stack.contains(Marker::ChorusBegin));
    }

    #[test]
    fn test_drain_stops_at_marker() {
        let mut stack = Stack::default();
        stack.push(cell("A"));
        stack.push_marker(Marker::VerseBegin);
        stack.push(cell("B"));
        stack.push(StackItem::Comment(Comment::new("x", CommentStyle::Source)));

        let drained = stack.drain_elements();
        assert_eq!(drained.len(), 2);
        assert_eq!(drained[0], cell("B"));
        assert_eq!(stack.len(), 2);
    }

    #[test]
    fn test_top_cell() {
        let mut stack = Stack::default();
        assert!(stack.top_cell_mut().is_none());
        stack.push(cell("G"));
        if let Some(top) = stack.top_cell_mut() {
            top.lyric.push_str("la");
        }
        assert_eq!(stack.pop_to(Marker::LineBegin), None);
        assert_eq!(
            stack.drain_elements(),
            vec![StackItem::Cell(ChordedLyric::new("G", "la"))]
        );
    }
}
