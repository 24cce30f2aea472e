use log::{debug, trace, warn};

use crate::types::{Block, Line, Row};

use super::stack::{Marker, StackItem};
use super::ParserState;

impl ParserState {
    /// Runs at every end of line and at end of file.
    pub(super) fn end_line(&mut self) {
        let group = self.stack.pop_to(Marker::LineBegin).unwrap_or_default();
        if !group.is_empty() {
            self.push_line_group(group);
            return;
        }

        // Blank line: splits verses, but never a chorus.
        if self.stack.contains(Marker::ChorusBegin) {
            trace!("blank line inside chorus");
            return;
        }
        self.close_verse();
        self.stack.push_marker(Marker::VerseBegin);
    }

    /// Groups the current line without treating an empty line as blank.
    pub(super) fn close_line_group(&mut self) {
        if let Some(group) = self.stack.pop_to(Marker::LineBegin) {
            if !group.is_empty() {
                self.push_line_group(group);
            }
        }
    }

    fn push_line_group(&mut self, group: Vec<StackItem>) {
        if group
            .iter()
            .all(|item| matches!(item, StackItem::Comment(_)))
        {
            for item in group {
                self.stack.push(item);
            }
            return;
        }

        let mut cells = Vec::new();
        for item in group {
            match item {
                StackItem::Cell(cell) => cells.push(cell),
                other => {
                    if !cells.is_empty() {
                        self.stack
                            .push(StackItem::Row(Row::new(std::mem::take(&mut cells))));
                    }
                    self.stack.push(other);
                }
            }
        }
        if !cells.is_empty() {
            self.stack.push(StackItem::Row(Row::new(cells)));
        }
    }

    /// Moves the open verse into the body. Without a verse marker, whatever
    /// content sits on top of the stack is flushed instead.
    pub(super) fn close_verse(&mut self) {
        match self.stack.pop_to(Marker::VerseBegin) {
            Some(content) => {
                let lines = into_lines(content);
                if !lines.is_empty() {
                    debug!("verse with {} lines", lines.len());
                    self.body.push(Block::Verse { lines });
                }
            }
            None => self.flush_orphans(),
        }
    }

    fn flush_orphans(&mut self) {
        let orphans = self.stack.drain_elements();
        if orphans.is_empty() {
            return;
        }

        let has_row = orphans
            .iter()
            .any(|item| matches!(item, StackItem::Row(_) | StackItem::Cell(_)));
        if has_row {
            let lines = into_lines(orphans);
            debug!("leading verse with {} lines", lines.len());
            self.body.push(Block::Verse { lines });
            return;
        }

        for item in orphans {
            if let StackItem::Comment(comment) = item {
                self.body.push(Block::Comment(comment));
            }
        }
    }

    pub(super) fn push_chorus(&mut self, content: Vec<StackItem>) {
        let lines = into_lines(content);
        debug!("chorus with {} lines", lines.len());
        self.body.push(Block::Chorus { lines });
    }
}

fn into_lines(items: Vec<StackItem>) -> Vec<Line> {
    let mut lines = Vec::with_capacity(items.len());
    for item in items {
        match item {
            StackItem::Row(row) => lines.push(Line::Row(row)),
            StackItem::Comment(comment) => lines.push(Line::Comment(comment)),
            StackItem::Cell(cell) => lines.push(Line::Row(Row::new(vec![cell]))),
            StackItem::Marker(marker) => warn!("dropping stray {:?} marker", marker),
        }
    }
    lines
}
