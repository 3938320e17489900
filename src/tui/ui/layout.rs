//! Dynamic layout builder for flexible UI composition
//!
//! Sections can be shown or hidden per frame, e.g. the banner that only
//! appears while headings are inactive.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use std::collections::HashMap;

/// Section identifiers for layout areas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Title,
    Banner,
    Body,
    Status,
    Explorer,
    Editor,
}

/// A dynamic layout that maps section IDs to their rendered areas
pub struct DynamicLayout {
    areas: HashMap<Section, Rect>,
}

impl DynamicLayout {
    pub fn vertical(area: Rect) -> DynamicLayoutBuilder {
        DynamicLayoutBuilder::new(area, Direction::Vertical)
    }

    pub fn horizontal(area: Rect) -> DynamicLayoutBuilder {
        DynamicLayoutBuilder::new(area, Direction::Horizontal)
    }

    pub fn get(&self, id: Section) -> Option<Rect> {
        self.areas.get(&id).copied()
    }

    /// Area of a section, or an empty rect when it is hidden
    pub fn area(&self, id: Section) -> Rect {
        self.get(id).unwrap_or_default()
    }
}

pub struct DynamicLayoutBuilder {
    area: Rect,
    direction: Direction,
    sections: Vec<(Section, Constraint, bool)>,
}

impl DynamicLayoutBuilder {
    fn new(area: Rect, direction: Direction) -> Self {
        Self {
            area,
            direction,
            sections: Vec::new(),
        }
    }

    pub fn section(self, id: Section, constraint: Constraint) -> Self {
        self.section_if(true, id, constraint)
    }

    pub fn section_if(mut self, visible: bool, id: Section, constraint: Constraint) -> Self {
        self.sections.push((id, constraint, visible));
        self
    }

    pub fn build(self) -> DynamicLayout {
        let visible: Vec<_> = self.sections.iter().filter(|(_, _, v)| *v).collect();
        let chunks = Layout::default()
            .direction(self.direction)
            .constraints(visible.iter().map(|(_, c, _)| *c))
            .split(self.area);

        let areas = visible
            .iter()
            .zip(chunks.iter())
            .map(|((id, _, _), rect)| (*id, *rect))
            .collect();

        DynamicLayout { areas }
    }
}
