//! In-memory diagram host.
//!
//! [`MemoryDiagram`] is a small, self-contained implementation of the
//! [`Diagram`] and [`TransactionCoordinator`] contracts. It is what the CLI
//! replays gestures against, and a reference for hosts embedding the tool.
//!
//! Parts and elements are kept in insertion order; an element added later is
//! drawn above earlier ones, and hit-testing returns the topmost match.

mod history;
mod link;

pub use history::{CommittedTransaction, History, OffsetChange};
pub use link::LinkShape;

use indexmap::IndexMap;
use log::{debug, info, warn};

use crate::{
    LabelShiftError,
    attachment::LabelAttachment,
    diagram::{Container, Diagram, LinkGeometry, TransactionCoordinator},
    geometry::{Point, Size},
    identifier::Id,
    offset::place_label,
};

/// A top-level diagram object.
#[derive(Debug, Clone, PartialEq)]
pub enum Part {
    Node,
    Link(LinkShape),
}

/// How an element's center is determined.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Placement {
    /// Fixed center in document coordinates.
    Fixed(Point),
    /// Label positioned along its link by a segment offset.
    Segment {
        attachment: LabelAttachment,
        offset: Point,
    },
    /// Center relative to the center of the containing element.
    Relative(Point),
}

/// A visual element of a part.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    part: Id,
    container: Container,
    placement: Placement,
    size: Size,
}

impl Element {
    /// Part owning this element
    pub fn part(&self) -> Id {
        self.part
    }

    /// Direct container of this element
    pub fn container(&self) -> Container {
        self.container
    }

    /// Placement of this element
    pub fn placement(&self) -> Placement {
        self.placement
    }

    /// Size of this element
    pub fn size(&self) -> Size {
        self.size
    }
}

/// An in-memory diagram with undo history.
#[derive(Debug, Clone, Default)]
pub struct MemoryDiagram {
    parts: IndexMap<Id, Part>,
    elements: IndexMap<Id, Element>,
    history: History,
}

impl MemoryDiagram {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a node part.
    ///
    /// # Errors
    ///
    /// Returns [`LabelShiftError::DuplicateId`] if the part already exists.
    pub fn add_node(&mut self, id: Id) -> Result<(), LabelShiftError> {
        self.insert_part(id, Part::Node)
    }

    /// Adds a link part with the given route.
    ///
    /// # Errors
    ///
    /// Returns [`LabelShiftError::DuplicateId`] if the part already exists.
    pub fn add_link(&mut self, id: Id, shape: LinkShape) -> Result<(), LabelShiftError> {
        self.insert_part(id, Part::Link(shape))
    }

    /// Adds a top-level element with a fixed document center to `part`.
    ///
    /// # Errors
    ///
    /// Returns an error if `id` is taken or `part` does not exist.
    pub fn add_fixed(
        &mut self,
        id: Id,
        part: Id,
        center: Point,
        size: Size,
    ) -> Result<(), LabelShiftError> {
        self.ensure_part(part)?;
        self.insert_element(
            id,
            Element {
                part,
                container: Container::Part(part),
                placement: Placement::Fixed(center),
                size,
            },
        )
    }

    /// Adds a label positioned along `link` by a segment offset.
    ///
    /// # Errors
    ///
    /// Returns an error if `id` is taken, `link` does not exist, or `link`
    /// is not a link.
    pub fn add_label(
        &mut self,
        id: Id,
        link: Id,
        attachment: LabelAttachment,
        offset: Point,
        size: Size,
    ) -> Result<(), LabelShiftError> {
        match self.parts.get(&link) {
            Some(Part::Link(_)) => {}
            Some(Part::Node) => return Err(LabelShiftError::NotALink(link.to_string())),
            None => return Err(LabelShiftError::UnknownPart(link.to_string())),
        }
        self.insert_element(
            id,
            Element {
                part: link,
                container: Container::Part(link),
                placement: Placement::Segment { attachment, offset },
                size,
            },
        )
    }

    /// Adds an element nested inside `parent`, centered at `relative` from
    /// the parent's center.
    ///
    /// # Errors
    ///
    /// Returns an error if `id` is taken or `parent` does not exist.
    pub fn add_child(
        &mut self,
        id: Id,
        parent: Id,
        relative: Point,
        size: Size,
    ) -> Result<(), LabelShiftError> {
        let Some(parent_element) = self.elements.get(&parent) else {
            return Err(LabelShiftError::UnknownElement(parent.to_string()));
        };
        if id == parent {
            return Err(LabelShiftError::InvalidNesting {
                element: id.to_string(),
                parent: parent.to_string(),
                reason: "an element cannot contain itself",
            });
        }
        let part = parent_element.part;
        self.insert_element(
            id,
            Element {
                part,
                container: Container::Element(parent),
                placement: Placement::Relative(relative),
                size,
            },
        )
    }

    /// Replaces the route of `link`. Labels on it follow on the next query.
    ///
    /// # Errors
    ///
    /// Returns an error if `link` does not exist or is not a link.
    pub fn set_link_points(&mut self, link: Id, points: Vec<Point>) -> Result<(), LabelShiftError> {
        match self.parts.get_mut(&link) {
            Some(Part::Link(shape)) => {
                shape.set_points(points);
                Ok(())
            }
            Some(Part::Node) => Err(LabelShiftError::NotALink(link.to_string())),
            None => Err(LabelShiftError::UnknownPart(link.to_string())),
        }
    }

    /// Returns the part with `id`
    pub fn part(&self, id: Id) -> Option<&Part> {
        self.parts.get(&id)
    }

    /// Returns the element with `id`
    pub fn element(&self, id: Id) -> Option<&Element> {
        self.elements.get(&id)
    }

    /// Segment-positioned labels and their offsets, in insertion order
    pub fn labels(&self) -> impl Iterator<Item = (Id, Point)> + '_ {
        self.elements
            .iter()
            .filter_map(|(id, element)| match element.placement {
                Placement::Segment { offset, .. } => Some((*id, offset)),
                _ => None,
            })
    }

    /// Undo/redo history
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Reverts the latest committed transaction. Returns `false` if there is
    /// nothing to undo.
    pub fn undo(&mut self) -> bool {
        let Some(changes) = self.history.undo() else {
            return false;
        };
        for change in changes {
            self.write_offset(change.element(), change.old());
        }
        info!("Undo");
        true
    }

    /// Reapplies the latest undone transaction. Returns `false` if there is
    /// nothing to redo.
    pub fn redo(&mut self) -> bool {
        let Some(changes) = self.history.redo() else {
            return false;
        };
        for change in changes {
            self.write_offset(change.element(), change.new_value());
        }
        info!("Redo");
        true
    }

    fn insert_part(&mut self, id: Id, part: Part) -> Result<(), LabelShiftError> {
        if self.parts.contains_key(&id) {
            return Err(LabelShiftError::DuplicateId(id.to_string()));
        }
        self.parts.insert(id, part);
        Ok(())
    }

    fn insert_element(&mut self, id: Id, element: Element) -> Result<(), LabelShiftError> {
        if self.elements.contains_key(&id) {
            return Err(LabelShiftError::DuplicateId(id.to_string()));
        }
        debug!(element:% = id, part:% = element.part; "Element added");
        self.elements.insert(id, element);
        Ok(())
    }

    fn ensure_part(&self, part: Id) -> Result<(), LabelShiftError> {
        if self.parts.contains_key(&part) {
            Ok(())
        } else {
            Err(LabelShiftError::UnknownPart(part.to_string()))
        }
    }

    fn write_offset(&mut self, element: Id, value: Point) -> Option<Point> {
        match self.elements.get_mut(&element) {
            Some(Element {
                placement: Placement::Segment { offset, .. },
                ..
            }) => Some(std::mem::replace(offset, value)),
            _ => None,
        }
    }
}

impl Diagram for MemoryDiagram {
    fn hit_test(&self, point: Point) -> Option<Id> {
        self.elements.iter().rev().find_map(|(id, element)| {
            let center = self.document_center(*id)?;
            center.to_bounds(element.size).contains(point).then_some(*id)
        })
    }

    fn part_of(&self, element: Id) -> Option<Id> {
        self.elements.get(&element).map(|element| element.part)
    }

    fn container_of(&self, element: Id) -> Option<Container> {
        self.elements.get(&element).map(|element| element.container)
    }

    fn link(&self, part: Id) -> Option<&dyn LinkGeometry> {
        match self.parts.get(&part)? {
            Part::Link(shape) => Some(shape),
            Part::Node => None,
        }
    }

    fn attachment(&self, element: Id) -> Option<LabelAttachment> {
        match self.elements.get(&element)?.placement {
            Placement::Segment { attachment, .. } => Some(attachment),
            _ => None,
        }
    }

    fn segment_offset(&self, element: Id) -> Option<Point> {
        match self.elements.get(&element)?.placement {
            Placement::Segment { offset, .. } => Some(offset),
            _ => None,
        }
    }

    fn set_segment_offset(&mut self, element: Id, offset: Point) {
        let Some(old) = self.write_offset(element, offset) else {
            warn!(element:%; "Ignoring offset for an element that is not a label");
            return;
        };
        if old != offset && !self.history.record(OffsetChange::new(element, old, offset)) {
            debug!(element:%; "Offset changed outside a transaction");
        }
    }

    fn document_center(&self, element: Id) -> Option<Point> {
        let mut current = self.elements.get(&element)?;
        let mut relative = Point::default();
        // Containers are inserted before their children, so this walk ends
        loop {
            match current.placement {
                Placement::Fixed(center) => return Some(center.add_point(relative)),
                Placement::Segment { attachment, offset } => {
                    let link = self.link(current.part)?;
                    let center = place_label(offset, attachment, link);
                    return Some(center.add_point(relative));
                }
                Placement::Relative(delta) => {
                    relative = relative.add_point(delta);
                    let Container::Element(parent) = current.container else {
                        return None;
                    };
                    current = self.elements.get(&parent)?;
                }
            }
        }
    }
}

impl TransactionCoordinator for MemoryDiagram {
    fn begin_transaction(&mut self, name: &str) {
        debug!(name; "Transaction started");
        self.history.begin(name);
    }

    fn commit_transaction(&mut self, result: &str) {
        if self.history.commit(result) {
            info!(result; "Transaction committed");
        }
    }

    fn rollback_transaction(&mut self) {
        let reverted = self.history.rollback();
        for change in &reverted {
            self.write_offset(change.element(), change.old());
        }
        info!(changes = reverted.len(); "Transaction rolled back");
    }
}
