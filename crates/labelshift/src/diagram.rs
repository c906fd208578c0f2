//! Contracts a host diagram implements for the label dragging tool.
//!
//! The tool never owns diagram state. It reads geometry and hit-test results
//! and writes a label's segment offset through these traits:
//!
//! - [`Diagram`] - hit-testing, containment, label attachment and offsets
//! - [`LinkGeometry`] - the route of a link part
//! - [`TransactionCoordinator`] - named, atomic units of change
//! - [`ToolHost`] - everything a tool needs, implemented automatically

use crate::{
    attachment::LabelAttachment,
    geometry::{Angle, Point},
    identifier::Id,
    path::LinkPath,
};

/// The direct container of a visual element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Container {
    /// The element is a top-level child of this part.
    Part(Id),
    /// The element is nested inside another element.
    Element(Id),
}

/// Read access to the route of a link part.
pub trait LinkGeometry {
    /// Ordered route points in document coordinates
    fn points(&self) -> &[Point];

    /// Point halfway along the route
    fn mid_point(&self) -> Point;

    /// Route direction at [`LinkGeometry::mid_point`]
    fn mid_angle(&self) -> Angle;

    /// Continuous path of the link, when the host can sample one
    fn path(&self) -> Option<&dyn LinkPath>;
}

/// The visual tree of a diagram, as seen by the tool.
///
/// Elements and parts are addressed by [`Id`]. Queries about unknown
/// identifiers return `None`.
pub trait Diagram {
    /// Topmost element at a document point
    fn hit_test(&self, point: Point) -> Option<Id>;

    /// Part that owns `element`
    fn part_of(&self, element: Id) -> Option<Id>;

    /// Direct container of `element`
    fn container_of(&self, element: Id) -> Option<Container>;

    /// Link geometry of `part`, or `None` when the part is not a link
    fn link(&self, part: Id) -> Option<&dyn LinkGeometry>;

    /// Attachment of `element` to its link, when it is offset-positioned
    fn attachment(&self, element: Id) -> Option<LabelAttachment>;

    /// Stored segment offset of `element`
    fn segment_offset(&self, element: Id) -> Option<Point>;

    /// Replaces the stored segment offset of `element`
    fn set_segment_offset(&mut self, element: Id, offset: Point);

    /// Center of `element` in document coordinates
    fn document_center(&self, element: Id) -> Option<Point>;
}

/// Groups changes into named, atomic transactions for undo/redo.
pub trait TransactionCoordinator {
    /// Opens a transaction named `name`
    fn begin_transaction(&mut self, name: &str);

    /// Closes the open transaction, keeping its changes under `result`
    fn commit_transaction(&mut self, result: &str);

    /// Closes the open transaction, reverting its changes
    fn rollback_transaction(&mut self);
}

/// Everything a [`Tool`](crate::Tool) needs from its host.
pub trait ToolHost: Diagram + TransactionCoordinator {}

impl<T: Diagram + TransactionCoordinator + ?Sized> ToolHost for T {}
