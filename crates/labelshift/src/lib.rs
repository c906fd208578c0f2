//! Labelshift - drag link labels while keeping them anchored to their link.
//!
//! A label on a diagram link stores its position as a *segment offset*: a
//! vector relative to an anchor point on the link, expressed in the link's
//! local rotated frame. This crate provides the pointer tool that lets a user
//! drag such a label, converting each pointer position back into that
//! anchor-relative, rotated offset.
//!
//! # Overview
//!
//! - [`LabelDraggingTool`] - the gesture state machine, pluggable into a [`ToolChain`]
//! - [`locator::find_label`] - resolves the draggable label under the pointer
//! - [`offset::compute_offset`] - maps a pointer position to a segment offset
//! - [`diagram`] - the contracts a host diagram implements
//! - [`model::MemoryDiagram`] - an in-memory host with undo history
//!
//! # Example
//!
//! ```
//! use labelshift::{
//!     LabelDraggingTool, PointerButton, ToolChain,
//!     attachment::{LabelAttachment, SegmentIndex},
//!     config::ToolConfig,
//!     diagram::Diagram,
//!     geometry::{Point, Size},
//!     identifier::Id,
//!     model::{LinkShape, MemoryDiagram},
//! };
//!
//! let mut diagram = MemoryDiagram::new();
//! let link = Id::new("doc_link");
//! let label = Id::new("doc_label");
//! diagram
//!     .add_link(link, LinkShape::new(vec![Point::new(0.0, 0.0), Point::new(100.0, 0.0)]))
//!     .unwrap();
//! diagram
//!     .add_label(
//!         label,
//!         link,
//!         LabelAttachment::new(SegmentIndex::At(5), 0.5),
//!         Point::default(),
//!         Size::new(20.0, 10.0),
//!     )
//!     .unwrap();
//!
//! let config = ToolConfig::default();
//! let mut tools = ToolChain::new(&config);
//! tools.push(Box::new(LabelDraggingTool::new(&config)));
//!
//! tools.pointer_down(PointerButton::Primary, Point::new(50.0, 0.0), &mut diagram);
//! tools.pointer_move(Point::new(53.0, 1.0), &mut diagram);
//! tools.pointer_move(Point::new(60.0, 10.0), &mut diagram);
//! tools.pointer_up(Point::new(60.0, 10.0), &mut diagram);
//!
//! assert_eq!(diagram.segment_offset(label), Some(Point::new(10.0, 10.0)));
//! ```

pub mod config;
pub mod diagram;
pub mod locator;
pub mod model;
pub mod offset;

mod dragging;
mod error;
mod input;
mod tool;

pub use labelshift_core::{attachment, geometry, identifier, path};

pub use dragging::{DragSession, LabelDraggingTool};
pub use error::LabelShiftError;
pub use input::{InputState, PointerButton};
pub use tool::{Tool, ToolChain, ToolContext, ToolFlow};
