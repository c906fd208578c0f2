//! Gesture scenarios: a small diagram and the pointer events to replay on it.
//!
//! A scenario is a TOML document:
//!
//! ```toml
//! [[link]]
//! id = "flow"
//! points = [{ x = 0.0, y = 0.0 }, { x = 100.0, y = 0.0 }]
//!
//! [[label]]
//! id = "flow_label"
//! link = "flow"
//! index = 5
//! size = { width = 20.0, height = 10.0 }
//!
//! [[event]]
//! kind = "down"
//! at = { x = 50.0, y = 0.0 }
//! ```
//!
//! Events are `down`, `move`, `up`, `cancel`, `undo` and `redo`. They are
//! replayed in order through a [`ToolChain`] holding the label dragging tool.

use log::{debug, info, warn};
use serde::Deserialize;

use labelshift::{
    LabelDraggingTool, LabelShiftError, PointerButton, ToolChain,
    attachment::{LabelAttachment, SegmentIndex},
    config::ToolConfig,
    geometry::{Point, Size},
    identifier::Id,
    model::{LinkShape, MemoryDiagram},
};

/// A parsed scenario document.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
    #[serde(default, rename = "node")]
    nodes: Vec<NodeSpec>,

    #[serde(default, rename = "link")]
    links: Vec<LinkSpec>,

    #[serde(default, rename = "label")]
    labels: Vec<LabelSpec>,

    #[serde(default, rename = "child")]
    children: Vec<ChildSpec>,

    #[serde(default, rename = "event")]
    events: Vec<Event>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct NodeSpec {
    id: String,
    center: Point,
    size: Size,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct LinkSpec {
    id: String,
    points: Vec<Point>,
    /// Exposes the route as a continuous path to labels without an index.
    #[serde(default)]
    path: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct LabelSpec {
    id: String,
    link: String,
    #[serde(default)]
    index: Option<i32>,
    #[serde(default)]
    fraction: f32,
    #[serde(default)]
    offset: Point,
    size: Size,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct ChildSpec {
    id: String,
    parent: String,
    #[serde(default)]
    relative: Point,
    size: Size,
}

/// Pointer button named by a `down` event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Button {
    #[default]
    Primary,
    Secondary,
}

impl From<Button> for PointerButton {
    fn from(button: Button) -> Self {
        match button {
            Button::Primary => PointerButton::Primary,
            Button::Secondary => PointerButton::Secondary,
        }
    }
}

/// One replayed input event.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Event {
    Down {
        at: Point,
        #[serde(default)]
        button: Button,
    },
    Move {
        at: Point,
    },
    Up {
        at: Point,
    },
    Cancel,
    Undo,
    Redo,
}

impl Scenario {
    /// Parses a scenario from TOML source.
    ///
    /// # Errors
    ///
    /// Returns [`LabelShiftError::Scenario`] with the offending span when
    /// the document is malformed.
    pub fn parse(source: &str) -> Result<Self, LabelShiftError> {
        toml::from_str(source).map_err(|err| {
            LabelShiftError::new_scenario_error(err.message(), err.span(), source)
        })
    }

    /// Replayed events, in order
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Builds the diagram described by the scenario.
    ///
    /// Nodes and links are added first, then labels, then nested elements
    /// in document order, so a child may name any earlier element as its
    /// parent.
    ///
    /// # Errors
    ///
    /// Returns an error when an identifier is reused or refers to something
    /// missing.
    pub fn build_diagram(&self) -> Result<MemoryDiagram, LabelShiftError> {
        let mut diagram = MemoryDiagram::new();

        for node in &self.nodes {
            let id = Id::new(&node.id);
            diagram.add_node(id)?;
            diagram.add_fixed(id, id, node.center, node.size)?;
        }

        for link in &self.links {
            let mut shape = LinkShape::new(link.points.clone());
            if link.path {
                shape = shape.with_path();
            }
            diagram.add_link(Id::new(&link.id), shape)?;
        }

        for label in &self.labels {
            let attachment =
                LabelAttachment::new(SegmentIndex::from(label.index), label.fraction);
            diagram.add_label(
                Id::new(&label.id),
                Id::new(&label.link),
                attachment,
                label.offset,
                label.size,
            )?;
        }

        for child in &self.children {
            diagram.add_child(
                Id::new(&child.id),
                Id::new(&child.parent),
                child.relative,
                child.size,
            )?;
        }

        debug!(
            nodes = self.nodes.len(),
            links = self.links.len(),
            labels = self.labels.len(),
            children = self.children.len();
            "Scenario diagram built"
        );
        Ok(diagram)
    }

    /// Replays the scenario and returns the resulting diagram.
    ///
    /// A gesture still active after the last event is cancelled.
    ///
    /// # Errors
    ///
    /// Returns an error if the diagram cannot be built.
    pub fn replay(&self, config: &ToolConfig) -> Result<MemoryDiagram, LabelShiftError> {
        let mut diagram = self.build_diagram()?;
        let mut tools = ToolChain::new(config);
        tools.push(Box::new(LabelDraggingTool::new(config)));

        for (position, event) in self.events.iter().enumerate() {
            debug!(position, event:?; "Replaying event");
            match *event {
                Event::Down { at, button } => tools.pointer_down(button.into(), at, &mut diagram),
                Event::Move { at } => tools.pointer_move(at, &mut diagram),
                Event::Up { at } => tools.pointer_up(at, &mut diagram),
                Event::Cancel => tools.cancel(&mut diagram),
                Event::Undo => {
                    if !diagram.undo() {
                        warn!(position; "Nothing to undo");
                    }
                }
                Event::Redo => {
                    if !diagram.redo() {
                        warn!(position; "Nothing to redo");
                    }
                }
            }
        }

        if let Some(tool) = tools.active_tool_name() {
            info!(tool; "Cancelling gesture left open at end of scenario");
            tools.cancel(&mut diagram);
        }
        Ok(diagram)
    }
}
