//! Offset report written after a scenario replay.

use serde::Serialize;

use labelshift::{
    LabelShiftError,
    diagram::Diagram,
    geometry::{Point, Size},
    model::MemoryDiagram,
};

/// Final state of every label after a replay.
#[derive(Debug, Serialize)]
pub struct OffsetReport {
    /// Committed gestures left on the undo stack
    undo_steps: usize,

    #[serde(rename = "label")]
    labels: Vec<LabelEntry>,
}

#[derive(Debug, Serialize)]
struct LabelEntry {
    id: String,
    /// Link the label is attached to
    #[serde(skip_serializing_if = "Option::is_none")]
    link: Option<String>,
    offset: Point,
    #[serde(skip_serializing_if = "Option::is_none")]
    size: Option<Size>,
    #[serde(skip_serializing_if = "Option::is_none")]
    center: Option<Point>,
}

impl OffsetReport {
    /// Collects the offsets of all labels in `diagram`, in insertion order
    pub fn from_diagram(diagram: &MemoryDiagram) -> Self {
        let labels = diagram
            .labels()
            .map(|(id, offset)| {
                let element = diagram.element(id);
                LabelEntry {
                    id: id.to_string(),
                    link: element.map(|element| element.part().to_string()),
                    offset,
                    size: element.map(|element| element.size()),
                    center: diagram.document_center(id),
                }
            })
            .collect();
        Self {
            undo_steps: diagram.history().committed().len(),
            labels,
        }
    }

    /// Number of labels in the report
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Renders the report as TOML.
    ///
    /// # Errors
    ///
    /// Returns [`LabelShiftError::Report`] if the report cannot be
    /// serialized as TOML.
    pub fn to_toml(&self) -> Result<String, LabelShiftError> {
        toml::to_string(self).map_err(|err| LabelShiftError::Report(err.to_string()))
    }
}
