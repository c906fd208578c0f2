//! Resolves the draggable link label under the pointer.

use log::debug;

use crate::{
    diagram::{Container, Diagram},
    identifier::Id,
    input::InputState,
};

/// Finds the link label under the pointer's current position.
///
/// The topmost hit element may be nested inside the label (its text, an
/// icon); the container chain is walked up to the element whose direct
/// container is the link part. Returns `None` when nothing is hit, when
/// the hit part is not a link, when the label sits on an arrowhead, or when
/// it is not positioned by a segment offset.
pub fn find_label<D: Diagram + ?Sized>(diagram: &D, input: &InputState) -> Option<Id> {
    let point = input.current_point();
    let hit = diagram.hit_test(point)?;
    let part = diagram.part_of(hit)?;
    if diagram.link(part).is_none() {
        debug!(element:% = hit, part:%; "Hit part is not a link");
        return None;
    }

    let label = top_level_element(diagram, hit, part)?;
    let Some(attachment) = diagram.attachment(label) else {
        debug!(element:% = label; "Element has no segment offset");
        return None;
    };
    if attachment.index().is_arrowhead() {
        debug!(element:% = label; "Ignoring arrowhead adornment");
        return None;
    }

    debug!(label:%; "Found link label");
    Some(label)
}

/// Walks up from `element` to the element directly contained by `part`.
fn top_level_element<D: Diagram + ?Sized>(diagram: &D, element: Id, part: Id) -> Option<Id> {
    let mut current = element;
    loop {
        match diagram.container_of(current)? {
            Container::Part(owner) if owner == part => return Some(current),
            Container::Part(_) => return None,
            Container::Element(parent) => current = parent,
        }
    }
}
