//! Conversion between pointer positions and segment offsets.
//!
//! A label's segment offset is stored relative to an *anchor* on its link and
//! rotated into the anchor's local frame, so the label keeps its relative
//! position when the link moves or turns. The anchor is chosen by the
//! label's [`LabelAttachment`]:
//!
//! | Segment index                  | Mode                         | Anchor                         |
//! |--------------------------------|------------------------------|--------------------------------|
//! | `Unset`, link has a path       | [`AttachmentMode::PathFraction`] | path point and tangent at fraction |
//! | outside `[-count, count)`      | [`AttachmentMode::Midpoint`] | link midpoint and mid-angle    |
//! | `Unset`, link has no path      | [`AttachmentMode::Midpoint`] | link midpoint and mid-angle    |
//! | inside `[-count, count)`       | [`AttachmentMode::Segment`]  | point on one route segment     |
//!
//! [`compute_offset`] maps a pointer position to a new offset and
//! [`place_label`] maps a stored offset back to the label's document center.

use log::trace;

use crate::{
    attachment::{LabelAttachment, SegmentIndex},
    diagram::LinkGeometry,
    geometry::{Angle, Point},
};

/// Attachment mode resolved for a label on a particular link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachmentMode {
    /// Fraction of the link's continuous path
    PathFraction,
    /// The link's midpoint
    Midpoint,
    /// One route segment, addressed forward (`index >= 0`) or backward
    Segment { index: i32 },
}

/// Reference point and local orientation an offset is expressed against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Anchor {
    point: Point,
    angle: Angle,
}

impl Anchor {
    pub fn new(point: Point, angle: Angle) -> Self {
        Self { point, angle }
    }

    /// Anchor point in document coordinates
    pub fn point(self) -> Point {
        self.point
    }

    /// Orientation of the anchor's local frame
    pub fn angle(self) -> Angle {
        self.angle
    }

    /// Expresses a document point in this anchor's rotated frame
    pub fn to_local(self, document_point: Point) -> Point {
        document_point.sub_point(self.point).rotate(-self.angle)
    }

    /// Maps a point in this anchor's rotated frame back to document space
    pub fn to_document(self, local: Point) -> Point {
        local.rotate(self.angle).add_point(self.point)
    }
}

/// Selects the attachment mode for `attachment` on `link`.
///
/// An [`SegmentIndex::Unset`] index on a link without a continuous path has
/// no natural anchor; it resolves to [`AttachmentMode::Midpoint`].
pub fn select_mode(attachment: LabelAttachment, link: &dyn LinkGeometry) -> AttachmentMode {
    match attachment.index() {
        SegmentIndex::Unset if link.path().is_some() => AttachmentMode::PathFraction,
        SegmentIndex::Unset => AttachmentMode::Midpoint,
        SegmentIndex::At(index) => {
            let count = i64::try_from(link.points().len()).unwrap_or(i64::MAX);
            if (-count..count).contains(&i64::from(index)) {
                AttachmentMode::Segment { index }
            } else {
                AttachmentMode::Midpoint
            }
        }
    }
}

/// Resolves the anchor a label's offset is measured from.
pub fn resolve_anchor(attachment: LabelAttachment, link: &dyn LinkGeometry) -> Anchor {
    let fraction = attachment.fraction();
    match select_mode(attachment, link) {
        AttachmentMode::PathFraction => match link.path() {
            Some(path) => Anchor::new(
                path.point_at_fraction(fraction),
                path.angle_at_fraction(fraction),
            ),
            None => Anchor::new(link.mid_point(), link.mid_angle()),
        },
        AttachmentMode::Midpoint => Anchor::new(link.mid_point(), link.mid_angle()),
        AttachmentMode::Segment { index } => segment_anchor(link.points(), index, fraction)
            .unwrap_or_else(|| Anchor::new(link.mid_point(), link.mid_angle())),
    }
}

/// Anchor on one route segment.
///
/// Forward indices pair a point with its successor; backward indices count
/// from the end and pair a point with its predecessor. At either end of the
/// route the segment degenerates to a single point with angle `0`. The
/// direction always follows the route from its first point to its last.
///
/// Returns `None` when `index` does not address a point of `points`.
fn segment_anchor(points: &[Point], index: i32, fraction: f32) -> Option<Anchor> {
    let (a, b, forward) = if index >= 0 {
        let i = usize::try_from(index).ok()?;
        let a = *points.get(i)?;
        let b = points.get(i + 1).copied().unwrap_or(a);
        (a, b, true)
    } else {
        let i = points.len().checked_sub(index.unsigned_abs() as usize)?;
        let a = *points.get(i)?;
        let b = i.checked_sub(1).and_then(|j| points.get(j)).copied().unwrap_or(a);
        (a, b, false)
    };

    let angle = if forward {
        a.direction_to(b)
    } else {
        b.direction_to(a)
    };
    Some(Anchor::new(a.lerp(b, fraction), angle))
}

/// Computes the segment offset that places a label under the pointer.
///
/// `grab_offset` is the pointer-to-label-center vector captured when the
/// drag started; subtracting it keeps the label from jumping so its center
/// sits under the pointer.
///
/// # Examples
///
/// ```
/// # use labelshift::attachment::{LabelAttachment, SegmentIndex};
/// # use labelshift::geometry::Point;
/// # use labelshift::model::LinkShape;
/// # use labelshift::offset::compute_offset;
/// let link = LinkShape::new(vec![Point::new(0.0, 0.0), Point::new(100.0, 0.0)]);
/// let midpoint_label = LabelAttachment::new(SegmentIndex::At(5), 0.0);
///
/// let offset = compute_offset(Point::new(60.0, 10.0), Point::default(), midpoint_label, &link);
/// assert_eq!(offset, Point::new(10.0, 10.0));
/// ```
pub fn compute_offset(
    pointer: Point,
    grab_offset: Point,
    attachment: LabelAttachment,
    link: &dyn LinkGeometry,
) -> Point {
    let anchor = resolve_anchor(attachment, link);
    let offset = anchor.to_local(pointer.sub_point(grab_offset));
    trace!(
        anchor_x = anchor.point().x(),
        anchor_y = anchor.point().y(),
        anchor_angle = anchor.angle().degrees(),
        offset_x = offset.x(),
        offset_y = offset.y();
        "Computed segment offset"
    );
    offset
}

/// Document center of a label with the given stored offset.
///
/// This is the inverse of [`compute_offset`] for a zero grab offset.
pub fn place_label(offset: Point, attachment: LabelAttachment, link: &dyn LinkGeometry) -> Point {
    resolve_anchor(attachment, link).to_document(offset)
}
