//! How a label is attached to its link.
//!
//! A label on a link stores a [`LabelAttachment`]: a [`SegmentIndex`] that
//! selects the attachment mode and a fraction that positions the label
//! within it. Together with the stored segment offset they determine where
//! the label is drawn.

use serde::{Deserialize, Serialize};

/// Selects which part of a link a label is attached to.
///
/// - [`SegmentIndex::Unset`] attaches to a fraction of the whole path (or the
///   link midpoint when the link has no continuous path).
/// - [`SegmentIndex::At`] with an index in `[-count, count)` attaches to one
///   segment, counted forward from the first point or backward from the last.
/// - [`SegmentIndex::At`] outside that range attaches to the link midpoint.
///
/// Indices `0` and `-1` are also used by arrowheads, which sit on the first
/// and last segment; see [`SegmentIndex::is_arrowhead`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Option<i32>", into = "Option<i32>")]
pub enum SegmentIndex {
    #[default]
    Unset,
    At(i32),
}

impl SegmentIndex {
    /// Index used by the arrowhead at the start of a link
    pub const FROM_ARROWHEAD: SegmentIndex = SegmentIndex::At(0);

    /// Index used by the arrowhead at the end of a link
    pub const TO_ARROWHEAD: SegmentIndex = SegmentIndex::At(-1);

    /// Returns the numeric index, if one is set
    pub fn index(self) -> Option<i32> {
        match self {
            SegmentIndex::Unset => None,
            SegmentIndex::At(idx) => Some(idx),
        }
    }

    /// Whether this index is reserved for arrowhead decorations.
    ///
    /// # Examples
    ///
    /// ```
    /// # use labelshift_core::attachment::SegmentIndex;
    /// assert!(SegmentIndex::At(0).is_arrowhead());
    /// assert!(SegmentIndex::At(-1).is_arrowhead());
    /// assert!(!SegmentIndex::At(1).is_arrowhead());
    /// assert!(!SegmentIndex::Unset.is_arrowhead());
    /// ```
    pub fn is_arrowhead(self) -> bool {
        self == Self::FROM_ARROWHEAD || self == Self::TO_ARROWHEAD
    }
}

impl From<Option<i32>> for SegmentIndex {
    fn from(index: Option<i32>) -> Self {
        index.map_or(SegmentIndex::Unset, SegmentIndex::At)
    }
}

impl From<SegmentIndex> for Option<i32> {
    fn from(index: SegmentIndex) -> Self {
        index.index()
    }
}

/// Attachment parameters of a label placed on a link.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LabelAttachment {
    #[serde(default)]
    index: SegmentIndex,

    #[serde(default)]
    fraction: f32,
}

impl LabelAttachment {
    /// Creates an attachment with the given index and fraction
    pub fn new(index: SegmentIndex, fraction: f32) -> Self {
        Self { index, fraction }
    }

    /// Returns the segment index selecting the attachment mode
    pub fn index(self) -> SegmentIndex {
        self.index
    }

    /// Returns the fraction along the selected segment or path.
    ///
    /// Non-finite fractions read as `0.0`, the start of the segment.
    pub fn fraction(self) -> f32 {
        if self.fraction.is_finite() {
            self.fraction
        } else {
            0.0
        }
    }
}
