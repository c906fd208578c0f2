//! The link label dragging tool.
//!
//! [`LabelDraggingTool`] moves a label along with the pointer while keeping
//! it attached to its link. Every pointer position is converted into a
//! segment offset by [`compute_offset`], and all writes of one gesture
//! happen inside a single named transaction so the whole drag is undone in
//! one step.

use log::{debug, info};

use crate::{
    config::ToolConfig,
    geometry::Point,
    identifier::Id,
    locator::find_label,
    offset::compute_offset,
    tool::{Tool, ToolContext, ToolFlow},
};

/// State of one in-progress drag gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    label: Id,
    grab_offset: Point,
    original_offset: Point,
}

impl DragSession {
    /// The label being dragged
    pub fn label(&self) -> Id {
        self.label
    }

    /// Press point minus the label center at activation.
    ///
    /// Keeps the point of the label under the pointer fixed while dragging.
    pub fn grab_offset(&self) -> Point {
        self.grab_offset
    }

    /// Segment offset of the label before the gesture started
    pub fn original_offset(&self) -> Point {
        self.original_offset
    }
}

/// Tool that drags link labels, keeping them attached to their link.
#[derive(Debug, Clone)]
pub struct LabelDraggingTool {
    transaction_name: String,
    session: Option<DragSession>,
    transaction_result: Option<String>,
    transaction_open: bool,
}

impl LabelDraggingTool {
    /// Name of the tool in a [`ToolChain`](crate::ToolChain)
    pub const NAME: &'static str = "LinkLabelDragging";

    pub fn new(config: &ToolConfig) -> Self {
        Self {
            transaction_name: config.transaction_name().to_string(),
            session: None,
            transaction_result: None,
            transaction_open: false,
        }
    }

    /// The active gesture, if any
    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    /// Recomputes the label's offset from the current pointer position and
    /// writes it to the host.
    fn update_segment_offset(&self, ctx: &mut ToolContext<'_>) {
        let Some(session) = self.session else {
            return;
        };
        let host = ctx.host();
        let Some(attachment) = host.attachment(session.label) else {
            return;
        };
        let Some(link) = host.part_of(session.label).and_then(|part| host.link(part)) else {
            return;
        };
        let offset = compute_offset(
            ctx.input().current_point(),
            session.grab_offset,
            attachment,
            link,
        );
        ctx.host_mut().set_segment_offset(session.label, offset);
    }
}

impl Tool for LabelDraggingTool {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn can_start(&self, ctx: &ToolContext<'_>) -> bool {
        let input = ctx.input();
        input.is_primary_down()
            && input.is_beyond_drag_threshold()
            && find_label(ctx.host(), input).is_some()
    }

    fn on_activate(&mut self, ctx: &mut ToolContext<'_>) {
        ctx.host_mut().begin_transaction(&self.transaction_name);
        self.transaction_open = true;
        self.transaction_result = None;

        let host = ctx.host();
        let Some(label) = find_label(host, ctx.input()) else {
            return;
        };
        let (Some(center), Some(original_offset)) =
            (host.document_center(label), host.segment_offset(label))
        else {
            return;
        };

        let grab_offset = ctx.input().press_point().sub_point(center);
        debug!(
            label:%,
            grab_x = grab_offset.x(),
            grab_y = grab_offset.y();
            "Label drag started"
        );
        self.session = Some(DragSession {
            label,
            grab_offset,
            original_offset,
        });
    }

    fn on_move(&mut self, ctx: &mut ToolContext<'_>) {
        self.update_segment_offset(ctx);
    }

    fn on_release(&mut self, ctx: &mut ToolContext<'_>) -> ToolFlow {
        self.update_segment_offset(ctx);
        self.transaction_result = Some(self.transaction_name.clone());
        ToolFlow::Stop
    }

    fn on_cancel(&mut self, ctx: &mut ToolContext<'_>) {
        self.transaction_result = None;
        if let Some(session) = self.session {
            ctx.host_mut()
                .set_segment_offset(session.label, session.original_offset);
            info!(label:% = session.label; "Label drag cancelled");
        }
    }

    fn on_deactivate(&mut self, ctx: &mut ToolContext<'_>) {
        if !self.transaction_open {
            return;
        }
        self.transaction_open = false;
        match self.transaction_result.take() {
            Some(result) => {
                ctx.host_mut().commit_transaction(&result);
                if let Some(session) = self.session {
                    info!(label:% = session.label, result; "Label drag committed");
                }
            }
            None => ctx.host_mut().rollback_transaction(),
        }
    }

    fn on_stop(&mut self) {
        self.session = None;
        self.transaction_result = None;
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use float_cmp::assert_approx_eq;
    use proptest::prelude::*;

    use super::*;
    use crate::{
        InputState, PointerButton, ToolChain,
        attachment::{LabelAttachment, SegmentIndex},
        diagram::{Container, Diagram, LinkGeometry, TransactionCoordinator},
        geometry::Size,
        model::{LinkShape, MemoryDiagram},
    };

    struct Fixture {
        diagram: MemoryDiagram,
        chain: ToolChain,
        label: Id,
    }

    impl Fixture {
        /// A horizontal link (0,0)-(100,0) with a 20x10 label at `offset`.
        fn new(prefix: &str, index: SegmentIndex, fraction: f32, offset: Point) -> Self {
            let mut diagram = MemoryDiagram::new();
            let link = Id::new(&format!("{prefix}_link"));
            let label = Id::new(&format!("{prefix}_label"));
            diagram
                .add_link(
                    link,
                    LinkShape::new(vec![Point::new(0.0, 0.0), Point::new(100.0, 0.0)]),
                )
                .unwrap();
            diagram
                .add_label(
                    label,
                    link,
                    LabelAttachment::new(index, fraction),
                    offset,
                    Size::new(20.0, 10.0),
                )
                .unwrap();

            let config = ToolConfig::default();
            let mut chain = ToolChain::new(&config);
            chain.push(Box::new(LabelDraggingTool::new(&config)));
            Self {
                diagram,
                chain,
                label,
            }
        }

        fn center(&self) -> Point {
            self.diagram.document_center(self.label).unwrap()
        }

        fn offset(&self) -> Point {
            self.diagram.segment_offset(self.label).unwrap()
        }

        fn down(&mut self, point: Point) {
            self.chain
                .pointer_down(PointerButton::Primary, point, &mut self.diagram);
        }

        fn drag_to(&mut self, point: Point) {
            self.chain.pointer_move(point, &mut self.diagram);
        }

        fn up(&mut self, point: Point) {
            self.chain.pointer_up(point, &mut self.diagram);
        }

        fn cancel(&mut self) {
            self.chain.cancel(&mut self.diagram);
        }

        fn is_dragging(&self) -> bool {
            self.chain.active_tool_name() == Some(LabelDraggingTool::NAME)
        }
    }

    #[test]
    fn test_midpoint_mode_release() {
        let mut fixture = Fixture::new("midpoint", SegmentIndex::At(5), 0.0, Point::default());
        fixture.down(Point::new(50.0, 0.0));
        fixture.drag_to(Point::new(53.0, 1.0));
        assert!(fixture.is_dragging());
        fixture.drag_to(Point::new(60.0, 10.0));
        fixture.up(Point::new(60.0, 10.0));

        assert!(!fixture.is_dragging());
        assert_eq!(fixture.offset(), Point::new(10.0, 10.0));
        assert_eq!(fixture.diagram.history().committed().len(), 1);
        assert_eq!(
            fixture.diagram.history().committed()[0].result(),
            "Shifted Label"
        );
    }

    #[test]
    fn test_segment_mode_release() {
        let mut fixture = Fixture::new("segment", SegmentIndex::At(1), 0.5, Point::default());
        let link = fixture.diagram.part_of(fixture.label).unwrap();
        fixture
            .diagram
            .set_link_points(
                link,
                vec![
                    Point::new(-100.0, 0.0),
                    Point::new(0.0, 0.0),
                    Point::new(100.0, 0.0),
                ],
            )
            .unwrap();
        assert_eq!(fixture.center(), Point::new(50.0, 0.0));

        fixture.down(Point::new(50.0, 0.0));
        fixture.drag_to(Point::new(53.0, 1.0));
        fixture.drag_to(Point::new(60.0, 10.0));
        fixture.up(Point::new(60.0, 10.0));

        assert_eq!(fixture.offset(), Point::new(10.0, 10.0));
    }

    #[test]
    fn test_arrowhead_is_never_dragged() {
        let mut fixture = Fixture::new("arrowhead", SegmentIndex::At(0), 0.5, Point::default());
        fixture.down(Point::new(50.0, 0.0));
        fixture.drag_to(Point::new(53.0, 1.0));
        fixture.drag_to(Point::new(60.0, 10.0));
        fixture.up(Point::new(60.0, 10.0));

        assert!(!fixture.is_dragging());
        assert_eq!(fixture.offset(), Point::default());
        assert!(!fixture.diagram.history().can_undo());
    }

    #[test]
    fn test_grab_offset_keeps_label_under_pointer() {
        let mut fixture = Fixture::new("grab", SegmentIndex::At(5), 0.0, Point::default());
        fixture.down(Point::new(55.0, 2.0));
        fixture.drag_to(Point::new(58.0, 3.0));
        fixture.drag_to(Point::new(75.0, 12.0));

        assert_eq!(fixture.center(), Point::new(70.0, 10.0));
        fixture.up(Point::new(75.0, 12.0));
        assert_eq!(fixture.offset(), Point::new(20.0, 10.0));
    }

    #[test]
    fn test_click_without_drag_changes_nothing() {
        let mut fixture = Fixture::new("click", SegmentIndex::At(5), 0.0, Point::new(1.0, 2.0));
        fixture.down(Point::new(51.0, 2.0));
        fixture.drag_to(Point::new(52.0, 2.0));
        fixture.up(Point::new(52.0, 2.0));

        assert_eq!(fixture.offset(), Point::new(1.0, 2.0));
        assert!(!fixture.diagram.history().can_undo());
    }

    #[test]
    fn test_cancel_after_three_moves_restores_offset() {
        let original = Point::new(3.0, -2.0);
        let mut fixture = Fixture::new("cancel", SegmentIndex::At(5), 0.0, original);
        let start = fixture.center();
        fixture.down(start);
        fixture.drag_to(start.add_point(Point::new(4.0, 0.0)));
        fixture.drag_to(start.add_point(Point::new(20.0, 7.5)));
        fixture.drag_to(start.add_point(Point::new(-13.0, 30.25)));
        assert_ne!(fixture.offset(), original);

        fixture.cancel();
        assert!(!fixture.is_dragging());
        assert_eq!(fixture.offset(), original);
        assert!(!fixture.diagram.history().can_undo());
        assert!(!fixture.diagram.history().is_in_transaction());
    }

    #[test]
    fn test_commit_is_one_undo_step() {
        let mut fixture = Fixture::new("undo", SegmentIndex::At(5), 0.0, Point::default());
        fixture.down(Point::new(50.0, 0.0));
        fixture.drag_to(Point::new(54.0, 0.0));
        fixture.drag_to(Point::new(70.0, 0.0));
        fixture.up(Point::new(80.0, -5.0));

        assert_eq!(fixture.offset(), Point::new(30.0, -5.0));
        assert!(fixture.diagram.undo());
        assert_eq!(fixture.offset(), Point::default());
        assert!(!fixture.diagram.history().can_undo());
        assert!(fixture.diagram.redo());
        assert_eq!(fixture.offset(), Point::new(30.0, -5.0));
    }

    #[test]
    fn test_release_point_is_applied() {
        let mut fixture = Fixture::new("release", SegmentIndex::At(5), 0.0, Point::default());
        fixture.down(Point::new(50.0, 0.0));
        fixture.drag_to(Point::new(54.0, 0.0));
        fixture.up(Point::new(44.0, -8.0));

        assert_eq!(fixture.offset(), Point::new(-6.0, -8.0));
    }

    #[test]
    fn test_rotated_link_offset_is_local() {
        let mut fixture = Fixture::new("rotated", SegmentIndex::At(5), 0.0, Point::default());
        let link = fixture.diagram.part_of(fixture.label).unwrap();
        fixture
            .diagram
            .set_link_points(link, vec![Point::new(0.0, 0.0), Point::new(0.0, 100.0)])
            .unwrap();
        assert_eq!(fixture.center(), Point::new(0.0, 50.0));

        fixture.down(Point::new(0.0, 50.0));
        fixture.drag_to(Point::new(4.0, 50.0));
        fixture.up(Point::new(10.0, 50.0));

        // Document +X is local -Y on a link pointing down
        let offset = fixture.offset();
        assert_approx_eq!(f32, offset.x(), 0.0);
        assert_approx_eq!(f32, offset.y(), -10.0);
    }

    #[test]
    fn test_session_lifecycle() {
        let mut diagram = MemoryDiagram::new();
        let link = Id::new("session_link");
        let label = Id::new("session_label");
        diagram
            .add_link(
                link,
                LinkShape::new(vec![Point::new(0.0, 0.0), Point::new(100.0, 0.0)]),
            )
            .unwrap();
        diagram
            .add_label(
                label,
                link,
                LabelAttachment::new(SegmentIndex::At(5), 0.0),
                Point::new(0.0, 1.0),
                Size::new(20.0, 10.0),
            )
            .unwrap();

        let mut tool = LabelDraggingTool::new(&ToolConfig::new(2.0, "Moved"));
        let mut input = InputState::new(2.0);
        input.press(PointerButton::Primary, Point::new(52.0, 3.0));
        input.move_to(Point::new(55.0, 3.0));

        let mut ctx = ToolContext::new(&mut diagram, &input);
        assert!(tool.can_start(&ctx));
        tool.on_activate(&mut ctx);

        let session = *tool.session().unwrap();
        assert_eq!(session.label(), label);
        assert_eq!(session.grab_offset(), Point::new(2.0, 2.0));
        assert_eq!(session.original_offset(), Point::new(0.0, 1.0));
        assert_eq!(diagram.history().open_transaction_name(), Some("Moved"));

        let mut ctx = ToolContext::new(&mut diagram, &input);
        tool.on_cancel(&mut ctx);
        tool.on_deactivate(&mut ctx);
        assert!(tool.is_active());
        tool.on_stop();
        assert!(!tool.is_active());
        assert!(!diagram.history().is_in_transaction());
    }

    #[test]
    fn test_moves_while_inactive_do_nothing() {
        let mut diagram = MemoryDiagram::new();
        let mut tool = LabelDraggingTool::new(&ToolConfig::default());
        let input = InputState::new(2.0);
        let mut ctx = ToolContext::new(&mut diagram, &input);

        tool.on_move(&mut ctx);
        tool.on_cancel(&mut ctx);
        tool.on_deactivate(&mut ctx);
        assert!(!tool.is_active());
        assert!(!diagram.history().is_in_transaction());
    }

    /// Host that counts how often the tool hit-tests the diagram.
    struct CountingHost {
        diagram: MemoryDiagram,
        hit_tests: Cell<usize>,
    }

    impl Diagram for CountingHost {
        fn hit_test(&self, point: Point) -> Option<Id> {
            self.hit_tests.set(self.hit_tests.get() + 1);
            self.diagram.hit_test(point)
        }

        fn part_of(&self, element: Id) -> Option<Id> {
            self.diagram.part_of(element)
        }

        fn container_of(&self, element: Id) -> Option<Container> {
            self.diagram.container_of(element)
        }

        fn link(&self, part: Id) -> Option<&dyn LinkGeometry> {
            self.diagram.link(part)
        }

        fn attachment(&self, element: Id) -> Option<LabelAttachment> {
            self.diagram.attachment(element)
        }

        fn segment_offset(&self, element: Id) -> Option<Point> {
            self.diagram.segment_offset(element)
        }

        fn set_segment_offset(&mut self, element: Id, offset: Point) {
            self.diagram.set_segment_offset(element, offset);
        }

        fn document_center(&self, element: Id) -> Option<Point> {
            self.diagram.document_center(element)
        }
    }

    impl TransactionCoordinator for CountingHost {
        fn begin_transaction(&mut self, name: &str) {
            self.diagram.begin_transaction(name);
        }

        fn commit_transaction(&mut self, result: &str) {
            self.diagram.commit_transaction(result);
        }

        fn rollback_transaction(&mut self) {
            self.diagram.rollback_transaction();
        }
    }

    #[test]
    fn test_can_start_checks_distance_before_hit_testing() {
        let fixture = Fixture::new("gate", SegmentIndex::At(5), 0.0, Point::default());
        let mut host = CountingHost {
            diagram: fixture.diagram,
            hit_tests: Cell::new(0),
        };
        let tool = LabelDraggingTool::new(&ToolConfig::default());
        let mut input = InputState::new(2.0);

        input.press(PointerButton::Secondary, Point::new(50.0, 0.0));
        input.move_to(Point::new(60.0, 0.0));
        assert!(!tool.can_start(&ToolContext::new(&mut host, &input)));
        assert_eq!(host.hit_tests.get(), 0);

        input.press(PointerButton::Primary, Point::new(50.0, 0.0));
        input.move_to(Point::new(51.0, 0.0));
        assert!(!tool.can_start(&ToolContext::new(&mut host, &input)));
        input.move_to(Point::new(52.0, 0.0));
        assert!(!tool.can_start(&ToolContext::new(&mut host, &input)));
        assert_eq!(host.hit_tests.get(), 0);

        input.move_to(Point::new(53.0, 0.0));
        assert!(tool.can_start(&ToolContext::new(&mut host, &input)));
        assert_eq!(host.hit_tests.get(), 1);
    }

    mod proptest_tests {
        use super::*;

        fn offset_strategy() -> impl Strategy<Value = Point> {
            (-30.0f32..30.0, -30.0f32..30.0).prop_map(|(x, y)| Point::new(x, y))
        }

        fn pointer_strategy() -> impl Strategy<Value = Point> {
            (-500.0f32..500.0, -500.0f32..500.0).prop_map(|(x, y)| Point::new(x, y))
        }

        fn index_strategy() -> impl Strategy<Value = SegmentIndex> {
            prop_oneof![
                Just(SegmentIndex::Unset),
                Just(SegmentIndex::At(1)),
                Just(SegmentIndex::At(-2)),
                (2i32..50).prop_map(SegmentIndex::At),
            ]
        }

        /// Starting movement stays inside the 20x10 label.
        fn travel_strategy() -> impl Strategy<Value = (f32, f32)> {
            (-4.5f32..4.5, -2.0f32..2.0)
        }

        fn check_threshold_gate(dx: f32, dy: f32) -> Result<(), TestCaseError> {
            let mut diagram = MemoryDiagram::new();
            let link = Id::new("gate_link");
            let label = Id::new("gate_label");
            diagram
                .add_link(
                    link,
                    LinkShape::new(vec![Point::new(0.0, 0.0), Point::new(100.0, 0.0)]),
                )
                .unwrap();
            diagram
                .add_label(
                    label,
                    link,
                    LabelAttachment::new(SegmentIndex::At(5), 0.0),
                    Point::default(),
                    Size::new(20.0, 10.0),
                )
                .unwrap();

            let press = Point::new(50.0, 0.0);
            let current = Point::new(50.0 + dx, dy);
            let distance = press.distance(current);

            let tool = LabelDraggingTool::new(&ToolConfig::default());
            let mut input = InputState::new(2.0);
            input.press(PointerButton::Primary, press);
            input.move_to(current);
            let ctx = ToolContext::new(&mut diagram, &input);

            prop_assert_eq!(tool.can_start(&ctx), distance > 2.0);
            Ok(())
        }

        fn check_cancel_restores_exactly(
            index: SegmentIndex,
            fraction: f32,
            original: Point,
            moves: Vec<Point>,
        ) -> Result<(), TestCaseError> {
            let mut fixture = Fixture::new("prop_cancel", index, fraction, original);
            let start = fixture.center();
            fixture.down(start);
            fixture.drag_to(start.add_point(Point::new(3.0, 0.0)));
            prop_assert!(fixture.is_dragging());

            for point in moves {
                fixture.drag_to(point);
            }
            fixture.cancel();

            let restored = fixture.offset();
            prop_assert_eq!(restored.x().to_bits(), original.x().to_bits());
            prop_assert_eq!(restored.y().to_bits(), original.y().to_bits());
            Ok(())
        }

        fn check_repeated_moves_are_idempotent(
            index: SegmentIndex,
            pointer: Point,
            repeats: usize,
        ) -> Result<(), TestCaseError> {
            let mut fixture = Fixture::new("prop_idempotent", index, 0.25, Point::default());
            let start = fixture.center();
            fixture.down(start);
            fixture.drag_to(start.add_point(Point::new(3.0, 0.0)));
            prop_assert!(fixture.is_dragging());

            fixture.drag_to(pointer);
            let first = fixture.offset();
            for _ in 0..repeats {
                fixture.drag_to(pointer);
                prop_assert_eq!(fixture.offset(), first);
            }
            Ok(())
        }

        fn check_label_follows_pointer(
            index: SegmentIndex,
            grab: (f32, f32),
            pointer: Point,
        ) -> Result<(), TestCaseError> {
            let mut fixture = Fixture::new("prop_follow", index, 0.75, Point::default());
            let start = fixture.center();
            let press = start.add_point(Point::new(grab.0, grab.1));
            fixture.down(press);
            fixture.drag_to(press.add_point(Point::new(0.0, 2.5)));
            prop_assert!(fixture.is_dragging());

            fixture.drag_to(pointer);
            let grab_offset = press.sub_point(start);
            let expected = pointer.sub_point(grab_offset);
            let center = fixture.center();
            prop_assert!((center.x() - expected.x()).abs() < 1e-2);
            prop_assert!((center.y() - expected.y()).abs() < 1e-2);
            Ok(())
        }

        proptest! {
            #[test]
            fn prop_threshold_gate((dx, dy) in travel_strategy()) {
                check_threshold_gate(dx, dy)?;
            }

            #[test]
            fn prop_cancel_restores_exactly(
                index in index_strategy(),
                fraction in 0.0f32..=1.0,
                original in offset_strategy(),
                moves in prop::collection::vec(pointer_strategy(), 0..8),
            ) {
                check_cancel_restores_exactly(index, fraction, original, moves)?;
            }

            #[test]
            fn prop_repeated_moves_are_idempotent(
                index in index_strategy(),
                pointer in pointer_strategy(),
                repeats in 1usize..5,
            ) {
                check_repeated_moves_are_idempotent(index, pointer, repeats)?;
            }

            #[test]
            fn prop_label_follows_pointer(
                index in index_strategy(),
                grab in (-9.0f32..9.0, -2.0f32..2.0),
                pointer in pointer_strategy(),
            ) {
                check_label_follows_pointer(index, grab, pointer)?;
            }
        }
    }
}
