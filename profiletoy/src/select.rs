use kurbo::Point;

use crate::edit_session::{EditSession, Handle};

/// A set of states that are possible while handling a pointer drag.
#[derive(Debug, Clone, Copy, PartialEq)]
enum DragState {
    /// State for a drag that is moving a point.
    MovePoint(Handle),
    None,
}

/// The selection tool: hover to highlight a point, press and drag to move
/// it.
#[derive(Debug, Default, Clone)]
pub struct Select {
    /// the state preserved between pointer events.
    drag: DragState,
}

impl Select {
    /// Begin a drag if a point is under the pointer.
    pub fn pointer_down(&mut self, pos: Point, data: &mut EditSession) -> Option<Handle> {
        let hit = data.update_hover(pos);
        if let Some(handle) = hit {
            data.set_active(handle);
            self.drag = DragState::MovePoint(handle);
        }
        hit
    }

    /// Move the dragged point, or update hover state when not dragging.
    ///
    /// Returns `true` if the curves changed.
    pub fn pointer_moved(
        &mut self,
        pos: Point,
        data: &mut EditSession,
    ) -> Result<bool, bezier_profile::Error> {
        match self.drag {
            DragState::MovePoint(handle) => data.move_point(handle, pos).map(|_| true),
            DragState::None => {
                data.update_hover(pos);
                Ok(false)
            }
        }
    }

    pub fn pointer_up(&mut self, data: &mut EditSession) {
        if self.drag.is_move() {
            data.release();
        }
        self.drag = DragState::None;
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_move()
    }
}

impl Default for DragState {
    fn default() -> Self {
        DragState::None
    }
}

impl DragState {
    fn is_move(&self) -> bool {
        matches!(self, DragState::MovePoint(_))
    }
}

#[cfg(test)]
mod tests {
    use bezier_profile::{PointId, SegmentDescription};

    use super::*;
    use crate::options::EditorOptions;
    use crate::save::Document;

    fn session() -> EditSession {
        let curve = vec![
            SegmentDescription::start([0., 0.]),
            SegmentDescription::curve([100., 0.], [100., 250.], [300., 250.]),
            SegmentDescription::curve([500., 250.], [500., 500.], [600., 500.]),
        ];
        EditSession::new(&Document::Single(curve.into()), &EditorOptions::default()).unwrap()
    }

    #[test]
    fn drag_moves_hit_point() {
        let mut data = session();
        let mut tool = Select::default();
        let handle = tool.pointer_down(Point::new(340., 290.), &mut data).unwrap();
        assert_eq!(handle.point, PointId::anchor(1));
        assert!(tool.is_dragging());
        assert!(tool.pointer_moved(Point::new(350., 285.), &mut data).unwrap());
        tool.pointer_up(&mut data);
        assert!(!tool.is_dragging());
        assert!(data.active().is_none());

        let path = &data.curves()[0];
        assert_eq!(path.point(PointId::anchor(1)).unwrap().pos(), Point::new(310., 245.));
        assert_eq!(path.point(PointId::cp2(1)).unwrap().pos(), Point::new(110., 245.));
        assert_eq!(path.point(PointId::cp1(2)).unwrap().pos(), Point::new(510., 245.));
    }

    #[test]
    fn move_without_press_only_hovers() {
        let mut data = session();
        let before = data.to_document();
        let mut tool = Select::default();
        assert!(tool.pointer_down(Point::new(5., 5.), &mut data).is_none());
        assert!(!tool.pointer_moved(Point::new(340., 290.), &mut data).unwrap());
        assert_eq!(data.hover().map(|h| h.point), Some(PointId::anchor(1)));
        tool.pointer_up(&mut data);
        assert_eq!(data.to_document(), before);
    }
}
