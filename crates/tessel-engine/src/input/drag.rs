use crate::coords::Vec2;

/// Turns raw pointer events into drag deltas.
///
/// A drag is any pointer motion while at least one button is held. The
/// tracker owns the "previous position" bookkeeping so the consumer only
/// sees per-move deltas, ready to feed `Camera::pan`.
#[derive(Debug, Default)]
pub struct DragTracker {
    buttons_down: u32,
    last_pos: Option<Vec2>,
}

impl DragTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a button press at the given pointer position.
    pub fn on_button_pressed(&mut self, pos: Vec2) {
        self.buttons_down += 1;
        self.last_pos = Some(pos);
    }

    /// Records a button release.
    pub fn on_button_released(&mut self) {
        self.buttons_down = self.buttons_down.saturating_sub(1);
        if self.buttons_down == 0 {
            self.last_pos = None;
        }
    }

    /// The pointer left the window; any drag in progress ends.
    pub fn on_pointer_left(&mut self) {
        self.buttons_down = 0;
        self.last_pos = None;
    }

    /// Records a pointer move, returning the drag delta if dragging.
    pub fn on_pointer_moved(&mut self, pos: Vec2) -> Option<Vec2> {
        if self.buttons_down == 0 {
            return None;
        }
        let delta = self.last_pos.map(|last| pos - last);
        self.last_pos = Some(pos);
        delta.filter(|d| *d != Vec2::zero())
    }

    pub fn is_dragging(&self) -> bool {
        self.buttons_down > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn movement_without_a_button_is_not_a_drag() {
        let mut t = DragTracker::new();
        assert_eq!(t.on_pointer_moved(Vec2::new(10.0, 10.0)), None);
    }

    #[test]
    fn drag_yields_per_move_deltas() {
        let mut t = DragTracker::new();
        t.on_button_pressed(Vec2::new(10.0, 10.0));
        assert_eq!(t.on_pointer_moved(Vec2::new(13.0, 9.0)), Some(Vec2::new(3.0, -1.0)));
        assert_eq!(t.on_pointer_moved(Vec2::new(13.0, 12.0)), Some(Vec2::new(0.0, 3.0)));
    }

    #[test]
    fn release_ends_the_drag() {
        let mut t = DragTracker::new();
        t.on_button_pressed(Vec2::zero());
        t.on_button_released();
        assert!(!t.is_dragging());
        assert_eq!(t.on_pointer_moved(Vec2::new(5.0, 5.0)), None);
    }

    #[test]
    fn second_button_keeps_the_drag_alive() {
        let mut t = DragTracker::new();
        t.on_button_pressed(Vec2::zero());
        t.on_button_pressed(Vec2::zero());
        t.on_button_released();
        assert!(t.is_dragging());
    }
}
