// ---------------------------------------------------------------------------
// Slide state machine
// ---------------------------------------------------------------------------

/// Index of the slide on screen, always within `0..count`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlideState {
    index: usize,
    count: usize,
}

impl SlideState {
    /// Start at the first of `count` slides.
    pub fn new(count: usize) -> Self {
        debug_assert!(count > 0, "a slideshow needs at least one slide");
        SlideState { index: 0, count }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Move forward; returns whether the index changed.
    pub fn advance(&mut self) -> bool {
        if self.index + 1 < self.count {
            self.index += 1;
            true
        } else {
            false
        }
    }

    /// Move back; returns whether the index changed.
    pub fn retreat(&mut self) -> bool {
        if self.index > 0 {
            self.index -= 1;
            true
        } else {
            false
        }
    }
}

/// Navigation input, already decoded from the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlideEvent {
    Advance,
    Retreat,
    Terminate,
}

/// "Draw slide N" – handed to a [`crate::ui::surface::ChartSurface`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderRequest {
    pub view: usize,
}

/// Outcome of feeding one event to the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// The slide changed; the new one must be drawn.
    Moved(RenderRequest),
    /// Boundary no-op, or an event after termination.
    Unchanged,
    /// The session is over.
    Terminated,
}

/// Owns the slide index and turns navigation events into render requests.
///
/// The controller knows nothing about charts or windows: whoever receives a
/// [`RenderRequest`] does the clearing, preparing and drawing.
#[derive(Debug, Clone)]
pub struct SlideController {
    state: SlideState,
    terminated: bool,
}

impl SlideController {
    pub fn new(view_count: usize) -> Self {
        SlideController {
            state: SlideState::new(view_count),
            terminated: false,
        }
    }

    pub fn current(&self) -> usize {
        self.state.index()
    }

    pub fn is_terminated(&self) -> bool {
        self.terminated
    }

    /// Request for the slide shown when the session opens.
    pub fn initial_request(&self) -> RenderRequest {
        RenderRequest {
            view: self.state.index(),
        }
    }

    /// Apply one event.
    pub fn handle(&mut self, event: SlideEvent) -> Transition {
        if self.terminated {
            return Transition::Unchanged;
        }
        let moved = match event {
            SlideEvent::Advance => self.state.advance(),
            SlideEvent::Retreat => self.state.retreat(),
            SlideEvent::Terminate => {
                log::debug!("slideshow terminated on slide {}", self.state.index());
                self.terminated = true;
                return Transition::Terminated;
            }
        };
        if moved {
            log::debug!("{event:?} → slide {}", self.state.index());
            Transition::Moved(RenderRequest {
                view: self.state.index(),
            })
        } else {
            Transition::Unchanged
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::views::VIEW_COUNT;

    #[test]
    fn test_starts_at_first_slide() {
        let controller = SlideController::new(VIEW_COUNT);
        assert_eq!(controller.current(), 0);
        assert_eq!(controller.initial_request(), RenderRequest { view: 0 });
        assert!(!controller.is_terminated());
    }

    #[test]
    fn test_advance_saturates_at_last_slide() {
        let mut controller = SlideController::new(VIEW_COUNT);
        for _ in 0..10 {
            controller.handle(SlideEvent::Advance);
        }
        assert_eq!(controller.current(), 5);
        assert_eq!(controller.handle(SlideEvent::Advance), Transition::Unchanged);
    }

    #[test]
    fn test_retreat_saturates_at_first_slide() {
        let mut controller = SlideController::new(VIEW_COUNT);
        for _ in 0..5 {
            controller.handle(SlideEvent::Advance);
        }
        assert_eq!(controller.current(), 5);
        for _ in 0..10 {
            controller.handle(SlideEvent::Retreat);
        }
        assert_eq!(controller.current(), 0);
        assert_eq!(controller.handle(SlideEvent::Retreat), Transition::Unchanged);
    }

    #[test]
    fn test_moves_emit_render_requests() {
        let mut controller = SlideController::new(VIEW_COUNT);
        assert_eq!(
            controller.handle(SlideEvent::Advance),
            Transition::Moved(RenderRequest { view: 1 })
        );
        assert_eq!(
            controller.handle(SlideEvent::Advance),
            Transition::Moved(RenderRequest { view: 2 })
        );
        assert_eq!(
            controller.handle(SlideEvent::Retreat),
            Transition::Moved(RenderRequest { view: 1 })
        );
    }

    #[test]
    fn test_terminate_from_any_slide() {
        for start in 0..VIEW_COUNT {
            let mut controller = SlideController::new(VIEW_COUNT);
            for _ in 0..start {
                controller.handle(SlideEvent::Advance);
            }
            assert_eq!(controller.handle(SlideEvent::Terminate), Transition::Terminated);
            assert!(controller.is_terminated());
            assert_eq!(controller.handle(SlideEvent::Advance), Transition::Unchanged);
            assert_eq!(controller.handle(SlideEvent::Retreat), Transition::Unchanged);
            assert_eq!(controller.current(), start);
        }
    }

    #[test]
    fn test_single_slide_never_moves() {
        let mut state = SlideState::new(1);
        assert!(!state.advance());
        assert!(!state.retreat());
        assert_eq!(state.index(), 0);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "at least one slide")]
    fn test_zero_slides_rejected_in_debug_builds() {
        SlideState::new(0);
    }
}
