/// Host-agnostic input events, fed into
/// [`Viewer::dispatch`](crate::state::Viewer::dispatch).
///
/// Pointer coordinates use a bottom-left origin: the host flips `y` before
/// building the event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Primary button pressed at a position.
    PointerDown { x: i32, y: i32 },
    /// Pointer moved to a position.
    PointerMove { x: i32, y: i32 },
    /// Primary button released.
    PointerUp,
    /// Wheel turned away from the user.
    ScrollUp,
    /// Wheel turned toward the user.
    ScrollDown,
    /// Drawable area resized, in pixels.
    Resize { width: u32, height: u32 },
}

/// What a dispatched event changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateChange {
    /// Nothing changed.
    None,
    /// A drag gesture started.
    PanStarted,
    /// The spin axis was redefined by a drag.
    AxisChanged,
    /// The active drag gesture ended.
    PanEnded,
    /// The projection x view matrix was recomputed.
    ViewChanged,
}

impl StateChange {
    pub(crate) fn from_flag(changed: bool, change: StateChange) -> StateChange {
        if changed {
            change
        } else {
            StateChange::None
        }
    }
}
