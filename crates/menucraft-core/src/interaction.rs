//! Pointer and touch gestures turned into selection, drag and zoom commands.

use crate::editor::Editor;
use crate::input::{PointerEvent, TouchEvent, TouchPoint, pinch_distance};
use crate::model::{ObjectId, ObjectPatch};
use crate::viewport::Viewport;
use kurbo::Point;

/// Minimum canvas-space movement for a drag to be committed.
pub const DRAG_THRESHOLD: f64 = 0.1;

/// An in-progress object drag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragState {
    pub object_id: ObjectId,
    /// Pointer position at press, in surface coordinates.
    pub start_pointer: Point,
    /// Object position at press, in canvas coordinates.
    pub start_position: Point,
    /// Last previewed object position.
    pub current_position: Point,
}

/// An in-progress two-finger zoom.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PinchState {
    pub start_distance: f64,
    pub start_zoom: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum InteractionState {
    #[default]
    Idle,
    Dragging(DragState),
    Pinching(PinchState),
}

/// Translates input streams into editor operations.
///
/// A drag previews positions without history and commits the final
/// position with a single `update_object` on release, so one gesture is
/// one undo step.
#[derive(Debug, Clone, Default)]
pub struct InteractionController {
    state: InteractionState,
    viewport: Viewport,
}

impl InteractionController {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            state: InteractionState::Idle,
            viewport,
        }
    }

    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, InteractionState::Dragging(_))
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Update the surface scale, e.g. after the container was resized.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Handle a pointer event. Returns true if the surface needs repainting.
    pub fn handle_pointer(&mut self, editor: &mut Editor, event: PointerEvent) -> bool {
        match event {
            PointerEvent::Down { position } => self.press(editor, position),
            PointerEvent::Move { position } => self.drag_to(editor, position),
            PointerEvent::Up { .. } | PointerEvent::Leave => self.release(editor),
        }
    }

    /// Handle a touch event. Returns true if the surface needs repainting.
    ///
    /// One contact behaves like the pointer; two contacts pinch-zoom.
    pub fn handle_touch(&mut self, editor: &mut Editor, event: &TouchEvent) -> bool {
        let touches = event.touches();
        match event {
            TouchEvent::Start(_) => match touches {
                [single] => self.press(editor, single.position),
                [_, _, ..] => {
                    let committed = self.release(editor);
                    self.start_pinch(editor, touches);
                    committed
                }
                [] => false,
            },
            TouchEvent::Move(_) => match (&self.state, touches) {
                (InteractionState::Dragging(_), [single]) => self.drag_to(editor, single.position),
                (InteractionState::Pinching(pinch), [_, _, ..]) => {
                    let pinch = *pinch;
                    self.pinch_to(editor, pinch, touches)
                }
                _ => false,
            },
            TouchEvent::End(_) => {
                if touches.is_empty() || matches!(self.state, InteractionState::Pinching(_)) {
                    self.release(editor)
                } else {
                    false
                }
            }
            TouchEvent::Cancel => self.release(editor),
        }
    }

    fn press(&mut self, editor: &mut Editor, screen: Point) -> bool {
        let point = self.viewport.screen_to_canvas(screen);
        let hit = editor
            .object_at(point)
            .map(|o| (o.id, o.locked, o.position()));

        match hit {
            Some((id, locked, position)) => {
                editor.select_object(id);
                if locked {
                    log::debug!("Object {} is locked, not dragging", id);
                    self.state = InteractionState::Idle;
                } else {
                    self.state = InteractionState::Dragging(DragState {
                        object_id: id,
                        start_pointer: screen,
                        start_position: position,
                        current_position: position,
                    });
                }
            }
            None => {
                editor.clear_selection();
                self.state = InteractionState::Idle;
            }
        }
        true
    }

    fn drag_to(&mut self, editor: &mut Editor, screen: Point) -> bool {
        let InteractionState::Dragging(drag) = &mut self.state else {
            return false;
        };

        // The object may have been locked or deleted mid-gesture
        match editor.object(drag.object_id) {
            Some(object) if !object.locked => {}
            _ => return false,
        }

        let delta = self.viewport.screen_delta_to_canvas(screen - drag.start_pointer);
        let position = drag.start_position + delta;
        drag.current_position = position;
        editor.preview_object(drag.object_id, &ObjectPatch::position(position.x, position.y))
    }

    fn release(&mut self, editor: &mut Editor) -> bool {
        match std::mem::take(&mut self.state) {
            InteractionState::Dragging(drag) => Self::commit_drag(editor, &drag),
            InteractionState::Pinching(_) => false,
            InteractionState::Idle => false,
        }
    }

    fn commit_drag(editor: &mut Editor, drag: &DragState) -> bool {
        let delta = drag.current_position - drag.start_position;
        if delta.x.abs() <= DRAG_THRESHOLD && delta.y.abs() <= DRAG_THRESHOLD {
            // Jitter: undo the preview without recording anything
            let start = drag.start_position;
            editor.preview_object(drag.object_id, &ObjectPatch::position(start.x, start.y));
            return false;
        }
        if editor.object(drag.object_id).is_none() {
            log::debug!("Dragged object {} no longer exists", drag.object_id);
            return false;
        }

        // Restore the pre-drag position so history captures it, then apply the final one
        let start = drag.start_position;
        let end = drag.current_position;
        editor.preview_object(drag.object_id, &ObjectPatch::position(start.x, start.y));
        editor.update_object(drag.object_id, &ObjectPatch::position(end.x, end.y))
    }

    fn start_pinch(&mut self, editor: &Editor, touches: &[TouchPoint]) {
        match pinch_distance(touches) {
            Some(distance) if distance > f64::EPSILON => {
                self.state = InteractionState::Pinching(PinchState {
                    start_distance: distance,
                    start_zoom: editor.zoom_level(),
                });
            }
            _ => self.state = InteractionState::Idle,
        }
    }

    fn pinch_to(&mut self, editor: &mut Editor, pinch: PinchState, touches: &[TouchPoint]) -> bool {
        let Some(distance) = pinch_distance(touches) else {
            return false;
        };
        let zoom = pinch.start_zoom * (distance / pinch.start_distance);
        let before = editor.zoom_level();
        (editor.set_zoom(zoom) - before).abs() > f64::EPSILON
    }
}
