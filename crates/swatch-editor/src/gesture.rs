//! Pointer gesture interpreter.
//!
//! Turns raw pointer and wheel events into `CanvasAction`s. Pressing on a
//! component node and moving past the click threshold drags it; pressing on
//! the background pans. Releasing without crossing the threshold is a click.
//!
//! Pointer coordinates arrive in screen pixels. Node moves are converted to
//! canvas units by dividing by the current zoom.

use crate::input::InputEvent;
use swatch_core::id::NodeId;

/// What the session should do in response to a pointer gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CanvasAction {
    /// Drag a node by a canvas-space delta.
    MoveNode { id: NodeId, dx: f32, dy: f32 },
    /// Pan the viewport by a screen-space delta.
    Pan { dx: f32, dy: f32 },
    /// Zoom around the screen point (x, y).
    Zoom { factor: f32, x: f32, y: f32 },
    Click(NodeId),
    ClearSelection,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Press {
    Node(NodeId),
    Background,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct ActivePress {
    target: Press,
    start_x: f32,
    start_y: f32,
    last_x: f32,
    last_y: f32,
    /// Set once the pointer has travelled past the click threshold.
    dragging: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PointerGesture {
    press: Option<ActivePress>,
    click_threshold: f32,
}

impl Default for PointerGesture {
    fn default() -> Self {
        Self::new(3.0)
    }
}

impl PointerGesture {
    pub fn new(click_threshold: f32) -> Self {
        Self {
            press: None,
            click_threshold,
        }
    }

    /// Whether a press is in progress.
    pub fn is_active(&self) -> bool {
        self.press.is_some()
    }

    /// Whether the current press has turned into a drag.
    pub fn is_dragging(&self) -> bool {
        self.press.is_some_and(|p| p.dragging)
    }

    /// Handle one event. `hit` is the interactive node under the pointer
    /// (only consulted on pointer-down); `zoom` is the current viewport zoom.
    pub fn handle(&mut self, event: &InputEvent, hit: Option<NodeId>, zoom: f32) -> Vec<CanvasAction> {
        let zoom = if zoom > 0.0 { zoom } else { 1.0 };
        match *event {
            InputEvent::PointerDown { x, y, .. } => {
                self.press = Some(ActivePress {
                    target: hit.map_or(Press::Background, Press::Node),
                    start_x: x,
                    start_y: y,
                    last_x: x,
                    last_y: y,
                    dragging: false,
                });
                vec![]
            }
            InputEvent::PointerMove { x, y } => {
                let threshold = self.click_threshold;
                let Some(press) = self.press.as_mut() else {
                    return vec![];
                };
                if !press.dragging {
                    let travelled = (x - press.start_x).hypot(y - press.start_y);
                    if travelled < threshold {
                        return vec![];
                    }
                    press.dragging = true;
                }
                let dx = x - press.last_x;
                let dy = y - press.last_y;
                press.last_x = x;
                press.last_y = y;
                match press.target {
                    Press::Node(id) => vec![CanvasAction::MoveNode {
                        id,
                        dx: dx / zoom,
                        dy: dy / zoom,
                    }],
                    Press::Background => vec![CanvasAction::Pan { dx, dy }],
                }
            }
            InputEvent::PointerUp { .. } => match self.press.take() {
                Some(ActivePress { dragging: true, .. }) | None => vec![],
                Some(ActivePress {
                    target: Press::Node(id),
                    ..
                }) => vec![CanvasAction::Click(id)],
                Some(ActivePress {
                    target: Press::Background,
                    ..
                }) => vec![CanvasAction::ClearSelection],
            },
            InputEvent::Scroll {
                x,
                y,
                dx,
                dy,
                zoom: factor,
            } => {
                let mut actions = Vec::new();
                if dx != 0.0 || dy != 0.0 {
                    actions.push(CanvasAction::Pan { dx: -dx, dy: -dy });
                }
                if factor > 0.0 && factor != 1.0 {
                    actions.push(CanvasAction::Zoom { factor, x, y });
                }
                actions
            }
            InputEvent::Key { .. } => vec![],
        }
    }
}
