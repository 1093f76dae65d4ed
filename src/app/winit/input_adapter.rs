//! Winit event adapter
//!
//! Routes the window events the mascot cares about into its callbacks.

use winit::event::WindowEvent;

use crate::app::Mascot;

/// Forwards pointer and resize events to `mascot`.
///
/// Returns `true` when the event was consumed.
pub fn process_window_event(mascot: &mut Mascot, event: &WindowEvent) -> bool {
    match event {
        // On the web the document-wide listener feeds the pointer instead
        #[cfg(not(target_arch = "wasm32"))]
        WindowEvent::CursorMoved { position, .. } => {
            mascot.on_pointer_move(position.x as f32, position.y as f32);
            true
        }
        WindowEvent::Resized(size) => {
            mascot.on_resize(size.width, size.height);
            true
        }
        _ => false,
    }
}
