//! Top-level rendering coordinator.
//!
//! ```text
//! AppState → compute_viewmodel → UIViewModel → render_frame → ANSI output
//! ```

use crate::app::AppState;
use crate::ui::components;

/// Renders the plugin UI to stdout for the last recorded viewport.
///
/// Call [`AppState::set_viewport`] first so layout and hit-testing agree with
/// the pane size Zellij passed to `render`.
pub fn render(state: &AppState) {
    let viewmodel = state.compute_viewmodel();
    components::render_frame(&viewmodel, &state.theme);
}
