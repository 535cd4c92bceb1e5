use crate::geometry::Rect;
use crate::pages::SurfaceHandle;
use std::time::Duration;

/// Controls on the launch dialog that the core positions, shows or enables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlId {
    Launch,
    Help,
    Exit,
    Version,
    CopyrightBox,
    Shadow,
    WaitPage,
    /// Menu button of the page with this logical index
    MenuButton(usize),
    /// Render surface owned by a page
    Surface(SurfaceHandle),
}

/// Native windowing primitives used by the dialog.
///
/// Rectangles passed to and from `control_rect`/`set_control_rect` are in the
/// dialog's client coordinates; window and desktop rectangles are in screen
/// coordinates.
pub trait DialogWindow {
    /// Current client area size (width, height)
    fn client_size(&self) -> (i32, i32);

    fn control_rect(&self, id: ControlId) -> Rect;
    fn set_control_rect(&mut self, id: ControlId, rect: Rect);
    fn set_control_visible(&mut self, id: ControlId, visible: bool);
    fn set_control_enabled(&mut self, id: ControlId, enabled: bool);
    fn set_control_text(&mut self, id: ControlId, text: &str);

    /// Show the wait page progress bar at this per-mille value, or hide it
    fn set_wait_progress(&mut self, permille: Option<u32>);

    /// Request a full repaint of the dialog
    fn invalidate(&mut self);

    fn desktop_rect(&self) -> Rect;
    fn window_rect(&self) -> Rect;
    fn set_window_rect(&mut self, rect: Rect);
    fn is_minimized(&self) -> bool;

    fn start_timer(&mut self, period: Duration);
    fn stop_timer(&mut self);

    fn show(&mut self);
    fn destroy(&mut self);
}
