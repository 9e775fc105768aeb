//! WebView placement within the window.

use winit::dpi::PhysicalSize;

/// Bounds covering the whole window client area.
pub fn fill_window(size: PhysicalSize<u32>) -> wry::Rect {
    wry::Rect {
        position: wry::dpi::Position::Physical(wry::dpi::PhysicalPosition::new(0, 0)),
        size: wry::dpi::Size::Physical(wry::dpi::PhysicalSize::new(size.width, size.height)),
    }
}
