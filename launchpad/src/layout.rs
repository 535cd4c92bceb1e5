use crate::geometry::Rect;
use serde::{Deserialize, Serialize};

/// Smallest width and height a page surface is ever given
pub const MIN_PAGE_EXTENT: i32 = 10;

/// How the container reached its new size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeMode {
    Restored,
    Minimized,
    Maximized,
}

/// Control geometry captured once at the dialog's initial client size.
/// Every later layout is derived from this and the size delta.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReferenceGeometry {
    /// Initial client size
    pub width: i32,
    pub height: i32,
    pub copyright: Rect,
    pub shadow_height: i32,
    pub launch: Rect,
    pub help: Rect,
    pub exit: Rect,
    pub wait: Rect,
    pub page_area: Rect,
    pub version: Rect,
}

/// Geometry for every managed control at one container size
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub copyright: Rect,
    pub shadow: Rect,
    pub launch: Rect,
    pub help: Rect,
    pub exit: Rect,
    pub wait: Rect,
    pub version: Rect,
    /// Applied to every page surface, not just the active one
    pub page_area: Rect,
}

impl ReferenceGeometry {
    /// Geometry of the stock dialog template
    pub fn template() -> Self {
        Self {
            width: 720,
            height: 520,
            copyright: Rect::new(0, 0, 720, 64),
            shadow_height: 6,
            launch: Rect::from_size(130, 484, 120, 26),
            help: Rect::from_size(480, 484, 110, 26),
            exit: Rect::from_size(596, 484, 114, 26),
            wait: Rect::from_size(210, 180, 300, 120),
            page_area: Rect::from_size(130, 76, 580, 400),
            version: Rect::from_size(8, 494, 110, 16),
        }
    }

    /// Horizontal gap between the help and exit buttons
    pub fn button_gap(&self) -> i32 {
        self.exit.left - self.help.right
    }

    /// Lay the dialog out for a new client size.
    ///
    /// Returns `None` when minimized: there is nothing visible to lay out.
    pub fn layout(&self, width: i32, height: i32, mode: SizeMode) -> Option<Layout> {
        if mode == SizeMode::Minimized {
            return None;
        }

        let dw = width - self.width;
        let dh = height - self.height;

        let [launch, help, exit] = self.bottom_buttons(dw, dh);

        let wait_x = (width - self.wait.width()) / 2;
        let wait_y = self.wait.top.max(self.wait.top + (height - self.wait.bottom) / 2);

        let page_w = (self.page_area.width() + dw).max(MIN_PAGE_EXTENT);
        let page_h = (self.page_area.height() + dh).max(MIN_PAGE_EXTENT);

        Some(Layout {
            copyright: self
                .copyright
                .with_size(self.copyright.width() + dw, self.copyright.height()),
            shadow: Rect::from_size(0, 0, width, self.shadow_height),
            launch,
            help,
            exit,
            wait: self.wait.moved_to(wait_x, wait_y),
            version: self.version.offset(0, dh),
            page_area: self.page_area.with_size(page_w, page_h),
        })
    }

    /// Launch, help and exit buttons. When the row no longer fits, all three
    /// shrink by the same factor and keep their gaps; otherwise help and exit
    /// follow the right edge.
    fn bottom_buttons(&self, dw: i32, dh: i32) -> [Rect; 3] {
        let gap = self.button_gap();
        let (mut wb1, mut wb2, mut wb3) = (self.launch.width(), self.help.width(), self.exit.width());
        let total = wb1 + wb2 + wb3;
        let available = self.exit.right - self.launch.left + dw - 2 * gap;

        let x1 = self.launch.left;
        let (x2, x3) = if available < total && total > 0 {
            let available = available.max(0);
            wb1 = wb1 * available / total;
            wb2 = wb2 * available / total;
            wb3 = wb3 * available / total;
            let x2 = x1 + wb1 + gap;
            (x2, x2 + wb2 + gap)
        } else {
            (self.help.left + dw, self.exit.left + dw)
        };

        let bh = self.exit.height();
        [
            Rect::from_size(x1, self.launch.top + dh, wb1, bh),
            Rect::from_size(x2, self.help.top + dh, wb2, bh),
            Rect::from_size(x3, self.exit.top + dh, wb3, bh),
        ]
    }
}
