use crate::error::LaunchpadError;
use crate::geometry::Rect;
use log::debug;

/// One registered page: fixed logical index, current visible slot and the
/// position of its menu button
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageEntry {
    pub logical: usize,
    pub slot: Option<usize>,
    pub button: Rect,
}

impl PageEntry {
    pub fn is_visible(&self) -> bool {
        self.slot.is_some()
    }
}

/// Maps logical page order to visible slot order and keeps the menu buttons
/// stacked accordingly.
///
/// Invariant: the visible slots are exactly `0..visible_count()` and, sorted by
/// slot, visible pages appear in increasing logical order. Button `n` slots down
/// sits `n * row_height` below the first button position.
#[derive(Debug, Clone)]
pub struct PageTable {
    entries: Vec<PageEntry>,
    first_button: Rect,
    row_height: i32,
}

impl PageTable {
    /// All pages start visible, slot == logical index.
    ///
    /// `buttons` holds the initial menu button of each page in logical order; the
    /// row height is the vertical gap between the first two.
    pub fn new(buttons: Vec<Rect>) -> Self {
        let row_height = match (buttons.first(), buttons.get(1)) {
            (Some(a), Some(b)) => b.top - a.top,
            _ => 0,
        };
        let first_button = buttons.first().copied().unwrap_or_default();

        let entries = buttons
            .into_iter()
            .enumerate()
            .map(|(i, button)| PageEntry {
                logical: i,
                slot: Some(i),
                button,
            })
            .collect();

        Self {
            entries,
            first_button,
            row_height,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn row_height(&self) -> i32 {
        self.row_height
    }

    pub fn entries(&self) -> &[PageEntry] {
        &self.entries
    }

    pub fn entry(&self, logical: usize) -> Option<&PageEntry> {
        self.entries.get(logical)
    }

    pub fn slot_of(&self, logical: usize) -> Option<usize> {
        self.entries.get(logical).and_then(|e| e.slot)
    }

    /// Logical index of the page shown in `slot`
    pub fn page_at(&self, slot: usize) -> Option<usize> {
        self.entries
            .iter()
            .find(|e| e.slot == Some(slot))
            .map(|e| e.logical)
    }

    pub fn is_visible(&self, logical: usize) -> bool {
        self.slot_of(logical).is_some()
    }

    pub fn visible_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_visible()).count()
    }

    /// Logical indices of visible pages in slot order
    pub fn visible_pages(&self) -> Vec<usize> {
        let mut visible: Vec<&PageEntry> = self.entries.iter().filter(|e| e.is_visible()).collect();
        visible.sort_by_key(|e| e.slot);
        visible.into_iter().map(|e| e.logical).collect()
    }

    /// Remove a page from the menu. Pages below it move up one slot and one row.
    ///
    /// Returns `Ok(false)` if the page was already hidden.
    pub fn hide(&mut self, logical: usize) -> Result<bool, LaunchpadError> {
        let removed = self
            .entries
            .get(logical)
            .ok_or(LaunchpadError::UnknownPage(logical))?
            .slot;
        let Some(removed) = removed else {
            return Ok(false);
        };

        self.entries[logical].slot = None;
        for entry in self.entries.iter_mut() {
            if let Some(slot) = entry.slot.filter(|&s| s > removed) {
                entry.slot = Some(slot - 1);
                entry.button = entry.button.offset(0, -self.row_height);
            }
        }

        debug!("Hid page {} from slot {}", logical, removed);
        Ok(true)
    }

    /// Put a page back into the menu at the slot matching its logical order.
    /// Pages at or below that slot move down one slot and one row.
    ///
    /// The label is informational only. Returns `Ok(false)` if the page was
    /// already visible.
    pub fn unhide(&mut self, logical: usize, label: &str) -> Result<bool, LaunchpadError> {
        let entry = self
            .entries
            .get(logical)
            .ok_or(LaunchpadError::UnknownPage(logical))?;
        if entry.is_visible() {
            return Ok(false);
        }

        let insert_at = self
            .entries
            .iter()
            .filter(|e| e.is_visible() && e.logical < logical)
            .count();

        for entry in self.entries.iter_mut() {
            if let Some(slot) = entry.slot.filter(|&s| s >= insert_at) {
                entry.slot = Some(slot + 1);
                entry.button = entry.button.offset(0, self.row_height);
            }
        }

        let entry = &mut self.entries[logical];
        entry.slot = Some(insert_at);
        entry.button = self
            .first_button
            .offset(0, insert_at as i32 * self.row_height);

        debug!("Unhid page {} ('{}') at slot {}", logical, label, insert_at);
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROW: i32 = 24;

    fn buttons(n: usize) -> Vec<Rect> {
        (0..n)
            .map(|i| Rect::from_size(8, 80 + i as i32 * ROW, 100, 22))
            .collect()
    }

    fn slots(table: &PageTable) -> Vec<Option<usize>> {
        table.entries().iter().map(|e| e.slot).collect()
    }

    #[test]
    fn test_new_table_is_identity() {
        let table = PageTable::new(buttons(8));
        assert_eq!(table.row_height(), ROW);
        assert_eq!(table.visible_count(), 8);
        for i in 0..8 {
            assert_eq!(table.slot_of(i), Some(i));
            assert_eq!(table.page_at(i), Some(i));
        }
    }

    #[test]
    fn test_hide_then_unhide_page_three() {
        let mut table = PageTable::new(buttons(8));
        let before = table.entries().to_vec();

        assert!(table.hide(3).unwrap());
        assert_eq!(table.slot_of(3), None);
        assert_eq!(table.slot_of(4), Some(3));
        assert_eq!(table.entry(4).unwrap().button, before[4].button.offset(0, -ROW));
        assert_eq!(table.entry(2).unwrap().button, before[2].button);
        assert_eq!(table.page_at(3), Some(4));
        assert_eq!(table.visible_pages(), vec![0, 1, 2, 4, 5, 6, 7]);

        assert!(table.unhide(3, "Video").unwrap());
        assert_eq!(table.entries(), &before[..]);
    }

    #[test]
    fn test_hide_is_idempotent() {
        let mut table = PageTable::new(buttons(8));
        table.hide(4).unwrap();
        let snapshot = table.entries().to_vec();

        assert!(!table.hide(4).unwrap());
        assert_eq!(table.entries(), &snapshot[..]);
    }

    #[test]
    fn test_unhide_visible_page_is_noop() {
        let mut table = PageTable::new(buttons(8));
        let snapshot = table.entries().to_vec();

        assert!(!table.unhide(2, "Visual").unwrap());
        assert_eq!(table.entries(), &snapshot[..]);
    }

    #[test]
    fn test_unhide_between_hidden_pages() {
        let mut table = PageTable::new(buttons(8));
        table.hide(1).unwrap();
        table.hide(2).unwrap();
        table.hide(4).unwrap();
        assert_eq!(table.visible_pages(), vec![0, 3, 5, 6, 7]);

        // Page 2 slots in after page 0, ahead of page 3
        table.unhide(2, "Visual").unwrap();
        assert_eq!(table.visible_pages(), vec![0, 2, 3, 5, 6, 7]);
        assert_eq!(table.slot_of(2), Some(1));
        assert_eq!(table.entry(2).unwrap().button, buttons(8)[1]);
        assert_eq!(table.entry(3).unwrap().button, buttons(8)[2]);
        assert_eq!(slots(&table), vec![Some(0), None, Some(1), Some(2), None, Some(3), Some(4), Some(5)]);
    }

    #[test]
    fn test_hide_first_page() {
        let mut table = PageTable::new(buttons(3));
        table.hide(0).unwrap();
        assert_eq!(table.entry(1).unwrap().button, buttons(3)[0]);

        table.unhide(0, "Scenario").unwrap();
        assert_eq!(table.entry(0).unwrap().button, buttons(3)[0]);
        assert_eq!(table.entry(1).unwrap().button, buttons(3)[1]);
    }

    #[test]
    fn test_unknown_page() {
        let mut table = PageTable::new(buttons(2));
        assert!(matches!(table.hide(5), Err(LaunchpadError::UnknownPage(5))));
        assert!(matches!(table.unhide(9, "x"), Err(LaunchpadError::UnknownPage(9))));
    }
}
