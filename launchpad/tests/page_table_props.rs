//! Property-based tests for the page table and the resize layout.

use launchpad::{PageTable, Rect, ReferenceGeometry, SizeMode};
use proptest::prelude::*;

const ROW: i32 = 26;

fn table(pages: usize) -> PageTable {
    PageTable::new(
        (0..pages)
            .map(|i| Rect::from_size(8, 76 + i as i32 * ROW, 110, 24))
            .collect(),
    )
}

#[derive(Debug, Clone, Copy)]
enum Op {
    Hide(usize),
    Unhide(usize),
}

fn apply(table: &mut PageTable, op: Op) -> bool {
    match op {
        Op::Hide(p) => table.hide(p).unwrap(),
        Op::Unhide(p) => table.unhide(p, "page").unwrap(),
    }
}

// ============================================================================
// Strategies
// ============================================================================

/// Table size and a sequence of operations on its pages.
fn ops_strategy() -> impl Strategy<Value = (usize, Vec<Op>)> {
    (2usize..=10).prop_flat_map(|n| {
        let op = (any::<bool>(), 0..n).prop_map(|(hide, p)| if hide { Op::Hide(p) } else { Op::Unhide(p) });
        (Just(n), prop::collection::vec(op, 0..40))
    })
}

/// Client sizes from far below to well above the template size.
fn size_strategy() -> impl Strategy<Value = (i32, i32)> {
    (-50i32..2000, -50i32..1500)
}

fn assert_consistent(table: &PageTable) -> Result<(), TestCaseError> {
    let visible = table.visible_pages();
    prop_assert_eq!(visible.len(), table.visible_count());

    // Slots are 0..count in increasing logical order
    prop_assert!(visible.windows(2).all(|w| w[0] < w[1]));
    for (slot, &logical) in visible.iter().enumerate() {
        prop_assert_eq!(table.slot_of(logical), Some(slot));
        prop_assert_eq!(table.page_at(slot), Some(logical));

        let button = table.entry(logical).unwrap().button;
        prop_assert_eq!(button.top, 76 + slot as i32 * ROW);
    }
    prop_assert_eq!(table.page_at(visible.len()), None);
    Ok(())
}

// ============================================================================
// Page table properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    /// Any sequence of hides and unhides keeps slots dense, ordered and
    /// matched to button rows.
    #[test]
    fn slots_stay_ordered_and_dense((n, ops) in ops_strategy()) {
        let mut t = table(n);
        for op in ops {
            apply(&mut t, op);
            assert_consistent(&t)?;
        }
    }

    /// Repeating an operation changes nothing.
    #[test]
    fn hide_and_unhide_are_idempotent((n, ops) in ops_strategy(), last in 0usize..10) {
        let mut t = table(n);
        for op in ops {
            apply(&mut t, op);
        }
        let last = last % n;

        let first = apply(&mut t, Op::Hide(last));
        let snapshot = t.entries().to_vec();
        prop_assert!(!apply(&mut t, Op::Hide(last)));
        prop_assert_eq!(t.entries(), &snapshot[..]);
        prop_assert!(!first || !t.is_visible(last));

        apply(&mut t, Op::Unhide(last));
        let snapshot = t.entries().to_vec();
        prop_assert!(!apply(&mut t, Op::Unhide(last)));
        prop_assert_eq!(t.entries(), &snapshot[..]);
    }

    /// Hiding a visible page and putting it back restores the table.
    #[test]
    fn hide_then_unhide_round_trips((n, ops) in ops_strategy(), page in 0usize..10) {
        let mut t = table(n);
        for op in ops {
            apply(&mut t, op);
        }
        let page = page % n;
        t.unhide(page, "page").unwrap();

        let before = t.entries().to_vec();
        prop_assert!(t.hide(page).unwrap());
        prop_assert!(t.unhide(page, "page").unwrap());
        prop_assert_eq!(t.entries(), &before[..]);
    }

    /// Unknown pages are rejected without touching the table.
    #[test]
    fn out_of_range_pages_are_errors(n in 1usize..10, extra in 0usize..5) {
        let mut t = table(n);
        prop_assert!(t.hide(n + extra).is_err());
        prop_assert!(t.unhide(n + extra, "nope").is_err());
        prop_assert_eq!(t.visible_count(), n);
    }
}

// ============================================================================
// Layout properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// The page area never drops below 10x10.
    #[test]
    fn page_area_has_a_floor((w, h) in size_strategy()) {
        let layout = ReferenceGeometry::template()
            .layout(w, h, SizeMode::Restored)
            .unwrap();
        prop_assert!(layout.page_area.width() >= 10);
        prop_assert!(layout.page_area.height() >= 10);
    }

    /// Bottom buttons never overlap and keep their reference height.
    #[test]
    fn bottom_buttons_do_not_overlap((w, h) in size_strategy()) {
        let r = ReferenceGeometry::template();
        let layout = r.layout(w, h, SizeMode::Maximized).unwrap();
        prop_assert!(layout.launch.right <= layout.help.left);
        prop_assert!(layout.help.right <= layout.exit.left);
        prop_assert_eq!(layout.exit.height(), r.exit.height());
        prop_assert_eq!(layout.launch.left, r.launch.left);
    }

    /// Minimized windows are never laid out.
    #[test]
    fn minimized_has_no_layout((w, h) in size_strategy()) {
        prop_assert!(ReferenceGeometry::template().layout(w, h, SizeMode::Minimized).is_none());
    }
}
