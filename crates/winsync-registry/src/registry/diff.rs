//! Membership change detection.

use winsync_common::WindowDescriptor;

/// Whether the set of windows changed between two snapshots.
///
/// Compares length, then ids position by position. A pure reorder counts as
/// a change; shape-only edits do not.
pub(crate) fn windows_changed(previous: &[WindowDescriptor], next: &[WindowDescriptor]) -> bool {
    if previous.len() != next.len() {
        return true;
    }
    previous.iter().zip(next).any(|(a, b)| a.id != b.id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use winsync_common::{WindowId, WindowShape};

    fn win(id: u64, x: f64) -> WindowDescriptor {
        WindowDescriptor {
            id: WindowId(id),
            shape: WindowShape::new(x, 0.0, 100.0, 100.0),
            meta_data: serde_json::Value::Null,
        }
    }

    #[test]
    fn empty_snapshots_are_equal() {
        assert!(!windows_changed(&[], &[]));
    }

    #[test]
    fn appended_window_is_a_change() {
        assert!(windows_changed(
            &[win(1, 0.0), win(2, 0.0)],
            &[win(1, 0.0), win(2, 0.0), win(3, 0.0)]
        ));
    }

    #[test]
    fn removed_window_is_a_change() {
        assert!(windows_changed(&[win(1, 0.0), win(2, 0.0)], &[win(1, 0.0)]));
    }

    #[test]
    fn shape_only_edit_is_not_a_change() {
        assert!(!windows_changed(&[win(1, 0.0)], &[win(1, 50.0)]));
    }

    #[test]
    fn same_length_different_id_is_a_change() {
        assert!(windows_changed(&[win(1, 0.0), win(2, 0.0)], &[win(1, 0.0), win(4, 0.0)]));
    }

    #[test]
    fn reorder_is_a_change() {
        assert!(windows_changed(&[win(1, 0.0), win(2, 0.0)], &[win(2, 0.0), win(1, 0.0)]));
    }
}
