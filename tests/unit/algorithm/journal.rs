//! Tests for decision frames and the depth policy

#[cfg(test)]
mod tests {
    use wavetile::algorithm::journal::{BacktrackJournal, JournalEntry};

    #[test]
    fn test_disabled_journal_keeps_nothing() {
        let mut journal = BacktrackJournal::new(0);
        assert!(!journal.enabled());
        journal.open_frame(3, 1);
        journal.record(JournalEntry::Ban { cell: 3, pattern: 0 });
        assert_eq!(journal.frame_count(), 0);
        assert!(journal.pop_frame().is_none());
    }

    #[test]
    fn test_entries_land_in_latest_frame() {
        let mut journal = BacktrackJournal::new(-1);
        journal.open_frame(0, 0);
        journal.record(JournalEntry::Ban { cell: 0, pattern: 1 });
        journal.open_frame(1, 0);
        journal.record(JournalEntry::Ban { cell: 1, pattern: 1 });
        journal.record(JournalEntry::SupportDecrement {
            cell: 2,
            pattern: 0,
            direction: 1,
        });

        let frame = journal.pop_frame().unwrap();
        assert_eq!(frame.cell, 1);
        assert_eq!(frame.entries.len(), 2);

        let frame = journal.pop_frame().unwrap();
        assert_eq!(frame.cell, 0);
        assert_eq!(frame.entries.len(), 1);
        assert!(journal.pop_frame().is_none());
    }

    // A bounded journal silently drops its oldest frame
    #[test]
    fn test_depth_bound_discards_oldest() {
        let mut journal = BacktrackJournal::new(2);
        journal.open_frame(0, 0);
        journal.open_frame(1, 0);
        journal.open_frame(2, 0);
        assert_eq!(journal.frame_count(), 2);

        assert_eq!(journal.pop_frame().unwrap().cell, 2);
        assert_eq!(journal.pop_frame().unwrap().cell, 1);
        assert!(journal.pop_frame().is_none());
    }

    // Records made with no open frame are irrevocable by design
    #[test]
    fn test_records_without_frame_discarded() {
        let mut journal = BacktrackJournal::new(-1);
        journal.record(JournalEntry::Ban { cell: 0, pattern: 0 });
        journal.open_frame(0, 0);
        let frame = journal.pop_frame().unwrap();
        assert!(frame.entries.is_empty());
    }

    #[test]
    fn test_undo_callbacks_run_on_replay() {
        use std::cell::Cell;
        use std::rc::Rc;

        let touched = Rc::new(Cell::new(false));
        let handle = Rc::clone(&touched);

        let mut journal = BacktrackJournal::new(-1);
        journal.open_frame(0, 0);
        journal.record(JournalEntry::Undo(Box::new(move || handle.set(true))));

        let frame = journal.pop_frame().unwrap();
        for entry in frame.entries {
            if let JournalEntry::Undo(mut callback) = entry {
                callback();
            }
        }
        assert!(touched.get());
    }
}
