use std::thread;

use super::*;

#[test]
fn test_progress_hidden_in_quiet_mode() {
    let progress = ScanProgress::new(true);
    progress.inc();
    progress.inc();
    progress.finish();
    assert_eq!(progress.count(), 2);
}

#[test]
fn test_progress_visible_path() {
    let progress = ScanProgress::new_with_visibility(false, true);
    for _ in 0..10 {
        progress.inc();
    }
    progress.finish();
    assert_eq!(progress.count(), 10);
}

#[test]
fn test_progress_clone_shares_counter() {
    let progress = ScanProgress::hidden();
    let cloned = progress.clone();

    progress.inc();
    cloned.inc();

    assert_eq!(progress.count(), 2);
}

#[test]
fn test_progress_from_many_threads() {
    let progress = ScanProgress::hidden();
    thread::scope(|s| {
        for _ in 0..4 {
            s.spawn(|| {
                for _ in 0..25 {
                    progress.inc();
                }
            });
        }
    });
    assert_eq!(progress.count(), 100);
}
