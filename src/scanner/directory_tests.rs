use std::collections::BTreeSet;
use std::io::{self, Cursor, Read};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::Duration;

use tempfile::TempDir;

use super::*;
use crate::detector::DetectorKind;

struct AcceptAllFilter;

impl FileFilter for AcceptAllFilter {
    fn should_scan(&self, _relative_path: &str) -> bool {
        true
    }
}

/// Reports one record per file, tagged with a fixed detail string.
struct TagDetector(&'static str);

impl Detector for TagDetector {
    fn code(&self) -> ErrorCode {
        ErrorCode::Bidi
    }

    fn detect(&self, path: &str, reader: &mut dyn BufRead) -> Vec<ScanError> {
        let mut content = String::new();
        let _ = reader.read_to_string(&mut content);
        vec![ScanError::new(ErrorCode::Bidi, self.0, path, 1, 1)]
    }
}

/// Tracks how many files are being inspected at the same time.
#[derive(Default)]
struct InFlight {
    current: AtomicUsize,
    peak: AtomicUsize,
}

struct SlowDetector(Arc<InFlight>);

impl Detector for SlowDetector {
    fn code(&self) -> ErrorCode {
        ErrorCode::Unicode
    }

    fn detect(&self, _path: &str, _reader: &mut dyn BufRead) -> Vec<ScanError> {
        let now = self.0.current.fetch_add(1, Ordering::SeqCst) + 1;
        self.0.peak.fetch_max(now, Ordering::SeqCst);
        thread::sleep(Duration::from_millis(5));
        self.0.current.fetch_sub(1, Ordering::SeqCst);
        Vec::new()
    }
}

/// In-memory file whose first `failures` rewinds fail.
struct FlakySeek {
    data: Cursor<Vec<u8>>,
    failures: usize,
}

impl Read for FlakySeek {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.data.read(buf)
    }
}

impl Seek for FlakySeek {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        if self.failures > 0 {
            self.failures -= 1;
            return Err(io::Error::other("seek refused"));
        }
        self.data.seek(pos)
    }
}

fn boxed(detector: impl Detector + 'static) -> Box<dyn Detector> {
    Box::new(detector)
}

fn write(dir: &TempDir, relative: &str, content: &str) {
    let path = dir.path().join(relative);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, content).unwrap();
}

fn bidi_scanner(root: &Path, filter: PathFilter) -> Scanner {
    Scanner::new(root, filter, vec![DetectorKind::Bidi.build()], 4).unwrap()
}

fn files_reported(collector: &ErrorCollector) -> BTreeSet<String> {
    collector
        .get()
        .iter()
        .map(|e| e.file().to_string())
        .collect()
}

// =============================================================================
// Construction
// =============================================================================

#[test]
fn zero_parallelism_is_rejected() {
    let result = Scanner::new(".", AcceptAllFilter, Vec::new(), 0);
    assert!(matches!(result, Err(GuardError::Config(_))));
}

#[test]
fn from_config_builds_enabled_detectors() {
    let config = Config {
        detect_bidi: true,
        detect_unicode: true,
        parallelism: 3,
        ..Config::default()
    };
    let scanner = Scanner::from_config(&config).unwrap();
    assert_eq!(scanner.parallelism(), 3);
    assert_eq!(scanner.detectors.len(), 2);
    assert_eq!(scanner.detectors[0].code(), ErrorCode::Bidi);
    assert_eq!(scanner.detectors[1].code(), ErrorCode::Unicode);
}

#[test]
fn from_config_rejects_bad_pattern() {
    let config = Config {
        exclude: vec!["[oops".to_string()],
        ..Config::default()
    };
    assert!(matches!(
        Scanner::from_config(&config),
        Err(GuardError::InvalidPattern { .. })
    ));
}

// =============================================================================
// Walking and filtering
// =============================================================================

#[test]
fn scans_nested_files_with_relative_paths() {
    let dir = TempDir::new().unwrap();
    write(&dir, "top.txt", "\u{202E}");
    write(&dir, "a/b/deep.txt", "x\u{202E}");

    let collector = bidi_scanner(dir.path(), PathFilter::default()).run();

    let errors = collector.get();
    assert_eq!(errors.len(), 2);
    assert_eq!(
        files_reported(&collector),
        BTreeSet::from(["top.txt".to_string(), "a/b/deep.txt".to_string()])
    );
}

#[test]
fn clean_tree_has_no_records() {
    let dir = TempDir::new().unwrap();
    write(&dir, "main.go", "package main\n");
    write(&dir, "sub/readme.md", "# hello\n");

    let collector = bidi_scanner(dir.path(), PathFilter::default()).run();
    assert!(collector.is_empty());
}

#[test]
fn include_and_exclude_are_applied() {
    let dir = TempDir::new().unwrap();
    write(&dir, "x.go", "\u{202E}");
    write(&dir, "vendor/x.go", "\u{202E}");
    write(&dir, "notes.txt", "\u{202E}");

    let filter = PathFilter::new(
        &["**/*.go".to_string()],
        &["vendor/**".to_string()],
    )
    .unwrap();
    let collector = bidi_scanner(dir.path(), filter).run();

    assert_eq!(
        files_reported(&collector),
        BTreeSet::from(["x.go".to_string()])
    );
}

#[test]
fn root_that_is_a_file_is_scanned() {
    let dir = TempDir::new().unwrap();
    write(&dir, "single.txt", "\u{202E}");

    let collector = bidi_scanner(&dir.path().join("single.txt"), PathFilter::default()).run();

    let errors = collector.get();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].file(), "single.txt");
}

#[test]
fn missing_root_reports_directory_error() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("does-not-exist");

    let errors = bidi_scanner(&missing, PathFilter::default()).run().into_errors();

    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].code(), ErrorCode::IoDirectory);
    assert_eq!(errors[0].file(), "");
    assert_eq!(errors[0].line(), 0);
    assert_eq!(errors[0].column(), 0);
}

#[cfg(unix)]
#[test]
fn symlinks_are_never_followed() {
    use std::os::unix::fs::symlink;

    let dir = TempDir::new().unwrap();
    let outside = TempDir::new().unwrap();
    write(&outside, "evil.txt", "\u{202E}");
    std::fs::create_dir(dir.path().join("testdir")).unwrap();

    symlink(dir.path().join("testdir"), dir.path().join("testsymlink")).unwrap();
    symlink("nonexistent", dir.path().join("testdanglingsymlink")).unwrap();
    symlink(outside.path(), dir.path().join("outside")).unwrap();
    symlink(outside.path().join("evil.txt"), dir.path().join("evil-link.txt")).unwrap();

    let collector = bidi_scanner(dir.path(), PathFilter::default()).run();
    assert!(collector.is_empty(), "unexpected records: {:?}", collector.get());
}

#[cfg(unix)]
#[test]
fn symlinked_root_is_not_followed() {
    use std::os::unix::fs::symlink;

    let dir = TempDir::new().unwrap();
    write(&dir, "real/bidi.txt", "\u{202E}");
    symlink(dir.path().join("real"), dir.path().join("link")).unwrap();

    let collector = bidi_scanner(&dir.path().join("link"), PathFilter::default()).run();
    assert!(collector.is_empty());
}

#[cfg(unix)]
#[test]
fn special_files_are_skipped() {
    use std::os::unix::net::UnixListener;
    use std::process::Command;

    let dir = TempDir::new().unwrap();
    write(&dir, "a.txt", "\u{202E}");
    let _socket = UnixListener::bind(dir.path().join("sock")).unwrap();
    let status = Command::new("mkfifo")
        .arg(dir.path().join("pipe"))
        .status()
        .unwrap();
    assert!(status.success());

    let collector = bidi_scanner(dir.path(), PathFilter::default()).run();

    let errors = collector.get();
    assert_eq!(errors.len(), 1, "unexpected records: {errors:?}");
    assert_eq!(errors[0].code(), ErrorCode::Bidi);
    assert_eq!(
        files_reported(&collector),
        BTreeSet::from(["a.txt".to_string()])
    );
}

// =============================================================================
// Per-file processing
// =============================================================================

#[test]
fn open_failure_records_file_error() {
    let dir = TempDir::new().unwrap();
    let scanner = bidi_scanner(dir.path(), PathFilter::default());
    let collector = ErrorCollector::new();

    scanner.process_file(&dir.path().join("vanished.txt"), "vanished.txt", &collector);

    let errors = collector.into_errors();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].code(), ErrorCode::IoFile);
    assert_eq!(errors[0].file(), "vanished.txt");
    assert_eq!((errors[0].line(), errors[0].column()), (0, 0));
}

#[test]
fn seek_failure_skips_only_that_detector() {
    let scanner = Scanner::new(
        ".",
        AcceptAllFilter,
        vec![boxed(TagDetector("first")), boxed(TagDetector("second"))],
        1,
    )
    .unwrap();
    let collector = ErrorCollector::new();
    let mut reader = io::BufReader::new(FlakySeek {
        data: Cursor::new(b"content".to_vec()),
        failures: 1,
    });

    scanner.inspect("flaky.txt", &mut reader, &collector);

    let errors = collector.into_errors();
    assert_eq!(errors.len(), 2);
    assert_eq!(errors[0].code(), ErrorCode::IoSeek);
    assert_eq!(errors[0].file(), "flaky.txt");
    assert_eq!(errors[1].details(), "second");
}

#[test]
fn every_detector_sees_whole_file_in_order() {
    let dir = TempDir::new().unwrap();
    write(&dir, "mixed.txt", "á\u{202E}");

    let scanner = Scanner::new(
        dir.path(),
        AcceptAllFilter,
        vec![DetectorKind::Bidi.build(), DetectorKind::Unicode.build()],
        2,
    )
    .unwrap();
    let errors = scanner.run().into_errors();

    let codes: Vec<ErrorCode> = errors.iter().map(ScanError::code).collect();
    assert_eq!(
        codes,
        vec![
            ErrorCode::Bidi,
            ErrorCode::Unicode,
            ErrorCode::Unicode,
            ErrorCode::Unicode,
            ErrorCode::Unicode,
            ErrorCode::Unicode,
        ]
    );
}

#[test]
fn no_detectors_means_no_records() {
    let dir = TempDir::new().unwrap();
    write(&dir, "bidi.txt", "\u{202E}");

    let scanner = Scanner::new(dir.path(), AcceptAllFilter, Vec::new(), 2).unwrap();
    assert!(scanner.run().is_empty());
}

#[test]
fn progress_counts_processed_files() {
    let dir = TempDir::new().unwrap();
    for i in 0..5 {
        write(&dir, &format!("f{i}.txt"), "plain");
    }

    let progress = ScanProgress::hidden();
    let scanner = bidi_scanner(dir.path(), PathFilter::default()).with_progress(progress.clone());
    let _ = scanner.run();

    assert_eq!(progress.count(), 5);
}

// =============================================================================
// Concurrency
// =============================================================================

#[test]
fn parallelism_bounds_in_flight_files() {
    let dir = TempDir::new().unwrap();
    for i in 0..24 {
        write(&dir, &format!("d{}/f{i}.txt", i % 3), "plain");
    }

    for parallelism in [1, 2, 4] {
        let in_flight = Arc::new(InFlight::default());
        let scanner = Scanner::new(
            dir.path(),
            AcceptAllFilter,
            vec![boxed(SlowDetector(Arc::clone(&in_flight)))],
            parallelism,
        )
        .unwrap();

        let collector = scanner.run();

        assert!(collector.is_empty());
        let peak = in_flight.peak.load(Ordering::SeqCst);
        assert!(peak >= 1);
        assert!(
            peak <= parallelism,
            "peak {peak} exceeded parallelism {parallelism}"
        );
        assert_eq!(in_flight.current.load(Ordering::SeqCst), 0);
    }
}

#[test]
fn run_waits_for_all_workers() {
    let dir = TempDir::new().unwrap();
    for i in 0..40 {
        write(&dir, &format!("f{i}.txt"), "\u{202E}");
    }

    let errors = bidi_scanner(dir.path(), PathFilter::default()).run().into_errors();
    assert_eq!(errors.len(), 40);
}

#[test]
fn repeated_runs_agree() {
    let dir = TempDir::new().unwrap();
    write(&dir, "a.txt", "\u{202E}\u{2066}");
    write(&dir, "b/c.txt", "x\ny\u{202B}");

    let scanner = bidi_scanner(dir.path(), PathFilter::default());
    let mut first = scanner.run().into_errors();
    let mut second = scanner.run().into_errors();
    first.sort();
    second.sort();

    assert_eq!(first, second);
    assert_eq!(first.len(), 3);
}
