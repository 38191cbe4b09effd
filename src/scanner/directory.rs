use std::fs::File;
use std::io::{BufRead, BufReader, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::{debug, info, warn};
use walkdir::{DirEntry, WalkDir};

use super::{FileFilter, PathFilter};
use crate::collector::{ErrorCode, ErrorCollector, ScanError};
use crate::config::Config;
use crate::detector::Detector;
use crate::error::{GuardError, Result};
use crate::output::ScanProgress;
use crate::path_utils::relative_slash_path;

/// Walks a directory tree and runs every detector over every selected file.
///
/// The walk itself runs on the calling thread. Selected files are processed
/// on a dedicated pool of `parallelism` threads, so at most that many files
/// are open at once.
pub struct Scanner<F: FileFilter = PathFilter> {
    root: PathBuf,
    filter: F,
    detectors: Vec<Box<dyn Detector>>,
    parallelism: usize,
    pool: ThreadPool,
    progress: ScanProgress,
}

impl Scanner<PathFilter> {
    /// Build a scanner from a configuration.
    ///
    /// # Errors
    /// Returns an error if a glob pattern is invalid, parallelism is 0, or the
    /// worker pool cannot be started.
    pub fn from_config(config: &Config) -> Result<Self> {
        let filter = PathFilter::new(&config.include, &config.exclude)?;
        let detectors = config
            .detectors()
            .into_iter()
            .map(|kind| kind.build())
            .collect();
        Self::new(&config.directory, filter, detectors, config.parallelism)
    }
}

impl<F: FileFilter + Sync> Scanner<F> {
    /// # Errors
    /// Returns an error if `parallelism` is 0 or the worker pool cannot be
    /// started.
    pub fn new(
        root: impl Into<PathBuf>,
        filter: F,
        detectors: Vec<Box<dyn Detector>>,
        parallelism: usize,
    ) -> Result<Self> {
        if parallelism == 0 {
            return Err(GuardError::Config(
                "parallelism must be at least 1".to_string(),
            ));
        }

        let pool = ThreadPoolBuilder::new()
            .num_threads(parallelism)
            .thread_name(|i| format!("trojan-guard-worker-{i}"))
            .build()?;

        Ok(Self {
            root: root.into(),
            filter,
            detectors,
            parallelism,
            pool,
            progress: ScanProgress::hidden(),
        })
    }

    #[must_use]
    pub fn with_progress(mut self, progress: ScanProgress) -> Self {
        self.progress = progress;
        self
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub const fn parallelism(&self) -> usize {
        self.parallelism
    }

    /// Scan the tree and return everything the detectors and the walk
    /// reported.
    ///
    /// Blocks until the walk is over and every dispatched file is done. A walk
    /// failure adds one `IO_DIRECTORY` record and stops dispatching new files;
    /// files already dispatched still finish.
    pub fn run(&self) -> ErrorCollector {
        let collector = ErrorCollector::new();
        info!(
            root = %self.root.display(),
            parallelism = self.parallelism,
            detectors = self.detectors.len(),
            "starting scan"
        );

        let walk = self.pool.in_place_scope(|scope| {
            let walker = WalkDir::new(&self.root)
                .follow_links(false)
                .follow_root_links(false);

            for entry in walker {
                let entry = entry?;
                let Some(relative) = self.select(&entry) else {
                    continue;
                };

                let collector = &collector;
                scope.spawn(move |_| self.process_file(entry.path(), &relative, collector));
            }
            Ok::<(), walkdir::Error>(())
        });

        if let Err(err) = walk {
            warn!(error = %err, "directory walk aborted");
            collector.add(ScanError::new(
                ErrorCode::IoDirectory,
                err.to_string(),
                "",
                0,
                0,
            ));
        }

        self.progress.finish();
        info!(
            files = self.progress.count(),
            records = collector.len(),
            "scan finished"
        );
        collector
    }

    /// Relative path of `entry` if it is a regular file the filter accepts.
    fn select(&self, entry: &DirEntry) -> Option<String> {
        let file_type = entry.file_type();
        if !file_type.is_file() {
            // Directories are descended by the walker. Symlinks are never
            // followed; devices, FIFOs and sockets have no content to read.
            if file_type.is_symlink() {
                debug!(path = %entry.path().display(), "skipping symbolic link");
            }
            return None;
        }

        let mut relative = relative_slash_path(&self.root, entry.path());
        if relative.is_empty() {
            // The root itself is a file
            relative = entry.file_name().to_string_lossy().into_owned();
        }

        if self.filter.should_scan(&relative) {
            debug!(path = %relative, "dispatching file");
            Some(relative)
        } else {
            debug!(path = %relative, "filtered out");
            None
        }
    }

    fn process_file(&self, path: &Path, relative: &str, collector: &ErrorCollector) {
        match File::open(path) {
            Ok(file) => self.inspect(relative, &mut BufReader::new(file), collector),
            Err(err) => {
                warn!(path = %relative, error = %err, "failed to open file");
                collector.add(ScanError::io(ErrorCode::IoFile, &err, relative));
            }
        }
        self.progress.inc();
    }

    /// Run the detectors in order, rewinding `reader` before each one.
    fn inspect<R: BufRead + Seek>(
        &self,
        relative: &str,
        reader: &mut R,
        collector: &ErrorCollector,
    ) {
        for detector in &self.detectors {
            if let Err(err) = reader.seek(SeekFrom::Start(0)) {
                warn!(path = %relative, detector = %detector.code(), error = %err, "failed to rewind file");
                collector.add(ScanError::io(ErrorCode::IoSeek, &err, relative));
                continue;
            }
            collector.add_all(detector.detect(relative, reader));
        }
    }
}

impl<F: FileFilter> std::fmt::Debug for Scanner<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scanner")
            .field("root", &self.root)
            .field("parallelism", &self.parallelism)
            .field("detectors", &self.detectors.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "directory_tests.rs"]
mod tests;
