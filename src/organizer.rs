use crate::config::AppConfig;
use crate::error::Error;
use crate::platform::{self, TimestampSource};
use crate::progress::ProgressReporter;
use crate::scanner::{self, SourceWalker};
use chrono::{DateTime, Local};
use std::fmt::Write as _;
use std::fs::{self, Metadata};
use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, error, info, warn};

/// A file discovered under the source root.
#[derive(Debug, Clone)]
pub struct FileEntry {
    pub source: PathBuf,
    pub created: DateTime<Local>,
    pub timestamp_source: TimestampSource,
}

impl FileEntry {
    pub fn from_metadata(path: &Path, metadata: &Metadata) -> Result<Self, Error> {
        let (created, timestamp_source) =
            platform::creation_time(metadata).map_err(|source| Error::Timestamp {
                path: path.to_path_buf(),
                source,
            })?;

        Ok(Self {
            source: path.to_path_buf(),
            created: DateTime::<Local>::from(created),
            timestamp_source,
        })
    }
}

/// What happened to a single discovered file.
#[derive(Debug)]
pub enum Outcome {
    Copied { source: PathBuf, target: PathBuf },
    DuplicateSkipped { source: PathBuf, target: PathBuf },
    Failed { source: PathBuf, error: Error },
}

impl Outcome {
    pub fn source(&self) -> &Path {
        match self {
            Outcome::Copied { source, .. }
            | Outcome::DuplicateSkipped { source, .. }
            | Outcome::Failed { source, .. } => source,
        }
    }
}

#[derive(Debug, Default)]
pub struct RunReport {
    pub outcomes: Vec<Outcome>,
}

impl RunReport {
    pub fn copied(&self) -> usize {
        self.count(|o| matches!(o, Outcome::Copied { .. }))
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, Outcome::DuplicateSkipped { .. }))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, Outcome::Failed { .. }))
    }

    fn count(&self, predicate: impl Fn(&Outcome) -> bool) -> usize {
        self.outcomes.iter().filter(|o| predicate(o)).count()
    }
}

/// Render the folder name for a creation instant.
///
/// The template is handed to chrono's strftime formatter as is. Specifiers chrono
/// cannot parse make rendering fail rather than produce a partial name.
pub fn format_folder_name(instant: &DateTime<Local>, date_format: &str) -> Result<String, Error> {
    let mut name = String::new();
    write!(name, "{}", instant.format(date_format))
        .map_err(|_| Error::DateFormat(date_format.to_string()))?;
    Ok(name)
}

/// `target_dir/<file name of source>`. Source directories are flattened away.
pub fn target_path(target_dir: &Path, source: &Path) -> Result<PathBuf, Error> {
    let file_name = source
        .file_name()
        .ok_or_else(|| Error::MissingFileName(source.to_path_buf()))?;
    Ok(target_dir.join(file_name))
}

/// Copy file contents and permission bits, then carry over access and modification times.
pub fn copy_with_metadata(source: &Path, target: &Path, metadata: &Metadata) -> Result<(), Error> {
    fs::copy(source, target)?;
    platform::copy_file_times(metadata, target)?;
    Ok(())
}

pub struct Organizer {
    source: PathBuf,
    destination: PathBuf,
    config: AppConfig,
}

impl Organizer {
    pub fn new(source: impl AsRef<Path>, destination: impl AsRef<Path>, config: AppConfig) -> Self {
        Self {
            source: source.as_ref().to_path_buf(),
            destination: destination.as_ref().to_path_buf(),
            config,
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Walk the source tree and copy every file into its date folder.
    ///
    /// Only problems with the source root or destination root are returned as errors;
    /// everything that goes wrong for a single file ends up in the report.
    pub fn run(&self, reporter: &dyn ProgressReporter) -> Result<RunReport, Error> {
        self.check_source()?;
        fs::create_dir_all(&self.destination)?;

        let walker = self.build_walker()?;

        info!(
            "Organizing {} into {} using '{}'",
            self.source.display(),
            self.destination.display(),
            self.config.date_format
        );
        reporter.on_walk_start(&self.source.to_string_lossy());
        let start = Instant::now();

        let mut report = RunReport::default();
        let mut fallback_warned = false;

        for file in walker.files() {
            let outcome = match file {
                Ok(path) => self.process_file(&path, &mut fallback_warned),
                Err(err) if err.depth() == 0 => return Err(Error::Walk(err)),
                Err(err) => Outcome::Failed {
                    source: err.path().unwrap_or(&self.source).to_path_buf(),
                    error: Error::Walk(err),
                },
            };

            log_outcome(&outcome);
            reporter.on_outcome(report.outcomes.len() + 1, &outcome);
            report.outcomes.push(outcome);
        }

        let duration = start.elapsed();
        debug!(
            "Walk completed in {:.2}s: {} copied, {} skipped, {} failed",
            duration.as_secs_f64(),
            report.copied(),
            report.skipped(),
            report.failed(),
        );
        reporter.on_walk_complete(&report, duration.as_secs_f64());

        Ok(report)
    }

    fn check_source(&self) -> Result<(), Error> {
        let metadata = match fs::metadata(&self.source) {
            Ok(metadata) => metadata,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Err(Error::SourceNotFound(self.source.clone()))
            }
            Err(err) => return Err(err.into()),
        };
        if !metadata.is_dir() {
            return Err(Error::SourceNotDirectory(self.source.clone()));
        }
        // An unreadable root is fatal, unlike unreadable subdirectories.
        fs::read_dir(&self.source)?;
        Ok(())
    }

    fn build_walker(&self) -> Result<SourceWalker, Error> {
        let patterns = scanner::compile_patterns(&self.config.ignore_patterns);
        let mut walker = SourceWalker::new(&self.source).with_ignore_patterns(patterns);

        let source = fs::canonicalize(&self.source)?;
        let destination = fs::canonicalize(&self.destination)?;
        if let Ok(relative) = destination.strip_prefix(&source) {
            if !relative.as_os_str().is_empty() {
                walker = walker.excluding(&self.source.join(relative));
            }
        }

        Ok(walker)
    }

    fn process_file(&self, path: &Path, fallback_warned: &mut bool) -> Outcome {
        match self.copy_to_date_folder(path, fallback_warned) {
            Ok(outcome) => outcome,
            Err(error) => Outcome::Failed {
                source: path.to_path_buf(),
                error,
            },
        }
    }

    fn copy_to_date_folder(&self, path: &Path, fallback_warned: &mut bool) -> Result<Outcome, Error> {
        let metadata = fs::metadata(path)?;
        if !metadata.is_file() {
            return Err(Error::NotRegularFile(path.to_path_buf()));
        }
        let entry = FileEntry::from_metadata(path, &metadata)?;
        debug!(
            "{} created {} ({})",
            entry.source.display(),
            entry.created,
            entry.timestamp_source
        );
        if entry.timestamp_source == TimestampSource::StatusChange && !*fallback_warned {
            warn!("Filesystem reports no creation time; using status-change time instead");
            *fallback_warned = true;
        }

        let folder_name = format_folder_name(&entry.created, &self.config.date_format)?;
        let target_dir = self.destination.join(folder_name);
        fs::create_dir_all(&target_dir)?;

        let target = target_path(&target_dir, path)?;
        if target.exists() {
            if self.config.ignore_duplicates {
                return Ok(Outcome::DuplicateSkipped {
                    source: entry.source,
                    target,
                });
            }
            if fs::canonicalize(path)? == fs::canonicalize(&target)? {
                return Err(Error::SameFile(target));
            }
        }

        copy_with_metadata(path, &target, &metadata)?;
        Ok(Outcome::Copied {
            source: entry.source,
            target,
        })
    }
}

fn log_outcome(outcome: &Outcome) {
    match outcome {
        Outcome::Copied { source, target } => {
            info!("Copied: {} → {}", source.display(), target.display())
        }
        Outcome::DuplicateSkipped { target, .. } => {
            warn!("Duplicate skipped: {}", target.display())
        }
        Outcome::Failed { source, error } => {
            error!("Error processing {}: {}", source.display(), error)
        }
    }
}
