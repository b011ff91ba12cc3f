use crate::error::Result;
use crate::utils::constants::SELECT_FILES_LABEL;
use crate::utils::progress::{progress_begin, progress_end, show_progress, ProgressReporter};
use crate::utils::time::plural_suffix;
use regex::Regex;
use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, Level};
use walkdir::WalkDir;

/// Named capture groups of a path match, keyed by group name
pub type FieldMap = HashMap<String, String>;

/// Predicate deciding whether a matched path is selected
pub type Selector<'a> = dyn Fn(&FieldMap) -> bool + 'a;

/// Collect files below `paths`, optionally filtered by `pattern` and `selector`.
///
/// Directories are walked recursively, anything else is taken as a file.
/// With a pattern, a path is kept only when the pattern matches somewhere
/// in it and `selector` (if any) accepts the named groups. Without a
/// pattern every visited path is kept. Paths are returned absolute, in the
/// order they were visited.
pub fn select_files<P: AsRef<Path>>(
    paths: &[P],
    selector: Option<&Selector<'_>>,
    pattern: Option<&Regex>,
) -> Result<Vec<PathBuf>> {
    select(paths, selector, pattern, None)
}

/// Like [`select_files`], compiling `pattern` first
pub fn select_files_str<P: AsRef<Path>>(
    paths: &[P],
    selector: Option<&Selector<'_>>,
    pattern: Option<&str>,
) -> Result<Vec<PathBuf>> {
    let regex = pattern.map(Regex::new).transpose()?;
    select(paths, selector, regex.as_ref(), None)
}

/// Builder for a file selection
pub struct FileSelector<'a> {
    paths: Vec<PathBuf>,
    pattern: Option<Regex>,
    selector: Option<Box<Selector<'a>>>,
    progress_bar: bool,
}

impl<'a> FileSelector<'a> {
    pub fn new() -> Self {
        Self {
            paths: Vec::new(),
            pattern: None,
            selector: None,
            progress_bar: false,
        }
    }

    pub fn path(mut self, path: impl Into<PathBuf>) -> Self {
        self.paths.push(path.into());
        self
    }

    pub fn paths<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.paths.extend(paths.into_iter().map(Into::into));
        self
    }

    pub fn pattern(mut self, pattern: &str) -> Result<Self> {
        self.pattern = Some(Regex::new(pattern)?);
        Ok(self)
    }

    pub fn regex(mut self, regex: Regex) -> Self {
        self.pattern = Some(regex);
        self
    }

    pub fn selector(mut self, selector: impl Fn(&FieldMap) -> bool + 'a) -> Self {
        self.selector = Some(Box::new(selector));
        self
    }

    /// Show a spinner counting visited files instead of the plain progress text
    pub fn with_progress_bar(mut self, enabled: bool) -> Self {
        self.progress_bar = enabled;
        self
    }

    pub fn select(&self) -> Result<Vec<PathBuf>> {
        let reporter = if self.progress_bar {
            Some(ProgressReporter::new_spinner(SELECT_FILES_LABEL))
        } else {
            None
        };

        select(
            &self.paths,
            self.selector.as_deref(),
            self.pattern.as_ref(),
            reporter.as_ref(),
        )
    }
}

impl Default for FileSelector<'_> {
    fn default() -> Self {
        Self::new()
    }
}

/// Path matching state shared by every visited file
struct Matcher<'s, 'r> {
    selector: Option<&'s Selector<'s>>,
    pattern: Option<&'r Regex>,
    cwd: PathBuf,
    selected: Vec<PathBuf>,
}

impl Matcher<'_, '_> {
    fn visit(&mut self, path: &Path) {
        let Some(regex) = self.pattern else {
            self.accept(path);
            return;
        };

        let text = path.to_string_lossy();
        debug!("looking at filename: '{}'", text);

        let Some(captures) = regex.captures(&text) else {
            debug!("   regex '{}' does not match.", regex.as_str());
            return;
        };

        debug!("   regex '{}' matches.", regex.as_str());
        let fields: FieldMap = regex
            .capture_names()
            .flatten()
            .filter_map(|name| {
                captures
                    .name(name)
                    .map(|m| (name.to_string(), m.as_str().to_string()))
            })
            .collect();
        for (name, value) in &fields {
            debug!("      attribute '{}' has value '{}'", name, value);
        }

        if self.selector.map_or(true, |accept| accept(&fields)) {
            self.accept(path);
        }
    }

    fn accept(&mut self, path: &Path) {
        self.selected.push(absolute_path(&self.cwd, path));
    }
}

/// Make `path` absolute against `cwd` and drop `.` and `..` lexically.
///
/// Symlinks are not resolved, so `link/..` collapses to the link's parent.
fn absolute_path(cwd: &Path, path: &Path) -> PathBuf {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    };

    let mut normalized = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                // `..` at the root stays at the root
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}

fn selection_summary(count: usize) -> String {
    format!("{} file{} selected.", count, plural_suffix(count))
}

fn select<P: AsRef<Path>>(
    paths: &[P],
    selector: Option<&Selector<'_>>,
    pattern: Option<&Regex>,
    reporter: Option<&ProgressReporter>,
) -> Result<Vec<PathBuf>> {
    let use_text = reporter.map_or(true, ProgressReporter::is_silent);
    if use_text {
        progress_begin(SELECT_FILES_LABEL);
        if show_progress() && tracing::enabled!(Level::DEBUG) {
            eprintln!();
        }
    }

    let mut matcher = Matcher {
        selector,
        pattern,
        cwd: std::env::current_dir()?,
        selected: Vec::new(),
    };

    for path in paths {
        let path = path.as_ref();
        if path.is_dir() {
            for entry in WalkDir::new(path) {
                let entry = entry?;
                // Links to directories are not followed and not files either
                let is_dir_link = entry.path_is_symlink() && entry.path().is_dir();
                if entry.file_type().is_dir() || is_dir_link {
                    continue;
                }
                matcher.visit(entry.path());
                if let Some(reporter) = reporter {
                    reporter.increment(1);
                }
            }
        } else {
            matcher.visit(path);
            if let Some(reporter) = reporter {
                reporter.increment(1);
            }
        }
    }

    let count = matcher.selected.len();
    let summary = selection_summary(count);
    match reporter {
        Some(reporter) if !use_text => reporter.finish_with_message(&summary),
        _ => progress_end(&summary),
    }

    Ok(matcher.selected)
}
