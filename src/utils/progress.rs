use crate::settings::Settings;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::OnceLock;
use std::time::{Duration, Instant};

fn show_progress_flag() -> &'static AtomicBool {
    static SHOW_PROGRESS: OnceLock<AtomicBool> = OnceLock::new();
    SHOW_PROGRESS.get_or_init(|| {
        let enabled = match Settings::load() {
            Ok(settings) => settings.show_progress,
            Err(e) => {
                tracing::warn!("falling back to default settings: {}", e);
                Settings::default().show_progress
            }
        };
        AtomicBool::new(enabled)
    })
}

/// Whether progress text is currently emitted. Seeded from [`Settings`] on first use.
pub fn show_progress() -> bool {
    show_progress_flag().load(Ordering::Relaxed)
}

pub fn set_show_progress(enabled: bool) {
    show_progress_flag().store(enabled, Ordering::Relaxed);
}

/// Write `label` to stderr without a trailing newline
pub fn progress_begin(label: &str) {
    let _ = write_begin(&mut std::io::stderr().lock(), show_progress(), label);
}

/// Close a line opened by [`progress_begin`]
pub fn progress_end(label: &str) {
    let _ = write_end(&mut std::io::stderr().lock(), show_progress(), label);
}

fn write_begin<W: Write>(out: &mut W, enabled: bool, label: &str) -> io::Result<()> {
    if enabled {
        write!(out, "{}", label)?;
        out.flush()?;
    }
    Ok(())
}

fn write_end<W: Write>(out: &mut W, enabled: bool, label: &str) -> io::Result<()> {
    if enabled {
        writeln!(out, " done. {}", label)?;
        out.flush()?;
    }
    Ok(())
}

pub struct ProgressReporter {
    progress_bar: Option<ProgressBar>,
}

impl ProgressReporter {
    pub fn new_spinner(message: &str) -> Self {
        if !show_progress() {
            return Self::silent();
        }

        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg} ({pos})") {
            pb.set_style(style);
        }
        pb.set_message(message.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));

        Self {
            progress_bar: Some(pb),
        }
    }

    pub fn silent() -> Self {
        Self { progress_bar: None }
    }

    pub fn is_silent(&self) -> bool {
        self.progress_bar.is_none()
    }

    pub fn increment(&self, delta: u64) {
        if let Some(ref pb) = self.progress_bar {
            pb.inc(delta);
        }
    }

    pub fn set_message(&self, message: &str) {
        if let Some(ref pb) = self.progress_bar {
            pb.set_message(message.to_string());
        }
    }

    pub fn finish_with_message(&self, message: &str) {
        if let Some(ref pb) = self.progress_bar {
            pb.finish_with_message(message.to_string());
        }
    }
}

impl Drop for ProgressReporter {
    fn drop(&mut self) {
        if let Some(ref pb) = self.progress_bar {
            if !pb.is_finished() {
                pb.finish();
            }
        }
    }
}

/// Wall-clock timer started on construction
#[derive(Debug, Clone, Copy)]
pub struct Stopwatch {
    start: Instant,
}

impl Stopwatch {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Seconds since construction
    pub fn elapsed(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }
}

impl Default for Stopwatch {
    fn default() -> Self {
        Self::new()
    }
}
