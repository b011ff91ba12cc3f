use crate::cli::args::{Cli, Commands, TimeStyle};
use crate::error::{Result, UtilError};
use crate::fs::{ensure_dir, FieldMap, FileSelector};
use crate::logging::setup_logging;
use crate::settings::Settings;
use crate::signal::{decimate_slice, decitab, DecimateOptions, FilterType};
use crate::utils::constants::PROGRAM_NAME;
use crate::utils::progress::{set_show_progress, Stopwatch};
use crate::utils::time::{from_epoch, from_epoch_filename, from_epoch_verbose, plural_suffix, to_epoch};
use std::f64::consts::PI;
use tracing::{debug, info};

pub fn run(cli: Cli) -> Result<()> {
    let settings = Settings::load_from(cli.config.as_deref())?;
    let level = cli.log_level.as_deref().unwrap_or(&settings.log_level);
    setup_logging(PROGRAM_NAME, level)?;
    set_show_progress(settings.show_progress && !cli.quiet);
    debug!("settings: {:?}", settings);

    let stopwatch = Stopwatch::new();

    match cli.command {
        Commands::Select {
            paths,
            pattern,
            fields,
            bar,
        } => {
            let required = parse_fields(&fields)?;
            let mut selection = FileSelector::new().paths(paths).with_progress_bar(bar);

            match pattern {
                Some(pattern) => selection = selection.pattern(&pattern)?,
                None if !required.is_empty() => {
                    return Err(UtilError::InvalidArgument(
                        "--field needs a --pattern with named groups".to_string(),
                    ))
                }
                None => {}
            }

            if !required.is_empty() {
                selection = selection.selector(move |found: &FieldMap| {
                    required
                        .iter()
                        .all(|(name, value)| found.get(name) == Some(value))
                });
            }

            let selected = selection.select()?;
            for path in &selected {
                println!("{}", path.display());
            }
            info!(
                "selected {} file{}",
                selected.len(),
                plural_suffix(selected.len())
            );
        }

        Commands::Decitab { ratio } => {
            let (i, j, k, l, m) = decitab(ratio)?;
            println!("{} = {} x {} x {} x {} x {}", ratio, i, j, k, l, m);
        }

        Commands::ToEpoch { timestamp } => {
            println!("{}", to_epoch(&timestamp)?);
        }

        Commands::FromEpoch { seconds, style } => {
            let formatted = match style {
                TimeStyle::Plain => from_epoch(seconds)?,
                TimeStyle::Verbose => from_epoch_verbose(seconds)?,
                TimeStyle::Filename => from_epoch_filename(seconds)?,
            };
            println!("{}", formatted);
        }

        Commands::Decimate {
            q,
            samples,
            frequency,
            order,
            fir,
        } => {
            let filter = if fir { FilterType::Fir } else { FilterType::Iir };
            let mut options = DecimateOptions::new().with_filter(filter);
            if let Some(order) = order {
                options = options.with_order(order);
            }

            let input: Vec<f64> = (0..samples)
                .map(|i| (2.0 * PI * frequency * i as f64).sin())
                .collect();
            let output = decimate_slice(&input, q, &options)?;
            let peak = output.iter().fold(0.0f64, |acc, v| acc.max(v.abs()));

            println!(
                "{} samples -> {} samples (q = {}, {:?} filter), peak amplitude {:.3}",
                input.len(),
                output.len(),
                q,
                filter,
                peak
            );
        }

        Commands::Mkdir { path } => {
            ensure_dir(&path)?;
            println!("{}", path.display());
        }
    }

    info!("done in {:.3}s", stopwatch.elapsed());
    Ok(())
}

/// Parse `NAME=VALUE` pairs into the fields a selected path must carry
pub fn parse_fields(pairs: &[String]) -> Result<FieldMap> {
    pairs
        .iter()
        .map(|pair| match pair.split_once('=') {
            Some((name, value)) if !name.is_empty() => Ok((name.to_string(), value.to_string())),
            _ => Err(UtilError::InvalidArgument(format!(
                "expected NAME=VALUE, got '{}'",
                pair
            ))),
        })
        .collect()
}
