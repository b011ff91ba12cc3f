use ndarray::Array2;
use pretty_assertions::assert_eq;
use seismo_util::fs::{ensure_dir, ensure_dirs, select_files, FieldMap, FileSelector, Selector};
use seismo_util::signal::{decimate, decimate_slice, decitab, DecimateOptions, FilterType};
use seismo_util::utils::{
    from_epoch, from_epoch_filename, intern_str, plural_suffix, set_show_progress, to_epoch,
    Interner,
};
use seismo_util::{setup_logging, UtilError};
use regex::Regex;
use std::f64::consts::PI;
use std::fs;
use std::sync::Arc;
use tempfile::TempDir;

#[test]
fn test_logging_levels() {
    for name in ["debug", "info", "warning", "error", "critical"] {
        assert!(setup_logging("integration", name).is_ok());
    }
    assert!(matches!(
        setup_logging("integration", "loud"),
        Err(UtilError::InvalidArgument(_))
    ));
}

#[test]
fn test_select_waveform_archive() {
    set_show_progress(false);
    let temp = TempDir::new().expect("Failed to create temp directory");

    // Archive laid out as <year>/<station>.<channel>.<day>
    for (year, name) in [
        ("2019", "BFO.BHZ.001"),
        ("2019", "BFO.BHN.001"),
        ("2020", "BFO.BHZ.002"),
        ("2020", "STU.BHZ.002"),
        ("2020", "notes.txt"),
    ] {
        let dir = temp.path().join(year);
        ensure_dir(&dir).unwrap();
        fs::write(dir.join(name), b"").unwrap();
    }

    let regex =
        Regex::new(r"(?P<year>\d{4})/(?P<sta>[A-Z]+)\.(?P<cha>[A-Z]{3})\.(?P<day>\d{3})$")
            .unwrap();

    let all = select_files(&[temp.path()], None, Some(&regex)).unwrap();
    assert_eq!(all.len(), 4);

    let bfo_z: &Selector = &|fields: &FieldMap| fields["sta"] == "BFO" && fields["cha"] == "BHZ";
    let mut selected = select_files(&[temp.path()], Some(bfo_z), Some(&regex)).unwrap();
    selected.sort();

    assert_eq!(
        selected,
        vec![
            temp.path().join("2019").join("BFO.BHZ.001"),
            temp.path().join("2020").join("BFO.BHZ.002"),
        ]
    );

    let everything = FileSelector::new().path(temp.path()).select().unwrap();
    assert_eq!(everything.len(), 5);
}

#[test]
fn test_ensure_dirs_for_output_file() {
    let temp = TempDir::new().unwrap();
    let out = temp.path().join("out").join("2020-01-02_03-04-05").join("trace.mseed");

    ensure_dirs(&out).unwrap();
    assert!(out.parent().unwrap().is_dir());
    assert!(!out.exists());
}

#[test]
fn test_timestamp_helpers() {
    let t = to_epoch("2020-01-02 03:04:05").unwrap();
    assert_eq!(from_epoch(t as f64).unwrap(), "2020-01-02 03:04:05");
    assert_eq!(from_epoch_filename(t as f64).unwrap(), "2020-01-02_03-04-05");
    assert_eq!(format!("3 file{}", plural_suffix(3)), "3 files");
}

#[test]
fn test_cascaded_decimation() {
    let input: Vec<f64> = (0..4000)
        .map(|i| (2.0 * PI * 0.002 * i as f64).sin())
        .collect();

    let stages = decitab(20).unwrap();
    let factors = [stages.0, stages.1, stages.2, stages.3, stages.4];
    assert_eq!(factors.iter().product::<u32>(), 20);

    let mut signal = input.clone();
    for &q in factors.iter().filter(|&&q| q > 1) {
        let expected = (signal.len() - 4 + q as usize - 1) / q as usize;
        signal = decimate_slice(&signal, q as usize, &DecimateOptions::new()).unwrap();
        assert_eq!(signal.len(), expected);
    }
    assert!(signal.len() < input.len() / 19);
}

#[test]
fn test_decimate_multichannel() {
    let x = Array2::from_shape_fn((3, 600), |(c, i)| {
        (2.0 * PI * 0.01 * i as f64 + c as f64).sin()
    });
    let options = DecimateOptions::new().with_filter(FilterType::Fir);
    let y = decimate(&x, 2, &options).unwrap();

    // FIR default order 30 trims 15 samples
    assert_eq!(y.shape(), &[3, (600 - 15 + 1) / 2]);
}

#[test]
fn test_interning() {
    let mut interner = Interner::new();
    let a = interner.intern(("GE".to_string(), "APE".to_string()));
    let b = interner.intern(("GE".to_string(), "APE".to_string()));
    assert!(Arc::ptr_eq(&a, &b));

    let s1 = intern_str("integration-station");
    let s2 = intern_str("integration-station");
    assert!(Arc::ptr_eq(&s1, &s2));
}
