//! End-to-end translation through the driver

use hr_driver::{DriverError, HeronConfig, translate_files, translate_source};
use hr_pycode::PrinterSettings;
use integration_tests::{fixture, fixtures_dir};

#[test]
fn canonical_source_is_reproduced() {
    let source = fixture("control_flow.py").unwrap();
    let translation =
        translate_source("control_flow.py", &source, &PrinterSettings::default()).unwrap();
    assert_eq!(translation.output, source);
}

#[test]
fn range_calls_are_printed_in_full() {
    let translation = translate_source(
        "loop.py",
        "for i in range(2, n):\n    pass\n",
        &PrinterSettings::default(),
    )
    .unwrap();
    assert_eq!(translation.output, "for i in range(2, n, 1):\n    pass\n");
}

#[test]
fn configured_indentation_is_applied() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("heron.toml"), "[printer]\nindent_width = 2\n").unwrap();
    let config = HeronConfig::find_in_dir(dir.path()).unwrap();

    let translation = translate_source(
        "nested.py",
        "while a:\n    if b:\n        c = 1\n",
        &config.printer,
    )
    .unwrap();
    assert_eq!(translation.output, "while a:\n  if b:\n    c = 1\n");
}

#[test]
fn one_bad_file_does_not_stop_the_others() {
    let names = ["control_flow.py", "unsupported.py", "dotted.py"];
    let paths: Vec<_> = names.iter().map(|name| fixtures_dir().join(name)).collect();

    let results = translate_files(&paths, &PrinterSettings::default());

    assert_eq!(results.len(), 3);
    assert!(results[0].1.is_ok());
    assert!(matches!(results[1].1, Err(DriverError::Lower { .. })));
    assert!(results[2].1.is_ok());
}

#[test]
fn syntax_errors_name_the_file() {
    let error = translate_source("broken.py", "x = (1,\n", &PrinterSettings::default())
        .unwrap_err();
    assert!(error.to_string().starts_with("broken.py has "));
}
