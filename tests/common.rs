#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use logbook::codec;
use logbook::models::Record;
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn lb() -> Command {
    cargo_bin_cmd!("logbook")
}

/// Fresh scratch directory inside the system temp dir
pub fn setup_dir(name: &str) -> PathBuf {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_logbook_test", name));
    fs::remove_dir_all(&path).ok();
    fs::create_dir_all(&path).expect("create test dir");
    path
}

/// Write a colourless config exporting into `dir` and return its path
pub fn setup_config(dir: &PathBuf) -> String {
    let conf = dir.join("logbook.conf");
    let yaml = format!(
        "export_dir: {}\nfile_prefix: logbook\nsheet_label: Sheet1\ndistance_unit: KM\ndefault_format: xlsx\ncolor: false\n",
        dir.display()
    );
    fs::write(&conf, yaml).expect("write config");
    conf.to_string_lossy().to_string()
}

/// The two-trip sheet used across tests: a serial date and a text date
pub fn sample_records() -> Vec<Record> {
    vec![
        Record::new()
            .with("date", 45000.0)
            .with("distance_start", 100.0)
            .with("distance_stop", 150.0)
            .with("driver", "Alex"),
        Record::new()
            .with("date", "2023-03-01")
            .with("distance_start", 150.0)
            .with("distance_stop", 150.0)
            .with("driver", "Kim"),
    ]
}

/// Encode `records` into an xlsx fixture inside `dir`
pub fn write_fixture(dir: &PathBuf, name: &str, records: &[Record]) -> String {
    let path = dir.join(name);
    let bytes = codec::encode(records, "Trips").expect("encode fixture");
    fs::write(&path, bytes).expect("write fixture");
    path.to_string_lossy().to_string()
}

/// Expected export path for today's date
pub fn today_export(dir: &PathBuf, ext: &str) -> PathBuf {
    dir.join(format!(
        "logbook_{}.{}",
        logbook::utils::date::today_string(),
        ext
    ))
}
