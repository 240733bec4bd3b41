use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use maxbid::config::Config;
use maxbid::domain::{Auction, DomainError};
use maxbid::error::{ConfigError, Error};
use rust_decimal_macros::dec;

static TEMP_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn write_temp_config(contents: &str) -> PathBuf {
    let mut path = std::env::temp_dir();
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let suffix = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
    path.push(format!("maxbid-config-test-{nanos}-{suffix}.toml"));
    fs::write(&path, contents).expect("write temp config");
    path
}

fn load(contents: &str) -> Result<Config, Error> {
    let path = write_temp_config(contents);
    let result = Config::load(&path);
    let _ = fs::remove_file(&path);
    result
}

#[test]
fn missing_file_falls_back_to_defaults() {
    let path = std::env::temp_dir().join("maxbid-config-test-does-not-exist.toml");
    let config = Config::load_or_default(&path).expect("defaults");
    assert_eq!(config.defaults.auction, Auction::Iaa);
    assert_eq!(config.default_margin().ratio(), dec!(0.25));
}

#[test]
fn load_reports_missing_file() {
    let path = std::env::temp_dir().join("maxbid-config-test-also-missing.toml");
    assert!(matches!(
        Config::load(&path),
        Err(Error::Config(ConfigError::ReadFile(_)))
    ));
}

#[test]
fn config_rejects_invalid_margin() {
    match load("[defaults]\ntarget_margin = 1.5\n") {
        Err(Error::Config(ConfigError::InvalidValue {
            field: "target_margin",
            ..
        })) => {}
        Err(err) => panic!("Expected invalid margin error, got {err}"),
        Ok(config) => panic!(
            "Expected invalid margin to be rejected, got {}",
            config.defaults.target_margin
        ),
    }
}

#[test]
fn config_rejects_empty_log_level() {
    assert!(matches!(
        load("[logging]\nlevel = \"\"\n"),
        Err(Error::Config(ConfigError::MissingField {
            field: "logging.level"
        }))
    ));
}

#[test]
fn custom_iaa_bands_replace_the_defaults() {
    let config = load(
        r#"
[fees.iaa]
bands = [
  { min = 0, max = 2999.99, fee = 500, label = "low" },
  { min = 3000, max = 9999.99, fee = 900, label = "high" },
]
fallback = { fee = 1200, label = "top" }
"#,
    )
    .expect("valid config");

    let calculator = config.calculator();
    assert_eq!(
        calculator.resolve_fees(Auction::Iaa, dec!(2500)).total_fees,
        dec!(500)
    );
    assert_eq!(
        calculator.resolve_fees(Auction::Iaa, dec!(12000)).label,
        "top"
    );
    assert_eq!(config.fees.copart, Default::default());
}

#[test]
fn custom_copart_tables_are_validated() {
    let result = load(
        r#"
[fees.copart]
gate_fee = 79
environmental_fee = 0

[fees.copart.bidding]
steps = [{ below = 500, fee = 10 }, { below = 400, fee = 20 }]
tail = { type = "rate", rate = 0.05 }

[fees.copart.virtual_bid]
steps = [{ below = 100, fee = 0 }]
tail = { type = "flat", fee = 149 }
"#,
    );

    assert!(matches!(
        result,
        Err(Error::Domain(DomainError::InvalidFeeTable {
            table: "copart.bidding",
            ..
        }))
    ));
}

#[test]
fn solver_iterations_are_bounded() {
    assert!(load("[solver]\nbisection_iterations = 60\n").is_ok());
    assert!(matches!(
        load("[solver]\nbisection_iterations = 500\n"),
        Err(Error::Config(ConfigError::InvalidValue {
            field: "bisection_iterations",
            ..
        }))
    ));
}
