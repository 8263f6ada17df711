use drift_types::BinCountRule;
use serde::Serialize;
use std::fmt::Debug;
use std::str::FromStr;
use tracing::warn;

pub const DEFAULT_KS_MAX_ROWS: usize = 10_000;
pub const DEFAULT_STDDEV_FLOOR: f64 = 0.001;
pub const DEFAULT_BUCKET_PRECISION: u32 = 2;

/// Parse a raw setting, falling back to `default` when the value is absent or
/// can't be parsed.
fn parse_or<T>(key: &str, raw: Option<String>, default: T) -> T
where
    T: FromStr + Debug,
    T::Err: Debug,
{
    match raw {
        Some(value) => value.parse::<T>().unwrap_or_else(|e| {
            warn!(
                "Invalid value {:?} for {}: {:?}. Using default {:?}",
                value, key, e, default
            );
            default
        }),
        None => default,
    }
}

fn env_or<T>(key: &str, default: T) -> T
where
    T: FromStr + Debug,
    T::Err: Debug,
{
    parse_or(key, std::env::var(key).ok(), default)
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DriftSettings {
    /// Both datasets must have strictly fewer rows than this for the KS test
    pub ks_max_rows: usize,

    /// Lower bound applied to the baseline standard deviation when
    /// normalizing Wasserstein distances
    pub stddev_floor: f64,

    /// Decimal places used when naming histogram buckets
    pub bucket_precision: u32,

    pub bin_rule: BinCountRule,
}

impl Default for DriftSettings {
    fn default() -> Self {
        let ks_max_rows = env_or("DRIFT_KS_MAX_ROWS", DEFAULT_KS_MAX_ROWS);
        let stddev_floor = env_or("DRIFT_STDDEV_FLOOR", DEFAULT_STDDEV_FLOOR);
        let bucket_precision = env_or("DRIFT_BUCKET_PRECISION", DEFAULT_BUCKET_PRECISION);
        let bin_rule = env_or("DRIFT_BIN_RULE", BinCountRule::Sturges);

        Self {
            ks_max_rows,
            stddev_floor,
            bucket_precision,
            bin_rule,
        }
    }
}

impl DriftSettings {
    /// Settings built from the constants only, ignoring the environment.
    pub fn constants() -> Self {
        Self {
            ks_max_rows: DEFAULT_KS_MAX_ROWS,
            stddev_floor: DEFAULT_STDDEV_FLOOR,
            bucket_precision: DEFAULT_BUCKET_PRECISION,
            bin_rule: BinCountRule::Sturges,
        }
    }

    pub fn with_bin_rule(mut self, bin_rule: BinCountRule) -> Self {
        self.bin_rule = bin_rule;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_or_fallbacks() {
        assert_eq!(parse_or("KEY", Some("25".to_string()), 10_usize), 25);
        assert_eq!(parse_or("KEY", Some("abc".to_string()), 10_usize), 10);
        assert_eq!(parse_or::<f64>("KEY", None, 0.001), 0.001);
        assert_eq!(
            parse_or("KEY", Some("rice".to_string()), BinCountRule::Sturges),
            BinCountRule::Rice
        );
    }

    #[test]
    fn test_constants() {
        let settings = DriftSettings::constants();

        assert_eq!(settings.ks_max_rows, 10_000);
        assert_eq!(settings.stddev_floor, 0.001);
        assert_eq!(settings.bucket_precision, 2);
        assert_eq!(settings.bin_rule, BinCountRule::Sturges);
    }
}
