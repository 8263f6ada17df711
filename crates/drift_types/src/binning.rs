use crate::error::TypeError;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Rule used to derive the number of equal-width bins from a row count.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
pub enum BinCountRule {
    Manual(usize),
    SquareRoot,
    #[default]
    Sturges,
    Rice,
}

impl BinCountRule {
    /// Number of bins for `n` observations. Always at least 1.
    pub fn num_bins(&self, n: usize) -> usize {
        let n_f = n.max(1) as f64;
        let bins = match self {
            BinCountRule::Manual(bins) => *bins,
            BinCountRule::SquareRoot => n_f.sqrt().ceil() as usize,
            BinCountRule::Sturges => (n_f.log2() + 1.0).ceil() as usize,
            BinCountRule::Rice => (2.0 * n_f.powf(1.0 / 3.0)).ceil() as usize,
        };
        bins.max(1)
    }
}

impl FromStr for BinCountRule {
    type Err = TypeError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "sturges" => Ok(BinCountRule::Sturges),
            "sqrt" | "squareroot" => Ok(BinCountRule::SquareRoot),
            "rice" => Ok(BinCountRule::Rice),
            other => match other.parse::<usize>() {
                Ok(bins) if bins > 0 => Ok(BinCountRule::Manual(bins)),
                _ => Err(TypeError::InvalidBinRule(value.to_string())),
            },
        }
    }
}

impl Display for BinCountRule {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            BinCountRule::Manual(bins) => write!(f, "{bins}"),
            BinCountRule::SquareRoot => write!(f, "sqrt"),
            BinCountRule::Sturges => write!(f, "sturges"),
            BinCountRule::Rice => write!(f, "rice"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_num_bins() {
        assert_eq!(BinCountRule::Sturges.num_bins(8), 4);
        assert_eq!(BinCountRule::Sturges.num_bins(1000), 11);
        assert_eq!(BinCountRule::Sturges.num_bins(1), 1);
        assert_eq!(BinCountRule::Sturges.num_bins(0), 1);
        assert_eq!(BinCountRule::SquareRoot.num_bins(100), 10);
        assert_eq!(BinCountRule::Rice.num_bins(100), 10);
        assert_eq!(BinCountRule::Manual(0).num_bins(1000), 1);
    }

    #[test]
    fn test_bin_rule_from_str() {
        assert_eq!(BinCountRule::from_str("Sturges").unwrap(), BinCountRule::Sturges);
        assert_eq!(BinCountRule::from_str("sqrt").unwrap(), BinCountRule::SquareRoot);
        assert_eq!(BinCountRule::from_str("12").unwrap(), BinCountRule::Manual(12));
        assert!(BinCountRule::from_str("0").is_err());
        assert!(BinCountRule::from_str("fancy").is_err());
    }
}
