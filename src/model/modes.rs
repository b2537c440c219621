use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// How raw metric values are rescaled onto the common 0-100 scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum NormalizationMode {
    #[default]
    MinMax,
    RankPercentile,
    MeanCentered,
}

/// Substitution policy for a company's missing raw value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ImputationMode {
    Mean,
    Median,
    ZeroWorst,
    #[default]
    Exclude,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ZScale {
    #[default]
    Linear,
    Log,
}

impl NormalizationMode {
    pub fn as_str(self) -> &'static str {
        match self {
            NormalizationMode::MinMax => "min-max",
            NormalizationMode::RankPercentile => "rank-percentile",
            NormalizationMode::MeanCentered => "mean-centered",
        }
    }
}

impl ImputationMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ImputationMode::Mean => "mean",
            ImputationMode::Median => "median",
            ImputationMode::ZeroWorst => "zero-worst",
            ImputationMode::Exclude => "exclude",
        }
    }
}

impl ZScale {
    pub fn as_str(self) -> &'static str {
        match self {
            ZScale::Linear => "linear",
            ZScale::Log => "log",
        }
    }
}
