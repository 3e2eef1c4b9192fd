use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use clap::ValueEnum;

use crate::error::{RankError, Result};

/// Default relative tolerance for the precision convergence check.
pub const DEFAULT_TOLERANCE: f64 = 1e-3;

/// Which source data set to evaluate. Each profile selects its own
/// model / aspect / sentence file triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Profile {
    /// Sentences where the entity is the subject
    Subj,
    /// Sentences where the entity is the object
    Obj,
    /// Both subject and object sentences
    Both,
}

impl Profile {
    pub fn as_str(&self) -> &'static str {
        match self {
            Profile::Subj => "subj",
            Profile::Obj => "obj",
            Profile::Both => "both",
        }
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Profile {
    type Err = RankError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "subj" => Ok(Profile::Subj),
            "obj" => Ok(Profile::Obj),
            "both" => Ok(Profile::Both),
            other => Err(RankError::Configuration(format!(
                "unknown profile '{other}'. Your options are: subj, obj or both"
            ))),
        }
    }
}

/// Run configuration, resolved once at startup and passed down.
///
/// Values come from environment variables (a `.env` file is loaded by
/// main via dotenvy). CLI flags override the environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub profile: Profile,
    /// Root directory holding `model/` and `trained/`
    pub data_dir: PathBuf,
    /// Directory the run log is written to
    pub log_dir: PathBuf,
    /// Relative tolerance for the convergence check
    pub tolerance: f64,
}

impl Config {
    /// Load configuration from the process environment.
    pub fn load(profile: Option<Profile>, tolerance: Option<f64>) -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok(), profile, tolerance)
    }

    /// Resolve configuration from an arbitrary variable source.
    ///
    /// The profile is required: there is no default data set, so a missing
    /// or invalid selector is fatal.
    pub fn from_lookup<F>(lookup: F, profile: Option<Profile>, tolerance: Option<f64>) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let profile = match profile {
            Some(p) => p,
            None => match lookup("ASPECTRANK_PROFILE") {
                Some(value) => value.parse()?,
                None => {
                    return Err(RankError::Configuration(
                        "ASPECTRANK_PROFILE not set. Set it to indicate which source to use.\n\
                         Your options are: subj, obj or both (or pass --profile)."
                            .to_string(),
                    ))
                }
            },
        };

        let tolerance = match tolerance {
            Some(t) => t,
            None => match lookup("ASPECTRANK_TOLERANCE") {
                Some(raw) => raw.trim().parse::<f64>().map_err(|e| {
                    RankError::Configuration(format!("ASPECTRANK_TOLERANCE '{raw}' is not a number: {e}"))
                })?,
                None => DEFAULT_TOLERANCE,
            },
        };
        validate_tolerance(tolerance)?;

        Ok(Self {
            profile,
            data_dir: lookup("ASPECTRANK_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(".")),
            log_dir: lookup("ASPECTRANK_LOG_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("log")),
            tolerance,
        })
    }

    pub fn model_path(&self) -> PathBuf {
        self.data_dir
            .join("model")
            .join(format!("tfidf_{}.json", self.profile))
    }

    pub fn aspects_path(&self) -> PathBuf {
        self.data_dir
            .join("trained")
            .join(format!("wiki_{}.json", self.profile))
    }

    pub fn sentences_path(&self) -> PathBuf {
        self.data_dir
            .join("trained")
            .join(format!("sentences_{}.json", self.profile))
    }

    pub fn log_path(&self) -> PathBuf {
        self.log_dir
            .join(format!("tfidf_ranking_{}.log", self.profile))
    }
}

/// Tolerance must be a positive finite ratio.
pub fn validate_tolerance(tolerance: f64) -> Result<()> {
    if !tolerance.is_finite() || tolerance <= 0.0 {
        return Err(RankError::Configuration(format!(
            "tolerance must be a positive number, got {tolerance}"
        )));
    }
    Ok(())
}
