use std::{
    fs,
    num::NonZeroUsize,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::{SgdErr, error::Result};

pub const DEFAULT_FIGURE: &str = "./outputs/stochastic_gradient_descent_plot.png";

/// Where the blob centers come from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CentersConfig {
    /// `count` centers drawn uniformly from `[low, high)` on each axis.
    Random { count: usize, low: f32, high: f32 },
    Fixed { points: Vec<[f32; 2]> },
}

impl CentersConfig {
    pub fn count(&self) -> usize {
        match self {
            CentersConfig::Random { count, .. } => *count,
            CentersConfig::Fixed { points } => points.len(),
        }
    }
}

/// The centers `make_blobs` draws from `[-10, 10)` with seed 1.
pub const DEFAULT_CENTERS: [[f32; 2]; 2] = [[-1.659_56, 4.406_49], [-9.997_712, -3.953_349]];

impl Default for CentersConfig {
    fn default() -> Self {
        Self::Fixed {
            points: DEFAULT_CENTERS.to_vec(),
        }
    }
}

/// The synthetic dataset and how it is split.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct DatasetConfig {
    pub samples: usize,
    pub centers: CentersConfig,
    pub cluster_std: f32,
    pub seed: u64,
    pub test_fraction: f32,
    pub split_seed: u64,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            samples: 1000,
            centers: CentersConfig::default(),
            cluster_std: 1.5,
            seed: 1,
            test_fraction: 0.5,
            split_seed: 42,
        }
    }
}

impl DatasetConfig {
    pub fn validate(&self) -> Result<()> {
        if self.samples == 0 {
            return Err(invalid("samples must be positive"));
        }

        if self.centers.count() != 2 {
            return Err(invalid(format!(
                "binary classification needs exactly 2 centers, got {}",
                self.centers.count()
            )));
        }

        if let CentersConfig::Random { low, high, .. } = self.centers {
            if !(low < high) {
                return Err(invalid(format!("empty center box [{low}, {high})")));
            }
        }

        if !self.cluster_std.is_finite() || self.cluster_std < 0.0 {
            return Err(invalid(format!(
                "cluster_std must be finite and non negative, got {}",
                self.cluster_std
            )));
        }

        if !(self.test_fraction > 0.0 && self.test_fraction < 1.0) {
            return Err(invalid(format!(
                "test_fraction must be in (0, 1), got {}",
                self.test_fraction
            )));
        }

        Ok(())
    }
}

/// The hyperparameters of the training loop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct TrainingConfig {
    /// Fractional values round up, `2.5` runs 3 epochs.
    pub epochs: f64,
    pub alpha: f32,
    pub batch_size: usize,
    /// Seed for the weight initialization, the OS rng is used when missing.
    pub seed: Option<u64>,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            epochs: 100.0,
            alpha: 0.01,
            batch_size: 32,
            seed: None,
        }
    }
}

impl TrainingConfig {
    /// Returns the amount of epochs to run.
    ///
    /// # Errors
    /// `SgdErr::InvalidParameter` if `epochs` is negative or not finite.
    pub fn epoch_count(&self) -> Result<usize> {
        if !self.epochs.is_finite() || self.epochs < 0.0 {
            return Err(invalid(format!(
                "epochs must be finite and non negative, got {}",
                self.epochs
            )));
        }

        Ok(self.epochs.ceil() as usize)
    }

    /// # Errors
    /// `SgdErr::InvalidParameter` if `batch_size` is zero.
    pub fn batch_size(&self) -> Result<NonZeroUsize> {
        NonZeroUsize::new(self.batch_size).ok_or_else(|| invalid("batch_size must be positive"))
    }

    pub fn validate(&self) -> Result<()> {
        self.epoch_count()?;
        self.batch_size()?;

        if !self.alpha.is_finite() {
            return Err(invalid(format!("alpha must be finite, got {}", self.alpha)));
        }

        Ok(())
    }
}

/// Everything a run needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct Config {
    pub dataset: DatasetConfig,
    pub training: TrainingConfig,
    /// The `.svg` extension selects the svg backend, anything else is encoded as a bitmap.
    pub figure: PathBuf,
    pub summary: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dataset: DatasetConfig::default(),
            training: TrainingConfig::default(),
            figure: PathBuf::from(DEFAULT_FIGURE),
            summary: None,
        }
    }
}

impl Config {
    /// Loads a `Config` from a JSON file, missing fields take their default value.
    ///
    /// # Errors
    /// `SgdErr::Io` if the file can't be read, `SgdErr::Json` if it can't be parsed.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config = serde_json::from_str(&content)?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.dataset.validate()?;
        self.training.validate()
    }
}

fn invalid<S: Into<String>>(msg: S) -> SgdErr {
    SgdErr::InvalidParameter(msg.into())
}
