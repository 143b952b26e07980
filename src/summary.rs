use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use serde::Serialize;

use crate::{
    config::TrainingConfig, error::Result, metrics::ClassificationReport, training::LossHistory,
};

/// A machine readable record of a finished run.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary<'a> {
    pub epochs: usize,
    pub alpha: f32,
    pub batch_size: usize,
    pub seed: Option<u64>,
    pub weights: Vec<f32>,
    pub losses: &'a LossHistory,
    pub report: &'a ClassificationReport,
}

impl<'a> RunSummary<'a> {
    /// Gathers the summary of a run trained with `config`.
    ///
    /// # Errors
    /// `SgdErr::InvalidParameter` if the config is invalid.
    pub fn new(
        config: &TrainingConfig,
        weights: &[f32],
        losses: &'a LossHistory,
        report: &'a ClassificationReport,
    ) -> Result<Self> {
        Ok(Self {
            epochs: config.epoch_count()?,
            alpha: config.alpha,
            batch_size: config.batch_size()?.get(),
            seed: config.seed,
            weights: weights.to_vec(),
            losses,
            report,
        })
    }

    /// Writes the summary as pretty printed JSON, overwriting `path`.
    ///
    /// # Errors
    /// `SgdErr::Io` if the file can't be written, `SgdErr::Json` if serializing fails.
    pub fn write<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        Ok(())
    }
}
