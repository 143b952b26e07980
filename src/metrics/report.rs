use std::fmt;

use ndarray::ArrayView1;
use serde::Serialize;

use crate::{SgdErr, error::Result};

const WEIGHTED_AVG: &str = "weighted avg";

/// Precision, recall, F1 and support of one class, or an average of them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ClassScores {
    pub precision: f32,
    pub recall: f32,
    pub f1: f32,
    pub support: usize,
}

/// Per-class classification metrics over a set of predictions.
///
/// Classes are the sorted union of the labels found in the truth and in the predictions. Ratios
/// with a zero denominator are reported as `0.0`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassificationReport {
    classes: Vec<(u8, ClassScores)>,
    accuracy: f32,
    macro_avg: ClassScores,
    weighted_avg: ClassScores,
}

impl ClassificationReport {
    /// Builds the report comparing `y_pred` against `y_true`.
    ///
    /// # Errors
    /// `SgdErr::SizeMismatch` if the inputs differ in length, `SgdErr::InvalidParameter` if they
    /// are empty.
    pub fn new(y_true: ArrayView1<u8>, y_pred: ArrayView1<u8>) -> Result<Self> {
        if y_true.len() != y_pred.len() {
            return Err(SgdErr::SizeMismatch {
                what: "predictions and labels",
                got: y_pred.len(),
                expected: y_true.len(),
            });
        }

        if y_true.is_empty() {
            return Err(SgdErr::InvalidParameter(
                "can't report on zero predictions".into(),
            ));
        }

        let mut labels: Vec<u8> = y_true.iter().chain(y_pred.iter()).copied().collect();
        labels.sort_unstable();
        labels.dedup();

        let classes: Vec<_> = labels
            .into_iter()
            .map(|label| (label, class_scores(label, y_true, y_pred)))
            .collect();

        let total = y_true.len();
        let hits = y_true.iter().zip(y_pred).filter(|(t, p)| t == p).count();
        let accuracy = hits as f32 / total as f32;

        let n = classes.len() as f32;
        let mut macro_avg = ClassScores {
            support: total,
            ..Default::default()
        };
        let mut weighted_avg = macro_avg;

        for (_, scores) in &classes {
            let weight = scores.support as f32 / total as f32;

            macro_avg.precision += scores.precision / n;
            macro_avg.recall += scores.recall / n;
            macro_avg.f1 += scores.f1 / n;

            weighted_avg.precision += scores.precision * weight;
            weighted_avg.recall += scores.recall * weight;
            weighted_avg.f1 += scores.f1 * weight;
        }

        Ok(Self {
            classes,
            accuracy,
            macro_avg,
            weighted_avg,
        })
    }

    pub fn accuracy(&self) -> f32 {
        self.accuracy
    }

    pub fn class(&self, label: u8) -> Option<&ClassScores> {
        self.classes
            .iter()
            .find(|(l, _)| *l == label)
            .map(|(_, scores)| scores)
    }

    pub fn classes(&self) -> &[(u8, ClassScores)] {
        &self.classes
    }

    pub fn macro_avg(&self) -> &ClassScores {
        &self.macro_avg
    }

    pub fn weighted_avg(&self) -> &ClassScores {
        &self.weighted_avg
    }
}

fn class_scores(label: u8, y_true: ArrayView1<u8>, y_pred: ArrayView1<u8>) -> ClassScores {
    let mut tp = 0;
    let mut predicted = 0;
    let mut support = 0;

    for (&t, &p) in y_true.iter().zip(y_pred) {
        tp += usize::from(t == label && p == label);
        predicted += usize::from(p == label);
        support += usize::from(t == label);
    }

    let precision = ratio(tp, predicted);
    let recall = ratio(tp, support);
    let f1 = if precision + recall > 0.0 {
        2.0 * precision * recall / (precision + recall)
    } else {
        0.0
    };

    ClassScores {
        precision,
        recall,
        f1,
        support,
    }
}

fn ratio(num: usize, den: usize) -> f32 {
    if den == 0 {
        0.0
    } else {
        num as f32 / den as f32
    }
}

impl fmt::Display for ClassificationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self
            .classes
            .iter()
            .map(|(label, _)| label.to_string().len())
            .max()
            .unwrap_or(0)
            .max(WEIGHTED_AVG.len());

        let row = |f: &mut fmt::Formatter<'_>, name: &str, s: &ClassScores| {
            writeln!(
                f,
                "{name:>width$}  {:>9.2} {:>9.2} {:>9.2} {:>9}",
                s.precision, s.recall, s.f1, s.support
            )
        };

        writeln!(
            f,
            "{:>width$}  {:>9} {:>9} {:>9} {:>9}",
            "", "precision", "recall", "f1-score", "support"
        )?;
        writeln!(f)?;

        for (label, scores) in &self.classes {
            row(f, &label.to_string(), scores)?;
        }
        writeln!(f)?;

        writeln!(
            f,
            "{:>width$}  {:>9} {:>9} {:>9.2} {:>9}",
            "accuracy", "", "", self.accuracy, self.macro_avg.support
        )?;
        row(f, "macro avg", &self.macro_avg)?;
        row(f, WEIGHTED_AVG, &self.weighted_avg)
    }
}
