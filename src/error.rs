use std::{
    error::Error,
    fmt::{self, Display},
    io,
};

use ndarray::ShapeError;

/// The result type used in the entire crate.
pub type Result<T> = std::result::Result<T, SgdErr>;

/// The crate's error type.
#[derive(Debug)]
pub enum SgdErr {
    SizeMismatch {
        what: &'static str,
        got: usize,
        expected: usize,
    },
    InvalidParameter(String),
    Shape(ShapeError),
    Distribution(String),
    Plot(String),
    Io(io::Error),
    Json(serde_json::Error),
}

impl Display for SgdErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SgdErr::SizeMismatch {
                what,
                got,
                expected,
            } => write!(
                f,
                "There's a size mismatch in {what}, got {got} and expected {expected}"
            ),
            SgdErr::InvalidParameter(msg) => write!(f, "invalid parameter: {msg}"),
            SgdErr::Shape(e) => write!(f, "shape error: {e}"),
            SgdErr::Distribution(msg) => write!(f, "invalid distribution: {msg}"),
            SgdErr::Plot(msg) => write!(f, "failed to draw figure: {msg}"),
            SgdErr::Io(e) => write!(f, "io error: {e}"),
            SgdErr::Json(e) => write!(f, "json error: {e}"),
        }
    }
}

impl Error for SgdErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            SgdErr::Shape(e) => Some(e),
            SgdErr::Io(e) => Some(e),
            SgdErr::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ShapeError> for SgdErr {
    fn from(e: ShapeError) -> Self {
        Self::Shape(e)
    }
}

impl From<io::Error> for SgdErr {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for SgdErr {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

impl From<rand_distr::NormalError> for SgdErr {
    fn from(e: rand_distr::NormalError) -> Self {
        Self::Distribution(e.to_string())
    }
}

impl From<rand_distr::uniform::Error> for SgdErr {
    fn from(e: rand_distr::uniform::Error) -> Self {
        Self::Distribution(e.to_string())
    }
}
