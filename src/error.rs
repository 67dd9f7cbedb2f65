//! Startup failures
//!
//! The simulation itself never fails; only wiring it to the page can.

use thiserror::Error;

use crate::sim::ConfigError;

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("no global window")]
    NoWindow,
    #[error("window has no document")]
    NoDocument,
    #[error("no element with id `{0}`")]
    MissingCanvas(String),
    #[error("element `{0}` is not a canvas")]
    NotACanvas(String),
    #[error("canvas has no 2d context")]
    NoContext2d,
    #[error("could not create image for asset `{0}`")]
    MissingAsset(&'static str),
    #[error("unknown toy `{0}` (expected `lander` or `ascent`)")]
    UnknownToy(String),
    #[error(transparent)]
    InvalidConfig(#[from] ConfigError),
}
