//! Errors from loading scenes and writing images
//!
//! The rendering core itself cannot fail; everything here comes from the edges.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid scene description: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Sphere refers to unknown material '{0}'")]
    UnknownMaterial(String),

    #[error("Unsupported output format: {}", .0.display())]
    UnsupportedFormat(PathBuf),
}

pub type Result<T> = std::result::Result<T, Error>;
