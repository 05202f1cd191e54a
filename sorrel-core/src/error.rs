// Copyright (c) 2025, Tom Ouellette
// Licensed under the MIT License

use std::fmt;

#[derive(Debug, Clone)]
pub enum SorrelError {
    TaxonomyError(String),
    AnnotationError(String),
    ImageReadError,
    ImageWriteError,
    ImageExtensionError,
    ImageCropError,
    NoFileError(String),
    DirError(String),
    OtherError(String),
}

impl fmt::Display for SorrelError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SorrelError::TaxonomyError(message) => {
                write!(
                    f,
                    "[sorrel::TaxonomyError] Failed to load taxonomy. {}",
                    message
                )
            }
            SorrelError::AnnotationError(message) => {
                write!(
                    f,
                    "[sorrel::AnnotationError] Failed to parse annotation. {}",
                    message
                )
            }
            SorrelError::ImageReadError => {
                write!(f, "[sorrel::ImageReadError] Failed to read image.")
            }
            SorrelError::ImageWriteError => {
                write!(f, "[sorrel::ImageWriteError] Failed to write image.")
            }
            SorrelError::ImageExtensionError => {
                write!(
                    f,
                    "[sorrel::ImageExtensionError] Could not detect a valid image extension for input."
                )
            }
            SorrelError::ImageCropError => {
                write!(
                    f,
                    "[sorrel::ImageCropError] The crop rectangle has no area inside the image bounds."
                )
            }
            SorrelError::NoFileError(message) => {
                write!(
                    f,
                    "[sorrel::NoFileError] File could not be found. {}.",
                    message
                )
            }
            SorrelError::DirError(message) => {
                write!(
                    f,
                    "[sorrel::DirError] Directory could not be read. {}.",
                    message
                )
            }
            SorrelError::OtherError(message) => {
                write!(f, "[sorrel::OtherError] Error: {}.", message)
            }
        }
    }
}

impl std::error::Error for SorrelError {}
