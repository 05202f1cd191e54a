// Copyright (c) 2025, Tom Ouellette
// Licensed under the BSD 3-Clause License

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use serde_json::Value;

use crate::constant::CROP_JSON_KEY;
use crate::error::SorrelError;

/// A crop rectangle in integer pixel coordinates, xyxy format
///
/// Coordinates are kept as parsed; a box with x0 > x1 or y0 > y1 marks the
/// record uncroppable rather than failing the whole annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropBox {
    pub x0: i64,
    pub y0: i64,
    pub x1: i64,
    pub y1: i64,
}

impl CropBox {
    pub fn is_valid(&self) -> bool {
        self.x0 <= self.x1 && self.y0 <= self.y1
    }
}

/// One attribute name and the value chosen for it in a sidecar annotation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeLabel {
    pub attribute: String,
    pub value: String,
}

// The nested object carried by every attribute key; extra fields are ignored
#[derive(Debug, Deserialize)]
struct AttributeChoice {
    name: String,
}

/// A parsed sidecar annotation: optional crop rectangle plus attribute labels
///
/// The crop key is lifted out of the json object before the remaining keys
/// are read generically as attribute labels. Keys whose value is not an
/// object with a "name" string are dropped at parse time; whether a label is
/// recognized is decided later against the taxonomy.
///
/// # Examples
///
/// ```
/// use sorrel_core::annotation::Annotation;
///
/// let annotation = Annotation::from_json(
///     r#"{"locate": [10, 10, 100, 100], "color": {"name": "red"}}"#,
/// )
/// .unwrap();
///
/// assert!(annotation.locate.unwrap().is_valid());
/// assert_eq!(annotation.labels.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct Annotation {
    pub locate: Option<CropBox>,
    pub labels: Vec<AttributeLabel>,
}

impl Annotation {
    /// Open and parse a sidecar annotation file
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the sidecar json paired with one image
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Annotation, SorrelError> {
        let mut contents = String::new();

        File::open(&path)
            .map_err(|err| SorrelError::NoFileError(err.to_string()))?
            .read_to_string(&mut contents)
            .map_err(|err| SorrelError::AnnotationError(err.to_string()))?;

        Self::from_json(&contents)
    }

    /// Parse a sidecar annotation from a json string
    pub fn from_json(contents: &str) -> Result<Annotation, SorrelError> {
        let data: Value = serde_json::from_str(contents)
            .map_err(|err| SorrelError::AnnotationError(err.to_string()))?;

        let object = data.as_object().ok_or_else(|| {
            SorrelError::AnnotationError("Annotation root must be a json object".to_string())
        })?;

        let mut locate: Option<CropBox> = None;
        let mut labels: Vec<AttributeLabel> = Vec::new();

        for (key, value) in object {
            if key == CROP_JSON_KEY {
                locate = Some(read_crop_box(value)?);
            } else if let Ok(choice) = serde_json::from_value::<AttributeChoice>(value.clone()) {
                labels.push(AttributeLabel {
                    attribute: key.to_string(),
                    value: choice.name,
                });
            }
        }

        Ok(Annotation { locate, labels })
    }

    /// Whether this record can produce a cropped output image
    pub fn is_croppable(&self) -> bool {
        self.locate.is_some_and(|b| b.is_valid())
    }
}

/// Read a 4-element xyxy crop rectangle, truncating numbers to integers
fn read_crop_box(value: &Value) -> Result<CropBox, SorrelError> {
    fn to_i64(value: &Value) -> Result<i64, SorrelError> {
        if let Some(n) = value.as_i64() {
            Ok(n)
        } else if let Some(n) = value.as_f64() {
            Ok(n as i64)
        } else {
            Err(SorrelError::AnnotationError(
                "Crop rectangle entries must be numeric".to_string(),
            ))
        }
    }

    let coordinates = value.as_array().ok_or_else(|| {
        SorrelError::AnnotationError("Crop rectangle must be a 4-element array".to_string())
    })?;

    if coordinates.len() != 4 {
        return Err(SorrelError::AnnotationError(
            "Crop rectangle must be a 4-element array".to_string(),
        ));
    }

    Ok(CropBox {
        x0: to_i64(&coordinates[0])?,
        y0: to_i64(&coordinates[1])?,
        x1: to_i64(&coordinates[2])?,
        y1: to_i64(&coordinates[3])?,
    })
}
