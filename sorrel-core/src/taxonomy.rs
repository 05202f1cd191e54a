// Copyright (c) 2025, Tom Ouellette
// Licensed under the BSD 3-Clause License

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde_json::Value;

use crate::constant::CLASS_DIR_PREFIX;
use crate::error::SorrelError;

/// One categorical attribute and its ordered value labels
///
/// The first value conventionally represents "unknown/unlabeled".
#[derive(Debug, Clone)]
pub struct Attribute {
    pub name: String,
    pub values: Vec<String>,
}

/// The resolved target for one recognized (attribute, value) pair
#[derive(Debug, Clone)]
pub struct ClassLabel {
    pub attribute_index: usize,
    pub value_index: usize,
    pub class_dir: String,
}

/// The attribute → ordered-values schema defining the label space
///
/// Every (attribute, value) pair is assigned a globally unique class
/// directory name by flattening all value lists in taxonomy order with a
/// 1-based running index. The flat class space is shared across attributes,
/// so two labels on the same image resolve to two distinct directories.
///
/// # Examples
///
/// ```
/// use sorrel_core::taxonomy::Taxonomy;
///
/// let taxonomy = Taxonomy::from_json(r#"{"color": ["unknown", "red"]}"#).unwrap();
///
/// assert_eq!(taxonomy.class_count(), 2);
/// assert_eq!(taxonomy.resolve("color", "red").unwrap().class_dir, "class2");
/// assert!(taxonomy.resolve("color", "green").is_none());
/// ```
#[derive(Debug, Clone)]
pub struct Taxonomy {
    attributes: Vec<Attribute>,
    index: HashMap<String, HashMap<String, ClassLabel>>,
    class_count: usize,
}

impl Taxonomy {
    /// Load a taxonomy from a json file mapping attribute names to value arrays
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the taxonomy json file
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use sorrel_core::taxonomy::Taxonomy;
    /// let taxonomy = Taxonomy::open("classes.json").unwrap();
    /// ```
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Taxonomy, SorrelError> {
        let mut contents = String::new();

        File::open(&path)
            .map_err(|err| SorrelError::TaxonomyError(err.to_string()))?
            .read_to_string(&mut contents)
            .map_err(|err| SorrelError::TaxonomyError(err.to_string()))?;

        Self::from_json(&contents)
    }

    /// Build a taxonomy from a json string
    ///
    /// Attributes and their values keep document order, which fixes the
    /// class index assigned to every (attribute, value) pair.
    pub fn from_json(contents: &str) -> Result<Taxonomy, SorrelError> {
        let data: Value = serde_json::from_str(contents)
            .map_err(|err| SorrelError::TaxonomyError(err.to_string()))?;

        let object = data.as_object().ok_or_else(|| {
            SorrelError::TaxonomyError("Taxonomy root must be a json object".to_string())
        })?;

        if object.is_empty() {
            return Err(SorrelError::TaxonomyError(
                "Taxonomy must define at least one attribute".to_string(),
            ));
        }

        let mut attributes: Vec<Attribute> = Vec::with_capacity(object.len());
        let mut index: HashMap<String, HashMap<String, ClassLabel>> = HashMap::new();
        let mut class_count = 0;

        for (attribute_index, (name, values)) in object.iter().enumerate() {
            let values = values.as_array().ok_or_else(|| {
                SorrelError::TaxonomyError(format!(
                    "Attribute {} must map to an array of value strings",
                    name
                ))
            })?;

            if values.is_empty() {
                return Err(SorrelError::TaxonomyError(format!(
                    "Attribute {} has an empty value list",
                    name
                )));
            }

            let mut value_names: Vec<String> = Vec::with_capacity(values.len());
            let mut labels: HashMap<String, ClassLabel> = HashMap::with_capacity(values.len());

            for (value_index, value) in values.iter().enumerate() {
                let value = value.as_str().ok_or_else(|| {
                    SorrelError::TaxonomyError(format!(
                        "Attribute {} has a non-string value entry",
                        name
                    ))
                })?;

                class_count += 1;

                let label = ClassLabel {
                    attribute_index,
                    value_index,
                    class_dir: format!("{}{}", CLASS_DIR_PREFIX, class_count),
                };

                if labels.insert(value.to_string(), label).is_some() {
                    return Err(SorrelError::TaxonomyError(format!(
                        "Attribute {} lists value {} more than once",
                        name, value
                    )));
                }

                value_names.push(value.to_string());
            }

            attributes.push(Attribute {
                name: name.to_string(),
                values: value_names,
            });

            index.insert(name.to_string(), labels);
        }

        Ok(Taxonomy {
            attributes,
            index,
            class_count,
        })
    }

    /// Attributes in taxonomy order
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    /// Total number of flattened (attribute, value) classes
    pub fn class_count(&self) -> usize {
        self.class_count
    }

    /// Look up the class label assigned to an (attribute, value) pair
    ///
    /// Unknown attributes and unknown values both resolve to None.
    pub fn resolve(&self, attribute: &str, value: &str) -> Option<&ClassLabel> {
        self.index.get(attribute)?.get(value)
    }
}
