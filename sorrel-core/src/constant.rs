// Copyright (c) 2025, Tom Ouellette
// Licensed under the BSD 3-Clause License

// All image formats collected during input discovery
pub const SUPPORTED_IMAGE_FORMATS: [&str; 3] = ["jpg", "png", "bmp"];

// Sidecar annotation files share the image stem with this extension
pub const ANNOTATION_EXTENSION: &str = "json";

// The json key holding the crop rectangle in xyxy format; every other key
// is read as an attribute object carrying a "name" value
pub const CROP_JSON_KEY: &str = "locate";

// Output split directory names
pub const TRAIN_DIR: &str = "train";
pub const VAL_DIR: &str = "val";

// Class directories are named by prefix + 1-based flattened index
pub const CLASS_DIR_PREFIX: &str = "class";

// Edge length of every written image
pub const OUTPUT_IMAGE_SIZE: u32 = 224;

// Width of the zero-padded random suffix appended to output file stems
pub const OUTPUT_SUFFIX_DIGITS: usize = 12;
pub const OUTPUT_SUFFIX_MAX: u64 = 999_999_999_999;

// Failed files are listed in this ledger under the output root
pub const ERROR_LEDGER_NAME: &str = "convert_errors.tsv";
