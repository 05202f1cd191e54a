// Copyright (c) 2025, Tom Ouellette
// Licensed under the BSD 3-Clause License

use std::path::Path;

use rand::Rng;

use crate::annotation::{Annotation, CropBox};
use crate::constant::{
    CLASS_DIR_PREFIX, OUTPUT_IMAGE_SIZE, OUTPUT_SUFFIX_DIGITS, OUTPUT_SUFFIX_MAX, TRAIN_DIR,
    VAL_DIR,
};
use crate::error::SorrelError;
use crate::im::SorrelImage;
use crate::split::Split;
use crate::stats::LabelStats;
use crate::taxonomy::Taxonomy;
use crate::ut::path::{ensure_directory, sidecar_path};

/// What processing one discovered image produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// No sidecar annotation next to the image; the common case
    NoSidecar,
    /// The record was cropped and written into `written` class directories
    Converted { written: usize },
    /// A missing or inverted crop rectangle; counters may still have advanced
    Uncroppable,
}

/// Pre-create the full train/val class directory skeleton
///
/// Ensures `output_root/{train,val}/class{1..N}` exists for every class,
/// whether or not it will receive a file. Idempotent: a second call is a
/// no-op and pre-existing contents are never deleted.
///
/// # Arguments
///
/// * `output_root` - Destination dataset root
/// * `class_count` - Total flattened class count N from the taxonomy
pub fn build_layout(output_root: &Path, class_count: usize) -> Result<(), SorrelError> {
    for split_dir in [TRAIN_DIR, VAL_DIR] {
        for class in 1..=class_count {
            ensure_directory(
                output_root
                    .join(split_dir)
                    .join(format!("{}{}", CLASS_DIR_PREFIX, class)),
            )?;
        }
    }

    Ok(())
}

/// Run one discovered image through the annotation-to-crop-to-split pipeline
///
/// The discovery index is consumed whether or not the file produces output,
/// so split membership is a pure function of traversal order. Counters
/// advance for every recognized label even when the record is uncroppable.
///
/// # Arguments
///
/// * `index` - Stable discovery index of this image
/// * `image_path` - Path of the discovered image
/// * `taxonomy` - The label space to resolve attributes against
/// * `stats` - Running per-(attribute, value) counters
/// * `output_root` - Destination dataset root with a pre-built layout
pub fn process_image(
    index: usize,
    image_path: &Path,
    taxonomy: &Taxonomy,
    stats: &mut LabelStats,
    output_root: &Path,
) -> Result<Outcome, SorrelError> {
    let sidecar = sidecar_path(image_path);

    if !sidecar.is_file() {
        return Ok(Outcome::NoSidecar);
    }

    let annotation = Annotation::open(&sidecar)?;

    let mut class_dirs: Vec<&str> = Vec::with_capacity(annotation.labels.len());

    for label in &annotation.labels {
        if let Some(resolved) = taxonomy.resolve(&label.attribute, &label.value) {
            stats.record(resolved);
            class_dirs.push(&resolved.class_dir);
        }
    }

    let split = Split::from_index(index);

    let Some(crop_box) = annotation.locate.filter(|b| b.is_valid()) else {
        return Ok(Outcome::Uncroppable);
    };

    let image = SorrelImage::open(image_path)?;
    let (x, y, w, h) = clamp_crop(&crop_box, image.width(), image.height())?;

    let resized = image
        .crop(x, y, w, h)?
        .resize(OUTPUT_IMAGE_SIZE, OUTPUT_IMAGE_SIZE)?;

    let file_name = output_file_name(image_path)?;
    let split_dir = output_root.join(split.dir_name());

    let mut written = 0;

    for class_dir in &class_dirs {
        let destination = ensure_directory(split_dir.join(class_dir))?;
        resized.save(destination.join(&file_name))?;
        written += 1;
    }

    Ok(Outcome::Converted { written })
}

/// Clamp an xyxy rectangle to the image bounds and convert to xywh
///
/// The rectangle reads `[y0:y1, x0:x1)` over the row-major pixel grid, so
/// the exclusive edges clamp to the image size and negative coordinates
/// clamp to zero. A rectangle left with no area is a crop error.
fn clamp_crop(
    crop_box: &CropBox,
    width: u32,
    height: u32,
) -> Result<(u32, u32, u32, u32), SorrelError> {
    let x0 = crop_box.x0.clamp(0, width as i64) as u32;
    let y0 = crop_box.y0.clamp(0, height as i64) as u32;
    let x1 = crop_box.x1.clamp(0, width as i64) as u32;
    let y1 = crop_box.y1.clamp(0, height as i64) as u32;

    if x1 <= x0 || y1 <= y0 {
        return Err(SorrelError::ImageCropError);
    }

    Ok((x0, y0, x1 - x0, y1 - y0))
}

/// Generate an output filename from the source stem and a random suffix
///
/// Collisions across a run are treated as acceptably rare; there is no
/// retry on an existing name.
fn output_file_name(image_path: &Path) -> Result<String, SorrelError> {
    let stem = image_path
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or(SorrelError::ImageExtensionError)?;

    let extension = image_path
        .extension()
        .and_then(|s| s.to_str())
        .ok_or(SorrelError::ImageExtensionError)?;

    let suffix: u64 = rand::rng().random_range(0..=OUTPUT_SUFFIX_MAX);

    Ok(format!(
        "{}_{:0width$}.{}",
        stem,
        suffix,
        extension,
        width = OUTPUT_SUFFIX_DIGITS
    ))
}
