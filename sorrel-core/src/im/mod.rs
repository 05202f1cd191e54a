// Copyright (c) 2025, Tom Ouellette
// Licensed under the MIT License

mod image;

pub use image::SorrelImage;
