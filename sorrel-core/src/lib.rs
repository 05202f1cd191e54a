// Copyright (c) 2025, Tom Ouellette
// Licensed under the BSD 3-Clause License

pub mod annotation;
pub mod constant;
pub mod cv;
pub mod dataset;
pub mod error;
pub mod im;
pub mod split;
pub mod stats;
pub mod taxonomy;
pub mod ut;
