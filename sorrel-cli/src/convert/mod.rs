// Copyright (c) 2025, Tom Ouellette
// Licensed under the MIT License

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use clap::Args;
use kdam::BarExt;

use sorrel_core::constant;
use sorrel_core::dataset::{Outcome, build_layout, process_image};
use sorrel_core::stats::LabelStats;
use sorrel_core::taxonomy::Taxonomy;
use sorrel_core::ut;

#[derive(Debug, Args)]
pub struct ConvertArgs {
    #[arg(
        short = 'i',
        long,
        help = "Input directory of images with sidecar annotations.",
        required = true
    )]
    pub input: Option<String>,

    #[arg(short = 'o', long, help = "Output dataset directory.", required = true)]
    pub output: Option<String>,

    #[arg(
        short = 't',
        long,
        help = "Taxonomy json mapping attribute names to value labels.",
        required = true
    )]
    pub taxonomy: Option<String>,

    #[arg(short = 'v', long, help = "Verbose output.")]
    pub verbose: bool,
}

pub fn convert(args: &ConvertArgs) {
    let input = PathBuf::from(args.input.to_owned().unwrap());
    let output = PathBuf::from(args.output.to_owned().unwrap());
    let taxonomy_path = args.taxonomy.to_owned().unwrap();

    if !input.is_dir() {
        eprintln!(
            "[sorrel::convert] ERROR: Input directory {} does not exist.",
            input.display()
        );
        std::process::exit(1);
    }

    let taxonomy = Taxonomy::open(&taxonomy_path).unwrap_or_else(|err| {
        eprintln!("{}", err);
        std::process::exit(1);
    });

    ut::track::progress_log(&format!("Input directory: {}", input.display()), args.verbose);
    ut::track::progress_log(&format!("Output directory: {}", output.display()), args.verbose);
    ut::track::progress_log(&format!("Taxonomy file: {}", taxonomy_path), args.verbose);
    ut::track::progress_log(
        &format!(
            "Loaded {} attributes spanning {} classes.",
            taxonomy.attributes().len(),
            taxonomy.class_count()
        ),
        args.verbose,
    );

    let files = ut::path::collect_image_paths(&input).unwrap_or_else(|err| {
        eprintln!("{}", err);
        std::process::exit(1);
    });

    ut::track::progress_log(
        &format!(
            "Detected {} candidate images.",
            ut::track::thousands_format(files.len())
        ),
        args.verbose,
    );

    build_layout(&output, taxonomy.class_count()).unwrap_or_else(|err| {
        eprintln!("{}", err);
        std::process::exit(1);
    });

    let cancelled = Arc::new(AtomicBool::new(false));

    {
        let cancelled = cancelled.clone();
        if ctrlc::set_handler(move || cancelled.store(true, Ordering::SeqCst)).is_err() {
            eprintln!("[sorrel::convert] ERROR: Could not install the interrupt handler.");
            std::process::exit(1);
        }
    }

    let mut stats = LabelStats::new(&taxonomy);
    let mut pb = ut::track::progress_bar(files.len(), "Processing", args.verbose);

    let mut written_images = 0;
    let mut converted = 0;
    let mut no_sidecar = 0;
    let mut uncroppable = 0;
    let mut failures: Vec<String> = Vec::new();
    let mut interrupted = false;

    for (index, file) in files.iter().enumerate() {
        // Cancellation is cooperative and only lands between files, so the
        // in-flight file always completes before the loop exits
        if cancelled.load(Ordering::SeqCst) {
            interrupted = true;
            break;
        }

        match process_image(index, file, &taxonomy, &mut stats, &output) {
            Ok(Outcome::NoSidecar) => no_sidecar += 1,
            Ok(Outcome::Uncroppable) => uncroppable += 1,
            Ok(Outcome::Converted { written }) => {
                converted += 1;
                written_images += written;
            }
            Err(err) => failures.push(format!("{}\t{}", file.display(), err)),
        }

        if args.verbose {
            pb.update(1).unwrap();
        }
    }

    if args.verbose {
        println!();
    }

    if !failures.is_empty() {
        std::fs::write(
            output.join(constant::ERROR_LEDGER_NAME),
            failures.join("\n"),
        )
        .unwrap();

        ut::track::progress_log(
            &format!(
                "{} files failed; see {}.",
                ut::track::thousands_format(failures.len()),
                output.join(constant::ERROR_LEDGER_NAME).display()
            ),
            args.verbose,
        );
    }

    if interrupted {
        ut::track::progress_log("Interrupted. Reporting partial results.", args.verbose);
    }

    ut::track::progress_log(
        &format!(
            "Complete. {} images written from {} annotated files ({} without sidecar, {} uncroppable, {} failed).",
            ut::track::thousands_format(written_images),
            ut::track::thousands_format(converted),
            ut::track::thousands_format(no_sidecar),
            ut::track::thousands_format(uncroppable),
            ut::track::thousands_format(failures.len())
        ),
        args.verbose,
    );

    print!("{}", stats.report(&taxonomy));
}
