//! Decode asset files named on the command line and print a verbose dump
//! of every record.
//!
//! Run: `cargo run -p rse-assets --bin inspect -- <files...>`
//!
//! Files with a `.dmp` extension decode as light lists; everything else
//! decodes as a model file. Known-bad shipped files are skipped by name.

use std::env;
use std::io;
use std::path::Path;
use std::process::ExitCode;

use rse_assets::{WriteDiagnostics, is_known_bad, load_lights_with_diagnostics,
    load_model_with_diagnostics};
use tracing::{info, warn};

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .init();

    let paths: Vec<String> = env::args().skip(1).collect();
    if paths.is_empty() {
        eprintln!("usage: inspect <files...>");
        return ExitCode::from(2);
    }

    let mut failed = false;
    for path in &paths {
        if !inspect_file(Path::new(path)) {
            failed = true;
        }
    }

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

/// Decode and dump one file. Returns false on failure.
fn inspect_file(path: &Path) -> bool {
    if is_known_bad(path) {
        warn!(path = %path.display(), "skipping known-bad test file");
        return true;
    }

    println!("=== file: {} ===", path.display());
    let mut sink = WriteDiagnostics::new(io::stdout().lock());

    let is_lights = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("dmp"));

    let result = if is_lights {
        load_lights_with_diagnostics(path, &mut sink).map(|file| {
            info!(
                path = %path.display(),
                lights = file.lights.len(),
                trailing_bytes = file.trailing_bytes,
                "decoded"
            );
            println!("{} lights, {} trailing bytes", file.lights.len(), file.trailing_bytes);
        })
    } else {
        load_model_with_diagnostics(path, &mut sink).map(|model| {
            info!(
                path = %path.display(),
                materials = model.materials.len(),
                objects = model.geometry_objects.len(),
                trailing_bytes = model.trailing_bytes,
                "decoded"
            );
            println!(
                "{} materials, {} geometry objects, {} trailing bytes",
                model.materials.len(),
                model.geometry_objects.len(),
                model.trailing_bytes
            );
        })
    };

    match result {
        Ok(()) => true,
        Err(e) => {
            eprintln!("{e}");
            false
        }
    }
}
