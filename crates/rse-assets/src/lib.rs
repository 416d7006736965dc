//! High-level loading for Red Storm engine asset files.
//!
//! This crate wraps the pure decoders in [`rse_decode`] with the host
//! concerns the decoders deliberately avoid: reading files from disk,
//! attaching file paths to failures, logging, and the caller policy for
//! known-bad shipped files. Decoding itself stays synchronous and
//! allocation-bounded; independent files can be loaded from separate
//! threads with no shared state.

use std::fs;
use std::path::Path;

use rse_decode::{DiagnosticSink, LightFile, ModelFile, NoDiagnostics};
use tracing::debug;

mod error;

pub use error::{Error, Result};
// Re-export decode types for convenience.
pub use rse_decode::{DecodeError, WriteDiagnostics};

/// Whether a file is one of the known-bad shipped files that must be
/// skipped before decoding.
///
/// `obstacletest.map` is an early test file shipped by accident; its data
/// structures are inconsistent with every other file in the format family.
/// Skipping it is caller policy, never decoder logic.
#[must_use]
pub fn is_known_bad(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.eq_ignore_ascii_case("obstacletest.map"))
}

/// Load and decode a model file.
pub fn load_model(path: impl AsRef<Path>) -> Result<ModelFile> {
    load_model_with_diagnostics(path, &mut NoDiagnostics)
}

/// Load and decode a model file, reporting each record to `sink`.
pub fn load_model_with_diagnostics(
    path: impl AsRef<Path>,
    sink: &mut dyn DiagnosticSink,
) -> Result<ModelFile> {
    let path = path.as_ref();
    let data = read_file(path)?;
    let model = ModelFile::decode_with_diagnostics(&data, sink).map_err(|source| {
        Error::Decode {
            path: path.to_path_buf(),
            source,
        }
    })?;
    debug!(
        path = %path.display(),
        materials = model.materials.len(),
        objects = model.geometry_objects.len(),
        trailing_bytes = model.trailing_bytes,
        "decoded model file"
    );
    Ok(model)
}

/// Load and decode a light-list file.
pub fn load_lights(path: impl AsRef<Path>) -> Result<LightFile> {
    load_lights_with_diagnostics(path, &mut NoDiagnostics)
}

/// Load and decode a light-list file, reporting each record to `sink`.
pub fn load_lights_with_diagnostics(
    path: impl AsRef<Path>,
    sink: &mut dyn DiagnosticSink,
) -> Result<LightFile> {
    let path = path.as_ref();
    let data = read_file(path)?;
    let lights = LightFile::decode_with_diagnostics(&data, sink).map_err(|source| {
        Error::Decode {
            path: path.to_path_buf(),
            source,
        }
    })?;
    debug!(
        path = %path.display(),
        lights = lights.lights.len(),
        trailing_bytes = lights.trailing_bytes,
        "decoded light file"
    );
    Ok(lights)
}

fn read_file(path: &Path) -> Result<Vec<u8>> {
    let data = fs::read(path).map_err(|e| Error::Io {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    debug!(path = %path.display(), bytes = data.len(), "read asset file");
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn push_sized(data: &mut Vec<u8>, bytes: &[u8]) {
        data.extend_from_slice(&u32::try_from(bytes.len()).unwrap().to_le_bytes());
        data.extend_from_slice(bytes);
    }

    fn empty_model_bytes() -> Vec<u8> {
        let mut data = Vec::new();
        push_sized(&mut data, b"OK\0");
        data.extend_from_slice(&0u32.to_le_bytes());
        data.extend_from_slice(&0u32.to_le_bytes());
        push_sized(&mut data, b"Materials\0");
        data.extend_from_slice(&0u32.to_le_bytes());
        data.extend_from_slice(&0u32.to_le_bytes());
        data.extend_from_slice(&0u32.to_le_bytes());
        push_sized(&mut data, b"Geometry\0");
        data.extend_from_slice(&0u32.to_le_bytes());
        push_sized(&mut data, b"End\0");
        data
    }

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("rse-assets-{}-{name}", std::process::id()))
    }

    #[test]
    fn test_is_known_bad() {
        assert!(is_known_bad(Path::new("data/maps/obstacletest.map")));
        assert!(is_known_bad(Path::new("ObstacleTest.MAP")));
        assert!(!is_known_bad(Path::new("data/maps/m01.map")));
        assert!(!is_known_bad(Path::new("obstacle.map")));
    }

    #[test]
    fn test_load_model_missing_file() {
        let err = load_model("/nonexistent/path/model.sob").unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }

    #[test]
    fn test_load_model_roundtrip() {
        let path = temp_path("roundtrip.sob");
        fs::write(&path, empty_model_bytes()).unwrap();

        let model = load_model(&path).unwrap();
        assert!(model.materials.is_empty());
        assert!(model.geometry_objects.is_empty());
        assert_eq!(model.trailing_bytes, 0);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_load_model_decode_error_carries_path() {
        let path = temp_path("corrupt.sob");
        fs::write(&path, [0xFF; 3]).unwrap();

        let err = load_model(&path).unwrap_err();
        match err {
            Error::Decode { path: p, source } => {
                assert_eq!(p, path);
                assert!(matches!(source, DecodeError::TruncatedInput { .. }));
            }
            Error::Io { .. } => panic!("expected decode error"),
        }

        fs::remove_file(&path).unwrap();
    }
}
