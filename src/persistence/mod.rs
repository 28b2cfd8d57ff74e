//! Save/load of trained controllers
//!
//! Features:
//! - Versioned JSON envelope around any serde model
//! - Write to a temp file, then rename over the target
//! - Malformed or missing data is reported as [`LoadError`]; nothing retries
//! - Models that validate while decoding (like [`crate::FeedForward`] layer
//!   shapes) surface their rejection as [`LoadError::Parse`]

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Current envelope format
pub const FORMAT_VERSION: u32 = 1;

/// Failure to read persisted data
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed data in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("unsupported format version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },
}

/// Failure to write persisted data
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("cannot write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot encode model: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Serialize)]
struct EnvelopeRef<'a, T> {
    version: u32,
    model: &'a T,
}

#[derive(Deserialize)]
struct Envelope<T> {
    version: u32,
    model: T,
}

/// Only the version, so a newer file is rejected before decoding the model
#[derive(Deserialize)]
struct VersionProbe {
    version: u32,
}

/// Save a controller to `path`
pub fn save_controller<T: Serialize>(path: impl AsRef<Path>, model: &T) -> Result<(), SaveError> {
    let path = path.as_ref();
    let json = serde_json::to_string_pretty(&EnvelopeRef {
        version: FORMAT_VERSION,
        model,
    })?;

    let io_err = |source: std::io::Error| SaveError::Io {
        path: path.to_path_buf(),
        source,
    };
    let tmp = path.with_extension("tmp");
    std::fs::write(&tmp, json).map_err(io_err)?;
    std::fs::rename(&tmp, path).map_err(io_err)?;

    log::info!("Saved model to {}", path.display());
    Ok(())
}

/// Load a controller from `path`
pub fn load_controller<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T, LoadError> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let parse_err = |source: serde_json::Error| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    };

    let probe: VersionProbe = serde_json::from_str(&json).map_err(parse_err)?;
    if probe.version != FORMAT_VERSION {
        return Err(LoadError::UnsupportedVersion {
            found: probe.version,
            expected: FORMAT_VERSION,
        });
    }

    let envelope: Envelope<T> = serde_json::from_str(&json).map_err(parse_err)?;
    debug_assert_eq!(envelope.version, FORMAT_VERSION);
    log::info!("Loaded model from {}", path.display());
    Ok(envelope.model)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::{FeedForward, Layer};
    use ndarray::{Array1, Array2};
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("pong-evolve-{}-{}", std::process::id(), name))
    }

    #[test]
    fn test_save_and_load() {
        let mut rng = Pcg32::seed_from_u64(4);
        let net = FeedForward::new_random(&[5], 1.0, &mut rng);
        let path = temp_path("roundtrip.json");

        save_controller(&path, &net).expect("Failed to save");
        let loaded: FeedForward = load_controller(&path).expect("Failed to load");
        assert_eq!(loaded, net);
        assert!(!path.with_extension("tmp").exists());

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_missing_file() {
        let err = load_controller::<FeedForward>(temp_path("missing.json")).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }

    #[test]
    fn test_malformed_file() {
        let path = temp_path("malformed.json");
        std::fs::write(&path, "{ not json").unwrap();
        let err = load_controller::<FeedForward>(&path).unwrap_err();
        assert!(matches!(err, LoadError::Parse { .. }));
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_wrong_model_shape() {
        let path = temp_path("shape.json");
        std::fs::write(&path, r#"{ "version": 1, "model": { "layers": 3 } }"#).unwrap();
        let err = load_controller::<FeedForward>(&path).unwrap_err();
        assert!(matches!(err, LoadError::Parse { .. }));
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_mismatched_layer_rejected() {
        // 3 outputs fed by 2 inputs; the observation has 3
        let net = FeedForward {
            layers: vec![Layer {
                weights: Array2::zeros((3, 2)),
                biases: Array1::zeros(3),
            }],
        };
        let path = temp_path("mismatch.json");
        save_controller(&path, &net).expect("Failed to save");

        let err = load_controller::<FeedForward>(&path).unwrap_err();
        assert!(matches!(err, LoadError::Parse { .. }));
        assert!(err.to_string().contains("3x2"));
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_future_version_rejected() {
        let path = temp_path("future.json");
        std::fs::write(&path, r#"{ "version": 99, "model": null }"#).unwrap();
        let err = load_controller::<FeedForward>(&path).unwrap_err();
        assert!(matches!(
            err,
            LoadError::UnsupportedVersion {
                found: 99,
                expected: FORMAT_VERSION
            }
        ));
        std::fs::remove_file(&path).ok();
    }
}
