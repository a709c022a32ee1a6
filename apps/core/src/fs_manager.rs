use std::fs;
use std::path::PathBuf;

use tracing::info;

/// Resolves the on-disk layout of the agent relative to the executable,
/// so the whole installation stays portable.
pub struct PortablePathManager;

impl PortablePathManager {
    /// Returns the application root directory (where the executable lives).
    pub fn root_dir() -> PathBuf {
        #[cfg(debug_assertions)]
        {
            // In development the executable sits in target/debug at the
            // workspace root; data lives under apps/core.
            let mut path = std::env::current_exe().expect("Failed to get current exe");
            path.pop(); // remove exe name
            path.pop(); // remove debug
            path.pop(); // remove target

            let core_path = path.join("apps").join("core");
            if core_path.exists() {
                return core_path;
            }

            return path;
        }

        #[cfg(not(debug_assertions))]
        match std::env::current_exe() {
            Ok(mut path) => {
                path.pop();
                path
            }
            Err(e) => {
                tracing::error!(
                    "Failed to get current exe path: {}. Falling back to current_dir.",
                    e
                );
                std::env::current_dir().expect("Failed to get current directory")
            }
        }
    }

    /// Returns the main data directory (./data).
    pub fn data_dir() -> PathBuf {
        Self::root_dir().join("data")
    }

    /// Returns the models directory (./data/models).
    pub fn models_dir() -> PathBuf {
        Self::data_dir().join("models")
    }

    /// Returns the path of the persisted intents document.
    pub fn intents_path() -> PathBuf {
        Self::data_dir().join("intents.json")
    }

    /// Returns the path of the persisted classifier blob.
    pub fn model_path() -> PathBuf {
        Self::models_dir().join("classifier.bin")
    }

    /// Creates the data and models directories if they do not exist.
    pub fn init() -> Result<(), std::io::Error> {
        let data_path = Self::data_dir();
        let models_path = Self::models_dir();

        if !data_path.exists() {
            info!("Creating data directory: {:?}", data_path);
            fs::create_dir_all(&data_path)?;
        }

        if !models_path.exists() {
            info!("Creating models directory: {:?}", models_path);
            fs::create_dir_all(&models_path)?;
        }

        Ok(())
    }
}
