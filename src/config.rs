use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

/// Central configuration loaded from environment variables.
///
/// Every setting has a default, so a bare `trellis render` works when the
/// artifact sits at the conventional path. The .env file is loaded
/// automatically at startup via dotenvy.
pub struct Config {
    /// Path to the saved topic-model output (TRELLIS_ARTIFACT)
    pub artifact_path: PathBuf,
    /// Path the chart image is written to (TRELLIS_OUTPUT)
    pub output_path: PathBuf,
    /// Label of the catch-all topic to exclude (TRELLIS_CATCHALL)
    pub catchall_label: String,
    /// How many background cluster bands to derive from the tree (TRELLIS_BANDS)
    pub band_count: usize,
}

impl Config {
    pub fn load() -> Result<Self> {
        let band_count = match env::var("TRELLIS_BANDS") {
            Ok(raw) => {
                let parsed: usize = raw.parse().with_context(|| {
                    format!("TRELLIS_BANDS must be a positive integer, got '{raw}'")
                })?;
                if parsed == 0 {
                    anyhow::bail!("TRELLIS_BANDS must be at least 1");
                }
                parsed
            }
            Err(_) => 3,
        };

        Ok(Self {
            artifact_path: env::var("TRELLIS_ARTIFACT")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("data/topic-model.json")),
            output_path: env::var("TRELLIS_OUTPUT")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("output/topic-dendrogram.png")),
            catchall_label: env::var("TRELLIS_CATCHALL")
                .unwrap_or_else(|_| "Miscellaneous".to_string()),
            band_count,
        })
    }

    /// Check the artifact exists before starting a run.
    pub fn require_artifact(&self) -> Result<()> {
        if !self.artifact_path.exists() {
            anyhow::bail!(
                "topic artifact not found at {}.\n\
                 Set TRELLIS_ARTIFACT in your .env to the model's saved output.",
                self.artifact_path.display()
            );
        }
        Ok(())
    }
}
