use crate::constants::{DEFAULT_DPI, MAX_DPI};
use crate::types::*;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Settings for one conversion
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DeckOptions {
    /// Rendering resolution for document pages
    pub dpi: u32,
    pub slide_size: SlideSize,
    pub mode: PlacementMode,
}

impl Default for DeckOptions {
    fn default() -> Self {
        Self {
            dpi: DEFAULT_DPI,
            slide_size: SlideSize::Auto,
            mode: PlacementMode::Fit,
        }
    }
}

impl DeckOptions {
    /// Load options from JSON file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let options = serde_json::from_slice(&bytes)
            .map_err(|e| DeckError::Config(format!("Failed to parse config: {}", e)))?;
        Ok(options)
    }

    /// Save options to JSON file
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| DeckError::Config(format!("Failed to serialize config: {}", e)))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    /// Validate the options
    pub fn validate(&self) -> Result<()> {
        if self.dpi == 0 {
            return Err(DeckError::Config("DPI must be positive".to_string()));
        }
        if self.dpi > MAX_DPI {
            return Err(DeckError::Config(format!(
                "DPI {} exceeds the maximum of {}",
                self.dpi, MAX_DPI
            )));
        }

        // Custom sizes go through the same check as any canvas
        self.slide_size.fixed_canvas()?;
        Ok(())
    }
}
