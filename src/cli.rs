// cli.rs - Command-line interface configuration
use std::path::PathBuf;

use clap::Parser;

use crate::config::SceneConfig;
use crate::core::Viewport;
use crate::error::Result;

#[derive(Parser, Debug, Clone)]
#[command(name = "collabrx-scene")]
#[command(about = "Procedural hero scene for the CollabRx landing page", long_about = None)]
pub struct Cli {
    /// Scene config (JSON); defaults apply to anything it leaves out
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Seed for procedural placement, overrides the config
    #[arg(long)]
    pub seed: Option<u64>,

    /// Render frames to PNG instead of opening a window
    #[arg(long)]
    pub headless: bool,

    /// Number of frames to render headless
    #[arg(long, default_value_t = 60)]
    pub frames: u32,

    /// Frame rate of the headless clock
    #[arg(long, default_value_t = 30.0)]
    pub fps: f32,

    /// Logical width
    #[arg(long, default_value_t = 800)]
    pub width: u32,

    /// Logical height
    #[arg(long, default_value_t = 600)]
    pub height: u32,

    /// Device pixel ratio for headless output, clamped to [1, 2]
    #[arg(long, default_value_t = 1.0)]
    pub dpr: f32,

    /// Output directory for headless frames
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Also write the composed scene as JSON
    #[arg(long = "dump-scene")]
    pub dump_scene: bool,

    /// Disable the controls banner and periodic FPS logging
    #[arg(long = "no-ui", default_value = "false")]
    pub no_ui: bool,
}

impl Cli {
    /// Load the config file, if any, and apply command-line overrides
    pub fn scene_config(&self) -> Result<SceneConfig> {
        let config = match &self.config {
            Some(path) => SceneConfig::load(path)?,
            None => SceneConfig::default(),
        };

        let config = match self.seed {
            Some(seed) => config.with_seed(seed),
            None => config,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.width, self.height, self.dpr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cli = Cli::parse_from(["collabrx-scene"]);
        assert!(!cli.headless);
        assert_eq!(cli.frames, 60);
        assert_eq!(cli.viewport(), Viewport::new(800, 600, 1.0));
        assert_eq!(cli.scene_config().unwrap(), SceneConfig::default());
    }

    #[test]
    fn seed_overrides_config() {
        let cli = Cli::parse_from(["collabrx-scene", "--seed", "9", "--headless"]);
        assert!(cli.headless);
        assert_eq!(cli.scene_config().unwrap().seed, Some(9));
    }

    #[test]
    fn dpr_is_clamped() {
        let cli = Cli::parse_from(["collabrx-scene", "--dpr", "3.5"]);
        assert_eq!(cli.viewport().device_pixel_ratio, 2.0);
    }

    #[test]
    fn missing_config_file_is_an_error() {
        let cli = Cli::parse_from(["collabrx-scene", "--config", "/no/such/scene.json"]);
        assert!(cli.scene_config().is_err());
    }
}
