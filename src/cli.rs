//! Command line for the invite-fx viewer

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use invite_fx::{EffectKind, Rgba, SceneConfig, persistence};

#[derive(Parser, Debug)]
#[command(name = "invite-fx")]
#[command(about = "Preview invitation particle effects in a window", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Effect to run: confetti, hearts, balloons, sparkles, stars, fireworks or none
    #[arg(short, long)]
    pub effect: Option<EffectKind>,

    /// Invitation, theme or scene JSON document
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Primary theme color, overriding the document
    #[arg(long)]
    pub primary: Option<Rgba>,

    /// Accent theme color, overriding the document
    #[arg(long)]
    pub accent: Option<Rgba>,

    /// Do not paint the theme gradient behind the particles
    #[arg(long)]
    pub no_backdrop: bool,

    /// Initial window width in logical pixels
    #[arg(long)]
    pub width: Option<f64>,

    /// Initial window height in logical pixels
    #[arg(long)]
    pub height: Option<f64>,

    /// Verbosity level (can be repeated for more detail)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }

    /// Document to read the scene from, if any
    pub fn scene_path(&self) -> Option<PathBuf> {
        self.config.clone().or_else(|| {
            let path = persistence::default_scene_path();
            path.exists().then_some(path)
        })
    }

    /// Scene from the document, with command line overrides applied
    pub fn resolve_scene(&self) -> Result<SceneConfig> {
        let mut scene = match self.scene_path() {
            Some(path) => SceneConfig::load(&path)?,
            None => SceneConfig::default(),
        };
        self.apply_overrides(&mut scene);
        Ok(scene)
    }

    pub fn apply_overrides(&self, scene: &mut SceneConfig) {
        if let Some(effect) = self.effect {
            scene.animation = effect;
        }
        if let Some(primary) = self.primary {
            scene.primary_color = primary;
        }
        if let Some(accent) = self.accent {
            scene.accent_color = accent;
        }
    }
}
