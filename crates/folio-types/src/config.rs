//! Runtime configuration loaded from TOML.
//!
//! Every field has a default, so an empty file (or no file at all) gives
//! the stock portfolio timeline.

use std::path::Path;

use serde::Deserialize;

use crate::error::{FolioError, Result};

/// Top-level configuration (`folio.toml`).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct FolioConfig {
    /// Prompt shown before every command line.
    pub prompt: String,
    /// Rows visible in the scrollback view.
    pub viewport_lines: usize,
    /// Host tick granularity in milliseconds.
    pub frame_ms: u32,
    /// Pause after a typewriter finishes before its callback fires.
    pub settle_ms: u32,
    /// Loading-screen boot animation.
    pub boot: BootConfig,
    /// Time until the loading screen hides.
    pub loading_screen_ms: u32,
    /// Fade-out of the loading screen before the hero titles start.
    pub loading_fade_ms: u32,
    /// Hero titles, typed one after another.
    pub hero: Vec<HeroLine>,
    /// Scripted command demonstration shown in the terminal.
    pub demo: DemoConfig,
    /// Time until the interactive terminal accepts input.
    pub terminal_enable_ms: u32,
    /// How long the easter egg message stays up.
    pub easter_egg_ms: u32,
}

/// Boot lines typed on the loading screen.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct BootConfig {
    pub commands: Vec<String>,
    pub char_delay_ms: u32,
    /// Pause after a line is fully typed before the next one starts.
    pub pause_ms: u32,
}

/// One hero title line.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HeroLine {
    pub text: String,
    #[serde(default = "default_hero_delay")]
    pub char_delay_ms: u32,
}

/// Commands replayed into the terminal before it goes interactive.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    pub commands: Vec<String>,
    pub delay_ms: u32,
    /// Also print each command's output, not just the command line.
    pub show_output: bool,
}

fn default_hero_delay() -> u32 {
    50
}

impl Default for FolioConfig {
    fn default() -> Self {
        Self {
            prompt: "anuj@portfolio:~$".to_string(),
            viewport_lines: 12,
            frame_ms: 16,
            settle_ms: 500,
            boot: BootConfig::default(),
            loading_screen_ms: 4000,
            loading_fade_ms: 500,
            hero: vec![
                HeroLine {
                    text: "ANUJ".to_string(),
                    char_delay_ms: 100,
                },
                HeroLine {
                    text: "Full Stack / AI-ML Developer".to_string(),
                    char_delay_ms: 50,
                },
                HeroLine {
                    text: "Web • Mobile • AI/ML".to_string(),
                    char_delay_ms: 30,
                },
            ],
            demo: DemoConfig::default(),
            terminal_enable_ms: 5000,
            easter_egg_ms: 3000,
        }
    }
}

impl Default for BootConfig {
    fn default() -> Self {
        Self {
            commands: [
                "sudo systemctl start portfolio",
                "Loading kernel modules...",
                "Initializing user interface...",
                "Mounting project directories...",
                "Portfolio system online!",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            char_delay_ms: 50,
            pause_ms: 800,
        }
    }
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            commands: vec![
                "whoami".to_string(),
                "ls".to_string(),
                "cat about.txt".to_string(),
            ],
            delay_ms: 1000,
            show_output: false,
        }
    }
}

impl FolioConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        log::debug!("loaded config from {}", path.display());
        Self::from_toml(&text)
    }

    /// Reject values the timeline cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.frame_ms == 0 {
            return Err(FolioError::Config("frame_ms must be > 0".to_string()));
        }
        if self.viewport_lines == 0 {
            return Err(FolioError::Config(
                "viewport_lines must be > 0".to_string(),
            ));
        }
        if self.terminal_enable_ms < self.loading_screen_ms {
            log::warn!(
                "terminal_enable_ms ({}) is before loading_screen_ms ({})",
                self.terminal_enable_ms,
                self.loading_screen_ms
            );
        }
        Ok(())
    }
}
