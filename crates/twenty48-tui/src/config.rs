use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{anyhow, Context, Result};
use ratatui::style::Color;

#[derive(Clone, Debug, PartialEq, serde::Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub game: Game,
    #[serde(default)]
    pub log: Log,
    #[serde(default)]
    pub theme: Theme,
}

#[derive(Clone, Debug, PartialEq, serde::Deserialize, Default)]
pub struct Game {
    /// Fixed RNG seed; omitted means a fresh game every run.
    #[serde(default)]
    pub seed: Option<u64>,
}

#[derive(Clone, Debug, PartialEq, serde::Deserialize)]
pub struct Log {
    /// Tracing filter, e.g. "info", "twenty48_grid=debug".
    #[serde(default = "defaults::log_filter")]
    pub filter: String,
    /// Log destination. The terminal itself is taken by the UI.
    #[serde(default = "defaults::log_file")]
    pub file: PathBuf,
}

/// Colour strings understood by ratatui: names ("yellow"), indices ("208")
/// or hex ("#f2b179").
#[derive(Clone, Debug, PartialEq, serde::Deserialize)]
pub struct Theme {
    #[serde(default = "defaults::background")]
    pub background: String,
    #[serde(default = "defaults::text")]
    pub text: String,
    #[serde(default = "defaults::board")]
    pub board: String,
    #[serde(default = "defaults::empty_tile")]
    pub empty_tile: String,
    #[serde(default = "defaults::tile")]
    pub tile: String,
    /// Text colour on tiles above 4.
    #[serde(default = "defaults::light_text")]
    pub light_text: String,
}

/// Parsed theme colours, ready for rendering.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Palette {
    pub background: Color,
    pub text: Color,
    pub board: Color,
    pub empty_tile: Color,
    pub tile: Color,
    pub light_text: Color,
}

impl Default for Log {
    fn default() -> Self {
        Self { filter: defaults::log_filter(), file: defaults::log_file() }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: defaults::background(),
            text: defaults::text(),
            board: defaults::board(),
            empty_tile: defaults::empty_tile(),
            tile: defaults::tile(),
            light_text: defaults::light_text(),
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        // The built-in theme strings always parse.
        Theme::default().palette().unwrap_or(Palette {
            background: Color::Reset,
            text: Color::Reset,
            board: Color::DarkGray,
            empty_tile: Color::Gray,
            tile: Color::Yellow,
            light_text: Color::White,
        })
    }
}

impl Theme {
    /// Parse every colour, naming the first key that fails.
    pub fn palette(&self) -> Result<Palette> {
        Ok(Palette {
            background: parse_color("background", &self.background)?,
            text: parse_color("text", &self.text)?,
            board: parse_color("board", &self.board)?,
            empty_tile: parse_color("empty_tile", &self.empty_tile)?,
            tile: parse_color("tile", &self.tile)?,
            light_text: parse_color("light_text", &self.light_text)?,
        })
    }
}

fn parse_color(key: &str, value: &str) -> Result<Color> {
    Color::from_str(value).map_err(|_| anyhow!("theme.{key}: unrecognised colour {value:?}"))
}

impl Config {
    pub fn from_toml<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::from_toml_str(&contents)
            .with_context(|| format!("failed to parse config {}", path.display()))
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let cfg: Self = toml::from_str(contents)?;
        Ok(cfg)
    }
}

mod defaults {
    use std::path::PathBuf;

    pub fn log_filter() -> String { "info".to_string() }
    pub fn log_file() -> PathBuf { PathBuf::from("twenty48.log") }
    pub fn background() -> String { "#faf8ef".to_string() }
    pub fn text() -> String { "#776e65".to_string() }
    pub fn board() -> String { "#bbada0".to_string() }
    pub fn empty_tile() -> String { "#cdc1b4".to_string() }
    pub fn tile() -> String { "#f2b179".to_string() }
    pub fn light_text() -> String { "#f9f6f2".to_string() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_is_all_defaults() {
        let cfg = Config::from_toml_str("").unwrap();
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.game.seed, None);
        assert_eq!(cfg.log.filter, "info");
        assert_eq!(cfg.log.file, PathBuf::from("twenty48.log"));
    }

    #[test]
    fn partial_sections_keep_defaults() {
        let cfg = Config::from_toml_str(
            r#"
            [game]
            seed = 42

            [theme]
            tile = "yellow"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.game.seed, Some(42));
        assert_eq!(cfg.theme.tile, "yellow");
        assert_eq!(cfg.theme.board, "#bbada0");
        let palette = cfg.theme.palette().unwrap();
        assert_eq!(palette.tile, Color::Yellow);
        assert_eq!(palette.board, Color::Rgb(0xbb, 0xad, 0xa0));
    }

    #[test]
    fn default_palette_matches_theme() {
        assert_eq!(Palette::default(), Theme::default().palette().unwrap());
        assert_eq!(Palette::default().tile, Color::Rgb(0xf2, 0xb1, 0x79));
    }

    #[test]
    fn bad_colour_names_the_key() {
        let cfg = Config::from_toml_str("[theme]\nempty_tile = \"not-a-colour\"\n").unwrap();
        let err = cfg.theme.palette().unwrap_err().to_string();
        assert!(err.contains("theme.empty_tile"), "{err}");
    }

    #[test]
    fn wrong_type_is_an_error() {
        assert!(Config::from_toml_str("[game]\nseed = \"abc\"\n").is_err());
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = Config::from_toml("/definitely/not/here/twenty48.toml").unwrap_err();
        assert!(err.to_string().contains("failed to read config"));
    }
}
