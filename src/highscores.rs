//! Persist the best autoplay score to disk (XDG config or ~/.config/shapefit).

use anyhow::Result;
use std::fs;
use std::path::PathBuf;

const FILENAME: &str = "highscore";

/// Returns the path to the high score file (config dir / shapefit / highscore).
fn config_path() -> PathBuf {
    let base = match std::env::var("XDG_CONFIG_HOME") {
        Ok(xdg) if !xdg.is_empty() => PathBuf::from(xdg),
        _ => std::env::var("HOME")
            .map(|h| PathBuf::from(h).join(".config"))
            .unwrap_or_else(|_| PathBuf::from(".")),
    };
    base.join("shapefit").join(FILENAME)
}

/// First line as a score; 0 on anything unparsable.
fn parse_best(content: &str) -> u64 {
    content
        .lines()
        .next()
        .and_then(|l| l.trim().parse().ok())
        .unwrap_or(0)
}

/// Load the best score. 0 on missing file or parse error.
pub fn load_best() -> u64 {
    fs::read_to_string(config_path())
        .map(|c| parse_best(&c))
        .unwrap_or(0)
}

/// Save the best score. Creates the config directory if needed.
pub fn save_best(score: u64) -> Result<()> {
    let path = config_path();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, format!("{score}\n"))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_best() {
        assert_eq!(parse_best("1250\n"), 1250);
        assert_eq!(parse_best("  42  \nignored"), 42);
        assert_eq!(parse_best("garbage"), 0);
        assert_eq!(parse_best(""), 0);
    }
}
