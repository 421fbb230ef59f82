//! Configuration file generation for lotwatch.

use anyhow::{Context, Result};
use lotwatch_app::AppConfig;
use std::io::{self, BufRead, Write};
use std::path::Path;

pub mod keybindings;

pub use keybindings::{Action, KeyBindingsConfig, ViewType};

const HEADER: &str = "\
# lotwatch configuration
#
# [display]           theme (\"light\" or \"dark\") and refresh interval in seconds
# [thresholds]        usage percentages where lots turn medium and high
# [event_thresholds]  the same for expected event impact
# [tui.keybindings.*] keys per screen; a section you keep must list every action
";

/// Write the default configuration to `path`, asking before overwriting.
pub fn init_config(path: &Path, force: bool) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    if path.exists() && !force && !confirm_overwrite(path, &mut stdin.lock(), &mut stdout)? {
        println!("Aborted.");
        return Ok(());
    }

    write_default_config(path)?;

    println!("✓ Wrote configuration file: {}", path.display());
    println!();
    println!("Edit this file to change thresholds, theme or keybindings.");
    println!("Restart lotwatch tui to apply changes.");
    Ok(())
}

fn write_default_config(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    std::fs::write(path, default_config_toml()?)
        .with_context(|| format!("Failed to write config file: {}", path.display()))
}

fn default_config_toml() -> Result<String> {
    let app = AppConfig::default().to_toml()?;
    let tui = keybindings::generate_default_tui_toml()?;
    Ok(format!("{HEADER}\n{app}\n{tui}"))
}

fn confirm_overwrite(path: &Path, input: &mut impl BufRead, output: &mut impl Write) -> Result<bool> {
    write!(output, "File already exists: {}\nOverwrite? [y/N]: ", path.display())?;
    output.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;

    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn default_config_parses_for_app_and_tui() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("nested").join("config.toml");
        write_default_config(&path)?;

        let app = AppConfig::from_file(&path)?;
        assert_eq!(app, AppConfig::default());

        let loaded = keybindings::load_config(&path)?;
        let Some(config) = loaded else {
            panic!("config file should exist");
        };
        keybindings::validate_tui_config(&config.tui)?;
        assert_eq!(config.tui.keybindings.home.quit, vec!["q", "Q", "Esc"]);
        Ok(())
    }

    #[test]
    fn generated_file_starts_with_comment_header() -> Result<()> {
        let text = default_config_toml()?;
        assert!(text.starts_with("# lotwatch configuration"));
        assert!(text.contains("[display]"));
        assert!(text.contains("[tui.keybindings.home]"));
        Ok(())
    }

    #[test]
    fn confirm_overwrite_accepts_yes() -> Result<()> {
        let mut out = Vec::new();
        assert!(confirm_overwrite(Path::new("c.toml"), &mut "yes\n".as_bytes(), &mut out)?);
        assert!(String::from_utf8_lossy(&out).contains("Overwrite?"));
        assert!(!confirm_overwrite(Path::new("c.toml"), &mut "\n".as_bytes(), &mut Vec::new())?);
        Ok(())
    }
}
