//! Edge case and error scenario tests

use leibooks_config::{Config, ConfigError, ConfigManager, ConfigPersistence};
use std::fs;
use tempfile::TempDir;

fn setup_test_manager() -> Result<(TempDir, ConfigManager), Box<dyn std::error::Error>> {
    let temp_dir = TempDir::new()?;
    let manager = ConfigManager::with_directory(temp_dir.path().to_path_buf());
    Ok((temp_dir, manager))
}

#[test]
fn test_corrupted_config_uses_defaults() -> Result<(), Box<dyn std::error::Error>> {
    let (_temp_dir, manager) = setup_test_manager()?;
    fs::write(manager.config_path(), "this is not valid TOML {{{")?;

    assert!(matches!(manager.load(), Err(ConfigError::ParseError { .. })));
    assert_eq!(manager.load_or_default(), Config::default());
    Ok(())
}

#[test]
fn test_wrong_types_are_parse_errors() -> Result<(), Box<dyn std::error::Error>> {
    let (_temp_dir, manager) = setup_test_manager()?;
    fs::write(manager.config_path(), "[library]\nextract_metadata = \"sometimes\"\n")?;
    assert!(matches!(manager.load(), Err(ConfigError::ParseError { .. })));

    fs::write(manager.config_path(), "[app]\nlog_level = \"loud\"\n")?;
    assert!(matches!(manager.load(), Err(ConfigError::ParseError { .. })));
    Ok(())
}

#[test]
fn test_unknown_keys_are_ignored() -> Result<(), Box<dyn std::error::Error>> {
    let (_temp_dir, manager) = setup_test_manager()?;
    fs::write(
        manager.config_path(),
        "[player]\ndefault_volume = 80\n\n[library]\nfollow_symlinks = true\n",
    )?;
    let config = manager.load()?;
    assert!(config.library.follow_symlinks);
    Ok(())
}

#[test]
fn test_invalid_but_parseable_file_still_loads() -> Result<(), Box<dyn std::error::Error>> {
    let (_temp_dir, manager) = setup_test_manager()?;
    fs::write(manager.config_path(), "[library]\ndefault_author = \"\"\n")?;

    let config = manager.load()?;
    assert_eq!(config.library.default_author, "");
    assert!(config.validate().is_err());
    Ok(())
}

#[test]
fn test_whitespace_only_file() -> Result<(), Box<dyn std::error::Error>> {
    let (_temp_dir, manager) = setup_test_manager()?;
    fs::write(manager.config_path(), "   \n\t\n")?;
    assert!(matches!(manager.load(), Err(ConfigError::ReadError { .. })));
    Ok(())
}

#[test]
fn test_no_backup_on_first_save() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = TempDir::new()?;
    let persistence = ConfigPersistence::new(temp_dir.path().join("config.toml"));
    persistence.save(&Config::default())?;
    assert!(!persistence.backup_path().exists());

    persistence.save(&Config::default())?;
    assert!(persistence.backup_path().exists());
    Ok(())
}

#[test]
fn test_save_leaves_no_temp_files() -> Result<(), Box<dyn std::error::Error>> {
    let (temp_dir, manager) = setup_test_manager()?;
    manager.save(&Config::default())?;
    manager.save(&Config::default())?;

    let names: Vec<String> = fs::read_dir(temp_dir.path())?
        .filter_map(Result::ok)
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .collect();
    let mut sorted = names.clone();
    sorted.sort();
    assert_eq!(sorted, vec!["config.toml", "config.toml.backup"]);
    Ok(())
}
