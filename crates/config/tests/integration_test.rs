//! Public API tests: a profile written with `ProfileFile` feeds `ConfigLoader`.

use nexus_config::{ConfigError, ConfigLoader, ProfileConfig, ProfileFile};
use secrecy::{ExposeSecret, SecretString};
use tempfile::TempDir;

#[test]
fn test_saved_profile_loads_through_loader() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("nexus").join("config.json");

    let mut file = ProfileFile::default();
    file.profiles.insert(
        "prod".to_string(),
        ProfileConfig {
            group: Some("acme".to_string()),
            username: Some("bob".to_string()),
            password: Some(SecretString::new("secret".to_string().into())),
            er_host: Some("https://er.acme.example.com".to_string()),
            ..ProfileConfig::default()
        },
    );
    file.save(&path).unwrap();

    let config = ConfigLoader::new()
        .with_profile_name("prod".to_string())
        .with_config_path(path)
        .from_profile()
        .unwrap()
        .build()
        .unwrap();

    assert_eq!(config.credential.group, "acme");
    assert_eq!(config.credential.password.expose_secret(), "secret");
    assert_eq!(config.connection.er_host, "https://er.acme.example.com");
    assert_eq!(config.connection.emc_host, "emc.online.etunexus.com");
}

#[test]
fn test_config_debug_never_prints_password() {
    let config = ConfigLoader::new()
        .with_group("acme".to_string())
        .with_username("bob".to_string())
        .with_password("do-not-print-me".to_string())
        .build()
        .unwrap();

    assert!(!format!("{config:?}").contains("do-not-print-me"));
}

#[test]
fn test_unreadable_profile_path_is_reported() {
    let temp_dir = TempDir::new().unwrap();

    // A directory where a file is expected exists but cannot be read as one.
    let result = ConfigLoader::new()
        .with_profile_name("prod".to_string())
        .with_config_path(temp_dir.path().to_path_buf())
        .from_profile();

    assert!(matches!(result, Err(ConfigError::ConfigFileRead { .. })));
}
