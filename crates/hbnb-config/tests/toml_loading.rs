//! Integration tests for TOML configuration loading.
//!
//! Uses figment::Jail for sandboxed env var and working directory manipulation.

use figment::{
    Figment, Jail,
    providers::{Format, Serialized, Toml},
};
use hbnb_config::{Backend, Environment, HbnbConfig};
use pretty_assertions::assert_eq;
use std::path::PathBuf;

#[test]
fn loads_storage_config_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[storage]
backend = "db"
environment = "test"

[storage.database]
path = "./dev.db"
"#,
        )?;

        let config: HbnbConfig = Figment::from(Serialized::defaults(HbnbConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.storage.backend, Backend::Db);
        assert_eq!(config.storage.environment, Environment::Test);
        assert_eq!(config.storage.database.path, "./dev.db");
        assert!(config.storage.is_test_mode());
        assert!(!config.storage.database.is_remote());
        Ok(())
    });
}

#[test]
fn partial_toml_keeps_defaults() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[storage.file]
path = "objects.json"
"#,
        )?;

        let config: HbnbConfig = Figment::from(Serialized::defaults(HbnbConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.storage.backend, Backend::File);
        assert_eq!(config.storage.file.path, PathBuf::from("objects.json"));
        assert_eq!(config.storage.database.path, "hbnb.db");
        Ok(())
    });
}

#[test]
fn project_file_is_picked_up_by_figment() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "hbnb.toml",
            r#"
[storage]
backend = "relational"
"#,
        )?;

        let config = HbnbConfig::load().expect("config loads");
        assert_eq!(config.storage.backend, Backend::Db);
        Ok(())
    });
}

#[test]
fn unknown_backend_is_rejected() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "hbnb.toml",
            r#"
[storage]
backend = "mongo"
"#,
        )?;

        assert!(HbnbConfig::load().is_err());
        Ok(())
    });
}
