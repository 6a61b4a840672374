use figment::Jail;
use hbnb_config::{Backend, ConfigError, Environment, HbnbConfig};

#[test]
fn prefixed_env_sets_nested_keys() {
    Jail::expect_with(|jail| {
        jail.set_env("HBNB_STORAGE__BACKEND", "db");
        jail.set_env("HBNB_STORAGE__DATABASE__PATH", "from_env.db");

        let config = HbnbConfig::load().expect("config loads");
        assert_eq!(config.storage.backend, Backend::Db);
        assert_eq!(config.storage.database.path, "from_env.db");
        Ok(())
    });
}

#[test]
fn legacy_switches_select_relational_test_mode() {
    Jail::expect_with(|jail| {
        jail.set_env("HBNB_TYPE_STORAGE", "db");
        jail.set_env("HBNB_ENV", "test");
        jail.set_env("HBNB_MYSQL_DB", "hbnb_test.db");

        let config = HbnbConfig::load().expect("config loads");
        assert_eq!(config.storage.backend, Backend::Db);
        assert_eq!(config.storage.environment, Environment::Test);
        assert_eq!(config.storage.database.path, "hbnb_test.db");
        assert!(config.storage.is_test_mode());
        Ok(())
    });
}

#[test]
fn legacy_host_and_password_configure_remote() {
    Jail::expect_with(|jail| {
        jail.set_env("HBNB_TYPE_STORAGE", "db");
        jail.set_env("HBNB_MYSQL_HOST", "hbnb-dev.turso.io");
        jail.set_env("HBNB_MYSQL_PWD", "tok_dev");

        let config = HbnbConfig::load().expect("config loads");
        assert!(config.storage.database.is_remote());
        assert_eq!(config.storage.database.auth_token, "tok_dev");
        assert_eq!(
            config.storage.database.remote_url().as_deref(),
            Some("libsql://hbnb-dev.turso.io")
        );
        Ok(())
    });
}

#[test]
fn prefixed_env_beats_legacy_switch() {
    Jail::expect_with(|jail| {
        jail.set_env("HBNB_TYPE_STORAGE", "db");
        jail.set_env("HBNB_STORAGE__BACKEND", "file");

        let config = HbnbConfig::load().expect("config loads");
        assert_eq!(config.storage.backend, Backend::File);
        Ok(())
    });
}

#[test]
fn env_beats_project_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "hbnb.toml",
            r#"
[storage]
environment = "prod"
"#,
        )?;
        jail.set_env("HBNB_ENV", "test");

        let config = HbnbConfig::load().expect("config loads");
        assert_eq!(config.storage.environment, Environment::Test);
        Ok(())
    });
}

#[test]
fn remote_without_token_fails_validation() {
    Jail::expect_with(|jail| {
        jail.set_env("HBNB_TYPE_STORAGE", "db");
        jail.set_env("HBNB_MYSQL_HOST", "hbnb-dev.turso.io");

        let err = HbnbConfig::load().expect_err("missing token");
        assert!(matches!(
            err,
            ConfigError::MissingAuthToken { ref url } if url == "libsql://hbnb-dev.turso.io"
        ));
        assert!(err.to_string().contains("HBNB_MYSQL_PWD"));
        Ok(())
    });
}
