//! Tests for configuration merging and validation.

use std::fs;
use std::io::Write;
use std::time::Duration;

use tempfile::{NamedTempFile, tempdir};

use crate::port::PortRecord;
use crate::port::filter::PortFilter;
use crate::port::platform::DEFAULT_PORT_PREFIX;

use super::ConfigError;
use super::cli::Cli;
use super::toml::TomlConfig;
use super::validated::{ValidatedConfig, write_default_config};

fn cli(args: &[&str]) -> Cli {
    let mut full = vec!["serial-watch"];
    full.extend_from_slice(args);
    Cli::parse_from_iter(full)
}

fn toml(content: &str) -> TomlConfig {
    TomlConfig::parse(content).unwrap()
}

fn ms(value: u64) -> Duration {
    Duration::from_millis(value)
}

mod defaults {
    use super::*;

    #[test]
    fn no_input_uses_defaults() {
        let config = ValidatedConfig::from_raw(&cli(&[]), None).unwrap();

        assert_eq!(config.schedule.idle(), ms(2000));
        assert_eq!(config.schedule.active(), ms(1000));
        assert_eq!(config.schedule.tick(), ms(100));
        assert_eq!(config.port_prefix, DEFAULT_PORT_PREFIX);
        assert!(config.filter.is_empty());
        assert!(config.notify_command.is_none());
        assert!(config.announce);
        assert!(!config.verbose);
    }

    #[test]
    fn display_summarizes_config() {
        let config = ValidatedConfig::from_raw(&cli(&["--exclude-port", "COM1"]), None).unwrap();
        let text = config.to_string();

        assert!(text.contains("idle: 2000ms"));
        assert!(text.contains("filters: +0/-1"));
        assert!(text.contains("command: none"));
    }
}

mod precedence {
    use super::*;

    #[test]
    fn toml_overrides_defaults() {
        let toml = toml(
            r#"
            [monitor]
            idle_interval = 4000
            active_interval = 2000

            [ports]
            prefix = "CNCA"

            [notify]
            command = "notify-send"
        "#,
        );

        let config = ValidatedConfig::from_raw(&cli(&[]), Some(&toml)).unwrap();

        assert_eq!(config.schedule.idle(), ms(4000));
        assert_eq!(config.schedule.active(), ms(2000));
        assert_eq!(config.schedule.tick(), ms(100));
        assert_eq!(config.port_prefix, "CNCA");
        assert_eq!(config.notify_command.as_deref(), Some("notify-send"));
    }

    #[test]
    fn cli_overrides_toml() {
        let toml = toml(
            r#"
            [monitor]
            idle_interval = 4000

            [ports]
            prefix = "CNCA"

            [notify]
            command = "notify-send"
        "#,
        );
        let cli = cli(&[
            "--idle-interval",
            "3000",
            "--port-prefix",
            "COM",
            "--notify-command",
            "toast",
        ]);

        let config = ValidatedConfig::from_raw(&cli, Some(&toml)).unwrap();

        assert_eq!(config.schedule.idle(), ms(3000));
        assert_eq!(config.port_prefix, "COM");
        assert_eq!(config.notify_command.as_deref(), Some("toast"));
    }

    #[test]
    fn cli_patterns_replace_toml_patterns() {
        let toml = toml(
            r#"
            [ports]
            include = ["^COM3$", "^COM4$"]
            exclude = ["^COM9$"]
        "#,
        );
        let cli = cli(&["--include-port", "^COM5$"]);

        let config = ValidatedConfig::from_raw(&cli, Some(&toml)).unwrap();

        assert_eq!(config.filter.include_count(), 1);
        assert_eq!(config.filter.exclude_count(), 1);
        assert!(config.filter.matches(&PortRecord::new("COM5", "")));
        assert!(!config.filter.matches(&PortRecord::new("COM3", "")));
    }

    #[test]
    fn toml_patterns_build_filter() {
        let toml = toml(
            r#"
            [ports]
            exclude = ["^COM1$"]
        "#,
        );

        let config = ValidatedConfig::from_raw(&cli(&[]), Some(&toml)).unwrap();

        assert!(!config.filter.matches(&PortRecord::new("COM1", "")));
        assert!(config.filter.matches(&PortRecord::new("COM10", "")));
    }
}

mod announce {
    use super::*;

    #[test]
    fn no_announce_flag_disables() {
        let config = ValidatedConfig::from_raw(&cli(&["--no-announce"]), None).unwrap();
        assert!(!config.announce);
    }

    #[test]
    fn toml_can_disable() {
        let toml = toml("[notify]\nannounce = false\n");
        let config = ValidatedConfig::from_raw(&cli(&[]), Some(&toml)).unwrap();
        assert!(!config.announce);
    }

    #[test]
    fn flag_wins_over_toml_enable() {
        let toml = toml("[notify]\nannounce = true\n");
        let config = ValidatedConfig::from_raw(&cli(&["--no-announce"]), Some(&toml)).unwrap();
        assert!(!config.announce);
    }
}

mod validation {
    use super::*;

    #[test]
    fn zero_idle_interval_rejected() {
        let result = ValidatedConfig::from_raw(&cli(&["--idle-interval", "0"]), None);

        assert!(matches!(
            result,
            Err(ConfigError::InvalidDuration {
                field: "idle_interval",
                ..
            })
        ));
    }

    #[test]
    fn zero_tick_from_toml_rejected() {
        let toml = toml("[monitor]\ntick = 0\n");
        let result = ValidatedConfig::from_raw(&cli(&[]), Some(&toml));

        assert!(matches!(
            result,
            Err(ConfigError::InvalidDuration { field: "tick", .. })
        ));
    }

    #[test]
    fn active_longer_than_idle_rejected() {
        let result = ValidatedConfig::from_raw(
            &cli(&["--idle-interval", "1000", "--active-interval", "2000"]),
            None,
        );

        assert!(matches!(
            result,
            Err(ConfigError::InvalidDuration {
                field: "active_interval",
                ..
            })
        ));
    }

    #[test]
    fn active_equal_to_idle_accepted() {
        let config = ValidatedConfig::from_raw(
            &cli(&["--idle-interval", "1000", "--active-interval", "1000"]),
            None,
        )
        .unwrap();

        assert_eq!(config.schedule.active(), config.schedule.idle());
    }

    #[test]
    fn tick_longer_than_active_rejected() {
        let result = ValidatedConfig::from_raw(&cli(&["--tick", "1500"]), None);

        assert!(matches!(
            result,
            Err(ConfigError::InvalidDuration { field: "tick", .. })
        ));
    }

    #[test]
    fn invalid_regex_reports_pattern() {
        let result = ValidatedConfig::from_raw(&cli(&["--include-port", "[unclosed"]), None);

        match result {
            Err(ConfigError::InvalidRegex { pattern, .. }) => assert_eq!(pattern, "[unclosed"),
            other => panic!("expected InvalidRegex, got {other:?}"),
        }
    }

    #[test]
    fn blank_notify_command_rejected() {
        let toml = toml("[notify]\ncommand = \"  \"\n");
        let result = ValidatedConfig::from_raw(&cli(&[]), Some(&toml));

        assert!(matches!(result, Err(ConfigError::EmptyCommand)));
    }
}

mod loading {
    use super::*;

    #[test]
    fn load_without_config_file() {
        let config = ValidatedConfig::load(&cli(&["--tick", "50"])).unwrap();
        assert_eq!(config.schedule.tick(), ms(50));
    }

    #[test]
    fn load_reads_config_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[monitor]\nidle_interval = 6000\nactive_interval = 3000"
        )
        .unwrap();
        let path = file.path().to_str().unwrap();

        let config = ValidatedConfig::load(&cli(&["--config", path])).unwrap();

        assert_eq!(config.schedule.idle(), ms(6000));
        assert_eq!(config.schedule.active(), ms(3000));
    }

    #[test]
    fn load_missing_file_fails() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("absent.toml");

        let result = ValidatedConfig::load(&cli(&["--config", missing.to_str().unwrap()]));

        assert!(matches!(result, Err(ConfigError::FileRead { .. })));
    }

    #[test]
    fn load_malformed_file_fails() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[monitor\nidle_interval = ").unwrap();
        let path = file.path().to_str().unwrap();

        let result = ValidatedConfig::load(&cli(&["--config", path]));

        assert!(matches!(result, Err(ConfigError::TomlParse(_))));
    }

    #[test]
    fn write_default_config_round_trips() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("serial-watch.toml");

        write_default_config(&path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("[monitor]"));
        let config = ValidatedConfig::load(&cli(&["--config", path.to_str().unwrap()])).unwrap();
        assert_eq!(config.schedule.idle(), ms(2000));
    }

    #[test]
    fn write_default_config_into_missing_dir_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("no-such-dir").join("serial-watch.toml");

        let result = write_default_config(&path);

        assert!(matches!(result, Err(ConfigError::FileWrite { .. })));
    }
}
