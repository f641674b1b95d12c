use std::path::PathBuf;

use clap::Parser;

use crate::{Cli, CurvePoint, write_curve};

fn point(step: u64, infectious: usize) -> CurvePoint {
    CurvePoint {
        step,
        start_unix:     1_704_067_200 + step as i64 * 86_400,
        susceptible:    10 - infectious,
        exposed:        0,
        infectious,
        recovered:      0,
        new_infections: infectious,
        contacts:       3,
    }
}

#[cfg(test)]
mod cli {
    use super::*;

    #[test]
    fn defaults_without_arguments() {
        let cli = Cli::try_parse_from(["home_work"]).unwrap();
        assert!(cli.config.is_none());
        assert!(cli.num_workers.is_none());
        assert!(cli.output_file_path.is_none());
    }

    #[test]
    fn parses_all_flags() {
        let cli = Cli::try_parse_from([
            "home_work",
            "town.json",
            "--num-workers",
            "4",
            "--output-file-path",
            "curve.json",
        ])
        .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("town.json")));
        assert_eq!(cli.num_workers, Some(4));
        assert_eq!(cli.output_file_path, Some(PathBuf::from("curve.json")));
    }

    #[test]
    fn rejects_non_numeric_workers() {
        assert!(Cli::try_parse_from(["home_work", "--num-workers", "many"]).is_err());
    }

    #[test]
    fn num_workers_overrides_config() {
        let cli = Cli::try_parse_from(["home_work", "--num-workers", "3"]).unwrap();
        let config = cli.resolve_config().unwrap();
        assert_eq!(config.sim.num_threads, Some(3));
    }

    #[test]
    fn config_threads_kept_without_flag() {
        let cli = Cli::try_parse_from(["home_work"]).unwrap();
        let config = cli.resolve_config().unwrap();
        assert_eq!(config.sim.num_threads, None);
    }

    #[test]
    fn zero_workers_rejected() {
        let cli = Cli::try_parse_from(["home_work", "--num-workers", "0"]).unwrap();
        assert!(cli.resolve_config().is_err());
    }

    #[test]
    fn flag_overrides_file() {
        let path = std::env::temp_dir()
            .join(format!("home_work_config_{}.json", std::process::id()));
        std::fs::write(&path, r#"{ "households": 7 }"#).unwrap();

        let cli = Cli::try_parse_from([
            "home_work".into(),
            path.clone().into_os_string(),
            "--num-workers".into(),
            "5".into(),
        ])
        .unwrap();
        let config = cli.resolve_config();
        std::fs::remove_file(&path).unwrap();

        let config = config.unwrap();
        assert_eq!(config.households, 7);
        assert_eq!(config.sim.num_threads, Some(5));
    }
}

#[cfg(test)]
mod output {
    use super::*;

    #[test]
    fn curve_written_to_file() {
        let path = std::env::temp_dir()
            .join(format!("home_work_curve_{}.json", std::process::id()));
        let points = vec![point(0, 1), point(1, 2)];

        write_curve(&points, Some(&path)).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
        let rows = parsed.as_array().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1]["step"], 1);
        assert_eq!(rows[1]["infectious"], 2);
        assert_eq!(rows[1]["start_unix"], 1_704_067_200 + 86_400);
    }

    #[test]
    fn unwritable_path_errors() {
        let path = std::env::temp_dir().join("home_work_missing_dir").join("curve.json");
        assert!(write_curve(&[point(0, 1)], Some(&path)).is_err());
    }
}
