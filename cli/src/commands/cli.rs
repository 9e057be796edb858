use std::path::PathBuf;

use clap::{ArgGroup, Parser};
use evdump_core::api::{AppConfig, EndpointKind, ProjectFilter};

fn parse_endpoint(s: &str) -> Result<EndpointKind, String> {
    s.parse()
}

#[derive(Parser, Debug)]
#[command(
    name = "evdump",
    version,
    about = "Download all experiments and datasets for a project as CSVs."
)]
#[command(group(
    ArgGroup::new("project")
        .required(true)
        .args(["project_id", "project_name"])
))]
pub struct Args {
    /// The project ID to filter objects
    #[arg(long)]
    pub project_id: Option<String>,

    /// The project name to filter objects
    #[arg(long)]
    pub project_name: Option<String>,

    /// Explicit config file; otherwise ~/.evdump/config.toml or ./config.toml.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Dotenv file consulted for BRAINTRUST_API_KEY when it is not exported.
    #[arg(long, default_value = ".env")]
    pub env_file: PathBuf,

    /// Root directory for the exported tables.
    #[arg(long)]
    pub output_dir: Option<String>,

    /// Endpoint kinds to export, in order. Can be specified multiple times.
    #[arg(long = "endpoint", value_parser = parse_endpoint, action = clap::ArgAction::Append)]
    pub endpoints: Vec<EndpointKind>,

    /// Objects exported concurrently (1 = sequential).
    #[arg(long)]
    pub max_parallel: Option<usize>,

    #[arg(long)]
    pub object_page_size: Option<usize>,

    #[arg(long)]
    pub event_page_size: Option<usize>,
}

impl Args {
    pub fn project_filter(&self) -> Option<ProjectFilter> {
        match (&self.project_id, &self.project_name) {
            (Some(id), None) => Some(ProjectFilter::Id(id.clone())),
            (None, Some(name)) => Some(ProjectFilter::Name(name.clone())),
            _ => None,
        }
    }

    /// Command-line flags win over the config file and environment.
    pub fn apply_overrides(&self, cfg: &mut AppConfig) {
        if let Some(dir) = &self.output_dir {
            cfg.export.output_dir = dir.clone();
        }
        if !self.endpoints.is_empty() {
            cfg.export.endpoints = self.endpoints.clone();
        }
        if let Some(n) = self.max_parallel {
            cfg.export.max_parallel = n.max(1);
        }
        if let Some(n) = self.object_page_size {
            cfg.export.object_page_size = n.max(1);
        }
        if let Some(n) = self.event_page_size {
            cfg.export.event_page_size = n.max(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requires_a_project_selector() {
        let err = Args::try_parse_from(["evdump"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn selectors_are_mutually_exclusive() {
        let err = Args::try_parse_from(["evdump", "--project-id", "p1", "--project-name", "demo"])
            .unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }

    #[test]
    fn builds_filter_from_selector() {
        let args = Args::try_parse_from(["evdump", "--project-name", "demo"]).unwrap();
        assert_eq!(
            args.project_filter(),
            Some(ProjectFilter::Name("demo".to_string()))
        );
        let args = Args::try_parse_from(["evdump", "--project-id", "p1"]).unwrap();
        assert_eq!(args.project_filter(), Some(ProjectFilter::Id("p1".to_string())));
    }

    #[test]
    fn flags_override_config() {
        let args = Args::try_parse_from([
            "evdump",
            "--project-id",
            "p1",
            "--endpoint",
            "dataset",
            "--output-dir",
            "/tmp/out",
            "--max-parallel",
            "0",
            "--event-page-size",
            "50",
        ])
        .unwrap();
        let mut cfg = AppConfig::default();
        args.apply_overrides(&mut cfg);

        assert_eq!(cfg.export.endpoints, vec![EndpointKind::Dataset]);
        assert_eq!(cfg.export.output_dir, "/tmp/out");
        assert_eq!(cfg.export.max_parallel, 1);
        assert_eq!(cfg.export.event_page_size, 50);
        assert_eq!(cfg.export.object_page_size, 10);
    }

    #[test]
    fn rejects_unknown_endpoint() {
        assert!(Args::try_parse_from(["evdump", "--project-id", "p1", "--endpoint", "prompt"]).is_err());
    }
}
