//! `lw check` command implementation.

use std::path::PathBuf;

use clap::Args;
use lw_check::{DocumentSet, LinkChecker, load_dir};
use lw_config::{CliSettings, Config};
use lw_html::EntityMap;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    /// Path to configuration file (default: auto-discover lw.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Site directory to check (overrides config).
    #[arg(short, long)]
    site_dir: Option<PathBuf>,

    /// Regex selecting HTML documents by site-relative path (overrides config).
    #[arg(long)]
    html_pattern: Option<String>,

    /// Check documents in parallel (default: enabled).
    #[arg(long)]
    parallel: Option<bool>,

    /// Check documents one at a time.
    #[arg(long, conflicts_with = "parallel")]
    sequential: bool,

    /// Enable verbose output (per-run link statistics).
    #[arg(short, long)]
    pub verbose: bool,
}

impl CheckArgs {
    /// Execute the check command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration or loading fails, or if the site has
    /// broken links.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let parallel = self.resolve_parallel();
        let cli_settings = CliSettings {
            site_dir: self.site_dir,
            html_pattern: self.html_pattern,
            parallel,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        tracing::debug!(
            config_path = ?config.config_path,
            parallel = config.check_resolved.parallel,
            "Loaded configuration"
        );

        output.info(&format!(
            "Site directory: {}",
            config.check_resolved.site_dir.display()
        ));

        let documents = load_dir(&config.check_resolved.site_dir)?;
        let checker = checker_from_config(&config)?;
        let sources = documents
            .iter()
            .filter(|document| checker.is_html(&document.path))
            .count();
        if sources == 0 {
            output.warning("No HTML documents found");
        }

        run_check(&checker, &documents)?;
        output.success(&format!(
            "All relative links resolve ({sources} HTML documents, {} files)",
            documents.len()
        ));
        Ok(())
    }

    /// Resolve `parallel` from --parallel/--sequential flags.
    fn resolve_parallel(&self) -> Option<bool> {
        self.sequential.then_some(false).or(self.parallel)
    }
}

/// Build a link checker from resolved configuration.
fn checker_from_config(config: &Config) -> Result<LinkChecker, CliError> {
    let entities = EntityMap::new().with_overrides(config.entities.clone());
    Ok(LinkChecker::new()
        .with_entities(entities)
        .with_html_pattern(config.check_resolved.html_regex()?)
        .with_parallel(config.check_resolved.parallel))
}

fn run_check(checker: &LinkChecker, documents: &DocumentSet) -> Result<(), CliError> {
    checker.check(documents)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use lw_check::CheckError;
    use pretty_assertions::assert_eq;

    use super::*;

    fn write_config(dir: &std::path::Path, content: &str) -> PathBuf {
        let path = dir.join("lw.toml");
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_resolve_parallel() {
        let args = |parallel, sequential| CheckArgs {
            config: None,
            site_dir: None,
            html_pattern: None,
            parallel,
            sequential,
            verbose: false,
        };

        assert_eq!(args(None, false).resolve_parallel(), None);
        assert_eq!(args(Some(true), false).resolve_parallel(), Some(true));
        assert_eq!(args(None, true).resolve_parallel(), Some(false));
    }

    #[test]
    fn test_checker_uses_configured_entities() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = write_config(temp_dir.path(), "[entities]\nhome = \"index\"\n");
        fs::create_dir_all(temp_dir.path().join("public")).unwrap();
        fs::write(
            temp_dir.path().join("public/index.html"),
            r#"<a href="&home;.html">Home</a>"#,
        )
        .unwrap();

        let config = Config::load(Some(&path), None).unwrap();
        let checker = checker_from_config(&config).unwrap();
        let documents = load_dir(&config.check_resolved.site_dir).unwrap();

        assert!(run_check(&checker, &documents).is_ok());
    }

    #[test]
    fn test_broken_links_fail_the_check() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = write_config(
            temp_dir.path(),
            "[check]\nsite_dir = \"site\"\nparallel = false\n",
        );
        fs::create_dir_all(temp_dir.path().join("site/sub")).unwrap();
        fs::write(
            temp_dir.path().join("site/sub/src.html"),
            r#"<a href="../t.html">T</a><a href="../missing.html">M</a>"#,
        )
        .unwrap();
        fs::write(temp_dir.path().join("site/t.html"), "").unwrap();

        let config = Config::load(Some(&path), None).unwrap();
        let checker = checker_from_config(&config).unwrap();
        let documents = load_dir(&config.check_resolved.site_dir).unwrap();

        let err = run_check(&checker, &documents).unwrap_err();
        assert_eq!(
            err.to_string(),
            "The site has broken relative links:\n\nFrom \"sub/src.html\" to \"../missing.html\""
        );
        assert!(matches!(err, CliError::Check(CheckError::BrokenLinks(_))));
    }
}
