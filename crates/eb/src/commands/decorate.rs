//! `decorate` command implementation.

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use clap::Args;
use eb_blocks::PageDecorator;
use eb_config::{CliSettings, Config};
use eb_dom::Document;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the decorate command.
#[derive(Args)]
pub(crate) struct DecorateArgs {
    /// HTML file to decorate (`-` reads stdin).
    input: PathBuf,

    /// Write decorated HTML here instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Path to configuration file (default: auto-discover blocks.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Label of the synthesized show-all tab.
    #[arg(long)]
    show_all_label: Option<String>,

    /// Base of generated tab ids.
    #[arg(long)]
    tabs_id_prefix: Option<String>,

    /// Fail if any block could not be decorated.
    #[arg(long)]
    strict: bool,

    /// Show detailed output.
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

impl DecorateArgs {
    /// Execute the decorate command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading, reading the input, parsing
    /// or writing the output fails, or if `--strict` is set and a block
    /// failed to decorate.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            show_all_label: self.show_all_label,
            tabs_id_prefix: self.tabs_id_prefix,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        if let Some(path) = &config.config_path {
            tracing::info!(path = %path.display(), "Loaded configuration");
        }

        let html = read_input(&self.input)?;
        let mut doc = Document::parse_fragment(&html)?;

        let mut decorator = PageDecorator::new(config);
        let page = decorator.decorate(&mut doc);
        let decorated = doc.to_html();

        match &self.output {
            Some(path) => {
                fs::write(path, &decorated)?;
                tracing::info!(path = %path.display(), "Wrote decorated HTML");
            }
            None => {
                let mut stdout = io::stdout().lock();
                stdout.write_all(decorated.as_bytes())?;
                stdout.flush()?;
            }
        }

        output.report(&doc, &page);

        if self.strict && !page.failures.is_empty() {
            return Err(CliError::Validation(format!(
                "{} block(s) failed to decorate",
                page.failures.len()
            )));
        }
        Ok(())
    }
}

fn read_input(path: &Path) -> Result<String, CliError> {
    if path.as_os_str() == "-" {
        let mut html = String::new();
        io::stdin().read_to_string(&mut html)?;
        return Ok(html);
    }
    Ok(fs::read_to_string(path)?)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    use super::*;

    fn args(input: PathBuf, output: Option<PathBuf>) -> DecorateArgs {
        DecorateArgs {
            input,
            output,
            config: None,
            show_all_label: None,
            tabs_id_prefix: None,
            strict: false,
            verbose: false,
        }
    }

    #[test]
    fn test_decorate_writes_output_file() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("page.html");
        let output = temp_dir.path().join("out.html");
        let config = temp_dir.path().join("blocks.toml");
        fs::write(&config, "").unwrap();
        fs::write(
            &input,
            concat!(
                r#"<main><div class="section"><div class="tab-list block"></div></div>"#,
                r#"<div class="section" data-tab-label="One"><p>First</p></div></main>"#,
            ),
        )
        .unwrap();

        let mut args = args(input, Some(output.clone()));
        args.config = Some(config);
        args.tabs_id_prefix = Some("t".to_owned());
        args.execute().unwrap();

        let html = fs::read_to_string(output).unwrap();
        assert!(html.contains(r#"<ul role="tablist" id="t-1-tablist">"#));
        assert!(html.contains(r#"id="t-1-panel-one""#));
        assert!(html.contains(r#"data-block-status="decorated""#));
    }

    #[test]
    fn test_strict_fails_on_malformed_block() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("page.html");
        let output = temp_dir.path().join("out.html");
        let config = temp_dir.path().join("blocks.toml");
        fs::write(&config, "").unwrap();
        fs::write(&input, r#"<div class="teaser block"><div></div></div>"#).unwrap();

        let mut args = args(input, Some(output.clone()));
        args.config = Some(config);
        args.strict = true;
        let err = args.execute().unwrap_err();

        assert_eq!(err.to_string(), "1 block(s) failed to decorate");
        assert!(output.exists());
    }

    #[test]
    fn test_missing_input_is_io_error() {
        let temp_dir = TempDir::new().unwrap();
        let config = temp_dir.path().join("blocks.toml");
        fs::write(&config, "").unwrap();

        let mut args = args(temp_dir.path().join("missing.html"), None);
        args.config = Some(config);

        assert!(matches!(args.execute(), Err(CliError::Io(_))));
    }
}
