//! `cw storage` and `cw wiki` command implementation.

use std::io::{Read, Write};
use std::path::PathBuf;

use clap::Args;
use cw_ast::Document;
use cw_config::{CliSettings, Config};
use cw_confluence::StorageWriter;
use cw_diagrams::DiagramPipeline;
use cw_renderer::{DocumentRenderer, RenderResult, Writer};
use cw_wiki::WikiWriter;
use tracing::info;

use crate::error::CliError;
use crate::output::Output;

/// Target markup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Format {
    Storage,
    Wiki,
}

/// Arguments shared by both render commands.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// JSON document tree (default: stdin).
    input: Option<PathBuf>,

    /// Output file (default: stdout).
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Path to configuration file (default: auto-discover cw.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Fail when a diagram cannot be rendered instead of leaving it out.
    #[arg(long)]
    strict: bool,

    /// Timeout in seconds for each diagram command (overrides config).
    #[arg(long)]
    timeout: Option<u64>,

    /// Enable verbose logging.
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

impl RenderArgs {
    /// Execute the render command.
    ///
    /// # Errors
    ///
    /// Returns an error if the input cannot be read or parsed, the config is
    /// invalid, or a diagram fails in strict mode.
    pub(crate) fn execute(self, format: Format) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            strict: self.strict.then_some(true),
            timeout_secs: self.timeout,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        if let Some(path) = &config.config_path {
            info!(path = %path.display(), "loaded configuration");
        }

        let json = self.read_input()?;
        let result = convert(format, &json, &config)?;

        for diagnostic in &result.diagnostics {
            output.warning(&format!("Warning: {diagnostic}"));
        }

        match &self.output {
            Some(path) => {
                std::fs::write(path, &result.output)?;
                output.success(&format!("Wrote {}", path.display()));
            }
            None => {
                let mut stdout = std::io::stdout().lock();
                stdout.write_all(result.output.as_bytes())?;
                stdout.write_all(b"\n")?;
            }
        }

        Ok(())
    }

    fn read_input(&self) -> Result<String, CliError> {
        match &self.input {
            Some(path) => Ok(std::fs::read_to_string(path)?),
            None => {
                let mut json = String::new();
                std::io::stdin().lock().read_to_string(&mut json)?;
                Ok(json)
            }
        }
    }
}

/// Parse a JSON document tree and render it in `format`.
fn convert(format: Format, json: &str, config: &Config) -> Result<RenderResult, CliError> {
    let doc: Document = serde_json::from_str(json)?;
    let pipeline = diagram_pipeline(config);

    match format {
        Format::Storage => {
            let mut writer = StorageWriter::new().with_diagrams(pipeline);
            if let Some(css) = &config.storage.stylesheet {
                writer = writer.with_stylesheet(css.as_str());
            }
            render(writer, &doc, config)
        }
        Format::Wiki => render(WikiWriter::new().with_diagrams(pipeline), &doc, config),
    }
}

fn render<W: Writer>(writer: W, doc: &Document, config: &Config) -> Result<RenderResult, CliError> {
    let renderer = DocumentRenderer::new(writer)
        .strict(config.render.strict)
        .with_variables(config.variables.clone());
    Ok(renderer.render(doc)?)
}

fn diagram_pipeline(config: &Config) -> DiagramPipeline {
    let diagrams = &config.diagrams;
    DiagramPipeline::new()
        .layout_command(diagrams.layout_command.clone())
        .encode_command(diagrams.encode_command.clone())
        .timeout(diagrams.timeout())
        .classes(diagrams.classes.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const DOC: &str = r#"{"blocks": [{"t": "Para", "c": [{"t": "Str", "c": "a < b"}]}]}"#;

    #[test]
    fn test_convert_storage() {
        let mut config = Config::default();
        config.storage.stylesheet = Some(String::new());

        let result = convert(Format::Storage, DOC, &config).unwrap();
        assert_eq!(result.output, "<p>a &lt; b</p>");
    }

    #[test]
    fn test_convert_storage_embeds_stylesheet() {
        let mut config = Config::default();
        config.storage.stylesheet = Some("p { margin: 0; }".to_owned());

        let result = convert(Format::Storage, DOC, &config).unwrap();
        assert!(result.output.contains("<![CDATA[p { margin: 0; }]]>"));
        assert!(result.output.ends_with("<p>a &lt; b</p>"));
    }

    #[test]
    fn test_convert_wiki() {
        let result = convert(Format::Wiki, DOC, &Config::default()).unwrap();
        assert_eq!(result.output, "a &lt; b");
    }

    #[test]
    fn test_convert_builtin_writers_ignore_variables() {
        let mut config = Config::default();
        config.storage.stylesheet = Some(String::new());
        let plain_storage = convert(Format::Storage, DOC, &config).unwrap();
        let plain_wiki = convert(Format::Wiki, DOC, &config).unwrap();

        config
            .variables
            .insert("title".to_owned(), "Release notes".to_owned());
        let storage = convert(Format::Storage, DOC, &config).unwrap();
        let wiki = convert(Format::Wiki, DOC, &config).unwrap();
        assert_eq!(storage.output, plain_storage.output);
        assert_eq!(wiki.output, plain_wiki.output);
    }

    #[test]
    fn test_convert_unknown_node_renders_empty() {
        let json = r#"{"blocks": [
            {"t": "Para", "c": [{"t": "Str", "c": "kept"}, {"t": "Underline", "c": [{"t": "Str", "c": "x"}]}]},
            {"t": "Figure", "c": {}},
            {"t": "Para", "c": [{"t": "Str", "c": "after"}]}
        ]}"#;

        let mut config = Config::default();
        config.storage.stylesheet = Some(String::new());
        let result = convert(Format::Storage, json, &config).unwrap();
        assert_eq!(result.output, "<p>kept</p>\n<p>after</p>");
        assert_eq!(result.diagnostics.len(), 2);

        let result = convert(Format::Wiki, json, &Config::default()).unwrap();
        assert_eq!(result.output, "kept\n\nafter");
    }

    #[test]
    fn test_convert_malformed_json() {
        let err = convert(Format::Wiki, r#"{"blocks": 3}"#, &Config::default()).unwrap_err();
        assert!(matches!(err, CliError::Json(_)));

        let err = convert(
            Format::Wiki,
            r#"{"blocks": [{"t": "Para", "c": 3}]}"#,
            &Config::default(),
        )
        .unwrap_err();
        assert!(matches!(err, CliError::Json(_)));
    }

    #[cfg(unix)]
    #[test]
    fn test_convert_strict_diagram_failure() {
        let json = r#"{"blocks": [{"t": "CodeBlock", "c": {"text": "digraph{}", "attr": {"class": "dot"}}}]}"#;
        let mut config = Config::default();
        config.diagrams.layout_command = vec!["false".to_owned()];

        let lenient = convert(Format::Wiki, json, &config).unwrap();
        assert_eq!(lenient.output, "");
        assert_eq!(lenient.diagnostics.len(), 1);

        config.render.strict = true;
        let err = convert(Format::Wiki, json, &config).unwrap_err();
        assert!(matches!(err, CliError::Render(_)));
    }

    #[test]
    fn test_read_input_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.json");
        std::fs::write(&path, DOC).unwrap();

        let args = RenderArgs {
            input: Some(path),
            output: None,
            config: None,
            strict: false,
            timeout: None,
            verbose: false,
        };
        assert_eq!(args.read_input().unwrap(), DOC);
    }
}
