//! Output sinks: where the computed version and failures are reported.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use crate::domain::TagVersion;
use crate::error::Result;
use crate::ui;

/// Output holding the prefixed version, e.g. `v1.4.0`
pub const NEXT: &str = "next";
/// Output holding the bare version, e.g. `1.4.0`
pub const NEXT_STRICT: &str = "nextStrict";

/// Destination for the run's outputs and its terminal failure
pub trait OutputSink {
    /// Publish every `(name, value)` pair, or none of them on error
    fn set_outputs(&mut self, outputs: &[(&str, &str)]) -> Result<()>;

    fn fail(&mut self, message: &str);
}

/// Publish `next` and `nextStrict`
pub fn emit_version<S: OutputSink + ?Sized>(sink: &mut S, next: &TagVersion) -> Result<()> {
    let prefixed = next.to_string();
    let strict = next.strict();
    sink.set_outputs(&[(NEXT, prefixed.as_str()), (NEXT_STRICT, strict.as_str())])
}

/// GitHub Actions step outputs.
///
/// Outputs are appended to the file named by `$GITHUB_OUTPUT`; without it
/// they are printed as `name=value` lines. Failures become `::error::`
/// annotations when running inside Actions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GithubActionsSink {
    output_file: Option<PathBuf>,
    annotate: bool,
}

impl GithubActionsSink {
    pub fn new(output_file: Option<PathBuf>, annotate: bool) -> Self {
        GithubActionsSink {
            output_file,
            annotate,
        }
    }

    /// Configure from `GITHUB_OUTPUT` and `GITHUB_ACTIONS`
    pub fn from_env() -> Self {
        let output_file = std::env::var_os("GITHUB_OUTPUT")
            .filter(|path| !path.is_empty())
            .map(PathBuf::from);
        let annotate = std::env::var("GITHUB_ACTIONS").map_or(false, |v| v == "true");
        Self::new(output_file, annotate)
    }
}

/// Render an output in the `$GITHUB_OUTPUT` file format
pub fn format_output(name: &str, value: &str) -> String {
    if value.contains('\n') {
        let delimiter = "NEXT_VERSION_EOF";
        format!("{}<<{}\n{}\n{}\n", name, delimiter, value, delimiter)
    } else {
        format!("{}={}\n", name, value)
    }
}

/// Escape a message for a workflow command (`::error::...`)
pub fn escape_annotation(message: &str) -> String {
    message
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

impl OutputSink for GithubActionsSink {
    fn set_outputs(&mut self, outputs: &[(&str, &str)]) -> Result<()> {
        let rendered: String = outputs
            .iter()
            .map(|(name, value)| format_output(name, value))
            .collect();

        match &self.output_file {
            Some(path) => {
                let mut file = OpenOptions::new().create(true).append(true).open(path)?;
                file.write_all(rendered.as_bytes())?;
            }
            None => print!("{}", rendered),
        }
        tracing::debug!(count = outputs.len(), "set outputs");
        Ok(())
    }

    fn fail(&mut self, message: &str) {
        if self.annotate {
            println!("::error::{}", escape_annotation(message));
        } else {
            ui::display_error(message);
        }
    }
}

/// Collects outputs in memory
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemorySink {
    pub outputs: Vec<(String, String)>,
    pub failure: Option<String>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.outputs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

impl OutputSink for MemorySink {
    fn set_outputs(&mut self, outputs: &[(&str, &str)]) -> Result<()> {
        self.outputs.extend(
            outputs
                .iter()
                .map(|(name, value)| (name.to_string(), value.to_string())),
        );
        Ok(())
    }

    fn fail(&mut self, message: &str) {
        self.failure = Some(message.to_string());
    }
}
