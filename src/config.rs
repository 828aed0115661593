//! Configuration for the plotting pipeline.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Maximum number of grexes a single plot may ask for.
pub const DEFAULT_MAX_NAMES: usize = 5;

/// Output produced at the end of the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Graph description text only; no external renderer is invoked.
    Dot,
    Jpg,
    Png,
    Svg,
    Pdf,
}

impl OutputFormat {
    /// Name passed to Graphviz as `-T<name>`, also used as file extension.
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Dot => "dot",
            OutputFormat::Jpg => "jpg",
            OutputFormat::Png => "png",
            OutputFormat::Svg => "svg",
            OutputFormat::Pdf => "pdf",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            OutputFormat::Dot => "text/vnd.graphviz",
            OutputFormat::Jpg => "image/jpeg",
            OutputFormat::Png => "image/png",
            OutputFormat::Svg => "image/svg+xml",
            OutputFormat::Pdf => "application/pdf",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "dot" | "gv" => Ok(OutputFormat::Dot),
            "jpg" | "jpeg" => Ok(OutputFormat::Jpg),
            "png" => Ok(OutputFormat::Png),
            "svg" => Ok(OutputFormat::Svg),
            "pdf" => Ok(OutputFormat::Pdf),
            other => Err(format!("unsupported output format: {other}")),
        }
    }
}

/// Settings shared by every plot request.
#[derive(Debug, Clone)]
pub struct PlotConfig {
    /// Upper bound on distinct query names.
    pub max_names: usize,
    pub format: OutputFormat,
    /// Graphviz `dot` executable.
    pub dot_binary: String,
    /// Hard limit on a single external render.
    pub render_timeout: Duration,
    /// Value of the `style` attribute on highlighted (queried) nodes.
    pub highlight_style: String,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            max_names: DEFAULT_MAX_NAMES,
            format: OutputFormat::Jpg,
            dot_binary: "dot".to_string(),
            render_timeout: Duration::from_secs(30),
            highlight_style: "filled".to_string(),
        }
    }
}

impl PlotConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_dot_binary(mut self, dot_binary: impl Into<String>) -> Self {
        self.dot_binary = dot_binary.into();
        self
    }

    pub fn with_render_timeout(mut self, timeout: Duration) -> Self {
        self.render_timeout = timeout;
        self
    }

    pub fn with_max_names(mut self, max_names: usize) -> Self {
        self.max_names = max_names;
        self
    }

    pub fn with_highlight_style(mut self, style: impl Into<String>) -> Self {
        self.highlight_style = style.into();
        self
    }
}

#[cfg(test)]
#[path = "../tests/rust/test_config.rs"]
mod tests;
