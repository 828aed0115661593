//! orchid-lineage CLI entry point.
//!
//! Loads the RHS register, then either plots the ancestry of the given grexes
//! (DOT text or a rendered image) or, with `--port`, serves the HTTP form.

use std::fs;
use std::io::{self, Write};
use std::process;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use log::info;

use orchid_lineage::{OutputFormat, PlotConfig, Plotter, Registry};

/// Grex plotted when no names are given.
const DEMO_GREX: &str = "Hestia";

/// Orchid grex ancestry plotter.
#[derive(Parser, Debug)]
#[command(
    name = "orchid-lineage",
    version = env!("ORCHID_LINEAGE_VERSION"),
    about = "Plot the ancestry of registered orchid grexes with Graphviz"
)]
struct Cli {
    /// Grex names; several args or one comma-separated list (at most --max-names)
    names: Vec<String>,

    /// RHS register export (`;`-delimited)
    #[arg(long = "rhs", default_value = "etc/paphiopedilum.csv")]
    register: String,

    /// Output format: dot, jpg, png, svg or pdf [default: dot, jpg with --port]
    #[arg(short = 'f', long = "format")]
    format: Option<OutputFormat>,

    /// Write output to this file instead of stdout
    #[arg(short = 'o', long = "output")]
    output: Option<String>,

    /// Graphviz `dot` executable
    #[arg(long = "dot-bin", default_value = "dot")]
    dot_bin: String,

    /// Seconds an external render may take before it is killed
    #[arg(long = "timeout-secs", default_value = "30")]
    timeout_secs: u64,

    /// Maximum number of distinct grexes per plot
    #[arg(long = "max-names", default_value_t = orchid_lineage::config::DEFAULT_MAX_NAMES)]
    max_names: usize,

    /// Serve the form page and /plot endpoint on this port instead of plotting once
    #[cfg(feature = "server")]
    #[arg(long = "port")]
    port: Option<u16>,
}

impl Cli {
    #[cfg(feature = "server")]
    fn serving(&self) -> bool {
        self.port.is_some()
    }

    #[cfg(not(feature = "server"))]
    fn serving(&self) -> bool {
        false
    }
}

fn fail(msg: impl std::fmt::Display) -> ! {
    eprintln!("error: {}", msg);
    process::exit(1);
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let cli = Cli::parse();

    let registry = match Registry::open(&cli.register) {
        Ok(r) => r,
        Err(e) => fail(format_args!("cannot read '{}': {}", cli.register, e)),
    };
    info!("{} grexes read", registry.len());

    let format = cli.format.unwrap_or(if cli.serving() {
        OutputFormat::Jpg
    } else {
        OutputFormat::Dot
    });
    let config = PlotConfig::new()
        .with_format(format)
        .with_dot_binary(cli.dot_bin.clone())
        .with_render_timeout(Duration::from_secs(cli.timeout_secs))
        .with_max_names(cli.max_names);
    let plotter = Plotter::new(Arc::new(registry), config);

    #[cfg(feature = "server")]
    if let Some(port) = cli.port {
        run_server(port, plotter);
        return;
    }

    let query = if cli.names.is_empty() {
        DEMO_GREX.to_string()
    } else {
        cli.names.join(",")
    };
    let plotted = match plotter.plot(&query) {
        Ok(p) => p,
        Err(e) => fail(e),
    };

    if let Some(ref path) = cli.output {
        if let Err(e) = fs::write(path, &plotted.bytes) {
            fail(format_args!("cannot write '{}': {}", path, e));
        }
    } else {
        let mut stdout = io::stdout();
        if let Err(e) = stdout.write_all(&plotted.bytes).and_then(|_| stdout.flush()) {
            fail(format_args!("cannot write stdout: {}", e));
        }
    }
}

#[cfg(feature = "server")]
fn run_server(port: u16, plotter: Plotter<Registry>) {
    let listener = match std::net::TcpListener::bind(("0.0.0.0", port)) {
        Ok(l) => l,
        Err(e) => fail(format_args!("cannot listen on port {}: {}", port, e)),
    };
    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => fail(format_args!("cannot start runtime: {}", e)),
    };
    if let Err(e) = runtime.block_on(orchid_lineage::server::serve(listener, Arc::new(plotter))) {
        fail(e);
    }
    info!("DONE");
}
