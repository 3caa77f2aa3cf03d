//! templater — render file-system templates against host, user, and config values.
//!
//! # Usage
//!
//! ```text
//! templater --scan [--dry-run] [--interactive] [--porcelain] [--read-only]
//!                  [--orig <dir> --new <dir>]
//! templater --in <file> [--out <file>] [--interactive] [--dry-run]
//! cat motd.tmpl | templater > motd
//! ```
//!
//! Scan mode walks the current directory for `*.tmpl*` files and renders each
//! next to its source (or into a rewritten destination tree). Without
//! `--scan`, a single template is read from `--in` or stdin and written to
//! `--out`, the derived output path, or stdout.

use std::io::{Read, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use templater_core::config;
use templater_render::{ContextOverrides, RenderingContext, TemplateEngine};
use templater_scan::{
    absolutize, map_output_path, nice_path, scan, OutputGate, PrefixRewrite, Reporter,
    ScanOptions, WritePolicy, DEFAULT_EXTENSION,
};

// ---------------------------------------------------------------------------
// CLI surface
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "templater",
    version,
    about = "Render file-system templates against host, user, and config values",
    long_about = None,
)]
struct Cli {
    /// Scan the working directory recursively for template files
    /// (ignored if --in or --out are used).
    #[arg(long)]
    scan: bool,

    /// Machine-readable tab-delimited output (scan mode only).
    #[arg(long, short = 'p')]
    porcelain: bool,

    /// Report what would change without writing any files.
    #[arg(long, short = 'n')]
    dry_run: bool,

    /// Prompt before replacing existing files (ignored when reading from stdin).
    #[arg(long, short = 'i')]
    interactive: bool,

    /// Mark written files read-only (scan mode only).
    #[arg(long)]
    read_only: bool,

    /// Read the template from a file instead of stdin.
    #[arg(long = "in", value_name = "FILE")]
    input: Option<PathBuf>,

    /// Write the output to a file instead of stdout.
    #[arg(long = "out", value_name = "FILE")]
    output: Option<PathBuf>,

    /// Original path prefix to be replaced with --new.
    #[arg(long, value_name = "DIR")]
    orig: Option<PathBuf>,

    /// New path prefix.
    #[arg(long, value_name = "DIR")]
    new: Option<PathBuf>,

    /// Override the host name exposed to templates.
    #[arg(long, value_name = "HOST")]
    override_host: Option<String>,

    /// Override the user name exposed to templates.
    #[arg(long, value_name = "USER")]
    override_user: Option<String>,
}

impl Cli {
    /// Scan only when requested and no explicit input/output was given.
    fn should_scan(&self) -> bool {
        self.scan && self.input.is_none() && self.output.is_none()
    }

    /// Whether the template source is stdin (which then cannot prompt).
    fn reads_stdin(&self) -> bool {
        self.input.is_none() && !self.scan
    }

    /// Prefix rewrite pair, absolutized. One prefix alone is ignored.
    fn rewrite(&self) -> Result<Option<PrefixRewrite>> {
        match (&self.orig, &self.new) {
            (Some(orig), Some(new)) => {
                let original = absolutize(orig)
                    .with_context(|| format!("cannot resolve path '{}'", orig.display()))?;
                let new = absolutize(new)
                    .with_context(|| format!("cannot resolve path '{}'", new.display()))?;
                Ok(Some(PrefixRewrite { original, new }))
            }
            _ => Ok(None),
        }
    }

    fn overrides(&self) -> ContextOverrides {
        ContextOverrides {
            host: self.override_host.clone(),
            user: self.override_user.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let values = config::load_or_init().context("failed to load templater config")?;
    let ctx = RenderingContext::resolve(&cli.overrides(), values)
        .context("failed to resolve rendering context")?;
    let engine = TemplateEngine::new(&ctx).context("failed to build template engine")?;

    if cli.should_scan() {
        run_scan(&cli, &engine)
    } else {
        run_single(&cli, &engine)
    }
}

// ---------------------------------------------------------------------------
// Scan mode
// ---------------------------------------------------------------------------

fn run_scan(cli: &Cli, engine: &TemplateEngine) -> Result<()> {
    let root = std::env::current_dir().context("failed to get working dir")?;
    let opts = ScanOptions {
        rewrite: cli.rewrite()?,
        policy: WritePolicy {
            dry_run: cli.dry_run,
            interactive: cli.interactive,
            read_only: cli.read_only,
        },
        ..Default::default()
    };

    let stdout = std::io::stdout();
    let stdin = std::io::stdin();
    let mut reporter = Reporter::new(cli.porcelain, stdout.lock());
    scan(&root, engine, &opts, stdin.lock(), &mut reporter)
        .with_context(|| format!("scan failed under {}", root.display()))?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Single-file mode
// ---------------------------------------------------------------------------

fn run_single(cli: &Cli, engine: &TemplateEngine) -> Result<()> {
    let (source, source_label) = match &cli.input {
        Some(path) => {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("failed to open for reading {}", path.display()))?;
            (contents, nice_path(path).display().to_string())
        }
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read template from stdin")?;
            (buf, "<stdin>".to_string())
        }
    };

    let target = output_target(cli)?;

    if cli.dry_run {
        let dst = match &target {
            Some(path) => nice_path(path).display().to_string(),
            None => "<stdout>".to_string(),
        };
        println!("Will read from {source_label} and write to {dst}");
        if cli.reads_stdin() {
            // Nothing more a dry run over stdin can usefully check.
            return Ok(());
        }
        // Render to verify the template, discarding the output.
        engine
            .render(&source)
            .with_context(|| format!("failed to execute template {source_label}"))?;
        return Ok(());
    }

    let rendered = engine
        .render(&source)
        .with_context(|| format!("failed to execute template {source_label}"))?;

    match target {
        None => {
            std::io::stdout()
                .write_all(rendered.as_bytes())
                .context("failed to write to stdout")?;
        }
        Some(path) => {
            let policy = WritePolicy {
                dry_run: false,
                interactive: cli.interactive && !cli.reads_stdin(),
                read_only: false,
            };
            let stdin = std::io::stdin();
            let mut gate = OutputGate::new(policy, stdin.lock());
            // A declined prompt is silent success.
            gate.write(&path, rendered.as_bytes())
                .with_context(|| format!("failed to create file {}", path.display()))?;
        }
    }
    Ok(())
}

/// `--out` wins; else the mapped path derived from `--in`; else stdout.
fn output_target(cli: &Cli) -> Result<Option<PathBuf>> {
    if let Some(out) = &cli.output {
        return Ok(Some(out.clone()));
    }
    match &cli.input {
        Some(input) => {
            let abs = absolutize(input)
                .with_context(|| format!("cannot resolve path '{}'", input.display()))?;
            let mapped = map_output_path(&abs, DEFAULT_EXTENSION, cli.rewrite()?.as_ref())?;
            Ok(Some(mapped))
        }
        None => Ok(None),
    }
}
