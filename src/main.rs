//! gemtext - render document trees to Gemtext

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use gemtext_render::export::{Exporter, GemtextExporter, OUTFILESUFFIX};
use gemtext_render::gemtext::supported_kinds;
use gemtext_render::{Node, Result};

#[derive(Parser)]
#[command(name = "gemtext")]
#[command(version, about = "Render document trees to Gemtext", long_about = None)]
#[command(after_help = "EXAMPLES:
    gemtext post.json                      Write post.gmi
    gemtext post.json -o -                 Print to stdout
    gemtext -a links-heading=Links doc.json
    parser doc.adoc | gemtext -o doc.gmi   Read the tree from stdin")]
struct Cli {
    /// Input document tree as JSON ("-" or absent reads stdin)
    #[arg(value_name = "INPUT")]
    input: Option<PathBuf>,

    /// Output file ("-" writes stdout; default: INPUT with a .gmi extension)
    #[arg(short, long, value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Set or override a document attribute (KEY=VALUE, KEY, or KEY! to unset)
    #[arg(short = 'a', long = "attribute", value_name = "KEY=VALUE")]
    attributes: Vec<String>,

    /// Fail on host-relative images when no image-base-url is set
    #[arg(long)]
    strict_images: bool,

    /// Print the node kinds that can be rendered and exit
    #[arg(long)]
    list_kinds: bool,

    /// Suppress output messages
    #[arg(short, long)]
    quiet: bool,

    /// Log rendering decisions to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if cli.list_kinds {
        for kind in supported_kinds() {
            println!("{kind}");
        }
        return ExitCode::SUCCESS;
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    // A second subscriber can only come from a test harness; keep the first.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

fn run(cli: &Cli) -> Result<()> {
    let input = cli.input.as_deref().filter(|path| !is_stdio(path));
    let root = read_tree(input)?;

    let mut exporter = GemtextExporter::new();
    for spec in &cli.attributes {
        exporter = exporter.with_attribute_spec(spec)?;
    }
    if cli.strict_images {
        exporter = exporter.with_attribute("image-base-url-policy", "strict");
    }

    match output_path(input, cli.output.as_deref()) {
        Some(path) => {
            // Render fully before touching the file so a failure leaves no
            // truncated output behind.
            let gmi = exporter.convert(&root)?;
            fs::write(&path, gmi)?;
            info!(path = %path.display(), "wrote gemtext");
            if !cli.quiet {
                eprintln!("Wrote {}", path.display());
            }
        }
        None => {
            let stdout = io::stdout();
            exporter.export(&root, &mut stdout.lock())?;
        }
    }

    Ok(())
}

fn read_tree(input: Option<&Path>) -> Result<Node> {
    let json = match input {
        Some(path) => {
            debug!(path = %path.display(), "reading document tree");
            fs::read_to_string(path)?
        }
        None => {
            let mut json = String::new();
            io::stdin().read_to_string(&mut json)?;
            json
        }
    };
    let root: Node = serde_json::from_str(&json)?;
    Ok(root)
}

/// Where to write: `None` means stdout.
fn output_path(input: Option<&Path>, output: Option<&Path>) -> Option<PathBuf> {
    match output {
        Some(path) if is_stdio(path) => None,
        Some(path) => Some(path.to_path_buf()),
        None => input.map(|path| path.with_extension(OUTFILESUFFIX.trim_start_matches('.'))),
    }
}

fn is_stdio(path: &Path) -> bool {
    path.as_os_str() == "-"
}

