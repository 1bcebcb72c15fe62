use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use blocks_html::Config;
use clap::Parser;

#[derive(Parser)]
#[command(name = "blocks-html")]
#[command(about = "Convert rich-text block JSON to HTML")]
struct Cli {
    /// Input JSON file (reads stdin when omitted or `-`)
    input: Option<PathBuf>,

    /// Output HTML file (defaults to stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Config file
    #[arg(short, long, default_value = "blocks-html.toml")]
    config: PathBuf,

    /// Skip pretty-printing and emit the rendered markup as is
    #[arg(long)]
    raw: bool,
}

fn read_input(input: Option<&Path>) -> io::Result<String> {
    match input {
        Some(path) if path != Path::new("-") => fs::read_to_string(path),
        _ => {
            let mut content = String::new();
            io::stdin().read_to_string(&mut content)?;
            Ok(content)
        }
    }
}

fn main() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Warn)
        .parse_default_env()
        .init();

    let cli = Cli::parse();

    let mut config = Config::load_or_default(&cli.config);
    if cli.raw {
        config.output.pretty = false;
    }

    // Read input
    let json = match read_input(cli.input.as_deref()) {
        Ok(content) => content,
        Err(e) => {
            let source = cli
                .input
                .as_deref()
                .map_or("stdin".to_string(), |p| p.display().to_string());
            eprintln!("Error reading {}: {}", source, e);
            std::process::exit(1);
        }
    };

    // Convert blocks to HTML
    let html = match blocks_html::render_json_with_config(&json, &config) {
        Ok(html) => html,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let Some(output) = cli.output else {
        println!("{html}");
        return;
    };

    if let Err(e) = fs::write(&output, format!("{html}\n")) {
        eprintln!("Error writing {}: {}", output.display(), e);
        std::process::exit(1);
    }

    log::info!("Created {}", output.display());
}
