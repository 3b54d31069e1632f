//! mathfence CLI - find math in text and expand TeX macros

#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use mathfence::{
    render_to_tex, split_at_delimiters, DelimiterSpec, Fences, MacroExpander,
    RenderOptions, Segment,
};
#[cfg(feature = "cli")]
use mathfence::macros::{tokens_to_string, Mode};
#[cfg(feature = "cli")]
use std::fs;
#[cfg(feature = "cli")]
use std::io::{self, Read, Write};
#[cfg(feature = "cli")]
use std::sync::atomic::{AtomicUsize, Ordering};
#[cfg(feature = "cli")]
use std::sync::Arc;
#[cfg(feature = "cli")]
use tracing_subscriber::EnvFilter;

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "mathfence")]
#[command(version)]
#[command(about = "Find math regions in text and expand TeX macros", long_about = None)]
struct Cli {
    /// Input file path (reads from stdin if not provided)
    input_file: Option<String>,

    /// Output file path (writes to stdout if not provided)
    #[arg(short, long)]
    output: Option<String>,

    /// Delimiter preset: basic, $, (, $+, (+, ams, all
    #[arg(long)]
    fences: Option<String>,

    /// Inline delimiter pair (repeatable); replaces the preset
    #[arg(long, num_args = 2, value_names = ["LEFT", "RIGHT"])]
    delimiter: Vec<String>,

    /// Display delimiter pair (repeatable); tried before inline pairs
    #[arg(long, num_args = 2, value_names = ["LEFT", "RIGHT"])]
    display_delimiter: Vec<String>,

    /// Seed macro definition, e.g. --macro '\RR=\mathbb{R}'
    #[arg(long = "macro", value_name = "NAME=BODY")]
    macros: Vec<String>,

    /// Expansion steps allowed per math region
    #[arg(long)]
    max_expand: Option<usize>,

    /// Print the segment list instead of rendering
    #[arg(long)]
    segments: bool,

    /// Print segments as JSON (with --segments)
    #[arg(long)]
    json: bool,

    /// Treat the whole input as one math formula and print its expansion
    #[arg(long)]
    expand: bool,

    /// Strict mode: exit with error if any math region failed to parse
    #[arg(long)]
    strict: bool,

    /// Log debug information to stderr
    #[arg(short, long)]
    verbose: bool,
}

#[cfg(feature = "cli")]
fn init_logging(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(io::stderr)
        .init();
}

#[cfg(feature = "cli")]
fn build_options(cli: &Cli) -> io::Result<RenderOptions> {
    let mut options = RenderOptions::default();

    if let Some(key) = &cli.fences {
        options.fences = Some(Fences::from_key(key));
    }

    if !cli.delimiter.is_empty() || !cli.display_delimiter.is_empty() {
        let display = cli
            .display_delimiter
            .chunks(2)
            .map(|pair| DelimiterSpec::display(pair[0].clone(), pair[1].clone()));
        let inline = cli
            .delimiter
            .chunks(2)
            .map(|pair| DelimiterSpec::inline(pair[0].clone(), pair[1].clone()));
        options.delimiters = Some(display.chain(inline).collect());
    }

    for definition in &cli.macros {
        let Some((name, body)) = definition.split_once('=') else {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("invalid --macro '{}', expected NAME=BODY", definition),
            ));
        };
        options.macros.insert(name.to_string(), body.to_string());
    }

    if let Some(max_expand) = cli.max_expand {
        options.max_expand = max_expand;
    }

    Ok(options)
}

#[cfg(feature = "cli")]
fn format_segments(segments: &[Segment<'_>], json: bool) -> io::Result<String> {
    if json {
        return serde_json::to_string_pretty(segments)
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e));
    }

    let mut out = String::new();
    for segment in segments {
        match segment {
            Segment::Text { content } => out.push_str(&format!("text     {:?}\n", content)),
            Segment::Math {
                content, display, ..
            } => {
                let kind = if *display { "display" } else { "inline" };
                out.push_str(&format!("{:<8} {:?}\n", kind, content));
            }
        }
    }
    Ok(out)
}

#[cfg(feature = "cli")]
fn main() -> io::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Read input
    let input = match cli.input_file {
        Some(ref path) => fs::read_to_string(path)?,
        None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };

    let failures = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&failures);
    let options = build_options(&cli)?.with_error_callback(move |message, error| {
        counter.fetch_add(1, Ordering::Relaxed);
        tracing::error!(error = %error, "{}", message);
    });

    let result = if cli.segments {
        let delimiters = options.resolved_delimiters();
        format_segments(&split_at_delimiters(&input, &delimiters), cli.json)?
    } else if cli.expand {
        let mut macros = options.macro_table();
        let tokens = MacroExpander::new(input.trim(), &mut macros, Mode::Math)
            .with_max_expand(options.max_expand)
            .expand_fully();
        match tokens {
            Ok(tokens) => tokens_to_string(&tokens),
            Err(err) => {
                eprintln!("Error: {}", err);
                std::process::exit(1);
            }
        }
    } else {
        let mut macros = options.macro_table();
        match render_to_tex(&input, &options, &mut macros) {
            Ok(output) => output,
            Err(err) => {
                eprintln!("Error: {}", err);
                std::process::exit(1);
            }
        }
    };

    let failed = failures.load(Ordering::Relaxed);
    if cli.strict && failed > 0 {
        eprintln!("Error: {} math region(s) failed to parse in strict mode", failed);
        std::process::exit(1);
    }

    // Output
    match cli.output {
        Some(path) => {
            let mut file = fs::File::create(&path)?;
            write!(file, "{}", result)?;
            eprintln!("✓ Output written to: {}", path);
        }
        None => {
            print!("{}", result);
            if !result.ends_with('\n') {
                println!();
            }
        }
    }

    Ok(())
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("CLI feature not enabled. Build with --features cli");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  cargo install mathfence --features cli");
    eprintln!("  mathfence [OPTIONS] [INPUT_FILE]");
}
