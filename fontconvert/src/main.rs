use clap::Parser;
use glyph_atlas::{AtlasConfig, FontdueSource, assemble, header::validate_name, render_header};
use log::{LevelFilter, info};
use log4rs::{
    append::console::{ConsoleAppender, Target},
    config::{Appender, Config as LogConfig, Logger, Root},
    encode::pattern::PatternEncoder,
};
use std::{
    fs,
    io::{self, Write},
    path::PathBuf,
};

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Name of the font, used as the prefix of every generated symbol
    name: String,

    #[clap(value_parser = clap::value_parser!(u32).range(1..))]
    /// Font size in points
    size: u32,

    #[clap(required = true)]
    /// Font files, ordered by descending priority
    fontstack: Vec<PathBuf>,

    #[clap(long)]
    /// Compress glyph bitmaps
    compress: bool,

    #[clap(long)]
    /// TOML file overriding the code point intervals, DPI, reference
    /// character or driver header
    config: Option<PathBuf>,

    #[clap(long, short)]
    /// Write the header to this file instead of stdout
    output: Option<PathBuf>,

    #[clap(long, short, action(clap::ArgAction::Count))]
    /// Increase the log verbosity
    verbose: u8,
}

const APP_NAME: &str = "fontconvert";

fn init_logging(verbose: u8) -> Result<(), Box<dyn std::error::Error>> {
    let log_level = match verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    // Stdout carries the header, so everything is logged to stderr
    let console = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new("[{d} {h({l:5})} {M}] {m}{n}")))
        .build();

    // Setup the logging from all locations to use `LevelFilter::Error`
    let root = Root::builder().appender("console").build(LevelFilter::Error);

    let log_config = LogConfig::builder()
        .appender(Appender::builder().build("console", Box::new(console)))
        .logger(Logger::builder().build(APP_NAME, log_level))
        .logger(Logger::builder().build("glyph_atlas", log_level))
        .build(root)?;

    log4rs::init_config(log_config)?;
    if verbose > 0 {
        log_panics::init();
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    init_logging(args.verbose)?;
    // `render_header` checks the name again for library callers; checking here
    // rejects a bad name before any font is loaded or rasterized
    validate_name(&args.name)?;

    let config = match &args.config {
        Some(path) => {
            info!("Reading config file: {}", path.display());
            AtlasConfig::new_from_file(path)?
        }
        None => AtlasConfig::default(),
    };
    let plan = config.plan()?;

    let font_stack = args
        .fontstack
        .iter()
        .map(|path| FontdueSource::load(path, args.size, config.dpi))
        .collect::<Result<Vec<_>, _>>()?;
    info!(
        "Loaded {} font(s) at {}pt, encoding {} glyphs",
        font_stack.len(),
        args.size,
        plan.glyph_count()
    );

    let atlas = assemble(&font_stack, &plan, config.atlas_options(args.compress))?;
    let header = render_header(&atlas, &args.name, &config.driver_header)?;

    match &args.output {
        Some(path) => {
            fs::write(path, header.as_bytes())?;
            info!("Wrote {}", path.display());
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(header.as_bytes())?;
            stdout.flush()?;
        }
    }

    Ok(())
}
