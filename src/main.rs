use anyhow::Context as _;
use clap::Parser;
use segalign::{
    alignment::Alignment,
    config::{load_config, ConfigOpt, OutputFormat, SplitMode},
    modify::{LineSplitter, RegexSplitter, SentenceSplitter, SplitAlgorithm},
    output::{print_pairs, print_side_by_side},
    pipeline::run_macro,
    progress::LogProgress,
};
use std::{
    io::Write as _,
    path::{Path, PathBuf},
};

#[derive(Parser, Debug)]
#[command(about = "Aligns the segments of a text with the segments of its translation")]
#[command(arg_required_else_help(true))]
struct Args {
    #[arg(value_name = "SOURCE")]
    source: PathBuf,
    #[arg(value_name = "TARGET")]
    target: PathBuf,
    /// Config file read after the user config file.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Log progress; repeat for more detail.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
    /// Column width of the side output.
    #[arg(long, default_value_t = 40, value_name = "NUM")]
    width: usize,
    #[command(flatten)]
    options: ConfigOpt,
}

fn read_segments(path: &Path, split: SplitMode) -> anyhow::Result<Vec<String>> {
    let text = std::fs::read_to_string(path).with_context(|| format!("parse: cannot read {}", path.display()))?;
    let splitter: Box<dyn SplitAlgorithm> = match split {
        SplitMode::Sentence => Box::new(SentenceSplitter),
        SplitMode::Paragraph => Box::new(RegexSplitter::paragraphs()?),
        SplitMode::Line => Box::new(LineSplitter),
        SplitMode::None => {
            let text = text.trim();
            return Ok(if text.is_empty() { vec![] } else { vec![text.to_owned()] });
        }
    };
    Ok(splitter.split(&text))
}

fn try_main() -> anyhow::Result<()> {
    let args = Args::parse();

    let default_level = match args.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();

    let config = load_config(args.config.as_deref())
        .context("parse: cannot load configuration")?
        .update(args.options);
    log::debug!("{config:?}");

    let source = read_segments(&args.source, config.split)?;
    let target = read_segments(&args.target, config.split)?;
    log::info!("read {} source and {} target segments", source.len(), target.len());

    let input = vec![Alignment::new(source, target, 0.0)];
    let alignments = run_macro(config.macro_kind, input, &config.macro_options(), &LogProgress)
        .with_context(|| format!("align: {:?} failed", config.macro_kind))?;

    let mut stdout = std::io::stdout().lock();
    match config.output {
        OutputFormat::Pairs => print_pairs(&alignments, &mut stdout),
        OutputFormat::Side => print_side_by_side(&alignments, args.width, &mut stdout),
        OutputFormat::Debug => writeln!(stdout, "{alignments:#?}"),
    }
    .context("format: cannot write output")?;

    Ok(())
}

fn main() {
    // Returning the error from main() would print it with Debug instead of Display.
    if let Err(e) = try_main() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
