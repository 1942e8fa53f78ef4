use std::{fs, path::PathBuf, process::ExitCode};

use clap::{builder::TypedValueParser, value_parser, ArgAction, Parser};
use log::{debug, info, LevelFilter};

use validc::{
    base_name,
    codegen::codegen::write_harness,
    display_error,
    errors::errors::CompileError,
    lexer::lexer::Lexer,
    parser::{buffer::DEFAULT_LOOKAHEAD, parser::parse},
    session::Session,
    Severity,
};

/// Common way to set logging levels
#[derive(Debug, Clone, Copy, clap::Args)]
struct LoggingArgs {
    /// More log output, repeat for more
    #[clap(short = 'v', value_parser = value_parser!(u8).range(0..=3), action = ArgAction::Count, conflicts_with = "quiet")]
    verbose: u8,
    /// Less log output, repeat for none
    #[clap(short = 'q', value_parser = value_parser!(u8).range(0..=2), action = ArgAction::Count, conflicts_with = "verbose")]
    quiet: u8,
}

impl LoggingArgs {
    fn log_level_filter(&self) -> LevelFilter {
        match self.verbose as i8 - self.quiet as i8 {
            i8::MIN..=-2 => LevelFilter::Off,
            -1 => LevelFilter::Error,
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

/// The args struct
#[derive(Debug, Parser)]
#[clap(author, version, about = "Compiles validation files into Python unittest harnesses")]
struct Args {
    #[command(flatten)]
    logging: LoggingArgs,

    /// The validation file to compile
    #[clap(value_name = "FILE", value_hint = clap::ValueHint::FilePath)]
    file: Option<PathBuf>,
    /// Where to place the generated `<name>.py`
    #[clap(short = 'o', long = "output-dir", default_value = ".")]
    output_dir: PathBuf,
    /// Number of tokens kept for pushback
    #[clap(long, default_value_t = DEFAULT_LOOKAHEAD, value_parser = value_parser!(u16).range(2..).map(usize::from))]
    lookahead: usize,
    /// Print the token stream and stop
    #[clap(long)]
    tokens: bool,
    /// Stop after parsing, do not generate code
    #[clap(long)]
    parse_only: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    env_logger::Builder::new()
        .filter_level(args.logging.log_level_filter())
        .parse_default_env()
        .init();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("validc:error: {}", err);
            ExitCode::from(err.exit_code())
        }
    }
}

fn run(args: &Args) -> Result<(), CompileError> {
    let Some(path) = args.file.as_deref() else {
        return Err(CompileError::NoInput);
    };

    let source = fs::read_to_string(path).map_err(|source| CompileError::CannotOpen {
        path: path.to_path_buf(),
        source,
    })?;
    let mut lexer = Lexer::new(&source, Some(path.display().to_string()));

    if args.tokens {
        loop {
            let token = lexer.next_token();
            println!("{}:{}", lexer.file(), token);
            if token.is_eof() {
                return Ok(());
            }
        }
    }

    let mut session = Session::new();
    let result = parse(lexer, &mut session, args.lookahead);

    for err in session.diagnostics().errors() {
        display_error(err, Severity::Error, path, &source);
    }
    for warning in session.diagnostics().warnings() {
        display_error(warning, Severity::Warning, path, &source);
    }
    result?;

    if args.parse_only {
        info!("parsed {} modules", session.modules().len());
    } else {
        let written = write_harness(&session, &args.output_dir, &base_name(path))?;
        debug!("harness written to {}", written.display());
    }

    println!("note: finished compiling.");
    Ok(())
}
