use std::{fs, path::PathBuf, process, time::Instant};

use clap::Parser;
use quadc::{
    display_error, generate_ir,
    lexer::lexer::{print_tokens, tokenize, write_tokens},
    parse_and_check,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "quadc")]
#[command(about = "Compile a source file to three-address quadruples")]
struct Args {
    /// Source file to compile
    #[arg(default_value = "code.txt")]
    code_file: PathBuf,

    /// Where the token listing is written
    #[arg(long, default_value = "tokens.txt")]
    tokens: PathBuf,

    /// Do not echo the tokens to stdout
    #[arg(long)]
    no_print_tokens: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let source = match fs::read_to_string(&args.code_file) {
        Ok(source) => source,
        Err(err) => {
            error!(file = %args.code_file.display(), "failed to read source: {}", err);
            process::exit(1);
        }
    };

    let start = Instant::now();

    let tokens = match tokenize(&source) {
        Ok(tokens) => tokens,
        Err(err) => {
            display_error(&err, &source, &args.code_file);
            process::exit(1);
        }
    };
    info!(elapsed = ?start.elapsed(), count = tokens.len(), "tokenized");

    if !args.no_print_tokens {
        println!("{}", print_tokens(&tokens));
    }
    if let Err(err) = fs::write(&args.tokens, write_tokens(&tokens) + "\n") {
        error!(file = %args.tokens.display(), "failed to write tokens: {}", err);
        process::exit(1);
    }

    let check_start = Instant::now();
    let ast = match parse_and_check(&tokens) {
        Ok(ast) => ast,
        Err(err) => {
            display_error(&err, &source, &args.code_file);
            process::exit(1);
        }
    };
    info!(elapsed = ?check_start.elapsed(), "parsed and type checked");

    let ir_start = Instant::now();
    let ir = generate_ir(&ast);
    info!(elapsed = ?ir_start.elapsed(), "generated IR");
    info!(elapsed = ?start.elapsed(), "total time for IR generation");

    println!("{}", ir);
}
