use clap::Parser;
use owo_colors::OwoColorize;
use rlox::cli::{self, Args, Commands};
use rlox::config::AppConfig;
use rlox::diagnostic::Diagnostics;
use rlox::format::print_program;
use rlox::interpreter::{parse_tokens, Interpreter};
use rlox::lexer;
use std::io::{self, BufRead, Write};
use std::path::Path;
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => {
            let code = if err.use_stderr() { cli::EXIT_USAGE } else { 0 };
            let _ = err.print();
            process::exit(code);
        }
    };

    if let Some(Commands::Complete { shell }) = args.command {
        cli::generate_completions(shell);
        return;
    }

    let config = AppConfig::from_args(&args);
    init_tracing(&config);

    let code = match &config.script {
        Some(path) => run_file(path, &config),
        None => run_prompt(&config),
    };
    process::exit(code);
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config.log_directive()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(config.color_enabled)
        .with_target(true)
        .without_time()
        .init();
}

fn run_file(path: &Path, config: &AppConfig) -> i32 {
    let source = match std::fs::read_to_string(path) {
        Ok(source) => source,
        Err(e) => {
            error_message(config, &format!("Failed to read {}: {}", path.display(), e));
            return cli::EXIT_NO_INPUT;
        }
    };
    tracing::debug!(path = %path.display(), bytes = source.len(), "running script");

    let mut interpreter = Interpreter::new();
    let diagnostics = run_source(&mut interpreter, &source, config);
    report(&diagnostics, config);

    if diagnostics.had_error() {
        cli::EXIT_DATA_ERR
    } else if diagnostics.had_runtime_error() {
        cli::EXIT_SOFTWARE
    } else {
        0
    }
}

fn run_prompt(config: &AppConfig) -> i32 {
    tracing::debug!("entering interactive mode");

    let mut interpreter = Interpreter::new();
    let stdin = io::stdin();
    let mut lines = stdin.lock();

    loop {
        print!("> ");
        if let Err(e) = io::stdout().flush() {
            error_message(config, &format!("Error writing prompt: {}", e));
            return cli::EXIT_SOFTWARE;
        }

        let mut line = String::new();
        match lines.read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {
                let diagnostics = run_source(&mut interpreter, &line, config);
                report(&diagnostics, config);
            }
            Err(e) => {
                error_message(config, &format!("Error reading input: {}", e));
                return cli::EXIT_SOFTWARE;
            }
        }
    }

    0
}

fn run_source(interpreter: &mut Interpreter, source: &str, config: &AppConfig) -> Diagnostics {
    let scanned = lexer::scan(source);
    if config.dump_tokens {
        for token in &scanned.tokens {
            println!("{}", token);
        }
    }

    let parsed = parse_tokens(scanned);
    if config.dump_ast {
        print!("{}", print_program(&parsed.statements));
    }

    interpreter.run_parsed(parsed)
}

fn report(diagnostics: &Diagnostics, config: &AppConfig) {
    if diagnostics.is_clean() {
        return;
    }
    let _ = io::stdout().flush();
    eprint!("{}", diagnostics.render(config.color_enabled));
}

fn error_message(config: &AppConfig, message: &str) {
    if config.color_enabled {
        eprintln!("{}", message.red().bold());
    } else {
        eprintln!("{}", message);
    }
}
