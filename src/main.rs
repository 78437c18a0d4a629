use std::fs;
use std::io::{self, BufRead};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use scriptfollow::{Config, NavCommand, Navigator, ScriptElement, Window};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "scriptfollow")]
#[command(about = "Parse and step through Fountain-style screenplays")]
struct Cli {
    /// Config file (TOML); built-in defaults when omitted
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the parsed elements of a script
    Parse {
        /// Input script file
        input: PathBuf,

        /// Print elements as JSON instead of one line each
        #[arg(long)]
        json: bool,
    },
    /// Step through a script with commands read from stdin
    Follow {
        /// Input script file
        input: PathBuf,

        /// Number of lines shown around the current one (odd)
        #[arg(short, long)]
        window_size: Option<usize>,
    },
}

fn main() {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => match Config::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error reading {}: {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => Config::compiled_default(),
    };
    init_logging(&config);

    let result = match cli.command {
        Command::Parse { input, json } => run_parse(&input, json),
        Command::Follow { input, window_size } => {
            let mut config = config;
            if let Some(size) = window_size {
                config.navigation.window_size = size;
            }
            run_follow(&input, &config)
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_logging(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn read_script(path: &Path) -> Result<String, String> {
    fs::read_to_string(path).map_err(|e| format!("reading {}: {}", path.display(), e))
}

fn run_parse(input: &Path, json: bool) -> Result<(), String> {
    let elements = scriptfollow::parse(&read_script(input)?);

    if json {
        let out = serde_json::to_string_pretty(&elements).map_err(|e| e.to_string())?;
        println!("{}", out);
    } else {
        for element in &elements {
            println!("{}", describe(element));
        }
    }
    Ok(())
}

fn run_follow(input: &Path, config: &Config) -> Result<(), String> {
    let script = read_script(input)?;
    let mut navigator = Navigator::from_config(&config.navigation).map_err(|e| e.to_string())?;

    navigator.subscribe(print_window);
    navigator.load(scriptfollow::parse(&script));

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line.map_err(|e| e.to_string())?;
        let command = match line.trim().to_lowercase().as_str() {
            "" => continue,
            "q" | "quit" => break,
            "n" | "j" | "down" => NavCommand::Advance,
            "p" | "k" | "up" => NavCommand::Retreat,
            "r" | "top" => NavCommand::ResetToTop,
            other => {
                eprintln!("unknown command {:?} (n/p/r/q)", other);
                continue;
            }
        };
        navigator.apply(command).map_err(|e| e.to_string())?;
    }
    Ok(())
}

fn print_window(window: &Window<'_>) {
    println!("----");
    for (i, element) in window.elements.iter().enumerate() {
        let marker = if i == window.active_offset { '>' } else { ' ' };
        println!("{} {}", marker, describe(element));
    }
}

fn describe(element: &ScriptElement) -> String {
    match element {
        ScriptElement::DualDialogue { left, right } => format!(
            "{} [{} | {}]: {} | {}",
            element.kind(),
            left.character,
            right.character,
            left.text,
            right.text
        ),
        _ => {
            let text = element.text().unwrap_or_default();
            match element.character() {
                Some(character) if !character.is_empty() => {
                    format!("{} [{}]: {}", element.kind(), character, text)
                }
                _ => format!("{}: {}", element.kind(), text),
            }
        }
    }
}
