use clap::{Parser, Subcommand};
use log::{debug, info};
use phrasemap::config::{Config, load_config};
use phrasemap::document::{TreeOptions, translate_tree};
use phrasemap::{Table, TranslationMap, apply};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

#[derive(Parser)]
#[command(name = "phrasemap", about = "Apply English-to-Japanese phrase tables to docs")]
struct Cli {
    /// Config file (default: <config dir>/phrasemap.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Translate every matching file under a directory in place
    Apply {
        root: PathBuf,
        /// Report what would change without writing
        #[arg(long)]
        dry_run: bool,
        #[arg(long, value_enum)]
        table: Option<Table>,
    },
    /// Translate stdin to stdout
    Text {
        #[arg(long, value_enum)]
        table: Option<Table>,
    },
    /// Print the active phrase table in match order
    List {
        #[arg(long, value_enum)]
        table: Option<Table>,
    },
    /// Validate the configuration
    Check,
}

fn build_map(config: &mut Config, table: Option<Table>) -> TranslationMap {
    if let Some(table) = table {
        config.table = table;
    }
    match config.translation_map() {
        Ok(map) => {
            info!("{} mappings loaded ({:?})", map.len(), config.table);
            map
        }
        Err(e) => {
            eprintln!("Invalid phrase table: {e}");
            std::process::exit(1);
        }
    }
}

async fn run_apply(mut config: Config, root: PathBuf, dry_run: bool, table: Option<Table>) {
    let map = Arc::new(build_map(&mut config, table));
    let total_phrases = map.len();
    let options = TreeOptions {
        extensions: config.extensions,
        dry_run,
    };

    let outcomes = match translate_tree(map, &root, &options).await {
        Ok(outcomes) => outcomes,
        Err(e) => {
            eprintln!("Failed to scan {root:?}: {e}");
            std::process::exit(1);
        }
    };

    let mut substitutions = 0;
    let mut written = 0;
    let mut failed = 0;
    for outcome in &outcomes {
        match &outcome.result {
            Ok(report) => {
                println!(
                    "{}: {} substitutions ({} of {total_phrases} phrases found)",
                    outcome.path.display(),
                    report.substitutions,
                    report.phrases_found
                );
                substitutions += report.substitutions;
                written += usize::from(report.written);
            }
            Err(e) => {
                eprintln!("{}: {e}", outcome.path.display());
                failed += 1;
            }
        }
    }

    let verb = if dry_run { "would rewrite" } else { "rewrote" };
    println!(
        "{} documents, {substitutions} substitutions, {verb} {written}, {failed} failed",
        outcomes.len()
    );
    if failed > 0 {
        std::process::exit(1);
    }
}

async fn run_text(mut config: Config, table: Option<Table>) {
    let map = build_map(&mut config, table);

    let mut input = String::new();
    if let Err(e) = tokio::io::stdin().read_to_string(&mut input).await {
        eprintln!("Failed to read stdin: {e}");
        std::process::exit(1);
    }

    let translated = apply(&map, &input);
    debug!(
        "substitutions={} found={} of {}",
        translated.substitutions,
        translated.phrases_found,
        map.len()
    );

    let mut stdout = tokio::io::stdout();
    let written = async {
        stdout.write_all(translated.text.as_bytes()).await?;
        stdout.flush().await
    };
    if let Err(e) = written.await {
        eprintln!("Failed to write stdout: {e}");
        std::process::exit(1);
    }
}

fn run_list(mut config: Config, table: Option<Table>) {
    let map = build_map(&mut config, table);
    for (source, target) in map.iter() {
        println!("{source}\t{target}");
    }
    println!("{} mappings", map.len());
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Config error: {e}");
            std::process::exit(1);
        }
    };

    match cli.command {
        Commands::Apply {
            root,
            dry_run,
            table,
        } => run_apply(config, root, dry_run, table).await,
        Commands::Text { table } => run_text(config, table).await,
        Commands::List { table } => run_list(config, table),
        Commands::Check => match config.translation_map() {
            Ok(map) => println!("ok: {} mappings", map.len()),
            Err(e) => {
                eprintln!("Invalid phrase table: {e}");
                std::process::exit(1);
            }
        },
    }
}
