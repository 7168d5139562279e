use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::{generate, Shell};
use colored::*;
use gramfix::annotate;
use gramfix::cli::output::{self, OutputFormat};
use gramfix::config::Overrides;
use gramfix::engine;
use gramfix::services::translate;
use gramfix::{Assistant, Config};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "gramfix")]
#[command(version, about = "Grammar correction and translation for plain text", long_about = None)]
struct Cli {
    /// Files to check ("-" reads stdin and writes corrected text to stdout)
    #[arg(value_name = "FILES")]
    files: Vec<PathBuf>,

    /// Check a string instead of files
    #[arg(long, value_name = "STRING")]
    text: Option<String>,

    /// Fix issues in place (auto-apply top suggestion)
    #[arg(short, long)]
    fix: bool,

    /// Interactive mode for selecting corrections
    #[arg(short, long, requires = "fix")]
    interactive: bool,

    /// Translate corrected text to this language (see `gramfix langs`)
    #[arg(short = 't', long, value_name = "LANG")]
    translate: Option<String>,

    /// Language hint for the grammar service (e.g., en-US, de-DE, auto)
    #[arg(short, long)]
    language: Option<String>,

    /// Grammar service endpoint (LanguageTool v2 compatible)
    #[arg(long, value_name = "URL")]
    endpoint: Option<String>,

    /// Rule id or message pattern to ignore (regex)
    #[arg(long, value_name = "PATTERN")]
    ignore_rule: Vec<String>,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Exit with code 0 even if issues are found
    #[arg(long)]
    no_fail: bool,

    /// Output format (text, json)
    #[arg(short = 'o', long, default_value = "text")]
    format: OutputFormat,

    /// Generate shell completion script
    #[arg(long, value_name = "SHELL")]
    completion: Option<Shell>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Parser, Debug)]
enum Commands {
    /// List supported translation target languages
    Langs,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Handle shell completion generation
    if let Some(shell) = cli.completion {
        let mut cmd = Cli::command();
        generate(shell, &mut cmd, "gramfix", &mut io::stdout());
        return Ok(());
    }

    if let Some(Commands::Langs) = cli.command {
        print_languages(!cli.no_color);
        return Ok(());
    }

    if let Some(target) = &cli.translate {
        if !translate::is_known_language(target) {
            anyhow::bail!(
                "Unknown translation target '{}'. Run `gramfix langs` for the supported list.",
                target
            );
        }
    }

    // Load configuration
    let config = Config::load(Overrides {
        language: cli.language.clone(),
        target_language: cli.translate.clone(),
        grammar_endpoint: cli.endpoint.clone(),
        ignore_rules: cli.ignore_rule.clone(),
    })?;

    let assistant = Assistant::new(&config)?;
    let colored = !cli.no_color;

    if let Some(text) = &cli.text {
        return run_text(&assistant, &config, text, colored, &cli.format);
    }

    if cli.files.len() == 1 && cli.files[0].as_path() == Path::new("-") {
        return run_stdin(&assistant, &config);
    }

    if cli.files.is_empty() {
        anyhow::bail!("No input specified. Pass files, \"-\", or --text; see --help.");
    }

    // auto_replace from the config behaves like an implicit --fix
    let fix = cli.fix || config.auto_replace;

    let mut total_matches = 0;
    let mut total_fixed = 0;

    for file_path in &cli.files {
        if !file_path.exists() {
            eprintln!("Error: File not found: {}", file_path.display());
            continue;
        }

        let result = if fix {
            if cli.interactive {
                assistant.fix_interactive(file_path, &config, colored)?
            } else {
                assistant.fix_auto(file_path, &config)?
            }
        } else {
            assistant.check(file_path, &config, colored, &cli.format)?
        };

        total_matches += result.match_count;
        total_fixed += result.fixed_count;
    }

    if fix {
        output::print_fix_summary(total_fixed, &cli.files, colored);
    } else {
        output::print_check_summary(total_matches, &cli.files, colored);
    }

    if total_matches > 0 && !cli.no_fail && !fix {
        std::process::exit(1);
    }

    Ok(())
}

/// One-shot check of a string: annotated echo, per-issue details, and the
/// fully corrected (and optionally translated) result.
fn run_text(
    assistant: &Assistant,
    config: &Config,
    text: &str,
    colored: bool,
    format: &OutputFormat,
) -> Result<()> {
    if !config.enabled {
        println!("{}", text);
        return Ok(());
    }

    let annotated = assistant.annotate(text)?;

    if matches!(format, OutputFormat::Text) {
        output::print_annotated(&annotated.segments, colored);
    }
    let outcome = engine::outcome_from_segments(text, &annotated.segments);
    output::print_reports(Path::new("<input>"), &outcome, colored, format);

    if matches!(format, OutputFormat::Text) {
        let winners = engine::winning_matches(text, &annotated.matches);
        let corrected = annotate::apply(text, &winners)?;
        if corrected != text {
            if colored {
                println!("\n{} {}", "Corrected:".green().bold(), corrected);
            } else {
                println!("\nCorrected: {}", corrected);
            }
        }

        if let Some(translated) = assistant.translate(&corrected, &config.target_language)? {
            if colored {
                println!("{} {}", "Translated:".cyan().bold(), translated);
            } else {
                println!("Translated: {}", translated);
            }
        }
    }

    Ok(())
}

/// Filter mode: corrected text goes to stdout, everything else to stderr.
fn run_stdin(assistant: &Assistant, config: &Config) -> Result<()> {
    let mut text = String::new();
    io::stdin()
        .read_to_string(&mut text)
        .map_err(|e| anyhow::anyhow!("Failed to read stdin: {}", e))?;

    // disabled: pass input through untouched
    if !config.enabled {
        print!("{}", text);
        return Ok(());
    }

    let corrected = assistant.correct(&text, &config.target_language)?;
    print!("{}", corrected.corrected);

    if let Some(translated) = corrected.translated {
        eprintln!("Translated: {}", translated);
    }

    Ok(())
}

fn print_languages(colored: bool) {
    if colored {
        println!("{}", "Translation targets:".bold());
    } else {
        println!("Translation targets:");
    }
    println!();
    for (code, name) in translate::LANGUAGES {
        if colored {
            println!("  {}  {}", code.cyan().bold(), name);
        } else {
            println!("  {}  {}", code, name);
        }
    }
    println!();
    println!("Use \"none\" to disable translation.");
}
