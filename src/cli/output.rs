use crate::annotate::Segment;
use crate::{CheckOutcome, MatchReport};
use colored::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

#[derive(Debug, Clone, Copy)]
pub enum OutputFormat {
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown format: {}", s)),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct JsonMatch {
    file: String,
    line: usize,
    column: usize,
    offset: usize,
    length: usize,
    text: String,
    message: String,
    replacements: Vec<String>,
    context: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct JsonOutput {
    files_checked: usize,
    total_matches: usize,
    matches: Vec<JsonMatch>,
}

pub fn print_reports(
    file_path: &Path,
    outcome: &CheckOutcome,
    colored_output: bool,
    format: &OutputFormat,
) {
    match format {
        OutputFormat::Text => print_text_reports(file_path, outcome, colored_output),
        OutputFormat::Json => print_json_reports(file_path, outcome),
    }
}

fn print_text_reports(file_path: &Path, outcome: &CheckOutcome, colored_output: bool) {
    if outcome.reports.is_empty() {
        return;
    }

    let file_name = file_path.display().to_string();

    if colored_output {
        println!("\n{}", file_name.bold().underline());
    } else {
        println!("\n{}", file_name);
    }

    for report in &outcome.reports {
        let line_info = format!("{}:{}", report.line, report.column);

        if colored_output {
            println!(
                "  {} {} {}",
                line_info.blue().bold(),
                report.text.red().underline(),
                highlight_context(&report.context, &report.text)
            );
            if !report.message.is_empty() {
                println!("    {}", report.message.dimmed());
            }
            if !report.replacements.is_empty() {
                let suggestions = report
                    .replacements
                    .iter()
                    .map(|s| s.green().to_string())
                    .collect::<Vec<_>>()
                    .join(&", ".dimmed().to_string());
                println!("    {} {}", "→".dimmed(), suggestions);
            }
        } else {
            println!("  {} {} {}", line_info, report.text, report.context);
            if !report.message.is_empty() {
                println!("    {}", report.message);
            }
            if !report.replacements.is_empty() {
                println!("    → {}", report.replacements.join(", "));
            }
        }
    }
}

fn print_json_reports(file_path: &Path, outcome: &CheckOutcome) {
    let matches: Vec<JsonMatch> = outcome
        .reports
        .iter()
        .map(|r| JsonMatch {
            file: file_path.display().to_string(),
            line: r.line,
            column: r.column,
            offset: r.start,
            length: r.end - r.start,
            text: r.text.clone(),
            message: r.message.clone(),
            replacements: r.replacements.clone(),
            context: r.context.clone(),
        })
        .collect();

    let output = JsonOutput {
        files_checked: 1,
        total_matches: outcome.match_count,
        matches,
    };

    match serde_json::to_string_pretty(&output) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Warning: failed to serialize output: {}", e),
    }
}

fn highlight_context(context: &str, flagged: &str) -> String {
    if flagged.is_empty() {
        return context.to_string();
    }
    context.replace(flagged, &flagged.red().underline().to_string())
}

/// Echo `segments` as one line, flagged regions underlined. The plain
/// concatenation of segment texts is the checked input itself.
pub fn print_annotated(segments: &[Segment], colored_output: bool) {
    let mut rendered = String::new();
    for segment in segments {
        if segment.is_flagged() && colored_output {
            rendered.push_str(&segment.text.red().underline().to_string());
        } else if segment.is_flagged() {
            rendered.push('[');
            rendered.push_str(&segment.text);
            rendered.push(']');
        } else {
            rendered.push_str(&segment.text);
        }
    }
    println!("{}", rendered);
}

pub fn print_check_summary(total_matches: usize, files: &[impl AsRef<Path>], colored: bool) {
    println!();
    if total_matches == 0 {
        if colored {
            println!("{}", "✓ No grammar issues found!".green().bold());
        } else {
            println!("✓ No grammar issues found!");
        }
    } else {
        let issue_word = if total_matches == 1 { "issue" } else { "issues" };
        if colored {
            println!(
                "{} {} {} found in {} {}",
                "✗".red().bold(),
                total_matches.to_string().red().bold(),
                issue_word,
                files.len(),
                if files.len() == 1 { "file" } else { "files" }
            );
        } else {
            println!(
                "✗ {} {} found in {} {}",
                total_matches,
                issue_word,
                files.len(),
                if files.len() == 1 { "file" } else { "files" }
            );
        }
    }
}

pub fn print_fix_summary(total_fixed: usize, files: &[impl AsRef<Path>], colored: bool) {
    println!();
    if total_fixed == 0 {
        if colored {
            println!("{}", "No corrections needed!".green().bold());
        } else {
            println!("No corrections needed!");
        }
    } else {
        let fix_word = if total_fixed == 1 {
            "correction"
        } else {
            "corrections"
        };
        if colored {
            println!(
                "{} {} {} applied to {} {}",
                "✓".green().bold(),
                total_fixed.to_string().green().bold(),
                fix_word,
                files.len(),
                if files.len() == 1 { "file" } else { "files" }
            );
        } else {
            println!(
                "✓ {} {} applied to {} {}",
                total_fixed,
                fix_word,
                files.len(),
                if files.len() == 1 { "file" } else { "files" }
            );
        }
    }
}

pub fn print_interactive_prompt(report: &MatchReport, colored: bool) -> Option<String> {
    if colored {
        println!(
            "\n{} {}:{}",
            "Issue found:".yellow().bold(),
            report.line.to_string().blue(),
            report.column.to_string().blue()
        );
        println!("  {}", highlight_context(&report.context, &report.text));
        if !report.message.is_empty() {
            println!("  {}", report.message.dimmed());
        }
        println!("\n{}", "Suggestions:".cyan().bold());
    } else {
        println!("\nIssue found: {}:{}", report.line, report.column);
        println!("  {}", report.context);
        if !report.message.is_empty() {
            println!("  {}", report.message);
        }
        println!("\nSuggestions:");
    }

    let mut options = vec!["[s] Skip".to_string()];
    for (i, suggestion) in report.replacements.iter().take(9).enumerate() {
        if colored {
            options.push(format!("[{}] {}", i + 1, suggestion.green()));
        } else {
            options.push(format!("[{}] {}", i + 1, suggestion));
        }
    }
    options.push("[q] Quit".to_string());

    for option in &options {
        println!("  {}", option);
    }

    print!("\nChoice: ");
    use std::io::{self, Write};
    io::stdout().flush().ok()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input).ok()?;
    let input = input.trim();

    match input {
        "s" | "S" => None,
        "q" | "Q" => std::process::exit(0),
        num => {
            if let Ok(idx) = num.parse::<usize>() {
                if idx > 0 && idx <= report.replacements.len() {
                    return Some(report.replacements[idx - 1].clone());
                }
            }
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_round_trips() {
        assert!(matches!("text".parse::<OutputFormat>(), Ok(OutputFormat::Text)));
        assert!(matches!("JSON".parse::<OutputFormat>(), Ok(OutputFormat::Json)));
        assert!("yaml".parse::<OutputFormat>().is_err());
        assert_eq!(OutputFormat::Json.to_string(), "json");
    }
}
