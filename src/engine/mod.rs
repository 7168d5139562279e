use crate::annotate::{self, Segment};
use crate::cli::output::{self, OutputFormat};
use crate::services::{GrammarClient, TranslateClient};
use crate::{CheckOutcome, Config, Match, MatchReport};
use anyhow::{Context, Result};
use lazy_static::lazy_static;
use regex::Regex;
use std::fs;
use std::path::Path;
use unicode_segmentation::UnicodeSegmentation;

/// Result of one grammar pass over a text: the surviving matches and the
/// segment partition derived from them.
#[derive(Debug, Default)]
pub struct Annotated {
    pub matches: Vec<Match>,
    pub segments: Vec<Segment>,
}

/// Result of one correct-and-translate pass.
#[derive(Debug)]
pub struct Corrected {
    pub corrected: String,
    pub match_count: usize,
    pub translated: Option<String>,
}

pub struct Assistant {
    grammar: GrammarClient,
    translator: TranslateClient,
    ignore_patterns: Vec<Regex>,
}

impl Assistant {
    pub fn new(config: &Config) -> Result<Self> {
        let grammar = GrammarClient::new(config)?;
        let translator = TranslateClient::new(config.timeout_secs)?;

        // Compile ignore patterns
        let mut ignore_patterns = Vec::new();
        for pattern in &config.ignore_rules {
            match Regex::new(pattern) {
                Ok(re) => ignore_patterns.push(re),
                Err(e) => eprintln!("Warning: Invalid ignore rule '{}': {}", pattern, e),
            }
        }

        Ok(Self {
            grammar,
            translator,
            ignore_patterns,
        })
    }

    /// Run a grammar pass over `text` and partition it into segments.
    /// Whitespace-only text never reaches the service.
    pub fn annotate(&self, text: &str) -> Result<Annotated> {
        if text.trim().is_empty() {
            return Ok(Annotated::default());
        }

        let mut matches = self.grammar.check(text)?;
        matches.retain(|m| !self.should_ignore(m));
        let segments = annotate::resolve(text, &matches);

        Ok(Annotated { matches, segments })
    }

    /// Apply every non-conflicting suggestion to `text`, then translate the
    /// corrected result when `target_language` asks for one.
    pub fn correct(&self, text: &str, target_language: &str) -> Result<Corrected> {
        let annotated = self.annotate(text)?;
        let winners = winning_matches(text, &annotated.matches);
        let corrected = annotate::apply(text, &winners)?;
        let translated = self.translator.translate(&corrected, target_language)?;

        Ok(Corrected {
            corrected,
            match_count: winners.len(),
            translated,
        })
    }

    pub fn translate(&self, text: &str, target: &str) -> Result<Option<String>> {
        self.translator.translate(text, target)
    }

    pub fn check(
        &self,
        file_path: &Path,
        config: &Config,
        colored: bool,
        format: &OutputFormat,
    ) -> Result<CheckOutcome> {
        if !config.enabled {
            return Ok(CheckOutcome::default());
        }

        let content = fs::read_to_string(file_path)
            .with_context(|| format!("Failed to read file: {}", file_path.display()))?;

        // A service failure downgrades to "no result" so a check run over
        // many files keeps going.
        let annotated = match self.annotate(&content) {
            Ok(annotated) => annotated,
            Err(e) => {
                eprintln!("Warning: grammar check failed: {:#}", e);
                Annotated::default()
            }
        };

        let outcome = outcome_from_segments(&content, &annotated.segments);

        output::print_reports(file_path, &outcome, colored, format);

        Ok(outcome)
    }

    pub fn fix_auto(&self, file_path: &Path, config: &Config) -> Result<CheckOutcome> {
        if !config.enabled {
            return Ok(CheckOutcome::default());
        }

        let content = fs::read_to_string(file_path)
            .with_context(|| format!("Failed to read file: {}", file_path.display()))?;

        let annotated = self.annotate(&content)?;
        let winners = winning_matches(&content, &annotated.matches);
        if winners.is_empty() {
            return Ok(CheckOutcome::default());
        }

        let new_content = annotate::apply(&content, &winners)?;
        if new_content != content {
            fs::write(file_path, new_content)
                .with_context(|| format!("Failed to write file: {}", file_path.display()))?;
        }

        Ok(CheckOutcome {
            match_count: winners.len(),
            fixed_count: winners.len(),
            reports: Vec::new(),
        })
    }

    pub fn fix_interactive(
        &self,
        file_path: &Path,
        config: &Config,
        colored: bool,
    ) -> Result<CheckOutcome> {
        if !config.enabled {
            return Ok(CheckOutcome::default());
        }

        let content = fs::read_to_string(file_path)
            .with_context(|| format!("Failed to read file: {}", file_path.display()))?;

        let annotated = self.annotate(&content)?;
        let reports = reports_from_segments(&content, &annotated.segments);

        // Collect choices first, splice once: all offsets stay original.
        let mut chosen = Vec::new();
        for report in &reports {
            if report.replacements.is_empty() {
                continue;
            }
            if let Some(replacement) = output::print_interactive_prompt(report, colored) {
                chosen.push(Match {
                    offset: report.start,
                    length: report.end - report.start,
                    message: report.message.clone(),
                    replacements: vec![replacement],
                    rule: None,
                });
            }
        }

        if chosen.is_empty() {
            return Ok(CheckOutcome {
                match_count: reports.len(),
                fixed_count: 0,
                reports,
            });
        }

        let new_content = annotate::apply(&content, &chosen)?;
        fs::write(file_path, new_content)
            .with_context(|| format!("Failed to write file: {}", file_path.display()))?;

        Ok(CheckOutcome {
            match_count: reports.len(),
            fixed_count: chosen.len(),
            reports,
        })
    }

    fn should_ignore(&self, m: &Match) -> bool {
        self.ignore_patterns.iter().any(|re| {
            m.rule.as_deref().map(|id| re.is_match(id)).unwrap_or(false)
                || re.is_match(&m.message)
        })
    }
}

/// Reduce a possibly-overlapping match list to the disjoint set the resolver
/// would render, keeping only matches that carry a replacement. The result is
/// always safe to hand to [`annotate::apply`].
pub fn winning_matches(text: &str, matches: &[Match]) -> Vec<Match> {
    annotate::resolve(text, matches)
        .into_iter()
        .filter_map(|segment| {
            let flag = segment.flag?;
            if flag.replacements.is_empty() {
                return None;
            }
            Some(Match {
                offset: flag.start,
                length: flag.end - flag.start,
                message: flag.message,
                replacements: flag.replacements,
                rule: None,
            })
        })
        .collect()
}

/// Package the flagged segments of a resolved text as a check outcome.
/// `match_count` counts the segments actually rendered, not the raw service
/// matches, so it always equals `reports.len()`.
pub fn outcome_from_segments(text: &str, segments: &[Segment]) -> CheckOutcome {
    let reports = reports_from_segments(text, segments);
    CheckOutcome {
        match_count: reports.len(),
        fixed_count: 0,
        reports,
    }
}

/// Turn the flagged segments of a resolved text into display-ready reports.
pub fn reports_from_segments(text: &str, segments: &[Segment]) -> Vec<MatchReport> {
    segments
        .iter()
        .filter_map(|segment| {
            let flag = segment.flag.as_ref()?;
            let (line, column, line_text) = locate(text, flag.start);
            Some(MatchReport {
                start: flag.start,
                end: flag.end,
                line,
                column,
                text: segment.text.clone(),
                message: flag.message.clone(),
                replacements: flag.replacements.clone(),
                context: build_context(line_text, column - 1, flag.end - flag.start),
            })
        })
        .collect()
}

/// 1-indexed line and column (in characters) of a character offset, plus the
/// line it falls on.
fn locate(text: &str, offset: usize) -> (usize, usize, &str) {
    let mut remaining = offset;
    let mut last = (1, "");
    for (i, raw_line) in text.split('\n').enumerate() {
        let len = raw_line.chars().count();
        if remaining <= len {
            return (i + 1, remaining + 1, raw_line.trim_end_matches('\r'));
        }
        remaining -= len + 1;
        last = (i + 1, raw_line.trim_end_matches('\r'));
    }
    (last.0, 1, last.1)
}

lazy_static! {
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
}

const CONTEXT_RADIUS: usize = 20;

/// Excerpt of `line` around the flagged region starting at 0-indexed
/// character `column`, cut on grapheme boundaries and padded with ellipses.
fn build_context(line: &str, column: usize, span_len: usize) -> String {
    let graphemes: Vec<&str> = line.graphemes(true).collect();
    // columns count characters; the window is cut in graphemes
    let flag_start = grapheme_index(&graphemes, column);
    let flag_end = grapheme_index(&graphemes, column.saturating_add(span_len));
    let start = flag_start.saturating_sub(CONTEXT_RADIUS);
    let end = (flag_end + CONTEXT_RADIUS).min(graphemes.len());
    let window = WHITESPACE
        .replace_all(graphemes[start.min(end)..end].concat().trim(), " ")
        .to_string();

    match (start > 0, end < graphemes.len()) {
        (true, true) => format!("...{}...", window),
        (true, false) => format!("...{}", window),
        (false, true) => format!("{}...", window),
        (false, false) => window,
    }
}

/// Index of the grapheme containing the `char_offset`-th character.
fn grapheme_index(graphemes: &[&str], char_offset: usize) -> usize {
    let mut chars = 0;
    for (i, grapheme) in graphemes.iter().enumerate() {
        if chars >= char_offset {
            return i;
        }
        chars += grapheme.chars().count();
    }
    graphemes.len()
}
