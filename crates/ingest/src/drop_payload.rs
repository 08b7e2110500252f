//! Decoding of drag-and-drop payload strings.
//!
//! Platforms deliver dropped paths in several shapes: Tk-style brace lists
//! (`{C:\a b.txt} {C:\c.txt}`), `text/uri-list`-like newline lists, plain space
//! separated tokens, or one bare path. There is no grammar to pick the shape up
//! front, so the parser walks an ordered list of [`PayloadRule`]s and the first rule
//! that recognises the payload decides the candidates.

use crate::file_set::absolute_path;
use regex::Regex;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

fn brace_or_token() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\{([^{}]*)\}|(\S+)").expect("brace regex is valid"))
}

/// One structural interpretation of a drop payload.
pub trait PayloadRule: Send + Sync {
    fn name(&self) -> &'static str;

    /// Candidate paths when the rule recognises `payload`, `None` to defer to the next rule.
    fn extract(&self, payload: &str) -> Option<Vec<String>>;
}

/// `{path}` with exactly one brace pair.
pub struct SingleBraceRule;

impl PayloadRule for SingleBraceRule {
    fn name(&self) -> &'static str {
        "single_brace"
    }

    fn extract(&self, payload: &str) -> Option<Vec<String>> {
        let trimmed = payload.trim();
        if !(trimmed.starts_with('{') && trimmed.ends_with('}')) {
            return None;
        }
        if trimmed.matches('{').count() != 1 || trimmed.matches('}').count() != 1 {
            return None;
        }
        let inner = strip_quotes(&trimmed[1..trimmed.len() - 1]);
        Some(non_empty(vec![inner.to_string()]))
    }
}

/// `{path1} {path2} bare3`: every brace group, plus bare tokens between groups.
pub struct BraceGroupsRule;

impl PayloadRule for BraceGroupsRule {
    fn name(&self) -> &'static str {
        "brace_groups"
    }

    fn extract(&self, payload: &str) -> Option<Vec<String>> {
        if !(payload.contains('{') && payload.contains('}')) {
            return None;
        }
        let mut saw_group = false;
        let mut out = Vec::new();
        for caps in brace_or_token().captures_iter(payload) {
            if let Some(group) = caps.get(1) {
                saw_group = true;
                out.push(strip_quotes(group.as_str()).to_string());
            } else if let Some(token) = caps.get(2) {
                out.push(strip_quotes(token.as_str()).to_string());
            }
        }
        saw_group.then(|| non_empty(out))
    }
}

/// The whole payload is a path that exists as-is, spaces included.
pub struct ExistingPathRule;

impl PayloadRule for ExistingPathRule {
    fn name(&self) -> &'static str {
        "existing_path"
    }

    fn extract(&self, payload: &str) -> Option<Vec<String>> {
        let candidate = strip_quotes(payload);
        if candidate.is_empty() || !Path::new(candidate).exists() {
            return None;
        }
        Some(vec![candidate.to_string()])
    }
}

/// One path per line, any line-break flavour.
pub struct LinesRule;

impl PayloadRule for LinesRule {
    fn name(&self) -> &'static str {
        "lines"
    }

    fn extract(&self, payload: &str) -> Option<Vec<String>> {
        if !payload.contains(is_line_break) {
            return None;
        }
        Some(existing_only(payload.split(is_line_break).map(strip_quotes)))
    }
}

/// Whitespace separated tokens on a single line.
pub struct TokensRule;

impl PayloadRule for TokensRule {
    fn name(&self) -> &'static str {
        "tokens"
    }

    fn extract(&self, payload: &str) -> Option<Vec<String>> {
        if !payload.trim().contains(char::is_whitespace) {
            return None;
        }
        Some(existing_only(payload.split_whitespace().map(strip_quotes)))
    }
}

/// Last resort: the trimmed, unquoted payload as one candidate.
pub struct WholePayloadRule;

impl PayloadRule for WholePayloadRule {
    fn name(&self) -> &'static str {
        "whole"
    }

    fn extract(&self, payload: &str) -> Option<Vec<String>> {
        Some(non_empty(vec![strip_quotes(payload).to_string()]))
    }
}

pub struct DropPayloadParser {
    rules: Vec<Box<dyn PayloadRule>>,
}

impl Default for DropPayloadParser {
    fn default() -> Self {
        Self::new()
    }
}

impl DropPayloadParser {
    pub fn new() -> Self {
        Self::with_rules(vec![
            Box::new(SingleBraceRule),
            Box::new(BraceGroupsRule),
            Box::new(ExistingPathRule),
            Box::new(LinesRule),
            Box::new(TokensRule),
            Box::new(WholePayloadRule),
        ])
    }

    pub fn with_rules(rules: Vec<Box<dyn PayloadRule>>) -> Self {
        Self { rules }
    }

    /// Existing regular files named by `raw` as absolute paths, deduplicated in
    /// first-seen order. Unrecognisable or empty payloads give an empty list.
    pub fn parse(&self, raw: &str) -> Vec<PathBuf> {
        let Some((rule, candidates)) = self.extract(raw) else {
            return Vec::new();
        };

        let mut seen = HashSet::new();
        let mut files = Vec::new();
        for candidate in candidates {
            let path = absolute_path(Path::new(&candidate));
            if !path.is_file() {
                log::debug!("Drop candidate {} is not a file", path.display());
                continue;
            }
            if seen.insert(path.clone()) {
                files.push(path);
            }
        }
        log::debug!("Drop payload matched {rule}: {} file(s)", files.len());
        files
    }

    /// Name of the rule that recognises `raw`, if any.
    pub fn matched_rule(&self, raw: &str) -> Option<&'static str> {
        self.extract(raw).map(|(rule, _)| rule)
    }

    fn extract(&self, raw: &str) -> Option<(&'static str, Vec<String>)> {
        if raw.trim().is_empty() {
            return None;
        }
        self.rules
            .iter()
            .find_map(|rule| rule.extract(raw).map(|found| (rule.name(), found)))
    }
}

/// `\r\n` splits into an empty piece between the two, which `existing_only` drops.
fn is_line_break(c: char) -> bool {
    c == '\n' || c == '\r'
}

fn strip_quotes(raw: &str) -> &str {
    raw.trim().trim_matches('"').trim()
}

fn non_empty(candidates: Vec<String>) -> Vec<String> {
    candidates.into_iter().filter(|c| !c.is_empty()).collect()
}

fn existing_only<'a>(candidates: impl Iterator<Item = &'a str>) -> Vec<String> {
    candidates
        .filter(|c| !c.is_empty() && Path::new(c).exists())
        .map(str::to_string)
        .collect()
}
