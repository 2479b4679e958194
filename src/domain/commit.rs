use regex::Regex;
use std::sync::OnceLock;
use thiserror::Error;

/// Title of the footer note that forces a major bump
pub const BREAKING_CHANGE: &str = "BREAKING CHANGE";

/// A commit as returned by the host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    pub id: String,
    pub message: String,
}

impl Commit {
    pub fn new(id: impl Into<String>, message: impl Into<String>) -> Self {
        Commit {
            id: id.into(),
            message: message.into(),
        }
    }

    /// First seven characters of the commit id
    pub fn short_id(&self) -> &str {
        match self.id.char_indices().nth(7) {
            Some((idx, _)) => &self.id[..idx],
            None => &self.id,
        }
    }

    /// First line of the message
    pub fn summary(&self) -> &str {
        self.message.lines().next().unwrap_or("")
    }
}

/// A footer trailer such as `BREAKING CHANGE: ...` or `Refs #42`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    pub title: String,
    pub text: String,
}

/// Why a message is not a conventional commit
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommitParseError {
    #[error("empty commit message")]
    Empty,

    #[error("header '{0}' does not match 'type(scope): subject'")]
    InvalidHeader(String),
}

/// Parsed representation of a conventional commit message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommit {
    pub r#type: String,
    pub scope: Option<String>,
    pub subject: String,
    pub body: Option<String>,
    pub notes: Vec<Note>,
    /// `!` right before the colon in the header
    pub breaking_marker: bool,
}

fn header_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(?P<type>[A-Za-z][\w-]*)(?:\((?P<scope>[^()]*)\))?(?P<bang>!)?: (?P<subject>.*\S.*)$")
            .expect("header pattern is valid")
    })
}

fn breaking_note_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(?P<title>BREAKING[ -]CHANGE):\s?(?P<text>.*)$")
            .expect("breaking note pattern is valid")
    })
}

fn trailer_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(?P<title>[A-Za-z][\w-]*)(?:: | #)(?P<text>.*)$")
            .expect("trailer pattern is valid")
    })
}

impl ParsedCommit {
    /// Parse a commit message according to the conventional commits format:
    ///
    /// ```text
    /// type(scope)!: subject
    ///
    /// body
    ///
    /// BREAKING CHANGE: note text
    /// Refs #123
    /// ```
    ///
    /// Scope, `!`, body and notes are optional. `BREAKING CHANGE` notes are
    /// recognised anywhere after the header and `BREAKING-CHANGE` is stored
    /// under the same title; other trailers only when they open a paragraph
    /// or follow another note.
    pub fn parse(message: &str) -> Result<Self, CommitParseError> {
        let mut lines = message.lines().skip_while(|l| l.trim().is_empty());
        let header = lines.next().ok_or(CommitParseError::Empty)?.trim_end();

        let captures = header_regex()
            .captures(header)
            .ok_or_else(|| CommitParseError::InvalidHeader(header.to_string()))?;

        let r#type = captures["type"].to_string();
        let scope = captures
            .name("scope")
            .map(|m| m.as_str().trim().to_string())
            .filter(|s| !s.is_empty());
        let breaking_marker = captures.name("bang").is_some();
        let subject = captures["subject"].trim().to_string();

        let mut body_lines: Vec<&str> = Vec::new();
        let mut notes: Vec<Note> = Vec::new();
        let mut previous_blank = true;

        for line in lines {
            if line.starts_with('#') {
                continue;
            }

            let note_start = breaking_note_regex().captures(line).or_else(|| {
                if previous_blank || !notes.is_empty() {
                    trailer_regex().captures(line)
                } else {
                    None
                }
            });

            if let Some(caps) = note_start {
                let title = match &caps["title"] {
                    "BREAKING-CHANGE" => BREAKING_CHANGE,
                    title => title,
                };
                notes.push(Note {
                    title: title.to_string(),
                    text: caps["text"].trim().to_string(),
                });
            } else if let Some(note) = notes.last_mut() {
                if !line.trim().is_empty() {
                    if !note.text.is_empty() {
                        note.text.push('\n');
                    }
                    note.text.push_str(line.trim());
                }
            } else {
                body_lines.push(line);
            }

            previous_blank = line.trim().is_empty();
        }

        let body = body_lines.join("\n").trim().to_string();

        Ok(ParsedCommit {
            r#type,
            scope,
            subject,
            body: if body.is_empty() { None } else { Some(body) },
            notes,
            breaking_marker,
        })
    }

    /// Whether a `BREAKING CHANGE` (or `BREAKING-CHANGE`) footer note is present
    pub fn has_breaking_change_note(&self) -> bool {
        self.notes.iter().any(|note| note.title == BREAKING_CHANGE)
    }
}
