//! Result reporting for taskmap commands.
//!
//! Every command builds a [`HumanOutput`] next to its serializable payload.
//! With `--json` the payload is wrapped in a `taskmap.v1` envelope on stdout
//! and the human report only contributes its warnings and next steps.

use serde::Serialize;

use crate::error::{exit_codes, Error, Result};

pub const SCHEMA_VERSION: &str = "taskmap.v1";

/// Command groups whose subcommand is part of the reported command name
const COMMAND_GROUPS: [&str; 4] = ["team", "view", "node", "task"];

/// Global flags that consume the following argument
const VALUED_FLAGS: [&str; 2] = ["--data-dir", "--store"];

#[derive(Debug, Clone, Copy)]
pub struct OutputOptions {
    pub json: bool,
    pub quiet: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Details,
    Warnings,
    NextSteps,
}

impl Section {
    const ORDER: [Section; 3] = [Section::Details, Section::Warnings, Section::NextSteps];

    fn title(self) -> &'static str {
        match self {
            Section::Details => "Details",
            Section::Warnings => "Warnings",
            Section::NextSteps => "Next steps",
        }
    }
}

/// Plain-text report: a header line, key/value facts, then bulleted sections
#[derive(Debug, Clone)]
pub struct HumanOutput {
    header: String,
    summary: Vec<(String, String)>,
    entries: Vec<(Section, String)>,
}

impl HumanOutput {
    pub fn new(header: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            summary: Vec::new(),
            entries: Vec::new(),
        }
    }

    pub fn push_summary(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.summary.push((key.into(), value.into()));
    }

    pub fn push_detail(&mut self, value: impl Into<String>) {
        self.entries.push((Section::Details, value.into()));
    }

    pub fn push_warning(&mut self, value: impl Into<String>) {
        self.entries.push((Section::Warnings, value.into()));
    }

    pub fn push_next_step(&mut self, value: impl Into<String>) {
        self.entries.push((Section::NextSteps, value.into()));
    }

    fn section(&self, section: Section) -> Vec<String> {
        self.entries
            .iter()
            .filter(|(kind, _)| *kind == section)
            .map(|(_, value)| value.clone())
            .collect()
    }
}

#[derive(Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
enum Outcome<'a, T: Serialize> {
    Success { data: &'a T },
    Error { error: ErrorBody },
}

#[derive(Serialize)]
struct ErrorBody {
    message: String,
    code: i32,
    kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
}

impl From<&Error> for ErrorBody {
    fn from(err: &Error) -> Self {
        let code = err.exit_code();
        Self {
            message: err.to_string(),
            code,
            kind: if code == exit_codes::USER_ERROR {
                "user_error"
            } else {
                "operation_failed"
            },
            details: err.details(),
        }
    }
}

#[derive(Serialize)]
struct Envelope<'a, T: Serialize> {
    schema_version: &'static str,
    command: &'a str,
    #[serde(flatten)]
    outcome: Outcome<'a, T>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    warnings: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    next_steps: Vec<String>,
}

impl<'a, T: Serialize> Envelope<'a, T> {
    fn print(&self) -> Result<()> {
        println!("{}", serde_json::to_string_pretty(self)?);
        Ok(())
    }
}

pub fn emit_success<T: Serialize>(
    options: OutputOptions,
    command: &str,
    data: &T,
    human: Option<&HumanOutput>,
) -> Result<()> {
    if options.json {
        return Envelope {
            schema_version: SCHEMA_VERSION,
            command,
            outcome: Outcome::Success { data },
            warnings: human.map(|h| h.section(Section::Warnings)).unwrap_or_default(),
            next_steps: human.map(|h| h.section(Section::NextSteps)).unwrap_or_default(),
        }
        .print();
    }

    match human {
        Some(human) if !options.quiet => println!("{}", format_human(human)),
        _ => {}
    }
    Ok(())
}

/// Report a failed command: an error envelope on stdout, or `error:`/`hint:` on stderr
pub fn emit_error(command: &str, err: &Error, json: bool) -> Result<()> {
    let next_steps = recovery_steps(err);
    if json {
        return Envelope::<()> {
            schema_version: SCHEMA_VERSION,
            command,
            outcome: Outcome::Error {
                error: ErrorBody::from(err),
            },
            warnings: Vec::new(),
            next_steps,
        }
        .print();
    }

    eprintln!("error: {err}");
    if let Some(hint) = next_steps.first() {
        eprintln!("hint: {hint}");
    }
    Ok(())
}

pub fn format_human(output: &HumanOutput) -> String {
    let mut lines = vec![output.header.clone()];

    if !output.summary.is_empty() {
        lines.push(String::new());
        lines.push("Summary:".to_string());
        lines.extend(output.summary.iter().map(|(key, value)| {
            if value.is_empty() {
                format!("- {key}")
            } else {
                format!("- {key}: {value}")
            }
        }));
    }

    for section in Section::ORDER {
        let items = output.section(section);
        if items.is_empty() {
            continue;
        }
        lines.push(String::new());
        lines.push(format!("{}:", section.title()));
        lines.extend(items.iter().map(|item| format!("- {item}")));
    }

    lines.join("\n")
}

pub fn infer_command_name_from_args() -> String {
    command_name_from(std::env::args().skip(1))
}

/// `"team select"`, `"graph"`, ... from raw arguments (program name excluded)
pub fn command_name_from<I>(args: I) -> String
where
    I: IntoIterator<Item = String>,
{
    let mut words = Vec::with_capacity(2);
    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        if VALUED_FLAGS.contains(&arg.as_str()) {
            args.next();
        } else if !arg.starts_with('-') {
            words.push(arg);
            let grouped = COMMAND_GROUPS.contains(&words[0].as_str());
            if words.len() == 2 || !grouped {
                break;
            }
        }
    }

    if words.is_empty() {
        "taskmap".to_string()
    } else {
        words.join(" ")
    }
}

fn recovery_steps(err: &Error) -> Vec<String> {
    let step = match err {
        Error::TeamNotFound(_) => "taskmap team list",
        Error::TaskNotFound(_) => "taskmap graph",
        Error::FeedLoad { .. } => "check tasks.json and teams.json in --data-dir",
        Error::InvalidConfig(_) => "fix .taskmap.toml then retry",
        Error::LockFailed(_) => "retry once the other taskmap process exits",
        _ => return Vec::new(),
    };
    vec![step.to_string()]
}
