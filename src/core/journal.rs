use ansi_term::Colour;
use chrono::{DateTime, Local};
use regex::Regex;
use std::sync::OnceLock;

const MAX_OP_WIDTH: usize = 60;

fn ansi_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\x1B\[[0-9;]*[mK]").expect("valid ANSI pattern"))
}

fn strip_ansi(s: &str) -> String {
    ansi_re().replace_all(s, "").into_owned()
}

/// ANSI colour for each journal operation.
fn color_for_operation(op: &str) -> Colour {
    match op {
        "import" => Colour::Green,
        "insert" => Colour::Cyan,
        "edit" => Colour::Yellow,
        "export" => Colour::Blue,
        "reload" => Colour::RGB(255, 153, 51),
        "error" => Colour::Red,
        _ => Colour::White,
    }
}

#[derive(Debug, Clone)]
pub struct JournalEntry {
    pub timestamp: DateTime<Local>,
    pub operation: String,
    pub target: String,
    pub message: String,
}

/// In-memory record of the actions applied during a session.
#[derive(Debug, Default, Clone)]
pub struct Journal {
    entries: Vec<JournalEntry>,
}

impl Journal {
    pub fn record(&mut self, operation: &str, target: &str, message: impl Into<String>) {
        self.entries.push(JournalEntry {
            timestamp: Local::now(),
            operation: operation.to_string(),
            target: target.to_string(),
            message: message.into(),
        });
    }

    pub fn entries(&self) -> &[JournalEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// One line per entry: `id: timestamp | op (target) => message`.
    pub fn render(&self, color: bool) -> String {
        let id_w = self.entries.len().to_string().len();

        let op_targets: Vec<String> = self
            .entries
            .iter()
            .map(|e| {
                if e.target.is_empty() {
                    e.operation.clone()
                } else {
                    format!("{} ({})", e.operation, e.target)
                }
            })
            .collect();

        let op_w = op_targets
            .iter()
            .map(|s| s.chars().count())
            .max()
            .unwrap_or(10)
            .min(MAX_OP_WIDTH);

        let mut out = String::new();

        for (i, (entry, op_target)) in self.entries.iter().zip(op_targets).enumerate() {
            let visible = if op_target.chars().count() > MAX_OP_WIDTH {
                let mut s: String = op_target.chars().take(MAX_OP_WIDTH - 3).collect();
                s.push_str("...");
                s
            } else {
                op_target
            };

            // only the operation word is coloured
            let shown = if color {
                let paint = color_for_operation(&entry.operation);
                match visible.split_once(' ') {
                    Some((op, rest)) => format!("{} {}", paint.paint(op), rest),
                    None => paint.paint(visible.as_str()).to_string(),
                }
            } else {
                visible
            };

            let padding = " ".repeat(op_w.saturating_sub(strip_ansi(&shown).chars().count()));

            out.push_str(&format!(
                "{:>id_w$}: {} | {}{} => {}\n",
                i + 1,
                entry.timestamp.format("%FT%T%:z"),
                shown,
                padding,
                entry.message,
                id_w = id_w,
            ));
        }

        out
    }
}
