// 🧱 View Model - styled text lines shared by the TUI and the command line
// Screens build these; ui.rs maps tones to terminal styles, main.rs prints
// them as plain text.

use crate::format::text_or_placeholder;
use crate::score::Swatch;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Default,
    Muted,
    Accent,
    Success,
    Info,
    Danger,
    Score(Swatch),
}

/// Inline message severity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Error,
}

impl Severity {
    pub fn tone(&self) -> Tone {
        match self {
            Severity::Info => Tone::Info,
            Severity::Success => Tone::Success,
            Severity::Error => Tone::Danger,
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Severity::Info => "⏳",
            Severity::Success => "✅",
            Severity::Error => "⚠️",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub severity: Severity,
    pub text: String,
}

impl Notice {
    pub fn info(text: impl Into<String>) -> Self {
        Self { severity: Severity::Info, text: text.into() }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self { severity: Severity::Success, text: text.into() }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self { severity: Severity::Error, text: text.into() }
    }
}

// ============================================================================
// LINES
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    pub text: String,
    pub tone: Tone,
    pub strong: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewLine {
    pub fragments: Vec<Fragment>,
}

impl ViewLine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn blank() -> Self {
        Self::default()
    }

    pub fn text(text: impl Into<String>, tone: Tone) -> Self {
        Self::new().push(text, tone)
    }

    pub fn push(mut self, text: impl Into<String>, tone: Tone) -> Self {
        self.fragments.push(Fragment { text: text.into(), tone, strong: false });
        self
    }

    pub fn push_strong(mut self, text: impl Into<String>, tone: Tone) -> Self {
        self.fragments.push(Fragment { text: text.into(), tone, strong: true });
        self
    }

    pub fn plain_text(&self) -> String {
        self.fragments.iter().map(|f| f.text.as_str()).collect()
    }
}

/// "Label: value", value falling back to the placeholder
pub fn info_row(label: &str, value: Option<&str>) -> ViewLine {
    info_row_toned(label, &text_or_placeholder(value), Tone::Default)
}

pub fn info_row_toned(label: &str, value: &str, tone: Tone) -> ViewLine {
    ViewLine::new()
        .push(format!("{}: ", label), Tone::Muted)
        .push_strong(value, tone)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub title: String,
    pub lines: Vec<ViewLine>,
}

impl Section {
    pub fn new(title: impl Into<String>) -> Self {
        Self { title: title.into(), lines: Vec::new() }
    }

    pub fn line(&mut self, line: ViewLine) -> &mut Self {
        self.lines.push(line);
        self
    }

    pub fn plain_text(&self) -> String {
        let mut out = format!("{}\n", self.title);
        for line in &self.lines {
            out.push_str("  ");
            out.push_str(&line.plain_text());
            out.push('\n');
        }
        out
    }
}
