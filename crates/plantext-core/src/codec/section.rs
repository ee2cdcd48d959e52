//! Section grammar and cursor: the generic line-oriented state machine shared
//! by every per-document codec.
//!
//! A [`SectionScanner`] makes a single pass over the lines of an editable
//! document. It recognizes header lines from a fixed per-document vocabulary,
//! captures the content between headers into a line buffer, and finalizes the
//! buffer whenever a new header (or the end of input) closes the section:
//! consecutive blank lines collapse to one, leading and trailing blanks are
//! trimmed, and the remainder is newline-joined.
//!
//! Header recognition is an exact string match against the vocabulary, not a
//! general markup parser. What happens to header-*shaped* lines outside the
//! vocabulary is a per-scanner policy: legacy free-form bodies treat them as
//! ordinary content, while the structured formats promote them to custom
//! sections ([`UnknownHeaders`]).

use log::debug;

/// Syntactic shape that identifies a header line, independent of vocabulary.
#[derive(Debug, Clone, Copy)]
pub enum HeaderShape {
    /// `## Header` lines, used at the top level of structured documents.
    Markdown,
    /// Non-indented `Header:` lines (colon last on the line), used for
    /// subsections inside section bodies.
    Colon,
}

impl HeaderShape {
    /// Extracts the header text if `line` has this shape.
    fn extract<'a>(&self, line: &'a str) -> Option<&'a str> {
        match self {
            HeaderShape::Markdown => {
                let header = line.strip_prefix("## ")?.trim();
                (!header.is_empty()).then_some(header)
            }
            HeaderShape::Colon => {
                if line.starts_with(' ') || line.starts_with('\t') {
                    return None;
                }
                let header = line.trim_end().strip_suffix(':')?.trim();
                (!header.is_empty()).then_some(header)
            }
        }
    }
}

/// Policy for header-shaped lines that are not in the vocabulary.
#[derive(Debug, Clone, Copy)]
pub enum UnknownHeaders {
    /// Treat as ordinary content (legacy free-form bodies).
    Content,
    /// Close the current section and capture the body under the unknown
    /// header (structured formats; promoted to `custom` by the codecs).
    Capture,
}

/// Content-capture mode for section bodies.
#[derive(Debug, Clone, Copy)]
pub enum Capture {
    /// Expects a fixed indent prefix and strips it. A non-matching but
    /// still-indented line is kept with its surrounding whitespace trimmed
    /// (inner spacing preserved); a non-indented line is captured verbatim
    /// as a fallback.
    Indented(usize),
    /// Captured verbatim.
    Freeform,
}

/// Identity of a finalized section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionKey {
    /// Vocabulary match; carries the vocabulary entry.
    Known(&'static str),
    /// Unknown header captured under [`UnknownHeaders::Capture`]; carries the
    /// raw header text.
    Custom(String),
}

/// Result of one scanner pass.
#[derive(Debug, Default)]
pub struct Scan {
    /// Content that appeared before any header (stray prose).
    pub preamble: String,
    /// Finalized sections in document order.
    pub sections: Vec<(SectionKey, String)>,
    /// Values of matched scalar lines, in document order.
    pub scalars: Vec<(&'static str, String)>,
}

impl Scan {
    /// Returns the body of the section with the given vocabulary key.
    /// Duplicate headers were already merged into one body at scan time.
    pub fn section(&self, key: &str) -> Option<&str> {
        self.sections.iter().find_map(|(k, body)| match k {
            SectionKey::Known(v) if *v == key => Some(body.as_str()),
            _ => None,
        })
    }

    /// Returns the last value recorded for a scalar key.
    pub fn scalar(&self, key: &str) -> Option<&str> {
        self.scalars
            .iter()
            .rev()
            .find_map(|(k, v)| (*k == key).then_some(v.as_str()))
    }
}

/// Single-pass line scanner with a fixed header vocabulary.
pub struct SectionScanner {
    shape: HeaderShape,
    vocab: &'static [&'static str],
    scalars: &'static [&'static str],
    unknown: UnknownHeaders,
    capture: Capture,
}

impl SectionScanner {
    /// Creates a scanner over the given vocabulary.
    pub fn new(
        shape: HeaderShape,
        vocab: &'static [&'static str],
        unknown: UnknownHeaders,
        capture: Capture,
    ) -> Self {
        Self {
            shape,
            vocab,
            scalars: &[],
            unknown,
            capture,
        }
    }

    /// Adds fixed-pattern scalar line keys (`Key: value`, non-indented).
    /// A matched scalar line closes the current section.
    pub fn with_scalars(mut self, scalars: &'static [&'static str]) -> Self {
        self.scalars = scalars;
        self
    }

    /// Runs the scanner over `text`.
    pub fn scan(&self, text: &str) -> Scan {
        let mut scan = Scan::default();
        let mut current: Option<SectionKey> = None;
        let mut buffer: Vec<String> = Vec::new();

        for line in text.lines() {
            if let Some((key, value)) = self.match_scalar(line) {
                Self::close(&mut scan, &mut current, &mut buffer);
                scan.scalars.push((key, value));
                continue;
            }

            if let Some(header) = self.shape.extract(line) {
                if let Some(known) = self.vocab.iter().find(|v| **v == header) {
                    Self::close(&mut scan, &mut current, &mut buffer);
                    current = Some(SectionKey::Known(known));
                    continue;
                }
                if matches!(self.unknown, UnknownHeaders::Capture) {
                    debug!("capturing unknown header as custom section: {header}");
                    Self::close(&mut scan, &mut current, &mut buffer);
                    current = Some(SectionKey::Custom(header.to_string()));
                    continue;
                }
                // UnknownHeaders::Content: falls through as an ordinary line.
            }

            buffer.push(self.capture_line(line));
        }

        Self::close(&mut scan, &mut current, &mut buffer);
        scan
    }

    fn match_scalar(&self, line: &str) -> Option<(&'static str, String)> {
        if line.starts_with(' ') || line.starts_with('\t') {
            return None;
        }
        self.scalars.iter().find_map(|key| {
            line.strip_prefix(key)
                .and_then(|rest| rest.strip_prefix(':'))
                .map(|value| (*key, value.trim().to_string()))
        })
    }

    fn capture_line(&self, line: &str) -> String {
        match self.capture {
            Capture::Freeform => line.to_string(),
            Capture::Indented(width) => {
                if line.trim().is_empty() {
                    String::new()
                } else if let Some(stripped) = strip_indent(line, width) {
                    stripped.to_string()
                } else if line.starts_with(' ') || line.starts_with('\t') {
                    // Indented, but not by the expected prefix.
                    line.trim().to_string()
                } else {
                    // Non-indented fallback: keep verbatim.
                    line.to_string()
                }
            }
        }
    }

    fn close(scan: &mut Scan, current: &mut Option<SectionKey>, buffer: &mut Vec<String>) {
        let body = finalize(buffer);
        buffer.clear();
        match current.take() {
            // A repeated header merges into the earlier body rather than
            // shadowing it.
            Some(key) => match scan.sections.iter().position(|(k, _)| *k == key) {
                Some(pos) => {
                    if !body.is_empty() {
                        let existing = &mut scan.sections[pos].1;
                        if !existing.is_empty() {
                            existing.push_str("\n\n");
                        }
                        existing.push_str(&body);
                    }
                }
                None => scan.sections.push((key, body)),
            },
            None => {
                if !body.is_empty() {
                    if !scan.preamble.is_empty() {
                        scan.preamble.push_str("\n\n");
                    }
                    scan.preamble.push_str(&body);
                }
            }
        }
    }
}

fn strip_indent(line: &str, width: usize) -> Option<&str> {
    let prefix: String = " ".repeat(width);
    line.strip_prefix(prefix.as_str())
}

/// Finalizes a line buffer: collapses consecutive blank lines to one, trims
/// leading and trailing blank lines, and joins the rest with newlines.
pub fn finalize(lines: &[String]) -> String {
    let mut out: Vec<&str> = Vec::with_capacity(lines.len());
    let mut last_blank = false;
    for line in lines {
        let blank = line.trim().is_empty();
        if blank {
            if last_blank || out.is_empty() {
                continue;
            }
        }
        out.push(if blank { "" } else { line.as_str() });
        last_blank = blank;
    }
    while out.last().is_some_and(|line| line.is_empty()) {
        out.pop();
    }
    out.join("\n")
}

/// Canonicalizes free text the way section finalization does: trailing
/// whitespace trimmed per line, blank runs collapsed, outer blanks removed.
pub fn canonical_text(text: &str) -> String {
    let lines: Vec<String> = text.lines().map(|line| line.trim_end().to_string()).collect();
    finalize(&lines)
}

/// Normalizes a header into a custom-field key: lowercase, non-alphanumeric
/// characters stripped, whitespace runs become a single underscore, leading
/// and trailing underscores trimmed.
///
/// The reverse transform ([`header_from_key`]) is lossy by design.
pub fn normalize_header(header: &str) -> String {
    let mut key = String::with_capacity(header.len());
    let mut pending_sep = false;
    for c in header.to_lowercase().chars() {
        if c.is_alphanumeric() {
            if pending_sep && !key.is_empty() {
                key.push('_');
            }
            pending_sep = false;
            key.push(c);
        } else if c.is_whitespace() {
            pending_sep = true;
        }
        // Other punctuation is dropped without acting as a separator.
    }
    key
}

/// Approximate inverse of [`normalize_header`]: underscores become spaces and
/// the first letter is capitalized. Punctuation lost during normalization
/// does not come back.
pub fn header_from_key(key: &str) -> String {
    let mut header = key.replace('_', " ");
    if let Some(first) = header.chars().next() {
        let upper = first.to_uppercase().to_string();
        header.replace_range(..first.len_utf8(), &upper);
    }
    header
}

/// Parses a checkbox line: `[x] Label`, `[X] Label`, or `[ ] Label`.
/// Returns the checked state and the label.
pub fn checkbox_line(line: &str) -> Option<(bool, &str)> {
    let line = line.trim_start();
    if let Some(rest) = line.strip_prefix("[x]").or_else(|| line.strip_prefix("[X]")) {
        return Some((true, rest.trim()));
    }
    line.strip_prefix("[ ]").map(|rest| (false, rest.trim()))
}

/// Returns the label of the last checked box in a checkbox group body.
/// Multiple checked boxes are not validated; the last match wins. No checked
/// box means no value is selected.
pub fn last_checked_label(body: &str) -> Option<&str> {
    body.lines()
        .filter_map(checkbox_line)
        .filter(|(checked, _)| *checked)
        .map(|(_, label)| label)
        .last()
}

/// Renders a checkbox group, one option per line at the given indent.
pub fn render_checkbox_group(options: &[&str], selected: &str, indent: usize) -> String {
    let pad = " ".repeat(indent);
    options
        .iter()
        .map(|option| {
            let mark = if *option == selected { 'x' } else { ' ' };
            format!("{pad}[{mark}] {option}")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Line-oriented writer counterpart to the scanner.
///
/// Keeps the rendered form canonical: lines lose trailing whitespace and
/// [`TextDoc::blank`] never produces more than one consecutive blank line,
/// so rendering is a fixed point of scan-then-render.
#[derive(Debug, Default)]
pub struct TextDoc(String);

impl TextDoc {
    /// Creates an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one line, trimming trailing whitespace.
    pub fn line(&mut self, line: &str) {
        self.0.push_str(line.trim_end());
        self.0.push('\n');
    }

    /// Appends a multi-line block, line by line. Empty blocks add nothing.
    pub fn block(&mut self, block: &str) {
        for line in block.lines() {
            self.line(line);
        }
    }

    /// Ensures exactly one blank line separates what came before from what
    /// comes next.
    pub fn blank(&mut self) {
        if !self.0.is_empty() && !self.0.ends_with("\n\n") {
            self.0.push('\n');
        }
    }

    /// Finishes the document.
    pub fn into_string(self) -> String {
        self.0
    }
}

/// Indents every non-empty line of a block by `width` spaces. Blank lines
/// stay empty so finalization keeps treating them as blanks.
pub fn indent_block(text: &str, width: usize) -> String {
    let pad = " ".repeat(width);
    text.lines()
        .map(|line| {
            if line.trim().is_empty() {
                String::new()
            } else {
                format!("{pad}{line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Leniently parses a numeric value: takes the leading number and ignores
/// trailing units such as `h`, `hours`, or `%`. Unparseable input yields 0.
pub fn lenient_number(text: &str) -> f64 {
    let text = text.trim();
    let end = text
        .find(|c: char| !(c.is_ascii_digit() || c == '.' || c == '-' || c == '+'))
        .unwrap_or(text.len());
    text[..end].parse().unwrap_or(0.0)
}

/// Leniently parses a non-negative integer count; unparseable input yields 0.
pub fn lenient_count(text: &str) -> u32 {
    let text = text.trim();
    let end = text
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(text.len());
    text[..end].parse().unwrap_or(0)
}
