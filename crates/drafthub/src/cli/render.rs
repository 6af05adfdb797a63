//! # Rendering Module
//!
//! Turns command results into terminal text. Every function here returns a
//! `String`; the handlers in `commands.rs` decide when to print it.
//!
//! ## Draft List Layout
//!
//! ```text
//!   1. Hello World content of the post…             1718000000000
//! └idx┘└ title (bold) + body preview (muted), fill ┘ └── id ──────┘
//! ```
//!
//! The line is exactly [`LINE_WIDTH`] columns wide. Width math is Unicode
//! aware (`unicode-width`), so wide characters do not break alignment.
//!
//! ## Markdown
//!
//! [`render_markdown`] walks pulldown-cmark events and writes styled plain text:
//! headings underlined, lists with bullets or numbers, quotes behind a bar, code
//! indented, link targets shown after the link text. Raw HTML is dropped.

use super::styles::Theme;
use console::Style;
use drafthubapp::commands::{CmdMessage, MessageLevel};
use drafthubapp::model::Draft;
use pulldown_cmark::{Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub const LINE_WIDTH: usize = 100;
/// Millisecond ids are 13 digits; leave room to grow.
const ID_WIDTH: usize = 15;
const MIN_UNDERLINE: usize = 3;

pub fn render_messages(messages: &[CmdMessage]) -> String {
    let theme = Theme::new();
    let mut out = String::new();
    for message in messages {
        let style = match message.level {
            MessageLevel::Info => &theme.info,
            MessageLevel::Success => &theme.success,
            MessageLevel::Warning => &theme.warning,
            MessageLevel::Error => &theme.error,
        };
        out.push_str(&format!("{}\n", style.apply_to(&message.content)));
    }
    out
}

pub fn print_messages(messages: &[CmdMessage]) {
    print!("{}", render_messages(messages));
}

pub fn render_draft_list(drafts: &[Draft]) -> String {
    let theme = Theme::new();
    if drafts.is_empty() {
        return format!("{}\n", theme.muted.apply_to("No drafts."));
    }

    let mut out = String::new();
    for (i, draft) in drafts.iter().enumerate() {
        let index = format!("{:>3}. ", i + 1);
        let available = LINE_WIDTH.saturating_sub(index.width() + 1 + ID_WIDTH);

        let title = truncate_to_width(&draft.title, available);
        let mut used = title.width();

        let mut preview = String::new();
        let room = available.saturating_sub(used + 1);
        if room > 0 {
            let body = single_line(&draft.body);
            if !body.is_empty() {
                preview = truncate_to_width(&body, room);
                used += 1 + preview.width();
            }
        }

        out.push_str(&format!(
            "{}{}{}{}{} {}\n",
            theme.index.apply_to(&index),
            theme.title.apply_to(&title),
            if preview.is_empty() { "" } else { " " },
            theme.muted.apply_to(&preview),
            " ".repeat(available.saturating_sub(used)),
            theme.muted.apply_to(format!("{:>width$}", draft.id, width = ID_WIDTH)),
        ));
    }
    out
}

pub fn render_config(entries: &[(&str, String)]) -> String {
    let theme = Theme::new();
    entries
        .iter()
        .map(|(key, value)| format!("{} = {}\n", theme.config_key.apply_to(key), value))
        .collect()
}

pub fn render_banner(text: &str) -> String {
    format!("{}\n", Theme::new().success.bold().apply_to(text))
}

fn single_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}

pub fn render_markdown(markdown: &str) -> String {
    let theme = Theme::new();
    let mut writer = MarkdownWriter::new(&theme);
    let options = Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS;
    for event in Parser::new_ext(markdown, options) {
        writer.event(event);
    }
    writer.finish()
}

struct MarkdownWriter<'t> {
    theme: &'t Theme,
    out: String,
    line_start: bool,
    needs_blank: bool,
    quote_depth: usize,
    lists: Vec<Option<u64>>,
    heading: Option<HeadingLevel>,
    heading_text: String,
    strong: usize,
    emphasis: usize,
    strike: usize,
    code_block: bool,
    link: Option<String>,
    link_text: String,
}

impl<'t> MarkdownWriter<'t> {
    fn new(theme: &'t Theme) -> Self {
        Self {
            theme,
            out: String::new(),
            line_start: true,
            needs_blank: false,
            quote_depth: 0,
            lists: Vec::new(),
            heading: None,
            heading_text: String::new(),
            strong: 0,
            emphasis: 0,
            strike: 0,
            code_block: false,
            link: None,
            link_text: String::new(),
        }
    }

    fn event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start(tag),
            Event::End(end) => self.end(end),
            Event::Text(text) => self.text(&text),
            Event::Code(code) => {
                let styled = self.theme.code.apply_to(format!("`{}`", code)).to_string();
                self.push_inline(&styled);
            }
            Event::SoftBreak => self.push_inline(" "),
            Event::HardBreak => self.newline(),
            Event::Rule => {
                self.block_start();
                self.ensure_newline();
                let rule = self.theme.muted.apply_to("─".repeat(40)).to_string();
                self.push_inline(&rule);
                self.newline();
                self.needs_blank = true;
            }
            Event::TaskListMarker(done) => self.push_inline(if done { "[x] " } else { "[ ] " }),
            _ => {}
        }
    }

    fn start(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Paragraph => self.block_start(),
            Tag::Heading { level, .. } => {
                self.block_start();
                self.heading = Some(level);
                self.heading_text.clear();
                if level > HeadingLevel::H2 {
                    let marker = format!("{} ", "#".repeat(level as usize));
                    let styled = self.theme.muted.apply_to(marker).to_string();
                    self.push_inline(&styled);
                }
            }
            Tag::BlockQuote { .. } => {
                self.block_start();
                self.quote_depth += 1;
            }
            Tag::CodeBlock(_) => {
                self.block_start();
                self.ensure_newline();
                self.code_block = true;
            }
            Tag::List(start) => {
                if self.lists.is_empty() {
                    self.block_start();
                } else {
                    self.ensure_newline();
                }
                self.lists.push(start);
            }
            Tag::Item => {
                self.ensure_newline();
                self.needs_blank = false;
                let depth = self.lists.len().saturating_sub(1);
                let marker = match self.lists.last_mut() {
                    Some(Some(n)) => {
                        let marker = format!("{}. ", n);
                        *n += 1;
                        marker
                    }
                    _ => "• ".to_string(),
                };
                let styled = format!(
                    "{}{}",
                    "  ".repeat(depth),
                    self.theme.index.apply_to(marker)
                );
                self.push_inline(&styled);
            }
            Tag::Emphasis => self.emphasis += 1,
            Tag::Strong => self.strong += 1,
            Tag::Strikethrough => self.strike += 1,
            Tag::Link { dest_url, .. } | Tag::Image { dest_url, .. } => {
                self.link = Some(dest_url.to_string());
                self.link_text.clear();
            }
            _ => {}
        }
    }

    fn end(&mut self, end: TagEnd) {
        match end {
            TagEnd::Paragraph => {
                self.ensure_newline();
                self.needs_blank = true;
            }
            TagEnd::Heading(level) => {
                self.ensure_newline();
                if level <= HeadingLevel::H2 {
                    let ch = if level == HeadingLevel::H1 { "═" } else { "─" };
                    let len = self.heading_text.width().max(MIN_UNDERLINE);
                    let underline = self.theme.muted.apply_to(ch.repeat(len)).to_string();
                    self.push_inline(&underline);
                    self.newline();
                }
                self.heading = None;
                self.needs_blank = true;
            }
            TagEnd::BlockQuote { .. } => {
                self.ensure_newline();
                self.quote_depth = self.quote_depth.saturating_sub(1);
                self.needs_blank = true;
            }
            TagEnd::CodeBlock => {
                self.code_block = false;
                self.ensure_newline();
                self.needs_blank = true;
            }
            TagEnd::List(_) => {
                self.lists.pop();
                self.ensure_newline();
                if self.lists.is_empty() {
                    self.needs_blank = true;
                }
            }
            TagEnd::Item => self.ensure_newline(),
            TagEnd::Emphasis => self.emphasis = self.emphasis.saturating_sub(1),
            TagEnd::Strong => self.strong = self.strong.saturating_sub(1),
            TagEnd::Strikethrough => self.strike = self.strike.saturating_sub(1),
            TagEnd::Link | TagEnd::Image => {
                if let Some(url) = self.link.take() {
                    if !url.is_empty() && url != self.link_text {
                        let target = self.theme.muted.apply_to(format!(" ({})", url)).to_string();
                        self.push_inline(&target);
                    }
                }
            }
            _ => {}
        }
    }

    fn text(&mut self, text: &str) {
        if self.code_block {
            for line in text.split_inclusive('\n') {
                let (content, ended) = match line.strip_suffix('\n') {
                    Some(content) => (content, true),
                    None => (line, false),
                };
                let styled = format!("    {}", self.theme.code.apply_to(content));
                self.push_inline(&styled);
                if ended {
                    self.newline();
                }
            }
            return;
        }

        if self.heading.is_some() {
            self.heading_text.push_str(text);
        }
        if self.link.is_some() {
            self.link_text.push_str(text);
        }
        let styled = self.inline_style().apply_to(text).to_string();
        self.push_inline(&styled);
    }

    fn inline_style(&self) -> Style {
        let mut style = if self.heading.is_some() {
            self.theme.heading.clone()
        } else if self.link.is_some() {
            self.theme.link.clone()
        } else {
            Style::new()
        };
        if self.strong > 0 {
            style = style.bold();
        }
        if self.emphasis > 0 {
            style = style.italic();
        }
        if self.strike > 0 {
            style = style.strikethrough();
        }
        style
    }

    /// Separates consecutive blocks with one blank line.
    fn block_start(&mut self) {
        if self.needs_blank && self.line_start && !self.out.is_empty() {
            self.out.push('\n');
        }
        self.needs_blank = false;
    }

    fn push_inline(&mut self, s: &str) {
        if self.line_start {
            if self.quote_depth > 0 {
                let bar = self.theme.muted.apply_to("│ ".repeat(self.quote_depth));
                self.out.push_str(&bar.to_string());
            }
            self.line_start = false;
        }
        self.out.push_str(s);
    }

    fn newline(&mut self) {
        self.out.push('\n');
        self.line_start = true;
    }

    fn ensure_newline(&mut self) {
        if !self.line_start {
            self.newline();
        }
    }

    fn finish(self) -> String {
        let mut out = self.out.trim_end().to_string();
        out.push('\n');
        out
    }
}
