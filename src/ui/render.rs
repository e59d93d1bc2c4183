//! Text rendering of progress readings: a battery-style bar for terminals
//! and a JSON line for status-bar integrations (waybar, i3blocks, ...).

use crate::core::scheduler::ProgressSink;
use crate::models::ProgressResult;
use crate::utils::colors::{GREY, color_for_percentage, colorize};
use crate::utils::formatting::{pad_left, pad_right, remaining_phrase};
use serde::Serialize;
use std::io::Write;
use tracing::warn;

const FILLED: char = '█';
const EMPTY: char = '░';

#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    pub bar_width: usize,
    pub color: bool,
    pub show_label: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            bar_width: 10,
            color: false,
            show_label: true,
        }
    }
}

/// `[██████░░░░]`, fill proportional to the clamped fraction.
pub fn render_bar(result: &ProgressResult, width: usize) -> String {
    let width = width.max(1);
    let filled = ((result.display_fraction() * width as f64).floor() as usize).min(width);

    let mut bar = String::with_capacity(width * 3 + 2);
    bar.push('[');
    bar.extend(std::iter::repeat_n(FILLED, filled));
    bar.extend(std::iter::repeat_n(EMPTY, width - filled));
    bar.push(']');
    bar
}

pub fn render_hint(result: &ProgressResult) -> Option<String> {
    result
        .remaining_units_hint
        .map(|v| remaining_phrase(v, result.scale.hint_unit()))
}

/// `Month [█████░░░░░]  58% · 13 days left`
pub fn render_line(result: &ProgressResult, opts: &RenderOptions) -> String {
    let mut bar = render_bar(result, opts.bar_width);
    if opts.color {
        bar = colorize(&bar, color_for_percentage(result.percentage));
    }

    let mut out = String::new();
    if opts.show_label {
        out.push_str(&pad_right(result.scale.label(), 6));
    }
    out.push_str(&bar);
    out.push(' ');
    out.push_str(&pad_left(&format!("{}%", result.percentage), 4));

    if let Some(hint) = render_hint(result) {
        let hint = format!(" · {}", hint);
        if opts.color {
            out.push_str(&colorize(&hint, GREY));
        } else {
            out.push_str(&hint);
        }
    }
    out
}

/// One status-line record.
#[derive(Debug, Serialize)]
pub struct StatusLine {
    pub text: String,
    pub tooltip: String,
    pub class: &'static str,
    pub percentage: u8,
    pub fraction: f64,
    pub remaining: Option<i64>,
}

impl StatusLine {
    pub fn from_result(result: &ProgressResult) -> Self {
        let tooltip = match render_hint(result) {
            Some(hint) => format!("{}: {}% elapsed, {}", result.scale, result.percentage, hint),
            None => format!("{}: {}% elapsed", result.scale, result.percentage),
        };
        Self {
            text: format!("{}%", result.percentage),
            tooltip,
            class: result.scale.code(),
            percentage: result.percentage,
            fraction: result.fraction,
            remaining: result.remaining_units_hint,
        }
    }
}

// ---------------------------
// Sinks
// ---------------------------

/// Writes rendered lines. In place mode redraws a single terminal line.
pub struct TerminalSink<W: Write> {
    out: W,
    opts: RenderOptions,
    in_place: bool,
}

impl<W: Write> TerminalSink<W> {
    pub fn new(out: W, opts: RenderOptions, in_place: bool) -> Self {
        Self {
            out,
            opts,
            in_place,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ProgressSink for TerminalSink<W> {
    fn on_progress_updated(&mut self, result: &ProgressResult) {
        let line = render_line(result, &self.opts);
        let written = if self.in_place {
            // \x1b[2K clears leftovers of a longer previous line.
            write!(self.out, "\r\x1b[2K{}", line)
        } else {
            writeln!(self.out, "{}", line)
        };

        if let Err(e) = written.and_then(|_| self.out.flush()) {
            warn!(event = "render.terminal.write_failed", error = %e);
        }
    }
}

/// One JSON object per line.
pub struct JsonSink<W: Write> {
    out: W,
}

impl<W: Write> JsonSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ProgressSink for JsonSink<W> {
    fn on_progress_updated(&mut self, result: &ProgressResult) {
        let written = serde_json::to_string(&StatusLine::from_result(result))
            .map_err(std::io::Error::from)
            .and_then(|json| writeln!(self.out, "{}", json))
            .and_then(|_| self.out.flush());

        if let Err(e) = written {
            warn!(event = "render.json.write_failed", error = %e);
        }
    }
}
