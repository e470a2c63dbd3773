//! Turning a grown canvas into text.
//!
//! [`rows`] extracts the abstract cells; a [`CellFormatter`] decides how a
//! blank or a styled cell is spelled out (plain, terminal escapes or markup).

use crate::canvas::{Canvas, StyledCell};
use crossterm::style::Color;

/// One canvas row, `width` cells long; `None` is blank
pub type StyledRow = Vec<Option<StyledCell>>;

/// Extract the rows of a canvas, top to bottom
pub fn rows(canvas: &Canvas) -> Vec<StyledRow> {
    canvas.rows().to_vec()
}

/// Spells out cells in one output encoding
pub trait CellFormatter {
    fn blank(&self, out: &mut String);

    fn cell(&self, cell: &StyledCell, out: &mut String);

    /// Separator written between rows
    fn row_separator(&self) -> &'static str {
        "\n"
    }
}

/// Format rows into one text block
pub fn format_rows(rows: &[StyledRow], formatter: &dyn CellFormatter) -> String {
    let mut out = String::new();
    for (i, row) in rows.iter().enumerate() {
        if i > 0 {
            out.push_str(formatter.row_separator());
        }
        for cell in row {
            match cell {
                Some(cell) => formatter.cell(cell, &mut out),
                None => formatter.blank(&mut out),
            }
        }
    }
    out
}

/// Format a canvas directly
pub fn render(canvas: &Canvas, formatter: &dyn CellFormatter) -> String {
    format_rows(canvas.rows(), formatter)
}

/// Glyphs only, no styling
pub struct PlainFormatter;

impl CellFormatter for PlainFormatter {
    fn blank(&self, out: &mut String) {
        out.push(' ');
    }

    fn cell(&self, cell: &StyledCell, out: &mut String) {
        out.push(cell.glyph);
    }
}

/// ANSI terminal escapes (for print mode)
pub struct AnsiFormatter;

impl CellFormatter for AnsiFormatter {
    fn blank(&self, out: &mut String) {
        out.push(' ');
    }

    fn cell(&self, cell: &StyledCell, out: &mut String) {
        let style = cell.branch_type.style();
        if style.bold {
            out.push_str("\x1b[1m");
        }
        if let Some(code) = ansi_foreground(style.color) {
            out.push_str(&code);
        }
        out.push(cell.glyph);
        out.push_str("\x1b[0m");
    }
}

/// HTML spans for web views
pub struct MarkupFormatter;

impl CellFormatter for MarkupFormatter {
    fn blank(&self, out: &mut String) {
        out.push(' ');
    }

    fn cell(&self, cell: &StyledCell, out: &mut String) {
        let style = cell.branch_type.style();
        out.push_str(&format!(
            "<span class=\"{}\" style=\"color: {};\">",
            style.class, style.hex
        ));
        match cell.glyph {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            ch => out.push(ch),
        }
        out.push_str("</span>");
    }

    fn row_separator(&self) -> &'static str {
        "<br>"
    }
}

/// SGR foreground escape for a terminal color
pub fn ansi_foreground(color: Color) -> Option<String> {
    let code = match color {
        Color::Rgb { r, g, b } => return Some(format!("\x1b[38;2;{};{};{}m", r, g, b)),
        Color::AnsiValue(v) => return Some(format!("\x1b[38;5;{}m", v)),
        // Standard colors (0-7)
        Color::Black => 30,
        Color::DarkRed => 31,
        Color::DarkGreen => 32,
        Color::DarkYellow => 33,
        Color::DarkBlue => 34,
        Color::DarkMagenta => 35,
        Color::DarkCyan => 36,
        Color::Grey => 37,
        // Bright colors (8-15)
        Color::DarkGrey => 90,
        Color::Red => 91,
        Color::Green => 92,
        Color::Yellow => 93,
        Color::Blue => 94,
        Color::Magenta => 95,
        Color::Cyan => 96,
        Color::White => 97,
        _ => return None,
    };
    Some(format!("\x1b[{}m", code))
}

/// Output encoding picked on the command line
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum Format {
    Plain,
    #[default]
    Ansi,
    Html,
}

impl Format {
    pub fn formatter(self) -> &'static dyn CellFormatter {
        match self {
            Format::Plain => &PlainFormatter,
            Format::Ansi => &AnsiFormatter,
            Format::Html => &MarkupFormatter,
        }
    }
}
