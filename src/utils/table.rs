//! Table rendering utilities for CLI outputs.
//! Widths are computed with unicode-width so CJK text stays aligned.

use unicode_width::UnicodeWidthStr;

pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(headers: &[&str]) -> Self {
        Self {
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    pub fn add_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    fn widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.width()).collect();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                if i < widths.len() {
                    widths[i] = widths[i].max(cell.width());
                }
            }
        }
        widths
    }

    pub fn render(&self) -> String {
        let widths = self.widths();
        let mut out = String::new();

        out.push_str(&render_line(&self.headers, &widths));
        out.push('\n');

        let rule: usize = widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1);
        out.push_str(&"-".repeat(rule));
        out.push('\n');

        for row in &self.rows {
            out.push_str(&render_line(row, &widths));
            out.push('\n');
        }

        out
    }
}

fn render_line(cells: &[String], widths: &[usize]) -> String {
    let mut line = String::new();
    for (i, cell) in cells.iter().enumerate() {
        let pad = widths.get(i).copied().unwrap_or(0).saturating_sub(cell.width());
        line.push_str(cell);
        line.push_str(&" ".repeat(pad));
        if i + 1 < cells.len() {
            line.push_str("  ");
        }
    }
    while line.ends_with(' ') {
        line.pop();
    }
    line
}
