//! Box-drawn tables for summaries.

use console::measure_text_width;

/// Column alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    Left,
    Right,
}

/// A simple table for formatted output.
///
/// Widths are measured in terminal columns, so styled cells line up.
#[derive(Debug)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    widths: Vec<usize>,
    aligns: Vec<Align>,
}

impl Table {
    /// Create a new table with the given headers.
    pub fn new(headers: &[&str]) -> Self {
        Self {
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
            widths: headers.iter().map(|h| measure_text_width(h)).collect(),
            aligns: vec![Align::Left; headers.len()],
        }
    }

    /// Right-align every column after the first. Used for count tables.
    pub fn numeric(mut self) -> Self {
        for align in self.aligns.iter_mut().skip(1) {
            *align = Align::Right;
        }
        self
    }

    /// Add a row. Extra cells beyond the header count are dropped.
    pub fn add_row<S: AsRef<str>>(&mut self, row: &[S]) {
        let row: Vec<String> = row
            .iter()
            .take(self.headers.len())
            .map(|cell| cell.as_ref().to_string())
            .collect();
        for (width, cell) in self.widths.iter_mut().zip(&row) {
            *width = (*width).max(measure_text_width(cell));
        }
        self.rows.push(row);
    }

    /// Number of data rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Check if the table has no data rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Render the table as a string without a trailing newline.
    pub fn render(&self) -> String {
        let mut lines = Vec::with_capacity(self.rows.len() + 4);
        lines.push(self.border('┌', '┬', '┐'));
        lines.push(self.row(&self.headers));
        lines.push(self.border('├', '┼', '┤'));
        lines.extend(self.rows.iter().map(|row| self.row(row)));
        lines.push(self.border('└', '┴', '┘'));
        lines.join("\n")
    }

    fn border(&self, left: char, mid: char, right: char) -> String {
        let segments: Vec<String> = self.widths.iter().map(|w| "─".repeat(w + 2)).collect();
        format!("{}{}{}", left, segments.join(&mid.to_string()), right)
    }

    fn row(&self, cells: &[String]) -> String {
        let mut line = String::from("│");
        for (i, width) in self.widths.iter().enumerate() {
            let cell = cells.get(i).map(String::as_str).unwrap_or("");
            let pad = " ".repeat(width - measure_text_width(cell));
            match self.aligns[i] {
                Align::Left => line.push_str(&format!(" {}{} │", cell, pad)),
                Align::Right => line.push_str(&format!(" {}{} │", pad, cell)),
            }
        }
        line
    }
}
