//! Plain-text table rendering of SELECT results, used by `QueryTemplate::debug`.

use std::io::{self, Write};

/// Column-aligned table of solutions, one column per projected variable.
#[derive(Debug, Default)]
pub struct ResultTable {
    variables: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl ResultTable {
    pub fn new(variables: Vec<String>) -> Self {
        Self { variables, rows: Vec::new() }
    }

    /// Appends a row. Missing trailing cells are left blank (unbound).
    pub fn push_row(&mut self, mut cells: Vec<String>) {
        cells.resize(self.variables.len(), String::new());
        self.rows.push(cells);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn column_widths(&self) -> Vec<usize> {
        self.variables
            .iter()
            .enumerate()
            .map(|(i, var)| {
                self.rows
                    .iter()
                    .map(|row| row[i].chars().count())
                    .chain(std::iter::once(var.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect()
    }

    /// Writes the table:
    ///
    /// ```text
    /// -------------------
    /// | x   | y   | z   |
    /// ===================
    /// | <a> | <p> | "v" |
    /// -------------------
    /// ```
    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let widths = self.column_widths();
        let total = widths.iter().map(|w| w + 3).sum::<usize>() + 1;
        let rule = "-".repeat(total);

        writeln!(out, "{}", rule)?;
        write_line(out, &self.variables, &widths)?;
        writeln!(out, "{}", "=".repeat(total))?;
        for row in &self.rows {
            write_line(out, row, &widths)?;
        }
        writeln!(out, "{}", rule)?;
        Ok(())
    }
}

fn write_line<W: Write>(out: &mut W, cells: &[String], widths: &[usize]) -> io::Result<()> {
    write!(out, "|")?;
    for (cell, width) in cells.iter().zip(widths) {
        write!(out, " {:<width$} |", cell, width = width)?;
    }
    writeln!(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(table: &ResultTable) -> String {
        let mut buffer = Vec::new();
        table.write_to(&mut buffer).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_empty_table_has_header_only() {
        let table = ResultTable::new(vec!["x".to_string(), "y".to_string()]);
        assert!(table.is_empty());
        assert_eq!(render(&table), "---------\n| x | y |\n=========\n---------\n");
    }

    #[test]
    fn test_columns_align_to_widest_cell() {
        let mut table = ResultTable::new(vec!["s".to_string(), "o".to_string()]);
        table.push_row(vec!["<urn:a>".to_string(), "\"v\"".to_string()]);
        table.push_row(vec!["<urn:bb>".to_string()]);

        let output = render(&table);
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(table.len(), 2);
        assert_eq!(lines[1], "| s        | o   |");
        assert_eq!(lines[3], "| <urn:a>  | \"v\" |");
        assert_eq!(lines[4], "| <urn:bb> |     |");
        assert!(lines.iter().all(|line| line.chars().count() == lines[0].len()));
    }

    #[test]
    fn test_single_row_layout() {
        let mut table =
            ResultTable::new(vec!["x".to_string(), "y".to_string(), "z".to_string()]);
        table.push_row(vec!["<a>".to_string(), "<p>".to_string(), "\"v\"".to_string()]);

        let expected = "-------------------\n\
                        | x   | y   | z   |\n\
                        ===================\n\
                        | <a> | <p> | \"v\" |\n\
                        -------------------\n";
        assert_eq!(render(&table), expected);
    }
}
