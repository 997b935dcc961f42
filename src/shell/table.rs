//! Plain-text grid tables for the book listings.
//!
//! ```text
//! +------+----------------------+
//! |   ID | Title                |
//! +======+======================+
//! | 3001 | A Tale of Two Cities |
//! +------+----------------------+
//! ```

use crate::models::{AuthorCredit, Book};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
}

/// Render `rows` under `headers`. Every row must have one cell per header.
pub fn render_grid(headers: &[&str], align: &[Align], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = vec![
        rule(&widths, '-'),
        row_line(&widths, align, headers.iter().copied()),
    ];
    if rows.is_empty() {
        out.push(rule(&widths, '-'));
        return out.join("\n");
    }

    out.push(rule(&widths, '='));
    for row in rows {
        out.push(row_line(&widths, align, row.iter().map(String::as_str)));
        out.push(rule(&widths, '-'));
    }
    out.join("\n")
}

fn rule(widths: &[usize], fill: char) -> String {
    let mut line = String::from("+");
    for width in widths {
        line.extend(std::iter::repeat(fill).take(width + 2));
        line.push('+');
    }
    line
}

fn row_line<'a>(widths: &[usize], align: &[Align], cells: impl Iterator<Item = &'a str>) -> String {
    let mut line = String::from("|");
    for (i, cell) in cells.enumerate() {
        let pad = widths[i].saturating_sub(cell.chars().count());
        let (left, right) = match align.get(i).copied().unwrap_or(Align::Left) {
            Align::Left => (0, pad),
            Align::Right => (pad, 0),
        };
        line.push(' ');
        line.push_str(&" ".repeat(left));
        line.push_str(cell);
        line.push_str(&" ".repeat(right));
        line.push_str(" |");
    }
    line
}

pub fn books_table(books: &[Book]) -> String {
    let rows: Vec<Vec<String>> = books
        .iter()
        .map(|book| {
            vec![
                book.id.to_string(),
                book.title.clone(),
                book.author_id.to_string(),
                book.qty.to_string(),
            ]
        })
        .collect();
    render_grid(
        &["ID", "Title", "Author ID", "Quantity"],
        &[Align::Right, Align::Left, Align::Right, Align::Right],
        &rows,
    )
}

pub fn credits_table(credits: &[AuthorCredit]) -> String {
    let rows: Vec<Vec<String>> = credits
        .iter()
        .map(|credit| {
            vec![
                credit.title.clone(),
                credit.author_name.clone(),
                credit.author_country.clone().unwrap_or_default(),
            ]
        })
        .collect();
    render_grid(
        &["Title", "Author's Name", "Author's Country"],
        &[Align::Left, Align::Left, Align::Left],
        &rows,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_pads_to_widest_cell() {
        let table = render_grid(
            &["ID", "Title"],
            &[Align::Right, Align::Left],
            &[
                vec!["3001".into(), "Emma".into()],
                vec!["7".into(), "Persuasion".into()],
            ],
        );
        let expected = "\
+------+------------+
|   ID | Title      |
+======+============+
| 3001 | Emma       |
+------+------------+
|    7 | Persuasion |
+------+------------+";
        assert_eq!(table, expected);
    }

    #[test]
    fn empty_grid_keeps_header() {
        let table = render_grid(&["A"], &[Align::Left], &[]);
        assert_eq!(table, "+---+\n| A |\n+---+");
    }

    #[test]
    fn credits_render_missing_country_blank() {
        let table = credits_table(&[AuthorCredit {
            title: "Emma".into(),
            author_name: "Jane Austen".into(),
            author_country: None,
        }]);
        assert!(table.contains("| Emma  | Jane Austen   |                  |"));
    }
}
