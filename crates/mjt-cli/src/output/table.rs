#[derive(Clone, Copy, Debug)]
pub struct TableOptions {
    pub max_width: Option<usize>,
    pub color: bool,
}

/// One table line of a listing.
pub trait Row {
    const HEADERS: &'static [&'static str];

    fn cells(&self) -> Vec<String>;
}

/// Aligned table for a homogeneous listing.
#[must_use]
pub fn render_rows<R: Row>(rows: &[R], options: TableOptions) -> String {
    if rows.is_empty() {
        return String::from("(no rows)");
    }
    let cells = rows.iter().map(Row::cells).collect::<Vec<_>>();
    render_table(R::HEADERS, &cells, options)
}

/// Render a simple aligned table for string rows. Columns shrink,
/// widest first, until the table fits `max_width`.
#[must_use]
pub fn render_table(headers: &[&str], rows: &[Vec<String>], options: TableOptions) -> String {
    let mut widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(index, header)| {
            rows.iter()
                .filter_map(|row| row.get(index))
                .map(|cell| cell.chars().count())
                .max()
                .unwrap_or(0)
                .max(min_width(header))
        })
        .collect();

    if let Some(max_width) = options.max_width {
        shrink_to_fit(&mut widths, headers, max_width);
    }

    let header_line = headers
        .iter()
        .zip(&widths)
        .map(|(header, width)| pad(&truncate(header, *width), *width))
        .collect::<Vec<_>>()
        .join("  ");
    let divider = "-".repeat(header_line.chars().count());

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(header_line.trim_end().to_string());
    lines.push(divider.trim_end().to_string());
    for row in rows {
        let line = widths
            .iter()
            .enumerate()
            .map(|(index, width)| {
                let cell = truncate(row.get(index).map_or("-", String::as_str), *width);
                let padded = pad(&cell, *width);
                if options.color {
                    colorize_status(&cell, &padded)
                } else {
                    padded
                }
            })
            .collect::<Vec<_>>()
            .join("  ");
        lines.push(line.trim_end().to_string());
    }
    lines.join("\n")
}

fn min_width(header: &str) -> usize {
    header.chars().count().max(4)
}

fn shrink_to_fit(widths: &mut [usize], headers: &[&str], max_width: usize) {
    let separators = widths.len().saturating_sub(1) * 2;
    while widths.iter().sum::<usize>() + separators > max_width {
        let widest = widths
            .iter()
            .enumerate()
            .filter(|(idx, width)| **width > min_width(headers[*idx]))
            .max_by_key(|(_, width)| **width)
            .map(|(idx, _)| idx);
        let Some(idx) = widest else {
            break;
        };
        widths[idx] -= 1;
    }
}

fn truncate(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    if width <= 1 {
        return "…".to_string();
    }
    let mut out: String = value.chars().take(width - 1).collect();
    out.push('…');
    out
}

fn pad(value: &str, width: usize) -> String {
    let fill = width.saturating_sub(value.chars().count());
    format!("{value}{}", " ".repeat(fill))
}

/// Color a status cell; the escape codes wrap the padded text so the
/// column alignment is unaffected.
fn colorize_status(cell: &str, padded: &str) -> String {
    let code = match cell.to_ascii_lowercase().as_str() {
        "pass" | "renamed" | "ok" => "32",
        "planned" | "skipped" => "33",
        "fail" | "error" => "31",
        _ => return padded.to_string(),
    };
    format!("\u{1b}[{code}m{padded}\u{1b}[0m")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const PLAIN: TableOptions = TableOptions {
        max_width: None,
        color: false,
    };

    #[test]
    fn columns_are_aligned() {
        let rows = vec![
            vec!["pass".to_string(), "a.xml".to_string()],
            vec!["fail".to_string(), "meshes/Box_1.obj".to_string()],
        ];

        let table = render_table(&["status", "path"], &rows, PLAIN);

        assert_eq!(
            table,
            "status  path\n\
             ------------------------\n\
             pass    a.xml\n\
             fail    meshes/Box_1.obj"
        );
    }

    #[test]
    fn wide_columns_are_truncated_to_fit() {
        let rows = vec![vec!["fail".to_string(), "x".repeat(80)]];
        let options = TableOptions {
            max_width: Some(40),
            color: false,
        };

        let table = render_table(&["status", "path"], &rows, options);

        for line in table.lines() {
            assert!(line.chars().count() <= 40, "{line}");
        }
        assert!(table.lines().nth(2).is_some_and(|line| line.ends_with('…')));
    }

    #[test]
    fn status_colors_wrap_padding() {
        let rows = vec![vec!["fail".to_string(), "a.xml".to_string()]];
        let options = TableOptions {
            max_width: None,
            color: true,
        };

        let table = render_table(&["status", "path"], &rows, options);

        assert!(table.contains("\u{1b}[31mfail  \u{1b}[0m"));
    }
}
