use serde::Serialize;

use crate::cli::OutputFormat;
use crate::ui;

pub mod table;

pub use table::{Row, TableOptions};

/// Human-readable rendering of a command response.
pub trait TableView {
    fn table(&self, options: TableOptions) -> String;
}

/// Render a response to a string in the requested format.
pub fn render<T: Serialize + TableView>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Table => {
            let prefs = ui::prefs();
            Ok(value.table(TableOptions {
                max_width: prefs.term_width,
                color: prefs.table_color,
            }))
        }
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
    }
}

/// Print a response in the requested format.
pub fn output<T: Serialize + TableView>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(value, format)?;
    println!("{rendered}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use serde::Serialize;

    use super::{Row, TableOptions, TableView, render, table::render_rows};
    use crate::cli::OutputFormat;

    #[derive(Serialize)]
    struct Entry {
        name: &'static str,
        ok: bool,
    }

    impl Row for Entry {
        const HEADERS: &'static [&'static str] = &["name", "ok"];

        fn cells(&self) -> Vec<String> {
            vec![self.name.to_string(), self.ok.to_string()]
        }
    }

    #[derive(Serialize)]
    struct Listing {
        entries: Vec<Entry>,
    }

    impl TableView for Listing {
        fn table(&self, options: TableOptions) -> String {
            render_rows(&self.entries, options)
        }
    }

    fn listing() -> Listing {
        Listing {
            entries: vec![
                Entry { name: "scene.xml", ok: true },
                Entry { name: "Box_1.obj", ok: false },
            ],
        }
    }

    #[test]
    fn json_render_is_valid_json() {
        let out = render(&listing(), OutputFormat::Json).expect("json render should work");
        let parsed: serde_json::Value = serde_json::from_str(&out).expect("json should parse");
        assert_eq!(parsed["entries"][0]["name"], "scene.xml");
        assert_eq!(parsed["entries"][1]["ok"], false);
    }

    #[test]
    fn raw_render_is_single_line_json() {
        let out = render(&listing(), OutputFormat::Raw).expect("raw render should work");
        assert!(serde_json::from_str::<serde_json::Value>(&out).is_ok());
        assert!(!out.contains('\n'));
    }

    #[test]
    fn table_render_uses_row_headers() {
        let out = render(&listing(), OutputFormat::Table).expect("table render should work");
        let lines: Vec<&str> = out.lines().collect();
        assert!(lines[0].starts_with("name"));
        assert!(lines[1].chars().all(|c| c == '-'));
        assert!(lines[3].contains("Box_1.obj"));
    }
}
