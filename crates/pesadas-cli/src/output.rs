//! Output formatting module

use pesadas_app::view::{format_weight, TableView, COLUMNS};
use pesadas_types::{OutputFormat, Result};

pub fn output_table(output_format: OutputFormat, view: &TableView) -> Result<()> {
    if output_format == OutputFormat::Json {
        let content = serde_json::to_string_pretty(view.rows())?;
        println!("{}", content);
        return Ok(());
    }

    print!("{}", render_table(view));
    Ok(())
}

/// Aligned text table (the action columns are dropped)
fn render_table(view: &TableView) -> String {
    let mut out = String::new();
    let header = format!(
        "{:>4}  {:<12} {:>10} {:>10} {:>10}  {}",
        COLUMNS[0], COLUMNS[1], COLUMNS[2], COLUMNS[3], COLUMNS[4], COLUMNS[5]
    );
    out.push_str(&header);
    out.push('\n');
    out.push_str(&"-".repeat(header.chars().count().max(64)));
    out.push('\n');

    if let Some(message) = view.placeholder() {
        out.push_str(&format!("{:^64}\n", message));
        return out;
    }

    for row in view.rows() {
        out.push_str(&format!(
            "{:>4}  {:<12} {:>10} {:>10} {:>10}  {}\n",
            row.number,
            row.identifier,
            format_weight(row.empty_weight),
            format_weight(row.gross_weight),
            format_weight(row.net_weight),
            row.recorded_at
        ));
    }
    out
}
