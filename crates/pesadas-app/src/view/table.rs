//! Table rendering

use pesadas_domain::WeighingRecord;
use serde::Serialize;

/// Column headers, in display order (the last two hold the row actions)
pub const COLUMNS: [&str; 8] = ["#", "Matrícula", "Tara", "Bruto", "Neto", "Fecha", "", ""];

/// Placeholder when nothing is stored
pub const NO_RECORDS_MESSAGE: &str = "Sin registros";

/// Placeholder when a filter or search matched nothing
pub const NO_RESULTS_MESSAGE: &str = "Sin resultados";

/// One rendered table row
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableRow {
    /// 1-based number shown in the first column
    pub number: usize,
    /// Position in the record sequence; edit/delete controls dispatch on it
    pub position: usize,
    pub identifier: String,
    pub empty_weight: f64,
    pub gross_weight: f64,
    pub net_weight: f64,
    pub recorded_at: String,
}

/// Full replacement content for the table body
#[derive(Debug, Clone, PartialEq)]
pub enum TableView {
    Rows(Vec<TableRow>),
    /// Single row spanning all columns
    Placeholder(String),
}

impl TableView {
    /// Number rows 1..n in iteration order; `(position, record)` pairs keep
    /// their sequence position for the action controls.
    pub fn from_records<'a, I>(records: I, empty_message: &str) -> Self
    where
        I: IntoIterator<Item = (usize, &'a WeighingRecord)>,
    {
        let rows: Vec<TableRow> = records
            .into_iter()
            .enumerate()
            .map(|(i, (position, r))| TableRow {
                number: i + 1,
                position,
                identifier: r.identifier().to_string(),
                empty_weight: r.empty_weight(),
                gross_weight: r.gross_weight(),
                net_weight: r.net_weight(),
                recorded_at: r.recorded_at().to_string(),
            })
            .collect();

        if rows.is_empty() {
            TableView::Placeholder(empty_message.to_string())
        } else {
            TableView::Rows(rows)
        }
    }

    pub fn rows(&self) -> &[TableRow] {
        match self {
            TableView::Rows(rows) => rows.as_slice(),
            TableView::Placeholder(_) => &[],
        }
    }

    pub fn placeholder(&self) -> Option<&str> {
        match self {
            TableView::Rows(_) => None,
            TableView::Placeholder(message) => Some(message.as_str()),
        }
    }
}

impl Default for TableView {
    fn default() -> Self {
        TableView::Placeholder(NO_RECORDS_MESSAGE.to_string())
    }
}

/// Weight as shown in tables and edit fields ("500", "12.5")
pub fn format_weight(weight: f64) -> String {
    format!("{}", weight)
}
