//! Pure records -> render plan transformation

use crate::domain::{group_by_market, CandleRecord};

/// Column titles, in cell order
pub const COLUMN_HEADERS: [&str; 7] = ["Time", "Open", "High", "Low", "Close", "Volume", "Source"];

/// One table row: time, open, high, low, close, volume, source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub cells: [String; 7],
}

impl TableRow {
    pub fn time(&self) -> &str {
        &self.cells[0]
    }

    pub fn source(&self) -> &str {
        &self.cells[6]
    }
}

impl From<&CandleRecord> for TableRow {
    fn from(record: &CandleRecord) -> Self {
        Self {
            cells: record.cells(),
        }
    }
}

/// A titled table for one market
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarketTable {
    pub title: String,
    pub rows: Vec<TableRow>,
}

/// Everything a target needs to show, in display order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderPlan {
    pub tables: Vec<MarketTable>,
}

impl RenderPlan {
    pub fn market_count(&self) -> usize {
        self.tables.len()
    }

    pub fn total_rows(&self) -> usize {
        self.tables.iter().map(|t| t.rows.len()).sum()
    }

    pub fn table(&self, title: &str) -> Option<&MarketTable> {
        self.tables.iter().find(|t| t.title == title)
    }

    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.tables.iter().map(|t| t.title.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

/// Build the tables for one poll cycle: one per market, in first-appearance order
pub fn build_render_plan(records: &[CandleRecord]) -> RenderPlan {
    let tables = group_by_market(records)
        .into_iter()
        .map(|group| MarketTable {
            title: group.market,
            rows: group.records.into_iter().map(TableRow::from).collect(),
        })
        .collect();

    RenderPlan { tables }
}
