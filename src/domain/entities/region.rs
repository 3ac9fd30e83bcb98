use serde::{Deserialize, Serialize};

/// A region the bot knows, keyed to a JMA office code
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Region {
    pub name: String,
    pub code: String,
}

impl Region {
    pub fn new(name: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            code: code.into(),
        }
    }
}

/// Built-in regions. Order matters: lookups take the first name found in
/// the text, so 東京 must come before 京都 ("東京都" contains "京都").
const DEFAULT_REGIONS: &[(&str, &str)] = &[
    ("東京", "130000"),
    ("大阪", "270000"),
    ("京都", "260000"),
    ("名古屋", "230000"),
    ("横浜", "140000"),
    ("札幌", "016000"),
    ("仙台", "040000"),
    ("広島", "340000"),
    ("福岡", "400000"),
    ("那覇", "471000"),
];

/// Ordered, read-only table of supported regions
#[derive(Debug, Clone, Default)]
pub struct RegionTable {
    regions: Vec<Region>,
}

impl RegionTable {
    /// Build a table from regions in priority order.
    /// Later duplicates of a name are dropped.
    pub fn new(regions: impl IntoIterator<Item = Region>) -> Self {
        let mut table: Vec<Region> = Vec::new();
        for region in regions {
            if table.iter().any(|r| r.name == region.name) {
                tracing::warn!("Duplicate region '{}' ignored", region.name);
                continue;
            }
            table.push(region);
        }
        Self { regions: table }
    }

    pub fn builtin() -> Self {
        Self::new(
            DEFAULT_REGIONS
                .iter()
                .map(|(name, code)| Region::new(*name, *code)),
        )
    }

    /// Forecast code for an exact region name
    pub fn code(&self, name: &str) -> Option<&str> {
        self.regions
            .iter()
            .find(|r| r.name == name)
            .map(|r| r.code.as_str())
    }

    /// First region (in table order) whose name occurs in `text`
    pub fn find_in(&self, text: &str) -> Option<&Region> {
        self.regions.iter().find(|r| text.contains(r.name.as_str()))
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}
