//! Column catalog loaded from the headers endpoint

use std::collections::HashMap;

/// Display metadata for one dataset column. Immutable once loaded; the wire
/// tuple's `scale` field is dropped at the decode boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    /// Dataset column identifier, e.g. `STATURE`
    pub id: String,
    /// Human-readable name
    pub label: String,
    /// Measurement unit, e.g. `mm`
    pub unit: String,
    /// Long-form description shown on hover
    pub description: String,
    /// Whether the column is offered in selectors
    pub visible: bool,
}

impl Column {
    /// Label with the unit appended, for axis annotation
    pub fn label_with_unit(&self) -> String {
        if self.unit.is_empty() {
            self.label.clone()
        } else {
            format!("{} ({})", self.label, self.unit)
        }
    }
}

/// The full column catalog: ordered columns plus an id lookup. Owned by the
/// application state for the lifetime of the session.
#[derive(Debug, Clone, Default)]
pub struct ColumnCatalog {
    columns: Vec<Column>,
    by_id: HashMap<String, usize>,
}

impl ColumnCatalog {
    pub fn new(columns: Vec<Column>) -> Self {
        let by_id = columns
            .iter()
            .enumerate()
            .map(|(i, c)| (c.id.clone(), i))
            .collect();
        Self { columns, by_id }
    }

    pub fn get(&self, id: &str) -> Option<&Column> {
        self.by_id.get(id).map(|&i| &self.columns[i])
    }

    /// All columns in catalog order
    pub fn iter(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter()
    }

    /// Columns offered in axis and filter selectors
    pub fn visible(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter().filter(|c| c.visible)
    }

    /// Display label for an id, falling back to the id itself
    pub fn label_for<'a>(&'a self, id: &'a str) -> &'a str {
        self.get(id).map(|c| c.label.as_str()).unwrap_or(id)
    }

    /// Unit for an id, empty when unknown
    pub fn unit_for(&self, id: &str) -> &str {
        self.get(id).map(|c| c.unit.as_str()).unwrap_or("")
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column(id: &str, visible: bool) -> Column {
        Column {
            id: id.to_string(),
            label: id.to_lowercase(),
            unit: "mm".to_string(),
            description: String::new(),
            visible,
        }
    }

    #[test]
    fn test_lookup_and_order() {
        let catalog = ColumnCatalog::new(vec![
            column("AGE", true),
            column("GENDER", false),
            column("STATURE", true),
        ]);

        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.get("GENDER").map(|c| c.visible), Some(false));
        assert!(catalog.get("WEIGHT").is_none());

        let visible: Vec<&str> = catalog.visible().map(|c| c.id.as_str()).collect();
        assert_eq!(visible, vec!["AGE", "STATURE"]);
    }

    #[test]
    fn test_label_fallbacks() {
        let catalog = ColumnCatalog::new(vec![column("AGE", true)]);
        assert_eq!(catalog.label_for("AGE"), "age");
        assert_eq!(catalog.label_for("UNKNOWN"), "UNKNOWN");
        assert_eq!(catalog.unit_for("UNKNOWN"), "");
    }

    #[test]
    fn test_label_with_unit() {
        let mut col = column("STATURE", true);
        assert_eq!(col.label_with_unit(), "stature (mm)");
        col.unit.clear();
        assert_eq!(col.label_with_unit(), "stature");
    }
}
