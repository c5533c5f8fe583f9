//! Selection state for spangapp.
//!
//! One top-level section is active at a time; `Dashboard` and `Map` each
//! carry a secondary choice. Selection values are plain data — rendering a
//! section never mutates them, and nothing persists across sections.

use serde::{Deserialize, Serialize};

use crate::dataset::Datasets;
use crate::error::{Error, Result};

/// The five top-level sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    /// Static landing page.
    #[default]
    Home,
    /// Raw table browser.
    Dashboard,
    /// Positions and route of one travel.
    Map,
    /// Cumulative distance over time.
    Chart,
    /// Speed histograms.
    Statistics,
}

impl Section {
    /// All sections, in sidebar order.
    pub const ALL: [Self; 5] = [
        Self::Home,
        Self::Dashboard,
        Self::Map,
        Self::Chart,
        Self::Statistics,
    ];
}

impl std::fmt::Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Home => "Home",
            Self::Dashboard => "Dashboard",
            Self::Map => "Map",
            Self::Chart => "Chart",
            Self::Statistics => "Statistics",
        };
        f.write_str(label)
    }
}

/// The four dataset labels offered inside `Dashboard`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DatasetKind {
    /// The `iteration` table.
    #[default]
    Iteration,
    /// The `plate_box` table.
    PlateBox,
    /// The `run_parameters` table.
    RunParameters,
    /// The `travel` table.
    Travel,
}

impl DatasetKind {
    /// All dataset labels, in menu order.
    pub const ALL: [Self; 4] = [
        Self::Iteration,
        Self::PlateBox,
        Self::RunParameters,
        Self::Travel,
    ];
}

impl std::fmt::Display for DatasetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Iteration => "Iteration",
            Self::PlateBox => "Plate Box",
            Self::RunParameters => "Run Parameters",
            Self::Travel => "Travel",
        };
        f.write_str(label)
    }
}

/// The full selection driving one render.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Selection {
    /// Active section.
    pub section: Section,
    /// Dataset shown by `Dashboard`.
    pub dataset: DatasetKind,
    /// Travel shown by `Map`; `None` means "first available".
    pub travel: Option<i64>,
}

impl Selection {
    /// A selection pointing at the given section with secondary defaults.
    #[must_use]
    pub fn new(section: Section) -> Self {
        Self {
            section,
            ..Self::default()
        }
    }

    /// Replace the dashboard dataset choice.
    #[must_use]
    pub fn with_dataset(mut self, dataset: DatasetKind) -> Self {
        self.dataset = dataset;
        self
    }

    /// Replace the map travel choice.
    #[must_use]
    pub fn with_travel(mut self, travel: Option<i64>) -> Self {
        self.travel = travel;
        self
    }

    /// Resolve which travel the map should show.
    ///
    /// With no explicit choice, the first travel in first-seen order is
    /// used. A dataset without any travels resolves to `None` (the map
    /// degrades to empty rather than failing).
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptySelection`] if an explicitly chosen travel id
    /// is not present in the iteration data.
    pub fn resolve_travel(&self, data: &Datasets) -> Result<Option<i64>> {
        let available = data.travel_ids();
        match self.travel {
            Some(id) if available.contains(&id) => Ok(Some(id)),
            Some(id) => Err(Error::empty_selection(format!("travel {id}"))),
            None => Ok(available.first().copied()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Table;
    use crate::record::{Iteration, IterationStatus};
    use chrono::{TimeZone, Utc};

    fn empty_table(name: &str) -> Table {
        Table {
            name: name.to_string(),
            columns: Vec::new(),
            rows: Vec::new(),
        }
    }

    fn datasets_with_travels(ids: &[i64]) -> Datasets {
        let iteration = ids
            .iter()
            .enumerate()
            .map(|(i, &travel_id)| Iteration {
                travel_id,
                timestamp: Utc.timestamp_opt(i as i64, 0).unwrap(),
                latitude: 0.0,
                longitude: 0.0,
                distance: 0.0,
                speed: 0.0,
                status: IterationStatus::Other("Ok".to_string()),
            })
            .collect();

        Datasets {
            iteration,
            iteration_table: empty_table("iteration"),
            plate_box: empty_table("plate_box"),
            run_parameters: empty_table("run_parameters"),
            travel: empty_table("travel"),
        }
    }

    #[test]
    fn test_section_default_is_home() {
        assert_eq!(Section::default(), Section::Home);
    }

    #[test]
    fn test_section_all_has_five_entries() {
        assert_eq!(Section::ALL.len(), 5);
        assert_eq!(Section::ALL[0], Section::Home);
    }

    #[test]
    fn test_section_display() {
        assert_eq!(Section::Home.to_string(), "Home");
        assert_eq!(Section::Statistics.to_string(), "Statistics");
    }

    #[test]
    fn test_dataset_default_is_iteration() {
        assert_eq!(DatasetKind::default(), DatasetKind::Iteration);
    }

    #[test]
    fn test_dataset_labels() {
        assert_eq!(DatasetKind::Iteration.to_string(), "Iteration");
        assert_eq!(DatasetKind::PlateBox.to_string(), "Plate Box");
        assert_eq!(DatasetKind::RunParameters.to_string(), "Run Parameters");
        assert_eq!(DatasetKind::Travel.to_string(), "Travel");
    }

    #[test]
    fn test_selection_default() {
        let sel = Selection::default();
        assert_eq!(sel.section, Section::Home);
        assert_eq!(sel.dataset, DatasetKind::Iteration);
        assert_eq!(sel.travel, None);
    }

    #[test]
    fn test_selection_builders() {
        let sel = Selection::new(Section::Map)
            .with_dataset(DatasetKind::Travel)
            .with_travel(Some(9));
        assert_eq!(sel.section, Section::Map);
        assert_eq!(sel.dataset, DatasetKind::Travel);
        assert_eq!(sel.travel, Some(9));
    }

    #[test]
    fn test_resolve_travel_defaults_to_first_seen() {
        let data = datasets_with_travels(&[5, 2, 5, 8]);
        let sel = Selection::new(Section::Map);
        assert_eq!(sel.resolve_travel(&data).unwrap(), Some(5));
    }

    #[test]
    fn test_resolve_travel_explicit_choice() {
        let data = datasets_with_travels(&[5, 2, 8]);
        let sel = Selection::new(Section::Map).with_travel(Some(8));
        assert_eq!(sel.resolve_travel(&data).unwrap(), Some(8));
    }

    #[test]
    fn test_resolve_travel_unknown_id_is_empty_selection() {
        let data = datasets_with_travels(&[5]);
        let sel = Selection::new(Section::Map).with_travel(Some(42));
        let err = sel.resolve_travel(&data).unwrap_err();
        assert!(err.is_empty_selection());
    }

    #[test]
    fn test_resolve_travel_no_travels_degrades_to_none() {
        let data = datasets_with_travels(&[]);
        let sel = Selection::new(Section::Map);
        assert_eq!(sel.resolve_travel(&data).unwrap(), None);
    }
}
