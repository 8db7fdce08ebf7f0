//! Logical field → physical spreadsheet column mapping.
//!
//! The sheet layout is edited by hand, so the coupling between its headers and
//! the entry fields lives here in one table. A header that appears more than
//! once is addressed by its occurrence index; the parser renames occurrence
//! `n > 0` to `{header}_{n}`.

use std::borrow::Cow;

use climatemap_sheet::RawRow;

/// One physical column: header text plus which occurrence of that header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnRef {
    pub header: &'static str,
    /// 0 for the first column with this header, 1 for the second, ...
    pub occurrence: usize,
}

impl ColumnRef {
    /// First column named `header`.
    pub const fn named(header: &'static str) -> Self {
        Self {
            header,
            occurrence: 0,
        }
    }

    /// The `occurrence`-th repeat of `header`.
    pub const fn repeat(header: &'static str, occurrence: usize) -> Self {
        Self { header, occurrence }
    }

    /// Key under which the parser stores this column.
    pub fn key(&self) -> Cow<'static, str> {
        match self.occurrence {
            0 => Cow::Borrowed(self.header),
            n => Cow::Owned(format!("{}_{n}", self.header)),
        }
    }

    /// Cell value, `""` when the column is missing.
    pub fn read<'r>(&self, row: &'r RawRow) -> &'r str {
        row.get(&self.key()).unwrap_or_default()
    }
}

/// Where every entry field comes from in the sheet.
#[derive(Debug, Clone)]
pub struct ColumnMap {
    /// Candidates tried in order; the first non-empty value wins.
    pub name: Vec<ColumnRef>,
    pub website: ColumnRef,
    pub is_robotics: ColumnRef,
    pub is_deployed: ColumnRef,
    pub founded: ColumnRef,
    pub country_hq: ColumnRef,
    pub continent_hq: ColumnRef,
    pub deployment_countries: Vec<ColumnRef>,
    pub robotics_type: ColumnRef,
    pub main_application: ColumnRef,
    pub additional_application: ColumnRef,
    pub adaptation_mitigation: ColumnRef,
    pub biome_type: ColumnRef,
    pub description: ColumnRef,
    pub linked_in: ColumnRef,
}

/// Header of the organization-name column in the climate robotics sheet.
const NAME_HEADER: &str = "Startup/Company/Lab";

/// Header shared by the yes/no robotics flag and the robotics-type category.
const ROBOTICS_HEADER: &str = "Robotics";

const DEPLOYMENT_HEADER: &str = "Deployment Countries";

impl Default for ColumnMap {
    /// Layout of the climate robotics "Global Map" tab.
    fn default() -> Self {
        Self {
            name: vec![ColumnRef::named(NAME_HEADER), ColumnRef::named("Name")],
            website: ColumnRef::named("Website"),
            is_robotics: ColumnRef::named(ROBOTICS_HEADER),
            is_deployed: ColumnRef::named("Deployed"),
            founded: ColumnRef::named("Founded"),
            country_hq: ColumnRef::named("Country HQ"),
            continent_hq: ColumnRef::named("Continent HQ"),
            // Headers are whitespace-normalized by the parser, so a sheet carrying
            // both "Deployment Countries" and "Deployment Countries " sees the
            // second one as a repeat.
            deployment_countries: vec![
                ColumnRef::named(DEPLOYMENT_HEADER),
                ColumnRef::repeat(DEPLOYMENT_HEADER, 1),
            ],
            robotics_type: ColumnRef::repeat(ROBOTICS_HEADER, 1),
            main_application: ColumnRef::named("Main Application"),
            additional_application: ColumnRef::named("Additional Application"),
            adaptation_mitigation: ColumnRef::named("Adaptation / Mitigation"),
            biome_type: ColumnRef::named("Biome Type"),
            description: ColumnRef::named(
                "Describe what the Robotics solutions does in one sentence.",
            ),
            linked_in: ColumnRef::named("LinkedIn Page"),
        }
    }
}

impl ColumnMap {
    /// First non-empty value among `candidates`, or `""`.
    pub fn first_non_empty<'r>(row: &'r RawRow, candidates: &[ColumnRef]) -> &'r str {
        Self::first_filled(row, candidates)
            .map(|(_, value)| value)
            .unwrap_or_default()
    }

    /// Like [`first_non_empty`](Self::first_non_empty), but also reports
    /// which candidate supplied the value.
    pub fn first_filled<'r>(
        row: &'r RawRow,
        candidates: &[ColumnRef],
    ) -> Option<(ColumnRef, &'r str)> {
        candidates
            .iter()
            .map(|c| (*c, c.read(row)))
            .find(|(_, v)| !v.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use climatemap_sheet::parse_csv;

    #[test]
    fn key_for_repeat_uses_suffix() {
        assert_eq!(ColumnRef::named("Robotics").key(), "Robotics");
        assert_eq!(ColumnRef::repeat("Robotics", 1).key(), "Robotics_1");
        assert_eq!(ColumnRef::repeat("Robotics", 2).key(), "Robotics_2");
    }

    #[test]
    fn robotics_columns_address_both_occurrences() {
        let rows = parse_csv("Robotics,Country HQ,Robotics\nYes,Kenya,Aerial Robot\n");
        let map = ColumnMap::default();
        assert_eq!(map.is_robotics.read(&rows[0]), "Yes");
        assert_eq!(map.robotics_type.read(&rows[0]), "Aerial Robot");
    }

    #[test]
    fn missing_column_reads_empty() {
        let rows = parse_csv("Name\nSkyNet\n");
        assert_eq!(ColumnMap::default().biome_type.read(&rows[0]), "");
    }

    #[test]
    fn name_falls_back_to_generic_column() {
        let map = ColumnMap::default();
        let rows = parse_csv("Startup/Company/Lab,Name\n,SkyNet\nAquaBot,Ignored\n");
        assert_eq!(ColumnMap::first_non_empty(&rows[0], &map.name), "SkyNet");
        assert_eq!(ColumnMap::first_non_empty(&rows[1], &map.name), "AquaBot");
    }

    #[test]
    fn first_filled_reports_source_column() {
        let map = ColumnMap::default();
        let rows = parse_csv("Startup/Company/Lab,Name\n,SkyNet\n,\n");
        assert_eq!(
            ColumnMap::first_filled(&rows[0], &map.name),
            Some((ColumnRef::named("Name"), "SkyNet"))
        );
        assert_eq!(ColumnMap::first_filled(&rows[1], &map.name), None);
    }

    #[test]
    fn both_deployment_spellings_are_candidates() {
        let map = ColumnMap::default();
        let rows = parse_csv(
            "Deployment Countries,Deployment Countries \n,\"Chile, Peru\"\nKenya,Chile\n",
        );
        assert_eq!(
            ColumnMap::first_non_empty(&rows[0], &map.deployment_countries),
            "Chile, Peru"
        );
        assert_eq!(
            ColumnMap::first_non_empty(&rows[1], &map.deployment_countries),
            "Kenya"
        );
    }

    #[test]
    fn trailing_space_header_still_resolves() {
        let map = ColumnMap::default();
        let rows = parse_csv("\"Deployment Countries \"\n\"Kenya, Uganda\"\n");
        assert_eq!(
            ColumnMap::first_non_empty(&rows[0], &map.deployment_countries),
            "Kenya, Uganda"
        );
    }
}
