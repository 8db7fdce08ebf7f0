//! Row → [`Entry`] normalization.
//!
//! A row becomes an entry only when it has a real name and a headquarters
//! country the coordinate table knows. Everything else is coerced: blank
//! categories become defaults, bad years become `None`, bad websites get no
//! icon.

use std::fmt;

use climatemap_geo::{CountryTable, FaviconResolver};
use climatemap_sheet::RawRow;
use climatemap_shared::{AppConfig, DEFAULT_ROBOTICS_TYPE, Entry, EntryId, Result};

use crate::columns::ColumnMap;

// ---------------------------------------------------------------------------
// Outcome types
// ---------------------------------------------------------------------------

/// Why a row did not become an entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// Both name columns are blank.
    MissingName,
    /// The name equals the header of the column it came from (stray header row).
    HeaderEcho,
    /// The headquarters country is blank or not in the coordinate table.
    UnresolvedCountry { country: String },
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingName => f.write_str("missing name"),
            Self::HeaderEcho => f.write_str("repeated header row"),
            Self::UnresolvedCountry { country } if country.is_empty() => {
                f.write_str("missing headquarters country")
            }
            Self::UnresolvedCountry { country } => write!(f, "unknown country '{country}'"),
        }
    }
}

/// Result of normalizing one row.
#[derive(Debug, Clone, PartialEq)]
pub enum RowOutcome {
    Accepted(Entry),
    Rejected(Rejection),
}

impl RowOutcome {
    /// Drop the rejection reason.
    pub fn into_entry(self) -> Option<Entry> {
        match self {
            Self::Accepted(entry) => Some(entry),
            Self::Rejected(_) => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Context
// ---------------------------------------------------------------------------

/// Lookups a row needs to become an entry.
#[derive(Debug, Clone, Default)]
pub struct NormalizeContext {
    pub columns: ColumnMap,
    pub countries: CountryTable,
    pub favicons: FaviconResolver,
}

impl NormalizeContext {
    /// Default column layout with the configured country aliases and icon service.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        Ok(Self {
            columns: ColumnMap::default(),
            countries: CountryTable::builtin().with_aliases(&config.countries),
            favicons: FaviconResolver::from_config(&config.icons)?,
        })
    }
}

// ---------------------------------------------------------------------------
// Normalizer
// ---------------------------------------------------------------------------

/// Normalize the data row at `index` (0-based, header excluded).
pub fn normalize_row(row: &RawRow, index: usize, ctx: &NormalizeContext) -> RowOutcome {
    let cols = &ctx.columns;

    let Some((source, name)) = ColumnMap::first_filled(row, &cols.name) else {
        return RowOutcome::Rejected(Rejection::MissingName);
    };
    let name = name.trim();
    if name == source.header {
        return RowOutcome::Rejected(Rejection::HeaderEcho);
    }

    let country_hq = cols.country_hq.read(row);
    let Some(coordinates) = ctx.countries.resolve(country_hq) else {
        return RowOutcome::Rejected(Rejection::UnresolvedCountry {
            country: country_hq.to_string(),
        });
    };

    let website = cols.website.read(row);
    let robotics_type = match cols.robotics_type.read(row) {
        "" => DEFAULT_ROBOTICS_TYPE,
        other => other,
    };

    RowOutcome::Accepted(Entry {
        id: EntryId::from_row(index),
        name: name.to_string(),
        website: website.to_string(),
        is_robotics: is_yes(cols.is_robotics.read(row)),
        is_deployed: is_yes(cols.is_deployed.read(row)),
        founded: parse_year(cols.founded.read(row)),
        country_hq: country_hq.to_string(),
        continent_hq: cols.continent_hq.read(row).to_string(),
        deployment_countries: split_countries(ColumnMap::first_non_empty(
            row,
            &cols.deployment_countries,
        )),
        robotics_type: robotics_type.to_string(),
        main_application: cols.main_application.read(row).to_string(),
        additional_application: cols.additional_application.read(row).to_string(),
        adaptation_mitigation: cols.adaptation_mitigation.read(row).to_string(),
        biome_type: cols.biome_type.read(row).to_string(),
        description: cols.description.read(row).to_string(),
        linked_in: cols.linked_in.read(row).to_string(),
        coordinates: Some(coordinates),
        logo_url: ctx.favicons.resolve(website),
    })
}

/// Case-insensitive `"yes"`; anything else (including blank) is false.
fn is_yes(value: &str) -> bool {
    value.trim().eq_ignore_ascii_case("yes")
}

/// Leading integer of the cell (`"2019 (approx.)"` → 2019), `None` otherwise.
fn parse_year(value: &str) -> Option<i32> {
    let value = value.trim();
    let sign_len = usize::from(value.starts_with(['-', '+']));
    let digits_end = value[sign_len..]
        .find(|c: char| !c.is_ascii_digit())
        .map_or(value.len(), |i| i + sign_len);

    if digits_end == sign_len {
        return None;
    }
    value[..digits_end].parse().ok()
}

/// Comma-separated country list, trimmed, blanks removed.
fn split_countries(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(String::from)
        .collect()
}
