//! In-memory facet extraction and filtering over a built catalog.

use std::borrow::Cow;
use std::collections::BTreeSet;

use climatemap_shared::{ClimateMapError, Entry};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Facets
// ---------------------------------------------------------------------------

/// Selector for an [`Entry`] field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FacetField {
    Id,
    Name,
    Website,
    IsRobotics,
    IsDeployed,
    Founded,
    CountryHq,
    ContinentHq,
    DeploymentCountries,
    RoboticsType,
    MainApplication,
    AdditionalApplication,
    AdaptationMitigation,
    BiomeType,
    Description,
    LinkedIn,
    Coordinates,
    LogoUrl,
}

impl FacetField {
    pub const ALL: [FacetField; 18] = [
        Self::Id,
        Self::Name,
        Self::Website,
        Self::IsRobotics,
        Self::IsDeployed,
        Self::Founded,
        Self::CountryHq,
        Self::ContinentHq,
        Self::DeploymentCountries,
        Self::RoboticsType,
        Self::MainApplication,
        Self::AdditionalApplication,
        Self::AdaptationMitigation,
        Self::BiomeType,
        Self::Description,
        Self::LinkedIn,
        Self::Coordinates,
        Self::LogoUrl,
    ];

    /// camelCase name, as used in the serialized entry.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Name => "name",
            Self::Website => "website",
            Self::IsRobotics => "isRobotics",
            Self::IsDeployed => "isDeployed",
            Self::Founded => "founded",
            Self::CountryHq => "countryHq",
            Self::ContinentHq => "continentHq",
            Self::DeploymentCountries => "deploymentCountries",
            Self::RoboticsType => "roboticsType",
            Self::MainApplication => "mainApplication",
            Self::AdditionalApplication => "additionalApplication",
            Self::AdaptationMitigation => "adaptationMitigation",
            Self::BiomeType => "biomeType",
            Self::Description => "description",
            Self::LinkedIn => "linkedIn",
            Self::Coordinates => "coordinates",
            Self::LogoUrl => "logoUrl",
        }
    }

    /// String value of this field, or `None` for non-string fields.
    pub fn text(self, entry: &Entry) -> Option<Cow<'_, str>> {
        let value = match self {
            Self::Id => return Some(Cow::Owned(entry.id.to_string())),
            Self::Name => &entry.name,
            Self::Website => &entry.website,
            Self::CountryHq => &entry.country_hq,
            Self::ContinentHq => &entry.continent_hq,
            Self::RoboticsType => &entry.robotics_type,
            Self::MainApplication => &entry.main_application,
            Self::AdditionalApplication => &entry.additional_application,
            Self::AdaptationMitigation => &entry.adaptation_mitigation,
            Self::BiomeType => &entry.biome_type,
            Self::Description => &entry.description,
            Self::LinkedIn => &entry.linked_in,
            Self::LogoUrl => return entry.logo_url.as_deref().map(Cow::Borrowed),
            Self::IsRobotics
            | Self::IsDeployed
            | Self::Founded
            | Self::DeploymentCountries
            | Self::Coordinates => return None,
        };
        Some(Cow::Borrowed(value.as_str()))
    }
}

impl std::fmt::Display for FacetField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for FacetField {
    type Err = ClimateMapError;

    /// Accepts camelCase, snake_case or kebab-case, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let folded: String = s
            .chars()
            .filter(|c| !matches!(c, '_' | '-'))
            .flat_map(char::to_lowercase)
            .collect();

        Self::ALL
            .into_iter()
            .find(|field| field.as_str().to_lowercase() == folded)
            .ok_or_else(|| ClimateMapError::validation(format!("unknown field: {s}")))
    }
}

/// Distinct non-blank values of `field`, trimmed and sorted ascending.
///
/// Non-string fields yield an empty list.
pub fn unique_values(entries: &[Entry], field: FacetField) -> Vec<String> {
    entries
        .iter()
        .filter_map(|entry| field.text(entry))
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

// ---------------------------------------------------------------------------
// Filtering
// ---------------------------------------------------------------------------

/// Filter criteria. Absent or empty values are not applied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterCriteria {
    /// Case-insensitive substring of name, description, or HQ country.
    pub search: Option<String>,
    pub continent: Option<String>,
    pub robotics_type: Option<String>,
    /// Exact main application.
    pub application: Option<String>,
    pub biome: Option<String>,
}

impl FilterCriteria {
    /// True when `entry` satisfies every supplied criterion.
    pub fn matches(&self, entry: &Entry) -> bool {
        if let Some(search) = active(&self.search) {
            let needle = search.to_lowercase();
            let hit = [&entry.name, &entry.description, &entry.country_hq]
                .iter()
                .any(|field| field.to_lowercase().contains(&needle));
            if !hit {
                return false;
            }
        }

        exact(&self.continent, &entry.continent_hq)
            && exact(&self.robotics_type, &entry.robotics_type)
            && exact(&self.application, &entry.main_application)
            && exact(&self.biome, &entry.biome_type)
    }

    /// True when no criterion would be applied.
    pub fn is_empty(&self) -> bool {
        [
            &self.search,
            &self.continent,
            &self.robotics_type,
            &self.application,
            &self.biome,
        ]
        .into_iter()
        .all(|c| active(c).is_none())
    }
}

fn active(criterion: &Option<String>) -> Option<&str> {
    criterion.as_deref().filter(|s| !s.is_empty())
}

fn exact(criterion: &Option<String>, value: &str) -> bool {
    active(criterion).is_none_or(|wanted| wanted == value)
}

/// Entries satisfying all supplied criteria, in their original order.
pub fn filter_entries<'a>(entries: &'a [Entry], criteria: &FilterCriteria) -> Vec<&'a Entry> {
    entries.iter().filter(|e| criteria.matches(e)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use climatemap_shared::{Coordinates, EntryId};

    fn entry(index: usize, name: &str, country: &str, continent: &str, kind: &str) -> Entry {
        Entry {
            id: EntryId::from_row(index),
            name: name.into(),
            website: String::new(),
            is_robotics: true,
            is_deployed: false,
            founded: None,
            country_hq: country.into(),
            continent_hq: continent.into(),
            deployment_countries: vec![],
            robotics_type: kind.into(),
            main_application: String::new(),
            additional_application: String::new(),
            adaptation_mitigation: String::new(),
            biome_type: String::new(),
            description: String::new(),
            linked_in: String::new(),
            coordinates: Some(Coordinates::new(0.0, 0.0)),
            logo_url: None,
        }
    }

    fn catalog() -> Vec<Entry> {
        vec![
            entry(0, "SkyNet", "Kenya", "Africa", "Aerial Robot"),
            entry(1, "AquaBot", "Chile", "South America", "Underwater Robot"),
            entry(2, "TerraCrawler", "Kenya", "Africa", "Ground Robot"),
        ]
    }

    fn names(entries: Vec<&Entry>) -> Vec<&str> {
        entries.into_iter().map(|e| e.name.as_str()).collect()
    }

    #[test]
    fn facets_combine_with_and() {
        let entries = catalog();
        let criteria = FilterCriteria {
            continent: Some("Africa".into()),
            robotics_type: Some("Ground Robot".into()),
            ..Default::default()
        };
        assert_eq!(names(filter_entries(&entries, &criteria)), vec!["TerraCrawler"]);
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let entries = catalog();
        let criteria = FilterCriteria {
            search: Some("sky".into()),
            ..Default::default()
        };
        assert_eq!(names(filter_entries(&entries, &criteria)), vec!["SkyNet"]);
    }

    #[test]
    fn search_matches_country_or_description() {
        let mut entries = catalog();
        entries[1].description = "Swims under Antarctic ice".into();

        let by_country = FilterCriteria {
            search: Some("KENYA".into()),
            ..Default::default()
        };
        assert_eq!(
            names(filter_entries(&entries, &by_country)),
            vec!["SkyNet", "TerraCrawler"]
        );

        let by_description = FilterCriteria {
            search: Some("antarctic".into()),
            ..Default::default()
        };
        assert_eq!(names(filter_entries(&entries, &by_description)), vec!["AquaBot"]);
    }

    #[test]
    fn empty_criteria_keep_everything() {
        let entries = catalog();
        let criteria = FilterCriteria {
            search: Some(String::new()),
            continent: Some(String::new()),
            ..Default::default()
        };
        assert!(criteria.is_empty());
        assert_eq!(filter_entries(&entries, &criteria).len(), 3);
        assert_eq!(filter_entries(&entries, &FilterCriteria::default()).len(), 3);
    }

    #[test]
    fn facet_match_is_exact() {
        let entries = catalog();
        let criteria = FilterCriteria {
            continent: Some("africa".into()),
            ..Default::default()
        };
        assert!(filter_entries(&entries, &criteria).is_empty());
    }

    #[test]
    fn unique_values_sorted_and_deduplicated() {
        let mut entries = catalog();
        entries[1].continent_hq = "  ".into();
        assert_eq!(unique_values(&entries, FacetField::ContinentHq), vec!["Africa"]);
        assert_eq!(
            unique_values(&entries, FacetField::RoboticsType),
            vec!["Aerial Robot", "Ground Robot", "Underwater Robot"]
        );
    }

    #[test]
    fn unique_values_of_non_string_field_is_empty() {
        let entries = catalog();
        assert!(unique_values(&entries, FacetField::Founded).is_empty());
        assert!(unique_values(&entries, FacetField::IsRobotics).is_empty());
        assert!(unique_values(&entries, FacetField::Coordinates).is_empty());
        assert!(unique_values(&entries, FacetField::LogoUrl).is_empty());
    }

    #[test]
    fn facet_field_parses_any_case_style() {
        assert_eq!("roboticsType".parse::<FacetField>().unwrap(), FacetField::RoboticsType);
        assert_eq!("robotics-type".parse::<FacetField>().unwrap(), FacetField::RoboticsType);
        assert_eq!("biome_type".parse::<FacetField>().unwrap(), FacetField::BiomeType);
        assert_eq!("LinkedIn".parse::<FacetField>().unwrap(), FacetField::LinkedIn);
        assert!("colour".parse::<FacetField>().is_err());
    }

    #[test]
    fn criteria_deserialize_from_json() {
        let criteria: FilterCriteria =
            serde_json::from_str(r#"{"roboticsType":"Aerial Robot"}"#).unwrap();
        assert_eq!(criteria.robotics_type.as_deref(), Some("Aerial Robot"));
        assert!(criteria.search.is_none());
    }
}
