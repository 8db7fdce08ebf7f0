//! Country → coordinate lookup table.
//!
//! Coordinates are a capital or rough centroid, good enough for a world map
//! marker. The table is plain data; extra aliases come from `[countries]` in
//! the config file.

use std::collections::{BTreeMap, HashMap};

use climatemap_shared::Coordinates;

/// Built-in table: `(name, latitude, longitude)`. Aliases repeat coordinates.
pub const BUILTIN_COUNTRIES: &[(&str, f64, f64)] = &[
    // North America
    ("US", 39.8283, -98.5795),
    ("USA", 39.8283, -98.5795),
    ("United States", 39.8283, -98.5795),
    ("Canada", 56.1304, -106.3468),
    ("Mexico", 23.6345, -102.5528),
    // Europe
    ("UK", 55.3781, -3.4360),
    ("United Kingdom", 55.3781, -3.4360),
    ("Germany", 51.1657, 10.4515),
    ("France", 46.2276, 2.2137),
    ("Spain", 40.4637, -3.7492),
    ("Italy", 41.8719, 12.5674),
    ("Netherlands", 52.1326, 5.2913),
    ("Belgium", 50.5039, 4.4699),
    ("Switzerland", 46.8182, 8.2275),
    ("Austria", 47.5162, 14.5501),
    ("Sweden", 60.1282, 18.6435),
    ("Norway", 60.4720, 8.4689),
    ("Denmark", 56.2639, 9.5018),
    ("Finland", 61.9241, 25.7482),
    ("Poland", 51.9194, 19.1451),
    ("Czech Republic", 49.8175, 15.4730),
    ("Portugal", 39.3999, -8.2245),
    ("Ireland", 53.1424, -7.6921),
    ("Greece", 39.0742, 21.8243),
    ("Hungary", 47.1625, 19.5033),
    ("Romania", 45.9432, 24.9668),
    ("Bulgaria", 42.7339, 25.4858),
    ("Croatia", 45.1000, 15.2000),
    ("Slovenia", 46.1512, 14.9955),
    ("Slovakia", 48.6690, 19.6990),
    ("Estonia", 58.5953, 25.0136),
    ("Latvia", 56.8796, 24.6032),
    ("Lithuania", 55.1694, 23.8813),
    ("Luxembourg", 49.8153, 6.1296),
    ("Iceland", 64.9631, -19.0208),
    ("Serbia", 44.0165, 21.0059),
    ("Ukraine", 48.3794, 31.1656),
    ("Belarus", 53.7098, 27.9534),
    ("Moldova", 47.4116, 28.3699),
    // Asia
    ("China", 35.8617, 104.1954),
    ("Japan", 36.2048, 138.2529),
    ("South Korea", 35.9078, 127.7669),
    ("Korea", 35.9078, 127.7669),
    ("India", 20.5937, 78.9629),
    ("Singapore", 1.3521, 103.8198),
    ("Taiwan", 23.6978, 120.9605),
    ("Hong Kong", 22.3193, 114.1694),
    ("Israel", 31.0461, 34.8516),
    ("UAE", 23.4241, 53.8478),
    ("United Arab Emirates", 23.4241, 53.8478),
    ("Saudi Arabia", 23.8859, 45.0792),
    ("Qatar", 25.3548, 51.1839),
    ("Thailand", 15.8700, 100.9925),
    ("Vietnam", 14.0583, 108.2772),
    ("Malaysia", 4.2105, 101.9758),
    ("Indonesia", -0.7893, 113.9213),
    ("Philippines", 12.8797, 121.7740),
    ("Pakistan", 30.3753, 69.3451),
    ("Bangladesh", 23.6850, 90.3563),
    ("Kazakhstan", 48.0196, 66.9237),
    ("Turkey", 38.9637, 35.2433),
    ("Iran", 32.4279, 53.6880),
    // Oceania
    ("Australia", -25.2744, 133.7751),
    ("New Zealand", -40.9006, 174.8860),
    // South America
    ("Brazil", -14.2350, -51.9253),
    ("Argentina", -38.4161, -63.6167),
    ("Chile", -35.6751, -71.5430),
    ("Colombia", 4.5709, -74.2973),
    ("Peru", -9.1900, -75.0152),
    ("Ecuador", -1.8312, -78.1834),
    ("Venezuela", 6.4238, -66.5897),
    ("Uruguay", -32.5228, -55.7658),
    ("Paraguay", -23.4425, -58.4438),
    ("Bolivia", -16.2902, -63.5887),
    // Africa
    ("South Africa", -30.5595, 22.9375),
    ("Nigeria", 9.0820, 8.6753),
    ("Kenya", -0.0236, 37.9062),
    ("Egypt", 26.8206, 30.8025),
    ("Morocco", 31.7917, -7.0926),
    ("Ethiopia", 9.1450, 40.4897),
    ("Ghana", 7.9465, -1.0232),
    ("Tanzania", -6.3690, 34.8888),
    ("Rwanda", -1.9403, 29.8739),
    ("Uganda", 1.3733, 32.2903),
    ("Tunisia", 33.8869, 9.5375),
    ("Algeria", 28.0339, 1.6596),
    ("Senegal", 14.4974, -14.4524),
    ("Côte d'Ivoire", 7.5400, -5.5471),
    ("Cameroon", 7.3697, 12.3547),
];

/// Country-name lookup with an exact pass and a case-insensitive fallback.
#[derive(Debug, Clone)]
pub struct CountryTable {
    exact: HashMap<String, Coordinates>,
    folded: HashMap<String, Coordinates>,
}

impl Default for CountryTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl CountryTable {
    /// Table containing only [`BUILTIN_COUNTRIES`].
    pub fn builtin() -> Self {
        let mut table = Self {
            exact: HashMap::with_capacity(BUILTIN_COUNTRIES.len()),
            folded: HashMap::with_capacity(BUILTIN_COUNTRIES.len()),
        };
        for &(name, lat, lng) in BUILTIN_COUNTRIES {
            table.insert(name, Coordinates::new(lat, lng));
        }
        table
    }

    /// Add (or override) entries, e.g. from the `[countries]` config section.
    pub fn with_aliases(mut self, aliases: &BTreeMap<String, [f64; 2]>) -> Self {
        for (name, pair) in aliases {
            self.insert(name, Coordinates::from(*pair));
        }
        if !aliases.is_empty() {
            tracing::debug!(count = aliases.len(), "merged configured country aliases");
        }
        self
    }

    fn insert(&mut self, name: &str, coords: Coordinates) {
        self.exact.insert(name.to_string(), coords);
        self.folded.insert(name.trim().to_lowercase(), coords);
    }

    /// Resolve a free-text country name. No fuzzy or partial matching.
    pub fn resolve(&self, country: &str) -> Option<Coordinates> {
        if country.is_empty() {
            return None;
        }

        self.exact
            .get(country)
            .or_else(|| self.folded.get(&country.trim().to_lowercase()))
            .copied()
    }

    pub fn len(&self) -> usize {
        self.exact.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exact.is_empty()
    }
}
