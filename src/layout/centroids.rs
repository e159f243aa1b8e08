use crate::core::country::Country;
use crate::layout::geometry::GeoPoint;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Hub coordinate used when the configured hub country is missing from
/// the centroid data: central London.
pub const LONDON_FALLBACK: GeoPoint = GeoPoint {
    lat: 51.5072,
    lon: -0.1276,
};

/// Hub country names tried in order when none is configured explicitly.
pub const DEFAULT_HUB_CANDIDATES: [&str; 2] = ["United Kingdom", "UK"];

/// Reference mapping from country name to geographic centroid.
///
/// The index is consumed as data (typically derived upstream from a
/// shapefile); this crate never computes centroids itself. Lookups are
/// tolerant of capitalization differences between transaction data and
/// the reference set.
///
/// Serialized as a JSON object of `"name": [lat, lon]` entries.
///
/// # Examples
///
/// ```
/// use flowmap_engine::core::country::Country;
/// use flowmap_engine::layout::centroids::CentroidIndex;
/// use flowmap_engine::layout::geometry::GeoPoint;
///
/// let mut index = CentroidIndex::new();
/// index.insert(Country::new("France"), GeoPoint::new(46.2, 2.2));
///
/// assert!(index.resolve(&Country::new("FRANCE")).is_some());
/// assert!(index.resolve(&Country::new("Atlantis")).is_none());
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CentroidIndex {
    centroids: BTreeMap<Country, GeoPoint>,
}

impl CentroidIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, country: Country, centroid: GeoPoint) {
        self.centroids.insert(country, centroid);
    }

    pub fn len(&self) -> usize {
        self.centroids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.centroids.is_empty()
    }

    /// Find the centroid for a country: exact match first, then a
    /// case-insensitive scan.
    pub fn resolve(&self, country: &Country) -> Option<GeoPoint> {
        if let Some(point) = self.centroids.get(country) {
            return Some(*point);
        }
        self.centroids
            .iter()
            .find(|(name, _)| name.matches_ignore_case(country.as_str()))
            .map(|(_, point)| *point)
    }

    /// Resolve the hub location: the first candidate name present in the
    /// index wins, otherwise the fallback constant.
    pub fn hub_or_default(&self, candidates: &[&str], fallback: GeoPoint) -> GeoPoint {
        candidates
            .iter()
            .find_map(|name| self.resolve(&Country::new(*name)))
            .unwrap_or(fallback)
    }

    /// All known countries and centroids in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&Country, &GeoPoint)> {
        self.centroids.iter()
    }
}

impl FromIterator<(Country, GeoPoint)> for CentroidIndex {
    fn from_iter<T: IntoIterator<Item = (Country, GeoPoint)>>(iter: T) -> Self {
        Self {
            centroids: iter.into_iter().collect(),
        }
    }
}
