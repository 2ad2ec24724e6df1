//! Administrative-area centroids for area-level name resolution.

use crate::domain::Coordinate;

use super::normalize::{normalize_name, similarity};

/// A named administrative area with its centroid.
#[derive(Debug, Clone)]
pub struct Area {
    pub name: String,
    normalized: String,
    pub centroid: Coordinate,
}

/// Lookup over known administrative areas.
///
/// Purely static; a network data refresh does not touch it.
#[derive(Debug, Clone, Default)]
pub struct AreaIndex {
    areas: Vec<Area>,
}

/// Damascus districts and squares, with centroids.
const DAMASCUS_AREAS: &[(&str, f64, f64)] = &[
    ("دمشق القديمة", 33.5123, 36.2919),
    ("المزة", 33.5234, 36.2456),
    ("أبو رمانة", 33.5089, 36.2847),
    ("المالكي", 33.5156, 36.3089),
    ("الشعلان", 33.5067, 36.2734),
    ("القصاع", 33.5201, 36.2623),
    ("المهاجرين", 33.5298, 36.2891),
    ("الصالحية", 33.5345, 36.2756),
    ("باب توما", 33.5156, 36.3089),
    ("القيمرية", 33.5098, 36.2945),
    ("ساحة الأمويين", 33.5123, 36.2919),
    ("ساحة العباسيين", 33.5089, 36.2847),
    ("ساحة المحافظة", 33.5067, 36.2734),
    ("جادات سلمية", 33.4987, 36.3123),
    ("الكسوة", 33.4234, 36.2456),
];

impl AreaIndex {
    /// Build an index from (name, centroid) pairs.
    pub fn new(areas: impl IntoIterator<Item = (String, Coordinate)>) -> Self {
        let areas = areas
            .into_iter()
            .map(|(name, centroid)| Area {
                normalized: normalize_name(&name),
                name,
                centroid,
            })
            .collect();
        Self { areas }
    }

    /// The built-in Damascus area table.
    pub fn damascus() -> Self {
        Self::new(DAMASCUS_AREAS.iter().map(|(name, lat, lon)| {
            let centroid =
                Coordinate::new(*lat, *lon).expect("built-in area centroid is valid");
            ((*name).to_string(), centroid)
        }))
    }

    pub fn is_empty(&self) -> bool {
        self.areas.is_empty()
    }

    /// Exact normalized-name lookup.
    pub fn find(&self, normalized: &str) -> Option<&Area> {
        self.areas.iter().find(|a| a.normalized == normalized)
    }

    /// Best fuzzy match at or above `floor`, if any.
    ///
    /// Ties prefer the earlier table entry, keeping results reproducible.
    pub fn fuzzy_find(&self, normalized: &str, floor: f64) -> Option<(&Area, f64)> {
        self.areas
            .iter()
            .rev()
            .map(|a| (a, similarity(normalized, &a.normalized)))
            .filter(|(_, sim)| *sim >= floor)
            .max_by(|(_, x), (_, y)| x.partial_cmp(y).unwrap_or(std::cmp::Ordering::Equal))
    }

    /// The nearest known area to a coordinate, with its distance in meters.
    pub fn nearest(&self, point: Coordinate) -> Option<(&Area, f64)> {
        self.areas
            .iter()
            .map(|a| (a, point.distance_m(&a.centroid)))
            .min_by(|(_, x), (_, y)| x.partial_cmp(y).unwrap_or(std::cmp::Ordering::Equal))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_find_is_normalized() {
        let areas = AreaIndex::damascus();
        assert!(areas.find(&normalize_name("ساحه الامويين")).is_some());
        assert!(areas.find(&normalize_name("مكان مجهول تماما")).is_none());
    }

    #[test]
    fn fuzzy_find_tolerates_typos() {
        let areas = AreaIndex::damascus();
        let (area, sim) = areas
            .fuzzy_find(&normalize_name("الصالحيه القديمة"), 0.5)
            .unwrap();
        assert_eq!(area.name, "الصالحية");
        assert!(sim >= 0.5);
    }

    #[test]
    fn fuzzy_find_tie_prefers_earlier_entry() {
        let centroid = Coordinate::new(33.5, 36.3).unwrap();
        let areas = AreaIndex::new([
            ("abcd".to_string(), centroid),
            ("abce".to_string(), centroid),
        ]);
        // Both entries sit at similarity 0.75 to the query.
        let (area, sim) = areas.fuzzy_find("abcf", 0.5).unwrap();
        assert_eq!(area.name, "abcd");
        assert!((sim - 0.75).abs() < 1e-9);
    }

    #[test]
    fn fuzzy_find_respects_floor() {
        let areas = AreaIndex::damascus();
        assert!(areas.fuzzy_find("xyzzy", 0.6).is_none());
    }

    #[test]
    fn nearest_area() {
        let areas = AreaIndex::damascus();
        let near_mazzeh = Coordinate::new(33.5230, 36.2460).unwrap();
        let (area, distance) = areas.nearest(near_mazzeh).unwrap();
        assert_eq!(area.name, "المزة");
        assert!(distance < 200.0);
    }
}
