//! Regions and ordered region sets.
//!
//! A `RegionSet` keeps catalog order for presentation while the algebra
//! works on region codes only.

use crate::core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A deployable location.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Region {
    /// Unique region code (e.g. `eastus`)
    pub code: String,
    /// Human-readable name (e.g. `East US`)
    pub display_name: String,
}

impl Region {
    /// Create a new region.
    pub fn new(code: &str, display_name: &str) -> Self {
        Self {
            code: code.to_string(),
            display_name: display_name.to_string(),
        }
    }
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.display_name, self.code)
    }
}

/// Ordered collection of regions with unique codes.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct RegionSet {
    regions: Vec<Region>,
}

impl RegionSet {
    /// Create an empty set.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a set, rejecting duplicate codes.
    pub fn new(regions: Vec<Region>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(regions.len());
        for region in &regions {
            if !seen.insert(region.code.as_str()) {
                return Err(Error::DuplicateRegion(region.code.clone()));
            }
        }
        Ok(Self { regions })
    }

    /// Build a set keeping only the first region seen for each code.
    pub fn dedup_from<I: IntoIterator<Item = Region>>(regions: I) -> Self {
        let mut seen = HashSet::new();
        let regions = regions
            .into_iter()
            .filter(|r| seen.insert(r.code.clone()))
            .collect();
        Self { regions }
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Region> {
        self.regions.iter()
    }

    pub fn as_slice(&self) -> &[Region] {
        &self.regions
    }

    /// Look up a region by code.
    pub fn get(&self, code: &str) -> Option<&Region> {
        self.regions.iter().find(|r| r.code == code)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.get(code).is_some()
    }

    /// Region codes in set order.
    pub fn codes(&self) -> Vec<&str> {
        self.regions.iter().map(|r| r.code.as_str()).collect()
    }

    fn code_set(&self) -> HashSet<&str> {
        self.regions.iter().map(|r| r.code.as_str()).collect()
    }

    /// Regions of `self` whose code also appears in `other`, in `self`'s order.
    ///
    /// `a.intersection(&b)` and `b.intersection(&a)` hold the same codes but
    /// may differ in order; compare with [`RegionSet::sorted_by_code`].
    pub fn intersection(&self, other: &RegionSet) -> RegionSet {
        let members = other.code_set();
        let regions = self
            .regions
            .iter()
            .filter(|r| members.contains(r.code.as_str()))
            .cloned()
            .collect();
        RegionSet { regions }
    }

    /// Regions of `self` whose code does not appear in `other`, in `self`'s order.
    pub fn difference(&self, other: &RegionSet) -> RegionSet {
        let members = other.code_set();
        let regions = self
            .regions
            .iter()
            .filter(|r| !members.contains(r.code.as_str()))
            .cloned()
            .collect();
        RegionSet { regions }
    }

    /// Fold intersection over many sets, keeping the order of `self`.
    pub fn intersect_all<'a, I>(&self, others: I) -> RegionSet
    where
        I: IntoIterator<Item = &'a RegionSet>,
    {
        others
            .into_iter()
            .fold(self.clone(), |acc, other| acc.intersection(other))
    }

    /// Copy of the set ordered by region code.
    pub fn sorted_by_code(&self) -> RegionSet {
        let mut regions = self.regions.clone();
        regions.sort_by(|a, b| a.code.cmp(&b.code));
        RegionSet { regions }
    }
}

impl<'a> IntoIterator for &'a RegionSet {
    type Item = &'a Region;
    type IntoIter = std::slice::Iter<'a, Region>;

    fn into_iter(self) -> Self::IntoIter {
        self.regions.iter()
    }
}

impl IntoIterator for RegionSet {
    type Item = Region;
    type IntoIter = std::vec::IntoIter<Region>;

    fn into_iter(self) -> Self::IntoIter {
        self.regions.into_iter()
    }
}

impl<'de> Deserialize<'de> for RegionSet {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            regions: Vec<Region>,
        }
        let raw = Raw::deserialize(deserializer)?;
        RegionSet::new(raw.regions).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn set(codes: &[&str]) -> RegionSet {
        RegionSet::new(codes.iter().map(|c| Region::new(c, &c.to_uppercase())).collect()).unwrap()
    }

    #[test]
    fn test_duplicate_codes_rejected() {
        let result = RegionSet::new(vec![Region::new("eastus", "East US"), Region::new("eastus", "East US 1")]);
        assert!(matches!(result, Err(Error::DuplicateRegion(code)) if code == "eastus"));
    }

    #[test]
    fn test_dedup_keeps_first() {
        let set = RegionSet::dedup_from(vec![
            Region::new("eastus", "East US"),
            Region::new("westus", "West US"),
            Region::new("eastus", "Other"),
        ]);
        assert_eq!(set.codes(), vec!["eastus", "westus"]);
        assert_eq!(set.get("eastus").unwrap().display_name, "East US");
    }

    #[test]
    fn test_intersection_follows_first_argument_order() {
        let a = set(&["eastus", "westus", "norway"]);
        let b = set(&["westus", "norway", "centralus"]);
        assert_eq!(a.intersection(&b).codes(), vec!["westus", "norway"]);
    }

    #[test]
    fn test_intersection_asymmetric_order() {
        let a = set(&["norway", "eastus", "westus"]);
        let b = set(&["westus", "eastus", "centralus"]);
        assert_eq!(a.intersection(&b).codes(), vec!["eastus", "westus"]);
        assert_eq!(b.intersection(&a).codes(), vec!["westus", "eastus"]);
        assert_eq!(a.intersection(&b).sorted_by_code(), b.intersection(&a).sorted_by_code());
    }

    fn arb_region_set() -> impl Strategy<Value = RegionSet> {
        prop::collection::vec("[a-h]{1,2}", 0..16)
            .prop_map(|codes| RegionSet::dedup_from(codes.iter().map(|c| Region::new(c, c))))
    }

    proptest! {
        #[test]
        fn intersection_is_subset_of_both(a in arb_region_set(), b in arb_region_set()) {
            let both = a.intersection(&b);
            prop_assert!(both.iter().all(|r| a.contains(&r.code) && b.contains(&r.code)));
            prop_assert!(a.iter().filter(|r| b.contains(&r.code)).all(|r| both.contains(&r.code)));
        }

        #[test]
        fn difference_and_intersection_partition(a in arb_region_set(), b in arb_region_set()) {
            let diff = a.difference(&b);
            let inter = a.intersection(&b);
            prop_assert!(diff.intersection(&inter).is_empty());
            prop_assert_eq!(diff.len() + inter.len(), a.len());

            let mut rebuilt: Vec<Region> = diff.into_iter().collect();
            rebuilt.extend(inter);
            let rebuilt = RegionSet::new(rebuilt).unwrap().sorted_by_code();
            prop_assert_eq!(rebuilt, a.sorted_by_code());
        }

        #[test]
        fn identities_hold(a in arb_region_set()) {
            let empty = RegionSet::empty();
            prop_assert_eq!(a.intersection(&a), a.clone());
            prop_assert!(a.intersection(&empty).is_empty());
            prop_assert_eq!(a.difference(&empty), a.clone());
            prop_assert!(a.difference(&a).is_empty());
        }

        #[test]
        fn intersection_keeps_first_argument_order(a in arb_region_set(), b in arb_region_set()) {
            let expected: Vec<&str> = a
                .iter()
                .filter(|r| b.contains(&r.code))
                .map(|r| r.code.as_str())
                .collect();
            let actual = a.intersection(&b);
            prop_assert_eq!(actual.codes(), expected);
        }
    }

    #[test]
    fn test_intersect_all() {
        let a = set(&["eastus", "westus", "norway"]);
        let b = set(&["westus", "norway"]);
        let c = set(&["norway", "eastus"]);
        assert_eq!(a.intersect_all([&b, &c]).codes(), vec!["norway"]);
        assert_eq!(a.intersect_all(std::iter::empty()), a);
    }

    #[test]
    fn test_deserialize_rejects_duplicates() {
        let json = r#"{"regions":[{"code":"eastus","display_name":"East US"},{"code":"eastus","display_name":"x"}]}"#;
        assert!(serde_json::from_str::<RegionSet>(json).is_err());

        let json = r#"{"regions":[{"code":"eastus","display_name":"East US"}]}"#;
        let set: RegionSet = serde_json::from_str(json).unwrap();
        assert_eq!(set.codes(), vec!["eastus"]);
    }

    #[test]
    fn test_region_display() {
        assert_eq!(Region::new("eastus", "East US").to_string(), "East US (eastus)");
    }
}
