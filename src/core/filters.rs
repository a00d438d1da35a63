use std::collections::HashSet;
use crate::models::{
    BudgetRange, Candidate, CandidateProfile, FilterCriteria, Gender, Location, LocationFilter,
    PriceRange,
};

/// Trimmed, lowercased form used for every attribute comparison
#[inline]
pub(crate) fn normalize(value: &str) -> String {
    value.trim().to_lowercase()
}

/// Check every hard constraint in `criteria` against a candidate
///
/// Missing optional candidate fields never match a constraint that needs them.
pub fn passes_hard_constraints(candidate: &Candidate, criteria: &FilterCriteria) -> bool {
    if candidate.kind() != criteria.kind() {
        return false;
    }

    if !within_budget(candidate.price.as_ref(), criteria.budget()) {
        return false;
    }

    if !matches_location(&candidate.location, criteria.location()) {
        return false;
    }

    match (&candidate.profile, criteria) {
        (CandidateProfile::Accommodation(profile), FilterCriteria::Accommodation(c)) => {
            contains_all(&profile.amenities, &c.required_amenities)
                && fits_group(profile.max_group_size, c.group_size)
        }
        (CandidateProfile::Guide(profile), FilterCriteria::Guide(c)) => {
            contains_all(&profile.languages, &c.languages)
                && matches_gender(profile.gender, c.gender_preference)
        }
        _ => false,
    }
}

/// Keep only the candidates that satisfy every hard constraint
pub fn filter_candidates(candidates: Vec<Candidate>, criteria: &FilterCriteria) -> Vec<Candidate> {
    candidates
        .into_iter()
        .filter(|candidate| passes_hard_constraints(candidate, criteria))
        .collect()
}

/// Names of the hard constraints that actually restrict this request
pub fn applied_filters(criteria: &FilterCriteria) -> Vec<String> {
    let mut applied = vec!["budget".to_string()];

    if criteria.required().iter().any(|r| !r.trim().is_empty()) {
        let name = match criteria {
            FilterCriteria::Accommodation(_) => "amenities",
            FilterCriteria::Guide(_) => "languages",
        };
        applied.push(name.to_string());
    }

    let location = criteria.location();
    if !location.is_empty() {
        applied.push("location".to_string());
        if location.city_only && location.district.is_some() {
            applied.push("city_only".to_string());
        }
    }

    // Group size always constrains accommodations, even a solo traveller
    match criteria {
        FilterCriteria::Accommodation(_) => {
            applied.push("group_size".to_string());
        }
        FilterCriteria::Guide(c) if c.gender_preference.is_some() => {
            applied.push("gender".to_string());
        }
        _ => {}
    }

    applied
}

/// Price range must intersect the budget window
#[inline]
pub fn within_budget(price: Option<&PriceRange>, budget: &BudgetRange) -> bool {
    match price {
        Some(price) => price.min <= budget.max && price.max >= budget.min,
        None => false,
    }
}

/// Set inclusion: the candidate must offer every non-blank required value
pub fn contains_all(offered: &[String], required: &[String]) -> bool {
    if required.is_empty() {
        return true;
    }

    let offered: HashSet<String> = offered.iter().map(|v| normalize(v)).collect();
    required
        .iter()
        .map(|r| normalize(r))
        .filter(|r| !r.is_empty())
        .all(|r| offered.contains(&r))
}

/// District and province act as alternative granularities unless `city_only`
pub fn matches_location(location: &Location, filter: &LocationFilter) -> bool {
    if filter.is_empty() {
        return true;
    }

    let district_match = field_matches(location.district.as_deref(), filter.district.as_deref());

    if filter.city_only && filter.district.is_some() {
        return district_match;
    }

    let province_match = field_matches(location.province.as_deref(), filter.province.as_deref());
    district_match || province_match
}

#[inline]
fn field_matches(actual: Option<&str>, wanted: Option<&str>) -> bool {
    match (actual, wanted) {
        (Some(actual), Some(wanted)) => normalize(actual) == normalize(wanted),
        _ => false,
    }
}

#[inline]
pub fn matches_gender(gender: Option<Gender>, preference: Option<Gender>) -> bool {
    match preference {
        Some(wanted) => gender == Some(wanted),
        None => true,
    }
}

/// Listings without a declared capacity never satisfy a group size
#[inline]
pub fn fits_group(max_group_size: Option<u32>, group_size: u32) -> bool {
    match max_group_size {
        Some(max) => max >= group_size,
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AccommodationCriteria, AccommodationProfile, GuideCriteria, GuideProfile};

    fn accommodation(id: &str, price: f64, amenities: &[&str]) -> Candidate {
        Candidate {
            id: id.to_string(),
            name: format!("Stay {}", id),
            location: Location {
                district: Some("Chiang Mai".to_string()),
                province: Some("Chiang Mai".to_string()),
            },
            price: Some(PriceRange::fixed(price)),
            rating: Some(4.0),
            in_system: false,
            profile: CandidateProfile::Accommodation(AccommodationProfile {
                amenities: amenities.iter().map(|a| a.to_string()).collect(),
                interests: vec![],
                travel_styles: vec![],
                max_group_size: Some(4),
            }),
        }
    }

    fn guide(id: &str, languages: &[&str], gender: Option<Gender>) -> Candidate {
        Candidate {
            id: id.to_string(),
            name: format!("Guide {}", id),
            location: Location {
                district: Some("Mueang Phuket".to_string()),
                province: Some("Phuket".to_string()),
            },
            price: Some(PriceRange::new(1000.0, 2000.0)),
            rating: None,
            in_system: false,
            profile: CandidateProfile::Guide(GuideProfile {
                languages: languages.iter().map(|l| l.to_string()).collect(),
                expertise: vec![],
                gender,
            }),
        }
    }

    fn accommodation_criteria(amenities: &[&str]) -> FilterCriteria {
        FilterCriteria::Accommodation(AccommodationCriteria {
            budget: BudgetRange::new(1000.0, 5000.0),
            required_amenities: amenities.iter().map(|a| a.to_string()).collect(),
            interests: vec![],
            travel_style: None,
            location: LocationFilter::default(),
            group_size: 2,
        })
    }

    fn guide_criteria(gender: Option<Gender>) -> FilterCriteria {
        FilterCriteria::Guide(GuideCriteria {
            budget: BudgetRange::new(500.0, 1500.0),
            languages: vec!["English".to_string()],
            expertise: vec![],
            location: LocationFilter::default(),
            gender_preference: gender,
        })
    }

    #[test]
    fn test_budget_intersection() {
        let budget = BudgetRange::new(1000.0, 5000.0);
        assert!(within_budget(Some(&PriceRange::fixed(2500.0)), &budget));
        assert!(within_budget(Some(&PriceRange::new(4000.0, 8000.0)), &budget));
        assert!(!within_budget(Some(&PriceRange::fixed(800.0)), &budget));
        assert!(!within_budget(Some(&PriceRange::fixed(6000.0)), &budget));
        assert!(!within_budget(None, &budget));
    }

    #[test]
    fn test_required_amenities_are_anded() {
        let criteria = accommodation_criteria(&["wifi", "pool"]);
        assert!(!passes_hard_constraints(&accommodation("a", 2000.0, &["wifi"]), &criteria));
        assert!(passes_hard_constraints(
            &accommodation("b", 2000.0, &["WiFi ", "Pool", "gym"]),
            &criteria
        ));
    }

    #[test]
    fn test_empty_required_set_is_no_constraint() {
        assert!(contains_all(&[], &[]));
        assert!(passes_hard_constraints(&accommodation("a", 2000.0, &[]), &accommodation_criteria(&[])));
    }

    #[test]
    fn test_location_granularity() {
        let location = Location {
            district: Some("Pai".to_string()),
            province: Some("Mae Hong Son".to_string()),
        };

        let by_province = LocationFilter {
            district: Some("Mae Sariang".to_string()),
            province: Some("mae hong son".to_string()),
            city_only: false,
        };
        assert!(matches_location(&location, &by_province));

        let exact_city = LocationFilter { city_only: true, ..by_province.clone() };
        assert!(!matches_location(&location, &exact_city));

        let exact_pai = LocationFilter {
            district: Some("pai".to_string()),
            province: None,
            city_only: true,
        };
        assert!(matches_location(&location, &exact_pai));

        let unknown = Location::default();
        assert!(!matches_location(&unknown, &by_province));
        assert!(matches_location(&unknown, &LocationFilter::default()));
    }

    #[test]
    fn test_gender_preference() {
        let candidates = vec![
            guide("1", &["english"], Some(Gender::Female)),
            guide("2", &["english"], Some(Gender::Male)),
            guide("3", &["english"], None),
        ];

        let female = filter_candidates(candidates.clone(), &guide_criteria(Some(Gender::Female)));
        assert_eq!(female.len(), 1);
        assert_eq!(female[0].id, "1");

        let any = filter_candidates(candidates, &guide_criteria(None));
        assert_eq!(any.len(), 3);
    }

    #[test]
    fn test_kind_mismatch_excluded() {
        let candidate = guide("1", &["english"], None);
        assert!(!passes_hard_constraints(&candidate, &accommodation_criteria(&[])));
    }

    #[test]
    fn test_group_size() {
        assert!(fits_group(Some(4), 4));
        assert!(!fits_group(Some(2), 3));
        assert!(!fits_group(None, 1));
        assert!(!fits_group(None, 2));
    }

    #[test]
    fn test_missing_capacity_excluded_for_solo_traveller() {
        let mut candidate = accommodation("no-capacity", 2000.0, &[]);
        if let CandidateProfile::Accommodation(ref mut profile) = candidate.profile {
            profile.max_group_size = None;
        }
        let solo = FilterCriteria::Accommodation(AccommodationCriteria {
            budget: BudgetRange::new(1000.0, 5000.0),
            required_amenities: vec![],
            interests: vec![],
            travel_style: None,
            location: LocationFilter::default(),
            group_size: 1,
        });

        assert!(!passes_hard_constraints(&candidate, &solo));
        assert_eq!(applied_filters(&solo), vec!["budget", "group_size"]);
    }

    #[test]
    fn test_applied_filters() {
        let applied = applied_filters(&accommodation_criteria(&["wifi"]));
        assert_eq!(applied, vec!["budget", "amenities", "group_size"]);

        let applied = applied_filters(&guide_criteria(Some(Gender::Male)));
        assert_eq!(applied, vec!["budget", "languages", "gender"]);
    }
}
