use crate::domain::types::{Location, RouteConstraints};

/// Routing budgets keyed off the administrative relationship between
/// pickup and delivery. The tier values are defaults and can be adjusted
/// per deployment; closer shipments always get the tighter budget.
#[derive(Debug, Clone)]
pub struct ConstraintPolicy {
    pub same_district: RouteConstraints,
    pub same_province: RouteConstraints,
    pub cross_province: RouteConstraints,
}

impl Default for ConstraintPolicy {
    fn default() -> Self {
        ConstraintPolicy {
            same_district: RouteConstraints {
                max_stops: 2,
                max_transit_hubs: 0,
                max_same_district_stops: 0,
            },
            same_province: RouteConstraints {
                max_stops: 3,
                max_transit_hubs: 0,
                max_same_district_stops: 1,
            },
            cross_province: RouteConstraints {
                max_stops: 5,
                max_transit_hubs: 1,
                max_same_district_stops: 1,
            },
        }
    }
}

impl ConstraintPolicy {
    /// Derive the budget for one shipment. Province equality is checked
    /// first: two districts with the same name in different provinces are
    /// not the same district.
    pub fn derive(&self, start: &Location, end: &Location) -> RouteConstraints {
        let same_province = start.province == end.province;
        let same_district = same_province && start.district == end.district;

        if same_district {
            self.same_district
        } else if same_province {
            self.same_province
        } else {
            self.cross_province
        }
    }
}
