//! Predicates over close approaches

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use crate::types::LinkedApproach;

/// User-supplied predicate over one linked approach
pub type Predicate = Arc<dyn Fn(&LinkedApproach<'_>) -> bool + Send + Sync>;

/// How an attribute is compared with a reference value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Comparison {
    Eq,
    Le,
    Ge,
}

impl Comparison {
    /// Unordered values (NaN) never satisfy a comparison
    pub fn holds<T: PartialOrd + ?Sized>(self, value: &T, reference: &T) -> bool {
        match (self, value.partial_cmp(reference)) {
            (_, None) => false,
            (Comparison::Eq, Some(ord)) => ord == Ordering::Equal,
            (Comparison::Le, Some(ord)) => ord != Ordering::Greater,
            (Comparison::Ge, Some(ord)) => ord != Ordering::Less,
        }
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Comparison::Eq => write!(f, "=="),
            Comparison::Le => write!(f, "<="),
            Comparison::Ge => write!(f, ">="),
        }
    }
}

/// A filter on close approaches
///
/// Filters on NEO attributes (diameter, hazard flag, designation, name) never
/// match an approach that is not linked to a NEO.
#[derive(Clone)]
pub enum ApproachFilter {
    /// Calendar date of the approach
    Date(Comparison, NaiveDate),
    /// Approach distance in au
    Distance(Comparison, f64),
    /// Relative velocity in km/s
    Velocity(Comparison, f64),
    /// NEO diameter in km
    Diameter(Comparison, f64),
    /// NEO hazard flag
    Hazardous(bool),
    /// NEO primary designation
    Designation(String),
    /// NEO name (exact, case-sensitive)
    Name(String),
    /// Arbitrary predicate
    Custom(Predicate),
}

impl ApproachFilter {
    /// Wrap a closure as a filter
    pub fn custom<F>(predicate: F) -> Self
    where
        F: Fn(&LinkedApproach<'_>) -> bool + Send + Sync + 'static,
    {
        Self::Custom(Arc::new(predicate))
    }

    pub fn matches(&self, linked: &LinkedApproach<'_>) -> bool {
        let approach = linked.approach;
        match self {
            ApproachFilter::Date(op, date) => op.holds(&approach.time().date(), date),
            ApproachFilter::Distance(op, value) => op.holds(&approach.distance(), value),
            ApproachFilter::Velocity(op, value) => op.holds(&approach.velocity(), value),
            ApproachFilter::Diameter(op, value) => {
                linked.neo.is_some_and(|neo| op.holds(&neo.diameter(), value))
            }
            ApproachFilter::Hazardous(flag) => {
                linked.neo.is_some_and(|neo| neo.hazardous() == *flag)
            }
            ApproachFilter::Designation(designation) => {
                linked.neo.is_some_and(|neo| neo.designation() == designation)
            }
            ApproachFilter::Name(name) => linked
                .neo
                .is_some_and(|neo| neo.name() == Some(name.as_str())),
            ApproachFilter::Custom(predicate) => predicate(linked),
        }
    }
}

impl fmt::Debug for ApproachFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApproachFilter::Date(op, date) => write!(f, "Date({} {})", op, date),
            ApproachFilter::Distance(op, value) => write!(f, "Distance({} {})", op, value),
            ApproachFilter::Velocity(op, value) => write!(f, "Velocity({} {})", op, value),
            ApproachFilter::Diameter(op, value) => write!(f, "Diameter({} {})", op, value),
            ApproachFilter::Hazardous(flag) => write!(f, "Hazardous({})", flag),
            ApproachFilter::Designation(d) => write!(f, "Designation({:?})", d),
            ApproachFilter::Name(n) => write!(f, "Name({:?})", n),
            ApproachFilter::Custom(_) => write!(f, "Custom(..)"),
        }
    }
}

/// Optional query criteria, turned into a list of filters
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilterSet {
    pub date: Option<NaiveDate>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub distance_min: Option<f64>,
    pub distance_max: Option<f64>,
    pub velocity_min: Option<f64>,
    pub velocity_max: Option<f64>,
    pub diameter_min: Option<f64>,
    pub diameter_max: Option<f64>,
    pub hazardous: Option<bool>,
    pub designation: Option<String>,
    pub name: Option<String>,
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn between(mut self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        self.start_date = start;
        self.end_date = end;
        self
    }

    pub fn with_distance(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.distance_min = min;
        self.distance_max = max;
        self
    }

    pub fn with_velocity(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.velocity_min = min;
        self.velocity_max = max;
        self
    }

    pub fn with_diameter(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.diameter_min = min;
        self.diameter_max = max;
        self
    }

    pub fn hazardous(mut self, flag: bool) -> Self {
        self.hazardous = Some(flag);
        self
    }

    /// Build the filters for every criterion that is set
    pub fn build(&self) -> Vec<ApproachFilter> {
        use ApproachFilter as F;
        use Comparison::{Eq, Ge, Le};

        let mut filters = Vec::new();
        filters.extend(self.date.map(|d| F::Date(Eq, d)));
        filters.extend(self.start_date.map(|d| F::Date(Ge, d)));
        filters.extend(self.end_date.map(|d| F::Date(Le, d)));
        filters.extend(self.distance_min.map(|v| F::Distance(Ge, v)));
        filters.extend(self.distance_max.map(|v| F::Distance(Le, v)));
        filters.extend(self.velocity_min.map(|v| F::Velocity(Ge, v)));
        filters.extend(self.velocity_max.map(|v| F::Velocity(Le, v)));
        filters.extend(self.diameter_min.map(|v| F::Diameter(Ge, v)));
        filters.extend(self.diameter_max.map(|v| F::Diameter(Le, v)));
        filters.extend(self.hazardous.map(F::Hazardous));
        filters.extend(self.designation.clone().map(F::Designation));
        filters.extend(self.name.clone().map(F::Name));
        filters
    }
}

/// First `n` items of `iter`; `None` or zero means no limit
pub fn limit<I: Iterator>(iter: I, n: Option<usize>) -> std::iter::Take<I> {
    match n {
        Some(n) if n > 0 => iter.take(n),
        _ => iter.take(usize::MAX),
    }
}
