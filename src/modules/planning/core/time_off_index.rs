// Time-off lookup per entity with downward cascading.
//
// Purpose
// - Answer whether an instant is excluded for a task, project or organization, taking into
//   account the time off declared on every ancestor (organization time off blocks all
//   projects and tasks beneath it).
// - Hand the merged exclusion intervals of a lineage to the work calendar.

use crate::modules::planning::core::errors::ForecastError;
use crate::modules::planning::core::hierarchy::Hierarchy;
use crate::modules::planning::core::time_off::{Interval, TimeOff, TimeOffTarget, merge_intervals};
use chrono::{DateTime, Utc};
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, Default)]
pub struct TimeOffIndex {
    intervals: HashMap<TimeOffTarget, Vec<Interval>>,
    parents: HashMap<TimeOffTarget, TimeOffTarget>,
}

impl TimeOffIndex {
    pub fn new(records: &[TimeOff]) -> Result<Self, ForecastError> {
        let mut intervals: HashMap<TimeOffTarget, Vec<Interval>> = HashMap::new();
        for record in records {
            intervals
                .entry(record.target)
                .or_default()
                .push(record.interval()?);
        }
        Ok(Self {
            intervals,
            parents: HashMap::new(),
        })
    }

    /// Index over `records` that knows the containment links of `hierarchy`.
    pub fn build<H>(hierarchy: &H, records: &[TimeOff]) -> Result<Self, ForecastError>
    where
        H: Hierarchy + ?Sized,
    {
        let mut index = Self::new(records)?;
        index.parents.extend(hierarchy.parent_links());
        Ok(index)
    }

    pub fn with_parent(mut self, child: TimeOffTarget, parent: TimeOffTarget) -> Self {
        self.parents.insert(child, parent);
        self
    }

    /// The target followed by its ancestors, nearest first.
    pub fn lineage(&self, target: TimeOffTarget) -> Vec<TimeOffTarget> {
        let mut lineage = vec![target];
        let mut seen = HashSet::from([target]);
        let mut current = target;
        while let Some(parent) = self.parents.get(&current) {
            if !seen.insert(*parent) {
                break;
            }
            lineage.push(*parent);
            current = *parent;
        }
        lineage
    }

    pub fn is_excluded(&self, at: DateTime<Utc>, target: TimeOffTarget) -> bool {
        self.lineage(target)
            .iter()
            .filter_map(|entity| self.intervals.get(entity))
            .flatten()
            .any(|interval| interval.contains(at))
    }

    /// Sorted, coalesced exclusions of the target and all of its ancestors.
    pub fn exclusions_for(&self, target: TimeOffTarget) -> Vec<Interval> {
        let collected = self
            .lineage(target)
            .iter()
            .filter_map(|entity| self.intervals.get(entity))
            .flatten()
            .copied()
            .collect();
        merge_intervals(collected)
    }
}
