//! Exercise entity and the ordering rules of a workout day
//!
//! Orders inside one day always form the contiguous sequence `0..n`.

use std::collections::HashSet;

use crate::value_objects::{ExerciseId, WorkoutDayId};

/// Prescribed exercise within a workout day
#[derive(Debug, Clone, PartialEq)]
pub struct Exercise {
    pub id: ExerciseId,
    pub workout_day_id: WorkoutDayId,
    /// Identity in the external exercise catalog
    pub exercise_db_id: String,
    pub name: String,
    pub body_part: String,
    pub equipment: String,
    pub gif_url: String,
    pub sets: String,
    pub repetitions: String,
    /// Kilograms
    pub weight: Option<f64>,
    pub rest_seconds: Option<i32>,
    pub order: i32,
    pub notes: Option<String>,
}

impl Exercise {
    #[inline]
    pub fn belongs_to(&self, day_id: WorkoutDayId) -> bool {
        self.workout_day_id == day_id
    }

    /// Apply the fields present in `patch`, returning whether anything changed
    pub fn apply(&mut self, patch: &ExercisePatch) -> bool {
        let mut changed = false;

        if let Some(sets) = patch.sets.as_deref().map(str::trim) {
            if !sets.is_empty() && sets != self.sets {
                self.sets = sets.to_string();
                changed = true;
            }
        }
        if let Some(reps) = patch.repetitions.as_deref().map(str::trim) {
            if !reps.is_empty() && reps != self.repetitions {
                self.repetitions = reps.to_string();
                changed = true;
            }
        }
        if let Some(weight) = patch.weight {
            self.weight = Some(weight);
            changed = true;
        }
        if let Some(rest) = patch.rest_seconds {
            self.rest_seconds = Some(rest);
            changed = true;
        }
        if let Some(notes) = &patch.notes {
            self.notes = Some(notes.clone());
            changed = true;
        }

        changed
    }
}

/// Fields for appending an exercise; the order is assigned on insert
#[derive(Debug, Clone, PartialEq)]
pub struct NewExercise {
    pub workout_day_id: WorkoutDayId,
    pub exercise_db_id: String,
    pub name: String,
    pub body_part: String,
    pub equipment: String,
    pub gif_url: String,
    pub sets: String,
    pub repetitions: String,
    pub weight: Option<f64>,
    pub rest_seconds: Option<i32>,
    pub notes: Option<String>,
}

/// Partial prescription update
///
/// Blank `sets`/`repetitions` are ignored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExercisePatch {
    pub sets: Option<String>,
    pub repetitions: Option<String>,
    pub weight: Option<f64>,
    pub rest_seconds: Option<i32>,
    pub notes: Option<String>,
}

/// Order for an exercise appended after `existing` (max + 1, or 0 when empty)
pub fn next_order(existing: impl IntoIterator<Item = i32>) -> i32 {
    existing.into_iter().max().map_or(0, |max| max + 1)
}

/// Compute the new order of every exercise of a day.
///
/// `current` is the day's exercise ids sorted by their present order.
/// Requested ids come first in list order; ids unknown to the day and
/// repeated ids are skipped. Exercises the list omits follow, keeping their
/// relative order. The result assigns `0..current.len()`.
pub fn plan_reorder(current: &[ExerciseId], requested: &[ExerciseId]) -> Vec<(ExerciseId, i32)> {
    let known: HashSet<ExerciseId> = current.iter().copied().collect();
    let mut placed: HashSet<ExerciseId> = HashSet::with_capacity(current.len());
    let mut sequence: Vec<ExerciseId> = Vec::with_capacity(current.len());

    for id in requested {
        if known.contains(id) && placed.insert(*id) {
            sequence.push(*id);
        }
    }
    for id in current {
        if placed.insert(*id) {
            sequence.push(*id);
        }
    }

    sequence.into_iter().zip(0..).collect()
}

/// Orders after removing one exercise: survivors renumbered `0..n-1`
pub fn compact_orders(current: &[ExerciseId], removed: ExerciseId) -> Vec<(ExerciseId, i32)> {
    current
        .iter()
        .copied()
        .filter(|id| *id != removed)
        .zip(0..)
        .collect()
}
