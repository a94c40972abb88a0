//! Workout aggregate - a student's plan, its days and their exercises

use chrono::{DateTime, Utc, Weekday};

use super::exercise::Exercise;
use crate::value_objects::{UserId, WorkoutDayId, WorkoutId};

/// Workout plan assigned to one student
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workout {
    pub id: WorkoutId,
    pub student_id: UserId,
    pub name: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl Workout {
    /// Create a new active workout
    pub fn new(id: WorkoutId, student_id: UserId, name: String) -> Self {
        Self {
            id,
            student_id,
            name,
            is_active: true,
            created_at: Utc::now(),
        }
    }

    /// Whether the workout belongs to `student_id`
    #[inline]
    pub fn is_owned_by(&self, student_id: UserId) -> bool {
        self.student_id == student_id
    }

    /// Rename unless `name` is blank
    pub fn rename(&mut self, name: &str) -> bool {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return false;
        }
        self.name = trimmed.to_string();
        true
    }
}

/// Fields for a new workout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewWorkout {
    pub student_id: UserId,
    pub name: String,
}

/// Day-of-week bucket within a workout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkoutDay {
    pub id: WorkoutDayId,
    pub workout_id: WorkoutId,
    pub day_of_week: Weekday,
}

impl WorkoutDay {
    pub fn new(id: WorkoutDayId, workout_id: WorkoutId, day_of_week: Weekday) -> Self {
        Self {
            id,
            workout_id,
            day_of_week,
        }
    }

    #[inline]
    pub fn belongs_to(&self, workout_id: WorkoutId) -> bool {
        self.workout_id == workout_id
    }
}

/// A day with its exercises sorted by order
#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutDayTree {
    pub day: WorkoutDay,
    pub exercises: Vec<Exercise>,
}

/// Fully loaded workout: days and exercises sorted
#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutTree {
    pub workout: Workout,
    pub days: Vec<WorkoutDayTree>,
}

impl WorkoutTree {
    /// Assemble a tree from flat rows, sorting days by weekday (Sunday first)
    /// and exercises by order
    pub fn assemble(workout: Workout, days: Vec<WorkoutDay>, exercises: Vec<Exercise>) -> Self {
        let mut days: Vec<WorkoutDayTree> = days
            .into_iter()
            .filter(|d| d.belongs_to(workout.id))
            .map(|day| WorkoutDayTree {
                day,
                exercises: Vec::new(),
            })
            .collect();
        days.sort_by_key(|d| d.day.day_of_week.num_days_from_sunday());

        for exercise in exercises {
            if let Some(bucket) = days
                .iter_mut()
                .find(|d| d.day.id == exercise.workout_day_id)
            {
                bucket.exercises.push(exercise);
            }
        }
        for bucket in &mut days {
            bucket.exercises.sort_by_key(|e| e.order);
        }

        Self { workout, days }
    }

    /// Number of days in the plan
    #[inline]
    pub fn days_count(&self) -> usize {
        self.days.len()
    }

    /// Number of exercises across all days
    pub fn exercises_count(&self) -> usize {
        self.days.iter().map(|d| d.exercises.len()).sum()
    }

    /// The day scheduled for `weekday`, if any
    pub fn day_for(&self, weekday: Weekday) -> Option<&WorkoutDayTree> {
        self.days.iter().find(|d| d.day.day_of_week == weekday)
    }

    /// Exercises scheduled for `weekday` (0 when no day matches)
    pub fn exercises_on(&self, weekday: Weekday) -> usize {
        self.day_for(weekday).map_or(0, |d| d.exercises.len())
    }
}
