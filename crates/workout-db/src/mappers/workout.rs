//! Workout aggregate <-> model mappers

use chrono::Weekday;
use workout_core::entities::{Exercise, ExerciseStatus, Workout, WorkoutDay};
use workout_core::value_objects::{
    weekday_from_number, CompletionStatus, ExerciseId, ExerciseStatusId, UserId, WorkoutDayId,
    WorkoutId,
};

use crate::models::{ExerciseModel, ExerciseStatusModel, WorkoutDayModel, WorkoutModel};

impl From<WorkoutModel> for Workout {
    fn from(model: WorkoutModel) -> Self {
        Workout {
            id: WorkoutId::new(model.id),
            student_id: UserId::new(model.student_id),
            name: model.name,
            is_active: model.is_active,
            created_at: model.created_at,
        }
    }
}

impl From<WorkoutDayModel> for WorkoutDay {
    fn from(model: WorkoutDayModel) -> Self {
        WorkoutDay {
            id: WorkoutDayId::new(model.id),
            workout_id: WorkoutId::new(model.workout_id),
            // The column is checked to 0..=6
            day_of_week: weekday_from_number(model.day_of_week).unwrap_or(Weekday::Sun),
        }
    }
}

impl From<ExerciseModel> for Exercise {
    fn from(model: ExerciseModel) -> Self {
        Exercise {
            id: ExerciseId::new(model.id),
            workout_day_id: WorkoutDayId::new(model.workout_day_id),
            exercise_db_id: model.exercise_db_id,
            name: model.name,
            body_part: model.body_part,
            equipment: model.equipment,
            gif_url: model.gif_url,
            sets: model.sets,
            repetitions: model.repetitions,
            weight: model.weight,
            rest_seconds: model.rest_seconds,
            order: model.order,
            notes: model.notes,
        }
    }
}

impl From<ExerciseStatusModel> for ExerciseStatus {
    fn from(model: ExerciseStatusModel) -> Self {
        ExerciseStatus {
            id: ExerciseStatusId::new(model.id),
            exercise_id: ExerciseId::new(model.exercise_id),
            student_id: UserId::new(model.student_id),
            date: model.date,
            status: CompletionStatus::parse(&model.status).unwrap_or(CompletionStatus::Skipped),
            recorded_at: model.recorded_at,
        }
    }
}
