//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.

use chrono::{DateTime, Utc};
use workout_core::entities::{Connection, Exercise, ExerciseStatus, User, WorkoutDayTree, WorkoutTree};
use workout_core::stats::{DailyProgress, InstructorStatistics, Trend, WeeklyProgress};
use workout_core::value_objects::weekday_to_number;

use super::responses::{
    CompletionStatsResponse, DailyStatsResponse, ExerciseResponse, ExerciseStatusResponse,
    InstructorStatisticsResponse, InstructorSummaryResponse, InvitationResponse,
    PublicUserResponse, StudentStatsResponse, TrendResponse, TrendsResponse, UserResponse,
    WeeklyStatsResponse, WorkoutDayResponse, WorkoutDetailResponse, WorkoutStatsResponse,
    WorkoutSummaryResponse,
};

// ============================================================================
// User Mappers
// ============================================================================

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role,
            age: user.age,
            gender: user.gender,
            description: user.description.clone(),
            height: user.height,
            weight: user.weight,
            body_type: user.body_type.clone(),
            health_conditions: user.health_conditions.clone(),
            goal: user.goal.clone(),
            observations: user.observations.clone(),
            phone: user.phone.clone(),
            certifications: user.certifications.clone(),
            specializations: user.specializations.clone(),
            bio: user.bio.clone(),
            years_of_experience: user.years_of_experience,
            social_links_json: user.social_links_json.clone(),
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

impl From<&User> for PublicUserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role,
            description: user.description.clone(),
        }
    }
}

// ============================================================================
// Invitation Mappers
// ============================================================================

/// Relationship record joined with both parties
///
/// Either party may be missing when the account vanished between queries;
/// the names then render empty.
pub struct InvitationWithParties<'a> {
    pub connection: &'a Connection,
    pub student: Option<&'a User>,
    pub instructor: Option<&'a User>,
}

impl From<InvitationWithParties<'_>> for InvitationResponse {
    fn from(data: InvitationWithParties<'_>) -> Self {
        let c = data.connection;
        Self {
            id: c.id,
            student_id: c.student_id,
            student_name: data.student.map(|u| u.name.clone()).unwrap_or_default(),
            student_email: data.student.map(|u| u.email.clone()).unwrap_or_default(),
            instructor_id: c.instructor_id,
            instructor_name: data.instructor.map(|u| u.name.clone()).unwrap_or_default(),
            status: c.status,
            invited_at: c.invited_at,
            responded_at: c.responded_at,
            connected_at: c.connected_at,
        }
    }
}

/// Instructor with the number of students connected to them
pub struct InstructorWithCount<'a> {
    pub instructor: &'a User,
    pub students_count: i64,
    pub connected_at: Option<DateTime<Utc>>,
}

impl From<InstructorWithCount<'_>> for InstructorSummaryResponse {
    fn from(data: InstructorWithCount<'_>) -> Self {
        let user = data.instructor;
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            description: user.description.clone(),
            phone: user.phone.clone(),
            certifications: user.certifications.clone(),
            specializations: user.specializations.clone(),
            bio: user.bio.clone(),
            years_of_experience: user.years_of_experience,
            social_links_json: user.social_links_json.clone(),
            students_count: data.students_count,
            connected_at: data.connected_at,
        }
    }
}

// ============================================================================
// Workout Mappers
// ============================================================================

impl From<&Exercise> for ExerciseResponse {
    fn from(exercise: &Exercise) -> Self {
        Self {
            id: exercise.id,
            workout_day_id: exercise.workout_day_id,
            exercise_db_id: exercise.exercise_db_id.clone(),
            name: exercise.name.clone(),
            body_part: exercise.body_part.clone(),
            equipment: exercise.equipment.clone(),
            gif_url: exercise.gif_url.clone(),
            sets: exercise.sets.clone(),
            repetitions: exercise.repetitions.clone(),
            weight: exercise.weight,
            rest_seconds: exercise.rest_seconds,
            order: exercise.order,
            notes: exercise.notes.clone(),
        }
    }
}

impl From<&WorkoutDayTree> for WorkoutDayResponse {
    fn from(tree: &WorkoutDayTree) -> Self {
        Self {
            id: tree.day.id,
            workout_id: tree.day.workout_id,
            day_of_week: weekday_to_number(tree.day.day_of_week),
            day_name: day_name(tree.day.day_of_week).to_string(),
            exercises: tree.exercises.iter().map(ExerciseResponse::from).collect(),
        }
    }
}

impl From<&WorkoutTree> for WorkoutDetailResponse {
    fn from(tree: &WorkoutTree) -> Self {
        let w = &tree.workout;
        Self {
            id: w.id,
            student_id: w.student_id,
            name: w.name.clone(),
            is_active: w.is_active,
            created_at: w.created_at,
            days: tree.days.iter().map(WorkoutDayResponse::from).collect(),
        }
    }
}

impl From<&WorkoutTree> for WorkoutSummaryResponse {
    fn from(tree: &WorkoutTree) -> Self {
        let w = &tree.workout;
        Self {
            id: w.id,
            student_id: w.student_id,
            name: w.name.clone(),
            is_active: w.is_active,
            created_at: w.created_at,
            days_count: tree.days_count(),
            exercises_count: tree.exercises_count(),
        }
    }
}

fn day_name(day: chrono::Weekday) -> &'static str {
    use chrono::Weekday;
    match day {
        Weekday::Sun => "Sunday",
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
    }
}

// ============================================================================
// Progress Mappers
// ============================================================================

impl From<&ExerciseStatus> for ExerciseStatusResponse {
    fn from(status: &ExerciseStatus) -> Self {
        Self {
            id: status.id,
            exercise_id: status.exercise_id,
            student_id: status.student_id,
            date: status.date,
            status: status.status,
            recorded_at: status.recorded_at,
        }
    }
}

impl From<&DailyProgress> for DailyStatsResponse {
    fn from(day: &DailyProgress) -> Self {
        Self {
            date: day.date,
            completed_exercises: day.completed,
            skipped_exercises: day.skipped,
            total_exercises: day.total,
            completion_rate: day.completion_rate,
        }
    }
}

impl From<&WeeklyProgress> for WeeklyStatsResponse {
    fn from(week: &WeeklyProgress) -> Self {
        Self {
            week_start_date: week.week_start,
            week_end_date: week.week_end,
            daily_stats: week.days.iter().map(DailyStatsResponse::from).collect(),
            total_completed: week.completed,
            total_skipped: week.skipped,
            total_exercises: week.total,
            weekly_completion_rate: week.completion_rate,
        }
    }
}

// ============================================================================
// Statistics Mappers
// ============================================================================

impl From<Trend> for TrendResponse {
    fn from(trend: Trend) -> Self {
        Self {
            value: trend.value,
            is_positive: trend.is_positive,
        }
    }
}

impl From<&InstructorStatistics> for InstructorStatisticsResponse {
    fn from(stats: &InstructorStatistics) -> Self {
        Self {
            generated_at: stats.generated_at,
            students: StudentStatsResponse {
                total: stats.students.total,
                new_this_week: stats.students.new_this_week,
                new_this_month: stats.students.new_this_month,
                new_previous_month: stats.students.new_previous_month,
                active: stats.students.active,
            },
            workouts: WorkoutStatsResponse {
                total: stats.workouts.total,
                this_week: stats.workouts.this_week,
                this_month: stats.workouts.this_month,
                previous_month: stats.workouts.previous_month,
            },
            completion: CompletionStatsResponse {
                today: stats.completion.today,
                this_week: stats.completion.this_week,
                this_month: stats.completion.this_month,
                previous_month: stats.completion.previous_month,
                overall: stats.completion.overall,
            },
            trends: TrendsResponse {
                students: stats.trends.students.into(),
                completion_rate: stats.trends.completion_rate.into(),
                workouts: stats.trends.workouts.into(),
            },
        }
    }
}
