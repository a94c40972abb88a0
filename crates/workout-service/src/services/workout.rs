//! Workout service
//!
//! Workout plans, their weekdays and ordered exercises. Instructors edit the
//! plans of connected students; the owning student and connected instructors
//! may read them.

use tracing::{info, instrument};
use workout_core::entities::{
    plan_reorder, Exercise, ExercisePatch, NewExercise, NewWorkout, User, Workout, WorkoutDay,
    WorkoutDayTree, WorkoutTree,
};
use workout_core::error::DomainError;
use workout_core::value_objects::{
    weekday_from_number, ExerciseId, UserId, UserRole, WorkoutDayId, WorkoutId,
};

use crate::dto::{
    AddExerciseRequest, AddWorkoutDayRequest, CreateWorkoutRequest, ExerciseResponse,
    ReorderExercisesRequest, UpdateExerciseRequest, UpdateWorkoutRequest, WorkoutDayResponse,
    WorkoutDetailResponse, WorkoutSummaryResponse,
};

use super::access::AccessGuard;
use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Workout service
pub struct WorkoutService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> WorkoutService<'a> {
    /// Create a new WorkoutService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    fn guard(&self) -> AccessGuard<'a> {
        AccessGuard::new(self.ctx)
    }

    // === Instructor operations ===

    /// Create an active workout for a connected student
    ///
    /// The student's other workouts are deactivated.
    #[instrument(skip(self, request), fields(student_id = %request.student_id))]
    pub async fn create_workout(
        &self,
        instructor_id: UserId,
        request: CreateWorkoutRequest,
    ) -> ServiceResult<WorkoutDetailResponse> {
        let guard = self.guard();
        guard
            .require_role(instructor_id, UserRole::Instructor)
            .await?;

        let student = self.target_student(request.student_id).await?;
        guard.require_connection(instructor_id, student.id).await?;

        let name = request.name.trim();
        if name.is_empty() {
            return Err(ServiceError::invalid_argument("Workout name cannot be blank"));
        }

        let workout = self
            .ctx
            .workout_repo()
            .create(&NewWorkout {
                student_id: student.id,
                name: name.to_string(),
            })
            .await?;

        info!(
            workout_id = %workout.id,
            student_id = %student.id,
            instructor_id = %instructor_id,
            "Workout created"
        );

        let tree = WorkoutTree::assemble(workout, Vec::new(), Vec::new());
        Ok(WorkoutDetailResponse::from(&tree))
    }

    async fn target_student(&self, student_id: UserId) -> ServiceResult<User> {
        let student = self
            .ctx
            .user_repo()
            .find_by_id(student_id)
            .await?
            .ok_or_else(|| {
                ServiceError::invalid_argument(format!("Student {student_id} does not exist"))
            })?;
        if !student.is_student() {
            return Err(DomainError::NotAStudent(student_id).into());
        }
        Ok(student)
    }

    /// Rename or (de)activate a workout; a blank name is ignored
    #[instrument(skip(self, request))]
    pub async fn update_workout(
        &self,
        instructor_id: UserId,
        workout_id: WorkoutId,
        request: UpdateWorkoutRequest,
    ) -> ServiceResult<WorkoutDetailResponse> {
        let mut workout = self.instructor_workout(instructor_id, workout_id).await?;

        let mut changed = false;
        if let Some(name) = request.name.as_deref() {
            changed |= name.trim() != workout.name && workout.rename(name);
        }
        if let Some(is_active) = request.is_active {
            changed |= workout.is_active != is_active;
            workout.is_active = is_active;
        }

        if changed {
            self.ctx.workout_repo().update(&workout).await?;
            info!(
                workout_id = %workout_id,
                is_active = workout.is_active,
                "Workout updated"
            );
        }

        self.detail(workout_id).await
    }

    /// Delete a workout with its days and exercises
    #[instrument(skip(self))]
    pub async fn delete_workout(
        &self,
        instructor_id: UserId,
        workout_id: WorkoutId,
    ) -> ServiceResult<()> {
        self.instructor_workout(instructor_id, workout_id).await?;
        self.ctx.workout_repo().delete(workout_id).await?;

        info!(workout_id = %workout_id, instructor_id = %instructor_id, "Workout deleted");
        Ok(())
    }

    /// Add a weekday to a workout
    #[instrument(skip(self, request), fields(day_of_week = request.day_of_week))]
    pub async fn add_day(
        &self,
        instructor_id: UserId,
        workout_id: WorkoutId,
        request: AddWorkoutDayRequest,
    ) -> ServiceResult<WorkoutDayResponse> {
        let weekday = weekday_from_number(request.day_of_week).ok_or_else(|| {
            ServiceError::invalid_argument("Day of week must be between 0 and 6")
        })?;
        self.instructor_workout(instructor_id, workout_id).await?;

        let day = self
            .ctx
            .workout_day_repo()
            .create(workout_id, weekday)
            .await?;

        info!(workout_id = %workout_id, day_id = %day.id, weekday = %weekday, "Workout day added");

        Ok(WorkoutDayResponse::from(&WorkoutDayTree {
            day,
            exercises: Vec::new(),
        }))
    }

    /// Delete a day with its exercises
    #[instrument(skip(self))]
    pub async fn delete_day(
        &self,
        instructor_id: UserId,
        workout_id: WorkoutId,
        day_id: WorkoutDayId,
    ) -> ServiceResult<()> {
        let workout = self.instructor_workout(instructor_id, workout_id).await?;
        let day = self.owned_day(&workout, day_id).await?;
        self.ctx.workout_day_repo().delete(day.id).await?;

        info!(workout_id = %workout_id, day_id = %day_id, "Workout day deleted");
        Ok(())
    }

    /// Append an exercise after the day's last one
    #[instrument(skip(self, request), fields(exercise_db_id = %request.exercise_db_id))]
    pub async fn add_exercise(
        &self,
        instructor_id: UserId,
        workout_id: WorkoutId,
        day_id: WorkoutDayId,
        request: AddExerciseRequest,
    ) -> ServiceResult<ExerciseResponse> {
        let workout = self.instructor_workout(instructor_id, workout_id).await?;
        let day = self.owned_day(&workout, day_id).await?;

        let exercise = self
            .ctx
            .exercise_repo()
            .append(&NewExercise {
                workout_day_id: day.id,
                exercise_db_id: request.exercise_db_id,
                name: request.name,
                body_part: request.body_part,
                equipment: request.equipment,
                gif_url: request.gif_url,
                sets: request.sets,
                repetitions: request.repetitions,
                weight: request.weight,
                rest_seconds: request.rest_seconds,
                notes: request.notes,
            })
            .await?;

        info!(
            day_id = %day_id,
            exercise_id = %exercise.id,
            order = exercise.order,
            "Exercise added"
        );

        Ok(ExerciseResponse::from(&exercise))
    }

    /// Apply the fields present in the request
    #[instrument(skip(self, request))]
    pub async fn update_exercise(
        &self,
        instructor_id: UserId,
        workout_id: WorkoutId,
        day_id: WorkoutDayId,
        exercise_id: ExerciseId,
        request: UpdateExerciseRequest,
    ) -> ServiceResult<ExerciseResponse> {
        let workout = self.instructor_workout(instructor_id, workout_id).await?;
        let day = self.owned_day(&workout, day_id).await?;
        let mut exercise = self.owned_exercise(&day, exercise_id).await?;

        let patch = ExercisePatch {
            sets: request.sets,
            repetitions: request.repetitions,
            weight: request.weight,
            rest_seconds: request.rest_seconds,
            notes: request.notes,
        };
        if exercise.apply(&patch) {
            self.ctx.exercise_repo().update(&exercise).await?;
            info!(exercise_id = %exercise_id, "Exercise updated");
        }

        Ok(ExerciseResponse::from(&exercise))
    }

    /// Delete an exercise; the rest of the day is renumbered from 0
    #[instrument(skip(self))]
    pub async fn delete_exercise(
        &self,
        instructor_id: UserId,
        workout_id: WorkoutId,
        day_id: WorkoutDayId,
        exercise_id: ExerciseId,
    ) -> ServiceResult<()> {
        let workout = self.instructor_workout(instructor_id, workout_id).await?;
        let day = self.owned_day(&workout, day_id).await?;
        let exercise = self.owned_exercise(&day, exercise_id).await?;
        self.ctx.exercise_repo().delete(exercise.id).await?;

        info!(day_id = %day_id, exercise_id = %exercise_id, "Exercise deleted");
        Ok(())
    }

    /// Put the listed exercises first, in list order
    ///
    /// Ids that are not exercises of the day are skipped; unlisted exercises
    /// keep their relative order after the listed ones.
    #[instrument(skip(self, request), fields(requested = request.exercise_ids.len()))]
    pub async fn reorder_exercises(
        &self,
        instructor_id: UserId,
        workout_id: WorkoutId,
        day_id: WorkoutDayId,
        request: ReorderExercisesRequest,
    ) -> ServiceResult<Vec<ExerciseResponse>> {
        let workout = self.instructor_workout(instructor_id, workout_id).await?;
        let day = self.owned_day(&workout, day_id).await?;

        let repo = self.ctx.exercise_repo();
        let current: Vec<ExerciseId> = repo
            .find_by_day(day.id)
            .await?
            .iter()
            .map(|e| e.id)
            .collect();

        let orders = plan_reorder(&current, &request.exercise_ids);
        if !orders.is_empty() {
            repo.apply_orders(day.id, &orders).await?;
        }

        info!(day_id = %day_id, exercises = orders.len(), "Exercises reordered");

        let exercises = repo.find_by_day(day.id).await?;
        Ok(exercises.iter().map(ExerciseResponse::from).collect())
    }

    // === Reads ===

    /// Workouts of a student, newest first
    #[instrument(skip(self))]
    pub async fn list_student_workouts(
        &self,
        viewer_id: UserId,
        student_id: UserId,
    ) -> ServiceResult<Vec<WorkoutSummaryResponse>> {
        if !self.guard().can_view_student(viewer_id, student_id).await? {
            return Err(DomainError::StudentNotFound(student_id.to_string()).into());
        }

        let trees = self
            .ctx
            .workout_repo()
            .load_trees_by_student(student_id)
            .await?;
        Ok(trees.iter().map(WorkoutSummaryResponse::from).collect())
    }

    /// A workout with its days and exercises
    #[instrument(skip(self))]
    pub async fn get_workout(
        &self,
        viewer_id: UserId,
        workout_id: WorkoutId,
    ) -> ServiceResult<WorkoutDetailResponse> {
        let workout = self.find_workout(workout_id).await?;
        if !self
            .guard()
            .can_view_student(viewer_id, workout.student_id)
            .await?
        {
            return Err(DomainError::WorkoutNotFound(workout_id).into());
        }

        self.detail(workout_id).await
    }

    /// The student's active workout, if any
    #[instrument(skip(self))]
    pub async fn get_active_workout(
        &self,
        student_id: UserId,
    ) -> ServiceResult<Option<WorkoutDetailResponse>> {
        self.guard()
            .require_role(student_id, UserRole::Student)
            .await?;

        let repo = self.ctx.workout_repo();
        let Some(active) = repo.find_active_by_student(student_id).await? else {
            return Ok(None);
        };

        Ok(repo
            .load_tree(active.id)
            .await?
            .as_ref()
            .map(WorkoutDetailResponse::from))
    }

    // === Helpers ===

    async fn find_workout(&self, workout_id: WorkoutId) -> ServiceResult<Workout> {
        self.ctx
            .workout_repo()
            .find_by_id(workout_id)
            .await?
            .ok_or_else(|| DomainError::WorkoutNotFound(workout_id).into())
    }

    async fn detail(&self, workout_id: WorkoutId) -> ServiceResult<WorkoutDetailResponse> {
        let tree = self
            .ctx
            .workout_repo()
            .load_tree(workout_id)
            .await?
            .ok_or(DomainError::WorkoutNotFound(workout_id))?;
        Ok(WorkoutDetailResponse::from(&tree))
    }

    /// Workout editable by the instructor: they hold the role and are
    /// connected to the owning student. A missing connection reads as a
    /// missing workout; storage failures propagate.
    async fn instructor_workout(
        &self,
        instructor_id: UserId,
        workout_id: WorkoutId,
    ) -> ServiceResult<Workout> {
        self.guard()
            .require_role(instructor_id, UserRole::Instructor)
            .await?;

        let workout = self.find_workout(workout_id).await?;
        match self
            .guard()
            .require_connection(instructor_id, workout.student_id)
            .await
        {
            Ok(_) => Ok(workout),
            Err(e) if e.is_not_found() => Err(DomainError::WorkoutNotFound(workout_id).into()),
            Err(e) => Err(e),
        }
    }

    async fn owned_day(&self, workout: &Workout, day_id: WorkoutDayId) -> ServiceResult<WorkoutDay> {
        self.ctx
            .workout_day_repo()
            .find_by_id(day_id)
            .await?
            .filter(|d| d.belongs_to(workout.id))
            .ok_or_else(|| DomainError::WorkoutDayNotFound(day_id).into())
    }

    async fn owned_exercise(
        &self,
        day: &WorkoutDay,
        exercise_id: ExerciseId,
    ) -> ServiceResult<Exercise> {
        self.ctx
            .exercise_repo()
            .find_by_id(exercise_id)
            .await?
            .filter(|e| e.belongs_to(day.id))
            .ok_or_else(|| DomainError::ExerciseNotFound(exercise_id).into())
    }
}
