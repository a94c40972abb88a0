//! In-memory repositories for service tests
//!
//! One store implements every repository trait and mirrors the uniqueness
//! guards of the PostgreSQL schema.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc, Weekday};
use workout_common::auth::JwtService;
use workout_core::entities::{
    compact_orders, next_order, Connection, Exercise, ExerciseStatus, NewConnection, NewExercise,
    NewExerciseStatus, NewUser, NewWorkout, User, Workout, WorkoutDay, WorkoutTree,
};
use workout_core::error::DomainError;
use workout_core::traits::{
    ConnectionRepository, ExerciseRepository, ExerciseStatusRepository, RepoResult,
    UserRepository, WorkoutDayRepository, WorkoutRepository,
};
use workout_core::value_objects::{
    CompletionStatus, ConnectionId, ExerciseId, ExerciseStatusId, InvitationStatus, UserId,
    UserRole, WorkoutDayId, WorkoutId,
};

use crate::services::ServiceContext;

#[derive(Default)]
struct State {
    next_id: i64,
    users: Vec<User>,
    passwords: HashMap<UserId, String>,
    connections: Vec<Connection>,
    workouts: Vec<Workout>,
    days: Vec<WorkoutDay>,
    exercises: Vec<Exercise>,
    statuses: Vec<ExerciseStatus>,
    connections_offline: bool,
}

impl State {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn student_of_day(&self, day_id: WorkoutDayId) -> Option<UserId> {
        let day = self.days.iter().find(|d| d.id == day_id)?;
        self.workouts
            .iter()
            .find(|w| w.id == day.workout_id)
            .map(|w| w.student_id)
    }

    fn tree(&self, workout: &Workout) -> WorkoutTree {
        let days: Vec<WorkoutDay> = self
            .days
            .iter()
            .filter(|d| d.belongs_to(workout.id))
            .cloned()
            .collect();
        let exercises: Vec<Exercise> = self
            .exercises
            .iter()
            .filter(|e| days.iter().any(|d| d.id == e.workout_day_id))
            .cloned()
            .collect();
        WorkoutTree::assemble(workout.clone(), days, exercises)
    }

    fn remove_day(&mut self, day_id: WorkoutDayId) {
        let removed: Vec<ExerciseId> = self
            .exercises
            .iter()
            .filter(|e| e.belongs_to(day_id))
            .map(|e| e.id)
            .collect();
        self.statuses.retain(|s| !removed.contains(&s.exercise_id));
        self.exercises.retain(|e| !e.belongs_to(day_id));
        self.days.retain(|d| d.id != day_id);
    }

    fn remove_workout(&mut self, workout_id: WorkoutId) {
        let day_ids: Vec<WorkoutDayId> = self
            .days
            .iter()
            .filter(|d| d.belongs_to(workout_id))
            .map(|d| d.id)
            .collect();
        for day_id in day_ids {
            self.remove_day(day_id);
        }
        self.workouts.retain(|w| w.id != workout_id);
    }
}

/// Mutex-guarded store behind every repository trait
#[derive(Default)]
pub struct InMemoryStore {
    state: Mutex<State>,
}

impl InMemoryStore {
    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap()
    }

    /// Insert an already accepted record, bypassing the invitation flow
    pub fn insert_accepted(
        &self,
        instructor_id: UserId,
        student_id: UserId,
        at: DateTime<Utc>,
    ) -> Connection {
        let mut state = self.lock();
        let mut connection = Connection::new(
            ConnectionId::new(state.next_id()),
            student_id,
            instructor_id,
            at,
        );
        connection.status = InvitationStatus::Accepted;
        connection.responded_at = Some(at);
        connection.connected_at = Some(at);
        state.connections.push(connection.clone());
        connection
    }

    /// Make connection lookups fail the way an unreachable database does
    pub fn take_connections_offline(&self) {
        self.lock().connections_offline = true;
    }

    /// Every record stored for a pair, any status
    pub fn records_for(&self, instructor_id: UserId, student_id: UserId) -> Vec<Connection> {
        self.lock()
            .connections
            .iter()
            .filter(|c| c.instructor_id == instructor_id && c.student_id == student_id)
            .cloned()
            .collect()
    }

    pub fn workout_count(&self) -> usize {
        self.lock().workouts.len()
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn find_by_id(&self, id: UserId) -> RepoResult<Option<User>> {
        Ok(self.lock().users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        Ok(self
            .lock()
            .users
            .iter()
            .find(|u| u.email.eq_ignore_ascii_case(email.trim()))
            .cloned())
    }

    async fn find_by_ids(&self, ids: &[UserId]) -> RepoResult<Vec<User>> {
        Ok(self
            .lock()
            .users
            .iter()
            .filter(|u| ids.contains(&u.id))
            .cloned()
            .collect())
    }

    async fn email_exists(&self, email: &str) -> RepoResult<bool> {
        Ok(UserRepository::find_by_email(self, email).await?.is_some())
    }

    async fn search(&self, query: &str, limit: i64) -> RepoResult<Vec<User>> {
        let needle = query.to_lowercase();
        Ok(self
            .lock()
            .users
            .iter()
            .filter(|u| {
                u.name.to_lowercase().contains(&needle) || u.email.to_lowercase().contains(&needle)
            })
            .take(usize::try_from(limit).unwrap_or(0))
            .cloned()
            .collect())
    }

    async fn create(&self, user: &NewUser, password_hash: &str) -> RepoResult<User> {
        let mut state = self.lock();
        if state
            .users
            .iter()
            .any(|u| u.email.eq_ignore_ascii_case(&user.email))
        {
            return Err(DomainError::EmailAlreadyExists);
        }
        let mut created = User::new(
            UserId::new(state.next_id()),
            user.name.clone(),
            user.email.clone(),
            user.role,
        );
        created.age = user.age;
        created.gender = user.gender;
        created.description = user.description.clone();
        state.passwords.insert(created.id, password_hash.to_string());
        state.users.push(created.clone());
        Ok(created)
    }

    async fn update(&self, user: &User) -> RepoResult<()> {
        let mut state = self.lock();
        let slot = state
            .users
            .iter_mut()
            .find(|u| u.id == user.id)
            .ok_or(DomainError::UserNotFound(user.id))?;
        *slot = user.clone();
        Ok(())
    }

    async fn get_password_hash(&self, id: UserId) -> RepoResult<Option<String>> {
        Ok(self.lock().passwords.get(&id).cloned())
    }

    async fn update_password(&self, id: UserId, password_hash: &str) -> RepoResult<()> {
        let mut state = self.lock();
        if !state.users.iter().any(|u| u.id == id) {
            return Err(DomainError::UserNotFound(id));
        }
        state.passwords.insert(id, password_hash.to_string());
        Ok(())
    }

    async fn delete_account(&self, id: UserId) -> RepoResult<()> {
        let mut state = self.lock();
        if !state.users.iter().any(|u| u.id == id) {
            return Err(DomainError::UserNotFound(id));
        }
        state.statuses.retain(|s| s.student_id != id);
        state
            .connections
            .retain(|c| c.student_id != id && c.instructor_id != id);
        let owned: Vec<WorkoutId> = state
            .workouts
            .iter()
            .filter(|w| w.student_id == id)
            .map(|w| w.id)
            .collect();
        for workout_id in owned {
            state.remove_workout(workout_id);
        }
        state.passwords.remove(&id);
        state.users.retain(|u| u.id != id);
        Ok(())
    }
}

#[async_trait]
impl ConnectionRepository for InMemoryStore {
    async fn find_by_id(&self, id: ConnectionId) -> RepoResult<Option<Connection>> {
        Ok(self.lock().connections.iter().find(|c| c.id == id).cloned())
    }

    async fn find_by_pair(
        &self,
        student_id: UserId,
        instructor_id: UserId,
        status: InvitationStatus,
    ) -> RepoResult<Option<Connection>> {
        let state = self.lock();
        if state.connections_offline {
            return Err(DomainError::DatabaseError("connection refused".to_string()));
        }
        Ok(state
            .connections
            .iter()
            .rev()
            .find(|c| {
                c.student_id == student_id && c.instructor_id == instructor_id && c.status == status
            })
            .cloned())
    }

    async fn create(&self, connection: &NewConnection) -> RepoResult<Connection> {
        let mut state = self.lock();
        let duplicate = state.connections.iter().any(|c| {
            c.is_pending()
                && c.student_id == connection.student_id
                && c.instructor_id == connection.instructor_id
        });
        if duplicate {
            return Err(DomainError::InvitationAlreadyPending);
        }
        let created = Connection::new(
            ConnectionId::new(state.next_id()),
            connection.student_id,
            connection.instructor_id,
            connection.invited_at,
        );
        state.connections.push(created.clone());
        Ok(created)
    }

    async fn save_response(&self, connection: &Connection) -> RepoResult<bool> {
        let mut state = self.lock();
        if connection.is_accepted()
            && state.connections.iter().any(|c| {
                c.is_accepted()
                    && c.student_id == connection.student_id
                    && c.instructor_id == connection.instructor_id
            })
        {
            return Err(DomainError::AlreadyConnected);
        }
        let Some(stored) = state.connections.iter_mut().find(|c| {
            c.id == connection.id && c.student_id == connection.student_id && c.is_pending()
        }) else {
            return Ok(false);
        };
        stored.status = connection.status;
        stored.responded_at = connection.responded_at;
        stored.connected_at = connection.connected_at;
        Ok(true)
    }

    async fn delete_accepted(&self, student_id: UserId, instructor_id: UserId) -> RepoResult<bool> {
        let mut state = self.lock();
        let before = state.connections.len();
        state.connections.retain(|c| {
            !(c.is_accepted() && c.student_id == student_id && c.instructor_id == instructor_id)
        });
        Ok(state.connections.len() < before)
    }

    async fn find_pending_for_student(&self, student_id: UserId) -> RepoResult<Vec<Connection>> {
        let mut found: Vec<Connection> = self
            .lock()
            .connections
            .iter()
            .filter(|c| c.student_id == student_id && c.is_pending())
            .cloned()
            .collect();
        found.sort_by(|a, b| b.invited_at.cmp(&a.invited_at).then(b.id.cmp(&a.id)));
        Ok(found)
    }

    async fn find_by_instructor(&self, instructor_id: UserId) -> RepoResult<Vec<Connection>> {
        let mut found: Vec<Connection> = self
            .lock()
            .connections
            .iter()
            .filter(|c| c.instructor_id == instructor_id)
            .cloned()
            .collect();
        found.sort_by(|a, b| b.invited_at.cmp(&a.invited_at).then(b.id.cmp(&a.id)));
        Ok(found)
    }

    async fn find_accepted_by_instructor(
        &self,
        instructor_id: UserId,
    ) -> RepoResult<Vec<Connection>> {
        let mut found: Vec<Connection> = self
            .lock()
            .connections
            .iter()
            .filter(|c| c.instructor_id == instructor_id && c.is_accepted())
            .cloned()
            .collect();
        found.sort_by(|a, b| b.connected_at.cmp(&a.connected_at).then(b.id.cmp(&a.id)));
        Ok(found)
    }

    async fn find_accepted_by_student(&self, student_id: UserId) -> RepoResult<Vec<Connection>> {
        let mut found: Vec<Connection> = self
            .lock()
            .connections
            .iter()
            .filter(|c| c.student_id == student_id && c.is_accepted())
            .cloned()
            .collect();
        found.sort_by(|a, b| b.connected_at.cmp(&a.connected_at).then(b.id.cmp(&a.id)));
        Ok(found)
    }

    async fn count_accepted_students(&self, instructor_id: UserId) -> RepoResult<i64> {
        let count = self
            .lock()
            .connections
            .iter()
            .filter(|c| c.instructor_id == instructor_id && c.is_accepted())
            .count();
        Ok(i64::try_from(count).unwrap_or(i64::MAX))
    }
}

#[async_trait]
impl WorkoutRepository for InMemoryStore {
    async fn find_by_id(&self, id: WorkoutId) -> RepoResult<Option<Workout>> {
        Ok(self.lock().workouts.iter().find(|w| w.id == id).cloned())
    }

    async fn find_by_student(&self, student_id: UserId) -> RepoResult<Vec<Workout>> {
        let mut found: Vec<Workout> = self
            .lock()
            .workouts
            .iter()
            .filter(|w| w.is_owned_by(student_id))
            .cloned()
            .collect();
        found.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(found)
    }

    async fn find_by_students(&self, student_ids: &[UserId]) -> RepoResult<Vec<Workout>> {
        Ok(self
            .lock()
            .workouts
            .iter()
            .filter(|w| student_ids.contains(&w.student_id))
            .cloned()
            .collect())
    }

    async fn find_active_by_student(&self, student_id: UserId) -> RepoResult<Option<Workout>> {
        Ok(WorkoutRepository::find_by_student(self, student_id)
            .await?
            .into_iter()
            .find(|w| w.is_active))
    }

    async fn create(&self, workout: &NewWorkout) -> RepoResult<Workout> {
        let mut state = self.lock();
        for sibling in state
            .workouts
            .iter_mut()
            .filter(|w| w.is_owned_by(workout.student_id))
        {
            sibling.is_active = false;
        }
        let created = Workout::new(
            WorkoutId::new(state.next_id()),
            workout.student_id,
            workout.name.clone(),
        );
        state.workouts.push(created.clone());
        Ok(created)
    }

    async fn update(&self, workout: &Workout) -> RepoResult<()> {
        let mut state = self.lock();
        if !state.workouts.iter().any(|w| w.id == workout.id) {
            return Err(DomainError::WorkoutNotFound(workout.id));
        }
        for stored in &mut state.workouts {
            if stored.id == workout.id {
                stored.name.clone_from(&workout.name);
                stored.is_active = workout.is_active;
            } else if workout.is_active && stored.is_owned_by(workout.student_id) {
                stored.is_active = false;
            }
        }
        Ok(())
    }

    async fn delete(&self, id: WorkoutId) -> RepoResult<()> {
        let mut state = self.lock();
        if !state.workouts.iter().any(|w| w.id == id) {
            return Err(DomainError::WorkoutNotFound(id));
        }
        state.remove_workout(id);
        Ok(())
    }

    async fn load_tree(&self, id: WorkoutId) -> RepoResult<Option<WorkoutTree>> {
        let state = self.lock();
        Ok(state
            .workouts
            .iter()
            .find(|w| w.id == id)
            .map(|w| state.tree(w)))
    }

    async fn load_trees_by_student(&self, student_id: UserId) -> RepoResult<Vec<WorkoutTree>> {
        let workouts = WorkoutRepository::find_by_student(self, student_id).await?;
        let state = self.lock();
        Ok(workouts.iter().map(|w| state.tree(w)).collect())
    }
}

#[async_trait]
impl WorkoutDayRepository for InMemoryStore {
    async fn find_by_id(&self, id: WorkoutDayId) -> RepoResult<Option<WorkoutDay>> {
        Ok(self.lock().days.iter().find(|d| d.id == id).cloned())
    }

    async fn find_by_workout(&self, workout_id: WorkoutId) -> RepoResult<Vec<WorkoutDay>> {
        Ok(self
            .lock()
            .days
            .iter()
            .filter(|d| d.belongs_to(workout_id))
            .cloned()
            .collect())
    }

    async fn create(&self, workout_id: WorkoutId, day_of_week: Weekday) -> RepoResult<WorkoutDay> {
        let mut state = self.lock();
        if state
            .days
            .iter()
            .any(|d| d.belongs_to(workout_id) && d.day_of_week == day_of_week)
        {
            return Err(DomainError::DuplicateWorkoutDay(day_of_week));
        }
        let day = WorkoutDay::new(WorkoutDayId::new(state.next_id()), workout_id, day_of_week);
        state.days.push(day.clone());
        Ok(day)
    }

    async fn delete(&self, id: WorkoutDayId) -> RepoResult<()> {
        let mut state = self.lock();
        if !state.days.iter().any(|d| d.id == id) {
            return Err(DomainError::WorkoutDayNotFound(id));
        }
        state.remove_day(id);
        Ok(())
    }
}

#[async_trait]
impl ExerciseRepository for InMemoryStore {
    async fn find_by_id(&self, id: ExerciseId) -> RepoResult<Option<Exercise>> {
        Ok(self.lock().exercises.iter().find(|e| e.id == id).cloned())
    }

    async fn find_by_day(&self, day_id: WorkoutDayId) -> RepoResult<Vec<Exercise>> {
        let mut found: Vec<Exercise> = self
            .lock()
            .exercises
            .iter()
            .filter(|e| e.belongs_to(day_id))
            .cloned()
            .collect();
        found.sort_by_key(|e| (e.order, e.id));
        Ok(found)
    }

    async fn find_student_of(&self, id: ExerciseId) -> RepoResult<Option<UserId>> {
        let state = self.lock();
        Ok(state
            .exercises
            .iter()
            .find(|e| e.id == id)
            .and_then(|e| state.student_of_day(e.workout_day_id)))
    }

    async fn append(&self, exercise: &NewExercise) -> RepoResult<Exercise> {
        let mut state = self.lock();
        let day_id = exercise.workout_day_id;
        let order = next_order(
            state
                .exercises
                .iter()
                .filter(|e| e.belongs_to(day_id))
                .map(|e| e.order),
        );
        let created = Exercise {
            id: ExerciseId::new(state.next_id()),
            workout_day_id: day_id,
            exercise_db_id: exercise.exercise_db_id.clone(),
            name: exercise.name.clone(),
            body_part: exercise.body_part.clone(),
            equipment: exercise.equipment.clone(),
            gif_url: exercise.gif_url.clone(),
            sets: exercise.sets.clone(),
            repetitions: exercise.repetitions.clone(),
            weight: exercise.weight,
            rest_seconds: exercise.rest_seconds,
            order,
            notes: exercise.notes.clone(),
        };
        state.exercises.push(created.clone());
        Ok(created)
    }

    async fn update(&self, exercise: &Exercise) -> RepoResult<()> {
        let mut state = self.lock();
        let slot = state
            .exercises
            .iter_mut()
            .find(|e| e.id == exercise.id)
            .ok_or(DomainError::ExerciseNotFound(exercise.id))?;
        *slot = exercise.clone();
        Ok(())
    }

    async fn delete(&self, id: ExerciseId) -> RepoResult<()> {
        let mut state = self.lock();
        let day_id = state
            .exercises
            .iter()
            .find(|e| e.id == id)
            .map(|e| e.workout_day_id)
            .ok_or(DomainError::ExerciseNotFound(id))?;

        let mut current: Vec<&Exercise> =
            state.exercises.iter().filter(|e| e.belongs_to(day_id)).collect();
        current.sort_by_key(|e| (e.order, e.id));
        let ids: Vec<ExerciseId> = current.iter().map(|e| e.id).collect();
        let orders = compact_orders(&ids, id);

        state.statuses.retain(|s| s.exercise_id != id);
        state.exercises.retain(|e| e.id != id);
        for (exercise_id, order) in orders {
            if let Some(e) = state.exercises.iter_mut().find(|e| e.id == exercise_id) {
                e.order = order;
            }
        }
        Ok(())
    }

    async fn apply_orders(
        &self,
        day_id: WorkoutDayId,
        orders: &[(ExerciseId, i32)],
    ) -> RepoResult<()> {
        let mut state = self.lock();
        for (id, order) in orders {
            if let Some(e) = state
                .exercises
                .iter_mut()
                .find(|e| e.id == *id && e.belongs_to(day_id))
            {
                e.order = *order;
            }
        }
        Ok(())
    }
}

#[async_trait]
impl ExerciseStatusRepository for InMemoryStore {
    async fn upsert(&self, status: &NewExerciseStatus) -> RepoResult<ExerciseStatus> {
        let mut state = self.lock();
        let now = Utc::now();
        if let Some(existing) = state.statuses.iter_mut().find(|s| {
            s.exercise_id == status.exercise_id
                && s.student_id == status.student_id
                && s.date == status.date
        }) {
            existing.status = status.status;
            existing.recorded_at = now;
            return Ok(existing.clone());
        }
        let created = ExerciseStatus {
            id: ExerciseStatusId::new(state.next_id()),
            exercise_id: status.exercise_id,
            student_id: status.student_id,
            date: status.date,
            status: status.status,
            recorded_at: now,
        };
        state.statuses.push(created.clone());
        Ok(created)
    }

    async fn find_by_student_on(
        &self,
        student_id: UserId,
        date: NaiveDate,
    ) -> RepoResult<Vec<ExerciseStatus>> {
        Ok(self
            .lock()
            .statuses
            .iter()
            .filter(|s| s.student_id == student_id && s.date == date)
            .cloned()
            .collect())
    }

    async fn find_by_student_between(
        &self,
        student_id: UserId,
        from: NaiveDate,
        until: NaiveDate,
    ) -> RepoResult<Vec<ExerciseStatus>> {
        Ok(self
            .lock()
            .statuses
            .iter()
            .filter(|s| s.student_id == student_id && s.date >= from && s.date < until)
            .cloned()
            .collect())
    }

    async fn find_by_students(&self, student_ids: &[UserId]) -> RepoResult<Vec<ExerciseStatus>> {
        Ok(self
            .lock()
            .statuses
            .iter()
            .filter(|s| student_ids.contains(&s.student_id))
            .cloned()
            .collect())
    }
}

/// Service context wired to a fresh in-memory store
pub struct TestEnv {
    pub store: Arc<InMemoryStore>,
    pub ctx: ServiceContext,
}

impl TestEnv {
    pub fn new() -> Self {
        let store = Arc::new(InMemoryStore::default());
        let ctx = ServiceContext::new(
            store.clone(),
            store.clone(),
            store.clone(),
            store.clone(),
            store.clone(),
            store.clone(),
            Arc::new(JwtService::new("test-secret-key-that-is-long-enough", 900, 3_600)),
        );
        Self { store, ctx }
    }

    async fn user(&self, name: &str, role: UserRole) -> User {
        let new_user = NewUser::new(name.to_string(), format!("{name}@example.com"), role);
        UserRepository::create(self.store.as_ref(), &new_user, "not-a-real-hash")
            .await
            .unwrap()
    }

    pub async fn instructor(&self, name: &str) -> User {
        self.user(name, UserRole::Instructor).await
    }

    pub async fn student(&self, name: &str) -> User {
        self.user(name, UserRole::Student).await
    }

    /// Accepted connection between the pair
    pub async fn connect(&self, instructor_id: UserId, student_id: UserId) -> Connection {
        self.store.insert_accepted(instructor_id, student_id, Utc::now())
    }

    pub async fn workout(&self, student_id: UserId, name: &str) -> Workout {
        let new_workout = NewWorkout {
            student_id,
            name: name.to_string(),
        };
        WorkoutRepository::create(self.store.as_ref(), &new_workout)
            .await
            .unwrap()
    }

    pub async fn day(&self, workout_id: WorkoutId, weekday: Weekday) -> WorkoutDay {
        WorkoutDayRepository::create(self.store.as_ref(), workout_id, weekday)
            .await
            .unwrap()
    }

    pub async fn exercise(&self, day_id: WorkoutDayId, name: &str) -> Exercise {
        let new_exercise = NewExercise {
            workout_day_id: day_id,
            exercise_db_id: format!("db-{name}"),
            name: name.to_string(),
            body_part: "legs".to_string(),
            equipment: "barbell".to_string(),
            gif_url: String::new(),
            sets: "3".to_string(),
            repetitions: "10".to_string(),
            weight: None,
            rest_seconds: Some(90),
            notes: None,
        };
        ExerciseRepository::append(self.store.as_ref(), &new_exercise)
            .await
            .unwrap()
    }

    pub async fn mark(
        &self,
        exercise_id: ExerciseId,
        student_id: UserId,
        date: NaiveDate,
        status: CompletionStatus,
    ) -> ExerciseStatus {
        let new_status = NewExerciseStatus {
            exercise_id,
            student_id,
            date,
            status,
        };
        ExerciseStatusRepository::upsert(self.store.as_ref(), &new_status)
            .await
            .unwrap()
    }
}
