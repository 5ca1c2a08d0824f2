use chrono::{NaiveDate, NaiveDateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::error::{FitError, Result};
use crate::workout::{local_now, Exercise, Workout, WorkoutStatus, WorkoutWithExercises};

/// Schema history. Entry N brings the store to `user_version` N + 1; never edit a shipped entry.
const MIGRATIONS: &[&str] = &[
    r#"
CREATE TABLE IF NOT EXISTS workouts (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    workout_type TEXT NOT NULL,
    workout_date TEXT NOT NULL,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_workouts_date ON workouts(workout_date);

CREATE TABLE IF NOT EXISTS exercises (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    weight INTEGER NOT NULL DEFAULT 0,
    repetitions INTEGER NOT NULL DEFAULT 0,
    sets INTEGER NOT NULL DEFAULT 0,
    duration REAL NOT NULL DEFAULT 0,
    workout_id INTEGER NOT NULL,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL,
    FOREIGN KEY (workout_id) REFERENCES workouts(id)
);

CREATE INDEX IF NOT EXISTS idx_exercises_workout ON exercises(workout_id);
"#,
    "ALTER TABLE workouts ADD COLUMN status TEXT NOT NULL DEFAULT 'completed';",
    "ALTER TABLE exercises ADD COLUMN distance INTEGER NOT NULL DEFAULT 0;",
];

const WORKOUT_COLUMNS: &str = "id, workout_type, workout_date, status, created_at, updated_at";

const EXERCISE_COLUMNS: &str =
    "id, name, weight, repetitions, sets, duration, distance, workout_id, created_at, updated_at";

/// Storage layer for fitrec - wraps SQLite database
pub struct Storage {
    conn: Connection,
    path: Option<PathBuf>,
    migrations_applied: usize,
}

impl Storage {
    /// Open (or create) the database file and bring its schema up to date
    pub fn open(path: &Path) -> Result<Self> {
        let mut conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")?;
        let migrations_applied = migrate(&mut conn)?;
        Ok(Storage {
            conn,
            path: Some(path.to_path_buf()),
            migrations_applied,
        })
    }

    /// Throwaway database, used by tests
    pub fn open_in_memory() -> Result<Self> {
        let mut conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        let migrations_applied = migrate(&mut conn)?;
        Ok(Storage {
            conn,
            path: None,
            migrations_applied,
        })
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Number of migrations this open applied (0 when the schema was already current)
    pub fn migrations_applied(&self) -> usize {
        self.migrations_applied
    }

    pub fn schema_version(&self) -> Result<usize> {
        user_version(&self.conn)
    }

    /// Close the connection. Consuming `self` makes a second close impossible.
    pub fn close(self) -> Result<()> {
        debug!("closing database");
        self.conn.close().map_err(|(_, e)| FitError::Database(e))
    }

    /// Create a workout on `date` (now if omitted); one workout per calendar day
    pub fn create_workout(
        &self,
        workout_type: &str,
        status: WorkoutStatus,
        date: Option<NaiveDateTime>,
    ) -> Result<i64> {
        let date = date.unwrap_or_else(local_now);

        self.in_transaction(|conn| {
            ensure_day_free(conn, date.date())?;
            let id = insert_workout(conn, workout_type, date, status)?;
            info!(id, %date, workout_type, "created workout");
            Ok(id)
        })
    }

    /// Create a workout together with its exercises. Either everything is stored or nothing is.
    pub fn save_workout(
        &self,
        workout_type: &str,
        status: WorkoutStatus,
        date: Option<NaiveDateTime>,
        exercises: &[Exercise],
    ) -> Result<i64> {
        let date = date.unwrap_or_else(local_now);

        self.in_transaction(|conn| {
            ensure_day_free(conn, date.date())?;
            let id = insert_workout(conn, workout_type, date, status)?;
            insert_exercises(conn, id, exercises)?;
            info!(id, %date, workout_type, exercises = exercises.len(), "saved workout");
            Ok(id)
        })
    }

    /// Append exercises to a workout, all or nothing
    pub fn save_exercises_for_workout(&self, workout_id: i64, exercises: &[Exercise]) -> Result<()> {
        self.in_transaction(|conn| insert_exercises(conn, workout_id, exercises))
    }

    /// Persist a model-generated workout and its exercises in one go
    pub fn save_generated_workout(&self, generated: &WorkoutWithExercises) -> Result<i64> {
        let workout = &generated.workout;
        let status = workout.status.unwrap_or(WorkoutStatus::Planned);

        self.in_transaction(|conn| {
            ensure_day_free(conn, workout.workout_date.date())?;
            let id = insert_workout(conn, &workout.workout_type, workout.workout_date, status)?;
            insert_exercises(conn, id, &generated.exercises)?;
            info!(id, exercises = generated.exercises.len(), "saved generated workout");
            Ok(id)
        })
    }

    /// Most recent workout by date, if any
    pub fn get_last_workout(&self) -> Result<Option<WorkoutWithExercises>> {
        let workout = self
            .conn
            .query_row(
                &format!(
                    "SELECT {} FROM workouts ORDER BY workout_date DESC, id DESC LIMIT 1",
                    WORKOUT_COLUMNS
                ),
                [],
                workout_from_row,
            )
            .optional()?;

        workout.map(|w| self.with_exercises(w)).transpose()
    }

    /// All workouts, newest first
    pub fn get_all_workouts(&self) -> Result<Vec<WorkoutWithExercises>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM workouts ORDER BY workout_date DESC, id DESC",
            WORKOUT_COLUMNS
        ))?;

        let workouts = stmt
            .query_map([], workout_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        workouts.into_iter().map(|w| self.with_exercises(w)).collect()
    }

    pub fn get_workout_by_date(&self, date: NaiveDate) -> Result<Option<WorkoutWithExercises>> {
        let workout = self
            .conn
            .query_row(
                &format!(
                    "SELECT {} FROM workouts WHERE DATE(workout_date) = DATE(?1) LIMIT 1",
                    WORKOUT_COLUMNS
                ),
                params![date],
                workout_from_row,
            )
            .optional()?;

        workout.map(|w| self.with_exercises(w)).transpose()
    }

    /// Every exercise name ever logged, alphabetically
    pub fn get_distinct_exercise_names(&self) -> Result<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT DISTINCT name FROM exercises ORDER BY name")?;

        let names = stmt
            .query_map([], |row| row.get(0))?
            .collect::<std::result::Result<Vec<String>, _>>()?;

        Ok(names)
    }

    /// Delete the most recent workout. Returns what was deleted; an empty store is not an error.
    pub fn delete_last_workout(&self) -> Result<Option<Workout>> {
        self.in_transaction(|conn| {
            let workout = conn
                .query_row(
                    &format!(
                        "SELECT {} FROM workouts ORDER BY workout_date DESC, id DESC LIMIT 1",
                        WORKOUT_COLUMNS
                    ),
                    [],
                    workout_from_row,
                )
                .optional()?;

            if let Some(workout) = &workout {
                delete_workout_rows(conn, workout.id)?;
            }
            Ok(workout)
        })
    }

    /// Delete the workout on `date`. Returns false when there was none.
    pub fn delete_workout_by_date(&self, date: NaiveDate) -> Result<bool> {
        self.in_transaction(|conn| {
            let id: Option<i64> = conn
                .query_row(
                    "SELECT id FROM workouts WHERE DATE(workout_date) = DATE(?1) LIMIT 1",
                    params![date],
                    |row| row.get(0),
                )
                .optional()?;

            match id {
                Some(id) => {
                    delete_workout_rows(conn, id)?;
                    Ok(true)
                }
                None => Ok(false),
            }
        })
    }

    /// Replace a workout's type and its whole exercise list
    pub fn update_workout(&self, workout_id: i64, workout_type: &str, exercises: &[Exercise]) -> Result<()> {
        self.in_transaction(|conn| {
            let updated = conn.execute(
                "UPDATE workouts SET workout_type = ?1, updated_at = ?2 WHERE id = ?3",
                params![workout_type, Utc::now(), workout_id],
            )?;
            if updated == 0 {
                return Err(FitError::NotFound(format!("no workout with id {}", workout_id)));
            }

            conn.execute("DELETE FROM exercises WHERE workout_id = ?1", params![workout_id])?;
            insert_exercises(conn, workout_id, exercises)?;
            debug!(workout_id, exercises = exercises.len(), "replaced workout exercises");
            Ok(())
        })
    }

    /// Move a workout to another day, keeping its time of day
    pub fn update_workout_date(&self, old_date: NaiveDate, new_date: NaiveDate) -> Result<()> {
        self.in_transaction(|conn| {
            ensure_day_free(conn, new_date)?;

            let existing: Option<(i64, NaiveDateTime)> = conn
                .query_row(
                    "SELECT id, workout_date FROM workouts WHERE DATE(workout_date) = DATE(?1) LIMIT 1",
                    params![old_date],
                    |row| Ok((row.get(0)?, row.get(1)?)),
                )
                .optional()?;

            let (id, workout_date) = existing.ok_or_else(|| {
                FitError::NotFound(format!("no workout found for {}", old_date.format("%Y-%m-%d")))
            })?;

            conn.execute(
                "UPDATE workouts SET workout_date = ?1, updated_at = ?2 WHERE id = ?3",
                params![new_date.and_time(workout_date.time()), Utc::now(), id],
            )?;
            info!(id, %old_date, %new_date, "moved workout");
            Ok(())
        })
    }

    pub fn update_last_workout_status(&self, status: WorkoutStatus) -> Result<()> {
        let updated = self.conn.execute(
            "UPDATE workouts SET status = ?1, updated_at = ?2
             WHERE id = (SELECT id FROM workouts ORDER BY workout_date DESC, id DESC LIMIT 1)",
            params![status, Utc::now()],
        )?;

        if updated == 0 {
            return Err(FitError::NotFound("no workouts found to update".to_string()));
        }
        Ok(())
    }

    fn with_exercises(&self, workout: Workout) -> Result<WorkoutWithExercises> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM exercises WHERE workout_id = ?1 ORDER BY created_at, id",
            EXERCISE_COLUMNS
        ))?;

        let exercises = stmt
            .query_map(params![workout.id], exercise_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(WorkoutWithExercises { workout, exercises })
    }

    /// Run `f` in a transaction: commit on Ok, roll back on Err
    fn in_transaction<T>(&self, f: impl FnOnce(&Connection) -> Result<T>) -> Result<T> {
        let tx = self.conn.unchecked_transaction()?;

        match f(&tx) {
            Ok(value) => {
                tx.commit()?;
                Ok(value)
            }
            Err(e) => {
                if let Err(rollback_err) = tx.rollback() {
                    warn!(error = %rollback_err, "rollback failed");
                }
                Err(e)
            }
        }
    }
}

fn user_version(conn: &Connection) -> Result<usize> {
    let version: i64 = conn.pragma_query_value(None, "user_version", |row| row.get(0))?;
    Ok(version.max(0) as usize)
}

/// Apply pending migrations, each in its own transaction. Returns how many ran.
fn migrate(conn: &mut Connection) -> Result<usize> {
    let current = user_version(conn)?;
    if current > MIGRATIONS.len() {
        warn!(current, known = MIGRATIONS.len(), "database schema is newer than this build");
        return Ok(0);
    }

    for (idx, sql) in MIGRATIONS.iter().enumerate().skip(current) {
        let version = idx + 1;
        let tx = conn.transaction()?;
        tx.execute_batch(sql)
            .and_then(|_| tx.pragma_update(None, "user_version", version as i64))
            .map_err(|source| FitError::Migration { version, source })?;
        tx.commit()?;
        info!(version, "applied migration");
    }

    Ok(MIGRATIONS.len() - current)
}

fn ensure_day_free(conn: &Connection, day: NaiveDate) -> Result<()> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM workouts WHERE DATE(workout_date) = DATE(?1)",
        params![day],
        |row| row.get(0),
    )?;

    if count > 0 {
        return Err(FitError::Conflict(format!(
            "a workout already exists for {}. Only one workout per day is allowed",
            day.format("%Y-%m-%d")
        )));
    }
    Ok(())
}

fn insert_workout(
    conn: &Connection,
    workout_type: &str,
    date: NaiveDateTime,
    status: WorkoutStatus,
) -> Result<i64> {
    let now = Utc::now();
    conn.execute(
        "INSERT INTO workouts (workout_type, workout_date, status, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![workout_type, date, status, now, now],
    )?;
    Ok(conn.last_insert_rowid())
}

fn insert_exercises(conn: &Connection, workout_id: i64, exercises: &[Exercise]) -> Result<()> {
    let now = Utc::now();
    let mut stmt = conn.prepare(
        "INSERT INTO exercises (name, weight, repetitions, sets, duration, distance, workout_id, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
    )?;

    for exercise in exercises {
        stmt.execute(params![
            exercise.name,
            exercise.weight,
            exercise.repetitions,
            exercise.sets,
            exercise.duration,
            exercise.distance,
            workout_id,
            exercise.created_at.unwrap_or(now),
            exercise.updated_at.unwrap_or(now),
        ])?;
    }
    Ok(())
}

fn delete_workout_rows(conn: &Connection, workout_id: i64) -> Result<()> {
    conn.execute("DELETE FROM exercises WHERE workout_id = ?1", params![workout_id])?;
    conn.execute("DELETE FROM workouts WHERE id = ?1", params![workout_id])?;
    info!(workout_id, "deleted workout");
    Ok(())
}

fn workout_from_row(row: &Row<'_>) -> rusqlite::Result<Workout> {
    Ok(Workout {
        id: row.get(0)?,
        workout_type: row.get(1)?,
        workout_date: row.get(2)?,
        status: Some(row.get(3)?),
        created_at: row.get(4)?,
        updated_at: row.get(5)?,
    })
}

fn exercise_from_row(row: &Row<'_>) -> rusqlite::Result<Exercise> {
    Ok(Exercise {
        id: row.get(0)?,
        name: row.get(1)?,
        weight: row.get(2)?,
        repetitions: row.get(3)?,
        sets: row.get(4)?,
        duration: row.get(5)?,
        distance: row.get(6)?,
        workout_id: row.get(7)?,
        created_at: row.get(8)?,
        updated_at: row.get(9)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        day(y, m, d).and_hms_opt(h, min, 0).unwrap()
    }

    fn create_test_storage() -> Storage {
        Storage::open_in_memory().unwrap()
    }

    fn exercise_rows(storage: &Storage) -> i64 {
        storage
            .conn
            .query_row("SELECT COUNT(*) FROM exercises", [], |row| row.get(0))
            .unwrap()
    }

    fn seed(storage: &Storage, date: NaiveDateTime, workout_type: &str, names: &[&str]) -> i64 {
        let id = storage
            .create_workout(workout_type, WorkoutStatus::Completed, Some(date))
            .unwrap();
        let exercises: Vec<Exercise> = names.iter().map(|n| Exercise::strength(n, 50, 10, 3)).collect();
        storage.save_exercises_for_workout(id, &exercises).unwrap();
        id
    }

    #[test]
    fn test_open_creates_schema() {
        let storage = create_test_storage();

        assert_eq!(storage.schema_version().unwrap(), MIGRATIONS.len());
        assert_eq!(storage.migrations_applied(), MIGRATIONS.len());
        assert!(storage.get_all_workouts().unwrap().is_empty());
    }

    #[test]
    fn test_reopen_is_idempotent() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("workouts.db");

        let storage = Storage::open(&db_path).unwrap();
        seed(&storage, at(2025, 1, 10, 9, 0), "strength", &["Squat"]);
        storage.close().unwrap();

        let reopened = Storage::open(&db_path).unwrap();
        assert_eq!(reopened.migrations_applied(), 0);
        assert_eq!(reopened.schema_version().unwrap(), MIGRATIONS.len());
        assert_eq!(reopened.get_all_workouts().unwrap().len(), 1);
        assert_eq!(reopened.path(), Some(db_path.as_path()));
    }

    #[test]
    fn test_create_workout_conflicts_on_same_day() {
        let storage = create_test_storage();

        storage
            .create_workout("strength", WorkoutStatus::Completed, Some(at(2025, 1, 15, 7, 30)))
            .unwrap();
        let err = storage
            .create_workout("cardio", WorkoutStatus::Planned, Some(at(2025, 1, 15, 19, 45)))
            .unwrap_err();

        assert!(matches!(err, FitError::Conflict(_)));
        assert_eq!(storage.get_all_workouts().unwrap().len(), 1);
    }

    #[test]
    fn test_create_workout_defaults_to_today() {
        let storage = create_test_storage();

        storage.create_workout("cardio", WorkoutStatus::Completed, None).unwrap();

        let today = local_now().date();
        let workout = storage.get_workout_by_date(today).unwrap().unwrap();
        assert_eq!(workout.workout.workout_type, "cardio");
        assert_eq!(workout.workout.status, Some(WorkoutStatus::Completed));

        let err = storage.create_workout("strength", WorkoutStatus::Completed, None).unwrap_err();
        assert!(matches!(err, FitError::Conflict(_)));
    }

    #[test]
    fn test_save_exercises_round_trip() {
        let storage = create_test_storage();
        let id = storage
            .create_workout("strength", WorkoutStatus::Completed, Some(at(2025, 2, 1, 8, 0)))
            .unwrap();

        let mut plank = Exercise::new("Plank");
        plank.duration = 1.75;
        let mut run = Exercise::new("Easy run");
        run.distance = 5000;
        let exercises = vec![
            Exercise::strength("Squat", 100, 5, 5),
            plank,
            Exercise::strength("Bench Press", 72, 8, 3),
            run,
        ];
        storage.save_exercises_for_workout(id, &exercises).unwrap();

        let last = storage.get_last_workout().unwrap().unwrap();
        let by_date = storage.get_workout_by_date(day(2025, 2, 1)).unwrap().unwrap();
        assert_eq!(last, by_date);

        let names: Vec<&str> = last.exercises.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Squat", "Plank", "Bench Press", "Easy run"]);
        assert_eq!(last.exercises[0].weight, 100);
        assert_eq!(last.exercises[0].repetitions, 5);
        assert_eq!(last.exercises[0].sets, 5);
        assert_eq!(last.exercises[1].duration, 1.75);
        assert_eq!(last.exercises[3].distance, 5000);
        assert!(last.exercises.iter().all(|e| e.workout_id == id));
    }

    #[test]
    fn test_save_exercises_rolls_back_on_failure() {
        let storage = create_test_storage();

        let result = storage.save_exercises_for_workout(
            999,
            &[Exercise::strength("Squat", 100, 5, 5), Exercise::strength("Row", 60, 8, 3)],
        );

        assert!(result.is_err());
        assert_eq!(exercise_rows(&storage), 0);
    }

    #[test]
    fn test_save_workout_stores_everything() {
        let storage = create_test_storage();

        let id = storage
            .save_workout(
                "strength",
                WorkoutStatus::Completed,
                Some(at(2025, 2, 1, 9, 0)),
                &[Exercise::strength("Squat", 100, 5, 5), Exercise::strength("Row", 60, 8, 3)],
            )
            .unwrap();

        let saved = storage.get_last_workout().unwrap().unwrap();
        assert_eq!(saved.workout.id, id);
        assert_eq!(saved.exercises.len(), 2);
    }

    #[test]
    fn test_save_workout_leaves_no_orphan_on_failure() {
        let storage = create_test_storage();
        let mut broken = Exercise::strength("Plank", 0, 0, 3);
        // SQLite stores NaN as NULL, which the NOT NULL duration column rejects
        broken.duration = f64::NAN;

        let result = storage.save_workout(
            "strength",
            WorkoutStatus::Completed,
            Some(at(2025, 2, 1, 9, 0)),
            &[Exercise::strength("Squat", 100, 5, 5), broken],
        );

        assert!(result.is_err());
        assert!(storage.get_all_workouts().unwrap().is_empty());
        assert_eq!(exercise_rows(&storage), 0);
    }

    #[test]
    fn test_get_last_workout_empty() {
        let storage = create_test_storage();
        assert!(storage.get_last_workout().unwrap().is_none());
    }

    #[test]
    fn test_get_last_workout_uses_workout_date() {
        let storage = create_test_storage();

        seed(&storage, at(2025, 3, 20, 8, 0), "cardio", &["Run"]);
        seed(&storage, at(2025, 3, 18, 8, 0), "strength", &["Squat"]);

        let last = storage.get_last_workout().unwrap().unwrap();
        assert_eq!(last.workout.workout_date.date(), day(2025, 3, 20));
    }

    #[test]
    fn test_all_workouts_ordered_and_delete_middle() {
        let storage = create_test_storage();

        seed(&storage, at(2025, 1, 2, 8, 0), "strength", &["Squat"]);
        seed(&storage, at(2025, 1, 4, 8, 0), "strength", &["Deadlift"]);
        seed(&storage, at(2025, 1, 3, 8, 0), "cardio", &["Run"]);

        let dates: Vec<NaiveDate> = storage
            .get_all_workouts()
            .unwrap()
            .iter()
            .map(|w| w.workout.workout_date.date())
            .collect();
        assert_eq!(dates, vec![day(2025, 1, 4), day(2025, 1, 3), day(2025, 1, 2)]);

        assert!(storage.delete_workout_by_date(day(2025, 1, 3)).unwrap());

        let remaining = storage.get_all_workouts().unwrap();
        let dates: Vec<NaiveDate> = remaining.iter().map(|w| w.workout.workout_date.date()).collect();
        assert_eq!(dates, vec![day(2025, 1, 4), day(2025, 1, 2)]);
        assert_eq!(remaining[0].exercises[0].name, "Deadlift");
        assert_eq!(exercise_rows(&storage), 2);
    }

    #[test]
    fn test_distinct_exercise_names_sorted() {
        let storage = create_test_storage();

        seed(&storage, at(2025, 1, 1, 8, 0), "strength", &["Squat", "Bench Press"]);
        seed(&storage, at(2025, 1, 2, 8, 0), "strength", &["Squat", "Deadlift"]);

        let names = storage.get_distinct_exercise_names().unwrap();
        assert_eq!(names, vec!["Bench Press", "Deadlift", "Squat"]);
    }

    #[test]
    fn test_delete_last_workout_is_idempotent() {
        let storage = create_test_storage();

        assert!(storage.delete_last_workout().unwrap().is_none());

        seed(&storage, at(2025, 1, 1, 8, 0), "strength", &["Squat"]);
        seed(&storage, at(2025, 1, 5, 8, 0), "strength", &["Row", "Curl"]);

        let deleted = storage.delete_last_workout().unwrap().unwrap();
        assert_eq!(deleted.workout_date.date(), day(2025, 1, 5));
        assert_eq!(exercise_rows(&storage), 1);

        storage.delete_last_workout().unwrap();
        assert!(storage.delete_last_workout().unwrap().is_none());
        assert!(storage.get_all_workouts().unwrap().is_empty());
        assert_eq!(exercise_rows(&storage), 0);
    }

    #[test]
    fn test_delete_by_date_missing_is_noop() {
        let storage = create_test_storage();
        seed(&storage, at(2025, 1, 1, 8, 0), "strength", &["Squat"]);

        assert!(!storage.delete_workout_by_date(day(2025, 6, 1)).unwrap());
        assert!(!storage.delete_workout_by_date(day(2025, 6, 1)).unwrap());
        assert_eq!(storage.get_all_workouts().unwrap().len(), 1);
    }

    #[test]
    fn test_update_workout_replaces_exercises() {
        let storage = create_test_storage();
        let id = seed(&storage, at(2025, 1, 1, 8, 0), "strength", &["Squat", "Bench Press", "Row"]);

        let replacement = vec![Exercise::strength("Pull-ups", 0, 10, 4), Exercise::new("Plank")];
        storage.update_workout(id, "cardio", &replacement).unwrap();

        let updated = storage.get_workout_by_date(day(2025, 1, 1)).unwrap().unwrap();
        assert_eq!(updated.workout.workout_type, "cardio");
        let names: Vec<&str> = updated.exercises.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Pull-ups", "Plank"]);
        assert_eq!(exercise_rows(&storage), 2);
    }

    #[test]
    fn test_update_workout_unknown_id() {
        let storage = create_test_storage();
        let err = storage.update_workout(42, "strength", &[]).unwrap_err();
        assert!(matches!(err, FitError::NotFound(_)));
    }

    #[test]
    fn test_update_workout_date_moves_workout() {
        let storage = create_test_storage();
        seed(&storage, at(2025, 1, 10, 18, 15), "strength", &["Squat"]);

        storage.update_workout_date(day(2025, 1, 10), day(2025, 1, 12)).unwrap();

        assert!(storage.get_workout_by_date(day(2025, 1, 10)).unwrap().is_none());
        let moved = storage.get_workout_by_date(day(2025, 1, 12)).unwrap().unwrap();
        assert_eq!(moved.workout.workout_date, at(2025, 1, 12, 18, 15));
        assert_eq!(moved.exercises.len(), 1);
    }

    #[test]
    fn test_update_workout_date_conflict() {
        let storage = create_test_storage();
        seed(&storage, at(2025, 1, 10, 8, 0), "strength", &["Squat"]);
        seed(&storage, at(2025, 1, 12, 8, 0), "cardio", &["Run"]);

        let err = storage
            .update_workout_date(day(2025, 1, 10), day(2025, 1, 12))
            .unwrap_err();

        assert!(matches!(err, FitError::Conflict(_)));
        assert!(storage.get_workout_by_date(day(2025, 1, 10)).unwrap().is_some());
    }

    #[test]
    fn test_update_workout_date_not_found() {
        let storage = create_test_storage();

        let err = storage
            .update_workout_date(day(2025, 1, 10), day(2025, 1, 12))
            .unwrap_err();

        assert!(matches!(err, FitError::NotFound(_)));
        assert_eq!(err.to_string(), "no workout found for 2025-01-10");
    }

    #[test]
    fn test_update_last_workout_status() {
        let storage = create_test_storage();

        let err = storage.update_last_workout_status(WorkoutStatus::Planned).unwrap_err();
        assert!(matches!(err, FitError::NotFound(_)));

        seed(&storage, at(2025, 1, 1, 8, 0), "strength", &["Squat"]);
        seed(&storage, at(2025, 1, 3, 8, 0), "strength", &["Row"]);
        storage.update_last_workout_status(WorkoutStatus::Planned).unwrap();

        let all = storage.get_all_workouts().unwrap();
        assert_eq!(all[0].workout.status, Some(WorkoutStatus::Planned));
        assert_eq!(all[1].workout.status, Some(WorkoutStatus::Completed));
    }

    #[test]
    fn test_save_generated_workout() {
        let storage = create_test_storage();

        let generated = WorkoutWithExercises {
            workout: Workout::new("strength", at(2025, 1, 15, 0, 0), None),
            exercises: vec![
                Exercise::strength("Deadlifts", 120, 5, 3),
                Exercise::strength("Lunges", 20, 12, 3),
            ],
        };
        storage.save_generated_workout(&generated).unwrap();

        let saved = storage.get_workout_by_date(day(2025, 1, 15)).unwrap().unwrap();
        assert_eq!(saved.workout.status, Some(WorkoutStatus::Planned));
        assert_eq!(saved.exercises.len(), 2);
        assert_eq!(saved.exercises[0].weight, 120);

        let err = storage.save_generated_workout(&generated).unwrap_err();
        assert!(matches!(err, FitError::Conflict(_)));
        assert_eq!(exercise_rows(&storage), 2);
    }
}
