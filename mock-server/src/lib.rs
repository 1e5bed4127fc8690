use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use tower_http::trace::TraceLayer;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Workout {
    pub id: i64,
    pub title: String,
    pub date: NaiveDateTime,
    pub exercises: Vec<i64>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Exercise {
    pub id: i64,
    pub workout_id: i64,
    pub exercise_name: String,
    pub sets: Vec<i64>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Set {
    pub id: i64,
    pub exercise_id: i64,
    pub reps: i64,
    pub weight: i64,
}

#[derive(Deserialize)]
pub struct NewWorkout {
    pub title: String,
}

#[derive(Deserialize)]
pub struct NewExercise {
    pub exercise_name: String,
}

#[derive(Deserialize)]
pub struct NewSet {
    pub reps: i64,
    pub weight: i64,
}

/// Ids come from a per-table counter starting at 1 and are never reused.
#[derive(Default)]
pub struct Tables {
    workouts: BTreeMap<i64, Workout>,
    exercises: BTreeMap<i64, Exercise>,
    sets: BTreeMap<i64, Set>,
    next_workout: i64,
    next_exercise: i64,
    next_set: i64,
}

impl Tables {
    fn exercise_in(&self, workout_id: i64, exercise_id: i64) -> Option<&Exercise> {
        self.exercises
            .get(&exercise_id)
            .filter(|e| e.workout_id == workout_id)
    }
}

fn next_id(counter: &mut i64) -> i64 {
    *counter += 1;
    *counter
}

pub type Db = Arc<RwLock<Tables>>;

type ApiResult<T> = Result<T, (StatusCode, Json<Value>)>;

fn not_found(message: String) -> (StatusCode, Json<Value>) {
    (StatusCode::NOT_FOUND, Json(json!({ "message": message })))
}

/// A body without a usable `title` is answered the way the workout backend's
/// argument parser answers it.
fn missing_title() -> (StatusCode, Json<Value>) {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({ "message": { "title": "Missing required parameter" } })),
    )
}

fn parse_id(raw: &str) -> ApiResult<i64> {
    raw.parse()
        .map_err(|_| not_found(format!("Invalid id {raw}")))
}

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Tables::default()));
    Router::new()
        .route("/workout", post(create_workout))
        .route("/workout/all", get(list_workouts))
        .route("/workout/{id}", get(get_workout).delete(delete_workout))
        .route("/workout/exercises/{workout_id}", post(create_exercise))
        .route("/workout/exercises/{workout_id}/", get(list_exercises))
        .route(
            "/workout/exercises/{workout_id}/{exercise_id}",
            get(get_exercise)
                .post(create_exercise_at)
                .delete(delete_exercise),
        )
        .route(
            "/workout/exercises/sets/{workout_id}/{exercise_id}",
            post(create_set),
        )
        .route(
            "/workout/exercises/sets/{workout_id}/{exercise_id}/{set_id}",
            get(get_set).delete(delete_set),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

// --- workouts ---

async fn list_workouts(State(db): State<Db>) -> Json<Vec<Workout>> {
    let tables = db.read().await;
    Json(tables.workouts.values().cloned().collect())
}

async fn create_workout(
    State(db): State<Db>,
    input: Result<Json<NewWorkout>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Workout>)> {
    let Json(input) = input.map_err(|rejection| {
        tracing::debug!(error = %rejection, "rejected workout body");
        missing_title()
    })?;
    let mut tables = db.write().await;
    let workout = Workout {
        id: next_id(&mut tables.next_workout),
        title: input.title,
        date: Local::now().naive_local(),
        exercises: Vec::new(),
    };
    tables.workouts.insert(workout.id, workout.clone());
    tracing::info!(id = workout.id, title = %workout.title, "workout created");
    Ok((StatusCode::CREATED, Json(workout)))
}

async fn get_workout(State(db): State<Db>, Path(id): Path<String>) -> ApiResult<Json<Workout>> {
    let id = parse_id(&id)?;
    let tables = db.read().await;
    tables
        .workouts
        .get(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| not_found(format!("Workout with ID {id} not found")))
}

async fn delete_workout(State(db): State<Db>, Path(id): Path<String>) -> ApiResult<Json<Value>> {
    let id = parse_id(&id)?;
    let mut tables = db.write().await;
    let workout = tables
        .workouts
        .remove(&id)
        .ok_or_else(|| not_found(format!("Workout with ID {id} not found")))?;
    for exercise_id in workout.exercises {
        if let Some(exercise) = tables.exercises.remove(&exercise_id) {
            for set_id in exercise.sets {
                tables.sets.remove(&set_id);
            }
        }
    }
    Ok(Json(json!({ "message": format!("Workout with ID {id} has been deleted") })))
}

// --- exercises ---

async fn list_exercises(
    State(db): State<Db>,
    Path(workout_id): Path<String>,
) -> ApiResult<Json<Vec<Exercise>>> {
    let workout_id = parse_id(&workout_id)?;
    let tables = db.read().await;
    exercises_of(&tables, workout_id).map(Json)
}

fn exercises_of(tables: &Tables, workout_id: i64) -> ApiResult<Vec<Exercise>> {
    let workout = tables
        .workouts
        .get(&workout_id)
        .ok_or_else(|| not_found(format!("Workout with ID {workout_id} not found")))?;
    Ok(workout
        .exercises
        .iter()
        .filter_map(|id| tables.exercises.get(id).cloned())
        .collect())
}

async fn get_exercise(
    State(db): State<Db>,
    Path((workout_id, exercise_id)): Path<(String, String)>,
) -> ApiResult<Json<Value>> {
    let workout_id = parse_id(&workout_id)?;
    let tables = db.read().await;
    if exercise_id == "all" {
        return Ok(Json(json!(exercises_of(&tables, workout_id)?)));
    }
    let exercise_id = parse_id(&exercise_id)?;
    if !tables.workouts.contains_key(&workout_id) {
        return Err(not_found(format!("Workout with ID {workout_id} not found")));
    }
    tables
        .exercise_in(workout_id, exercise_id)
        .map(|e| Json(json!(e)))
        .ok_or_else(|| {
            not_found(format!(
                "Exercise with ID {exercise_id} not found in Workout with ID {workout_id}"
            ))
        })
}

async fn create_exercise(
    State(db): State<Db>,
    Path(workout_id): Path<String>,
    Json(input): Json<NewExercise>,
) -> ApiResult<(StatusCode, Json<Exercise>)> {
    insert_exercise(db, &workout_id, input).await
}

/// Same as `create_exercise`; the trailing id segment is ignored because ids
/// are assigned here.
async fn create_exercise_at(
    State(db): State<Db>,
    Path((workout_id, _exercise_id)): Path<(String, String)>,
    Json(input): Json<NewExercise>,
) -> ApiResult<(StatusCode, Json<Exercise>)> {
    insert_exercise(db, &workout_id, input).await
}

async fn insert_exercise(
    db: Db,
    workout_id: &str,
    input: NewExercise,
) -> ApiResult<(StatusCode, Json<Exercise>)> {
    let workout_id = parse_id(workout_id)?;
    let mut tables = db.write().await;
    if !tables.workouts.contains_key(&workout_id) {
        return Err(not_found(format!("Workout with ID {workout_id} not found")));
    }
    let exercise = Exercise {
        id: next_id(&mut tables.next_exercise),
        workout_id,
        exercise_name: input.exercise_name,
        sets: Vec::new(),
    };
    tables.exercises.insert(exercise.id, exercise.clone());
    if let Some(workout) = tables.workouts.get_mut(&workout_id) {
        workout.exercises.push(exercise.id);
    }
    Ok((StatusCode::CREATED, Json(exercise)))
}

async fn delete_exercise(
    State(db): State<Db>,
    Path((workout_id, exercise_id)): Path<(String, String)>,
) -> ApiResult<Json<Value>> {
    let workout_id = parse_id(&workout_id)?;
    let exercise_id = parse_id(&exercise_id)?;
    let mut tables = db.write().await;
    if !tables.workouts.contains_key(&workout_id) {
        return Err(not_found(format!("Workout with ID {workout_id} not found")));
    }
    if tables.exercise_in(workout_id, exercise_id).is_none() {
        return Err(not_found(format!(
            "Exercise with ID {exercise_id} not found in Workout with ID {workout_id}"
        )));
    }
    if let Some(exercise) = tables.exercises.remove(&exercise_id) {
        for set_id in exercise.sets {
            tables.sets.remove(&set_id);
        }
    }
    if let Some(workout) = tables.workouts.get_mut(&workout_id) {
        workout.exercises.retain(|id| *id != exercise_id);
    }
    Ok(Json(
        json!({ "message": format!("Exercise with ID {exercise_id} has been deleted") }),
    ))
}

// --- sets ---

fn missing_exercise(workout_id: i64, exercise_id: i64) -> (StatusCode, Json<Value>) {
    not_found(format!(
        "Exercise with ID {exercise_id} not found in Workout with ID {workout_id}"
    ))
}

async fn create_set(
    State(db): State<Db>,
    Path((workout_id, exercise_id)): Path<(String, String)>,
    Json(input): Json<NewSet>,
) -> ApiResult<(StatusCode, Json<Set>)> {
    let workout_id = parse_id(&workout_id)?;
    let exercise_id = parse_id(&exercise_id)?;
    let mut tables = db.write().await;
    if tables.exercise_in(workout_id, exercise_id).is_none() {
        return Err(missing_exercise(workout_id, exercise_id));
    }
    let set = Set {
        id: next_id(&mut tables.next_set),
        exercise_id,
        reps: input.reps,
        weight: input.weight,
    };
    tables.sets.insert(set.id, set.clone());
    if let Some(exercise) = tables.exercises.get_mut(&exercise_id) {
        exercise.sets.push(set.id);
    }
    Ok((StatusCode::CREATED, Json(set)))
}

async fn get_set(
    State(db): State<Db>,
    Path((workout_id, exercise_id, set_id)): Path<(String, String, String)>,
) -> ApiResult<Json<Value>> {
    let workout_id = parse_id(&workout_id)?;
    let exercise_id = parse_id(&exercise_id)?;
    let tables = db.read().await;
    let exercise = tables
        .exercise_in(workout_id, exercise_id)
        .ok_or_else(|| missing_exercise(workout_id, exercise_id))?;
    if set_id == "all" {
        let sets: Vec<&Set> = exercise
            .sets
            .iter()
            .filter_map(|id| tables.sets.get(id))
            .collect();
        return Ok(Json(json!(sets)));
    }
    let set_id = parse_id(&set_id)?;
    tables
        .sets
        .get(&set_id)
        .filter(|s| s.exercise_id == exercise_id)
        .map(|s| Json(json!(s)))
        .ok_or_else(|| not_found(format!("Set with ID {set_id} not found")))
}

async fn delete_set(
    State(db): State<Db>,
    Path((workout_id, exercise_id, set_id)): Path<(String, String, String)>,
) -> ApiResult<Json<Value>> {
    let workout_id = parse_id(&workout_id)?;
    let exercise_id = parse_id(&exercise_id)?;
    let set_id = parse_id(&set_id)?;
    let mut tables = db.write().await;
    if tables.exercise_in(workout_id, exercise_id).is_none() {
        return Err(missing_exercise(workout_id, exercise_id));
    }
    match tables.sets.get(&set_id) {
        Some(set) if set.exercise_id == exercise_id => {}
        _ => return Err(not_found(format!("Set with ID {set_id} not found"))),
    }
    tables.sets.remove(&set_id);
    if let Some(exercise) = tables.exercises.get_mut(&exercise_id) {
        exercise.sets.retain(|id| *id != set_id);
    }
    Ok(Json(
        json!({ "message": format!("Set with ID {set_id} has been deleted") }),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn workout_serializes_like_the_backend() {
        let workout = Workout {
            id: 1,
            title: "Leg Day".to_string(),
            date: NaiveDateTime::parse_from_str("2024-03-01 09:30:00", "%Y-%m-%d %H:%M:%S")
                .unwrap(),
            exercises: vec![2, 3],
        };
        let json = serde_json::to_value(&workout).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["title"], "Leg Day");
        assert_eq!(json["date"], "2024-03-01T09:30:00");
        assert_eq!(json["exercises"], json!([2, 3]));
    }

    #[test]
    fn new_workout_rejects_missing_title() {
        let result: Result<NewWorkout, _> = serde_json::from_str(r#"{"name":"Leg Day"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn new_set_requires_weight() {
        let result: Result<NewSet, _> = serde_json::from_str(r#"{"reps":5}"#);
        assert!(result.is_err());
        let set: NewSet = serde_json::from_str(r#"{"reps":5,"weight":100}"#).unwrap();
        assert_eq!((set.reps, set.weight), (5, 100));
    }

    #[test]
    fn ids_count_up_from_one() {
        let mut counter = 0;
        assert_eq!(next_id(&mut counter), 1);
        assert_eq!(next_id(&mut counter), 2);
    }

    #[test]
    fn exercise_lookup_is_scoped_to_its_workout() {
        let mut tables = Tables::default();
        tables.exercises.insert(
            1,
            Exercise {
                id: 1,
                workout_id: 7,
                exercise_name: "Squat".to_string(),
                sets: Vec::new(),
            },
        );
        assert!(tables.exercise_in(7, 1).is_some());
        assert!(tables.exercise_in(8, 1).is_none());
    }
}
