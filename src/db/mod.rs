//! Database layer (Firestore in production, in-memory for development and tests).

pub mod firestore;
pub mod memory;

pub use firestore::FirestoreDb;
pub use memory::MemoryDb;

use crate::error::AppError;
use crate::models::{Activity, LeaderboardEntry, Team, User, Workout};
use crate::validation::FieldErrors;
use serde::{de::DeserializeOwned, Serialize};

/// Collection names as constants.
pub mod collections {
    pub const USERS: &str = "users";
    pub const TEAMS: &str = "teams";
    pub const ACTIVITIES: &str = "activities";
    pub const LEADERBOARD: &str = "leaderboard";
    pub const WORKOUTS: &str = "workouts";
}

/// Database handle shared by all requests.
#[derive(Clone)]
pub enum Database {
    Firestore(FirestoreDb),
    Memory(MemoryDb),
}

impl Database {
    /// Create an empty in-memory database.
    pub fn in_memory() -> Self {
        Database::Memory(MemoryDb::new())
    }

    async fn insert<T>(&self, collection: &str, id: &str, doc: &T) -> Result<(), AppError>
    where
        T: Serialize + DeserializeOwned + Send + Sync,
    {
        match self {
            Database::Firestore(db) => db.insert(collection, id, doc).await,
            Database::Memory(db) => db.insert(collection, id, doc),
        }
    }

    async fn insert_unique<T>(
        &self,
        collection: &str,
        id: &str,
        doc: &T,
        field: &'static str,
        value: &str,
    ) -> Result<bool, AppError>
    where
        T: Serialize + DeserializeOwned + Send + Sync,
    {
        match self {
            Database::Firestore(db) => db.insert_unique(collection, id, doc, field, value).await,
            Database::Memory(db) => db.insert_unique(collection, id, doc, field, value),
        }
    }

    async fn get<T>(&self, collection: &str, id: &str) -> Result<Option<T>, AppError>
    where
        T: DeserializeOwned + Send,
    {
        match self {
            Database::Firestore(db) => db.get(collection, id).await,
            Database::Memory(db) => db.get(collection, id),
        }
    }

    async fn list<T>(&self, collection: &str) -> Result<Vec<T>, AppError>
    where
        T: DeserializeOwned + Send,
    {
        match self {
            Database::Firestore(db) => db.list(collection).await,
            Database::Memory(db) => db.list(collection),
        }
    }

    async fn exists(&self, collection: &str, id: &str) -> Result<bool, AppError> {
        match self {
            Database::Firestore(db) => db.exists(collection, id).await,
            Database::Memory(db) => Ok(db.exists(collection, id)),
        }
    }

    // ─── User Operations ─────────────────────────────────────────

    /// Store a new user. Fails with a `username` field error if the name is taken.
    pub async fn create_user(&self, user: &User) -> Result<(), AppError> {
        let inserted = self
            .insert_unique(collections::USERS, &user.id, user, "username", &user.username)
            .await?;

        if !inserted {
            return Err(AppError::Validation(FieldErrors::single(
                "username",
                "A user with that username already exists.",
            )));
        }
        Ok(())
    }

    pub async fn get_user(&self, id: &str) -> Result<Option<User>, AppError> {
        self.get(collections::USERS, id).await
    }

    pub async fn list_users(&self) -> Result<Vec<User>, AppError> {
        self.list(collections::USERS).await
    }

    pub async fn user_exists(&self, id: &str) -> Result<bool, AppError> {
        self.exists(collections::USERS, id).await
    }

    // ─── Team Operations ─────────────────────────────────────────

    pub async fn create_team(&self, team: &Team) -> Result<(), AppError> {
        self.insert(collections::TEAMS, &team.id, team).await
    }

    pub async fn get_team(&self, id: &str) -> Result<Option<Team>, AppError> {
        self.get(collections::TEAMS, id).await
    }

    pub async fn list_teams(&self) -> Result<Vec<Team>, AppError> {
        self.list(collections::TEAMS).await
    }

    // ─── Activity Operations ─────────────────────────────────────

    pub async fn create_activity(&self, activity: &Activity) -> Result<(), AppError> {
        self.insert(collections::ACTIVITIES, &activity.id, activity)
            .await
    }

    pub async fn get_activity(&self, id: &str) -> Result<Option<Activity>, AppError> {
        self.get(collections::ACTIVITIES, id).await
    }

    pub async fn list_activities(&self) -> Result<Vec<Activity>, AppError> {
        self.list(collections::ACTIVITIES).await
    }

    // ─── Leaderboard Operations ──────────────────────────────────

    pub async fn create_leaderboard_entry(&self, entry: &LeaderboardEntry) -> Result<(), AppError> {
        self.insert(collections::LEADERBOARD, &entry.id, entry)
            .await
    }

    pub async fn get_leaderboard_entry(
        &self,
        id: &str,
    ) -> Result<Option<LeaderboardEntry>, AppError> {
        self.get(collections::LEADERBOARD, id).await
    }

    pub async fn list_leaderboard(&self) -> Result<Vec<LeaderboardEntry>, AppError> {
        self.list(collections::LEADERBOARD).await
    }

    // ─── Workout Operations ──────────────────────────────────────

    pub async fn create_workout(&self, workout: &Workout) -> Result<(), AppError> {
        self.insert(collections::WORKOUTS, &workout.id, workout)
            .await
    }

    pub async fn get_workout(&self, id: &str) -> Result<Option<Workout>, AppError> {
        self.get(collections::WORKOUTS, id).await
    }

    pub async fn list_workouts(&self) -> Result<Vec<Workout>, AppError> {
        self.list(collections::WORKOUTS).await
    }
}
