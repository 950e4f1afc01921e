//! Data Transfer Objects - request/response types for the API.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Request to register a new student account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub ra: String,
    pub name: String,
    pub email: String,
    pub username: String,
    pub password: String,
    pub institution_id: i64,
}

/// Request to login with username or email.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub identifier: String,
    pub password: String,
}

/// Request to exchange a refresh token for a new pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Request to change the account password.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

/// Response containing the authentication token pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
}

impl AuthResponse {
    pub fn bearer(access_token: String, refresh_token: String) -> Self {
        Self {
            access_token,
            refresh_token,
            token_type: "bearer".to_string(),
        }
    }
}

/// Public profile of an account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub id: i64,
    pub ra: String,
    pub name: String,
    pub email: String,
    pub username: String,
    pub institution_id: i64,
}

/// Payload to create or replace a grade.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradeRequest {
    pub subject_id: i64,
    pub term: u8,
    pub score: Option<f64>,
}

/// Payload to create or replace a timetable row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleRequest {
    pub weekday: u8,
    pub periods: [Option<i64>; 4],
}

/// Payload to create or replace a calendar event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarEventRequest {
    pub date: NaiveDate,
    pub kind_id: i64,
}

/// Payload to create or replace a note.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoteRequest {
    pub title: String,
    pub body: String,
    pub written_on: NaiveDate,
}
