use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::finance::Expense;

/// Case lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CaseStatus {
    Active,
    Closed,
    #[serde(rename = "On Hold")]
    OnHold,
}

impl CaseStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Closed => "Closed",
            Self::OnHold => "On Hold",
        }
    }

    pub fn from_label(value: &str) -> Option<Self> {
        match value {
            "Active" => Some(Self::Active),
            "Closed" => Some(Self::Closed),
            "On Hold" => Some(Self::OnHold),
            _ => None,
        }
    }
}

/// Urgency shared by cases and tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }

    pub fn from_label(value: &str) -> Option<Self> {
        match value {
            "Low" => Some(Self::Low),
            "Medium" => Some(Self::Medium),
            "High" => Some(Self::High),
            _ => None,
        }
    }
}

/// Task progress state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskStatus {
    Pending,
    #[serde(rename = "In Progress")]
    InProgress,
    Completed,
}

impl TaskStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
        }
    }

    pub fn from_label(value: &str) -> Option<Self> {
        match value {
            "Pending" => Some(Self::Pending),
            "In Progress" => Some(Self::InProgress),
            "Completed" => Some(Self::Completed),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subject {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub aliases: Vec<String>,
    pub relationship: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub images: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: String,
    pub make: String,
    pub model: String,
    pub year: String,
    pub plate: String,
    pub color: String,
    pub vin: String,
    #[serde(default)]
    pub notes: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: String,
    pub name: String,
    pub address: String,
    #[serde(default)]
    pub coordinates: Option<Coordinates>,
    #[serde(rename = "type")]
    pub location_type: String,
    #[serde(default)]
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    pub assignee: String,
    pub due_date: DateTime<Utc>,
    pub status: TaskStatus,
    pub priority: Priority,
    #[serde(default)]
    pub notes: String,
}

impl Task {
    pub fn is_completed(&self) -> bool {
        self.status == TaskStatus::Completed
    }

    /// Past due and still open.
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        self.due_date < now && !self.is_completed()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    #[serde(rename = "type")]
    pub event_type: String,
    pub date: DateTime<Utc>,
    pub location: String,
    #[serde(default)]
    pub notes: String,
    pub investigator: String,
}

/// Journal entry posted against a case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseUpdate {
    pub id: String,
    pub content: String,
    pub author: String,
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "type")]
    pub update_type: String,
}

/// An investigation engagement and everything gathered under it.
///
/// The nested collections belong to the case and have no existence outside
/// it. Fixture data may omit any of them; they deserialize as empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Case {
    pub id: String,
    pub title: String,
    pub account_id: String,
    pub contact_id: String,
    pub status: CaseStatus,
    pub priority: Priority,
    #[serde(rename = "type")]
    pub case_type: String,
    pub created_at: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
    pub assigned_to: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub subjects: Vec<Subject>,
    #[serde(default)]
    pub vehicles: Vec<Vehicle>,
    #[serde(default)]
    pub locations: Vec<Location>,
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub events: Vec<Event>,
    #[serde(default)]
    pub updates: Vec<CaseUpdate>,
    #[serde(default)]
    pub expenses: Vec<Expense>,
}

/// Fields supplied when opening a case. Id, creation time and every nested
/// collection are assigned by the store.
#[derive(Debug, Clone)]
pub struct CreateCaseParams {
    pub title: String,
    pub account_id: String,
    pub contact_id: String,
    pub status: CaseStatus,
    pub priority: Priority,
    pub case_type: String,
    pub due_date: DateTime<Utc>,
    pub assigned_to: String,
    pub description: String,
}

/// Shallow patch for a case. Nested collections are replaced wholesale when
/// supplied, never merged element by element.
#[derive(Debug, Clone, Default)]
pub struct UpdateCaseParams {
    pub title: Option<String>,
    pub account_id: Option<String>,
    pub contact_id: Option<String>,
    pub status: Option<CaseStatus>,
    pub priority: Option<Priority>,
    pub case_type: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    pub assigned_to: Option<String>,
    pub description: Option<String>,
    pub subjects: Option<Vec<Subject>>,
    pub vehicles: Option<Vec<Vehicle>>,
    pub locations: Option<Vec<Location>>,
    pub tasks: Option<Vec<Task>>,
    pub events: Option<Vec<Event>>,
    pub updates: Option<Vec<CaseUpdate>>,
    pub expenses: Option<Vec<Expense>>,
}

impl UpdateCaseParams {
    pub fn apply(self, case: &mut Case) {
        if let Some(title) = self.title {
            case.title = title;
        }
        if let Some(account_id) = self.account_id {
            case.account_id = account_id;
        }
        if let Some(contact_id) = self.contact_id {
            case.contact_id = contact_id;
        }
        if let Some(status) = self.status {
            case.status = status;
        }
        if let Some(priority) = self.priority {
            case.priority = priority;
        }
        if let Some(case_type) = self.case_type {
            case.case_type = case_type;
        }
        if let Some(due_date) = self.due_date {
            case.due_date = due_date;
        }
        if let Some(assigned_to) = self.assigned_to {
            case.assigned_to = assigned_to;
        }
        if let Some(description) = self.description {
            case.description = description;
        }
        if let Some(subjects) = self.subjects {
            case.subjects = subjects;
        }
        if let Some(vehicles) = self.vehicles {
            case.vehicles = vehicles;
        }
        if let Some(locations) = self.locations {
            case.locations = locations;
        }
        if let Some(tasks) = self.tasks {
            case.tasks = tasks;
        }
        if let Some(events) = self.events {
            case.events = events;
        }
        if let Some(updates) = self.updates {
            case.updates = updates;
        }
        if let Some(expenses) = self.expenses {
            case.expenses = expenses;
        }
    }
}
