use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_newtype!(DepartmentId);
id_newtype!(SubDepartmentId);

/// User ids are opaque strings on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub String);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// The `createdBy` selection; some queries only ask for the username.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<UserId>,
    pub username: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubDepartmentSummary {
    pub id: SubDepartmentId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepartmentRef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<DepartmentId>,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Department {
    pub id: DepartmentId,
    pub name: String,
    #[serde(default)]
    pub sub_departments: Vec<SubDepartmentSummary>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<UserSummary>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Department {
    pub fn creator_name(&self) -> &str {
        self.created_by
            .as_ref()
            .map(|user| user.username.as_str())
            .unwrap_or("Unknown")
    }

    pub fn created_on(&self) -> Option<String> {
        self.created_at
            .map(|created_at| created_at.format("%Y-%m-%d").to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubDepartment {
    pub id: SubDepartmentId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<DepartmentRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl SubDepartment {
    /// A missing back-reference is trusted to be the department it was
    /// queried through; a present one must match.
    pub fn belongs_to(&self, department_id: DepartmentId) -> bool {
        match self.department.as_ref().and_then(|parent| parent.id) {
            Some(parent_id) => parent_id == department_id,
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn department_deserializes_camel_case_selection() {
        let department: Department = serde_json::from_value(serde_json::json!({
            "id": 4,
            "name": "Finance",
            "createdAt": "2024-03-01T10:00:00.000Z",
            "createdBy": { "username": "alice" },
            "subDepartments": [{ "id": 9, "name": "Payroll" }]
        }))
        .expect("department");

        assert_eq!(department.id, DepartmentId(4));
        assert_eq!(department.creator_name(), "alice");
        assert_eq!(department.created_on().as_deref(), Some("2024-03-01"));
        assert_eq!(department.sub_departments[0].name, "Payroll");
        assert!(department.updated_at.is_none());
    }

    #[test]
    fn missing_creator_renders_as_unknown() {
        let department: Department =
            serde_json::from_value(serde_json::json!({ "id": 1, "name": "Legal" }))
                .expect("department");
        assert_eq!(department.creator_name(), "Unknown");
        assert!(department.sub_departments.is_empty());
    }

    #[test]
    fn sub_department_with_foreign_parent_is_not_owned() {
        let sub: SubDepartment = serde_json::from_value(serde_json::json!({
            "id": 3,
            "name": "Audit",
            "department": { "id": 8, "name": "Finance" }
        }))
        .expect("sub-department");

        assert!(sub.belongs_to(DepartmentId(8)));
        assert!(!sub.belongs_to(DepartmentId(2)));
    }

    #[test]
    fn sub_department_without_parent_reference_is_trusted() {
        let sub: SubDepartment =
            serde_json::from_value(serde_json::json!({ "id": 3, "name": "Audit" }))
                .expect("sub-department");
        assert!(sub.belongs_to(DepartmentId(2)));
    }
}
