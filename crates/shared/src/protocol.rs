//! GraphQL input objects and selection payloads of the department API.

use serde::{Deserialize, Serialize};

use crate::{
    domain::{Department, DepartmentId, SubDepartment, SubDepartmentId},
    pagination::{Page, PageInfo},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthPayload {
    pub access_token: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubDepartmentInput {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDepartmentInput {
    pub name: String,
    #[serde(default)]
    pub sub_departments: Vec<SubDepartmentInput>,
}

impl CreateDepartmentInput {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sub_departments: Vec::new(),
        }
    }

    pub fn with_sub_departments<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sub_departments = names
            .into_iter()
            .map(|name| SubDepartmentInput { name: name.into() })
            .collect();
        self
    }
}

/// Shared shape of `UpdateDepartmentInput`, `CreateSubDepartmentInput`
/// and `UpdateSubDepartmentInput`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameInput {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentPage {
    pub departments: Vec<Department>,
    pub total: u64,
    pub total_pages: u32,
    pub current_page: u32,
}

impl From<DepartmentPage> for Page<Department> {
    fn from(value: DepartmentPage) -> Self {
        Page {
            items: value.departments,
            info: PageInfo {
                total: value.total,
                total_pages: value.total_pages,
                current_page: value.current_page,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubDepartmentPage {
    pub sub_departments: Vec<SubDepartment>,
    pub total: u64,
    pub total_pages: u32,
    pub current_page: u32,
}

impl From<SubDepartmentPage> for Page<SubDepartment> {
    fn from(value: SubDepartmentPage) -> Self {
        Page {
            items: value.sub_departments,
            info: PageInfo {
                total: value.total,
                total_pages: value.total_pages,
                current_page: value.current_page,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletedDepartment {
    pub id: DepartmentId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletedSubDepartment {
    pub id: SubDepartmentId,
    pub name: String,
}
