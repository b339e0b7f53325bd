//! Backend commands queued from UI to backend worker.

use shared::{
    domain::{DepartmentId, SubDepartmentId},
    pagination::PageRequest,
    protocol::CreateDepartmentInput,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendCommand {
    Login {
        username: String,
        password: String,
    },
    Register {
        username: String,
        password: String,
    },
    Logout,
    ListDepartments {
        request: PageRequest,
    },
    FetchDepartment {
        id: DepartmentId,
    },
    ListSubDepartments {
        department_id: DepartmentId,
        request: PageRequest,
    },
    CreateDepartment {
        input: CreateDepartmentInput,
    },
    UpdateDepartment {
        id: DepartmentId,
        name: String,
    },
    DeleteDepartment {
        id: DepartmentId,
    },
    CreateSubDepartment {
        department_id: DepartmentId,
        name: String,
    },
    UpdateSubDepartment {
        department_id: DepartmentId,
        id: SubDepartmentId,
        name: String,
    },
    DeleteSubDepartment {
        department_id: DepartmentId,
        id: SubDepartmentId,
    },
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Login { .. } => "login",
            Self::Register { .. } => "register",
            Self::Logout => "logout",
            Self::ListDepartments { .. } => "list_departments",
            Self::FetchDepartment { .. } => "fetch_department",
            Self::ListSubDepartments { .. } => "list_sub_departments",
            Self::CreateDepartment { .. } => "create_department",
            Self::UpdateDepartment { .. } => "update_department",
            Self::DeleteDepartment { .. } => "delete_department",
            Self::CreateSubDepartment { .. } => "create_sub_department",
            Self::UpdateSubDepartment { .. } => "update_sub_department",
            Self::DeleteSubDepartment { .. } => "delete_sub_department",
        }
    }
}
