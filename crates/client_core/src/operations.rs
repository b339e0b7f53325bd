//! The canonical operation set spoken to the department API.

use serde_json::Value;

use crate::graphql::GraphqlRequest;

#[derive(Debug, Clone, Copy)]
pub struct Operation {
    pub name: &'static str,
    /// Root field holding the payload under `data`.
    pub field: &'static str,
    pub document: &'static str,
    pub requires_auth: bool,
}

impl Operation {
    pub fn request(&self, variables: Value) -> GraphqlRequest {
        GraphqlRequest {
            query: self.document,
            operation_name: self.name,
            variables,
        }
    }
}

pub const REGISTER: Operation = Operation {
    name: "Register",
    field: "register",
    document: r#"mutation Register($input: RegisterInput!) {
  register(input: $input) {
    id
    username
    createdAt
    updatedAt
  }
}"#,
    requires_auth: false,
};

pub const LOGIN: Operation = Operation {
    name: "Login",
    field: "login",
    document: r#"mutation Login($input: LoginInput!) {
  login(input: $input) {
    access_token
  }
}"#,
    requires_auth: false,
};

pub const GET_DEPARTMENTS: Operation = Operation {
    name: "GetDepartments",
    field: "getDepartments",
    document: r#"query GetDepartments($paginationInput: PaginationInput!) {
  getDepartments(paginationInput: $paginationInput) {
    departments {
      id
      name
      createdAt
      updatedAt
      createdBy {
        id
        username
      }
      subDepartments {
        id
        name
      }
    }
    total
    totalPages
    currentPage
  }
}"#,
    requires_auth: true,
};

pub const GET_DEPARTMENT: Operation = Operation {
    name: "GetDepartment",
    field: "getDepartment",
    document: r#"query GetDepartment($id: Int!) {
  getDepartment(id: $id) {
    id
    name
    createdAt
    updatedAt
    createdBy {
      id
      username
    }
    subDepartments {
      id
      name
    }
  }
}"#,
    requires_auth: true,
};

pub const GET_SUB_DEPARTMENTS: Operation = Operation {
    name: "GetSubDepartments",
    field: "getSubDepartments",
    document: r#"query GetSubDepartments($departmentId: Int!, $paginationInput: PaginationInput!) {
  getSubDepartments(departmentId: $departmentId, paginationInput: $paginationInput) {
    subDepartments {
      id
      name
      createdAt
      updatedAt
      department {
        id
        name
      }
    }
    total
    totalPages
    currentPage
  }
}"#,
    requires_auth: true,
};

pub const CREATE_DEPARTMENT: Operation = Operation {
    name: "CreateDepartment",
    field: "createDepartment",
    document: r#"mutation CreateDepartment($createDepartmentInput: CreateDepartmentInput!) {
  createDepartment(createDepartmentInput: $createDepartmentInput) {
    id
    name
    createdAt
    createdBy {
      id
      username
    }
    subDepartments {
      id
      name
    }
  }
}"#,
    requires_auth: true,
};

pub const UPDATE_DEPARTMENT: Operation = Operation {
    name: "UpdateDepartment",
    field: "updateDepartment",
    document: r#"mutation UpdateDepartment($id: Int!, $updateDepartmentInput: UpdateDepartmentInput!) {
  updateDepartment(id: $id, updateDepartmentInput: $updateDepartmentInput) {
    id
    name
    updatedAt
  }
}"#,
    requires_auth: true,
};

pub const DELETE_DEPARTMENT: Operation = Operation {
    name: "DeleteDepartment",
    field: "deleteDepartment",
    document: r#"mutation DeleteDepartment($id: Int!) {
  deleteDepartment(id: $id) {
    id
    name
  }
}"#,
    requires_auth: true,
};

pub const CREATE_SUB_DEPARTMENT: Operation = Operation {
    name: "CreateSubDepartment",
    field: "createSubDepartment",
    document: r#"mutation CreateSubDepartment($departmentId: Int!, $createSubDepartmentInput: CreateSubDepartmentInput!) {
  createSubDepartment(departmentId: $departmentId, createSubDepartmentInput: $createSubDepartmentInput) {
    id
    name
    createdAt
    department {
      id
      name
    }
  }
}"#,
    requires_auth: true,
};

pub const UPDATE_SUB_DEPARTMENT: Operation = Operation {
    name: "UpdateSubDepartment",
    field: "updateSubDepartment",
    document: r#"mutation UpdateSubDepartment($id: Int!, $updateSubDepartmentInput: UpdateSubDepartmentInput!) {
  updateSubDepartment(id: $id, updateSubDepartmentInput: $updateSubDepartmentInput) {
    id
    name
    updatedAt
  }
}"#,
    requires_auth: true,
};

pub const DELETE_SUB_DEPARTMENT: Operation = Operation {
    name: "DeleteSubDepartment",
    field: "deleteSubDepartment",
    document: r#"mutation DeleteSubDepartment($id: Int!) {
  deleteSubDepartment(id: $id) {
    id
    name
  }
}"#,
    requires_auth: true,
};

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Operation; 11] = [
        REGISTER,
        LOGIN,
        GET_DEPARTMENTS,
        GET_DEPARTMENT,
        GET_SUB_DEPARTMENTS,
        CREATE_DEPARTMENT,
        UPDATE_DEPARTMENT,
        DELETE_DEPARTMENT,
        CREATE_SUB_DEPARTMENT,
        UPDATE_SUB_DEPARTMENT,
        DELETE_SUB_DEPARTMENT,
    ];

    #[test]
    fn documents_declare_their_operation_name_and_root_field() {
        for op in ALL {
            assert!(
                op.document.contains(&format!(" {}(", op.name)),
                "{} document does not declare its name",
                op.name
            );
            assert!(
                op.document.contains(&format!("  {}(", op.field)),
                "{} document does not select {}",
                op.name,
                op.field
            );
        }
    }

    #[test]
    fn only_credential_operations_are_anonymous() {
        let anonymous: Vec<_> = ALL
            .iter()
            .filter(|op| !op.requires_auth)
            .map(|op| op.name)
            .collect();
        assert_eq!(anonymous, ["Register", "Login"]);
    }
}
