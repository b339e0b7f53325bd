use serde_json::json;
use shared::{
    domain::{Department, DepartmentId, SubDepartment, SubDepartmentId},
    pagination::{Page, PageRequest},
    protocol::{
        CreateDepartmentInput, DeletedDepartment, DeletedSubDepartment, DepartmentPage, NameInput,
        SubDepartmentInput, SubDepartmentPage,
    },
    validation::validate_name,
};
use tracing::{debug, info, warn};

use crate::{
    error::Result,
    operations::{
        CREATE_DEPARTMENT, CREATE_SUB_DEPARTMENT, DELETE_DEPARTMENT, DELETE_SUB_DEPARTMENT,
        GET_DEPARTMENT, GET_DEPARTMENTS, GET_SUB_DEPARTMENTS, UPDATE_DEPARTMENT,
        UPDATE_SUB_DEPARTMENT,
    },
    AdminClient,
};

const DEPARTMENT_NAME: &str = "Department name";
const SUB_DEPARTMENT_NAME: &str = "Sub-department name";

fn check_page_len(operation: &str, request: PageRequest, total: u64, actual: usize) {
    let expected = request.expected_len(total);
    if actual as u64 != expected {
        warn!(
            operation,
            page = request.page(),
            limit = request.limit(),
            total,
            expected,
            actual,
            "server page size does not match its reported total"
        );
    }
}

impl AdminClient {
    pub(crate) async fn list_departments_impl(
        &self,
        request: PageRequest,
    ) -> Result<Page<Department>> {
        let page: DepartmentPage = self
            .run(&GET_DEPARTMENTS, json!({ "paginationInput": request }))
            .await?;
        check_page_len(
            GET_DEPARTMENTS.name,
            request,
            page.total,
            page.departments.len(),
        );
        debug!(
            page = page.current_page,
            total = page.total,
            "fetched departments"
        );
        Ok(page.into())
    }

    /// `Ok(None)` when the server reports the department as missing.
    pub(crate) async fn get_department_impl(
        &self,
        id: DepartmentId,
    ) -> Result<Option<Department>> {
        match self
            .run::<Option<Department>>(&GET_DEPARTMENT, json!({ "id": id }))
            .await
        {
            Ok(found) => Ok(found),
            Err(err) if err.is_not_found() => {
                debug!(%id, "department not found");
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    pub(crate) async fn create_department_impl(
        &self,
        input: CreateDepartmentInput,
    ) -> Result<Department> {
        let name = validate_name(DEPARTMENT_NAME, &input.name)?;
        let sub_departments = input
            .sub_departments
            .iter()
            .map(|sub| {
                validate_name(SUB_DEPARTMENT_NAME, &sub.name).map(|name| SubDepartmentInput { name })
            })
            .collect::<std::result::Result<Vec<_>, _>>()?;
        let input = CreateDepartmentInput {
            name,
            sub_departments,
        };

        let created: Department = self
            .run(
                &CREATE_DEPARTMENT,
                json!({ "createDepartmentInput": input }),
            )
            .await?;
        info!(id = %created.id, name = %created.name, "created department");
        Ok(created)
    }

    pub(crate) async fn update_department_impl(
        &self,
        id: DepartmentId,
        name: &str,
    ) -> Result<Department> {
        let name = validate_name(DEPARTMENT_NAME, name)?;
        let updated: Department = self
            .run(
                &UPDATE_DEPARTMENT,
                json!({ "id": id, "updateDepartmentInput": NameInput { name } }),
            )
            .await?;
        info!(%id, name = %updated.name, "renamed department");
        Ok(updated)
    }

    pub(crate) async fn delete_department_impl(
        &self,
        id: DepartmentId,
    ) -> Result<DeletedDepartment> {
        let deleted: DeletedDepartment = self.run(&DELETE_DEPARTMENT, json!({ "id": id })).await?;
        info!(%id, name = %deleted.name, "deleted department");
        Ok(deleted)
    }

    /// Rows whose parent reference points elsewhere are dropped; the page
    /// totals are passed through as reported.
    pub(crate) async fn list_sub_departments_impl(
        &self,
        department_id: DepartmentId,
        request: PageRequest,
    ) -> Result<Page<SubDepartment>> {
        let page: SubDepartmentPage = self
            .run(
                &GET_SUB_DEPARTMENTS,
                json!({ "departmentId": department_id, "paginationInput": request }),
            )
            .await?;
        check_page_len(
            GET_SUB_DEPARTMENTS.name,
            request,
            page.total,
            page.sub_departments.len(),
        );

        let mut page: Page<SubDepartment> = page.into();
        let before = page.items.len();
        page.items.retain(|sub| sub.belongs_to(department_id));
        let dropped = before - page.items.len();
        if dropped > 0 {
            warn!(
                %department_id,
                dropped,
                "server returned sub-departments of another department"
            );
        }
        Ok(page)
    }

    pub(crate) async fn create_sub_department_impl(
        &self,
        department_id: DepartmentId,
        name: &str,
    ) -> Result<SubDepartment> {
        let name = validate_name(SUB_DEPARTMENT_NAME, name)?;
        let created: SubDepartment = self
            .run(
                &CREATE_SUB_DEPARTMENT,
                json!({
                    "departmentId": department_id,
                    "createSubDepartmentInput": NameInput { name },
                }),
            )
            .await?;
        info!(%department_id, id = %created.id, "created sub-department");
        Ok(created)
    }

    pub(crate) async fn update_sub_department_impl(
        &self,
        id: SubDepartmentId,
        name: &str,
    ) -> Result<SubDepartment> {
        let name = validate_name(SUB_DEPARTMENT_NAME, name)?;
        let updated: SubDepartment = self
            .run(
                &UPDATE_SUB_DEPARTMENT,
                json!({ "id": id, "updateSubDepartmentInput": NameInput { name } }),
            )
            .await?;
        info!(%id, name = %updated.name, "renamed sub-department");
        Ok(updated)
    }

    pub(crate) async fn delete_sub_department_impl(
        &self,
        id: SubDepartmentId,
    ) -> Result<DeletedSubDepartment> {
        let deleted: DeletedSubDepartment = self
            .run(&DELETE_SUB_DEPARTMENT, json!({ "id": id }))
            .await?;
        info!(%id, name = %deleted.name, "deleted sub-department");
        Ok(deleted)
    }
}
