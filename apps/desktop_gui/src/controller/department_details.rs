//! Single department view: record, paged sub-departments, inline edits.

use shared::{
    domain::{Department, DepartmentId, SubDepartment, SubDepartmentId},
    pagination::{Page, PageRequest},
    validation::{validate_name, ValidationError},
};

use crate::{
    backend_bridge::commands::BackendCommand,
    controller::{
        departments::PendingDelete,
        events::UiError,
        form::{DepartmentForm, FormKind},
        pager::Pager,
        remote::Remote,
    },
};

/// The one sub-department whose name is currently being edited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubDepartmentEdit {
    pub id: SubDepartmentId,
    pub draft: String,
    pub error: Option<ValidationError>,
}

#[derive(Debug)]
pub struct DepartmentDetails {
    department_id: DepartmentId,
    /// `Some(None)` once the server answered that the department does not exist.
    department: Remote<Option<Department>>,
    sub_pager: Pager,
    sub_departments: Remote<Page<SubDepartment>>,
    name_edit: Option<DepartmentForm>,
    sub_edit: Option<SubDepartmentEdit>,
    pub create_form: DepartmentForm,
    creating: bool,
    pending_delete: Option<PendingDelete<SubDepartmentId>>,
}

impl DepartmentDetails {
    pub fn new(department_id: DepartmentId) -> Self {
        Self {
            department_id,
            department: Remote::default(),
            sub_pager: Pager::default(),
            sub_departments: Remote::default(),
            name_edit: None,
            sub_edit: None,
            create_form: DepartmentForm::new(FormKind::SubDepartment),
            creating: false,
            pending_delete: None,
        }
    }

    pub fn department_id(&self) -> DepartmentId {
        self.department_id
    }

    pub fn department(&self) -> &Remote<Option<Department>> {
        &self.department
    }

    pub fn sub_departments(&self) -> &Remote<Page<SubDepartment>> {
        &self.sub_departments
    }

    pub fn sub_pager(&self) -> &Pager {
        &self.sub_pager
    }

    fn fetch_department(&mut self) -> BackendCommand {
        self.department.start();
        BackendCommand::FetchDepartment {
            id: self.department_id,
        }
    }

    fn fetch_sub_departments(&mut self) -> BackendCommand {
        self.sub_departments.start();
        BackendCommand::ListSubDepartments {
            department_id: self.department_id,
            request: self.sub_pager.request(),
        }
    }

    pub fn on_enter(&mut self) -> Vec<BackendCommand> {
        vec![self.fetch_department(), self.fetch_sub_departments()]
    }

    pub fn retry(&mut self) -> Vec<BackendCommand> {
        self.on_enter()
    }

    pub fn next_page(&mut self) -> Option<BackendCommand> {
        self.sub_pager.next()?;
        Some(self.fetch_sub_departments())
    }

    pub fn previous_page(&mut self) -> Option<BackendCommand> {
        self.sub_pager.previous()?;
        Some(self.fetch_sub_departments())
    }

    fn current_name(&self) -> Option<&str> {
        self.department
            .value()
            .and_then(Option::as_ref)
            .map(|dept| dept.name.as_str())
    }

    pub fn name_edit(&self) -> Option<&DepartmentForm> {
        self.name_edit.as_ref()
    }

    pub fn name_edit_mut(&mut self) -> Option<&mut DepartmentForm> {
        self.name_edit.as_mut()
    }

    pub fn begin_edit_department(&mut self) {
        if let Some(name) = self.current_name().map(str::to_string) {
            self.name_edit = Some(DepartmentForm::seeded(FormKind::Department, name));
        }
    }

    pub fn cancel_edit_department(&mut self) {
        self.name_edit = None;
    }

    pub fn save_department_name(&mut self) -> Option<BackendCommand> {
        let id = self.department_id;
        self.name_edit
            .as_mut()?
            .submit(|payload| BackendCommand::UpdateDepartment {
                id,
                name: payload.name,
            })
    }

    pub fn sub_edit(&self) -> Option<&SubDepartmentEdit> {
        self.sub_edit.as_ref()
    }

    pub fn sub_edit_mut(&mut self) -> Option<&mut SubDepartmentEdit> {
        self.sub_edit.as_mut()
    }

    /// Opening an edit replaces whichever one was open, pre-filled with the row's name.
    pub fn begin_edit_sub(&mut self, id: SubDepartmentId) {
        let current = self
            .sub_departments
            .value()
            .and_then(|page| page.items.iter().find(|sub| sub.id == id));
        if let Some(sub) = current {
            self.sub_edit = Some(SubDepartmentEdit {
                id,
                draft: sub.name.clone(),
                error: None,
            });
        }
    }

    pub fn cancel_edit_sub(&mut self) {
        self.sub_edit = None;
    }

    pub fn save_sub(&mut self) -> Option<BackendCommand> {
        let department_id = self.department_id;
        let edit = self.sub_edit.as_mut()?;
        match validate_name(FormKind::SubDepartment.name_field(), &edit.draft) {
            Ok(name) => {
                edit.error = None;
                Some(BackendCommand::UpdateSubDepartment {
                    department_id,
                    id: edit.id,
                    name,
                })
            }
            Err(err) => {
                edit.error = Some(err);
                None
            }
        }
    }

    pub fn is_creating(&self) -> bool {
        self.creating
    }

    pub fn submit_create_sub(&mut self) -> Option<BackendCommand> {
        if self.creating {
            return None;
        }
        let department_id = self.department_id;
        let cmd = self
            .create_form
            .submit(|payload| BackendCommand::CreateSubDepartment {
                department_id,
                name: payload.name,
            })?;
        self.creating = true;
        Some(cmd)
    }

    pub fn pending_delete(&self) -> Option<&PendingDelete<SubDepartmentId>> {
        self.pending_delete.as_ref()
    }

    pub fn request_delete_sub(&mut self, id: SubDepartmentId, name: impl Into<String>) {
        self.pending_delete = Some(PendingDelete {
            id,
            name: name.into(),
        });
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    pub fn confirm_delete(&mut self) -> Option<BackendCommand> {
        let pending = self.pending_delete.take()?;
        Some(BackendCommand::DeleteSubDepartment {
            department_id: self.department_id,
            id: pending.id,
        })
    }

    pub fn on_department_loaded(&mut self, department: Option<Department>) {
        self.department.resolve(department);
    }

    pub fn on_department_failed(&mut self, error: UiError) {
        self.department.fail(error);
    }

    pub fn on_sub_departments_loaded(
        &mut self,
        request: PageRequest,
        page: Page<SubDepartment>,
    ) -> Option<BackendCommand> {
        if request != self.sub_pager.request() {
            return None;
        }
        self.sub_pager.set_info(page.info);
        let out_of_range = page.is_empty() && page.info.total > 0;
        self.sub_departments.resolve(page);
        if out_of_range {
            self.sub_pager.clamp_to_info()?;
            return Some(self.fetch_sub_departments());
        }
        None
    }

    pub fn on_sub_departments_failed(&mut self, error: UiError) {
        self.sub_departments.fail(error);
    }

    pub fn on_department_updated(&mut self) -> Vec<BackendCommand> {
        self.name_edit = None;
        vec![self.fetch_department(), self.fetch_sub_departments()]
    }

    pub fn on_sub_created(&mut self) -> BackendCommand {
        self.creating = false;
        self.create_form.reset();
        self.fetch_sub_departments()
    }

    pub fn on_sub_create_failed(&mut self) {
        self.creating = false;
    }

    pub fn on_sub_updated(&mut self, id: SubDepartmentId) -> BackendCommand {
        if self.sub_edit.as_ref().is_some_and(|edit| edit.id == id) {
            self.sub_edit = None;
        }
        self.fetch_sub_departments()
    }

    pub fn on_sub_deleted(&mut self, id: SubDepartmentId) -> BackendCommand {
        if self.sub_edit.as_ref().is_some_and(|edit| edit.id == id) {
            self.sub_edit = None;
        }
        self.fetch_sub_departments()
    }
}

#[cfg(test)]
#[path = "tests/department_details_tests.rs"]
mod tests;
