//! Create/edit form shared by departments and sub-departments.

use shared::{
    protocol::CreateDepartmentInput,
    validation::{validate_name, ValidationError},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    Department,
    SubDepartment,
}

impl FormKind {
    pub fn name_field(self) -> &'static str {
        match self {
            Self::Department => "Department name",
            Self::SubDepartment => "Sub-department name",
        }
    }

    pub fn submit_label(self) -> &'static str {
        match self {
            Self::Department => "Create Department",
            Self::SubDepartment => "Create Sub-Department",
        }
    }
}

/// Everything the form collected, names already trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormPayload {
    pub name: String,
    pub sub_departments: Vec<String>,
}

impl FormPayload {
    pub fn into_create_input(self) -> CreateDepartmentInput {
        CreateDepartmentInput::named(self.name).with_sub_departments(self.sub_departments)
    }
}

#[derive(Debug, Clone)]
pub struct DepartmentForm {
    kind: FormKind,
    pub name: String,
    pub draft_input: String,
    drafts: Vec<String>,
    name_error: Option<ValidationError>,
    draft_error: Option<ValidationError>,
}

impl DepartmentForm {
    pub fn new(kind: FormKind) -> Self {
        Self {
            kind,
            name: String::new(),
            draft_input: String::new(),
            drafts: Vec::new(),
            name_error: None,
            draft_error: None,
        }
    }

    /// Edit contexts start from the record's current name.
    pub fn seeded(kind: FormKind, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::new(kind)
        }
    }

    pub fn kind(&self) -> FormKind {
        self.kind
    }

    pub fn drafts(&self) -> &[String] {
        &self.drafts
    }

    pub fn name_error(&self) -> Option<&ValidationError> {
        self.name_error.as_ref()
    }

    pub fn draft_error(&self) -> Option<&ValidationError> {
        self.draft_error.as_ref()
    }

    /// Moves the draft entry into the list. Enter in the draft field lands here too.
    pub fn add_draft(&mut self) -> bool {
        if self.kind != FormKind::Department {
            return false;
        }
        match validate_name(FormKind::SubDepartment.name_field(), &self.draft_input) {
            Ok(name) => {
                self.drafts.push(name);
                self.draft_input.clear();
                self.draft_error = None;
                true
            }
            Err(err) => {
                self.draft_error = Some(err);
                false
            }
        }
    }

    pub fn remove_draft(&mut self, index: usize) {
        if index < self.drafts.len() {
            self.drafts.remove(index);
        }
    }

    /// Validates and hands the payload to `on_submit`; nothing is called on invalid input.
    pub fn submit<R>(&mut self, on_submit: impl FnOnce(FormPayload) -> R) -> Option<R> {
        match validate_name(self.kind.name_field(), &self.name) {
            Ok(name) => {
                self.name_error = None;
                Some(on_submit(FormPayload {
                    name,
                    sub_departments: self.drafts.clone(),
                }))
            }
            Err(err) => {
                self.name_error = Some(err);
                None
            }
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new(self.kind);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_name_never_reaches_submit_handler() {
        let mut form = DepartmentForm::new(FormKind::Department);
        form.name = "  HR ".into();
        let mut calls = 0;

        assert!(form.submit(|_| calls += 1).is_none());
        assert_eq!(calls, 0);
        assert_eq!(
            form.name_error(),
            Some(&ValidationError::TooShort {
                field: "Department name",
                min: 3
            })
        );
    }

    #[test]
    fn valid_name_submits_once_trimmed() {
        let mut form = DepartmentForm::new(FormKind::Department);
        form.name = "  Finance  ".into();
        let mut received = Vec::new();

        form.submit(|payload| received.push(payload));

        assert_eq!(
            received,
            [FormPayload {
                name: "Finance".into(),
                sub_departments: Vec::new()
            }]
        );
        assert!(form.name_error().is_none());
    }

    #[test]
    fn removing_middle_draft_keeps_order() {
        let mut form = DepartmentForm::new(FormKind::Department);
        for name in ["Payroll", "Recruiting", "Training"] {
            form.draft_input = name.into();
            assert!(form.add_draft());
        }
        form.remove_draft(1);
        assert_eq!(form.drafts(), ["Payroll", "Training"]);

        form.name = "People".into();
        let payload = form.submit(|payload| payload).expect("valid");
        assert_eq!(
            payload.into_create_input(),
            CreateDepartmentInput::named("People").with_sub_departments(["Payroll", "Training"])
        );
    }

    #[test]
    fn invalid_draft_is_kept_in_the_entry_field() {
        let mut form = DepartmentForm::new(FormKind::Department);
        form.draft_input = " x ".into();
        assert!(!form.add_draft());
        assert_eq!(form.draft_input, " x ");
        assert!(form.drafts().is_empty());
        assert!(form.draft_error().is_some());
    }

    #[test]
    fn sub_department_mode_ignores_drafts_and_reset_clears() {
        let mut form = DepartmentForm::seeded(FormKind::SubDepartment, "Logistics");
        form.draft_input = "Anything".into();
        assert!(!form.add_draft());

        let payload = form.submit(|payload| payload).expect("seeded name is valid");
        assert_eq!(payload.name, "Logistics");
        assert!(payload.sub_departments.is_empty());

        form.reset();
        assert!(form.name.is_empty());
        assert_eq!(form.kind(), FormKind::SubDepartment);
    }
}
