//! Department list page: paging, the collapsible create panel and delete confirmation.

use shared::{
    domain::{Department, DepartmentId},
    pagination::{Page, PageRequest},
};

use crate::{
    backend_bridge::commands::BackendCommand,
    controller::{
        events::UiError,
        form::{DepartmentForm, FormKind},
        pager::Pager,
        remote::Remote,
    },
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDelete<Id> {
    pub id: Id,
    pub name: String,
}

#[derive(Debug)]
pub struct DepartmentsPage {
    pager: Pager,
    listing: Remote<Page<Department>>,
    form_open: bool,
    pub form: DepartmentForm,
    creating: bool,
    pending_delete: Option<PendingDelete<DepartmentId>>,
}

impl Default for DepartmentsPage {
    fn default() -> Self {
        Self {
            pager: Pager::default(),
            listing: Remote::default(),
            form_open: false,
            form: DepartmentForm::new(FormKind::Department),
            creating: false,
            pending_delete: None,
        }
    }
}

impl DepartmentsPage {
    fn fetch(&mut self) -> BackendCommand {
        self.listing.start();
        BackendCommand::ListDepartments {
            request: self.pager.request(),
        }
    }

    pub fn on_enter(&mut self) -> BackendCommand {
        self.fetch()
    }

    pub fn retry(&mut self) -> BackendCommand {
        self.fetch()
    }

    pub fn pager(&self) -> &Pager {
        &self.pager
    }

    pub fn listing(&self) -> &Remote<Page<Department>> {
        &self.listing
    }

    pub fn next_page(&mut self) -> Option<BackendCommand> {
        self.pager.next()?;
        Some(self.fetch())
    }

    pub fn previous_page(&mut self) -> Option<BackendCommand> {
        self.pager.previous()?;
        Some(self.fetch())
    }

    pub fn is_form_open(&self) -> bool {
        self.form_open
    }

    pub fn toggle_form(&mut self) {
        self.form_open = !self.form_open;
        if !self.form_open {
            self.form.reset();
        }
    }

    pub fn is_creating(&self) -> bool {
        self.creating
    }

    pub fn submit_create(&mut self) -> Option<BackendCommand> {
        if self.creating {
            return None;
        }
        let cmd = self.form.submit(|payload| BackendCommand::CreateDepartment {
            input: payload.into_create_input(),
        })?;
        self.creating = true;
        Some(cmd)
    }

    pub fn pending_delete(&self) -> Option<&PendingDelete<DepartmentId>> {
        self.pending_delete.as_ref()
    }

    pub fn request_delete(&mut self, id: DepartmentId, name: impl Into<String>) {
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
        Some(BackendCommand::DeleteDepartment { id: pending.id })
    }

    /// Stale responses for a page the user already left are dropped.
    pub fn on_loaded(
        &mut self,
        request: PageRequest,
        page: Page<Department>,
    ) -> Option<BackendCommand> {
        if request != self.pager.request() {
            return None;
        }
        self.pager.set_info(page.info);
        let out_of_range = page.is_empty() && page.info.total > 0;
        self.listing.resolve(page);
        if out_of_range {
            self.pager.clamp_to_info()?;
            return Some(self.fetch());
        }
        None
    }

    pub fn on_failed(&mut self, error: UiError) {
        self.listing.fail(error);
    }

    pub fn on_created(&mut self) -> BackendCommand {
        self.creating = false;
        self.form_open = false;
        self.form.reset();
        self.fetch()
    }

    pub fn on_create_failed(&mut self) {
        self.creating = false;
    }

    pub fn on_deleted(&mut self) -> BackendCommand {
        self.fetch()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::pagination::PageInfo;

    fn department(id: i64) -> Department {
        Department {
            id: DepartmentId(id),
            name: format!("Department {id}"),
            sub_departments: Vec::new(),
            created_by: None,
            created_at: None,
            updated_at: None,
        }
    }

    fn page_of(ids: std::ops::RangeInclusive<i64>, total: u64, current_page: u32) -> Page<Department> {
        Page {
            items: ids.map(department).collect(),
            info: PageInfo {
                total,
                total_pages: total.div_ceil(10) as u32,
                current_page,
            },
        }
    }

    #[test]
    fn entering_requests_first_page_of_ten() {
        let mut page = DepartmentsPage::default();
        assert_eq!(
            page.on_enter(),
            BackendCommand::ListDepartments {
                request: PageRequest::new(1, 10).expect("request")
            }
        );
        assert!(page.listing().is_loading());
    }

    #[test]
    fn partial_last_page_renders_remaining_items() {
        let mut page = DepartmentsPage::default();
        page.on_enter();
        page.on_loaded(PageRequest::default(), page_of(1..=10, 23, 1));

        page.next_page();
        let third = page.next_page();
        assert_eq!(
            third,
            Some(BackendCommand::ListDepartments {
                request: PageRequest::new(3, 10).expect("request")
            })
        );
        page.on_loaded(
            PageRequest::new(3, 10).expect("request"),
            page_of(21..=23, 23, 3),
        );

        let rendered = page.listing().value().map(|p| p.items.len());
        assert_eq!(rendered, Some(3));
        assert_eq!(page.next_page(), None);
    }

    #[test]
    fn cancelled_delete_issues_nothing_and_confirm_issues_one() {
        let mut page = DepartmentsPage::default();
        page.request_delete(DepartmentId(4), "Legal");
        page.cancel_delete();
        assert_eq!(page.confirm_delete(), None);

        page.request_delete(DepartmentId(4), "Legal");
        assert_eq!(
            page.confirm_delete(),
            Some(BackendCommand::DeleteDepartment {
                id: DepartmentId(4)
            })
        );
        assert_eq!(page.confirm_delete(), None);
    }

    #[test]
    fn successful_create_collapses_panel_and_refetches() {
        let mut page = DepartmentsPage::default();
        page.toggle_form();
        page.form.name = "Operations".into();
        assert!(page.submit_create().is_some());
        assert!(page.is_creating());
        assert_eq!(page.submit_create(), None);

        let refetch = page.on_created();
        assert!(matches!(refetch, BackendCommand::ListDepartments { .. }));
        assert!(!page.is_form_open());
        assert!(page.form.name.is_empty());
    }

    #[test]
    fn emptied_trailing_page_steps_back() {
        let mut page = DepartmentsPage::default();
        page.on_loaded(PageRequest::default(), page_of(1..=10, 21, 1));
        page.next_page();
        page.next_page();
        page.on_loaded(
            PageRequest::new(3, 10).expect("request"),
            page_of(21..=21, 21, 3),
        );

        let refetch = page.on_loaded(
            PageRequest::new(3, 10).expect("request"),
            Page {
                items: Vec::new(),
                info: PageInfo {
                    total: 20,
                    total_pages: 2,
                    current_page: 3,
                },
            },
        );
        assert_eq!(
            refetch,
            Some(BackendCommand::ListDepartments {
                request: PageRequest::new(2, 10).expect("request")
            })
        );
    }

    #[test]
    fn stale_page_response_is_ignored() {
        let mut page = DepartmentsPage::default();
        page.on_loaded(PageRequest::default(), page_of(1..=10, 23, 1));
        page.next_page();
        page.on_loaded(PageRequest::default(), page_of(1..=10, 23, 1));
        assert_eq!(page.pager().request().page(), 2);
        assert!(page.listing().is_loading());
    }
}
