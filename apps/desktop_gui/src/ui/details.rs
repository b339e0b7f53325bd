use eframe::egui;
use shared::domain::{Department, SubDepartment, SubDepartmentId};

use crate::{
    backend_bridge::commands::BackendCommand,
    controller::{
        department_details::DepartmentDetails, reducer::AppState, router::Route,
    },
    ui::widgets::{self, card, field_error, submitted, PagerAction},
};

enum RowAction {
    Edit(SubDepartmentId),
    Save,
    Cancel,
    Delete(SubDepartmentId, String),
}

fn department_header(
    ui: &mut egui::Ui,
    details: &mut DepartmentDetails,
    department: &Department,
) -> Option<BackendCommand> {
    let mut cmd = None;
    let mut begin = false;
    let mut cancel = false;

    card(ui, |ui| {
        if let Some(form) = details.name_edit_mut() {
            let response = ui.add(
                egui::TextEdit::singleline(&mut form.name)
                    .id_salt("department_name_edit")
                    .desired_width(f32::INFINITY),
            );
            field_error(ui, form.name_error());
            let enter = submitted(ui, &response);
            ui.horizontal(|ui| {
                if ui.button("Save").clicked() || enter {
                    cmd = details.save_department_name();
                }
                if ui.button("Cancel").clicked() {
                    cancel = true;
                }
            });
        } else {
            ui.horizontal(|ui| {
                ui.heading(&department.name);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("Edit").clicked() {
                        begin = true;
                    }
                });
            });
        }
        let created = match department.created_on() {
            Some(date) => format!("Created by {} on {date}", department.creator_name()),
            None => format!("Created by {}", department.creator_name()),
        };
        ui.label(egui::RichText::new(created).small().weak());
    });

    if begin {
        details.begin_edit_department();
    }
    if cancel {
        details.cancel_edit_department();
    }
    cmd
}

fn sub_department_row(
    ui: &mut egui::Ui,
    details: &mut DepartmentDetails,
    sub: &SubDepartment,
) -> Option<RowAction> {
    let mut action = None;
    ui.horizontal(|ui| match details.sub_edit_mut() {
        Some(edit) if edit.id == sub.id => {
            let response = ui.add(
                egui::TextEdit::singleline(&mut edit.draft)
                    .id_salt(("sub_edit", sub.id.0))
                    .desired_width(ui.available_width() - 140.0),
            );
            if ui.button("Save").clicked() || submitted(ui, &response) {
                action = Some(RowAction::Save);
            }
            if ui.button("Cancel").clicked() {
                action = Some(RowAction::Cancel);
            }
        }
        _ => {
            ui.label(&sub.name);
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("Delete").clicked() {
                    action = Some(RowAction::Delete(sub.id, sub.name.clone()));
                }
                if ui.button("Edit").clicked() {
                    action = Some(RowAction::Edit(sub.id));
                }
            });
        }
    });
    if let Some(edit) = details.sub_edit().filter(|edit| edit.id == sub.id) {
        field_error(ui, edit.error.as_ref());
    }
    action
}

fn sub_departments_section(
    ui: &mut egui::Ui,
    details: &mut DepartmentDetails,
    cmds: &mut Vec<BackendCommand>,
) {
    ui.label(egui::RichText::new("Current Sub-Departments").strong());
    let listing = details.sub_departments();
    if let Some(error) = listing.error() {
        ui.colored_label(widgets::ERROR_COLOR, format!("Error: {}", error.message()));
        if ui.button("Retry").clicked() {
            cmds.extend(details.retry());
        }
        return;
    }
    let Some(page) = listing.value().cloned() else {
        if listing.is_loading() {
            ui.spinner();
        }
        return;
    };
    if listing.is_loading() {
        ui.horizontal(|ui| {
            ui.spinner();
            ui.weak("Refreshing...");
        });
    }

    if page.is_empty() {
        ui.weak("No sub-departments");
    }
    let mut action = None;
    for sub in &page.items {
        if let Some(clicked) = sub_department_row(ui, details, sub) {
            action = Some(clicked);
        }
    }
    match action {
        Some(RowAction::Edit(id)) => details.begin_edit_sub(id),
        Some(RowAction::Save) => cmds.extend(details.save_sub()),
        Some(RowAction::Cancel) => details.cancel_edit_sub(),
        Some(RowAction::Delete(id, name)) => details.request_delete_sub(id, name),
        None => {}
    }

    match widgets::pager(ui, details.sub_pager()) {
        Some(PagerAction::Previous) => cmds.extend(details.previous_page()),
        Some(PagerAction::Next) => cmds.extend(details.next_page()),
        None => {}
    }
}

pub fn details_page(
    ui: &mut egui::Ui,
    ctx: &egui::Context,
    state: &mut AppState,
) -> Vec<BackendCommand> {
    if ui.button("← Back to Departments").clicked() {
        return state.enter(Route::Departments);
    }
    ui.add_space(8.0);

    let mut cmds = Vec::new();
    let Some(details) = state.details.as_mut() else {
        return cmds;
    };

    let record = details.department();
    if let Some(error) = record.error() {
        ui.colored_label(widgets::ERROR_COLOR, format!("Error: {}", error.message()));
        if ui.button("Retry").clicked() {
            cmds.extend(details.retry());
        }
        return cmds;
    }
    let department = match record.value() {
        None => {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label("Loading department details...");
            });
            return cmds;
        }
        Some(None) => {
            ui.colored_label(widgets::ERROR_COLOR, "Department not found");
            return cmds;
        }
        Some(Some(department)) => department.clone(),
    };

    egui::ScrollArea::vertical().show(ui, |ui| {
        cmds.extend(department_header(ui, details, &department));
        ui.add_space(10.0);

        card(ui, |ui| sub_departments_section(ui, details, &mut cmds));
        ui.add_space(10.0);

        let busy = details.is_creating();
        let submit = card(ui, |ui| {
            ui.label(egui::RichText::new("Add Sub-Department").strong());
            widgets::department_form(ui, "create_sub_department", &mut details.create_form, busy)
        });
        if submit {
            cmds.extend(details.submit_create_sub());
        }
    });

    if let Some(pending) = details.pending_delete() {
        let message = format!(
            "Are you sure you want to delete this sub-department?\n\n{}",
            pending.name
        );
        match widgets::confirm_dialog(ctx, "Delete sub-department", &message) {
            Some(true) => cmds.extend(details.confirm_delete()),
            Some(false) => details.cancel_delete(),
            None => {}
        }
    }
    cmds
}
