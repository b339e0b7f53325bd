use eframe::egui;
use shared::domain::{Department, DepartmentId};

use crate::{
    backend_bridge::commands::BackendCommand,
    controller::{reducer::AppState, router::Route},
    ui::widgets::{self, card, PagerAction},
};

enum CardAction {
    Open(DepartmentId),
    Delete(DepartmentId, String),
}

fn department_card(ui: &mut egui::Ui, department: &Department) -> Option<CardAction> {
    let mut action = None;
    card(ui, |ui| {
        ui.horizontal(|ui| {
            if ui
                .link(egui::RichText::new(&department.name).strong().size(17.0))
                .clicked()
            {
                action = Some(CardAction::Open(department.id));
            }
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("Delete").clicked() {
                    action = Some(CardAction::Delete(department.id, department.name.clone()));
                }
            });
        });

        ui.label(egui::RichText::new("Sub-departments").small().weak());
        if department.sub_departments.is_empty() {
            ui.weak("No sub-departments");
        } else {
            ui.horizontal_wrapped(|ui| {
                for sub in &department.sub_departments {
                    ui.label(&sub.name);
                }
            });
        }

        let created = match department.created_on() {
            Some(date) => format!("Created by {} on {date}", department.creator_name()),
            None => format!("Created by {}", department.creator_name()),
        };
        ui.label(egui::RichText::new(created).small().weak());
    });
    action
}

pub fn departments_page(
    ui: &mut egui::Ui,
    ctx: &egui::Context,
    state: &mut AppState,
) -> Vec<BackendCommand> {
    let mut cmds = Vec::new();
    let page = &mut state.departments;

    ui.horizontal(|ui| {
        ui.heading("Departments");
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let label = if page.is_form_open() {
                "Cancel"
            } else {
                "Create Department"
            };
            if ui.button(label).clicked() {
                page.toggle_form();
            }
        });
    });
    ui.add_space(8.0);

    if page.is_form_open() {
        let busy = page.is_creating();
        let submit = card(ui, |ui| {
            ui.label(egui::RichText::new("Create New Department").strong());
            widgets::department_form(ui, "create_department", &mut page.form, busy)
        });
        if submit {
            cmds.extend(page.submit_create());
        }
        ui.add_space(8.0);
    }

    let mut action = None;
    let listing = page.listing();
    if let Some(error) = listing.error() {
        ui.colored_label(
            widgets::ERROR_COLOR,
            "Error loading departments. Please try again later.",
        );
        ui.weak(error.message());
        if ui.button("Retry").clicked() {
            cmds.push(page.retry());
        }
    } else if let Some(result) = listing.value() {
        if listing.is_loading() {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.weak("Refreshing...");
            });
        }
        if result.is_empty() {
            ui.weak("No departments found. Create one to get started!");
        } else {
            egui::ScrollArea::vertical()
                .max_height(ui.available_height() - 48.0)
                .show(ui, |ui| {
                    for department in &result.items {
                        if let Some(clicked) = department_card(ui, department) {
                            action = Some(clicked);
                        }
                        ui.add_space(6.0);
                    }
                });
        }
    } else if listing.is_loading() {
        ui.horizontal(|ui| {
            ui.spinner();
            ui.label("Loading...");
        });
    }

    match widgets::pager(ui, page.pager()) {
        Some(PagerAction::Previous) => cmds.extend(page.previous_page()),
        Some(PagerAction::Next) => cmds.extend(page.next_page()),
        None => {}
    }

    if let Some(pending) = page.pending_delete() {
        let message = format!(
            "Are you sure you want to delete this department?\n\n{}",
            pending.name
        );
        match widgets::confirm_dialog(ctx, "Delete department", &message) {
            Some(true) => cmds.extend(page.confirm_delete()),
            Some(false) => page.cancel_delete(),
            None => {}
        }
    }

    match action {
        Some(CardAction::Open(id)) => cmds.extend(state.enter(Route::DepartmentDetails(id))),
        Some(CardAction::Delete(id, name)) => state.departments.request_delete(id, name),
        None => {}
    }
    cmds
}
