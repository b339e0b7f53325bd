//! Small reusable pieces: field errors, the pager, confirm dialog, toasts and the department form.

use eframe::egui;
use shared::validation::ValidationError;

use crate::controller::{
    form::{DepartmentForm, FormKind},
    notifications::{Notifications, ToastKind},
    pager::Pager,
};

pub const ERROR_COLOR: egui::Color32 = egui::Color32::from_rgb(0xef, 0x44, 0x44);
pub const SUCCESS_COLOR: egui::Color32 = egui::Color32::from_rgb(0x22, 0xc5, 0x5e);

pub fn card<R>(ui: &mut egui::Ui, add: impl FnOnce(&mut egui::Ui) -> R) -> R {
    egui::Frame::NONE
        .fill(ui.visuals().faint_bg_color)
        .corner_radius(10.0)
        .stroke(egui::Stroke::new(
            1.0,
            ui.visuals().widgets.noninteractive.bg_stroke.color,
        ))
        .inner_margin(egui::Margin::symmetric(14, 12))
        .show(ui, add)
        .inner
}

pub fn field_error(ui: &mut egui::Ui, error: Option<&ValidationError>) {
    if let Some(error) = error {
        ui.label(egui::RichText::new(error.to_string()).small().color(ERROR_COLOR));
    }
}

/// Enter pressed while this single-line field had focus.
pub fn submitted(ui: &egui::Ui, response: &egui::Response) -> bool {
    response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PagerAction {
    Previous,
    Next,
}

pub fn pager(ui: &mut egui::Ui, pager: &Pager) -> Option<PagerAction> {
    let info = pager.info().filter(|_| pager.is_visible())?;
    let mut action = None;
    ui.horizontal(|ui| {
        if ui
            .add_enabled(pager.can_go_previous(), egui::Button::new("Previous"))
            .clicked()
        {
            action = Some(PagerAction::Previous);
        }
        ui.label(format!("Page {} of {}", info.current_page, info.total_pages));
        if ui
            .add_enabled(pager.can_go_next(), egui::Button::new("Next"))
            .clicked()
        {
            action = Some(PagerAction::Next);
        }
    });
    action
}

/// `Some(true)` on confirm, `Some(false)` on cancel, `None` while undecided.
pub fn confirm_dialog(ctx: &egui::Context, title: &str, message: &str) -> Option<bool> {
    let mut decision = None;
    egui::Window::new(title)
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.label(message);
            ui.add_space(8.0);
            ui.horizontal(|ui| {
                let confirm = egui::Button::new(
                    egui::RichText::new("Delete").color(egui::Color32::WHITE),
                )
                .fill(ERROR_COLOR);
                if ui.add(confirm).clicked() {
                    decision = Some(true);
                }
                if ui.button("Cancel").clicked() {
                    decision = Some(false);
                }
            });
        });
    decision
}

pub fn toasts(ctx: &egui::Context, notifications: &Notifications) {
    if notifications.is_empty() {
        return;
    }
    egui::Area::new(egui::Id::new("toasts"))
        .anchor(egui::Align2::RIGHT_BOTTOM, [-16.0, -16.0])
        .order(egui::Order::Foreground)
        .show(ctx, |ui| {
            for toast in notifications.iter() {
                let fill = match toast.kind {
                    ToastKind::Success => SUCCESS_COLOR,
                    ToastKind::Error => ERROR_COLOR,
                };
                egui::Frame::NONE
                    .fill(fill)
                    .corner_radius(8.0)
                    .inner_margin(egui::Margin::symmetric(12, 8))
                    .show(ui, |ui| {
                        ui.label(egui::RichText::new(&toast.message).color(egui::Color32::WHITE));
                    });
                ui.add_space(6.0);
            }
        });
}

/// Renders the form; returns true when the user asked to submit it.
pub fn department_form(
    ui: &mut egui::Ui,
    id_salt: &str,
    form: &mut DepartmentForm,
    busy: bool,
) -> bool {
    let mut submit = false;
    let kind = form.kind();

    ui.label(kind.name_field());
    let name = ui.add(
        egui::TextEdit::singleline(&mut form.name)
            .id_salt(format!("{id_salt}_name"))
            .hint_text(match kind {
                FormKind::Department => "Enter department name",
                FormKind::SubDepartment => "Enter sub-department name",
            })
            .desired_width(f32::INFINITY),
    );
    if submitted(ui, &name) {
        submit = true;
    }
    field_error(ui, form.name_error());

    if kind == FormKind::Department {
        ui.add_space(6.0);
        ui.label("Sub-departments (optional)");
        ui.horizontal(|ui| {
            let draft = ui.add(
                egui::TextEdit::singleline(&mut form.draft_input)
                    .id_salt(format!("{id_salt}_draft"))
                    .hint_text("Enter sub-department name")
                    .desired_width(ui.available_width() - 60.0),
            );
            if submitted(ui, &draft) {
                form.add_draft();
                draft.request_focus();
            }
            if ui.button("Add").clicked() {
                form.add_draft();
            }
        });
        field_error(ui, form.draft_error());

        let mut remove = None;
        for (index, draft) in form.drafts().iter().enumerate() {
            ui.horizontal(|ui| {
                ui.label(draft);
                if ui.small_button("Remove").clicked() {
                    remove = Some(index);
                }
            });
        }
        if let Some(index) = remove {
            form.remove_draft(index);
        }
    }

    ui.add_space(8.0);
    let label = if busy {
        "Saving..."
    } else {
        kind.submit_label()
    };
    if ui
        .add_enabled(
            !busy,
            egui::Button::new(egui::RichText::new(label).strong())
                .min_size(egui::vec2(ui.available_width(), 32.0)),
        )
        .clicked()
    {
        submit = true;
    }
    submit && !busy
}
