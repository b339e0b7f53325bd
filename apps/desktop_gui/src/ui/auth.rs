//! Login and register pages.

use eframe::egui;

use crate::{
    backend_bridge::commands::BackendCommand,
    controller::{credentials::CredentialsForm, reducer::AppState, router::Route},
    ui::widgets::{card, field_error, submitted},
};

#[derive(Clone, Copy)]
enum CredentialsPage {
    Login,
    Register,
}

impl CredentialsPage {
    fn title(self) -> &'static str {
        match self {
            Self::Login => "Sign in to your account",
            Self::Register => "Create your account",
        }
    }

    fn button(self, busy: bool) -> &'static str {
        match (self, busy) {
            (Self::Login, false) => "Sign in",
            (Self::Login, true) => "Signing in...",
            (Self::Register, false) => "Register",
            (Self::Register, true) => "Registering...",
        }
    }
}

/// Returns true when the user asked to submit.
fn credentials_card(ui: &mut egui::Ui, page: CredentialsPage, form: &mut CredentialsForm) -> bool {
    let mut submit = false;
    let busy = form.is_in_flight();
    ui.heading(page.title());
    ui.add_space(8.0);

    ui.label("Username");
    let username = ui.add(
        egui::TextEdit::singleline(&mut form.username)
            .hint_text("Username")
            .desired_width(f32::INFINITY),
    );
    field_error(ui, form.username_error());

    ui.label("Password");
    let password = ui.add(
        egui::TextEdit::singleline(&mut form.password)
            .password(true)
            .hint_text("Password")
            .desired_width(f32::INFINITY),
    );
    field_error(ui, form.password_error());
    if submitted(ui, &username) || submitted(ui, &password) {
        submit = true;
    }

    ui.add_space(10.0);
    let button = egui::Button::new(egui::RichText::new(page.button(busy)).strong())
        .min_size(egui::vec2(ui.available_width(), 36.0));
    if ui.add_enabled(!busy, button).clicked() {
        submit = true;
    }
    submit && !busy
}

fn centered(ui: &mut egui::Ui, add: impl FnOnce(&mut egui::Ui)) {
    let avail = ui.available_size();
    ui.add_space((avail.y * 0.12).clamp(18.0, 90.0));
    ui.vertical_centered(|ui| {
        ui.set_width(avail.x.clamp(320.0, 420.0));
        card(ui, add);
    });
}

pub fn login_page(ui: &mut egui::Ui, state: &mut AppState) -> Vec<BackendCommand> {
    let mut cmds = Vec::new();
    let mut go_register = false;
    centered(ui, |ui| {
        if credentials_card(ui, CredentialsPage::Login, &mut state.login) {
            cmds.extend(state.submit_login());
        }
        ui.add_space(6.0);
        if ui.link("Don't have an account? Register").clicked() {
            go_register = true;
        }
    });
    if go_register {
        cmds.extend(state.enter(Route::Register));
    }
    cmds
}

pub fn register_page(ui: &mut egui::Ui, state: &mut AppState) -> Vec<BackendCommand> {
    let mut cmds = Vec::new();
    let mut go_login = false;
    centered(ui, |ui| {
        if credentials_card(ui, CredentialsPage::Register, &mut state.register) {
            cmds.extend(state.submit_register());
        }
        ui.add_space(6.0);
        if ui.link("Already have an account? Sign in").clicked() {
            go_login = true;
        }
    });
    if go_login {
        cmds.extend(state.enter(Route::Login));
    }
    cmds
}
