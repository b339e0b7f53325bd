use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, Sender};
use eframe::egui;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::{
    events::UiEvent, orchestration::dispatch_backend_commands, reducer::AppState, router::Route,
};
use crate::ui::{auth, departments, details, widgets};

pub struct DeptAdminApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    state: AppState,
}

impl DeptAdminApp {
    pub fn new(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        authenticated: bool,
    ) -> Self {
        let mut app = Self {
            cmd_tx,
            ui_rx,
            state: AppState::new(authenticated),
        };
        let cmds = app.state.navigate("/");
        app.dispatch(cmds);
        app
    }

    fn dispatch(&mut self, cmds: Vec<BackendCommand>) {
        if !cmds.is_empty() {
            dispatch_backend_commands(&self.cmd_tx, cmds, &mut self.state.status);
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            let cmds = self.state.apply(event, Instant::now());
            self.dispatch(cmds);
        }
    }

    fn show_nav_bar(&mut self, ctx: &egui::Context) -> Vec<BackendCommand> {
        let mut cmds = Vec::new();
        egui::TopBottomPanel::top("nav_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Department Admin");
                ui.add_space(16.0);
                if self.state.is_authenticated() {
                    if ui.link("Departments").clicked() {
                        cmds.extend(self.state.enter(Route::Departments));
                    }
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("Logout").clicked() {
                            cmds.extend(self.state.logout());
                        }
                        if let Some(username) = self.state.username() {
                            ui.weak(username);
                        }
                    });
                } else {
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.link("Register").clicked() {
                            cmds.extend(self.state.enter(Route::Register));
                        }
                        if ui.link("Login").clicked() {
                            cmds.extend(self.state.enter(Route::Login));
                        }
                    });
                }
            });
        });
        cmds
    }

    fn show_banner(&mut self, ui: &mut egui::Ui) {
        let Some(message) = self.state.banner().map(str::to_string) else {
            return;
        };
        let mut dismiss = false;
        egui::Frame::NONE
            .fill(widgets::ERROR_COLOR.gamma_multiply(0.25))
            .corner_radius(8.0)
            .inner_margin(egui::Margin::symmetric(12, 8))
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.label(message);
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        dismiss = ui.small_button("Dismiss").clicked();
                    });
                });
            });
        if dismiss {
            self.state.dismiss_banner();
        }
        ui.add_space(8.0);
    }
}

impl eframe::App for DeptAdminApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();
        self.state.toasts.prune(Instant::now());

        let mut cmds = self.show_nav_bar(ctx);

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.small(egui::RichText::new(&self.state.status).weak());
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.show_banner(ui);
            let page_cmds = match self.state.route() {
                Route::Login => auth::login_page(ui, &mut self.state),
                Route::Register => auth::register_page(ui, &mut self.state),
                Route::Departments => departments::departments_page(ui, ctx, &mut self.state),
                Route::DepartmentDetails(_) => details::details_page(ui, ctx, &mut self.state),
            };
            cmds.extend(page_cmds);
        });

        widgets::toasts(ctx, &self.state.toasts);
        self.dispatch(cmds);

        ctx.request_repaint_after(Duration::from_millis(100));
    }
}
