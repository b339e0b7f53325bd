//! Backend worker: owns the async runtime and executes queued commands in order.

use std::{sync::Arc, thread};

use client_core::{AdminApi, ClientError};
use crossbeam_channel::{Receiver, Sender};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

pub fn spawn_backend_thread(
    api: Arc<dyn AdminApi>,
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    format!("backend worker startup failure: failed to build runtime: {err}"),
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        runtime.block_on(async move {
            let _ = ui_tx.try_send(UiEvent::BackendReady);
            while let Ok(cmd) = cmd_rx.recv() {
                let name = cmd.name();
                let event = handle_command(api.as_ref(), cmd).await;
                if ui_tx.send(event).is_err() {
                    tracing::debug!(command = name, "ui closed; stopping backend worker");
                    break;
                }
            }
        });
    })
}

fn failed(context: UiErrorContext, err: ClientError) -> UiEvent {
    tracing::warn!(?context, "backend command failed: {err}");
    UiEvent::Error(UiError::from_client_error(context, &err))
}

pub async fn handle_command(api: &dyn AdminApi, cmd: BackendCommand) -> UiEvent {
    match cmd {
        BackendCommand::Login { username, password } => {
            match api.login(&username, &password).await {
                Ok(()) => UiEvent::LoggedIn { username },
                Err(err) => failed(UiErrorContext::Login, err),
            }
        }
        BackendCommand::Register { username, password } => {
            match api.register(&username, &password).await {
                Ok(user) => UiEvent::Registered(user),
                Err(err) => failed(UiErrorContext::Register, err),
            }
        }
        BackendCommand::Logout => match api.logout().await {
            Ok(()) => UiEvent::LoggedOut,
            Err(err) => failed(UiErrorContext::Logout, err),
        },
        BackendCommand::ListDepartments { request } => {
            match api.list_departments(request).await {
                Ok(page) => UiEvent::DepartmentsLoaded { request, page },
                Err(err) => failed(UiErrorContext::LoadDepartments, err),
            }
        }
        BackendCommand::FetchDepartment { id } => match api.get_department(id).await {
            Ok(department) => UiEvent::DepartmentLoaded { id, department },
            Err(err) => failed(UiErrorContext::LoadDepartment(id), err),
        },
        BackendCommand::ListSubDepartments {
            department_id,
            request,
        } => match api.list_sub_departments(department_id, request).await {
            Ok(page) => UiEvent::SubDepartmentsLoaded {
                department_id,
                request,
                page,
            },
            Err(err) => failed(UiErrorContext::LoadSubDepartments(department_id), err),
        },
        BackendCommand::CreateDepartment { input } => match api.create_department(input).await {
            Ok(department) => UiEvent::DepartmentCreated(department),
            Err(err) => failed(UiErrorContext::CreateDepartment, err),
        },
        BackendCommand::UpdateDepartment { id, name } => {
            match api.update_department(id, &name).await {
                Ok(department) => UiEvent::DepartmentUpdated(department),
                Err(err) => failed(UiErrorContext::UpdateDepartment, err),
            }
        }
        BackendCommand::DeleteDepartment { id } => match api.delete_department(id).await {
            Ok(deleted) => UiEvent::DepartmentDeleted(deleted),
            Err(err) => failed(UiErrorContext::DeleteDepartment, err),
        },
        BackendCommand::CreateSubDepartment {
            department_id,
            name,
        } => match api.create_sub_department(department_id, &name).await {
            Ok(sub_department) => UiEvent::SubDepartmentCreated {
                department_id,
                sub_department,
            },
            Err(err) => failed(UiErrorContext::CreateSubDepartment, err),
        },
        BackendCommand::UpdateSubDepartment {
            department_id,
            id,
            name,
        } => match api.update_sub_department(id, &name).await {
            Ok(sub_department) => UiEvent::SubDepartmentUpdated {
                department_id,
                sub_department,
            },
            Err(err) => failed(UiErrorContext::UpdateSubDepartment, err),
        },
        BackendCommand::DeleteSubDepartment { department_id, id } => {
            match api.delete_sub_department(id).await {
                Ok(deleted) => UiEvent::SubDepartmentDeleted {
                    department_id,
                    deleted,
                },
                Err(err) => failed(UiErrorContext::DeleteSubDepartment, err),
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/runtime_tests.rs"]
mod tests;
