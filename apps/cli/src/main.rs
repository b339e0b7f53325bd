use std::{
    io::{self, BufRead, Write},
    path::PathBuf,
};

use anyhow::{bail, Context as _, Result};
use clap::{Args as ClapArgs, Parser, Subcommand};
use client_core::{load_settings, AdminApi, AdminClient};
use shared::{
    domain::{DepartmentId, SubDepartmentId},
    pagination::PageRequest,
    protocol::CreateDepartmentInput,
};
use tracing_subscriber::EnvFilter;

mod output;

#[derive(Parser, Debug)]
#[command(name = "deptctl", about = "Manage departments from the command line")]
struct Args {
    /// GraphQL endpoint, overriding deptadmin.toml and the environment.
    #[arg(long, global = true)]
    graphql_url: Option<String>,
    /// Directory holding the session file.
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sign in and store the session token.
    Login(CredentialArgs),
    /// Create an account. Does not sign in.
    Register(CredentialArgs),
    /// Forget the stored session.
    Logout,
    /// Show the signed-in user.
    Whoami,
    #[command(subcommand)]
    Departments(DepartmentCommand),
    #[command(subcommand)]
    Sub(SubDepartmentCommand),
}

#[derive(ClapArgs, Debug)]
struct CredentialArgs {
    username: String,
    /// Read from stdin when omitted.
    #[arg(long)]
    password: Option<String>,
}

#[derive(Subcommand, Debug)]
enum DepartmentCommand {
    List {
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Show one department with a page of its sub-departments.
    Show {
        id: i64,
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    Create {
        name: String,
        /// Sub-department to create along with the department.
        #[arg(long = "sub")]
        subs: Vec<String>,
    },
    Rename {
        id: i64,
        name: String,
    },
    Delete {
        id: i64,
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand, Debug)]
enum SubDepartmentCommand {
    Create { department_id: i64, name: String },
    Rename { id: i64, name: String },
    Delete {
        id: i64,
        #[arg(long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();
    let args = Args::parse();

    let settings = load_settings().with_overrides(args.graphql_url, args.data_dir);
    let client = AdminClient::from_settings(&settings).context("failed to set up client")?;
    run(&client, args.command).await
}

async fn run(api: &dyn AdminApi, command: Command) -> Result<()> {
    match command {
        Command::Login(creds) => {
            let password = password_or_prompt(creds.password)?;
            api.login(&creds.username, &password).await?;
            println!("Signed in as {}", creds.username);
        }
        Command::Register(creds) => {
            let password = password_or_prompt(creds.password)?;
            let user = api.register(&creds.username, &password).await?;
            println!("Registered {} (id {}). Run `deptctl login` to sign in.", user.username, user.id);
        }
        Command::Logout => {
            api.logout().await?;
            println!("Signed out");
        }
        Command::Whoami => match (api.is_authenticated().await, api.current_user().await) {
            (true, Some(user)) => println!("{} (id {})", user.username, user.id),
            (true, None) => println!("Signed in"),
            (false, _) => bail!("not signed in"),
        },
        Command::Departments(cmd) => departments(api, cmd).await?,
        Command::Sub(cmd) => sub_departments(api, cmd).await?,
    }
    Ok(())
}

async fn departments(api: &dyn AdminApi, command: DepartmentCommand) -> Result<()> {
    match command {
        DepartmentCommand::List { page } => {
            let result = api.list_departments(page_request(page)?).await?;
            print!("{}", output::department_page(&result));
        }
        DepartmentCommand::Show { id, page } => {
            let id = DepartmentId(id);
            let Some(department) = api.get_department(id).await? else {
                bail!("department {id} not found");
            };
            let subs = api.list_sub_departments(id, page_request(page)?).await?;
            print!("{}", output::department_details(&department, &subs));
        }
        DepartmentCommand::Create { name, subs } => {
            let input = CreateDepartmentInput::named(name).with_sub_departments(subs);
            let created = api.create_department(input).await?;
            println!("Created department {} ({})", created.name, created.id);
        }
        DepartmentCommand::Rename { id, name } => {
            let updated = api.update_department(DepartmentId(id), &name).await?;
            println!("Renamed department {} to {}", updated.id, updated.name);
        }
        DepartmentCommand::Delete { id, yes } => {
            let prompt = "Are you sure you want to delete this department?";
            if !yes && !confirm(prompt, &mut io::stdin().lock(), &mut io::stdout())? {
                println!("Aborted");
                return Ok(());
            }
            let deleted = api.delete_department(DepartmentId(id)).await?;
            println!("Deleted department {} ({})", deleted.name, deleted.id);
        }
    }
    Ok(())
}

async fn sub_departments(api: &dyn AdminApi, command: SubDepartmentCommand) -> Result<()> {
    match command {
        SubDepartmentCommand::Create { department_id, name } => {
            let created = api
                .create_sub_department(DepartmentId(department_id), &name)
                .await?;
            println!("Created sub-department {} ({})", created.name, created.id);
        }
        SubDepartmentCommand::Rename { id, name } => {
            let updated = api.update_sub_department(SubDepartmentId(id), &name).await?;
            println!("Renamed sub-department {} to {}", updated.id, updated.name);
        }
        SubDepartmentCommand::Delete { id, yes } => {
            let prompt = "Are you sure you want to delete this sub-department?";
            if !yes && !confirm(prompt, &mut io::stdin().lock(), &mut io::stdout())? {
                println!("Aborted");
                return Ok(());
            }
            let deleted = api.delete_sub_department(SubDepartmentId(id)).await?;
            println!("Deleted sub-department {} ({})", deleted.name, deleted.id);
        }
    }
    Ok(())
}

fn page_request(page: u32) -> Result<PageRequest> {
    PageRequest::default()
        .with_page(page)
        .with_context(|| format!("invalid page {page}"))
}

fn password_or_prompt(password: Option<String>) -> Result<String> {
    if let Some(password) = password {
        return Ok(password);
    }
    eprint!("Password: ");
    io::stderr().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

/// Only an explicit "y" or "yes" confirms.
fn confirm(prompt: &str, input: &mut impl BufRead, out: &mut impl Write) -> Result<bool> {
    write!(out, "{prompt} [y/N] ")?;
    out.flush()?;
    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_department_create_with_subs() {
        let args = Args::try_parse_from([
            "deptctl", "departments", "create", "Engineering", "--sub", "Backend", "--sub",
            "Frontend",
        ])
        .expect("parse");
        match args.command {
            Command::Departments(DepartmentCommand::Create { name, subs }) => {
                assert_eq!(name, "Engineering");
                assert_eq!(subs, vec!["Backend", "Frontend"]);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn global_flags_follow_subcommands() {
        let args = Args::try_parse_from([
            "deptctl",
            "sub",
            "delete",
            "4",
            "--yes",
            "--graphql-url",
            "http://api.test/graphql",
        ])
        .expect("parse");
        assert_eq!(args.graphql_url.as_deref(), Some("http://api.test/graphql"));
        assert!(matches!(
            args.command,
            Command::Sub(SubDepartmentCommand::Delete { id: 4, yes: true })
        ));
    }

    #[test]
    fn list_defaults_to_first_page() {
        let args = Args::try_parse_from(["deptctl", "departments", "list"]).expect("parse");
        assert!(matches!(
            args.command,
            Command::Departments(DepartmentCommand::List { page: 1 })
        ));
    }

    #[test]
    fn page_zero_is_rejected() {
        assert!(page_request(0).is_err());
        assert_eq!(page_request(3).expect("page").page(), 3);
    }

    #[test]
    fn confirm_accepts_only_yes() {
        let mut out = Vec::new();
        assert!(confirm("Delete?", &mut "y\n".as_bytes(), &mut out).expect("confirm"));
        assert!(confirm("Delete?", &mut "YES\n".as_bytes(), &mut out).expect("confirm"));
        assert!(!confirm("Delete?", &mut "\n".as_bytes(), &mut out).expect("confirm"));
        assert!(!confirm("Delete?", &mut "nope\n".as_bytes(), &mut out).expect("confirm"));
        assert!(String::from_utf8_lossy(&out).starts_with("Delete? [y/N] "));
    }
}
