//! Terminal entry point for the student records store.
//!
//! # Responsibility
//! - Bootstrap logging and the student database.
//! - Run the interaction loop on stdin/stdout.
//! - Map fatal storage failures to a non-zero exit code.

mod error;
mod input;
mod render;
mod repl;

use std::io;
use std::process::ExitCode;

use log::{error, info};
use rollbook_core::db::open_db;
use rollbook_core::{default_log_level, init_logging, SqliteStudentRepository, StudentService};

use crate::error::CliError;

const DB_FILE: &str = "students.db";
const LOG_DIR: &str = "logs";

fn main() -> ExitCode {
    // Logging is best effort; the store must stay usable without it.
    if let Err(err) = init_logging(default_log_level(), LOG_DIR) {
        eprintln!("warning: logging disabled: {err}");
    }

    match run() {
        Ok(()) => {
            info!("event=app_exit module=cli status=ok");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("event=app_exit module=cli status=error error={err}");
            eprintln!("fatal: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), CliError> {
    info!(
        "event=app_start module=cli status=ok version={}",
        rollbook_core::core_version()
    );

    let conn = open_db(DB_FILE)?;
    let repo = SqliteStudentRepository::try_new(&conn)?;
    let service = StudentService::new(repo);

    let stdin = io::stdin();
    let stdout = io::stdout();
    repl::run(&service, &mut stdin.lock(), &mut stdout.lock())?;

    drop(service);
    conn.close()
        .map_err(|(_, err)| rollbook_core::RepoError::from(err))?;
    Ok(())
}
