// server/src/cli/cli.rs

// Entry point of the MediBook CLI: parse arguments, load configuration,
// open the configured storage and dispatch to a handler.
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use log::debug;
use medibook_lib::{create_storage, load_app_config};

use crate::cli::commands::{CliArgs, Commands};
use crate::cli::handlers::{self, CliContext};

pub fn build_context(config_path: Option<&Path>) -> Result<CliContext> {
    let config = load_app_config(config_path)?;
    let engine = create_storage(&config.storage)
        .with_context(|| format!("Failed to open {} storage", config.storage.engine_type))?;
    Ok(CliContext::new(config, engine))
}

pub async fn run_command(ctx: &CliContext, command: Commands) -> Result<()> {
    debug!("Running {:?}", command);
    match command {
        Commands::Login { email, name, role } => handlers::handle_login(ctx, &email, &name, &role),
        Commands::Signup { name, email, role } => handlers::handle_signup(ctx, &name, &email, &role),
        Commands::Logout => handlers::handle_logout(ctx),
        Commands::Whoami => handlers::handle_whoami(ctx),
        Commands::Doctors { specialty, search, pending } => {
            handlers::handle_doctors(specialty.as_deref(), search.as_deref(), pending)
        }
        Commands::Slots { doctor_id, date } => handlers::handle_slots(ctx, doctor_id, &date),
        Commands::Book { doctor_id, date, time, visit_type, payment, insurance, notes } => handlers::handle_book(
            ctx,
            doctor_id,
            &date,
            &time,
            &visit_type,
            payment.as_deref(),
            insurance.as_deref(),
            notes.as_deref(),
        )
        .map(|_| ()),
        Commands::List { history, json } => handlers::handle_list(ctx, history, json),
        Commands::Cancel { id } => handlers::handle_cancel(ctx, &id),
        Commands::Remove { id } => handlers::handle_remove(ctx, &id),
        Commands::Stats { status, search } => handlers::handle_stats(ctx, status, search),
        Commands::Language { code } => handlers::handle_language(ctx, code.as_deref()),
        Commands::Chat { contact, message } => handlers::handle_chat(ctx, &contact, &message).await,
        Commands::Prescriptions => handlers::handle_prescriptions(ctx),
        Commands::Deactivate { reason } => handlers::handle_deactivate(ctx, reason.as_deref()),
        Commands::DeleteAccount { reason } => handlers::handle_delete_account(ctx, reason.as_deref()),
    }
}

pub async fn start_cli() -> Result<()> {
    let args = CliArgs::parse();
    let ctx = build_context(args.config.as_deref())?;
    let result = run_command(&ctx, args.command).await;
    ctx.engine.flush()?;
    result
}
