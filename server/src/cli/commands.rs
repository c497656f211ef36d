// server/src/cli/commands.rs

// Command-line arguments and subcommands of the MediBook CLI.
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[clap(name = "medibook-cli", version, about = "Patient, doctor and admin portal state from the command line")]
pub struct CliArgs {
    /// YAML configuration file; `medibook.yaml` in the working directory is used when present.
    #[clap(long, global = true, value_hint = clap::ValueHint::FilePath, env = "MEDIBOOK_CONFIG")]
    pub config: Option<PathBuf>,
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand, PartialEq)]
pub enum Commands {
    Login {
        #[clap(long)]
        email: String,
        #[clap(long, default_value = "")]
        name: String,
        #[clap(long, default_value = "patient")]
        role: String,
    },
    Signup {
        #[clap(long)]
        name: String,
        #[clap(long)]
        email: String,
        #[clap(long, default_value = "patient")]
        role: String,
    },
    Logout,
    Whoami,
    Doctors {
        #[clap(long)]
        specialty: Option<String>,
        #[clap(long)]
        search: Option<String>,
        /// Only doctors awaiting admin verification.
        #[clap(long)]
        pending: bool,
    },
    Slots {
        #[clap(long)]
        doctor_id: u32,
        #[clap(long)]
        date: String,
    },
    Book {
        #[clap(long)]
        doctor_id: u32,
        #[clap(long)]
        date: String,
        #[clap(long)]
        time: String,
        #[clap(long = "type", default_value = "physical")]
        visit_type: String,
        #[clap(long)]
        payment: Option<String>,
        #[clap(long)]
        insurance: Option<String>,
        #[clap(long)]
        notes: Option<String>,
    },
    List {
        /// Show completed and cancelled appointments instead of upcoming ones.
        #[clap(long)]
        history: bool,
        #[clap(long)]
        json: bool,
    },
    Cancel {
        id: String,
    },
    Remove {
        id: String,
    },
    Stats {
        #[clap(long)]
        status: Option<String>,
        #[clap(long)]
        search: Option<String>,
    },
    Language {
        code: Option<String>,
    },
    Chat {
        #[clap(long)]
        contact: String,
        #[clap(long)]
        message: String,
    },
    Prescriptions,
    Deactivate {
        #[clap(long)]
        reason: Option<String>,
    },
    DeleteAccount {
        #[clap(long)]
        reason: Option<String>,
    },
}
