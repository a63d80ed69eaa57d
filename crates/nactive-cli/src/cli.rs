use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "nactive")]
#[command(about = "Nactive EHR client - role-based clinical front-end")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Server base URL (overrides config and NACTIVE_URL env var)
    #[arg(short, long, global = true, env = "NACTIVE_URL")]
    pub server: Option<String>,

    /// Config profile name
    #[arg(short, long, global = true, env = "NACTIVE_PROFILE", default_value = "default")]
    pub profile: String,

    /// Output format
    #[arg(short, long, global = true)]
    pub format: Option<OutputFormat>,
}

#[derive(Clone, Copy, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Log in to the EHR backend
    Login(LoginArgs),
    /// Log out (server notification is best-effort, local session always ends)
    Logout,
    /// Show the current session and what it may do
    Whoami,
    /// Patient list, search, registration, and records
    Patients(PatientsArgs),
    /// Record a clinical encounter
    Encounters(EncountersArgs),
    /// Prescribe medication (doctors only)
    Prescriptions(PrescriptionsArgs),
    /// Audit trail (admins only)
    Audit(AuditArgs),
    /// Manage CLI configuration
    Config(ConfigArgs),
}

#[derive(clap::Args)]
pub struct LoginArgs {
    /// Username
    #[arg(short, long)]
    pub username: String,
    /// Password
    #[arg(long)]
    pub password: String,
}

#[derive(clap::Args)]
pub struct PatientsArgs {
    #[command(subcommand)]
    pub command: PatientsCommands,
}

#[derive(Subcommand)]
pub enum PatientsCommands {
    /// List patients, optionally filtered by name or phone
    List(PatientsListArgs),
    /// Register a new patient
    Register(PatientsRegisterArgs),
    /// Show a patient's demographic header and clinical timeline
    Records(PatientsRecordsArgs),
}

#[derive(clap::Args)]
pub struct PatientsListArgs {
    /// Search by name or phone
    #[arg(long)]
    pub search: Option<String>,
}

#[derive(clap::Args)]
pub struct PatientsRegisterArgs {
    #[arg(long)]
    pub full_name: String,
    /// Date of birth (YYYY-MM-DD)
    #[arg(long)]
    pub date_of_birth: String,
    #[arg(long, value_enum)]
    pub gender: GenderArg,
    #[arg(long)]
    pub phone: Option<String>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum GenderArg {
    Male,
    Female,
    Other,
}

#[derive(clap::Args)]
pub struct PatientsRecordsArgs {
    /// Patient id
    pub id: i64,
}

#[derive(clap::Args)]
pub struct EncountersArgs {
    #[command(subcommand)]
    pub command: EncountersCommands,
}

#[derive(Subcommand)]
pub enum EncountersCommands {
    /// Add an encounter to a patient's timeline
    Add(EncountersAddArgs),
}

#[derive(clap::Args)]
pub struct EncountersAddArgs {
    /// Patient id
    pub patient_id: i64,
    /// Clinical notes
    #[arg(long)]
    pub notes: Option<String>,
}

#[derive(clap::Args)]
pub struct PrescriptionsArgs {
    #[command(subcommand)]
    pub command: PrescriptionsCommands,
}

#[derive(Subcommand)]
pub enum PrescriptionsCommands {
    /// Add a prescription to an encounter
    Add(PrescriptionsAddArgs),
}

#[derive(clap::Args)]
pub struct PrescriptionsAddArgs {
    /// Encounter id the prescription belongs to
    pub encounter_id: i64,
    #[arg(long)]
    pub drug_name: String,
    #[arg(long)]
    pub dosage: String,
    #[arg(long)]
    pub frequency: String,
    #[arg(long)]
    pub duration: String,
}

#[derive(clap::Args)]
pub struct AuditArgs {
    #[command(subcommand)]
    pub command: AuditCommands,
}

#[derive(Subcommand)]
pub enum AuditCommands {
    /// List audit log entries
    List,
}

#[derive(clap::Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show current config
    Show,
    /// Set config value
    Set(ConfigSetArgs),
}

#[derive(clap::Args)]
pub struct ConfigSetArgs {
    /// Key to set (server, format)
    pub key: String,
    /// Value
    pub value: String,
}
