use api_shared::{Notice, NoticeKind};
use clap::{Parser, Subcommand};
use mtrh_core::{
    config::resolve_clinic_catalogue, CoreConfig, PatientForm, PatientRegistry, RegistryResult,
    Severity, DEFAULT_DATABASE_PATH, EXPORT_FILENAME, MSG_PATIENT_SAVED, MSG_RECORD_DELETED,
};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "mtrh")]
#[command(about = "MTRH patient registry CLI")]
struct Cli {
    /// SQLite database file
    #[arg(long, env = "MTRH_DB_PATH", global = true)]
    db: Option<PathBuf>,
    /// YAML clinic catalogue (defaults to the built-in MTRH list)
    #[arg(long, env = "MTRH_CLINICS_FILE", global = true)]
    clinics: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the database if it does not exist
    Init,
    /// Register a new patient
    Add {
        #[arg(long)]
        patient_id: Option<String>,
        #[arg(long)]
        diagnosis: Option<String>,
        /// Healthcare service unit (see `mtrh clinics`)
        #[arg(long)]
        unit: Option<String>,
        #[arg(long)]
        mobile: Option<String>,
        /// Male, Female or Other
        #[arg(long)]
        gender: Option<String>,
        /// Age in years (0-120)
        #[arg(long)]
        age: Option<String>,
    },
    /// Show the first record for a patient ID
    View { patient_id: String },
    /// Delete all records for a patient ID
    Delete { patient_id: String },
    /// Export every record as CSV
    Export {
        /// Output file
        #[arg(long, short, default_value = EXPORT_FILENAME)]
        output: PathBuf,
    },
    /// List the configured healthcare service units
    Clinics,
}

impl Commands {
    fn name(&self) -> &'static str {
        match self {
            Commands::Init => "init",
            Commands::Add { .. } => "add",
            Commands::View { .. } => "view",
            Commands::Delete { .. } => "delete",
            Commands::Export { .. } => "export",
            Commands::Clinics => "clinics",
        }
    }
}

fn main() -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("mtrh=warn".parse()?)
                .add_directive("mtrh_core=warn".parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let Some(command) = cli.command else {
        println!("Use 'mtrh --help' for commands");
        return Ok(ExitCode::SUCCESS);
    };

    let registry = open_registry(cli.db, cli.clinics)?;
    tracing::info!(
        "running `{}` against {}",
        command.name(),
        registry.config().database_path().display()
    );

    let notice = match command {
        Commands::Init => Notice::success(format!(
            "Database ready at {} ({} record(s))",
            registry.config().database_path().display(),
            registry.count()?
        )),
        Commands::Add {
            patient_id,
            diagnosis,
            unit,
            mobile,
            gender,
            age,
        } => {
            let form = PatientForm {
                patient_id,
                diagnosis,
                healthcare_service_unit: unit,
                mobile_number: mobile,
                gender,
                age,
            };
            match outcome(registry.add_patient(&form))? {
                Ok(_id) => Notice::success(MSG_PATIENT_SAVED),
                Err(notice) => notice,
            }
        }
        Commands::View { patient_id } => match outcome(registry.view_patient(&patient_id))? {
            Ok(record) => {
                for (label, value) in record.summary_fields() {
                    println!("{label}: {value}");
                }
                return Ok(ExitCode::SUCCESS);
            }
            Err(notice) => notice,
        },
        Commands::Delete { patient_id } => {
            match outcome(registry.delete_patient(&patient_id))? {
                Ok(_deleted) => Notice::success(MSG_RECORD_DELETED),
                Err(notice) => notice,
            }
        }
        Commands::Export { output } => match outcome(registry.export_all())? {
            Ok(export) => {
                export.write_to(&output)?;
                Notice::success(format!(
                    "Exported {} record(s) to {}",
                    export.rows,
                    output.display()
                ))
            }
            Err(notice) => notice,
        },
        Commands::Clinics => {
            for name in registry.config().clinics().names() {
                println!("{name}");
            }
            return Ok(ExitCode::SUCCESS);
        }
    };

    Ok(report(&notice))
}

fn open_registry(db: Option<PathBuf>, clinics: Option<PathBuf>) -> anyhow::Result<PatientRegistry> {
    let cfg = CoreConfig::new(
        db.unwrap_or_else(|| PathBuf::from(DEFAULT_DATABASE_PATH)),
        resolve_clinic_catalogue(clinics)?,
    )?;
    Ok(PatientRegistry::open(Arc::new(cfg))?)
}

/// Split operator-facing outcomes from failures that should abort the command.
fn outcome<T>(result: RegistryResult<T>) -> anyhow::Result<Result<T, Notice>> {
    match result {
        Ok(value) => Ok(Ok(value)),
        Err(err) if err.severity() == Severity::Internal => Err(err.into()),
        Err(err) => Ok(Err(Notice::from(err))),
    }
}

fn report(notice: &Notice) -> ExitCode {
    match notice.kind {
        NoticeKind::Success => {
            println!("✅ {}", notice.message);
            ExitCode::SUCCESS
        }
        NoticeKind::Warning => {
            eprintln!("warning: {}", notice.message);
            ExitCode::FAILURE
        }
        NoticeKind::Error => {
            eprintln!("❌ {}", notice.message);
            ExitCode::FAILURE
        }
    }
}
