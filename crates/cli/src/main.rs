use std::path::PathBuf;
use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};

use hims_core::admin::AdminService;
use hims_core::blood_bank::BloodBankService;
use hims_core::equipment::EquipmentService;
use hims_core::patients::{NewPatient, PatientService};
use hims_core::scheduling::DUE_SOON_WINDOW_DAYS;
use hims_core::{CoreConfig, NonEmptyText, DEFAULT_DATA_DIR};

#[derive(Parser)]
#[command(name = "hims")]
#[command(about = "hims hospital information system CLI")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List all patients
    ListPatients,
    /// Register a patient
    RegisterPatient {
        /// First name
        first_name: String,
        /// Last name
        last_name: String,
        /// Date of birth (YYYY-MM-DD)
        #[arg(long)]
        birth_date: Option<NaiveDate>,
    },
    /// Show blood stock per group
    BloodStock,
    /// List equipment due for service
    EquipmentDue {
        /// Window in days (overdue equipment always included)
        #[arg(long, default_value_t = DUE_SOON_WINDOW_DAYS)]
        window: i64,
    },
    /// Show the admin overview
    Overview,
}

fn config() -> Result<Arc<CoreConfig>, Box<dyn std::error::Error>> {
    let data_dir = std::env::var("HIMS_DATA_DIR").unwrap_or_else(|_| DEFAULT_DATA_DIR.into());
    let facility = std::env::var("HIMS_FACILITY").unwrap_or_else(|_| "hims.local".into());
    Ok(Arc::new(CoreConfig::new(PathBuf::from(data_dir), facility)?))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let cfg = config()?;

    match cli.command {
        Some(Commands::ListPatients) => {
            let patients = PatientService::new(cfg).list();
            if patients.is_empty() {
                println!("No patients found.");
            } else {
                for patient in patients {
                    println!(
                        "ID: {}, Name: {} {}, Registered: {}",
                        patient.id, patient.first_name, patient.last_name, patient.registered_at
                    );
                }
            }
        }
        Some(Commands::RegisterPatient {
            first_name,
            last_name,
            birth_date,
        }) => {
            let new = NewPatient {
                first_name: NonEmptyText::new(&first_name)?,
                last_name: NonEmptyText::new(&last_name)?,
                birth_date,
                sex: None,
                blood_group: None,
                phone: None,
                address: None,
            };
            match PatientService::new(cfg).register(new) {
                Ok(patient) => println!("Registered patient with ID: {}", patient.id),
                Err(e) => eprintln!("Error registering patient: {}", e),
            }
        }
        Some(Commands::BloodStock) => {
            for level in BloodBankService::new(cfg).stock_levels() {
                println!("{}: {} unit(s)", level.blood_group, level.available);
            }
        }
        Some(Commands::EquipmentDue { window }) => {
            let today = Utc::now().date_naive();
            let due = EquipmentService::new(cfg).due_within(window, today);
            if due.is_empty() {
                println!("Nothing due within {} day(s).", window);
            } else {
                for view in due {
                    println!(
                        "{} ({}): due {} ({} day(s)), status {:?}",
                        view.equipment.name,
                        view.equipment.department,
                        view.equipment.next_due_date,
                        view.days_until_due,
                        view.status
                    );
                }
            }
        }
        Some(Commands::Overview) => {
            let overview = AdminService::new(cfg).overview(Utc::now().date_naive());
            println!("{}", serde_json::to_string_pretty(&overview)?);
        }
        None => {
            println!("No command given. Try `hims --help`.");
        }
    }

    Ok(())
}
