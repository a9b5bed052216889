use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use time::macros::format_description;
use time::{Date, OffsetDateTime, Time};
use tracing::debug;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use std::path::PathBuf;
use std::sync::Arc;

use dentalflow::core::validation;
use dentalflow::models::{
    DentistRegistration, LoginCredentials, PatientRegistration, Registration, Role,
};
use dentalflow::projection::calendar;
use dentalflow::projection::views::{self, AppointmentTab};
use dentalflow::projection::{CategoryCounts, CategoryKind, FilterSpec};
use dentalflow::{
    AuthAction, AuthService, AuthStore, Config, EntityStore, KeyValueStorage, MemoryStorage,
    RootRoute, SqliteStorage, StateContainer, ThemeAction, ThemeStore, fixtures,
};

#[derive(Parser)]
#[command(name = "dentalflow")]
#[command(about = "Dental practice views and session state from the command line")]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Keep session and theme in memory only
    #[arg(long)]
    ephemeral: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Sign in with email and password
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Create a new account and sign in
    Register {
        #[command(subcommand)]
        role: RegisterCommand,
    },
    /// Sign out and clear the stored session
    Logout,
    /// Show the current session and the mounted route
    Session,
    /// Show or change the colour scheme
    Theme {
        #[command(subcommand)]
        action: ThemeCommand,
    },
    /// List patients
    Patients {
        #[arg(short, long, default_value = "")]
        search: String,
        /// Status chip: all, active, inactive or archived
        #[arg(long, default_value = "active")]
        status: String,
    },
    /// Appointments of one day
    Calendar {
        #[arg(long, value_parser = parse_date)]
        date: Option<Date>,
        #[arg(long, default_value = "all")]
        status: String,
        #[arg(short, long, default_value = "")]
        search: String,
    },
    /// Profile of one patient with stats and medical history
    Patient { id: String },
    /// One treatment and its sessions
    Treatment { id: String },
    /// Month grid with per-day appointment counts
    Month {
        #[arg(long, value_parser = parse_date)]
        date: Option<Date>,
    },
    /// A patient's upcoming or past appointments
    Appointments {
        /// Defaults to the signed-in patient
        #[arg(long)]
        patient: Option<String>,
        #[arg(long)]
        past: bool,
    },
    /// Treatments of one patient
    Treatments {
        #[arg(long)]
        patient: String,
        #[arg(long, default_value = "all")]
        status: String,
    },
    /// Educational resources
    Resources {
        #[arg(short, long, default_value = "")]
        search: String,
        #[arg(long, default_value = "all")]
        category: String,
    },
    /// Conversations
    Messages {
        #[arg(short, long, default_value = "")]
        search: String,
    },
    /// Dashboard of the signed-in user
    Dashboard,
}

#[derive(Subcommand)]
enum RegisterCommand {
    Dentist {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        phone: String,
        #[arg(long)]
        license: String,
        #[arg(long)]
        specialization: Vec<String>,
    },
    Patient {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        phone: String,
        #[arg(long)]
        dni: String,
        #[arg(long, value_parser = parse_date)]
        birth_date: Option<Date>,
    },
}

#[derive(Subcommand)]
enum ThemeCommand {
    Show,
    Toggle,
    Set {
        #[arg(value_enum)]
        mode: Mode,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Mode {
    Light,
    Dark,
}

fn parse_date(s: &str) -> Result<Date, String> {
    Date::parse(s, format_description!("[year]-[month]-[day]"))
        .map_err(|e| format!("expected YYYY-MM-DD: {}", e))
}

fn hm(time: Time) -> String {
    time.format(format_description!("[hour]:[minute]"))
        .unwrap_or_default()
}

fn init_logging(default_filter: &str, verbose: bool) {
    let fallback = if verbose { "dentalflow=debug" } else { default_filter };
    let filter = EnvFilter::try_from_env("DENTALFLOW_LOG")
        .unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Cli::parse();
    let config = Config::load(args.config.as_deref())?;
    init_logging(&config.logging.filter, args.verbose);
    debug!(?config, "configuration loaded");

    if args.ephemeral {
        run(args, config, Arc::new(MemoryStorage::new())).await
    } else {
        let storage = SqliteStorage::new(&config.storage.path)
            .await
            .with_context(|| format!("Failed to open storage at {}", config.storage.path))?;
        let storage = Arc::new(storage);
        let result = run(args, config, Arc::clone(&storage)).await;
        storage.close().await?;
        result
    }
}

fn print_counts<C: CategoryKind>(counts: &CategoryCounts<C>) {
    let chips: Vec<String> = std::iter::once(format!("all ({})", counts.all()))
        .chain(counts.iter().map(|(c, n)| format!("{} ({})", c.key(), n)))
        .collect();
    println!("Filters: {}", chips.join("  "));
}

async fn run<S: KeyValueStorage>(cli: Cli, config: Config, storage: Arc<S>) -> anyhow::Result<()> {
    let service = Arc::new(AuthService::seeded(config.auth));
    let auth = AuthStore::rehydrate(Arc::clone(&storage), service).await;
    let theme = ThemeStore::rehydrate(Arc::clone(&storage)).await;

    let now = OffsetDateTime::now_utc();
    let today = now.date();
    let entities: EntityStore = fixtures::entity_store(now);

    match cli.command {
        Command::Login { email, password } => {
            let credentials = LoginCredentials { email, password };
            validation::validate_login(&credentials)?;
            let state = auth.dispatch(AuthAction::Login(credentials)).await?;
            if let Some(user) = &state.user {
                println!("Bienvenido, {}", user.display_name());
            }
        }

        Command::Register { role } => {
            let registration = match role {
                RegisterCommand::Dentist {
                    email,
                    password,
                    name,
                    last_name,
                    phone,
                    license,
                    specialization,
                } => Registration::Dentist(DentistRegistration {
                    email,
                    confirm_password: password.clone(),
                    password,
                    name,
                    last_name,
                    phone,
                    license_number: license,
                    specialization,
                }),
                RegisterCommand::Patient {
                    email,
                    password,
                    name,
                    last_name,
                    phone,
                    dni,
                    birth_date,
                } => Registration::Patient(PatientRegistration {
                    email,
                    confirm_password: password.clone(),
                    password,
                    name,
                    last_name,
                    phone,
                    date_of_birth: birth_date,
                    dni,
                }),
            };
            let state = auth.dispatch(AuthAction::Register(registration)).await?;
            if let Some(user) = &state.user {
                println!("Cuenta creada: {} ({})", user.email, user.id);
            }
        }

        Command::Logout => {
            auth.dispatch(AuthAction::Logout).await?;
            println!("Sesión cerrada");
        }

        Command::Session => {
            let state = auth.get();
            println!("Status: {}", state.status.name());
            match &state.user {
                Some(user) => {
                    println!(
                        "User:   {} <{}> [{}]",
                        user.display_name(),
                        user.email,
                        user.role.label()
                    );
                }
                None => println!("User:   -"),
            }
            let route = RootRoute::from_state(&state);
            println!("Route:  {:?}", route);
            let tabs: Vec<&str> = route.tabs().iter().map(|t| t.label).collect();
            if !tabs.is_empty() {
                println!("Tabs:   {}", tabs.join(", "));
            }
        }

        Command::Theme { action } => {
            let state = match action {
                ThemeCommand::Show => theme.get(),
                ThemeCommand::Toggle => theme.dispatch(ThemeAction::Toggle).await?,
                ThemeCommand::Set { mode } => {
                    theme
                        .dispatch(ThemeAction::Set(matches!(mode, Mode::Dark)))
                        .await?
                }
            };
            let palette = state.palette();
            println!("Theme: {}", if state.is_dark_mode { "dark" } else { "light" });
            println!("  primary     {}", palette.primary.main);
            println!("  background  {}", palette.background.primary);
            println!("  text        {}", palette.text.primary);
        }

        Command::Patients { search, status } => {
            let projection = views::patients_list(&entities, &FilterSpec::new(search, status));
            print_counts(&projection.counts);
            for patient in projection.iter() {
                println!(
                    "  {:<6} {:<24} {:<10} {}",
                    patient.id,
                    patient.full_name(),
                    patient.profile.dni,
                    patient.status.label()
                );
            }
        }

        Command::Calendar { date, status, search } => {
            let day = date.unwrap_or(today);
            let projection = calendar::calendar_day(
                entities.appointments().records(),
                day,
                &FilterSpec::new(search, status),
            );
            println!("{}", day);
            print_counts(&projection.counts);
            if projection.is_empty() {
                println!("  No hay citas");
            }
            for appointment in projection.iter() {
                println!(
                    "  {}-{}  {:<20} {:<12} {}",
                    hm(appointment.start_time()),
                    hm(appointment.end_time()),
                    appointment.patient_name,
                    appointment.kind.label(),
                    appointment.status.label()
                );
            }
        }

        Command::Month { date } => {
            let anchor = date.unwrap_or(today);
            println!("{} {}", anchor.month(), anchor.year());
            println!("  Lu  Ma  Mi  Ju  Vi  Sa  Do");
            for week in calendar::month_grid(entities.appointments().records(), anchor).chunks(7) {
                let row: Vec<String> = week
                    .iter()
                    .map(|d| match (d.in_month, d.appointment_count) {
                        (false, _) => "    ".to_string(),
                        (true, 0) => format!("{:>4}", d.date.day()),
                        (true, _) => format!("{:>3}*", d.date.day()),
                    })
                    .collect();
                println!("{}", row.join(""));
            }
        }

        Command::Appointments { patient, past } => {
            let patient_id = match patient {
                Some(id) => id,
                None => auth
                    .current_user()
                    .filter(|u| u.role == Role::Patient)
                    .map(|u| u.id)
                    .context("No patient given and no patient signed in")?,
            };
            entities.patient(&patient_id)?;
            let tab = if past { AppointmentTab::Past } else { AppointmentTab::Upcoming };
            let projection = views::patient_appointments(&entities, &patient_id, tab, now);
            println!("Total: {}", projection.len());
            for appointment in projection.iter() {
                println!(
                    "  {} {}  {:<12} {}",
                    appointment.day(),
                    hm(appointment.start_time()),
                    appointment.kind.label(),
                    appointment.status.label()
                );
            }
        }

        Command::Treatments { patient, status } => {
            let (patient, projection) =
                views::patient_treatments(&entities, &patient, &FilterSpec::category(status))?;
            println!("{}", patient.full_name());
            print_counts(&projection.counts);
            for treatment in projection.iter() {
                println!(
                    "  {:<6} {:<24} {:<12} {:>3.0}%  pendiente {}",
                    treatment.id,
                    treatment.title,
                    treatment.status.label(),
                    treatment.progress() * 100.0,
                    treatment.outstanding()
                );
            }
        }

        Command::Patient { id } => {
            let patient = entities.patient(&id)?;
            println!("{} ({})", patient.full_name(), patient.status.label());
            match entities.patient_stats(&id) {
                Ok(stats) => println!(
                    "  Visitas: {}  Próximas: {}  Tratamientos: {} hechos, {} pendientes",
                    stats.total_visits,
                    stats.upcoming_appointments,
                    stats.completed_treatments,
                    stats.pending_treatments
                ),
                Err(err) => debug!(error = %err, "no stats"),
            }
            match entities.medical_history(&id) {
                Ok(history) => {
                    println!("  Alergias: {}", history.allergies.join(", "));
                    println!("  Medicación: {}", history.medications.join(", "));
                    for surgery in &history.surgeries {
                        println!("  Cirugía: {} {}", surgery.date.date(), surgery.kind);
                    }
                }
                Err(err) => debug!(error = %err, "no medical history"),
            }
        }

        Command::Treatment { id } => {
            let treatment = entities.treatment(&id)?;
            println!(
                "{} ({})  {}/{} sesiones",
                treatment.title,
                treatment.status.label(),
                treatment.completed_sessions,
                treatment.estimated_sessions
            );
            for session in entities.sessions(&id)? {
                println!(
                    "  {} {} min  {}",
                    session.date.date(),
                    session.duration,
                    session.notes
                );
            }
        }

        Command::Resources { search, category } => {
            let projection = views::resources(&entities, &FilterSpec::new(search, category));
            print_counts(&projection.counts);
            for resource in projection.iter() {
                println!(
                    "  {:<6} {:<12} {:<26} {}",
                    resource.id,
                    resource.kind.label(),
                    resource.category.label(),
                    resource.title
                );
            }
        }

        Command::Messages { search } => {
            let projection = views::conversations(&entities, &search);
            println!(
                "Sin leer: {}",
                views::unread_total(entities.conversations().records())
            );
            for conversation in projection.iter() {
                let preview = conversation
                    .last_message
                    .as_ref()
                    .map(|m| m.content.as_str())
                    .unwrap_or("");
                println!(
                    "  {:<22} ({}) {}",
                    conversation.participant_name, conversation.unread_count, preview
                );
            }
        }

        Command::Dashboard => {
            let Some(user) = auth.current_user() else {
                anyhow::bail!("Not signed in");
            };
            println!("Hola, {}", user.display_name());
            match user.role {
                Role::Dentist => {
                    let dashboard = views::dentist_dashboard(&entities, &user.id, today);
                    let summary = dashboard.summary;
                    println!("Pacientes: {}", summary.total_patients);
                    println!("Citas hoy: {}", summary.today_appointments);
                    println!("Tratamientos pendientes: {}", summary.pending_treatments);
                    println!("Pagos pendientes: {}", summary.outstanding_payments);
                    for appointment in &dashboard.today {
                        println!(
                            "  {}  {:<20} {}",
                            hm(appointment.start_time()),
                            appointment.patient_name,
                            appointment.status.label()
                        );
                    }
                }
                Role::Patient => {
                    let dashboard = views::patient_dashboard(&entities, &user.id, now);
                    match dashboard.next_appointment {
                        Some(next) => println!(
                            "Próxima cita: {} {} ({})",
                            next.day(),
                            hm(next.start_time()),
                            next.kind.label()
                        ),
                        None => println!("Próxima cita: -"),
                    }
                    for treatment in &dashboard.active_treatments {
                        println!(
                            "  {:<24} {}/{} sesiones",
                            treatment.title,
                            treatment.completed_sessions,
                            treatment.estimated_sessions
                        );
                    }
                }
            }
        }
    }

    Ok(())
}
