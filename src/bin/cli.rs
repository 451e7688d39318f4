// src/bin/cli.rs

//! CardX CLI
//!
//! Local entry point for catalogue search, appointment booking and
//! pilgrimage applications against the configured backend.

use std::path::{Path, PathBuf};
use std::time::Duration;

use cardx::{
    backend::{BookingBackend, HttpBackend},
    config,
    error::{AppError, Result},
    models::{AppointmentType, Appointment, Catalog, Config, PilgrimageApplication, ServiceType},
    services::{
        AppointmentController, Carousel, PilgrimageController, PilgrimageOutcome, SearchIndex,
        SearchSession, SlotUpdate, SubmitOutcome,
        appointment::{cancel_appointment, find_appointment},
    },
    storage::{ConfirmationHandoff, LocalStore},
    utils::{date, log as console},
};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

/// CardX Academia - consulting site booking client
#[derive(Parser, Debug)]
#[command(
    name = "cardx",
    version,
    about = "Catalogue search and booking client for CardX Academia"
)]
struct Cli {
    /// Directory holding config.toml, catalog.toml and session data
    #[arg(short, long, default_value = "data")]
    data_dir: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Search services, pages and testimonials
    Search {
        query: String,

        /// Follow result N (1-based) and print its destination
        #[arg(long)]
        select: Option<usize>,
    },

    /// List bookable time slots
    Slots(SlotArgs),

    /// Book an appointment
    Book(BookArgs),

    /// Show an appointment
    Show { id: String },

    /// Cancel an appointment
    Cancel { id: String },

    /// Submit a pilgrimage application from a TOML file
    Pilgrimage {
        #[arg(long)]
        file: PathBuf,
    },

    /// Show the last submitted pilgrimage application (read once)
    Confirmation,

    /// Browse testimonials
    Testimonials,

    /// Check backend health
    Health,

    /// Validate configuration and catalogue
    Validate,
}

#[derive(Args, Debug)]
struct SlotArgs {
    /// Date as YYYY-MM-DD (default: today)
    #[arg(long, value_parser = parse_date)]
    date: Option<NaiveDate>,

    /// Service type, e.g. visa_consultation
    #[arg(long)]
    service: Option<ServiceType>,

    /// in_person or virtual
    #[arg(long = "type", default_value = "in_person")]
    appointment_type: AppointmentType,
}

#[derive(Args, Debug)]
struct BookArgs {
    #[command(flatten)]
    slot: SlotArgs,

    /// Time label from `cardx slots`, e.g. 09:30
    #[arg(long)]
    time: String,

    #[arg(long)]
    name: String,

    #[arg(long)]
    email: String,

    #[arg(long)]
    phone: String,

    /// Meeting length in minutes (30, 45, 60 or 90)
    #[arg(long)]
    duration: Option<u32>,

    /// Consultant name, or "any"
    #[arg(long)]
    worker: Option<String>,

    /// Meeting location for in-person appointments
    #[arg(long)]
    location: Option<String>,

    #[arg(long, default_value = "")]
    notes: String,
}

fn parse_date(value: &str) -> Result<NaiveDate> {
    date::parse_iso(value)
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool, level: &str) {
    let level = if verbose { "debug" } else { level };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let (config, catalog) = match config::load_all(&cli.data_dir) {
        Ok(loaded) => loaded,
        Err(e) => {
            init_logging(cli.verbose, "info");
            console::error(&format!("Failed to load configuration: {e}"));
            std::process::exit(2);
        }
    };
    init_logging(cli.verbose, &config.logging.level);
    log::debug!("Loaded configuration from {}", cli.data_dir.display());

    if let Err(e) = run(cli, config, catalog).await {
        report(&e);
        std::process::exit(1);
    }
}

fn report(error: &AppError) {
    match error {
        AppError::Fields(fields) => {
            console::error("Please correct the following fields:");
            for (field, message) in fields {
                console::sub_item(&format!("{field}: {message}"));
            }
        }
        other => {
            console::error(&other.user_message(&other.to_string()));
            if other.is_retryable() {
                console::sub_item("The request can be retried.");
            }
        }
    }
}

async fn run(cli: Cli, config: Config, catalog: Catalog) -> Result<()> {
    match cli.command {
        Command::Search { query, select } => search(&catalog, &query, select),

        Command::Slots(args) => {
            let backend = HttpBackend::new(&config.api)?;
            let mut controller = AppointmentController::new(config.booking.clone(), date::today());
            prepare_slots(&mut controller, &args, &backend).await?;
            print_slots(&controller);
            Ok(())
        }

        Command::Book(args) => {
            let backend = HttpBackend::new(&config.api)?;
            book(&config, &backend, args).await
        }

        Command::Show { id } => {
            let backend = HttpBackend::new(&config.api)?;
            let appointment = find_appointment(&backend, &id).await?;
            print_appointment("Appointment", &appointment);
            Ok(())
        }

        Command::Cancel { id } => {
            let backend = HttpBackend::new(&config.api)?;
            let appointment = cancel_appointment(&backend, &id).await?;
            print_appointment("Cancelled appointment", &appointment);
            Ok(())
        }

        Command::Pilgrimage { file } => {
            let backend = HttpBackend::new(&config.api)?;
            let store = session_store(&cli.data_dir, &config);
            pilgrimage(&backend, &store, &file).await
        }

        Command::Confirmation => {
            let store = session_store(&cli.data_dir, &config);
            let summary = ConfirmationHandoff::new(&store).read().await;

            console::header("Application Submitted");
            if summary.has_details() {
                let mut items = vec![
                    ("Name", summary.full_name.clone()),
                    ("Email", summary.email.clone()),
                    ("Phone", summary.phone.clone()),
                ];
                if let Some(id) = &summary.booking_id {
                    items.push(("Booking", id.clone()));
                }
                console::summary("Application details", &items);
            } else {
                console::info("Thank you. Your application has been received.");
            }
            console::info("Our team will review your application and contact you within 2-3 business days.");
            console::sub_item(&format!(
                "Questions: {} / {}",
                catalog.contact.email, catalog.contact.phone
            ));
            Ok(())
        }

        Command::Testimonials => {
            testimonials(&catalog);
            Ok(())
        }

        Command::Health => {
            let backend = HttpBackend::new(&config.api)?;
            let health = backend.health().await?;
            console::summary(
                "Backend health",
                &[
                    ("Status", health.status.clone()),
                    ("Server", health.server.clone()),
                    ("Database", health.database.clone()),
                    ("Email", health.email_service.clone()),
                ],
            );
            if !health.is_healthy() {
                log::warn!("Backend reports status '{}'", health.status);
            }
            Ok(())
        }

        Command::Validate => {
            // load_all already validated both; report what was checked.
            console::success(&format!(
                "Config OK (backend: {})",
                config.api.base_url.as_deref().unwrap_or("not configured")
            ));
            console::success(&format!(
                "Catalog OK ({} services, {} pages, {} testimonials, {} keywords)",
                catalog.services.len(),
                catalog.nav_links.len(),
                catalog.testimonials.len(),
                catalog.keywords.len()
            ));
            Ok(())
        }
    }
}

fn search(catalog: &Catalog, query: &str, select: Option<usize>) -> Result<()> {
    let index = SearchIndex::new(catalog);
    let mut session = SearchSession::new();
    session.set_query(query);

    let results = session.results(&index);
    if results.is_empty() {
        console::info(&format!("No results for '{}'", query.trim()));
        return Ok(());
    }

    console::header(&format!("Results for '{}'", query.trim()));
    for (i, result) in results.iter().enumerate() {
        console::info(&format!(
            "{:>2}. {}",
            i + 1,
            result.format("[{type}] {title} -> {href} (relevance {relevance})")
        ));
        console::sub_item(&result.description);
    }

    if let Some(n) = select {
        let href = n
            .checked_sub(1)
            .and_then(|position| session.select(&index, position))
            .ok_or_else(|| AppError::validation(format!("No result number {n}")))?;
        console::success(&format!("Navigate to {href}"));
    }
    Ok(())
}

/// Apply slot arguments to the controller and load the slot set.
async fn prepare_slots(
    controller: &mut AppointmentController,
    args: &SlotArgs,
    backend: &dyn BookingBackend,
) -> Result<()> {
    if let Some(day) = args.date {
        controller.select_date(day)?;
    }
    if let Some(service) = args.service {
        controller.set_service_type(service);
    }
    controller.set_appointment_type(args.appointment_type);

    match controller.load_slots(backend).await {
        SlotUpdate::Failed { message } => Err(AppError::validation(message)),
        _ => Ok(()),
    }
}

fn print_slots(controller: &AppointmentController) {
    let query = controller.slot_query();
    console::header(&format!(
        "{} - {} ({})",
        date::display(query.date),
        query.service_type.label(),
        query.appointment_type.label()
    ));
    let slots = controller.slots().slots();
    if slots.is_empty() {
        console::info("No available time slots for this date");
    } else {
        console::info(&slots.join("  "));
    }
}

async fn book(config: &Config, backend: &dyn BookingBackend, args: BookArgs) -> Result<()> {
    let mut controller = AppointmentController::new(config.booking.clone(), date::today());
    prepare_slots(&mut controller, &args.slot, backend).await?;

    controller.set_name(args.name);
    controller.set_email(args.email);
    controller.set_phone(args.phone);
    controller.set_description(args.notes);
    if let Some(minutes) = args.duration {
        controller.set_duration(minutes)?;
    }
    if let Some(worker) = args.worker {
        controller.set_worker(worker);
    }
    if let Some(location) = args.location {
        controller.set_location(location);
    }
    if let Err(e) = controller.select_time(&args.time) {
        print_slots(&controller);
        return Err(e);
    }

    match controller.submit(backend).await? {
        SubmitOutcome::Submitted { appointment_id } => {
            console::success("Appointment booked");
            console::summary("Confirmation", &[("Appointment ID", appointment_id)]);
            Ok(())
        }
        SubmitOutcome::Rejected { message, refetch } => {
            if refetch.is_some() {
                print_slots(&controller);
            }
            Err(AppError::validation(message))
        }
    }
}

fn print_appointment(title: &str, appointment: &Appointment) {
    let details = &appointment.appointment;
    let mut items = vec![
        ("ID", appointment.id.clone()),
        ("Status", format!("{:?}", appointment.status)),
        ("Name", appointment.customer.name.clone()),
        ("Email", appointment.customer.email.clone()),
        ("Date", date::display(details.date)),
        ("Time", details.time.clone()),
        ("Type", details.appointment_type.label().to_string()),
        ("Service", details.service_type.label().to_string()),
        ("Duration", format!("{} minutes", details.duration)),
    ];
    if let Some(location) = &details.location {
        items.push(("Location", location.clone()));
    }
    console::summary(title, &items);
}

fn session_store(data_dir: &Path, config: &Config) -> LocalStore {
    LocalStore::new(
        config.session_dir(data_dir),
        Duration::from_secs(config.session.ttl_secs),
    )
}

async fn pilgrimage(backend: &dyn BookingBackend, store: &LocalStore, file: &Path) -> Result<()> {
    let content = std::fs::read_to_string(file)?;
    let application: PilgrimageApplication = toml::from_str(&content)?;
    let mut controller = PilgrimageController::with_application(application)?;

    match controller.submit(backend, store).await? {
        PilgrimageOutcome::Submitted { booking_id, route } => {
            console::success(&format!("Application {booking_id} submitted"));
            console::sub_item(&format!("Next: {route} (run `cardx confirmation`)"));
            Ok(())
        }
        PilgrimageOutcome::Rejected { message } => Err(AppError::validation(message)),
    }
}

fn testimonials(catalog: &Catalog) {
    let mut carousel = Carousel::new(&catalog.testimonials);
    if carousel.is_empty() {
        console::info("No testimonials");
        return;
    }

    console::header("Testimonials");
    for _ in 0..carousel.len() {
        if let Some(t) = carousel.current() {
            let badge = if t.scholarship { " [scholarship]" } else { "" };
            console::info(&format!(
                "{}/{} {} ({}){}",
                carousel.index() + 1,
                carousel.len(),
                t.name,
                t.country,
                badge
            ));
            console::sub_item(&t.testimonial);
        }
        carousel.next();
    }

    let videos = carousel.featured_videos();
    if !videos.is_empty() {
        console::separator();
        for t in videos {
            console::info(&format!(
                "Video: {} - {}",
                t.name,
                t.video.as_deref().unwrap_or("")
            ));
        }
    }
}
