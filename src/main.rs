use ffcs_timetable::config::Config;
use ffcs_timetable::display::{format_conflict, print_conflicts, print_grid, write_grid_to_file};
use ffcs_timetable::export::export_grid_to_csv;
use ffcs_timetable::parser::load_registrations;
use ffcs_timetable::timetable::generate;
use ffcs_timetable::{web, TimetableError};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(true)
        .init();

    let mut config = Config::load();
    let args: Vec<String> = std::env::args().collect();

    // Web mode: ffcs-timetable web [port]
    if args.len() > 1 && args[1] == "web" {
        if let Some(port) = args.get(2).and_then(|p| p.parse::<u16>().ok()) {
            config.port = port;
        }
        println!("Access the API at http://localhost:{}/api/registrations", config.port);
        web::start_server(config).await?;
        return Ok(());
    }

    // CLI mode: ffcs-timetable <registrations.csv>
    let Some(csv_path) = args.get(1) else {
        eprintln!("Usage: ffcs-timetable <registrations.csv> | ffcs-timetable web [port]");
        std::process::exit(2);
    };

    println!("Loading registrations from {}...", csv_path);
    let loaded = load_registrations(csv_path)?;
    println!(
        "Loaded {} course(s), skipped {} incomplete row(s)",
        loaded.store.committed().len(),
        loaded.skipped
    );

    for (course_number, outcome) in &loaded.outcomes {
        if !outcome.unresolved_slots.is_empty() {
            println!(
                "⚠️  Course {}: unknown slot code(s) {} will not be scheduled",
                course_number,
                outcome.unresolved_slots.join(", ")
            );
        }
        for conflict in &outcome.conflicts {
            println!("⚠️  Course {} clashes: {}", course_number, format_conflict(conflict));
        }
    }

    println!("\n\n=== Generating Timetable ===");
    match generate(&loaded.store.committed()) {
        Ok(grid) => {
            print_grid(&grid);

            let text_path = config.export_dir.join("timetable.txt");
            let csv_out = config.export_dir.join("timetable.csv");
            write_grid_to_file(&grid, &text_path)?;
            export_grid_to_csv(&grid, &csv_out)?;
            println!("\nTimetable saved to:");
            println!("  - {}", text_path.display());
            println!("  - {}", csv_out.display());
        }
        Err(TimetableError::ConflictDetected { conflicts }) => {
            println!("Timetable not generated.");
            print_conflicts(&conflicts);
            std::process::exit(1);
        }
        Err(err) => return Err(err.into()),
    }

    Ok(())
}
