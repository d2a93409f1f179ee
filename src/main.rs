use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::debug;

use travelplanner::api::AppState;
use travelplanner::budget::BudgetBreakdown;
use travelplanner::itinerary::compose_itinerary;
use travelplanner::search::{FlightQuery, HotelQuery, PlaceQuery, parse_date};
use travelplanner::{
    Forecast, Planner, SessionState, TravelPlannerConfig, TravelPlannerError, logging, web,
};

#[derive(Parser)]
#[command(author, version, about = "Rule-based trip planner: flights, hotels, places, weather and budget", long_about = None)]
struct Cli {
    /// Path to a TOML config file
    #[arg(short, long, env = "TRAVELPLANNER_CONFIG")]
    config: Option<PathBuf>,

    /// Directory holding the catalog JSON files
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the JSON API for interactive planning sessions
    Serve {
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Find flights between two cities
    Flights {
        #[arg(long)]
        from: String,
        #[arg(long)]
        to: String,
        /// Travel date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<String>,
        /// price or duration
        #[arg(long, default_value = "price")]
        sort: String,
        /// Confirm the Nth flight and show its budget
        #[arg(long)]
        choose: Option<usize>,
    },
    /// Find hotels in a city
    Hotels {
        #[arg(long)]
        city: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        stars: Option<u8>,
        /// price or stars
        #[arg(long, default_value = "price")]
        sort: String,
        /// Confirm the Nth hotel
        #[arg(long, requires = "days")]
        choose: Option<usize>,
        /// Length of stay in days
        #[arg(long)]
        days: Option<u32>,
        /// Also build an itinerary for the stay
        #[arg(long)]
        itinerary: bool,
    },
    /// List places to visit in a city
    Places {
        #[arg(long)]
        city: String,
        #[arg(long = "type")]
        kind: Option<String>,
        #[arg(long)]
        name: Option<String>,
        /// rating or name
        #[arg(long, default_value = "rating")]
        sort: String,
        /// Build an itinerary over this many days
        #[arg(long)]
        days: Option<u32>,
    },
    /// Daily maximum temperatures for a supported city
    Weather {
        #[arg(long)]
        city: String,
        #[arg(long)]
        start: String,
        #[arg(long)]
        end: String,
    },
    /// Plan a full trip: flight, hotel, itinerary, weather and budget
    Trip {
        #[arg(long)]
        from: String,
        #[arg(long)]
        to: String,
        #[arg(long)]
        date: Option<String>,
        /// Which flight to take (1-based)
        #[arg(long, default_value_t = 1)]
        flight: usize,
        /// Which hotel to stay at (1-based)
        #[arg(long, default_value_t = 1)]
        hotel: usize,
        #[arg(long)]
        days: u32,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            match e.downcast_ref::<TravelPlannerError>() {
                Some(err) => eprintln!("{}", err.user_message()),
                None => eprintln!("Error: {e:#}"),
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = TravelPlannerConfig::load_from_path(cli.config)?;
    if cli.verbose {
        config.logging.level = "debug".to_string();
    }
    if let Some(data_dir) = cli.data_dir {
        config.catalog.data_dir = data_dir;
    }
    logging::init(&config.logging)?;
    debug!("Using catalogs from {}", config.catalog.data_dir.display());

    let planner = Planner::from_config(&config)?;

    match cli.command {
        Commands::Serve { port } => {
            if let Some(port) = port {
                config.server.port = port;
            }
            let state = AppState::from_config(planner, &config.server);
            web::run(&config.server, state).await?;
        }
        Commands::Flights {
            from,
            to,
            date,
            sort,
            choose,
        } => {
            let mut query = FlightQuery::new(from, &to).sorted_by(sort.parse()?);
            query.date = date;
            let result = planner.find_flights(&query)?;
            if let Some(message) = result.message() {
                println!("{message}");
            }
            let mut session = SessionState::new();
            session.set_flight_results(&to, result.flights);
            print_numbered("Available Flights", session.flights.as_deref());

            if let Some(choice) = choose {
                let flight = session.confirm_flight(choice)?.clone();
                print_budget(&planner.flight_budget(&flight));
            }
        }
        Commands::Hotels {
            city,
            name,
            stars,
            sort,
            choose,
            days,
            itinerary,
        } => {
            let mut query = HotelQuery::new(&city).sorted_by(sort.parse()?);
            query.name = name;
            query.stars = stars;
            let mut session = SessionState::new();
            session.set_hotel_results(&city, planner.search_hotels(&query)?);
            if session.hotels.is_none() {
                println!("No hotels available for this city. We are sorry for the inconvenience.");
                return Ok(());
            }
            print_numbered("Available Hotels", session.hotels.as_deref());

            if let (Some(choice), Some(days)) = (choose, days) {
                session.confirm_hotel(choice)?;
                session.set_days(days)?;
                let plan = planner.plan_stay(&session, days, itinerary)?;
                if let Some(itinerary) = &plan.itinerary {
                    println!("\nYour Itinerary\n{itinerary}");
                }
                print_budget(&plan.budget);
            }
        }
        Commands::Places {
            city,
            kind,
            name,
            sort,
            days,
        } => {
            let mut query = PlaceQuery::new(city).sorted_by(sort.parse()?);
            query.kind = kind;
            query.name = name;
            let places = planner.search_places(&query)?;
            if places.is_empty() {
                println!(
                    "Currently not showing tourist attraction spots for this city. We are sorry for the inconvenience."
                );
                return Ok(());
            }
            println!("Places to Visit");
            for place in &places {
                println!("{place}");
            }
            if let Some(days) = days {
                println!("\nYour Itinerary\n{}", compose_itinerary(&places, days)?);
            }
        }
        Commands::Weather { city, start, end } => {
            let forecast = planner
                .forecast(&city, parse_date(&start)?, parse_date(&end)?)
                .await?;
            print_forecast(&forecast);
        }
        Commands::Trip {
            from,
            to,
            date,
            flight,
            hotel,
            days,
        } => {
            let mut query = FlightQuery::new(from, &to);
            query.date = date;
            let result = planner.find_flights(&query)?;
            if let Some(message) = result.message() {
                println!("{message}");
            }

            let mut session = SessionState::new();
            session.set_flight_results(&to, result.flights);
            if session.flights.is_none() {
                return Ok(());
            }
            println!("Flight: {}", session.confirm_flight(flight)?);

            session.set_hotel_results(&to, planner.search_hotels(&HotelQuery::new(&to))?);
            println!("Hotel: {}", session.confirm_hotel(hotel)?);
            session.set_days(days)?;

            let plan = planner.plan_trip(&session, days).await?;
            println!("\nYour Itinerary\n{}", plan.itinerary);
            print_forecast(&plan.forecast);
            print_budget(&plan.budget);
        }
    }
    Ok(())
}

fn print_numbered<T: std::fmt::Display>(title: &str, items: Option<&[T]>) {
    let Some(items) = items else {
        return;
    };
    println!("{title}");
    for (i, item) in items.iter().enumerate() {
        println!("{}. {item}", i + 1);
    }
}

fn print_forecast(forecast: &Forecast) {
    println!("Weather Forecast");
    match forecast.days() {
        Some(days) => {
            for day in days {
                println!("{day}");
            }
        }
        None => println!("Weather data not available."),
    }
}

fn print_budget(budget: &BudgetBreakdown) {
    println!("\nEstimated Budget");
    for line in budget.lines() {
        println!("{line}");
    }
}
