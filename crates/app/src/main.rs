use chrono::Utc;
use clap::{Parser, Subcommand};
use restaurant_picker_core::stores::nominatim::DEFAULT_NOMINATIM_URL;
use restaurant_picker_core::{
    acquire_first_fix, CoordinateSignal, Dialer, FixedLocation, HandoffError, LaunchRequest,
    LocationProvider, MapLauncher, NominatimLookup, PickerSession, PlaceLookup,
    RestaurantSearchEngine, SearchCriteria, SearchFailure, SelectedRestaurant, StaticPlaces,
    UnavailableLocation, WebBrowser,
};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use url::Url;

#[derive(Parser)]
#[command(name = "restaurant-picker", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Nominatim base URL used for place lookups
    #[arg(long, env = "RESTAURANT_PICKER_NOMINATIM_URL", default_value = DEFAULT_NOMINATIM_URL)]
    nominatim_url: String,

    /// User agent sent to the lookup service
    #[arg(long, env = "RESTAURANT_PICKER_USER_AGENT", default_value = concat!("restaurant-picker/", env!("CARGO_PKG_VERSION")))]
    user_agent: String,

    /// Offline JSON catalog of places; replaces the HTTP lookup when set
    #[arg(long, env = "RESTAURANT_PICKER_PLACES_FILE")]
    places_file: Option<PathBuf>,

    /// Current latitude
    #[arg(long, env = "RESTAURANT_PICKER_LATITUDE", allow_hyphen_values = true)]
    latitude: Option<f64>,

    /// Current longitude
    #[arg(long, env = "RESTAURANT_PICKER_LONGITUDE", allow_hyphen_values = true)]
    longitude: Option<f64>,
}

#[derive(Subcommand)]
enum Command {
    /// Pick a random restaurant near the current location.
    Pick {
        /// Food type; a random cuisine is used when empty.
        #[arg(long, default_value = "")]
        food_type: String,
        /// Search radius in miles; 5.5 when empty or not a number.
        #[arg(long, default_value = "", allow_hyphen_values = true)]
        radius: String,
        /// Number of picks with the same criteria.
        #[arg(long, default_value = "1")]
        picks: usize,
        /// Dial the last picked restaurant.
        #[arg(long, default_value_t = false)]
        call: bool,
        /// Open the last picked restaurant in a map application.
        #[arg(long, default_value_t = false)]
        open_map: bool,
        /// Search the web for the last picked restaurant.
        #[arg(long, default_value_t = false)]
        web_search: bool,
    },
}

struct PickOptions {
    picks: usize,
    call: bool,
    open_map: bool,
    web_search: bool,
}

/// Prints each hand-off instead of launching an external application.
struct ConsoleHandoff;

impl Dialer for ConsoleHandoff {
    fn dial(&self, target: &Url) -> Result<(), HandoffError> {
        println!("  call: {target}");
        Ok(())
    }
}

impl MapLauncher for ConsoleHandoff {
    fn launch(&self, request: &LaunchRequest) -> Result<(), HandoffError> {
        println!(
            "  map: {} at {:.6},{:.6} span={}m",
            request.name, request.coordinate.latitude, request.coordinate.longitude, request.span_meters
        );
        Ok(())
    }
}

impl WebBrowser for ConsoleHandoff {
    fn open(&self, url: &Url) -> Result<(), HandoffError> {
        println!("  web: {url}");
        Ok(())
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let app_version = env!("CARGO_PKG_VERSION");

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(fmt::layer())
        .init();

    let cli = Cli::parse();
    info!(
        version = app_version,
        started_at = %Utc::now().to_rfc3339(),
        "restaurant-picker boot"
    );

    let provider: Box<dyn LocationProvider + Send + Sync> = match (cli.latitude, cli.longitude) {
        (Some(latitude), Some(longitude)) => Box::new(FixedLocation::new(latitude, longitude)),
        _ => Box::new(UnavailableLocation {
            reason: "set --latitude and --longitude".to_string(),
        }),
    };

    match cli.command {
        Command::Pick {
            food_type,
            radius,
            picks,
            call,
            open_map,
            web_search,
        } => {
            let criteria = SearchCriteria::from_input(&food_type, &radius);
            let options = PickOptions {
                picks,
                call,
                open_map,
                web_search,
            };
            info!(food_type = %criteria.food_type, radius_miles = criteria.radius_miles, "search criteria");

            let signal = CoordinateSignal::new();
            if let Err(failure) = acquire_first_fix(provider.as_ref(), &signal).await {
                println!("Unable to access your current location ({failure})");
                return Ok(());
            }

            match &cli.places_file {
                Some(path) => {
                    let places = StaticPlaces::from_json_file(path)
                        .await
                        .map_err(|error| anyhow::anyhow!(error.to_string()))?;
                    info!(path = %path.display(), places = places.len(), "using offline catalog");
                    run_picks(places, criteria, signal, &options).await;
                }
                None => {
                    let lookup = NominatimLookup::new(&cli.nominatim_url, &cli.user_agent)
                        .map_err(|error| anyhow::anyhow!(error.to_string()))?;
                    run_picks(lookup, criteria, signal, &options).await;
                }
            }
        }
    }

    Ok(())
}

async fn run_picks<L>(lookup: L, criteria: SearchCriteria, signal: CoordinateSignal, options: &PickOptions)
where
    L: PlaceLookup + Send + Sync,
{
    let session = PickerSession::new(RestaurantSearchEngine::new(lookup), criteria, signal);

    for _ in 0..options.picks.max(1) {
        match session.next_restaurant().await {
            Ok(restaurant) => print_restaurant(&restaurant),
            Err(failure) => report(&failure),
        }
    }

    let Some(restaurant) = session.current() else {
        return;
    };
    let handoff = ConsoleHandoff;
    if options.call {
        if let Err(failure) = restaurant.call(&handoff) {
            report(&failure);
        }
    }
    if options.open_map {
        if let Err(failure) = restaurant.open_in_maps(&handoff) {
            report(&failure);
        }
    }
    if options.web_search {
        if let Err(failure) = restaurant.search_web(&handoff) {
            report(&failure);
        }
    }
}

fn print_restaurant(restaurant: &SelectedRestaurant) {
    let region = restaurant.display_region();
    println!("{}", restaurant.name);
    println!("  address: {}", restaurant.formatted_address);
    println!("  phone: {}", restaurant.phone_number);
    println!(
        "  location: {:.6},{:.6} (span {}°x{}°)",
        region.center.latitude, region.center.longitude, region.latitude_delta, region.longitude_delta
    );
}

fn report(failure: &SearchFailure) {
    match failure.notice() {
        Some(notice) => {
            println!("{}: {} [{}]", notice.title, notice.message, notice.acknowledge);
        }
        None => warn!(failure = %failure, "action failed"),
    }
}
