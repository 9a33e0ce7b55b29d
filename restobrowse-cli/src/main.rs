//! restobrowse CLI: one-shot queries against the restaurant API.
//!
//! Commands:
//! - `list`: paginated listing with optional filters
//! - `show`: a single restaurant by id
//! - `search`: restaurants whose name matches
//! - `nearby`: restaurants within a range of a point
//! - `image`: classify a food photo and list matching restaurants

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use restobrowse_core::{
    ClientConfig, HttpApi, ImageUpload, ListController, PerPage, RequestTicket, RestaurantApi,
    RestaurantDetail, RestaurantId,
};

#[derive(Parser)]
#[command(name = "restobrowse", about = "restobrowse CLI: query the restaurant API")]
struct Cli {
    /// Backend base URL (overrides the config file).
    #[arg(long, global = true, env = "RESTOBROWSE_API_URL")]
    api_url: Option<String>,

    /// Config file path.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print raw JSON instead of a table.
    #[arg(long, global = true, default_value_t = false)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List restaurants, optionally filtered.
    List {
        #[arg(long, default_value_t = 1)]
        page: u32,

        /// Results per page: 10, 20 or 50.
        #[arg(long)]
        per_page: Option<u32>,

        #[arg(long)]
        country_code: Option<String>,

        /// Average cost for two.
        #[arg(long)]
        average_spent: Option<f64>,

        /// Cuisine filter; repeat for several.
        #[arg(long = "cuisine")]
        cuisines: Vec<String>,
    },
    /// Show one restaurant.
    Show { id: RestaurantId },
    /// Search restaurants by name.
    Search { name: String },
    /// Restaurants near a point.
    Nearby {
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,
        /// Range in kilometres (truncated to whole km).
        #[arg(long)]
        range: f64,
    },
    /// Upload a food photo; list restaurants serving the predicted cuisines.
    Image { path: PathBuf },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging();

    let config = ClientConfig::load_or_default(cli.config.as_deref())?
        .with_api_url(cli.api_url)?;
    let api = HttpApi::new(&config)?;
    tracing::debug!(api = %config.api_base_url, "client ready");

    let out = Output { json: cli.json };
    let mut list = ListController::new(None, config.default_per_page);

    match cli.command {
        Commands::List {
            page,
            per_page,
            country_code,
            average_spent,
            cuisines,
        } => {
            if let Some(n) = per_page {
                let Some(pp) = PerPage::from_value(n) else {
                    bail!("--per-page must be one of 10, 20, 50 (got {n})");
                };
                let _ = list.set_per_page(pp);
            }
            list.set_country_code(country_code);
            let average_spent = average_spent
                .map(|v| finite("--average-spent", v))
                .transpose()?;
            list.set_average_spent(average_spent);
            for c in &cuisines {
                let _ = list.add_cuisine(c);
            }
            let _ = list.set_page(page);
            let ticket = list.apply_filters();
            run(&api, &mut list, ticket)?;
        }
        Commands::Show { id } => {
            let detail = api.detail(id)?;
            out.detail(&detail)?;
            return Ok(());
        }
        Commands::Search { name } => {
            list.set_search_name(name);
            let Some(ticket) = list.search_by_name() else {
                bail!("search name must not be blank");
            };
            run(&api, &mut list, ticket)?;
        }
        Commands::Nearby { lat, lon, range } => {
            list.set_latitude(Some(finite("--lat", lat)?));
            list.set_longitude(Some(finite("--lon", lon)?));
            list.set_range(Some(finite("--range", range)?));
            let Some(ticket) = list.search_nearby() else {
                bail!("--lat, --lon and --range are all required");
            };
            run(&api, &mut list, ticket)?;
        }
        Commands::Image { path } => {
            let image = ImageUpload::from_path(&path)
                .with_context(|| format!("failed to read image {}", path.display()))?;
            list.select_image(image);
            let Some(ticket) = list.search_by_image() else {
                bail!("no image selected");
            };
            run(&api, &mut list, ticket)?;
            match list.dish_info() {
                Some(dish) => eprintln!(
                    "Predicted {}: {}",
                    dish.predicted_food,
                    dish.cuisines.join(", ")
                ),
                None => eprintln!("The classifier returned no usable prediction."),
            }
        }
    }

    out.list(&list)
}

/// Execute a ticket and any follow-up it produces (an image verdict
/// triggers a filtered listing).
fn run(api: &HttpApi, list: &mut ListController, first: RequestTicket) -> Result<()> {
    let mut next = Some(first);
    while let Some(RequestTicket { token, mode }) = next {
        tracing::info!(%token, kind = mode.kind().label(), "executing");
        next = list.apply(token, api.execute(&mode));
    }
    if let Some(err) = list.last_error() {
        bail!("{} request failed: {err}", err.category());
    }
    Ok(())
}

/// clap's f64 parser accepts `NaN` and `inf`; neither is a usable query value.
fn finite(flag: &str, value: f64) -> Result<f64> {
    if !value.is_finite() {
        bail!("{flag} must be a finite number (got {value})");
    }
    Ok(value)
}

fn init_logging() {
    let filter =
        EnvFilter::try_from_env("RESTOBROWSE_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

struct Output {
    json: bool,
}

impl Output {
    fn list(&self, list: &ListController) -> Result<()> {
        let results = list.results();
        if self.json {
            println!("{}", serde_json::to_string_pretty(&results.items)?);
            return Ok(());
        }

        let q = list.query();
        println!(
            "{} restaurants (page {}/{}, {} per page)",
            results.total,
            q.page(),
            list.total_pages(),
            q.per_page()
        );
        println!();
        println!(
            "{:>8}  {:<32} {:>6} {:>10}  {}",
            "ID", "Name", "Rating", "Cost/2", "Cuisines"
        );
        for r in &results.items {
            let rating = r
                .aggregate_rating
                .map(|v| format!("{v:.1}"))
                .unwrap_or_else(|| "-".into());
            let cost = r
                .average_cost_for_two
                .map(|v| format!("{v:.0}"))
                .unwrap_or_else(|| "-".into());
            println!(
                "{:>8}  {:<32} {:>6} {:>10}  {}",
                r.id,
                r.name,
                rating,
                cost,
                r.cuisines.join(", ")
            );
        }
        Ok(())
    }

    fn detail(&self, r: &RestaurantDetail) -> Result<()> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(r)?);
            return Ok(());
        }

        let yes_no = |flag: Option<bool>| match flag {
            Some(true) => "yes",
            Some(false) => "no",
            None => "-",
        };

        println!("{} (#{})", r.name, r.id);
        println!("{}", r.address);
        println!();
        println!(
            "  Rating:          {} {} ({} votes)",
            r.aggregate_rating
                .map(|v| format!("{v:.1}"))
                .unwrap_or_else(|| "-".into()),
            r.rating_text.as_deref().unwrap_or(""),
            r.votes.unwrap_or(0)
        );
        println!("  Cuisines:        {}", r.cuisines.join(", "));
        if let Some(cost) = r.average_cost_for_two {
            println!(
                "  Cost for two:    {cost:.0} {}",
                r.currency.as_deref().unwrap_or("")
            );
        }
        println!("  Table booking:   {}", yes_no(r.has_table_booking));
        println!("  Online delivery: {}", yes_no(r.has_online_delivery));
        println!("  Delivering now:  {}", yes_no(r.is_delivering_now));
        println!("  Order menu:      {}", yes_no(r.switch_to_order_menu));
        if let Some(city) = &r.city {
            println!("  City:            {city}");
        }
        if let (Some(lat), Some(lon)) = (r.latitude, r.longitude) {
            println!("  Coordinates:     {lat:.5}, {lon:.5}");
        }
        Ok(())
    }
}
