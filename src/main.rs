use std::process;
use std::time::Duration;

use clap::Parser;

use flightdash::dashboard::{self, Dashboard, StderrIndicator};
use flightdash::error::DashboardError;
use flightdash::fetch::{FetchOptions, FlightApi, HttpApi, DEFAULT_API_URL};
use flightdash::filter::FilterInput;
use flightdash::logging::{init_logging, Verbosity};
use flightdash::page::{WorkingSet, DEFAULT_FLIGHTS_PER_PAGE};
use flightdash::table;
use flightdash::view::{DetailView, StatsCards};

#[derive(Parser)]
#[command(
    name = "flightdash",
    about = "Watch a flight-tracking API from the terminal",
    version,
    after_help = "\
Examples:
  flightdash watch
  flightdash watch --altitude-max 3000 --per-page 10
  flightdash flights --distance-max 1.5 --page 2
  flightdash flights --tracking-number 3c6 --json --pretty
  flightdash show 3 --speed-min 150
  flightdash stats --api-url http://tracker.local:8080/api"
)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args)]
struct GlobalArgs {
    #[arg(
        long,
        global = true,
        env = "FLIGHTDASH_API_URL",
        default_value = DEFAULT_API_URL,
        value_name = "URL",
        help = "Base URL of the flight API"
    )]
    api_url: String,

    #[arg(long, global = true, default_value = "30", value_name = "SECS", help = "Request timeout")]
    timeout: u64,

    #[arg(long, global = true, value_name = "URL", help = "HTTP or SOCKS5 proxy")]
    proxy: Option<String>,

    #[arg(short, long, global = true, action = clap::ArgAction::Count, help = "More log output (-vv for trace)")]
    verbose: u8,

    #[arg(short, long, global = true, help = "Only log errors")]
    quiet: bool,
}

#[derive(clap::Subcommand)]
enum Commands {
    #[command(
        about = "Live dashboard that refreshes on a timer",
        long_about = "Live dashboard: stats, closest/lowest/fastest aircraft and a paged flight table.\n\
            Reloads every --interval seconds. Type commands on stdin to page, filter and\n\
            inspect flights; type help for the list.",
        after_help = "\
Examples:
  Everything:      flightdash watch
  Low traffic:     flightdash watch --altitude-max 3000
  Faster refresh:  flightdash watch --interval 10 --per-page 50"
    )]
    Watch(WatchArgs),

    #[command(about = "Load once and print one page of flights")]
    Flights(FlightsArgs),

    #[command(about = "Print summary statistics")]
    Stats(OutputArgs),

    #[command(about = "Print every detail of one flight")]
    Show(ShowArgs),
}

#[derive(clap::Args)]
struct FilterArgs {
    #[arg(long, value_name = "FT", help = "Minimum altitude in feet")]
    altitude_min: Option<String>,

    #[arg(long, value_name = "FT", help = "Maximum altitude in feet")]
    altitude_max: Option<String>,

    #[arg(long, value_name = "KM", help = "Minimum distance to target in km")]
    distance_min: Option<String>,

    #[arg(long, value_name = "KM", help = "Maximum distance to target in km")]
    distance_max: Option<String>,

    #[arg(long, value_name = "KTS", help = "Minimum ground speed in knots")]
    speed_min: Option<String>,

    #[arg(long, value_name = "KTS", help = "Maximum ground speed in knots")]
    speed_max: Option<String>,

    #[arg(long, value_name = "TEXT", help = "Match part of the ICAO24 address")]
    tracking_number: Option<String>,
}

impl FilterArgs {
    fn to_input(&self) -> FilterInput {
        let text = |v: &Option<String>| v.clone().unwrap_or_default();
        FilterInput {
            altitude_min: text(&self.altitude_min),
            altitude_max: text(&self.altitude_max),
            distance_min: text(&self.distance_min),
            distance_max: text(&self.distance_max),
            speed_min: text(&self.speed_min),
            speed_max: text(&self.speed_max),
            tracking_number: text(&self.tracking_number),
        }
    }
}

#[derive(clap::Args)]
struct PageArgs {
    #[arg(long, default_value_t = DEFAULT_FLIGHTS_PER_PAGE, value_name = "N", help = "Flights per page")]
    per_page: usize,

    #[arg(long, default_value = "1", value_name = "N", help = "Page to show")]
    page: usize,
}

#[derive(clap::Args)]
struct OutputArgs {
    #[arg(long, help = "Output as JSON")]
    json: bool,

    #[arg(long, help = "Output as pretty-printed JSON")]
    pretty: bool,
}

impl OutputArgs {
    fn is_json(&self) -> bool {
        self.json || self.pretty
    }
}

#[derive(clap::Args)]
struct WatchArgs {
    #[command(flatten)]
    filters: FilterArgs,

    #[arg(long, default_value_t = DEFAULT_FLIGHTS_PER_PAGE, value_name = "N", help = "Flights per page")]
    per_page: usize,

    #[arg(long, default_value = "30", value_name = "SECS", help = "Seconds between refreshes")]
    interval: u64,
}

#[derive(clap::Args)]
struct FlightsArgs {
    #[command(flatten)]
    filters: FilterArgs,

    #[command(flatten)]
    page: PageArgs,

    #[command(flatten)]
    output: OutputArgs,
}

#[derive(clap::Args)]
struct ShowArgs {
    #[arg(value_name = "ROW", help = "Row number on the page (as listed by `flights`)")]
    row: usize,

    #[command(flatten)]
    filters: FilterArgs,

    #[command(flatten)]
    page: PageArgs,

    #[command(flatten)]
    output: OutputArgs,
}

fn die(err: &DashboardError, json_mode: bool) -> ! {
    if json_mode {
        let json = serde_json::json!({
            "error": {
                "kind": err.kind(),
                "message": err.to_string(),
            }
        });
        println!("{json}");
    } else {
        eprintln!("error: {err}");
    }
    process::exit(err.exit_code());
}

fn print_json<T: serde::Serialize>(value: &T, pretty: bool) -> Result<(), DashboardError> {
    let output = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{output}");
    Ok(())
}

fn connect(global: &GlobalArgs) -> Result<HttpApi, DashboardError> {
    HttpApi::new(&FetchOptions {
        api_url: global.api_url.clone(),
        proxy: global.proxy.clone(),
        timeout: global.timeout,
    })
}

async fn load_page(
    global: &GlobalArgs,
    filters: &FilterArgs,
    page: &PageArgs,
) -> Result<Dashboard<HttpApi>, DashboardError> {
    let input = filters.to_input();
    input.parse()?;
    let set = WorkingSet::new(page.per_page)?;
    let mut dashboard = Dashboard::new(connect(global)?, set, input);
    dashboard.try_load().await?;
    dashboard.go_to_page(page.page)?;
    Ok(dashboard)
}

async fn run_flights(global: &GlobalArgs, args: &FlightsArgs) -> Result<(), DashboardError> {
    let dashboard = load_page(global, &args.filters, &args.page).await?;
    let model = dashboard.model();
    if args.output.is_json() {
        print_json(&model, args.output.pretty)
    } else {
        println!("{}", table::render(&model));
        Ok(())
    }
}

async fn run_show(global: &GlobalArgs, args: &ShowArgs) -> Result<(), DashboardError> {
    let mut dashboard = load_page(global, &args.filters, &args.page).await?;
    let flight = dashboard.show(args.row)?;
    if args.output.is_json() {
        print_json(flight, args.output.pretty)
    } else {
        println!("{}", table::render_detail(&DetailView::new(flight)));
        Ok(())
    }
}

async fn run_stats(global: &GlobalArgs, args: &OutputArgs) -> Result<(), DashboardError> {
    let api = connect(global)?;
    let stats = api.fetch_stats().await?;
    if args.is_json() {
        print_json(&stats, args.pretty)
    } else {
        println!("{}", table::render_stats(&StatsCards::from_stats(&stats)));
        Ok(())
    }
}

async fn run_watch(global: &GlobalArgs, args: &WatchArgs) -> Result<(), DashboardError> {
    if args.interval == 0 {
        return Err(DashboardError::Validation("--interval must be at least 1".into()));
    }
    let input = args.filters.to_input();
    input.parse()?;
    let set = WorkingSet::new(args.per_page)?;
    let api = connect(global)?;
    let title = format!("flightdash — {}", api.base_url());

    let mut dashboard = Dashboard::new(api, set, input).with_indicator(StderrIndicator);
    dashboard::watch(&mut dashboard, Duration::from_secs(args.interval), &title).await
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let global = &cli.global;
    init_logging(Verbosity::from_flags(global.verbose, global.quiet));

    let (result, json_mode) = match cli.command {
        Commands::Watch(ref args) => (run_watch(global, args).await, false),
        Commands::Flights(ref args) => (run_flights(global, args).await, args.output.is_json()),
        Commands::Stats(ref args) => (run_stats(global, args).await, args.is_json()),
        Commands::Show(ref args) => (run_show(global, args).await, args.output.is_json()),
    };

    if let Err(e) = result {
        die(&e, json_mode);
    }
}
