use crate::config::AppConfig;
use crate::db::{clear_all, count, ensure_schema, Database};
use crate::domain::{PriceRange, PropertyType, SearchFilter, TransactionMode};
use crate::errors::AppError;
use crate::map::{MapRenderer, NoopViewer, RenderOutcome, SystemViewer, Viewer};
use crate::pipeline::{run_snapshot, RunSummary};
use crate::prompts::Prompter;
use crate::remote::{CatalogClient, GeoClient, GeoEntry, HttpTransport, RemoteError, Transport};
use clap::{Args, Parser, Subcommand};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing::{info, warn};

const PREVIEW_SAMPLE: usize = 5;

#[derive(Debug, Parser)]
#[command(name = "listings-map")]
#[command(about = "Fetch classified real-estate listings and plot them on a map")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Fetch, store and render a fresh snapshot (default)
    Run(RunArgs),
    /// Re-render the map from the stored snapshot
    Render(OutputArgs),
    /// List the states of the configured country
    States,
    /// List the cities of a state
    Cities {
        #[arg(long)]
        state: String,
    },
    /// List the subcategories of a category
    Subcategories {
        #[arg(long)]
        category: Option<String>,
    },
}

#[derive(Debug, Clone, Default, Args)]
pub struct OutputArgs {
    /// SQLite file, or `:memory:`
    #[arg(long)]
    pub db: Option<PathBuf>,
    /// Where to write the HTML map
    #[arg(long)]
    pub output: Option<PathBuf>,
    /// Do not open the map after writing it
    #[arg(long)]
    pub no_open: bool,
}

impl OutputArgs {
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(db) = &self.db {
            config.db_path = db.clone();
        }
        if let Some(output) = &self.output {
            config.map_output_path = output.clone();
        }
        if self.no_open {
            config.open_viewer = false;
        }
    }
}

/// Selections left out are asked for interactively.
#[derive(Debug, Clone, Default, Args)]
pub struct RunArgs {
    #[arg(long)]
    pub state: Option<String>,
    #[arg(long)]
    pub city: Option<String>,
    #[arg(long, value_enum)]
    pub mode: Option<TransactionMode>,
    #[arg(long, value_enum)]
    pub property: Option<PropertyType>,
    /// Raw category id, takes precedence over `--property`
    #[arg(long)]
    pub category: Option<String>,
    #[arg(long)]
    pub price_min: Option<u64>,
    #[arg(long)]
    pub price_max: Option<u64>,
    /// Show the reported total and a few sample results before fetching
    #[arg(long)]
    pub preview: bool,
    #[command(flatten)]
    pub output: OutputArgs,
}

pub fn execute(cli: Cli, mut config: AppConfig) -> Result<(), AppError> {
    let command = cli
        .command
        .unwrap_or_else(|| Commands::Run(RunArgs::default()));

    let transport = HttpTransport::new(config.request_timeout).map_err(setup_error)?;

    match command {
        Commands::Run(args) => {
            args.output.apply(&mut config);
            run_command(&args, &config, &transport)
        }
        Commands::Render(output) => {
            output.apply(&mut config);
            render_command(&config)
        }
        Commands::States => {
            let geo = GeoClient::from_config(&transport, &config).map_err(setup_error)?;
            print_entries(&geo.list_states(&config.country_code));
            Ok(())
        }
        Commands::Cities { state } => {
            let geo = GeoClient::from_config(&transport, &config).map_err(setup_error)?;
            print_entries(&geo.list_cities(&state));
            Ok(())
        }
        Commands::Subcategories { category } => {
            let geo = GeoClient::from_config(&transport, &config).map_err(setup_error)?;
            let category = category.unwrap_or_else(|| config.root_category_id.clone());
            print_entries(&geo.list_subcategories(&category));
            Ok(())
        }
    }
}

fn run_command<T: Transport>(args: &RunArgs, config: &AppConfig, transport: &T) -> Result<(), AppError> {
    let geo = GeoClient::from_config(transport, config).map_err(setup_error)?;
    let catalog = CatalogClient::from_config(transport, config).map_err(setup_error)?;

    let mut db = prepare_store(config)?;

    let stdin = io::stdin();
    let mut prompter = Prompter::new(stdin.lock(), io::stdout());
    let Some(filter) = resolve_filter(args, config, &geo, &mut prompter)? else {
        return Ok(());
    };

    if args.preview {
        if let Some(preview) = catalog.preview(&filter, PREVIEW_SAMPLE) {
            println!("Total results: {}", preview.total.map_or("unknown".into(), |t| t.to_string()));
            for raw in &preview.sample {
                println!("  {} - {}", raw.id.as_deref().unwrap_or("?"), raw.title.as_deref().unwrap_or(""));
            }
        }
    }

    let summary = if config.open_viewer {
        snapshot(&catalog, &mut db, MapRenderer::from_config(config, SystemViewer), &filter)?
    } else {
        snapshot(&catalog, &mut db, MapRenderer::from_config(config, NoopViewer), &filter)?
    };

    println!(
        "Fetched {} of {} listings in {} pages ({:?}); stored {} with location data.",
        summary.fetched,
        summary.reported_total.map_or("?".into(), |t| t.to_string()),
        summary.pages,
        summary.stop_reason,
        summary.ingest.persisted
    );
    match summary.render {
        Some(RenderOutcome::Written { path, markers }) => {
            println!("Map created: '{}' ({markers} markers)", path.display())
        }
        Some(RenderOutcome::Empty) => println!("No location data to show on the map."),
        None => println!("No items to store."),
    }
    Ok(())
}

/// Opens the store and drops the previous snapshot before any prompting, so
/// a run that ends early leaves an empty store behind.
pub fn prepare_store(config: &AppConfig) -> Result<Database, AppError> {
    let db = Database::open(&config.db_path)?;
    ensure_schema(&db)?;
    clear_all(&db)?;
    Ok(db)
}

fn snapshot<T: Transport, V: Viewer>(
    catalog: &CatalogClient<T>,
    db: &mut Database,
    renderer: MapRenderer<V>,
    filter: &SearchFilter,
) -> Result<RunSummary, AppError> {
    run_snapshot(catalog, db, &renderer, filter)
}

fn render_command(config: &AppConfig) -> Result<(), AppError> {
    let db = Database::open(&config.db_path)?;
    ensure_schema(&db)?;
    info!(stored = count(&db)?, "rendering stored snapshot");

    let outcome = if config.open_viewer {
        MapRenderer::from_config(config, SystemViewer).render(&db)?
    } else {
        MapRenderer::from_config(config, NoopViewer).render(&db)?
    };

    match outcome {
        RenderOutcome::Written { path, markers } => {
            println!("Map created: '{}' ({markers} markers)", path.display())
        }
        RenderOutcome::Empty => println!("No location data to show on the map."),
    }
    Ok(())
}

/// Turns command-line selections into a [`SearchFilter`], prompting for the
/// missing ones. The session counts as interactive when no state was given;
/// only then is the price range asked for.
///
/// Returns `None` when the state or district lookup came back empty.
pub fn resolve_filter<T, R, W>(
    args: &RunArgs,
    config: &AppConfig,
    geo: &GeoClient<T>,
    prompter: &mut Prompter<R, W>,
) -> Result<Option<SearchFilter>, AppError>
where
    T: Transport,
    R: BufRead,
    W: Write,
{
    let interactive = args.state.is_none();

    let (state_id, city_id) = match &args.state {
        Some(state) => (state.clone(), args.city.clone()),
        None => {
            for sub in geo.list_subcategories(&config.root_category_id) {
                info!(id = %sub.id, name = %sub.name, "available subcategory");
            }

            let states = geo.list_states(&config.country_code);
            if states.is_empty() {
                println!("No states available for {}.", config.country_code);
                return Ok(None);
            }
            let state = prompter.choose_entry("Select a state:", &states)?;

            let cities = geo.list_cities(&state.id);
            if cities.is_empty() {
                println!("No districts available for {}.", state.name);
                return Ok(None);
            }
            let city = prompter.choose_entry("Select a district:", &cities)?;

            (state.id.clone(), Some(city.id.clone()))
        }
    };

    let mode = match args.mode {
        Some(mode) => mode,
        None => prompter.choose_mode()?,
    };

    let category_id = match (&args.category, args.property) {
        (Some(category), _) => category.clone(),
        (None, Some(property)) => property.category_id().to_string(),
        (None, None) => prompter.choose_property_type()?.category_id().to_string(),
    };

    let price = match (args.price_min, args.price_max) {
        (None, None) if interactive => prompter.ask_price_range()?,
        (min, max) => {
            let range = PriceRange::from_bounds(min, max);
            if range.is_none() && (min.is_some() || max.is_some()) {
                warn!("partial price range ignored, both bounds are required");
            }
            range
        }
    };

    Ok(Some(
        SearchFilter::new(category_id, mode)
            .with_location(state_id, city_id)
            .with_price(price),
    ))
}

fn print_entries(entries: &[GeoEntry]) {
    if entries.is_empty() {
        println!("No data available.");
    }
    for entry in entries {
        println!("{} - ID: {}", entry.name, entry.id);
    }
}

fn setup_error(e: RemoteError) -> AppError {
    AppError::Config(e.to_string())
}
