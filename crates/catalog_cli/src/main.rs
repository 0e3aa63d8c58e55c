//! Command-line front end for the local product catalog.
//!
//! # Responsibility
//! - Browse the catalog (list, filter, categories) from a terminal.
//! - Run admin mutations once the shared secret has been presented.
//! - Keep all catalog semantics inside `catalog_core`.

use anyhow::{bail, Context, Result};
use catalog_core::config::ADMIN_SECRET_ENV;
use catalog_core::{
    core_version, generate_product_id, init_logging, ping, AdminGate, CatalogConfig,
    CatalogError, CatalogService, ConfigOverrides, Product, ProductDraft, SharedSecretGate,
    SqliteProductStore, ALL_CATEGORIES_TOKEN,
};
use clap::{Args, Parser, Subcommand};
use log::info;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "catalog", version, about = "Browse and administer the local product catalog")]
struct Cli {
    /// SQLite file holding the catalog (overrides CATALOG_DB_PATH).
    #[arg(long, global = true)]
    db: Option<PathBuf>,
    /// Absolute directory for rolling log files (overrides CATALOG_LOG_DIR).
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,
    /// trace|debug|info|warn|error (overrides CATALOG_LOG_LEVEL).
    #[arg(long, global = true)]
    log_level: Option<String>,
    /// Shared secret required by add/update/remove/reset.
    #[arg(long, global = true)]
    admin_secret: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Check core wiring.
    Ping,
    /// List products, optionally restricted to one category.
    List {
        #[arg(long, default_value = ALL_CATEGORIES_TOKEN)]
        category: String,
        #[arg(long)]
        json: bool,
    },
    /// List distinct categories in first-seen order.
    Categories,
    /// Print one product as JSON.
    Show { id: String },
    /// Create a product.
    Add(AddArgs),
    /// Replace fields of an existing product.
    Update(UpdateArgs),
    /// Delete a product.
    Remove { id: String },
    /// Replace the whole catalog with the default products.
    Reset,
}

#[derive(Debug, Args)]
struct AddArgs {
    /// Explicit id; a timestamp id is generated when omitted.
    #[arg(long)]
    id: Option<String>,
    #[arg(long)]
    title: String,
    #[arg(long)]
    description: String,
    #[arg(long)]
    image_url: String,
    #[arg(long)]
    external_url: String,
    #[arg(long)]
    category: String,
    #[arg(long)]
    price: f64,
}

#[derive(Debug, Args)]
struct UpdateArgs {
    id: String,
    #[arg(long)]
    title: Option<String>,
    #[arg(long)]
    description: Option<String>,
    #[arg(long)]
    image_url: Option<String>,
    #[arg(long)]
    external_url: Option<String>,
    #[arg(long)]
    category: Option<String>,
    #[arg(long)]
    price: Option<f64>,
}

impl AddArgs {
    fn into_product(self) -> Result<Product> {
        let id = self.id.unwrap_or_else(generate_product_id);
        let draft = ProductDraft {
            title: self.title,
            description: self.description,
            image_url: self.image_url,
            external_url: self.external_url,
            category: self.category,
            price: self.price,
        };
        Ok(draft.into_product(id)?)
    }
}

impl UpdateArgs {
    fn apply_to(self, mut product: Product) -> Product {
        if let Some(title) = self.title {
            product.title = title;
        }
        if let Some(description) = self.description {
            product.description = description;
        }
        if let Some(image_url) = self.image_url {
            product.image_url = image_url;
        }
        if let Some(external_url) = self.external_url {
            product.external_url = external_url;
        }
        if let Some(category) = self.category {
            product.category = category;
        }
        if let Some(price) = self.price {
            product.price = price;
        }
        product
    }
}

fn main() -> ExitCode {
    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = resolve_config(&cli)?;
    if let Some(log_dir) = &config.log_dir {
        init_logging(config.log_level, log_dir)
            .map_err(anyhow::Error::msg)
            .context("failed to initialize logging")?;
    }
    info!(
        "event=cli_start module=cli status=ok command={}",
        command_name(&cli.command)
    );

    let mut service = CatalogService::new(SqliteProductStore::new(config.store_location()));
    let admin_secret = cli.admin_secret.as_deref();

    match cli.command {
        Command::Ping => {
            println!("catalog_core ping={}", ping());
            println!("catalog_core version={}", core_version());
        }
        Command::List { category, json } => {
            service.load_all();
            print_products(&service.filter_by_category(&category), json)?;
        }
        Command::Categories => {
            service.load_all();
            for category in service.list_categories() {
                println!("{category}");
            }
        }
        Command::Show { id } => {
            service.load_all();
            let product = service
                .get(&id)
                .ok_or(CatalogError::NotFound(id))?;
            println!("{}", serde_json::to_string_pretty(&product)?);
        }
        Command::Add(args) => {
            require_admin(&config, admin_secret)?;
            let product = args.into_product()?;
            let id = product.id.clone();
            service.load_all();
            service.add(product)?;
            println!("added {id}");
        }
        Command::Update(args) => {
            require_admin(&config, admin_secret)?;
            service.load_all();
            let existing = service
                .get(&args.id)
                .ok_or_else(|| CatalogError::NotFound(args.id.clone()))?;
            let updated = args.apply_to(existing);
            let id = updated.id.clone();
            service.update(updated)?;
            println!("updated {id}");
        }
        Command::Remove { id } => {
            require_admin(&config, admin_secret)?;
            service.load_all();
            service.remove(&id)?;
            println!("removed {id}");
        }
        Command::Reset => {
            require_admin(&config, admin_secret)?;
            let products = service.reset_to_defaults()?;
            println!("reset catalog to {} default products", products.len());
        }
    }

    Ok(())
}

fn resolve_config(cli: &Cli) -> Result<CatalogConfig> {
    let overrides = ConfigOverrides {
        db_path: cli.db.clone(),
        log_level: cli.log_level.clone(),
        log_dir: cli.log_dir.clone(),
    };
    CatalogConfig::from_env_with(&overrides).context("invalid catalog configuration")
}

fn require_admin(config: &CatalogConfig, candidate: Option<&str>) -> Result<()> {
    let Some(secret) = config.admin_secret.as_deref() else {
        bail!("admin commands are disabled; set {ADMIN_SECRET_ENV}");
    };
    if !SharedSecretGate::new(secret).authorize(candidate.unwrap_or_default()) {
        bail!("admin secret rejected");
    }
    Ok(())
}

fn print_products(products: &[Product], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(products)?);
        return Ok(());
    }
    for product in products {
        println!(
            "{}\t{}\t{:.2}\t{}",
            product.id, product.category, product.price, product.title
        );
    }
    Ok(())
}

fn command_name(command: &Command) -> &'static str {
    match command {
        Command::Ping => "ping",
        Command::List { .. } => "list",
        Command::Categories => "categories",
        Command::Show { .. } => "show",
        Command::Add(_) => "add",
        Command::Update(_) => "update",
        Command::Remove { .. } => "remove",
        Command::Reset => "reset",
    }
}
