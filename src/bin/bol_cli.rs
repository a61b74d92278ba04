use std::{fs, path::PathBuf, str::FromStr};

use anyhow::{anyhow, bail, Context, Result};
use chrono::NaiveDate;
use clap::{ArgAction, Args, Parser, Subcommand};
use rust_decimal::Decimal;
use serde::Serialize;

use bol_api::{
    bol::{ItemField, ShipmentDetails},
    catalog::{group_by_state, ClientFilter, ProductFilter},
    client::{ApiClient, Session, DEFAULT_SERVER_URL},
    models::{Client, Product, ACTIVE_STATUS, CLIENT_COLUMNS, PRODUCT_COLUMNS},
    services::export::{from_csv, to_csv},
};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    bol_api::config::init_tracing("error", false);

    let api = ApiClient::new(cli.server.clone()).context("failed to build HTTP client")?;
    let mut session = Session::open(api)
        .await
        .with_context(|| format!("failed to load catalog from {}", cli.server))?;
    if let bol_api::catalog::DataSource::Offline { reason } = session.state().source() {
        eprintln!("*** OFFLINE / DEMO MODE: {} ***", reason);
        eprintln!("*** Showing built-in sample data; changes cannot be saved. ***");
    }

    match cli.command {
        Commands::Products(command) => handle_products_command(&mut session, command, cli.json).await,
        Commands::Clients(command) => handle_clients_command(&session, command, cli.json).await,
        Commands::Bol(command) => handle_bol_command(&mut session, command, cli.json).await,
    }
}

#[derive(Parser)]
#[command(name = "bol-cli", about = "Inventory, client and Bill of Lading tool", version)]
struct Cli {
    #[arg(
        long,
        global = true,
        env = "BOL_API_URL",
        default_value = DEFAULT_SERVER_URL,
        help = "Base URL of the bol-api server"
    )]
    server: String,
    #[arg(
        long,
        global = true,
        action = ArgAction::SetTrue,
        help = "Render command output as pretty JSON when available"
    )]
    json: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(subcommand)]
    Products(ProductsCommands),
    #[command(subcommand)]
    Clients(ClientsCommands),
    #[command(subcommand)]
    Bol(BolCommands),
}

#[derive(Subcommand)]
enum ProductsCommands {
    /// List products
    List(ListProductsArgs),
    /// Write the inventory as CSV
    Export(ExportArgs),
    /// Replace the inventory with the rows of a CSV file
    Import(ImportArgs),
    /// Add one product
    Add(AddProductArgs),
    /// Delete a product by id
    Delete(DeleteProductArgs),
}

#[derive(Subcommand)]
enum ClientsCommands {
    /// List clients
    List(ListClientsArgs),
    /// Write the client roster as CSV
    Export(ExportArgs),
    /// Active clients grouped by state
    ByState,
}

#[derive(Subcommand)]
enum BolCommands {
    /// Compose a Bill of Lading from pallet and item lines
    Compose(ComposeArgs),
    /// List saved documents
    List,
    /// Print or write a saved document
    View(ViewArgs),
}

#[derive(Args)]
struct ListProductsArgs {
    #[arg(long, action = ArgAction::SetTrue, help = "Only products with Active status")]
    active: bool,
    #[arg(long, action = ArgAction::SetTrue, help = "Only hazardous materials")]
    hazmat: bool,
    #[arg(long, help = "Case-insensitive search over name, code and description")]
    search: Option<String>,
}

#[derive(Args)]
struct ListClientsArgs {
    #[arg(long, action = ArgAction::SetTrue, help = "Only clients with Active status")]
    active: bool,
    #[arg(long, help = "Case-insensitive search over name, code, address and city")]
    search: Option<String>,
}

#[derive(Args)]
struct ExportArgs {
    #[arg(long, short, help = "Write to this file instead of stdout")]
    output: Option<PathBuf>,
}

#[derive(Args)]
struct ImportArgs {
    #[arg(help = "CSV file with a header row of inventory columns")]
    file: PathBuf,
}

#[derive(Args)]
struct AddProductArgs {
    #[arg(long, help = "Product name")]
    name: String,
    #[arg(long, help = "Unique product code")]
    code: String,
    #[arg(long, default_value = "", help = "Unit of measure, e.g. LB or Drum")]
    unit: String,
    #[arg(long, default_value = "")]
    description: String,
    #[arg(long, default_value = "")]
    grade: String,
    #[arg(long, default_value = "")]
    nmfc: String,
    #[arg(long, default_value = "")]
    freight_class: String,
    #[arg(long, default_value = "")]
    packing_group: String,
    #[arg(long, value_parser = parse_decimal, default_value = "0", help = "Net weight per package (lbs)")]
    net_weight: Decimal,
    #[arg(long, value_parser = parse_decimal, default_value = "0", help = "Gross weight per package (lbs)")]
    gross_weight: Decimal,
    #[arg(long, default_value = "No")]
    stackable: String,
    #[arg(long, action = ArgAction::SetTrue, help = "Mark as hazardous material")]
    hazardous: bool,
    #[arg(long, default_value = "")]
    hazmat_class: String,
    #[arg(long, default_value = "")]
    non_hazmat_class: String,
    #[arg(long, default_value = "")]
    account: String,
    #[arg(long, value_parser = parse_decimal, default_value = "0")]
    price: Decimal,
    #[arg(long, default_value = ACTIVE_STATUS)]
    status: String,
}

#[derive(Args)]
struct DeleteProductArgs {
    #[arg(help = "Product id")]
    id: i64,
}

#[derive(Args)]
struct ComposeArgs {
    #[arg(
        long = "line",
        required = true,
        value_parser = parse_line,
        help = "Line in order: pallet[:DIMS[:COUNT]] or item:CODE:QTY[:PACKAGING]"
    )]
    lines: Vec<LineArg>,
    #[arg(long = "po", help = "PO number; repeat for several")]
    po_numbers: Vec<String>,
    #[arg(long, help = "Client code to use as consignee")]
    client: Option<String>,
    #[arg(long, value_parser = parse_date, help = "Ship date (YYYY-MM-DD), defaults to today")]
    ship_date: Option<NaiveDate>,
    #[arg(long, default_value = "")]
    carrier: String,
    #[arg(long, default_value = "")]
    freight_charges: String,
    #[arg(long, default_value = "")]
    placards: String,
    #[arg(long, default_value = "", help = "Name printed on the shipper signature line")]
    signatory: String,
    #[arg(long, short, help = "Also write the HTML to this file")]
    output: Option<PathBuf>,
    #[arg(long, action = ArgAction::SetTrue, help = "Save the document on the server")]
    save: bool,
}

#[derive(Args)]
struct ViewArgs {
    filename: String,
    #[arg(long, short, help = "Write to this file instead of stdout")]
    output: Option<PathBuf>,
}

#[derive(Clone, Debug)]
enum LineArg {
    Pallet {
        dimensions: Option<String>,
        count: Option<String>,
    },
    Item {
        code: String,
        quantity: String,
        packaging: Option<String>,
    },
}

fn parse_line(raw: &str) -> Result<LineArg, String> {
    let mut parts = raw.split(':').map(str::trim);
    match parts.next() {
        Some("pallet") => Ok(LineArg::Pallet {
            dimensions: parts.next().filter(|s| !s.is_empty()).map(str::to_string),
            count: parts.next().filter(|s| !s.is_empty()).map(str::to_string),
        }),
        Some("item") => {
            let code = parts
                .next()
                .filter(|s| !s.is_empty())
                .ok_or_else(|| format!("item line '{raw}' needs a product code"))?;
            let quantity = parts
                .next()
                .filter(|s| !s.is_empty())
                .ok_or_else(|| format!("item line '{raw}' needs a quantity"))?;
            Ok(LineArg::Item {
                code: code.to_string(),
                quantity: quantity.to_string(),
                packaging: parts.next().filter(|s| !s.is_empty()).map(str::to_string),
            })
        }
        _ => Err(format!(
            "invalid line '{raw}', expected pallet[:DIMS[:COUNT]] or item:CODE:QTY[:PACKAGING]"
        )),
    }
}

fn parse_decimal(raw: &str) -> Result<Decimal, String> {
    Decimal::from_str(raw).map_err(|_| format!("invalid decimal '{raw}'"))
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| format!("invalid date '{raw}', expected YYYY-MM-DD"))
}

async fn handle_products_command(
    session: &mut Session,
    command: ProductsCommands,
    json: bool,
) -> Result<()> {
    match command {
        ProductsCommands::List(args) => {
            let filter = ProductFilter {
                active_only: args.active,
                hazmat_only: args.hazmat,
                search: args.search,
            };
            let products = filter.apply(session.state().all_products());
            if json {
                print_json(&products)?;
            } else {
                println!(
                    "Products {} shown ({} total, {} active)",
                    products.len(),
                    session.state().all_products().len(),
                    session.state().active_products().len()
                );
                for product in &products {
                    render_product(product);
                }
            }
            Ok(())
        }
        ProductsCommands::Export(args) => {
            let csv = if session.is_offline() {
                to_csv(&PRODUCT_COLUMNS, session.state().all_products())?
            } else {
                session
                    .api()
                    .export_products_csv()
                    .await
                    .context("failed to export inventory")?
            };
            write_output(args.output.as_ref(), &csv)
        }
        ProductsCommands::Import(args) => {
            if session.is_offline() {
                bail!("cannot import {}: server unavailable", args.file.display());
            }
            let text = fs::read_to_string(&args.file)
                .with_context(|| format!("failed to read {}", args.file.display()))?;
            let products: Vec<Product> = from_csv(&text)
                .with_context(|| format!("failed to parse {}", args.file.display()))?;
            let message = session
                .api()
                .replace_products(&products)
                .await
                .context("failed to replace inventory")?;
            println!("{} ({} products)", message, products.len());
            Ok(())
        }
        ProductsCommands::Add(args) => {
            let code = args.code.clone();
            let product = Product {
                id: None,
                name: args.name,
                code: args.code,
                unit_of_measure: args.unit,
                description: args.description,
                grade: args.grade,
                nmfc_number: args.nmfc,
                freight_class: args.freight_class,
                packing_group: args.packing_group,
                net_weight: args.net_weight,
                gross_weight: args.gross_weight,
                stackable: args.stackable,
                hazardous: args.hazardous,
                hazmat_class: args.hazmat_class,
                non_hazmat_class: args.non_hazmat_class,
                account: args.account,
                price: args.price,
                active_status: args.status,
            };
            session
                .add_product(product)
                .await
                .with_context(|| format!("failed to add product {code}"))?;
            let stored = session.state().find_product_by_code(&code);
            if json {
                print_json(&stored)?;
            } else {
                println!("Product {code} added");
                if let Some(product) = stored {
                    render_product(product);
                }
            }
            Ok(())
        }
        ProductsCommands::Delete(args) => {
            let removed = session
                .delete_product(args.id)
                .await
                .with_context(|| format!("failed to delete product {}", args.id))?;
            println!("Product \"{}\" deleted", removed.name);
            Ok(())
        }
    }
}

async fn handle_clients_command(
    session: &Session,
    command: ClientsCommands,
    json: bool,
) -> Result<()> {
    match command {
        ClientsCommands::List(args) => {
            let filter = ClientFilter {
                active_only: args.active,
                search: args.search,
            };
            let clients = filter.apply(session.state().all_clients());
            if json {
                print_json(&clients)?;
            } else {
                println!(
                    "Clients {} shown ({} total, {} active)",
                    clients.len(),
                    session.state().all_clients().len(),
                    session.state().active_clients().len()
                );
                for client in &clients {
                    render_client(client);
                }
            }
            Ok(())
        }
        ClientsCommands::Export(args) => {
            let csv = if session.is_offline() {
                to_csv(&CLIENT_COLUMNS, session.state().all_clients())?
            } else {
                session
                    .api()
                    .export_clients_csv()
                    .await
                    .context("failed to export clients")?
            };
            write_output(args.output.as_ref(), &csv)
        }
        ClientsCommands::ByState => {
            let groups = group_by_state(session.state().all_clients());
            if json {
                print_json(&groups)?;
            } else {
                for (state, clients) in &groups {
                    println!("{} ({})", state, clients.len());
                    for client in clients {
                        println!("  • {} [{}] {}", client.name, client.code, client.city);
                    }
                }
            }
            Ok(())
        }
    }
}

async fn handle_bol_command(session: &mut Session, command: BolCommands, json: bool) -> Result<()> {
    match command {
        BolCommands::Compose(args) => compose_bol(session, args, json).await,
        BolCommands::List => {
            let files = session
                .api()
                .list_bol_files()
                .await
                .context("failed to list saved documents")?;
            if json {
                print_json(&files)?;
            } else if files.is_empty() {
                println!("No saved documents");
            } else {
                for file in &files {
                    println!(
                        "- {} • {} • {} bytes",
                        file.name,
                        file.created.format("%Y-%m-%d %H:%M:%S"),
                        file.size
                    );
                }
            }
            Ok(())
        }
        BolCommands::View(args) => {
            let html = session
                .api()
                .view_bol(&args.filename)
                .await
                .with_context(|| format!("failed to fetch {}", args.filename))?;
            write_output(args.output.as_ref(), &html)
        }
    }
}

fn product_id_for_code(session: &Session, code: &str) -> Result<String> {
    session
        .state()
        .active_products()
        .iter()
        .find(|p| p.code == code)
        .and_then(|p| p.id)
        .map(|id| id.to_string())
        .ok_or_else(|| anyhow!("no active product with code {code}"))
}

async fn compose_bol(session: &mut Session, args: ComposeArgs, json: bool) -> Result<()> {
    session.composer_mut().clear();
    for line in &args.lines {
        match line {
            LineArg::Pallet { dimensions, count } => {
                let id = session.composer_mut().add_pallet();
                if let Some(dimensions) = dimensions {
                    session.set_item_field(id, ItemField::Dimensions, dimensions)?;
                }
                if let Some(count) = count {
                    session.set_item_field(id, ItemField::Quantity, count)?;
                }
            }
            LineArg::Item {
                code,
                quantity,
                packaging,
            } => {
                let product_id = product_id_for_code(session, code)?;
                let id = session.composer_mut().add_product_item()?;
                if let Some(packaging) = packaging {
                    session.set_item_field(id, ItemField::Packaging, packaging)?;
                }
                session.set_item_field(id, ItemField::ProductId, &product_id)?;
                session.set_item_field(id, ItemField::Quantity, quantity)?;
            }
        }
    }
    for po in &args.po_numbers {
        session.composer_mut().add_po_number(po)?;
    }

    let mut shipment = ShipmentDetails {
        ship_date: args.ship_date,
        carrier: args.carrier,
        freight_charges: args.freight_charges,
        placards_supplied: args.placards,
        signatory: args.signatory,
        ..ShipmentDetails::default()
    };
    if let Some(code) = &args.client {
        let client = session
            .state()
            .find_client(code)
            .ok_or_else(|| anyhow!("no client with code {code}"))?;
        shipment = shipment.with_consignee(client);
    }

    let document = session.compose(&shipment)?;

    if let Some(path) = &args.output {
        fs::write(path, &document.html)
            .with_context(|| format!("failed to write {}", path.display()))?;
    }
    if args.save {
        if session.is_offline() {
            bail!("cannot save {}: server unavailable", document.filename);
        }
        let message = session
            .save_document(&document)
            .await
            .context("failed to save document")?;
        eprintln!("{message}");
    }

    if json {
        #[derive(Serialize)]
        struct ComposeOutput<'a> {
            filename: &'a str,
            manifest: &'a bol_api::bol::Manifest,
        }
        print_json(&ComposeOutput {
            filename: &document.filename,
            manifest: &document.manifest,
        })?;
    } else {
        let manifest = &document.manifest;
        println!("{}", document.filename);
        println!(
            "Rows {} • handling units {} • packages {} • weight {} lbs",
            manifest.rows.len(),
            manifest.total_handling_units,
            manifest.total_packages,
            bol_api::bol::render::format_weight(manifest.total_weight)
        );
        if args.output.is_none() && !args.save {
            println!("{}", document.html);
        }
    }
    Ok(())
}

fn write_output(path: Option<&PathBuf>, body: &str) -> Result<()> {
    match path {
        Some(path) => {
            fs::write(path, body).with_context(|| format!("failed to write {}", path.display()))?;
            eprintln!("Wrote {}", path.display());
        }
        None => print!("{body}"),
    }
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn render_product(product: &Product) {
    println!(
        "- {} • {} • {} • gross {} lbs • {}{}",
        product.id.map(|id| id.to_string()).unwrap_or_else(|| "-".to_string()),
        product.code,
        product.name,
        product.gross_weight,
        product.active_status,
        if product.hazardous { " • HAZMAT" } else { "" }
    );
}

fn render_client(client: &Client) {
    println!(
        "- {} • {} • {} {} • {}",
        client.code, client.name, client.city, client.state, client.status
    );
}
