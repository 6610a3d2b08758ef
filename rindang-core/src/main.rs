use anyhow::Context;
use chrono::{NaiveDate, NaiveTime};
use clap::{Args, Parser, Subcommand};
use rindang_client::HttpClient;
use rindang_core::cache::ReadCache;
use rindang_core::logger::{LOG_RETENTION_DAYS, cleanup_old_logs, init_logger_with_file};
use rindang_core::reservation::{CustomerInfo, ScheduleInput, format_slot, parse_slot};
use rindang_core::{
    Cart, Clock, Config, FloorPlan, LocalStorage, MenuEntry, OrderCheckout, Pick, PointerPos,
    RedbStorage, ReservationFlow, Session, SystemClock, TableRegistry, TableStatusStore,
};
use shared::error::AppError;
use shared::models::{MenuItem, PaymentMethod, TableStatus, UserRole};
use shared::price::format_rupiah;
use std::process::ExitCode;
use std::sync::Arc;

/// Rindang café: floor plan, reservations and orders
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List tables with their status and the legend
    Tables,
    /// Hit-test a click on the floor plan
    Hit {
        x: f64,
        y: f64,
        /// Displayed image width (defaults to the natural width)
        #[arg(long)]
        width: Option<f64>,
    },
    /// Set one table's status (free, reserved, occupied)
    Set { id: String, status: TableStatus },
    /// Mark every table free
    Reset,
    /// Pull table statuses from the backend
    Sync,
    /// Show the menu
    Menu,
    Login { username: String, password: String },
    Logout,
    /// Book a table
    Reserve(ReserveArgs),
    /// Order menu items to a table
    Order(OrderArgs),
}

#[derive(Args, Debug)]
struct ReserveArgs {
    #[arg(long)]
    name: String,
    #[arg(long)]
    email: String,
    #[arg(long)]
    phone: String,
    /// YYYY-MM-DD
    #[arg(long)]
    date: NaiveDate,
    /// HH:MM, one of the hourly slots 08:00-20:00
    #[arg(long, value_parser = slot_arg)]
    time: NaiveTime,
    #[arg(long, default_value_t = 2)]
    guests: u32,
    /// Table id, e.g. I6-1
    #[arg(long)]
    table: String,
    #[arg(long)]
    note: Option<String>,
    /// Also create the reservation on the backend
    #[arg(long)]
    submit: bool,
}

#[derive(Args, Debug)]
struct OrderArgs {
    #[arg(long)]
    customer: String,
    #[arg(long)]
    table: String,
    /// Menu item name, optionally `name=qty`; repeatable
    #[arg(long = "item", required = true)]
    items: Vec<String>,
    /// cash or e-wallet
    #[arg(long)]
    payment: PaymentMethod,
}

fn slot_arg(value: &str) -> Result<NaiveTime, String> {
    parse_slot(value).ok_or_else(|| format!("{} is not an hourly slot between 08:00 and 20:00", value))
}

struct App {
    config: Config,
    registry: TableRegistry,
    store: TableStatusStore,
    session: Session,
}

impl App {
    fn open(config: Config) -> anyhow::Result<Self> {
        let path = config.storage_path();
        let storage: Arc<dyn LocalStorage> = Arc::new(
            RedbStorage::open(&path)
                .with_context(|| format!("Failed to open local storage {}", path.display()))?,
        );
        Ok(Self::with_storage(config, storage))
    }

    fn with_storage(config: Config, storage: Arc<dyn LocalStorage>) -> Self {
        let registry = TableRegistry::default_floor();
        let store = TableStatusStore::load(&registry, storage.clone());
        let session = Session::restore(storage);
        Self {
            config,
            registry,
            store,
            session,
        }
    }

    fn client(&self, token: Option<&str>) -> Result<HttpClient, AppError> {
        let config = self.config.client_config(token.map(str::to_string));
        Ok(config.build_http_client()?)
    }

    fn floor_plan(&self, displayed_width: Option<f64>) -> FloorPlan {
        let mut plan = FloorPlan::new(self.config.floor_plan_width, self.config.floor_plan_height);
        if let Some(width) = displayed_width {
            plan.resize(width);
        }
        plan
    }

    fn print_tables(&self) {
        for table in self.registry.iter() {
            println!(
                "{:<6} {:<28} {:>2} seats  {:<8} {}",
                table.id,
                table.label,
                table.seats,
                table.area,
                self.store.status(&table.id)
            );
        }
        let counts = self.store.counts();
        println!(
            "free: {}  reserved: {}  occupied: {}",
            counts.free, counts.reserved, counts.occupied
        );
    }

    async fn run(&mut self, command: Command) -> Result<(), AppError> {
        match command {
            Command::Tables => self.print_tables(),
            Command::Hit { x, y, width } => {
                let plan = self.floor_plan(width);
                match plan.pick(&self.registry, &self.store, PointerPos::new(x, y)) {
                    Pick::Selected(table) => println!("{} ({}) is free", table.id, table.label),
                    Pick::Unavailable { table, status } => {
                        println!("{} ({}) is {}, pick another table", table.id, table.label, status)
                    }
                    Pick::Miss => println!("No table at ({}, {})", x, y),
                }
            }
            Command::Set { id, status } => {
                self.store.set(&id, status)?;
                println!("{} → {}", id, status);
            }
            Command::Reset => {
                self.store.reset()?;
                println!("All {} tables are free", self.registry.len());
            }
            Command::Sync => {
                let token = self.session.require(&[])?.to_string();
                let rows = self.client(Some(&token))?.list_tables().await?;
                let applied = self.store.apply_backend(&rows)?;
                println!("Synced {} of {} backend tables", applied, rows.len());
                self.print_tables();
            }
            Command::Menu => {
                let mut cache: ReadCache<MenuItem> = ReadCache::new();
                let result = self.client(None)?.list_menu().await;
                if let Err(message) = cache.apply(result) {
                    return Err(AppError::network(message));
                }
                for item in cache.items() {
                    println!("{:<24} {:>12}  {}", item.name, format_rupiah(item.price), item.tagline);
                }
            }
            Command::Login { username, password } => {
                let login = self.client(None)?.login(&username, &password).await?;
                self.session.save_login(&login)?;
                match self.session.dashboard() {
                    Some(dashboard) => println!("Logged in as {} → {}", login.role, dashboard.path()),
                    None => println!("Logged in as {} (no dashboard for this role)", login.role),
                }
            }
            Command::Logout => {
                self.session.logout()?;
                println!("Logged out");
            }
            Command::Reserve(args) => self.reserve(args).await?,
            Command::Order(args) => self.order(args).await?,
        }
        Ok(())
    }

    async fn reserve(&mut self, args: ReserveArgs) -> Result<(), AppError> {
        let clock = SystemClock;
        let mut flow = ReservationFlow::new(self.config.reservation_fee);

        let mut info = CustomerInfo::new(args.name, args.email, args.phone);
        if let Some(note) = args.note {
            info = info.with_special_request(note);
        }
        flow.submit_info(info)?;

        flow.submit_schedule(
            ScheduleInput {
                date: args.date,
                time: args.time,
                guests: args.guests,
            },
            &clock,
        )?;
        flow.select_table(&args.table, &self.registry, &self.store)?;
        flow.proceed_to_payment(&self.store)?;
        println!("Reservation fee: {}", format_rupiah(flow.fee()));

        // Login and the backend table are checked before anything is persisted
        let backend = if args.submit {
            let token = self
                .session
                .require(&[UserRole::Admin, UserRole::Staff, UserRole::Cashier])?
                .to_string();
            let client = self.client(Some(&token))?;
            let rows = client.list_tables().await?;
            let table_id = flow.selected_table().unwrap_or_default();
            let backend_id = self
                .registry
                .table_no_for(table_id)
                .and_then(|no| rows.iter().find(|r| r.table_no == no))
                .map(|r| r.id)
                .ok_or_else(|| AppError::not_found(format!("Backend table for {}", table_id)))?;
            Some((client, backend_id))
        } else {
            None
        };

        let summary = flow.confirm_payment(&mut self.store)?.clone();

        if let Some((client, backend_id)) = backend {
            let request = ReservationFlow::to_backend_request(&summary, backend_id, &clock);
            match client.create_reservation(&request).await {
                Ok(created) => println!("Backend reservation #{} ({:?})", created.id, created.status),
                Err(err) => {
                    tracing::warn!(
                        table_id = %summary.table_id,
                        error = %err,
                        "Backend rejected reservation, releasing table"
                    );
                    self.store.set(&summary.table_id, TableStatus::Free)?;
                    return Err(err.into());
                }
            }
        }

        println!(
            "Reserved {} for {} on {} at {} ({} guests)",
            summary.table_label,
            summary.name,
            summary.date,
            format_slot(summary.time),
            summary.guests
        );
        if let Some(note) = &summary.special_request {
            println!("Note: {}", note);
        }
        Ok(())
    }

    async fn order(&mut self, args: OrderArgs) -> Result<(), AppError> {
        let client = self.client(self.session.token())?;
        let menu = client.list_menu().await?;

        let mut cart = Cart::new();
        for arg in &args.items {
            let (name, qty) = match arg.rsplit_once('=') {
                Some((name, qty)) => (
                    name.trim(),
                    qty.trim()
                        .parse::<u32>()
                        .map_err(|_| AppError::validation(format!("Invalid quantity in {}", arg)))?,
                ),
                None => (arg.trim(), 1),
            };
            let item = menu
                .iter()
                .find(|m| m.name.eq_ignore_ascii_case(name))
                .ok_or_else(|| AppError::not_found(format!("Menu item {}", name)))?;
            let entry = MenuEntry::from(item);
            for _ in 0..qty {
                cart.add(&entry);
            }
        }

        let mut checkout = OrderCheckout::begin(cart)?;
        checkout.select_table(&args.table, &self.registry, &self.store)?;
        checkout.set_customer(args.customer);

        let rows = client.list_tables().await?;
        let request = checkout.build_order(&self.registry, &rows)?;
        checkout.ensure_table_free(&self.store)?;
        let order = client.create_order(&request).await?;
        checkout.mark_placed(order.id, &mut self.store)?;

        checkout.set_payment_method(args.payment);
        let (order_id, confirm) = checkout.confirm_request()?;
        let paid = client.confirm_order(order_id, confirm.payment_method).await?;
        println!(
            "Order #{} for {}: {} items, total {} paid by {}",
            paid.id,
            checkout.customer(),
            checkout.cart().total_item_count(),
            format_rupiah(checkout.cart().total()),
            confirm.payment_method
        );
        checkout.complete();
        Ok(())
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    let config = Config::from_env();
    config.validate()?;

    let log_dir = config.log_dir();
    init_logger_with_file(&config.log_level, config.log_json, Some(log_dir.as_path()))?;
    let removed = cleanup_old_logs(&log_dir, SystemClock.today(), LOG_RETENTION_DAYS)?;
    if removed > 0 {
        tracing::debug!(removed, "Old log files removed");
    }

    let mut app = App::open(config)?;

    match app.run(cli.command).await {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(err) => {
            tracing::error!(code = %err.code, error = %err.message, "Command failed");
            eprintln!("{}", err.message);
            Ok(ExitCode::FAILURE)
        }
    }
}
