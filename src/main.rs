//! Portaria - front-desk console for the asset loan service
//!
//! Each subcommand drives one console screen against the configured API.

use std::time::Duration;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use portaria_console::{
    config::AppConfig,
    models::{ItemForm, ItemKind, LoanStatus, UserForm, UserRole},
    render,
    screens::{
        ClearScreen, DashboardScreen, DeskScreen, DeskState, HistoryScreen, ItemsScreen, NewLoanScreen,
        UsersScreen,
    },
    ApiClient, PortariaApi,
};

#[derive(Parser)]
#[command(name = "portaria", version, about = "Front-desk console for the asset loan service")]
struct Cli {
    /// Override the configured API base address
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show the dashboard counters
    Dashboard,
    /// Interactive badge desk (reads badges and commands from stdin)
    Desk {
        /// Badge to load right away
        #[arg(long)]
        badge: Option<String>,
    },
    /// Manage the item catalog
    Items {
        #[command(subcommand)]
        action: ItemsCommand,
    },
    /// Manage registered users
    Users {
        #[command(subcommand)]
        action: UsersCommand,
    },
    /// Reservation history, open loans first
    History {
        /// Only this user's reservations
        #[arg(long)]
        badge: Option<String>,
    },
    /// Create a reservation for a user
    Loan {
        #[arg(long)]
        item: String,
        #[arg(long)]
        badge: String,
    },
    /// Register that a reserved item was picked up
    Pickup {
        loan: String,
        #[arg(long)]
        badge: String,
    },
    /// Register that an item was brought back
    Return {
        loan: String,
        #[arg(long)]
        badge: String,
    },
    /// Remove every reservation and release all items (irreversible)
    Clear {
        /// Confirm the operation
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum ItemsCommand {
    List,
    /// Only items that can be reserved
    Available,
    Show { id: String },
    Add(ItemArgs),
    Edit {
        id: String,
        #[command(flatten)]
        changes: ItemChanges,
    },
    /// Flip the availability flag
    Toggle { id: String },
    Delete {
        id: String,
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Args)]
struct ItemArgs {
    #[arg(long)]
    name: String,
    #[arg(long, default_value = "chave")]
    kind: ItemKind,
    #[arg(long)]
    location: String,
    /// Register the item as unavailable
    #[arg(long)]
    unavailable: bool,
}

#[derive(Args)]
struct ItemChanges {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    kind: Option<ItemKind>,
    #[arg(long)]
    location: Option<String>,
}

#[derive(Subcommand)]
enum UsersCommand {
    List,
    Show { id: String },
    /// Look a user up by badge number
    Find { badge: String },
    Add(UserArgs),
    Edit {
        id: String,
        #[command(flatten)]
        changes: UserChanges,
    },
    Delete {
        id: String,
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Args)]
struct UserArgs {
    #[arg(long)]
    name: String,
    #[arg(long, default_value = "aluno")]
    role: UserRole,
    #[arg(long)]
    badge: String,
    #[arg(long)]
    email: String,
}

#[derive(Args)]
struct UserChanges {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    role: Option<UserRole>,
    #[arg(long)]
    badge: Option<String>,
    #[arg(long)]
    email: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let mut config = AppConfig::load().context("Failed to load configuration")?;
    if let Some(url) = cli.api_url.clone() {
        config.api.base_url = url;
    }

    init_tracing(&config);

    let client = ApiClient::new(&config.api).context("Failed to create API client")?;
    tracing::debug!("Portaria console v{} using {}", env!("CARGO_PKG_VERSION"), client.base_url());
    let ttl = config.ui.notice_ttl();

    match cli.command {
        Command::Dashboard => dashboard(client, ttl).await,
        Command::Desk { badge } => desk(client, ttl, badge).await,
        Command::Items { action } => items(client, ttl, action).await,
        Command::Users { action } => users(client, ttl, action).await,
        Command::History { badge } => history(client, ttl, badge).await,
        Command::Loan { item, badge } => new_loan(client, ttl, &item, &badge).await,
        Command::Pickup { loan, badge } => {
            let mut screen = HistoryScreen::new(client, ttl);
            let result = screen.register_pickup(&loan, &badge).await.map(|_| ());
            report(screen.notices(), result)
        }
        Command::Return { loan, badge } => {
            let mut screen = HistoryScreen::new(client, ttl);
            let result = screen.register_return(&loan, &badge).await.map(|_| ());
            report(screen.notices(), result)
        }
        Command::Clear { yes } => clear(client, ttl, yes).await,
    }
}

fn init_tracing(config: &AppConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!(
            "portaria_console={level},portaria={level}",
            level = config.logging.level
        )
        .into()
    });

    let registry = tracing_subscriber::registry().with(filter);
    if config.logging.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

/// Print the screen's notice and turn a failed action into a failed exit
fn report(notices: &portaria_console::notice::NoticeBoard, result: portaria_console::ConsoleResult<()>) -> anyhow::Result<()> {
    if let Some(line) = render::notice(notices) {
        println!("{}", line);
    }
    result.map_err(|e| match e.status() {
        Some(status) => anyhow::Error::from(e).context(format!("Service answered with HTTP {}", status)),
        None => anyhow::Error::from(e),
    })
}

async fn dashboard(client: ApiClient, ttl: Duration) -> anyhow::Result<()> {
    let mut screen = DashboardScreen::new(client, ttl);
    match screen.load().await {
        Ok(snapshot) => {
            print!("{}", render::dashboard(snapshot));
            Ok(())
        }
        Err(e) => report(screen.notices(), Err(e)),
    }
}

async fn desk(client: ApiClient, ttl: Duration, badge: Option<String>) -> anyhow::Result<()> {
    let mut desk = DeskScreen::new(client, ttl);

    if let Some(badge) = badge {
        let _ = desk.lookup(&badge).await;
        show_desk(&desk);
    }

    println!("Scan or type a badge. With a user loaded: r <item> reserve, p <loan> pickup, d <loan> return, x reset, q quit.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line == "q" {
            break;
        }

        let loaded = matches!(desk.state(), DeskState::UserLoaded(_));
        let (command, argument) = line.split_once(' ').unwrap_or((line, ""));

        let outcome = match (loaded, command) {
            (false, "") => continue,
            (false, _) => desk.lookup(line).await.map(|_| ()),
            (true, "r") => desk.checkout(argument).await.map(|_| ()),
            (true, "p") => desk.pickup(argument.trim()).await.map(|_| ()),
            (true, "d") => desk.give_back(argument.trim()).await.map(|_| ()),
            (true, "x") => {
                desk.reset();
                Ok(())
            }
            (true, _) => Ok(()),
        };
        if let Err(e) = outcome {
            tracing::debug!("Desk action failed: {}", e);
        }

        show_desk(&desk);
    }

    Ok(())
}

fn show_desk<A: PortariaApi>(desk: &DeskScreen<A>) {
    if let Some(line) = render::notice(desk.notices()) {
        println!("{}", line);
    }
    match desk.loaded() {
        Some(loaded) => {
            println!(
                "\n{} - {} - badge {}",
                loaded.user.name, loaded.user.role, loaded.user.badge
            );
            println!("\nActive reservations:");
            print!("{}", render::loans(&loaded.active_loans));
            println!("\nAvailable items:");
            print!("{}", render::items(&loaded.available_items));
        }
        None => println!("\nWaiting for a badge..."),
    }
}

async fn items(client: ApiClient, ttl: Duration, action: ItemsCommand) -> anyhow::Result<()> {
    let mut screen = ItemsScreen::new(client.clone(), ttl);
    match action {
        ItemsCommand::List => {
            let result = screen.load().await;
            if result.is_ok() {
                print!("{}", render::items(screen.items()));
                println!(
                    "{} available, {} in use",
                    screen.available_count(),
                    screen.unavailable_count()
                );
            }
            report(screen.notices(), result)
        }
        ItemsCommand::Available => {
            let items = client.list_available_items().await?;
            print!("{}", render::items(&items));
            Ok(())
        }
        ItemsCommand::Show { id } => {
            let item = client.get_item(&id).await?;
            print!("{}", render::items(std::slice::from_ref(&item)));
            Ok(())
        }
        ItemsCommand::Add(args) => {
            let form = ItemForm {
                name: args.name,
                kind: args.kind,
                available: !args.unavailable,
                location: args.location,
            };
            let result = screen.save(None, &form).await;
            if let Ok(item) = &result {
                print!("{}", render::items(std::slice::from_ref(item)));
            }
            report(screen.notices(), result.map(|_| ()))
        }
        ItemsCommand::Edit { id, changes } => {
            let current = client.get_item(&id).await?;
            let mut form = ItemForm::from(&current);
            if let Some(name) = changes.name {
                form.name = name;
            }
            if let Some(kind) = changes.kind {
                form.kind = kind;
            }
            if let Some(location) = changes.location {
                form.location = location;
            }
            let result = screen.save(Some(&id), &form).await;
            report(screen.notices(), result.map(|_| ()))
        }
        ItemsCommand::Toggle { id } => {
            screen.load().await?;
            let result = screen.toggle_availability(&id).await;
            report(screen.notices(), result.map(|_| ()))
        }
        ItemsCommand::Delete { id, yes } => {
            screen.load().await?;
            let result = screen.delete(&id, yes).await;
            report(screen.notices(), result)
        }
    }
}

async fn users(client: ApiClient, ttl: Duration, action: UsersCommand) -> anyhow::Result<()> {
    let mut screen = UsersScreen::new(client.clone(), ttl);
    match action {
        UsersCommand::List => {
            let result = screen.load().await;
            if result.is_ok() {
                print!("{}", render::users(screen.users()));
                let counts: Vec<String> = UserRole::ALL
                    .iter()
                    .map(|role| format!("{}: {}", role, screen.count_by_role(*role)))
                    .collect();
                println!("{}", counts.join(", "));
            }
            report(screen.notices(), result)
        }
        UsersCommand::Show { id } => {
            let user = client.get_user(&id).await?;
            print!("{}", render::users(std::slice::from_ref(&user)));
            Ok(())
        }
        UsersCommand::Find { badge } => {
            let user = client.find_user_by_badge(badge.trim()).await?;
            print!("{}", render::users(std::slice::from_ref(&user)));
            Ok(())
        }
        UsersCommand::Add(args) => {
            let form = UserForm {
                name: args.name,
                role: args.role,
                badge: args.badge,
                email: args.email,
            };
            let result = screen.save(None, &form).await;
            if let Ok(user) = &result {
                print!("{}", render::users(std::slice::from_ref(user)));
            }
            report(screen.notices(), result.map(|_| ()))
        }
        UsersCommand::Edit { id, changes } => {
            let current = client.get_user(&id).await?;
            let mut form = UserForm::from(&current);
            if let Some(name) = changes.name {
                form.name = name;
            }
            if let Some(role) = changes.role {
                form.role = role;
            }
            if let Some(badge) = changes.badge {
                form.badge = badge;
            }
            if let Some(email) = changes.email {
                form.email = email;
            }
            let result = screen.save(Some(&id), &form).await;
            report(screen.notices(), result.map(|_| ()))
        }
        UsersCommand::Delete { id, yes } => {
            screen.load().await?;
            let result = screen.delete(&id, yes).await;
            report(screen.notices(), result)
        }
    }
}

async fn history(client: ApiClient, ttl: Duration, badge: Option<String>) -> anyhow::Result<()> {
    let mut screen = HistoryScreen::new(client, ttl);
    let result = match badge {
        Some(badge) => screen.load_for_badge(&badge).await,
        None => screen.load().await,
    };
    if result.is_ok() {
        print!("{}", render::loans(screen.loans()));
        println!(
            "{} open, {} returned",
            screen.active().count(),
            screen.finished().count()
        );
        let counts: Vec<String> = LoanStatus::ALL
            .iter()
            .map(|status| format!("{}: {}", status, screen.count(*status)))
            .collect();
        println!("{}", counts.join(", "));
    }
    report(screen.notices(), result)
}

async fn new_loan(client: ApiClient, ttl: Duration, item: &str, badge: &str) -> anyhow::Result<()> {
    let mut screen = NewLoanScreen::new(client, ttl);
    screen.select_item(item);
    screen.select_user(badge);
    let result = screen.submit().await;
    if let Ok(loan) = &result {
        print!("{}", render::loans(std::slice::from_ref(loan)));
    }
    report(screen.notices(), result.map(|_| ()))
}

async fn clear(client: ApiClient, ttl: Duration, yes: bool) -> anyhow::Result<()> {
    let mut screen = ClearScreen::new(client, ttl);
    screen.set_confirmed(yes);
    match screen.clear_all().await {
        Ok(summary) => {
            print!("{}", render::clear_report(summary));
            Ok(())
        }
        Err(e) => report(screen.notices(), Err(e)),
    }
}
