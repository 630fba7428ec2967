use chrono::Utc;
use clap::Parser;
use colored::*;
use directories::ProjectDirs;
use flashdeck::api::DeckApi;
use flashdeck::categories::CategoryView;
use flashdeck::config::DeckConfig;
use flashdeck::error::{DeckError, Result};
use flashdeck::model::{AuthKind, Card, CardDraft};
use flashdeck::notify::{Notice, NoticeLevel};
use flashdeck::store::fs::FileStore;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use unicode_width::UnicodeWidthStr;

mod args;
use args::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("{} {}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();
}

struct AppContext {
    api: DeckApi<FileStore>,
}

fn run(cli: Cli) -> Result<()> {
    let mut ctx = init_context(&cli)?;

    match cli.command {
        Some(Commands::Login {
            user,
            password,
            provider,
        }) => handle_login(&mut ctx, user, password, provider),
        Some(Commands::Signup {
            user,
            email,
            password,
        }) => handle_signup(&mut ctx, &user, &email, &password),
        Some(Commands::Logout) => handle_logout(&mut ctx),
        Some(Commands::Whoami) => handle_whoami(&ctx),
        Some(Commands::Categories) | None => handle_categories(&ctx),
        Some(Commands::Cards { category }) => handle_cards(&ctx, category),
        Some(Commands::Show { id }) => handle_show(&ctx, &id),
        Some(Commands::Add {
            category,
            text,
            image_url,
            color,
        }) => handle_add(&mut ctx, category, text, image_url, color),
        Some(Commands::Edit {
            id,
            category,
            text,
            image_url,
            clear_image,
            color,
            clear_color,
        }) => {
            let image_url = if clear_image { Some(None) } else { image_url.map(Some) };
            let color = if clear_color { Some(None) } else { color.map(Some) };
            handle_edit(&mut ctx, &id, category, text, image_url, color)
        }
        Some(Commands::Delete { id }) => handle_delete(&mut ctx, &id),
        Some(Commands::Fav { id }) => handle_fav(&mut ctx, &id),
        Some(Commands::Theme { toggle }) => handle_theme(&mut ctx, toggle),
    }?;

    print_notice(ctx.api.notices().visible(Utc::now()));
    Ok(())
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let home = match &cli.home {
        Some(dir) => dir.clone(),
        None => default_home()?,
    };
    tracing::debug!(home = %home.display(), "opening deck");

    let config = DeckConfig::load(&home)?;
    let store = FileStore::new(home);
    let api = DeckApi::open(store, &config)?;
    Ok(AppContext { api })
}

fn default_home() -> Result<PathBuf> {
    ProjectDirs::from("com", "flashdeck", "flashdeck")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| DeckError::Store("Could not determine a data directory".to_string()))
}

fn handle_login(
    ctx: &mut AppContext,
    user: Option<String>,
    password: Option<String>,
    provider: Option<String>,
) -> Result<()> {
    let view = match (provider, user, password) {
        (Some(provider), _, _) => ctx.api.login_with_assertion(&provider)?,
        (None, Some(user), Some(password)) => ctx.api.login(&user, &password)?,
        _ => return Err(DeckError::InvalidCredentials),
    };
    println!("Logged in as {} ({})", view.id.bold(), view.role);
    Ok(())
}

fn handle_signup(ctx: &mut AppContext, user: &str, email: &str, password: &str) -> Result<()> {
    let view = ctx.api.sign_up(user, email, password)?;
    println!("Welcome, {}! You are now logged in.", view.id.bold());
    Ok(())
}

fn handle_logout(ctx: &mut AppContext) -> Result<()> {
    if ctx.api.session().is_none() {
        println!("{}", "Not logged in.".dimmed());
        return Ok(());
    }
    ctx.api.logout()?;
    println!("Logged out.");
    Ok(())
}

fn handle_whoami(ctx: &AppContext) -> Result<()> {
    match ctx.api.session() {
        Some(view) => {
            let via = match view.auth {
                AuthKind::Password => String::new(),
                AuthKind::Assertion => format!(" {}", "(provider login, unverified)".dimmed()),
            };
            println!("{} ({}){}", view.id.bold(), view.role, via);
        }
        None => println!("{}", "Not logged in.".dimmed()),
    }
    Ok(())
}

const LABEL_WIDTH: usize = 18;

fn handle_categories(ctx: &AppContext) -> Result<()> {
    for entry in ctx.api.category_counts().iter() {
        let label = entry.view.label();
        let padding = " ".repeat(LABEL_WIDTH.saturating_sub(label.width()));
        if entry.is_selectable() {
            let name = match entry.view {
                CategoryView::Favorites => label.yellow().bold(),
                CategoryView::Category(_) => label.bold(),
            };
            println!("  {}{}{}", name, padding, entry.count);
        } else {
            println!("  {}{}{}", label.dimmed(), padding, "(empty)".dimmed());
        }
    }
    Ok(())
}

fn handle_cards(ctx: &AppContext, category: Option<String>) -> Result<()> {
    let cards: Vec<&Card> = match category {
        Some(label) => ctx
            .api
            .cards_for_view(Some(&CategoryView::from_label(&label))),
        None => ctx.api.cards().iter().collect(),
    };
    print_cards(ctx, &cards);
    Ok(())
}

fn handle_show(ctx: &AppContext, id: &str) -> Result<()> {
    match ctx.api.card(id) {
        Some(card) => print_full_card(ctx, card),
        None => println!("No card with id {}.", id),
    }
    Ok(())
}

fn handle_add(
    ctx: &mut AppContext,
    category: String,
    text: String,
    image_url: Option<String>,
    color: Option<String>,
) -> Result<()> {
    let draft = CardDraft {
        category,
        text,
        image_url,
        background_color: color,
    };
    let card = ctx.api.create_card(draft)?;
    println!("{}", card.id.dimmed());
    Ok(())
}

fn handle_edit(
    ctx: &mut AppContext,
    id: &str,
    category: Option<String>,
    text: Option<String>,
    image_url: Option<Option<String>>,
    color: Option<Option<String>>,
) -> Result<()> {
    // Unknown ids go through unchanged so the API reports the no-op.
    let mut card = ctx.api.card(id).cloned().unwrap_or_else(|| Card {
        id: id.to_string(),
        category: String::new(),
        text: String::new(),
        image_url: None,
        background_color: None,
    });
    if let Some(category) = category {
        card.category = category;
    }
    if let Some(text) = text {
        card.text = text;
    }
    // `Some(None)` clears the field, `None` keeps it.
    if let Some(image_url) = image_url {
        card.image_url = image_url;
    }
    if let Some(color) = color {
        card.background_color = color;
    }
    ctx.api.update_card(card)?;
    Ok(())
}

fn handle_delete(ctx: &mut AppContext, id: &str) -> Result<()> {
    ctx.api.delete_card(id)?;
    Ok(())
}

fn handle_fav(ctx: &mut AppContext, id: &str) -> Result<()> {
    let now_favorite = ctx.api.toggle_favorite(id)?;
    if ctx.api.card(id).is_none() {
        println!("{}", format!("Note: there is no card with id {}.", id).yellow());
    }
    if now_favorite {
        println!("{} Added {} to favorites.", FAV_MARKER.yellow(), id);
    } else {
        println!("Removed {} from favorites.", id);
    }
    Ok(())
}

fn handle_theme(ctx: &mut AppContext, toggle: bool) -> Result<()> {
    let theme = if toggle {
        ctx.api.toggle_theme()?
    } else {
        ctx.api.theme()
    };
    println!("Theme: {}", theme);
    Ok(())
}

const FAV_MARKER: &str = "★";
const PREVIEW_WIDTH: usize = 70;

fn print_cards(ctx: &AppContext, cards: &[&Card]) {
    if cards.is_empty() {
        println!("No cards found.");
        return;
    }

    // Ids are printed whole so they can be passed back to show/edit/fav.
    let id_width = cards.iter().map(|c| c.id.width()).max().unwrap_or(0);
    for card in cards {
        let marker = if ctx.api.favorites().contains(&card.id) {
            FAV_MARKER.yellow().to_string()
        } else {
            " ".to_string()
        };
        let label = &card.category;
        let padding = " ".repeat(LABEL_WIDTH.saturating_sub(label.width()));
        let id_padding = " ".repeat(id_width.saturating_sub(card.id.width()));
        println!(
            "{} {}{}  {}{}{}",
            marker,
            card.id.dimmed(),
            id_padding,
            label.cyan(),
            padding,
            truncate(&card.text, PREVIEW_WIDTH)
        );
    }
}

fn print_full_card(ctx: &AppContext, card: &Card) {
    let marker = if ctx.api.favorites().contains(&card.id) {
        format!(" {}", FAV_MARKER.yellow())
    } else {
        String::new()
    };
    println!("{} {}{}", card.category.cyan().bold(), card.id.dimmed(), marker);
    println!("--------------------------------");
    println!("{}", card.text);
    if let Some(url) = &card.image_url {
        println!("{} {}", "image:".dimmed(), url);
    }
    if let Some(color) = &card.background_color {
        println!("{} {}", "color:".dimmed(), color);
    }
}

fn truncate(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    let mut out = String::new();
    for ch in text.chars() {
        if out.width() + 1 >= max_width {
            break;
        }
        out.push(ch);
    }
    out.push('…');
    out
}

fn print_notice(notice: Option<&Notice>) {
    let Some(notice) = notice else {
        return;
    };
    match notice.level {
        NoticeLevel::Info => println!("{}", notice.text.dimmed()),
        NoticeLevel::Success => println!("{}", notice.text.green()),
        NoticeLevel::Removed => println!("{}", notice.text.red()),
        NoticeLevel::Warning => println!("{}", notice.text.yellow()),
        NoticeLevel::Error => println!("{}", notice.text.red()),
    }
}
