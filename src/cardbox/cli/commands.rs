use super::render::{colors_enabled, print_messages, render_card, render_list};
use super::setup::{Cli, Commands};
use cardbox::blob::{DataUrlHost, ImageBlob};
use cardbox::config::CardboxConfig;
use cardbox::error::{CardboxError, Result};
use cardbox::logging::{init_logging, Verbosity};
use cardbox::persist::CardPersistence;
use cardbox::repo::CardRepository;
use cardbox::store::fs::FsSlots;
use cardbox::view::{Confirm, Coordinator};
use clap::Parser;
use directories::ProjectDirs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

const HOME_ENV: &str = "CARDBOX_HOME";

struct AppContext {
    coordinator: Coordinator<FsSlots, DataUrlHost>,
    config: CardboxConfig,
}

/// Field values collected from `add` / `edit` flags.
#[derive(Debug)]
struct FormInput {
    title: Option<String>,
    description: Option<String>,
    category: Option<String>,
    image_url: Option<String>,
    image_file: Option<PathBuf>,
    no_image: bool,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let verbosity = if cli.quiet {
        Verbosity::Quiet
    } else {
        Verbosity::from_occurrences(cli.verbose)
    };
    init_logging(verbosity);

    let data_dir = resolve_data_dir(cli.data_dir)?;
    debug!(data_dir = %data_dir.display(), "resolved data directory");

    // Config does not need the card slot loaded.
    match cli.command {
        Some(Commands::Config { key, value }) => handle_config(&data_dir, key, value),
        None | Some(Commands::List) => handle_list(&init_context(&data_dir)?),
        Some(Commands::View { id }) => handle_view(&init_context(&data_dir)?, id),
        Some(Commands::Add {
            title,
            description,
            category,
            image_url,
            image_file,
        }) => handle_add(
            &mut init_context(&data_dir)?,
            FormInput {
                title,
                description,
                category,
                image_url,
                image_file,
                no_image: false,
            },
        ),
        Some(Commands::Edit {
            id,
            title,
            description,
            category,
            image_url,
            image_file,
            no_image,
        }) => handle_edit(
            &mut init_context(&data_dir)?,
            id,
            FormInput {
                title,
                description,
                category,
                image_url,
                image_file,
                no_image,
            },
        ),
        Some(Commands::Delete { id, yes }) => {
            handle_delete(&mut init_context(&data_dir)?, id, yes)
        }
    }
}

fn resolve_data_dir(flag: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = flag {
        return Ok(dir);
    }
    if let Some(dir) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    ProjectDirs::from("com", "cardbox", "cardbox")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| CardboxError::Store("Could not determine data directory".to_string()))
}

fn init_context(data_dir: &Path) -> Result<AppContext> {
    let config = CardboxConfig::load(data_dir)?;
    let persistence = CardPersistence::with_slot(FsSlots::new(data_dir), config.slot.clone());
    let repo = CardRepository::open(persistence);
    Ok(AppContext {
        coordinator: Coordinator::new(repo, DataUrlHost::new()),
        config,
    })
}

fn handle_list(ctx: &AppContext) -> Result<()> {
    let view = ctx.coordinator.list_view();
    print!("{}", render_list(&view, colors_enabled()));
    Ok(())
}

fn handle_view(ctx: &AppContext, id: u64) -> Result<()> {
    let card = ctx.coordinator.repository().get(id)?;
    let view = ctx.coordinator.card_view(card);
    print!("{}", render_card(&view, colors_enabled()));
    Ok(())
}

fn handle_add(ctx: &mut AppContext, input: FormInput) -> Result<()> {
    ctx.coordinator.open_add();
    submit_form(ctx, input)
}

fn handle_edit(ctx: &mut AppContext, id: u64, input: FormInput) -> Result<()> {
    ctx.coordinator.open_edit(id)?;
    submit_form(ctx, input)
}

/// Fills the open dialog from flags and submits it. The dialog is cancelled on
/// any failure so a pending upload is always released.
fn submit_form(ctx: &mut AppContext, input: FormInput) -> Result<()> {
    let outcome = fill_form(ctx, input).and_then(|_| ctx.coordinator.submit());
    match outcome {
        Ok(result) => {
            print_messages(&result.messages);
            Ok(())
        }
        Err(e) => {
            ctx.coordinator.cancel();
            Err(e)
        }
    }
}

fn fill_form(ctx: &mut AppContext, input: FormInput) -> Result<()> {
    let coordinator = &mut ctx.coordinator;
    {
        let form = coordinator.form_mut()?;
        if let Some(title) = input.title {
            form.set_title(title);
        }
        if let Some(description) = input.description {
            form.set_description(description);
        }
        if let Some(category) = input.category {
            form.set_category(category);
        }
    }

    if input.no_image {
        coordinator.clear_image()?;
    }
    if let Some(url) = input.image_url {
        coordinator.set_image_url(url)?;
    }
    // A file chosen after the URL wins, matching the dialog's precedence.
    if let Some(path) = input.image_file {
        let blob = ImageBlob::from_path(&path)?;
        coordinator.select_file(&blob)?;
    }
    Ok(())
}

/// Reads a yes/no answer from stdin. Anything but y/yes declines.
struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn confirm(&mut self, prompt: &str) -> bool {
        print!("{} [y/N]: ", prompt);
        if io::stdout().flush().is_err() {
            return false;
        }
        let mut input = String::new();
        if io::stdin().read_line(&mut input).is_err() {
            return false;
        }
        matches!(input.trim().to_ascii_lowercase().as_str(), "y" | "yes")
    }
}

fn handle_delete(ctx: &mut AppContext, id: u64, yes: bool) -> Result<()> {
    let result = if yes || !ctx.config.confirm_delete {
        ctx.coordinator.delete(id, &mut |_: &str| true)?
    } else {
        ctx.coordinator.delete(id, &mut StdinConfirm)?
    };
    print_messages(&result.messages);
    Ok(())
}

fn handle_config(data_dir: &Path, key: Option<String>, value: Option<String>) -> Result<()> {
    let mut config = CardboxConfig::load(data_dir)?;
    match (key, value) {
        (None, _) => {
            for key in CardboxConfig::KEYS {
                println!("{} = {}", key, config.get(key)?);
            }
        }
        (Some(key), None) => println!("{} = {}", key, config.get(&key)?),
        (Some(key), Some(value)) => {
            config.set(&key, &value)?;
            config.save(data_dir)?;
            println!("{} = {}", key, config.get(&key)?);
        }
    }
    Ok(())
}
