use clap::Parser;
use forkify::view::format_count;
use forkify::{App, AppConfig, Outcome, ServingsDirection};
use log::{debug, error};
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};

/// Search recipes, scale servings, build a shopping list and keep favorites
#[derive(Parser, Debug)]
#[command(name = "forkify", version, about)]
struct Cli {
    /// Configuration file (defaults to ./forkify.toml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Base URL of the recipe API (overrides FORKIFY__API__BASE_URL)
    #[arg(long)]
    api_url: Option<String>,

    /// Directory where liked recipes are stored
    #[arg(long)]
    storage_dir: Option<PathBuf>,

    /// Keep liked recipes in memory only
    #[arg(long)]
    ephemeral: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

const HELP: &str = "\
Commands:
  search <query>      search for recipes
  page <n>            show page n of the last search
  open <id>           show a recipe
  + | -               one serving more / less
  add                 add the recipe's ingredients to the shopping list
  list                show the shopping list
  del <item-id>       remove a shopping list item
  count <item-id> <n> change a shopping list item's count
  like                like or unlike the current recipe
  likes               show liked recipes
  help                show this help
  quit                exit";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut logger = env_logger::Builder::from_default_env();
    if cli.verbose {
        logger.filter_level(log::LevelFilter::Debug);
    }
    logger.init();

    let mut config = match &cli.config {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load()?,
    };
    if let Some(url) = cli.api_url {
        config.api.base_url = url;
    }
    if let Some(dir) = cli.storage_dir {
        config.storage.dir = Some(dir);
    }
    debug!("{:#?}", config);

    let mut builder = App::builder().config(config);
    if cli.ephemeral {
        builder = builder.ephemeral();
    }
    let app = builder.build()?;

    app.restore_likes();
    println!("Type 'help' for commands.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        let (command, rest) = line.split_once(' ').unwrap_or((line, ""));
        let rest = rest.trim();

        let outcome = match command {
            "" => continue,
            "quit" | "exit" => break,
            "help" => {
                println!("{}", HELP);
                continue;
            }
            "search" => app.control_search(rest).await,
            "page" => match rest.parse::<usize>() {
                Ok(page) if page > 0 => app.go_to_page(page - 1),
                _ => {
                    println!("Usage: page <n>");
                    continue;
                }
            },
            "open" => app.control_recipe(rest).await,
            "+" | "-" | "inc" | "dec" => match command.parse::<ServingsDirection>() {
                Ok(direction) => app.control_servings(direction),
                Err(e) => {
                    println!("{}", e);
                    continue;
                }
            },
            "add" => app.control_list(),
            "list" => {
                print_list(&app);
                continue;
            }
            "del" => app.delete_list_item(rest),
            "count" => {
                let mut parts = rest.split_whitespace();
                match (parts.next(), parts.next().map(str::parse::<f64>)) {
                    (Some(id), Some(Ok(count))) => app.update_list_count(id, count),
                    _ => {
                        println!("Usage: count <item-id> <n>");
                        continue;
                    }
                }
            }
            "like" => app.control_like(),
            "likes" => {
                print_likes(&app);
                continue;
            }
            other => {
                println!("Unknown command '{}'. Type 'help' for commands.", other);
                continue;
            }
        };

        match outcome {
            Outcome::Ignored => println!("Nothing to do."),
            Outcome::Failed(e) => error!("{}", e),
            Outcome::Rendered | Outcome::Stale => {}
        }
    }

    Ok(())
}

fn print_list(app: &App) {
    app.with_state(|state| {
        if state.list.is_empty() {
            println!("Shopping list is empty.");
        }
        for item in state.list.items() {
            println!(
                "  [{}] {} {} {}",
                item.id,
                format_count(Some(item.count)),
                item.unit,
                item.ingredient
            );
        }
    });
}

fn print_likes(app: &App) {
    app.with_state(|state| {
        if state.likes.num_likes() == 0 {
            println!("No liked recipes yet.");
        }
        for like in state.likes.likes() {
            println!("  [{}] {} ({})", like.id, like.title, like.author);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_api_url_only_from_flag() {
        let cli = Cli::try_parse_from(["forkify", "--api-url", "http://localhost/api"]).unwrap();
        assert_eq!(cli.api_url.as_deref(), Some("http://localhost/api"));
        assert!(Cli::try_parse_from(["forkify"]).unwrap().api_url.is_none());
    }
}
