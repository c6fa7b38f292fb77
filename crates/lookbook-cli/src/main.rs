use std::io::{self, ErrorKind, Write};
use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{Args, Parser, Subcommand};
use lookbook_contracts::chat::{parse_intent, CHAT_HELP_COMMANDS};
use lookbook_contracts::outfits::visuals::clothing_icons;
use lookbook_contracts::outfits::{fallback_outfits, Lookbook};
use lookbook_contracts::preferences::{PreferenceCategory, Preferences};
use lookbook_engine::{
    default_provider_registry, ChatOutcome, FilterOutcome, OutfitSource, StylistEngine,
    DEFAULT_GEMINI_MODEL,
};
use serde_json::Value;

#[derive(Debug, Parser)]
#[command(name = "lookbook", version, about = "Conversational outfit stylist")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Interactive stylist chat.
    Chat(ChatArgs),
    /// Run one or more messages as chat turns and print the lookbook.
    Suggest(SuggestArgs),
    /// Print the offline catalog outfits for a set of preferences.
    Catalog(CatalogArgs),
}

#[derive(Debug, Args)]
struct ProviderArgs {
    /// `gemini` or `dryrun`. Defaults to gemini when an API key is configured.
    #[arg(long)]
    provider: Option<String>,
    #[arg(long, default_value = DEFAULT_GEMINI_MODEL)]
    model: String,
    /// Append session events to this JSONL file.
    #[arg(long)]
    events: Option<PathBuf>,
}

#[derive(Debug, Parser)]
struct ChatArgs {
    #[command(flatten)]
    provider: ProviderArgs,
}

#[derive(Debug, Parser)]
struct SuggestArgs {
    #[command(flatten)]
    provider: ProviderArgs,
    #[arg(long = "message", short = 'm', required = true)]
    messages: Vec<String>,
    /// Also write the lookbook as JSON.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Debug, Parser)]
struct CatalogArgs {
    #[arg(long)]
    style: Option<String>,
    #[arg(long)]
    season: Option<String>,
    #[arg(long)]
    occasion: Option<String>,
    #[arg(long)]
    gender: Option<String>,
    #[arg(long)]
    json: bool,
}

const DEFAULT_EXPORT_PATH: &str = "lookbook.json";

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    match run() {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("lookbook error: {err:#}");
            std::process::exit(1);
        }
    }
}

fn run() -> Result<i32> {
    let cli = Cli::parse();
    match cli.command {
        Command::Chat(args) => {
            run_chat(args)?;
            Ok(0)
        }
        Command::Suggest(args) => run_suggest(args),
        Command::Catalog(args) => run_catalog(args),
    }
}

fn build_engine(args: &ProviderArgs) -> Result<StylistEngine> {
    let registry = default_provider_registry(Some(args.model.as_str()));
    let available = registry.list().join(", ");
    let (provider, fallback_reason) = match registry.into_selected(args.provider.as_deref()) {
        Ok(selected) => selected,
        Err(reason) => bail!(reason),
    };
    if let Some(reason) = fallback_reason {
        if args.provider.is_some() {
            log::warn!("{reason} Available: {available}.");
        } else {
            log::info!("{reason}");
        }
    }
    Ok(StylistEngine::new(provider, args.events.clone()))
}

fn run_chat(args: ChatArgs) -> Result<()> {
    let mut engine = build_engine(&args.provider)?;

    let stdin = io::stdin();
    let mut line = String::new();

    println!(
        "Lookbook stylist ({}) started. Type /help for commands.",
        engine.provider_name()
    );

    loop {
        print!("> ");
        io::stdout().flush()?;

        line.clear();
        let read = match stdin.read_line(&mut line) {
            Ok(read) => read,
            Err(err) if err.kind() == ErrorKind::Interrupted => continue,
            Err(err) => return Err(err.into()),
        };
        if read == 0 {
            break;
        }

        let input = line.trim_end_matches(['\n', '\r']);
        let intent = parse_intent(input);

        match intent.action.as_str() {
            "noop" => continue,
            "help" => {
                println!("Commands: {}", CHAT_HELP_COMMANDS.join(" "));
            }
            "quit" => break,
            "chat" => {
                let message = intent.message.as_deref().unwrap_or(input);
                if let Some(outcome) = engine.handle_message(message) {
                    print_chat_outcome(&engine, &outcome);
                }
            }
            "show_preferences" => print_preferences(engine.preferences()),
            "toggle_filter" => {
                let category = value_as_non_empty_string(intent.command_args.get("category"));
                let value = value_as_non_empty_string(intent.command_args.get("value"));
                let (Some(category), Some(value)) = (category, value) else {
                    println!("/set requires a category and a value");
                    continue;
                };
                let Some(category) = PreferenceCategory::parse(&category) else {
                    println!("Unknown category '{category}'");
                    continue;
                };
                let outcome = engine.toggle_filter(category, &value);
                print_filter_outcome(&engine, &outcome);
            }
            "clear_preference" => {
                let Some(category) = value_as_non_empty_string(intent.command_args.get("category"))
                    .as_deref()
                    .and_then(PreferenceCategory::parse)
                else {
                    println!("/clear requires a category (style, color, season, occasion, gender)");
                    continue;
                };
                let outcome = engine.clear_preference(category);
                print_filter_outcome(&engine, &outcome);
            }
            "generate" => {
                let message = intent.raw.trim().to_string();
                let source = engine.regenerate_outfits(&message);
                print_source(&source);
                print_current_outfit(engine.lookbook());
            }
            "show_lookbook" => print_current_outfit(engine.lookbook()),
            "next_outfit" => {
                engine.lookbook_mut().next();
                print_current_outfit(engine.lookbook());
            }
            "previous_outfit" => {
                engine.lookbook_mut().previous();
                print_current_outfit(engine.lookbook());
            }
            "jump_outfit" => {
                let index = intent
                    .command_args
                    .get("index")
                    .and_then(Value::as_u64)
                    .map(|value| value as usize);
                let Some(index) = index else {
                    println!("/show requires an outfit number starting at 1");
                    continue;
                };
                if engine.lookbook_mut().jump(index - 1) {
                    print_current_outfit(engine.lookbook());
                } else {
                    println!("No outfit {index} (lookbook has {})", engine.lookbook().len());
                }
            }
            "export" => {
                let path = value_as_non_empty_string(intent.command_args.get("path"))
                    .unwrap_or_else(|| DEFAULT_EXPORT_PATH.to_string());
                let path = PathBuf::from(path);
                match engine.export_lookbook(&path) {
                    Ok(()) => println!("Lookbook written to {}", path.display()),
                    Err(err) => println!("Export failed: {err:#}"),
                }
            }
            "unknown" => {
                let command = value_as_non_empty_string(intent.command_args.get("command"))
                    .unwrap_or_default();
                println!("Unknown command /{command}. Type /help for commands.");
            }
            other => {
                log::debug!("unhandled chat action {other}");
            }
        }
    }

    Ok(())
}

fn run_suggest(args: SuggestArgs) -> Result<i32> {
    let mut engine = build_engine(&args.provider)?;
    let mut failed = false;
    for message in &args.messages {
        println!("you: {message}");
        if let Some(outcome) = engine.handle_message(message) {
            failed |= outcome.failed;
            print_chat_outcome(&engine, &outcome);
        }
    }

    if engine.lookbook().is_empty() {
        println!("No outfits yet: mention a style plus a season or an occasion.");
    } else {
        print_lookbook(engine.lookbook());
    }

    if let Some(out) = args.out.as_ref() {
        engine.export_lookbook(out)?;
        println!("Lookbook written to {}", out.display());
    }
    Ok(if failed { 2 } else { 0 })
}

fn run_catalog(args: CatalogArgs) -> Result<i32> {
    let mut prefs = Preferences::default();
    for (category, value) in [
        (PreferenceCategory::Style, args.style.as_deref()),
        (PreferenceCategory::Season, args.season.as_deref()),
        (PreferenceCategory::Occasion, args.occasion.as_deref()),
        (PreferenceCategory::Gender, args.gender.as_deref()),
    ] {
        if let Some(value) = value {
            prefs.set(category, value);
        }
    }
    let outfits = fallback_outfits(&prefs);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&outfits)?);
    } else {
        print_lookbook(&Lookbook::new(outfits));
    }
    Ok(0)
}

fn print_chat_outcome(engine: &StylistEngine, outcome: &ChatOutcome) {
    println!("stylist: {}", outcome.reply);
    for change in &outcome.preference_changes {
        println!("  [{} → {}]", change.category.label(), change.value);
    }
    if let Some(source) = outcome.outfits.as_ref() {
        print_source(source);
        print_current_outfit(engine.lookbook());
    }
}

fn print_filter_outcome(engine: &StylistEngine, outcome: &FilterOutcome) {
    match outcome.value.as_deref() {
        Some(value) => println!("{} set to {value}", outcome.category.label()),
        None => println!("{} cleared", outcome.category.label()),
    }
    if let Some(source) = outcome.outfits.as_ref() {
        print_source(source);
        print_current_outfit(engine.lookbook());
    }
}

fn print_source(source: &OutfitSource) {
    match source {
        OutfitSource::Model { count } => println!("Lookbook updated with {count} new outfits."),
        OutfitSource::Catalog { .. } => println!("Lookbook updated with catalog outfits."),
    }
}

fn print_preferences(prefs: &Preferences) {
    for category in PreferenceCategory::ALL {
        println!(
            "{:>16}: {}",
            category.label(),
            prefs.get(category).unwrap_or("-")
        );
    }
    let active = prefs.active_filters();
    if !active.is_empty() {
        println!("{:>16}: {}", "Active filters", active.join(", "));
    }
}

fn print_lookbook(lookbook: &Lookbook) {
    let mut cursor = lookbook.clone();
    for _ in 0..cursor.len() {
        print_current_outfit(&cursor);
        cursor.next();
    }
}

fn print_current_outfit(lookbook: &Lookbook) {
    let Some(outfit) = lookbook.current() else {
        println!("No outfits yet. Chat with the stylist to get personalized suggestions.");
        return;
    };

    let indicators = (0..lookbook.len())
        .map(|index| if index == lookbook.position() { "●" } else { "○" })
        .collect::<Vec<&str>>()
        .join(" ");
    println!();
    println!("{}  ({indicators})", outfit.title);
    println!("{}", outfit.description);

    let mut rng = rand::thread_rng();
    for icon in clothing_icons(outfit, &mut rng) {
        println!("  [{:<9} {}] {}", icon.kind.as_str(), icon.fill, icon.label);
    }
    for (label, items) in outfit.categories() {
        if items.is_empty() {
            continue;
        }
        println!("{label}:");
        for item in items {
            println!("  - {item}");
        }
    }
    if !outfit.notes.is_empty() {
        println!("Style notes:");
        for note in &outfit.notes {
            println!("  - {note}");
        }
    }
}

fn value_as_non_empty_string(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use serde_json::json;

    use super::{value_as_non_empty_string, Cli, Command};

    #[test]
    fn suggest_collects_repeated_messages() {
        let cli = Cli::try_parse_from([
            "lookbook",
            "suggest",
            "-m",
            "I love boho",
            "--message",
            "for summer",
            "--provider",
            "dryrun",
        ])
        .expect("parse suggest");
        let Command::Suggest(args) = cli.command else {
            panic!("expected suggest");
        };
        assert_eq!(args.messages, vec!["I love boho", "for summer"]);
        assert_eq!(args.provider.provider.as_deref(), Some("dryrun"));
        assert_eq!(args.provider.model, "gemini-2.0-flash");
    }

    #[test]
    fn suggest_requires_a_message() {
        assert!(Cli::try_parse_from(["lookbook", "suggest"]).is_err());
    }

    #[test]
    fn blank_command_args_are_missing() {
        assert_eq!(value_as_non_empty_string(Some(&json!("  "))), None);
        assert_eq!(value_as_non_empty_string(Some(&json!(null))), None);
        assert_eq!(
            value_as_non_empty_string(Some(&json!(" style "))).as_deref(),
            Some("style")
        );
    }
}
