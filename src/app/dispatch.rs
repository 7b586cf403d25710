//! Maps the parsed CLI onto the view flow. This is the only place that
//! performs I/O around the state machine: dialoguer prompts feed events in,
//! renderers print what the flow holds.

use anyhow::Result;
use chrono::Local;
use dialoguer::{Input, Select};

use crate::archive::{ArchiveStore, JsonArchiveStore};
use crate::classifier::{GeminiClassifier, prompt::SUGGESTIONS};
use crate::cli::{Cli, Commands};
use crate::config::Config;
use crate::flow::{Event, Flow, View};
use crate::ui::{render, style};

pub async fn dispatch(cli: Cli, config: Config) -> Result<()> {
    match cli.command {
        None | Some(Commands::Reflect { message: None }) => interactive(config).await,
        Some(Commands::Reflect {
            message: Some(message),
        }) => one_shot(config, message).await,
        Some(Commands::Archive) => {
            let store = JsonArchiveStore::open(config.archive_path());
            println!("{}", render::dashboard_view(store.entries(), Local::now()));
            Ok(())
        }
        Some(Commands::Config) => {
            show_config(&config);
            Ok(())
        }
    }
}

/// Single message mode: classify, show, log, exit.
async fn one_shot(config: Config, message: String) -> Result<()> {
    let mut store = JsonArchiveStore::open(config.archive_path());
    let classifier = GeminiClassifier::from_config(&config);
    let mut flow = Flow::new();

    flow.apply(Event::Submit(message), &mut store)?;
    if flow.view() != View::Processing {
        anyhow::bail!("nothing to classify: the situation text is empty");
    }

    run_classification(&classifier, &mut flow, &mut store).await?;

    if let Some(result) = flow.result() {
        let review = flow.review_mode(&store);
        println!("{}", render::result_view(result, review));
        flow.apply(Event::Commit, &mut store)?;
        println!("{}", style::success("Logged to archive."));
        Ok(())
    } else {
        if let Some(message) = flow.error() {
            eprintln!("{}", style::warn(message));
        }
        anyhow::bail!("classification failed")
    }
}

/// The interactive flow: input → processing → result → dashboard, until the
/// user quits.
async fn interactive(config: Config) -> Result<()> {
    let mut store = JsonArchiveStore::open(config.archive_path());
    let classifier = GeminiClassifier::from_config(&config);
    let mut flow = Flow::new();
    let mut suggestion_index = 0usize;

    loop {
        match flow.view() {
            View::Input => {
                if !input_view(&mut flow, &mut store, &mut suggestion_index)? {
                    return Ok(());
                }
            }
            View::Processing => {
                run_classification(&classifier, &mut flow, &mut store).await?;
            }
            View::Result => {
                if !result_view(&mut flow, &mut store)? {
                    return Ok(());
                }
            }
            View::Dashboard => {
                if !dashboard_view(&mut flow, &mut store)? {
                    return Ok(());
                }
            }
        }
    }
}

/// Await the single in-flight classify and feed the outcome back as an
/// event. Error kinds are logged here; the flow only learns "failure".
async fn run_classification(
    classifier: &GeminiClassifier,
    flow: &mut Flow,
    store: &mut JsonArchiveStore,
) -> Result<()> {
    println!("\n{}", style::dim("Thinking..."));
    println!(
        "{}\n",
        style::dim("\"99% of stress comes from misclassification.\"")
    );

    let input = flow.input().to_string();
    match classifier.classify(&input).await {
        Ok(raw) => flow.apply(Event::Success(raw), store)?,
        Err(err) => {
            tracing::warn!("classification failed: {err}");
            flow.apply(Event::Failure, store)?;
        }
    }
    Ok(())
}

/// Returns `false` when the user chose to quit.
fn input_view(
    flow: &mut Flow,
    store: &mut JsonArchiveStore,
    suggestion_index: &mut usize,
) -> Result<bool> {
    println!("\n{}", style::header("Whose Problem?"));
    println!("{}", style::dim("Untangle — tell me what's bothering you."));
    if let Some(message) = flow.error() {
        println!("\n{}", style::warn(message));
    }

    // Rotating three-suggestion window, advanced on every visit.
    let window: Vec<&str> = (0..3)
        .map(|offset| SUGGESTIONS[(*suggestion_index + offset) % SUGGESTIONS.len()])
        .collect();
    *suggestion_index = (*suggestion_index + 3) % SUGGESTIONS.len();

    let mut items: Vec<String> = vec!["Write my own...".into()];
    items.extend(window.iter().map(ToString::to_string));
    let archive_peek = !store.entries().is_empty();
    if archive_peek {
        items.push("View archive".into());
    }
    items.push("Quit".into());

    let choice = Select::new()
        .with_prompt("Pick a suggestion or write your own")
        .items(&items)
        .default(0)
        .interact()?;

    if choice == 0 {
        let text: String = Input::new()
            .with_prompt("What's bothering you?")
            .allow_empty(true)
            .interact_text()?;
        flow.apply(Event::Submit(text), store)?;
    } else if choice <= window.len() {
        flow.apply(Event::Submit(window[choice - 1].to_string()), store)?;
    } else if archive_peek && choice == items.len() - 2 {
        // Read-only peek; the flow stays on the input view.
        println!("{}", render::dashboard_view(store.entries(), Local::now()));
    } else {
        return Ok(false);
    }
    Ok(true)
}

fn result_view(flow: &mut Flow, store: &mut JsonArchiveStore) -> Result<bool> {
    let review = flow.review_mode(store);
    if let Some(result) = flow.result() {
        println!("{}", render::result_view(result, review));
    }

    let commit_label = if review {
        "Back to Archive"
    } else {
        "Log Achievement"
    };
    let items = [commit_label, "Quit"];
    let choice = Select::new().items(&items).default(0).interact()?;

    if choice == 0 {
        flow.apply(Event::Commit, store)?;
        return Ok(true);
    }
    Ok(false)
}

fn dashboard_view(flow: &mut Flow, store: &mut JsonArchiveStore) -> Result<bool> {
    println!("{}", render::dashboard_view(store.entries(), Local::now()));

    let mut items: Vec<String> = vec!["Add new entry".into()];
    let openable = store.entries().len().min(10);
    if openable > 0 {
        items.push("Open a log entry".into());
    }
    items.push("Quit".into());

    let choice = Select::new().items(&items).default(0).interact()?;

    if choice == 0 {
        flow.apply(Event::NewEntry, store)?;
        return Ok(true);
    }
    if openable > 0 && choice == 1 {
        let labels: Vec<String> = store
            .entries()
            .iter()
            .take(openable)
            .map(|entry| {
                let input = entry.original_input.as_deref().unwrap_or("(no input)");
                format!("{} — {}", entry.dominant_domain, input)
            })
            .collect();
        let picked = Select::new()
            .with_prompt("Which entry?")
            .items(&labels)
            .default(0)
            .interact()?;
        let entry = store.entries()[picked].clone();
        flow.apply(Event::OpenEntry(entry), store)?;
        return Ok(true);
    }
    Ok(false)
}

fn show_config(config: &Config) {
    let key_source = if std::env::var("GEMINI_API_KEY").is_ok() {
        "GEMINI_API_KEY env var"
    } else if std::env::var("GOOGLE_API_KEY").is_ok() {
        "GOOGLE_API_KEY env var"
    } else if config.api_key.is_some() {
        "config.toml"
    } else {
        "none"
    };

    println!("{}", style::header("Untangle configuration"));
    println!("  config   {}", style::dim(config.config_path.display()));
    println!("  archive  {}", style::dim(config.archive_path().display()));
    println!("  model    {}", config.model);
    println!("  temp     {}", config.temperature);
    println!("  api key  {key_source}");
}
