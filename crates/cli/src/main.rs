//! CLI for generating and editing AI-assisted slide decks.

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use deck_core::{
    clear_presentation, load_presentation, save_presentation, ColumnSide, FileSessionStore,
    OutlineFormatter, Presentation, Slide, SlideTemplate,
};
use deck_generate::{
    ClientConfig, GenerationRequest, OpenRouterClient, RegenerationRequest, SlideGenerator,
};
use std::fs;
use std::path::{Path, PathBuf};

/// Session file used when neither `--session` nor `DECK_SESSION` is given.
const DEFAULT_SESSION_FILE: &str = ".deck-session.json";

/// Generate a slide deck with a language model and edit it slide by slide.
#[derive(Parser, Debug)]
#[command(name = "deck")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Session file holding the active presentation (default: $DECK_SESSION or ./.deck-session.json)
    #[arg(short, long, global = true)]
    session: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a new presentation and make it the active one
    Generate {
        /// What the presentation is about
        #[arg(short, long)]
        topic: String,

        /// Extra instructions for the generator
        #[arg(short, long, default_value = "")]
        prompt: String,

        /// Reference text file(s) to include verbatim
        #[arg(short, long = "reference")]
        references: Vec<PathBuf>,

        /// Number of slides (default: 5)
        #[arg(short = 'n', long)]
        slides: Option<usize>,
    },

    /// Print the active presentation
    Show {
        /// Print the stored JSON instead of an outline
        #[arg(long)]
        json: bool,

        /// Bullets shown per list slide
        #[arg(short, long, default_value = "3")]
        bullets: usize,
    },

    /// List the available slide templates
    Templates,

    /// Switch a slide to another template
    Template {
        /// Slide number, starting at 1
        #[arg(value_parser = parse_number)]
        slide: usize,

        /// Target template
        #[arg(value_parser = parse_template)]
        template: SlideTemplate,
    },

    /// Ask the model for a better version of one slide
    Regenerate {
        /// Slide number, starting at 1
        #[arg(value_parser = parse_number)]
        slide: usize,

        /// What to improve
        #[arg(short, long)]
        prompt: Option<String>,
    },

    /// Edit one field of a slide
    Edit {
        /// Slide number, starting at 1
        #[arg(value_parser = parse_number)]
        slide: usize,

        #[command(subcommand)]
        action: EditAction,
    },

    /// Discard the active presentation
    Clear,
}

#[derive(Subcommand, Debug)]
enum EditAction {
    /// Set the slide title
    Title { text: String },
    /// Set the subtitle (empty to clear)
    Subtitle { text: String },
    /// Set the author (empty to clear)
    Author { text: String },
    /// Set the quote text
    Quote { text: String },
    /// Set one column of a two-column slide
    Column { side: Side, text: String },
    /// Set the image URL (empty to clear)
    Image { url: String },
    /// Append a paragraph
    AddParagraph,
    /// Replace paragraph N (starting at 1)
    SetParagraph {
        #[arg(value_parser = parse_number)]
        index: usize,
        text: String,
    },
    /// Remove paragraph N (starting at 1)
    RemoveParagraph {
        #[arg(value_parser = parse_number)]
        index: usize,
    },
    /// Append a bullet
    AddItem,
    /// Replace bullet N (starting at 1)
    SetItem {
        #[arg(value_parser = parse_number)]
        index: usize,
        text: String,
    },
    /// Remove bullet N (starting at 1)
    RemoveItem {
        #[arg(value_parser = parse_number)]
        index: usize,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Side {
    Left,
    Right,
}

impl From<Side> for ColumnSide {
    fn from(side: Side) -> Self {
        match side {
            Side::Left => ColumnSide::Left,
            Side::Right => ColumnSide::Right,
        }
    }
}

/// Parse a 1-based position; zero is rejected.
fn parse_number(arg: &str) -> std::result::Result<usize, String> {
    match arg.parse::<usize>() {
        Ok(0) => Err("numbering starts at 1".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(e.to_string()),
    }
}

fn parse_template(tag: &str) -> std::result::Result<SlideTemplate, String> {
    tag.parse().map_err(|e: deck_core::Error| e.to_string())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    if args.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    let mut store = FileSessionStore::new(session_path(args.session.as_ref()));
    log::debug!("using session file {}", store.path().display());

    match args.command {
        Command::Generate {
            topic,
            prompt,
            references,
            slides,
        } => {
            if topic.trim().is_empty() {
                bail!("Topic must not be empty");
            }

            let mut request = GenerationRequest::new(topic).with_prompt(prompt);
            for path in &references {
                request = request.with_reference(read_reference(path)?);
            }
            if let Some(count) = slides {
                request = request.with_slide_count(count);
            }

            let presentation = generator()
                .handle_generate_presentation(&request, &mut store)
                .await
                .map_err(|e| anyhow!("{}. Please try again.", e.body.error))?;

            print!("{}", OutlineFormatter::new().format_with_newline(&presentation));
        }

        Command::Show { json, bullets } => {
            let presentation = active_presentation(&store)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&presentation)?);
            } else {
                let formatter = OutlineFormatter::new().with_max_list_items(bullets);
                print!("{}", formatter.format_with_newline(&presentation));
            }
        }

        Command::Templates => {
            for template in SlideTemplate::ALL {
                println!(
                    "{:<12} {:<12} {}",
                    template.as_str(),
                    template.label(),
                    template.description()
                );
            }
        }

        Command::Template { slide, template } => {
            let mut presentation = active_presentation(&store)?;
            let index = slide - 1;

            presentation.change_template(index, template)?;
            save_presentation(&mut store, &presentation)?;
            print_slide(&presentation, index)?;
        }

        Command::Regenerate { slide, prompt } => {
            let mut presentation = active_presentation(&store)?;
            let index = slide - 1;

            let mut request = RegenerationRequest::for_slide(presentation.slide(index)?.clone());
            if let Some(prompt) = prompt {
                request = request.with_prompt(prompt);
            }

            let response = generator()
                .handle_regenerate(&request)
                .await
                .map_err(|e| anyhow!("{}. Please try again.", e.body.error))?;

            presentation.replace_slide(index, response.slide)?;
            save_presentation(&mut store, &presentation)?;
            print_slide(&presentation, index)?;
        }

        Command::Edit { slide, action } => {
            let mut presentation = active_presentation(&store)?;
            let index = slide - 1;

            presentation.edit_slide(index, |s| apply_edit(s, action))?;
            save_presentation(&mut store, &presentation)?;
            print_slide(&presentation, index)?;
        }

        Command::Clear => {
            clear_presentation(&mut store)?;
            eprintln!("Cleared the active presentation");
        }
    }

    Ok(())
}

/// Resolve the session file from the flag, the environment, or the default.
fn session_path(flag: Option<&PathBuf>) -> PathBuf {
    flag.cloned()
        .or_else(|| std::env::var_os("DECK_SESSION").map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SESSION_FILE))
}

fn generator() -> SlideGenerator<OpenRouterClient> {
    SlideGenerator::new(OpenRouterClient::new(ClientConfig::from_env()))
}

/// Load the active presentation or explain how to start one.
fn active_presentation(store: &FileSessionStore) -> Result<Presentation> {
    load_presentation(store)?.ok_or_else(|| {
        anyhow!("No active presentation. Run `deck generate --topic <TOPIC>` to start one.")
    })
}

/// Read a reference file, labelled with its name.
fn read_reference(path: &Path) -> Result<String> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read reference file {}", path.display()))?;

    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("unknown");

    Ok(format!("File: {}\n{}", name, text))
}

fn apply_edit(slide: &mut Slide, action: EditAction) -> deck_core::Result<()> {
    match action {
        EditAction::Title { text } => slide.set_title(text),
        EditAction::Subtitle { text } => slide.set_subtitle(text),
        EditAction::Author { text } => slide.set_author(text),
        EditAction::Quote { text } => slide.set_quote(text),
        EditAction::Column { side, text } => slide.set_column(side.into(), text),
        EditAction::Image { url } => slide.set_image_url(Some(url)),
        EditAction::AddParagraph => slide.add_text_block(),
        EditAction::SetParagraph { index, text } => slide.set_text_block(index - 1, text)?,
        EditAction::RemoveParagraph { index } => {
            slide.remove_text_block(index - 1)?;
        }
        EditAction::AddItem => slide.add_list_item(),
        EditAction::SetItem { index, text } => slide.set_list_item(index - 1, text)?,
        EditAction::RemoveItem { index } => {
            slide.remove_list_item(index - 1)?;
        }
    }
    Ok(())
}

fn print_slide(presentation: &Presentation, index: usize) -> Result<()> {
    let slide = presentation.slide(index)?;
    println!("{}", OutlineFormatter::new().format_slide(index + 1, slide));
    Ok(())
}
