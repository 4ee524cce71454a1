mod prompt;
mod render;
mod settings;

use std::sync::Arc;

use clap::Parser;
use stave_domain::{NoteCatalog, StaffMode};
use stave_tutor::{
    KeyLabelMode, NoteSelector, SessionController, SessionDriver, SessionSnapshot, TokioClock,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use crate::prompt::{parse_line, PromptLine, HELP};
use crate::render::{render_keyboard, render_snapshot, render_toggle, status_changed};
use crate::settings::{load_settings, save_settings, PersistedSettings, TrainerSettings};

#[derive(Parser, Debug)]
#[command(author, version, about = "Practice reading notes on the grand staff", long_about = None)]
struct Cli {
    /// Staves to draw notes from: both, treble or bass
    #[arg(long)]
    staff: Option<StaffMode>,
    /// Require the exact pitch name, octave and sharp included
    #[arg(long, conflicts_with = "relaxed")]
    strict: bool,
    /// Accept any key with the right letter
    #[arg(long)]
    relaxed: bool,
    /// Print the pitch name next to the note
    #[arg(long)]
    show_pitch: bool,
    /// Piano key labels: both, name, solfege or none
    #[arg(long)]
    labels: Option<KeyLabelMode>,
    /// Print snapshots as JSON lines instead of text
    #[arg(long)]
    json: bool,
    /// Store the effective settings for next time
    #[arg(long)]
    save: bool,
    /// Seed for a reproducible note sequence
    #[arg(long)]
    seed: Option<u64>,
}

impl Cli {
    fn apply(&self, settings: &mut TrainerSettings) {
        if let Some(staff) = self.staff {
            settings.session.staff_mode = staff;
        }
        if self.strict {
            settings.session.strict_mode = true;
        }
        if self.relaxed {
            settings.session.strict_mode = false;
        }
        if self.show_pitch {
            settings.show_pitch = true;
        }
        if let Some(labels) = self.labels {
            settings.key_labels = labels;
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let persisted = match load_settings() {
        Ok(Some(persisted)) => persisted,
        Ok(None) => {
            debug!("no saved settings, using defaults");
            PersistedSettings::default()
        }
        Err(err) => {
            warn!(error = %format!("{err:#}"), "ignoring unreadable settings, using defaults");
            PersistedSettings::default()
        }
    };
    let mut settings = TrainerSettings::from_persisted(&persisted);
    cli.apply(&mut settings);
    if cli.save {
        save_settings(&settings.to_persisted())?;
        info!("settings saved");
    }

    let catalog = Arc::new(NoteCatalog::standard());
    let selector = cli.seed.map(NoteSelector::seeded).unwrap_or_default();
    let controller =
        SessionController::start(catalog.clone(), settings.session, selector, TokioClock);
    let mut session = SessionDriver::spawn(controller);
    let mut updates = session.subscribe();

    println!("{HELP}\n");
    let mut shown = updates.borrow_and_update().clone();
    print_snapshot(&shown, &settings, cli.json)?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match parse_line(&line) {
                    PromptLine::Physical(key) => session.physical_key(key)?,
                    PromptLine::Click(name) => session.key_click(name)?,
                    PromptLine::Staff(mode) => {
                        settings.session.staff_mode = mode;
                        session.configure(settings.session)?;
                        println!("staff: {mode} (from the next note)");
                    }
                    PromptLine::Strict(strict) => {
                        settings.session.strict_mode = strict;
                        session.configure(settings.session)?;
                        println!("{}", render_toggle("strict", strict));
                    }
                    PromptLine::Labels(labels) => {
                        settings.key_labels = labels;
                        println!("labels: {labels}");
                    }
                    PromptLine::ShowPitch(show) => {
                        settings.show_pitch = show;
                        println!("{}", render_toggle("pitch", show));
                        if !cli.json {
                            print_snapshot(&session.latest(), &settings, false)?;
                        }
                    }
                    PromptLine::Keys => println!("{}", render_keyboard(&catalog, &settings)),
                    PromptLine::Help => println!("{HELP}"),
                    PromptLine::Quit => break,
                    PromptLine::Empty => {}
                    PromptLine::Invalid(message) => println!("{message}"),
                }
            }
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                let next = updates.borrow_and_update().clone();
                if status_changed(&shown, &next) {
                    print_snapshot(&next, &settings, cli.json)?;
                }
                shown = next;
            }
        }
    }

    session.shutdown().await;
    Ok(())
}

fn print_snapshot(
    snapshot: &SessionSnapshot,
    settings: &TrainerSettings,
    json: bool,
) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string(snapshot)?);
    } else {
        println!("{}", render_snapshot(snapshot, settings));
    }
    Ok(())
}
