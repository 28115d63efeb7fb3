//! Interactive session runner.
//!
//! The CLI owns the tick scheduler: a 1 Hz tokio interval drives
//! `Quest::tick()` while the session runs. The core never sees the
//! clock, only the ticks.

use std::io::Write as _;
use std::time::Duration;

use clap::Args;
use focusquest_core::{
    AmbientAudio, Config, Event, Quest, SilentAudio, SoundKind, TimerMode,
};
use tokio::time::MissedTickBehavior;

#[derive(Args)]
pub struct RunArgs {
    /// Timer mode to start in
    #[arg(long, default_value = "pomodoro", conflicts_with_all = ["dragon", "treasure"])]
    mode: TimerMode,

    /// Session length in minutes (defaults to the mode's configured duration)
    #[arg(long)]
    minutes: Option<u64>,

    /// Focus sessions to complete before stopping; breaks run in between
    #[arg(long, default_value = "1")]
    cycles: u32,

    /// Fight the Dragon of the Day with this description
    #[arg(long)]
    dragon: Option<String>,

    /// Hunt a freshly added treasure with this name
    #[arg(long)]
    treasure: Option<String>,

    /// Ambient sound to play (see `focusquest sounds`)
    #[arg(long)]
    sound: Option<SoundKind>,

    /// Ambient volume 0-100
    #[arg(long)]
    volume: Option<u8>,

    /// Fixed RNG seed for reproducible companion messages
    #[arg(long)]
    seed: Option<u64>,

    /// Print the final timer snapshot as JSON
    #[arg(long)]
    json: bool,
}

pub fn run(args: RunArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let mut quest = Quest::from_config(&config);
    if let Some(seed) = args.seed {
        quest.seed_messages(seed);
    }

    // Ambient audio is a collaborator; the CLI plugs in the silent
    // backend and reports what a real one would play.
    let mut audio = SilentAudio::new();
    let configured: SoundKind = config.audio.sound.parse().unwrap_or(SoundKind::None);
    let sound = args.sound.unwrap_or(configured);
    audio.set_volume(args.volume.unwrap_or_else(|| config.audio.volume.min(100) as u8));
    audio.play(sound)?;
    if let Some(kind) = audio.playing() {
        println!(
            "ambient: {} ({}%) -- {}",
            kind.display_name(),
            audio.volume(),
            kind.description()
        );
    }

    let explicit_secs = args.minutes.map(|m| m.saturating_mul(60));
    if let Some(description) = &args.dragon {
        quest.set_dragon_description(description)?;
        let secs = explicit_secs
            .unwrap_or_else(|| (config.durations.dragon_minutes as u64).saturating_mul(60));
        quest.start_dragon_hunt(secs)?;
    } else if let Some(name) = &args.treasure {
        let id = quest.add_treasure(name)?;
        let secs = explicit_secs
            .unwrap_or_else(|| (config.durations.treasure_minutes as u64).saturating_mul(60));
        quest.start_treasure_hunt(&id, secs)?;
    } else if args.mode != quest.engine().mode() || explicit_secs.is_some() {
        quest.switch_mode(args.mode, explicit_secs)?;
    }

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(drive(&mut quest, &args))?;
    audio.stop();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&quest.snapshot())?);
    }
    Ok(())
}

async fn drive(quest: &mut Quest, args: &RunArgs) -> Result<(), Box<dyn std::error::Error>> {
    let primary = quest.engine().mode();
    let mut sessions_done = 0u32;

    let (event, greeting) = quest.start()?;
    log::debug!("session started: {event:?}");
    println!("{greeting}");

    let mut ticker = tokio::time::interval(Duration::from_secs(1));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The first interval tick fires immediately; consume it so the
    // engine sees its first tick after one real second.
    ticker.tick().await;

    loop {
        ticker.tick().await;
        let completion = quest.tick();
        render(quest);

        let Some((event, cheer)) = completion else {
            continue;
        };
        log::debug!("session completed: {event:?}");
        println!();
        println!("{cheer}");

        let finished = quest.engine().mode();
        // Cosmetic grace so "completed" is visible before re-arming.
        tokio::time::sleep(Duration::from_secs(quest.completion_grace_secs())).await;

        match finished {
            TimerMode::DragonSlaying => {
                quest.finish_dragon_session()?;
                let dragon = quest.dragon();
                println!(
                    "Battle session done: \"{}\" ({} so far)",
                    dragon.description, dragon.sessions_spent
                );
                return Ok(());
            }
            TimerMode::TreasureHunt => {
                let (_, message) = quest.complete_active_treasure()?;
                println!("Treasure collected! {message}");
                return Ok(());
            }
            _ => {}
        }

        if finished == primary {
            sessions_done += 1;
            if sessions_done >= args.cycles {
                return Ok(());
            }
        }

        if let Some((event, message)) = quest.rearm() {
            log::debug!("re-armed: {event:?}");
            if let Some(message) = message {
                println!("{message}");
            }
        }
        let (event, _) = quest.start()?;
        log::debug!("next session started: {event:?}");
        println!("-- {} --", quest.engine().mode().label());
    }
}

fn render(quest: &Quest) {
    if let Event::StateSnapshot {
        mode,
        clock,
        progress,
        ..
    } = quest.snapshot()
    {
        let pct = (progress * 100.0).round() as u32;
        print!("\r{:<13} {clock}  {pct:>3}%", mode.label());
        let _ = std::io::stdout().flush();
    }
}
