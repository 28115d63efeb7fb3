use clap::Args;
use focusquest_core::{Config, MessageContext, Messenger};

#[derive(Args)]
pub struct SayArgs {
    /// Message moment: start, complete or break
    #[arg(default_value = "start")]
    context: MessageContext,

    /// Override the configured personality
    #[arg(long)]
    personality: Option<String>,

    /// Fixed RNG seed for reproducible output
    #[arg(long)]
    seed: Option<u64>,
}

pub fn run(args: SayArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let mut profile = config.companion.to_profile();
    if let Some(personality) = args.personality {
        profile.personality = personality;
    }

    let mut messenger = match args.seed {
        Some(seed) => Messenger::seeded(seed),
        None => Messenger::new(),
    };
    println!("{}", messenger.message(&profile, args.context));
    Ok(())
}
