use focusquest_core::SoundKind;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    for kind in SoundKind::ALL {
        println!(
            "{:<18} {:<18} {}",
            kind.to_string(),
            kind.display_name(),
            kind.description()
        );
    }
    Ok(())
}
