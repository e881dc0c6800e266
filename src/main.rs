// A card game board made with the Bevy game engine.

use clap::Parser;
use lootboard::core::{create_app, CliArgs};
use lootboard::utils::logger::init_custom_logger;

fn main() {
    init_custom_logger();

    let cli_args = CliArgs::parse();
    match create_app(cli_args) {
        Ok(mut app) => {
            app.run();
        }
        Err(e) => {
            eprintln!("Failed to start lootboard: {e:#}");
            std::process::exit(1);
        }
    }
}
