//! Headless console front-end for the Dropfour client.
//!
//! This is the composition root: it owns the process's single [`GameClient`]
//! and plays one game against the first advertised algorithm, printing the
//! board after every move. Set `DROPFOUR_WS_URL` to point somewhere other
//! than the default `ws://localhost:8000`.

use std::sync::Arc;

use dropfour::prelude::*;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = ClientConfig::from_env();
    eprintln!("connecting to {}", config.endpoint);

    let mut client = GameClient::connect(&config, Arc::new(LogNotifier)).await?;

    let algorithms = client.algorithms().await;
    println!("available algorithms: {algorithms:?}");

    let algorithm = algorithms
        .first()
        .cloned()
        .unwrap_or_else(|| "MiniMax".to_owned());
    println!("starting a game against {algorithm}");
    client.store().begin_game();
    client.start_game(&algorithm, 2).await;

    let mut moves = client.store().watch_moves();
    let mut screens = client.store().watch_screen();
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                println!("interrupted");
                break;
            }
            changed = moves.changed() => {
                if changed.is_err() {
                    break;
                }
                if let Some(latest) = client.store().moves().first() {
                    println!("{} played column {}", latest.player, latest.column);
                }
                print!("{}", client.store().board());
            }
            changed = screens.changed() => {
                if changed.is_err() {
                    break;
                }
                match client.store().screen() {
                    Screen::Draw => {
                        println!("draw");
                        break;
                    }
                    Screen::Winner => {
                        println!("you win");
                        break;
                    }
                    Screen::Loser => {
                        println!("you lose");
                        break;
                    }
                    Screen::AlgorithmSelect | Screen::InGame => {}
                }
            }
        }
    }

    client.shutdown().await;
    Ok(())
}
