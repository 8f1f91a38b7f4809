use std::error::Error;

use serde::Deserialize;
use splice::prelude::*;
use tokio::sync::mpsc;

// ---------------------------------------------------------------------------
// Party description
// ---------------------------------------------------------------------------

/// Played when no party file is given on the command line.
const DEFAULT_PARTY: &str = r#"{
    "config": { "name": "Demo Night", "num_tiles": 2, "seed": 7 },
    "rounds": 3,
    "players": ["Ada", "Bo", "Cy", "Di", "Ed", "Flo"],
    "prompts": [
        "lighthouse",
        "paper plane",
        ["hot dog", "hotdog"],
        "a large red dog"
    ]
}"#;

#[derive(Debug, Deserialize)]
struct Party {
    #[serde(default)]
    config: GameConfig,
    #[serde(default = "default_rounds")]
    rounds: u32,
    players: Vec<String>,
    prompts: Vec<Prompt>,
}

fn default_rounds() -> u32 {
    1
}

impl Party {
    fn load(path: Option<&str>) -> Result<Self, Box<dyn Error>> {
        let raw = match path {
            Some(path) => std::fs::read_to_string(path)?,
            None => DEFAULT_PARTY.to_string(),
        };
        Ok(serde_json::from_str(&raw)?)
    }
}

// ---------------------------------------------------------------------------
// Scripted guessing
// ---------------------------------------------------------------------------

/// How the n-th guesser of a round mangles the answer: the first one is
/// way off, the rest are close with a typo or a stray filler word.
fn scripted_guess(answer: &str, n: usize) -> String {
    match n % 3 {
        0 => "no idea".to_string(),
        1 => {
            let mut chars: Vec<char> = answer.chars().collect();
            if chars.len() > 3 {
                chars.pop();
            }
            chars.into_iter().collect()
        }
        _ => format!("the {answer}"),
    }
}

/// Prints every queued event as a JSON line, the way a transport would
/// put it on the wire.
fn flush(
    inbox: &mut mpsc::UnboundedReceiver<GameEvent>,
    codec: &JsonCodec,
) -> Result<(), SpliceError> {
    while let Ok(event) = inbox.try_recv() {
        let bytes = codec.encode(&event)?;
        println!("{}", String::from_utf8_lossy(&bytes));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    splice::logging::init("info");

    let path = std::env::args().nth(1);
    let party = Party::load(path.as_deref())?;
    let seed = party.config.seed;

    let mut games = GameManager::new();
    let code = games.create_game(party.config, PromptDeck::new(party.prompts, seed))?;
    let game = games.handle(&code)?;
    tracing::info!(%code, "party ready");

    let codec = JsonCodec;
    let mut inboxes = Vec::new();
    for (i, name) in party.players.iter().enumerate() {
        let (tx, rx) = mpsc::unbounded_channel();
        game.add_player(PlayerOptions::new(format!("conn-{i}"), name.as_str()), tx)
            .await?;
        inboxes.push(rx);
    }
    // The first player's inbox doubles as the public event log.
    if let Some(log) = inboxes.first_mut() {
        flush(log, &codec)?;
    }

    for _ in 0..party.rounds {
        let round = game.start_round().await?;

        // Peek at what a drawer was told so the script knows the answer.
        let summary = game.snapshot().await?;
        let mut answer = None;
        for player in summary.players.iter().filter(|p| p.is_drawer()) {
            while let Ok(event) = inboxes[player.id().index()].try_recv() {
                if let GameEvent::PromptRevealed { prompt, .. } = event {
                    answer = prompt.primary().map(str::to_owned);
                }
            }
        }
        let Some(answer) = answer else {
            tracing::warn!(round_id = round.id, "no drawer saw the prompt");
            continue;
        };

        for (n, guesser) in summary.players.iter().filter(|p| p.is_guesser()).enumerate() {
            let guess = scripted_guess(&answer, n);
            match games
                .submit_guess(&code, guesser.connection_id().clone(), guess)
                .await
            {
                Ok(result) if result.game_over => break,
                Ok(_) => {}
                Err(err) => tracing::warn!(%err, "guess rejected"),
            }
        }

        if let Some(log) = inboxes.first_mut() {
            flush(log, &codec)?;
        }
    }

    let summary = game.snapshot().await?;
    let mut board = summary.players;
    board.sort_by(|a, b| b.score().cmp(&a.score()).then(a.id().cmp(&b.id())));
    println!("--- {} ({}) ---", summary.name, summary.code);
    for player in &board {
        println!("{:>4}  {}", player.score(), player.display_name());
    }

    games.destroy_game(&code).await?;
    Ok(())
}
