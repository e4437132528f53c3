//! CLI trainer example.
//!
//! Usage: `cargo run --example cli_trainer -- [mode]`, where mode is one of
//! `default`, `pairs`, `uncommon` or `deviation-training`.

#![allow(clippy::missing_docs_in_private_items)]

use std::io::{self, Write};
use std::time::{SystemTime, UNIX_EPOCH};

use bjtrain::{
    Advance, Card, Event, Game, GameMode, GameOptions, GameStep, HandView, Move, Request, Snapshot,
    Verdict,
};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let mode = match std::env::args().nth(1).map(|arg| arg.parse::<GameMode>()) {
        None => GameMode::Default,
        Some(Ok(mode)) => mode,
        Some(Err(err)) => {
            eprintln!("{err}");
            return;
        }
    };

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    let options = GameOptions::default()
        .with_players(3)
        .with_human_seat(Some(1))
        .with_mode(mode);
    let mut game = match Game::new(options, seed) {
        Ok(game) => game,
        Err(err) => {
            eprintln!("Invalid table: {err}");
            return;
        }
    };
    game.subscribe(Box::new(print_event));

    println!("Blackjack trainer ({mode:?}), type 'q' to quit");

    let mut input = None;
    loop {
        let request = match game.advance(input.take()) {
            Ok(Advance::NeedInput(request)) => request,
            Ok(Advance::RoundComplete(result)) => {
                for seat in result.players.iter().filter(|p| p.seat == 1) {
                    println!("Round over: net {} | balance {}", seat.net, seat.balance);
                }
                if result.reshuffled {
                    println!("Shoe reshuffled.");
                }
                continue;
            }
            Err(err) => {
                println!("Round error: {err}");
                break;
            }
        };

        let Some(line) = prompt_line(&prompt_for(&request)) else {
            break;
        };
        match line.as_str() {
            "q" | "quit" => break,
            "" if request.step == GameStep::GameResult => input = Some(Move::NextGame),
            token => match parse_move(token) {
                Some(choice) => input = Some(choice),
                None => println!("Unknown move."),
            },
        }
    }

    println!(
        "Decisions: {} | correct: {} | accuracy {:.1}%",
        game.moves_seen(),
        game.moves_correct(),
        game.accuracy() * 100.0
    );
}

fn print_event(event: &Event) {
    match event {
        Event::Change(snapshot) if snapshot.focused.is_some_and(|h| h.seat == 1) => {
            print_table(snapshot);
        }
        Event::Change(snapshot) if snapshot.step == GameStep::GameResult => {
            print_table(snapshot);
        }
        Event::CreateRecord(record) => {
            if let Verdict::Mismatch(hint) = &record.verdict {
                println!(
                    "  Hint: {} was wrong, {} says {}",
                    record.input, hint.code, hint.expected
                );
            }
        }
        Event::Shuffle { cards, .. } => println!("Shuffled {cards} cards."),
        _ => {}
    }
}

fn print_table(snapshot: &Snapshot) {
    println!(
        "\nShoe: {} cards | running count {} | true count {:.1}",
        snapshot.cards_remaining, snapshot.running_count, snapshot.true_count
    );
    println!("Dealer: {}", format_hand(&snapshot.dealer));
    for seat in &snapshot.players {
        for (index, hand) in seat.hands.iter().enumerate() {
            let focused = snapshot
                .focused
                .is_some_and(|h| h.seat == seat.seat && h.hand == index);
            println!(
                "{} Seat {} hand {}: {} | bet {}{} | {:?}",
                if focused { "*" } else { " " },
                seat.seat,
                index,
                format_hand(hand),
                hand.bet,
                if hand.doubled { " (doubled)" } else { "" },
                hand.outcome.map_or_else(|| format!("{:?}", hand.status), |o| format!("{o:?}"))
            );
        }
    }
}

fn format_hand(hand: &HandView) -> String {
    let cards: Vec<String> = hand
        .cards
        .iter()
        .map(|card| card.as_ref().map_or_else(|| "??".to_string(), format_card))
        .collect();
    format!("{} (value {})", cards.join(" "), hand.total)
}

fn format_card(card: &Card) -> String {
    let rank = match card.rank {
        1 => "A".to_string(),
        11 => "J".to_string(),
        12 => "Q".to_string(),
        13 => "K".to_string(),
        n => n.to_string(),
    };
    let suit = match card.suit {
        bjtrain::Suit::Hearts => "h",
        bjtrain::Suit::Diamonds => "d",
        bjtrain::Suit::Clubs => "c",
        bjtrain::Suit::Spades => "s",
    };
    format!("{rank}{suit}")
}

fn prompt_for(request: &Request) -> String {
    match request.step {
        GameStep::AskInsurance => "Insurance? [i]nsure / [n]o: ".to_string(),
        GameStep::WaitingForMove => {
            "[h]it [s]tand [d]ouble s[p]lit s[u]rrender: ".to_string()
        }
        GameStep::GameResult => "Press enter for the next game: ".to_string(),
    }
}

fn parse_move(token: &str) -> Option<Move> {
    match token {
        "h" => Some(Move::Hit),
        "s" => Some(Move::Stand),
        "d" => Some(Move::Double),
        "p" => Some(Move::Split),
        "u" => Some(Move::Surrender),
        "i" | "y" => Some(Move::TakeInsurance),
        "n" => Some(Move::NoInsurance),
        other => other.parse().ok(),
    }
}

fn prompt_line(prompt: &str) -> Option<String> {
    print!("{prompt}");
    let _ = io::stdout().flush();

    let mut input = String::new();
    match io::stdin().read_line(&mut input) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(input.trim().to_lowercase()),
    }
}
