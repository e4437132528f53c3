//! Game integration tests.

#![allow(clippy::float_cmp)]

use bjtrain::{
    Advance, Card, ConfigError, DeviationAdvisor, Event, EventLog, Game, GameMode, GameOptions,
    GameStep, Hand, HandOutcome, HandRef, Move, Request, RoundContext, RoundError, RoundResult,
    Snapshot, Strategy, Verdict, Winner,
};

/// Builds a one-seat table whose next draws have the given ranks.
///
/// Deal order is seat, dealer up-card, seat, dealer hole card.
fn table(options: GameOptions, ranks: &[u8]) -> Game {
    let mut game = Game::new(options, 42).unwrap();
    assert!(game.shoe_mut().stack_next(ranks));
    game
}

fn request(advance: Advance) -> Request {
    match advance {
        Advance::NeedInput(request) => request,
        Advance::RoundComplete(_) => panic!("round completed while a decision was expected"),
    }
}

fn complete(advance: Advance) -> RoundResult {
    match advance {
        Advance::RoundComplete(result) => result,
        Advance::NeedInput(request) => panic!("unexpected request {request:?}"),
    }
}

fn play(game: &mut Game, input: Move) -> Request {
    request(game.advance(Some(input)).unwrap())
}

fn next_game(game: &mut Game) -> RoundResult {
    complete(game.advance(Some(Move::NextGame)).unwrap())
}

const fn seat0(hand: usize) -> Option<HandRef> {
    Some(HandRef { seat: 0, hand })
}

fn never(_: &Request) -> Option<Move> {
    None
}

struct AlwaysStand;

impl DeviationAdvisor for AlwaysStand {
    fn suggest(&self, ctx: &RoundContext, _hand: &Hand) -> Option<Move> {
        (ctx.step == GameStep::WaitingForMove).then_some(Move::Stand)
    }
}

#[test]
fn invalid_options_build_no_game() {
    assert!(matches!(
        Game::new(GameOptions::default().with_decks(0), 1),
        Err(ConfigError::ZeroDecks)
    ));
    assert!(matches!(
        Game::new(GameOptions::default().with_human_seat(Some(2)), 1),
        Err(ConfigError::HumanSeatOutOfRange(2))
    ));
}

#[test]
fn natural_pays_three_to_two() {
    let mut game = table(GameOptions::default(), &[1, 9, 11, 8]);
    game.set_bet(0, 1000).unwrap();

    let waiting = request(game.advance(None).unwrap());
    assert_eq!(waiting.step, GameStep::GameResult);
    assert_eq!(waiting.hand, None);
    assert_eq!(game.player(0).unwrap().balance(), 11_500);

    let result = next_game(&mut game);
    let seat = &result.players[0];
    assert_eq!(seat.hands[0].outcome, HandOutcome::Blackjack);
    assert_eq!(seat.hands[0].payout, 2500);
    assert_eq!(seat.net, 1500);
    assert_eq!(seat.balance, 11_500);
    assert!(!result.dealer_blackjack);
}

#[test]
fn blackjack_rounding_follows_the_option() {
    let options = GameOptions::default().with_wait_for_next_game(false);
    let mut game = table(options, &[1, 9, 11, 8]);
    game.set_bet(0, 15).unwrap();
    let result = complete(game.advance(None).unwrap());
    assert_eq!(result.players[0].net, 22);

    let options = GameOptions::default()
        .with_wait_for_next_game(false)
        .with_rounding_blackjack(bjtrain::RoundingMode::Up);
    let mut game = table(options, &[1, 9, 11, 8]);
    game.set_bet(0, 15).unwrap();
    let result = complete(game.advance(None).unwrap());
    assert_eq!(result.players[0].net, 23);
}

#[test]
fn surrender_refunds_half_on_two_cards() {
    let mut game = table(GameOptions::default(), &[10, 10, 6, 7]);

    let first = request(game.advance(None).unwrap());
    assert_eq!(first.step, GameStep::WaitingForMove);
    assert_eq!(first.hand, seat0(0));
    assert_eq!(game.focused(), seat0(0));

    let waiting = play(&mut game, Move::Surrender);
    assert_eq!(waiting.step, GameStep::GameResult);
    assert_eq!(game.dealer_hand().unwrap().len(), 2);

    let result = next_game(&mut game);
    assert_eq!(result.players[0].hands[0].outcome, HandOutcome::Surrendered);
    assert_eq!(result.players[0].hands[0].payout, 5);
    assert_eq!(result.players[0].balance, 9995);
    assert_eq!(game.moves_seen(), 1);
    assert_eq!(game.moves_correct(), 1);
}

#[test]
fn surrender_is_ignored_after_a_hit() {
    let mut game = table(GameOptions::default(), &[10, 10, 3, 7, 3]);

    request(game.advance(None).unwrap());
    let again = play(&mut game, Move::Hit);
    assert_eq!(again.hand, seat0(0));
    assert_eq!(game.focused_hand().unwrap().total(), 16);

    let same = play(&mut game, Move::Surrender);
    assert_eq!(same, again);
    assert_eq!(game.focused_hand().unwrap().len(), 3);
    assert_eq!(game.moves_seen(), 1);

    let waiting = play(&mut game, Move::Stand);
    assert_eq!(waiting.step, GameStep::GameResult);
    let result = next_game(&mut game);
    assert_eq!(result.players[0].hands[0].outcome, HandOutcome::Lose);
    assert_eq!(result.players[0].balance, 9990);
    assert_eq!(result.dealer_value, 17);
}

#[test]
fn split_aces_stay_at_two_hands_without_resplit() {
    let mut game = table(GameOptions::default(), &[1, 6, 1, 10, 1, 5, 10]);

    let first = request(game.advance(None).unwrap());
    assert_eq!(first.hand, seat0(0));

    let after_split = play(&mut game, Move::Split);
    assert_eq!(after_split.hand, seat0(0));
    assert_eq!(game.total_cards(), 104);
    assert_eq!(game.cards_in_play(), 5);
    let player = game.player(0).unwrap();
    assert_eq!(player.active_hands(), 2);
    assert!(player.hand(0).unwrap().is_ace_pair());
    assert_eq!(player.hand(1).unwrap().total(), 16);
    assert!(!player.hand(0).unwrap().is_blackjack());

    let refused = play(&mut game, Move::Split);
    assert_eq!(refused, after_split);
    assert_eq!(game.player(0).unwrap().active_hands(), 2);

    let second = play(&mut game, Move::Stand);
    assert_eq!(second.hand, seat0(1));
    let waiting = play(&mut game, Move::Stand);
    assert_eq!(waiting.step, GameStep::GameResult);

    let result = next_game(&mut game);
    assert!(result.dealer_bust);
    assert_eq!(result.players[0].hands.len(), 2);
    assert!(
        result.players[0]
            .hands
            .iter()
            .all(|h| h.outcome == HandOutcome::Win)
    );
    assert_eq!(result.players[0].balance, 10_020);
    assert_eq!(game.moves_seen(), 3);
    assert_eq!(game.moves_correct(), 1);
}

#[test]
fn split_twenty_one_pays_even_money() {
    let options = GameOptions::default().with_wait_for_next_game(false);
    let mut game = table(options, &[1, 9, 1, 8, 10, 10]);

    request(game.advance(None).unwrap());
    let first = play(&mut game, Move::Split);
    assert_eq!(game.focused_hand().unwrap().total(), 21);
    assert_eq!(first.hand, seat0(0));

    let second = play(&mut game, Move::Stand);
    assert_eq!(second.hand, seat0(1));
    let result = complete(game.advance(Some(Move::Stand)).unwrap());

    let hands = &result.players[0].hands;
    assert_eq!(hands[0].outcome, HandOutcome::Win);
    assert_eq!(hands[0].payout, 20);
    assert_eq!(hands[1].outcome, HandOutcome::Win);
}

#[test]
fn double_takes_one_card_and_doubles_the_stake() {
    let mut game = table(GameOptions::default(), &[5, 6, 6, 10, 10, 10]);

    request(game.advance(None).unwrap());
    assert_eq!(game.total_cards(), 104);
    let waiting = play(&mut game, Move::Double);
    assert_eq!(waiting.step, GameStep::GameResult);
    assert_eq!(game.total_cards(), 104);
    assert_eq!(game.cards_in_play(), 6);
    assert!(game.player(0).unwrap().hand(0).unwrap().is_doubled());

    let result = next_game(&mut game);
    let hand = &result.players[0].hands[0];
    assert!(hand.doubled);
    assert_eq!(hand.bet, 20);
    assert_eq!(hand.player_value, 21);
    assert_eq!(hand.outcome, HandOutcome::Win);
    assert_eq!(result.players[0].balance, 10_020);
    assert_eq!(game.moves_correct(), 1);
}

#[test]
fn double_is_refused_after_a_hit() {
    let mut game = table(GameOptions::default(), &[2, 6, 3, 10, 2, 10]);

    request(game.advance(None).unwrap());
    let after_hit = play(&mut game, Move::Hit);
    assert_eq!(game.focused_hand().unwrap().total(), 7);

    let refused = play(&mut game, Move::Double);
    assert_eq!(refused, after_hit);
    assert_eq!(game.focused_hand().unwrap().bet(), 10);
    assert_eq!(game.player(0).unwrap().balance(), 9990);
}

#[test]
fn bust_settles_without_dealer_draws() {
    let log = EventLog::new();
    let mut game = table(GameOptions::default(), &[10, 9, 6, 8, 10]);
    game.subscribe(Box::new(log.clone()));

    request(game.advance(None).unwrap());
    let waiting = play(&mut game, Move::Hit);
    assert_eq!(waiting.step, GameStep::GameResult);

    let dealer = game.dealer_hand().unwrap();
    assert_eq!(dealer.len(), 2);
    assert!(dealer.cards().iter().all(|c| c.visible));

    let winners: Vec<Winner> = log
        .events()
        .iter()
        .filter_map(|e| match e {
            Event::HandWinner { winner, .. } => Some(*winner),
            _ => None,
        })
        .collect();
    assert_eq!(winners, [Winner::Dealer]);
}

#[test]
fn insurance_is_lost_without_a_ten_in_the_hole() {
    let mut game = table(GameOptions::default(), &[10, 1, 9, 7]);

    let ask = request(game.advance(None).unwrap());
    assert_eq!(ask.step, GameStep::AskInsurance);
    assert_eq!(ask.hand, seat0(0));

    let ignored = play(&mut game, Move::Hit);
    assert_eq!(ignored, ask);

    let turn = play(&mut game, Move::TakeInsurance);
    assert_eq!(turn.step, GameStep::WaitingForMove);
    assert_eq!(game.player(0).unwrap().balance(), 9985);

    let waiting = play(&mut game, Move::Stand);
    assert_eq!(waiting.step, GameStep::GameResult);

    let result = next_game(&mut game);
    let hand = &result.players[0].hands[0];
    assert_eq!(hand.insurance_bet, 5);
    assert_eq!(hand.insurance_payout, 0);
    assert_eq!(hand.outcome, HandOutcome::Win);
    assert_eq!(result.players[0].balance, 10_005);
    assert_eq!(game.moves_seen(), 2);
    assert_eq!(game.moves_correct(), 1);
}

#[test]
fn insurance_pays_against_a_dealer_natural() {
    let mut game = table(GameOptions::default(), &[10, 1, 9, 13]);

    request(game.advance(None).unwrap());
    let waiting = play(&mut game, Move::TakeInsurance);
    assert_eq!(waiting.step, GameStep::GameResult);

    let result = next_game(&mut game);
    let hand = &result.players[0].hands[0];
    assert!(result.dealer_blackjack);
    assert_eq!(hand.outcome, HandOutcome::Lose);
    assert_eq!(hand.insurance_payout, 15);
    assert_eq!(result.players[0].net, 0);
}

#[test]
fn naturals_push_against_each_other() {
    let mut game = table(GameOptions::default(), &[1, 1, 13, 12]);

    request(game.advance(None).unwrap());
    let waiting = play(&mut game, Move::NoInsurance);
    assert_eq!(waiting.step, GameStep::GameResult);

    let result = next_game(&mut game);
    assert_eq!(result.players[0].hands[0].outcome, HandOutcome::Push);
    assert_eq!(result.players[0].balance, 10_000);
}

#[test]
fn dealer_peeks_under_a_ten() {
    let mut game = table(GameOptions::default(), &[10, 10, 9, 1]);

    let waiting = request(game.advance(None).unwrap());
    assert_eq!(waiting.step, GameStep::GameResult);
    assert_eq!(game.moves_seen(), 0);

    let result = next_game(&mut game);
    assert!(result.dealer_blackjack);
    assert_eq!(result.players[0].hands[0].outcome, HandOutcome::Lose);
    assert_eq!(result.players[0].balance, 9990);
}

#[test]
fn dealer_soft_17_rule() {
    let ranks = [10, 6, 9, 1, 4];

    let mut stands = table(GameOptions::default().with_wait_for_next_game(false), &ranks);
    request(stands.advance(None).unwrap());
    let result = complete(stands.advance(Some(Move::Stand)).unwrap());
    assert_eq!(result.dealer_value, 17);
    assert_eq!(result.players[0].hands[0].outcome, HandOutcome::Win);

    let options = GameOptions::default()
        .with_wait_for_next_game(false)
        .with_stand_on_soft_17(false);
    let mut hits = table(options, &ranks);
    request(hits.advance(None).unwrap());
    let result = complete(hits.advance(Some(Move::Stand)).unwrap());
    assert_eq!(result.dealer_value, 21);
    assert_eq!(result.players[0].hands[0].outcome, HandOutcome::Lose);
}

#[test]
fn result_screen_waits_for_next_game() {
    let mut game = table(GameOptions::default(), &[10, 10, 6, 7]);
    request(game.advance(None).unwrap());
    let waiting = play(&mut game, Move::Stand);
    assert_eq!(waiting.step, GameStep::GameResult);
    assert_eq!(game.step(), GameStep::GameResult);

    assert_eq!(play(&mut game, Move::Hit), waiting);
    assert_eq!(request(game.advance(None).unwrap()), waiting);

    next_game(&mut game);
    assert_eq!(game.step(), GameStep::WaitingForMove);
    assert_eq!(game.focused(), None);
    assert_eq!(game.cards_in_play(), 0);
    assert_eq!(game.discard_tray().len(), 4);
}

#[test]
fn mismatches_are_recorded_with_hints() {
    let log = EventLog::new();
    let mut game = table(GameOptions::default(), &[10, 2, 2, 10, 10]);
    game.subscribe(Box::new(log.clone()));

    request(game.advance(None).unwrap());
    play(&mut game, Move::Stand);

    let records = log.records();
    assert_eq!(records.len(), 1);
    let record = &records[0];
    assert_eq!(record.input, Move::Stand);
    assert_eq!(record.total, 12);
    assert_eq!(record.dealer_up_card.unwrap().rank, 2);
    match &record.verdict {
        Verdict::Mismatch(hint) => {
            assert_eq!(hint.expected, Move::Hit);
            assert_eq!(hint.code, "H");
        }
        Verdict::Correct => panic!("standing on 12 against 2 is not basic strategy"),
    }
    assert_eq!(game.moves_seen(), 1);
    assert_eq!(game.moves_correct(), 0);
    assert_eq!(game.accuracy(), 0.0);
}

#[test]
fn deviation_training_checks_the_advisor_first() {
    let ranks = [10, 2, 2, 10, 10];

    let options = GameOptions::default().with_mode(GameMode::DeviationTraining);
    let log = EventLog::new();
    let mut game = Game::new(options, 42)
        .unwrap()
        .with_deviation_advisor(Box::new(AlwaysStand));
    assert!(game.shoe_mut().stack_next(&ranks));
    game.subscribe(Box::new(log.clone()));

    request(game.advance(None).unwrap());
    play(&mut game, Move::Hit);
    match &log.records()[0].verdict {
        Verdict::Mismatch(hint) => {
            assert_eq!(hint.code, "deviation");
            assert_eq!(hint.expected, Move::Stand);
        }
        Verdict::Correct => panic!("the advisor says stand"),
    }

    let mut plain = Game::new(GameOptions::default(), 42)
        .unwrap()
        .with_deviation_advisor(Box::new(AlwaysStand));
    assert!(plain.shoe_mut().stack_next(&ranks));
    request(plain.advance(None).unwrap());
    play(&mut plain, Move::Hit);
    assert_eq!(plain.moves_correct(), 1);
}

#[test]
fn deviation_aware_bots_follow_the_advisor() {
    let options = GameOptions::default()
        .with_human_seat(None)
        .with_seat_strategy(0, Strategy::DeviationAware);
    let mut game = Game::new(options, 42)
        .unwrap()
        .with_deviation_advisor(Box::new(AlwaysStand));
    assert!(game.shoe_mut().stack_next(&[10, 2, 2, 10, 10]));

    let result = game.run(&mut never).unwrap();
    let hand = &result.players[0].hands[0];
    assert_eq!(hand.player_value, 12);
    assert_eq!(hand.outcome, HandOutcome::Win);
    assert!(result.dealer_bust);
    assert_eq!(game.moves_seen(), 0);
}

#[test]
fn basic_strategy_bots_play_without_input() {
    let options = GameOptions::default()
        .with_human_seat(None)
        .with_players(2);
    let mut game = Game::new(options, 42).unwrap();
    assert!(game.shoe_mut().stack_next(&[10, 5, 6, 2, 10, 10, 10]));

    let result = game.run(&mut never).unwrap();
    // 12 against 6 stands; 15 against 6 stands. Dealer 16 draws a ten.
    assert_eq!(result.players[0].hands[0].player_value, 12);
    assert_eq!(result.players[1].hands[0].player_value, 15);
    assert!(result.dealer_bust);
}

#[test]
fn run_drives_a_scripted_player() {
    let mut game = table(GameOptions::default(), &[10, 10, 6, 7, 3]);
    let mut script = vec![Move::NextGame, Move::Stand, Move::Hit].into_iter();
    let mut reader = |_: &Request| script.next_back();
    let mut asked = Vec::new();
    let mut recording = |request: &Request| {
        asked.push(request.step);
        reader(request)
    };

    let result = game.run(&mut recording).unwrap();
    assert_eq!(
        asked,
        [
            GameStep::WaitingForMove,
            GameStep::WaitingForMove,
            GameStep::GameResult
        ]
    );
    assert_eq!(result.players[0].hands[0].player_value, 19);
    assert_eq!(result.players[0].hands[0].outcome, HandOutcome::Win);
}

#[test]
fn set_bet_checks_limits_and_seats() {
    let mut game = Game::new(GameOptions::default(), 1).unwrap();
    assert_eq!(game.set_bet(0, 5), Err(RoundError::BetOutOfRange(5)));
    assert_eq!(game.set_bet(0, 5000), Err(RoundError::BetOutOfRange(5000)));
    assert_eq!(game.set_bet(3, 50), Err(RoundError::SeatNotFound(3)));
    assert_eq!(game.set_bet(0, 50), Ok(()));
    assert_eq!(game.player(0).unwrap().bet(), 50);
}

#[test]
fn insufficient_balance_is_fatal() {
    let options = GameOptions::default().with_starting_balance(5);
    let mut game = Game::new(options, 1).unwrap();
    let err = game.advance(None).unwrap_err();
    assert_eq!(
        err,
        RoundError::InsufficientFunds {
            seat: 0,
            needed: 10,
            balance: 5
        }
    );
    assert_eq!(game.player(0).unwrap().balance(), 5);
    assert_eq!(game.cards_in_play(), 0);
}

#[test]
fn cards_are_conserved_and_the_count_resets() {
    let options = GameOptions::default()
        .with_human_seat(None)
        .with_players(3);
    let mut game = Game::new(options, 7).unwrap();
    let mut reshuffles = 0;

    for _ in 0..200 {
        let result = game.run(&mut never).unwrap();
        assert_eq!(game.total_cards(), 104);
        assert_eq!(game.cards_in_play(), 0);

        let tray_count: i32 = game
            .discard_tray()
            .cards()
            .iter()
            .map(Card::counting_value)
            .sum();
        assert_eq!(game.shoe().running_count(), tray_count);

        if result.reshuffled {
            reshuffles += 1;
            assert_eq!(game.shoe().running_count(), 0);
            assert!(game.discard_tray().is_empty());
        }
    }
    assert!(reshuffles > 0);
}

#[test]
fn shoe_refills_from_the_tray_mid_round() {
    let options = GameOptions::default()
        .with_decks(1)
        .with_human_seat(None)
        .with_players(7);
    let mut game = Game::new(options, 3).unwrap();

    for _ in 0..50 {
        game.run(&mut never).unwrap();
        assert_eq!(game.total_cards(), 52);
    }
}

#[test]
fn scenario_modes_reshuffle_every_round() {
    let options = GameOptions::default()
        .with_mode(GameMode::GuaranteePairs)
        .with_wait_for_next_game(false);
    let log = EventLog::new();
    let mut game = Game::new(options, 9).unwrap();
    game.subscribe(Box::new(log.clone()));

    for _ in 0..10 {
        let mut input = None;
        let result = loop {
            match game.advance(input.take()).unwrap() {
                Advance::NeedInput(request) => {
                    input = Some(if request.step == GameStep::AskInsurance {
                        Move::NoInsurance
                    } else {
                        assert!(game.focused_hand().unwrap().is_pair());
                        Move::Stand
                    });
                }
                Advance::RoundComplete(result) => break result,
            }
        };
        assert!(result.reshuffled);
        assert_eq!(game.shoe().running_count(), 0);
    }

    let shuffles = log
        .events()
        .iter()
        .filter(|e| matches!(e, Event::Shuffle { .. }))
        .count();
    assert_eq!(shuffles, 10);
}

fn changes(log: &EventLog) -> Vec<Snapshot> {
    log.events()
        .into_iter()
        .filter_map(|event| match event {
            Event::Change(snapshot) => Some(snapshot),
            _ => None,
        })
        .collect()
}

#[test]
fn every_opening_card_publishes_a_change() {
    let log = EventLog::new();
    let mut game = table(GameOptions::default(), &[10, 2, 6, 3]);
    game.subscribe(Box::new(log.clone()));

    request(game.advance(None).unwrap());
    let dealt: Vec<usize> = changes(&log)
        .iter()
        .take(4)
        .map(|s| s.dealer.cards.len() + s.players[0].hands[0].cards.len())
        .collect();
    assert_eq!(dealt, [1, 2, 3, 4]);
}

#[test]
fn every_dealer_card_publishes_a_change() {
    let log = EventLog::new();
    let mut game = table(GameOptions::default(), &[10, 2, 6, 3, 2, 2, 10]);
    game.subscribe(Box::new(log.clone()));

    request(game.advance(None).unwrap());
    log.clear();
    let waiting = play(&mut game, Move::Stand);
    assert_eq!(waiting.step, GameStep::GameResult);
    assert_eq!(game.dealer_hand().unwrap().len(), 5);

    let mut seen: Vec<usize> = changes(&log).iter().map(|s| s.dealer.cards.len()).collect();
    seen.dedup();
    assert_eq!(seen, [2, 3, 4, 5]);
    assert!(
        changes(&log)
            .iter()
            .any(|s| s.dealer.cards.len() == 2 && s.dealer.cards.iter().all(Option::is_some))
    );
}

#[test]
fn each_split_card_publishes_a_change() {
    let log = EventLog::new();
    let mut game = table(GameOptions::default(), &[8, 10, 8, 7, 3, 2]);
    game.subscribe(Box::new(log.clone()));

    request(game.advance(None).unwrap());
    log.clear();
    play(&mut game, Move::Split);

    let held: Vec<usize> = changes(&log)
        .iter()
        .map(|s| s.players[0].hands.iter().map(|h| h.cards.len()).sum())
        .collect();
    assert_eq!(held[..2], [3, 4]);
    assert_eq!(game.total_cards(), 104);
}

#[test]
fn snapshots_serialize_without_the_hole_card() {
    let mut game = table(GameOptions::default(), &[10, 10, 6, 7]);
    request(game.advance(None).unwrap());

    let json = serde_json::to_value(game.snapshot()).unwrap();
    assert_eq!(json["step"], "waiting-for-move");
    assert_eq!(json["focused"]["seat"], 0);
    assert_eq!(json["players"][0]["hands"][0]["total"], 16);
    assert_eq!(json["dealer"]["total"], 10);
    assert!(json["dealer"]["cards"][0].is_object());
    assert!(json["dealer"]["cards"][1].is_null());
    assert_eq!(json["cards_remaining"], 100);
}

#[test]
fn events_serialize_with_their_kind() {
    let log = EventLog::new();
    let mut game = table(GameOptions::default(), &[10, 10, 6, 7]);
    game.subscribe(Box::new(log.clone()));
    request(game.advance(None).unwrap());
    play(&mut game, Move::Stand);

    let events: Vec<serde_json::Value> = log
        .events()
        .iter()
        .map(|e| serde_json::to_value(e).unwrap())
        .collect();
    assert!(events.iter().any(|e| e["event"] == "change"));

    let record = events
        .iter()
        .find(|e| e["event"] == "create-record")
        .unwrap();
    assert_eq!(record["data"]["input"], "stand");
    assert_eq!(record["data"]["verdict"]["verdict"], "mismatch");
    assert_eq!(record["data"]["verdict"]["expected"], "surrender");

    let winner = events
        .iter()
        .find(|e| e["event"] == "hand-winner")
        .unwrap();
    assert_eq!(winner["data"]["winner"], "dealer");
    assert_eq!(winner["data"]["outcome"], "lose");
}

#[test]
fn closures_can_observe() {
    let mut game = table(GameOptions::default(), &[10, 10, 6, 7]);
    let seen = std::rc::Rc::new(std::cell::Cell::new(0));
    let counter = seen.clone();
    game.subscribe(Box::new(move |_: &Event| counter.set(counter.get() + 1)));

    request(game.advance(None).unwrap());
    assert!(seen.get() > 0);
}
