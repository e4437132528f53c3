//! Card, hand and option tests.

use bjtrain::{
    Card, CardPile, ConfigError, DECK_SIZE, Deck, GameMode, GameOptions, Hand, HandStatus, Move,
    ParseError, PayoutRatio, RoundingMode, Strategy, Suit,
};

const fn card(suit: Suit, rank: u8) -> Card {
    let mut card = Card::new(suit, rank);
    card.visible = true;
    card
}

#[test]
fn card_values_and_counting_values() {
    assert_eq!(card(Suit::Hearts, 1).value(), 11);
    assert_eq!(card(Suit::Hearts, 7).value(), 7);
    assert_eq!(card(Suit::Hearts, 12).value(), 10);

    assert_eq!(card(Suit::Clubs, 2).counting_value(), 1);
    assert_eq!(card(Suit::Clubs, 6).counting_value(), 1);
    assert_eq!(card(Suit::Clubs, 8).counting_value(), 0);
    assert_eq!(card(Suit::Clubs, 10).counting_value(), -1);
    assert_eq!(card(Suit::Clubs, 1).counting_value(), -1);

    assert!(!Card::new(Suit::Spades, 5).visible);
}

#[test]
fn deck_has_every_rank_of_every_suit_and_counts_to_zero() {
    let deck = Deck::new();
    assert_eq!(deck.cards().len(), DECK_SIZE);

    for suit in Suit::ALL {
        for rank in 1..=13 {
            assert_eq!(
                deck.cards()
                    .iter()
                    .filter(|c| c.suit == suit && c.rank == rank)
                    .count(),
                1
            );
        }
    }

    let count: i32 = deck.cards().iter().map(Card::counting_value).sum();
    assert_eq!(count, 0);
    assert!(deck.cards().iter().all(|c| !c.visible));
}

#[test]
fn pile_moves_cards_in_and_out() {
    let mut pile = CardPile::new();
    assert!(pile.is_empty());

    pile.add_cards(Deck::new());
    pile.add_cards([card(Suit::Hearts, 3)]);
    assert_eq!(pile.len(), DECK_SIZE + 1);

    let top = pile.pop().unwrap();
    assert_eq!(top.rank, 3);

    let all = pile.remove_all();
    assert_eq!(all.len(), DECK_SIZE);
    assert!(pile.is_empty());
}

#[test]
fn hand_totals_soft_and_hard() {
    let mut hand = Hand::new(10);
    hand.add_card(card(Suit::Hearts, 1));
    hand.add_card(card(Suit::Spades, 6));
    assert_eq!(hand.total(), 17);
    assert!(hand.is_soft());

    hand.add_card(card(Suit::Clubs, 10));
    assert_eq!(hand.total(), 17);
    assert!(!hand.is_soft());
    assert_eq!(hand.status(), HandStatus::Active);

    hand.add_card(card(Suit::Clubs, 5));
    assert_eq!(hand.total(), 22);
    assert!(hand.is_bust());
    assert_eq!(hand.status(), HandStatus::Bust);
}

#[test]
fn two_aces_count_as_twelve() {
    let mut hand = Hand::new(10);
    hand.add_card(card(Suit::Hearts, 1));
    hand.add_card(card(Suit::Spades, 1));
    assert_eq!(hand.low_total(), 2);
    assert_eq!(hand.total(), 12);
    assert!(hand.is_soft());
    assert!(hand.is_pair());
    assert!(hand.is_ace_pair());
}

#[test]
fn natural_only_without_split() {
    let mut hand = Hand::new(10);
    hand.add_card(card(Suit::Hearts, 1));
    hand.add_card(card(Suit::Spades, 11));
    assert!(hand.is_blackjack());
    assert_eq!(hand.status(), HandStatus::Blackjack);

    let mut split = Hand::from_split(card(Suit::Hearts, 1), 10);
    split.add_card(card(Suit::Clubs, 13));
    assert_eq!(split.total(), 21);
    assert!(!split.is_blackjack());
    assert_eq!(split.status(), HandStatus::Active);
}

#[test]
fn ten_value_cards_form_a_pair() {
    let mut hand = Hand::new(10);
    hand.add_card(card(Suit::Hearts, 10));
    hand.add_card(card(Suit::Spades, 13));
    assert!(hand.is_pair());
    assert!(!hand.is_ace_pair());
}

#[test]
fn visible_total_skips_the_hole_card() {
    let mut dealer = Hand::new(0);
    dealer.add_card(card(Suit::Hearts, 1));
    dealer.add_card(Card::new(Suit::Clubs, 6));
    assert_eq!(dealer.visible_total(), 11);
    assert_eq!(dealer.total(), 17);
    assert!(dealer.is_soft());
}

#[test]
fn first_decision_ends_after_acting() {
    let mut hand = Hand::new(10);
    hand.add_card(card(Suit::Hearts, 5));
    hand.add_card(card(Suit::Spades, 6));
    assert!(hand.is_first_decision());

    hand.mark_acted();
    assert!(!hand.is_first_decision());
}

#[test]
fn move_tokens_parse_and_display() {
    assert_eq!("hit".parse::<Move>().unwrap(), Move::Hit);
    assert_eq!("no-insurance".parse::<Move>().unwrap(), Move::NoInsurance);
    assert_eq!("ask-insurance".parse::<Move>().unwrap(), Move::TakeInsurance);
    assert_eq!("take-insurance".parse::<Move>().unwrap(), Move::TakeInsurance);
    assert_eq!("next-game".parse::<Move>().unwrap(), Move::NextGame);
    assert_eq!("fold".parse::<Move>(), Err(ParseError::UnknownMove));
    assert_eq!(Move::Surrender.to_string(), "surrender");
}

#[test]
fn payout_ratio_parses_and_rounds() {
    let ratio: PayoutRatio = "3:2".parse().unwrap();
    assert_eq!(ratio, PayoutRatio::new(3, 2));
    assert_eq!(ratio.winnings(1000, RoundingMode::Down), 1500);
    assert_eq!(ratio.winnings(15, RoundingMode::Down), 22);
    assert_eq!(ratio.winnings(15, RoundingMode::Up), 23);
    assert_eq!(ratio.winnings(15, RoundingMode::Nearest), 23);
    assert_eq!(ratio.to_string(), "3:2");

    assert_eq!("3".parse::<PayoutRatio>(), Err(ParseError::InvalidRatio));
    assert_eq!("3:0".parse::<PayoutRatio>(), Err(ParseError::InvalidRatio));
}

#[test]
fn game_modes_parse() {
    assert_eq!("pairs".parse::<GameMode>().unwrap(), GameMode::GuaranteePairs);
    assert_eq!(
        "uncommon".parse::<GameMode>().unwrap(),
        GameMode::GuaranteeUncommonHand
    );
    assert_eq!(
        "uncommon-hands".parse::<GameMode>().unwrap(),
        GameMode::GuaranteeUncommonHand
    );
    assert_eq!(
        "guarantee-uncommon-hand".parse::<GameMode>().unwrap(),
        GameMode::GuaranteeUncommonHand
    );
    assert_eq!(
        "deviation-training".parse::<GameMode>().unwrap(),
        GameMode::DeviationTraining
    );
    assert_eq!("chaos".parse::<GameMode>(), Err(ParseError::UnknownMode));
}

#[test]
fn options_validation_rejects_broken_tables() {
    assert!(GameOptions::default().validate().is_ok());
    assert_eq!(
        GameOptions::default().with_decks(0).validate(),
        Err(ConfigError::ZeroDecks)
    );
    assert_eq!(
        GameOptions::default().with_players(0).validate(),
        Err(ConfigError::NoPlayers)
    );
    assert_eq!(
        GameOptions::default().with_max_hands(0).validate(),
        Err(ConfigError::ZeroMaxHands)
    );
    assert_eq!(
        GameOptions::default().with_human_seat(Some(3)).validate(),
        Err(ConfigError::HumanSeatOutOfRange(3))
    );
    assert_eq!(
        GameOptions::default()
            .with_seat_strategy(2, Strategy::BasicStrategy)
            .validate(),
        Err(ConfigError::StrategySeatOutOfRange(2))
    );
    assert_eq!(
        GameOptions::default().with_bet_limits(100, 10).validate(),
        Err(ConfigError::InvalidBetLimits)
    );
    assert_eq!(
        GameOptions::default()
            .with_insurance_pays(PayoutRatio::new(2, 0))
            .validate(),
        Err(ConfigError::InvalidPayout)
    );
}

#[test]
fn strategy_for_prefers_overrides() {
    let options = GameOptions::default()
        .with_players(3)
        .with_human_seat(Some(1))
        .with_seat_strategy(2, Strategy::DeviationAware);
    assert_eq!(options.strategy_for(0), Strategy::BasicStrategy);
    assert_eq!(options.strategy_for(1), Strategy::Human);
    assert_eq!(options.strategy_for(2), Strategy::DeviationAware);
}
