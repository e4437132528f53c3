//! Game configuration options.

use alloc::vec::Vec;
use core::fmt;
use core::str::FromStr;

use serde::Serialize;

use crate::error::{ConfigError, ParseError};
use crate::player::Strategy;

/// Rounding mode for payouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoundingMode {
    /// Round up.
    Up,
    /// Round down.
    Down,
    /// Round to nearest, halves away from zero.
    Nearest,
}

/// A payout ratio such as `3:2` or `6:5`.
///
/// ```
/// use bjtrain::PayoutRatio;
///
/// let ratio: PayoutRatio = "6:5".parse().unwrap();
/// assert_eq!(ratio, PayoutRatio::new(6, 5));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct PayoutRatio {
    /// Amount won.
    pub numerator: u32,
    /// Per amount staked.
    pub denominator: u32,
}

impl PayoutRatio {
    /// Creates a new ratio.
    #[must_use]
    pub const fn new(numerator: u32, denominator: u32) -> Self {
        Self {
            numerator,
            denominator,
        }
    }

    /// Returns the winnings for `stake`, rounded with `mode`.
    ///
    /// The stake itself is not included.
    #[must_use]
    pub const fn winnings(&self, stake: usize, mode: RoundingMode) -> usize {
        scale(stake, self.numerator as usize, self.denominator as usize, mode)
    }
}

impl fmt::Display for PayoutRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.numerator, self.denominator)
    }
}

impl FromStr for PayoutRatio {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (numerator, denominator) = s.split_once(':').ok_or(ParseError::InvalidRatio)?;
        let numerator = numerator
            .trim()
            .parse()
            .map_err(|_| ParseError::InvalidRatio)?;
        let denominator: u32 = denominator
            .trim()
            .parse()
            .map_err(|_| ParseError::InvalidRatio)?;
        if denominator == 0 {
            return Err(ParseError::InvalidRatio);
        }
        Ok(Self::new(numerator, denominator))
    }
}

/// Computes `amount * numerator / denominator` in integers.
pub(crate) const fn scale(
    amount: usize,
    numerator: usize,
    denominator: usize,
    mode: RoundingMode,
) -> usize {
    let product = amount * numerator;
    match mode {
        RoundingMode::Down => product / denominator,
        RoundingMode::Up => product.div_ceil(denominator),
        RoundingMode::Nearest => (2 * product + denominator) / (2 * denominator),
    }
}

/// Scenario mode controlling how the shoe is prepared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum GameMode {
    /// Fair shuffles, reshuffle at the cut card.
    #[default]
    Default,
    /// Every round the trainee's first two cards form a pair.
    GuaranteePairs,
    /// Every round deals a rare chart decision to the trainee.
    GuaranteeUncommonHand,
    /// Fair shuffles; decisions are checked against count-based deviations first.
    DeviationTraining,
}

impl GameMode {
    /// Returns whether every round needs a freshly biased shuffle.
    #[must_use]
    pub const fn is_single_scenario(self) -> bool {
        matches!(self, Self::GuaranteePairs | Self::GuaranteeUncommonHand)
    }
}

impl FromStr for GameMode {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "default" => Ok(Self::Default),
            "guarantee-pairs" | "pairs" => Ok(Self::GuaranteePairs),
            "guarantee-uncommon-hand" | "uncommon-hands" | "uncommon" => {
                Ok(Self::GuaranteeUncommonHand)
            }
            "deviation-training" => Ok(Self::DeviationTraining),
            _ => Err(ParseError::UnknownMode),
        }
    }
}

/// Configuration options for a trainer table.
///
/// Use the builder pattern to customize options:
///
/// ```
/// use bjtrain::{GameMode, GameOptions, PayoutRatio};
///
/// let options = GameOptions::default()
///     .with_decks(6)
///     .with_blackjack_pays(PayoutRatio::new(6, 5))
///     .with_stand_on_soft_17(false)
///     .with_mode(GameMode::GuaranteePairs);
/// assert!(options.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct GameOptions {
    /// Number of decks.
    pub decks: u8,
    /// Maximum simultaneous hands per player (limits splitting).
    pub max_hands: u8,
    /// Minimum bet.
    pub min_bet: usize,
    /// Maximum bet.
    pub max_bet: usize,
    /// Natural blackjack payout.
    pub blackjack_pays: PayoutRatio,
    /// Insurance payout.
    pub insurance_pays: PayoutRatio,
    /// Whether dealer stands on soft 17.
    pub stand_on_soft_17: bool,
    /// Whether late surrender is allowed.
    pub surrender: bool,
    /// Whether split aces may be split again.
    pub resplit_aces: bool,
    /// Number of seats at the table.
    pub players: u8,
    /// Seat driven by the input collaborator, if any.
    pub human_seat: Option<usize>,
    /// Per-seat strategy overrides.
    pub seat_strategies: Vec<(usize, Strategy)>,
    /// Scenario mode.
    pub mode: GameMode,
    /// Opening balance of every seat.
    pub starting_balance: usize,
    /// Rounding mode for blackjack payouts.
    pub rounding_blackjack: RoundingMode,
    /// Rounding mode for surrender refunds.
    pub rounding_surrender: RoundingMode,
    /// Whether a settled round waits for a `next-game` token from the human.
    pub wait_for_next_game: bool,
}

impl Default for GameOptions {
    fn default() -> Self {
        Self {
            decks: 2,
            max_hands: 4,
            min_bet: 10,
            max_bet: 1000,
            blackjack_pays: PayoutRatio::new(3, 2),
            insurance_pays: PayoutRatio::new(2, 1),
            stand_on_soft_17: true,
            surrender: true,
            resplit_aces: false,
            players: 1,
            human_seat: Some(0),
            seat_strategies: Vec::new(),
            mode: GameMode::Default,
            starting_balance: 10_000,
            rounding_blackjack: RoundingMode::Down,
            rounding_surrender: RoundingMode::Nearest,
            wait_for_next_game: true,
        }
    }
}

impl GameOptions {
    /// Checks the options for values no table can run with.
    ///
    /// # Errors
    ///
    /// Returns the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.decks == 0 {
            return Err(ConfigError::ZeroDecks);
        }
        if self.players == 0 {
            return Err(ConfigError::NoPlayers);
        }
        if self.max_hands == 0 {
            return Err(ConfigError::ZeroMaxHands);
        }
        if let Some(seat) = self.human_seat {
            if seat >= usize::from(self.players) {
                return Err(ConfigError::HumanSeatOutOfRange(seat));
            }
        }
        if let Some(&(seat, _)) = self
            .seat_strategies
            .iter()
            .find(|(seat, _)| *seat >= usize::from(self.players))
        {
            return Err(ConfigError::StrategySeatOutOfRange(seat));
        }
        if self.min_bet == 0 || self.min_bet > self.max_bet {
            return Err(ConfigError::InvalidBetLimits);
        }
        if self.blackjack_pays.denominator == 0 || self.insurance_pays.denominator == 0 {
            return Err(ConfigError::InvalidPayout);
        }
        Ok(())
    }

    /// Returns the strategy that drives `seat`.
    ///
    /// Overrides win; otherwise the human seat takes input and every other
    /// seat plays basic strategy.
    #[must_use]
    pub fn strategy_for(&self, seat: usize) -> Strategy {
        if let Some(&(_, strategy)) = self.seat_strategies.iter().find(|(s, _)| *s == seat) {
            return strategy;
        }
        if self.human_seat == Some(seat) {
            Strategy::Human
        } else {
            Strategy::BasicStrategy
        }
    }

    /// Sets the number of decks.
    ///
    /// # Example
    ///
    /// ```
    /// use bjtrain::GameOptions;
    ///
    /// let options = GameOptions::default().with_decks(6);
    /// assert_eq!(options.decks, 6);
    /// ```
    #[must_use]
    pub const fn with_decks(mut self, decks: u8) -> Self {
        self.decks = decks;
        self
    }

    /// Sets the maximum number of hands per player.
    #[must_use]
    pub const fn with_max_hands(mut self, max_hands: u8) -> Self {
        self.max_hands = max_hands;
        self
    }

    /// Sets the table limits.
    ///
    /// # Example
    ///
    /// ```
    /// use bjtrain::GameOptions;
    ///
    /// let options = GameOptions::default().with_bet_limits(25, 500);
    /// assert_eq!((options.min_bet, options.max_bet), (25, 500));
    /// ```
    #[must_use]
    pub const fn with_bet_limits(mut self, min_bet: usize, max_bet: usize) -> Self {
        self.min_bet = min_bet;
        self.max_bet = max_bet;
        self
    }

    /// Sets the blackjack payout ratio.
    #[must_use]
    pub const fn with_blackjack_pays(mut self, ratio: PayoutRatio) -> Self {
        self.blackjack_pays = ratio;
        self
    }

    /// Sets the insurance payout ratio.
    #[must_use]
    pub const fn with_insurance_pays(mut self, ratio: PayoutRatio) -> Self {
        self.insurance_pays = ratio;
        self
    }

    /// Sets whether dealer stands on soft 17.
    ///
    /// # Example
    ///
    /// ```
    /// use bjtrain::GameOptions;
    ///
    /// let options = GameOptions::default().with_stand_on_soft_17(false);
    /// assert_eq!(options.stand_on_soft_17, false);
    /// ```
    #[must_use]
    pub const fn with_stand_on_soft_17(mut self, stand: bool) -> Self {
        self.stand_on_soft_17 = stand;
        self
    }

    /// Sets whether late surrender is allowed.
    #[must_use]
    pub const fn with_surrender(mut self, allowed: bool) -> Self {
        self.surrender = allowed;
        self
    }

    /// Sets whether split aces may be split again.
    #[must_use]
    pub const fn with_resplit_aces(mut self, allowed: bool) -> Self {
        self.resplit_aces = allowed;
        self
    }

    /// Sets the number of seats.
    #[must_use]
    pub const fn with_players(mut self, players: u8) -> Self {
        self.players = players;
        self
    }

    /// Sets the human-controlled seat. `None` makes every seat a bot.
    #[must_use]
    pub const fn with_human_seat(mut self, seat: Option<usize>) -> Self {
        self.human_seat = seat;
        self
    }

    /// Overrides the strategy of one seat.
    ///
    /// # Example
    ///
    /// ```
    /// use bjtrain::{GameOptions, Strategy};
    ///
    /// let options = GameOptions::default()
    ///     .with_players(2)
    ///     .with_seat_strategy(1, Strategy::DeviationAware);
    /// assert_eq!(options.strategy_for(1), Strategy::DeviationAware);
    /// assert_eq!(options.strategy_for(0), Strategy::Human);
    /// ```
    #[must_use]
    pub fn with_seat_strategy(mut self, seat: usize, strategy: Strategy) -> Self {
        self.seat_strategies.retain(|(s, _)| *s != seat);
        self.seat_strategies.push((seat, strategy));
        self
    }

    /// Sets the scenario mode.
    #[must_use]
    pub const fn with_mode(mut self, mode: GameMode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets the opening balance of every seat.
    #[must_use]
    pub const fn with_starting_balance(mut self, balance: usize) -> Self {
        self.starting_balance = balance;
        self
    }

    /// Sets the rounding mode for blackjack payouts.
    #[must_use]
    pub const fn with_rounding_blackjack(mut self, mode: RoundingMode) -> Self {
        self.rounding_blackjack = mode;
        self
    }

    /// Sets the rounding mode for surrender refunds.
    #[must_use]
    pub const fn with_rounding_surrender(mut self, mode: RoundingMode) -> Self {
        self.rounding_surrender = mode;
        self
    }

    /// Sets whether a settled round waits for `next-game`.
    #[must_use]
    pub const fn with_wait_for_next_game(mut self, wait: bool) -> Self {
        self.wait_for_next_game = wait;
        self
    }
}
