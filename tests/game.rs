//! Game integration tests.

#![allow(clippy::float_cmp)]

use bjsim::{
    ActionError, ActionResponse, ArrangedExhaustion, DealerAction, DoubleOption, Game, GameError,
    GameOptions, HoleCard, Info, InsuranceOption, MAX_WAGER, Phase, Player, PlayerAction,
    PlayerActionRequired, TableView, parse_arranged_cards,
};

/// Plays a fixed list of actions, then quits.
#[derive(Default)]
struct Scripted {
    /// Remaining actions, last one first.
    actions: Vec<PlayerAction>,
    views: Vec<TableView>,
    infos: Vec<Info>,
}

impl Scripted {
    fn new(actions: &[PlayerAction]) -> Self {
        Self {
            actions: actions.iter().rev().copied().collect(),
            ..Self::default()
        }
    }
}

impl Player for Scripted {
    fn play(&mut self, view: &TableView) -> PlayerAction {
        self.views.push(*view);
        self.actions.pop().unwrap_or(PlayerAction::Quit)
    }

    fn info(&mut self, info: &Info) {
        self.infos.push(*info);
    }
}

/// Hits below 12 and stands otherwise.
struct Basic;

impl Player for Basic {
    fn play(&mut self, view: &TableView) -> PlayerAction {
        match view.required {
            PlayerActionRequired::Bet => PlayerAction::Bet(1),
            PlayerActionRequired::Insurance => PlayerAction::DontInsure,
            _ if view.player_value.abs() < 12 => PlayerAction::Hit,
            _ => PlayerAction::Stand,
        }
    }
}

fn arranged(options: GameOptions, cards: &str) -> GameOptions {
    options.with_arranged_cards(parse_arranged_cards(cards).unwrap())
}

fn one_hand(cards: &str) -> GameOptions {
    arranged(GameOptions::default().with_flat_bet(1).with_hands(1), cards)
}

/// Advances until the player owes a decision or the run ends.
fn advance_to_input(game: &mut Game) -> Phase {
    loop {
        match game.advance() {
            Ok(phase @ Phase::Awaiting(_)) => return phase,
            Ok(_) => {}
            Err(GameError::Finished) => return Phase::Finished,
            Err(error) => panic!("unexpected error: {error}"),
        }
    }
}

#[test]
fn dealer_busts_and_player_wins() {
    // infinite deck and single-deck shoe
    for decks in [0, 1] {
        let mut game = Game::new(one_hand("TC 6D 6H TS TH").with_decks(decks), 1).unwrap();
        let mut player = Scripted::new(&[PlayerAction::Stand]);
        let report = game.run(&mut player).unwrap();

        let stats = game.stats();
        assert_eq!(stats.bankroll, 1.0, "decks {decks}");
        assert_eq!(stats.wins, 1);
        assert_eq!(stats.busts_dealer, 1);
        assert_eq!(stats.total_money_waged, 1.0);
        assert_eq!(report.get("hands"), Some(1.0));
        assert_eq!(report.get("mean"), Some(1.0));

        assert_eq!(player.views.len(), 1);
        assert_eq!(player.views[0].player_value, 16);
        assert_eq!(player.views[0].dealer_value, 6);
        assert!(player.infos.contains(&Info::DealerBusts(26)));
        assert!(player.infos.contains(&Info::CardDealerHole));
    }
}

#[test]
fn insurance_pays_against_dealer_blackjack() {
    let options = arranged(
        GameOptions::default().with_hands(1),
        "TC AS 9H KD",
    );
    let mut game = Game::new(options, 1).unwrap();
    let mut player = Scripted::new(&[PlayerAction::Bet(10), PlayerAction::Insure]);
    game.run(&mut player).unwrap();

    let stats = game.stats();
    assert_eq!(stats.bankroll, 0.0);
    assert_eq!(stats.worst_bankroll, -15.0);
    assert_eq!(stats.hands_insured, 1);
    assert_eq!(stats.wins_insured, 1);
    assert_eq!(stats.losses, 1);
    assert_eq!(stats.blackjacks_dealer, 1);
    assert!(player.infos.contains(&Info::PlayerWinsInsurance(10_000)));
    assert!(player.infos.contains(&Info::DealerBlackjack));
    assert_eq!(
        player.views.last().map(|view| view.required),
        Some(PlayerActionRequired::Insurance)
    );
}

#[test]
fn insured_blackjack_against_dealer_blackjack() {
    let options = arranged(GameOptions::default().with_hands(1), "AC AS KH KD");
    let mut game = Game::new(options, 1).unwrap();
    let mut player = Scripted::new(&[PlayerAction::Bet(10), PlayerAction::Insure]);
    game.run(&mut player).unwrap();

    let stats = game.stats();
    assert_eq!(stats.bankroll, 10.0);
    assert_eq!(stats.pushes, 1);
    assert_eq!(stats.blackjacks_player, 1);
    assert_eq!(stats.blackjacks_dealer, 1);
    assert!(player.infos.contains(&Info::PlayerBlackjackAlso));
}

#[test]
fn automatic_insurance_skips_the_question() {
    let options = one_hand("TC AS 9H KD").with_insurance(InsuranceOption::Always);
    let mut game = Game::new(options, 1).unwrap();
    let mut player = Scripted::new(&[]);
    game.run(&mut player).unwrap();

    assert!(player.views.is_empty());
    assert_eq!(game.stats().hands_insured, 1);
    assert_eq!(game.stats().bankroll, 0.0);
}

#[test]
fn player_blackjack_pays_three_to_two() {
    let options = arranged(
        GameOptions::default().with_flat_bet(2).with_hands(1),
        "AS 5D KH 9C",
    );
    let mut game = Game::new(options, 1).unwrap();
    let mut player = Scripted::new(&[]);
    game.run(&mut player).unwrap();

    let stats = game.stats();
    assert_eq!(stats.bankroll, 3.0);
    assert_eq!(stats.wins_blackjack, 1);
    assert_eq!(stats.blackjacks_player, 1);
    assert!(player.views.is_empty());
    assert!(player.infos.contains(&Info::PlayerWins {
        amount: 3_000,
        value: 21
    }));
}

#[test]
fn busted_player_loses_without_dealer_draw() {
    let mut game = Game::new(one_hand("TC 6D 6H 9S 8C TD"), 1).unwrap();
    let mut player = Scripted::new(&[PlayerAction::Hit]);
    game.run(&mut player).unwrap();

    let stats = game.stats();
    assert_eq!(stats.bankroll, -1.0);
    assert_eq!(stats.busts_player, 1);
    assert_eq!(stats.losses, 1);
    assert_eq!(game.dealer_hand().hand().len(), 2);
    assert!(game.dealer_hand().is_hole_revealed());
    assert!(player.infos.contains(&Info::PlayerLosses {
        amount: 1_000,
        value: 24
    }));
}

#[test]
fn dealer_hits_soft_17_only_under_h17() {
    let cards = "TC 6D 9H AS 5C TH";

    let mut game = Game::new(one_hand(cards), 1).unwrap();
    game.run(&mut Scripted::new(&[PlayerAction::Stand])).unwrap();
    assert_eq!(game.dealer_hand().hand().len(), 4);
    assert_eq!(game.stats().busts_dealer, 1);

    let mut game = Game::new(one_hand(cards).with_hit_soft_17(false), 1).unwrap();
    game.run(&mut Scripted::new(&[PlayerAction::Stand])).unwrap();
    assert_eq!(game.dealer_hand().hand().value(), -17);
    assert_eq!(game.stats().wins, 1);
}

#[test]
fn split_respects_resplit_limit() {
    let options = one_hand("8C 5D 8H 9S 8D TC 7H").with_resplits(1);
    let mut game = Game::new(options, 1).unwrap();

    assert_eq!(
        advance_to_input(&mut game),
        Phase::Awaiting(PlayerActionRequired::Play)
    );
    assert!(game.can_split());
    assert_eq!(
        game.apply(PlayerAction::Split).unwrap(),
        ActionResponse::Accepted
    );
    assert_eq!(game.splits(), 1);
    assert_eq!(game.hands().len(), 2);

    // hand 1 was dealt another eight but the limit is reached
    let hand = game.current_hand().unwrap();
    assert_eq!(hand.id(), 1);
    assert!(hand.is_pair());
    assert!(!game.can_split());
    assert!(game.can_double());
    assert_eq!(
        game.apply(PlayerAction::Split).unwrap(),
        ActionResponse::Rejected(ActionError::CannotSplit)
    );
    assert!(game.drain_events().any(|info| info == Info::PlayerSplitInvalid));

    game.apply(PlayerAction::Stand).unwrap();
    assert_eq!(
        advance_to_input(&mut game),
        Phase::Awaiting(PlayerActionRequired::Play)
    );
    assert_eq!(game.current_hand().unwrap().id(), 2);
    assert_eq!(game.current_hand().unwrap().hand().total(), 18);
    game.apply(PlayerAction::Stand).unwrap();

    assert_eq!(advance_to_input(&mut game), Phase::Finished);
    let stats = game.stats();
    assert_eq!(game.dealer_hand().hand().total(), 21);
    assert_eq!(stats.losses, 2);
    assert_eq!(stats.bankroll, -2.0);
    assert_eq!(stats.total_money_waged, 2.0);
}

#[test]
fn split_aces_take_one_card_each() {
    let mut game = Game::new(one_hand("AC 5D AH 9S KD KC TH"), 1).unwrap();
    let mut player = Scripted::new(&[PlayerAction::Split]);
    game.run(&mut player).unwrap();

    let stats = game.stats();
    assert_eq!(player.views.len(), 1);
    assert_eq!(stats.wins, 2);
    assert_eq!(stats.blackjacks_player, 0);
    assert_eq!(stats.bankroll, 2.0);
    assert!(player.infos.contains(&Info::PlayerSplitIds {
        original: 1,
        new: 2
    }));
    assert!(player.infos.contains(&Info::PlayerNextHand(2)));
}

#[test]
fn no_double_after_split_when_disabled() {
    let options = one_hand("5C 6D 5H 9S 4D").with_double_after_split(false);
    let mut game = Game::new(options, 1).unwrap();
    advance_to_input(&mut game);
    assert!(game.can_double());
    game.apply(PlayerAction::Split).unwrap();
    assert!(!game.can_double());
    assert_eq!(
        game.apply(PlayerAction::Double).unwrap(),
        ActionResponse::Rejected(ActionError::CannotDouble)
    );
}

#[test]
fn double_restricted_to_nine_through_eleven() {
    let options = one_hand("TC 5D 2H 9S").with_double(DoubleOption::NineThrough11);
    let mut game = Game::new(options.clone(), 1).unwrap();
    advance_to_input(&mut game);
    assert!(!game.can_double());
    assert_eq!(
        game.apply(PlayerAction::Double).unwrap(),
        ActionResponse::Rejected(ActionError::CannotDouble)
    );
    assert!(game.drain_events().any(|info| info == Info::PlayerDoubleInvalid));

    let options = arranged(options, "5C 5D 4H 9S TD 8C");
    let mut game = Game::new(options, 1).unwrap();
    advance_to_input(&mut game);
    assert!(game.can_double());
    game.apply(PlayerAction::Double).unwrap();
    assert_eq!(advance_to_input(&mut game), Phase::Finished);

    let stats = game.stats();
    assert_eq!(stats.hands_doubled, 1);
    assert_eq!(stats.wins_doubled, 1);
    assert_eq!(stats.total_money_waged, 2.0);
    assert_eq!(stats.bankroll, 2.0);
}

#[test]
fn european_player_blackjack_against_nine_is_paid_at_once() {
    let options = one_hand("AS 9D KH TC").with_hole_card(HoleCard::European);
    let mut game = Game::new(options, 1).unwrap();
    game.run(&mut Scripted::new(&[])).unwrap();

    assert_eq!(game.stats().bankroll, 1.5);
    assert_eq!(game.dealer_hand().hand().len(), 1);
}

#[test]
fn european_dealer_draws_to_check_natural_against_player_blackjack() {
    let options = one_hand("AS TD KH AC").with_hole_card(HoleCard::European);
    let mut game = Game::new(options, 1).unwrap();
    let mut player = Scripted::new(&[]);
    game.run(&mut player).unwrap();

    let stats = game.stats();
    assert_eq!(stats.bankroll, 0.0);
    assert_eq!(stats.pushes, 1);
    assert_eq!(stats.blackjacks_dealer, 1);
    assert!(!player.infos.contains(&Info::CardDealerHole));
}

#[test]
fn european_dealer_natural_takes_doubled_bet() {
    let options = one_hand("5C TD 6H 9S AC").with_hole_card(HoleCard::European);
    let mut game = Game::new(options, 1).unwrap();
    let mut player = Scripted::new(&[PlayerAction::Double]);
    game.run(&mut player).unwrap();

    let stats = game.stats();
    assert_eq!(stats.bankroll, -2.0);
    assert_eq!(stats.losses, 1);
    assert_eq!(stats.blackjacks_dealer, 1);
    assert!(player.infos.contains(&Info::NoBlackjacks));
}

#[test]
fn invalid_bets_are_rejected() {
    let options = GameOptions::default().with_max_bet(5).with_hands(1);
    let mut game = Game::new(options, 1).unwrap();
    assert_eq!(
        advance_to_input(&mut game),
        Phase::Awaiting(PlayerActionRequired::Bet)
    );

    assert_eq!(
        game.apply(PlayerAction::Bet(0)).unwrap(),
        ActionResponse::Rejected(ActionError::NonPositiveBet(0))
    );
    assert_eq!(
        game.apply(PlayerAction::Bet(6)).unwrap(),
        ActionResponse::Rejected(ActionError::BetAboveMaximum { bet: 6, max: 5 })
    );
    assert_eq!(
        game.apply(PlayerAction::Hit).unwrap(),
        ActionResponse::Rejected(ActionError::Unexpected)
    );
    let events: Vec<Info> = game.drain_events().collect();
    assert!(events.contains(&Info::BetInvalid(0)));
    assert!(events.contains(&Info::BetInvalid(6)));
    assert!(events.contains(&Info::CommandInvalid));

    assert_eq!(
        game.apply(PlayerAction::Bet(5)).unwrap(),
        ActionResponse::Accepted
    );
    assert_eq!(game.hands()[0].bet(), 5);
}

#[test]
fn too_many_invalid_actions_end_the_run() {
    struct Zero;

    impl Player for Zero {
        fn play(&mut self, _view: &TableView) -> PlayerAction {
            PlayerAction::Bet(0)
        }
    }

    let options = GameOptions::default().with_max_invalid_actions(3);
    let mut game = Game::new(options, 1).unwrap();
    assert_eq!(
        game.run(&mut Zero),
        Err(GameError::TooManyInvalidActions(4))
    );
}

#[test]
fn queries_do_not_count_as_invalid() {
    let mut actions = vec![PlayerAction::Help; 5];
    actions.extend([PlayerAction::Bankroll; 5]);
    let options = GameOptions::default().with_max_invalid_actions(1);
    let mut game = Game::new(options, 1).unwrap();
    let mut player = Scripted::new(&actions);

    let report = game.run(&mut player).unwrap();
    assert_eq!(report.get("hands"), Some(1.0));
    assert!(player.infos.contains(&Info::Help));
    assert!(player.infos.contains(&Info::Bankroll(0)));
    assert_eq!(player.infos.last(), Some(&Info::Bye));
}

#[test]
fn actions_without_pending_decision_are_rejected() {
    let mut game = Game::new(GameOptions::default(), 1).unwrap();
    assert_eq!(
        game.apply(PlayerAction::Stand).unwrap(),
        ActionResponse::Rejected(ActionError::NotPending)
    );
    game.quit();
    assert!(game.is_finished());
    assert_eq!(game.advance(), Err(GameError::Finished));
}

#[test]
fn arranged_exhaustion_can_end_the_run() {
    let options = arranged(GameOptions::default().with_flat_bet(1), "TC 6D 6H TS TH")
        .with_arranged_exhaustion(ArrangedExhaustion::Quit);
    let mut game = Game::new(options, 1).unwrap();
    let report = game.run(&mut Scripted::new(&[PlayerAction::Stand])).unwrap();

    assert_eq!(game.hand_number(), 1);
    assert_eq!(report.get("hands"), Some(1.0));
}

#[test]
fn missing_arranged_card_is_fatal() {
    let mut game = Game::new(one_hand("AS AS").with_decks(1), 1).unwrap();
    assert!(matches!(
        game.run(&mut Scripted::new(&[])),
        Err(GameError::Shoe(_))
    ));
}

#[test]
fn runs_are_reproducible() {
    let options = GameOptions::default()
        .with_decks(6)
        .with_penetration_sigma(0.05)
        .with_hands(2_000);

    let mut first = Game::new(options.clone(), 42).unwrap();
    let first_report = first.run(&mut Basic).unwrap();
    let mut second = Game::new(options, 42).unwrap();
    let second_report = second.run(&mut Basic).unwrap();

    assert_eq!(first.stats(), second.stats());
    assert_eq!(first_report, second_report);
    assert!(first.shoe().shuffles() > 1);
    assert_eq!(first_report.get("hands"), Some(2_000.0));
    assert!(first.stats().total_money_waged >= 2_000.0);
}

#[test]
fn shuffle_every_hand() {
    let options = GameOptions::default()
        .with_decks(2)
        .with_flat_bet(1)
        .with_shuffle_every_hand(true)
        .with_hands(10);
    let mut game = Game::new(options, 7).unwrap();
    game.run(&mut Basic).unwrap();
    assert_eq!(game.shoe().shuffles(), 11);
}

#[test]
fn report_mean_matches_bankroll() {
    let options = GameOptions::default().with_flat_bet(1).with_hands(500);
    let mut game = Game::new(options, 3).unwrap();
    let report = game.run(&mut Basic).unwrap();

    let mean = report.get("mean").unwrap();
    assert!((mean - game.stats().bankroll / 500.0).abs() < 1e-9);
    assert!(report.get("error").unwrap() > 0.0);
    assert_eq!(report.items_up_to(1).count(), 2);
}

#[test]
fn largest_bet_can_be_doubled() {
    let options = arranged(GameOptions::default().with_hands(1), "5C 6D 4H TS");
    let mut game = Game::new(options, 1).unwrap();
    assert_eq!(
        advance_to_input(&mut game),
        Phase::Awaiting(PlayerActionRequired::Bet)
    );

    assert_eq!(
        game.apply(PlayerAction::Bet(3_000_000_000)).unwrap(),
        ActionResponse::Rejected(ActionError::BetAboveMaximum {
            bet: 3_000_000_000,
            max: MAX_WAGER
        })
    );
    assert_eq!(
        game.apply(PlayerAction::Bet(i64::from(MAX_WAGER) + 1)).unwrap(),
        ActionResponse::Rejected(ActionError::BetAboveMaximum {
            bet: i64::from(MAX_WAGER) + 1,
            max: MAX_WAGER
        })
    );
    assert_eq!(
        game.apply(PlayerAction::Bet(i64::from(MAX_WAGER))).unwrap(),
        ActionResponse::Accepted
    );

    assert_eq!(
        advance_to_input(&mut game),
        Phase::Awaiting(PlayerActionRequired::Play)
    );
    assert_eq!(
        game.apply(PlayerAction::Double).unwrap(),
        ActionResponse::Accepted
    );
    assert_eq!(game.hands()[0].bet(), 2 * MAX_WAGER);
    assert!(game.hands()[0].is_doubled());
    assert_eq!(game.stats().total_money_waged, 2.0 * f64::from(MAX_WAGER));
}

#[test]
fn a_larger_table_maximum_is_capped() {
    let options = GameOptions::default().with_max_bet(u32::MAX).with_hands(1);
    let mut game = Game::new(options, 1).unwrap();
    advance_to_input(&mut game);

    assert_eq!(
        game.apply(PlayerAction::Bet(i64::from(u32::MAX))).unwrap(),
        ActionResponse::Rejected(ActionError::BetAboveMaximum {
            bet: i64::from(u32::MAX),
            max: MAX_WAGER
        })
    );
    assert!(game
        .drain_events()
        .any(|info| info == Info::BetInvalid(i64::from(u32::MAX))));
}

#[test]
fn resplit_hands_play_in_creation_order() {
    let mut game = Game::new(one_hand("8C 5D 8H 9S 8D 8S TC TD TH"), 1).unwrap();
    let mut player = Scripted::new(&[
        PlayerAction::Split,
        PlayerAction::Split,
        PlayerAction::Stand,
        PlayerAction::Stand,
        PlayerAction::Stand,
    ]);
    game.run(&mut player).unwrap();

    let ids: Vec<usize> = player.views.iter().map(|view| view.hand_id).collect();
    assert_eq!(ids, [1, 1, 1, 2, 3]);
    let next: Vec<Info> = player
        .infos
        .iter()
        .copied()
        .filter(|info| matches!(info, Info::PlayerNextHand(_)))
        .collect();
    assert_eq!(next, [Info::PlayerNextHand(2), Info::PlayerNextHand(3)]);

    let hands: Vec<usize> = game.hands().iter().map(|hand| hand.id()).collect();
    assert_eq!(hands, [1, 2, 3]);
    assert_eq!(game.hands()[1].hand().total(), 18);
    assert_eq!(game.hands()[2].hand().total(), 18);

    let stats = game.stats();
    assert_eq!(stats.busts_dealer, 1);
    assert_eq!(stats.wins, 3);
    assert_eq!(stats.bankroll, 3.0);
}

#[test]
fn burn_cards_follow_every_shuffle() {
    let options = GameOptions::default()
        .with_decks(1)
        .with_burn_cards(3)
        .with_penetration(0.5)
        .with_flat_bet(1)
        .with_hands(0)
        .with_insurance(InsuranceOption::Never);
    let mut game = Game::new(options, 5).unwrap();
    assert_eq!(game.shoe().shuffles(), 1);
    assert_eq!(game.shoe().cursor(), 3);

    let mut reshuffled = false;
    for _ in 0..1_000 {
        let phase = game.advance().unwrap();
        if phase == Phase::Dealer(DealerAction::DealPlayerFirstCard) && game.shoe().shuffles() == 2
        {
            assert_eq!(game.shoe().cursor(), 3);
            reshuffled = true;
            break;
        }
        if let Phase::Awaiting(_) = phase {
            game.apply(PlayerAction::Stand).unwrap();
        }
    }
    assert!(reshuffled);
}
