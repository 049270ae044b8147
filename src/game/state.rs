//! Dealer state machine types.

/// What the dealer is about to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DealerAction {
    /// Idle.
    #[default]
    None,
    /// Close the previous hand and start a new one.
    StartNewHand,
    /// Deal the first two cards to the player and the up card.
    DealPlayerFirstCard,
    /// Resolve naturals.
    CheckForBlackjacks,
    /// Ask the player to play the current hand.
    AskForPlay,
    /// Move to the next split hand, or to the dealer once all are done.
    MoveOnToNextHand,
    /// Play out the dealer's hand and settle.
    HitDealerHand,
}

/// The kind of decision the player must make.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlayerActionRequired {
    /// Nothing pending.
    #[default]
    None,
    /// Place a bet.
    Bet,
    /// Take or decline insurance.
    Insurance,
    /// Play the current hand.
    Play,
}

/// State of the engine between calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// The dealer will perform this action on the next advance.
    Dealer(DealerAction),
    /// Suspended until the player answers.
    Awaiting(PlayerActionRequired),
    /// The run is over.
    Finished,
}

impl Phase {
    /// The pending player requirement, [`PlayerActionRequired::None`] unless suspended.
    #[must_use]
    pub const fn required(self) -> PlayerActionRequired {
        match self {
            Self::Awaiting(required) => required,
            Self::Dealer(_) | Self::Finished => PlayerActionRequired::None,
        }
    }

    /// The next dealer action, [`DealerAction::None`] unless the dealer is on the move.
    #[must_use]
    pub const fn dealer_action(self) -> DealerAction {
        match self {
            Self::Dealer(action) => action,
            Self::Awaiting(_) | Self::Finished => DealerAction::None,
        }
    }
}

/// Result of applying a player action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionResponse {
    /// The action was applied and the engine moved on.
    Accepted,
    /// A query (help, bankroll) was answered; the same decision is still pending.
    Answered,
    /// The action was rejected; the same decision is still pending.
    Rejected(crate::error::ActionError),
}
