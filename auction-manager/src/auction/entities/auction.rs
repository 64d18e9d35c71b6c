use {
    crate::bid::entities::BidId,
    serde::Deserialize,
    std::fmt::{
        Display,
        Formatter,
    },
    time::OffsetDateTime,
};

pub type AuctionId = String;
pub type OrderId = String;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuctionState {
    Unstarted,
    Started,
    Stopped,
    Won,
}

impl Display for AuctionState {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let state = match self {
            AuctionState::Unstarted => "unstarted",
            AuctionState::Started => "started",
            AuctionState::Stopped => "stopped",
            AuctionState::Won => "won",
        };
        write!(f, "{}", state)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Auction {
    pub id:          AuctionId,
    pub order_id:    OrderId,
    pub start_date:  Option<OffsetDateTime>,
    pub end_date:    Option<OffsetDateTime>,
    pub winning_bid: Option<BidId>,
    pub subscribed:  bool,
    pub cloned:      bool,
}

impl Auction {
    /// Derives the lifecycle state from the stored dates and winner.
    ///
    /// A winner outranks an end date, which outranks a start date, so records written by
    /// legacy clients with skipped steps still resolve to a single state.
    pub fn state(&self) -> AuctionState {
        match (self.start_date, self.end_date, &self.winning_bid) {
            (_, _, Some(_)) => AuctionState::Won,
            (_, Some(_), None) => AuctionState::Stopped,
            (Some(_), None, None) => AuctionState::Started,
            (None, None, None) => AuctionState::Unstarted,
        }
    }

    pub fn is_start_candidate(&self) -> bool {
        self.start_date.is_none()
    }

    /// Open auctions whose start is at or before `threshold`.
    pub fn is_stop_candidate(&self, threshold: OffsetDateTime, include_unstarted: bool) -> bool {
        if self.end_date.is_some() {
            return false;
        }
        match self.start_date {
            Some(start_date) => start_date <= threshold,
            None => include_unstarted,
        }
    }

    pub fn is_awaiting_winner(&self) -> bool {
        self.end_date.is_some() && self.winning_bid.is_none()
    }
}

/// The scheduler-facing views over the stored auctions.
#[derive(Clone, Debug, PartialEq)]
pub enum AuctionSelection {
    StartCandidates,
    StopCandidates {
        threshold:         OffsetDateTime,
        include_unstarted: bool,
    },
    AwaitingWinner,
}

impl AuctionSelection {
    pub fn matches(&self, auction: &Auction) -> bool {
        match self {
            AuctionSelection::StartCandidates => auction.is_start_candidate(),
            AuctionSelection::StopCandidates {
                threshold,
                include_unstarted,
            } => auction.is_stop_candidate(*threshold, *include_unstarted),
            AuctionSelection::AwaitingWinner => auction.is_awaiting_winner(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Transition {
    Start { start_time: OffsetDateTime },
    Stop { end_time: OffsetDateTime },
    AssignWinner { bid_id: BidId },
}

impl Transition {
    /// Label used for logs and the transition counter.
    pub fn name(&self) -> &'static str {
        match self {
            Transition::Start { .. } => "start",
            Transition::Stop { .. } => "stop",
            Transition::AssignWinner { .. } => "winner",
        }
    }

    /// Whether the auction is still in the state this transition leaves from.
    pub fn is_applicable(&self, auction: &Auction) -> bool {
        match self {
            Transition::Start { .. } => auction.start_date.is_none(),
            Transition::Stop { end_time } => {
                auction.end_date.is_none()
                    && auction
                        .start_date
                        .map(|start_date| start_date <= *end_time)
                        .unwrap_or(false)
            }
            Transition::AssignWinner { .. } => {
                auction.end_date.is_some() && auction.winning_bid.is_none()
            }
        }
    }

    pub fn apply(&self, auction: &mut Auction) {
        match self {
            Transition::Start { start_time } => auction.start_date = Some(*start_time),
            Transition::Stop { end_time } => auction.end_date = Some(*end_time),
            Transition::AssignWinner { bid_id } => auction.winning_bid = Some(bid_id.clone()),
        }
    }
}

/// How a transition treats the state it was validated against.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionPolicy {
    /// The write only lands if the auction is still in the expected prior state.
    #[default]
    Guarded,
    /// Read, modify and replace the whole record. Concurrent writers overwrite each other.
    LastWriteWins,
}
