multiversx_sc::imports!();
multiversx_sc::derive_imports!();

use crate::errors::{
    ERR_CANDIDATE_NOT_ELIGIBLE, ERR_DUPLICATE_POSITION_VOTE, ERR_SELF_VOTE,
    ERR_UNKNOWN_CANDIDATE, ERR_UNKNOWN_POSITION,
};

// ============================================================
// Voting Phase — derived from the window and the block clock
// ============================================================

#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, Copy, PartialEq, Debug)]
pub enum VotingPhase {
    /// No window recorded in this cycle. Configuration and registration allowed.
    NotStarted,
    /// Inside [start, end). Only ballots are accepted.
    Open,
    /// Window elapsed but not yet reset. Tallies are final.
    Expired,
}

#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, PartialEq, Debug)]
pub struct VotingWindow {
    pub start: u64,
    pub end: u64,
}

impl VotingWindow {
    pub fn new(start: u64, duration: u64) -> Self {
        VotingWindow {
            start,
            end: start + duration,
        }
    }

    pub fn phase_at(&self, now: u64) -> VotingPhase {
        if now < self.end {
            VotingPhase::Open
        } else {
            VotingPhase::Expired
        }
    }
}

// ============================================================
// Candidate — roster entry, immutable once registered
// ============================================================

#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, PartialEq, Debug)]
pub struct Candidate<M: ManagedTypeApi> {
    pub name: ManagedBuffer<M>,
    pub addr: ManagedAddress<M>,
    pub postulated_positions: ManagedVec<M, ManagedBuffer<M>>,
}

impl<M: ManagedTypeApi> Candidate<M> {
    pub fn is_postulated_for(&self, position: &ManagedBuffer<M>) -> bool {
        self.postulated_positions.contains(position)
    }
}

// ============================================================
// Voter — read projection of a cycle-scoped registration
// ============================================================

#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, PartialEq, Debug)]
pub struct Voter<M: ManagedTypeApi> {
    pub addr: ManagedAddress<M>,
    pub is_registered: bool,
    pub registered_at: u64,
    pub voted_positions: ManagedVec<M, ManagedBuffer<M>>,
    /// Voted for every active position (at least one configured)
    pub has_voted_all_positions: bool,
}

// ============================================================
// Ballots
// ============================================================

#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, PartialEq, Debug)]
pub struct Ballot<M: ManagedTypeApi> {
    pub position: ManagedBuffer<M>,
    pub candidate: ManagedAddress<M>,
}

#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, Copy, PartialEq, Debug)]
pub enum BallotRejection {
    UnknownPosition,
    UnknownCandidate,
    CandidateNotEligible,
    SelfVote,
    DuplicatePositionVote,
}

impl BallotRejection {
    pub fn message(&self) -> &'static str {
        match self {
            BallotRejection::UnknownPosition => ERR_UNKNOWN_POSITION,
            BallotRejection::UnknownCandidate => ERR_UNKNOWN_CANDIDATE,
            BallotRejection::CandidateNotEligible => ERR_CANDIDATE_NOT_ELIGIBLE,
            BallotRejection::SelfVote => ERR_SELF_VOTE,
            BallotRejection::DuplicatePositionVote => ERR_DUPLICATE_POSITION_VOTE,
        }
    }
}

/// Outcome of one ballot entry, returned in input order by `castBallot`.
#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, PartialEq, Debug)]
pub struct BallotReceipt<M: ManagedTypeApi> {
    pub position: ManagedBuffer<M>,
    pub candidate: ManagedAddress<M>,
    pub rejection: Option<BallotRejection>,
}

impl<M: ManagedTypeApi> BallotReceipt<M> {
    pub fn is_counted(&self) -> bool {
        self.rejection.is_none()
    }
}
