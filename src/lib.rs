#![no_std]

multiversx_sc::imports!();

pub mod errors;
pub mod types;

use errors::*;
use types::{Ballot, BallotReceipt, BallotRejection, Candidate, Voter, VotingPhase, VotingWindow};

// ============================================================
// Constants
// ============================================================

/// Cumulative roster cap for one election cycle
pub const MAX_CANDIDATES: usize = 5;

/// Voting window: one week in seconds
pub const VOTING_PERIOD: u64 = 604_800;

// ============================================================
// Contract
// ============================================================

#[multiversx_sc::contract]
pub trait VotingApp {
    // ========================================================
    // Init / Upgrade
    // ========================================================

    /// The administrator defaults to the deployer.
    #[init]
    fn init(&self, admin: OptionalValue<ManagedAddress>) {
        let admin = admin
            .into_option()
            .unwrap_or_else(|| self.blockchain().get_caller());
        self.admin().set(&admin);
        self.election_cycle().set(0u64);
    }

    #[upgrade]
    fn upgrade(&self) {}

    // ========================================================
    // ENDPOINT: configurePositions
    // Replaces the active position set wholesale.
    // ========================================================

    #[endpoint(configurePositions)]
    fn configure_positions(&self, names: MultiValueEncoded<ManagedBuffer>) {
        self.require_admin();
        self.require_closed();

        let mut positions = self.positions();
        positions.clear();
        for name in names {
            require!(positions.insert(name), ERR_DUPLICATE_POSITION);
        }

        let cycle = self.election_cycle().get();
        self.positions_configured_event(cycle, &self.active_positions());
    }

    // ========================================================
    // ENDPOINT: registerCandidates
    // Appends to the roster. The whole batch is rejected if any
    // entry fails or the cumulative cap would be exceeded.
    // ========================================================

    #[endpoint(registerCandidates)]
    fn register_candidates(&self, entries: MultiValueEncoded<Candidate<Self::Api>>) {
        self.require_admin();
        self.require_closed();

        // ── Cap: current roster plus the full batch ──
        // each entry arrives as exactly one raw argument
        let roster_size = self.candidate_addresses().len();
        require!(
            roster_size + entries.raw_len() <= MAX_CANDIDATES,
            ERR_ROSTER_FULL
        );

        let positions = self.positions();
        let now = self.blockchain().get_block_timestamp();

        for entry in entries {
            for position in entry.postulated_positions.iter() {
                require!(positions.contains(&position), ERR_UNKNOWN_POSITION);
            }
            require!(
                self.candidate_addresses().insert(entry.addr.clone()),
                ERR_DUPLICATE_CANDIDATE
            );

            self.candidates(&entry.addr).set(&entry);
            self.new_candidate_event(&entry.name, &entry.addr, &entry.postulated_positions, now);
        }
    }

    // ========================================================
    // ENDPOINT: register
    // Self-registration, once per identity per cycle.
    // ========================================================

    #[endpoint(register)]
    fn register(&self) {
        self.require_closed();

        let caller = self.blockchain().get_caller();
        let cycle = self.election_cycle().get();
        require!(
            self.voters(cycle).insert(caller.clone()),
            ERR_ALREADY_REGISTERED
        );

        let now = self.blockchain().get_block_timestamp();
        self.registered_at(cycle, &caller).set(now);

        self.registered_successfully_event(&caller, now);
    }

    // ========================================================
    // ENDPOINT: openVoting
    // NotStarted → Open
    // ========================================================

    #[endpoint(openVoting)]
    fn open_voting(&self) {
        self.require_admin();
        match self.current_phase() {
            VotingPhase::NotStarted => {}
            VotingPhase::Open => sc_panic!(ERR_VOTING_ACTIVE),
            VotingPhase::Expired => sc_panic!(ERR_RESET_REQUIRED),
        }

        let candidate_count = self.candidate_addresses().len();
        require!(candidate_count > 0, ERR_NO_CANDIDATES);

        let now = self.blockchain().get_block_timestamp();
        let window = VotingWindow::new(now, VOTING_PERIOD);
        self.voting_window().set(&window);

        self.voting_started_event(window.start, window.end, candidate_count as u64);
    }

    // ========================================================
    // ENDPOINT: resetVoting
    // Expired → NotStarted. Positions, roster and window are
    // cleared; bumping the cycle drops voters and tallies.
    // ========================================================

    #[endpoint(resetVoting)]
    fn reset_voting(&self) {
        self.require_admin();
        match self.current_phase() {
            VotingPhase::NotStarted => sc_panic!(ERR_VOTING_NEVER_STARTED),
            VotingPhase::Open => sc_panic!(ERR_VOTING_ACTIVE),
            VotingPhase::Expired => {}
        }

        for addr in self.candidate_addresses().iter() {
            self.candidates(&addr).clear();
        }
        self.candidate_addresses().clear();
        self.positions().clear();
        self.voting_window().clear();

        let next_cycle = self.election_cycle().get() + 1;
        self.election_cycle().set(next_cycle);

        let now = self.blockchain().get_block_timestamp();
        self.election_reset_event(next_cycle, now);
    }

    // ========================================================
    // ENDPOINT: castBallot
    // Entries are validated and counted one by one. Rejected
    // entries are reported in the receipts; if nothing in the
    // batch is counted the call fails with the first rejection.
    // ========================================================

    #[endpoint(castBallot)]
    fn cast_ballot(
        &self,
        ballots: MultiValueEncoded<Ballot<Self::Api>>,
    ) -> MultiValueEncoded<BallotReceipt<Self::Api>> {
        self.require_open();

        let caller = self.blockchain().get_caller();
        let cycle = self.election_cycle().get();
        self.require_registered(cycle, &caller);
        require!(!ballots.is_empty(), ERR_EMPTY_BALLOT);

        let now = self.blockchain().get_block_timestamp();
        let mut receipts = MultiValueEncoded::new();
        let mut counted = 0usize;
        let mut first_rejection: Option<BallotRejection> = None;

        for ballot in ballots {
            let rejection = match self.check_ballot(cycle, &caller, &ballot) {
                Ok(()) => {
                    self.count_ballot(cycle, &caller, &ballot, now);
                    counted += 1;
                    None
                }
                Err(reason) => {
                    self.ballot_rejected_event(&caller, &ballot.position, &ballot.candidate, reason);
                    first_rejection.get_or_insert(reason);
                    Some(reason)
                }
            };

            receipts.push(BallotReceipt {
                position: ballot.position,
                candidate: ballot.candidate,
                rejection,
            });
        }

        if let (0, Some(reason)) = (counted, first_rejection) {
            sc_panic!(reason.message());
        }

        receipts
    }

    // ========================================================
    // INTERNAL: ballot validation and counting
    // ========================================================

    fn check_ballot(
        &self,
        cycle: u64,
        voter: &ManagedAddress,
        ballot: &Ballot<Self::Api>,
    ) -> Result<(), BallotRejection> {
        if !self.positions().contains(&ballot.position) {
            return Err(BallotRejection::UnknownPosition);
        }
        if !self.candidate_addresses().contains(&ballot.candidate) {
            return Err(BallotRejection::UnknownCandidate);
        }
        if !self
            .candidates(&ballot.candidate)
            .get()
            .is_postulated_for(&ballot.position)
        {
            return Err(BallotRejection::CandidateNotEligible);
        }
        if &ballot.candidate == voter {
            return Err(BallotRejection::SelfVote);
        }
        if self.voted_positions(cycle, voter).contains(&ballot.position) {
            return Err(BallotRejection::DuplicatePositionVote);
        }
        Ok(())
    }

    fn count_ballot(
        &self,
        cycle: u64,
        voter: &ManagedAddress,
        ballot: &Ballot<Self::Api>,
        now: u64,
    ) {
        self.tally(cycle, &ballot.position, &ballot.candidate)
            .update(|count| *count += 1);
        self.ballot_count(cycle, &ballot.position)
            .update(|count| *count += 1);
        self.voted_positions(cycle, voter)
            .insert(ballot.position.clone());

        self.new_vote_event(voter, &ballot.candidate, &ballot.position, now);
    }

    // ========================================================
    // INTERNAL: guards
    // ========================================================

    fn require_admin(&self) {
        let caller = self.blockchain().get_caller();
        require!(caller == self.admin().get(), ERR_NOT_ADMIN);
    }

    fn require_closed(&self) {
        require!(
            self.current_phase() != VotingPhase::Open,
            ERR_VOTING_ACTIVE
        );
    }

    fn require_open(&self) {
        require!(
            self.current_phase() == VotingPhase::Open,
            ERR_NOT_IN_VOTING_PERIOD
        );
    }

    fn require_registered(&self, cycle: u64, voter: &ManagedAddress) {
        require!(self.voters(cycle).contains(voter), ERR_NOT_REGISTERED);
    }

    fn current_phase(&self) -> VotingPhase {
        if self.voting_window().is_empty() {
            return VotingPhase::NotStarted;
        }
        let now = self.blockchain().get_block_timestamp();
        self.voting_window().get().phase_at(now)
    }

    fn active_positions(&self) -> ManagedVec<ManagedBuffer> {
        let mut result = ManagedVec::new();
        for position in self.positions().iter() {
            result.push(position);
        }
        result
    }

    // ========================================================
    // VIEWS — read-only queries
    // ========================================================

    #[view(getAdmin)]
    fn get_admin(&self) -> ManagedAddress {
        self.admin().get()
    }

    #[view(getPositions)]
    fn get_positions(&self) -> MultiValueEncoded<ManagedBuffer> {
        let mut result = MultiValueEncoded::new();
        for position in self.positions().iter() {
            result.push(position);
        }
        result
    }

    #[view(getCandidates)]
    fn get_candidates(&self) -> MultiValueEncoded<Candidate<Self::Api>> {
        let mut result = MultiValueEncoded::new();
        for addr in self.candidate_addresses().iter() {
            result.push(self.candidates(&addr).get());
        }
        result
    }

    #[view(getCandidate)]
    fn get_candidate(&self, addr: ManagedAddress) -> OptionalValue<Candidate<Self::Api>> {
        if self.candidate_addresses().contains(&addr) {
            OptionalValue::Some(self.candidates(&addr).get())
        } else {
            OptionalValue::None
        }
    }

    #[view(getCandidateCount)]
    fn get_candidate_count(&self) -> u64 {
        self.candidate_addresses().len() as u64
    }

    #[view(getVoter)]
    fn get_voter(&self, addr: ManagedAddress) -> Voter<Self::Api> {
        let cycle = self.election_cycle().get();
        let voted = self.voted_positions(cycle, &addr);

        let mut voted_positions = ManagedVec::new();
        for position in voted.iter() {
            voted_positions.push(position);
        }

        let positions = self.positions();
        let has_voted_all_positions =
            !positions.is_empty() && positions.iter().all(|position| voted.contains(&position));

        Voter {
            is_registered: self.voters(cycle).contains(&addr),
            registered_at: self.registered_at(cycle, &addr).get(),
            voted_positions,
            has_voted_all_positions,
            addr,
        }
    }

    #[view(getVoterCount)]
    fn get_voter_count(&self) -> u64 {
        let cycle = self.election_cycle().get();
        self.voters(cycle).len() as u64
    }

    #[view(hasVoted)]
    fn has_voted(&self, voter: ManagedAddress, position: ManagedBuffer) -> bool {
        let cycle = self.election_cycle().get();
        self.voted_positions(cycle, &voter).contains(&position)
    }

    /// Missing entries read as zero.
    #[view(getTally)]
    fn get_tally(&self, position: ManagedBuffer, candidate: ManagedAddress) -> u64 {
        let cycle = self.election_cycle().get();
        self.tally(cycle, &position, &candidate).get()
    }

    #[view(getBallotCount)]
    fn get_ballot_count(&self, position: ManagedBuffer) -> u64 {
        let cycle = self.election_cycle().get();
        self.ballot_count(cycle, &position).get()
    }

    /// Tally of every candidate postulated for `position`, in roster order.
    #[view(getPositionResults)]
    fn get_position_results(
        &self,
        position: ManagedBuffer,
    ) -> MultiValueEncoded<MultiValue2<ManagedAddress, u64>> {
        let cycle = self.election_cycle().get();
        let mut result = MultiValueEncoded::new();
        for addr in self.candidate_addresses().iter() {
            if !self.candidates(&addr).get().is_postulated_for(&position) {
                continue;
            }
            let votes = self.tally(cycle, &position, &addr).get();
            result.push((addr, votes).into());
        }
        result
    }

    #[view(getVotingWindowStart)]
    fn get_voting_window_start(&self) -> u64 {
        if self.voting_window().is_empty() {
            return 0;
        }
        self.voting_window().get().start
    }

    #[view(getVotingWindow)]
    fn get_voting_window(&self) -> MultiValue3<u64, u64, VotingPhase> {
        let phase = self.current_phase();
        if self.voting_window().is_empty() {
            return (0u64, 0u64, phase).into();
        }
        let window = self.voting_window().get();
        (window.start, window.end, phase).into()
    }

    #[view(getVotingPhase)]
    fn get_voting_phase(&self) -> VotingPhase {
        self.current_phase()
    }

    #[view(getElectionCycle)]
    fn get_election_cycle(&self) -> u64 {
        self.election_cycle().get()
    }

    #[view(getElectionConfig)]
    fn get_election_config(&self) -> MultiValue2<u64, u64> {
        (MAX_CANDIDATES as u64, VOTING_PERIOD).into()
    }

    // ========================================================
    // EVENTS
    // ========================================================

    #[event("registeredSuccessfully")]
    fn registered_successfully_event(&self, #[indexed] voter: &ManagedAddress, timestamp: u64);

    #[event("positionsConfigured")]
    fn positions_configured_event(
        &self,
        #[indexed] cycle: u64,
        positions: &ManagedVec<ManagedBuffer>,
    );

    #[event("newCandidate")]
    fn new_candidate_event(
        &self,
        #[indexed] name: &ManagedBuffer,
        #[indexed] addr: &ManagedAddress,
        #[indexed] postulated_positions: &ManagedVec<ManagedBuffer>,
        timestamp: u64,
    );

    #[event("votingStarted")]
    fn voting_started_event(
        &self,
        #[indexed] start: u64,
        #[indexed] end: u64,
        #[indexed] candidate_count: u64,
    );

    #[event("newVote")]
    fn new_vote_event(
        &self,
        #[indexed] voter: &ManagedAddress,
        #[indexed] candidate: &ManagedAddress,
        #[indexed] position: &ManagedBuffer,
        timestamp: u64,
    );

    #[event("ballotRejected")]
    fn ballot_rejected_event(
        &self,
        #[indexed] voter: &ManagedAddress,
        #[indexed] position: &ManagedBuffer,
        #[indexed] candidate: &ManagedAddress,
        reason: BallotRejection,
    );

    #[event("electionReset")]
    fn election_reset_event(&self, #[indexed] cycle: u64, timestamp: u64);

    // ========================================================
    // STORAGE
    // ========================================================

    // ── Configuration ──

    #[storage_mapper("admin")]
    fn admin(&self) -> SingleValueMapper<ManagedAddress>;

    #[storage_mapper("electionCycle")]
    fn election_cycle(&self) -> SingleValueMapper<u64>;

    // ── Election setup (cleared on reset) ──

    #[storage_mapper("positions")]
    fn positions(&self) -> UnorderedSetMapper<ManagedBuffer>;

    #[storage_mapper("candidateAddresses")]
    fn candidate_addresses(&self) -> UnorderedSetMapper<ManagedAddress>;

    #[storage_mapper("candidates")]
    fn candidates(&self, addr: &ManagedAddress) -> SingleValueMapper<Candidate<Self::Api>>;

    #[storage_mapper("votingWindow")]
    fn voting_window(&self) -> SingleValueMapper<VotingWindow>;

    // ── Participants (scoped by cycle) ──
    // Entries of earlier cycles are never freed; reset only moves the cycle key.

    #[storage_mapper("voters")]
    fn voters(&self, cycle: u64) -> UnorderedSetMapper<ManagedAddress>;

    #[storage_mapper("registeredAt")]
    fn registered_at(&self, cycle: u64, voter: &ManagedAddress) -> SingleValueMapper<u64>;

    #[storage_mapper("votedPositions")]
    fn voted_positions(
        &self,
        cycle: u64,
        voter: &ManagedAddress,
    ) -> UnorderedSetMapper<ManagedBuffer>;

    // ── Tallies (scoped by cycle, earlier cycles never freed) ──

    #[storage_mapper("tally")]
    fn tally(
        &self,
        cycle: u64,
        position: &ManagedBuffer,
        candidate: &ManagedAddress,
    ) -> SingleValueMapper<u64>;

    #[storage_mapper("ballotCount")]
    fn ballot_count(&self, cycle: u64, position: &ManagedBuffer) -> SingleValueMapper<u64>;
}
