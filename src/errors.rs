// ============================================================
// Error messages — one per rejection kind
// ============================================================

pub const ERR_NOT_ADMIN: &str = "caller is not the administrator";

// ── Phase violations ──

pub const ERR_VOTING_ACTIVE: &str = "voting period active";
pub const ERR_NOT_IN_VOTING_PERIOD: &str = "not in voting period";
pub const ERR_VOTING_NEVER_STARTED: &str = "voting never started";
pub const ERR_RESET_REQUIRED: &str = "voting period expired, reset required";

// ── Configuration ──

pub const ERR_ROSTER_FULL: &str = "there cannot be more than 5 candidates in total";
pub const ERR_UNKNOWN_POSITION: &str = "unknown position";
pub const ERR_DUPLICATE_POSITION: &str = "duplicate position";
pub const ERR_DUPLICATE_CANDIDATE: &str = "candidate already registered";
pub const ERR_NO_CANDIDATES: &str = "no candidates registered";

// ── Participants ──

pub const ERR_ALREADY_REGISTERED: &str = "already registered";
pub const ERR_NOT_REGISTERED: &str = "not registered";
pub const ERR_EMPTY_BALLOT: &str = "no ballots provided";
pub const ERR_UNKNOWN_CANDIDATE: &str = "unknown candidate";
pub const ERR_CANDIDATE_NOT_ELIGIBLE: &str = "candidate not postulated for this position";
pub const ERR_SELF_VOTE: &str = "cannot vote for yourself";
pub const ERR_DUPLICATE_POSITION_VOTE: &str = "already voted for this position";
