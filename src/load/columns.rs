//! Column layouts of the source files, as static source-column correspondences.

/// Source columns for an election-result row shape.
#[derive(Clone, Copy, Debug)]
pub(crate) struct ElectionColumns {
    pub(crate) division_id: &'static str,
    pub(crate) division_name: &'static str,
    pub(crate) state: &'static str,
    pub(crate) candidate_id: &'static str,
    pub(crate) given_name: &'static str,
    pub(crate) surname: &'static str,
    pub(crate) party: &'static str,
    pub(crate) party_abbrev: &'static str,
    /// By-election files only.
    pub(crate) elected: Option<&'static str>,
    pub(crate) historic_elected: Option<&'static str>,
}

/// Source columns for a TPP row shape.
#[derive(Clone, Copy, Debug)]
pub(crate) struct TppColumns {
    pub(crate) division_name: &'static str,
    pub(crate) polling_place: Option<&'static str>,
    pub(crate) labor_votes: &'static str,
    pub(crate) labor_pct: &'static str,
    pub(crate) coalition_votes: &'static str,
    pub(crate) coalition_pct: &'static str,
    pub(crate) total_votes: &'static str,
    pub(crate) swing: &'static str,
}

/// `HouseMembersElectedDownload` files.
pub(crate) const MEMBERS_ELECTED: ElectionColumns = ElectionColumns {
    division_id: "DivisionID",
    division_name: "DivisionNm",
    state: "StateAb",
    candidate_id: "CandidateID",
    given_name: "GivenNm",
    surname: "Surname",
    party: "PartyNm",
    party_abbrev: "PartyAb",
    elected: None,
    historic_elected: None,
};

/// `HouseCandidatesDownload` files of a by-election.
pub(crate) const BY_ELECTION_CANDIDATES: ElectionColumns = ElectionColumns {
    elected: Some("Elected"),
    historic_elected: Some("HistoricElected"),
    ..MEMBERS_ELECTED
};

/// `HouseTppByDivisionDownload` files.
pub(crate) const TPP_BY_DIVISION: TppColumns = TppColumns {
    division_name: "DivisionNm",
    polling_place: None,
    labor_votes: "Australian Labor Party Votes",
    labor_pct: "Australian Labor Party Percentage",
    coalition_votes: "Liberal/National Coalition Votes",
    coalition_pct: "Liberal/National Coalition Percentage",
    total_votes: "TotalVotes",
    swing: "Swing",
};

/// `HouseTppByPollingPlaceDownload` files.
pub(crate) const TPP_BY_POLLING_PLACE: TppColumns = TppColumns {
    polling_place: Some("PollingPlace"),
    ..TPP_BY_DIVISION
};
