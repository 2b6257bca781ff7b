use chrono::NaiveDate;

/// Read contract shared by every election-result row shape.
pub trait ElectionRecord {
    fn division_id(&self) -> u32;
    fn division_name(&self) -> &str;
    fn state(&self) -> &str;
    fn party(&self) -> &str;
    fn surname(&self) -> &str;
    fn given_name(&self) -> &str;

    /// Copy the fields the store keeps into the unified internal shape.
    fn to_result(&self) -> ElectionResult {
        ElectionResult {
            division_id: self.division_id(),
            division_name: self.division_name().to_string(),
            state: self.state().to_string(),
            party: self.party().to_string(),
            surname: self.surname().to_string(),
            given_name: self.given_name().to_string(),
        }
    }
}

/// Unified election result, as held by the `ResultStore`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ElectionResult {
    pub division_id: u32,
    pub division_name: String,
    pub state: String,
    pub party: String,
    pub surname: String,
    pub given_name: String,
}

/// One row of a general election "members elected" file.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GeneralResult {
    pub division_id: u32,
    pub division_name: String,
    pub state: String,
    pub candidate_id: u32,
    pub given_name: String,
    pub surname: String,
    pub party: String,
    pub party_abbrev: String,
}

/// One row of a by-election candidates file. Every candidate is listed;
/// only the row flagged as elected is historically meaningful.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ByElectionResult {
    pub state: String,
    pub division_id: u32,
    pub division_name: String,
    pub party_abbrev: String,
    pub party: String,
    pub candidate_id: u32,
    pub surname: String,
    pub given_name: String,
    pub elected: String,
    pub historic_elected: String,
}

impl ByElectionResult {
    /// Marker used in the `Elected` column for the winning candidate.
    pub const ELECTED: &'static str = "Y";

    pub fn is_elected(&self) -> bool {
        self.elected.trim() == Self::ELECTED
    }
}

macro_rules! impl_election_record {
    ($ty:ty) => {
        impl ElectionRecord for $ty {
            fn division_id(&self) -> u32 { self.division_id }
            fn division_name(&self) -> &str { &self.division_name }
            fn state(&self) -> &str { &self.state }
            fn party(&self) -> &str { &self.party }
            fn surname(&self) -> &str { &self.surname }
            fn given_name(&self) -> &str { &self.given_name }
        }
    };
}

impl_election_record!(GeneralResult);
impl_election_record!(ByElectionResult);
impl_election_record!(ElectionResult);

/// Two-party-preferred result, unified across division-level and
/// polling-booth-level sources.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TppRecord {
    pub division_name: String,
    /// Set for booth-level rows only.
    pub polling_place: Option<String>,
    pub labor_votes: u64,
    pub labor_pct: f64,
    pub coalition_votes: u64,
    pub coalition_pct: f64,
    pub total_votes: u64,
    /// Blank in the source for divisions contested for the first time.
    pub swing: Option<f64>,
}

impl TppRecord {
    /// Winning bloc's share of the two-party vote, in percent.
    /// `None` when no votes were recorded.
    pub fn winning_share(&self) -> Option<f64> {
        two_party_share(self.labor_votes, self.coalition_votes)
    }
}

/// Larger of the two bloc counts as a percentage of their sum.
pub(crate) fn two_party_share(labor_votes: u64, coalition_votes: u64) -> Option<f64> {
    let total = labor_votes + coalition_votes;
    if total == 0 { return None }
    Some(labor_votes.max(coalition_votes) as f64 / total as f64 * 100.0)
}

/// A record stamped with the date of the snapshot it was loaded from.
#[derive(Clone, Debug, PartialEq)]
pub struct Dated<T> {
    pub date: NaiveDate,
    pub record: T,
}

impl<T> Dated<T> {
    pub fn new(date: NaiveDate, record: T) -> Self {
        Self { date, record }
    }
}
