use chrono::NaiveDate;
use indexmap::{IndexMap, IndexSet};

use super::{Dated, ElectionRecord, ElectionResult, TppRecord};

/// In-memory index of dated election and TPP results, keyed by division.
///
/// Division names are matched case-insensitively: every insert and lookup
/// goes through `normalize`. Per-division lists are kept sorted by date as
/// they are filled; records sharing a date stay in insertion order.
#[derive(Debug, Default)]
pub struct ResultStore {
    /// Division id -> dated results.
    results: IndexMap<u32, Vec<Dated<ElectionResult>>>,
    /// Normalized division name -> dated TPP results.
    tpp: IndexMap<String, Vec<Dated<TppRecord>>>,
    /// Normalized division name -> first division id seen for it.
    division_ids: IndexMap<String, u32>,
}

/// Lowercase key used for every division-name lookup.
fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Insert `item` after every entry dated on or before it.
fn insert_by_date<T>(list: &mut Vec<Dated<T>>, item: Dated<T>) {
    let at = list.partition_point(|entry| entry.date <= item.date);
    list.insert(at, item);
}

impl ResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append every record as a result dated `date`. Returns the number of records loaded.
    ///
    /// No deduplication happens across calls: loading the same snapshot twice
    /// stores every record twice.
    pub fn load_election_results<R, I>(&mut self, date: NaiveDate, records: I) -> usize
    where
        R: ElectionRecord,
        I: IntoIterator<Item = R>,
    {
        let mut count = 0;
        for record in records {
            let result = record.to_result();
            self.division_ids
                .entry(normalize(&result.division_name))
                .or_insert(result.division_id);
            insert_by_date(self.results.entry(result.division_id).or_default(), Dated::new(date, result));
            count += 1;
        }
        count
    }

    /// Append every TPP record dated `date`, keyed by division name only.
    pub fn load_tpp_results<I>(&mut self, date: NaiveDate, records: I) -> usize
    where
        I: IntoIterator<Item = TppRecord>,
    {
        let mut count = 0;
        for record in records {
            insert_by_date(self.tpp.entry(normalize(&record.division_name)).or_default(), Dated::new(date, record));
            count += 1;
        }
        count
    }

    /// Results for a division, ascending by date. Empty for unknown divisions.
    pub fn results_for_division(&self, name: &str) -> &[Dated<ElectionResult>] {
        self.division_id(name)
            .and_then(|id| self.results.get(&id))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// TPP results for a division, ascending by date. Empty for unknown divisions.
    pub fn tpp_for_division(&self, name: &str) -> &[Dated<TppRecord>] {
        self.tpp.get(&normalize(name))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Division id registered for `name`, if any.
    pub fn division_id(&self, name: &str) -> Option<u32> {
        self.division_ids.get(&normalize(name)).copied()
    }

    /// Distinct party names across all loaded results, in first-seen order.
    pub fn list_parties(&self) -> Vec<&str> {
        self.results.values()
            .flatten()
            .map(|dated| dated.record.party.as_str())
            .collect::<IndexSet<_>>()
            .into_iter()
            .collect()
    }

    /// Number of divisions holding at least one election result.
    pub fn num_divisions(&self) -> usize { self.results.len() }

    /// Number of divisions holding at least one TPP result.
    pub fn num_tpp_divisions(&self) -> usize { self.tpp.len() }

    pub fn is_empty(&self) -> bool { self.results.is_empty() && self.tpp.is_empty() }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn result(id: u32, name: &str, party: &str) -> ElectionResult {
        ElectionResult {
            division_id: id,
            division_name: name.into(),
            party: party.into(),
            ..Default::default()
        }
    }

    fn tpp(name: &str, labor: u64, coalition: u64) -> TppRecord {
        TppRecord {
            division_name: name.into(),
            labor_votes: labor,
            coalition_votes: coalition,
            total_votes: labor + coalition,
            ..Default::default()
        }
    }

    #[test]
    fn results_come_back_sorted_by_date() {
        let mut store = ResultStore::new();
        store.load_election_results(date(2010, 8, 21), [result(1, "Griffith", "Australian Labor Party")]);
        store.load_election_results(date(2004, 10, 9), [result(1, "Griffith", "Liberal")]);
        store.load_election_results(date(2007, 11, 24), [result(1, "Griffith", "The Greens")]);

        let dates: Vec<_> = store.results_for_division("Griffith").iter().map(|r| r.date).collect();
        assert_eq!(dates, vec![date(2004, 10, 9), date(2007, 11, 24), date(2010, 8, 21)]);
    }

    #[test]
    fn equal_dates_keep_insertion_order() {
        let mut store = ResultStore::new();
        store.load_election_results(date(2008, 9, 6), [result(5, "Lyne", "First")]);
        store.load_election_results(date(2004, 10, 9), [result(5, "Lyne", "Zeroth")]);
        store.load_election_results(date(2008, 9, 6), [result(5, "Lyne", "Second")]);

        let parties: Vec<_> = store.results_for_division("lyne").iter().map(|r| r.record.party.as_str()).collect();
        assert_eq!(parties, vec!["Zeroth", "First", "Second"]);
    }

    #[test]
    fn names_are_case_insensitive() {
        let mut store = ResultStore::new();
        store.load_election_results(date(2004, 10, 9), [result(7, "Sydney", "Australian Labor Party")]);
        store.load_election_results(date(2007, 11, 24), [result(7, "sydney", "Australian Labor Party")]);

        assert_eq!(store.division_id("SYDNEY"), Some(7));
        assert_eq!(store.results_for_division("Sydney"), store.results_for_division("sydney"));
        assert_eq!(store.results_for_division("sYdNeY").len(), 2);
    }

    #[test]
    fn first_seen_id_wins() {
        let mut store = ResultStore::new();
        store.load_election_results(date(2004, 10, 9), [result(10, "Mayo", "Liberal")]);
        store.load_election_results(date(2008, 9, 6), [result(99, "MAYO", "Liberal")]);

        assert_eq!(store.division_id("mayo"), Some(10));
        // Results filed under the later id are not reachable by name.
        assert_eq!(store.results_for_division("Mayo").len(), 1);
    }

    #[test]
    fn unknown_divisions_are_empty() {
        let mut store = ResultStore::new();
        assert!(store.results_for_division("Nowhere").is_empty());
        assert!(store.tpp_for_division("Nowhere").is_empty());

        store.load_election_results(date(2004, 10, 9), [result(1, "Somewhere", "Liberal")]);
        assert!(store.results_for_division("Nowhere").is_empty());
        assert!(store.tpp_for_division("Somewhere").is_empty());
    }

    #[test]
    fn reloading_duplicates_entries() {
        let mut store = ResultStore::new();
        let rows = [result(3, "Higgins", "Liberal")];
        assert_eq!(store.load_election_results(date(2009, 12, 5), rows.clone()), 1);
        assert_eq!(store.load_election_results(date(2009, 12, 5), rows), 1);
        assert_eq!(store.results_for_division("Higgins").len(), 2);
    }

    #[test]
    fn tpp_is_keyed_by_name_and_sorted() {
        let mut store = ResultStore::new();
        store.load_tpp_results(date(2014, 2, 8), [tpp("Griffith", 60, 40), tpp("GRIFFITH", 55, 45)]);
        store.load_tpp_results(date(2004, 10, 9), [tpp("griffith", 50, 50)]);

        let history = store.tpp_for_division("Griffith");
        assert_eq!(history.len(), 3);
        assert!(history.windows(2).all(|w| w[0].date <= w[1].date));
        assert_eq!(history[1].record.labor_votes, 60);
        assert_eq!(store.num_tpp_divisions(), 1);
        // TPP rows never register division ids.
        assert_eq!(store.division_id("Griffith"), None);
    }

    #[test]
    fn parties_are_distinct() {
        let mut store = ResultStore::new();
        store.load_election_results(date(2004, 10, 9), [
            result(1, "A", "Liberal"),
            result(2, "B", "Australian Labor Party"),
            result(3, "C", "Liberal"),
        ]);
        store.load_election_results(date(2007, 11, 24), [result(1, "A", "The Greens")]);

        let parties = store.list_parties();
        assert_eq!(parties.len(), 3);
        assert!(parties.contains(&"Liberal"));
        assert!(parties.contains(&"Australian Labor Party"));
        assert!(parties.contains(&"The Greens"));
    }
}
