//! Dataset loaders: one dated snapshot at a time into a `ResultStore`.

mod columns;

use anyhow::{Context, Result};
use chrono::NaiveDate;

use crate::config::{SnapshotKind, SnapshotSpec};
use crate::io::CsvTable;
use crate::results::{ByElectionResult, GeneralResult, ResultStore, TppRecord};

use columns::{BY_ELECTION_CANDIDATES, ElectionColumns, MEMBERS_ELECTED, TPP_BY_DIVISION, TPP_BY_POLLING_PLACE, TppColumns};

/// What one snapshot contributed to the store.
#[derive(Clone, Debug, PartialEq)]
pub struct SnapshotSummary {
    pub date: NaiveDate,
    pub kind: SnapshotKind,
    /// Rows in the results file.
    pub rows: usize,
    /// Results loaded (winners only, for by-elections).
    pub results: usize,
    pub tpp: usize,
}

/// Load every snapshot, in the order given, into a fresh store.
/// Any unreadable file aborts the whole load.
pub fn load_snapshots(snapshots: &[SnapshotSpec], verbose: u8) -> Result<ResultStore> {
    let mut store = ResultStore::new();
    for snapshot in snapshots {
        let summary = load_snapshot(&mut store, snapshot)?;
        if verbose > 0 {
            eprintln!("[load] {} {}: {} of {} rows loaded, {} tpp rows",
                summary.date, summary.kind, summary.results, summary.rows, summary.tpp);
        }
    }
    if verbose > 0 {
        eprintln!("[load] {} divisions with results, {} with tpp history", store.num_divisions(), store.num_tpp_divisions());
    }
    Ok(store)
}

/// Load one snapshot: its results file and, if present, its TPP file.
pub fn load_snapshot(store: &mut ResultStore, snapshot: &SnapshotSpec) -> Result<SnapshotSummary> {
    let context = || format!("[load] snapshot {} ({})", snapshot.date, snapshot.kind);
    let results = CsvTable::read(&snapshot.results).with_context(context)?;
    let tpp = snapshot.tpp.as_deref().map(CsvTable::read).transpose().with_context(context)?;
    load_tables(store, snapshot.date, snapshot.kind, &results, tpp.as_ref()).with_context(context)
}

/// Parse both tables completely, then insert into the store.
pub(crate) fn load_tables(
    store: &mut ResultStore,
    date: NaiveDate,
    kind: SnapshotKind,
    results: &CsvTable,
    tpp: Option<&CsvTable>,
) -> Result<SnapshotSummary> {
    let tpp_columns = match kind {
        SnapshotKind::General => &TPP_BY_DIVISION,
        SnapshotKind::ByElection => &TPP_BY_POLLING_PLACE,
    };
    let tpp_records = tpp.map(|table| read_tpp(table, tpp_columns)).transpose()?;

    let loaded = match kind {
        SnapshotKind::General => {
            let rows = read_general_results(results, &MEMBERS_ELECTED)?;
            store.load_election_results(date, rows)
        }
        SnapshotKind::ByElection => {
            let rows = read_by_election_results(results, &BY_ELECTION_CANDIDATES)?;
            store.load_election_results(date, rows.into_iter().filter(|row| row.is_elected()))
        }
    };
    let tpp_loaded = tpp_records.map_or(0, |records| store.load_tpp_results(date, records));

    Ok(SnapshotSummary { date, kind, rows: results.height(), results: loaded, tpp: tpp_loaded })
}

/// Project a members-elected table into typed rows.
fn read_general_results(table: &CsvTable, cols: &ElectionColumns) -> Result<Vec<GeneralResult>> {
    let division_ids = table.parsed::<u32>(cols.division_id)?;
    let candidate_ids = table.parsed::<u32>(cols.candidate_id)?;
    let mut division_names = table.text(cols.division_name)?;
    let mut states = table.text(cols.state)?;
    let mut given_names = table.text(cols.given_name)?;
    let mut surnames = table.text(cols.surname)?;
    let mut parties = table.text(cols.party)?;
    let mut party_abbrevs = table.text(cols.party_abbrev)?;

    Ok((0..table.height())
        .map(|i| GeneralResult {
            division_id: division_ids[i],
            division_name: std::mem::take(&mut division_names[i]),
            state: std::mem::take(&mut states[i]),
            candidate_id: candidate_ids[i],
            given_name: std::mem::take(&mut given_names[i]),
            surname: std::mem::take(&mut surnames[i]),
            party: std::mem::take(&mut parties[i]),
            party_abbrev: std::mem::take(&mut party_abbrevs[i]),
        })
        .collect())
}

/// Project a by-election candidates table into typed rows. Every candidate is kept.
fn read_by_election_results(table: &CsvTable, cols: &ElectionColumns) -> Result<Vec<ByElectionResult>> {
    let elected_column = cols.elected
        .with_context(|| format!("[load] {}: no elected column for by-election rows", table.source()))?;
    let mut elected = table.text(elected_column)?;
    let mut historic = match cols.historic_elected {
        Some(column) => table.optional_text(column)?,
        None => None,
    };

    Ok(read_general_results(table, cols)?
        .into_iter()
        .enumerate()
        .map(|(i, row)| ByElectionResult {
            state: row.state,
            division_id: row.division_id,
            division_name: row.division_name,
            party_abbrev: row.party_abbrev,
            party: row.party,
            candidate_id: row.candidate_id,
            surname: row.surname,
            given_name: row.given_name,
            elected: std::mem::take(&mut elected[i]),
            historic_elected: historic.as_mut().map(|h| std::mem::take(&mut h[i])).unwrap_or_default(),
        })
        .collect())
}

/// Project a TPP table of either shape into unified TPP records.
fn read_tpp(table: &CsvTable, cols: &TppColumns) -> Result<Vec<TppRecord>> {
    let mut division_names = table.text(cols.division_name)?;
    let mut polling_places = match cols.polling_place {
        Some(column) => Some(table.text(column)?),
        None => None,
    };
    let labor_votes = table.parsed::<u64>(cols.labor_votes)?;
    let labor_pct = table.parsed::<f64>(cols.labor_pct)?;
    let coalition_votes = table.parsed::<u64>(cols.coalition_votes)?;
    let coalition_pct = table.parsed::<f64>(cols.coalition_pct)?;
    let total_votes = table.parsed::<u64>(cols.total_votes)?;
    let swing = table.parsed_opt::<f64>(cols.swing)?;

    Ok((0..table.height())
        .map(|i| TppRecord {
            division_name: std::mem::take(&mut division_names[i]),
            polling_place: polling_places.as_mut().map(|p| std::mem::take(&mut p[i])),
            labor_votes: labor_votes[i],
            labor_pct: labor_pct[i],
            coalition_votes: coalition_votes[i],
            coalition_pct: coalition_pct[i],
            total_votes: total_votes[i],
            swing: swing[i],
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    const MEMBERS: &str = "\
DivisionID,DivisionNm,StateAb,CandidateID,GivenNm,Surname,PartyNm,PartyAb
101,Adelaide,SA,2001,Kate,Ellis,Australian Labor Party,ALP
197,Griffith,QLD,2002,Kevin,Rudd,Australian Labor Party,ALP
";

    const CANDIDATES: &str = "\
StateAb,DivisionID,DivisionNm,PartyAb,PartyNm,CandidateID,Surname,GivenNm,Elected,HistoricElected
QLD,197,Griffith,ALP,Australian Labor Party,3001,Butler,Terri,Y,N
QLD,197,Griffith,LNP,Liberal National Party of Queensland,3002,Glasson,Bill,N,N
QLD,197,Griffith,GRN,The Greens,3003,Bayley,Geoff,N,N
";

    const TPP_DIVISION: &str = "\
DivisionID,DivisionNm,StateAb,Australian Labor Party Votes,Australian Labor Party Percentage,Liberal/National Coalition Votes,Liberal/National Coalition Percentage,TotalVotes,Swing
101,Adelaide,SA,50000,55.5,40090,44.5,90090,1.2
197,Griffith,QLD,48000,58.5,34054,41.5,82054,
";

    const TPP_BOOTH: &str = "\
StateAb,DivisionID,DivisionNm,PollingPlaceID,PollingPlace,Australian Labor Party Votes,Australian Labor Party Percentage,Liberal/National Coalition Votes,Liberal/National Coalition Percentage,TotalVotes,Swing
QLD,197,Griffith,1,Annerley,900,52.0,830,48.0,1730,-2.1
QLD,197,Griffith,2,Balmoral,700,45.0,855,55.0,1555,-3.0
";

    fn table(name: &str, text: &str) -> CsvTable {
        CsvTable::from_bytes(name, text.as_bytes()).unwrap()
    }

    #[test]
    fn general_election_loads_every_row() {
        let mut store = ResultStore::new();
        let summary = load_tables(&mut store, date(2007, 11, 24), SnapshotKind::General,
            &table("members.csv", MEMBERS), Some(&table("tpp.csv", TPP_DIVISION))).unwrap();

        assert_eq!((summary.rows, summary.results, summary.tpp), (2, 2, 2));
        let griffith = store.results_for_division("GRIFFITH");
        assert_eq!(griffith.len(), 1);
        assert_eq!(griffith[0].record.surname, "Rudd");
        assert_eq!(griffith[0].date, date(2007, 11, 24));

        let tpp = store.tpp_for_division("griffith");
        assert_eq!(tpp[0].record.labor_votes, 48000);
        assert_eq!(tpp[0].record.swing, None);
        assert_eq!(tpp[0].record.polling_place, None);
    }

    #[test]
    fn by_election_keeps_only_the_winner() {
        let mut store = ResultStore::new();
        let summary = load_tables(&mut store, date(2014, 2, 8), SnapshotKind::ByElection,
            &table("cands.csv", CANDIDATES), Some(&table("booths.csv", TPP_BOOTH))).unwrap();

        assert_eq!((summary.rows, summary.results, summary.tpp), (3, 1, 2));
        let griffith = store.results_for_division("Griffith");
        assert_eq!(griffith.len(), 1);
        assert_eq!(griffith[0].record.party, "Australian Labor Party");
        assert_eq!(store.list_parties(), vec!["Australian Labor Party"]);

        let booths = store.tpp_for_division("Griffith");
        assert_eq!(booths[1].record.polling_place.as_deref(), Some("Balmoral"));
        assert_eq!(booths[1].record.swing, Some(-3.0));
    }

    #[test]
    fn missing_tpp_does_not_block_results() {
        let mut store = ResultStore::new();
        let summary = load_tables(&mut store, date(2008, 9, 6), SnapshotKind::ByElection,
            &table("cands.csv", CANDIDATES), None).unwrap();
        assert_eq!(summary.tpp, 0);
        assert_eq!(store.results_for_division("Griffith").len(), 1);
        assert!(store.tpp_for_division("Griffith").is_empty());
    }

    #[test]
    fn malformed_rows_are_fatal() {
        let bad = MEMBERS.replace("2002", "two");
        let mut store = ResultStore::new();
        let err = load_tables(&mut store, date(2007, 11, 24), SnapshotKind::General,
            &table("members.csv", &bad), None).unwrap_err();
        assert!(err.to_string().contains("members.csv"), "{err}");
        assert!(store.is_empty());
    }

    #[test]
    fn bad_tpp_loads_nothing() {
        let mut store = ResultStore::new();
        let result = load_tables(&mut store, date(2007, 11, 24), SnapshotKind::General,
            &table("members.csv", MEMBERS), Some(&table("tpp.csv", "DivisionNm\nAdelaide\n")));
        assert!(result.is_err());
        assert!(store.is_empty());
    }

    #[test]
    fn snapshot_files_are_read_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let results = dir.path().join("members.csv");
        std::fs::write(&results, MEMBERS).unwrap();

        let snapshots = [
            SnapshotSpec::general(date(2004, 10, 9), &results, None),
            SnapshotSpec::by_election(date(2008, 6, 28), dir.path().join("missing.csv"), None),
        ];
        let err = load_snapshots(&snapshots, 0).unwrap_err();
        let message = format!("{err:#}");
        assert!(message.contains("missing.csv") && message.contains("2008-06-28"), "{message}");

        let store = load_snapshots(&snapshots[..1], 0).unwrap();
        assert_eq!(store.num_divisions(), 2);
    }
}
