use affixdex::search::search;
use affixdex::{BidirectionalIndex, FmIndexConfig, SearchConfig, alphabet};

#[test]
fn substitution_rate_budget_matches_literal_scenario() {
    let index: BidirectionalIndex<i32> =
        FmIndexConfig::new().construct_bidirectional_index(b"ACGTACGT", alphabet::ascii_dna());

    let config = SearchConfig::new().max_error_rate(0.25, 0.25, 0.0, 0.0);
    let results = search(&index, &["ACGT", "ACGGACG", "CGTC", "CGG"], &config);

    let mut hits0 = results[0].positions().to_vec();
    hits0.sort_unstable();
    assert_eq!(hits0, vec![0, 4]);
    assert_eq!(results[1].positions(), &[0]);
    assert_eq!(results[2].positions(), &[1]);
    assert!(results[3].positions().is_empty());
}

#[test]
fn substitution_only_rate_rejects_indel_only_match() {
    let index: BidirectionalIndex<i32> =
        FmIndexConfig::new().construct_bidirectional_index(b"ACGTACGT", alphabet::ascii_dna());

    // "ACGAT" is edit-distance 1 from "ACGT" via a single insertion (the extra 'A'), but needs
    // two substitutions to align against any length-5 window of the text. Before
    // `max_error_rate` took four independent rates, a single shared rate silently set
    // insertion/deletion to the same nonzero value as substitution, so a "substitution-only"
    // rate budget would wrongly admit this indel-only match via the trivial driver instead of
    // correctly rejecting it through the Hamming/scheme path.
    let config = SearchConfig::new().max_error_rate(0.25, 0.25, 0.0, 0.0);
    let results = search(&index, &["ACGAT"], &config);

    assert!(results[0].positions().is_empty());
}

#[test]
fn absolute_substitution_budget_finds_hit_outside_exact_match() {
    let index: BidirectionalIndex<i32> =
        FmIndexConfig::new().construct_bidirectional_index(b"ACGTACGT", alphabet::ascii_dna());

    let config = SearchConfig::new().max_error(1, 1, 0, 0);
    let results = search(&index, &["ACGG"], &config);

    let mut positions = results[0].positions().to_vec();
    positions.sort_unstable();
    assert_eq!(positions, vec![0, 4]);
}

#[test]
fn edit_budget_with_insertion_routes_through_trivial_driver() {
    let index: BidirectionalIndex<i32> =
        FmIndexConfig::new().construct_bidirectional_index(b"ACGTACGT", alphabet::ascii_dna());

    // "ACGTT" edit-distance-1 from "ACGTA" (an insertion of T) and from "ACGTC"... restrict to a
    // budget that only allows an insertion, covering the mixed edit-kind dispatch path.
    let config = SearchConfig::new().max_error(1, 0, 1, 0);
    let results = search(&index, &["ACGAT"], &config);

    assert!(results[0].positions().contains(&0));
}
