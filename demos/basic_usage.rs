use affixdex::search::search;
use affixdex::{FmIndexConfig, SearchConfig, alphabet};

fn main() {
    // This example shows how to build a bidirectional index and run exact and approximate search.

    let dna_alphabet = alphabet::ascii_dna_with_n();
    let text = b"acgtnACGTNacgtacgt";

    let index = FmIndexConfig::<i32>::new()
        .suffix_array_sampling_rate(2)
        .construct_bidirectional_index(text, dna_alphabet);

    let query = b"ACGT";

    let mut cursor = index.root();
    assert!(cursor.extend_right_seq(query.iter().copied()));
    println!("'{}' occurs {} times", String::from_utf8_lossy(query), cursor.count());

    for position in cursor.locate() {
        println!("found at position {position}");
    }

    // for many queries, or approximate search, the facade handles dispatch and dedup
    let many_queries = ["ACGT", "ACGG", "NNNN"];
    let config = SearchConfig::new().max_error_rate(0.25, 0.25, 0.0, 0.0);

    for (query, result) in many_queries.iter().zip(search(&index, &many_queries, &config)) {
        println!("approximate hits for '{query}': {:?}", result.positions());
    }
}
