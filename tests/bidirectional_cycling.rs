use affixdex::{BidirectionalIndex, alphabet};

#[test]
fn cycle_back_then_cycle_front_match_literal_scenario() {
    let index: BidirectionalIndex<i32> =
        BidirectionalIndex::new(b"GAATTAATGAAC", alphabet::ascii_dna(), 2);

    let mut cursor = index.root();
    assert!(cursor.extend_right_seq(*b"AAC"));
    assert!(cursor.cycle_back());
    assert_eq!(cursor.query(), b"AAT");
    assert_eq!(cursor.last_char(), b'T');

    assert!(cursor.extend_left_symbol(b'G'));
    assert!(cursor.cycle_front());
    assert_eq!(cursor.query(), b"TAAT");
    assert_eq!(cursor.last_char(), b'T');
}

#[test]
fn forward_and_reverse_intervals_always_have_equal_counts() {
    let index: BidirectionalIndex<i32> =
        BidirectionalIndex::new(b"ACGGTAGGACGTTACG", alphabet::ascii_dna(), 1);

    let mut cursor = index.root();
    for symbol in *b"ACG" {
        assert!(cursor.extend_right_symbol(symbol));
    }

    let fwd = cursor.to_fwd_cursor();
    let rev = cursor.to_rev_cursor();
    assert_eq!(fwd.count(), cursor.count());
    assert_eq!(rev.count(), cursor.count());
}
