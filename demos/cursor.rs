use affixdex::{BidirectionalIndex, alphabet};

fn main() {
    // This example showcases the bidirectional cursor API: a query can be grown from either end,
    // and sibling edges can be cycled through at a fixed depth.

    let dna_alphabet = alphabet::ascii_dna_with_n();
    let text = b"AaACGTAacGtnGTGTGT";

    let index: BidirectionalIndex<i32> = BidirectionalIndex::new(text, dna_alphabet, 1);

    let mut cursor = index.root();

    // grow the query from the right
    cursor.extend_right_symbol(b'G');
    cursor.extend_right_symbol(b'T');
    println!("'GT' occurs {} times", cursor.count());

    // now grow it from the left instead
    cursor.extend_left_symbol(b'A');
    println!("'AGT' occurs {} times", cursor.count());

    for position in cursor.locate() {
        println!("found at position {position}");
    }

    // cycling moves to the next sibling edge in the direction of the last extension
    let mut sibling = cursor;
    if sibling.cycle_front() {
        println!("next sibling to the left: '{}'", String::from_utf8_lossy(&sibling.query()));
    }
}
