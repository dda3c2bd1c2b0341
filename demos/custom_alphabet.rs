use affixdex::Alphabet;

fn main() {
    // This example shows how to build a custom alphabet from a translation table. The alphabet
    // size does *not* need to include a sentinel slot -- the index appends that internally.

    const UNMAPPED: u8 = 255;

    let mut digit_table = [UNMAPPED; 256];
    for (rank, digit) in (b'0'..=b'9').enumerate() {
        digit_table[digit as usize] = rank as u8;
    }

    let digits = Alphabet::from_translation_table(digit_table, 10);
    assert_eq!(digits.sigma(), 10);

    // the identity alphabet is useful for text that is already encoded as small dense integers
    let already_encoded = Alphabet::identity(4);
    assert_eq!(already_encoded.sigma(), 4);
}
