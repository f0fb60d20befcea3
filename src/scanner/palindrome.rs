/// Shortest sequence the predicate accepts.
/// Sequences of one or two letters are palindromic too often to be worth reporting.
pub const MIN_PALINDROME_LEN: usize = 3;

/// True when `sequence` reads the same in both directions and has at least
/// [`MIN_PALINDROME_LEN`] code points.
pub fn is_palindrome(sequence: &str) -> bool {
    let mut chars = sequence.chars();
    let mut compared = 0;

    // compare from both ends until the iterators meet
    loop {
        match (chars.next(), chars.next_back()) {
            (Some(front), Some(back)) => {
                if front != back {
                    return false;
                }
                compared += 2;
            }
            (Some(_), None) => {
                compared += 1;
                break;
            }
            _ => break,
        }
    }

    compared >= MIN_PALINDROME_LEN
}
