//! Brute-forces the coin equation from the game the machine runs:
//! `a + b * c^2 + d^3 - e == 399` over a permutation of the five coins.

use itertools::Itertools;

const COINS: [u32; 5] = [2, 3, 5, 7, 9];

fn main() {
    for perm in COINS.iter().copied().permutations(COINS.len()) {
        if let [a, b, c, d, e] = perm[..] {
            if a + b * c.pow(2) + d.pow(3) - e == 399 {
                println!("Found! Combination is {}", perm.iter().join(", "));
            }
        }
    }
}
