use std::collections::HashSet;
use std::io;
use std::io::prelude::*;

fn resulting_frequency(changes: &[i64]) -> i64 {
    changes.iter().sum()
}

/// Cycles through the change list until a running-sum value comes up
/// for the second time.  The starting frequency 0 counts as seen.  The
/// puzzle input guarantees a repeat, so the cycle terminates.
fn first_repeated_frequency(changes: &[i64]) -> i64 {
    let mut seen: HashSet<i64> = HashSet::new();
    let mut sum: i64 = 0;
    seen.insert(sum);
    for change in changes.iter().cycle() {
        sum += change;
        if !seen.insert(sum) {
            return sum;
        }
    }
    unreachable!("empty change list")
}

#[test]
fn test_resulting_frequency() {
    assert_eq!(resulting_frequency(&[1, -2, 3, 1]), 3);
    assert_eq!(resulting_frequency(&[1, 1, 1]), 3);
    assert_eq!(resulting_frequency(&[-1, -2, -3]), -6);
}

#[test]
fn test_first_repeated_frequency() {
    assert_eq!(first_repeated_frequency(&[1, -2, 3, 1]), 2);
    assert_eq!(first_repeated_frequency(&[1, -1]), 0);
    assert_eq!(first_repeated_frequency(&[3, 3, 4, -2, -4]), 10);
    assert_eq!(first_repeated_frequency(&[-6, 3, 8, 5, -6]), 5);
    assert_eq!(first_repeated_frequency(&[7, 7, -2, -7, -4]), 14);
}

fn main() {
    let changes: Vec<i64> = io::BufReader::new(io::stdin())
        .lines()
        .map(|s| s.unwrap())
        .filter(|line| !line.is_empty())
        .map(|line| line.parse::<i64>().expect("valid input"))
        .collect();
    println!("Day 01 part 1: {}", resulting_frequency(&changes));
    println!("Day 01 part 2: {}", first_repeated_frequency(&changes));
}
