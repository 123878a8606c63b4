use std::collections::HashMap;
use std::io;
use std::io::prelude::*;

fn letter_counts(id: &str) -> HashMap<char, usize> {
    let mut counts = HashMap::new();
    for ch in id.chars() {
        *counts.entry(ch).or_insert(0) += 1;
    }
    counts
}

/// Whether any letter occurs exactly twice, and whether any letter
/// occurs exactly three times.  The two answers are independent: a
/// single id can contribute to both tallies.
fn repeat_stats(id: &str) -> (bool, bool) {
    let counts = letter_counts(id);
    let twice = counts.values().any(|&n| n == 2);
    let thrice = counts.values().any(|&n| n == 3);
    (twice, thrice)
}

fn checksum(ids: &[String]) -> usize {
    let mut twos: usize = 0;
    let mut threes: usize = 0;
    for id in ids {
        let (twice, thrice) = repeat_stats(id);
        if twice {
            twos += 1;
        }
        if thrice {
            threes += 1;
        }
    }
    twos * threes
}

/// True when the ids have equal length and disagree in exactly one
/// position.  Gives up early once a second disagreement is seen.
fn differ_by_exactly_one(x: &str, y: &str) -> bool {
    if x.len() != y.len() {
        return false;
    }
    let mut distance = 0;
    for (a, b) in x.chars().zip(y.chars()) {
        if a != b {
            distance += 1;
            if distance > 1 {
                return false;
            }
        }
    }
    distance == 1
}

fn common_letters(x: &str, y: &str) -> String {
    x.chars()
        .zip(y.chars())
        .filter(|(a, b)| a == b)
        .map(|(a, _)| a)
        .collect()
}

fn find_prototype_boxes(ids: &[String]) -> Option<(&str, &str)> {
    for (i, x) in ids.iter().enumerate() {
        for y in ids.iter().skip(i + 1) {
            if differ_by_exactly_one(x, y) {
                return Some((x, y));
            }
        }
    }
    None
}

#[test]
fn test_repeat_stats() {
    assert_eq!(repeat_stats("abcdef"), (false, false));
    assert_eq!(repeat_stats("bababc"), (true, true));
    assert_eq!(repeat_stats("abbcde"), (true, false));
    assert_eq!(repeat_stats("abcccd"), (false, true));
    assert_eq!(repeat_stats("aabcdd"), (true, false));
    assert_eq!(repeat_stats("abcdee"), (true, false));
    assert_eq!(repeat_stats("ababab"), (false, true));
}

#[cfg(test)]
fn owned(ids: &[&str]) -> Vec<String> {
    ids.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_checksum() {
    let ids = owned(&[
        "abcdef", "bababc", "abbcde", "abcccd", "aabcdd", "abcdee", "ababab",
    ]);
    assert_eq!(checksum(&ids), 12);
}

#[test]
fn test_differ_by_exactly_one() {
    assert!(differ_by_exactly_one("fghij", "fguij"));
    assert!(!differ_by_exactly_one("abcde", "axcye"));
    assert!(!differ_by_exactly_one("abcde", "abcde"));
    assert!(!differ_by_exactly_one("abc", "abcd"));
}

#[test]
fn test_find_prototype_boxes() {
    let ids = owned(&[
        "abcde", "fghij", "klmno", "pqrst", "fguij", "axcye", "wvxyz",
    ]);
    assert_eq!(find_prototype_boxes(&ids), Some(("fghij", "fguij")));
    assert_eq!(common_letters("fghij", "fguij"), "fgij");
}

fn part1(ids: &[String]) {
    println!("Day 02 part 1: {}", checksum(ids));
}

fn part2(ids: &[String]) {
    match find_prototype_boxes(ids) {
        Some((x, y)) => {
            println!("Day 02 part 2: {} {} -> {}", x, y, common_letters(x, y));
        }
        None => {
            eprintln!("no pair of box ids differs by exactly one letter");
            std::process::exit(1);
        }
    }
}

fn main() {
    let ids: Vec<String> = io::BufReader::new(io::stdin())
        .lines()
        .map(|s| s.unwrap())
        .filter(|line| !line.is_empty())
        .collect();
    part1(&ids);
    part2(&ids);
}
