use std::fmt::{self, Display, Formatter};
use std::io;
use std::io::prelude::*;

use ndarray::prelude::*;
use regex::Regex;
use tracing::{event, Level};
use tracing_subscriber::prelude::*;

#[derive(Debug, Clone, PartialEq, Eq)]
struct Claim {
    id: String,
    left: usize,
    top: usize,
    width: usize,
    height: usize,
}

impl Claim {
    /// Exclusive right edge; the claim covers columns `left..right()`.
    fn right(&self) -> usize {
        self.left + self.width
    }

    /// Exclusive bottom edge; the claim covers rows `top..bottom()`.
    fn bottom(&self) -> usize {
        self.top + self.height
    }
}

impl Display for Claim {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} @ {},{}: {}x{}",
            self.id, self.left, self.top, self.width, self.height
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CellState {
    Empty,
    Claimed,
    Overlapped,
}

impl CellState {
    /// The state after one more claim covers this cell.  Overlapped is
    /// absorbing: the cell does not record how many claims piled on.
    fn after_claim(self) -> CellState {
        match self {
            CellState::Empty => CellState::Claimed,
            CellState::Claimed | CellState::Overlapped => CellState::Overlapped,
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Error {
    InvalidDimension { width: usize, height: usize },
    OutOfBounds { id: String, right: usize, bottom: usize },
    NoNonOverlappingClaim,
    BadClaim(String),
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidDimension { width, height } => {
                write!(f, "fabric dimensions {}x{} are invalid", width, height)
            }
            Error::OutOfBounds { id, right, bottom } => {
                write!(
                    f,
                    "claim #{} extends to column {} and row {}, outside the fabric",
                    id, right, bottom
                )
            }
            Error::NoNonOverlappingClaim => {
                f.write_str("expected exactly one claim free of overlap, found none")
            }
            Error::BadClaim(msg) => msg.fmt(f),
        }
    }
}

struct Fabric {
    cells: Array2<CellState>,
}

impl Fabric {
    fn new(width: usize, height: usize) -> Result<Fabric, Error> {
        if width == 0 || height == 0 {
            Err(Error::InvalidDimension { width, height })
        } else {
            Ok(Fabric {
                cells: Array2::from_elem((height, width), CellState::Empty),
            })
        }
    }

    fn width(&self) -> usize {
        self.cells.ncols()
    }

    fn height(&self) -> usize {
        self.cells.nrows()
    }

    /// Advances every cell under the claim's rectangle by one step.
    /// The whole rectangle is checked against the fabric bounds before
    /// any cell is written, so a failed call leaves the fabric as it
    /// was.  The final fabric state does not depend on the order in
    /// which claims are rasterized.
    fn rasterize(&mut self, claim: &Claim) -> Result<(), Error> {
        if claim.right() > self.width() || claim.bottom() > self.height() {
            return Err(Error::OutOfBounds {
                id: claim.id.clone(),
                right: claim.right(),
                bottom: claim.bottom(),
            });
        }
        event!(
            Level::TRACE,
            "rasterize: {} covers rows {}..{}, columns {}..{}",
            claim,
            claim.top,
            claim.bottom(),
            claim.left,
            claim.right(),
        );
        for row in claim.top..claim.bottom() {
            for col in claim.left..claim.right() {
                self.cells[(row, col)] = self.cells[(row, col)].after_claim();
            }
        }
        Ok(())
    }

    fn count_overlapped(&self) -> usize {
        self.cells
            .iter()
            .filter(|&&cell| cell == CellState::Overlapped)
            .count()
    }

    fn claim_touches_overlap(&self, claim: &Claim) -> bool {
        for row in claim.top..claim.bottom() {
            for col in claim.left..claim.right() {
                if self.cells[(row, col)] == CellState::Overlapped {
                    return true;
                }
            }
        }
        false
    }

    /// The id of the first claim (in the order given) none of whose
    /// cells is shared with another claim.  Every claim in `claims`
    /// must already have been rasterized onto this fabric; a cell of a
    /// rasterized claim reads Claimed exactly when that claim is its
    /// only owner, so no per-cell ownership list is needed.
    fn find_non_overlapping_claim<'a>(&self, claims: &'a [Claim]) -> Result<&'a str, Error> {
        claims
            .iter()
            .find(|claim| !self.claim_touches_overlap(claim))
            .map(|claim| claim.id.as_str())
            .ok_or(Error::NoNonOverlappingClaim)
    }
}

impl Display for Fabric {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for row in 0..self.height() {
            for col in 0..self.width() {
                let ch = match self.cells[(row, col)] {
                    CellState::Empty => '.',
                    CellState::Claimed => '#',
                    CellState::Overlapped => 'X',
                };
                write!(f, "{}", ch)?;
            }
            f.write_str("\n")?;
        }
        Ok(())
    }
}

fn parse_claims(lines: &[String]) -> Result<Vec<Claim>, Error> {
    const CLAIM_PATTERN: &str = r"^#(\d+) @ (\d+),(\d+): (\d+)x(\d+)$";
    let claim_re = Regex::new(CLAIM_PATTERN).unwrap();

    let mut claims = Vec::with_capacity(lines.len());
    for line in lines {
        if line.is_empty() {
            continue;
        }
        let cap = match claim_re.captures(line) {
            Some(cap) => cap,
            None => {
                return Err(Error::BadClaim(format!(
                    "claim '{}' has unexpected format",
                    line
                )));
            }
        };
        let number = |i: usize| -> Result<usize, Error> {
            let s = cap.get(i).unwrap().as_str();
            s.parse().map_err(|e| {
                Error::BadClaim(format!("bad number '{}' in claim '{}': {}", s, line, e))
            })
        };
        let width = number(4)?;
        let height = number(5)?;
        if width == 0 || height == 0 {
            return Err(Error::BadClaim(format!("claim '{}' has zero size", line)));
        }
        claims.push(Claim {
            id: cap.get(1).unwrap().as_str().to_string(),
            left: number(2)?,
            top: number(3)?,
            width,
            height,
        });
    }
    Ok(claims)
}

/// The smallest fabric covering every claim.
fn claims_extent(claims: &[Claim]) -> (usize, usize) {
    let width = claims.iter().map(Claim::right).max().unwrap_or(0);
    let height = claims.iter().map(Claim::bottom).max().unwrap_or(0);
    (width, height)
}

#[cfg(test)]
fn claim(id: &str, left: usize, top: usize, width: usize, height: usize) -> Claim {
    Claim {
        id: id.to_string(),
        left,
        top,
        width,
        height,
    }
}

#[cfg(test)]
fn rasterize_all(fabric: &mut Fabric, claims: &[Claim]) {
    for claim in claims {
        fabric.rasterize(claim).expect("claim in bounds");
    }
}

#[cfg(test)]
fn sample_claims() -> Vec<Claim> {
    vec![
        claim("1", 1, 3, 4, 4),
        claim("2", 3, 1, 4, 4),
        claim("3", 5, 5, 2, 2),
    ]
}

#[cfg(test)]
fn state_rank(state: CellState) -> u8 {
    match state {
        CellState::Empty => 0,
        CellState::Claimed => 1,
        CellState::Overlapped => 2,
    }
}

#[test]
fn test_after_claim_is_absorbing() {
    assert_eq!(CellState::Empty.after_claim(), CellState::Claimed);
    assert_eq!(CellState::Claimed.after_claim(), CellState::Overlapped);
    assert_eq!(CellState::Overlapped.after_claim(), CellState::Overlapped);
}

#[test]
fn test_new_rejects_zero_dimensions() {
    assert_eq!(
        Fabric::new(0, 5).err(),
        Some(Error::InvalidDimension { width: 0, height: 5 })
    );
    assert_eq!(
        Fabric::new(5, 0).err(),
        Some(Error::InvalidDimension { width: 5, height: 0 })
    );
    assert!(Fabric::new(1, 1).is_ok());
}

#[test]
fn test_parse_claims() {
    let lines = vec!["#123 @ 3,2: 5x4".to_string(), String::new()];
    let claims = parse_claims(&lines).expect("valid claim line");
    assert_eq!(claims, vec![claim("123", 3, 2, 5, 4)]);
}

#[test]
fn test_parse_claims_rejects_malformed_lines() {
    for line in [
        "123 @ 3,2: 5x4",
        "#123 @ 3,2: 5x",
        "#123 3,2 5x4",
        "#123 @ -3,2: 5x4",
        "#123 @ 3,2: 0x4",
        "#123 @ 3,2: 4x0",
    ] {
        let lines = vec![line.to_string()];
        match parse_claims(&lines) {
            Err(Error::BadClaim(_)) => (),
            other => panic!("claim '{}' gave {:?}", line, other),
        }
    }
}

#[test]
fn test_single_claim_has_no_overlap() {
    let claims = vec![claim("42", 1, 3, 4, 4)];
    let mut fabric = Fabric::new(10, 10).expect("valid dimensions");
    rasterize_all(&mut fabric, &claims);
    assert_eq!(fabric.count_overlapped(), 0);
    assert_eq!(fabric.find_non_overlapping_claim(&claims), Ok("42"));
}

#[test]
fn test_disjoint_claims_tie_break_on_input_order() {
    let claims = vec![claim("1", 0, 0, 2, 2), claim("2", 5, 5, 2, 2)];
    let mut fabric = Fabric::new(10, 10).expect("valid dimensions");
    rasterize_all(&mut fabric, &claims);
    assert_eq!(fabric.count_overlapped(), 0);
    // Both claims qualify; the first in input order wins.
    assert_eq!(fabric.find_non_overlapping_claim(&claims), Ok("1"));
}

#[test]
fn test_overlapping_pair() {
    let claims = vec![claim("1", 1, 1, 4, 4), claim("2", 3, 3, 4, 4)];
    let mut fabric = Fabric::new(10, 10).expect("valid dimensions");
    rasterize_all(&mut fabric, &claims);
    // The claims share the 2x2 square with corners (3,3) and (5,5).
    assert_eq!(fabric.count_overlapped(), 4);
    assert_eq!(
        fabric.find_non_overlapping_claim(&claims),
        Err(Error::NoNonOverlappingClaim)
    );
}

#[test]
fn test_sample_claims() {
    let claims = sample_claims();
    let (width, height) = claims_extent(&claims);
    assert_eq!((width, height), (7, 7));
    let mut fabric = Fabric::new(width, height).expect("valid dimensions");
    rasterize_all(&mut fabric, &claims);
    assert_eq!(fabric.count_overlapped(), 4);
    assert_eq!(fabric.find_non_overlapping_claim(&claims), Ok("3"));
}

#[test]
fn test_rasterization_order_does_not_matter() {
    let claims = sample_claims();
    let mut reference = Fabric::new(8, 8).expect("valid dimensions");
    rasterize_all(&mut reference, &claims);

    for order in [
        [0, 1, 2],
        [0, 2, 1],
        [1, 0, 2],
        [1, 2, 0],
        [2, 0, 1],
        [2, 1, 0],
    ] {
        let mut fabric = Fabric::new(8, 8).expect("valid dimensions");
        for &i in &order {
            fabric.rasterize(&claims[i]).expect("claim in bounds");
        }
        assert_eq!(fabric.cells, reference.cells, "order {:?}", order);
        assert_eq!(fabric.count_overlapped(), reference.count_overlapped());
    }
}

#[test]
fn test_rasterization_never_regresses_a_cell() {
    let claims = sample_claims();
    let mut fabric = Fabric::new(8, 8).expect("valid dimensions");
    for claim in &claims {
        let before = fabric.cells.clone();
        fabric.rasterize(claim).expect("claim in bounds");
        for (old, new) in before.iter().zip(fabric.cells.iter()) {
            assert!(state_rank(*new) >= state_rank(*old));
        }
    }
}

#[test]
fn test_out_of_bounds_claim_leaves_fabric_untouched() {
    let mut fabric = Fabric::new(6, 6).expect("valid dimensions");
    fabric
        .rasterize(&claim("1", 0, 0, 3, 3))
        .expect("claim in bounds");
    let before = fabric.cells.clone();

    let result = fabric.rasterize(&claim("2", 4, 4, 3, 3));
    assert_eq!(
        result,
        Err(Error::OutOfBounds {
            id: "2".to_string(),
            right: 7,
            bottom: 7,
        })
    );
    assert_eq!(fabric.cells, before);
}

#[test]
fn test_display() {
    let mut fabric = Fabric::new(3, 2).expect("valid dimensions");
    rasterize_all(
        &mut fabric,
        &[claim("1", 0, 0, 2, 1), claim("2", 1, 0, 2, 1)],
    );
    assert_eq!(fabric.to_string(), "#X#\n...\n");
}

fn run() -> Result<(), Error> {
    let lines: Vec<String> = io::BufReader::new(io::stdin())
        .lines()
        .map(|line| line.unwrap())
        .collect();
    let claims = parse_claims(&lines)?;

    let (width, height) = claims_extent(&claims);
    event!(
        Level::DEBUG,
        "fabric is {}x{} for {} claims",
        width,
        height,
        claims.len(),
    );
    let mut fabric = Fabric::new(width, height)?;
    for claim in &claims {
        fabric.rasterize(claim)?;
    }
    if width <= 80 {
        event!(Level::TRACE, "fabric:\n{}", fabric);
    }

    println!("Day 03 part 1: {}", fabric.count_overlapped());
    println!("Day 03 part 2: #{}", fabric.find_non_overlapping_claim(&claims)?);
    Ok(())
}

fn main() {
    let fmt_layer = tracing_subscriber::fmt::layer().with_target(true);
    let filter_layer = match tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new("info"))
    {
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
        Ok(layer) => layer,
    };
    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();

    if let Err(e) = run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
