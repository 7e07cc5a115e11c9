// vim: set ai et ts=4 sw=4 sts=4:
use log::{debug, warn};
use super::Line;
use super::super::grid::Cell::{Unknown, FilledIn, CrossedOut};

impl Line {
    /// Best information currently derivable for this line: the consensus of
    /// every arrangement of the clue that agrees with the squares already
    /// known. A settled line comes back unchanged; so does a line admitting
    /// no arrangement at all (a contradiction introduced upstream), which is
    /// logged rather than surfaced.
    pub fn solve(&self, clue: &[usize]) -> Line {
        if self.is_settled() {
            return self.clone();
        }

        let mut candidates = self.arrangements(clue);

        // an arrangement can satisfy every constraint it touched and still be
        // impossible as a whole line, when a pre-filled square ends up covered
        // by no run at all; weed those out by demanding compatibility with at
        // least one arrangement of the clue over an empty line. only lines
        // holding pre-filled squares can strand one.
        if self.cells.iter().any(|&c| c == FilledIn) {
            let patterns = Line::unknown(self.axis, self.index, self.len()).arrangements(clue);
            candidates.retain(|cand| patterns.iter().any(|p| cand.compatible(p)));
        }

        if candidates.is_empty() {
            warn!("no feasible arrangement of clue {:?} in {} {}; leaving the line untouched",
                  clue, self.axis, self.index);
            return self.clone();
        }
        debug!("{} {}: {} arrangements remain for clue {:?}",
               self.axis, self.index, candidates.len(), clue);
        consensus(&candidates)
    }

    /// Every filling of this line consistent with the clue and with the
    /// squares already known. Each result is a complete assignment: squares
    /// not covered by any run are crossed out.
    pub fn arrangements(&self, clue: &[usize]) -> Vec<Line> {
        debug_assert!(!clue.is_empty(), "clue must hold at least one run");
        let mut result = Vec::new();
        self.place_remaining(clue, 0, 0, &mut result);
        result
    }

    fn place_remaining(&self, clue: &[usize], k: usize, start: usize, out: &mut Vec<Line>) {
        // minimum span still needed by clue[k..]: the runs themselves plus a
        // separating square between each adjacent pair
        let remaining_min: usize = clue[k..].iter().sum::<usize>() + (clue.len() - k - 1);
        let mut s = start;
        while s + remaining_min <= self.len() {
            if let Some(placed) = self.place_run(s, clue[k]) {
                if k + 1 < clue.len() {
                    placed.place_remaining(clue, k + 1, s + clue[k] + 1, out);
                } else {
                    out.push(placed.padded());
                }
            }
            s += 1;
        }
    }

    /// Attempt to place a single run of the given length at `start`. Fails if
    /// the run would fall off the end, cover a crossed-out square, or touch a
    /// filled square directly in front of it; on success the square directly
    /// behind the run is crossed out as the separator, failing if that square
    /// was already filled.
    pub fn place_run(&self, start: usize, length: usize) -> Option<Line> {
        if start + length > self.len() {
            return None;
        }
        if start > 0 && self.get(start - 1) == FilledIn {
            return None;
        }
        let mut placed = self.clone();
        for at in start..start + length {
            if placed.get(at) == CrossedOut {
                return None;
            }
            placed.set(at, FilledIn);
        }
        if start + length < placed.len() {
            if placed.get(start + length) == FilledIn {
                return None;
            }
            placed.set(start + length, CrossedOut);
        }
        Some(placed)
    }

    // a leaf arrangement is a complete assignment: every square no run
    // covered is crossed out
    fn padded(&self) -> Line {
        let cells = self.cells.iter()
                              .map(|&c| if c == Unknown { CrossedOut } else { c })
                              .collect();
        Line::new(self.axis, self.index, cells)
    }

    // whether two lines could describe the same solution; only a hard
    // FilledIn vs CrossedOut clash at the same position rules that out
    fn compatible(&self, other: &Line) -> bool {
        self.cells.iter()
                  .zip(other.cells.iter())
                  .all(|pair| match pair {
                      (FilledIn, CrossedOut) | (CrossedOut, FilledIn) => false,
                      _ => true,
                  })
    }
}

/// Intersect a set of candidate fillings into the squares they all force.
/// FilledIn only agrees with FilledIn; CrossedOut and Unknown both mean "not
/// forced full" and agree with each other. Positions the candidates disagree
/// on stay Unknown.
pub fn consensus(candidates: &[Line]) -> Line {
    assert!(!candidates.is_empty(), "consensus of zero candidates");
    let mut result = candidates[0].clone();
    for at in 0..result.len() {
        let first = candidates[0].get(at);
        let agreed = candidates[1..].iter().all(|cand| match (first, cand.get(at)) {
            (FilledIn, FilledIn) => true,
            (FilledIn, _) | (_, FilledIn) => false,
            _ => true,
        });
        result.set(at, match (agreed, first) {
            (true, FilledIn) => FilledIn,
            (true, _)        => CrossedOut,
            (false, _)       => Unknown,
        });
    }
    result
}

#[cfg(test)]
mod tests {
    use crate::line::{consensus, Line};

    fn arrangement_strings(line: &str, clue: &[usize]) -> Vec<String> {
        Line::parse(line).arrangements(clue)
                         .iter()
                         .map(|a| a.to_string())
                         .collect()
    }

    #[test]
    fn place_run_fills_the_span() {
        let placed = Line::parse("...").place_run(1, 2).unwrap();
        assert_eq!(placed.to_string(), ".++");
    }

    #[test]
    fn place_run_crosses_out_the_separator() {
        let placed = Line::parse("....").place_run(0, 2).unwrap();
        assert_eq!(placed.to_string(), "++-.");
    }

    #[test]
    fn place_run_rejects_covered_crossed_out_square() {
        assert!(Line::parse(".-.").place_run(0, 2).is_none());
    }

    #[test]
    fn place_run_rejects_filled_square_in_front() {
        assert!(Line::parse("+...").place_run(1, 2).is_none());
    }

    #[test]
    fn place_run_rejects_filled_separator() {
        assert!(Line::parse("..+.").place_run(0, 2).is_none());
    }

    #[test]
    fn place_run_rejects_overflow() {
        assert!(Line::parse("...").place_run(2, 2).is_none());
    }

    #[test]
    fn arrangements_of_a_single_run() {
        assert_eq!(arrangement_strings("...", &[2]), vec!["++-", "-++"]);
    }

    #[test]
    fn arrangements_with_no_slack() {
        assert_eq!(arrangement_strings("...", &[3]), vec!["+++"]);
    }

    #[test]
    fn arrangements_count_matches_slack_distribution() {
        // runs 2,2,1 in 9 squares leave 2 spare; spread over 3 movable gaps
        // that makes C(5,3) = 10 arrangements
        assert_eq!(arrangement_strings(".........", &[2, 2, 1]).len(), 10);
    }

    #[test]
    fn arrangements_respect_known_squares() {
        assert_eq!(arrangement_strings("-...", &[2]), vec!["-++-", "--++"]);
    }

    #[test]
    fn consensus_keeps_only_the_overlap() {
        let candidates = vec![Line::parse("++-"), Line::parse("-++")];
        assert_eq!(consensus(&candidates).to_string(), ".+.");
    }

    #[test]
    fn consensus_treats_crossed_out_and_unknown_alike() {
        let candidates = vec![Line::parse("-+."), Line::parse(".+-")];
        assert_eq!(consensus(&candidates).to_string(), "-+-");
    }

    #[test]
    fn solve_fills_an_exact_fit() {
        assert_eq!(Line::parse("...").solve(&[3]).to_string(), "+++");
    }

    #[test]
    fn solve_forces_the_overlap_only() {
        assert_eq!(Line::parse("...").solve(&[2]).to_string(), ".+.");
    }

    #[test]
    fn solve_discards_arrangements_that_strand_a_filled_square() {
        // placing the single run at the far end would leave the pre-filled
        // first square covered by nothing; the look-ahead rejects it
        assert_eq!(Line::parse("+..").solve(&[1]).to_string(), "+--");
    }

    #[test]
    fn solve_returns_settled_line_unchanged() {
        assert_eq!(Line::parse("+-+").solve(&[1, 1]).to_string(), "+-+");
    }

    #[test]
    fn solve_absorbs_a_contradicted_line() {
        // both squares filled but the clue allows a single run of one:
        // no arrangement exists, and the line is returned as it came in
        assert_eq!(Line::parse("+.+").solve(&[1]).to_string(), "+.+");
    }

    #[test]
    fn solve_is_deterministic() {
        let line = Line::parse("-...");
        assert_eq!(line.solve(&[2]), line.solve(&[2]));
    }
}
