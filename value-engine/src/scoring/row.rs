/// §4.4(c) row token parser. Numeric rows parse directly; single letters are
/// `A..Z -> 1..26`; double letters extend the alphabet (`AA` follows `Z`);
/// general-admission tokens collapse to front-row rank 1; anything else is
/// unknown (`-1`), and the caller substitutes the middle row.
pub fn parse_row(row: &str) -> i64 {
    let trimmed = row.trim();
    if trimmed.is_empty() {
        return -1;
    }

    if let Ok(n) = trimmed.parse::<i64>() {
        return n;
    }

    let upper = trimmed.to_uppercase();
    if upper == "GA" || upper == "GENERAL ADMISSION" || upper == "PIT" {
        return 1;
    }

    let letters: Vec<char> = upper.chars().collect();
    if letters.len() == 1 && letters[0].is_ascii_alphabetic() {
        return (letters[0] as i64) - ('A' as i64) + 1;
    }

    if letters.len() == 2 && letters.iter().all(|c| c.is_ascii_alphabetic()) {
        let first = (letters[0] as i64) - ('A' as i64);
        let second = (letters[1] as i64) - ('A' as i64) + 1;
        return 27 + 26 * first + second;
    }

    -1
}

/// Resolves a row token to a rank, substituting the middle row of the
/// section when the token is unrecognized (§4.4c).
pub fn resolve_row_rank(row: &str, total_rows: i64) -> i64 {
    let rank = parse_row(row);
    if rank >= 0 {
        rank
    } else if total_rows > 0 {
        (total_rows as f64 / 2.0).ceil() as i64
    } else {
        -1
    }
}

/// §4.4(c). Front row (`rowRank == 1`) always scores exactly 100 regardless
/// of `totalRows` (§8 boundary behavior).
pub fn row_score(row_rank: i64, total_rows: i64) -> f64 {
    if total_rows <= 0 || row_rank <= 0 {
        return 50.0;
    }
    let row_rank = row_rank.min(total_rows);
    if row_rank == 1 {
        return 100.0;
    }
    let pos = (row_rank - 1) as f64 / (total_rows - 1) as f64;
    (100.0 - pos.sqrt() * 80.0).round().max(20.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_row_parses_directly() {
        assert_eq!(parse_row("14"), 14);
    }

    #[test]
    fn single_letter_maps_to_alphabet_position() {
        assert_eq!(parse_row("A"), 1);
        assert_eq!(parse_row("z"), 26);
    }

    #[test]
    fn double_letter_continues_past_z() {
        assert_eq!(parse_row("AA"), 27 + 26 * 0 + 1);
        assert_eq!(parse_row("AB"), 27 + 26 * 0 + 2);
        assert_eq!(parse_row("BA"), 27 + 26 * 1 + 1);
    }

    #[test]
    fn general_admission_tokens_map_to_front_row() {
        assert_eq!(parse_row("GA"), 1);
        assert_eq!(parse_row("General Admission"), 1);
        assert_eq!(parse_row("pit"), 1);
    }

    #[test]
    fn unrecognized_token_is_unknown() {
        assert_eq!(parse_row("???"), -1);
        assert_eq!(parse_row(""), -1);
    }

    #[test]
    fn row_rank_one_always_scores_hundred() {
        assert_eq!(row_score(1, 5), 100.0);
        assert_eq!(row_score(1, 500), 100.0);
    }

    #[test]
    fn degenerate_inputs_return_neutral_score() {
        assert_eq!(row_score(0, 10), 50.0);
        assert_eq!(row_score(5, 0), 50.0);
    }

    #[test]
    fn back_row_scores_floor_at_twenty() {
        assert_eq!(row_score(20, 20), 20.0);
    }

    #[test]
    fn rank_beyond_total_rows_is_clamped() {
        assert_eq!(row_score(50, 20), row_score(20, 20));
    }

    #[test]
    fn unrecognized_token_substitutes_middle_row() {
        assert_eq!(resolve_row_rank("???", 21), 11);
    }

    #[test]
    fn recognized_token_ignores_total_rows() {
        assert_eq!(resolve_row_rank("C", 21), 3);
    }
}
