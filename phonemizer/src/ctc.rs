//! Greedy CTC decoding of the fallback model's per-position logits.

use crate::g2p;

/// Per-position argmax. The first maximum wins; an empty row yields 0.
pub fn greedy_ids(logits: &[Vec<f32>]) -> Vec<usize> {
    logits
        .iter()
        .map(|row| {
            let mut best = 0;
            for (i, &v) in row.iter().enumerate().skip(1) {
                if v > row[best] {
                    best = i;
                }
            }
            best
        })
        .collect()
}

/// Collapses repeats, then drops blanks, stopping at `end`.
///
/// Repeats are removed before blanks, so `a _ a` keeps both `a`s while
/// `a a` keeps one.
pub fn collapse(ids: &[usize], blank: usize, end: usize) -> Vec<usize> {
    let mut out = Vec::new();
    let mut prev = None;
    for &id in ids {
        if prev == Some(id) {
            continue;
        }
        prev = Some(id);
        if id == blank {
            continue;
        }
        if id == end {
            break;
        }
        out.push(id);
    }
    out
}

/// Collapses `ids` and maps them through the phoneme symbol table.
///
/// Ids without a symbol and special symbols (`<...>`) are skipped.
pub fn decode(ids: &[usize]) -> String {
    collapse(ids, g2p::BLANK_ID, g2p::END_ID)
        .into_iter()
        .filter_map(g2p::phoneme_symbol)
        .filter(|sym| !sym.starts_with('<'))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapse_reference_sequence() {
        assert_eq!(collapse(&[0, 0, 5, 5, 6, 0, 2, 9], 0, 2), vec![5, 6]);
        assert_eq!(decode(&[0, 0, 5, 5, 6, 0, 2, 9]), "de");
    }

    #[test]
    fn test_blank_separates_repeats() {
        assert_eq!(collapse(&[3, 0, 3, 3], 0, 2), vec![3, 3]);
        assert_eq!(collapse(&[3, 3, 3], 0, 2), vec![3]);
    }

    #[test]
    fn test_collapse_edges() {
        assert!(collapse(&[], 0, 2).is_empty());
        assert!(collapse(&[2, 5, 6], 0, 2).is_empty());
        assert!(collapse(&[0, 0, 0], 0, 2).is_empty());
    }

    #[test]
    fn test_decode_skips_specials_and_unknown() {
        // 1 is <en_us>, 99 has no symbol.
        assert_eq!(decode(&[1, 9, 99, 36, 13, 51, 16, 46]), "həlˈoʊ");
    }

    #[test]
    fn test_greedy_ids() {
        let logits = vec![
            vec![0.1, 0.9, 0.0],
            vec![0.5, 0.5, 0.2],
            vec![-1.0, -2.0, -0.5],
            vec![],
        ];
        assert_eq!(greedy_ids(&logits), vec![1, 0, 2, 0]);
    }
}
