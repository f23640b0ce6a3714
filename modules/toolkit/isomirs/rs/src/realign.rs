use mirbit_core_rs::Error;

use crate::isomir::Substitution;

// Number of 3' bases inspected for a non-templated addition
const WINDOW: usize = 3;

// Mismatch patterns (left-to-right, true = mismatch) of the 3' window that indicate a tail
const TAIL_PATTERNS: [[bool; WINDOW]; 6] = [
    [true, true, false],
    [true, false, true],
    [false, true, false],
    [false, true, true],
    [false, false, true],
    [true, true, true],
];

/// Realign a read placed at the 0-based `start` of the precursor.
///
/// Returns the substitutions (sorted by position) and the non-templated 3' tail. Mismatches
/// outside of the last 3 bases are always substitutions. Mismatches inside the window form
/// a tail when their pattern matches one of the known addition patterns, otherwise they are
/// reported as substitutions too.
///
/// Both sequences are expected to be normalized nucleotides (see [mirbit_core_rs::seq]).
/// Other bytes are compared as is and never split a character of the tail.
pub fn realign(
    sequence: impl AsRef<[u8]>,
    precursor: impl AsRef<[u8]>,
    start: usize,
) -> Result<(Vec<Substitution>, String), Error> {
    let (read, reference) = (sequence.as_ref(), precursor.as_ref());
    let length = read.len();

    let reference = start
        .checked_add(length)
        .and_then(|end| reference.get(start..end))
        .ok_or(Error::OutOfRange {
            start,
            length,
            precursor_length: reference.len(),
        })?;

    let mismatches = read.iter().zip(reference).map(|(r, p)| r != p);

    let mut substitutions = Vec::new();
    let mut pattern = [false; WINDOW];
    // Reads shorter than the window are padded with leading matches
    let offset = length.saturating_sub(WINDOW);
    let shift = WINDOW.saturating_sub(length);
    for (ind, mismatch) in mismatches.enumerate() {
        if ind < offset {
            if mismatch {
                substitutions.push(Substitution::new(ind, read[ind] as char));
            }
        } else {
            pattern[ind - offset + shift] = mismatch;
        }
    }

    let window = offset..length;
    let first = window.clone().find(|ind| pattern[ind - offset + shift]);

    let mut tail = String::new();
    match first {
        Some(first) if TAIL_PATTERNS.contains(&pattern) => {
            tail.push_str(&String::from_utf8_lossy(&read[first..]));
        }
        _ => {
            for ind in window {
                if pattern[ind - offset + shift] {
                    substitutions.push(Substitution::new(ind, read[ind] as char));
                }
            }
        }
    }

    Ok((substitutions, tail))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subs(items: &[(usize, char)]) -> Vec<Substitution> {
        items
            .iter()
            .map(|(pos, base)| Substitution::new(*pos, *base))
            .collect()
    }

    #[test]
    fn test_exact_match() -> eyre::Result<()> {
        let (substitutions, tail) = realign("TTTTCCCC", "AAAATTTTCCCCGGGG", 4)?;
        assert!(substitutions.is_empty());
        assert!(tail.is_empty());
        Ok(())
    }

    #[test]
    fn test_tail_patterns() -> eyre::Result<()> {
        let precursor = "AAAATTTTCCCCGGGGNNNNNNNNNNNN";
        // Reference at 4.. is TTTTCCCCGGGG, the window covers the last GGG
        for (read, expected) in [
            ("TTTTCCCCGAAA", "AAA"), // 111
            ("TTTTCCCCGGGA", "A"),   // 001
            ("TTTTCCCCGGAA", "AA"),  // 011
            ("TTTTCCCCGGAG", "AG"),  // 010, includes the matching last base
            ("TTTTCCCCGAAG", "AAG"), // 110
            ("TTTTCCCCGAGA", "AGA"), // 101, includes the internal match
        ] {
            let (substitutions, tail) = realign(read, precursor, 4)?;
            assert!(substitutions.is_empty(), "{read}: {substitutions:?}");
            assert_eq!(tail, expected, "{read}");
        }
        Ok(())
    }

    #[test]
    fn test_window_without_tail() -> eyre::Result<()> {
        // 100 is never a tail
        let (substitutions, tail) = realign("TTTTCCCCGAGG", "AAAATTTTCCCCGGGG", 4)?;
        assert_eq!(substitutions, subs(&[(9, 'A')]));
        assert!(tail.is_empty());
        Ok(())
    }

    #[test]
    fn test_substitutions_outside_window() -> eyre::Result<()> {
        let (substitutions, tail) = realign("TATTCCGCGGAA", "AAAATTTTCCCCGGGG", 4)?;
        assert_eq!(substitutions, subs(&[(1, 'A'), (6, 'G')]));
        assert_eq!(tail, "AA");
        Ok(())
    }

    #[test]
    fn test_short_reads() -> eyre::Result<()> {
        // Missing leading positions are matches: "01" -> 001 -> tail
        let (substitutions, tail) = realign("TA", "AAAATTTT", 4)?;
        assert!(substitutions.is_empty());
        assert_eq!(tail, "A");

        // "1" -> 001 -> tail
        let (_, tail) = realign("C", "AAAATTTT", 0)?;
        assert_eq!(tail, "C");
        Ok(())
    }

    #[test]
    fn test_multibyte_window() -> eyre::Result<()> {
        // 'Ä' takes two bytes, the tail starts inside it
        let (substitutions, tail) = realign("TTÄ", "AAAATTTT", 4)?;
        assert!(substitutions.is_empty());
        assert!(!tail.is_empty());

        let (substitutions, _) = realign("ÄTTTT", "AATTTTTT", 0)?;
        assert_eq!(substitutions.len(), 2);
        Ok(())
    }

    #[test]
    fn test_out_of_range() {
        for start in [13, 20, usize::MAX] {
            let err = realign("TTTT", "AAAATTTTCCCCGGGG", start).unwrap_err();
            assert!(matches!(
                err,
                Error::OutOfRange {
                    length: 4,
                    precursor_length: 16,
                    ..
                }
            ));
        }
        assert!(realign("GGGG", "AAAATTTTCCCCGGGG", 12).is_ok());
    }
}
