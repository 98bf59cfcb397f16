use std::cmp::Ordering;

/// Numeric-aware string ordering: `page2` < `page10`, `chapter_2024-02` <
/// `chapter_2024-10`. Digit runs compare by value, everything else compares
/// case-insensitively. Falls back to a byte comparison so the order is total.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut left = a;
    let mut right = b;
    let mut tiebreak = Ordering::Equal;

    loop {
        match (left.chars().next(), right.chars().next()) {
            (None, None) => break,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) if x.is_ascii_digit() && y.is_ascii_digit() => {
                let (run_a, rest_a) = split_digits(left);
                let (run_b, rest_b) = split_digits(right);
                match cmp_digit_runs(run_a, run_b) {
                    Ordering::Equal => {}
                    other => return other,
                }
                if tiebreak == Ordering::Equal {
                    // Same value: more leading zeros sorts first.
                    tiebreak = run_b.len().cmp(&run_a.len());
                }
                left = rest_a;
                right = rest_b;
            }
            (Some(ca), Some(cb)) => {
                match fold(ca).cmp(&fold(cb)) {
                    Ordering::Equal => {}
                    other => return other,
                }
                left = &left[ca.len_utf8()..];
                right = &right[cb.len_utf8()..];
            }
        }
    }

    tiebreak.then_with(|| a.cmp(b))
}

fn split_digits(text: &str) -> (&str, &str) {
    let end = text
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(text.len());
    text.split_at(end)
}

fn cmp_digit_runs(a: &str, b: &str) -> Ordering {
    let a = trim_zeros(a);
    let b = trim_zeros(b);
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

fn trim_zeros(run: &str) -> &str {
    run.trim_start_matches('0')
}

fn fold(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}
