/// Returns `candidate`, or `candidate` with the smallest numeric suffix from 2
/// up, so that it differs from every name in `taken` ignoring ASCII case.
pub fn uniquify<S: AsRef<str>>(candidate: &str, taken: &[S]) -> String {
    let is_taken = |name: &str| taken.iter().any(|t| t.as_ref().eq_ignore_ascii_case(name));

    if !is_taken(candidate) {
        return candidate.to_string();
    }

    (2u32..)
        .map(|n| format!("{candidate}{n}"))
        .find(|name| !is_taken(name))
        .unwrap_or_else(|| candidate.to_string())
}
