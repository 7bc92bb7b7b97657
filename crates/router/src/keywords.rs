use tooling::ToolKind;

/// Substring → tool table consulted when the model's routing answer is unusable.
/// Order matters: the first keyword found in the query wins.
pub const KEYWORD_ROUTES: &[(&str, ToolKind)] = &[
    ("weather", ToolKind::Weather),
    ("calculate", ToolKind::Calculator),
    ("news", ToolKind::News),
];

/// Tools whose keyword appears in `query`, in table order. Case-insensitive.
pub fn keyword_matches(query: &str) -> impl Iterator<Item = ToolKind> {
    let lowered = query.to_lowercase();
    KEYWORD_ROUTES
        .iter()
        .filter(move |(keyword, _)| lowered.contains(*keyword))
        .map(|&(_, kind)| kind)
}
