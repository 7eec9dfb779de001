use ammonia;

/// Clean HTML content using the ammonia library.
///
/// This employs a whitelist-based sanitization strategy: it preserves safe tags
/// (like <b>, <p>) while stripping dangerous tags (like <script>, <iframe>)
/// and malicious attributes (like onclick).
///
/// Applied to quiz titles, descriptions and question prompts before they are
/// stored, since admin panels render them. Options and answer keys are stored
/// as given — rewriting them would desync grading comparisons.
pub fn clean_html(input: &str) -> String {
    ammonia::clean(input)
}
