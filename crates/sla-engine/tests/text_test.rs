use sla_engine::text::{clean_summary, strip_markup, truncate_summary};

#[test]
fn markup_tags_are_removed() {
    assert_eq!(strip_markup("<p>Hello <b>world</b></p>"), "Hello world");
    assert_eq!(
        strip_markup("<p><strong>Summary of impact:</strong>\n Between 09:00 and 11:00</p>"),
        "Summary of impact: Between 09:00 and 11:00"
    );
}

#[test]
fn tags_spanning_lines_are_removed() {
    assert_eq!(strip_markup("before<a\nhref=\"x\">link</a>after"), "before link after");
}

#[test]
fn common_entities_are_decoded() {
    assert_eq!(strip_markup("A&nbsp;&amp;&nbsp;B"), "A & B");
    assert_eq!(strip_markup("&lt;none&gt; &quot;quoted&quot; it&#39;s"), "<none> \"quoted\" it's");
}

#[test]
fn escaped_entities_decode_once() {
    assert_eq!(strip_markup("&amp;lt;"), "&lt;");
}

#[test]
fn plain_text_is_unchanged() {
    assert_eq!(strip_markup("No markup here."), "No markup here.");
    assert_eq!(strip_markup(""), "");
}

#[test]
fn short_text_is_not_truncated() {
    let text = "x".repeat(500);
    assert_eq!(truncate_summary(&text, 500), text);
}

#[test]
fn long_text_is_cut_with_marker() {
    let text = "x".repeat(501);
    let cut = truncate_summary(&text, 500);
    assert_eq!(cut.len(), 503);
    assert!(cut.ends_with("..."));
    assert!(cut.starts_with(&"x".repeat(500)));
}

#[test]
fn truncation_counts_characters_not_bytes() {
    let text = "é".repeat(10);
    assert_eq!(truncate_summary(&text, 4), "éééé...");
}

#[test]
fn clean_summary_strips_before_truncating() {
    let raw = format!("<div>{}</div>", "y".repeat(498));
    // Tags do not count toward the limit.
    assert_eq!(clean_summary(&raw, 500), "y".repeat(498));
}
