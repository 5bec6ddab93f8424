//! Typographic substitution (SmartyPants)
//!
//! Turns straight quotes into curly quotes, `--` into an em-dash and `...`
//! into an ellipsis. Works on already-rendered HTML: tag markup is copied
//! verbatim and the contents of `pre`, `code`, `kbd`, `script`, `style` and
//! `math` are left alone.

const SKIP_ELEMENTS: &[&str] = &["pre", "code", "kbd", "script", "style", "math"];

const OPEN_DOUBLE: &str = "&#8220;";
const CLOSE_DOUBLE: &str = "&#8221;";
const OPEN_SINGLE: &str = "&#8216;";
const CLOSE_SINGLE: &str = "&#8217;";
const EM_DASH: &str = "&#8212;";
const ELLIPSIS: &str = "&#8230;";

/// Apply typographic substitutions to an HTML fragment
pub fn smartypants(html: &str) -> String {
    let mut out = String::with_capacity(html.len() + html.len() / 8);
    let mut skipping: Vec<String> = Vec::new();
    // Last character of the previous text run, for quote direction across tags
    let mut prev: Option<char> = None;
    let mut rest = html;

    while !rest.is_empty() {
        if rest.starts_with("<!--") {
            let end = rest.find("-->").map(|i| i + 3).unwrap_or(rest.len());
            out.push_str(&rest[..end]);
            rest = &rest[end..];
            continue;
        }

        if rest.starts_with('<') {
            if let Some(end) = rest.find('>') {
                let tag = &rest[..=end];
                track_skipped(tag, &mut skipping);
                out.push_str(tag);
                rest = &rest[end + 1..];
                continue;
            }
        }

        let first = rest.chars().next().map_or(1, char::len_utf8);
        let end = rest[first..].find('<').map_or(rest.len(), |i| i + first);
        let text = &rest[..end];
        if skipping.is_empty() {
            educate(text, &mut prev, &mut out);
        } else {
            out.push_str(text);
            prev = text.chars().last().or(prev);
        }
        rest = &rest[end..];
    }

    out
}

/// Maintain the stack of open elements whose text must not be touched
fn track_skipped(tag: &str, skipping: &mut Vec<String>) {
    let inner = tag.trim_start_matches('<');
    let (closing, inner) = match inner.strip_prefix('/') {
        Some(inner) => (true, inner),
        None => (false, inner),
    };
    let name: String = inner
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_ascii_lowercase();

    if !SKIP_ELEMENTS.contains(&name.as_str()) {
        return;
    }
    if closing {
        if let Some(pos) = skipping.iter().rposition(|t| *t == name) {
            skipping.truncate(pos);
        }
    } else if !tag.ends_with("/>") {
        skipping.push(name);
    }
}

/// Educate one run of text, appending to `out`.
///
/// `carried` is the last character of the previous run. It only decides the
/// direction of a run made of a single quote, as in `"<em>word</em>"`.
fn educate(text: &str, carried: &mut Option<char>, out: &mut String) {
    let chars: Vec<char> = text.chars().collect();
    let lone_quote = matches!(text, "\"" | "'" | "&quot;" | "&#39;" | "&#x27;");
    let mut prev: Option<char> = None;
    let mut i = 0;

    while i < chars.len() {
        let rest = &chars[i..];
        let c = chars[i];

        // Escaped quotes produced by the markup formatters count as quotes
        let (quote, width) = if starts_with(rest, "&quot;") {
            (Some('"'), 6)
        } else if starts_with(rest, "&#39;") {
            (Some('\''), 5)
        } else if starts_with(rest, "&#x27;") {
            (Some('\''), 6)
        } else if c == '"' || c == '\'' {
            (Some(c), 1)
        } else {
            (None, 1)
        };
        let next = chars.get(i + width).copied();
        let after_next = chars.get(i + width + 1).copied();

        match quote {
            Some('\'') if next == Some('\'') => {
                out.push_str(CLOSE_DOUBLE);
                prev = Some('"');
                i += width + 1;
                continue;
            }
            Some(q) => {
                let single = q == '\'';
                let opening = if lone_quote {
                    !carried.is_some_and(|p| !p.is_whitespace())
                } else if single && is_decade(&chars[i + width..]) {
                    false
                } else {
                    quote_opens(single, prev, next, after_next)
                };
                out.push_str(match (single, opening) {
                    (false, true) => OPEN_DOUBLE,
                    (false, false) => CLOSE_DOUBLE,
                    (true, true) => OPEN_SINGLE,
                    (true, false) => CLOSE_SINGLE,
                });
            }
            None if starts_with(rest, "...") => {
                out.push_str(ELLIPSIS);
                prev = Some('.');
                i += 3;
                continue;
            }
            None if starts_with(rest, ". . .") => {
                out.push_str(ELLIPSIS);
                prev = Some('.');
                i += 5;
                continue;
            }
            None if starts_with(rest, "--") => {
                out.push_str(EM_DASH);
                prev = Some('\u{2014}');
                i += 2;
                continue;
            }
            None if starts_with(rest, "``") => {
                out.push_str(OPEN_DOUBLE);
                prev = Some('"');
                i += 2;
                continue;
            }
            None => out.push(c),
        }

        prev = Some(quote.unwrap_or(c));
        i += width;
    }

    if let Some(last) = chars.last() {
        *carried = Some(*last);
    }
}

/// Direction of a quote inside a run of text
fn quote_opens(
    single: bool,
    prev: Option<char>,
    next: Option<char>,
    after_next: Option<char>,
) -> bool {
    let is_word = |c: Option<char>| c.is_some_and(|c| c.is_alphanumeric() || c == '_');
    let is_space = |c: Option<char>| c.is_some_and(char::is_whitespace);

    match prev {
        Some(p) if is_break(p) => !is_space(next),
        Some(_) => false,
        // Start of a run that follows a tag
        None => {
            let punct_then_break =
                next.is_some_and(|n| n.is_ascii_punctuation()) && !is_word(after_next);
            let possessive = single && next == Some('s') && !is_word(after_next);
            !(punct_then_break || possessive || is_space(next))
        }
    }
}

fn is_break(c: char) -> bool {
    c.is_whitespace() || matches!(c, '(' | '[' | '{' | '-' | '\u{2014}' | '\u{2013}')
}

/// `'80s` style abbreviations take an apostrophe
fn is_decade(after: &[char]) -> bool {
    matches!(after, [a, b, 's', ..] if a.is_ascii_digit() && b.is_ascii_digit())
}

fn starts_with(chars: &[char], pattern: &str) -> bool {
    let mut iter = chars.iter();
    pattern.chars().all(|p| iter.next() == Some(&p))
}
