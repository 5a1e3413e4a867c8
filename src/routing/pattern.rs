//! Regex pattern joining and simplification for display.

/// Append a child regex fragment to an include prefix.
///
/// A child anchored with `^` is anchored relative to its prefix, so the
/// anchor is dropped when a prefix is present.
pub fn join_regex(prefix: &str, fragment: &str) -> String {
    if prefix.is_empty() {
        return fragment.to_string();
    }
    let fragment = fragment.strip_prefix('^').unwrap_or(fragment);
    format!("{}{}", prefix, fragment)
}

/// Turn a route regex into a readable path.
///
/// `^articles/(?P<year>[0-9]{4})/(\d+)/$` becomes `/articles/<year>/<var>/`.
pub fn simplify_regex(regex: &str) -> String {
    let chars: Vec<char> = regex.chars().collect();
    let mut out = String::with_capacity(regex.len() + 1);
    let mut i = 0;

    while i < chars.len() {
        match chars[i] {
            '\\' => {
                match chars.get(i + 1) {
                    // Zero-width assertions.
                    Some('A' | 'Z' | 'b' | 'B') => {}
                    Some(c) if c.is_ascii_alphanumeric() => {
                        out.push('\\');
                        out.push(*c);
                    }
                    Some(c) => out.push(*c),
                    None => {}
                }
                i += 2;
            }
            '(' => {
                let end = group_end(&chars, i);
                if let Some(name) = group_name(&chars[i + 1..end]) {
                    out.push('<');
                    out.push_str(&name);
                    out.push('>');
                } else if chars.get(i + 1) != Some(&'?') {
                    out.push_str("<var>");
                }
                // Non-capturing groups and assertions vanish entirely.
                i = end + 1;
            }
            '[' => {
                // Character classes are copied verbatim; `^` and `(` inside
                // them are not anchors or groups.
                let end = class_end(&chars, i);
                out.extend(&chars[i..=end]);
                i = end + 1;
            }
            '^' | '$' | '?' | '*' | '+' | '.' => i += 1,
            c => {
                out.push(c);
                i += 1;
            }
        }
    }

    if !out.starts_with('/') {
        out.insert(0, '/');
    }
    out
}

/// Index of the `)` closing the group opened at `open`, or the input length
/// when the group is unbalanced.
fn group_end(chars: &[char], open: usize) -> usize {
    let mut depth = 0usize;
    let mut i = open;
    while i < chars.len() {
        match chars[i] {
            '\\' => i += 1,
            '[' => i = class_end(chars, i),
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return i;
                }
            }
            _ => {}
        }
        i += 1;
    }
    chars.len()
}

/// Index of the `]` closing the class opened at `open`, or the last index
/// when the class is unbalanced. A `]` right after `[` or `[^` is literal.
fn class_end(chars: &[char], open: usize) -> usize {
    let mut i = open + 1;
    if chars.get(i) == Some(&'^') {
        i += 1;
    }
    if chars.get(i) == Some(&']') {
        i += 1;
    }
    while i < chars.len() {
        match chars[i] {
            '\\' => i += 2,
            ']' => return i,
            _ => i += 1,
        }
    }
    chars.len().saturating_sub(1).max(open)
}

/// Name of a `(?P<name>...)` or `(?<name>...)` group body.
fn group_name(body: &[char]) -> Option<String> {
    let rest = match body {
        ['?', 'P', '<', rest @ ..] => rest,
        ['?', '<', first, ..] if *first != '=' && *first != '!' => &body[2..],
        _ => return None,
    };
    let close = rest.iter().position(|c| *c == '>')?;
    Some(rest[..close].iter().collect())
}
