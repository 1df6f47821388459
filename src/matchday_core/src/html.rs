//! Just enough HTML scanning to read a table out of a standings page.

/// Blocks delimited by `open` (a tag prefix like `"<tr"`) and `close`.
///
/// Yields each block's inner content, i.e. what follows the end of the
/// opening tag up to the closing tag. Stops at the first unclosed block.
pub fn tag_blocks<'a>(s: &'a str, open: &'a str, close: &'a str) -> impl Iterator<Item = &'a str> + 'a {
    let mut from = 0;
    std::iter::from_fn(move || {
        loop {
            let start = s.get(from..)?.find(open)? + from;
            let after_name = start + open.len();
            // "<tr" must not match "<track"
            let boundary = s[after_name..].chars().next()?;
            if !(boundary == '>' || boundary.is_whitespace() || boundary == '/') {
                from = after_name;
                continue;
            }
            let inner_start = s[start..].find('>')? + start + 1;
            let inner_end = s[inner_start..].find(close)? + inner_start;
            from = inner_end + close.len();
            return Some(&s[inner_start..inner_end]);
        }
    })
}

/// Opening tag (`<...>`) of the element starting at `start`.
pub fn opening_tag(s: &str, start: usize) -> Option<&str> {
    let end = s[start..].find('>')? + start + 1;
    Some(&s[start..end])
}

/// Whether an opening tag's class attribute lists every name in `classes`.
pub fn has_classes(tag: &str, classes: &[&str]) -> bool {
    let Some(attr_start) = tag.find("class=\"") else {
        return false;
    };
    let value_start = attr_start + "class=\"".len();
    let Some(value_len) = tag[value_start..].find('"') else {
        return false;
    };
    let value = &tag[value_start..value_start + value_len];
    classes.iter().all(|c| value.split_whitespace().any(|v| v == *c))
}

/// Text content with tags removed, common entities decoded and whitespace
/// collapsed.
pub fn strip_tags(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_tag = false;

    for ch in s.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }

    let decoded = out
        .replace("&nbsp;", " ")
        .replace("&#39;", "'")
        .replace("&quot;", "\"")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&");
    decoded.split_whitespace().collect::<Vec<_>>().join(" ")
}
