//! Text markup helpers.
//!
//! Tooltip text carries inline color tags of the form `<col=rrggbb>` that only
//! the render boundary interprets. Everything that compares tooltip text
//! (filter lists, info refresh, trivial-click checks) works on the de-tagged
//! form produced by [`remove_tags`].

/// Strip every `<...>` tag from a string.
///
/// An unterminated `<` is kept verbatim along with the rest of the input.
///
/// # Examples
/// ```
/// use lingering_types::markup::remove_tags;
/// assert_eq!(remove_tags("<col=ffff00>Examine<col=ffffff> Rock"), "Examine Rock");
/// assert_eq!(remove_tags("1 < 2"), "1 < 2");
/// ```
pub fn remove_tags(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(open) = rest.find('<') {
        let Some(close) = rest[open..].find('>') else {
            break;
        };
        result.push_str(&rest[..open]);
        rest = &rest[open + close + 1..];
    }
    result.push_str(rest);
    result
}

/// Open a color tag for an RGBA color. Alpha is not representable in markup
/// and is dropped.
///
/// # Examples
/// ```
/// use lingering_types::markup::color_tag;
/// assert_eq!(color_tag([0xED, 0x55, 0x55, 0xFF]), "<col=ed5555>");
/// ```
pub fn color_tag(rgba: [u8; 4]) -> String {
    format!("<col={:02x}{:02x}{:02x}>", rgba[0], rgba[1], rgba[2])
}

/// Wrap `text` in a color tag.
#[inline]
pub fn colorize(text: &str, rgba: [u8; 4]) -> String {
    format!("{}{}", color_tag(rgba), text)
}

/// Build the display text for a menu click from its option and target.
///
/// A target identical to the option, or an empty target, adds nothing.
///
/// # Examples
/// ```
/// use lingering_types::markup::menu_text;
/// assert_eq!(menu_text("Examine", "Rock"), "Examine Rock");
/// assert_eq!(menu_text("Walk here", ""), "Walk here");
/// ```
pub fn menu_text(option: &str, target: &str) -> String {
    let option = option.trim();
    let target = target.trim();
    if target.is_empty() || option == target {
        option.to_string()
    } else {
        format!("{} {}", option, target)
    }
}

/// Parse comma-delimited list storage.
///
/// Entries are trimmed and empty segments dropped, so any stored string
/// parses; garbage degrades to an empty list.
///
/// # Examples
/// ```
/// use lingering_types::markup::csv_to_list;
/// assert_eq!(csv_to_list("Examine Rock, Talk-to Banker,,"), vec!["Examine Rock", "Talk-to Banker"]);
/// assert!(csv_to_list(" , ,").is_empty());
/// ```
pub fn csv_to_list(csv: &str) -> Vec<String> {
    csv.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Join list entries back into storage form.
pub fn list_to_csv<S: AsRef<str>>(items: &[S]) -> String {
    items
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(",")
}
