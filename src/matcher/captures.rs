use hashbrown::{HashMap as FastHashMap, HashSet as FastHashSet};
use memchr::{memchr, memmem};
use regex::Regex;
use std::borrow::Cow;

const GROUP_INTRO: &[u8] = b"(?";
const RENAMED_MARK: &str = "__grok";

pub(crate) type GroupRenames = FastHashMap<String, String>;

/// Named capture groups of a compiled expression, in order of first appearance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CaptureIndex {
    names: Vec<String>,
    group_indices: Vec<usize>,
    group_count: usize,
}

impl CaptureIndex {
    pub fn from_regex(regex: &Regex) -> Self {
        Self::from_group_names(regex.capture_names())
    }

    pub(crate) fn from_renamed_regex(regex: &Regex, renames: &GroupRenames) -> Self {
        Self::from_group_names(
            regex
                .capture_names()
                .map(|name| name.map(|name| renames.get(name).map_or(name, String::as_str))),
        )
    }

    /// Builds the index from per-group names (`None` for unnamed groups). A name
    /// seen again keeps its slot and moves to the later group index.
    pub fn from_group_names<'a, I>(group_names: I) -> Self
    where
        I: IntoIterator<Item = Option<&'a str>>,
    {
        let mut index = CaptureIndex::default();

        for (group, name) in group_names.into_iter().enumerate() {
            index.group_count += 1;
            let Some(name) = name else {
                continue;
            };

            match index.names.iter().position(|known| known == name) {
                Some(slot) => index.group_indices[slot] = group,
                None => {
                    index.names.push(name.to_string());
                    index.group_indices.push(group);
                }
            }
        }

        index
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn group_count(&self) -> usize {
        self.group_count
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> + '_ {
        self.names
            .iter()
            .map(String::as_str)
            .zip(self.group_indices.iter().copied())
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|known| known == name)
    }
}

struct GroupName {
    start: usize,
    end: usize,
}

/// Rewrites the second and later groups that reuse a name to unique internal
/// names, since the engine rejects duplicates. Borrowed when nothing repeats.
pub(crate) fn rename_duplicate_groups(expression: &str) -> (Cow<'_, str>, GroupRenames) {
    let groups = named_groups(expression);
    let mut renames = GroupRenames::new();

    let taken: FastHashSet<&str> = groups
        .iter()
        .map(|group| &expression[group.start..group.end])
        .collect();
    if taken.len() == groups.len() {
        return (Cow::Borrowed(expression), renames);
    }

    let mut seen: FastHashSet<&str> = FastHashSet::with_capacity(groups.len());
    let mut out = String::with_capacity(expression.len() + 16);
    let mut cursor = 0usize;
    let mut suffix = 1usize;

    for group in &groups {
        let name = &expression[group.start..group.end];
        if seen.insert(name) {
            continue;
        }

        let internal = loop {
            suffix += 1;
            let candidate = format!("{name}{RENAMED_MARK}{suffix}");
            if !taken.contains(candidate.as_str()) {
                break candidate;
            }
        };

        out.push_str(&expression[cursor..group.start]);
        out.push_str(&internal);
        cursor = group.end;
        renames.insert(internal, name.to_string());
    }
    out.push_str(&expression[cursor..]);

    (Cow::Owned(out), renames)
}

fn named_groups(expression: &str) -> Vec<GroupName> {
    let bytes = expression.as_bytes();
    let mut groups = Vec::new();

    for open in memmem::find_iter(bytes, GROUP_INTRO) {
        if is_escaped(bytes, open) {
            continue;
        }
        let rest = &bytes[open + GROUP_INTRO.len()..];
        let start = match rest {
            [b'P', b'<', ..] => open + GROUP_INTRO.len() + 2,
            [b'<', next, ..] if *next != b'=' && *next != b'!' => open + GROUP_INTRO.len() + 1,
            _ => continue,
        };
        if let Some(len) = memchr(b'>', &bytes[start..])
            && len > 0
        {
            groups.push(GroupName {
                start,
                end: start + len,
            });
        }
    }

    groups
}

fn is_escaped(bytes: &[u8], pos: usize) -> bool {
    bytes[..pos]
        .iter()
        .rev()
        .take_while(|&&b| b == b'\\')
        .count()
        % 2
        == 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unnamed_groups_are_counted_but_not_indexed() {
        let regex = Regex::new(r"(?P<a>\d+)-(\w+)-(?P<b>x)?").expect("regex should compile");
        let index = CaptureIndex::from_regex(&regex);

        assert_eq!(index.group_count(), 4);
        assert_eq!(index.names(), &["a".to_string(), "b".to_string()]);
        assert_eq!(index.iter().collect::<Vec<_>>(), vec![("a", 1), ("b", 3)]);
    }

    #[test]
    fn repeated_name_keeps_last_group_index() {
        let index = CaptureIndex::from_group_names([
            None,
            Some("ip"),
            None,
            Some("port"),
            Some("ip"),
        ]);

        assert_eq!(index.len(), 2);
        assert_eq!(index.group_count(), 5);
        assert_eq!(index.iter().collect::<Vec<_>>(), vec![("ip", 4), ("port", 3)]);
        assert_eq!(index.position("port"), Some(1));
        assert_eq!(index.position("missing"), None);
    }

    #[test]
    fn rename_leaves_unique_names_borrowed() {
        let (expression, renames) = rename_duplicate_groups(r"(?P<a>\d+) (?<b>\w+) \(?P<a>x)");
        assert!(matches!(expression, Cow::Borrowed(_)));
        assert!(renames.is_empty());
    }

    #[test]
    fn rename_rewrites_later_duplicates() {
        let (expression, renames) =
            rename_duplicate_groups(r"(?P<w>\w+) (?P<w>\w+)-(?P<w>\d)(?P<w__grok2>x)");

        assert_eq!(
            expression,
            r"(?P<w>\w+) (?P<w__grok3>\w+)-(?P<w__grok4>\d)(?P<w__grok2>x)"
        );
        assert_eq!(renames.get("w__grok3").map(String::as_str), Some("w"));
        assert_eq!(renames.get("w__grok4").map(String::as_str), Some("w"));
        assert_eq!(renames.len(), 2);

        let regex = Regex::new(&expression).expect("renamed expression should compile");
        let index = CaptureIndex::from_renamed_regex(&regex, &renames);
        assert_eq!(index.names(), &["w".to_string(), "w__grok2".to_string()]);
        assert_eq!(index.iter().collect::<Vec<_>>(), vec![("w", 3), ("w__grok2", 4)]);
    }
}
