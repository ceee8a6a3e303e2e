//! Issue references in commit messages.
//!
//! A line licenses extraction only when it contains one of the closing or
//! relation keywords (`closes`, `relates to`, `backport`, ...). Every locator
//! from the first keyword to the end of that line is collected:
//!
//! - `#1234`
//! - `camunda/camunda#1234`
//! - `https://github.com/camunda/camunda/1234`
//! - `https://www.github.com/camunda/camunda/1234`
//!
//! Only locators pointing at [`ACCEPTED_REPOSITORIES`] are kept. This list is
//! fixed and has nothing to do with the repository the labels are written to.

use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

use crate::data::IssueReference;

/// Repository a bare `#1234` locator refers to.
pub const DEFAULT_REPOSITORY: (&str, &str) = ("camunda", "camunda");

/// Repositories whose issue locators are accepted. `camunda/zeebe` is the
/// name the monorepo had before it was renamed.
pub const ACCEPTED_REPOSITORIES: &[(&str, &str)] = &[("camunda", "camunda"), ("camunda", "zeebe")];

static KEYWORD_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:close[sd]?|merges?|relate[sd]?|back ?ports?)\b")
        .expect("Invalid regex pattern for commit keywords")
});

// Alternation order matters: the URL form has to win over the slash form,
// which has to win over the bare form.
static LOCATOR_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"https://(?:www\.)?github\.com/([\w.-]+)/([\w.-]+)/(\d+)|([\w.-]+)/([\w.-]+)#(\d+)|#(\d+)",
    )
    .expect("Invalid regex pattern for issue locators")
});

pub fn is_accepted_repository(owner: &str, name: &str) -> bool {
    ACCEPTED_REPOSITORIES
        .iter()
        .any(|(o, n)| *o == owner && *n == name)
}

/// All syntactically valid references on a single line, before the
/// repository check. Empty if the line has no keyword.
pub fn references_in_line(line: &str) -> Vec<IssueReference> {
    let Some(keyword) = KEYWORD_REGEX.find(line) else {
        return Vec::new();
    };

    let (default_owner, default_name) = DEFAULT_REPOSITORY;
    let mut refs = Vec::new();

    // Match on the whole line so a locator containing the keyword keeps its
    // owner, then drop everything that starts before the keyword.
    for caps in LOCATOR_REGEX.captures_iter(line) {
        if caps.get(0).map_or(true, |m| m.start() < keyword.start()) {
            continue;
        }

        let (owner, name, digits) = if let Some(number) = caps.get(3) {
            (&caps[1], &caps[2], number.as_str())
        } else if let Some(number) = caps.get(6) {
            (&caps[4], &caps[5], number.as_str())
        } else if let Some(number) = caps.get(7) {
            (default_owner, default_name, number.as_str())
        } else {
            continue;
        };

        // Out of range or zero is not an issue number
        let Ok(number) = digits.parse::<u64>() else {
            continue;
        };
        if number == 0 {
            continue;
        }

        refs.push(IssueReference {
            number,
            owner: owner.to_string(),
            name: name.to_string(),
        });
    }

    refs
}

/// Accepted references of all messages in encounter order, duplicates kept.
pub fn extract_references<S: AsRef<str>>(messages: &[S]) -> Vec<IssueReference> {
    messages
        .iter()
        .flat_map(|message| message.as_ref().lines())
        .flat_map(references_in_line)
        .filter(|r| is_accepted_repository(&r.owner, &r.name))
        .collect()
}

/// Distinct issue numbers referenced by the messages, in first-occurrence
/// order.
pub fn extract_issue_ids<S: AsRef<str>>(messages: &[S]) -> Vec<u64> {
    let mut seen = HashSet::new();
    extract_references(messages)
        .into_iter()
        .map(|r| r.number)
        .filter(|number| seen.insert(*number))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ids(message: &str) -> Vec<u64> {
        extract_issue_ids(&[message])
    }

    #[test]
    fn keywords_are_whole_words() {
        assert_eq!(ids("discloses #12"), Vec::<u64>::new());
        assert_eq!(ids("unmerged #12"), Vec::<u64>::new());
        assert_eq!(ids("closed #12"), vec![12]);
        assert_eq!(ids("back port #12"), vec![12]);
        assert_eq!(ids("MERGES #12"), vec![12]);
    }

    #[test]
    fn locators_before_keyword_are_ignored() {
        assert_eq!(ids("#1 is related to #2"), vec![2]);
    }

    #[test]
    fn only_first_keyword_starts_the_scan() {
        assert_eq!(ids("closes #1 and relates to #2"), vec![1, 2]);
    }

    #[test]
    fn zero_and_overflowing_numbers_are_skipped() {
        assert_eq!(ids("closes #0, #99999999999999999999999, #5"), vec![5]);
    }

    #[test]
    fn references_keep_the_repository() {
        let refs = references_in_line("closes camunda/zeebe#9 and operate/operate#8");
        assert_eq!(
            refs,
            vec![
                IssueReference {
                    number: 9,
                    owner: "camunda".to_string(),
                    name: "zeebe".to_string(),
                },
                IssueReference {
                    number: 8,
                    owner: "operate".to_string(),
                    name: "operate".to_string(),
                },
            ]
        );
    }

    #[test]
    fn allow_list_needs_owner_and_name() {
        assert!(is_accepted_repository("camunda", "camunda"));
        assert!(is_accepted_repository("camunda", "zeebe"));
        assert!(!is_accepted_repository("camunda", "operate"));
        assert!(!is_accepted_repository("zeebe-io", "zeebe"));
        assert!(!is_accepted_repository("zeebe-io", "camunda"));
    }

    #[test]
    fn duplicates_across_messages_keep_first_position() {
        let messages = vec![
            "closes #3".to_string(),
            "relates to #1\nbackport #3".to_string(),
            "merge #2, #1".to_string(),
        ];
        assert_eq!(extract_issue_ids(&messages), vec![3, 1, 2]);
    }

    #[test]
    fn keyword_inside_a_foreign_locator_is_not_a_bare_reference() {
        assert_eq!(ids("ci: bump korthout/backport-action#401"), Vec::<u64>::new());
        assert_eq!(ids("ci: bump korthout/backport-action#401, closes #5"), vec![5]);
        assert_eq!(
            references_in_line("bump korthout/backport-action#401"),
            Vec::<IssueReference>::new()
        );
    }

    #[test]
    fn windows_line_endings() {
        assert_eq!(ids("foo #7\r\ncloses #8\r\n"), vec![8]);
    }
}
