//! Member badges
//!
//! A member's badge is chosen by the first rule whose pattern occurs in the
//! lowercased member name. Rules are checked in order, so more specific
//! patterns come first.

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::Member;

/// Maps a name fragment to a badge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BadgeRule {
    pub pattern: &'static str,
    pub badge: &'static str,
}

const fn rule(pattern: &'static str, badge: &'static str) -> BadgeRule {
    BadgeRule { pattern, badge }
}

/// Badge used when no rule matches
pub const DEFAULT_BADGE: &str = "👤";

/// Badge rules in priority order
pub const BADGE_RULES: &[BadgeRule] = &[
    rule("全家", "👨‍👩‍👧‍👦"),
    rule("whole family", "👨‍👩‍👧‍👦"),
    rule("家庭", "🏠"),
    rule("household", "🏠"),
    rule("共同", "🤝"),
    rule("shared", "🤝"),
    rule("合计", "💰"),
    rule("total", "💰"),
    rule("公司", "🏢"),
    rule("company", "🏢"),
    rule("其他", "👥"),
    rule("other", "👥"),
    rule("女", "👧"),
    rule("妈", "👧"),
    rule("姐", "👧"),
    rule("妹", "👧"),
    rule("mom", "👧"),
    rule("wife", "👧"),
    rule("sister", "👧"),
    rule("daughter", "👧"),
    rule("男", "🧑"),
    rule("爸", "🧑"),
    rule("哥", "🧑"),
    rule("弟", "🧑"),
    rule("dad", "🧑"),
    rule("husband", "🧑"),
    rule("brother", "🧑"),
];

/// Pick the badge for a member name
pub fn badge_for(name: &str) -> &'static str {
    let name = name.trim().to_lowercase();
    BADGE_RULES
        .iter()
        .find(|rule| name.contains(rule.pattern))
        .map(|rule| rule.badge)
        .unwrap_or(DEFAULT_BADGE)
}

#[derive(Tabled)]
struct MemberRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "")]
    badge: &'static str,
    #[tabled(rename = "Name")]
    name: String,
}

/// Format members as a table
pub fn format_member_list(members: &[Member]) -> String {
    if members.is_empty() {
        return "No members found.\n".to_string();
    }

    let rows = members.iter().map(|m| MemberRow {
        id: m.id.get(),
        badge: badge_for(&m.name),
        name: m.name.clone(),
    });

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    format!("{}\n", table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MemberId;

    #[test]
    fn test_badge_priority() {
        assert_eq!(badge_for("全家"), "👨‍👩‍👧‍👦");
        assert_eq!(badge_for("小张（女）"), "👧");
        assert_eq!(badge_for("Dad"), "🧑");
        assert_eq!(badge_for("Shared account"), "🤝");
        // "Household" wins over later rules
        assert_eq!(badge_for("Household (mom)"), "🏠");
    }

    #[test]
    fn test_default_badge() {
        assert_eq!(badge_for("Zhang"), DEFAULT_BADGE);
        assert_eq!(badge_for(""), DEFAULT_BADGE);
    }

    #[test]
    fn test_member_table() {
        let output = format_member_list(&[Member::new(MemberId::new(1), "Liu")]);
        assert!(output.contains("Liu"));
        assert!(format_member_list(&[]).contains("No members"));
    }
}
