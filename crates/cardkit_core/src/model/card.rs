//! Card kinds and their fixed placeholders.
//!
//! # Responsibility
//! - Enumerate the three card templates the site renders.
//! - Own the trusted placeholder markup shown while loading, on failure and
//!   when a collection is empty.
//!
//! # Invariants
//! - Placeholder markup is constant and never interpolates record data.

use serde::{Deserialize, Serialize};

/// Which fixed template skeleton a record is rendered with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardKind {
    /// Upcoming event announcement.
    Event,
    /// Past activity report.
    Activity,
    /// Team member profile.
    TeamMember,
}

/// Trusted markup for the non-populated container states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placeholders {
    pub loading: &'static str,
    pub failed: &'static str,
    pub empty: &'static str,
}

const EVENT_PLACEHOLDERS: Placeholders = Placeholders {
    loading: r#"<div class="text-center py-8 text-gray-500">Loading events...</div>"#,
    failed: r#"<div class="text-center py-8 text-red-500">Failed to load events</div>"#,
    empty: r#"<div class="text-center py-8 text-gray-500">No upcoming events available.</div>"#,
};

const ACTIVITY_PLACEHOLDERS: Placeholders = Placeholders {
    loading: r#"<div class="text-center py-8 text-gray-500">Loading activities...</div>"#,
    failed: r#"<div class="text-center py-8 text-red-500">Failed to load activities</div>"#,
    empty: r#"<div class="text-center py-8 text-gray-500">No recent activities available.</div>"#,
};

const TEAM_MEMBER_PLACEHOLDERS: Placeholders = Placeholders {
    loading: r#"<div class="col-span-full text-center py-12 text-gray-500">Loading team members...</div>"#,
    failed: r#"<div class="col-span-full text-center py-12 text-red-500">Failed to load team members</div>"#,
    empty: r#"<div class="col-span-full text-center py-12"><div class="text-gray-500 text-lg mb-4">No team members found</div><p class="text-gray-400">Check back soon for team updates.</p></div>"#,
};

impl CardKind {
    pub const ALL: [CardKind; 3] = [CardKind::Event, CardKind::Activity, CardKind::TeamMember];

    /// Stable lowercase name, matching the serde representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Event => "event",
            Self::Activity => "activity",
            Self::TeamMember => "team_member",
        }
    }

    /// Parses a kind name, accepting singular, plural and dashed spellings.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "event" | "events" => Some(Self::Event),
            "activity" | "activities" => Some(Self::Activity),
            "team_member" | "team_members" | "team" => Some(Self::TeamMember),
            _ => None,
        }
    }

    /// DOM id of the container this kind is rendered into on the site.
    pub fn container_id(self) -> &'static str {
        match self {
            Self::Event => "events-list",
            Self::Activity => "activities-list",
            Self::TeamMember => "team-list",
        }
    }

    pub fn placeholders(self) -> &'static Placeholders {
        match self {
            Self::Event => &EVENT_PLACEHOLDERS,
            Self::Activity => &ACTIVITY_PLACEHOLDERS,
            Self::TeamMember => &TEAM_MEMBER_PLACEHOLDERS,
        }
    }
}
