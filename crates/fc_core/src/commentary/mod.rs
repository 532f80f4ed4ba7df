//! Match commentary
//!
//! Turns structured events into localized display lines. The projector is
//! pure: the same drafts in the same locale always render the same text.

pub mod locales;
pub mod localizer;
pub mod projector;
pub mod variant;

pub use localizer::CommentaryLocalizer;
pub use projector::CommentaryProjector;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::engine::match_state::MatchState;
use crate::models::{MatchEventType, TeamSide};
use crate::tactics::Mentality;

/// Commentary categories. Anything unrecognised on the wire becomes `Unknown`
/// and renders the fallback line.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, JsonSchema)]
#[cfg_attr(test, derive(strum_macros::EnumIter))]
#[serde(rename_all = "snake_case")]
pub enum CommentaryKind {
    Goal,
    Shot,
    Save,
    Chance,
    Card,
    Foul,
    Offside,
    VarDecision,
    #[serde(other)]
    Unknown,
}

impl CommentaryKind {
    /// Message-id prefix in the FTL templates.
    pub fn key(self) -> &'static str {
        match self {
            CommentaryKind::Goal => "goal",
            CommentaryKind::Shot => "shot",
            CommentaryKind::Save => "save",
            CommentaryKind::Chance => "chance",
            CommentaryKind::Card => "card",
            CommentaryKind::Foul => "foul",
            CommentaryKind::Offside => "offside",
            CommentaryKind::VarDecision => "var-decision",
            CommentaryKind::Unknown => "unknown",
        }
    }
}

impl From<MatchEventType> for CommentaryKind {
    fn from(event_type: MatchEventType) -> Self {
        match event_type {
            MatchEventType::Goal => CommentaryKind::Goal,
            MatchEventType::Shot => CommentaryKind::Shot,
            MatchEventType::Save => CommentaryKind::Save,
            MatchEventType::Foul => CommentaryKind::Foul,
            MatchEventType::Offside => CommentaryKind::Offside,
            MatchEventType::VarDecision => CommentaryKind::VarDecision,
            MatchEventType::YellowCard | MatchEventType::RedCard => CommentaryKind::Card,
            MatchEventType::Kickoff
            | MatchEventType::Corner
            | MatchEventType::Freekick
            | MatchEventType::Penalty
            | MatchEventType::Injury
            | MatchEventType::Substitution
            | MatchEventType::HalfTime
            | MatchEventType::FullTime => CommentaryKind::Chance,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    Calm,
    Enthusiastic,
    Critical,
    Dramatic,
}

impl Tone {
    pub fn for_kind(kind: CommentaryKind) -> Self {
        match kind {
            CommentaryKind::Goal | CommentaryKind::Save => Tone::Enthusiastic,
            CommentaryKind::VarDecision => Tone::Dramatic,
            CommentaryKind::Card | CommentaryKind::Foul => Tone::Critical,
            _ => Tone::Calm,
        }
    }
}

/// Projector input. `t` is milliseconds since kickoff.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct EventDraft {
    pub t: i64,
    pub kind: CommentaryKind,
    #[serde(default)]
    pub team: Option<TeamSide>,
    #[serde(default)]
    pub player: Option<String>,
}

impl EventDraft {
    pub fn new(t: i64, kind: CommentaryKind, team: TeamSide) -> Self {
        Self { t, kind, team: Some(team), player: None }
    }

    pub fn with_player(mut self, player: impl Into<String>) -> Self {
        self.player = Some(player.into());
        self
    }

    /// Draft for a logged event, timestamped at the start of its minute.
    pub fn from_event(event: &crate::models::MatchEventData) -> Self {
        Self {
            t: minute_to_ms(event.minute),
            kind: event.event_type.into(),
            team: Some(event.team),
            player: event.player.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct CommentaryLine {
    pub t: i64,
    pub kind: CommentaryKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team: Option<TeamSide>,
    pub text: String,
    pub tone: Tone,
    pub lang: String,
}

pub fn minute_to_ms(minute: u8) -> i64 {
    i64::from(minute) * 60_000
}

/// Text source the simulator consults when it appends events.
///
/// Implementations must not fail; return a fallback string instead.
pub trait CommentarySource {
    fn event_line(
        &self,
        event_type: MatchEventType,
        team: TeamSide,
        player: Option<&str>,
        minute: u8,
    ) -> String;
    fn half_time_line(&self, state: &MatchState) -> String;
    fn full_time_line(&self, state: &MatchState) -> String;
    fn tactical_change_line(&self, team: TeamSide, mentality: Mentality) -> String;
}

/// Leaves every `commentary` field empty. Used by batch runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentCommentary;

impl CommentarySource for SilentCommentary {
    fn event_line(&self, _: MatchEventType, _: TeamSide, _: Option<&str>, _: u8) -> String {
        String::new()
    }

    fn half_time_line(&self, _: &MatchState) -> String {
        String::new()
    }

    fn full_time_line(&self, _: &MatchState) -> String {
        String::new()
    }

    fn tactical_change_line(&self, _: TeamSide, _: Mentality) -> String {
        String::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_every_event_type_has_a_kind() {
        for event_type in MatchEventType::iter() {
            let kind = CommentaryKind::from(event_type);
            assert_ne!(kind, CommentaryKind::Unknown, "{event_type:?}");
        }
        assert_eq!(CommentaryKind::from(MatchEventType::RedCard), CommentaryKind::Card);
        assert_eq!(CommentaryKind::from(MatchEventType::Corner), CommentaryKind::Chance);
    }

    #[test]
    fn test_unknown_kind_on_the_wire() {
        let draft: EventDraft =
            serde_json::from_str(r#"{"t": 1000, "kind": "bicycle_kick", "team": "home"}"#).unwrap();
        assert_eq!(draft.kind, CommentaryKind::Unknown);
        let draft: EventDraft = serde_json::from_str(r#"{"t": 5, "kind": "var_decision"}"#).unwrap();
        assert_eq!(draft.kind, CommentaryKind::VarDecision);
        assert!(draft.team.is_none());
    }

    #[test]
    fn test_tones() {
        assert_eq!(Tone::for_kind(CommentaryKind::Goal), Tone::Enthusiastic);
        assert_eq!(Tone::for_kind(CommentaryKind::VarDecision), Tone::Dramatic);
        assert_eq!(Tone::for_kind(CommentaryKind::Card), Tone::Critical);
        assert_eq!(Tone::for_kind(CommentaryKind::Offside), Tone::Calm);
    }

    #[test]
    fn test_draft_from_event() {
        let event = crate::models::MatchEventData::new(
            MatchEventType::YellowCard,
            30,
            TeamSide::Away,
            crate::models::Significance::Medium,
        )
        .with_player("Rizky");
        let draft = EventDraft::from_event(&event);
        assert_eq!(draft.t, 1_800_000);
        assert_eq!(draft.kind, CommentaryKind::Card);
        assert_eq!(draft.player.as_deref(), Some("Rizky"));
    }
}
