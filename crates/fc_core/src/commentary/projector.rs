//! Event → commentary projection.

use tracing::warn;

use super::localizer::{args, CommentaryLocalizer};
use super::variant::variant_index;
use super::{minute_to_ms, CommentaryKind, CommentaryLine, CommentarySource, EventDraft, Tone};
use crate::engine::match_state::MatchState;
use crate::models::{MatchEventType, TeamSide};
use crate::tactics::Mentality;

/// Last resort when even the fallback message cannot be formatted.
const HARD_FALLBACK: &str = "Play continues.";

/// Dominance thresholds on home possession at half-time.
const HT_DOMINANT_POSSESSION: u8 = 60;
const HT_OUTPLAYED_POSSESSION: u8 = 40;
/// Goal margin above which a win reads as dominant.
const FT_DOMINANT_MARGIN: u16 = 2;

pub struct CommentaryProjector {
    localizer: CommentaryLocalizer,
}

impl Default for CommentaryProjector {
    fn default() -> Self {
        Self::new(super::locales::DEFAULT_LOCALE)
    }
}

impl CommentaryProjector {
    /// Projector over the built-in templates. `locale` is negotiated, so
    /// `"id"` selects `id-ID` and anything unsupported falls back to `en-US`.
    pub fn new(locale: &str) -> Self {
        Self::with_localizer(CommentaryLocalizer::with_builtin(), locale)
    }

    pub fn with_localizer(mut localizer: CommentaryLocalizer, locale: &str) -> Self {
        let negotiated = localizer.negotiate_locale(&[locale]);
        if let Err(err) = localizer.set_locale(&negotiated) {
            warn!(locale, error = %err, "commentary locale unavailable, keeping default");
        }
        Self { localizer }
    }

    pub fn lang(&self) -> &str {
        self.localizer.current_locale()
    }

    pub fn project(&self, drafts: &[EventDraft]) -> Vec<CommentaryLine> {
        drafts.iter().map(|draft| self.line(draft)).collect()
    }

    pub fn line(&self, draft: &EventDraft) -> CommentaryLine {
        let text = self.render(draft).unwrap_or_else(|| self.fallback());
        CommentaryLine {
            t: draft.t,
            kind: draft.kind,
            team: draft.team,
            text,
            tone: Tone::for_kind(draft.kind),
            lang: self.lang().to_string(),
        }
    }

    fn render(&self, draft: &EventDraft) -> Option<String> {
        if draft.kind == CommentaryKind::Unknown {
            return None;
        }
        let team = self.side_label(draft.team?)?;
        let player = draft.player.as_deref().map(str::trim).filter(|p| !p.is_empty());

        // named templates first; kinds without them (offside, VAR) use anon
        let named = player
            .map(|_| draft.kind.key().to_string())
            .map(|prefix| (self.localizer.variant_count(&prefix), prefix))
            .filter(|(count, _)| *count > 0);
        let (count, prefix) = named.unwrap_or_else(|| {
            let prefix = format!("{}-anon", draft.kind.key());
            (self.localizer.variant_count(&prefix), prefix)
        });
        if count == 0 {
            return None;
        }

        let chosen = variant_index(draft.t, draft.kind, player, count) + 1;
        let fluent_args = args(&[("player", player.unwrap_or_default().to_string()), ("team", team)]);
        self.localizer.format(&format!("{prefix}-{chosen}"), Some(&fluent_args))
    }

    fn side_label(&self, side: TeamSide) -> Option<String> {
        self.localizer.format(&format!("side-{}", side.as_str()), None)
    }

    fn fallback(&self) -> String {
        self.localizer.format("fallback", None).unwrap_or_else(|| HARD_FALLBACK.to_string())
    }

    /// Level / home ahead / away ahead, shaded by home possession.
    pub fn half_time_summary(&self, state: &MatchState) -> String {
        let home_possession = state.possession.home;
        let key = match state.home_score.cmp(&state.away_score) {
            std::cmp::Ordering::Equal if home_possession > HT_DOMINANT_POSSESSION => "ht-level-dominant",
            std::cmp::Ordering::Equal => "ht-level-even",
            std::cmp::Ordering::Greater if home_possession < HT_OUTPLAYED_POSSESSION => "ht-home-clinical",
            std::cmp::Ordering::Greater => "ht-home-deserved",
            std::cmp::Ordering::Less if home_possession > HT_DOMINANT_POSSESSION => "ht-away-counter",
            std::cmp::Ordering::Less => "ht-away-control",
        };
        self.localizer.format(key, None).unwrap_or_else(|| self.fallback())
    }

    /// Result line with the final score; margins above two read as dominant.
    pub fn full_time_summary(&self, state: &MatchState) -> String {
        let (home, away) = (state.home_score, state.away_score);
        let key = if home == away {
            "ft-draw"
        } else if home > away {
            if home - away > FT_DOMINANT_MARGIN { "ft-home-dominant" } else { "ft-home-narrow" }
        } else if away - home > FT_DOMINANT_MARGIN {
            "ft-away-dominant"
        } else {
            "ft-away-narrow"
        };
        let fluent_args = args(&[("home", home.to_string()), ("away", away.to_string())]);
        self.localizer.format(key, Some(&fluent_args)).unwrap_or_else(|| self.fallback())
    }

    pub fn tactical_change(&self, mentality: Mentality) -> String {
        let label = self
            .localizer
            .format(&format!("mentality-{}", mentality.as_str()), None)
            .unwrap_or_else(|| mentality.as_str().to_string());
        let fluent_args = args(&[("mentality", label)]);
        self.localizer.format("tactics-change", Some(&fluent_args)).unwrap_or_else(|| self.fallback())
    }
}

impl CommentarySource for CommentaryProjector {
    fn event_line(
        &self,
        event_type: MatchEventType,
        team: TeamSide,
        player: Option<&str>,
        minute: u8,
    ) -> String {
        let draft = EventDraft {
            t: minute_to_ms(minute),
            kind: event_type.into(),
            team: Some(team),
            player: player.map(str::to_string),
        };
        self.line(&draft).text
    }

    fn half_time_line(&self, state: &MatchState) -> String {
        self.half_time_summary(state)
    }

    fn full_time_line(&self, state: &MatchState) -> String {
        self.full_time_summary(state)
    }

    fn tactical_change_line(&self, _team: TeamSide, mentality: Mentality) -> String {
        self.tactical_change(mentality)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PlayerInMatch, Position, TeamInMatch, Weather};
    use strum::IntoEnumIterator;

    fn state(home: u16, away: u16, home_possession: u8) -> MatchState {
        let lineup: Vec<_> =
            (0..11).map(|i| PlayerInMatch::new(format!("p{i}"), format!("P{i}"), Position::Midfielder, 70.0)).collect();
        let mut s = MatchState::new(
            TeamInMatch::new("Home", lineup.clone()),
            TeamInMatch::new("Away", lineup),
            Weather::Sunny,
        );
        s.home_score = home;
        s.away_score = away;
        s.possession.home = home_possession;
        s.possession.away = 100 - home_possession;
        s
    }

    #[test]
    fn test_empty_input() {
        let projector = CommentaryProjector::default();
        assert!(projector.project(&[]).is_empty());
    }

    #[test]
    fn test_goal_line_names_player() {
        let projector = CommentaryProjector::default();
        let draft = EventDraft::new(12 * 60_000, CommentaryKind::Goal, TeamSide::Home).with_player("Bambang");
        let line = projector.line(&draft);
        assert!(line.text.contains("Bambang"), "{}", line.text);
        assert_eq!(line.tone, Tone::Enthusiastic);
        assert_eq!(line.lang, "en-US");
        assert_eq!(line.t, 720_000);
    }

    #[test]
    fn test_projection_is_pure() {
        let projector = CommentaryProjector::default();
        let drafts: Vec<_> = (0..20)
            .map(|m| EventDraft::new(m * 60_000, CommentaryKind::Shot, TeamSide::Away).with_player("Egy"))
            .collect();
        assert_eq!(projector.project(&drafts), projector.project(&drafts));
    }

    #[test]
    fn test_offside_uses_anonymous_template() {
        let projector = CommentaryProjector::default();
        let draft = EventDraft::new(60_000, CommentaryKind::Offside, TeamSide::Away).with_player("Witan");
        let text = projector.line(&draft).text;
        assert!(text.contains("the visitors"), "{text}");
    }

    #[test]
    fn test_malformed_drafts_fall_back() {
        let projector = CommentaryProjector::default();
        let unknown = EventDraft::new(0, CommentaryKind::Unknown, TeamSide::Home);
        let teamless = EventDraft { t: 0, kind: CommentaryKind::Goal, team: None, player: None };
        for draft in [unknown, teamless] {
            assert_eq!(projector.line(&draft).text, "Play continues.");
        }
    }

    #[test]
    fn test_every_kind_renders_something() {
        for locale in ["en-US", "id-ID"] {
            let projector = CommentaryProjector::new(locale);
            for kind in CommentaryKind::iter() {
                for player in [None, Some("Asnawi")] {
                    let mut draft = EventDraft::new(3_600_000, kind, TeamSide::Home);
                    draft.player = player.map(str::to_string);
                    let line = projector.line(&draft);
                    assert!(!line.text.is_empty(), "{locale} {kind:?}");
                    assert!(!line.text.contains('{'), "{locale} {kind:?}: {}", line.text);
                }
            }
        }
    }

    #[test]
    fn test_indonesian_locale() {
        let projector = CommentaryProjector::new("id");
        assert_eq!(projector.lang(), "id-ID");
        let draft = EventDraft::new(0, CommentaryKind::Card, TeamSide::Home).with_player("Rizky");
        let line = projector.line(&draft);
        assert!(line.text.contains("Rizky"));
        assert_eq!(line.lang, "id-ID");
    }

    #[test]
    fn test_unsupported_locale_falls_back() {
        let projector = CommentaryProjector::new("pt-BR");
        assert_eq!(projector.lang(), "en-US");
    }

    #[test]
    fn test_half_time_summaries() {
        let projector = CommentaryProjector::default();
        assert!(projector.half_time_summary(&state(0, 0, 65)).contains("dominated possession"));
        assert!(projector.half_time_summary(&state(1, 1, 50)).contains("evenly matched"));
        assert!(projector.half_time_summary(&state(1, 0, 35)).contains("Clinical"));
        assert!(projector.half_time_summary(&state(1, 0, 55)).contains("better team"));
        assert!(projector.half_time_summary(&state(0, 1, 70)).contains("counter-attacking"));
        assert!(projector.half_time_summary(&state(0, 2, 45)).contains("controlled"));
    }

    #[test]
    fn test_full_time_summaries() {
        let projector = CommentaryProjector::default();
        assert!(projector.full_time_summary(&state(2, 2, 50)).contains("fair result"));
        let home_rout = projector.full_time_summary(&state(4, 1, 50));
        assert!(home_rout.contains("4-1") && home_rout.contains("dominant"), "{home_rout}");
        assert!(projector.full_time_summary(&state(2, 1, 50)).contains("hard-fought"));
        assert!(projector.full_time_summary(&state(0, 2, 50)).contains("crucial"));
        assert!(projector.full_time_summary(&state(0, 5, 50)).contains("impressive away"));
    }

    #[test]
    fn test_tactical_change_names_mentality() {
        let projector = CommentaryProjector::default();
        let text = projector.tactical_change_line(TeamSide::Home, Mentality::UltraAttacking);
        assert!(text.contains("ultra-attacking"), "{text}");
        let id = CommentaryProjector::new("id-ID");
        assert!(id.tactical_change(Mentality::Defensive).contains("bertahan"));
    }
}
