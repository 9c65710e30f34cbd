use serde::Serialize;

use crate::posture::PostureStatus;

const SHORT_SESSION_MINUTES: f64 = 30.0;
const MEDIUM_SESSION_MINUTES: f64 = 60.0;
const PRIORITY_AFTER_MINUTES: f64 = 120.0;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum BreakKind {
    Eyes,
    Movement,
    Rest,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BreakSuggestion {
    pub kind: BreakKind,
    pub title: &'static str,
    pub description: &'static str,
    pub duration_secs: u32,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BreakAdvice {
    pub suggestions: Vec<BreakSuggestion>,
    /// Long session or bad posture right now.
    pub priority: bool,
}

const fn suggestion(
    kind: BreakKind,
    title: &'static str,
    description: &'static str,
    duration_secs: u32,
) -> BreakSuggestion {
    BreakSuggestion {
        kind,
        title,
        description,
        duration_secs,
    }
}

/// Suggestions escalate with time seated.
pub fn advise(session_minutes: f64, status: PostureStatus) -> BreakAdvice {
    let suggestions = if session_minutes < SHORT_SESSION_MINUTES {
        vec![
            suggestion(BreakKind::Eyes, "Blink often", "Keep your eyes hydrated", 30),
            suggestion(
                BreakKind::Movement,
                "Adjust position",
                "Check that your back is supported",
                60,
            ),
        ]
    } else if session_minutes < MEDIUM_SESSION_MINUTES {
        vec![
            suggestion(
                BreakKind::Movement,
                "Neck stretch",
                "Gently tilt your head side to side",
                120,
            ),
            suggestion(BreakKind::Eyes, "Eye exercise", "Focus on distant points", 60),
        ]
    } else {
        vec![
            suggestion(BreakKind::Rest, "Active break", "Stand up and walk a little", 300),
            suggestion(
                BreakKind::Movement,
                "Full stretch",
                "Exercises for spine and shoulders",
                180,
            ),
            suggestion(
                BreakKind::Eyes,
                "Visual rest",
                "Look out the window or close your eyes",
                120,
            ),
        ]
    };

    BreakAdvice {
        suggestions,
        priority: session_minutes > PRIORITY_AFTER_MINUTES || status == PostureStatus::Danger,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advice_escalates_with_session_length() {
        assert_eq!(advise(0.0, PostureStatus::Good).suggestions.len(), 2);
        assert_eq!(
            advise(29.5, PostureStatus::Good).suggestions[0].kind,
            BreakKind::Eyes
        );
        assert_eq!(
            advise(30.0, PostureStatus::Good).suggestions[0].title,
            "Neck stretch"
        );
        let long = advise(60.0, PostureStatus::Good);
        assert_eq!(long.suggestions.len(), 3);
        assert_eq!(long.suggestions[0].kind, BreakKind::Rest);
    }

    #[test]
    fn priority_on_long_session_or_danger() {
        assert!(!advise(120.0, PostureStatus::Warning).priority);
        assert!(advise(120.5, PostureStatus::Good).priority);
        assert!(advise(5.0, PostureStatus::Danger).priority);
    }
}
