use crate::domain::{Classification, ClassificationResult};

use super::state::ViewState;

pub const TITLE: &str = "Spam Classifier";
pub const TAGLINE: &str =
    "AI-powered spam detection. Paste any message or email to instantly check if it's spam.";
pub const INPUT_LABEL: &str = "Message to Analyze";
pub const PLACEHOLDER: &str = "Paste your email or message here...\n\nTry something like: 'URGENT! You've won $1,000,000! Click here to claim your prize now!'";
pub const SHORTCUT_HINT: &str = "Press Cmd+Enter (Mac) or Ctrl+Enter (Windows) to classify";
pub const CONFIDENCE_CAPTION: &str = "Confidence Level";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Danger,
    Safe,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    AlertTriangle,
    Shield,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SubmitButton {
    pub label: &'static str,
    pub disabled: bool,
    pub busy: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResultCard {
    pub theme: Theme,
    pub icon: Icon,
    pub headline: &'static str,
    pub reason: String,
    pub confidence_percent: i64,
    pub confidence_label: String,
    pub bar_width_percent: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderModel {
    pub submit: SubmitButton,
    pub result: Option<ResultCard>,
}

pub fn render(state: &ViewState) -> RenderModel {
    let loading = state.is_loading();
    let submit = SubmitButton {
        label: if loading {
            "Analyzing..."
        } else {
            "Classify Message"
        },
        disabled: loading || state.input.trim().is_empty(),
        busy: loading,
    };

    RenderModel {
        submit,
        result: state.result.as_ref().map(result_card),
    }
}

fn result_card(result: &ClassificationResult) -> ResultCard {
    let (theme, icon, headline) = match result.classification {
        Classification::Spam => (Theme::Danger, Icon::AlertTriangle, "⚠️ Spam Detected"),
        Classification::NotSpam => (Theme::Safe, Icon::Shield, "✓ Safe Message"),
    };
    let confidence_percent = result.confidence_percent();

    ResultCard {
        theme,
        icon,
        headline,
        reason: result.reason.clone(),
        confidence_percent,
        confidence_label: format!("{confidence_percent}%"),
        bar_width_percent: (result.confidence * 100.0).clamp(0.0, 100.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::state::ViewPhase;

    fn settled_with(classification: Classification, confidence: f64, reason: &str) -> ViewState {
        ViewState {
            input: "some message".to_string(),
            phase: ViewPhase::Classified,
            result: Some(ClassificationResult {
                classification,
                confidence,
                reason: reason.to_string(),
            }),
        }
    }

    #[test]
    fn spam_verdict_uses_danger_theme() {
        let model = render(&settled_with(
            Classification::Spam,
            0.87,
            "Contains urgency and prize claims",
        ));
        let card = model.result.unwrap();
        assert_eq!(card.theme, Theme::Danger);
        assert_eq!(card.icon, Icon::AlertTriangle);
        assert_eq!(card.headline, "⚠️ Spam Detected");
        assert_eq!(card.confidence_label, "87%");
        assert!((card.bar_width_percent - 87.0).abs() < 1e-9);
        assert_eq!(card.reason, "Contains urgency and prize claims");
    }

    #[test]
    fn not_spam_verdict_uses_safe_theme() {
        let model = render(&settled_with(
            Classification::NotSpam,
            0.42,
            "Appears to be a normal message",
        ));
        let card = model.result.unwrap();
        assert_eq!(card.theme, Theme::Safe);
        assert_eq!(card.icon, Icon::Shield);
        assert_eq!(card.confidence_label, "42%");
    }

    #[test]
    fn no_result_means_no_card() {
        let model = render(&ViewState::default());
        assert!(model.result.is_none());
    }

    #[test]
    fn submit_disabled_for_blank_input_and_while_loading() {
        let mut state = ViewState {
            input: "   \n\t".to_string(),
            ..ViewState::default()
        };
        assert!(render(&state).submit.disabled);

        state.input = "hello".to_string();
        let idle = render(&state).submit;
        assert!(!idle.disabled);
        assert!(!idle.busy);
        assert_eq!(idle.label, "Classify Message");

        state.phase = ViewPhase::Submitting;
        let busy = render(&state).submit;
        assert!(busy.disabled);
        assert!(busy.busy);
        assert_eq!(busy.label, "Analyzing...");
    }
}
