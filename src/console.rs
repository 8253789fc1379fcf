use std::{
    fmt::Write,
    io::{self, BufRead},
    thread,
};

use tokio::sync::mpsc;

use crate::view::{
    render::{
        CONFIDENCE_CAPTION, INPUT_LABEL, PLACEHOLDER, SHORTCUT_HINT, TAGLINE, TITLE, Theme,
    },
    RenderModel, ResultCard,
};

const BAR_CELLS: usize = 20;
const CHORD_MARKER: &str = "^Enter";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Classify,
    Clear,
    Quit,
    Append(String),
    AppendThenChord(String),
}

pub fn parse_line(line: &str) -> Command {
    match line.trim() {
        ":classify" | ":c" => return Command::Classify,
        ":clear" => return Command::Clear,
        ":quit" | ":q" => return Command::Quit,
        _ => {}
    }
    match line.strip_suffix(CHORD_MARKER) {
        Some(rest) => Command::AppendThenChord(rest.to_string()),
        None => Command::Append(line.to_string()),
    }
}

/// Reads lines on a plain OS thread so a pending read never holds up runtime
/// shutdown. The receiver yields `None` at EOF.
pub fn spawn_line_reader<R>(reader: R) -> mpsc::UnboundedReceiver<io::Result<String>>
where
    R: BufRead + Send + 'static,
{
    let (sender, receiver) = mpsc::unbounded_channel();
    let spawned = thread::Builder::new()
        .name("console-input".to_string())
        .spawn(move || {
            for line in reader.lines() {
                let failed = line.is_err();
                if sender.send(line).is_err() || failed {
                    break;
                }
            }
        });
    if let Err(err) = spawned {
        tracing::error!(target: "console", error = %err, "failed to start input reader");
    }
    receiver
}

pub fn header() -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{TITLE}");
    let _ = writeln!(out, "{TAGLINE}");
    let _ = writeln!(out);
    let _ = writeln!(out, "{INPUT_LABEL}");
    for line in PLACEHOLDER.lines() {
        let _ = writeln!(out, "  {line}");
    }
    let _ = writeln!(out, "{SHORTCUT_HINT}");
    let _ = writeln!(out, "(type the message, then `:classify`; end a line with `{CHORD_MARKER}` to send it; `:clear`, `:quit`)");
    out
}

pub fn draw(model: &RenderModel) -> String {
    let mut out = String::new();
    let marker = if model.submit.disabled { "[-]" } else { "[>]" };
    let _ = writeln!(out, "{marker} {}", model.submit.label);
    if let Some(card) = &model.result {
        draw_card(&mut out, card);
    }
    out
}

fn draw_card(out: &mut String, card: &ResultCard) {
    let icon = match card.theme {
        Theme::Danger => "(!)",
        Theme::Safe => "(+)",
    };
    let _ = writeln!(out, "{icon} {}  [{} confident]", card.headline, card.confidence_label);
    let _ = writeln!(out, "    {}", card.reason);
    let _ = writeln!(out, "    {CONFIDENCE_CAPTION}: {}", card.confidence_label);
    let _ = writeln!(out, "    {}", bar(card.bar_width_percent, card.theme));
}

fn bar(width_percent: f64, theme: Theme) -> String {
    let filled = ((width_percent / 100.0) * BAR_CELLS as f64).round() as usize;
    let filled = filled.min(BAR_CELLS);
    let fill = match theme {
        Theme::Danger => '#',
        Theme::Safe => '=',
    };
    format!(
        "[{}{}]",
        fill.to_string().repeat(filled),
        ".".repeat(BAR_CELLS - filled)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::{render::Icon, render::SubmitButton};

    #[test]
    fn parse_line_recognises_commands_and_chord() {
        assert_eq!(parse_line(":classify"), Command::Classify);
        assert_eq!(parse_line("  :c "), Command::Classify);
        assert_eq!(parse_line(":quit"), Command::Quit);
        assert_eq!(
            parse_line("win big now^Enter"),
            Command::AppendThenChord("win big now".to_string())
        );
        assert_eq!(
            parse_line("  indented text"),
            Command::Append("  indented text".to_string())
        );
    }

    #[test]
    fn header_shows_placeholder_and_shortcut_hint() {
        let text = header();
        assert!(text.starts_with("Spam Classifier\n"));
        assert!(text.contains("  Paste your email or message here..."));
        assert!(text.contains("  Try something like: 'URGENT! You've won $1,000,000!"));
        assert!(text.contains("Press Cmd+Enter (Mac) or Ctrl+Enter (Windows) to classify"));
    }

    #[tokio::test]
    async fn line_reader_forwards_lines_then_closes() {
        let input = io::Cursor::new("first line\nwin big^Enter\n");
        let mut lines = spawn_line_reader(input);

        assert_eq!(lines.recv().await.unwrap().unwrap(), "first line");
        assert_eq!(lines.recv().await.unwrap().unwrap(), "win big^Enter");
        assert!(lines.recv().await.is_none());
    }

    #[test]
    fn draw_spam_card() {
        let model = RenderModel {
            submit: SubmitButton {
                label: "Classify Message",
                disabled: false,
                busy: false,
            },
            result: Some(ResultCard {
                theme: Theme::Danger,
                icon: Icon::AlertTriangle,
                headline: "⚠️ Spam Detected",
                reason: "Contains urgency and prize claims".to_string(),
                confidence_percent: 87,
                confidence_label: "87%".to_string(),
                bar_width_percent: 87.0,
            }),
        };
        let text = draw(&model);
        assert!(text.contains("[87% confident]"));
        assert!(text.contains("Contains urgency and prize claims"));
        assert!(text.contains(&format!("[{}{}]", "#".repeat(17), ".".repeat(3))));
    }

    #[test]
    fn draw_without_result_only_shows_button() {
        let model = RenderModel {
            submit: SubmitButton {
                label: "Classify Message",
                disabled: true,
                busy: false,
            },
            result: None,
        };
        assert_eq!(draw(&model), "[-] Classify Message\n");
    }
}
