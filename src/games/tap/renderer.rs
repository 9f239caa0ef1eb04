use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::controller::GameView;
use super::state::Stage;

const ART_HEIGHT: u16 = 7;

/// Terminal stand-in for the image each stage selects.
pub fn stage_art(stage: Stage) -> &'static [&'static str] {
    match stage {
        Stage::Initial => &[
            "",
            "",
            "",
            "",
            "   .   ",
            "  (_)  ",
            "~~~~~~~~~",
        ],
        Stage::Median => &[
            "",
            "",
            "",
            "   \\|/  ",
            "    |   ",
            "    |   ",
            "~~~~~~~~~",
        ],
        Stage::Final => &[
            "",
            "   @@@   ",
            "  @@@@@  ",
            "   @@@   ",
            "    |    ",
            "    |    ",
            "~~~~~~~~~",
        ],
        Stage::Victory => &[
            "  ___________  ",
            " '._==_==_=_.' ",
            " .-\\:      /-. ",
            "| (|:.     |) |",
            " '-|:.     |-' ",
            "   \\::.    /   ",
            "    '::. .'    ",
        ],
        Stage::Defeat => &[
            "",
            "",
            "   ,      ",
            "    \\_    ",
            "     |    ",
            "     |    ",
            "~~~~~~~~~",
        ],
    }
}

fn stage_color(stage: Stage) -> Color {
    match stage {
        Stage::Initial => Color::Yellow,
        Stage::Median | Stage::Final => Color::Green,
        Stage::Victory => Color::Cyan,
        Stage::Defeat => Color::Red,
    }
}

pub struct TapRenderer;

impl TapRenderer {
    pub fn render(frame: &mut Frame, view: &GameView) {
        let area = frame.area();
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" tapterm ")
            .title_alignment(Alignment::Center);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [_, art, _, text, _, buttons, _, footer] = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(ART_HEIGHT),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .areas(inner);

        Self::render_art(frame, view.stage, art);

        let text_line = view.prompt.or(view.message).unwrap_or_default();
        frame.render_widget(
            Paragraph::new(text_line)
                .style(Style::default().add_modifier(Modifier::BOLD))
                .alignment(Alignment::Center),
            text,
        );

        frame.render_widget(
            Paragraph::new(Self::button_line(view)).alignment(Alignment::Center),
            buttons,
        );

        frame.render_widget(
            Paragraph::new("Esc: fechar (o jogo é salvo)")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center),
            footer,
        );
    }

    fn render_art(frame: &mut Frame, stage: Stage, area: Rect) {
        let lines: Vec<Line> = stage_art(stage).iter().map(|l| Line::from(*l)).collect();
        frame.render_widget(
            Paragraph::new(lines)
                .style(Style::default().fg(stage_color(stage)))
                .alignment(Alignment::Center),
            area,
        );
    }

    fn button_line(view: &GameView) -> Line<'static> {
        let mut spans = Vec::with_capacity(view.options.len() * 2);
        for (i, option) in view.options.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw("   "));
            }
            spans.push(Span::styled(
                format!("[{}] {}", option.hotkey().to_ascii_uppercase(), option.label),
                Style::default().add_modifier(Modifier::REVERSED),
            ));
        }
        Line::from(spans)
    }
}
