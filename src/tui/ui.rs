//! Rendering and the terminal main loop.

use super::{handle_key_event, App, Event, EventHandler, Tab};
use crate::model::SeverityTier;
use crate::reports::HumanReport;
use crate::scoring::RiskLevel;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Cell, Gauge, List, ListItem, ListState, Paragraph, Row, Table, Tabs, Wrap},
    Frame, Terminal,
};
use std::io::{self, stdout};

const ACCENT: Color = Color::Cyan;
const MUTED: Color = Color::DarkGray;

/// Run the viewer until the user quits.
pub fn run_tui(report: HumanReport) -> io::Result<()> {
    let mut app = App::new(report);

    enable_raw_mode()?;
    let mut terminal = match enter_terminal() {
        Ok(terminal) => terminal,
        Err(e) => {
            let _ = execute!(stdout(), LeaveAlternateScreen);
            let _ = disable_raw_mode();
            return Err(e);
        }
    };

    let events = EventHandler::default();

    let result = (|| -> io::Result<()> {
        loop {
            terminal.draw(|frame| render(frame, &app))?;

            match events.next()? {
                Event::Key(key) => handle_key_event(&mut app, key),
                Event::Resize(_, _) | Event::Tick => {}
            }

            if app.should_quit {
                return Ok(());
            }
        }
    })();

    // Every restore step runs even if an earlier one fails
    let restored = [
        disable_raw_mode(),
        execute!(terminal.backend_mut(), LeaveAlternateScreen),
        terminal.show_cursor(),
    ];

    finish(result, restored)
}

fn enter_terminal() -> io::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    Terminal::new(CrosstermBackend::new(stdout))
}

/// The loop's error wins; otherwise the first failed restore step.
fn finish(run: io::Result<()>, restored: [io::Result<()>; 3]) -> io::Result<()> {
    run?;
    restored.into_iter().collect()
}

/// Draw one frame.
pub fn render(frame: &mut Frame, app: &App) {
    let [header, tabs, body, footer] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(2),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    render_header(frame, header, &app.report);
    render_tabs(frame, tabs, app);

    match app.active_tab {
        Tab::Overview => render_overview(frame, body, &app.report),
        Tab::Permissions => render_permissions(frame, body, app),
        tab => {
            if let Some(tier) = tab.tier() {
                render_findings(frame, body, app, tier);
            }
        }
    }

    render_footer(frame, footer);
}

pub(crate) const fn tier_color(tier: SeverityTier) -> Color {
    match tier {
        SeverityTier::High => Color::Red,
        SeverityTier::Medium => Color::Yellow,
        SeverityTier::Info => Color::LightBlue,
    }
}

const fn risk_color(level: RiskLevel) -> Color {
    match level {
        RiskLevel::Low => Color::Green,
        RiskLevel::Moderate => Color::Yellow,
        RiskLevel::Elevated | RiskLevel::Severe => Color::Red,
    }
}

fn render_header(frame: &mut Frame, area: Rect, report: &HumanReport) {
    let line = Line::from(vec![
        Span::styled(" Mobile App Security Report ", Style::default().fg(ACCENT).bold()),
        Span::styled("│ ", Style::default().fg(MUTED)),
        Span::raw(report.metadata.app_name.clone()),
        Span::styled(" │ ", Style::default().fg(MUTED)),
        Span::styled(
            format!("Score {}/100 ({})", report.summary.score, report.risk_level.label()),
            Style::default().fg(risk_color(report.risk_level)).bold(),
        ),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_tabs(frame: &mut Frame, area: Rect, app: &App) {
    let titles: Vec<Line> = Tab::ALL
        .iter()
        .enumerate()
        .map(|(idx, tab)| {
            let style = if *tab == app.active_tab {
                Style::default().fg(ACCENT).bold()
            } else {
                Style::default().fg(MUTED)
            };
            let count = match tab {
                Tab::Overview => String::new(),
                other => format!(" ({})", app.item_count(*other)),
            };
            Line::from(vec![
                Span::styled(format!("[{}]", idx + 1), style),
                Span::styled(format!(" {}{count} ", tab.title()), style),
            ])
        })
        .collect();

    let tabs = Tabs::new(titles)
        .block(Block::default().borders(Borders::BOTTOM))
        .highlight_style(Style::default().add_modifier(Modifier::BOLD))
        .select(app.active_tab.index())
        .divider(Span::styled(" │ ", Style::default().fg(MUTED)));

    frame.render_widget(tabs, area);
}

fn render_overview(frame: &mut Frame, area: Rect, report: &HumanReport) {
    let [meta_area, score_area, counts_area] = Layout::vertical([
        Constraint::Length(10),
        Constraint::Length(3),
        Constraint::Min(0),
    ])
    .areas(area);

    let meta = &report.metadata;
    let rows = [
        ("App name", &meta.app_name),
        ("File name", &meta.file_name),
        ("Size", &meta.size),
        ("Package", &meta.package_name),
        ("Version", &meta.version_name),
        ("Target SDK", &meta.target_sdk),
        ("Min SDK", &meta.min_sdk),
        ("Hash", &meta.hash),
    ]
    .into_iter()
    .map(|(label, value)| {
        Row::new(vec![
            Cell::from(label).style(Style::default().fg(MUTED)),
            Cell::from(value.as_str()),
        ])
    });
    let table = Table::new(rows, [Constraint::Length(12), Constraint::Min(10)])
        .block(Block::bordered().title(" Application "));
    frame.render_widget(table, meta_area);

    let gauge = Gauge::default()
        .block(Block::bordered().title(" Security score "))
        .gauge_style(Style::default().fg(risk_color(report.risk_level)))
        .percent(u16::try_from(report.summary.score.min(100)).unwrap_or(100))
        .label(format!(
            "{}/100 ({})",
            report.summary.score,
            report.risk_level.label()
        ));
    frame.render_widget(gauge, score_area);

    let mut lines: Vec<Line> = SeverityTier::ALL
        .iter()
        .map(|tier| {
            Line::from(vec![
                Span::styled(
                    format!("{:<8}", tier.label()),
                    Style::default().fg(tier_color(*tier)).bold(),
                ),
                Span::raw(report.summary.count(*tier).to_string()),
            ])
        })
        .collect();
    lines.push(Line::from(vec![
        Span::styled(format!("{:<8}", "Perms"), Style::default().fg(MUTED).bold()),
        Span::raw(report.permissions.len().to_string()),
    ]));
    frame.render_widget(
        Paragraph::new(lines).block(Block::bordered().title(" Findings ")),
        counts_area,
    );
}

fn render_findings(frame: &mut Frame, area: Rect, app: &App, tier: SeverityTier) {
    let Some(section) = app.report.section(tier) else {
        return;
    };
    let color = tier_color(tier);

    if section.findings.is_empty() {
        let empty = Paragraph::new(section.empty_message)
            .style(Style::default().fg(MUTED))
            .block(Block::bordered().title(format!(" {} ", section.heading())));
        frame.render_widget(empty, area);
        return;
    }

    let [list_area, detail_area] =
        Layout::horizontal([Constraint::Percentage(40), Constraint::Percentage(60)]).areas(area);

    let items: Vec<ListItem> = section
        .findings
        .iter()
        .map(|finding| ListItem::new(finding.title.clone()))
        .collect();
    let list = List::new(items)
        .block(
            Block::bordered()
                .title(format!(" {} ", section.heading()))
                .border_style(Style::default().fg(color)),
        )
        .highlight_style(Style::default().fg(color).add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    let mut state = ListState::default().with_selected(Some(app.selected()));
    frame.render_stateful_widget(list, list_area, &mut state);

    let Some(finding) = section.findings.get(app.selected()) else {
        return;
    };
    let mut text = Text::default();
    text.push_line(Line::from(Span::styled(finding.title.clone(), Style::default().bold())));
    text.push_line(Line::from(vec![
        Span::styled("Severity: ", Style::default().fg(MUTED)),
        Span::styled(finding.raw_severity.clone(), Style::default().fg(color)),
    ]));
    if !finding.path.is_empty() {
        text.push_line(Line::from(vec![
            Span::styled("Path: ", Style::default().fg(MUTED)),
            Span::raw(finding.path.clone()),
        ]));
    }
    text.push_line(Line::default());
    text.push_line(Line::raw(finding.description.clone()));
    if tier != SeverityTier::Info {
        text.push_line(Line::default());
        text.push_line(Line::from(Span::styled("Fix", Style::default().fg(ACCENT).bold())));
        text.push_line(Line::raw(finding.remediation.clone()));
    }

    let detail = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .block(Block::bordered().title(" Details "));
    frame.render_widget(detail, detail_area);
}

fn render_permissions(frame: &mut Frame, area: Rect, app: &App) {
    let permissions = &app.report.permissions;
    if permissions.is_empty() {
        let empty = Paragraph::new("No dangerous permissions found.")
            .style(Style::default().fg(MUTED))
            .block(Block::bordered().title(" Dangerous permissions (0) "));
        frame.render_widget(empty, area);
        return;
    }

    let [list_area, detail_area] =
        Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]).areas(area);

    let items: Vec<ListItem> = permissions
        .iter()
        .map(|perm| ListItem::new(perm.name.clone()))
        .collect();
    let list = List::new(items)
        .block(Block::bordered().title(format!(" Dangerous permissions ({}) ", permissions.len())))
        .highlight_style(Style::default().fg(Color::Red).add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    let mut state = ListState::default().with_selected(Some(app.selected()));
    frame.render_stateful_widget(list, list_area, &mut state);

    if let Some(perm) = permissions.get(app.selected()) {
        let detail = Paragraph::new(perm.info.clone())
            .wrap(Wrap { trim: true })
            .block(Block::bordered().title(" Details "));
        frame.render_widget(detail, detail_area);
    }
}

fn render_footer(frame: &mut Frame, area: Rect) {
    let hints = Line::from(vec![
        Span::styled("j/k", Style::default().fg(ACCENT)),
        Span::raw(" move  "),
        Span::styled("Tab/1-5", Style::default().fg(ACCENT)),
        Span::raw(" switch  "),
        Span::styled("q", Style::default().fg(ACCENT)),
        Span::raw(" quit"),
    ]);
    frame.render_widget(Paragraph::new(hints).style(Style::default().fg(MUTED)), area);
}
