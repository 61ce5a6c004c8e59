use ratatui::prelude::*;
use ratatui::widgets::*;
use wally_types::display::{
    explorer_link, visible_fields, APP_NAME, FAILURE_NOTICE, PRIVACY_STATEMENT, PURPOSE,
    QR_CAPTION, TAGLINE,
};
use wally_types::WalletRecord;

use crate::clipboard::ClipboardWriter;
use crate::controller::Status;
use crate::display::qr_lines;
use crate::tui::app::App;
use crate::tui::theme::Theme;

/// Render the current application state
pub fn render<C: ClipboardWriter>(frame: &mut Frame, app: &App<C>) {
    let theme = Theme::default();

    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(1),    // Content
            Constraint::Length(3), // Footer
        ])
        .split(frame.area());

    render_header(frame, &theme, app, main_layout[0]);

    let state = app.controller.state();
    match (state.status(), state.wallet()) {
        (Status::Loaded, Some(wallet)) => render_wallet(
            frame,
            &theme,
            wallet,
            state.show_seed_phrase(),
            &app.explorer_url,
            main_layout[1],
        ),
        (status, _) => render_info(frame, &theme, app, status, main_layout[1]),
    }

    render_footer(frame, &theme, main_layout[2]);
}

fn render_header<C: ClipboardWriter>(frame: &mut Frame, theme: &Theme, app: &App<C>, area: Rect) {
    let status = match app.controller.state().toast() {
        Some(toast) => Span::styled(format!(" │ {}", toast.message), theme.toast_style(toast.kind)),
        None => Span::raw(""),
    };

    let title_line = Line::from(vec![
        Span::styled(APP_NAME, theme.primary_style().bold()),
        Span::styled(format!(" {}", TAGLINE), theme.text_dim_style()),
        status,
    ]);

    let header = Paragraph::new(title_line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme.primary_style()),
    );

    frame.render_widget(header, area);
}

fn render_info<C: ClipboardWriter>(
    frame: &mut Frame,
    theme: &Theme,
    app: &App<C>,
    status: Status,
    area: Rect,
) {
    let mut lines = Vec::new();

    match status {
        Status::Loading => {
            lines.push(Line::from(Span::styled(
                format!("{} Generating wallet...", app.spinner()),
                Style::default().fg(theme.info),
            )));
            lines.push(Line::from(""));
        }
        Status::Failed => {
            lines.push(Line::from(Span::styled(
                FAILURE_NOTICE,
                Style::default().fg(theme.error),
            )));
            lines.push(Line::from(""));
        }
        _ => {}
    }

    lines.push(Line::from(Span::styled(PURPOSE, theme.text_primary_style())));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(PRIVACY_STATEMENT, theme.text_dim_style())));
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("Source: ", theme.text_dim_style()),
        Span::styled(app.source_url.as_str(), theme.primary_style().underlined()),
    ]));

    let panel = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
        Block::default()
            .title(Span::styled(" About ", theme.primary_style()))
            .borders(Borders::ALL)
            .border_style(theme.primary_style()),
    );

    frame.render_widget(panel, area);
}

fn render_wallet(
    frame: &mut Frame,
    theme: &Theme,
    wallet: &WalletRecord,
    show_seed_phrase: bool,
    explorer_url: &str,
    area: Rect,
) {
    let layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    let mut lines = Vec::new();
    for field in visible_fields(show_seed_phrase) {
        lines.push(Line::from(Span::styled(field.label(), theme.text_dim_style())));
        lines.push(Line::from(Span::styled(
            wallet.field(field).to_string(),
            theme.text_primary_style(),
        )));
        lines.push(Line::from(""));
    }
    if !show_seed_phrase {
        lines.push(Line::from(Span::styled(
            "Seed phrase hidden (t to show)",
            theme.text_dim_style(),
        )));
    }
    if let Some(link) = explorer_link(explorer_url, &wallet.btc_address) {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(link, theme.primary_style().underlined())));
    }

    let fields = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .style(theme.surface_style())
        .block(
            Block::default()
                .title(Span::styled(" Wallet Data ", theme.primary_style()))
                .borders(Borders::ALL)
                .border_style(theme.primary_style()),
        );
    frame.render_widget(fields, layout[0]);

    let mut qr: Vec<Line> = qr_lines(&wallet.btc_address)
        .into_iter()
        .map(Line::from)
        .collect();
    qr.push(Line::from(Span::styled(QR_CAPTION, theme.text_dim_style())));

    let qr_panel = Paragraph::new(qr).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme.primary_style()),
    );
    frame.render_widget(qr_panel, layout[1]);
}

fn render_footer(frame: &mut Frame, theme: &Theme, area: Rect) {
    let keys = [
        ("g", "generate"),
        ("l", "learn more"),
        ("a", "copy address"),
        ("k", "copy key"),
        ("s", "copy seed"),
        ("t", "toggle seed"),
        ("q", "quit"),
    ];

    let mut spans = Vec::new();
    for (key, action) in keys {
        spans.push(Span::styled(format!(" {} ", key), theme.primary_style().bold()));
        spans.push(Span::styled(format!("{} ", action), theme.text_dim_style()));
    }

    let footer = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme.text_dim_style()),
    );

    frame.render_widget(footer, area);
}
