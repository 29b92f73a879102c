// UI rendering logic
//
// All the rendering code for the TUI lives here. ratatui redraws the whole
// frame on every pass, so each function below is a pure projection of App
// state onto widgets; nothing in this module mutates state.

use super::app::{App, Modal, Screen};
use crate::catalog::{clean_image_url, format_price, page_controls, PageControl, SortField};
use crate::editor::{DraftField, EditPhase};
use crate::logging::LogLevel;
use crate::tui::theme::Theme;
use crate::util::truncate_display;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, Wrap},
    Frame,
};

/// Main UI render function, called on every frame
pub fn draw(f: &mut Frame, app: &App) {
    let theme = app.theme.theme();

    // Paint the background so theme switches take over the whole terminal
    f.render_widget(
        Block::default().style(Style::default().bg(theme.bg)),
        f.area(),
    );

    match &app.screen {
        Screen::Loading => {
            render_title(f, f.area(), app, &theme);
            render_loading(f, f.area(), &theme);
        }
        Screen::Failed(message) => render_failed(f, f.area(), message, &theme),
        Screen::Table => render_table_screen(f, app, &theme),
    }

    match app.modal {
        Some(Modal::Detail) => render_detail_modal(f, app, &theme),
        Some(Modal::Logs) => render_logs_modal(f, app, &theme),
        Some(Modal::Help) => render_help_modal(f, &theme),
        None => {}
    }

    // Toast renders last so it sits on top of any modal
    if let Some(toast) = &app.toast {
        toast.render(f, f.area(), &theme);
    }
}

/// The normal screen: title, search, table, pagination, status
fn render_table_screen(f: &mut Frame, app: &App, theme: &Theme) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title bar
            Constraint::Length(3), // Search box
            Constraint::Min(5),    // Product table
            Constraint::Length(1), // Pagination bar
            Constraint::Length(3), // Status bar
        ])
        .split(f.area());

    render_title(f, chunks[0], app, theme);
    render_search(f, chunks[1], app, theme);
    render_products(f, chunks[2], app, theme);
    render_pagination(f, chunks[3], app, theme);
    render_status(f, chunks[4], app, theme);
}

fn render_title(f: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let area = Rect { height: 3.min(area.height), ..area };

    let title = Line::from(vec![
        Span::styled(
            " stockpit ",
            Style::default().fg(theme.title).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("· {} products · up {}", app.store.all_count(), app.uptime()),
            Style::default().fg(theme.muted),
        ),
    ]);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border));
    f.render_widget(Paragraph::new(title).block(block), area);
}

fn render_search(f: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let border = if app.search_active {
        theme.border_focused
    } else {
        theme.border
    };

    let content = if app.store.search_term().is_empty() && !app.search_active {
        Line::from(Span::styled(
            "press / to search by title",
            Style::default().fg(theme.muted),
        ))
    } else {
        let cursor = if app.search_active { "█" } else { "" };
        Line::from(vec![
            Span::styled(app.store.search_term().to_string(), Style::default().fg(theme.fg)),
            Span::styled(cursor, Style::default().fg(theme.accent)),
        ])
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .title(" Search ");
    f.render_widget(Paragraph::new(content).block(block), area);
}

/// Column header with the sort arrow appended when that column is sorted
fn sort_header(app: &App, field: SortField) -> String {
    match app.store.sort() {
        Some(spec) if spec.field == field => {
            format!("{} {}", field.label(), spec.direction.arrow())
        }
        _ => field.label().to_string(),
    }
}

fn render_products(f: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let page = app.store.current_page();

    if page.items.is_empty() {
        let message = if app.store.search_term().is_empty() {
            "No products to display"
        } else {
            "No products match the current search"
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border))
            .title(" Products ");
        let para = Paragraph::new(message)
            .style(Style::default().fg(theme.muted))
            .alignment(Alignment::Center)
            .block(block);
        f.render_widget(para, area);
        return;
    }

    let header = Row::new(vec![
        Cell::from("ID"),
        Cell::from(sort_header(app, SortField::Title)),
        Cell::from(sort_header(app, SortField::Price)),
        Cell::from("Category"),
        Cell::from("Images"),
    ])
    .style(
        Style::default()
            .fg(theme.table_header)
            .add_modifier(Modifier::BOLD),
    );

    // Leave the borders and a little padding out of the title budget
    let title_width = area.width.saturating_sub(34).max(12) as usize;

    let rows: Vec<Row> = page
        .items
        .iter()
        .enumerate()
        .map(|(i, product)| {
            let usable_images = product
                .images
                .iter()
                .filter(|url| clean_image_url(url).is_some())
                .count();

            let row = Row::new(vec![
                Cell::from(product.id.to_string()).style(Style::default().fg(theme.muted)),
                Cell::from(truncate_display(&product.title, title_width)),
                Cell::from(format!("${}", format_price(product.price)))
                    .style(Style::default().fg(theme.price)),
                Cell::from(product.category_name().to_string())
                    .style(Style::default().fg(product.category_kind().color())),
                Cell::from(usable_images.to_string()).style(Style::default().fg(theme.muted)),
            ]);

            if i == app.selected_row {
                row.style(
                    Style::default()
                        .bg(theme.selected_bg)
                        .fg(theme.selected_fg)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                row.style(Style::default().fg(theme.fg))
            }
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(6),  // ID
            Constraint::Min(20),    // Title
            Constraint::Length(12), // Price
            Constraint::Length(14), // Category
            Constraint::Length(6),  // Images
        ],
    )
    .header(header)
    .column_spacing(1)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border))
            .title(" Products "),
    );

    f.render_widget(table, area);
}

/// One-line pagination bar: "Showing 11-20 of 53" plus the page buttons
fn render_pagination(f: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let page = app.store.current_page();

    let mut spans = vec![Span::styled(
        format!(
            " Showing {}-{} of {}  ",
            page.start_index, page.end_index, page.total_count
        ),
        Style::default().fg(theme.muted),
    )];

    for control in page_controls(page.number, page.total_pages) {
        match control {
            PageControl::Number(n) if n == page.number => {
                spans.push(Span::styled(
                    format!("[{}]", n),
                    Style::default()
                        .fg(theme.accent)
                        .add_modifier(Modifier::BOLD),
                ));
            }
            PageControl::Number(n) => {
                spans.push(Span::styled(format!(" {} ", n), Style::default().fg(theme.fg)));
            }
            PageControl::Ellipsis => {
                spans.push(Span::styled(" … ", Style::default().fg(theme.muted)));
            }
        }
    }

    spans.push(Span::styled(
        format!("  {}/page", app.store.page_size()),
        Style::default().fg(theme.muted),
    ));

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_status(f: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let key_style = Style::default().fg(theme.accent);
    let sep_style = Style::default().fg(theme.muted);

    let mut spans = Vec::new();
    let keys: &[(&str, &str)] = if app.search_active {
        &[("Esc", "clear"), ("Enter", "keep")]
    } else {
        &[
            ("/", "search"),
            ("t/p", "sort"),
            ("Enter", "detail"),
            ("x", "export"),
            ("?", "help"),
            ("q", "quit"),
        ]
    };
    for (i, (key, desc)) in keys.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" │ ", sep_style));
        }
        spans.push(Span::styled(*key, key_style));
        spans.push(Span::styled(format!(" {}", desc), Style::default().fg(theme.fg)));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border));
    f.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

fn render_loading(f: &mut Frame, area: Rect, theme: &Theme) {
    let rect = centered_rect(40, 5, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border));
    let para = Paragraph::new("Loading products…")
        .style(Style::default().fg(theme.fg))
        .alignment(Alignment::Center)
        .block(block);
    f.render_widget(Clear, rect);
    f.render_widget(para, rect);
}

/// Blocking full-screen error; no stale table is shown behind it
fn render_failed(f: &mut Frame, area: Rect, message: &str, theme: &Theme) {
    let rect = centered_rect(60.min(area.width), 8, area);
    let content = Text::from(vec![
        Line::raw(""),
        Line::from(Span::styled(
            "Failed to load products",
            Style::default().fg(theme.error).add_modifier(Modifier::BOLD),
        )),
        Line::raw(""),
        Line::from(Span::styled(message.to_string(), Style::default().fg(theme.fg))),
        Line::raw(""),
        Line::from(Span::styled("r retry · q quit", Style::default().fg(theme.muted))),
    ]);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.error))
        .title(" Error ");
    f.render_widget(Clear, rect);
    f.render_widget(
        Paragraph::new(content)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(block),
        rect,
    );
}

// ── detail / edit modal ─────────────────────────────────────────────────

fn render_detail_modal(f: &mut Frame, app: &App, theme: &Theme) {
    let Some(session) = &app.session else {
        return;
    };
    let Some(product) = app.store.find(session.product_id) else {
        return;
    };

    let width = 64.min(f.area().width.saturating_sub(4));
    let height = 18.min(f.area().height.saturating_sub(2));
    let area = centered_rect(width, height, f.area());

    f.render_widget(Clear, area);

    match session.phase {
        EditPhase::Viewing => {
            let mut lines = vec![
                field_line("ID", product.id.to_string(), theme),
                field_line("Title", product.title.clone(), theme),
                field_line("Price", format!("${}", format_price(product.price)), theme),
                Line::from(vec![
                    Span::styled(format!("{:<13}", "Category"), Style::default().fg(theme.muted)),
                    Span::styled(
                        product.category_name().to_string(),
                        Style::default().fg(product.category_kind().color()),
                    ),
                ]),
                field_line("Description", product.description.clone(), theme),
                Line::raw(""),
            ];

            // At most three usable image URLs, junk characters stripped
            let images: Vec<String> = product
                .images
                .iter()
                .filter_map(|url| clean_image_url(url))
                .take(3)
                .collect();
            if images.is_empty() {
                lines.push(Line::from(Span::styled(
                    "No images",
                    Style::default().fg(theme.muted),
                )));
            } else {
                lines.push(Line::from(Span::styled(
                    "Images",
                    Style::default().fg(theme.muted),
                )));
                for url in images {
                    lines.push(Line::from(Span::styled(
                        format!("  {}", truncate_display(&url, width.saturating_sub(6) as usize)),
                        Style::default().fg(theme.accent),
                    )));
                }
            }

            lines.push(Line::raw(""));
            lines.push(Line::from(Span::styled(
                "e edit · y copy JSON · Esc close",
                Style::default().fg(theme.muted),
            )));

            let block = Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.border_focused))
                .title(format!(" Product {} ", product.id));
            f.render_widget(
                Paragraph::new(Text::from(lines)).wrap(Wrap { trim: false }).block(block),
                area,
            );
        }
        EditPhase::Editing | EditPhase::Saving => {
            render_edit_form(f, area, app, theme);
        }
    }
}

fn field_line(label: &str, value: String, theme: &Theme) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:<13}", label), Style::default().fg(theme.muted)),
        Span::styled(value, Style::default().fg(theme.fg)),
    ])
}

fn render_edit_form(f: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let Some(session) = &app.session else {
        return;
    };
    let Some(draft) = &session.draft else {
        return;
    };
    let saving = session.is_saving();

    let mut lines = Vec::new();
    let fields = [
        (DraftField::Title, draft.title.as_str()),
        (DraftField::Price, draft.price.as_str()),
        (DraftField::Description, draft.description.as_str()),
    ];

    for (field, value) in fields {
        let focused = !saving && session.focus == field;
        let label_style = if focused {
            Style::default()
                .fg(theme.border_focused)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.muted)
        };
        let cursor = if focused { "█" } else { "" };
        lines.push(Line::from(vec![
            Span::styled(format!("{:<13}", field.label()), label_style),
            Span::styled(value.to_string(), Style::default().fg(theme.fg)),
            Span::styled(cursor, Style::default().fg(theme.accent)),
        ]));
        lines.push(Line::raw(""));
    }

    if let Some(error) = &session.error {
        lines.push(Line::from(Span::styled(
            error.clone(),
            Style::default().fg(theme.error),
        )));
        lines.push(Line::raw(""));
    }

    let footer = if saving {
        Span::styled("Saving…", Style::default().fg(theme.warning))
    } else {
        Span::styled(
            "Tab next field · Enter save · Esc cancel",
            Style::default().fg(theme.muted),
        )
    };
    lines.push(Line::from(footer));

    let border = if saving { theme.warning } else { theme.border_focused };
    let title = if saving {
        format!(" Product {} (saving) ", session.product_id)
    } else {
        format!(" Edit product {} ", session.product_id)
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .title(title);
    f.render_widget(
        Paragraph::new(Text::from(lines)).wrap(Wrap { trim: false }).block(block),
        area,
    );
}

// ── logs modal ──────────────────────────────────────────────────────────

fn render_logs_modal(f: &mut Frame, app: &App, theme: &Theme) {
    let width = f.area().width.saturating_sub(8);
    let height = f.area().height.saturating_sub(4);
    let area = centered_rect(width, height, f.area());

    f.render_widget(Clear, area);

    let entries = app.log_buffer.get_all();
    let visible = area.height.saturating_sub(2) as usize;

    // Scroll offset counts back from the newest entry
    let end = entries.len().saturating_sub(app.logs_scroll);
    let start = end.saturating_sub(visible);

    let lines: Vec<Line> = entries[start..end]
        .iter()
        .map(|entry| {
            let level_color = match entry.level {
                LogLevel::Error => theme.error,
                LogLevel::Warn => theme.warning,
                LogLevel::Info => theme.success,
                LogLevel::Debug | LogLevel::Trace => theme.muted,
            };
            Line::from(vec![
                Span::styled(
                    entry.timestamp.format("%H:%M:%S ").to_string(),
                    Style::default().fg(theme.muted),
                ),
                Span::styled(
                    format!("{:<5} ", entry.level.as_str()),
                    Style::default().fg(level_color),
                ),
                Span::styled(entry.message.clone(), Style::default().fg(theme.fg)),
            ])
        })
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border_focused))
        .title(format!(" Logs ({}) · ↑/↓ scroll · Esc close ", entries.len()));
    f.render_widget(Paragraph::new(Text::from(lines)).block(block), area);
}

// ── help modal ──────────────────────────────────────────────────────────

fn render_help_modal(f: &mut Frame, theme: &Theme) {
    let width = 54.min(f.area().width.saturating_sub(4));
    let height = 20.min(f.area().height.saturating_sub(2));
    let area = centered_rect(width, height, f.area());

    f.render_widget(Clear, area);

    let key_style = Style::default().fg(theme.accent);
    let desc_style = Style::default().fg(theme.fg);
    let header_style = Style::default()
        .fg(theme.title)
        .add_modifier(Modifier::BOLD);

    // Helper to create a keybind line: "  key        description"
    let kb = |key: &str, desc: &str| -> Line {
        Line::from(vec![
            Span::raw("  "),
            Span::styled(format!("{:<11}", key), key_style),
            Span::styled(desc.to_string(), desc_style),
        ])
    };

    let content = Text::from(vec![
        Line::from(Span::styled(" Table", header_style)),
        kb("↑/↓", "move selection"),
        kb("←/→", "previous / next page"),
        kb("+/-", "rows per page"),
        kb("t", "sort by title"),
        kb("p", "sort by price"),
        kb("/", "search by title"),
        kb("Enter", "open product detail"),
        Line::raw(""),
        Line::from(Span::styled(" Actions", header_style)),
        kb("e", "edit (from detail)"),
        kb("x", "export view as CSV"),
        kb("y", "copy product JSON"),
        kb("r", "reload from server"),
        Line::raw(""),
        Line::from(Span::styled(" App", header_style)),
        kb("T", "cycle theme"),
        kb("v", "view logs"),
        kb("q", "quit"),
    ]);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border_focused))
        .title(" Help ");
    f.render_widget(Paragraph::new(content).block(block), area);
}

/// Calculate centered rect for modal dialogs
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}
