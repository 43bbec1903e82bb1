use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState, Tabs},
};

use crate::{
    app::{
        app::Tab,
        utils::{format_brl, format_date, format_rate},
        wallet::{Wallet, WalletSnapshot},
    },
    models::DisplayableInvestment,
};

/// Row order shown on the wallet tab: active positions most recent first,
/// then history most recent first. Key handling relies on the same order.
pub fn wallet_rows(snapshot: &WalletSnapshot) -> Vec<&DisplayableInvestment> {
    snapshot
        .active()
        .iter()
        .rev()
        .chain(snapshot.history().iter().rev())
        .collect()
}

#[allow(clippy::too_many_arguments)]
pub fn render(
    frame: &mut Frame,
    wallet: &Wallet,
    tab: Tab,
    table_state: &mut TableState,
    input: &Option<String>,
    popup_message: &Option<String>,
    error_popup: &Option<String>,
    loading: bool,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(frame.area());

    let tabs = Tabs::new(vec!["Wallet", "Assets"])
        .select(match tab {
            Tab::Wallet => 0,
            Tab::Assets => 1,
        })
        .highlight_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .block(
            Block::default()
                .title("Investment Wallet")
                .borders(Borders::ALL),
        );
    frame.render_widget(tabs, chunks[0]);

    render_summary(frame, wallet, loading, chunks[1]);

    match wallet.snapshot() {
        None => {
            let message = if loading {
                "Loading wallet data..."
            } else {
                "No wallet data. Press 'r' to refresh."
            };
            let empty = Paragraph::new(message)
                .style(Style::default().fg(Color::Yellow))
                .block(Block::default().borders(Borders::ALL));
            frame.render_widget(empty, chunks[2]);
        }
        Some(snapshot) => match tab {
            Tab::Wallet => render_wallet_table(frame, snapshot, table_state, chunks[2]),
            Tab::Assets => render_assets_table(frame, snapshot, table_state, chunks[2]),
        },
    }

    render_footer(frame, input, chunks[3]);

    if let Some(message) = popup_message {
        render_popup(frame, message, Color::Green);
    }
    if let Some(message) = error_popup {
        render_popup(frame, message, Color::Red);
    }
}

fn render_summary(frame: &mut Frame, wallet: &Wallet, loading: bool, area: Rect) {
    let text = match wallet.snapshot() {
        Some(snapshot) => {
            let summary = snapshot.summary();
            format!(
                "Total: {}   Future: {}   Investments: {}{}",
                format_brl(summary.total_balance()),
                format_brl(summary.future_balance()),
                summary.investment_count(),
                if loading { "   (refreshing...)" } else { "" },
            )
        }
        None => String::from("-"),
    };

    let summary = Paragraph::new(text)
        .style(Style::default().fg(Color::Cyan))
        .block(Block::default().title("Summary").borders(Borders::ALL));
    frame.render_widget(summary, area);
}

fn render_wallet_table(
    frame: &mut Frame,
    snapshot: &WalletSnapshot,
    table_state: &mut TableState,
    area: Rect,
) {
    let rows_data = wallet_rows(snapshot);

    if rows_data.is_empty() {
        let empty = Paragraph::new("No investments yet. Invest from the Assets tab.")
            .style(Style::default().fg(Color::Yellow))
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(empty, area);
        return;
    }

    let header_cells = [
        "Asset", "Bank", "Type", "Value", "Expected", "Profit", "Return", "Purchased",
        "Maturity", "Status",
    ]
    .iter()
    .map(|h| Cell::from(*h).style(Style::default().fg(Color::Yellow)));
    let header = Row::new(header_cells).height(1);

    let rows = rows_data.iter().map(|investment| {
        let row_style = if *investment.is_history() {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default()
        };
        let profit_color = if *investment.is_history() {
            Color::DarkGray
        } else {
            Color::Green
        };
        let status = if *investment.is_history() {
            "Withdrawn"
        } else {
            "Active"
        };

        let cells = [
            Cell::from(investment.asset_name().to_string()),
            Cell::from(investment.asset_subtitle().to_string()),
            Cell::from(investment.asset_type().to_string()),
            Cell::from(format_brl(investment.value())),
            Cell::from(format_brl(investment.expected_return())),
            Cell::from(format_brl(investment.return_profit()))
                .style(Style::default().fg(profit_color)),
            Cell::from(investment.return_percentage().to_string())
                .style(Style::default().fg(profit_color)),
            Cell::from(format_date(investment.investment_date())),
            Cell::from(format_date(investment.maturity_date())),
            Cell::from(status),
        ];

        Row::new(cells).style(row_style).height(1)
    });

    let widths = [
        Constraint::Length(24),
        Constraint::Length(18),
        Constraint::Length(14),
        Constraint::Length(14),
        Constraint::Length(14),
        Constraint::Length(12),
        Constraint::Length(10),
        Constraint::Length(12),
        Constraint::Length(12),
        Constraint::Length(10),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().title("Positions").borders(Borders::ALL))
        .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED));

    frame.render_stateful_widget(table, area, table_state);
}

fn render_assets_table(
    frame: &mut Frame,
    snapshot: &WalletSnapshot,
    table_state: &mut TableState,
    area: Rect,
) {
    let header_cells = ["Name", "Type", "Profitability", "Maturity", "Minimum", "Description"]
        .iter()
        .map(|h| Cell::from(*h).style(Style::default().fg(Color::Yellow)));
    let header = Row::new(header_cells).height(1);

    let rows = snapshot.assets().iter().map(|asset| {
        let minimum = asset
            .minimum_value()
            .as_ref()
            .map(format_brl)
            .unwrap_or_else(|| String::from("-"));
        let description = asset.description().clone().unwrap_or_default();

        let cells = [
            Cell::from(asset.name().to_string()),
            Cell::from(asset.asset_type().to_string()),
            Cell::from(format_rate(asset.profitability()))
                .style(Style::default().fg(Color::Green)),
            Cell::from(format_date(asset.maturity_date())),
            Cell::from(minimum),
            Cell::from(description),
        ];

        Row::new(cells).height(1)
    });

    let widths = [
        Constraint::Length(24),
        Constraint::Length(14),
        Constraint::Length(14),
        Constraint::Length(12),
        Constraint::Length(14),
        Constraint::Min(20),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .title("Available Assets")
                .borders(Borders::ALL),
        )
        .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED));

    frame.render_stateful_widget(table, area, table_state);
}

fn render_footer(frame: &mut Frame, input: &Option<String>, area: Rect) {
    let footer = match input {
        Some(amount) => Paragraph::new(format!(
            "New investment amount: {}  (Enter to confirm, Esc to cancel)",
            amount
        ))
        .style(Style::default().fg(Color::Cyan)),
        None => Paragraph::new(
            "q quit | Tab switch | Up/Down select | r refresh | i invest | w withdraw | x remove",
        ),
    };
    frame.render_widget(footer.block(Block::default().borders(Borders::ALL)), area);
}

fn render_popup(frame: &mut Frame, message: &str, color: Color) {
    let area = centered_rect(60, 20, frame.area());
    let popup = Paragraph::new(message)
        .style(Style::default().fg(color))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(Clear, area);
    frame.render_widget(popup, area);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
