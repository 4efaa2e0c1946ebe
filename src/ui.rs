use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use lodging_insights::charts::{BoxSummary, DateSpan, HistogramBin, LabeledValue, LinePoint, PieSlice, ScatterSeries};
use lodging_insights::{CleanedTable, Figure, FigureData};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{Axis, BarChart, Block, Borders, Cell, Chart, Dataset, GraphType, Paragraph, Row, Table, TableState},
    Frame, Terminal,
};
use std::io;

const SERIES_COLORS: [Color; 5] = [Color::Cyan, Color::Gray, Color::Yellow, Color::Magenta, Color::Green];

pub struct App {
    pub figures: Vec<Figure>,
    pub table: CleanedTable,
    /// 0..figures.len() are figures, the last page is the table
    pub page: usize,
    pub state: TableState,
}

impl App {
    pub fn new(figures: Vec<Figure>, table: CleanedTable) -> Self {
        let mut state = TableState::default();
        if !table.is_empty() {
            state.select(Some(0));
        }

        Self {
            figures,
            table,
            page: 0,
            state,
        }
    }

    pub fn page_count(&self) -> usize {
        self.figures.len() + 1
    }

    pub fn on_table_page(&self) -> bool {
        self.page == self.figures.len()
    }

    pub fn current_figure(&self) -> Option<&Figure> {
        self.figures.get(self.page)
    }

    pub fn next_page(&mut self) {
        self.page = (self.page + 1) % self.page_count();
    }

    pub fn previous_page(&mut self) {
        self.page = (self.page + self.page_count() - 1) % self.page_count();
    }

    pub fn page_title(&self) -> String {
        match self.current_figure() {
            Some(figure) => figure.title.clone(),
            None => "Cleaned Table".to_string(),
        }
    }

    pub fn next_row(&mut self) {
        let len = self.table.len();
        if len == 0 {
            return;
        }
        let i = match self.state.selected() {
            Some(i) if i + 1 < len => i + 1,
            _ => 0,
        };
        self.state.select(Some(i));
    }

    pub fn previous_row(&mut self) {
        let len = self.table.len();
        if len == 0 {
            return;
        }
        let i = match self.state.selected() {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };
        self.state.select(Some(i));
    }
}

pub fn run_ui(app: &mut App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res?;
    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                KeyCode::Tab if key.modifiers.contains(KeyModifiers::SHIFT) => app.previous_page(),
                KeyCode::Tab | KeyCode::Right => app.next_page(),
                KeyCode::BackTab | KeyCode::Left => app.previous_page(),
                KeyCode::Down | KeyCode::Char('j') => app.next_row(),
                KeyCode::Up | KeyCode::Char('k') => app.previous_row(),
                _ => {}
            }
        }
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Figure or table
            Constraint::Length(3), // Status bar
        ])
        .split(f.size());

    render_header(f, chunks[0], app);

    match app.current_figure().cloned() {
        Some(figure) => render_figure(f, chunks[1], &figure),
        None => render_table(f, chunks[1], app),
    }

    render_status_bar(f, chunks[2], app);
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let spans = vec![
        Span::styled(
            app.page_title(),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  |  "),
        Span::styled(
            format!("Page {}/{}", app.page + 1, app.page_count()),
            Style::default().fg(Color::DarkGray),
        ),
        Span::raw("  |  "),
        Span::styled(format!("Rows: {}", app.table.len()), Style::default().fg(Color::White)),
    ];

    let header = Paragraph::new(vec![Line::from(spans)])
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(Color::Cyan)));

    f.render_widget(header, area);
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![
        Span::styled("Tab/→", Style::default().fg(Color::Yellow)),
        Span::raw(" Next | "),
        Span::styled("Shift-Tab/←", Style::default().fg(Color::Yellow)),
        Span::raw(" Previous | "),
    ];
    if app.on_table_page() {
        spans.push(Span::styled("↑/↓", Style::default().fg(Color::Yellow)));
        spans.push(Span::raw(" Rows | "));
    }
    spans.push(Span::styled("q", Style::default().fg(Color::Red)));
    spans.push(Span::raw(" Quit"));

    let status_bar = Paragraph::new(vec![Line::from(spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White)),
    );

    f.render_widget(status_bar, area);
}

fn figure_block(figure: &Figure) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::White))
        .title(format!(" {} ", figure.title))
}

fn render_figure(f: &mut Frame, area: Rect, figure: &Figure) {
    match &figure.data {
        FigureData::Bar { bars } => render_bars(f, area, figure, bars),
        FigureData::Histogram { bins } => render_histogram(f, area, figure, bins),
        FigureData::Pie { slices } => render_pie(f, area, figure, slices),
        FigureData::Box { groups } => render_boxplot(f, area, figure, groups),
        FigureData::Line { points, highlight } => render_line(f, area, figure, points, highlight.as_ref()),
        FigureData::Scatter { series, .. } => render_scatter(f, area, figure, series),
        FigureData::Heatmap { rows, columns, counts } => render_heatmap(f, area, figure, rows, columns, counts),
    }
}

fn render_bar_values(f: &mut Frame, area: Rect, figure: &Figure, values: &[(String, u64)], color: Color) {
    let data: Vec<(&str, u64)> = values.iter().map(|(label, v)| (label.as_str(), *v)).collect();

    let chart = BarChart::default()
        .block(figure_block(figure))
        .data(&data)
        .bar_width(12)
        .bar_gap(2)
        .bar_style(Style::default().fg(color))
        .value_style(Style::default().fg(Color::Black).bg(color));

    f.render_widget(chart, area);
}

fn render_bars(f: &mut Frame, area: Rect, figure: &Figure, bars: &[LabeledValue]) {
    let values: Vec<(String, u64)> = bars
        .iter()
        .map(|b| (b.label.clone(), b.value.max(0.0).round() as u64))
        .collect();
    render_bar_values(f, area, figure, &values, Color::Cyan);
}

fn render_histogram(f: &mut Frame, area: Rect, figure: &Figure, bins: &[HistogramBin]) {
    let values: Vec<(String, u64)> = bins
        .iter()
        .map(|b| (format!("{}-{}", b.start, b.end), b.count))
        .collect();
    render_bar_values(f, area, figure, &values, Color::Blue);
}

fn render_pie(f: &mut Frame, area: Rect, figure: &Figure, slices: &[PieSlice]) {
    let values: Vec<(String, u64)> = slices
        .iter()
        .map(|s| (format!("{} {}", s.label, s.percent_label), s.count))
        .collect();
    render_bar_values(f, area, figure, &values, Color::Gray);
}

fn header_row(labels: Vec<String>) -> Row<'static> {
    let cells = labels.into_iter().map(|h| {
        Cell::from(h).style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
    });
    Row::new(cells).style(Style::default().bg(Color::DarkGray)).height(1)
}

fn render_boxplot(f: &mut Frame, area: Rect, figure: &Figure, groups: &[BoxSummary]) {
    let header = header_row(
        ["Type", "n", "Low", "Q1", "Median", "Q3", "High", "Outliers"]
            .iter()
            .map(|h| h.to_string())
            .collect(),
    );

    let rows = groups.iter().map(|g| {
        Row::new(vec![
            Cell::from(g.label.clone()),
            Cell::from(g.count.to_string()),
            Cell::from(format!("{:.2}", g.whisker_low)),
            Cell::from(format!("{:.2}", g.q1)),
            Cell::from(format!("{:.2}", g.median)).style(Style::default().fg(Color::Cyan)),
            Cell::from(format!("{:.2}", g.q3)),
            Cell::from(format!("{:.2}", g.whisker_high)),
            Cell::from(g.outliers.len().to_string()).style(Style::default().fg(Color::Red)),
        ])
    });

    let table = Table::new(rows, [Constraint::Length(14); 8])
        .header(header)
        .block(figure_block(figure));

    f.render_widget(table, area);
}

fn bounds(values: impl Iterator<Item = f64>) -> [f64; 2] {
    let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));
    if !min.is_finite() {
        return [0.0, 1.0];
    }
    if min == max {
        return [min - 1.0, max + 1.0];
    }
    [min, max]
}

fn axis_labels(bounds: [f64; 2]) -> Vec<Span<'static>> {
    let mid = (bounds[0] + bounds[1]) / 2.0;
    vec![
        Span::raw(format!("{:.0}", bounds[0])),
        Span::raw(format!("{:.0}", mid)),
        Span::raw(format!("{:.0}", bounds[1])),
    ]
}

fn render_line(f: &mut Frame, area: Rect, figure: &Figure, points: &[LinePoint], highlight: Option<&DateSpan>) {
    let Some(origin) = points.first().map(|p| p.date) else {
        f.render_widget(Paragraph::new("No data").block(figure_block(figure)), area);
        return;
    };
    let day = |date: chrono::NaiveDate| (date - origin).num_days() as f64;

    let data: Vec<(f64, f64)> = points.iter().map(|p| (day(p.date), p.value)).collect();
    let x_bounds = bounds(data.iter().map(|(x, _)| *x));
    let y_bounds = bounds(data.iter().map(|(_, y)| *y));

    // Holiday span drawn as a flat band along the bottom of the plot
    let band: Vec<(f64, f64)> = highlight
        .map(|span| {
            let (start, end) = (day(span.start).max(x_bounds[0]), day(span.end).min(x_bounds[1]));
            if start > end {
                return Vec::new();
            }
            ((start as i64)..=(end as i64))
                .map(|x| (x as f64, y_bounds[0]))
                .collect()
        })
        .unwrap_or_default();

    let mut datasets = vec![Dataset::default()
        .name(figure.y_label.clone())
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Gray))
        .data(&data)];
    if let Some(span) = highlight {
        datasets.push(
            Dataset::default()
                .name(span.label.clone())
                .marker(symbols::Marker::Block)
                .graph_type(GraphType::Scatter)
                .style(Style::default().fg(Color::Yellow))
                .data(&band),
        );
    }

    let last = points.last().map(|p| p.date).unwrap_or(origin);
    let chart = Chart::new(datasets)
        .block(figure_block(figure))
        .x_axis(
            Axis::default()
                .title(figure.x_label.clone())
                .bounds(x_bounds)
                .labels(vec![Span::raw(origin.to_string()), Span::raw(last.to_string())]),
        )
        .y_axis(
            Axis::default()
                .title(figure.y_label.clone())
                .bounds(y_bounds)
                .labels(axis_labels(y_bounds)),
        );

    f.render_widget(chart, area);
}

fn render_scatter(f: &mut Frame, area: Rect, figure: &Figure, series: &[ScatterSeries]) {
    let x_bounds = bounds(series.iter().flat_map(|s| s.points.iter().map(|p| p.0)));
    let y_bounds = bounds(series.iter().flat_map(|s| s.points.iter().map(|p| p.1)));

    let datasets = series
        .iter()
        .enumerate()
        .map(|(i, s)| {
            Dataset::default()
                .name(s.label.clone())
                .marker(symbols::Marker::Dot)
                .graph_type(GraphType::Scatter)
                .style(Style::default().fg(SERIES_COLORS[i % SERIES_COLORS.len()]))
                .data(&s.points)
        })
        .collect();

    let chart = Chart::new(datasets)
        .block(figure_block(figure))
        .x_axis(
            Axis::default()
                .title(figure.x_label.clone())
                .bounds(x_bounds)
                .labels(axis_labels(x_bounds)),
        )
        .y_axis(
            Axis::default()
                .title(figure.y_label.clone())
                .bounds(y_bounds)
                .labels(axis_labels(y_bounds)),
        );

    f.render_widget(chart, area);
}

fn heat_color(count: u64, max: u64) -> Color {
    if count == 0 || max == 0 {
        return Color::Reset;
    }
    match count * 4 / max {
        0 => Color::LightBlue,
        1 | 2 => Color::Blue,
        _ => Color::Rgb(8, 48, 107),
    }
}

fn render_heatmap(f: &mut Frame, area: Rect, figure: &Figure, rows: &[String], columns: &[String], counts: &[Vec<u64>]) {
    let max = counts.iter().flatten().copied().max().unwrap_or(0);

    let mut labels = vec![figure.y_label.clone()];
    labels.extend(columns.iter().map(|c| format!("{} {}", figure.x_label, c)));
    let header = header_row(labels);

    let table_rows = rows.iter().zip(counts).map(|(label, row)| {
        let mut cells = vec![Cell::from(label.clone())];
        cells.extend(row.iter().map(|count| {
            Cell::from(count.to_string()).style(Style::default().fg(Color::White).bg(heat_color(*count, max)))
        }));
        Row::new(cells)
    });

    let widths: Vec<Constraint> = std::iter::once(Constraint::Length(16))
        .chain(columns.iter().map(|_| Constraint::Length(12)))
        .collect();

    let table = Table::new(table_rows, widths)
        .header(header)
        .block(figure_block(figure));

    f.render_widget(table, area);
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{}...", head)
    }
}

fn render_table(f: &mut Frame, area: Rect, app: &mut App) {
    let header = header_row(
        ["ID", "Date", "Name", "Category", "Type", "Rating", "Price", "Avg Revenue"]
            .iter()
            .map(|h| h.to_string())
            .collect(),
    );

    let rows = app.table.rows.iter().map(|row| {
        let color = match row.category.as_str() {
            "Travel" => Color::Cyan,
            "Vacation" => Color::Green,
            _ => Color::White,
        };

        Row::new(vec![
            Cell::from(row.unique_id.to_string()),
            Cell::from(row.date.to_string()),
            Cell::from(truncate(&row.name, 28)),
            Cell::from(row.category.clone()).style(Style::default().fg(color)),
            Cell::from(row.subtype.clone()).style(Style::default().fg(color)),
            Cell::from(format!("{}", row.rating)),
            Cell::from(format!("{:.2}", row.price)),
            Cell::from(format!("{:.2}", row.average_revenue)),
        ])
        .height(1)
    });

    let table = Table::new(
        rows,
        [
            Constraint::Length(6),
            Constraint::Length(12),
            Constraint::Length(30),
            Constraint::Length(10),
            Constraint::Length(12),
            Constraint::Length(8),
            Constraint::Length(12),
            Constraint::Length(14),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(" Cleaned Lodging Records "),
    )
    .highlight_style(
        Style::default()
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD),
    )
    .highlight_symbol("→ ");

    f.render_stateful_widget(table, area, &mut app.state);
}

#[cfg(test)]
mod tests {
    use super::*;
    use lodging_insights::{build_figures, FigureOptions};

    fn app() -> App {
        let table = CleanedTable::default();
        let figures = build_figures(&table, &FigureOptions { holiday: None });
        App::new(figures, table)
    }

    #[test]
    fn test_page_navigation_wraps() {
        let mut app = app();
        assert_eq!(app.page_count(), 8);

        app.previous_page();
        assert!(app.on_table_page());
        assert_eq!(app.page_title(), "Cleaned Table");

        app.next_page();
        assert_eq!(app.page, 0);
        assert!(app.page_title().starts_with("Figure 1"));
    }

    #[test]
    fn test_row_navigation_on_empty_table() {
        let mut app = app();
        app.next_row();
        app.previous_row();
        assert_eq!(app.state.selected(), None);
    }

    #[test]
    fn test_bounds_degenerate() {
        assert_eq!(bounds(std::iter::empty()), [0.0, 1.0]);
        assert_eq!(bounds([5.0].into_iter()), [4.0, 6.0]);
        assert_eq!(bounds([1.0, 3.0, 2.0].into_iter()), [1.0, 3.0]);
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Lake Cabin", 28), "Lake Cabin");
        assert_eq!(truncate("A very long lodging name indeed", 10), "A very ...");
    }
}
