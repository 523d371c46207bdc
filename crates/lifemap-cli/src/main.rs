use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use lifemap_config::Config;
use lifemap_engine::{Mindmap, Node, io as store, load_mindmap};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};
use std::{collections::HashSet, env, io::stdout, path::PathBuf, process};

/// One visible line of the flattened outline.
struct OutlineRow {
    /// Child indices from the top level down to this node.
    path: Vec<usize>,
    depth: usize,
    has_children: bool,
    expanded: bool,
    label: String,
}

struct App {
    document_path: PathBuf,
    mindmap: Mindmap,
    available_tags: Vec<String>,
    collapsed: HashSet<Vec<usize>>,
    rows: Vec<OutlineRow>,
    outline_state: ListState,
}

impl App {
    fn new(document_path: PathBuf) -> Result<Self> {
        let mut app = Self {
            document_path,
            mindmap: Mindmap::default(),
            available_tags: Vec::new(),
            collapsed: HashSet::new(),
            rows: Vec::new(),
            outline_state: ListState::default(),
        };
        app.reload()?;
        if !app.rows.is_empty() {
            app.outline_state.select(Some(0));
        }
        Ok(app)
    }

    /// Load the document, write the reconciled front-matter straight back
    /// (the registry self-heals on every load), and rebuild the rows.
    fn reload(&mut self) -> Result<()> {
        let raw = store::read_or_init_document(&self.document_path)?;
        let loaded = load_mindmap(&raw);
        store::write_document(&self.document_path, &loaded.reconciled_document)?;

        self.mindmap = loaded.mindmap;
        self.available_tags = loaded.available_tags.into_iter().collect();
        self.rebuild_rows();

        let selected = self.outline_state.selected().unwrap_or(0);
        if self.rows.is_empty() {
            self.outline_state.select(None);
        } else {
            self.outline_state
                .select(Some(selected.min(self.rows.len() - 1)));
        }
        Ok(())
    }

    fn rebuild_rows(&mut self) {
        let mut rows = Vec::new();
        for (index, node) in self.mindmap.nodes.iter().enumerate() {
            flatten_node(node, vec![index], 0, &self.collapsed, &mut rows);
        }
        self.rows = rows;
    }

    fn next_row(&mut self) {
        if self.rows.is_empty() {
            return;
        }
        let i = match self.outline_state.selected() {
            Some(i) => (i + 1) % self.rows.len(),
            None => 0,
        };
        self.outline_state.select(Some(i));
    }

    fn previous_row(&mut self) {
        if self.rows.is_empty() {
            return;
        }
        let i = match self.outline_state.selected() {
            Some(i) => {
                if i == 0 {
                    self.rows.len() - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        self.outline_state.select(Some(i));
    }

    fn toggle_selected(&mut self) {
        if let Some(index) = self.outline_state.selected()
            && let Some(row) = self.rows.get(index)
            && row.has_children
        {
            let path = row.path.clone();
            if !self.collapsed.remove(&path) {
                self.collapsed.insert(path);
            }
            self.rebuild_rows();
        }
    }

    fn selected_node(&self) -> Option<&Node> {
        let index = self.outline_state.selected()?;
        let row = self.rows.get(index)?;
        node_at(&self.mindmap, &row.path)
    }
}

fn flatten_node(
    node: &Node,
    path: Vec<usize>,
    depth: usize,
    collapsed: &HashSet<Vec<usize>>,
    rows: &mut Vec<OutlineRow>,
) {
    let expanded = !collapsed.contains(&path);
    rows.push(OutlineRow {
        path: path.clone(),
        depth,
        has_children: !node.children.is_empty(),
        expanded,
        label: node.text.clone(),
    });
    if expanded {
        for (index, child) in node.children.iter().enumerate() {
            let mut child_path = path.clone();
            child_path.push(index);
            flatten_node(child, child_path, depth + 1, collapsed, rows);
        }
    }
}

fn node_at<'a>(mindmap: &'a Mindmap, path: &[usize]) -> Option<&'a Node> {
    let (first, rest) = path.split_first()?;
    let mut node = mindmap.nodes.get(*first)?;
    for index in rest {
        node = node.children.get(*index)?;
    }
    Some(node)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    // Determine the document path from CLI args or the config file
    let args: Vec<String> = env::args().collect();
    let document_path = if args.len() == 2 {
        PathBuf::from(&args[1])
    } else if args.len() == 1 {
        match Config::load_or_default() {
            Ok(config) => config.save_path,
            Err(e) => {
                eprintln!("Error: Failed to load config file: {e}");
                eprintln!("Usage: {} [mindmap-file]", args[0]);
                process::exit(1);
            }
        }
    } else {
        eprintln!("Usage: {} [mindmap-file]", args[0]);
        process::exit(1);
    };

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app
    let app = App::new(document_path);

    let res = match app {
        Ok(mut app) => run_app(&mut terminal, &mut app),
        Err(e) => Err(e),
    };

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{err:?}");
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()>
where
    <B as ratatui::backend::Backend>::Error: Send + Sync + 'static,
{
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            match key.code {
                KeyCode::Char('q') => return Ok(()),
                KeyCode::Down | KeyCode::Char('j') => app.next_row(),
                KeyCode::Up | KeyCode::Char('k') => app.previous_row(),
                KeyCode::Enter | KeyCode::Char(' ') => app.toggle_selected(),
                KeyCode::Char('r') => app.reload()?,
                _ => {}
            }
        }
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .margin(1)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)].as_ref())
        .split(f.area());

    // Outline panel
    let outline_items: Vec<ListItem> = app
        .rows
        .iter()
        .map(|row| {
            let indent = "  ".repeat(row.depth);
            let marker = if !row.has_children {
                "· "
            } else if row.expanded {
                "▾ "
            } else {
                "▸ "
            };
            let display_text = format!("{}{}{}", indent, marker, row.label);
            ListItem::new(vec![Line::from(vec![Span::raw(display_text)])])
        })
        .collect();

    let title = format!("Outline — {}", app.document_path.display());
    let outline = List::new(outline_items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(Style::default().bg(Color::Yellow).fg(Color::Black));

    f.render_stateful_widget(outline, chunks[0], &mut app.outline_state);

    // Detail + registry panels
    let side = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)].as_ref())
        .split(chunks[1]);

    let detail_text = match app.selected_node() {
        Some(node) => {
            let mut lines = vec![Line::from(node.text.clone())];
            if let Some(link) = &node.link {
                lines.push(Line::from(format!("link: {link}")));
            }
            if !node.tags.is_empty() {
                lines.push(Line::from(format!("tags: {}", node.tags.join(", "))));
            }
            lines.push(Line::from(format!("children: {}", node.children.len())));
            lines
        }
        None => vec![Line::from("Select a node")],
    };

    let detail = Paragraph::new(detail_text)
        .block(Block::default().borders(Borders::ALL).title("Node"))
        .wrap(ratatui::widgets::Wrap { trim: true });
    f.render_widget(detail, side[0]);

    let tag_items: Vec<ListItem> = app
        .available_tags
        .iter()
        .map(|tag| ListItem::new(vec![Line::from(Span::raw(tag.clone()))]))
        .collect();
    let tags = List::new(tag_items).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Available tags"),
    );
    f.render_widget(tags, side[1]);

    // Instructions
    let help_text = Line::from(vec![
        Span::raw("q: Quit | "),
        Span::raw("↑/k: Previous | "),
        Span::raw("↓/j: Next | "),
        Span::raw("Enter/Space: Fold | "),
        Span::raw("r: Reload"),
    ]);
    let help = Paragraph::new(vec![help_text]).block(Block::default());

    let bottom_chunk = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)].as_ref())
        .split(f.area());

    f.render_widget(help, bottom_chunk[1]);
}
