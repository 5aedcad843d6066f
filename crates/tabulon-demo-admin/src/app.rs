#![forbid(unsafe_code)]

//! The demo admin page: a searchable, paginated member table with a
//! detail modal and a removal confirmation sheet.

use std::io;
use std::time::{Duration, Instant};

use tracing::debug;

use tabulon::prelude::*;
use tabulon::{Block, Color, Flex, MouseButton, MouseEventKind};

use crate::data::{Member, Status};
use crate::term::TerminalGuard;

const TICK: Duration = Duration::from_millis(120);
const PAGE_SIZE: u32 = 10;

const TABLE_HIT: HitId = HitId::new(1);
const DETAIL_HIT: HitId = HitId::new(2);
const CONFIRM_HIT: HitId = HitId::new(3);

pub struct App {
    all: Vec<Member>,
    filtered: Vec<Member>,
    columns: Vec<Column<Member>>,
    search: SearchInput,
    table_state: DataTableState,
    page: u32,
    loading: bool,
    lock: InputLock,
    detail: OverlayState,
    confirm: OverlayState,
    detail_member: Option<Member>,
    should_quit: bool,
}

fn status_style(status: Status) -> Style {
    match status {
        Status::Active => Style::new().fg(Color::GREEN),
        Status::Pending => Style::new().fg(Color::YELLOW),
        Status::Alumni => Style::new().fg(Color::GRAY),
    }
}

fn columns() -> Vec<Column<Member>> {
    vec![
        Column::new("Name", |m: &Member| Some(m.name.into())).width(Constraint::Min(16)),
        Column::new("Programme", |m: &Member| Some(m.program.into()))
            .width(Constraint::Min(14)),
        Column::new("Year", |m: &Member| Some(CellValue::Uint(m.year as u64)))
            .width(Constraint::Fixed(4)),
        Column::styled("Status", |m: &Member, _| {
            (m.status.label().to_string(), status_style(m.status))
        })
        .width(Constraint::Fixed(8)),
        Column::new("Visits", |m: &Member| m.visits.map(CellValue::Uint))
            .width(Constraint::Fixed(6)),
    ]
}

impl App {
    pub fn new(members: Vec<Member>) -> Self {
        let lock = InputLock::new();
        let mut search = SearchInput::new()
            .with_placeholder("Filter by name, email, or programme")
            .with_debounce(Duration::from_millis(150));
        search.set_focused(false);

        Self {
            filtered: members.clone(),
            all: members,
            columns: columns(),
            search,
            table_state: DataTableState::default(),
            page: 1,
            loading: false,
            detail: OverlayState::new(lock.clone(), DETAIL_HIT),
            confirm: OverlayState::new(lock.clone(), CONFIRM_HIT),
            lock,
            detail_member: None,
            should_quit: false,
        }
    }

    pub fn run(mut self) -> io::Result<()> {
        let mut term = TerminalGuard::enter()?;
        let (width, height) = term.size()?;
        let mut frame = Frame::with_hit_grid(width, height);

        while !self.should_quit {
            frame.reset();
            self.render(&mut frame);
            term.present(&frame)?;

            match term.poll_event(TICK)? {
                Some(Event::Resize { width, height }) => {
                    frame = Frame::with_hit_grid(width, height);
                }
                Some(event) => self.update(&event, &frame, Instant::now()),
                None => self.tick(Instant::now()),
            }
        }
        Ok(())
    }

    // --- Derived pagination ---

    fn total_pages(&self) -> u32 {
        (self.filtered.len() as u32).div_ceil(PAGE_SIZE)
    }

    fn page_rows(&self) -> &[Member] {
        let start = ((self.page - 1) * PAGE_SIZE) as usize;
        let end = (start + PAGE_SIZE as usize).min(self.filtered.len());
        if start >= self.filtered.len() {
            &[]
        } else {
            &self.filtered[start..end]
        }
    }

    fn set_page(&mut self, page: u32) {
        let clamped = page.clamp(1, self.total_pages().max(1));
        if clamped != self.page {
            debug!(page = clamped, "page change");
            self.page = clamped;
            self.table_state.select(None);
            // One tick of simulated fetch latency so the loading overlay
            // is visible in the demo.
            self.loading = true;
        }
    }

    fn apply_query(&mut self, query: &str) {
        let needle = query.to_lowercase();
        self.filtered = self
            .all
            .iter()
            .filter(|m| {
                needle.is_empty()
                    || m.name.to_lowercase().contains(&needle)
                    || m.email.to_lowercase().contains(&needle)
                    || m.program.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect();
        self.page = 1;
        self.table_state.select(None);
        debug!(matches = self.filtered.len(), query, "filter applied");
    }

    fn selected_member(&self) -> Option<&Member> {
        self.table_state.selected.and_then(|i| self.page_rows().get(i))
    }

    // --- Event handling ---

    fn tick(&mut self, now: Instant) {
        self.loading = false;
        if let Some(SearchEvent::Changed(query)) = self.search.poll(now) {
            self.apply_query(&query);
        }
    }

    fn update(&mut self, event: &Event, frame: &Frame, now: Instant) {
        if let Event::Mouse(mouse) = event {
            if mouse.kind == MouseEventKind::Down(MouseButton::Left) {
                self.handle_click(mouse.x, mouse.y, frame);
            }
            return;
        }

        // Overlays capture keys first, topmost down.
        if self.confirm.is_open() {
            if self.confirm.handle_event(event) {
                return;
            }
            if let Event::Key(key) = event {
                match key.code {
                    KeyCode::Char('y') | KeyCode::Enter => self.remove_detail_member(),
                    KeyCode::Char('n') => self.confirm.close(),
                    _ => {}
                }
            }
            return;
        }
        if self.detail.is_open() {
            if self.detail.handle_event(event) {
                self.detail_member = None;
                return;
            }
            if let Event::Key(key) = event {
                if key.code == KeyCode::Char('d') {
                    self.confirm.open();
                }
            }
            return;
        }

        if self.search.is_focused() {
            if let Event::Key(key) = event {
                match key.code {
                    KeyCode::Escape | KeyCode::Tab | KeyCode::Enter => {
                        self.search.set_focused(false);
                        return;
                    }
                    _ => {}
                }
            }
            if let Some(SearchEvent::Changed(query)) = self.search.handle_event(event, now) {
                self.apply_query(&query);
            }
            return;
        }

        let Event::Key(key) = event else {
            return;
        };
        match key.code {
            KeyCode::Char('q') | KeyCode::Escape => self.should_quit = true,
            KeyCode::Char('/') => self.search.set_focused(true),
            KeyCode::Down | KeyCode::Char('j') => {
                self.table_state.select_next(self.page_rows().len());
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.table_state.select_prev(self.page_rows().len());
            }
            KeyCode::Left | KeyCode::Char('h') => self.set_page(self.page.saturating_sub(1)),
            KeyCode::Right | KeyCode::Char('l') => self.set_page(self.page + 1),
            KeyCode::Enter => self.open_detail(),
            KeyCode::Char('d') => {
                if self.selected_member().is_some() {
                    self.open_detail();
                    self.confirm.open();
                }
            }
            _ => {}
        }
    }

    fn handle_click(&mut self, x: u16, y: u16, frame: &Frame) {
        let Some((id, region, data)) = frame.hit_test(x, y) else {
            return;
        };

        // Open overlays own the pointer while the lock is held.
        if self.confirm.is_open() {
            self.confirm.handle_hit(id, region);
            return;
        }
        if self.detail.is_open() {
            if self.detail.handle_hit(id, region) && !self.detail.is_open() {
                self.detail_member = None;
            }
            return;
        }

        if id == TABLE_HIT {
            match region {
                HitRegion::Button => self.set_page(data as u32),
                HitRegion::Content => {
                    self.table_state.select(Some(data as usize));
                    self.open_detail();
                }
                HitRegion::Backdrop => {}
            }
        }
    }

    fn open_detail(&mut self) {
        if let Some(member) = self.selected_member().cloned() {
            debug!(id = %member.id, "detail opened");
            self.detail_member = Some(member);
            self.detail.open();
        }
    }

    fn remove_detail_member(&mut self) {
        if let Some(member) = self.detail_member.take() {
            debug!(id = %member.id, "member removed");
            self.all.retain(|m| m.id != member.id);
            let query = self.search.value().to_string();
            self.apply_query(&query);
        }
        self.confirm.close();
        self.detail.close();
    }

    // --- Rendering ---

    fn render(&mut self, frame: &mut Frame) {
        let area = frame.bounds();
        let regions = Flex::vertical()
            .constraints([
                Constraint::Fixed(1),
                Constraint::Fixed(1),
                Constraint::Fill,
                Constraint::Fixed(1),
            ])
            .split(area);

        frame.buffer.set_string(
            regions[0].x + 1,
            regions[0].y,
            "Member Admin",
            Style::new().bold(),
            regions[0].right(),
        );

        self.search.render(regions[1], frame);

        // Field-precise slicing: the table borrows `filtered` and
        // `columns` while `table_state` is borrowed mutably.
        let start = ((self.page - 1) * PAGE_SIZE) as usize;
        let end = (start + PAGE_SIZE as usize).min(self.filtered.len());
        let rows: &[Member] = if start >= self.filtered.len() {
            &[]
        } else {
            &self.filtered[start..end]
        };

        let pagination = Pagination::new(self.page, self.total_pages())
            .total(self.filtered.len() as u64)
            .page_size(PAGE_SIZE);
        let table = DataTable::new(&self.columns, rows)
            .block(Block::bordered().title("Members"))
            .hit_id(TABLE_HIT)
            .alt_row_style(Style::new().bg(Color::rgb(24, 24, 24)))
            .loading(self.loading)
            .pagination(pagination)
            .empty_message("No members match");
        StatefulWidget::render(&table, regions[2], frame, &mut self.table_state);

        let hints = if self.lock.is_locked() {
            "Esc close  ·  click outside to dismiss"
        } else if self.search.is_focused() {
            "Esc done  ·  type to filter"
        } else {
            "/ search  ·  j/k select  ·  h/l page  ·  Enter detail  ·  d remove  ·  q quit"
        };
        frame.buffer.set_string(
            regions[3].x + 1,
            regions[3].y,
            hints,
            Style::new().dim(),
            regions[3].right(),
        );

        if self.detail.is_open() {
            self.render_detail(area, frame);
        }
        if self.confirm.is_open() {
            self.render_confirm(area, frame);
        }
    }

    fn render_detail(&self, area: Rect, frame: &mut Frame) {
        let modal = Modal::new()
            .title("Member detail")
            .size(OverlaySize::Medium)
            .height(9)
            .hit_id(self.detail.hit_id());
        modal.render(area, frame);

        let content = modal.content_area(area);
        let Some(member) = self.detail_member.as_ref() else {
            return;
        };
        let lines = [
            format!("Name:       {}", member.name),
            format!("Email:      {}", member.email),
            format!("Programme:  {}", member.program),
            format!("Year:       {}", member.year),
            format!("Status:     {}", member.status.label()),
            match member.visits {
                Some(n) => format!("Visits:     {n}"),
                None => "Visits:     —".to_string(),
            },
        ];
        for (i, line) in lines.iter().enumerate() {
            let y = content.y + i as u16;
            if y >= content.bottom() {
                break;
            }
            frame
                .buffer
                .set_string(content.x + 1, y, line, Style::default(), content.right());
        }
    }

    fn render_confirm(&self, area: Rect, frame: &mut Frame) {
        let sheet = Sheet::new()
            .title("Remove member")
            .size(OverlaySize::Small)
            .hit_id(self.confirm.hit_id());
        sheet.render(area, frame);

        let content = sheet.content_area(area);
        let name = self
            .detail_member
            .as_ref()
            .map(|m| m.name)
            .unwrap_or_default();
        let lines = [
            format!("Remove {name} from the roster?"),
            String::new(),
            "[y] remove    [n] keep".to_string(),
        ];
        for (i, line) in lines.iter().enumerate() {
            let y = content.y + 1 + i as u16;
            if y >= content.bottom() {
                break;
            }
            frame
                .buffer
                .set_string(content.x + 1, y, line, Style::default(), content.right());
        }
    }
}
