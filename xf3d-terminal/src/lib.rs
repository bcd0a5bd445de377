/// Terminal front end: key input, 3D view, matrix readout and projections
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self, ClearType},
};
use std::io::{self, stdout, Write};
use xf3d_core::{dispatch, format_matrix, project, Bounds2, Camera, Key, Scene};

pub mod cli;
pub mod renderer;

pub use renderer::AsciiRenderer;

const LEGEND: &[&str] = &[
    "Move along X: Left/Right",
    "Move along Y: Up/Down",
    "Move along Z: , / .",
    "Rotate about Z: r / t",
    "Rotate about X: z / x",
    "Rotate about Y: c / v",
    "Scale: = / -",
    "Projections: 1 / 2 / 3",
    "Quit: q / Esc",
];

/// Map a crossterm key code onto the toolkit-independent key set
pub fn translate_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Up => Some(Key::Up),
        KeyCode::Down => Some(Key::Down),
        KeyCode::Left => Some(Key::Left),
        KeyCode::Right => Some(Key::Right),
        KeyCode::Char(c) => Some(Key::Char(c)),
        _ => None,
    }
}

fn is_quit(event: &KeyEvent) -> bool {
    match event.code {
        KeyCode::Esc | KeyCode::Char('q') => true,
        KeyCode::Char('c') => event.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

/// Screen regions for a terminal of a given size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub columns: u16,
    /// 3D view, below the title row
    pub view: (u16, u16),
    /// First column of the text side panel
    pub side_column: u16,
    pub side_width: u16,
    /// Top row and size of the projection canvas
    pub projection_row: u16,
    pub projection: (u16, u16),
}

impl Layout {
    pub fn new(columns: u16, rows: u16) -> Self {
        let body = rows.saturating_sub(1);
        let view_width = (u32::from(columns) * 3 / 5) as u16;
        let side_column = view_width.saturating_add(1).min(columns);
        let side_width = columns - side_column;

        // Title over matrix (5 rows), gap, legend, gap, projection title
        let projection_row = 1 + 5 + 1 + LEGEND.len() as u16 + 1 + 1;
        // One row under the canvas for the horizontal axis label
        let projection_height = rows.saturating_sub(projection_row + 1);

        Self {
            columns,
            view: (view_width, body),
            side_column,
            side_width,
            projection_row,
            projection: (side_width, projection_height),
        }
    }
}

/// Main application struct for the terminal demo
pub struct TerminalApp {
    camera: Camera,
    view: AsciiRenderer,
    panel: AsciiRenderer,
    layout: Layout,
    running: bool,
}

impl TerminalApp {
    pub fn new() -> io::Result<Self> {
        let (columns, rows) = terminal::size()?;
        let layout = Layout::new(columns, rows);

        Ok(Self {
            camera: Camera::default(),
            view: AsciiRenderer::new(layout.view.0 as usize, layout.view.1 as usize),
            panel: AsciiRenderer::new(layout.projection.0 as usize, layout.projection.1 as usize),
            layout,
            running: true,
        })
    }

    /// Run until the user quits, returning the final scene
    pub fn run(&mut self, scene: Scene) -> io::Result<Scene> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;

        let result = self.main_loop(scene);

        // Cleanup
        terminal::disable_raw_mode()?;
        execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show)?;

        result
    }

    fn main_loop(&mut self, mut scene: Scene) -> io::Result<Scene> {
        self.render(&scene)?;

        while self.running {
            // Each event is fully handled and drawn before the next is read
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if is_quit(&key) {
                        self.running = false;
                        continue;
                    }
                    if let Some(key) = translate_key(key.code) {
                        scene = dispatch(scene, key);
                        log::debug!("{}", format_matrix(scene.matrix()));
                    }
                }
                Event::Resize(columns, rows) => self.resize(columns, rows),
                _ => continue,
            }

            self.render(&scene)?;
        }

        Ok(scene)
    }

    fn resize(&mut self, columns: u16, rows: u16) {
        log::debug!("terminal resized to {}x{}", columns, rows);
        self.layout = Layout::new(columns, rows);
        self.view.resize(self.layout.view.0 as usize, self.layout.view.1 as usize);
        self.panel.resize(
            self.layout.projection.0 as usize,
            self.layout.projection.1 as usize,
        );
    }

    fn render(&mut self, scene: &Scene) -> io::Result<()> {
        let layout = self.layout;
        let mut stdout = stdout();
        queue!(stdout, terminal::Clear(ClearType::All))?;

        // 3D view
        self.view.clear();
        self.view.render_wireframe(scene.vertices(), scene.model().edges(), &self.camera);
        self.view.draw(&mut stdout, 0, 1)?;

        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            SetForegroundColor(Color::Yellow),
            Print(fit("XF3D Affine Transform Demo | q/Esc=Quit", layout.columns as usize)),
            ResetColor
        )?;

        // Side panel text
        let mut row = 1;
        for line in format_matrix(scene.matrix()).lines() {
            self.print_at(&mut stdout, row, line, Color::Cyan)?;
            row += 1;
        }
        row += 1;
        for line in LEGEND {
            self.print_at(&mut stdout, row, line, Color::Grey)?;
            row += 1;
        }

        // Projection panel, when there is room for it
        if let Some(plane) = scene.projection().filter(|_| layout.projection.1 > 0) {
            let points = project(scene.vertices(), plane);
            let (horizontal, vertical) = plane.axis_labels();
            let heading = format!("{} ({} across, {} up)", plane.title(), horizontal, vertical);
            self.print_at(&mut stdout, layout.projection_row - 1, &heading, Color::Yellow)?;

            if let Some(bounds) = Bounds2::enclosing(&points) {
                self.panel.clear();
                self.panel.render_projection(&points, scene.model().edges(), &bounds);
                self.panel.draw(&mut stdout, layout.side_column, layout.projection_row)?;

                let range = format!(
                    "{} [{:.2}, {:.2}]  {} [{:.2}, {:.2}]",
                    horizontal, bounds.min.x, bounds.max.x, vertical, bounds.min.y, bounds.max.y
                );
                let below = layout.projection_row + layout.projection.1;
                self.print_at(&mut stdout, below, &range, Color::DarkGrey)?;
            }
        }

        stdout.flush()?;
        Ok(())
    }

    fn print_at<W: Write>(
        &self,
        writer: &mut W,
        row: u16,
        text: &str,
        color: Color,
    ) -> io::Result<()> {
        queue!(
            writer,
            cursor::MoveTo(self.layout.side_column, row),
            SetForegroundColor(color),
            Print(fit(text, self.layout.side_width as usize)),
            ResetColor
        )
    }
}

/// Truncate `text` to at most `width` characters
fn fit(text: &str, width: usize) -> String {
    text.chars().take(width).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translate_key() {
        assert_eq!(translate_key(KeyCode::Up), Some(Key::Up));
        assert_eq!(translate_key(KeyCode::Char('=')), Some(Key::Char('=')));
        assert_eq!(translate_key(KeyCode::F(1)), None);
    }

    #[test]
    fn test_quit_keys() {
        assert!(is_quit(&KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)));
        assert!(is_quit(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));
        // Plain `c` rotates about Y
        assert!(!is_quit(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::NONE)));
    }

    #[test]
    fn test_layout_splits_screen() {
        let layout = Layout::new(100, 40);
        assert_eq!(layout.view, (60, 39));
        assert_eq!(layout.side_column, 61);
        assert_eq!(layout.side_width, 39);
        assert_eq!(layout.projection_row, 18);
        assert_eq!(layout.projection, (39, 21));
    }

    #[test]
    fn test_layout_tiny_terminal() {
        let layout = Layout::new(3, 2);
        assert_eq!(layout.projection.1, 0);
        assert!(layout.side_column <= 3);
    }

    #[test]
    fn test_fit_truncates() {
        assert_eq!(fit("Transformation", 5), "Trans");
        assert_eq!(fit("ab", 5), "ab");
    }
}
