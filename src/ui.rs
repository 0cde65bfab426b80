pub mod screen;

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::Widget,
};

use crate::{app::App, celebration::Celebration};

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 2;
const PREVIEW_ROWS: usize = 10;

const PARTICLE_COLORS: [Color; 7] = [
    Color::Yellow,
    Color::Magenta,
    Color::Cyan,
    Color::Green,
    Color::Red,
    Color::Blue,
    Color::LightYellow,
];

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        screen::current_screen(self.state).render(self, area, buf);

        if self.celebration.is_active {
            render_celebration(&self.celebration, area, buf);
        }
    }
}

/// Draw particles over whatever is already in `buf`.
fn render_celebration(celebration: &Celebration, area: Rect, buf: &mut Buffer) {
    for particle in &celebration.particles {
        if particle.x < 0.0 || particle.y < 0.0 {
            continue;
        }
        let (x, y) = (particle.x as u16, particle.y as u16);
        if x >= area.width || y >= area.height {
            continue;
        }

        let color = PARTICLE_COLORS[particle.color_index % PARTICLE_COLORS.len()];
        let fade = 1.0 - particle.age / particle.max_age;
        let style = match (particle.anchored, fade) {
            (true, _) => Style::default().fg(color).add_modifier(Modifier::BOLD),
            (false, f) if f > 0.5 => Style::default().fg(color),
            (false, _) => Style::default().fg(color).add_modifier(Modifier::DIM),
        };

        if let Some(cell) = buf.cell_mut((area.x + x, area.y + y)) {
            cell.set_char(particle.symbol).set_style(style);
        }
    }
}
