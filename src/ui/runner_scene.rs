//! The main screen: the simulation's pixel canvas inside a bordered frame.
//!
//! The simulation draws itself into a [`PixelCanvas`] sized to its surface;
//! this module stamps the canvas row by row into the play field, centered,
//! and adds the status bar.

use super::game_common::{create_game_layout, game_layout, render_status_bar};
use super::pixel_canvas::PixelCanvas;
use crate::core::simulation::{Simulation, SimulationState};
use ratatui::{
    layout::Rect,
    style::Color,
    widgets::Paragraph,
    Frame,
};

const TITLE: &str = " Dino Dash ";
const BORDER_COLOR: Color = Color::Rgb(0x52, 0x52, 0x50);

/// Pixel size available for the simulation surface in a terminal of `area`.
pub fn play_field_pixels(area: Rect) -> (f64, f64) {
    let content = game_layout(area).content;
    (
        f64::from(content.width.max(1)),
        f64::from(content.height.max(1)) * 2.0,
    )
}

/// Draw one frame of the game.
pub fn render_runner_scene(frame: &mut Frame, area: Rect, sim: &Simulation, canvas: &PixelCanvas) {
    let layout = create_game_layout(frame, area, TITLE, BORDER_COLOR);
    render_play_field(frame, layout.content, canvas);
    render_status(frame, layout.status_bar, sim);
}

fn render_play_field(frame: &mut Frame, area: Rect, canvas: &PixelCanvas) {
    if area.width == 0 || area.height == 0 {
        return;
    }

    let width = (canvas.cols() as u16).min(area.width);
    let height = (canvas.rows() as u16).min(area.height);
    let x = area.x + (area.width - width) / 2;
    let y = area.y + (area.height - height) / 2;

    for (row, line) in canvas.lines().into_iter().enumerate().take(height as usize) {
        let row_area = Rect::new(x, y + row as u16, width, 1);
        frame.render_widget(Paragraph::new(line), row_area);
    }
}

fn render_status(frame: &mut Frame, area: Rect, sim: &Simulation) {
    let speed = format!("speed x{:.2}", sim.game_speed());
    match sim.state() {
        SimulationState::WaitingToStart => render_status_bar(
            frame,
            area,
            "Ready",
            Color::Yellow,
            &[("[Space]", "Start"), ("[Q]", "Quit")],
        ),
        SimulationState::Running => render_status_bar(
            frame,
            area,
            &format!("Run!  {}", speed),
            Color::LightGreen,
            &[("[Space/Up]", "Jump"), ("[Q]", "Quit")],
        ),
        SimulationState::GameOver if sim.restart_armed() => render_status_bar(
            frame,
            area,
            &format!("Score {}  best {}", sim.score(), sim.high_score()),
            Color::LightRed,
            &[("[Space]", "Restart"), ("[Q]", "Quit")],
        ),
        SimulationState::GameOver => render_status_bar(
            frame,
            area,
            &format!("Score {}  best {}", sim.score(), sim.high_score()),
            Color::LightRed,
            &[("[Q]", "Quit")],
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::compute_scale_ratio;
    use crate::core::config::GameConfig;
    use crate::storage::MemoryHighScoreStore;
    use ratatui::{backend::TestBackend, Terminal};

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer.get(x, y).symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn test_play_field_pixels() {
        assert_eq!(play_field_pixels(Rect::new(0, 0, 100, 30)), (98.0, 52.0));
        assert_eq!(play_field_pixels(Rect::new(0, 0, 1, 1)), (1.0, 2.0));
    }

    #[test]
    fn test_renders_prompt_and_score() {
        let area = Rect::new(0, 0, 120, 30);
        let (w, h) = play_field_pixels(area);
        let ratio = compute_scale_ratio(w, h, 800.0, 200.0);
        let sim = Simulation::new(
            GameConfig::default(),
            ratio,
            Box::new(MemoryHighScoreStore::new(42)),
        )
        .unwrap();
        let mut canvas = PixelCanvas::for_surface(sim.surface_size());
        sim.draw(&mut canvas);

        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.size();
                render_runner_scene(frame, area, &sim, &canvas);
            })
            .unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("Dino Dash"));
        assert!(text.contains("HI 000042"));
        assert!(text.contains("Press space to start"));
        assert!(text.contains("Ready"));
    }
}
