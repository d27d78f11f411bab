use macroquad::prelude::*;

use crate::domain::Grid;

const ALIVE_RGBA: [u8; 4] = [255, 255, 255, 255];
const DEAD_RGBA: [u8; 4] = [0, 0, 0, 255];

/// Format large numbers with K/M/B suffixes
pub fn format_number(n: usize) -> String {
    if n >= 1_000_000_000 {
        format!("{:.1}B", n as f64 / 1_000_000_000.0)
    } else if n >= 1_000_000 {
        format!("{:.1}M", n as f64 / 1_000_000.0)
    } else if n >= 1_000 {
        format!("{:.1}K", n as f64 / 1_000.0)
    } else {
        format!("{}", n)
    }
}

/// RGBA8 pixels of a frame, one pixel per cell in grid order
pub fn frame_pixels(frame: &Grid) -> Vec<u8> {
    frame
        .cells()
        .iter()
        .flat_map(|cell| if cell.is_alive() { ALIVE_RGBA } else { DEAD_RGBA })
        .collect()
}

/// Position in a precomputed frame sequence, advanced by wall-clock time.
#[derive(Clone, Debug, PartialEq)]
pub struct Playback {
    pub frame: usize,
    pub frame_count: usize,
    pub is_paused: bool,
    pub looping: bool,
    frame_delay: f32,
    timer: f32,
}

impl Playback {
    pub fn new(frame_count: usize, frame_delay_ms: u64) -> Self {
        Self {
            frame: 0,
            frame_count,
            is_paused: false,
            looping: true,
            frame_delay: frame_delay_ms as f32 / 1000.0,
            timer: 0.0,
        }
    }

    /// Advance by `dt` seconds; returns true when the shown frame changed.
    pub fn tick(&mut self, dt: f32) -> bool {
        if self.is_paused || self.frame_count == 0 {
            return false;
        }
        self.timer += dt;
        let mut changed = false;
        while self.timer >= self.frame_delay {
            self.timer -= self.frame_delay;
            changed |= self.step_forward();
            if self.frame_delay <= 0.0 {
                break;
            }
        }
        changed
    }

    /// Move one frame forward, wrapping when looping is on
    pub fn step_forward(&mut self) -> bool {
        if self.frame + 1 < self.frame_count {
            self.frame += 1;
            true
        } else if self.looping && self.frame_count > 1 {
            self.frame = 0;
            true
        } else {
            false
        }
    }

    pub fn toggle_pause(&mut self) {
        self.is_paused = !self.is_paused;
    }

    pub fn restart(&mut self) {
        self.frame = 0;
        self.timer = 0.0;
    }
}

/// Texture extent for a `width` x `height` grid, if it fits a texture at all.
pub fn texture_size(width: usize, height: usize) -> Option<(u16, u16)> {
    Some((u16::try_from(width).ok()?, u16::try_from(height).ok()?))
}

/// GPU texture holding the frame currently on screen
pub struct FrameTexture {
    texture: Texture2D,
    width: u32,
    height: u32,
}

impl FrameTexture {
    /// `None` when the frame is too large for a texture.
    pub fn new(frame: &Grid) -> Option<Self> {
        let (w, h) = texture_size(frame.width(), frame.height())?;
        let texture = Texture2D::from_rgba8(w, h, &frame_pixels(frame));
        texture.set_filter(FilterMode::Nearest);
        Some(Self {
            texture,
            width: u32::from(w),
            height: u32::from(h),
        })
    }

    pub fn upload(&self, frame: &Grid) {
        self.texture
            .update_from_bytes(self.width, self.height, &frame_pixels(frame));
    }

    /// Stretch the frame over the whole window
    pub fn draw(&self) {
        draw_texture_ex(
            &self.texture,
            0.0,
            0.0,
            WHITE,
            DrawTextureParams {
                dest_size: Some(vec2(screen_width(), screen_height())),
                ..Default::default()
            },
        );
    }
}

/// Small status line in the top-left corner
pub fn draw_overlay(playback: &Playback, frame: &Grid, engine: &str) {
    let (w, h) = frame.dimensions();
    let text = format!(
        "{engine} | gen {}/{} | {}x{} | alive {} | {} fps{}",
        playback.frame + 1,
        playback.frame_count,
        w,
        h,
        format_number(frame.count_alive()),
        get_fps(),
        if playback.is_paused { " | paused" } else { "" }
    );
    draw_rectangle(0.0, 0.0, measure_text(&text, None, 18, 1.0).width + 16.0, 26.0, Color::from_rgba(0, 0, 0, 180));
    draw_text(&text, 8.0, 18.0, 18.0, Color::from_rgba(0, 255, 150, 255));
}
