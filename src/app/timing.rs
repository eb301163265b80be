use std::time::{Duration, Instant};

/// Longest step fed to animations, so a stalled frame does not skip a transition.
const MAX_FRAME_DT: f32 = 0.1;

pub struct FrameTiming {
    last_frame_time: Option<Instant>,
    last_fps_time: Instant,
    frame_count: u32,
    pub frame_dt: f32,
    base_title: String,
}

impl FrameTiming {
    pub fn new(base_title: String) -> Self {
        Self::starting_at(base_title, Instant::now())
    }

    fn starting_at(base_title: String, now: Instant) -> Self {
        Self {
            last_frame_time: None,
            last_fps_time: now,
            frame_count: 0,
            frame_dt: 1.0 / 60.0,
            base_title,
        }
    }

    /// Records a frame; returns a new window title twice a second.
    pub fn update(&mut self, now: Instant) -> Option<String> {
        let dt_duration = if let Some(last) = self.last_frame_time {
            now.saturating_duration_since(last)
        } else {
            Duration::from_millis(16)
        };
        self.last_frame_time = Some(now);
        self.frame_dt = dt_duration.as_secs_f32().clamp(0.0, MAX_FRAME_DT);

        self.frame_count = self.frame_count.saturating_add(1);
        let elapsed = now.saturating_duration_since(self.last_fps_time);
        if elapsed.as_secs_f32() < 0.5 {
            return None;
        }
        let fps = self.frame_count as f32 / elapsed.as_secs_f32();
        self.frame_count = 0;
        self.last_fps_time = now;
        Some(format!(
            "{} - {:.1} fps ({:.2} ms)",
            self.base_title,
            fps,
            self.frame_dt * 1000.0
        ))
    }
}
